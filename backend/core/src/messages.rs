//! Fixed user-facing reply texts.
//!
//! The bot talks to students and teachers in Thai; every branch of the
//! event handler replies with exactly one of these literals (or a
//! formatted record). Keeping them in one place keeps the handler and
//! its tests honest about which branch produced which reply.

/// First token of the save-command text protocol.
pub const SAVE_COMMAND: &str = "บันทึกข้อมูล";

/// Rendered in place of any absent record field.
pub const PLACEHOLDER: &str = "ไม่พบข้อมูล";

/// Rendered when `behavior.activities` is absent or not a list.
pub const NO_ACTIVITIES: &str = "ไม่พบข้อมูลกิจกรรม";

/// OCR produced no text at all for the image.
pub const NO_TEXT_IN_IMAGE: &str = "ไม่พบข้อความในรูปภาพ";

/// OCR produced text, but the student-id label was not in it.
pub const NO_ID_IN_IMAGE: &str = "ไม่พบเลขประจำตัวนักเรียนในรูปภาพ";

/// Lookup succeeded but no record exists for the id.
pub const STUDENT_NOT_FOUND: &str = "ไม่พบข้อมูลนักเรียนในฐานข้อมูล";

/// Upsert created a brand-new record.
pub const SAVE_CREATED: &str = "บันทึกข้อมูลนักเรียนใหม่สำเร็จ";

/// Upsert merged into an existing record.
pub const SAVE_UPDATED: &str = "อัปเดตข้อมูลนักเรียนสำเร็จ";

/// Generic failure while handling an image event.
pub const IMAGE_ERROR: &str = "เกิดข้อผิดพลาดในการวิเคราะห์รูปภาพ";

/// Generic failure while saving a record.
pub const SAVE_ERROR: &str =
    "เกิดข้อผิดพลาดในการบันทึกข้อมูลนักเรียน กรุณาตรวจสอบรูปแบบข้อมูล";

/// Generic failure while looking a record up.
pub const LOOKUP_ERROR: &str = "เกิดข้อผิดพลาดในการค้นหาข้อมูลนักเรียน";

/// Instructions shown for any message the router cannot classify.
pub const HELP: &str =
    "กรุณาส่งรูปภาพบัตรนักเรียนที่มีเลขประจำตัว หรือพิมพ์เลขประจำตัวนักเรียนเพื่อค้นหาข้อมูล";
