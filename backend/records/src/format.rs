//! Fixed-layout rendering of a student record into reply text.

use std::fmt::Write as _;

use serde_json::Value;

use schoolbot_core::messages;
use schoolbot_core::record::{display_path, get_path};

/// Render a student record in the fixed Thai card layout.
///
/// Every field resolves through the same placeholder-substituting path
/// helper, so a partially populated (or entirely empty) record always
/// renders, never fails. Both grade-term slots appear by position.
pub fn format_student(record: &Value) -> String {
    let field = |path: &str| display_path(record, path);

    let mut out = String::new();
    let _ = writeln!(out, "ชื่อ: {}", field("name"));
    let _ = writeln!(out, "เลขประจำตัวนักเรียน: {}", field("studentId"));
    let _ = writeln!(out, "วันเกิด: {}", field("birthdate"));
    let _ = writeln!(out, "เลขประจำตัวประชาชน: {}", field("citizenId"));
    let _ = writeln!(out, "เพศ: {}", field("gender"));
    let _ = writeln!(out, "ที่อยู่: {}", field("address"));
    out.push('\n');
    let _ = writeln!(out, "ข้อมูลครอบครัว:");
    let _ = writeln!(out, "ชื่อผู้ปกครอง: {}", field("family.guardianName"));
    let _ = writeln!(out, "เบอร์โทรผู้ปกครอง: {}", field("family.guardianPhone"));
    out.push('\n');
    let _ = writeln!(out, "ข้อมูลการศึกษา:");
    let _ = writeln!(out, "ระดับชั้น: {}", field("education.class"));
    let _ = writeln!(out, "ห้องเรียน: {}", field("education.section"));
    let _ = writeln!(out, "ผลการเรียน:");
    let _ = writeln!(
        out,
        "- เทอม 1 ปี {} - GPA: {}",
        field("education.grades.0.year"),
        field("education.grades.0.GPA"),
    );
    let _ = writeln!(
        out,
        "- เทอม 2 ปี {} - GPA: {}",
        field("education.grades.1.year"),
        field("education.grades.1.GPA"),
    );
    out.push('\n');
    let _ = writeln!(out, "พฤติกรรม:");
    let _ = writeln!(out, "คะแนนพฤติกรรม: {}", field("behavior.goodnessScore"));
    let _ = writeln!(out, "กิจกรรมพฤติกรรม:");
    out.push_str(&format_activities(record));
    out
}

/// One line per behavior activity, or a single placeholder line when the
/// activities list is absent or not a list.
fn format_activities(record: &Value) -> String {
    let activities = match get_path(record, "behavior.activities") {
        Some(Value::Array(items)) => items,
        _ => return format!("{}\n", messages::NO_ACTIVITIES),
    };
    let mut out = String::new();
    for item in activities {
        let _ = writeln!(
            out,
            "- {}: {} คะแนน",
            display_path(item, "activity"),
            display_path(item, "points"),
        );
    }
    out
}
