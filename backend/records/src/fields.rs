//! Translation table from human-readable field names to storage paths.
//!
//! The save-command protocol uses the Thai labels teachers already know;
//! storage uses dotted paths into the record tree. The table is plain
//! data so it can be extended without touching the shaper.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static FIELD_PATHS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ชื่อ", "name"),
        ("วันเกิด", "birthdate"),
        ("เลขประจำตัวประชาชน", "citizenId"),
        ("ที่อยู่", "address"),
        ("เพศ", "gender"),
        ("ชื่อผู้ปกครอง", "family.guardianName"),
        ("เบอร์โทรผู้ปกครอง", "family.guardianPhone"),
        ("ระดับชั้น", "education.class"),
        ("ห้องเรียน", "education.section"),
        ("ผลการเรียนเทอม 1", "education.grades.0.GPA"),
        ("ผลการเรียนเทอม 2", "education.grades.1.GPA"),
        ("ปีการศึกษาเทอม 1", "education.grades.0.year"),
        ("ปีการศึกษาเทอม 2", "education.grades.1.year"),
        ("คะแนนพฤติกรรม", "behavior.goodnessScore"),
        ("กิจกรรมพฤติกรรม", "behavior.activities"),
    ])
});

/// Resolve a user-supplied field name to its storage path.
///
/// Unknown names fall back to themselves, becoming a top-level field.
pub fn field_path(key: &str) -> &str {
    FIELD_PATHS.get(key).copied().unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_names_to_paths() {
        assert_eq!(field_path("ชื่อ"), "name");
        assert_eq!(field_path("ระดับชั้น"), "education.class");
        assert_eq!(field_path("ผลการเรียนเทอม 1"), "education.grades.0.GPA");
        assert_eq!(field_path("ปีการศึกษาเทอม 2"), "education.grades.1.year");
    }

    #[test]
    fn unknown_names_fall_back_to_identity() {
        assert_eq!(field_path("nickname"), "nickname");
        assert_eq!(field_path("ชื่อเล่น"), "ชื่อเล่น");
    }
}
