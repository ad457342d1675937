pub mod extract;
pub mod fields;
pub mod format;
pub mod shape;

pub use extract::extract_student_id;
pub use fields::field_path;
pub use format::format_student;
pub use shape::shape_record;
