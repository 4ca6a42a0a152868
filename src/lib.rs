#[macro_use]
pub mod macros;

pub mod course_list_parser;
pub mod csv_export;
pub mod date;
pub mod fs_util;
pub mod schema;
