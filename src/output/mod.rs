pub mod atomic;
pub mod csv_writer;
pub mod json_writer;

pub use atomic::AtomicFile;
pub use csv_writer::{format_villages, write_groups};
pub use json_writer::write_json;
