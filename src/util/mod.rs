// Utility Module
// Plaintext source helpers

pub mod file_ops;

pub use file_ops::{format_file_size, read_file, read_text_file, FileError, FileResult};
