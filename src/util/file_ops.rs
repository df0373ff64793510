// File Operations
// Loads the plaintext source and formats sizes for reporting

use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur while loading the plaintext
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("File is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

/// Read entire file into memory
pub fn read_file(path: &Path) -> FileResult<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Read a UTF-8 text file into a string
pub fn read_text_file(path: &Path) -> FileResult<String> {
    let data = read_file(path)?;
    Ok(String::from_utf8(data)?)
}

/// Format file size for display
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.4} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
