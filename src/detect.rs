//! Input format detection.
//!
//! The converter reads delimited text and writes ZIP-based document
//! packages. Detection exists so that a document package passed where text
//! is expected (or the other way around) fails early with a clear error
//! instead of a confusing parse failure.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Detected file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// ZIP container (e.g. `.docx`)
    Zip,
    /// UTF-8 text (delimited data)
    Text,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Zip => write!(f, "ZIP package"),
            FileFormat::Text => write!(f, "UTF-8 text"),
        }
    }
}

/// ZIP local file header signature: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Number of leading bytes inspected for detection.
const SNIFF_LEN: usize = 512;

/// Detect the format of a file from its leading bytes.
///
/// # Example
/// ```no_run
/// use csv2docx::detect::{detect_format_from_path, FileFormat};
///
/// let format = detect_format_from_path("output.docx").unwrap();
/// assert_eq!(format, FileFormat::Zip);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<FileFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file).take(SNIFF_LEN as u64);
    let mut header = Vec::with_capacity(SNIFF_LEN);
    reader.read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the format from bytes.
///
/// Only the first 512 bytes are inspected. A multi-byte UTF-8 sequence cut
/// off at that boundary does not count as invalid.
///
/// # Returns
/// * `Ok(FileFormat)` when the data is a ZIP container or UTF-8 text
/// * `Err(Error::EmptyInput)` when there is no data at all
/// * `Err(Error::UnknownFormat)` when the data is neither
pub fn detect_format_from_bytes(data: &[u8]) -> Result<FileFormat> {
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }

    if data.starts_with(ZIP_MAGIC) {
        return Ok(FileFormat::Zip);
    }

    let head = &data[..data.len().min(SNIFF_LEN)];
    match std::str::from_utf8(head) {
        Ok(_) => Ok(FileFormat::Text),
        // Truncated sequence at the end of the sniffed window
        Err(e) if e.error_len().is_none() && head.len() == SNIFF_LEN => Ok(FileFormat::Text),
        Err(e) => Err(Error::UnknownFormat(format!(
            "not UTF-8 text (invalid byte at offset {})",
            e.valid_up_to()
        ))),
    }
}

/// Check if bytes look like a ZIP container.
pub fn is_zip_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}
