//! Error types for csv2docx library.

use std::io;
use thiserror::Error;

/// Result type alias for csv2docx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading CSV data or writing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not in the expected format.
    #[error("Unknown file format: {0}")]
    UnknownFormat(String),

    /// The source contained no rows.
    #[error("Empty input: the source contains no rows")]
    EmptyInput,

    /// A table was requested with zero rows or zero columns.
    #[error("Invalid table size: {rows} rows x {cols} columns (both must be at least 1)")]
    InvalidTableSize {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
    },

    /// Error parsing delimited text.
    #[error("CSV parsing error: {0}")]
    Csv(String),

    /// Encoding error.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error reading or writing the ZIP container.
    #[error("ZIP container error: {0}")]
    Zip(String),

    /// Error reading or writing XML parts.
    #[error("XML error: {0}")]
    Xml(String),

    /// A required package part is missing.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// Error during document rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Error::Io(e),
            csv::ErrorKind::Utf8 { pos, err } => match pos {
                Some(pos) => Error::Encoding(format!(
                    "invalid UTF-8 in record {} (line {}): {}",
                    pos.record() + 1,
                    pos.line(),
                    err
                )),
                None => Error::Encoding(format!("invalid UTF-8: {}", err)),
            },
            kind => Error::Csv(format!("{:?}", kind)),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Zip(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyInput;
        assert_eq!(
            err.to_string(),
            "Empty input: the source contains no rows"
        );

        let err = Error::InvalidTableSize { rows: 0, cols: 3 };
        assert_eq!(
            err.to_string(),
            "Invalid table size: 0 rows x 3 columns (both must be at least 1)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_csv_utf8_error_conversion() {
        let data: &[u8] = b"ok;fine\n\xff\xfe;bad\n";
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .from_reader(data);
        let err = reader
            .records()
            .find_map(|r| r.err())
            .expect("second record is not UTF-8");
        let err: Error = err.into();
        assert!(matches!(err, Error::Encoding(_)));
        assert!(err.to_string().contains("record 2"));
    }
}
