//! Grid loader for semicolon-delimited text.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::detect::is_zip_bytes;
use crate::error::{Error, Result};
use crate::model::Grid;

/// Field separator.
pub const DELIMITER: u8 = b';';

/// Quote character. Quotes inside quoted fields are doubled.
pub const QUOTE: u8 = b'"';

/// Loads delimited text into a rectangular [`Grid`].
///
/// The source is read fully into memory when the loader is created, so the
/// underlying file handle is already closed by the time [`GridLoader::load`]
/// runs.
pub struct GridLoader {
    data: Vec<u8>,
}

impl GridLoader {
    /// Read a delimited text file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        log::debug!("Read {} bytes from {}", data.len(), path.display());
        Self::from_vec(data)
    }

    /// Use delimited text from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_vec(data.to_vec())
    }

    /// Read delimited text from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_vec(data)
    }

    fn from_vec(data: Vec<u8>) -> Result<Self> {
        if is_zip_bytes(&data) {
            return Err(Error::UnknownFormat(
                "input is a ZIP package, expected semicolon-delimited text".to_string(),
            ));
        }
        Ok(Self { data })
    }

    /// Parse the source into a grid, padding short rows with empty strings.
    ///
    /// A blank line is a record with no fields and becomes a row of empty
    /// cells. Fails with [`Error::EmptyInput`] when the source has no
    /// records, and with [`Error::InvalidTableSize`] when every record is
    /// blank.
    pub fn load(&self) -> Result<Grid> {
        let mut reader = ::csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .quote(QUOTE)
            .has_headers(false)
            .flexible(true)
            .from_reader(self.data.as_slice());

        // The csv reader skips blank lines; the scan puts them back in place.
        let shapes = record_shapes(&self.data);
        let mut records = reader.records();
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(shapes.len());
        for shape in &shapes {
            match shape {
                RecordShape::Blank => rows.push(Vec::new()),
                RecordShape::Fields => match records.next() {
                    Some(record) => rows.push(record?.iter().map(str::to_owned).collect()),
                    None => break,
                },
            }
        }

        if rows.is_empty() {
            return Err(Error::EmptyInput);
        }

        let blank = shapes.iter().filter(|s| **s == RecordShape::Blank).count();
        if blank > 0 {
            log::debug!("Kept {} blank lines as empty rows", blank);
        }

        let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
        let ragged = rows.iter().filter(|r| r.len() < widest).count();
        log::debug!("Loaded {} rows, widest row has {} fields", rows.len(), widest);
        if ragged > 0 {
            log::warn!(
                "Padding {} of {} rows to {} columns",
                ragged,
                rows.len(),
                widest
            );
        }

        Grid::from_rows(rows)
    }
}

/// Whether a physical record holds fields or is a blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordShape {
    Blank,
    Fields,
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    StartRecord,
    StartField,
    InField,
    InQuoted,
    QuoteInQuoted,
}

/// Split the source into records without parsing fields.
///
/// Follows the csv reader's rules: `\n`, `\r` and `\r\n` end a record
/// outside quotes, and a quote only opens a quoted field at field start.
fn record_shapes(data: &[u8]) -> Vec<RecordShape> {
    let mut shapes = Vec::new();
    let mut state = ScanState::StartRecord;
    let mut bytes = data.iter().copied().peekable();

    while let Some(b) = bytes.next() {
        state = match state {
            ScanState::InQuoted if b == QUOTE => ScanState::QuoteInQuoted,
            ScanState::InQuoted => ScanState::InQuoted,
            _ if b == b'\n' || b == b'\r' => {
                if b == b'\r' && bytes.peek() == Some(&b'\n') {
                    bytes.next();
                }
                shapes.push(match state {
                    ScanState::StartRecord => RecordShape::Blank,
                    _ => RecordShape::Fields,
                });
                ScanState::StartRecord
            }
            _ if b == DELIMITER => ScanState::StartField,
            ScanState::StartRecord | ScanState::StartField if b == QUOTE => ScanState::InQuoted,
            ScanState::QuoteInQuoted if b == QUOTE => ScanState::InQuoted,
            _ => ScanState::InField,
        };
    }

    if !matches!(state, ScanState::StartRecord) {
        shapes.push(RecordShape::Fields);
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Result<Grid> {
        GridLoader::from_bytes(text.as_bytes())?.load()
    }

    #[test]
    fn test_square_input() {
        let grid = load("a;b\nc;d\n").unwrap();
        assert_eq!(grid.rows(), [vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_short_row_padded() {
        let grid = load("a;b;c\nd;e\n").unwrap();
        assert_eq!(grid.rows(), [vec!["a", "b", "c"], vec!["d", "e", ""]]);
    }

    #[test]
    fn test_padding_law_three_five_two() {
        let grid = load("1;2;3\n1;2;3;4;5\n1;2\n").unwrap();
        assert_eq!(grid.column_count(), 5);
        assert_eq!(grid.row(0).unwrap(), ["1", "2", "3", "", ""]);
        assert_eq!(grid.row(1).unwrap(), ["1", "2", "3", "4", "5"]);
        assert_eq!(grid.row(2).unwrap(), ["1", "2", "", "", ""]);
    }

    #[test]
    fn test_quoted_fields() {
        let grid = load("\"x;y\";\"say \"\"hi\"\"\"\n\"multi\nline\";plain\n").unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.get(0, 0), Some("x;y"));
        assert_eq!(grid.get(0, 1), Some("say \"hi\""));
        assert_eq!(grid.get(1, 0), Some("multi\nline"));
        assert_eq!(grid.get(1, 1), Some("plain"));
    }

    #[test]
    fn test_commas_are_not_delimiters() {
        let grid = load("1,5;2,5\n").unwrap();
        assert_eq!(grid.row(0).unwrap(), ["1,5", "2,5"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let grid = load("a;b\r\nc;d\r\n").unwrap();
        assert_eq!(grid.rows(), [vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_no_trailing_newline() {
        let grid = load("a;b\nc;d").unwrap();
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn test_empty_fields_kept() {
        let grid = load(";;\n").unwrap();
        assert_eq!(grid.row(0).unwrap(), ["", "", ""]);
    }

    #[test]
    fn test_single_row() {
        let grid = load("only;one;row\n").unwrap();
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.column_count(), 3);
    }

    #[test]
    fn test_first_row_is_data() {
        let grid = load("header;row\nvalue;row\n").unwrap();
        assert_eq!(grid.get(0, 0), Some("header"));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(load(""), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_blank_lines_only() {
        assert!(matches!(
            load("\n\n\r\n"),
            Err(Error::InvalidTableSize { rows: 3, cols: 0 })
        ));
    }

    #[test]
    fn test_blank_line_becomes_empty_row() {
        let grid = load("a;b\n\nc;d\n").unwrap();
        assert_eq!(
            grid.rows(),
            [vec!["a", "b"], vec!["", ""], vec!["c", "d"]]
        );
    }

    #[test]
    fn test_blank_lines_keep_position() {
        let grid = load("\r\na;b;c\r\n\r\nd\n\n").unwrap();
        assert_eq!(grid.row_count(), 5);
        assert_eq!(grid.row(0).unwrap(), ["", "", ""]);
        assert_eq!(grid.row(1).unwrap(), ["a", "b", "c"]);
        assert_eq!(grid.row(2).unwrap(), ["", "", ""]);
        assert_eq!(grid.row(3).unwrap(), ["d", "", ""]);
        assert_eq!(grid.row(4).unwrap(), ["", "", ""]);
    }

    #[test]
    fn test_whitespace_line_is_a_field() {
        let grid = load("a;b\n  \n").unwrap();
        assert_eq!(grid.row(1).unwrap(), ["  ", ""]);
    }

    #[test]
    fn test_blank_lines_inside_quotes_are_text() {
        let grid = load("\"x\n\ny\";z\n").unwrap();
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.get(0, 0), Some("x\n\ny"));
    }

    #[test]
    fn test_record_shapes() {
        use RecordShape::{Blank, Fields};

        assert_eq!(record_shapes(b""), vec![]);
        assert_eq!(record_shapes(b"a\n"), vec![Fields]);
        assert_eq!(record_shapes(b"a"), vec![Fields]);
        assert_eq!(record_shapes(b"\n"), vec![Blank]);
        assert_eq!(record_shapes(b"a\r\rb"), vec![Fields, Blank, Fields]);
        assert_eq!(record_shapes(b";\n\n"), vec![Fields, Blank]);
        assert_eq!(record_shapes(b"\"a\"\"\n\"\n"), vec![Fields]);
        assert_eq!(record_shapes(b"5\" pipe\n\nx\n"), vec![Fields, Blank, Fields]);
    }

    #[test]
    fn test_invalid_utf8() {
        let result = GridLoader::from_bytes(b"a;b\n\xC3\x28;c\n").unwrap().load();
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_zip_input_rejected() {
        let result = GridLoader::from_bytes(b"PK\x03\x04rest-of-archive");
        assert!(matches!(result, Err(Error::UnknownFormat(_))));
    }

    #[test]
    fn test_from_reader() {
        let cursor = std::io::Cursor::new(b"k;v\n".to_vec());
        let grid = GridLoader::from_reader(cursor).unwrap().load().unwrap();
        assert_eq!(grid.row(0).unwrap(), ["k", "v"]);
    }

    #[test]
    fn test_missing_file() {
        let result = GridLoader::open("definitely/not/here.csv");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
