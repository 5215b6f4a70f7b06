//! Parsing module: delimited text in, documents back out.

mod docx_reader;
mod grid_loader;

pub use docx_reader::DocxReader;
pub use grid_loader::{GridLoader, DELIMITER, QUOTE};
