//! End-to-end conversion from a delimited text file to a `.docx` file.
//!
//! # Example
//!
//! ```no_run
//! use csv2docx::convert::{convert, ConvertConfig};
//! use csv2docx::RenderOptions;
//!
//! fn main() -> csv2docx::Result<()> {
//!     let config = ConvertConfig::new("data.csv", "table.docx");
//!     let report = convert(&config, &RenderOptions::default())?;
//!     println!("{}x{} table written", report.rows, report.columns);
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::parser::GridLoader;
use crate::render::{self, RenderOptions};

/// Default source path.
pub const DEFAULT_SOURCE: &str = "CSV_Test.csv";

/// Default destination path.
pub const DEFAULT_DESTINATION: &str = "output.docx";

/// Source and destination of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Delimited text file to read
    pub source_path: PathBuf,

    /// Document file to write (replaced if it exists)
    pub destination_path: PathBuf,
}

impl ConvertConfig {
    /// Create a configuration for the given paths.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source.into(),
            destination_path: destination.into(),
        }
    }

    /// Set the source path.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source_path = source.into();
        self
    }

    /// Set the destination path.
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination_path = destination.into();
        self
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE, DEFAULT_DESTINATION)
    }
}

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    /// Where the document was written
    pub destination: PathBuf,

    /// Table rows
    pub rows: usize,

    /// Table columns
    pub columns: usize,

    /// Size of the written file
    pub bytes_written: u64,
}

impl ConvertReport {
    /// Number of table cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }
}

/// Load the source, render the table and write the document.
///
/// Nothing is written when loading or rendering fails.
pub fn convert(config: &ConvertConfig, options: &RenderOptions) -> Result<ConvertReport> {
    convert_paths(&config.source_path, &config.destination_path, options)
}

fn convert_paths(source: &Path, destination: &Path, options: &RenderOptions) -> Result<ConvertReport> {
    log::info!(
        "Converting {} -> {}",
        source.display(),
        destination.display()
    );

    let grid = GridLoader::open(source)?.load()?;
    let doc = render::render_grid(&grid, options)?;
    let bytes_written = render::save(&doc, destination)?;

    Ok(ConvertReport {
        destination: destination.to_path_buf(),
        rows: grid.row_count(),
        columns: grid.column_count(),
        bytes_written,
    })
}
