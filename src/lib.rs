//! # csv2docx
//!
//! Convert semicolon-delimited CSV files into Word documents holding a
//! single table with uniform thin black borders.
//!
//! ## Quick Start
//!
//! ```no_run
//! use csv2docx::{load_grid, save_grid, RenderOptions};
//!
//! fn main() -> csv2docx::Result<()> {
//!     // Load the CSV into a rectangular grid
//!     let grid = load_grid("CSV_Test.csv")?;
//!
//!     // Render it as a bordered table and write the document
//!     save_grid(&grid, "output.docx", &RenderOptions::default())?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Rectangular grids**: short rows are padded with empty cells
//! - **Minimal quoting**: `;` inside quoted fields, doubled quotes, multi-line cells
//! - **GOST-style borders**: single, size 8, spacing 0, black on all six positions
//! - **Read back**: [`DocxReader`] extracts tables and borders from `.docx` files

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{convert, ConvertConfig, ConvertReport};
pub use detect::{detect_format_from_bytes, detect_format_from_path, FileFormat};
pub use error::{Error, Result};
pub use model::{
    BorderLineStyle, BorderPosition, BorderStyle, Document, Grid, Metadata, Table, TableBorders,
    TableCell, TableProperties, TableRow,
};
pub use parser::{DocxReader, GridLoader};
pub use render::RenderOptions;

use std::path::Path;

/// Load a semicolon-delimited file into a rectangular grid.
///
/// # Example
///
/// ```no_run
/// use csv2docx::load_grid;
///
/// let grid = load_grid("CSV_Test.csv").unwrap();
/// println!("{} x {}", grid.row_count(), grid.column_count());
/// ```
pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<Grid> {
    GridLoader::open(path)?.load()
}

/// Load semicolon-delimited text from bytes.
pub fn load_grid_from_bytes(data: &[u8]) -> Result<Grid> {
    GridLoader::from_bytes(data)?.load()
}

/// Build a single-table document from a grid.
pub fn render_grid(grid: &Grid, options: &RenderOptions) -> Result<Document> {
    render::render_grid(grid, options)
}

/// Render a grid and write it as a `.docx` file.
///
/// Returns the number of bytes written.
pub fn save_grid<P: AsRef<Path>>(grid: &Grid, path: P, options: &RenderOptions) -> Result<u64> {
    let doc = render::render_grid(grid, options)?;
    render::save(&doc, path)
}

/// Convert a CSV file into a `.docx` file with default options.
///
/// # Example
///
/// ```no_run
/// use csv2docx::convert_file;
///
/// let report = convert_file("CSV_Test.csv", "output.docx").unwrap();
/// println!("Document saved to {}", report.destination.display());
/// ```
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<ConvertReport> {
    let config = ConvertConfig::new(source.as_ref(), destination.as_ref());
    convert::convert(&config, &RenderOptions::default())
}

/// Read the tables of a `.docx` file.
///
/// # Example
///
/// ```no_run
/// use csv2docx::read_docx;
///
/// let doc = read_docx("output.docx").unwrap();
/// println!("{} tables", doc.table_count());
/// ```
pub fn read_docx<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocxReader::open(path)?.read()
}

/// Builder for loading a grid and rendering it.
///
/// # Example
///
/// ```no_run
/// use csv2docx::Csv2Docx;
///
/// Csv2Docx::new()
///     .with_title("Inventory")
///     .load("CSV_Test.csv")?
///     .save("output.docx")?;
/// # Ok::<(), csv2docx::Error>(())
/// ```
pub struct Csv2Docx {
    render_options: RenderOptions,
}

impl Csv2Docx {
    /// Create a new builder with GOST-style borders.
    pub fn new() -> Self {
        Self {
            render_options: RenderOptions::default(),
        }
    }

    /// Set the table borders.
    pub fn with_borders(mut self, borders: TableBorders) -> Self {
        self.render_options = self.render_options.with_borders(borders);
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Set the document creator.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_creator(creator);
        self
    }

    /// Load a delimited text file.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<LoadedGrid> {
        let grid = load_grid(path)?;
        Ok(LoadedGrid {
            grid,
            render_options: self.render_options,
        })
    }

    /// Load delimited text from bytes.
    pub fn load_bytes(self, data: &[u8]) -> Result<LoadedGrid> {
        let grid = load_grid_from_bytes(data)?;
        Ok(LoadedGrid {
            grid,
            render_options: self.render_options,
        })
    }
}

impl Default for Csv2Docx {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded grid waiting to be rendered.
pub struct LoadedGrid {
    /// The loaded grid
    pub grid: Grid,
    /// Render options to use
    render_options: RenderOptions,
}

impl LoadedGrid {
    /// Build the document.
    pub fn to_document(&self) -> Result<Document> {
        render::render_grid(&self.grid, &self.render_options)
    }

    /// Serialize the document into `.docx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        render::to_docx(&self.to_document()?)
    }

    /// Write the document to a file, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<u64> {
        render::save(&self.to_document()?, path)
    }

    /// Get the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}
