//! Rendering module: grid in, bordered single-table document out.

mod docx;
mod options;
mod table;

pub use docx::to_docx;
pub use options::{RenderOptions, DEFAULT_CREATOR};

use std::fs;
use std::path::Path;

use chrono::Utc;

use crate::error::Result;
use crate::model::{Document, Grid, Metadata};

/// Build a document holding one table with the grid's values and borders.
pub fn render_grid(grid: &Grid, options: &RenderOptions) -> Result<Document> {
    let mut doc = Document::new();

    let created = options.created.unwrap_or_else(Utc::now);
    doc.metadata = Metadata {
        title: options.title.clone(),
        creator: Some(options.creator.clone()),
        created: Some(created),
        modified: Some(created),
    };

    let table = doc.add_table(grid.row_count(), grid.column_count())?;
    table.fill_from_grid(grid);
    table.set_borders(options.borders.clone());

    log::debug!(
        "Rendered {}x{} table",
        grid.row_count(),
        grid.column_count()
    );
    Ok(doc)
}

/// Write a document to a `.docx` file, replacing any existing file.
///
/// The package is fully serialized before the file is created, so a failed
/// render leaves the destination untouched. Returns the number of bytes
/// written.
pub fn save<P: AsRef<Path>>(doc: &Document, path: P) -> Result<u64> {
    let path = path.as_ref();
    let bytes = to_docx(doc)?;
    fs::write(path, &bytes)?;
    log::info!("Document saved to {}", path.display());
    Ok(bytes.len() as u64)
}
