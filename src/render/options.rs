//! Rendering options and configuration.

use crate::model::{BorderStyle, TableBorders};
use chrono::{DateTime, Utc};

/// Default creator recorded in document properties.
pub const DEFAULT_CREATOR: &str = "csv2docx";

/// Options for rendering a grid into a document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Borders applied to the table
    pub borders: TableBorders,

    /// Document title (core properties)
    pub title: Option<String>,

    /// Document creator (core properties)
    pub creator: String,

    /// Creation timestamp; the render time when unset
    pub created: Option<DateTime<Utc>>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table borders.
    pub fn with_borders(mut self, borders: TableBorders) -> Self {
        self.borders = borders;
        self
    }

    /// Use one border style for all six positions.
    pub fn with_border_style(mut self, style: BorderStyle) -> Self {
        self.borders = TableBorders::uniform(style);
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document creator.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    /// Set a fixed creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            borders: TableBorders::gost(),
            title: None,
            creator: DEFAULT_CREATOR.to_string(),
            created: None,
        }
    }
}
