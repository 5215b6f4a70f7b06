//! Document model types.
//!
//! [`Grid`] is the rectangular in-memory form of the delimited source.
//! [`Document`], [`Table`] and the border types describe the word-processing
//! output independently of the package format that stores it.

mod border;
mod document;
mod grid;
mod table;

pub use border::{BorderLineStyle, BorderPosition, BorderStyle, TableBorders};
pub use document::{Document, Metadata};
pub use grid::Grid;
pub use table::{Table, TableCell, TableProperties, TableRow};
