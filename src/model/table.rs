//! Table types.

use super::{Grid, TableBorders};
use crate::error::{Error, Result};
use serde::Serialize;

/// Table-wide formatting (`w:tblPr`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableProperties {
    /// Table borders
    pub borders: TableBorders,
}

/// A document table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Table properties
    pub properties: TableProperties,
}

impl Table {
    /// Create a table of empty cells.
    ///
    /// Both dimensions must be at least one.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidTableSize { rows, cols });
        }

        Ok(Self {
            rows: (0..rows).map(|_| TableRow::empty(cols)).collect(),
            properties: TableProperties::default(),
        })
    }

    /// Copy every grid value into the cell at the same position.
    ///
    /// Positions outside the table are ignored.
    pub fn fill_from_grid(&mut self, grid: &Grid) {
        for (r, c, value) in grid.cells() {
            if let Some(cell) = self.cell_mut(r, c) {
                cell.set_text(value);
            }
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by row and column index.
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row)?.cells.get(col)
    }

    /// Get a mutable cell by row and column index.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row)?.cells.get_mut(col)
    }

    /// Replace the table borders.
    pub fn set_borders(&mut self, borders: TableBorders) {
        self.properties.borders = borders;
    }

    /// Get the table borders.
    pub fn borders(&self) -> &TableBorders {
        &self.properties.borders
    }

    /// Cell texts as rows of strings.
    pub fn to_strings(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.text.clone()).collect())
            .collect()
    }

    /// Check whether every row has the same number of cells.
    pub fn is_rectangular(&self) -> bool {
        let cols = self.column_count();
        self.rows.iter().all(|r| r.cells.len() == cols)
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row of empty cells.
    pub fn empty(cols: usize) -> Self {
        Self::new(vec![TableCell::default(); cols])
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableCell {
    /// Cell text. Line breaks are `\n`, tabs are `\t`.
    pub text: String,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Replace the cell text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BorderStyle;

    #[test]
    fn test_table_new() {
        let table = Table::new(2, 3).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert!(table.is_rectangular());
        assert!(table.cell(1, 2).unwrap().is_empty());
        assert!(table.borders().is_empty());
    }

    #[test]
    fn test_table_zero_size() {
        assert!(matches!(
            Table::new(0, 3),
            Err(Error::InvalidTableSize { rows: 0, cols: 3 })
        ));
        assert!(matches!(
            Table::new(3, 0),
            Err(Error::InvalidTableSize { rows: 3, cols: 0 })
        ));
    }

    #[test]
    fn test_fill_from_grid() {
        let grid = Grid::from_rows(vec![vec!["a", "b", "c"], vec!["d", "e"]]).unwrap();
        let mut table = Table::new(grid.row_count(), grid.column_count()).unwrap();
        table.fill_from_grid(&grid);

        assert_eq!(
            table.to_strings(),
            vec![vec!["a", "b", "c"], vec!["d", "e", ""]]
        );
    }

    #[test]
    fn test_fill_from_larger_grid_ignores_overflow() {
        let grid = Grid::from_rows(vec![vec!["a", "b"], vec!["c", "d"]]).unwrap();
        let mut table = Table::new(1, 1).unwrap();
        table.fill_from_grid(&grid);
        assert_eq!(table.to_strings(), vec![vec!["a"]]);
    }

    #[test]
    fn test_set_text_overwrites() {
        let mut table = Table::new(1, 1).unwrap();
        table.cell_mut(0, 0).unwrap().set_text("first");
        table.cell_mut(0, 0).unwrap().set_text("second");
        assert_eq!(table.cell(0, 0).unwrap().text, "second");
        assert!(table.cell_mut(1, 0).is_none());
    }

    #[test]
    fn test_set_borders_replaces() {
        let mut table = Table::new(1, 1).unwrap();
        table.set_borders(TableBorders::gost());
        table.set_borders(TableBorders::gost());
        assert!(table.borders().is_uniform(&BorderStyle::gost()));
    }

    #[test]
    fn test_row_from_strings() {
        let row = TableRow::from_strings(["Name", "Age"]);
        assert_eq!(row.cells.len(), 2);
        assert_eq!(row.cells[1].text, "Age");
    }
}
