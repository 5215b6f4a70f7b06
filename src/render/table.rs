//! WordprocessingML serialization of tables.

use std::fmt::Write as FmtWrite;

use quick_xml::escape::escape;

use crate::error::{Error, Result};
use crate::model::{BorderStyle, Table, TableBorders};

/// Text block width of the page in twips (Letter, 1.25in side margins).
pub(crate) const BLOCK_WIDTH_TWIPS: usize = 8640;

fn fmt_err(e: std::fmt::Error) -> Error {
    Error::Render(e.to_string())
}

/// Check that a table can be written: non-empty and rectangular.
pub(crate) fn validate(table: &Table) -> Result<()> {
    let cols = table.column_count();
    if table.is_empty() || cols == 0 {
        return Err(Error::InvalidTableSize {
            rows: table.row_count(),
            cols,
        });
    }

    for (index, row) in table.rows.iter().enumerate() {
        if row.cells.len() != cols {
            return Err(Error::Render(format!(
                "row {} has {} cells, expected {}",
                index,
                row.cells.len(),
                cols
            )));
        }
    }

    for (_, style) in table.borders().iter() {
        if !style.has_valid_color() && style.color != "auto" {
            return Err(Error::Render(format!(
                "invalid border color '{}', expected six hex digits",
                style.color
            )));
        }
    }

    Ok(())
}

/// Check whether a character may appear in XML 1.0 content.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || ('\u{20}'..='\u{D7FF}').contains(&c)
        || ('\u{E000}'..='\u{FFFD}').contains(&c)
        || c >= '\u{10000}'
}

/// Write a complete `w:tbl` element.
pub(crate) fn write_table(xml: &mut String, table: &Table) -> Result<()> {
    validate(table)?;

    let cols = table.column_count();
    let col_width = (BLOCK_WIDTH_TWIPS / cols).max(1);

    xml.push_str("<w:tbl>");

    xml.push_str("<w:tblPr>");
    xml.push_str("<w:tblW w:w=\"0\" w:type=\"auto\"/>");
    write_borders(xml, table.borders())?;
    xml.push_str("<w:tblLayout w:type=\"autofit\"/>");
    xml.push_str(
        "<w:tblLook w:val=\"04A0\" w:firstRow=\"1\" w:lastRow=\"0\" w:firstColumn=\"1\" \
         w:lastColumn=\"0\" w:noHBand=\"0\" w:noVBand=\"1\"/>",
    );
    xml.push_str("</w:tblPr>");

    xml.push_str("<w:tblGrid>");
    for _ in 0..cols {
        write!(xml, "<w:gridCol w:w=\"{}\"/>", col_width).map_err(fmt_err)?;
    }
    xml.push_str("</w:tblGrid>");

    for (r, row) in table.rows.iter().enumerate() {
        xml.push_str("<w:tr>");
        for (c, cell) in row.cells.iter().enumerate() {
            xml.push_str("<w:tc><w:tcPr>");
            write!(xml, "<w:tcW w:w=\"{}\" w:type=\"dxa\"/>", col_width).map_err(fmt_err)?;
            xml.push_str("</w:tcPr>");
            write_cell_paragraph(xml, &cell.text).map_err(|e| match e {
                Error::Render(msg) => Error::Render(format!("cell ({}, {}): {}", r, c, msg)),
                other => other,
            })?;
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }

    xml.push_str("</w:tbl>");
    Ok(())
}

fn write_borders(xml: &mut String, borders: &TableBorders) -> Result<()> {
    if borders.is_empty() {
        return Ok(());
    }

    xml.push_str("<w:tblBorders>");
    for (position, style) in borders.iter() {
        write_border(xml, position.element_name(), style)?;
    }
    xml.push_str("</w:tblBorders>");
    Ok(())
}

fn write_border(xml: &mut String, name: &str, style: &BorderStyle) -> Result<()> {
    write!(
        xml,
        "<w:{} w:val=\"{}\" w:sz=\"{}\" w:space=\"{}\" w:color=\"{}\"/>",
        name,
        style.line_style.as_str(),
        style.size_eighths,
        style.spacing,
        style.color
    )
    .map_err(fmt_err)
}

/// Write the single paragraph that holds a cell's text.
///
/// `\n`, `\r\n` and `\r` become line breaks, `\t` becomes a tab.
fn write_cell_paragraph(xml: &mut String, text: &str) -> Result<()> {
    if text.is_empty() {
        xml.push_str("<w:p/>");
        return Ok(());
    }

    if let Some(bad) = text.chars().find(|c| !is_xml_char(*c)) {
        return Err(Error::Render(format!(
            "character U+{:04X} cannot be stored in XML",
            bad as u32
        )));
    }

    xml.push_str("<w:p><w:r>");
    let mut segment = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' | '\t' => {
                flush_segment(xml, &mut segment);
                if c == '\t' {
                    xml.push_str("<w:tab/>");
                } else {
                    if c == '\r' && chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    xml.push_str("<w:br/>");
                }
            }
            _ => segment.push(c),
        }
    }
    flush_segment(xml, &mut segment);
    xml.push_str("</w:r></w:p>");
    Ok(())
}

fn flush_segment(xml: &mut String, segment: &mut String) {
    if segment.is_empty() {
        return;
    }
    xml.push_str("<w:t xml:space=\"preserve\">");
    xml.push_str(&escape(segment.as_str()));
    xml.push_str("</w:t>");
    segment.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BorderLineStyle, BorderStyle, TableRow};

    fn render(table: &Table) -> String {
        let mut xml = String::new();
        write_table(&mut xml, table).unwrap();
        xml
    }

    #[test]
    fn test_gost_borders_written() {
        let mut table = Table::new(1, 1).unwrap();
        table.set_borders(TableBorders::gost());
        let xml = render(&table);

        for name in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            let expected = format!(
                "<w:{} w:val=\"single\" w:sz=\"8\" w:space=\"0\" w:color=\"000000\"/>",
                name
            );
            assert!(xml.contains(&expected), "missing {}", name);
        }
        assert_eq!(xml.matches("<w:tblBorders>").count(), 1);
        assert_eq!(xml.matches("<w:tblPr>").count(), 1);
    }

    #[test]
    fn test_no_borders_element_when_empty() {
        let table = Table::new(1, 1).unwrap();
        assert!(!render(&table).contains("tblBorders"));
    }

    #[test]
    fn test_grid_columns() {
        let table = Table::new(2, 3).unwrap();
        let xml = render(&table);
        assert_eq!(xml.matches("<w:gridCol w:w=\"2880\"/>").count(), 3);
        assert_eq!(xml.matches("<w:tr>").count(), 2);
        assert_eq!(xml.matches("<w:tc>").count(), 6);
    }

    #[test]
    fn test_cell_text_escaped() {
        let mut table = Table::new(1, 1).unwrap();
        table.cell_mut(0, 0).unwrap().set_text("<a & b>");
        assert!(render(&table).contains("&lt;a &amp; b&gt;"));
    }

    #[test]
    fn test_cell_breaks_and_tabs() {
        let mut xml = String::new();
        write_cell_paragraph(&mut xml, "a\r\nb\tc\n").unwrap();
        assert_eq!(
            xml,
            "<w:p><w:r><w:t xml:space=\"preserve\">a</w:t><w:br/>\
             <w:t xml:space=\"preserve\">b</w:t><w:tab/>\
             <w:t xml:space=\"preserve\">c</w:t><w:br/></w:r></w:p>"
        );
    }

    #[test]
    fn test_empty_cell() {
        let mut xml = String::new();
        write_cell_paragraph(&mut xml, "").unwrap();
        assert_eq!(xml, "<w:p/>");
    }

    #[test]
    fn test_control_character_rejected() {
        let mut table = Table::new(1, 2).unwrap();
        table.cell_mut(0, 1).unwrap().set_text("bell\u{7}");
        let mut xml = String::new();
        let err = write_table(&mut xml, &table).unwrap_err();
        assert!(err.to_string().contains("cell (0, 1)"));
    }

    #[test]
    fn test_ragged_table_rejected() {
        let mut table = Table::new(2, 2).unwrap();
        table.rows[1] = TableRow::from_strings(["only"]);
        let mut xml = String::new();
        assert!(matches!(
            write_table(&mut xml, &table),
            Err(Error::Render(_))
        ));
    }

    #[test]
    fn test_empty_table_rejected() {
        let mut table = Table::new(1, 1).unwrap();
        table.rows.clear();
        let mut xml = String::new();
        assert!(matches!(
            write_table(&mut xml, &table),
            Err(Error::InvalidTableSize { rows: 0, cols: 0 })
        ));
    }

    #[test]
    fn test_invalid_border_color_rejected() {
        let mut table = Table::new(1, 1).unwrap();
        table.set_borders(TableBorders::uniform(BorderStyle::new(
            BorderLineStyle::Single,
            8,
            "black",
        )));
        let mut xml = String::new();
        assert!(matches!(
            write_table(&mut xml, &table),
            Err(Error::Render(_))
        ));
    }
}
