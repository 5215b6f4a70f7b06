//! Reader for WordprocessingML packages.
//!
//! Reads tables (cell text and table borders) and core properties back into
//! the document model. Only top-level body tables are extracted; tables
//! nested inside cells are skipped.

use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::{detect_format_from_bytes, FileFormat};
use crate::error::{Error, Result};
use crate::model::{
    BorderLineStyle, BorderPosition, BorderStyle, Document, Metadata, Table, TableBorders,
    TableCell, TableProperties, TableRow,
};

const PACKAGE_RELS: &str = "_rels/.rels";
const DEFAULT_MAIN_PART: &str = "word/document.xml";
const CORE_PART: &str = "docProps/core.xml";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// Reader for `.docx` packages.
pub struct DocxReader {
    document_xml: String,
    core_xml: Option<String>,
}

impl DocxReader {
    /// Open a `.docx` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_vec(data)
    }

    /// Read a `.docx` package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_vec(data.to_vec())
    }

    fn from_vec(data: Vec<u8>) -> Result<Self> {
        match detect_format_from_bytes(&data)? {
            FileFormat::Zip => {}
            other => {
                return Err(Error::UnknownFormat(format!(
                    "expected a ZIP package, found {}",
                    other
                )))
            }
        }

        let mut archive = ZipArchive::new(Cursor::new(data))?;

        let main_part = match read_part(&mut archive, PACKAGE_RELS)? {
            Some(rels) => main_part_from_rels(&rels)?,
            None => None,
        }
        .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string());

        let document_xml = read_part(&mut archive, &main_part)?
            .ok_or_else(|| Error::MissingPart(main_part.clone()))?;
        let core_xml = read_part(&mut archive, CORE_PART)?;

        Ok(Self {
            document_xml,
            core_xml,
        })
    }

    /// Parse the package into a document.
    pub fn read(&self) -> Result<Document> {
        let tables = parse_tables(&self.document_xml)?;
        let metadata = match self.core_xml {
            Some(ref xml) => parse_core_properties(xml)?,
            None => Metadata::default(),
        };
        log::debug!("Read {} tables from document part", tables.len());
        Ok(Document { metadata, tables })
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            Ok(Some(content))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find the main document part through the package relationships.
fn main_part_from_rels(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut rel_type = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.local_name().as_ref() {
                        b"Type" => rel_type = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(rel_type), Some(target)) = (rel_type, target) {
                    if rel_type.ends_with(OFFICE_DOCUMENT_REL) {
                        return Ok(Some(target.trim_start_matches('/').to_string()));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }
    Ok(None)
}

/// Collects one top-level table while its events stream by.
#[derive(Default)]
struct TableBuilder {
    rows: Vec<TableRow>,
    borders: TableBorders,
    in_borders: bool,
    cell: Option<CellBuilder>,
}

#[derive(Default)]
struct CellBuilder {
    text: String,
    paragraphs: usize,
    in_run: bool,
    in_text: bool,
}

impl CellBuilder {
    fn start_paragraph(&mut self) {
        if self.paragraphs > 0 {
            self.text.push('\n');
        }
        self.paragraphs += 1;
    }
}

impl TableBuilder {
    fn handle_start(&mut self, e: &BytesStart, empty: bool) -> Result<()> {
        let name = e.local_name();
        let name = name.as_ref();

        if self.in_borders {
            if let Some(position) = BorderPosition::from_element_name(name) {
                if let Some(style) = parse_border(e)? {
                    self.borders.set(position, style);
                }
            }
            return Ok(());
        }

        match name {
            b"tblBorders" if self.cell.is_none() && !empty => self.in_borders = true,
            b"tr" => self.rows.push(TableRow::default()),
            b"tc" if !empty => self.cell = Some(CellBuilder::default()),
            b"tc" => {
                if let Some(row) = self.rows.last_mut() {
                    row.cells.push(TableCell::default());
                }
            }
            _ => {
                if let Some(cell) = self.cell.as_mut() {
                    match name {
                        b"p" => cell.start_paragraph(),
                        b"r" if !empty => cell.in_run = true,
                        b"t" if !empty && cell.in_run => cell.in_text = true,
                        b"br" | b"cr" if cell.in_run => cell.text.push('\n'),
                        b"tab" if cell.in_run => cell.text.push('\t'),
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_end(&mut self, name: &[u8]) {
        match name {
            b"tblBorders" => self.in_borders = false,
            b"tc" => {
                if let Some(cell) = self.cell.take() {
                    if let Some(row) = self.rows.last_mut() {
                        row.cells.push(TableCell::text(cell.text));
                    }
                }
            }
            b"r" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.in_run = false;
                }
            }
            b"t" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.in_text = false;
                }
            }
            _ => {}
        }
    }

    fn handle_text(&mut self, text: &str) {
        if let Some(cell) = self.cell.as_mut() {
            if cell.in_text {
                cell.text.push_str(text);
            }
        }
    }

    fn finish(self) -> Table {
        Table {
            rows: self.rows,
            properties: TableProperties {
                borders: self.borders,
            },
        }
    }
}

fn parse_tables(xml: &str) -> Result<Vec<Table>> {
    let mut reader = Reader::from_str(xml);

    let mut tables = Vec::new();
    let mut depth = 0usize;
    let mut current: Option<TableBuilder> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"tbl" {
                    depth += 1;
                    if depth == 1 {
                        current = Some(TableBuilder::default());
                    }
                } else if depth == 1 {
                    if let Some(table) = current.as_mut() {
                        table.handle_start(e, false)?;
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                if depth == 1 {
                    if let Some(table) = current.as_mut() {
                        table.handle_start(e, true)?;
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.local_name();
                if name.as_ref() == b"tbl" {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        if let Some(table) = current.take() {
                            tables.push(table.finish());
                        }
                    }
                } else if depth == 1 {
                    if let Some(table) = current.as_mut() {
                        table.handle_end(name.as_ref());
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if depth == 1 {
                    if let Some(table) = current.as_mut() {
                        table.handle_text(&e.unescape()?);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(tables)
}

fn parse_border(e: &BytesStart) -> Result<Option<BorderStyle>> {
    let mut line_style = None;
    let mut size_eighths = 0;
    let mut spacing = 0;
    let mut color = String::from("auto");

    for attr in e.attributes().flatten() {
        let value = attr.unescape_value()?;
        match attr.key.local_name().as_ref() {
            b"val" => {
                line_style = BorderLineStyle::parse(&value);
                if line_style.is_none() {
                    log::warn!("Unsupported border style '{}' ignored", value);
                }
            }
            b"sz" => size_eighths = value.parse().unwrap_or(0),
            b"space" => spacing = value.parse().unwrap_or(0),
            b"color" => color = value.into_owned(),
            _ => {}
        }
    }

    Ok(line_style.map(|line_style| BorderStyle {
        line_style,
        size_eighths,
        spacing,
        color,
    }))
}

fn parse_core_properties(xml: &str) -> Result<Metadata> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut metadata = Metadata::default();
    let mut field: Option<Vec<u8>> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => field = Some(e.local_name().as_ref().to_vec()),
            Ok(Event::End(_)) => field = None,
            Ok(Event::Text(ref e)) => {
                let text = e.unescape()?.into_owned();
                match field.as_deref() {
                    Some(b"title") => metadata.title = Some(text),
                    Some(b"creator") => metadata.creator = Some(text),
                    Some(b"created") => metadata.created = parse_w3cdtf(&text),
                    Some(b"modified") => metadata.modified = parse_w3cdtf(&text),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(metadata)
}

fn parse_w3cdtf(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
