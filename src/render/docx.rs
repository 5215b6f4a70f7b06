//! DOCX package writer.
//!
//! A `.docx` file is a ZIP container of XML parts. The writer emits the
//! minimal set Word needs to open the document plus core and extended
//! properties.

use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::table::write_table;
use crate::error::{Error, Result};
use crate::model::{Document, Metadata};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

const CONTENT_TYPES: &str = concat!(
    "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
    "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
    "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
    "<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>",
    "<Override PartName=\"/word/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>",
    "<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>",
    "<Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>",
    "</Types>"
);

const PACKAGE_RELS: &str = concat!(
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>",
    "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>",
    "<Relationship Id=\"rId3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties\" Target=\"docProps/app.xml\"/>",
    "</Relationships>"
);

const DOCUMENT_RELS: &str = concat!(
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>",
    "</Relationships>"
);

const STYLES: &str = concat!(
    "<w:styles xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">",
    "<w:docDefaults>",
    "<w:rPrDefault><w:rPr>",
    "<w:sz w:val=\"24\"/><w:szCs w:val=\"24\"/>",
    "</w:rPr></w:rPrDefault>",
    "<w:pPrDefault><w:pPr><w:spacing w:after=\"0\" w:line=\"240\" w:lineRule=\"auto\"/></w:pPr></w:pPrDefault>",
    "</w:docDefaults>",
    "<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\"><w:name w:val=\"Normal\"/><w:qFormat/></w:style>",
    "<w:style w:type=\"table\" w:default=\"1\" w:styleId=\"TableNormal\"><w:name w:val=\"Normal Table\"/>",
    "<w:tblPr><w:tblInd w:w=\"0\" w:type=\"dxa\"/><w:tblCellMar>",
    "<w:top w:w=\"0\" w:type=\"dxa\"/><w:left w:w=\"108\" w:type=\"dxa\"/>",
    "<w:bottom w:w=\"0\" w:type=\"dxa\"/><w:right w:w=\"108\" w:type=\"dxa\"/>",
    "</w:tblCellMar></w:tblPr></w:style>",
    "</w:styles>"
);

const SECTION_PROPERTIES: &str = concat!(
    "<w:sectPr>",
    "<w:pgSz w:w=\"12240\" w:h=\"15840\"/>",
    "<w:pgMar w:top=\"1440\" w:right=\"1800\" w:bottom=\"1440\" w:left=\"1800\" w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/>",
    "<w:cols w:space=\"720\"/>",
    "</w:sectPr>"
);

fn fmt_err(e: std::fmt::Error) -> Error {
    Error::Render(e.to_string())
}

/// Serialize `word/document.xml`.
///
/// Every table is followed by an empty paragraph so that adjacent tables
/// stay separate and the body never ends in a table.
pub(crate) fn document_xml(doc: &Document) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">",
    );
    xml.push_str("<w:body>");
    for table in &doc.tables {
        write_table(&mut xml, table)?;
        xml.push_str("<w:p/>");
    }
    xml.push_str(SECTION_PROPERTIES);
    xml.push_str("</w:body></w:document>");
    Ok(xml)
}

fn w3cdtf(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Serialize `docProps/core.xml`.
pub(crate) fn core_xml(metadata: &Metadata) -> Result<String> {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        "<cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
    );
    if let Some(ref title) = metadata.title {
        write!(xml, "<dc:title>{}</dc:title>", escape(title.as_str())).map_err(fmt_err)?;
    }
    if let Some(ref creator) = metadata.creator {
        write!(xml, "<dc:creator>{}</dc:creator>", escape(creator.as_str())).map_err(fmt_err)?;
    }
    if let Some(ref created) = metadata.created {
        write!(
            xml,
            "<dcterms:created xsi:type=\"dcterms:W3CDTF\">{}</dcterms:created>",
            w3cdtf(created)
        )
        .map_err(fmt_err)?;
    }
    if let Some(ref modified) = metadata.modified {
        write!(
            xml,
            "<dcterms:modified xsi:type=\"dcterms:W3CDTF\">{}</dcterms:modified>",
            w3cdtf(modified)
        )
        .map_err(fmt_err)?;
    }
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

fn app_xml() -> String {
    format!(
        "{}<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">\
         <Application>csv2docx</Application><AppVersion>{}</AppVersion></Properties>",
        XML_DECLARATION,
        env!("CARGO_PKG_VERSION")
    )
}

/// Serialize a document into `.docx` bytes.
pub fn to_docx(doc: &Document) -> Result<Vec<u8>> {
    let document = document_xml(doc)?;
    let core = core_xml(&doc.metadata)?;
    let app = app_xml();

    let parts: [(&str, String); 7] = [
        ("[Content_Types].xml", format!("{}{}", XML_DECLARATION, CONTENT_TYPES)),
        ("_rels/.rels", format!("{}{}", XML_DECLARATION, PACKAGE_RELS)),
        ("word/document.xml", document),
        (
            "word/_rels/document.xml.rels",
            format!("{}{}", XML_DECLARATION, DOCUMENT_RELS),
        ),
        ("word/styles.xml", format!("{}{}", XML_DECLARATION, STYLES)),
        ("docProps/core.xml", core),
        ("docProps/app.xml", app),
    ];

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in parts.iter() {
        writer.start_file(*name, options)?;
        writer.write_all(content.as_bytes())?;
    }
    let cursor = writer.finish()?;
    let bytes = cursor.into_inner();

    log::debug!(
        "Serialized {} tables into {} bytes",
        doc.table_count(),
        bytes.len()
    );
    Ok(bytes)
}
