//! WordprocessingML serialization of a `FlowDocument` into a .docx package.

use std::io::{Cursor, Write};

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use tracing::debug;
use zip::{write::SimpleFileOptions, CompressionMethod, DateTime, ZipWriter};

use crate::errors::RenderError;
use crate::models::ResumeDocument;
use crate::render::flow::{build_flow, Alignment, FlowDocument, Paragraph, Run};

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const BULLET_NUM_ID: &str = "1";
const RUN_FONT: &str = "Calibri";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

/// One bullet definition: level 0, "•", hanging indent.
const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

/// Renders the document to .docx bytes.
pub fn render_docx(doc: &ResumeDocument) -> Result<Vec<u8>, RenderError> {
    let flow = build_flow(doc);
    write_docx(&flow)
}

/// Packages a flow document as a .docx archive.
///
/// Entries carry a fixed timestamp so identical input yields identical bytes.
pub fn write_docx(flow: &FlowDocument) -> Result<Vec<u8>, RenderError> {
    let document_xml = document_xml(flow)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let parts: [(&str, &[u8]); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", ROOT_RELS_XML.as_bytes()),
        ("word/document.xml", document_xml.as_slice()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes()),
        ("word/numbering.xml", NUMBERING_XML.as_bytes()),
    ];
    for (name, data) in parts {
        zip.start_file(name, options)?;
        zip.write_all(data)?;
    }

    let bytes = zip.finish()?.into_inner();
    debug!(
        paragraphs = flow.paragraphs.len(),
        bytes = bytes.len(),
        "docx serialized"
    );
    Ok(bytes)
}

fn document_xml(flow: &FlowDocument) -> Result<Vec<u8>, RenderError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", WORD_NS));
    root.push_attribute(("xmlns:r", REL_NS));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for paragraph in &flow.paragraphs {
        write_paragraph(&mut writer, paragraph)?;
    }
    write_section_properties(&mut writer, flow)?;

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    Ok(writer.into_inner().into_inner())
}

fn empty_with<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<(), RenderError> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

fn write_paragraph<W: Write>(writer: &mut Writer<W>, p: &Paragraph) -> Result<(), RenderError> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;

    // Child order follows the CT_PPr schema sequence.
    if let Some(level) = p.bullet_level {
        let level = level.to_string();
        writer.write_event(Event::Start(BytesStart::new("w:numPr")))?;
        empty_with(writer, "w:ilvl", &[("w:val", level.as_str())])?;
        empty_with(writer, "w:numId", &[("w:val", BULLET_NUM_ID)])?;
        writer.write_event(Event::End(BytesEnd::new("w:numPr")))?;
    }
    if p.border_bottom {
        writer.write_event(Event::Start(BytesStart::new("w:pBdr")))?;
        empty_with(
            writer,
            "w:bottom",
            &[
                ("w:val", "single"),
                ("w:sz", "6"),
                ("w:space", "1"),
                ("w:color", "auto"),
            ],
        )?;
        writer.write_event(Event::End(BytesEnd::new("w:pBdr")))?;
    }
    if let Some(pos) = p.right_tab {
        let pos = pos.to_string();
        writer.write_event(Event::Start(BytesStart::new("w:tabs")))?;
        empty_with(writer, "w:tab", &[("w:val", "right"), ("w:pos", pos.as_str())])?;
        writer.write_event(Event::End(BytesEnd::new("w:tabs")))?;
    }
    let before = p.spacing_before.to_string();
    let after = p.spacing_after.to_string();
    empty_with(
        writer,
        "w:spacing",
        &[("w:before", before.as_str()), ("w:after", after.as_str())],
    )?;
    if p.alignment == Alignment::Center {
        empty_with(writer, "w:jc", &[("w:val", "center")])?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;

    for run in &p.runs {
        write_run(writer, run)?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_run<W: Write>(writer: &mut Writer<W>, run: &Run) -> Result<(), RenderError> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;

    writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
    empty_with(
        writer,
        "w:rFonts",
        &[("w:ascii", RUN_FONT), ("w:hAnsi", RUN_FONT)],
    )?;
    if run.bold {
        empty_with(writer, "w:b", &[])?;
    }
    if run.italics {
        empty_with(writer, "w:i", &[])?;
    }
    let size = run.size.to_string();
    empty_with(writer, "w:sz", &[("w:val", size.as_str())])?;
    empty_with(writer, "w:szCs", &[("w:val", size.as_str())])?;
    writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;

    if run.tab_before {
        empty_with(writer, "w:tab", &[])?;
    }
    let mut text = BytesStart::new("w:t");
    text.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(text))?;
    writer.write_event(Event::Text(BytesText::new(&run.text)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;

    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

fn write_section_properties<W: Write>(
    writer: &mut Writer<W>,
    flow: &FlowDocument,
) -> Result<(), RenderError> {
    let width = flow.page_width.to_string();
    let height = flow.page_height.to_string();
    let top = flow.margins.top.to_string();
    let bottom = flow.margins.bottom.to_string();
    let left = flow.margins.left.to_string();
    let right = flow.margins.right.to_string();

    writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;
    empty_with(writer, "w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
    empty_with(
        writer,
        "w:pgMar",
        &[
            ("w:top", top.as_str()),
            ("w:right", right.as_str()),
            ("w:bottom", bottom.as_str()),
            ("w:left", left.as_str()),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
    Ok(())
}
