// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! XML parse/serialize for annotation documents
//!
//! Event-based round trip with quick-xml. Attributes the typed model does
//! not interpret are preserved; unknown child elements under an entry are
//! skipped with a warning rather than failing the file.

use super::model::{AnnotationDocument, AnnotationEntry, EntryKind};
use crate::domain::{EdfveilError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

const ENTRY_TAG: &str = "annotation";
const CHANNELS_TAG: &str = "channels";
const CHANNEL_TAG: &str = "channel";
const START_MARKER_TYPE: &str = "Start Recording";

fn malformed(detail: impl std::fmt::Display) -> EdfveilError {
    EdfveilError::MalformedDocument(detail.to_string())
}

/// Parses an annotation document from XML text
///
/// Root-level elements other than `<annotation>` are skipped with a
/// warning; a vendor extension never fails the file.
///
/// # Errors
///
/// Returns `EdfveilError::MalformedDocument` if the input is not a
/// well-formed tree, or a start-marker microseconds attribute is not
/// numeric.
pub fn parse_document(xml: &str) -> Result<AnnotationDocument> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut root_name: Option<String> = None;
    let mut entries = Vec::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Start(start) => {
                let name = element_name(&start)?;
                if root_name.is_none() {
                    root_name = Some(name);
                } else if name == ENTRY_TAG {
                    let entry = parse_entry_attributes(&start)?;
                    entries.push(parse_entry_children(&mut reader, entry)?);
                } else {
                    tracing::warn!(element = %name, "Skipping unrecognized root child");
                    reader.read_to_end(start.name()).map_err(malformed)?;
                }
            }
            Event::Empty(start) => {
                let name = element_name(&start)?;
                if root_name.is_none() {
                    // An empty root is a valid document with zero entries
                    root_name = Some(name);
                } else if name == ENTRY_TAG {
                    entries.push(parse_entry_attributes(&start)?);
                } else {
                    tracing::warn!(element = %name, "Skipping unrecognized root child");
                }
            }
            Event::End(_) | Event::Text(_) | Event::CData(_) => {}
            Event::Eof => break,
        }
    }

    let root_name = root_name.ok_or_else(|| malformed("document has no root element"))?;
    Ok(AnnotationDocument { root_name, entries })
}

/// Serializes an annotation document to indented XML text
pub fn write_document(doc: &AnnotationDocument) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(write_err)?;

    if doc.entries.is_empty() {
        writer
            .write_event(Event::Empty(BytesStart::new(doc.root_name.as_str())))
            .map_err(write_err)?;
    } else {
        writer
            .write_event(Event::Start(BytesStart::new(doc.root_name.as_str())))
            .map_err(write_err)?;
        for entry in &doc.entries {
            write_entry(&mut writer, entry)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(doc.root_name.as_str())))
            .map_err(write_err)?;
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| EdfveilError::MalformedDocument(format!("serialized XML is not UTF-8: {e}")))
}

fn write_err(e: impl std::fmt::Display) -> EdfveilError {
    EdfveilError::Io(format!("failed to serialize annotation document: {e}"))
}

fn element_name(start: &BytesStart<'_>) -> Result<String> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_string)
        .map_err(|_| malformed("element name is not UTF-8"))
}

fn parse_entry_attributes(start: &BytesStart<'_>) -> Result<AnnotationEntry> {
    let mut entry = AnnotationEntry::new(EntryKind::Regular);
    let mut elapsed_usecs: Option<i64> = None;
    let mut is_marker = false;

    for attribute in start.attributes() {
        let attribute = attribute.map_err(malformed)?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|_| malformed("attribute name is not UTF-8"))?
            .to_string();
        let value = attribute.unescape_value().map_err(malformed)?.into_owned();

        match key.as_str() {
            "layer" => entry.layer = Some(value),
            "createTime" => entry.create_time = Some(value),
            "annotator" => entry.annotator = Some(value),
            "creatorId" => entry.creator_id = Some(value),
            "type" if value == START_MARKER_TYPE => is_marker = true,
            "startOffsetUsecs" => {
                let usecs = value.parse::<i64>().map_err(|_| {
                    malformed(format!("startOffsetUsecs '{value}' is not an integer"))
                })?;
                elapsed_usecs = Some(usecs);
                is_marker = true;
            }
            _ => entry.extra_attributes.push((key, value)),
        }
    }

    if is_marker {
        entry.kind = EntryKind::StartMarker { elapsed_usecs };
    }
    Ok(entry)
}

fn parse_entry_children(
    reader: &mut Reader<&[u8]>,
    mut entry: AnnotationEntry,
) -> Result<AnnotationEntry> {
    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => {
                let name = element_name(&start)?;
                if name == CHANNELS_TAG {
                    parse_channels(reader, &mut entry)?;
                } else {
                    tracing::warn!(element = %name, "Skipping unrecognized annotation child");
                    reader.read_to_end(start.name()).map_err(malformed)?;
                }
            }
            Event::Empty(_) => {}
            Event::Text(text) => {
                let content = text.unescape().map_err(malformed)?.into_owned();
                if !content.is_empty() {
                    entry.text = Some(content);
                }
            }
            Event::End(end) if end.name().as_ref() == ENTRY_TAG.as_bytes() => break,
            Event::End(_) | Event::CData(_) | Event::Comment(_) | Event::PI(_) => {}
            Event::Eof => return Err(malformed("unexpected end of document inside an entry")),
            Event::Decl(_) | Event::DocType(_) => {}
        }
    }
    Ok(entry)
}

fn parse_channels(reader: &mut Reader<&[u8]>, entry: &mut AnnotationEntry) -> Result<()> {
    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => {
                let name = element_name(&start)?;
                if name == CHANNEL_TAG {
                    let label = reader.read_text(start.name()).map_err(malformed)?;
                    entry.channels.push(label.trim().to_string());
                } else {
                    reader.read_to_end(start.name()).map_err(malformed)?;
                }
            }
            Event::Empty(_) | Event::Text(_) => {}
            Event::End(end) if end.name().as_ref() == CHANNELS_TAG.as_bytes() => break,
            Event::End(_) | Event::CData(_) | Event::Comment(_) | Event::PI(_) => {}
            Event::Eof => return Err(malformed("unexpected end of document inside <channels>")),
            Event::Decl(_) | Event::DocType(_) => {}
        }
    }
    Ok(())
}

fn write_entry(writer: &mut Writer<Vec<u8>>, entry: &AnnotationEntry) -> Result<()> {
    let mut elem = BytesStart::new(ENTRY_TAG);

    if let EntryKind::StartMarker { elapsed_usecs } = &entry.kind {
        elem.push_attribute(("type", START_MARKER_TYPE));
        if let Some(usecs) = elapsed_usecs {
            elem.push_attribute(("startOffsetUsecs", usecs.to_string().as_str()));
        }
    }
    if let Some(layer) = &entry.layer {
        elem.push_attribute(("layer", layer.as_str()));
    }
    if let Some(create_time) = &entry.create_time {
        elem.push_attribute(("createTime", create_time.as_str()));
    }
    if let Some(annotator) = &entry.annotator {
        elem.push_attribute(("annotator", annotator.as_str()));
    }
    if let Some(creator_id) = &entry.creator_id {
        elem.push_attribute(("creatorId", creator_id.as_str()));
    }
    for (key, value) in &entry.extra_attributes {
        elem.push_attribute((key.as_str(), value.as_str()));
    }

    if entry.channels.is_empty() && entry.text.is_none() {
        writer.write_event(Event::Empty(elem)).map_err(write_err)?;
        return Ok(());
    }

    writer.write_event(Event::Start(elem)).map_err(write_err)?;

    if !entry.channels.is_empty() {
        writer
            .write_event(Event::Start(BytesStart::new(CHANNELS_TAG)))
            .map_err(write_err)?;
        for channel in &entry.channels {
            writer
                .write_event(Event::Start(BytesStart::new(CHANNEL_TAG)))
                .map_err(write_err)?;
            writer
                .write_event(Event::Text(BytesText::new(channel)))
                .map_err(write_err)?;
            writer
                .write_event(Event::End(BytesEnd::new(CHANNEL_TAG)))
                .map_err(write_err)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(CHANNELS_TAG)))
            .map_err(write_err)?;
    }

    if let Some(text) = &entry.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(ENTRY_TAG)))
        .map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<annotations>
  <annotation type="Start Recording" startOffsetUsecs="1500000" layer="1"/>
  <annotation layer="1" createTime="2021-05-01T10:00:00Z" annotator="tech01" creatorId="u-17" duration="2.5">
    <channels>
      <channel>EEG Fp1</channel>
      <channel>EEG Fp2</channel>
    </channels>
    Spike and wave
  </annotation>
</annotations>"#;

    #[test]
    fn test_parse_sample() {
        let doc = parse_document(SAMPLE).unwrap();
        assert_eq!(doc.root_name, "annotations");
        assert_eq!(doc.entries.len(), 2);

        let marker = &doc.entries[0];
        assert!(marker.is_start_marker());
        assert_eq!(
            marker.kind,
            EntryKind::StartMarker {
                elapsed_usecs: Some(1_500_000)
            }
        );
        assert_eq!(marker.layer.as_deref(), Some("1"));

        let entry = &doc.entries[1];
        assert_eq!(entry.kind, EntryKind::Regular);
        assert_eq!(entry.create_time.as_deref(), Some("2021-05-01T10:00:00Z"));
        assert_eq!(entry.annotator.as_deref(), Some("tech01"));
        assert_eq!(entry.creator_id.as_deref(), Some("u-17"));
        assert_eq!(entry.channels, vec!["EEG Fp1", "EEG Fp2"]);
        assert_eq!(entry.text.as_deref(), Some("Spike and wave"));
        assert_eq!(
            entry.extra_attributes,
            vec![("duration".to_string(), "2.5".to_string())]
        );
    }

    #[test]
    fn test_parse_empty_root() {
        let doc = parse_document(r#"<annotations/>"#).unwrap();
        assert!(doc.entries.is_empty());
    }

    #[test]
    fn test_parse_rejects_broken_xml() {
        let result = parse_document("<annotations><annotation></annotations>");
        assert!(matches!(
            result,
            Err(EdfveilError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_parse_skips_foreign_root_children() {
        let doc = parse_document(
            r#"<annotations>
  <metadata exportedBy="vendor-tool"/>
  <export><tool>vendor</tool></export>
  <annotation layer="1" createTime="2021-05-01T10:00:00Z"/>
</annotations>"#,
        )
        .unwrap();

        // Vendor extensions are dropped, the annotations still come through
        assert_eq!(doc.entries.len(), 1);
        assert_eq!(doc.entries[0].layer.as_deref(), Some("1"));
    }

    #[test]
    fn test_parse_rejects_non_numeric_marker_offset() {
        let result = parse_document(
            r#"<annotations><annotation startOffsetUsecs="soon"/></annotations>"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_preserves_model() {
        let doc = parse_document(SAMPLE).unwrap();
        let xml = write_document(&doc).unwrap();
        let reparsed = parse_document(&xml).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_write_has_no_create_time_after_clearing() {
        let mut doc = parse_document(SAMPLE).unwrap();
        for entry in &mut doc.entries {
            entry.create_time = None;
        }
        let xml = write_document(&doc).unwrap();
        assert!(!xml.contains("createTime"));
    }
}
