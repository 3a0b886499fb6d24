//! Small helpers over `quick-xml` shared by the catalog and report readers.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Create a reader over an in-memory document with whitespace-only text skipped.
pub(crate) fn reader(xml: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    reader
}

/// Collect the text content of the element whose start tag was just read,
/// consuming everything up to and including its end tag.
///
/// Text is unescaped, CDATA is taken verbatim and the result is trimmed.
/// Nested elements are rejected.
pub(crate) fn read_text(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<String, String> {
    let mut text = String::new();
    loop {
        match reader.read_event().map_err(|e| position_message(reader, &e))? {
            Event::Text(t) => {
                let unescaped = t.unescape().map_err(|e| position_message(reader, &e))?;
                text.push_str(&unescaped);
            }
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::End(e) if e.name().as_ref() == end => break,
            Event::Start(e) | Event::Empty(e) => {
                return Err(format!(
                    "unexpected element <{}> inside <{}> at position {}",
                    String::from_utf8_lossy(e.name().as_ref()),
                    String::from_utf8_lossy(end),
                    reader.buffer_position()
                ));
            }
            Event::Eof => {
                return Err(format!(
                    "unexpected end of document inside <{}>",
                    String::from_utf8_lossy(end)
                ));
            }
            _ => {}
        }
    }
    Ok(text.trim().to_string())
}

/// Read an attribute value, unescaped.
pub(crate) fn attribute(
    element: &quick_xml::events::BytesStart<'_>,
    name: &str,
) -> Result<Option<String>, String> {
    match element.try_get_attribute(name).map_err(|e| e.to_string())? {
        Some(attr) => attr
            .unescape_value()
            .map(|v| Some(v.trim().to_string()))
            .map_err(|e| e.to_string()),
        None => Ok(None),
    }
}

pub(crate) fn position_message(reader: &Reader<&[u8]>, error: &dyn std::fmt::Display) -> String {
    format!("{} at position {}", error, reader.buffer_position())
}
