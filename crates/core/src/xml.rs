//! Canonical XML writer.
//!
//! Thin layer over [`quick_xml::Writer`] that enforces two rules for the
//! canonical resource document: every text node goes through entity
//! escaping, and optional values are either written with content or not
//! written at all (never as an empty tag).

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Indentation used for all generated documents.
const INDENT_WIDTH: usize = 2;

/// Failure while serializing XML into the in-memory buffer.
#[derive(Debug, thiserror::Error)]
#[error("XML serialization failed: {0}")]
pub struct XmlWriteError(pub String);

/// Returns `true` if the value is absent or contains only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Incremental writer for an indented, UTF-8 XML document.
pub struct XmlDocumentWriter {
    writer: Writer<Vec<u8>>,
}

impl XmlDocumentWriter {
    /// Start a new document, emitting the XML declaration.
    pub fn new() -> Result<Self, XmlWriteError> {
        let mut doc = Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH),
        };
        doc.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(doc)
    }

    /// Open a container element.
    pub fn open(&mut self, name: &str) -> Result<(), XmlWriteError> {
        self.emit(Event::Start(BytesStart::new(name)))
    }

    /// Close a container element previously opened with [`open`](Self::open).
    pub fn close(&mut self, name: &str) -> Result<(), XmlWriteError> {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    /// Write `<name>value</name>` unconditionally. An empty value still
    /// produces the element.
    pub fn element(&mut self, name: &str, value: &str) -> Result<(), XmlWriteError> {
        self.open(name)?;
        self.emit(Event::Text(BytesText::new(value)))?;
        self.close(name)
    }

    /// Write `<name>value</name>` only when the value is non-blank.
    pub fn optional(&mut self, name: &str, value: Option<&str>) -> Result<(), XmlWriteError> {
        match value {
            Some(v) if !v.trim().is_empty() => self.element(name, v),
            _ => Ok(()),
        }
    }

    /// Write any displayable value (numbers, dates) unconditionally.
    pub fn display(
        &mut self,
        name: &str,
        value: impl std::fmt::Display,
    ) -> Result<(), XmlWriteError> {
        self.element(name, &value.to_string())
    }

    /// Write a displayable value only when it is present.
    pub fn optional_display<T: std::fmt::Display>(
        &mut self,
        name: &str,
        value: Option<T>,
    ) -> Result<(), XmlWriteError> {
        match value {
            Some(v) => self.display(name, v),
            None => Ok(()),
        }
    }

    /// Finish the document and return it as a string.
    pub fn finish(self) -> Result<String, XmlWriteError> {
        String::from_utf8(self.writer.into_inner()).map_err(|e| XmlWriteError(e.to_string()))
    }

    fn emit(&mut self, event: Event<'_>) -> Result<(), XmlWriteError> {
        self.writer
            .write_event(event)
            .map_err(|e| XmlWriteError(e.to_string()))
    }
}
