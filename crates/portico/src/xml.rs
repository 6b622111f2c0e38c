//! A minimal XML element tree: names, ordered attributes and child elements.
//!
//! Text content is not modelled; the page format carries everything in attributes.

use crate::error::SiteError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Self>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: Vec::new(), children: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Sets `name`, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn push_child(&mut self, child: Self) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Parses the first root element of `xml`.
    ///
    /// # Errors
    /// Returns [`SiteError::Xml`] for malformed markup or a document without an element.
    pub fn parse(xml: &str) -> Result<Self, SiteError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Self> = Vec::new();
        loop {
            let finished = match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    stack.push(Self::from_start(e)?);
                    None
                },
                Ok(Event::Empty(ref e)) => Some(Self::from_start(e)?),
                Ok(Event::End(_)) => stack.pop(),
                Ok(Event::Eof) => {
                    return Err(SiteError::xml("unexpected end of document"));
                },
                Err(e) => {
                    return Err(SiteError::xml(format!(
                        "at byte {}: {e}",
                        reader.buffer_position()
                    )));
                },
                Ok(_) => None,
            };

            if let Some(element) = finished {
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, SiteError> {
        let mut element = Self::new(String::from_utf8_lossy(start.name().as_ref()));
        for attr in start.attributes() {
            let attr = attr.map_err(|e| SiteError::xml(format!("attribute error: {e}")))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    /// Writes the element as an indented document with an XML declaration.
    ///
    /// # Errors
    /// Returns [`SiteError::Xml`] if the writer fails.
    pub fn to_xml_string(&self) -> Result<String, SiteError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
        self.write_into(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(write_error)
    }

    fn write_into(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), SiteError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start)).map_err(write_error)?;
            return Ok(());
        }

        writer.write_event(Event::Start(start)).map_err(write_error)?;
        for child in &self.children {
            child.write_into(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str()))).map_err(write_error)?;
        Ok(())
    }
}

fn write_error(e: impl Display) -> SiteError {
    SiteError::xml(format!("write failed: {e}"))
}

/// Case-insensitive `"true"` is true; anything else, including absence, is false.
pub fn flag_or_default(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
