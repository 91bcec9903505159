//! Atom 1.0 (RFC 4287) document model and XML serialisation.
//!
//! The model is flat: exactly the elements the advent feed publishes,
//! already formatted as strings. Rendering keeps entry order.

use std::borrow::Cow;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::RenderError;

pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// `Content-Type` for a rendered [`FeedDocument`].
pub const ATOM_CONTENT_TYPE: &str = "application/atom+xml; charset=utf-8";

/// A complete feed for one store and one cache window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub title: String,
    /// Omitted from the XML when empty.
    pub subtitle: String,
    /// Canonical `rel="alternate"` link to the calendar page.
    pub link: String,
    /// Omitted from the XML when empty.
    pub icon: String,
    /// RFC 3339 build time.
    pub updated: String,
    pub id: String,
    pub author: FeedAuthor,
    pub entries: Vec<FeedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedAuthor {
    pub name: String,
    pub uri: String,
}

/// One product offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// `urn:advent:<productId>`; unchanged across rebuilds.
    pub id: String,
    pub updated: String,
    /// Published as `type="text"`.
    pub summary: String,
    /// HTML fragment, published as `type="html"`.
    pub content: String,
}

impl FeedDocument {
    /// Renders the document as an indented Atom 1.0 XML string, including
    /// the XML declaration.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the XML writer fails. Writing into memory
    /// does not fail in practice.
    pub fn to_xml(&self) -> Result<String, RenderError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("feed").with_attributes([("xmlns", ATOM_NAMESPACE)]),
        ))?;

        write_text_element(&mut writer, "title", None, &self.title)?;
        if !self.subtitle.is_empty() {
            write_text_element(&mut writer, "subtitle", None, &self.subtitle)?;
        }
        write_link(&mut writer, &self.link)?;
        if !self.icon.is_empty() {
            write_text_element(&mut writer, "icon", None, &self.icon)?;
        }
        write_text_element(&mut writer, "updated", None, &self.updated)?;
        write_text_element(&mut writer, "id", None, &self.id)?;

        writer.write_event(Event::Start(BytesStart::new("author")))?;
        write_text_element(&mut writer, "name", None, &self.author.name)?;
        if !self.author.uri.is_empty() {
            write_text_element(&mut writer, "uri", None, &self.author.uri)?;
        }
        writer.write_event(Event::End(BytesEnd::new("author")))?;

        for entry in &self.entries {
            write_entry(&mut writer, entry)?;
        }

        writer.write_event(Event::End(BytesEnd::new("feed")))?;

        let mut xml = String::from_utf8(writer.into_inner())?;
        xml.push('\n');
        Ok(xml)
    }
}

fn write_entry(writer: &mut Writer<Vec<u8>>, entry: &FeedEntry) -> Result<(), RenderError> {
    writer.write_event(Event::Start(BytesStart::new("entry")))?;
    write_text_element(writer, "title", None, &entry.title)?;
    write_link(writer, &entry.link)?;
    write_text_element(writer, "id", None, &entry.id)?;
    write_text_element(writer, "updated", None, &entry.updated)?;
    write_text_element(writer, "summary", Some("text"), &entry.summary)?;
    write_text_element(writer, "content", Some("html"), &entry.content)?;
    writer.write_event(Event::End(BytesEnd::new("entry")))?;
    Ok(())
}

/// Writes `<name [type="..."]>text</name>`; the text is XML-escaped.
fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    content_type: Option<&str>,
    text: &str,
) -> Result<(), RenderError> {
    let mut start = BytesStart::new(name);
    if let Some(content_type) = content_type {
        start.push_attribute(("type", content_type));
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(&xml_chars(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_link(writer: &mut Writer<Vec<u8>>, href: &str) -> Result<(), RenderError> {
    let href = xml_chars(href);
    writer.write_event(Event::Empty(
        BytesStart::new("link").with_attributes([("href", href.as_ref()), ("rel", "alternate")]),
    ))?;
    Ok(())
}

/// Replaces characters outside the XML 1.0 `Char` production with U+FFFD.
/// Escaping cannot represent them, so they would make the document
/// malformed.
fn xml_chars(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(
            text.chars()
                .map(|c| if is_xml_char(c) { c } else { '\u{FFFD}' })
                .collect(),
        )
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}
