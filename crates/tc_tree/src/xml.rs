//! XML text form for [`Element`] trees.
//!
//! Reading goes through `quick-xml`; writing is a small indenting formatter
//! with attribute-value escaping. The codec layer never emits text nodes, so
//! stray text content is skipped when reading.

use alloc::borrow::ToOwned;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::{error, fmt};

use std::io::{self, Write};

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::node::Element;

// -----------------------------------------------------------------------------
// XmlError

/// An error raised while parsing an XML document into an [`Element`] tree.
#[derive(Debug, Clone)]
pub enum XmlError {
    /// Error reported by the underlying parser.
    Parse(String),
    /// The input ended before a root element was read.
    UnexpectedEof,
    /// A name or value was not valid UTF-8.
    InvalidUtf8(core::str::Utf8Error),
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlError::Parse(msg) => write!(f, "XML parse error: {msg}"),
            XmlError::UnexpectedEof => write!(f, "unexpected end of XML input"),
            XmlError::InvalidUtf8(e) => write!(f, "invalid UTF-8 in XML: {e}"),
        }
    }
}

impl error::Error for XmlError {}

impl From<quick_xml::Error> for XmlError {
    fn from(value: quick_xml::Error) -> Self {
        XmlError::Parse(value.to_string())
    }
}

impl From<core::str::Utf8Error> for XmlError {
    fn from(value: core::str::Utf8Error) -> Self {
        XmlError::InvalidUtf8(value)
    }
}

// -----------------------------------------------------------------------------
// Writing

fn escape_into(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

fn format_into(out: &mut String, elem: &Element, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push('<');
    out.push_str(elem.name());
    for attr in elem.attributes() {
        out.push(' ');
        out.push_str(attr.name());
        out.push_str("=\"");
        escape_into(out, attr.value());
        out.push('"');
    }
    if elem.children().is_empty() {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");
    for child in elem.children() {
        format_into(out, child, depth + 1);
    }
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str("</");
    out.push_str(elem.name());
    out.push_str(">\n");
}

impl Element {
    /// Formats this element (and its subtree) as indented XML.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        format_into(&mut out, self, 0);
        out
    }

    /// Writes this element as a complete XML document, declaration included.
    pub fn write_xml<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")?;
        writer.write_all(self.to_xml().as_bytes())
    }

    /// Parses an XML document into an element tree.
    ///
    /// The whole document is materialized before any decoding happens;
    /// incremental parsing is out of scope.
    pub fn from_xml(input: &str) -> Result<Element, XmlError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        // Elements under construction, innermost last.
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(element_from_start(&start)?);
                }
                Event::Empty(start) => {
                    let elem = element_from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.push_child(elem),
                        None => return Ok(elem),
                    }
                }
                Event::End(_) => {
                    // quick-xml has already verified tag balance.
                    let elem = match stack.pop() {
                        Some(elem) => elem,
                        None => return Err(XmlError::Parse("unmatched end tag".to_owned())),
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.push_child(elem),
                        None => return Ok(elem),
                    }
                }
                Event::Eof => return Err(XmlError::UnexpectedEof),
                // No text nodes in this format; declarations, comments and
                // stray text are skipped.
                _ => {}
            }
        }
    }
}

fn element_from_start(start: &quick_xml::events::BytesStart<'_>) -> Result<Element, XmlError> {
    let name_ref = start.name();
    let name = core::str::from_utf8(name_ref.as_ref())?;
    let mut elem = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Parse(e.to_string()))?;
        let key = core::str::from_utf8(attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::Parse(e.to_string()))?;
        elem.set_attribute(key, value);
    }
    Ok(elem)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::node::Element;

    use super::XmlError;

    fn sample() -> Element {
        Element::new("quiz")
            .with_attribute("title", "Maths & Logic")
            .with_child(
                Element::new("question")
                    .with_attribute("prompt", "1 < 2?")
                    .with_child(Element::new("answer").with_attribute("tc:value", "true")),
            )
            .with_child(Element::new("question").with_attribute("prompt", "2+2?"))
    }

    #[test]
    fn formats_with_escaping_and_self_closing_tags() {
        let expected = indoc! {r#"
            <quiz title="Maths &amp; Logic">
              <question prompt="1 &lt; 2?">
                <answer tc:value="true"/>
              </question>
              <question prompt="2+2?"/>
            </quiz>
        "#};
        assert_eq!(sample().to_xml(), expected);
    }

    #[test]
    fn parse_round_trips_the_tree() {
        let elem = sample();
        let parsed = Element::from_xml(&elem.to_xml()).unwrap();
        assert_eq!(parsed, elem);
    }

    #[test]
    fn parse_accepts_a_declaration() {
        let mut out = alloc::vec::Vec::new();
        sample().write_xml(&mut out).unwrap();
        let text = core::str::from_utf8(&out).unwrap();
        assert!(text.starts_with("<?xml"));

        let parsed = Element::from_xml(text).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn parse_skips_stray_text() {
        let parsed = Element::from_xml("<quiz>stray<question/></quiz>").unwrap();
        assert_eq!(parsed.children().len(), 1);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(Element::from_xml(""), Err(XmlError::UnexpectedEof)));
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(Element::from_xml("<quiz><question></quiz>").is_err());
    }
}
