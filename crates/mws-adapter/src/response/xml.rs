/*
[INPUT]:  XML response documents
[OUTPUT]: serde_json::Value tree (root name -> element object)
[POS]:    Response layer - lenient XML-to-object conversion
[UPDATE]: When element/attribute mapping conventions change
*/

//! Element mapping:
//!
//! - the document becomes `{ "<root>": <element> }`
//! - child elements are grouped by name into arrays, even single ones
//! - attributes go under `"$"`, text mixed with children or attributes under `"_"`
//! - an element with nothing but text is that text; an empty element is `""`

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use crate::http::{MwsError, Result};

const ATTRIBUTES_KEY: &str = "$";
const TEXT_KEY: &str = "_";

#[derive(Debug)]
struct Element {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(quick_xml::Error::from)?
                .into_owned();
            attributes.insert(key, Value::String(value));
        }

        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn push_child(&mut self, name: String, value: Value) {
        if let Some(Value::Array(siblings)) = self.children.get_mut(&name) {
            siblings.push(value);
        } else {
            self.children.insert(name, Value::Array(vec![value]));
        }
    }

    fn close(self) -> (String, Value) {
        if self.attributes.is_empty() && self.children.is_empty() {
            return (self.name, Value::String(self.text));
        }

        let mut object = Map::new();
        if !self.attributes.is_empty() {
            object.insert(ATTRIBUTES_KEY.to_string(), Value::Object(self.attributes));
        }
        // whitespace between child elements is formatting, not content
        if !self.text.trim().is_empty() {
            object.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        object.extend(self.children);
        (self.name, Value::Object(object))
    }
}

/// Convert an XML document into a JSON-like tree.
///
/// Fails without a partial result on malformed input: mismatched or unclosed
/// tags, a missing root, several roots, or text outside the root element.
pub fn parse_xml(body: &str) -> Result<Value> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(false);

    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                ensure_single_root(&open, &root)?;
                open.push(Element::open(&start)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&open, &root)?;
                let element = Element::open(&start)?;
                attach(&mut open, &mut root, element);
            }
            Event::End(_) => {
                let element = open
                    .pop()
                    .ok_or_else(|| MwsError::MalformedXml("unexpected closing tag".to_string()))?;
                attach(&mut open, &mut root, element);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(quick_xml::Error::from)?;
                append_text(&mut open, &text)?;
            }
            Event::CData(data) => {
                let raw = data.into_inner();
                let text = std::str::from_utf8(&raw)
                    .map_err(|e| MwsError::MalformedXml(format!("invalid CDATA: {e}")))?;
                append_text(&mut open, text)?;
            }
            Event::Eof => break,
            // declaration, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(MwsError::MalformedXml(format!(
            "unclosed element <{}>",
            unclosed.name
        )));
    }

    let (name, value) = root
        .ok_or_else(|| MwsError::MalformedXml("document has no root element".to_string()))?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

fn ensure_single_root(open: &[Element], root: &Option<(String, Value)>) -> Result<()> {
    if open.is_empty() && root.is_some() {
        return Err(MwsError::MalformedXml(
            "document has more than one root element".to_string(),
        ));
    }
    Ok(())
}

fn attach(open: &mut [Element], root: &mut Option<(String, Value)>, element: Element) {
    let (name, value) = element.close();
    match open.last_mut() {
        Some(parent) => parent.push_child(name, value),
        None => *root = Some((name, value)),
    }
}

fn append_text(open: &mut [Element], text: &str) -> Result<()> {
    match open.last_mut() {
        Some(element) => {
            element.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(MwsError::MalformedXml(
            "text outside the root element".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_simple_document() {
        let doc = parse_xml("<?xml version=\"1.0\"?><A><B>1</B></A>").unwrap();
        assert_eq!(doc, json!({"A": {"B": ["1"]}}));
    }

    #[test]
    fn test_repeated_children_become_arrays() {
        let doc = parse_xml(
            "<?xml version=\"1.0\"?>\n<Orders>\n  <Order>1</Order>\n  <Order>2</Order>\n</Orders>\n",
        )
        .unwrap();
        assert_eq!(doc, json!({"Orders": {"Order": ["1", "2"]}}));
    }

    #[test]
    fn test_attributes_and_text() {
        let doc = parse_xml(
            r#"<?xml version="1.0"?><Price currency="USD">9.99</Price>"#,
        )
        .unwrap();
        assert_eq!(doc, json!({"Price": {"$": {"currency": "USD"}, "_": "9.99"}}));
    }

    #[test]
    fn test_empty_elements() {
        let doc = parse_xml(r#"<?xml version="1.0"?><A><B/><C></C><D kind="x"/></A>"#).unwrap();
        assert_eq!(
            doc,
            json!({"A": {"B": [""], "C": [""], "D": [{"$": {"kind": "x"}}]}})
        );
    }

    #[test]
    fn test_entities_and_cdata() {
        let doc = parse_xml(
            r#"<?xml version="1.0"?><A><T>Fish &amp; Chips</T><C><![CDATA[<raw> & text]]></C></A>"#,
        )
        .unwrap();
        assert_eq!(doc["A"]["T"][0], "Fish & Chips");
        assert_eq!(doc["A"]["C"][0], "<raw> & text");
    }

    #[test]
    fn test_mws_response_shape() {
        let body = r#"<?xml version="1.0"?>
<GetServiceStatusResponse xmlns="https://mws.amazonservices.com/Orders/2013-09-01">
  <GetServiceStatusResult>
    <Status>GREEN</Status>
    <Timestamp>2024-01-01T00:00:00.000Z</Timestamp>
  </GetServiceStatusResult>
  <ResponseMetadata>
    <RequestId>1d6b2a84</RequestId>
  </ResponseMetadata>
</GetServiceStatusResponse>"#;
        let doc = parse_xml(body).unwrap();
        let response = &doc["GetServiceStatusResponse"];
        assert_eq!(
            response["$"]["xmlns"],
            "https://mws.amazonservices.com/Orders/2013-09-01"
        );
        assert_eq!(response["GetServiceStatusResult"][0]["Status"][0], "GREEN");
        assert_eq!(response["ResponseMetadata"][0]["RequestId"][0], "1d6b2a84");
        assert!(response.get("_").is_none());
    }

    #[test]
    fn test_mismatched_tags() {
        let err = parse_xml("<?xml version=\"1.0\"?><A><B>1</A>").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_unclosed_element() {
        let err = parse_xml("<?xml version=\"1.0\"?><A><B>1</B>").unwrap_err();
        assert!(matches!(err, MwsError::MalformedXml(_) | MwsError::XmlParse(_)));
    }

    #[test]
    fn test_no_root() {
        let err = parse_xml("<?xml version=\"1.0\"?>").unwrap_err();
        assert!(matches!(err, MwsError::MalformedXml(_)));
    }

    #[test]
    fn test_multiple_roots() {
        let err = parse_xml("<?xml version=\"1.0\"?><A/><B/>").unwrap_err();
        assert!(matches!(err, MwsError::MalformedXml(_)));
    }

    #[test]
    fn test_text_outside_root() {
        let err = parse_xml("<?xml version=\"1.0\"?>junk<A/>").unwrap_err();
        assert!(matches!(err, MwsError::MalformedXml(_)));
    }
}
