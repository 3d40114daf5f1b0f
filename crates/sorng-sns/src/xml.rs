//! Minimal XML element tree for SNS responses.
//!
//! SNS answers every Query API call with a small XML document such as:
//!
//! ```xml
//! <CreateTopicResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
//!   <CreateTopicResult>
//!     <TopicArn>arn:aws:sns:us-east-1:123456789012:My-Topic</TopicArn>
//!   </CreateTopicResult>
//!   <ResponseMetadata>
//!     <RequestId>a8dec8b3-33a4-11df-8963-01868b7c937a</RequestId>
//!   </ResponseMetadata>
//! </CreateTopicResponse>
//! ```
//!
//! Element names are stored without namespace prefixes. Attributes are not
//! kept since SNS never uses them.

use crate::error::{SnsError, SnsResult};
use quick_xml::events::Event;
use quick_xml::Reader;

/// One XML element with its text and child elements in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    /// Concatenated character data directly inside this element.
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse a document and return its root element.
    pub fn parse(xml: &str) -> SnsResult<XmlElement> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    stack.push(XmlElement::named(&local_name(e.local_name().as_ref())?));
                }
                Ok(Event::Empty(ref e)) => {
                    let element = XmlElement::named(&local_name(e.local_name().as_ref())?);
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| SnsError::MalformedResponse("Unbalanced end tag".into()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&e.unescape()?);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(SnsError::MalformedResponse(format!(
                        "XML error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(SnsError::MalformedResponse(
                "Document ended inside an element".into(),
            ));
        }
        root.ok_or_else(|| SnsError::MalformedResponse("Document has no root element".into()))
    }

    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// First direct child called `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children called `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow `path` through first-match children.
    pub fn find(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Text at `path`, if the element exists.
    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        self.find(path).map(|e| e.text.as_str())
    }

    /// Depth-first search for an element called `name`, including `self`.
    pub fn descendant(&self, name: &str) -> Option<&XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.descendant(name))
    }
}

fn local_name(bytes: &[u8]) -> SnsResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| SnsError::MalformedResponse("Invalid UTF-8 in tag name".into()))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> SnsResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(SnsError::MalformedResponse(
            "Document has more than one root element".into(),
        ));
    }
    *root = Some(element);
    Ok(())
}
