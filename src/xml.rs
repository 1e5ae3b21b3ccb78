// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::errors::{LedgerError, LedgerResult};

/// One node of a parsed XML document. Element names keep their namespace
/// prefix; lookups match on the qualified-name suffix so any prefixing
/// scheme is tolerated.
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    name: String,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse a complete document and return its root element.
    pub fn parse(input: &str) -> LedgerResult<XmlElement> {
        let mut reader = Reader::from_str(input);
        reader.trim_text(true);

        // Index 0 is a synthetic document node collecting the root.
        let mut stack: Vec<XmlElement> = vec![XmlElement::default()];
        loop {
            let event = reader
                .read_event()
                .map_err(|e| LedgerError::Malformed(format!("Invalid XML: {e}")))?;
            match event {
                Event::Start(start) => {
                    stack.push(XmlElement {
                        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
                        ..XmlElement::default()
                    });
                }
                Event::Empty(start) => {
                    let element = XmlElement {
                        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
                        ..XmlElement::default()
                    };
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(element);
                    }
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| LedgerError::Malformed(format!("Invalid XML text: {e}")))?;
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&text);
                    }
                }
                Event::CData(cdata) => {
                    let bytes = cdata.into_inner();
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&bytes));
                    }
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| LedgerError::Malformed("Unbalanced XML".into()))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Err(LedgerError::Malformed("Unbalanced XML".into())),
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if stack.len() != 1 {
            return Err(LedgerError::Malformed("Unclosed XML element".into()));
        }
        let document = match stack.pop() {
            Some(document) => document,
            None => return Err(LedgerError::Malformed("Empty XML document".into())),
        };
        document
            .children
            .into_iter()
            .next()
            .ok_or_else(|| LedgerError::Malformed("Document has no root element".into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Children whose qualified name ends with `tag`.
    pub fn children<'a, 'b>(
        &'a self,
        tag: &'b str,
    ) -> impl Iterator<Item = &'a XmlElement> + use<'a, 'b> {
        self.children.iter().filter(move |c| c.name.ends_with(tag))
    }

    pub fn child(&self, tag: &str) -> Option<&XmlElement> {
        self.children(tag).next()
    }

    pub fn require_child(&self, tag: &str) -> LedgerResult<&XmlElement> {
        self.child(tag).ok_or_else(|| {
            LedgerError::Malformed(format!("<{}> is missing a <{}> child", self.name, tag))
        })
    }
}
