//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it into `halo_dom` nodes.
//! Elements are created through `Document::create_element` and receive
//! their attributes before they are inserted, the way a parser builds them.

use halo_dom::{Document, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::HtmlError;

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse markup into detached nodes owned by `doc`.
    ///
    /// The head and body content that html5ever produces are returned in
    /// that order; whitespace-only text and comments are dropped.
    pub fn parse_fragment(&self, doc: &mut Document, markup: &str) -> Result<Vec<NodeId>, HtmlError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut markup.as_bytes())?;

        let html = Self::child_element(&dom.document, "html").ok_or(HtmlError::MissingRoot)?;
        let mut top_level = Vec::new();
        for section in ["head", "body"] {
            let Some(section) = Self::child_element(&html, section) else {
                continue;
            };
            for child in section.children.borrow().iter() {
                if let Some(id) = self.convert_node(doc, child)? {
                    top_level.push(id);
                }
            }
        }

        tracing::trace!("Parsed fragment into {} top-level nodes", top_level.len());
        Ok(top_level)
    }

    /// Parse markup and append every top-level node to `parent`
    pub fn parse_into(&self, doc: &mut Document, parent: NodeId, markup: &str) -> Result<Vec<NodeId>, HtmlError> {
        let nodes = self.parse_fragment(doc, markup)?;
        for &node in &nodes {
            doc.append_child(parent, node)?;
        }
        Ok(nodes)
    }

    fn child_element(handle: &Handle, local: &str) -> Option<Handle> {
        handle
            .children
            .borrow()
            .iter()
            .find(|child| matches!(&child.data, RcNodeData::Element { name, .. } if name.local.as_ref() == local))
            .cloned()
    }

    /// Convert an RcDom node; returns `None` for nodes that are dropped
    fn convert_node(&self, doc: &mut Document, handle: &Handle) -> Result<Option<NodeId>, HtmlError> {
        match &handle.data {
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if text.trim().is_empty() {
                    return Ok(None);
                }
                Ok(Some(doc.create_text(&text)))
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = doc.create_element(name.local.as_ref())?;
                for attr in attrs.borrow().iter() {
                    doc.set_attribute(id, attr.name.local.as_ref(), &attr.value)?;
                }
                for child in handle.children.borrow().iter() {
                    if let Some(child_id) = self.convert_node(doc, child)? {
                        doc.append_child(id, child_id)?;
                    }
                }
                Ok(Some(id))
            }
            RcNodeData::Document
            | RcNodeData::Doctype { .. }
            | RcNodeData::Comment { .. }
            | RcNodeData::ProcessingInstruction { .. } => Ok(None),
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment_is_detached() {
        let mut doc = Document::default();
        let nodes = HtmlParser::new()
            .parse_fragment(&mut doc, "<div><span>Text</span></div>")
            .unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(doc.tag_name(nodes[0]), Some("div"));
        assert_eq!(doc.parent(nodes[0]), None);
        assert_eq!(doc.text_content(nodes[0]), "Text");
    }

    #[test]
    fn test_head_content_comes_first() {
        let mut doc = Document::default();
        let nodes = HtmlParser::new()
            .parse_fragment(&mut doc, "<style>:host { display: block; }</style><button part=\"control\"></button>")
            .unwrap();

        let tags: Vec<_> = nodes.iter().map(|&id| doc.tag_name(id)).collect();
        assert_eq!(tags, vec![Some("style"), Some("button")]);
        assert_eq!(doc.text_content(nodes[0]), ":host { display: block; }");
        assert_eq!(doc.get_attribute(nodes[1], "part"), Some("control"));
    }

    #[test]
    fn test_parse_into_appends() {
        let mut doc = Document::default();
        let body = doc.body();
        HtmlParser::new()
            .parse_into(&mut doc, body, "<p id=\"a\">One</p>\n<!-- note -->\n<p id=\"b\">Two</p>")
            .unwrap();

        assert_eq!(doc.children(body).len(), 2);
        assert!(doc.get_element_by_id("a").is_some());
        assert!(doc.get_element_by_id("b").is_some());
    }
}
