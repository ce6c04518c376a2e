//! Document - High-level document API
//!
//! Owns the node arena together with everything that hangs off it:
//! event listeners, custom element instances and the task scheduler.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::custom_elements::{CustomElement, CustomElementRegistry, LifecycleCallback};
use crate::events::RegisteredListener;
use crate::scheduler::Scheduler;
use crate::{DomError, ElementData, Node, NodeData, NodeId, Selector};

/// HTML Document
pub struct Document {
    nodes: Vec<Node>,
    /// Document URL
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    pub(crate) listeners: HashMap<NodeId, Vec<RegisteredListener>>,
    pub(crate) next_listener_id: u64,
    pub(crate) registry: CustomElementRegistry,
    pub(crate) instances: HashMap<NodeId, Rc<dyn CustomElement>>,
    pub(crate) scheduler: Scheduler,
    pub(crate) submissions: Vec<NodeId>,
}

impl Document {
    /// Create a new document with `html`, `head` and `body`
    pub fn new(url: &str) -> Self {
        let mut doc = Self {
            nodes: vec![Node::document()],
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            listeners: HashMap::new(),
            next_listener_id: 0,
            registry: CustomElementRegistry::new(),
            instances: HashMap::new(),
            scheduler: Scheduler::default(),
            submissions: Vec::new(),
        };

        let html = doc.push_node(Node::element(ElementData::new("html")));
        let head = doc.push_node(Node::element(ElementData::new("head")));
        let body = doc.push_node(Node::element(ElementData::new("body")));
        doc.link(NodeId::ROOT, html);
        doc.link(html, head);
        doc.link(html, body);

        doc.html_element = html;
        doc.head_element = head;
        doc.body_element = body;
        doc
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Number of nodes ever allocated
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by ID
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get element data by ID
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id)?.as_element()
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id.index())?.as_element_mut()
    }

    /// Lowercased tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    pub(crate) fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = parent;
        self.nodes[parent.index()].children.push(child);
    }

    fn require(&self, id: NodeId) -> Result<&Node, DomError> {
        self.node(id).ok_or(DomError::UnknownNode(id))
    }

    // ------------------------------------------------------------------
    // Node creation
    // ------------------------------------------------------------------

    /// Create an element, upgrading it when a custom element is defined for the tag
    pub fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        let id = self.push_node(Node::element(ElementData::new(tag)));
        self.upgrade(id)?;
        Ok(id)
    }

    /// Create a text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(Node::text(text))
    }

    // ------------------------------------------------------------------
    // Tree structure
    // ------------------------------------------------------------------

    /// Parent node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Child nodes in tree order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parent in the flattened tree: the parent node, or the host of a shadow root
    pub fn flat_parent(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id)?;
        if node.parent.is_valid() {
            return Some(node.parent);
        }
        node.as_shadow_root().map(|root| root.host)
    }

    /// Topmost ancestor without crossing shadow boundaries
    pub fn tree_root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Whether the node is reachable from the document, through shadow hosts included
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == NodeId::ROOT {
                return true;
            }
            match self.flat_parent(current) {
                Some(next) => current = next,
                None => return false,
            }
        }
    }

    fn is_flat_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.flat_parent(id);
        }
        false
    }

    /// Append a child, moving it if it is already attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.require(parent)?;
        if parent_node.is_text() {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        let child_node = self.require(child)?;
        if matches!(child_node.data, NodeData::Document | NodeData::ShadowRoot(_))
            || self.is_flat_inclusive_ancestor(child, parent)
        {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        if self.parent(child).is_some() {
            self.detach(child);
        }

        self.link(parent, child);
        if self.is_connected(child) {
            self.run_reactions(child, LifecycleCallback::Connected);
        }
        Ok(())
    }

    /// Remove a child from its parent
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        let was_connected = self.is_connected(child);
        let Some(parent) = self.parent(child) else {
            return;
        };
        self.nodes[parent.index()].children.retain(|&c| c != child);
        self.nodes[child.index()].parent = NodeId::NONE;
        if was_connected {
            self.run_reactions(child, LifecycleCallback::Disconnected);
        }
    }

    /// Light-tree descendants of `root` in tree order, excluding `root`
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(root, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// Shadow-including preorder: the node, its shadow tree, then its children
    pub(crate) fn shadow_including_inclusive_descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_shadow_including(id, &mut out);
        out
    }

    fn collect_shadow_including(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        if let Some(shadow) = self.element(id).and_then(|e| e.shadow_root) {
            self.collect_shadow_including(shadow, out);
        }
        for &child in self.children(id) {
            self.collect_shadow_including(child, out);
        }
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Concatenated text of the light subtree
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        if let Some(text) = node.as_text() {
            out.push_str(text);
            return;
        }
        for &child in &node.children {
            self.collect_text(child, out);
        }
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        self.require(id)?;
        let children = self.children(id).to_vec();
        for child in children {
            self.detach(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.link(id, text_node);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Get an attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    /// Check attribute presence
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    /// Set an attribute
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let name = name.to_ascii_lowercase();
        let element = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        let old = element.set_attr(&name, value);
        self.notify_attribute_changed(id, &name, old.as_deref(), Some(value));
        Ok(())
    }

    /// Remove an attribute; removing an absent attribute is not a change
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        let name = name.to_ascii_lowercase();
        let element = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        if let Some(old) = element.remove_attr(&name) {
            self.notify_attribute_changed(id, &name, Some(&old), None);
        }
        Ok(())
    }

    /// Add (as empty) or remove a boolean attribute
    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, force: bool) -> Result<(), DomError> {
        match (force, self.has_attribute(id, name)) {
            (true, false) => self.set_attribute(id, name, ""),
            (false, true) => self.remove_attribute(id, name),
            _ => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Get element by ID (document light tree only)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.descendants(NodeId::ROOT)
            .into_iter()
            .find(|&node| self.element(node).and_then(|e| e.id()) == Some(id))
    }

    /// First light descendant of `root` matching `selector`
    pub fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        self.descendants(root)
            .into_iter()
            .find(|&node| self.element(node).is_some_and(|e| selector.matches(e)))
    }

    /// All light descendants of `root` matching `selector`
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            tracing::debug!("Ignoring unparseable selector: {}", selector);
            return Vec::new();
        };
        self.descendants(root)
            .into_iter()
            .filter(|&node| self.element(node).is_some_and(|e| selector.matches(e)))
            .collect()
    }

    /// Check if element matches selector
    pub fn matches(&self, id: NodeId, selector: &str) -> bool {
        match (self.element(id), Selector::parse(selector)) {
            (Some(element), Some(selector)) => selector.matches(element),
            _ => false,
        }
    }

    /// Forms whose submission was not cancelled, in submission order
    pub fn submissions(&self) -> &[NodeId] {
        &self.submissions
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url)
            .field("nodes", &self.nodes.len())
            .field("custom_elements", &self.instances.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_structure() {
        let doc = Document::new("https://example.test/");
        assert_eq!(doc.url(), "https://example.test/");
        assert_eq!(doc.tag_name(doc.document_element()), Some("html"));
        assert_eq!(doc.parent(doc.body()), Some(doc.document_element()));
        assert!(doc.is_connected(doc.body()));
    }

    #[test]
    fn test_append_and_remove() {
        let mut doc = Document::default();
        let div = doc.create_element("div").unwrap();
        assert!(!doc.is_connected(div));

        doc.append_child(doc.body(), div).unwrap();
        assert!(doc.is_connected(div));
        assert_eq!(doc.children(doc.body()), &[div]);

        doc.remove_child(doc.body(), div).unwrap();
        assert!(!doc.is_connected(div));
        assert!(doc.children(doc.body()).is_empty());
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::default();
        let outer = doc.create_element("div").unwrap();
        let inner = doc.create_element("div").unwrap();
        doc.append_child(outer, inner).unwrap();
        assert!(matches!(
            doc.append_child(inner, outer),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert!(doc.append_child(outer, outer).is_err());
    }

    #[test]
    fn test_move_between_parents() {
        let mut doc = Document::default();
        let a = doc.create_element("div").unwrap();
        let b = doc.create_element("div").unwrap();
        let child = doc.create_element("span").unwrap();
        doc.append_child(a, child).unwrap();
        doc.append_child(b, child).unwrap();
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[child]);
    }

    #[test]
    fn test_text_content() {
        let mut doc = Document::default();
        let p = doc.create_element("p").unwrap();
        let span = doc.create_element("span").unwrap();
        let t1 = doc.create_text("Hello ");
        let t2 = doc.create_text("world");
        doc.append_child(p, t1).unwrap();
        doc.append_child(p, span).unwrap();
        doc.append_child(span, t2).unwrap();
        assert_eq!(doc.text_content(p), "Hello world");

        doc.set_text_content(p, "Bye").unwrap();
        assert_eq!(doc.text_content(p), "Bye");
        assert_eq!(doc.children(p).len(), 1);
    }

    #[test]
    fn test_get_element_by_id_requires_connection() {
        let mut doc = Document::default();
        let div = doc.create_element("div").unwrap();
        doc.set_attribute(div, "id", "hint").unwrap();
        assert_eq!(doc.get_element_by_id("hint"), None);

        doc.append_child(doc.body(), div).unwrap();
        assert_eq!(doc.get_element_by_id("hint"), Some(div));
        assert_eq!(doc.get_element_by_id(""), None);
    }

    #[test]
    fn test_query_selector() {
        let mut doc = Document::default();
        let form = doc.create_element("form").unwrap();
        let input = doc.create_element("input").unwrap();
        doc.set_attribute(input, "name", "email").unwrap();
        let select = doc.create_element("select").unwrap();
        doc.append_child(form, input).unwrap();
        doc.append_child(form, select).unwrap();

        assert_eq!(doc.query_selector(form, "input"), Some(input));
        assert_eq!(doc.query_selector(form, "[name=email]"), Some(input));
        assert_eq!(doc.query_selector_all(form, "input, select"), vec![input, select]);
        assert!(doc.matches(select, "select"));
        assert!(doc.query_selector_all(form, "").is_empty());
    }

    #[test]
    fn test_toggle_attribute() {
        let mut doc = Document::default();
        let input = doc.create_element("input").unwrap();
        doc.toggle_attribute(input, "disabled", true).unwrap();
        assert_eq!(doc.get_attribute(input, "disabled"), Some(""));
        doc.toggle_attribute(input, "disabled", false).unwrap();
        assert!(!doc.has_attribute(input, "disabled"));
    }
}
