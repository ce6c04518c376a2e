//! Shadow DOM
//!
//! Encapsulated subtrees attached to host elements.

use crate::{Document, DomError, Node, NodeId};

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

/// Shadow root
#[derive(Debug, Clone)]
pub struct ShadowRoot {
    pub host: NodeId,
    pub mode: ShadowRootMode,
}

impl ShadowRoot {
    /// Create a new shadow root
    pub fn new(host: NodeId, mode: ShadowRootMode) -> Self {
        Self { host, mode }
    }
}

impl Document {
    /// Attach a shadow root to `host`
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowRootMode) -> Result<NodeId, DomError> {
        let element = self.element(host).ok_or(DomError::NotAnElement(host))?;
        if element.shadow_root.is_some() {
            return Err(DomError::ShadowRootExists(host));
        }

        let root = self.push_node(Node::shadow_root(ShadowRoot::new(host, mode)));
        if let Some(element) = self.element_mut(host) {
            element.shadow_root = Some(root);
        }
        Ok(root)
    }

    /// Open shadow root of `host`
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        let root = self.element(host)?.shadow_root?;
        let data = self.node(root)?.as_shadow_root()?;
        (data.mode == ShadowRootMode::Open).then_some(root)
    }

    /// Host element of a shadow root
    pub fn shadow_host(&self, root: NodeId) -> Option<NodeId> {
        self.node(root)?.as_shadow_root().map(|r| r.host)
    }
}
