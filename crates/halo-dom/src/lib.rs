//! Halo DOM - Document Object Model
//!
//! Headless, arena-backed DOM that hosts Halo components: element tree,
//! encapsulated shadow roots, event dispatch, custom element reactions,
//! native form-control semantics and a deterministic task scheduler.

mod node;
mod document;
mod shadow;
mod selector;
mod events;
mod custom_elements;
mod scheduler;
mod interaction;
pub mod forms;

pub use node::{Attribute, ControlState, ElementData, Node, NodeData};
pub use document::Document;
pub use shadow::{ShadowRoot, ShadowRootMode};
pub use selector::{Selector, SimpleSelector};
pub use events::{Event, EventInit, EventPhase, EventType, Listener, ListenerId, ListenerOptions};
pub use custom_elements::{
    Constructor, CustomElement, CustomElementDefinition, CustomElementRegistry, LifecycleCallback,
};
pub use scheduler::{Task, TimerId};
pub use forms::{InputType, ValidityState};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this ID refers to a node slot
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM errors
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),

    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("element {0:?} already hosts a shadow root")]
    ShadowRootExists(NodeId),

    #[error("invalid custom element name '{0}'")]
    InvalidName(String),

    #[error("custom element '{0}' is already defined")]
    AlreadyDefined(String),

    #[error("failed to construct <{name}>")]
    Construction {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
