//! Halo HTML Parser
//!
//! Turns component templates and test pages into nodes of a `halo_dom`
//! document. Parsing is done by html5ever; the resulting tree is converted
//! node by node so custom elements upgrade as they are created.

mod parser;

pub use parser::HtmlParser;

use halo_dom::{Document, DomError, NodeId};

/// Parse `markup` into detached top-level nodes of `doc`
pub fn parse_fragment(doc: &mut Document, markup: &str) -> Result<Vec<NodeId>, HtmlError> {
    HtmlParser::new().parse_fragment(doc, markup)
}

/// Parse `markup` and append the result to `parent`
pub fn parse_into(doc: &mut Document, parent: NodeId, markup: &str) -> Result<Vec<NodeId>, HtmlError> {
    HtmlParser::new().parse_into(doc, parent, markup)
}

/// Template conversion error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("failed to read markup: {0}")]
    Read(#[from] std::io::Error),

    #[error("markup has no <html> element")]
    MissingRoot,

    #[error(transparent)]
    Dom(#[from] DomError),
}
