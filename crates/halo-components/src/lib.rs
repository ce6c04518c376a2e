//! Halo Components
//!
//! Accessible design-system elements built on `halo_dom` custom elements.
//!
//! Every component is the same machinery parameterized by a
//! [`ComponentConfig`]: a template instantiated into a shadow root, an
//! attribute reflector projecting host attributes onto the inner target
//! element, event re-dispatch from that target to the host, and an ARIA
//! engine validating the result. [`FormController`] layers the form
//! validation state machine on top.
//!
//! Components are registered explicitly:
//!
//! ```no_run
//! use halo_dom::Document;
//!
//! let mut doc = Document::default();
//! halo_components::define_standard_components(&mut doc).unwrap();
//! let button = doc.create_element("halo-button").unwrap();
//! ```

mod config;
mod reflector;
mod component;
mod element;
mod descriptor;
mod fields;
mod registry;
pub mod form;

pub use config::{ComponentConfig, DisplayMode};
pub use reflector::{AttributeHandler, HandlerFn};
pub use component::{Component, Lifecycle, component_for};
pub use descriptor::{ComponentDescriptor, ControlKind};
pub use fields::standard_descriptors;
pub use registry::{define, define_form, define_standard_components};
pub use form::{FormConfig, FormController, FormData, FormPhase, FormState, form_for};

use halo_dom::DomError;
use halo_html::HtmlError;

/// Component construction errors.
///
/// These are defects in a component's configuration; they surface from
/// `Document::create_element` as `DomError::Construction`.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    #[error("{component} template has no element matching '{selector}'")]
    TargetNotFound { component: String, selector: String },

    #[error("template error: {0}")]
    Template(#[from] HtmlError),

    #[error(transparent)]
    Dom(#[from] DomError),
}
