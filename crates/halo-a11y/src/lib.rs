//! Halo Accessibility
//!
//! ARIA policy enforcement for Halo components.
//!
//! Features:
//! - Declarative per-component ARIA policies
//! - Advisory validation with logged diagnostics
//! - Accessible name computation
//! - Live region announcements

pub mod aria;
pub mod policy;
pub mod engine;
pub mod name;
pub mod live_region;

pub use aria::{AriaRole, LiveRegionMode};
pub use policy::AriaPolicy;
pub use engine::{AriaDiagnostic, AriaEngine, ChangeMode, ChangeOutcome, ValidationContext, ValidationHook};
pub use name::{accessible_name, component_role, require_accessible_name};
pub use live_region::{AnnouncementKind, LiveRegion, LiveRegionConfig};
