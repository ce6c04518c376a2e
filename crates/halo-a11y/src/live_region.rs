//! Live Region Support
//!
//! A visually hidden status element whose text is announced by screen
//! readers. Transient announcements clear themselves after a delay.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use halo_dom::{Document, DomError, NodeId};

use crate::aria::LiveRegionMode;

/// Live region configuration
#[derive(Debug, Clone)]
pub struct LiveRegionConfig {
    /// Politeness level: off, polite, assertive
    pub politeness: LiveRegionMode,
    /// Whether to announce entire region or just changes
    pub atomic: bool,
    /// Delay before a transient announcement is cleared
    pub clear_after: Duration,
}

impl Default for LiveRegionConfig {
    fn default() -> Self {
        Self {
            politeness: LiveRegionMode::Polite,
            atomic: true,
            clear_after: Duration::from_secs(5),
        }
    }
}

impl LiveRegionConfig {
    /// Create polite live region
    pub fn polite() -> Self {
        Self::default()
    }

    /// Create assertive live region
    pub fn assertive() -> Self {
        Self {
            politeness: LiveRegionMode::Assertive,
            ..Default::default()
        }
    }

    /// Set atomic mode
    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    pub fn with_clear_after(mut self, delay: Duration) -> Self {
        self.clear_after = delay;
        self
    }
}

/// Advisory category written to `data-type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementKind {
    Info,
    Success,
    Error,
}

impl AnnouncementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "info" => Some(Self::Info),
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Errors persist until the next state change; everything else clears itself
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Error)
    }
}

/// Announcement element owned by one component
#[derive(Debug, Clone)]
pub struct LiveRegion {
    node: NodeId,
    config: LiveRegionConfig,
    /// Bumped on every announce/clear so stale timers can tell they are stale
    generation: Rc<Cell<u64>>,
}

impl LiveRegion {
    /// Create the region element and append it to `parent`
    pub fn attach(doc: &mut Document, parent: NodeId, config: LiveRegionConfig) -> Result<Self, DomError> {
        let node = doc.create_element("div")?;
        doc.set_attribute(node, "role", "status")?;
        doc.set_attribute(node, "aria-live", config.politeness.as_str())?;
        doc.set_attribute(node, "aria-atomic", if config.atomic { "true" } else { "false" })?;
        doc.set_attribute(node, "class", "visually-hidden")?;
        doc.set_attribute(node, "hidden", "")?;
        doc.append_child(parent, node)?;
        Ok(Self {
            node,
            config,
            generation: Rc::new(Cell::new(0)),
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn config(&self) -> &LiveRegionConfig {
        &self.config
    }

    /// Show `text`; transient kinds schedule their own clear
    pub fn announce(&self, doc: &mut Document, text: &str, kind: AnnouncementKind) -> Result<(), DomError> {
        let generation = self.bump();
        doc.set_text_content(self.node, text)?;
        doc.set_attribute(self.node, "data-type", kind.as_str())?;
        doc.remove_attribute(self.node, "hidden")?;
        tracing::debug!("Live region {:?} announced ({}): {}", self.node, kind.as_str(), text);

        if kind.is_transient() {
            let node = self.node;
            let current = Rc::clone(&self.generation);
            doc.set_timeout(self.config.clear_after, move |doc| {
                if current.get() != generation {
                    return;
                }
                if let Err(err) = Self::clear_node(doc, node) {
                    tracing::warn!("Failed to clear live region {:?}: {}", node, err);
                }
            });
        }
        Ok(())
    }

    /// Empty and hide the region
    pub fn clear(&self, doc: &mut Document) -> Result<(), DomError> {
        self.bump();
        Self::clear_node(doc, self.node)
    }

    /// Current announcement text
    pub fn text(&self, doc: &Document) -> String {
        doc.text_content(self.node)
    }

    pub fn is_visible(&self, doc: &Document) -> bool {
        !doc.has_attribute(self.node, "hidden")
    }

    /// Count of announce/clear updates so far
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Kind of the current announcement, if any
    pub fn kind(&self, doc: &Document) -> Option<AnnouncementKind> {
        doc.get_attribute(self.node, "data-type").and_then(AnnouncementKind::parse)
    }

    fn bump(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    fn clear_node(doc: &mut Document, node: NodeId) -> Result<(), DomError> {
        doc.set_text_content(node, "")?;
        doc.set_attribute(node, "hidden", "")?;
        doc.remove_attribute(node, "data-type")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(doc: &mut Document) -> LiveRegion {
        let parent = doc.body();
        LiveRegion::attach(doc, parent, LiveRegionConfig::default()).unwrap()
    }

    #[test]
    fn test_region_attributes() {
        let mut doc = Document::default();
        let region = region(&mut doc);
        let node = region.node();
        assert_eq!(doc.get_attribute(node, "role"), Some("status"));
        assert_eq!(doc.get_attribute(node, "aria-live"), Some("polite"));
        assert_eq!(doc.get_attribute(node, "aria-atomic"), Some("true"));
        assert!(!region.is_visible(&doc));
    }

    #[test]
    fn test_transient_announcement_clears() {
        let mut doc = Document::default();
        let region = region(&mut doc);
        region.announce(&mut doc, "Saved", AnnouncementKind::Success).unwrap();
        assert_eq!(region.text(&doc), "Saved");
        assert_eq!(region.kind(&doc), Some(AnnouncementKind::Success));
        assert!(region.is_visible(&doc));

        doc.advance_time(Duration::from_millis(4999));
        assert_eq!(region.text(&doc), "Saved");
        doc.advance_time(Duration::from_millis(1));
        assert_eq!(region.text(&doc), "");
        assert!(!region.is_visible(&doc));
        assert_eq!(region.kind(&doc), None);
    }

    #[test]
    fn test_error_announcement_persists() {
        let mut doc = Document::default();
        let region = region(&mut doc);
        region.announce(&mut doc, "Please fix", AnnouncementKind::Error).unwrap();
        doc.advance_time(Duration::from_secs(60));
        assert_eq!(region.text(&doc), "Please fix");
        assert_eq!(doc.pending_timers(), 0);
    }

    #[test]
    fn test_stale_timer_keeps_newer_announcement() {
        let mut doc = Document::default();
        let region = region(&mut doc);
        region.announce(&mut doc, "first", AnnouncementKind::Info).unwrap();
        doc.advance_time(Duration::from_secs(3));
        region.announce(&mut doc, "second", AnnouncementKind::Error).unwrap();
        doc.advance_time(Duration::from_secs(3));
        assert_eq!(region.text(&doc), "second");
    }

    #[test]
    fn test_timer_after_explicit_clear_is_noop() {
        let mut doc = Document::default();
        let region = region(&mut doc);
        region.announce(&mut doc, "hello", AnnouncementKind::Info).unwrap();
        region.clear(&mut doc).unwrap();
        region.announce(&mut doc, "kept", AnnouncementKind::Error).unwrap();
        doc.advance_time(Duration::from_secs(10));
        assert_eq!(region.text(&doc), "kept");
    }
}
