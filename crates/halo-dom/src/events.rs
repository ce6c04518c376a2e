//! DOM Events
//!
//! Event objects, listener registration and dispatch across the capture,
//! target and bubble phases. Composed events cross shadow boundaries and are
//! retargeted to the shadow host for listeners outside the subtree.

use std::fmt;
use std::rc::Rc;

use crate::{Document, NodeId};

/// Event type identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
    KeyUp,
    Input,
    Change,
    Focus,
    Blur,
    Submit,
    Reset,
    Invalid,
    Custom(String),
}

impl EventType {
    /// Parse from an event name
    pub fn parse(s: &str) -> Self {
        match s {
            "click" => Self::Click,
            "keydown" => Self::KeyDown,
            "keyup" => Self::KeyUp,
            "input" => Self::Input,
            "change" => Self::Change,
            "focus" => Self::Focus,
            "blur" => Self::Blur,
            "submit" => Self::Submit,
            "reset" => Self::Reset,
            "invalid" => Self::Invalid,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Event name as used in markup and listeners
    pub fn as_str(&self) -> &str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::Input => "input",
            Self::Change => "change",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Submit => "submit",
            Self::Reset => "reset",
            Self::Invalid => "invalid",
            Self::Custom(name) => name,
        }
    }

    /// Init flags a user agent would use for this event type
    pub fn default_init(&self) -> EventInit {
        match self {
            Self::Click | Self::KeyDown | Self::KeyUp => EventInit::new(true, true, true),
            Self::Input => EventInit::new(true, false, true),
            Self::Change => EventInit::new(true, false, false),
            Self::Focus | Self::Blur => EventInit::new(false, false, true),
            Self::Submit | Self::Reset => EventInit::new(true, true, false),
            Self::Invalid => EventInit::new(false, true, false),
            Self::Custom(_) => EventInit::default(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event construction flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventInit {
    pub bubbles: bool,
    pub cancelable: bool,
    pub composed: bool,
}

impl EventInit {
    pub fn new(bubbles: bool, cancelable: bool, composed: bool) -> Self {
        Self {
            bubbles,
            cancelable,
            composed,
        }
    }
}

/// Dispatch phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventPhase {
    #[default]
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub bubbles: bool,
    pub cancelable: bool,
    pub composed: bool,
    /// Target as seen by the listener currently running
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    pub phase: EventPhase,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl Event {
    /// Create an event with the user-agent defaults for its type
    pub fn new(event_type: EventType) -> Self {
        let init = event_type.default_init();
        Self::with_init(event_type, init)
    }

    /// Create an event with explicit flags
    pub fn with_init(event_type: EventType, init: EventInit) -> Self {
        Self {
            event_type,
            bubbles: init.bubbles,
            cancelable: init.cancelable,
            composed: init.composed,
            target: NodeId::NONE,
            current_target: None,
            phase: EventPhase::None,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    /// Flags this event was created with
    pub fn init(&self) -> EventInit {
        EventInit::new(self.bubbles, self.cancelable, self.composed)
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation after the current node
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop propagation and skip remaining listeners on the current node
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Event handler callback
pub type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;

/// Handle returned when registering a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Listener options
#[derive(Debug, Clone, Copy, Default)]
pub struct ListenerOptions {
    /// Capture phase
    pub capture: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self { capture: true }
    }
}

pub(crate) struct RegisteredListener {
    pub(crate) id: ListenerId,
    pub(crate) event_type: EventType,
    pub(crate) capture: bool,
    pub(crate) callback: Listener,
}

impl Document {
    /// Register a bubble/target-phase listener
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: EventType,
        callback: impl Fn(&mut Document, &mut Event) + 'static,
    ) -> ListenerId {
        self.add_event_listener_with(node, event_type, ListenerOptions::default(), callback)
    }

    /// Register a listener with options
    pub fn add_event_listener_with(
        &mut self,
        node: NodeId,
        event_type: EventType,
        options: ListenerOptions,
        callback: impl Fn(&mut Document, &mut Event) + 'static,
    ) -> ListenerId {
        self.next_listener_id += 1;
        let id = ListenerId(self.next_listener_id);
        self.listeners.entry(node).or_default().push(RegisteredListener {
            id,
            event_type,
            capture: options.capture,
            callback: Rc::new(callback),
        });
        id
    }

    /// Remove a listener; returns whether it was registered on `node`
    pub fn remove_event_listener(&mut self, node: NodeId, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(&node) else {
            return false;
        };
        let before = list.len();
        list.retain(|l| l.id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.listeners.remove(&node);
        }
        removed
    }

    /// Number of listeners registered on `node`
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.get(&node).map_or(0, Vec::len)
    }

    fn has_listener(&self, node: NodeId, id: ListenerId) -> bool {
        self.listeners
            .get(&node)
            .is_some_and(|list| list.iter().any(|l| l.id == id))
    }

    /// Dispatch `event` at `target`; returns `false` if the default was prevented
    pub fn dispatch_event(&mut self, target: NodeId, event: &mut Event) -> bool {
        let path = self.event_path(target, event.composed);
        tracing::trace!("Dispatching {} at {:?} ({} nodes)", event.event_type, target, path.len());

        'dispatch: {
            for &(node, retarget) in path.iter().skip(1).rev() {
                self.invoke_listeners(node, retarget, event, EventPhase::Capturing, Some(true));
                if event.propagation_stopped {
                    break 'dispatch;
                }
            }

            if let Some(&(node, retarget)) = path.first() {
                self.invoke_listeners(node, retarget, event, EventPhase::AtTarget, None);
                if event.propagation_stopped {
                    break 'dispatch;
                }
            }

            for &(node, retarget) in path.iter().skip(1) {
                // A shadow host reached by a retargeted event sees it at-target
                let at_host = node == retarget;
                if !event.bubbles && !at_host {
                    continue;
                }
                let phase = if at_host { EventPhase::AtTarget } else { EventPhase::Bubbling };
                self.invoke_listeners(node, retarget, event, phase, Some(false));
                if event.propagation_stopped {
                    break 'dispatch;
                }
            }
        }

        event.current_target = None;
        event.phase = EventPhase::None;
        event.target = target;
        !event.default_prevented
    }

    /// Propagation path as `(node, target seen by that node)` pairs, target first
    fn event_path(&self, target: NodeId, composed: bool) -> Vec<(NodeId, NodeId)> {
        let mut path = Vec::new();
        let mut current = target;
        let mut seen_target = target;
        loop {
            path.push((current, seen_target));
            let Some(node) = self.node(current) else {
                break;
            };
            if node.parent.is_valid() {
                current = node.parent;
            } else if let Some(root) = node.as_shadow_root() {
                if !composed {
                    break;
                }
                current = root.host;
                seen_target = root.host;
            } else {
                break;
            }
        }
        path
    }

    fn invoke_listeners(
        &mut self,
        node: NodeId,
        target: NodeId,
        event: &mut Event,
        phase: EventPhase,
        capture: Option<bool>,
    ) {
        let matching: Vec<(ListenerId, Listener)> = match self.listeners.get(&node) {
            Some(list) => list
                .iter()
                .filter(|l| l.event_type == event.event_type)
                .filter(|l| capture.is_none_or(|c| c == l.capture))
                .map(|l| (l.id, Rc::clone(&l.callback)))
                .collect(),
            None => return,
        };

        for (id, callback) in matching {
            // Listeners removed by an earlier callback do not run
            if !self.has_listener(node, id) {
                continue;
            }
            event.current_target = Some(node);
            event.target = target;
            event.phase = phase;
            callback(self, event);
            if event.immediate_propagation_stopped {
                break;
            }
        }
    }

    /// Dispatch a fresh event of `event_type` with default flags
    pub fn fire(&mut self, target: NodeId, event_type: EventType) -> bool {
        let mut event = Event::new(event_type);
        self.dispatch_event(target, &mut event)
    }
}
