//! Host events and the listener registry.
//!
//! Listeners are explicit subscribe/unsubscribe pairs. [`ListenerRegistry::subscribe`]
//! returns a [`ListenerId`] handle; whoever installed a listener keeps that
//! handle and passes it back to [`ListenerRegistry::unsubscribe`]. Handlers are
//! plain values of the registry's type parameter, so a listener never captures
//! state that could go stale between sessions.

use std::fmt;
use std::str::FromStr;

/// Pointer position in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Edges count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Keyboard key, by its DOM `key` name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other(String),
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::Escape => f.write_str("Escape"),
            Key::Other(name) => f.write_str(name),
        }
    }
}

/// Element an event is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Document,
    /// Gallery anchor at this document-order index.
    Entry(usize),
    /// The dialog element, including its backdrop.
    Overlay,
    CloseButton,
}

impl Target {
    /// The element containing this one, for bubbling.
    pub fn parent(self) -> Option<Target> {
        match self {
            Target::Document => None,
            Target::Entry(_) | Target::Overlay => Some(Target::Document),
            Target::CloseButton => Some(Target::Overlay),
        }
    }

    /// This target followed by its ancestors, innermost first.
    pub fn bubble_path(self) -> Vec<Target> {
        std::iter::successors(Some(self), |t| t.parent()).collect()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Document => f.write_str("document"),
            Target::Entry(i) => write!(f, "entry {i}"),
            Target::Overlay => f.write_str("overlay"),
            Target::CloseButton => f.write_str("close"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ready,
    Click,
    KeyDown,
    Close,
}

/// An input or lifecycle event delivered by the host event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The page finished loading.
    Ready,
    Click { target: Target, point: Point },
    KeyDown { key: Key },
    /// The overlay was closed, by any path.
    Close,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Ready => EventKind::Ready,
            Event::Click { .. } => EventKind::Click,
            Event::KeyDown { .. } => EventKind::KeyDown,
            Event::Close => EventKind::Close,
        }
    }

    /// Element the event is first delivered to.
    pub fn target(&self) -> Target {
        match self {
            Event::Ready | Event::KeyDown { .. } => Target::Document,
            Event::Click { target, .. } => *target,
            Event::Close => Target::Overlay,
        }
    }

    /// Whether the event propagates from its target up to the document.
    pub fn bubbles(&self) -> bool {
        matches!(self, Event::Click { .. } | Event::KeyDown { .. })
    }

    /// Targets that receive the event, in delivery order.
    pub fn propagation_path(&self) -> Vec<Target> {
        if self.bubbles() {
            self.target().bubble_path()
        } else {
            vec![self.target()]
        }
    }

    pub fn click(target: Target, x: f64, y: f64) -> Self {
        Event::Click {
            target,
            point: Point::new(x, y),
        }
    }

    pub fn key(key: Key) -> Self {
        Event::KeyDown { key }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Ready => f.write_str("ready"),
            Event::Click { target, point } => {
                write!(f, "click {target} at ({}, {})", point.x, point.y)
            }
            Event::KeyDown { key } => write!(f, "key {key}"),
            Event::Close => f.write_str("close"),
        }
    }
}

/// Handle for one installed listener. Never reused within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone)]
struct Listener<H> {
    id: ListenerId,
    target: Target,
    kind: EventKind,
    handler: H,
}

/// Listeners grouped by target and event kind, kept in registration order.
#[derive(Debug, Clone)]
pub struct ListenerRegistry<H> {
    next_id: u64,
    listeners: Vec<Listener<H>>,
}

impl<H> Default for ListenerRegistry<H> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<H: Clone> ListenerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, target: Target, kind: EventKind, handler: H) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            target,
            kind,
            handler,
        });
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    /// Snapshot of the listeners for `target`/`kind`, in registration order.
    pub fn matching(&self, target: Target, kind: EventKind) -> Vec<(ListenerId, H)> {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .map(|l| (l.id, l.handler.clone()))
            .collect()
    }

    /// Number of listeners of `kind`, on any target.
    pub fn count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
