//! The host event loop tying the page, the classifier and the controller together.
//!
//! [`Lightbox`] plays the part of the browser: events are dispatched strictly
//! in arrival order, events raised while handling one (the overlay's `close`)
//! queue behind it, and listeners are delivered innermost target first.
//!
//! The only listener present before the page is ready is the `Ready` hook. It
//! removes itself, runs the classifier pass, and wires the modal controller,
//! so both happen exactly once however many `Ready` events arrive.

use crate::classify::apply_layout_classes;
use crate::config::LightboxConfig;
use crate::events::{Event, EventKind, Key, ListenerId, ListenerRegistry, Target};
use crate::host::{Page, render_page};
use crate::modal::{Handler, ModalController};
use maud::Markup;
use tracing::{debug, info, trace};

/// Listener payloads stored in the page's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    /// One-shot page-ready hook.
    Ready,
    Modal(Handler),
}

/// What the overlay currently displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Nothing,
    Image { src: String, alt: String },
    Video { src: String },
}

/// Observable state after an event, for output and assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub wired: bool,
    pub open: bool,
    pub current_index: Option<usize>,
    pub shown: Shown,
    pub key_listeners: usize,
}

#[derive(Debug)]
pub struct Lightbox {
    page: Page,
    listeners: ListenerRegistry<Listener>,
    controller: Option<ModalController>,
    config: LightboxConfig,
}

impl Lightbox {
    /// Attach to a loaded page. Nothing happens until [`Event::Ready`].
    pub fn new(page: Page, config: LightboxConfig) -> Self {
        let mut listeners = ListenerRegistry::new();
        listeners.subscribe(Target::Document, EventKind::Ready, Listener::Ready);
        Self {
            page,
            listeners,
            controller: None,
            config,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn listeners(&self) -> &ListenerRegistry<Listener> {
        &self.listeners
    }

    pub fn controller(&self) -> Option<&ModalController> {
        self.controller.as_ref()
    }

    pub fn config(&self) -> &LightboxConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.page.overlay_open()
    }

    /// Signal that the page finished loading.
    pub fn ready(&mut self) {
        self.dispatch(Event::Ready);
    }

    /// Deliver `event`, then every event it caused, in order.
    pub fn dispatch(&mut self, event: Event) {
        self.page.queue(event);
        while let Some(next) = self.page.next_pending() {
            self.deliver(&next);
        }
    }

    fn deliver(&mut self, event: &Event) {
        trace!(%event, "dispatch");
        let kind = event.kind();
        for target in event.propagation_path() {
            for (id, listener) in self.listeners.matching(target, kind) {
                // Removed by an earlier listener for this same event.
                if !self.listeners.contains(id) {
                    continue;
                }
                match listener {
                    Listener::Ready => self.on_ready(id),
                    Listener::Modal(handler) => {
                        if let Some(controller) = self.controller.as_mut() {
                            controller.handle(handler, event, &mut self.page, &mut self.listeners);
                        }
                    }
                }
            }
        }
        self.default_action(event);
    }

    /// Host behaviour that runs after listeners.
    fn default_action(&mut self, event: &Event) {
        match event {
            Event::KeyDown { key: Key::Escape } => {
                if self.page.close_overlay() {
                    debug!("overlay dismissed with Escape");
                }
            }
            Event::Click {
                target: Target::Entry(index),
                ..
            } if *index >= self.page.entry_count() => {
                debug!(index, "click target is not a gallery entry");
            }
            _ => {}
        }
    }

    fn on_ready(&mut self, id: ListenerId) {
        self.listeners.unsubscribe(id);
        let tagged = apply_layout_classes(self.page.items_mut());
        info!(
            entries = self.page.entry_count(),
            tagged, "gallery classified"
        );
        self.controller =
            ModalController::install(&self.page, &mut self.listeners, &self.config.modal);
    }

    pub fn snapshot(&self) -> Snapshot {
        let overlay = self.page.overlay();
        let shown = match overlay {
            Some(o) => match (&o.image, &o.video) {
                (_, Some(video)) if !video.hidden && video.is_playing() => Shown::Video {
                    src: video.src.clone(),
                },
                (Some(image), _) if !image.hidden && !image.src.is_empty() => Shown::Image {
                    src: image.src.clone(),
                    alt: image.alt.clone(),
                },
                _ => Shown::Nothing,
            },
            None => Shown::Nothing,
        };
        let open = self.is_open();
        Snapshot {
            wired: self.controller.is_some(),
            open,
            current_index: self
                .controller
                .as_ref()
                .filter(|_| open)
                .map(ModalController::current_index),
            shown,
            key_listeners: self.listeners.count(EventKind::KeyDown),
        }
    }

    /// HTML snapshot of the page in its current state.
    pub fn render(&self) -> Markup {
        render_page(&self.page, &self.config.classes)
    }
}
