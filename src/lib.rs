//! # Gallery Lightbox
//!
//! Layout classification for gallery thumbnails and a modal lightbox that
//! shows the full-size image or embedded video for a selected entry, with
//! arrow-key and pointer navigation.
//!
//! # Architecture: Host Page, Ready Pass, Controller
//!
//! ```text
//! gallery.json ──▶ Page ──ready──▶ classify   (once: layout classes)
//!                   │       └────▶ ModalController::install   (once: listeners)
//!                   ▼
//!         click / keydown / close ──▶ Lightbox::dispatch ──▶ listeners
//! ```
//!
//! The [`host::Page`] stands in for the browser document: gallery entries in
//! document order plus one overlay with an image slot, a video slot and a
//! close button. [`lightbox::Lightbox`] is its event loop. On the ready signal
//! the [`classify`] pass tags each entry, then the [`modal`] controller wires
//! its listeners. From then on every input is a discrete event handled in
//! arrival order on a single thread; no locking is involved.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`classify`] | Aspect-ratio labels (`tall`, `wide`) from declared dimensions |
//! | [`modal`] | Lightbox state machine: open, content swap, wraparound navigation, close |
//! | [`lightbox`] | Host event loop: ready pass, dispatch, bubbling, default actions |
//! | [`events`] | Events, targets, and the subscribe/unsubscribe listener registry |
//! | [`host`] | In-memory page, overlay slots, and HTML snapshot rendering via Maud |
//! | [`manifest`] | JSON gallery manifest loading and validation |
//! | [`script`] | Replay scripts: text lists of host events |
//! | [`config`] | `lightbox.toml` loading, merging onto stock defaults, validation |
//! | [`types`] | Shared entry and layout-class types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Listeners Are Data, Not Closures
//!
//! A listener is a target, an event kind and a [`modal::Handler`] value. The
//! registry hands back a [`events::ListenerId`] for each subscription and the
//! controller keeps the one it installed for the current session. Closing
//! removes exactly that listener, so arrow keys pressed after close reach
//! nothing and repeated open/close cycles leave the registry unchanged.
//!
//! ## Missing Elements Degrade Locally
//!
//! The only failure the core knows is "expected element missing". Every
//! operation checks for the element it needs and quietly does nothing when it
//! is absent. A page without an overlay still gets its layout classes; it just
//! never opens a lightbox.
//!
//! ## State Follows Content
//!
//! The content-swap routine writes the current index last, after the slots are
//! updated, so the index never disagrees with what the overlay displays.

pub mod classify;
pub mod config;
pub mod events;
pub mod host;
pub mod lightbox;
pub mod manifest;
pub mod modal;
pub mod output;
pub mod script;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
