//! Modal lightbox controller.
//!
//! The controller owns the navigation state ([`ModalState`]) and mediates
//! between the gallery items and the page's single overlay:
//!
//! ```text
//!            click entry i                 ArrowLeft / ArrowRight
//!   CLOSED ─────────────────▶ OPEN ◀──────────────────────────────┐
//!     ▲                        │  └───────────────────────────────┘
//!     │   close event          │ close button, backdrop click, Escape
//!     └────────────────────────┘
//! ```
//!
//! ## Listener lifecycle
//!
//! Wiring installs one click listener per entry, one on the close button, one
//! backdrop listener and one `close` lifecycle listener on the overlay. The
//! keyboard listener is different: it belongs to an open *session*. Opening
//! installs exactly one and keeps its [`ListenerId`]; the overlay's `close`
//! event removes exactly that one. Keys pressed while closed therefore never
//! reach navigation, and repeated open/close cycles never accumulate
//! listeners.
//!
//! ## Missing elements
//!
//! Every operation that needs an element checks for it and does nothing if it
//! is absent. Without an overlay, without both content slots, or without
//! entries, [`ModalController::install`] wires nothing and returns `None`.

use crate::config::ModalConfig;
use crate::events::{Event, EventKind, Key, ListenerId, ListenerRegistry, Target};
use crate::host::Page;
use crate::lightbox::Listener;
use std::borrow::Cow;
use tracing::{debug, info};

/// Query parameter that asks an embedded player to start immediately.
pub const AUTOPLAY_MARKER: &str = "autoplay=1";

/// Navigation direction between entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn delta(self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }

    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::ArrowRight => Some(Direction::Next),
            Key::ArrowLeft => Some(Direction::Previous),
            _ => None,
        }
    }

    /// Index reached from `current` in a gallery of `count` entries, wrapping
    /// at both ends. `count` must be non-zero.
    pub fn step(self, current: usize, count: usize) -> usize {
        debug_assert!(count > 0);
        let count = count as isize;
        let current = current as isize % count;
        ((current + self.delta() + count) % count) as usize
    }
}

/// Whether `src` already carries `autoplay=1` as a query parameter.
pub fn has_autoplay_marker(src: &str) -> bool {
    src.match_indices(AUTOPLAY_MARKER)
        .any(|(pos, _)| pos > 0 && matches!(src.as_bytes()[pos - 1], b'?' | b'&'))
}

/// Append the autoplay marker unless it is already present.
///
/// ```
/// # use gallery_lightbox::modal::with_autoplay;
/// assert_eq!(with_autoplay("https://v.example/embed/a"), "https://v.example/embed/a?autoplay=1");
/// assert_eq!(with_autoplay("https://v.example/embed/a?t=5"), "https://v.example/embed/a?t=5&autoplay=1");
/// assert_eq!(with_autoplay("https://v.example/embed/a?autoplay=1"), "https://v.example/embed/a?autoplay=1");
/// ```
pub fn with_autoplay(src: &str) -> Cow<'_, str> {
    if has_autoplay_marker(src) {
        return Cow::Borrowed(src);
    }
    let separator = if src.contains('?') { '&' } else { '?' };
    Cow::Owned(format!("{src}{separator}{AUTOPLAY_MARKER}"))
}

/// Navigation state. Only meaningful while the overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModalState {
    pub current_index: usize,
}

/// What a listener installed by the controller does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Click on the gallery entry at this index.
    OpenEntry(usize),
    /// Session-scoped arrow-key navigation.
    KeyNavigation,
    CloseButton,
    /// Click anywhere on the overlay; closes only outside the content box.
    Backdrop,
    /// The overlay's `close` lifecycle event.
    Closed,
}

#[derive(Debug)]
pub struct ModalController {
    state: ModalState,
    entry_count: usize,
    alt_fallback: String,
    session_listener: Option<ListenerId>,
}

impl ModalController {
    /// Wire the controller into the page.
    ///
    /// Returns `None`, having installed nothing, when the page has no
    /// entries, no overlay, or an overlay lacking either content slot.
    pub fn install(
        page: &Page,
        listeners: &mut ListenerRegistry<Listener>,
        config: &ModalConfig,
    ) -> Option<Self> {
        let entry_count = page.entry_count();
        if entry_count == 0 {
            debug!("no gallery entries; lightbox stays inert");
            return None;
        }
        let Some(overlay) = page.overlay() else {
            debug!("no overlay element; lightbox stays inert");
            return None;
        };
        if !overlay.has_slots() {
            debug!("overlay is missing a content slot; lightbox stays inert");
            return None;
        }

        if overlay.close_button {
            listeners.subscribe(
                Target::CloseButton,
                EventKind::Click,
                Listener::Modal(Handler::CloseButton),
            );
        } else {
            debug!("no close button; overlay closes by backdrop or Escape only");
        }
        listeners.subscribe(
            Target::Overlay,
            EventKind::Close,
            Listener::Modal(Handler::Closed),
        );
        listeners.subscribe(
            Target::Overlay,
            EventKind::Click,
            Listener::Modal(Handler::Backdrop),
        );
        for index in 0..entry_count {
            listeners.subscribe(
                Target::Entry(index),
                EventKind::Click,
                Listener::Modal(Handler::OpenEntry(index)),
            );
        }

        info!(entries = entry_count, "lightbox wired");
        Some(Self {
            state: ModalState::default(),
            entry_count,
            alt_fallback: config.alt_fallback.clone(),
            session_listener: None,
        })
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// The keyboard listener of the open session, if any.
    pub fn session_listener(&self) -> Option<ListenerId> {
        self.session_listener
    }

    /// Run the action of a listener the controller installed.
    pub fn handle(
        &mut self,
        handler: Handler,
        event: &Event,
        page: &mut Page,
        listeners: &mut ListenerRegistry<Listener>,
    ) {
        match (handler, event) {
            (Handler::OpenEntry(index), _) => self.activate(index, page, listeners),
            (Handler::KeyNavigation, Event::KeyDown { key }) => {
                if let Some(direction) = Direction::from_key(key) {
                    self.navigate(direction, page);
                }
            }
            (Handler::CloseButton, _) => {
                self.close(page);
            }
            (Handler::Backdrop, Event::Click { point, .. }) => {
                let outside = page
                    .overlay()
                    .is_some_and(|overlay| !overlay.bounds.contains(*point));
                if outside {
                    debug!(x = point.x, y = point.y, "backdrop click");
                    self.close(page);
                }
            }
            (Handler::Closed, _) => self.on_closed(page, listeners),
            (handler, event) => {
                debug!(?handler, %event, "listener fired for an unrelated event");
            }
        }
    }

    /// Open the overlay on entry `index`.
    ///
    /// If the overlay is already open the content is swapped and the existing
    /// session keeps its keyboard listener.
    pub fn activate(
        &mut self,
        index: usize,
        page: &mut Page,
        listeners: &mut ListenerRegistry<Listener>,
    ) {
        if !self.show(index, page) {
            return;
        }
        page.show_modal();
        if self.session_listener.is_none() {
            let id = listeners.subscribe(
                Target::Document,
                EventKind::KeyDown,
                Listener::Modal(Handler::KeyNavigation),
            );
            self.session_listener = Some(id);
        }
        info!(index, "lightbox opened");
    }

    /// Move one entry forward or back, wrapping at both ends.
    pub fn navigate(&mut self, direction: Direction, page: &mut Page) {
        let target = direction.step(self.state.current_index, self.entry_count);
        debug!(from = self.state.current_index, to = target, ?direction, "navigate");
        self.show(target, page);
    }

    /// Swap the overlay content to entry `index`.
    ///
    /// Returns `false`, leaving page and state untouched, if the entry or a
    /// content slot is missing. The index is recorded only after the content
    /// is in place.
    pub fn show(&mut self, index: usize, page: &mut Page) -> bool {
        let Some(entry) = page.entry(index).cloned() else {
            debug!(index, "no gallery entry at index");
            return false;
        };
        let Some(overlay) = page.overlay_mut() else {
            debug!("no overlay element");
            return false;
        };
        let (Some(image), Some(video)) = (overlay.image.as_mut(), overlay.video.as_mut()) else {
            debug!("overlay is missing a content slot");
            return false;
        };

        match entry.video_src() {
            Some(src) => {
                image.hidden = true;
                video.hidden = false;
                video.src = with_autoplay(src).into_owned();
            }
            None => {
                image.hidden = false;
                video.hidden = true;
                video.stop();
                image.src = entry.media_ref.clone();
                image.alt = entry.alt_or(&self.alt_fallback).to_string();
            }
        }
        self.state.current_index = index;
        true
    }

    /// Request the overlay to close. The session ends when its `close`
    /// event is handled.
    pub fn close(&mut self, page: &mut Page) -> bool {
        page.close_overlay()
    }

    fn on_closed(&mut self, page: &mut Page, listeners: &mut ListenerRegistry<Listener>) {
        if let Some(id) = self.session_listener.take() {
            listeners.unsubscribe(id);
        }
        if let Some(video) = page.overlay_mut().and_then(|o| o.video.as_mut()) {
            video.stop();
        }
        info!(index = self.state.current_index, "lightbox closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Point;
    use crate::test_helpers::*;

    fn wired(page: &Page) -> (ModalController, ListenerRegistry<Listener>) {
        let mut listeners = ListenerRegistry::new();
        let controller = ModalController::install(page, &mut listeners, &ModalConfig::default())
            .expect("controller should wire");
        (controller, listeners)
    }

    /// Deliver the page's queued lifecycle events straight to the controller.
    fn flush(
        controller: &mut ModalController,
        page: &mut Page,
        listeners: &mut ListenerRegistry<Listener>,
    ) {
        while let Some(event) = page.next_pending() {
            if event == Event::Close {
                controller.handle(Handler::Closed, &event, page, listeners);
            }
        }
    }

    // =========================================================================
    // Direction tests
    // =========================================================================

    #[test]
    fn step_forward_wraps_to_first() {
        assert_eq!(Direction::Next.step(0, 3), 1);
        assert_eq!(Direction::Next.step(2, 3), 0);
    }

    #[test]
    fn step_back_wraps_to_last() {
        assert_eq!(Direction::Previous.step(2, 3), 1);
        assert_eq!(Direction::Previous.step(0, 3), 2);
    }

    #[test]
    fn single_entry_steps_to_itself() {
        assert_eq!(Direction::Next.step(0, 1), 0);
        assert_eq!(Direction::Previous.step(0, 1), 0);
    }

    #[test]
    fn direction_from_arrow_keys_only() {
        assert_eq!(Direction::from_key(&Key::ArrowRight), Some(Direction::Next));
        assert_eq!(Direction::from_key(&Key::ArrowLeft), Some(Direction::Previous));
        assert_eq!(Direction::from_key(&Key::Escape), None);
        assert_eq!(Direction::from_key(&Key::Other("ArrowUp".into())), None);
    }

    // =========================================================================
    // Autoplay marker tests
    // =========================================================================

    #[test]
    fn autoplay_appended_with_question_mark() {
        assert_eq!(
            with_autoplay("https://www.youtube.com/embed/abc"),
            "https://www.youtube.com/embed/abc?autoplay=1"
        );
    }

    #[test]
    fn autoplay_appended_with_ampersand() {
        assert_eq!(
            with_autoplay("https://player.vimeo.com/video/1?muted=1"),
            "https://player.vimeo.com/video/1?muted=1&autoplay=1"
        );
    }

    #[test]
    fn autoplay_not_duplicated() {
        let src = "https://www.youtube.com/embed/abc?rel=0&autoplay=1";
        assert!(matches!(with_autoplay(src), Cow::Borrowed(_)));
        assert_eq!(with_autoplay(&with_autoplay("https://x/embed")), "https://x/embed?autoplay=1");
    }

    #[test]
    fn autoplay_marker_must_be_a_parameter() {
        assert!(!has_autoplay_marker("https://x/embed/noautoplay=1"));
        assert!(!has_autoplay_marker("autoplay=1"));
        assert!(has_autoplay_marker("https://x/embed?autoplay=1"));
        assert!(has_autoplay_marker("https://x/embed?a=b&autoplay=1&c=d"));
    }

    #[test]
    fn autoplay_zero_is_not_the_marker() {
        assert_eq!(
            with_autoplay("https://x/embed?autoplay=0"),
            "https://x/embed?autoplay=0&autoplay=1"
        );
    }

    // =========================================================================
    // install tests
    // =========================================================================

    #[test]
    fn install_wires_one_click_listener_per_entry() {
        let page = three_entry_page();
        let (controller, listeners) = wired(&page);
        assert_eq!(controller.entry_count(), 3);
        for i in 0..3 {
            assert_eq!(listeners.matching(Target::Entry(i), EventKind::Click).len(), 1);
        }
        assert_eq!(listeners.count(EventKind::KeyDown), 0);
        assert_eq!(listeners.count(EventKind::Close), 1);
        assert!(controller.session_listener().is_none());
    }

    #[test]
    fn install_is_inert_without_entries() {
        let page = Page::new(vec![], Some(standard_overlay()));
        let mut listeners = ListenerRegistry::new();
        assert!(ModalController::install(&page, &mut listeners, &ModalConfig::default()).is_none());
        assert!(listeners.is_empty());
    }

    #[test]
    fn install_is_inert_without_overlay() {
        let page = Page::new(vec![image_entry(1)], None);
        let mut listeners = ListenerRegistry::new();
        assert!(ModalController::install(&page, &mut listeners, &ModalConfig::default()).is_none());
        assert!(listeners.is_empty());
    }

    #[test]
    fn install_is_inert_without_a_slot() {
        let mut overlay = standard_overlay();
        overlay.image = None;
        let page = Page::new(vec![image_entry(1)], Some(overlay));
        let mut listeners = ListenerRegistry::new();
        assert!(ModalController::install(&page, &mut listeners, &ModalConfig::default()).is_none());
        assert!(listeners.is_empty());
    }

    #[test]
    fn install_skips_missing_close_button() {
        let mut overlay = standard_overlay();
        overlay.close_button = false;
        let page = Page::new(vec![image_entry(1)], Some(overlay));
        let (_, listeners) = wired(&page);
        assert!(listeners.matching(Target::CloseButton, EventKind::Click).is_empty());
    }

    // =========================================================================
    // Content swap tests
    // =========================================================================

    #[test]
    fn show_image_entry() {
        let mut page = three_entry_page();
        let (mut controller, _) = wired(&page);

        assert!(controller.show(0, &mut page));
        assert_eq!(controller.current_index(), 0);
        assert_eq!(image_src(&page), "public/gallery/1.png");
        assert_eq!(image_alt(&page), "Harbour at dusk");
        assert!(!image_hidden(&page));
        assert!(video_hidden(&page));
    }

    #[test]
    fn show_uses_alt_fallback() {
        let mut page = three_entry_page();
        let (mut controller, _) = wired(&page);
        controller.show(1, &mut page);
        assert_eq!(image_alt(&page), "Gallery item");
    }

    #[test]
    fn show_uses_configured_alt_fallback() {
        let mut page = three_entry_page();
        let mut listeners = ListenerRegistry::new();
        let config = ModalConfig {
            alt_fallback: "Photograph".to_string(),
        };
        let mut controller = ModalController::install(&page, &mut listeners, &config).unwrap();
        controller.show(1, &mut page);
        assert_eq!(image_alt(&page), "Photograph");
    }

    #[test]
    fn show_video_entry() {
        let mut page = three_entry_page();
        let (mut controller, _) = wired(&page);

        assert!(controller.show(2, &mut page));
        assert!(image_hidden(&page));
        assert!(!video_hidden(&page));
        assert_eq!(video_src(&page), "https://www.youtube.com/embed/abc123?autoplay=1");
    }

    #[test]
    fn image_after_video_stops_playback() {
        let mut page = three_entry_page();
        let (mut controller, _) = wired(&page);
        controller.show(2, &mut page);
        controller.show(0, &mut page);
        assert_eq!(video_src(&page), "");
        assert!(video_hidden(&page));
    }

    #[test]
    fn revisiting_video_keeps_single_marker() {
        let mut page = three_entry_page();
        let (mut controller, _) = wired(&page);
        controller.show(2, &mut page);
        controller.show(1, &mut page);
        controller.show(2, &mut page);
        assert_eq!(video_src(&page).matches(AUTOPLAY_MARKER).count(), 1);
    }

    #[test]
    fn video_with_existing_marker_is_unchanged() {
        let entries = vec![crate::types::GalleryEntry::video(
            "poster.jpg",
            "https://www.youtube.com/embed/xyz?autoplay=1",
        )];
        let mut page = Page::new(entries, Some(standard_overlay()));
        let (mut controller, _) = wired(&page);
        controller.show(0, &mut page);
        assert_eq!(video_src(&page), "https://www.youtube.com/embed/xyz?autoplay=1");
    }

    #[test]
    fn show_missing_entry_leaves_state_untouched() {
        let mut page = three_entry_page();
        let (mut controller, _) = wired(&page);
        controller.show(1, &mut page);

        assert!(!controller.show(7, &mut page));
        assert_eq!(controller.current_index(), 1);
        assert_eq!(image_src(&page), "public/gallery/2.jpg");
    }

    // =========================================================================
    // Session lifecycle tests
    // =========================================================================

    #[test]
    fn activate_opens_and_installs_one_key_listener() {
        let mut page = three_entry_page();
        let (mut controller, mut listeners) = wired(&page);

        controller.activate(1, &mut page, &mut listeners);
        assert!(page.overlay_open());
        assert_eq!(controller.current_index(), 1);
        assert_eq!(listeners.count(EventKind::KeyDown), 1);
        assert!(listeners.contains(controller.session_listener().unwrap()));
    }

    #[test]
    fn activate_while_open_keeps_session_listener() {
        let mut page = three_entry_page();
        let (mut controller, mut listeners) = wired(&page);

        controller.activate(0, &mut page, &mut listeners);
        let first = controller.session_listener();
        controller.activate(2, &mut page, &mut listeners);

        assert_eq!(controller.session_listener(), first);
        assert_eq!(listeners.count(EventKind::KeyDown), 1);
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn close_removes_session_listener_and_stops_video() {
        let mut page = three_entry_page();
        let (mut controller, mut listeners) = wired(&page);

        controller.activate(2, &mut page, &mut listeners);
        let session = controller.session_listener().unwrap();
        assert!(controller.close(&mut page));
        flush(&mut controller, &mut page, &mut listeners);

        assert!(!page.overlay_open());
        assert!(!listeners.contains(session));
        assert_eq!(listeners.count(EventKind::KeyDown), 0);
        assert_eq!(video_src(&page), "");
    }

    #[test]
    fn close_button_and_backdrop_handlers_end_the_session() {
        let mut page = three_entry_page();
        let (mut controller, mut listeners) = wired(&page);

        for (handler, event) in [
            (Handler::CloseButton, Event::click(Target::CloseButton, 880.0, 60.0)),
            (Handler::Backdrop, Event::click(Target::Overlay, 20.0, 20.0)),
        ] {
            controller.activate(2, &mut page, &mut listeners);
            controller.handle(handler, &event, &mut page, &mut listeners);
            assert!(page.has_pending());
            flush(&mut controller, &mut page, &mut listeners);

            assert!(!page.overlay_open());
            assert_eq!(controller.session_listener(), None);
            assert_eq!(listeners.count(EventKind::KeyDown), 0);
            assert_eq!(video_src(&page), "");
        }
    }

    #[test]
    fn repeated_cycles_do_not_accumulate_listeners() {
        let mut page = three_entry_page();
        let (mut controller, mut listeners) = wired(&page);
        let wired_count = listeners.len();

        for i in 0..10 {
            controller.activate(i % 3, &mut page, &mut listeners);
            assert_eq!(listeners.count(EventKind::KeyDown), 1);
            controller.close(&mut page);
            flush(&mut controller, &mut page, &mut listeners);
            assert_eq!(listeners.count(EventKind::KeyDown), 0);
        }
        assert_eq!(listeners.len(), wired_count);
    }

    #[test]
    fn navigate_wraps_in_both_directions() {
        let mut page = three_entry_page();
        let (mut controller, mut listeners) = wired(&page);

        controller.activate(2, &mut page, &mut listeners);
        controller.navigate(Direction::Next, &mut page);
        assert_eq!(controller.current_index(), 0);
        controller.navigate(Direction::Previous, &mut page);
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn key_handler_ignores_other_keys() {
        let mut page = three_entry_page();
        let (mut controller, mut listeners) = wired(&page);
        controller.activate(0, &mut page, &mut listeners);

        let event = Event::key(Key::Other("Enter".into()));
        controller.handle(Handler::KeyNavigation, &event, &mut page, &mut listeners);
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn backdrop_click_inside_content_keeps_open() {
        let mut page = three_entry_page();
        let (mut controller, mut listeners) = wired(&page);
        controller.activate(0, &mut page, &mut listeners);

        let inside = Event::Click {
            target: Target::Overlay,
            point: Point::new(200.0, 200.0),
        };
        controller.handle(Handler::Backdrop, &inside, &mut page, &mut listeners);
        assert!(page.overlay_open());
        assert!(!page.has_pending());
    }

    #[test]
    fn backdrop_click_outside_content_closes() {
        let mut page = three_entry_page();
        let (mut controller, mut listeners) = wired(&page);
        controller.activate(0, &mut page, &mut listeners);

        let outside = Event::click(Target::Overlay, 5.0, 5.0);
        controller.handle(Handler::Backdrop, &outside, &mut page, &mut listeners);
        assert!(!page.overlay_open());
        assert_eq!(page.next_pending(), Some(Event::Close));
    }
}
