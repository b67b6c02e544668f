//! In-memory host document.
//!
//! Models the parts of the page the lightbox consumes: the gallery anchors in
//! document order and the single `<dialog>` overlay with its image slot, video
//! slot and close button. Elements the host did not provide are `None`, which
//! is how "expected element missing" shows up to the controller.
//!
//! The page also owns the host's pending-event queue. Closing an open overlay
//! queues a [`Event::Close`] behind whatever event is currently being handled,
//! the way a dialog's `close` event fires after the handler that closed it.
//!
//! [`render_page`] turns the current state into HTML with Maud, for inspection
//! and snapshot tests.

use crate::config::ClassConfig;
use crate::events::{Event, Rect};
use crate::types::{GalleryEntry, LayoutClass};
use maud::{Markup, html};
use std::collections::{BTreeSet, VecDeque};

/// A gallery anchor and the layout classes applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    pub entry: GalleryEntry,
    pub classes: BTreeSet<LayoutClass>,
}

impl GalleryItem {
    pub fn new(entry: GalleryEntry) -> Self {
        Self {
            entry,
            classes: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageSlot {
    pub src: String,
    pub alt: String,
    pub hidden: bool,
}

/// Embed slot; an empty `src` means nothing is loaded or playing.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSlot {
    pub src: String,
    pub hidden: bool,
}

impl Default for VideoSlot {
    fn default() -> Self {
        Self {
            src: String::new(),
            hidden: true,
        }
    }
}

impl VideoSlot {
    pub fn is_playing(&self) -> bool {
        !self.src.is_empty()
    }

    /// Halt playback by unloading the source.
    pub fn stop(&mut self) {
        self.src.clear();
    }
}

/// The singleton modal surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    open: bool,
    /// Content bounding box; pointer events outside it are backdrop clicks.
    pub bounds: Rect,
    pub image: Option<ImageSlot>,
    pub video: Option<VideoSlot>,
    pub close_button: bool,
}

impl Overlay {
    /// A closed overlay with both slots and a close button.
    pub fn new(bounds: Rect) -> Self {
        Self {
            open: false,
            bounds,
            image: Some(ImageSlot::default()),
            video: Some(VideoSlot::default()),
            close_button: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether both content slots exist.
    pub fn has_slots(&self) -> bool {
        self.image.is_some() && self.video.is_some()
    }
}

/// The host document: gallery items, the overlay and pending events.
#[derive(Debug, Clone, Default)]
pub struct Page {
    items: Vec<GalleryItem>,
    overlay: Option<Overlay>,
    pending: VecDeque<Event>,
}

impl Page {
    pub fn new(entries: Vec<GalleryEntry>, overlay: Option<Overlay>) -> Self {
        Self {
            items: entries.into_iter().map(GalleryItem::new).collect(),
            overlay,
            pending: VecDeque::new(),
        }
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [GalleryItem] {
        &mut self.items
    }

    pub fn entry(&self, index: usize) -> Option<&GalleryEntry> {
        self.items.get(index).map(|item| &item.entry)
    }

    pub fn entry_count(&self) -> usize {
        self.items.len()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut Overlay> {
        self.overlay.as_mut()
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay.as_ref().is_some_and(Overlay::is_open)
    }

    /// Open the overlay as a modal. Returns `false` if there is no overlay.
    pub fn show_modal(&mut self) -> bool {
        match self.overlay.as_mut() {
            Some(overlay) => {
                overlay.open = true;
                true
            }
            None => false,
        }
    }

    /// Close the overlay and queue its `close` event.
    ///
    /// Closing an overlay that is not open does nothing and queues nothing.
    pub fn close_overlay(&mut self) -> bool {
        match self.overlay.as_mut() {
            Some(overlay) if overlay.open => {
                overlay.open = false;
                self.pending.push_back(Event::Close);
                true
            }
            _ => false,
        }
    }

    /// Queue an event raised by the host itself.
    pub fn queue(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    pub fn next_pending(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

// ============================================================================
// Snapshot rendering
// ============================================================================

fn join_classes(base: &str, extra: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    let mut class = base.to_string();
    for name in extra {
        class.push(' ');
        class.push_str(name.as_ref());
    }
    class
}

fn item_class(item: &GalleryItem, classes: &ClassConfig) -> String {
    join_classes(
        "gallery__item",
        item.classes.iter().map(|c| classes.name_for(*c)),
    )
}

fn slot_class(base: &str, hidden: bool, classes: &ClassConfig) -> String {
    join_classes(base, hidden.then_some(classes.hidden.as_str()))
}

/// Render the gallery and overlay in their current state.
pub fn render_page(page: &Page, classes: &ClassConfig) -> Markup {
    html! {
        section.gallery {
            @for item in page.items() {
                a class=(item_class(item, classes))
                    href=(item.entry.media_ref)
                    data-video-src=[item.entry.video_src()] {
                    img.gallery__img
                        src=(item.entry.media_ref)
                        width=(item.entry.width)
                        height=(item.entry.height)
                        alt=[item.entry.alt_text.as_deref()];
                }
            }
        }
        @if let Some(overlay) = page.overlay() {
            dialog #modal.modal open[overlay.is_open()] {
                @if overlay.close_button {
                    button.modal__btn-close type="button" { "×" }
                }
                @if let Some(image) = &overlay.image {
                    img class=(slot_class("modal__img", image.hidden, classes))
                        src=(image.src)
                        alt=(image.alt);
                }
                @if let Some(video) = &overlay.video {
                    iframe class=(slot_class("modal__video", video.hidden, classes))
                        src=(video.src)
                        allow="autoplay; fullscreen" {}
                }
            }
        }
    }
}
