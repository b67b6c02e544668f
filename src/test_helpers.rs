//! Shared test utilities for the gallery-lightbox test suite.
//!
//! Provides a standard page fixture and slot accessors that panic with a
//! clear message when an element the test relies on is missing.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let mut page = three_entry_page();
//! // ... drive a controller ...
//! assert_eq!(image_src(&page), "public/gallery/1.png");
//! assert!(video_hidden(&page));
//! ```

use crate::events::Rect;
use crate::host::{ImageSlot, Overlay, Page, VideoSlot};
use crate::types::GalleryEntry;

// =========================================================================
// Fixtures
// =========================================================================

/// Overlay whose content box spans (100, 50) to (900, 650).
pub fn standard_overlay() -> Overlay {
    Overlay::new(Rect::new(100.0, 50.0, 800.0, 600.0))
}

/// Plain landscape image entry `public/gallery/{n}.png`.
pub fn image_entry(n: usize) -> GalleryEntry {
    GalleryEntry::image(format!("public/gallery/{n}.png"), 800, 600)
}

/// Three entries in document order:
///
/// 0. landscape image with alt text
/// 1. portrait image without alt text
/// 2. panorama-poster video
pub fn three_entry_page() -> Page {
    let entries = vec![
        GalleryEntry::image("public/gallery/1.png", 800, 600).with_alt("Harbour at dusk"),
        GalleryEntry::image("public/gallery/2.jpg", 600, 900),
        GalleryEntry {
            width: 3000,
            height: 1000,
            ..GalleryEntry::video(
                "public/gallery/3.jpg",
                "https://www.youtube.com/embed/abc123",
            )
        },
    ];
    Page::new(entries, Some(standard_overlay()))
}

// =========================================================================
// Slot accessors — panic with a clear message on miss
// =========================================================================

fn image_slot(page: &Page) -> &ImageSlot {
    page.overlay()
        .and_then(|o| o.image.as_ref())
        .unwrap_or_else(|| panic!("page has no overlay image slot"))
}

fn video_slot(page: &Page) -> &VideoSlot {
    page.overlay()
        .and_then(|o| o.video.as_ref())
        .unwrap_or_else(|| panic!("page has no overlay video slot"))
}

pub fn image_src(page: &Page) -> &str {
    &image_slot(page).src
}

pub fn image_alt(page: &Page) -> &str {
    &image_slot(page).alt
}

pub fn image_hidden(page: &Page) -> bool {
    image_slot(page).hidden
}

pub fn video_src(page: &Page) -> &str {
    &video_slot(page).src
}

pub fn video_hidden(page: &Page) -> bool {
    video_slot(page).hidden
}
