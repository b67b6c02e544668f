//! CLI output formatting for all commands.
//!
//! # Entry Display Contract
//!
//! Every gallery entry is shown the same way in every command:
//!
//! 1. **Header line**: 1-based positional index, kind, and media reference
//! 2. **Context lines**: indented dimensions, layout class, video source
//!
//! # Output Format
//!
//! ## Classify
//!
//! ```text
//! Gallery (3 entries)
//! 001 image public/gallery/1.png
//!     800×600
//!     Alt: Harbour at dusk
//! 002 image public/gallery/2.jpg
//!     600×900 tall → gallery__item--tall
//! 003 video public/gallery/3.jpg
//!     3000×1000 wide → gallery__item--wide
//!     Video: https://www.youtube.com/embed/abc123
//!
//! Tagged 2 of 3 entries
//! ```
//!
//! ## Replay
//!
//! ```text
//! [3] click entry 0 at (0, 0)
//!     open · 001 · image public/gallery/1.png "Harbour at dusk"
//! [4] key ArrowLeft
//!     open · 003 · video https://www.youtube.com/embed/abc123?autoplay=1
//! [13] click close at (880, 60)
//!     closed
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure — no I/O, no side effects.

use crate::config::ClassConfig;
use crate::host::{GalleryItem, Page};
use crate::lightbox::{Shown, Snapshot};
use crate::manifest::GalleryManifest;
use crate::script::Step;

// ============================================================================
// Shared entry display helpers
// ============================================================================

/// Format a 0-based index as a 1-based, 3-digit zero-padded position.
fn format_index(index: usize) -> String {
    format!("{:0>3}", index + 1)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

fn entry_header(index: usize, item: &GalleryItem) -> String {
    let kind = if item.entry.is_video() { "video" } else { "image" };
    format!("{} {} {}", format_index(index), kind, item.entry.media_ref)
}

fn dimensions(item: &GalleryItem) -> String {
    let (w, h) = (item.entry.width, item.entry.height);
    if w == 0 || h == 0 {
        "size unknown".to_string()
    } else {
        format!("{w}×{h}")
    }
}

fn entry_lines(index: usize, item: &GalleryItem, classes: &ClassConfig) -> Vec<String> {
    let mut lines = vec![entry_header(index, item)];
    let mut detail = dimensions(item);
    for class in &item.classes {
        detail.push_str(&format!(" {} \u{2192} {}", class, classes.name_for(*class)));
    }
    lines.push(format!("{}{}", indent(1), detail));
    if let Some(alt) = item.entry.alt_text.as_deref().filter(|a| !a.is_empty()) {
        lines.push(format!("{}Alt: {}", indent(1), truncate(alt, 60)));
    }
    if let Some(video) = item.entry.video_src() {
        lines.push(format!("{}Video: {}", indent(1), video));
    }
    lines
}

// ============================================================================
// classify
// ============================================================================

/// Format the classified gallery.
pub fn format_classify_output(page: &Page, classes: &ClassConfig) -> Vec<String> {
    let items = page.items();
    let mut lines = vec![format!("Gallery ({} entries)", items.len())];
    for (i, item) in items.iter().enumerate() {
        lines.extend(entry_lines(i, item, classes));
    }
    let tagged = items.iter().filter(|i| !i.classes.is_empty()).count();
    lines.push(String::new());
    lines.push(format!("Tagged {} of {} entries", tagged, items.len()));
    lines
}

pub fn print_classify_output(page: &Page, classes: &ClassConfig) {
    for line in format_classify_output(page, classes) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Explain whether the lightbox would wire on this manifest, and why not.
pub fn format_check_output(manifest: &GalleryManifest) -> Vec<String> {
    let mut lines = vec![format!(
        "Entries: {} ({} video)",
        manifest.entries.len(),
        manifest.video_count()
    )];
    match &manifest.overlay {
        Some(overlay) => {
            let b = overlay.bounds;
            lines.push(format!(
                "Overlay: content box {}×{} at ({}, {})",
                b.width, b.height, b.x, b.y
            ));
            let part = |present: bool| if present { "present" } else { "missing" };
            lines.push(format!("{}Image slot: {}", indent(1), part(overlay.image_slot)));
            lines.push(format!("{}Video slot: {}", indent(1), part(overlay.video_slot)));
            lines.push(format!(
                "{}Close button: {}",
                indent(1),
                part(overlay.close_button)
            ));
        }
        None => lines.push("Overlay: missing".to_string()),
    }

    let inert_reason = if manifest.entries.is_empty() {
        Some("no gallery entries")
    } else {
        match &manifest.overlay {
            None => Some("no overlay element"),
            Some(o) if !(o.image_slot && o.video_slot) => Some("overlay is missing a content slot"),
            Some(_) => None,
        }
    };
    lines.push(match inert_reason {
        None => "Lightbox: active".to_string(),
        Some(reason) => format!("Lightbox: inert ({reason})"),
    });
    lines
}

pub fn print_check_output(manifest: &GalleryManifest) {
    for line in format_check_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// replay
// ============================================================================

fn describe_shown(shown: &Shown) -> String {
    match shown {
        Shown::Nothing => "nothing shown".to_string(),
        Shown::Image { src, alt } => format!("image {} \"{}\"", src, truncate(alt, 40)),
        Shown::Video { src } => format!("video {}", src),
    }
}

/// One-line summary of the lightbox state.
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    if !snapshot.wired {
        return "inert".to_string();
    }
    match (snapshot.open, snapshot.current_index) {
        (true, Some(index)) => format!(
            "open \u{b7} {} \u{b7} {}",
            format_index(index),
            describe_shown(&snapshot.shown)
        ),
        (true, None) => format!("open \u{b7} {}", describe_shown(&snapshot.shown)),
        (false, _) => "closed".to_string(),
    }
}

/// Format one replayed step and the state it left behind.
pub fn format_step(step: &Step, snapshot: &Snapshot) -> Vec<String> {
    let mut lines = vec![
        format!("[{}] {}", step.line, step.event),
        format!("{}{}", indent(1), format_snapshot(snapshot)),
    ];
    if snapshot.key_listeners > 1 {
        lines.push(format!(
            "{}warning: {} keyboard listeners installed",
            indent(1),
            snapshot.key_listeners
        ));
    }
    lines
}

pub fn print_step(step: &Step, snapshot: &Snapshot) {
    for line in format_step(step, snapshot) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
