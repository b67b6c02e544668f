//! Gallery manifest loading.
//!
//! The manifest is the JSON description of a host page: the gallery entries in
//! document order and, optionally, the overlay element.
//!
//! ```json
//! {
//!   "entries": [
//!     { "media": "public/gallery/1.png", "width": 800, "height": 600, "alt": "Harbour" },
//!     { "media": "public/gallery/2.jpg", "video": "https://www.youtube.com/embed/abc" }
//!   ],
//!   "overlay": {
//!     "bounds": { "x": 100, "y": 50, "width": 800, "height": 600 },
//!     "close_button": true
//!   }
//! }
//! ```
//!
//! A manifest without `overlay` describes a page with no dialog element; the
//! gallery is still classified but the lightbox stays inert. Unknown keys are
//! rejected.

use crate::events::Rect;
use crate::host::{Overlay, Page};
use crate::types::GalleryEntry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Manifest validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryManifest {
    #[serde(default)]
    pub entries: Vec<GalleryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<OverlaySpec>,
}

/// The overlay element and which of its parts exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlaySpec {
    pub bounds: Rect,
    #[serde(default = "present")]
    pub image_slot: bool,
    #[serde(default = "present")]
    pub video_slot: bool,
    #[serde(default = "present")]
    pub close_button: bool,
}

fn present() -> bool {
    true
}

impl OverlaySpec {
    fn build(&self) -> Overlay {
        let mut overlay = Overlay::new(self.bounds);
        if !self.image_slot {
            overlay.image = None;
        }
        if !self.video_slot {
            overlay.video = None;
        }
        overlay.close_button = self.close_button;
        overlay
    }
}

impl GalleryManifest {
    pub fn validate(&self) -> Result<(), ManifestError> {
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.media_ref.trim().is_empty() {
                return Err(ManifestError::Validation(format!(
                    "entries[{i}].media must not be empty"
                )));
            }
        }
        if let Some(overlay) = &self.overlay {
            let b = overlay.bounds;
            if ![b.x, b.y, b.width, b.height].iter().all(|v| v.is_finite()) {
                return Err(ManifestError::Validation(
                    "overlay.bounds values must be finite".into(),
                ));
            }
            if b.width < 0.0 || b.height < 0.0 {
                return Err(ManifestError::Validation(
                    "overlay.bounds width and height must not be negative".into(),
                ));
            }
        }
        Ok(())
    }

    /// Number of entries that will open as videos.
    pub fn video_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_video()).count()
    }

    /// Build the host page this manifest describes.
    pub fn into_page(self) -> Page {
        let overlay = self.overlay.as_ref().map(OverlaySpec::build);
        Page::new(self.entries, overlay)
    }
}

/// Parse and validate a manifest from JSON text.
pub fn parse_manifest(json: &str) -> Result<GalleryManifest, ManifestError> {
    let manifest: GalleryManifest = serde_json::from_str(json)?;
    manifest.validate()?;
    Ok(manifest)
}

/// Read, parse and validate a manifest file.
pub fn load_manifest(path: &Path) -> Result<GalleryManifest, ManifestError> {
    let content = fs::read_to_string(path)?;
    parse_manifest(&content)
}
