//! Shared types used by the classifier, the host page and the modal controller.
//!
//! Entries are loaded once from the gallery manifest and never change after
//! that; everything mutable lives in [`crate::host::Page`] or
//! [`crate::modal::ModalController`].

use serde::{Deserialize, Serialize};

/// Alt text used for the modal image when an entry declares none.
pub const DEFAULT_ALT_FALLBACK: &str = "Gallery item";

/// One gallery item, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryEntry {
    /// Full-size image reference (the anchor target in the host markup).
    #[serde(rename = "media")]
    pub media_ref: String,
    /// Embed URL; present only for video entries.
    #[serde(rename = "video", default, skip_serializing_if = "Option::is_none")]
    pub video_ref: Option<String>,
    /// Declared thumbnail width, 0 when unknown.
    #[serde(default)]
    pub width: u32,
    /// Declared thumbnail height, 0 when unknown.
    #[serde(default)]
    pub height: u32,
    #[serde(rename = "alt", default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl GalleryEntry {
    /// An image entry with known dimensions.
    pub fn image(media_ref: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            media_ref: media_ref.into(),
            video_ref: None,
            width,
            height,
            alt_text: None,
        }
    }

    /// A video entry; `media_ref` is the poster image shown in the grid.
    pub fn video(media_ref: impl Into<String>, video_ref: impl Into<String>) -> Self {
        Self {
            media_ref: media_ref.into(),
            video_ref: Some(video_ref.into()),
            width: 0,
            height: 0,
            alt_text: None,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt_text = Some(alt.into());
        self
    }

    /// The video reference, treating an empty attribute as absent.
    pub fn video_src(&self) -> Option<&str> {
        self.video_ref.as_deref().filter(|v| !v.is_empty())
    }

    pub fn is_video(&self) -> bool {
        self.video_src().is_some()
    }

    /// Alt text for the modal image, falling back when missing or empty.
    pub fn alt_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.alt_text.as_deref() {
            Some(alt) if !alt.is_empty() => alt,
            _ => fallback,
        }
    }
}

/// Layout hint applied to a gallery item by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutClass {
    /// Portrait: height exceeds width.
    Tall,
    /// Panorama: width exceeds twice the height.
    Wide,
}

impl LayoutClass {
    pub fn label(self) -> &'static str {
        match self {
            LayoutClass::Tall => "tall",
            LayoutClass::Wide => "wide",
        }
    }
}

impl std::fmt::Display for LayoutClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
