//! Aspect-ratio classification of gallery thumbnails.
//!
//! Runs once when the page becomes ready and tags each item with at most one
//! [`LayoutClass`]. Items keep their tags in a set, so running the pass again
//! leaves the page unchanged.

use crate::host::GalleryItem;
use crate::types::LayoutClass;

/// Classify declared thumbnail dimensions.
///
/// Returns `None` when either dimension is unknown (zero) or the ratio is
/// standard.
///
/// # Examples
/// ```
/// # use gallery_lightbox::classify::classify;
/// # use gallery_lightbox::types::LayoutClass;
/// assert_eq!(classify(600, 900), Some(LayoutClass::Tall));
/// assert_eq!(classify(2100, 1000), Some(LayoutClass::Wide));
/// assert_eq!(classify(2000, 1000), None); // exactly 2:1 is standard
/// assert_eq!(classify(0, 500), None);
/// ```
pub fn classify(width: u32, height: u32) -> Option<LayoutClass> {
    if width == 0 || height == 0 {
        return None;
    }
    if height > width {
        Some(LayoutClass::Tall)
    } else if u64::from(width) > 2 * u64::from(height) {
        Some(LayoutClass::Wide)
    } else {
        None
    }
}

/// Tag every item with its layout class. Returns how many items carry a tag.
pub fn apply_layout_classes(items: &mut [GalleryItem]) -> usize {
    let mut tagged = 0;
    for item in items.iter_mut() {
        if let Some(class) = classify(item.entry.width, item.entry.height) {
            item.classes.insert(class);
            tagged += 1;
        }
    }
    tagged
}
