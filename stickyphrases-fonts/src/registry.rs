//! The platform font registry seen by [`crate::ensure_font_loaded`].
//!
//! In a browser this is `document.fonts` plus the `<link>` elements in
//! `document.head`; natively it is usually a [`crate::MemoryFontRegistry`].
//! Methods take `&self`: hosts are single-threaded and registries mutate
//! through interior mutability, the way the DOM does.

use std::future::Future;

use crate::error::FontError;

/// Capabilities the font ensurer needs from its host.
pub trait FontRegistry {
    /// Whether a face with exactly this family name is already loaded.
    fn contains(&self, family: &str) -> bool;

    /// Whether a stylesheet link to exactly this URL is already attached.
    fn has_stylesheet_link(&self, url: &str) -> bool;

    /// Attach a stylesheet link for `url`.
    ///
    /// Returns as soon as the link is attached; the stylesheet itself
    /// downloads in the background.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Platform`] if the host refuses the insertion.
    fn append_stylesheet_link(&self, url: &str) -> Result<(), FontError>;

    /// Ask the host to load the faces matched by a CSS font shorthand
    /// such as `1em "Inter"`.
    ///
    /// The future fails with [`FontError::Unresolved`] when no face can be
    /// loaded for the request.
    fn load(&self, probe: &str) -> impl Future<Output = Result<(), FontError>>;
}
