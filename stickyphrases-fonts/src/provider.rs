//! Lookup of parsed font data by family name.

use crate::data::FontData;

/// Resolves family names to parsed [`FontData`].
///
/// Used where real glyph metrics are needed (measured layout, outline
/// export). Whether names are matched case-insensitively is up to the
/// implementation.
pub trait FontProvider {
    fn font(&self, family: &str) -> Option<&FontData>;
}
