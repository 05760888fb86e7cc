//! Bundled fallback font.
//!
//! DejaVu Sans Mono ships with the crate so native callers always have
//! one family available for measured layout and outline export. Its
//! advances are ~0.6em, close to the heuristic layout ratio.

use crate::data::FontData;
use crate::error::FontError;

pub(crate) static DEJAVU_SANS_MONO: &[u8] = include_bytes!("../fonts/DejaVuSansMono.ttf");

/// Names the bundled font answers to, lowercase.
static ALIASES: &[&str] = &["dejavu sans mono", "monospace"];

/// Parse the bundled font once and pair it with each alias.
///
/// # Errors
///
/// Returns [`FontError::Parse`] if the bundled file is corrupt.
pub fn load_embedded() -> Result<Vec<(String, FontData)>, FontError> {
    let font = FontData::from_static(DEJAVU_SANS_MONO)?;
    Ok(ALIASES
        .iter()
        .map(|name| ((*name).to_owned(), font.clone()))
        .collect())
}
