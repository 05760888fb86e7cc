//! Font availability and glyph data for StickyPhrases.
//!
//! - [`ensure_font_loaded`] makes a family usable on a [`FontRegistry`]
//!   host (the browser's font-face set, or [`MemoryFontRegistry`]).
//! - [`FontData`] wraps `ttf-parser` for glyph lookup, advance widths,
//!   and outlines, used when layout or export needs real glyph metrics.

pub mod data;
pub mod ensure;
pub mod error;
pub mod memory;
pub mod outline;
pub mod provider;
pub mod registry;

mod embedded;

pub use data::{FontData, TextMetrics};
pub use embedded::load_embedded;
pub use ensure::{EnsureOutcome, ensure_font_loaded, probe_family, probe_for};
pub use error::FontError;
pub use memory::{MemoryFontRegistry, RegistryCall};
pub use outline::{BezPathSink, OutlineSink};
pub use provider::FontProvider;
pub use registry::FontRegistry;
