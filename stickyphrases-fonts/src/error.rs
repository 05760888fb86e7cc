//! Font loading and parsing errors.

use thiserror::Error;

/// Errors that can occur when loading, probing, or querying fonts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontError {
    /// The font data could not be parsed.
    #[error("font parse error: {0}")]
    Parse(String),
    /// The platform could not resolve the requested family.
    #[error("font family \"{0}\" could not be resolved")]
    Unresolved(String),
    /// The host platform rejected an operation (e.g. a DOM exception).
    #[error("platform error: {0}")]
    Platform(String),
}
