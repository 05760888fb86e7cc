//! Best-effort font availability.
//!
//! [`ensure_font_loaded`] makes a family usable before text is rendered,
//! attaching its stylesheet if needed. It never fails: a family that
//! cannot be loaded is reported as [`EnsureOutcome::Failed`] together with
//! a logged warning, and rendering goes ahead with whatever the host falls
//! back to.

use log::{debug, warn};

use crate::registry::FontRegistry;

/// What [`ensure_font_loaded`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The family name was empty; the registry was not consulted.
    Skipped,
    /// The family was already in the loaded set.
    AlreadyLoaded,
    /// The probe succeeded.
    Loaded { link_injected: bool },
    /// The probe failed. `warning` names the family and the cause.
    Failed { link_injected: bool, warning: String },
}

impl EnsureOutcome {
    /// The warning produced by a failed load, if any.
    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        match self {
            Self::Failed { warning, .. } => Some(warning),
            _ => None,
        }
    }

    /// Whether this call attached a new stylesheet link.
    #[must_use]
    pub const fn link_injected(&self) -> bool {
        match self {
            Self::Loaded { link_injected } | Self::Failed { link_injected, .. } => *link_injected,
            Self::Skipped | Self::AlreadyLoaded => false,
        }
    }
}

/// CSS font shorthand used to probe a family: `1em "<family>"`.
#[must_use]
pub fn probe_for(family: &str) -> String {
    format!("1em \"{family}\"")
}

/// Family name from a probe built by [`probe_for`].
#[must_use]
pub fn probe_family(probe: &str) -> Option<&str> {
    probe.strip_prefix("1em \"")?.strip_suffix('"')
}

/// Make `family` available in `registry`, loading it from the stylesheet
/// at `url` if it is not there yet.
///
/// The stylesheet link is attached without waiting for it to download, so
/// a probe issued right after a fresh link may still fail. Callers that
/// need the font can retry; this function does not.
pub async fn ensure_font_loaded<R>(registry: &R, family: &str, url: Option<&str>) -> EnsureOutcome
where
    R: FontRegistry,
{
    if family.is_empty() {
        debug!("no font family given, skipping font load");
        return EnsureOutcome::Skipped;
    }

    if registry.contains(family) {
        return EnsureOutcome::AlreadyLoaded;
    }

    let mut link_injected = false;
    if let Some(url) = url.filter(|u| !u.is_empty()) {
        if !registry.has_stylesheet_link(url) {
            match registry.append_stylesheet_link(url) {
                Ok(()) => {
                    debug!("attached stylesheet {url} for {family}");
                    link_injected = true;
                }
                Err(e) => warn!("could not attach stylesheet {url} for {family}: {e}"),
            }
        }
    }

    match registry.load(&probe_for(family)).await {
        Ok(()) => EnsureOutcome::Loaded { link_injected },
        Err(e) => {
            let warning = format!("font load failed: {family}: {e}");
            warn!("{warning}");
            EnsureOutcome::Failed {
                link_injected,
                warning,
            }
        }
    }
}
