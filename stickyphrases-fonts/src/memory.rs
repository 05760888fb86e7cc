//! In-memory font registry.
//!
//! Stands in for the browser's font-face set and document head on native
//! hosts and in tests. Besides tracking loaded families and attached
//! stylesheet links it records every call made through [`FontRegistry`],
//! so callers can check which platform hooks were touched.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::future::{Future, ready};
use std::sync::Arc;

use crate::data::FontData;
use crate::ensure::probe_family;
use crate::error::FontError;
use crate::provider::FontProvider;
use crate::registry::FontRegistry;

/// One call made through the [`FontRegistry`] interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    Contains(String),
    HasStylesheetLink(String),
    AppendStylesheetLink(String),
    Load(String),
}

#[derive(Debug, Default)]
struct State {
    loaded: HashSet<String>,
    links: Vec<String>,
    calls: Vec<RegistryCall>,
}

/// Font registry backed by plain collections.
///
/// Family names in the loaded set match exactly, like `FontFace.family`.
/// Parsed [`FontData`] is looked up case-insensitively through
/// [`FontProvider`].
#[derive(Debug, Default)]
pub struct MemoryFontRegistry {
    state: RefCell<State>,
    /// Families each stylesheet URL makes loadable once it is linked.
    stylesheets: HashMap<String, Vec<String>>,
    fonts: HashMap<String, FontData>,
    refuse_links: bool,
}

impl MemoryFontRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the bundled fonts already loaded.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Parse`] if a bundled font fails to parse.
    pub fn with_embedded() -> Result<Self, FontError> {
        let mut registry = Self::new();
        for (name, font) in crate::embedded::load_embedded()? {
            registry.insert_font(&name, font);
        }
        Ok(registry)
    }

    /// Mark `family` as already present in the loaded set.
    #[must_use]
    pub fn with_loaded(self, family: &str) -> Self {
        self.state.borrow_mut().loaded.insert(family.to_owned());
        self
    }

    /// Declare which families the stylesheet at `url` provides.
    #[must_use]
    pub fn serving<I, S>(mut self, url: &str, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stylesheets
            .insert(url.to_owned(), families.into_iter().map(Into::into).collect());
        self
    }

    /// Pretend a stylesheet link to `url` is already attached.
    #[must_use]
    pub fn with_link(self, url: &str) -> Self {
        self.state.borrow_mut().links.push(url.to_owned());
        self
    }

    /// Make every [`FontRegistry::append_stylesheet_link`] call fail.
    #[must_use]
    pub fn refusing_links(mut self) -> Self {
        self.refuse_links = true;
        self
    }

    /// Parse `bytes` and register the font under `family`, marking the
    /// family as loaded. Replaces any font already registered under the
    /// same (case-insensitive) name.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Parse`] if `bytes` is not a valid font.
    pub fn load_font(&mut self, family: &str, bytes: Vec<u8>) -> Result<(), FontError> {
        let font = FontData::from_bytes(Arc::from(bytes.into_boxed_slice()))?;
        self.insert_font(family, font);
        Ok(())
    }

    fn insert_font(&mut self, family: &str, font: FontData) {
        self.fonts.insert(family.to_lowercase(), font);
        self.state.get_mut().loaded.insert(family.to_owned());
    }

    #[must_use]
    pub fn is_loaded(&self, family: &str) -> bool {
        self.state.borrow().loaded.contains(family)
    }

    /// Stylesheet URLs attached so far, in insertion order.
    #[must_use]
    pub fn links(&self) -> Vec<String> {
        self.state.borrow().links.clone()
    }

    /// Every registry call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.state.borrow().calls.clone()
    }

    fn record(&self, call: RegistryCall) {
        self.state.borrow_mut().calls.push(call);
    }

    fn resolve(&self, probe: &str) -> Result<(), FontError> {
        let family = probe_family(probe).ok_or_else(|| FontError::Unresolved(probe.to_owned()))?;
        let mut state = self.state.borrow_mut();
        if state.loaded.contains(family) {
            return Ok(());
        }
        let served = state.links.iter().any(|url| {
            self.stylesheets
                .get(url)
                .is_some_and(|families| families.iter().any(|f| f == family))
        });
        if served {
            state.loaded.insert(family.to_owned());
            Ok(())
        } else {
            Err(FontError::Unresolved(family.to_owned()))
        }
    }
}

impl FontRegistry for MemoryFontRegistry {
    fn contains(&self, family: &str) -> bool {
        self.record(RegistryCall::Contains(family.to_owned()));
        self.is_loaded(family)
    }

    fn has_stylesheet_link(&self, url: &str) -> bool {
        self.record(RegistryCall::HasStylesheetLink(url.to_owned()));
        self.state.borrow().links.iter().any(|l| l == url)
    }

    fn append_stylesheet_link(&self, url: &str) -> Result<(), FontError> {
        self.record(RegistryCall::AppendStylesheetLink(url.to_owned()));
        if self.refuse_links {
            return Err(FontError::Platform(format!("cannot attach stylesheet {url}")));
        }
        self.state.borrow_mut().links.push(url.to_owned());
        Ok(())
    }

    fn load(&self, probe: &str) -> impl Future<Output = Result<(), FontError>> {
        self.record(RegistryCall::Load(probe.to_owned()));
        ready(self.resolve(probe))
    }
}

impl FontProvider for MemoryFontRegistry {
    fn font(&self, family: &str) -> Option<&FontData> {
        self.fonts.get(&family.to_lowercase())
    }
}
