//! Browser bindings.
//!
//! [`DocumentFontRegistry`] backs [`FontRegistry`] with `document.fonts`
//! and the `<link>` elements of `document.head`. The exported functions
//! mirror the Rust API for JavaScript callers:
//!
//! - `ensureFontLoaded(family, url?)`
//! - `exportTextToSvg(words, fontUrl, weights, baseFontSize)` resolving to
//!   `{ blob, filename }`

use std::future::Future;

use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, Document, FontFace, HtmlLinkElement};

use stickyphrases_fonts::{FontError, FontRegistry, ensure_font_loaded};
use stickyphrases_svg::{ExportRequest, SvgBlob, export_text_to_svg};

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// [`FontRegistry`] over the current page.
pub struct DocumentFontRegistry {
    document: Document,
}

impl DocumentFontRegistry {
    /// Registry for `window.document`.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Platform`] outside a browser window.
    pub fn from_window() -> Result<Self, FontError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| FontError::Platform("no document on window".to_owned()))?;
        Ok(Self { document })
    }
}

impl FontRegistry for DocumentFontRegistry {
    fn contains(&self, family: &str) -> bool {
        let fonts = self.document.fonts();
        let Ok(Some(faces)) = js_sys::try_iter(&fonts) else {
            return false;
        };
        faces
            .flatten()
            .filter_map(|face| face.dyn_into::<FontFace>().ok())
            .any(|face| face.family() == family)
    }

    fn has_stylesheet_link(&self, url: &str) -> bool {
        matches!(self.document.query_selector(&link_selector(url)), Ok(Some(_)))
    }

    fn append_stylesheet_link(&self, url: &str) -> Result<(), FontError> {
        let link: HtmlLinkElement = self
            .document
            .create_element("link")
            .map_err(platform_error)?
            .dyn_into()
            .map_err(|_| {
                FontError::Platform("created <link> is not an HTMLLinkElement".to_owned())
            })?;
        link.set_rel("stylesheet");
        link.set_href(url);

        let head = self
            .document
            .head()
            .ok_or_else(|| FontError::Platform("document has no <head>".to_owned()))?;
        head.append_child(&link).map_err(platform_error)?;
        Ok(())
    }

    fn load(&self, probe: &str) -> impl Future<Output = Result<(), FontError>> {
        // `FontFaceSet.load` resolves with an empty list when nothing
        // matches; only a rejection (e.g. a malformed shorthand or a
        // network error) counts as a failure.
        let promise = self.document.fonts().load(probe);
        async move {
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(platform_error)
        }
    }
}

/// CSS selector for a `<link>` whose `href` is exactly `url`.
fn link_selector(url: &str) -> String {
    let escaped = url.replace('\\', "\\\\").replace('"', "\\\"");
    format!("link[href=\"{escaped}\"]")
}

fn platform_error(value: JsValue) -> FontError {
    FontError::Platform(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn to_js(err: &FontError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ---------------------------------------------------------------------------
// JavaScript API
// ---------------------------------------------------------------------------

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

/// Make `family` available, attaching `url` as a stylesheet if needed.
///
/// Load failures are logged to the console and do not reject.
#[wasm_bindgen(js_name = ensureFontLoaded)]
pub async fn ensure_font_loaded_js(family: String, url: Option<String>) -> Result<(), JsValue> {
    let registry = DocumentFontRegistry::from_window().map_err(|e| to_js(&e))?;
    ensure_font_loaded(&registry, &family, url.as_deref()).await;
    Ok(())
}

/// Result of `exportTextToSvg`.
#[wasm_bindgen]
pub struct SvgExport {
    blob: Blob,
    filename: String,
}

#[wasm_bindgen]
impl SvgExport {
    #[wasm_bindgen(getter)]
    pub fn blob(&self) -> Blob {
        self.blob.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }
}

/// Render `words` to an SVG `Blob`.
#[wasm_bindgen(js_name = exportTextToSvg)]
pub async fn export_text_to_svg_js(
    words: Vec<String>,
    font_url: String,
    weights: Vec<f64>,
    base_font_size: f64,
) -> Result<SvgExport, JsValue> {
    let registry = DocumentFontRegistry::from_window().map_err(|e| to_js(&e))?;
    let request = export_request(words, font_url, weights, base_font_size);
    let result = export_text_to_svg(&registry, &request).await;

    Ok(SvgExport {
        blob: to_blob(&result.blob)?,
        filename: result.filename.to_owned(),
    })
}

fn export_request(
    words: Vec<String>,
    font_url: String,
    weights: Vec<f64>,
    base_font_size: f64,
) -> ExportRequest {
    ExportRequest {
        words,
        font_url,
        weights,
        base_font_size,
        family: None,
    }
}

fn to_blob(payload: &SvgBlob) -> Result<Blob, JsValue> {
    let parts = Array::of1(&Uint8Array::from(payload.bytes.as_slice()));
    let opts = BlobPropertyBag::new();
    opts.set_type(payload.media_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
}
