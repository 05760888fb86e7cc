//! Word-sequence SVG export.
//!
//! Lays a list of words out along one horizontal baseline, one `<text>`
//! element per word with its own `font-weight`, and packages the document
//! as an `image/svg+xml` payload named `stickyphrases.svg`.
//!
//! Layout is a fixed-ratio estimate by default: each word advances by
//! `chars × size × 0.6 + size × 0.2`. Passing a [`FontData`] in
//! [`ExportOptions::metrics_font`] switches to measured glyph advances, and
//! [`TextMode::Outlines`] replaces the `<text>` elements with glyph
//! outlines so the file no longer depends on the font being installed.
//!
//! Each word is written inline as `<text …>word</text>`, with no
//! whitespace around it.

use log::{debug, warn};
use svg::Document;
use svg::node::element::{Element, Path as SvgPath, tag};
use svg::node::{Node, Text as TextNode};

use stickyphrases_fonts::{FontData, FontRegistry, ensure_font_loaded};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Media type of the exported payload.
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// Suggested filename of every export.
pub const EXPORT_FILENAME: &str = "stickyphrases.svg";

/// `font-family` written on every `<text>` element by default.
pub const DEFAULT_FAMILY_LABEL: &str = "CustomFont";

/// Estimated glyph width, as a fraction of the font size.
const CHAR_WIDTH_RATIO: f64 = 0.6;

/// Gap after each word, as a fraction of the font size.
const WORD_GAP_RATIO: f64 = 0.2;

// ---------------------------------------------------------------------------
// Request / result types
// ---------------------------------------------------------------------------

/// Words to export and how to style them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRequest {
    /// Words in display order.
    pub words: Vec<String>,
    /// Stylesheet that defines the font; may be empty.
    pub font_url: String,
    /// `font-weight` per word, parallel to `words`.
    pub weights: Vec<f64>,
    /// Font size of every word; also the baseline's `y`.
    pub base_font_size: f64,
    /// Family to make available before export.
    ///
    /// `None` ensures the empty family, which loads nothing: the
    /// stylesheet at `font_url` is neither attached nor awaited and the
    /// exported file relies on the viewer having the font. Set this to the
    /// family `font_url` defines to attach the stylesheet and wait for the
    /// face first.
    pub family: Option<String>,
}

/// An exported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgBlob {
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
}

impl SvgBlob {
    fn new(markup: String) -> Self {
        Self {
            bytes: markup.into_bytes(),
            media_type: SVG_MEDIA_TYPE,
        }
    }

    /// The document as text. Exported markup is always UTF-8.
    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }
}

/// The payload of an export plus the filename to save it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub blob: SvgBlob,
    pub filename: &'static str,
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How words are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextMode {
    /// `<text>` elements that reference [`ExportOptions::family_label`].
    #[default]
    Text,
    /// `<path>` elements built from the glyph outlines of
    /// [`ExportOptions::metrics_font`].
    Outlines,
}

/// Options controlling SVG output.
#[derive(Debug, Clone)]
pub struct ExportOptions<'a> {
    /// `font-family` of every `<text>` element. Default: `CustomFont`.
    pub family_label: String,
    /// Decimal places for coordinates and sizes. Default: 4.
    pub precision: usize,
    /// Font used to measure advances (and to outline words).
    /// Default: `None`, i.e. the fixed-ratio estimate.
    pub metrics_font: Option<&'a FontData>,
    pub text_mode: TextMode,
    /// Leave `font-weight` off words past the end of
    /// [`ExportRequest::weights`] instead of writing `"undefined"`.
    /// Default: `false`.
    pub omit_missing_weights: bool,
}

impl Default for ExportOptions<'_> {
    fn default() -> Self {
        Self {
            family_label: DEFAULT_FAMILY_LABEL.to_owned(),
            precision: 4,
            metrics_font: None,
            text_mode: TextMode::Text,
            omit_missing_weights: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Export `request` with default options.
///
/// Ensures the request's font on `registry` first; a font that fails to
/// load does not stop the export.
pub async fn export_text_to_svg<R: FontRegistry>(
    registry: &R,
    request: &ExportRequest,
) -> ExportResult {
    export_text_to_svg_with(registry, request, &ExportOptions::default()).await
}

/// Export `request` with custom options.
pub async fn export_text_to_svg_with<R: FontRegistry>(
    registry: &R,
    request: &ExportRequest,
    opts: &ExportOptions<'_>,
) -> ExportResult {
    let family = request.family.as_deref().unwrap_or_default();
    let outcome = ensure_font_loaded(registry, family, Some(request.font_url.as_str())).await;
    debug!("font before export: {outcome:?}");

    let doc = render_text_svg(request, opts);
    ExportResult {
        blob: SvgBlob::new(doc.to_string()),
        filename: EXPORT_FILENAME,
    }
}

/// Build the SVG [`Document`] for `request`.
///
/// The root carries only `xmlns`; there is no `width`, `height`, or
/// `viewBox`.
#[must_use]
pub fn render_text_svg(request: &ExportRequest, opts: &ExportOptions<'_>) -> Document {
    let size = request.base_font_size;
    let y = size;
    let mut x = 0.0;

    let outline_font = match (opts.text_mode, opts.metrics_font) {
        (TextMode::Outlines, Some(font)) => Some(font),
        (TextMode::Outlines, None) => {
            warn!("outline export needs a metrics font; writing <text> elements instead");
            None
        }
        (TextMode::Text, _) => None,
    };

    let mut doc = Document::new().set("xmlns", "http://www.w3.org/2000/svg");

    for (i, word) in request.words.iter().enumerate() {
        if let Some(font) = outline_font {
            if let Some(path) = render_outline(word, x, y, size, font) {
                doc = doc.add(path);
            }
        } else {
            doc = doc.add(render_word(word, x, size, request.weights.get(i).copied(), opts));
        }
        x += word_advance(word, size, opts.metrics_font);
    }

    if request.weights.len() != request.words.len() {
        debug!(
            "{} words but {} weights; unmatched words get an undefined font-weight",
            request.words.len(),
            request.weights.len()
        );
    }

    doc
}

/// Horizontal distance from the start of `word` to the start of the next.
///
/// Uses the glyph advances of `font` when given, otherwise
/// `chars × size × 0.6`. Both add a `size × 0.2` gap.
#[must_use]
pub fn word_advance(word: &str, size: f64, font: Option<&FontData>) -> f64 {
    let width = font.map_or_else(
        || char_count(word) * size * CHAR_WIDTH_RATIO,
        |f| f.text_metrics(word, size).width,
    );
    width + size * WORD_GAP_RATIO
}

// ---------------------------------------------------------------------------
// Element renderers
// ---------------------------------------------------------------------------

/// One word as a `<text>` element on the baseline `y = size`.
///
/// Built as a plain [`Element`] so the word is written inline; the crate's
/// `Text` element puts its content on a line of its own.
///
/// A missing weight is written as `font-weight="undefined"`, which viewers
/// ignore, unless [`ExportOptions::omit_missing_weights`] is set.
fn render_word(
    word: &str,
    x: f64,
    size: f64,
    weight: Option<f64>,
    opts: &ExportOptions<'_>,
) -> Element {
    let p = opts.precision;
    let mut el = Element::new(tag::Text);
    el.assign("x", fmt_scalar(x, p));
    el.assign("y", fmt_scalar(size, p));
    el.assign("font-family", opts.family_label.as_str());
    el.assign("font-size", fmt_scalar(size, p));
    match weight {
        Some(weight) => el.assign("font-weight", fmt_scalar(weight, p)),
        None if opts.omit_missing_weights => {}
        None => el.assign("font-weight", "undefined"),
    }
    el.append(TextNode::new(word));
    el
}

/// One word as a filled `<path>`; `None` when it has no visible glyphs.
fn render_outline(word: &str, x: f64, y: f64, size: f64, font: &FontData) -> Option<SvgPath> {
    let path = font.text_path(word, x, y, size);
    if path.elements().is_empty() {
        return None;
    }
    Some(SvgPath::new().set("d", path.to_svg()).set("aria-label", word))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[expect(clippy::cast_precision_loss, reason = "word lengths are far below 2^52")]
fn char_count(word: &str) -> f64 {
    word.chars().count() as f64
}

/// Format a scalar to the given precision, stripping trailing zeros.
///
/// Negative zero prints as `0`.
fn fmt_scalar(v: f64, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        s
    };
    if s == "-0" { "0".to_owned() } else { s }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
