//! Parsed font data: the glyph-outline parser behind measured layout and
//! outlined text export.

use std::sync::Arc;

use kurbo::{BezPath, Point};

use crate::error::FontError;
use crate::outline::{BezPathSink, OutlineSink};

/// Aggregate metrics for a string at a specific font size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Sum of glyph advances plus kerning.
    pub width: f64,
    /// Tallest glyph extent above the baseline.
    pub height: f64,
    /// Deepest glyph extent below the baseline, as a positive number.
    pub depth: f64,
}

/// Parsed font data.
///
/// Owns the font bytes and caches global metrics. A `ttf_parser::Face` is
/// rebuilt per query; parsing only validates headers and builds the table
/// directory, so this is cheap.
#[derive(Clone)]
pub struct FontData {
    bytes: Arc<[u8]>,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
}

impl FontData {
    /// Parse an OpenType/TrueType font.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Parse`] if `bytes` is not a valid font.
    pub fn from_bytes(bytes: Arc<[u8]>) -> Result<Self, FontError> {
        let face = ttf_parser::Face::parse(&bytes, 0).map_err(|e| FontError::Parse(e.to_string()))?;
        Ok(Self {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            bytes,
        })
    }

    /// Parse font data that lives for the whole program (embedded fonts).
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Parse`] if `bytes` is not a valid font.
    pub fn from_static(bytes: &'static [u8]) -> Result<Self, FontError> {
        Self::from_bytes(Arc::from(bytes))
    }

    #[expect(clippy::expect_used, reason = "bytes were validated in from_bytes")]
    fn face(&self) -> ttf_parser::Face<'_> {
        ttf_parser::Face::parse(&self.bytes, 0).expect("font bytes validated at construction")
    }

    #[must_use]
    pub const fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Scale factor from design units to output units at `font_size`.
    #[must_use]
    pub fn scale(&self, font_size: f64) -> f64 {
        font_size / f64::from(self.units_per_em)
    }

    #[must_use]
    pub fn has_glyph(&self, ch: char) -> bool {
        self.face().glyph_index(ch).is_some()
    }

    /// Map a character to its glyph ID. `None` if the cmap lacks it.
    #[must_use]
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|g| g.0)
    }

    /// Glyph IDs for every character of `text`, in order.
    ///
    /// Characters missing from the cmap map to glyph 0 (`.notdef`), so the
    /// result always has one entry per `char`.
    #[must_use]
    pub fn string_to_glyphs(&self, text: &str) -> Vec<u16> {
        let face = self.face();
        text.chars()
            .map(|ch| face.glyph_index(ch).map_or(0, |g| g.0))
            .collect()
    }

    /// Horizontal advance of a glyph, in design units.
    #[must_use]
    pub fn advance_width(&self, glyph_id: u16) -> Option<u16> {
        self.face().glyph_hor_advance(ttf_parser::GlyphId(glyph_id))
    }

    /// Kerning between two glyphs in design units; negative is tighter.
    #[must_use]
    pub fn kern(&self, left: u16, right: u16) -> i16 {
        self.face()
            .tables()
            .kern
            .and_then(|kern| {
                kern.subtables.into_iter().find_map(|st| {
                    st.glyphs_kerning(ttf_parser::GlyphId(left), ttf_parser::GlyphId(right))
                })
            })
            .unwrap_or(0)
    }

    /// Measure `text` at `font_size`.
    ///
    /// Characters without a glyph are measured as `.notdef`, the same
    /// glyph [`Self::string_to_glyphs`] reports for them.
    #[must_use]
    pub fn text_metrics(&self, text: &str, font_size: f64) -> TextMetrics {
        let face = self.face();
        let scale = self.scale(font_size);
        let mut width = 0.0;
        let mut y_max: i16 = 0;
        let mut y_min: i16 = 0;
        let mut prev: Option<u16> = None;

        for ch in text.chars() {
            let gid = face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));
            if let Some(prev) = prev {
                width += f64::from(self.kern(prev, gid.0)) * scale;
            }
            if let Some(adv) = face.glyph_hor_advance(gid) {
                width += f64::from(adv) * scale;
            }
            if let Some(bb) = face.glyph_bounding_box(gid) {
                y_max = y_max.max(bb.y_max);
                y_min = y_min.min(bb.y_min);
            }
            prev = Some(gid.0);
        }

        if y_max == 0 {
            y_max = self.ascender;
        }
        if y_min == 0 {
            y_min = self.descender;
        }

        TextMetrics {
            width,
            height: f64::from(y_max) * scale,
            depth: (f64::from(y_min) * scale).abs(),
        }
    }

    /// Feed one glyph's outline, scaled to `font_size`, into `sink`.
    ///
    /// Returns `false` if the glyph has no outline (e.g. a space).
    pub fn outline(&self, glyph_id: u16, font_size: f64, sink: &mut dyn OutlineSink) -> bool {
        let face = self.face();
        let mut adapter = OutlineAdapter {
            sink,
            scale: self.scale(font_size),
        };
        face.outline_glyph(ttf_parser::GlyphId(glyph_id), &mut adapter)
            .is_some()
    }

    /// Outline of a whole string with its baseline starting at `(x, y)`.
    ///
    /// The result is in SVG orientation (Y-down). Glyphs advance by their
    /// horizontal advance plus kerning, the same walk as
    /// [`Self::text_metrics`]. Missing characters draw the `.notdef` box.
    #[must_use]
    pub fn text_path(&self, text: &str, x: f64, y: f64, font_size: f64) -> BezPath {
        let face = self.face();
        let scale = self.scale(font_size);
        let mut sink = BezPathSink::new(Point::new(x, y));
        let mut pen_x = x;
        let mut prev: Option<u16> = None;

        for ch in text.chars() {
            let gid = face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));
            if let Some(prev) = prev {
                pen_x += f64::from(self.kern(prev, gid.0)) * scale;
            }
            sink.set_origin(Point::new(pen_x, y));
            self.outline(gid.0, font_size, &mut sink);
            if let Some(adv) = face.glyph_hor_advance(gid) {
                pen_x += f64::from(adv) * scale;
            }
            prev = Some(gid.0);
        }

        sink.finish()
    }
}

/// Bridges [`OutlineSink`] to `ttf_parser::OutlineBuilder`, applying the
/// design-unit scale.
struct OutlineAdapter<'a> {
    sink: &'a mut dyn OutlineSink,
    scale: f64,
}

impl OutlineAdapter<'_> {
    fn s(&self, v: f32) -> f64 {
        f64::from(v) * self.scale
    }
}

impl ttf_parser::OutlineBuilder for OutlineAdapter<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.s(x), self.s(y));
        self.sink.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.s(x), self.s(y));
        self.sink.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1, x, y) = (self.s(x1), self.s(y1), self.s(x), self.s(y));
        self.sink.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = (self.s(x1), self.s(y1));
        let (x2, y2) = (self.s(x2), self.s(y2));
        let (x, y) = (self.s(x), self.s(y));
        self.sink.curve_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.sink.close();
    }
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("units_per_em", &self.units_per_em)
            .field("ascender", &self.ascender)
            .field("descender", &self.descender)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests may panic")]
mod tests {
    use kurbo::Shape;

    use super::*;
    use crate::embedded::DEJAVU_SANS_MONO;

    fn mono() -> FontData {
        FontData::from_static(DEJAVU_SANS_MONO).expect("fixture parses")
    }

    #[test]
    fn rejects_garbage_bytes() {
        let err = FontData::from_bytes(Arc::from(&b"not a font"[..])).expect_err("garbage");
        assert!(matches!(err, FontError::Parse(_)), "unexpected error: {err}");
    }

    #[test]
    fn string_to_glyphs_keeps_one_entry_per_char() {
        let font = mono();
        let glyphs = font.string_to_glyphs("ab\u{4E2D}");
        assert_eq!(glyphs.len(), 3);
        assert_ne!(glyphs[0], 0);
        assert_ne!(glyphs[1], 0);
        assert_eq!(glyphs[2], 0, "CJK char should map to .notdef");
    }

    #[test]
    fn monospace_words_of_equal_length_measure_equal() {
        let font = mono();
        let a = font.text_metrics("il", 10.0).width;
        let b = font.text_metrics("WM", 10.0).width;
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
        // Sans Mono advances are ~0.6em.
        assert!(a > 11.0 && a < 13.0, "width out of range: {a}");
    }

    #[test]
    fn missing_chars_measure_as_notdef() {
        let font = mono();
        let notdef = f64::from(font.advance_width(0).expect(".notdef advance"));
        let width = font.text_metrics("\u{4E2D}", 10.0).width;
        assert!(width > 0.0, "missing char measured as nothing");
        assert!((width - notdef * font.scale(10.0)).abs() < 1e-9, "width = {width}");
    }

    #[test]
    fn metrics_have_height_and_depth() {
        let m = mono().text_metrics("gh", 10.0);
        assert!(m.height > 5.0, "height too small: {}", m.height);
        assert!(m.depth > 1.0, "depth too small: {}", m.depth);
    }

    #[test]
    fn space_has_no_outline() {
        struct Nop;
        impl OutlineSink for Nop {
            fn move_to(&mut self, _: f64, _: f64) {}
            fn line_to(&mut self, _: f64, _: f64) {}
            fn quad_to(&mut self, _: f64, _: f64, _: f64, _: f64) {}
            fn curve_to(&mut self, _: f64, _: f64, _: f64, _: f64, _: f64, _: f64) {}
            fn close(&mut self) {}
        }

        let font = mono();
        let space = font.glyph_id(' ').expect("space glyph");
        let a = font.glyph_id('A').expect("A glyph");
        assert!(!font.outline(space, 10.0, &mut Nop));
        assert!(font.outline(a, 10.0, &mut Nop));
    }

    #[test]
    fn text_path_sits_on_baseline_and_spans_advance() {
        let font = mono();
        let path = font.text_path("HH", 5.0, 20.0, 10.0);
        let bbox = path.bounding_box();
        let width = font.text_metrics("HH", 10.0).width;

        assert!(bbox.x0 >= 5.0, "starts before origin: {bbox:?}");
        assert!(bbox.x1 <= 5.0 + width, "overruns advance: {bbox:?}");
        // Capital H rests on the baseline and rises above it (Y-down).
        assert!((bbox.y1 - 20.0).abs() < 0.05, "bottom off baseline: {bbox:?}");
        assert!(bbox.y0 < 15.0, "glyph too short: {bbox:?}");
        assert!(path.to_svg().starts_with('M'));
    }
}
