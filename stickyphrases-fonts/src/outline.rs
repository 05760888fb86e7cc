//! Glyph outline extraction.
//!
//! [`OutlineSink`] receives outline commands in font orientation (Y-up),
//! pre-scaled to the requested font size. [`BezPathSink`] is the sink the
//! rest of the workspace uses: it places glyphs on an SVG baseline
//! (Y-down) and collects them into a [`kurbo::BezPath`].

use kurbo::{BezPath, Point};

/// Receiver for glyph outline commands.
///
/// Coordinates are pre-scaled from font design units, Y pointing up.
pub trait OutlineSink {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Quadratic Bezier (TrueType-style).
    fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64);
    /// Cubic Bezier (CFF-style).
    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64);
    fn close(&mut self);
}

/// Collects outlines into a [`BezPath`] positioned in SVG space.
///
/// Each incoming point `(x, y)` is mapped to
/// `(origin.x + x, origin.y - y)`, so a glyph drawn with its baseline at
/// font-space `y = 0` sits on the SVG baseline `origin.y`.
#[derive(Debug, Default)]
pub struct BezPathSink {
    path: BezPath,
    origin: Point,
}

impl BezPathSink {
    #[must_use]
    pub fn new(origin: Point) -> Self {
        Self {
            path: BezPath::new(),
            origin,
        }
    }

    /// Move the pen origin, e.g. to the next glyph's advance position.
    pub const fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    #[must_use]
    pub fn finish(self) -> BezPath {
        self.path
    }

    fn map(&self, x: f64, y: f64) -> Point {
        Point::new(self.origin.x + x, self.origin.y - y)
    }
}

impl OutlineSink for BezPathSink {
    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.map(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.map(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) {
        let (c, p) = (self.map(x1, y1), self.map(x, y));
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        let (c1, c2, p) = (self.map(x1, y1), self.map(x2, y2), self.map(x, y));
        self.path.curve_to(c1, c2, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{PathEl, Shape};

    use super::*;

    #[test]
    fn flips_y_around_origin() {
        let mut sink = BezPathSink::new(Point::new(10.0, 20.0));
        sink.move_to(0.0, 0.0);
        sink.line_to(5.0, 8.0);
        sink.close();
        let path = sink.finish();

        let els: Vec<PathEl> = path.elements().to_vec();
        assert_eq!(els[0], PathEl::MoveTo(Point::new(10.0, 20.0)));
        assert_eq!(els[1], PathEl::LineTo(Point::new(15.0, 12.0)));
        assert_eq!(els[2], PathEl::ClosePath);
    }

    #[test]
    fn origin_shift_applies_to_later_commands() {
        let mut sink = BezPathSink::new(Point::ZERO);
        sink.move_to(0.0, 0.0);
        sink.line_to(1.0, 1.0);
        sink.set_origin(Point::new(100.0, 0.0));
        sink.move_to(0.0, 0.0);
        sink.line_to(1.0, 1.0);
        let bbox = sink.finish().bounding_box();
        assert!((bbox.x0 - 0.0).abs() < 1e-9);
        assert!((bbox.x1 - 101.0).abs() < 1e-9);
        assert!((bbox.y0 + 1.0).abs() < 1e-9, "y-up input should map upward: {bbox:?}");
    }
}
