//! Vector graphics operators (rectangles, rounded rectangles, lines)

use crate::document::Color;
use crate::fmt_num;

/// Bezier control distance approximating a quarter circle
const KAPPA: f64 = 0.552_284_75;

/// Axis-aligned rectangle in points, top-left origin (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge (top-left origin)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Convert to PDF space (bottom-left origin) for a page of the given height
    ///
    /// Returns `[x1, y1, x2, y2]` as used by `/Rect` entries.
    pub fn to_pdf_box(&self, page_height: f64) -> [f64; 4] {
        [
            self.x,
            page_height - self.bottom(),
            self.right(),
            page_height - self.y,
        ]
    }
}

/// Generate path operators for a rectangle with optional rounded corners
///
/// `x`/`y` are the lower-left corner in PDF coordinates. The radius is clamped
/// to half of the shorter side.
pub fn generate_rect_path(x: f64, y: f64, width: f64, height: f64, radius: f64) -> String {
    let r = radius.max(0.0).min(width / 2.0).min(height / 2.0);

    if r <= 0.0 {
        return format!(
            "{} {} {} {} re\n",
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height)
        );
    }

    let k = r * KAPPA;
    let (x0, y0, x1, y1) = (x, y, x + width, y + height);
    let mut ops = String::new();

    ops.push_str(&format!("{} {} m\n", fmt_num(x0 + r), fmt_num(y0)));
    ops.push_str(&format!("{} {} l\n", fmt_num(x1 - r), fmt_num(y0)));
    ops.push_str(&curve(x1 - r + k, y0, x1, y0 + r - k, x1, y0 + r));
    ops.push_str(&format!("{} {} l\n", fmt_num(x1), fmt_num(y1 - r)));
    ops.push_str(&curve(x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1));
    ops.push_str(&format!("{} {} l\n", fmt_num(x0 + r), fmt_num(y1)));
    ops.push_str(&curve(x0 + r - k, y1, x0, y1 - r + k, x0, y1 - r));
    ops.push_str(&format!("{} {} l\n", fmt_num(x0), fmt_num(y0 + r)));
    ops.push_str(&curve(x0, y0 + r - k, x0 + r - k, y0, x0 + r, y0));
    ops.push_str("h\n");

    ops
}

fn curve(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> String {
    format!(
        "{} {} {} {} {} {} c\n",
        fmt_num(x1),
        fmt_num(y1),
        fmt_num(x2),
        fmt_num(y2),
        fmt_num(x3),
        fmt_num(y3)
    )
}

/// Operators filling a (rounded) rectangle given in PDF coordinates
pub fn generate_fill_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
    color: Color,
) -> Vec<u8> {
    let mut ops = String::from("q\n");
    ops.push_str(&format!("{} rg\n", color.components()));
    ops.push_str(&generate_rect_path(x, y, width, height, radius));
    ops.push_str("f\nQ\n");
    ops.into_bytes()
}

/// Operators stroking a (rounded) rectangle given in PDF coordinates
#[allow(clippy::too_many_arguments)]
pub fn generate_stroke_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
    color: Color,
    line_width: f64,
) -> Vec<u8> {
    let mut ops = String::from("q\n");
    ops.push_str(&format!("{} RG\n", color.components()));
    ops.push_str(&format!("{} w\n", fmt_num(line_width)));
    ops.push_str(&generate_rect_path(x, y, width, height, radius));
    ops.push_str("S\nQ\n");
    ops.into_bytes()
}

/// Operators for a straight line between two points in PDF coordinates
pub fn generate_line_operators(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    line_width: f64,
) -> Vec<u8> {
    format!(
        "q\n{} RG\n{} w\n{} {} m\n{} {} l\nS\nQ\n",
        color.components(),
        fmt_num(line_width),
        fmt_num(x1),
        fmt_num(y1),
        fmt_num(x2),
        fmt_num(y2)
    )
    .into_bytes()
}
