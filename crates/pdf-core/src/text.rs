//! Text rendering utilities

use crate::document::Color;
use crate::font::{FontFamily, FontWeight};
use crate::{fmt_num, Align};

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
    /// Extra spacing added after every space character, in points
    pub word_spacing: f64,
}

/// Generate PDF operators for text insertion
///
/// Creates the proper PDF text operators (BT, Tf, Td, Tj/TJ, ET) to render text
/// at a specific position with alignment support.
///
/// `Tw` does not apply to two-byte glyph codes, so word spacing is written
/// as `TJ` adjustments: the text is passed as glyph runs that each end in a
/// space (except the last), and the gap after each run is widened.
///
/// # Arguments
/// * `runs` - Hex-encoded glyph runs (e.g., "<00010002>")
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment
/// * `ctx` - Text rendering context
///
/// # Returns
/// Vector of bytes containing the PDF operators
pub fn generate_text_operators(
    runs: &[String],
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let mut ops = String::new();

    // Calculate X offset for alignment
    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };

    let final_x = x + x_offset;

    ops.push_str("BT\n");
    ops.push_str(&format!("{} rg\n", ctx.color.components()));
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, fmt_num(ctx.font_size as f64)));
    ops.push_str(&format!("{} {} Td\n", fmt_num(final_x), fmt_num(y)));

    if let [run] = runs {
        ops.push_str(&format!("{run} Tj\n"));
    } else {
        // Adjustments are in thousandths of text space, subtracted from the position
        let gap = -ctx.word_spacing * 1000.0 / ctx.font_size as f64;
        let separator = if ctx.word_spacing != 0.0 {
            format!(" {} ", fmt_num(gap))
        } else {
            " ".to_string()
        };
        ops.push_str(&format!("[{}] TJ\n", runs.join(&separator)));
    }

    ops.push_str("ET\n");

    ops.into_bytes()
}

/// A run of text sharing one font weight and color
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub weight: FontWeight,
    pub color: Color,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, weight: FontWeight, color: Color) -> Self {
        Self {
            text: text.into(),
            weight,
            color,
        }
    }

    /// Width of the span in points, measured with the family's face for its weight
    pub fn width(&self, fonts: &FontFamily, font_size: f32) -> f64 {
        fonts
            .get_variant(self.weight)
            .text_width_points(&self.text, font_size)
    }
}

/// One output line of [`wrap_spans`]
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    /// Spans in reading order; adjacent spans never share weight and color
    pub spans: Vec<TextSpan>,
    /// Natural width in points
    pub width: f64,
    /// Number of inter-word spaces (for justification)
    pub spaces: usize,
}

impl WrappedLine {
    /// Plain text of the line
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A word fragment carrying its own style
struct Piece {
    text: String,
    weight: FontWeight,
    color: Color,
    space_before: bool,
}

/// Split styled runs into pieces at whitespace, remembering where spaces were
fn split_pieces(spans: &[TextSpan]) -> Vec<Piece> {
    let mut pieces: Vec<Piece> = Vec::new();
    let mut pending_space = false;

    for span in spans {
        let mut current = String::new();
        for c in span.text.chars() {
            if c.is_whitespace() {
                if !current.is_empty() {
                    pieces.push(Piece {
                        text: std::mem::take(&mut current),
                        weight: span.weight,
                        color: span.color,
                        space_before: pending_space,
                    });
                    pending_space = false;
                }
                pending_space = true;
            } else {
                current.push(c);
            }
        }
        if !current.is_empty() {
            pieces.push(Piece {
                text: current,
                weight: span.weight,
                color: span.color,
                space_before: pending_space,
            });
            pending_space = false;
        }
    }

    // The first piece never starts with a space
    if let Some(first) = pieces.first_mut() {
        first.space_before = false;
    }

    pieces
}

/// Word wrap styled text runs to a maximum width
///
/// Whitespace runs collapse to single spaces. Breaks happen only at
/// whitespace; pieces of different styles that touch (e.g. a bold label
/// followed by a colon) stay together. A word wider than `max_width` is
/// placed on its own line.
///
/// # Arguments
/// * `fonts` - Family the spans are measured with
/// * `spans` - Styled text runs in reading order
/// * `font_size` - Font size in points
/// * `max_width` - Available width in points
pub fn wrap_spans(
    fonts: &FontFamily,
    spans: &[TextSpan],
    font_size: f32,
    max_width: f64,
) -> Vec<WrappedLine> {
    let measure = |weight: FontWeight, text: &str| {
        fonts.get_variant(weight).text_width_points(text, font_size)
    };

    let pieces = split_pieces(spans);

    // Group touching pieces into unbreakable words
    let mut words: Vec<Vec<Piece>> = Vec::new();
    for piece in pieces {
        match words.last_mut() {
            Some(word) if !piece.space_before => word.push(piece),
            _ => words.push(vec![piece]),
        }
    }

    let mut lines = Vec::new();
    let mut line: Vec<Piece> = Vec::new();
    let mut line_width = 0.0f64;

    for word in words {
        let word_width: f64 = word
            .iter()
            .map(|p| measure(p.weight, &p.text))
            .sum();
        let space_width = measure(word[0].weight, " ");

        if line.is_empty() {
            line_width = word_width;
        } else if line_width + space_width + word_width <= max_width {
            line_width += space_width + word_width;
        } else {
            lines.push(finish_line(std::mem::take(&mut line), line_width));
            line_width = word_width;
        }

        let starts_line = line.is_empty();
        for (i, mut piece) in word.into_iter().enumerate() {
            piece.space_before = i == 0 && !starts_line;
            line.push(piece);
        }
    }

    if !line.is_empty() {
        lines.push(finish_line(line, line_width));
    }

    lines
}

/// Merge pieces into spans, materializing the spaces between words
fn finish_line(pieces: Vec<Piece>, width: f64) -> WrappedLine {
    let mut spans: Vec<TextSpan> = Vec::new();
    let mut spaces = 0;

    for piece in pieces {
        let mut text = String::new();
        if piece.space_before {
            text.push(' ');
            spaces += 1;
        }
        text.push_str(&piece.text);

        match spans.last_mut() {
            Some(last) if last.weight == piece.weight && last.color == piece.color => {
                last.text.push_str(&text);
            }
            _ => spans.push(TextSpan::new(text, piece.weight, piece.color)),
        }
    }

    WrappedLine {
        spans,
        width,
        spaces,
    }
}
