//! PDF page layout
//!
//! Content flows top to bottom. Cards (header, company, role) are pushed as
//! boxes before their content so they paint underneath it; their height is
//! fixed when they close. When a line does not fit, every open card is cut at
//! the page bottom and continues as a square fragment on a new page.

use super::styles::PdfStyles;
use crate::outline::{self, CompanyEntry, ContactItem, Section, SkillLine};
use crate::Theme;
use cv_data::{CvData, Role};
use pdf_core::{
    wrap_spans, Color, FontFamily, FontWeight, PageSize, PdfDocument, Rect, TextSpan, WrappedLine,
};
use tracing::warn;

/// Underline offset below the baseline and its thickness
const UNDERLINE_OFFSET: f64 = 1.5;
const UNDERLINE_WIDTH: f64 = 0.75;

/// A positioned drawing operation (top-left origin, points)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Filled box with an optional border
    Box {
        rect: Rect,
        radius: f64,
        fill: Color,
        border: Option<Color>,
        border_width: f64,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Color,
        width: f64,
    },
    Text(TextRun),
    Link {
        rect: Rect,
        uri: String,
    },
}

/// Styled spans on one baseline
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f64,
    pub baseline: f64,
    pub font_size: f32,
    /// Extra space added to each space character (justified lines)
    pub word_spacing: f64,
    pub spans: Vec<TextSpan>,
}

/// Drawing operations of every page, in painting order
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub page_size: PageSize,
    pub pages: Vec<Vec<DrawOp>>,
}

impl PdfLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Link targets in document order
    pub fn links(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flatten()
            .filter_map(|op| match op {
                DrawOp::Link { uri, .. } => Some(uri.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Draw every page into `doc`
    pub fn paint(&self, doc: &mut PdfDocument) -> pdf_core::Result<()> {
        for ops in &self.pages {
            let page = doc.add_page();
            for op in ops {
                match op {
                    DrawOp::Box {
                        rect,
                        radius,
                        fill,
                        border,
                        border_width,
                    } => {
                        doc.fill_rect(page, *rect, *radius, *fill)?;
                        if let Some(border) = border {
                            doc.stroke_rect(page, *rect, *radius, *border, *border_width)?;
                        }
                    }
                    DrawOp::Line {
                        from,
                        to,
                        color,
                        width,
                    } => doc.draw_line(page, *from, *to, *color, *width)?,
                    DrawOp::Text(run) => {
                        let Some(first) = run.spans.first() else { continue };
                        doc.set_font(first.weight, run.font_size);
                        doc.insert_spans(&run.spans, page, run.x, run.baseline, run.word_spacing)?;
                    }
                    DrawOp::Link { rect, uri } => doc.add_link(page, *rect, uri)?,
                }
            }
        }
        Ok(())
    }
}

/// Horizontal placement of paragraph lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Left,
    Center,
    /// Every line but the last is stretched to the full width
    Justify,
}

/// A card that has been opened but not closed yet
struct OpenBox {
    /// Index of its `DrawOp::Box` on the current page
    index: usize,
    x: f64,
    width: f64,
    padding: f64,
    fill: Color,
    border: Option<Color>,
}

struct LayoutEngine<'a> {
    styles: &'a PdfStyles,
    fonts: &'a FontFamily,
    /// Ascender and descender of the regular face, as fractions of the size
    ascent: f64,
    descent: f64,
    primary: Color,
    border: Color,
    done: Vec<Vec<DrawOp>>,
    current: Vec<DrawOp>,
    open: Vec<OpenBox>,
    y: f64,
    /// Nothing placed on the current page yet
    fresh: bool,
}

/// Lay out a CV on as many pages as it needs
pub(crate) fn layout_cv(cv: &CvData, styles: &PdfStyles, fonts: &FontFamily) -> PdfLayout {
    let theme = Theme::for_cv(cv);
    let primary = theme.primary_color();

    let mut engine = LayoutEngine {
        styles,
        fonts,
        ascent: fonts.regular.ascent_ratio(),
        descent: fonts.regular.descent_ratio(),
        primary,
        border: Color::white().blend(primary, styles.card_border_alpha),
        done: Vec::new(),
        current: Vec::new(),
        open: Vec::new(),
        y: styles.page_padding.top,
        fresh: true,
    };

    engine.profile_header(cv);
    for (i, section) in outline::sections(cv).iter().enumerate() {
        if i > 0 {
            engine.divider();
        }
        engine.section(section);
    }

    engine.finish()
}

impl<'a> LayoutEngine<'a> {
    fn finish(mut self) -> PdfLayout {
        self.done.push(self.current);
        PdfLayout {
            page_size: self.styles.page_size,
            pages: self.done,
        }
    }

    fn left(&self) -> f64 {
        self.styles.page_padding.left
    }

    /// Lowest y content may reach, leaving room to close open cards
    fn limit(&self) -> f64 {
        let closing: f64 = self.open.iter().map(|b| b.padding).sum();
        self.styles.page_size.height - self.styles.page_padding.bottom - closing
    }

    /// Start a new page unless `height` still fits
    fn ensure(&mut self, height: f64) {
        if !self.fresh && self.y + height > self.limit() {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        // Cut open cards, innermost first
        let mut bottom = self.y;
        for open in self.open.iter().rev() {
            bottom += open.padding;
            if let Some(DrawOp::Box { rect, radius, .. }) = self.current.get_mut(open.index) {
                rect.height = bottom - rect.y;
                *radius = 0.0;
            }
        }

        self.done.push(std::mem::take(&mut self.current));
        warn!(
            page = self.done.len() + 1,
            "CV content does not fit, continuing on a new page"
        );

        self.y = self.styles.page_padding.top;
        for open in &mut self.open {
            open.index = self.current.len();
            self.current.push(DrawOp::Box {
                rect: Rect::new(open.x, self.y, open.width, 0.0),
                radius: 0.0,
                fill: open.fill,
                border: open.border,
                border_width: self.styles.card_border_width,
            });
            self.y += open.padding;
        }
        self.fresh = true;
    }

    fn open_box(
        &mut self,
        x: f64,
        width: f64,
        padding: f64,
        radius: f64,
        fill: Color,
        border: Option<Color>,
    ) {
        let index = self.current.len();
        self.current.push(DrawOp::Box {
            rect: Rect::new(x, self.y, width, 0.0),
            radius,
            fill,
            border,
            border_width: self.styles.card_border_width,
        });
        self.open.push(OpenBox {
            index,
            x,
            width,
            padding,
            fill,
            border,
        });
        self.y += padding;
    }

    fn close_box(&mut self, margin_bottom: f64) {
        if let Some(open) = self.open.pop() {
            self.y += open.padding;
            if let Some(DrawOp::Box { rect, .. }) = self.current.get_mut(open.index) {
                rect.height = self.y - rect.y;
            }
        }
        self.y += margin_bottom;
    }

    /// Baseline of `font_size` text vertically centered in a line box
    fn baseline(&self, top: f64, line_height: f64, font_size: f32) -> f64 {
        baseline(top, line_height, font_size, self.ascent, self.descent)
    }

    /// Reserve one line; returns its top
    fn place_line(&mut self, line_height: f64) -> f64 {
        self.ensure(line_height);
        let top = self.y;
        self.y += line_height;
        self.fresh = false;
        top
    }

    fn push_text(&mut self, x: f64, baseline: f64, font_size: f32, spans: Vec<TextSpan>, word_spacing: f64) {
        self.current.push(DrawOp::Text(TextRun {
            x,
            baseline,
            font_size,
            word_spacing,
            spans,
        }));
    }

    /// Wrap and place styled text; returns the number of lines
    fn paragraph(
        &mut self,
        spans: &[TextSpan],
        x: f64,
        width: f64,
        font_size: f32,
        line_height: f64,
        flow: Flow,
    ) -> usize {
        let lh = font_size as f64 * line_height;
        let lines = wrap_spans(self.fonts, spans, font_size, width);
        let count = lines.len();

        for (i, line) in lines.into_iter().enumerate() {
            let top = self.place_line(lh);
            let baseline = self.baseline(top, lh, font_size);
            let (line_x, word_spacing) = match flow {
                Flow::Left => (x, 0.0),
                Flow::Center => (x + (width - line.width).max(0.0) / 2.0, 0.0),
                Flow::Justify if i + 1 < count && line.spaces > 0 => {
                    (x, (width - line.width).max(0.0) / line.spaces as f64)
                }
                Flow::Justify => (x, 0.0),
            };
            self.push_text(line_x, baseline, font_size, line.spans, word_spacing);
        }

        count
    }

    fn profile_header(&mut self, cv: &CvData) {
        let s = self.styles;
        let white = Color::white();
        let width = s.content_width();
        let x = self.left() + s.header_padding;
        let inner = width - 2.0 * s.header_padding;

        self.open_box(self.left(), width, s.header_padding, s.header_radius, self.primary, None);

        let name = [TextSpan::new(
            cv.personal_info.name.as_str(),
            FontWeight::Bold,
            white,
        )];
        self.paragraph(&name, x, inner, s.name_size, s.line_height, Flow::Center);
        self.y += s.name_margin_bottom;

        self.headline(&cv.headline, x, inner);
        self.y += s.headline_margin_bottom;

        self.y += s.contact_margin_top;
        self.contact_row(&outline::contact_items(cv), x, inner);

        self.close_box(s.header_margin_bottom);
        self.y += s.main_padding_top;
    }

    /// Headline in a translucent pill sized to its text
    fn headline(&mut self, headline: &str, x: f64, width: f64) {
        let s = self.styles;
        let (pad_v, pad_h) = s.headline_padding;
        let size = s.headline_size;
        let lh = size as f64 * s.line_height;

        let span = [TextSpan::new(headline, FontWeight::Regular, Color::white())];
        let lines: Vec<WrappedLine> = wrap_spans(self.fonts, &span, size, width - 2.0 * pad_h);
        if lines.is_empty() {
            return;
        }

        let text_width = lines.iter().map(|l| l.width).fold(0.0, f64::max);
        let pill_width = (text_width + 2.0 * pad_h).min(width);
        let pill_height = lines.len() as f64 * lh + 2.0 * pad_v;
        self.ensure(pill_height);

        self.current.push(DrawOp::Box {
            rect: Rect::new(x + (width - pill_width) / 2.0, self.y, pill_width, pill_height),
            radius: s.headline_radius,
            fill: self.primary.blend(Color::white(), s.headline_overlay),
            border: None,
            border_width: 0.0,
        });

        self.y += pad_v;
        for line in lines {
            let top = self.place_line(lh);
            let line_x = x + (width - line.width).max(0.0) / 2.0;
            let baseline = self.baseline(top, lh, size);
            self.push_text(line_x, baseline, size, line.spans, 0.0);
        }
        self.y += pad_v;
    }

    /// Centered contact items; the profile link is underlined and clickable
    fn contact_row(&mut self, items: &[ContactItem<'_>], x: f64, width: f64) {
        let s = self.styles;
        let size = s.contact_size;
        let lh = size as f64 * s.line_height;
        let fonts = self.fonts;
        let font = fonts.get_variant(FontWeight::Regular);

        let mut rows: Vec<Vec<(&ContactItem<'_>, f64)>> = Vec::new();
        let mut row_width = 0.0;
        for item in items {
            let item_width = font.text_width_points(item.text, size);
            let fits = !rows.is_empty() && row_width + s.contact_gap + item_width <= width;
            if fits {
                if let Some(row) = rows.last_mut() {
                    row.push((item, item_width));
                }
                row_width += s.contact_gap + item_width;
            } else {
                rows.push(vec![(item, item_width)]);
                row_width = item_width;
            }
        }

        for row in rows {
            let total: f64 = row.iter().map(|(_, w)| w).sum::<f64>()
                + s.contact_gap * (row.len() as f64 - 1.0);
            let mut item_x = x + (width - total).max(0.0) / 2.0;
            let top = self.place_line(lh);
            let baseline = self.baseline(top, lh, size);

            for (item, item_width) in row {
                let span = TextSpan::new(item.text, FontWeight::Regular, Color::white());
                self.push_text(item_x, baseline, size, vec![span], 0.0);

                if let Some(uri) = item.href {
                    let underline_y = baseline + UNDERLINE_OFFSET;
                    self.current.push(DrawOp::Line {
                        from: (item_x, underline_y),
                        to: (item_x + item_width, underline_y),
                        color: Color::white(),
                        width: UNDERLINE_WIDTH,
                    });
                    self.current.push(DrawOp::Link {
                        rect: Rect::new(item_x, top, item_width, lh),
                        uri: uri.to_string(),
                    });
                }

                item_x += item_width + s.contact_gap;
            }
        }
    }

    fn divider(&mut self) {
        let s = self.styles;
        self.y += s.divider_margin;
        self.ensure(s.divider_width);
        let y = self.y + s.divider_width / 2.0;
        self.current.push(DrawOp::Line {
            from: (self.left(), y),
            to: (self.left() + s.content_width(), y),
            color: s.divider_color,
            width: s.divider_width,
        });
        self.y += s.divider_width + s.divider_margin;
    }

    fn section(&mut self, section: &Section<'_>) {
        let s = self.styles;
        let title_lh = s.section_title_size as f64 * s.line_height;
        // Keep the title with the first lines below it
        self.ensure(title_lh + s.section_title_margin_bottom + 2.0 * s.summary_size as f64 * s.line_height);

        let title = [TextSpan::new(
            section.kind().title().to_uppercase(),
            FontWeight::Bold,
            self.primary,
        )];
        self.paragraph(
            &title,
            self.left(),
            s.content_width(),
            s.section_title_size,
            s.line_height,
            Flow::Left,
        );
        self.y += s.section_title_margin_bottom;

        match section {
            Section::Summary(text) => self.summary(text),
            Section::Skills(lines) => self.skills(lines),
            Section::Experience(entries) => {
                for entry in entries {
                    self.company(entry);
                }
            }
        }
    }

    fn summary(&mut self, text: &str) {
        let s = self.styles;
        let span = [TextSpan::new(text, FontWeight::Regular, s.text_color)];
        self.paragraph(
            &span,
            self.left(),
            s.content_width(),
            s.summary_size,
            s.line_height,
            Flow::Justify,
        );
        self.y += s.summary_margin_bottom;
    }

    fn skills(&mut self, lines: &[SkillLine<'_>]) {
        let s = self.styles;
        for line in lines {
            let spans = [
                TextSpan::new(line.label_text(), FontWeight::Bold, s.text_color),
                TextSpan::new(
                    format!(" {}", line.items_text()),
                    FontWeight::Regular,
                    s.text_color,
                ),
            ];
            self.paragraph(
                &spans,
                self.left(),
                s.content_width(),
                s.skill_size,
                s.skill_line_height,
                Flow::Left,
            );
            self.y += s.skill_margin_bottom;
        }
        self.y += s.skills_margin_bottom;
    }

    fn company(&mut self, entry: &CompanyEntry<'_>) {
        let s = self.styles;
        let width = s.content_width();
        let pad = s.company_padding;
        let x = self.left() + pad;
        let inner = width - 2.0 * pad;

        let name_lh = s.company_name_size as f64 * s.line_height;
        let location_lh = s.location_size as f64 * s.line_height;
        let role_title_lh = s.role_title_size as f64 * s.line_height;
        self.ensure(
            pad + name_lh
                + location_lh
                + s.company_header_margin_bottom
                + s.role_padding
                + role_title_lh,
        );

        self.open_box(
            self.left(),
            width,
            pad,
            s.company_radius,
            s.company_fill,
            Some(self.border),
        );

        let name = [TextSpan::new(entry.company, FontWeight::Bold, s.text_color)];
        self.paragraph(&name, x, inner, s.company_name_size, s.line_height, Flow::Left);
        self.y += s.company_name_margin_bottom;

        let mut location = vec![TextSpan::new(
            entry.location,
            FontWeight::Regular,
            s.muted_color,
        )];
        if let Some(tenure) = entry.tenure {
            location.push(TextSpan::new(
                format!(" \u{2022} {tenure}"),
                FontWeight::Bold,
                self.primary,
            ));
        }
        self.paragraph(&location, x, inner, s.location_size, s.line_height, Flow::Left);
        self.y += s.location_margin_bottom + s.company_header_margin_bottom;

        for role in entry.roles {
            self.role(role, x, inner);
        }

        self.close_box(s.company_margin_bottom);
    }

    fn role(&mut self, role: &Role, x: f64, width: f64) {
        let s = self.styles;
        let pad = s.role_padding;
        let inner_x = x + pad;
        let inner = width - 2.0 * pad;

        let title_lh = s.role_title_size as f64 * s.line_height;
        let duration_lh = s.duration_size as f64 * s.line_height;
        self.ensure(pad + title_lh + s.role_title_margin_bottom + duration_lh);

        self.open_box(x, width, pad, s.role_radius, s.role_fill, Some(self.border));

        let title = [TextSpan::new(
            role.title.as_str(),
            FontWeight::Regular,
            s.text_color,
        )];
        self.paragraph(&title, inner_x, inner, s.role_title_size, s.line_height, Flow::Left);
        self.y += s.role_title_margin_bottom;

        let duration = [TextSpan::new(
            role.duration.as_str(),
            FontWeight::Regular,
            s.muted_color,
        )];
        self.paragraph(&duration, inner_x, inner, s.duration_size, s.line_height, Flow::Left);
        self.y += s.duration_margin_bottom;

        let size = s.responsibility_size;
        let lh = size as f64 * s.responsibility_line_height;
        let bullet = TextSpan::new("\u{2022}", FontWeight::Bold, self.primary);
        let indent = bullet.width(self.fonts, size) + s.bullet_gap;

        for item in outline::responsibilities(role) {
            let span = [TextSpan::new(item, FontWeight::Regular, s.text_color)];
            let lines = wrap_spans(self.fonts, &span, size, inner - indent);
            for (i, line) in lines.into_iter().enumerate() {
                let top = self.place_line(lh);
                let baseline = self.baseline(top, lh, size);
                if i == 0 {
                    self.push_text(inner_x, baseline, size, vec![bullet.clone()], 0.0);
                }
                self.push_text(inner_x + indent, baseline, size, line.spans, 0.0);
            }
            self.y += s.responsibility_margin_bottom;
        }

        self.close_box(s.role_margin_bottom);
    }
}

/// Baseline of text vertically centered in a line box
///
/// `ascent` and `descent` are the face's extents as fractions of the size.
fn baseline(top: f64, line_height: f64, font_size: f32, ascent: f64, descent: f64) -> f64 {
    let size = font_size as f64;
    top + (line_height - size * (ascent + descent)) / 2.0 + size * ascent
}
