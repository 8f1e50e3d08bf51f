//! Absolute style declarations for the PDF layout (points)

use pdf_core::{Color, PageSize};

/// Box insets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Sizes, spacing and fixed colors of the PDF document
///
/// Profile colors come from the theme; everything else is here.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStyles {
    pub page_size: PageSize,
    pub page_padding: Insets,
    pub text_color: Color,
    pub muted_color: Color,

    // Profile header
    pub header_padding: f64,
    pub header_radius: f64,
    pub header_margin_bottom: f64,
    pub name_size: f32,
    pub name_margin_bottom: f64,
    pub headline_size: f32,
    pub headline_padding: (f64, f64),
    pub headline_radius: f64,
    /// Opacity of the white overlay behind the headline
    pub headline_overlay: f32,
    pub headline_margin_bottom: f64,
    pub contact_size: f32,
    pub contact_gap: f64,
    pub contact_margin_top: f64,
    pub main_padding_top: f64,

    // Sections
    pub line_height: f64,
    pub section_title_size: f32,
    pub section_title_margin_bottom: f64,
    pub summary_size: f32,
    pub summary_margin_bottom: f64,
    pub divider_color: Color,
    pub divider_width: f64,
    pub divider_margin: f64,
    pub skill_size: f32,
    pub skill_line_height: f64,
    pub skill_margin_bottom: f64,
    pub skills_margin_bottom: f64,

    // Experience
    pub card_border_width: f64,
    /// Opacity of the primary color used for card borders
    pub card_border_alpha: f32,
    pub company_fill: Color,
    pub company_radius: f64,
    pub company_padding: f64,
    pub company_margin_bottom: f64,
    pub company_name_size: f32,
    pub company_name_margin_bottom: f64,
    pub location_size: f32,
    pub location_margin_bottom: f64,
    pub company_header_margin_bottom: f64,
    pub role_fill: Color,
    pub role_radius: f64,
    pub role_padding: f64,
    pub role_margin_bottom: f64,
    pub role_title_size: f32,
    pub role_title_margin_bottom: f64,
    pub duration_size: f32,
    pub duration_margin_bottom: f64,
    pub bullet_gap: f64,
    pub responsibility_size: f32,
    pub responsibility_line_height: f64,
    pub responsibility_margin_bottom: f64,
}

impl Default for PdfStyles {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            page_padding: Insets::new(25.0, 18.0, 18.0, 18.0),
            text_color: Color::from_rgb(0x33, 0x33, 0x33),
            muted_color: Color::from_rgb(0x66, 0x66, 0x66),

            header_padding: 16.0,
            header_radius: 8.0,
            header_margin_bottom: 8.0,
            name_size: 26.0,
            name_margin_bottom: 8.0,
            headline_size: 14.0,
            headline_padding: (6.0, 12.0),
            headline_radius: 4.0,
            headline_overlay: 0.2,
            headline_margin_bottom: 8.0,
            contact_size: 11.0,
            contact_gap: 12.0,
            contact_margin_top: 8.0,
            main_padding_top: 8.0,

            line_height: 1.4,
            section_title_size: 16.0,
            section_title_margin_bottom: 8.0,
            summary_size: 12.0,
            summary_margin_bottom: 12.0,
            divider_color: Color::from_rgb(0xE0, 0xE0, 0xE0),
            divider_width: 1.0,
            divider_margin: 12.0,
            skill_size: 11.0,
            skill_line_height: 1.3,
            skill_margin_bottom: 6.0,
            skills_margin_bottom: 12.0,

            card_border_width: 1.0,
            card_border_alpha: 0x33 as f32 / 255.0,
            company_fill: Color::from_rgb(0xF8, 0xF9, 0xFA),
            company_radius: 6.0,
            company_padding: 12.0,
            company_margin_bottom: 12.0,
            company_name_size: 14.0,
            company_name_margin_bottom: 4.0,
            location_size: 10.0,
            location_margin_bottom: 2.0,
            company_header_margin_bottom: 8.0,
            role_fill: Color::white(),
            role_radius: 4.0,
            role_padding: 10.0,
            role_margin_bottom: 8.0,
            role_title_size: 12.0,
            role_title_margin_bottom: 4.0,
            duration_size: 10.0,
            duration_margin_bottom: 6.0,
            bullet_gap: 8.0,
            responsibility_size: 10.0,
            responsibility_line_height: 1.3,
            responsibility_margin_bottom: 3.0,
        }
    }
}

impl PdfStyles {
    /// Width available inside the page padding
    pub fn content_width(&self) -> f64 {
        self.page_size.width - self.page_padding.left - self.page_padding.right
    }
}
