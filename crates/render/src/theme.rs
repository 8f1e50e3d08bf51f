//! Profile color themes

use cv_data::{CvData, ProfileKey};
use pdf_core::Color;

/// Colors of one profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// `#rrggbb`
    pub primary: &'static str,
    /// `#rrggbb`
    pub secondary: &'static str,
    /// CSS gradient used behind the header card and toolbar
    pub gradient: &'static str,
}

impl Theme {
    pub const FRONTEND: Theme = Theme {
        primary: "#20232A",
        secondary: "#61DAFB",
        gradient: "linear-gradient(135deg, #61DAFB 0%, #20232A 100%)",
    };

    pub const SDET: Theme = Theme {
        primary: "#2D8A47",
        secondary: "#45B358",
        gradient: "linear-gradient(135deg, #2D8A47 0%, #45B358 100%)",
    };

    /// Theme for a CV: frontend when the profile title mentions "Frontend"
    pub fn for_cv(cv: &CvData) -> Theme {
        if cv.profile.contains("Frontend") {
            Theme::FRONTEND
        } else {
            Theme::SDET
        }
    }

    /// Theme associated with a selector entry (used for its color dot)
    pub fn for_key(key: ProfileKey) -> Theme {
        match key {
            ProfileKey::Frontend => Theme::FRONTEND,
            ProfileKey::Sdet => Theme::SDET,
        }
    }

    /// Primary color for PDF drawing
    pub fn primary_color(&self) -> Color {
        Color::from_hex(self.primary).unwrap_or_default()
    }

    /// Primary color with a two-digit hex alpha suffix (`#rrggbbaa`)
    pub fn primary_with_alpha(&self, alpha: u8) -> String {
        format!("{}{alpha:02X}", self.primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_color_parses() {
        assert_eq!(
            Theme::FRONTEND.primary_color(),
            Color::from_rgb(0x20, 0x23, 0x2A)
        );
        assert_eq!(Theme::SDET.primary_color(), Color::from_rgb(0x2D, 0x8A, 0x47));
    }

    #[test]
    fn test_primary_with_alpha() {
        assert_eq!(Theme::SDET.primary_with_alpha(0x20), "#2D8A4720");
    }

    #[test]
    fn test_for_key() {
        assert_eq!(Theme::for_key(ProfileKey::Frontend), Theme::FRONTEND);
        assert_eq!(Theme::for_key(ProfileKey::Sdet), Theme::SDET);
    }
}
