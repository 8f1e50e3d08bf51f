//! Page stylesheet: screen rules plus `@media print` overrides
//!
//! Colors come from CSS custom properties set on the header and the CV
//! container, see [`theme_properties`].

use crate::Theme;

const SCREEN_RULES: &str = r#"
* { box-sizing: border-box; }
body {
  margin: 0;
  min-height: 100vh;
  font-family: "Rubik", "Roboto", "Helvetica", "Arial", sans-serif;
  color: #20232A;
  background: linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%);
}
.app-header {
  position: sticky;
  top: 0;
  z-index: 1000;
  display: flex;
  flex-wrap: wrap;
  align-items: center;
  justify-content: center;
  gap: 16px;
  min-height: 60px;
  padding: 8px 16px;
  margin-bottom: 16px;
  background: var(--cv-gradient);
  box-shadow: 0 2px 8px rgba(0,0,0,0.1);
}
.profile-picker {
  display: flex;
  align-items: center;
  gap: 8px;
  min-width: 180px;
  height: 40px;
  padding: 0 12px;
  border: 1px solid rgba(255,255,255,0.3);
  border-radius: 8px;
  background-color: rgba(255,255,255,0.2);
}
.profile-dot {
  width: 10px;
  height: 10px;
  border-radius: 50%;
  flex-shrink: 0;
}
.profile-select {
  flex: 1;
  border: none;
  background: transparent;
  color: white;
  font-size: 0.9rem;
  font-weight: 500;
}
.profile-select option { color: #333; }
.header-button {
  min-width: 120px;
  height: 40px;
  padding: 0 20px;
  border: 1px solid rgba(255,255,255,0.3);
  border-radius: 12px;
  background-color: rgba(255,255,255,0.2);
  color: white;
  font-size: 0.9rem;
  font-weight: 500;
  cursor: pointer;
  transition: all 0.3s ease;
}
.header-button:hover {
  background-color: rgba(255,255,255,0.3);
  transform: translateY(-1px);
  box-shadow: 0 4px 12px rgba(0,0,0,0.15);
}
.header-button:disabled {
  background-color: rgba(255,255,255,0.1);
  color: rgba(255,255,255,0.5);
  cursor: default;
}
.page-container { padding: 32px 24px; }
.cv { max-width: 100%; margin: 0 auto; padding: 0 16px; }
.profile-header {
  margin-bottom: 16px;
  padding: 24px;
  border-radius: 16px;
  overflow: hidden;
  text-align: center;
  color: white;
  background: var(--cv-gradient);
}
.profile-name { margin: 0 0 0.35em; font-size: 3rem; font-weight: 700; }
.headline-chip {
  display: inline-block;
  padding: 8px 16px;
  border-radius: 8px;
  background-color: rgba(255,255,255,0.2);
  font-size: 0.9rem;
  font-weight: 500;
}
.contact-row {
  display: flex;
  flex-wrap: wrap;
  justify-content: center;
  gap: 16px;
  margin-top: 24px;
  font-size: 0.875rem;
}
.contact-item { color: white; }
a.contact-item { text-decoration: none; }
a.contact-item:hover { text-decoration: underline; }
.content-card {
  border: 1px solid #e0e0e0;
  border-radius: 16px;
  overflow: hidden;
  padding: 24px;
  background: white;
}
.section-title {
  margin: 0 0 16px;
  font-size: 1.25rem;
  font-weight: 600;
  color: var(--cv-primary);
}
.summary { margin: 0 0 24px; font-size: 1rem; line-height: 1.6; color: #333; }
.divider { margin: 0 0 24px; border: none; border-top: 1px solid #e0e0e0; }
.skills { display: flex; flex-direction: column; gap: 16px; margin-bottom: 24px; }
.skill-line { margin: 0; font-size: 0.9rem; line-height: 1.5; color: #333; }
.skill-label { font-weight: 600; }
.experience { margin-bottom: 24px; }
.company { margin-bottom: 24px; }
.company:last-child { margin-bottom: 0; }
.company-name { margin: 0; font-size: 1rem; font-weight: 600; color: var(--cv-primary); opacity: 0.8; }
.company-location { margin: 0 0 8px; font-size: 0.875rem; color: #4a5568; }
.tenure-chip {
  display: inline-block;
  margin-left: 8px;
  padding: 2px 8px;
  border-radius: 8px;
  font-size: 0.8125rem;
  background-color: var(--cv-primary-tint);
  color: var(--cv-primary);
}
.role {
  margin-bottom: 16px;
  padding: 12px;
  border: 1px solid var(--cv-primary-border);
  border-radius: 4px;
  background-color: #f8f9fa;
}
.role:last-child { margin-bottom: 0; }
.role-title { margin: 0; font-size: 0.875rem; font-weight: 600; color: #333; }
.role-duration { margin: 0 0 8px; font-size: 0.875rem; color: #4a5568; }
.responsibilities { margin: 0; padding: 0; list-style: none; }
.responsibility {
  display: flex;
  align-items: flex-start;
  gap: 8px;
  margin-bottom: 4px;
  font-size: 0.875rem;
  line-height: 1.4;
}
.bullet {
  width: 4px;
  height: 4px;
  margin-top: 0.5em;
  border-radius: 50%;
  flex-shrink: 0;
  background-color: var(--cv-primary);
}
"#;

const PRINT_RULES: &str = r#"
@page {
  size: A4;
  margin: 0.1in 0.15in 0.15in;
}
@media print {
  .no-print { display: none !important; }
  body {
    background: white;
    print-color-adjust: exact;
    -webkit-print-color-adjust: exact;
  }
  body * { visibility: hidden; }
  #cv-content-to-print, #cv-content-to-print * { visibility: visible; }
  #cv-content-to-print {
    position: absolute;
    left: 0;
    top: 0;
    width: 100%;
    background: white !important;
  }
  .page-container { padding: 0; max-width: none; }
  .cv { max-width: none; padding: 0; margin: 0; }
  .profile-header { margin: 8px 0; padding: 16px; border-radius: 0; box-shadow: none; }
  .profile-name { font-size: 1.8rem; margin-bottom: 8px; }
  .contact-row { margin-top: 8px; gap: 8px; font-size: 0.8rem; }
  .content-card { border: none; border-radius: 0; box-shadow: none; padding: 8px; }
  .section-title { font-size: 1rem; margin-bottom: 8px; }
  .summary { font-size: 0.85rem; line-height: 1.4; margin-bottom: 12px; }
  .divider { margin-bottom: 12px; }
  .skills { margin-bottom: 12px; }
  .skill-line { font-size: 0.8rem; line-height: 1.3; }
  .experience { margin-bottom: 0; }
  .company { margin-bottom: 12px; }
  .company-name { font-size: 0.9rem; }
  .company-location { font-size: 0.75rem; margin-bottom: 4px; }
  .tenure-chip { font-size: 0.65rem; padding: 1px 4px; }
  .role { margin-bottom: 8px; padding: 4px; border: none; border-radius: 0; background-color: transparent; }
  .role-title { font-size: 0.8rem; }
  .role-duration { font-size: 0.7rem; margin-bottom: 4px; }
  .responsibility { gap: 4px; font-size: 0.75rem; line-height: 1.2; }
  .bullet { width: 3px; height: 3px; margin-top: 0.3em; }
}
"#;

/// Full stylesheet for the page
pub fn stylesheet() -> String {
    format!("{SCREEN_RULES}{PRINT_RULES}")
}

/// Inline `style` value declaring the theme's custom properties
pub fn theme_properties(theme: &Theme) -> String {
    format!(
        "--cv-primary: {}; --cv-secondary: {}; --cv-gradient: {}; --cv-primary-tint: {}; --cv-primary-border: {}",
        theme.primary,
        theme.secondary,
        theme.gradient,
        theme.primary_with_alpha(0x10),
        theme.primary_with_alpha(0x20),
    )
}
