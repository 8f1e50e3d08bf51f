//! Section outline shared by the screen and PDF renderers
//!
//! Both renderers walk the same outline, so section order, category labels
//! and the presence of optional fields are decided once, here. Styling stays
//! with each renderer.

use cv_data::text::humanize_category;
use cv_data::{CvData, Role};

/// Which part of the CV a section holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Skills,
    Experience,
}

impl SectionKind {
    /// Heading as shown on screen
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Summary => "Professional Summary",
            SectionKind::Skills => "Skills & Expertise",
            SectionKind::Experience => "Professional Experience",
        }
    }

    /// Stable identifier used in markup
    pub fn id(self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Skills => "skills",
            SectionKind::Experience => "experience",
        }
    }
}

/// One section in display order
#[derive(Debug, Clone, PartialEq)]
pub enum Section<'a> {
    Summary(&'a str),
    Skills(Vec<SkillLine<'a>>),
    Experience(Vec<CompanyEntry<'a>>),
}

impl Section<'_> {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Summary(_) => SectionKind::Summary,
            Section::Skills(_) => SectionKind::Skills,
            Section::Experience(_) => SectionKind::Experience,
        }
    }
}

/// A skill category rendered as `Label: a, b, c`
#[derive(Debug, Clone, PartialEq)]
pub struct SkillLine<'a> {
    /// Humanized category name, without the colon
    pub label: String,
    pub items: &'a [String],
}

impl SkillLine<'_> {
    /// Bold part of the line, e.g. `Languages:`
    pub fn label_text(&self) -> String {
        format!("{}:", self.label)
    }

    /// Comma separated skills
    pub fn items_text(&self) -> String {
        self.items.join(", ")
    }

    /// Whole line as plain text
    pub fn text(&self) -> String {
        format!("{} {}", self.label_text(), self.items_text())
    }
}

/// An employer entry with its optional tenure resolved
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyEntry<'a> {
    pub company: &'a str,
    pub location: &'a str,
    /// `None` when the data has no (or a blank) tenure; nothing is rendered then
    pub tenure: Option<&'a str>,
    pub roles: &'a [Role],
}

/// A contact row entry
#[derive(Debug, Clone, PartialEq)]
pub struct ContactItem<'a> {
    pub kind: ContactKind,
    pub text: &'a str,
    /// Link target, only for the profile link
    pub href: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    LinkedIn,
}

impl ContactKind {
    pub fn id(self) -> &'static str {
        match self {
            ContactKind::Email => "email",
            ContactKind::Phone => "phone",
            ContactKind::Location => "location",
            ContactKind::LinkedIn => "linkedin",
        }
    }
}

/// Sections of a CV in display order: summary, skills, experience
pub fn sections(cv: &CvData) -> Vec<Section<'_>> {
    let skills = cv
        .skills
        .iter()
        .map(|category| SkillLine {
            label: humanize_category(&category.name),
            items: &category.items,
        })
        .collect();

    let experience = cv
        .experience
        .iter()
        .map(|exp| CompanyEntry {
            company: &exp.company,
            location: &exp.location,
            tenure: exp.tenure(),
            roles: &exp.roles,
        })
        .collect();

    vec![
        Section::Summary(&cv.summary),
        Section::Skills(skills),
        Section::Experience(experience),
    ]
}

/// Contact row: email, phone, location, then the profile link when present
///
/// Items whose text is blank are left out.
pub fn contact_items(cv: &CvData) -> Vec<ContactItem<'_>> {
    let info = &cv.personal_info;
    let mut items = vec![
        ContactItem {
            kind: ContactKind::Email,
            text: &info.contact.email,
            href: None,
        },
        ContactItem {
            kind: ContactKind::Phone,
            text: &info.contact.phone,
            href: None,
        },
        ContactItem {
            kind: ContactKind::Location,
            text: &info.location,
            href: None,
        },
    ];

    let linkedin = info.contact.linkedin.trim();
    if !linkedin.is_empty() {
        items.push(ContactItem {
            kind: ContactKind::LinkedIn,
            text: "LinkedIn Profile",
            href: Some(linkedin),
        });
    }

    items.retain(|item| !item.text.trim().is_empty());
    items
}

/// Responsibilities of a role that have text, in order
pub fn responsibilities(role: &Role) -> Vec<&str> {
    role.responsibilities
        .iter()
        .map(String::as_str)
        .filter(|item| !item.trim().is_empty())
        .collect()
}
