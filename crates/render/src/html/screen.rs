//! Screen renderer: CV data to HTML

use super::node::{Element, Node};
use super::stylesheet::{stylesheet, theme_properties};
use crate::outline::{self, CompanyEntry, Section, SkillLine};
use crate::Theme;
use cv_data::{CvData, ProfileKey, Role};

/// State of the header toolbar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderState {
    /// Profile shown as selected
    pub selected: ProfileKey,
    /// A PDF is being generated; the download button is disabled
    pub generating: bool,
}

impl HeaderState {
    pub fn new(selected: ProfileKey) -> Self {
        Self {
            selected,
            generating: false,
        }
    }

    /// Label of the download button
    pub fn download_label(&self) -> &'static str {
        if self.generating {
            "Generating..."
        } else {
            "Download PDF"
        }
    }
}

/// Projects [`CvData`] into HTML
///
/// The same markup serves the screen and print layouts; the stylesheet's
/// `@media print` block switches between them.
#[derive(Debug, Clone, Default)]
pub struct ScreenRenderer;

impl ScreenRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Full HTML document: head, header toolbar and CV content
    pub fn render_page(&self, cv: &CvData, header: &HeaderState) -> String {
        let head = Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(
                Element::new("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=device-width, initial-scale=1"),
            )
            .child(Element::new("title").text(page_title(cv)))
            .child(
                Element::new("meta")
                    .attr("name", "description")
                    .attr("content", "Professional CV Portfolio with PDF export functionality"),
            )
            .child(Element::new("style").child(Node::Raw(stylesheet())));

        let body = Element::new("body")
            .child(self.render_header(cv, header))
            .child(self.page_container(cv));

        let html: Node = Element::new("html")
            .attr("lang", "en")
            .child(head)
            .child(body)
            .into();

        format!("<!DOCTYPE html>\n{}\n", html.render())
    }

    /// Fragment for mounting into an existing page: stylesheet, header
    /// toolbar and CV content
    pub fn render_app(&self, cv: &CvData, header: &HeaderState) -> Node {
        Element::new("div")
            .class("cv-app")
            .child(Element::new("style").child(Node::Raw(stylesheet())))
            .child(self.render_header(cv, header))
            .child(self.page_container(cv))
            .into()
    }

    fn page_container(&self, cv: &CvData) -> Element {
        Element::new("main")
            .class("page-container")
            .child(self.render_cv(cv))
    }

    /// Header toolbar (hidden when printing)
    pub fn render_header(&self, cv: &CvData, state: &HeaderState) -> Node {
        let theme = Theme::for_cv(cv);

        let options = ProfileKey::ALL.into_iter().map(|key| {
            let mut option = Element::new("option")
                .attr("value", key.as_str())
                .attr("data-color", Theme::for_key(key).primary);
            if key == state.selected {
                option = option.attr("selected", "");
            }
            option.text(key.label())
        });

        let picker = Element::new("div")
            .class("profile-picker")
            .child(
                Element::new("span")
                    .class("profile-dot")
                    .attr(
                        "style",
                        format!(
                            "background-color: {}",
                            Theme::for_key(state.selected).primary
                        ),
                    ),
            )
            .child(
                Element::new("select")
                    .id("profile-select")
                    .class("profile-select")
                    .attr("aria-label", "Profile")
                    .children(options),
            );

        let mut download = Element::new("button")
            .id("download-pdf")
            .class("header-button")
            .attr("type", "button");
        if state.generating {
            download = download.attr("disabled", "");
        }

        Element::new("header")
            .class("app-header no-print")
            .attr("style", theme_properties(&theme))
            .child(picker)
            .child(
                Element::new("button")
                    .id("print-resume")
                    .class("header-button")
                    .attr("type", "button")
                    .text("Print Resume"),
            )
            .child(download.text(state.download_label()))
            .into()
    }

    /// The printable CV: `#cv-content-to-print` with the profile header and content card
    pub fn render_cv(&self, cv: &CvData) -> Node {
        let theme = Theme::for_cv(cv);

        let mut content = Element::new("section").class("content-card");
        for (i, section) in outline::sections(cv).iter().enumerate() {
            if i > 0 {
                content = content.child(Element::new("hr").class("divider"));
            }
            content = content.child(render_section(section));
        }

        Element::new("div")
            .id("cv-content-to-print")
            .attr("style", theme_properties(&theme))
            .child(
                Element::new("div")
                    .class("cv")
                    .child(render_profile_header(cv))
                    .child(content),
            )
            .into()
    }
}

/// Document title
pub fn page_title(cv: &CvData) -> String {
    format!("CV Portfolio - {}", cv.personal_info.name)
}

fn render_profile_header(cv: &CvData) -> Element {
    let contacts = outline::contact_items(cv).into_iter().map(|item| {
        let class = format!("contact-item contact-{}", item.kind.id());
        match item.href {
            Some(href) => Element::new("a")
                .class(class)
                .attr("href", href)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .text(item.text),
            None => Element::new("span").class(class).text(item.text),
        }
    });

    Element::new("section")
        .class("profile-header")
        .child(
            Element::new("h1")
                .class("profile-name")
                .text(cv.personal_info.name.as_str()),
        )
        .child(
            Element::new("span")
                .class("headline-chip")
                .text(cv.headline.as_str()),
        )
        .child(Element::new("div").class("contact-row").children(contacts))
}

fn render_section(section: &Section<'_>) -> Element {
    let kind = section.kind();
    let container = Element::new("div")
        .class("cv-section")
        .attr("data-section", kind.id())
        .child(Element::new("h2").class("section-title").text(kind.title()));

    match section {
        Section::Summary(summary) => {
            container.child(Element::new("p").class("summary").text(*summary))
        }
        Section::Skills(lines) => container.child(
            Element::new("div")
                .class("skills")
                .children(lines.iter().map(render_skill_line)),
        ),
        Section::Experience(entries) => container.child(
            Element::new("div")
                .class("experience")
                .children(entries.iter().map(render_company)),
        ),
    }
}

fn render_skill_line(line: &SkillLine<'_>) -> Element {
    Element::new("p")
        .class("skill-line")
        .child(
            Element::new("span")
                .class("skill-label")
                .text(line.label_text()),
        )
        .text(format!(" {}", line.items_text()))
}

fn render_company(entry: &CompanyEntry<'_>) -> Element {
    let mut location = Element::new("p")
        .class("company-location")
        .text(entry.location);
    if let Some(tenure) = entry.tenure {
        location = location.child(Element::new("span").class("tenure-chip").text(tenure));
    }

    Element::new("div")
        .class("company")
        .child(Element::new("h3").class("company-name").text(entry.company))
        .child(location)
        .children(entry.roles.iter().map(render_role))
}

fn render_role(role: &Role) -> Element {
    let items = outline::responsibilities(role).into_iter().map(|item| {
        Element::new("li")
            .class("responsibility")
            .child(Element::new("span").class("bullet").attr("aria-hidden", "true"))
            .child(Element::new("span").text(item))
    });

    Element::new("div")
        .class("role")
        .child(Element::new("h4").class("role-title").text(role.title.as_str()))
        .child(
            Element::new("p")
                .class("role-duration")
                .text(role.duration.as_str()),
        )
        .child(Element::new("ul").class("responsibilities").children(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_download_label() {
        let mut state = HeaderState::new(ProfileKey::Sdet);
        assert_eq!(state.download_label(), "Download PDF");
        state.generating = true;
        assert_eq!(state.download_label(), "Generating...");
    }

    #[test]
    fn test_header_state_default() {
        let state = HeaderState::default();
        assert_eq!(state.selected, ProfileKey::Frontend);
        assert!(!state.generating);
    }
}
