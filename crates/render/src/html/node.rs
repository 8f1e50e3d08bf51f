//! Minimal HTML element tree with escaping

use std::fmt::Write;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A node of an HTML document
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Text content, escaped when rendered
    Text(String),
    /// Markup inserted verbatim (stylesheets, doctype)
    Raw(String),
}

/// An HTML element with ordered attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute; an empty value renders as a bare boolean attribute
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of the descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
            }
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            child.write_to(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl Node {
    /// Serialize to HTML
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_to(out),
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Raw(raw) => out.push_str(raw),
        }
    }

    /// Concatenated text of this node and its descendants (raw markup excluded)
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Element(element) => out.push_str(&element.text_content()),
            Node::Text(text) => out.push_str(text),
            Node::Raw(_) => {}
        }
    }

    /// All elements matching `predicate`, in document order
    pub fn find_all<F>(&self, predicate: F) -> Vec<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut found = Vec::new();
        self.visit(&predicate, &mut found);
        found
    }

    fn visit<'a, F>(&'a self, predicate: &F, found: &mut Vec<&'a Element>)
    where
        F: Fn(&Element) -> bool,
    {
        if let Node::Element(element) = self {
            if predicate(element) {
                found.push(element);
            }
            for child in &element.children {
                child.visit(predicate, found);
            }
        }
    }

    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.find_all(|e| e.has_class(class))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find_all(|e| e.get_attr("id") == Some(id))
            .into_iter()
            .next()
    }
}

/// Escape text content
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value (double quoted)
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_nested() {
        let node: Node = Element::new("p")
            .class("skill-line")
            .child(Element::new("span").text("Languages:"))
            .text(" Go, Rust")
            .into();
        assert_eq!(
            node.render(),
            r#"<p class="skill-line"><span>Languages:</span> Go, Rust</p>"#
        );
        assert_eq!(node.text_content(), "Languages: Go, Rust");
    }

    #[test]
    fn test_escaping() {
        let node: Node = Element::new("a")
            .attr("href", "https://example.com/?a=1&b=\"2\"")
            .text("<R&D>")
            .into();
        assert_eq!(
            node.render(),
            r#"<a href="https://example.com/?a=1&amp;b=&quot;2&quot;">&lt;R&amp;D&gt;</a>"#
        );
    }

    #[test]
    fn test_void_and_boolean_attributes() {
        let node: Node = Element::new("div")
            .child(Element::new("hr").class("divider"))
            .child(Element::new("button").attr("disabled", "").text("Go"))
            .into();
        assert_eq!(
            node.render(),
            r#"<div><hr class="divider"><button disabled>Go</button></div>"#
        );
    }

    #[test]
    fn test_queries() {
        let node: Node = Element::new("div")
            .id("root")
            .child(Element::new("span").class("chip tenure-chip").text("2 years"))
            .child(Node::Raw("<!-- raw -->".into()))
            .into();

        assert!(node.find_by_id("root").is_some());
        let chips = node.find_by_class("tenure-chip");
        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].text_content(), "2 years");
        assert_eq!(node.text_content(), "2 years");
    }
}
