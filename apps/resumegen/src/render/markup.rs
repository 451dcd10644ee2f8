//! A small element/text tree and its HTML serializer.
//!
//! Every piece of user text enters the tree as [`Node::Text`] or as an
//! attribute value and is escaped on serialization. [`Node::Raw`] exists only
//! for template-owned markup (doctype, stylesheet bodies).

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Element(Element),
    Text { text: String },
    Raw { html: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(&'static str, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<(&'static str, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        styles: Vec::new(),
        children: Vec::new(),
    }
}

pub fn text(value: impl Into<String>) -> Node {
    Node::Text { text: value.into() }
}

impl Node {
    /// Template-owned markup, emitted verbatim. Never pass user text here.
    pub fn raw(html: impl Into<String>) -> Node {
        Node::Raw { html: html.into() }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_html(out),
            Node::Text { text } => out.push_str(&escape(text)),
            Node::Raw { html } => out.push_str(html),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Element {
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    /// Adds an inline style declaration. The value is reduced to characters
    /// that cannot end the declaration.
    pub fn style(mut self, prop: &'static str, value: impl AsRef<str>) -> Self {
        self.styles.push((prop, css_value(value.as_ref())));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(text(value))
    }

    /// Appends `node` only when it is `Some`.
    pub fn maybe(self, node: Option<impl Into<Node>>) -> Self {
        match node {
            Some(node) => self.child(node),
            None => self,
        }
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push_str(&format!(" {name}=\"{}\"", escape(value)));
        }
        if !self.styles.is_empty() {
            let decls: Vec<String> = self
                .styles
                .iter()
                .map(|(prop, value)| format!("{prop}: {value}"))
                .collect();
            out.push_str(&format!(" style=\"{}\"", escape(&decls.join("; "))));
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// Tree queries used by the template tests.
#[cfg(test)]
impl Node {
    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.children.iter().for_each(|c| c.collect_text(out)),
            Node::Text { text } => out.push_str(text),
            Node::Raw { .. } => {}
        }
    }

    /// Depth-first walk over every element in the tree.
    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_elements(&mut out);
        out
    }

    fn collect_elements<'a>(&'a self, out: &mut Vec<&'a Element>) {
        if let Node::Element(element) = self {
            out.push(element);
            element.children.iter().for_each(|c| c.collect_elements(out));
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.elements().into_iter().find(|e| e.attr("id") == Some(id))
    }

    /// Text of every `h1`..`h3` element, in document order.
    pub fn headings(&self) -> Vec<String> {
        self.elements()
            .into_iter()
            .filter(|e| matches!(e.tag, "h1" | "h2" | "h3"))
            .map(|e| Node::Element(e.clone()).text_content())
            .collect()
    }
}

#[cfg(test)]
impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn style_value(&self, prop: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(k, _)| *k == prop)
            .map(|(_, v)| v.as_str())
    }
}

/// HTML-escapes text for element content and quoted attribute values.
pub fn escape(value: &str) -> String {
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

/// Keeps only characters that can appear in a color, length or font name.
pub fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || " #(),.%-'".contains(*c))
        .collect()
}

/// Returns `value` if it is a plausible CSS color, otherwise `fallback`.
pub fn css_color(value: &str, fallback: &str) -> String {
    let value = value.trim();
    let plausible = !value.is_empty()
        && value.len() <= 64
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "#(),.% ".contains(c));
    if plausible {
        value.to_string()
    } else {
        fallback.to_string()
    }
}

/// Rejects links that would execute script when followed.
pub fn safe_href(url: &str) -> Option<String> {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    let scripted = ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme));
    if url.is_empty() || scripted {
        None
    } else {
        Some(url.to_string())
    }
}
