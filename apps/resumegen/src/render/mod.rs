//! Render/Preview Engine.
//!
//! `render` is a pure function of the document and display settings; the
//! same tree backs the live preview, the standalone preview page and the
//! PDF export.

use crate::models::{
    DisplaySettings, PersonalInfo, ProfileDocument, Template, DEFAULT_FONT_FAMILY,
    DEFAULT_PRIMARY_COLOR,
};

pub mod creative;
pub mod handlers;
pub mod markup;
pub mod minimal;
pub mod modern;

use markup::{css_color, el, Element, Node};

/// Element handle the builder page mounts the preview under.
pub const PREVIEW_ELEMENT_ID: &str = "resume-preview";

pub const NAME_PLACEHOLDER: &str = "Your Name";
pub const TITLE_PLACEHOLDER: &str = "Professional Title";

/// Resolved visual parameters shared by every template.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: String,
    pub font_family: String,
    pub font_size: &'static str,
}

impl Theme {
    pub fn from_settings(settings: &DisplaySettings) -> Self {
        let font: String = settings
            .font_family
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '-')
            .collect();
        let font = font.trim();
        Self {
            primary: css_color(&settings.primary_color, DEFAULT_PRIMARY_COLOR),
            font_family: if font.is_empty() {
                DEFAULT_FONT_FAMILY.to_string()
            } else {
                font.to_string()
            },
            font_size: settings.font_size.css_px(),
        }
    }

    /// The root block of a template, carrying font family and size.
    pub fn root(&self, template: &str) -> Element {
        el("div")
            .class(format!("resume template-{template}"))
            .style("font-family", format!("{}, sans-serif", self.font_family))
            .style("font-size", self.font_size)
            .style("background", "#ffffff")
            .style("color", "#1e293b")
    }

    /// Section heading in the primary color.
    pub fn heading(&self, label: &str) -> Element {
        el("h2").style("color", &self.primary).text(label)
    }
}

pub fn render(document: &ProfileDocument, settings: &DisplaySettings) -> Node {
    let theme = Theme::from_settings(settings);
    let tree = match settings.template {
        Template::Modern => modern::render(document, &theme),
        Template::Minimal => minimal::render(document, &theme),
        Template::Creative | Template::Ats | Template::Tech => creative::render(document, &theme),
    };
    tree.into()
}

/// Wraps a rendered tree in a complete HTML page.
pub fn standalone_page(tree: &Node, title: &str) -> String {
    let page: Node = el("html")
        .with_attr("lang", "en")
        .child(
            el("head")
                .child(el("meta").with_attr("charset", "UTF-8"))
                .child(el("title").text(title))
                .child(Node::raw(
                    "<style>body{margin:0}h1,h2,h3,p,ul{margin:0 0 6px}ul{padding-left:16px}\
                     section{margin-bottom:18px}</style>",
                )),
        )
        .child(el("body").child(el("div").id(PREVIEW_ELEMENT_ID).child(tree.clone())))
        .into();
    format!("<!DOCTYPE html>\n{}", page.to_html())
}

pub fn display_name(info: &PersonalInfo) -> &str {
    non_empty(&info.full_name).unwrap_or(NAME_PLACEHOLDER)
}

pub fn display_title(info: &PersonalInfo) -> &str {
    non_empty(&info.title).unwrap_or(TITLE_PLACEHOLDER)
}

/// Contact fields that are set, in display order.
pub fn contact_items(info: &PersonalInfo) -> Vec<&str> {
    [
        &info.email,
        &info.phone,
        &info.location,
        &info.website,
        &info.linkedin,
        &info.github,
    ]
    .into_iter()
    .filter_map(|v| non_empty(v))
    .collect()
}

/// "start - end", collapsing whichever side is missing.
pub fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (start, "") => start.to_string(),
        ("", end) => end.to_string(),
        (start, end) => format!("{start} - {end}"),
    }
}

/// "Degree in Field", or just the degree when no field is given.
pub fn degree_line(degree: &str, field: &str) -> String {
    match field.trim() {
        "" => degree.to_string(),
        field => format!("{degree} in {field}"),
    }
}

pub(crate) fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
