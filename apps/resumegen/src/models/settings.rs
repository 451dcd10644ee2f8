use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIMARY_COLOR: &str = "#0891b2";
pub const DEFAULT_ACCENT_COLOR: &str = "#f97316";
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Preview/PDF layout variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Minimal,
    #[default]
    Modern,
    Creative,
    /// No layout of its own; renders with the creative layout.
    Ats,
    /// No layout of its own; renders with the creative layout.
    Tech,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn css_px(self) -> &'static str {
        match self {
            FontSize::Small => "10px",
            FontSize::Medium => "11px",
            FontSize::Large => "12px",
        }
    }
}

/// Template, color and font choices governing on-screen and PDF rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplaySettings {
    pub template: Template,
    pub primary_color: String,
    pub font_family: String,
    pub font_size: FontSize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            template: Template::Modern,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: FontSize::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioTemplate {
    #[default]
    Developer,
    Designer,
    Minimal,
}

impl PortfolioTemplate {
    pub fn as_str(self) -> &'static str {
        match self {
            PortfolioTemplate::Developer => "developer",
            PortfolioTemplate::Designer => "designer",
            PortfolioTemplate::Minimal => "minimal",
        }
    }
}

/// Template and color choices consumed only by the static-site exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioSettings {
    pub template: PortfolioTemplate,
    pub primary_color: String,
    pub accent_color: String,
}

impl Default for PortfolioSettings {
    fn default() -> Self {
        Self {
            template: PortfolioTemplate::Developer,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
        }
    }
}
