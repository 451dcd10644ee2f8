pub mod document;
pub mod settings;

pub use document::{
    non_blank, Achievement, Education, Experience, Identified, ItemId, PersonalInfo, ProfessionalSummary,
    ProfileDocument, Project, Skill, SkillLevel,
};
pub use settings::{
    DisplaySettings, FontSize, PortfolioSettings, PortfolioTemplate, Template,
    DEFAULT_ACCENT_COLOR, DEFAULT_FONT_FAMILY, DEFAULT_PRIMARY_COLOR,
};
