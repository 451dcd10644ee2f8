//! Navigation controller: the fixed, linear order of builder sections and
//! per-section completion derived from the document.
//!
//! Completion is display-only: it never gates navigation or export.

use serde::{Deserialize, Serialize};

use crate::models::ProfileDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Personal,
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
    Achievements,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Personal,
        Section::Summary,
        Section::Skills,
        Section::Experience,
        Section::Projects,
        Section::Education,
        Section::Achievements,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Personal => "Personal Info",
            Section::Summary => "Summary",
            Section::Skills => "Skills",
            Section::Experience => "Experience",
            Section::Projects => "Projects",
            Section::Education => "Education",
            Section::Achievements => "Achievements",
        }
    }

    pub fn index(self) -> usize {
        Section::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    pub fn is_first(self) -> bool {
        self.index() == 0
    }

    pub fn is_last(self) -> bool {
        self.index() == Section::ALL.len() - 1
    }
}

/// Whether a section has content. Personal needs a name, summary needs text,
/// list sections need at least one item.
pub fn is_complete(document: &ProfileDocument, section: Section) -> bool {
    match section {
        Section::Personal => !document.personal_info.full_name.is_empty(),
        Section::Summary => !document.professional_summary.summary.is_empty(),
        Section::Skills => !document.skills.is_empty(),
        Section::Experience => !document.experience.is_empty(),
        Section::Projects => !document.projects.is_empty(),
        Section::Education => !document.education.is_empty(),
        Section::Achievements => !document.achievements.is_empty(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Current,
    Complete,
    Incomplete,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub section: Section,
    pub label: &'static str,
    pub status: StepStatus,
    /// "Step N of 7".
    pub position: String,
}

/// Tracks the active section. Not persisted; a fresh load starts at
/// [`Section::Personal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    current: usize,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Section {
        Section::ALL[self.current]
    }

    /// Moves forward one section. Returns `false` (and stays put) on the last.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < Section::ALL.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Moves back one section. Returns `false` (and stays put) on the first.
    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Moves directly to any section, regardless of skipped sections' completion.
    pub fn jump_to(&mut self, section: Section) {
        self.current = section.index();
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn status_of(&self, document: &ProfileDocument, section: Section) -> StepStatus {
        if section == self.current() {
            StepStatus::Current
        } else if is_complete(document, section) {
            StepStatus::Complete
        } else {
            StepStatus::Incomplete
        }
    }

    pub fn steps(&self, document: &ProfileDocument) -> Vec<StepView> {
        Section::ALL
            .iter()
            .enumerate()
            .map(|(i, &section)| StepView {
                section,
                label: section.label(),
                status: self.status_of(document, section),
                position: format!("Step {} of {}", i + 1, Section::ALL.len()),
            })
            .collect()
    }
}
