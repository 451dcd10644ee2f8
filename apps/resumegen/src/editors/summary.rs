use serde::{Deserialize, Serialize};

use crate::models::ProfessionalSummary;
use crate::store::{ProfileStore, SectionUpdate};

/// Soft cap on the summary. Exceeding it is reported, never blocked.
pub const SUMMARY_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryLimit {
    Within,
    /// More than 80% of the cap.
    Near,
    Over,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryStatus {
    pub characters: usize,
    pub max: usize,
    pub limit: SummaryLimit,
}

pub fn summary_status(text: &str) -> SummaryStatus {
    let characters = text.chars().count();
    let limit = if characters > SUMMARY_MAX_CHARS {
        SummaryLimit::Over
    } else if characters * 5 > SUMMARY_MAX_CHARS * 4 {
        SummaryLimit::Near
    } else {
        SummaryLimit::Within
    };
    SummaryStatus {
        characters,
        max: SUMMARY_MAX_CHARS,
        limit,
    }
}

/// Starter summaries offered next to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryExample {
    SoftwareEngineer,
    ProductDesigner,
    DataAnalyst,
}

impl SummaryExample {
    pub fn text(self) -> &'static str {
        match self {
            SummaryExample::SoftwareEngineer => "Results-driven software engineer with 5+ years of experience building scalable web applications. Expertise in React, Node.js, and cloud technologies. Led a team that increased platform performance by 40% and reduced deployment time by 60%.",
            SummaryExample::ProductDesigner => "Creative product designer with 4+ years of experience crafting intuitive digital experiences. Skilled in user research, prototyping, and design systems. Successfully redesigned flagship product resulting in 25% increase in user engagement.",
            SummaryExample::DataAnalyst => "Data analyst with expertise in transforming complex datasets into actionable business insights. Proficient in Python, SQL, and Tableau. Developed predictive models that saved the company $2M annually in operational costs.",
        }
    }
}

/// Writes the summary through the store and reports the counter state.
pub fn set_summary(store: &mut ProfileStore, text: &str) -> SummaryStatus {
    store.update(SectionUpdate::Summary(ProfessionalSummary {
        summary: text.to_string(),
    }));
    summary_status(text)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_limits_at_boundaries() {
        assert_eq!(summary_status(&"a".repeat(100)).limit, SummaryLimit::Within);
        assert_eq!(summary_status(&"a".repeat(400)).limit, SummaryLimit::Within);
        assert_eq!(summary_status(&"a".repeat(401)).limit, SummaryLimit::Near);
        assert_eq!(summary_status(&"a".repeat(500)).limit, SummaryLimit::Near);
        assert_eq!(summary_status(&"a".repeat(501)).limit, SummaryLimit::Over);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(summary_status("é".repeat(450).as_str()).characters, 450);
        assert_eq!(summary_status(&"é".repeat(450)).limit, SummaryLimit::Near);
    }

    #[test]
    fn test_over_limit_is_still_stored() {
        let mut store = ProfileStore::load(Arc::new(MemoryStorage::new()));
        let long = "x".repeat(501);
        let status = set_summary(&mut store, &long);
        assert_eq!(status.limit, SummaryLimit::Over);
        assert_eq!(store.document().professional_summary.summary, long);
    }

    #[test]
    fn test_examples_fit_under_cap() {
        for example in [
            SummaryExample::SoftwareEngineer,
            SummaryExample::ProductDesigner,
            SummaryExample::DataAnalyst,
        ] {
            assert_eq!(summary_status(example.text()).limit, SummaryLimit::Within);
        }
    }
}
