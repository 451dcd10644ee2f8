use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a list item. Immutable once minted; never reused after delete.
///
/// Serialized as a bare string so ids written by older exports (creation
/// timestamps) import unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[cfg(test)]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Mints an id that does not collide with any of `existing`.
    pub fn mint<'a>(existing: impl IntoIterator<Item = &'a ItemId> + Clone) -> Self {
        loop {
            let candidate = ItemId(Uuid::new_v4().to_string());
            if !existing.clone().into_iter().any(|id| *id == candidate) {
                return candidate;
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionalSummary {
    pub summary: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }

    /// Width of the proficiency bar, in percent.
    pub fn meter_percent(self) -> u8 {
        match self {
            SkillLevel::Expert => 100,
            SkillLevel::Advanced => 80,
            SkillLevel::Intermediate => 60,
            SkillLevel::Beginner => 40,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: SkillLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub id: ItemId,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub highlights: Vec<String>,
}

impl Experience {
    /// The end of the date range as displayed: "Present" for a current role.
    pub fn display_end(&self) -> &str {
        if self.current {
            "Present"
        } else {
            &self.end_date
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The user's complete editable content: all seven sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileDocument {
    pub personal_info: PersonalInfo,
    pub professional_summary: ProfessionalSummary,
    pub skills: Vec<Skill>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub achievements: Vec<Achievement>,
}

impl ProfileDocument {
    /// Gives every blank or repeated list-item id a fresh one. Returns how
    /// many ids were replaced.
    pub fn ensure_unique_ids(&mut self) -> usize {
        ensure_unique_ids(&mut self.skills)
            + ensure_unique_ids(&mut self.experience)
            + ensure_unique_ids(&mut self.projects)
            + ensure_unique_ids(&mut self.education)
            + ensure_unique_ids(&mut self.achievements)
    }
}

/// A list record addressed by its [`ItemId`].
pub trait Identified {
    fn id(&self) -> &ItemId;
    fn set_id(&mut self, id: ItemId);
}

macro_rules! impl_identified {
    ($($record:ty),+) => {
        $(impl Identified for $record {
            fn id(&self) -> &ItemId {
                &self.id
            }
            fn set_id(&mut self, id: ItemId) {
                self.id = id;
            }
        })+
    };
}

impl_identified!(Skill, Experience, Project, Education, Achievement);

/// Re-mints blank or repeated ids in `items`. The first holder of a repeated
/// id keeps it, so positions and existing references stay valid.
pub fn ensure_unique_ids<T: Identified>(items: &mut [T]) -> usize {
    let original: Vec<ItemId> = items.iter().map(|i| i.id().clone()).collect();
    let mut seen: HashSet<ItemId> = HashSet::with_capacity(items.len());
    let mut replaced = 0;
    for item in items.iter_mut() {
        let id = item.id();
        if id.as_str().trim().is_empty() || seen.contains(id) {
            let fresh = ItemId::mint(seen.iter().chain(original.iter()));
            item.set_id(fresh);
            replaced += 1;
        }
        seen.insert(item.id().clone());
    }
    replaced
}

/// Returns `Some(value)` when the optional text is present and not blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_avoids_existing_ids() {
        let existing = vec![ItemId::new("a"), ItemId::new("b")];
        let id = ItemId::mint(existing.iter());
        assert!(!existing.contains(&id));
        assert!(!id.as_str().is_empty());
    }

    #[test]
    fn test_blank_and_repeated_ids_are_reminted() {
        let skill = |id: &str, name: &str| Skill {
            id: ItemId::new(id),
            name: name.to_string(),
            ..Default::default()
        };
        let mut skills = vec![skill("x", "A"), skill("x", "B"), skill("", "C"), skill("", "D")];

        assert_eq!(ensure_unique_ids(&mut skills), 3);
        assert_eq!(skills[0].id, ItemId::new("x"));
        let ids: HashSet<&ItemId> = skills.iter().map(|s| &s.id).collect();
        assert_eq!(ids.len(), 4);
        assert!(skills.iter().all(|s| !s.id.as_str().is_empty()));
        assert_eq!(skills[1].name, "B");
    }

    #[test]
    fn test_unique_ids_are_left_alone() {
        let mut doc = ProfileDocument {
            achievements: vec![
                Achievement {
                    id: ItemId::new("a1"),
                    ..Default::default()
                },
                Achievement {
                    id: ItemId::new("a2"),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let before = doc.clone();
        assert_eq!(doc.ensure_unique_ids(), 0);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_current_experience_displays_present() {
        let exp = Experience {
            end_date: "2021-06".to_string(),
            current: true,
            ..Default::default()
        };
        assert_eq!(exp.display_end(), "Present");
    }

    #[test]
    fn test_optional_fields_keep_unset_and_empty_distinct() {
        let unset = Education::default();
        let empty = Education {
            gpa: Some(String::new()),
            ..Default::default()
        };
        let unset_json = serde_json::to_value(&unset).unwrap();
        let empty_json = serde_json::to_value(&empty).unwrap();
        assert!(unset_json.get("gpa").is_none());
        assert_eq!(empty_json["gpa"], "");
        let back: Education = serde_json::from_value(empty_json).unwrap();
        assert_eq!(back.gpa, Some(String::new()));
    }

    #[test]
    fn test_legacy_document_with_missing_fields_loads() {
        let json = r#"{"personalInfo":{"fullName":"Ada"},"skills":[{"id":"1712","name":"Go","level":"Expert"}]}"#;
        let doc: ProfileDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.personal_info.full_name, "Ada");
        assert_eq!(doc.skills[0].id, ItemId::new("1712"));
        assert!(doc.experience.is_empty());
    }

    #[test]
    fn test_camel_case_field_names() {
        let json = serde_json::to_value(Project {
            github_url: Some("https://github.com/ada".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["githubUrl"], "https://github.com/ada");
        assert!(json.get("liveUrl").is_none());
    }
}
