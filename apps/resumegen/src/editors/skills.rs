use serde::Serialize;

use crate::models::Skill;

pub const OTHER_CATEGORY: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGroup<'a> {
    pub category: &'a str,
    pub skills: Vec<&'a Skill>,
}

/// Partitions skills by category. Missing or blank categories fall into
/// "Other". Groups appear in first-seen order; skills keep insertion order
/// within their group.
pub fn group_skills(skills: &[Skill]) -> Vec<SkillGroup<'_>> {
    let mut groups: Vec<SkillGroup<'_>> = Vec::new();
    for skill in skills {
        let category = skill
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(OTHER_CATEGORY);
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.skills.push(skill),
            None => groups.push(SkillGroup {
                category,
                skills: vec![skill],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemId, SkillLevel};

    fn skill(id: &str, name: &str, category: Option<&str>) -> Skill {
        Skill {
            id: ItemId::new(id),
            name: name.to_string(),
            level: SkillLevel::Intermediate,
            category: category.map(String::from),
        }
    }

    #[test]
    fn test_empty_category_goes_to_other() {
        let skills = vec![Skill {
            level: SkillLevel::Expert,
            ..skill("1", "Go", Some(""))
        }];
        let groups = group_skills(&skills);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "Other");
        assert_eq!(groups[0].skills, vec![&skills[0]]);
    }

    #[test]
    fn test_first_seen_group_order_and_insertion_order() {
        let skills = vec![
            skill("1", "Rust", Some("Programming Languages")),
            skill("2", "Leadership", None),
            skill("3", "Go", Some("Programming Languages")),
            skill("4", "Docker", Some("Tools & Platforms")),
            skill("5", "Mentoring", Some("  ")),
        ];
        let groups = group_skills(&skills);
        let categories: Vec<_> = groups.iter().map(|g| g.category).collect();
        assert_eq!(
            categories,
            vec!["Programming Languages", "Other", "Tools & Platforms"]
        );
        let names: Vec<_> = groups[0].skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Go"]);
        assert_eq!(groups[1].skills.len(), 2);
    }

    #[test]
    fn test_no_skills_no_groups() {
        assert!(group_skills(&[]).is_empty());
    }
}
