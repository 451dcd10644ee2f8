use crate::models::{Achievement, Education, Experience, ProfileDocument, Project, Skill};
use crate::navigation::Section;
use crate::store::SectionUpdate;

use super::{EditorDrafts, ListEditor, ListItem};

impl ListItem for Skill {
    const SECTION: Section = Section::Skills;

    fn items(document: &ProfileDocument) -> &[Self] {
        &document.skills
    }
    fn replace_all(items: Vec<Self>) -> SectionUpdate {
        SectionUpdate::Skills(items)
    }
    fn editor(drafts: &mut EditorDrafts) -> &mut ListEditor<Self> {
        &mut drafts.skills
    }
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("name", &self.name)]
    }
}

impl ListItem for Experience {
    const SECTION: Section = Section::Experience;

    fn items(document: &ProfileDocument) -> &[Self] {
        &document.experience
    }
    fn replace_all(items: Vec<Self>) -> SectionUpdate {
        SectionUpdate::Experience(items)
    }
    fn editor(drafts: &mut EditorDrafts) -> &mut ListEditor<Self> {
        &mut drafts.experience
    }
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("company", &self.company), ("position", &self.position)]
    }
    fn bullets_mut(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.highlights)
    }
}

impl ListItem for Project {
    const SECTION: Section = Section::Projects;

    fn items(document: &ProfileDocument) -> &[Self] {
        &document.projects
    }
    fn replace_all(items: Vec<Self>) -> SectionUpdate {
        SectionUpdate::Projects(items)
    }
    fn editor(drafts: &mut EditorDrafts) -> &mut ListEditor<Self> {
        &mut drafts.projects
    }
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("name", &self.name)]
    }
    fn bullets_mut(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.technologies)
    }
}

impl ListItem for Education {
    const SECTION: Section = Section::Education;

    fn items(document: &ProfileDocument) -> &[Self] {
        &document.education
    }
    fn replace_all(items: Vec<Self>) -> SectionUpdate {
        SectionUpdate::Education(items)
    }
    fn editor(drafts: &mut EditorDrafts) -> &mut ListEditor<Self> {
        &mut drafts.education
    }
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("institution", &self.institution), ("degree", &self.degree)]
    }
    fn bullets_mut(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.achievements)
    }
}

impl ListItem for Achievement {
    const SECTION: Section = Section::Achievements;

    fn items(document: &ProfileDocument) -> &[Self] {
        &document.achievements
    }
    fn replace_all(items: Vec<Self>) -> SectionUpdate {
        SectionUpdate::Achievements(items)
    }
    fn editor(drafts: &mut EditorDrafts) -> &mut ListEditor<Self> {
        &mut drafts.achievements
    }
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("title", &self.title)]
    }
}
