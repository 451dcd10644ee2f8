//! Profile document store. Owns the canonical in-memory document, both
//! settings structures and the navigation state, and mirrors every change into
//! local storage.
//!
//! Persistence is best-effort: a failed write is logged and the in-memory
//! mutation stands. A missing or corrupt slot at load time falls back to that
//! structure's default without affecting the other slots.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::models::{
    Achievement, DisplaySettings, Education, Experience, PersonalInfo, PortfolioSettings,
    ProfessionalSummary, ProfileDocument, Project, Skill,
};
use crate::navigation::{Navigator, Section};
use crate::storage::{
    KeyValueStorage, DARK_MODE_KEY, PORTFOLIO_SETTINGS_KEY, RESUME_DATA_KEY, RESUME_SETTINGS_KEY,
};

pub mod handlers;
pub mod snapshot;

pub use snapshot::{export_json, parse_snapshot, ImportError};

/// A full replacement value for one top-level slice of the document.
/// There is no field-level merge at the store: callers supply the whole slice.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionUpdate {
    PersonalInfo(PersonalInfo),
    Summary(ProfessionalSummary),
    Skills(Vec<Skill>),
    Experience(Vec<Experience>),
    Projects(Vec<Project>),
    Education(Vec<Education>),
    Achievements(Vec<Achievement>),
}

impl SectionUpdate {
    pub fn section(&self) -> Section {
        match self {
            SectionUpdate::PersonalInfo(_) => Section::Personal,
            SectionUpdate::Summary(_) => Section::Summary,
            SectionUpdate::Skills(_) => Section::Skills,
            SectionUpdate::Experience(_) => Section::Experience,
            SectionUpdate::Projects(_) => Section::Projects,
            SectionUpdate::Education(_) => Section::Education,
            SectionUpdate::Achievements(_) => Section::Achievements,
        }
    }

    /// Decodes a JSON slice value for the named section.
    pub fn from_json(section: Section, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match section {
            Section::Personal => SectionUpdate::PersonalInfo(serde_json::from_value(value)?),
            Section::Summary => SectionUpdate::Summary(serde_json::from_value(value)?),
            Section::Skills => SectionUpdate::Skills(serde_json::from_value(value)?),
            Section::Experience => SectionUpdate::Experience(serde_json::from_value(value)?),
            Section::Projects => SectionUpdate::Projects(serde_json::from_value(value)?),
            Section::Education => SectionUpdate::Education(serde_json::from_value(value)?),
            Section::Achievements => SectionUpdate::Achievements(serde_json::from_value(value)?),
        })
    }
}

pub struct ProfileStore {
    storage: Arc<dyn KeyValueStorage>,
    document: ProfileDocument,
    display: DisplaySettings,
    portfolio: PortfolioSettings,
    dark_mode: bool,
    navigator: Navigator,
}

impl ProfileStore {
    /// Loads every slot independently from `storage`.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut document: ProfileDocument = load_slot(storage.as_ref(), RESUME_DATA_KEY);
        let reminted = document.ensure_unique_ids();
        if reminted > 0 {
            warn!("Re-minted {reminted} blank or repeated item ids in stored document");
        }
        let display = load_slot(storage.as_ref(), RESUME_SETTINGS_KEY);
        let portfolio = load_slot(storage.as_ref(), PORTFOLIO_SETTINGS_KEY);
        let dark_mode = load_slot(storage.as_ref(), DARK_MODE_KEY);
        info!("Profile store loaded");

        Self {
            storage,
            document,
            display,
            portfolio,
            dark_mode,
            navigator: Navigator::new(),
        }
    }

    pub fn document(&self) -> &ProfileDocument {
        &self.document
    }

    pub fn display_settings(&self) -> &DisplaySettings {
        &self.display
    }

    pub fn portfolio_settings(&self) -> &PortfolioSettings {
        &self.portfolio
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    /// Replaces one top-level slice and persists the document slot. Blank or
    /// repeated ids in a list slice are re-minted so ids stay unique.
    pub fn update(&mut self, update: SectionUpdate) {
        let section = update.section();
        let doc = &mut self.document;
        match update {
            SectionUpdate::PersonalInfo(v) => doc.personal_info = v,
            SectionUpdate::Summary(v) => doc.professional_summary = v,
            SectionUpdate::Skills(v) => doc.skills = v,
            SectionUpdate::Experience(v) => doc.experience = v,
            SectionUpdate::Projects(v) => doc.projects = v,
            SectionUpdate::Education(v) => doc.education = v,
            SectionUpdate::Achievements(v) => doc.achievements = v,
        }
        let reminted = doc.ensure_unique_ids();
        if reminted > 0 {
            warn!("Re-minted {reminted} item ids in section {:?}", section);
        }
        debug!("Updated section {:?}", section);
        self.persist(RESUME_DATA_KEY, &self.document);
    }

    pub fn update_display_settings(&mut self, settings: DisplaySettings) {
        self.display = settings;
        self.persist(RESUME_SETTINGS_KEY, &self.display);
    }

    pub fn update_portfolio_settings(&mut self, settings: PortfolioSettings) {
        self.portfolio = settings;
        self.persist(PORTFOLIO_SETTINGS_KEY, &self.portfolio);
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.persist(DARK_MODE_KEY, &self.dark_mode);
        self.dark_mode
    }

    /// Restores the hard-coded defaults for all three structures and returns
    /// navigation to the first section. The dark-mode flag is a preference,
    /// not content, and is left alone.
    pub fn reset(&mut self) {
        self.document = ProfileDocument::default();
        self.display = DisplaySettings::default();
        self.portfolio = PortfolioSettings::default();
        self.navigator.reset();
        self.persist(RESUME_DATA_KEY, &self.document);
        self.persist(RESUME_SETTINGS_KEY, &self.display);
        self.persist(PORTFOLIO_SETTINGS_KEY, &self.portfolio);
        info!("Profile store reset to defaults");
    }

    /// The `{resumeData, resumeSettings, portfolioSettings}` snapshot as pretty JSON.
    pub fn export_snapshot(&self) -> serde_json::Result<String> {
        export_json(&self.document, &self.display, &self.portfolio)
    }

    /// Replaces each structure present in `text`. On any parse failure
    /// nothing is applied.
    pub fn import_snapshot(&mut self, text: &str) -> Result<(), ImportError> {
        let payload = parse_snapshot(text)?;

        if let Some(mut document) = payload.resume_data {
            let reminted = document.ensure_unique_ids();
            if reminted > 0 {
                warn!("Re-minted {reminted} blank or repeated item ids in imported document");
            }
            self.document = document;
            self.persist(RESUME_DATA_KEY, &self.document);
        }
        if let Some(display) = payload.resume_settings {
            self.display = display;
            self.persist(RESUME_SETTINGS_KEY, &self.display);
        }
        if let Some(portfolio) = payload.portfolio_settings {
            self.portfolio = portfolio;
            self.persist(PORTFOLIO_SETTINGS_KEY, &self.portfolio);
        }
        info!("Snapshot imported");
        Ok(())
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to serialize slot {key}: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(key, &text) {
            error!("Failed to persist slot {key}, keeping in-memory state: {e}");
        }
    }
}

fn load_slot<T: DeserializeOwned + Default>(storage: &dyn KeyValueStorage, key: &str) -> T {
    match storage.get(key) {
        Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!("Slot {key} is corrupt, using defaults: {e}");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            warn!("Slot {key} could not be read, using defaults: {e}");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FontSize, ItemId, SkillLevel, Template};
    use crate::storage::{MemoryStorage, StorageError};

    /// Storage whose writes always fail, as when the quota is exhausted.
    struct FullStorage;

    impl KeyValueStorage for FullStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded"),
            })
        }
    }

    fn memory_store() -> (Arc<MemoryStorage>, ProfileStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = ProfileStore::load(storage.clone());
        (storage, store)
    }

    fn sample_document() -> ProfileDocument {
        ProfileDocument {
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                title: "Analyst".to_string(),
                email: "ada@example.com".to_string(),
                ..Default::default()
            },
            professional_summary: ProfessionalSummary {
                summary: "Wrote the first program.".to_string(),
            },
            skills: vec![Skill {
                id: ItemId::new("s1"),
                name: "Mathematics".to_string(),
                level: SkillLevel::Expert,
                category: None,
            }],
            experience: vec![Experience {
                id: ItemId::new("e1"),
                company: "Analytical Engine".to_string(),
                position: "Programmer".to_string(),
                start_date: "1842".to_string(),
                current: true,
                highlights: vec!["Note G".to_string(), "Note G".to_string()],
                ..Default::default()
            }],
            education: vec![Education {
                id: ItemId::new("ed1"),
                institution: "Home".to_string(),
                degree: "Tutoring".to_string(),
                gpa: Some(String::new()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_fresh_load_has_defaults() {
        let (_, store) = memory_store();
        assert_eq!(store.document(), &ProfileDocument::default());
        assert_eq!(store.display_settings(), &DisplaySettings::default());
        assert_eq!(store.portfolio_settings(), &PortfolioSettings::default());
        assert!(!store.dark_mode());
        assert_eq!(store.navigator().current(), Section::Personal);
    }

    #[test]
    fn test_corrupt_slot_does_not_block_others() {
        let storage = Arc::new(
            MemoryStorage::new()
                .with_slot(RESUME_DATA_KEY, "{not json")
                .with_slot(RESUME_SETTINGS_KEY, r#"{"template":"minimal","fontSize":"large"}"#)
                .with_slot(DARK_MODE_KEY, "true"),
        );
        let store = ProfileStore::load(storage);
        assert_eq!(store.document(), &ProfileDocument::default());
        assert_eq!(store.display_settings().template, Template::Minimal);
        assert_eq!(store.display_settings().font_size, FontSize::Large);
        assert!(store.dark_mode());
    }

    #[test]
    fn test_update_replaces_slice_and_persists() {
        let (storage, mut store) = memory_store();
        store.update(SectionUpdate::Skills(sample_document().skills));
        assert_eq!(store.document().skills.len(), 1);

        let reloaded = ProfileStore::load(storage);
        assert_eq!(reloaded.document().skills, store.document().skills);
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let mut store = ProfileStore::load(Arc::new(FullStorage));
        store.update(SectionUpdate::Summary(ProfessionalSummary {
            summary: "still here".to_string(),
        }));
        assert_eq!(store.document().professional_summary.summary, "still here");
        assert!(store.toggle_dark_mode());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let (_, mut source) = memory_store();
        source.update(SectionUpdate::PersonalInfo(sample_document().personal_info));
        source.update(SectionUpdate::Summary(sample_document().professional_summary));
        source.update(SectionUpdate::Skills(sample_document().skills));
        source.update(SectionUpdate::Experience(sample_document().experience));
        source.update(SectionUpdate::Education(sample_document().education));
        source.update_display_settings(DisplaySettings {
            template: Template::Creative,
            primary_color: "#e11d48".to_string(),
            font_family: "Georgia".to_string(),
            font_size: FontSize::Small,
        });

        let text = source.export_snapshot().unwrap();
        let (_, mut target) = memory_store();
        target.import_snapshot(&text).unwrap();

        assert_eq!(target.document(), source.document());
        assert_eq!(target.display_settings(), source.display_settings());
        assert_eq!(target.portfolio_settings(), source.portfolio_settings());
        assert_eq!(target.document().education[0].gpa, Some(String::new()));
    }

    #[test]
    fn test_import_not_json_leaves_state_unchanged() {
        let (_, mut store) = memory_store();
        store.update(SectionUpdate::PersonalInfo(sample_document().personal_info));
        let before = store.document().clone();

        assert!(store.import_snapshot("not json").is_err());
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn test_import_with_bad_settings_applies_nothing() {
        let (_, mut store) = memory_store();
        let text = r#"{"resumeData":{"personalInfo":{"fullName":"Mallory"}},"resumeSettings":{"fontSize":"huge"}}"#;
        assert!(store.import_snapshot(text).is_err());
        assert_eq!(store.document().personal_info.full_name, "");
    }

    #[test]
    fn test_import_document_only_keeps_settings() {
        let (_, mut store) = memory_store();
        let custom = PortfolioSettings {
            accent_color: "#123456".to_string(),
            ..Default::default()
        };
        store.update_portfolio_settings(custom.clone());

        store
            .import_snapshot(r#"{"resumeData":{"personalInfo":{"fullName":"Grace"}}}"#)
            .unwrap();
        assert_eq!(store.document().personal_info.full_name, "Grace");
        assert_eq!(store.portfolio_settings(), &custom);
        assert_eq!(store.display_settings(), &DisplaySettings::default());
    }

    #[test]
    fn test_import_with_repeated_ids_keeps_delete_exact() {
        let (_, mut store) = memory_store();
        let text = r#"{"resumeData":{"skills":[
            {"id":"x","name":"A"},{"id":"x","name":"B"},{"name":"C"},{"id":"","name":"D"}
        ]}}"#;
        store.import_snapshot(text).unwrap();

        let skills = &store.document().skills;
        assert_eq!(skills.len(), 4);
        assert_eq!(skills[0].id, ItemId::new("x"));
        let mut ids: Vec<&str> = skills.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert!(!ids.contains(&""));

        crate::editors::delete_item::<Skill>(&mut store, &ItemId::new("x")).unwrap();
        assert_eq!(store.document().skills.len(), 3);
        assert_eq!(store.document().skills[0].name, "B");
    }

    #[test]
    fn test_whole_slice_update_remints_repeated_ids() {
        let (_, mut store) = memory_store();
        let value = serde_json::json!([
            { "id": "e1", "company": "Acme", "position": "Dev" },
            { "id": "e1", "company": "Globex", "position": "Lead" }
        ]);
        store.update(SectionUpdate::from_json(Section::Experience, value).unwrap());

        let list = &store.document().experience;
        assert_eq!(list[0].id, ItemId::new("e1"));
        assert_ne!(list[1].id, list[0].id);

        crate::editors::edit_item(
            &mut store,
            &ItemId::new("e1"),
            Experience {
                company: "Acme 2".to_string(),
                position: "Dev".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(store.document().experience[0].company, "Acme 2");
        assert_eq!(store.document().experience[1].company, "Globex");
    }

    #[test]
    fn test_reset_restores_defaults_and_navigation() {
        let (storage, mut store) = memory_store();
        store.update(SectionUpdate::Experience(sample_document().experience));
        store.update_display_settings(DisplaySettings {
            template: Template::Minimal,
            ..Default::default()
        });
        store.navigator_mut().jump_to(Section::Projects);

        store.reset();
        assert_eq!(store.document(), &ProfileDocument::default());
        assert_eq!(store.display_settings(), &DisplaySettings::default());
        assert_eq!(store.navigator().current(), Section::Personal);

        let reloaded = ProfileStore::load(storage);
        assert!(reloaded.document().experience.is_empty());
    }

    #[test]
    fn test_section_update_from_json() {
        let update = SectionUpdate::from_json(
            Section::Skills,
            serde_json::json!([{"id": "1", "name": "Go", "level": "Expert", "category": ""}]),
        )
        .unwrap();
        assert_eq!(update.section(), Section::Skills);
        assert!(SectionUpdate::from_json(Section::Skills, serde_json::json!({"x": 1})).is_err());
    }
}
