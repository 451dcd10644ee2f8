//! Section editors: CRUD over one slice of the document each.
//!
//! The five list-backed sections share [`ListEditor`]: an add/edit form with a
//! required-field gate, in-place replacement on edit, delete by id. Personal
//! info and summary are flat records written straight through the store.

use thiserror::Error;

use crate::models::{
    Achievement, Education, Experience, Identified, ItemId, ProfileDocument, Project, Skill,
};
use crate::navigation::Section;
use crate::store::{ProfileStore, SectionUpdate};

pub mod handlers;
pub mod items;
pub mod personal;
pub mod skills;
pub mod summary;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("{section}: '{field}' is required")]
    MissingField {
        section: &'static str,
        field: &'static str,
    },

    #[error("{section}: no item with id '{id}'")]
    UnknownItem { section: &'static str, id: ItemId },

    #[error("{section}: no bullet at index {index}")]
    NoSuchBullet { section: &'static str, index: usize },

    #[error("{section} entries have no bullet list")]
    NoBullets { section: &'static str },
}

/// An entry of one of the list-backed sections.
pub trait ListItem: Identified + Clone + Default + Send + 'static {
    const SECTION: Section;

    fn items(document: &ProfileDocument) -> &[Self];
    fn replace_all(items: Vec<Self>) -> SectionUpdate;

    /// This section's form within the shared set of drafts.
    fn editor(drafts: &mut EditorDrafts) -> &mut ListEditor<Self>;

    /// `(field name, value)` pairs that must be non-empty after trimming.
    fn required_fields(&self) -> Vec<(&'static str, &str)>;

    /// The item's free-form bullet list, if it has one.
    fn bullets_mut(&mut self) -> Option<&mut Vec<String>> {
        None
    }
}

/// Rejects an item whose required fields are missing or whitespace-only.
pub fn validate_required<T: ListItem>(item: &T) -> Result<(), EditorError> {
    match item
        .required_fields()
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
    {
        Some((field, _)) => Err(EditorError::MissingField {
            section: T::SECTION.label(),
            field,
        }),
        None => Ok(()),
    }
}

/// Appends `item` under a freshly minted id.
pub fn add_item<T: ListItem>(store: &mut ProfileStore, mut item: T) -> Result<ItemId, EditorError> {
    validate_required(&item)?;

    let mut items = T::items(store.document()).to_vec();
    let id = ItemId::mint(items.iter().map(|i| i.id()));
    item.set_id(id.clone());
    items.push(item);
    store.update(T::replace_all(items));
    Ok(id)
}

/// Replaces the item with `id` in place. Identity and position are preserved.
pub fn edit_item<T: ListItem>(
    store: &mut ProfileStore,
    id: &ItemId,
    mut item: T,
) -> Result<(), EditorError> {
    validate_required(&item)?;

    let mut items = T::items(store.document()).to_vec();
    let slot = items
        .iter_mut()
        .find(|i| i.id() == id)
        .ok_or_else(|| unknown::<T>(id))?;
    item.set_id(id.clone());
    *slot = item;
    store.update(T::replace_all(items));
    Ok(())
}

/// Removes the one item with `id`; the list shrinks by exactly one.
pub fn delete_item<T: ListItem>(store: &mut ProfileStore, id: &ItemId) -> Result<(), EditorError> {
    let mut items = T::items(store.document()).to_vec();
    let index = items
        .iter()
        .position(|i| i.id() == id)
        .ok_or_else(|| unknown::<T>(id))?;
    items.remove(index);
    store.update(T::replace_all(items));
    Ok(())
}

fn unknown<T: ListItem>(id: &ItemId) -> EditorError {
    EditorError::UnknownItem {
        section: T::SECTION.label(),
        id: id.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    Adding,
    Editing(ItemId),
}

impl EditorMode {
    pub fn label(&self) -> &'static str {
        match self {
            EditorMode::Idle => "idle",
            EditorMode::Adding => "adding",
            EditorMode::Editing(_) => "editing",
        }
    }

    pub fn editing_id(&self) -> Option<&ItemId> {
        match self {
            EditorMode::Editing(id) => Some(id),
            EditorMode::Idle | EditorMode::Adding => None,
        }
    }
}

/// Form state for one list-backed section: the draft being typed and whether
/// it will be added or will replace an existing item.
#[derive(Debug, Clone, Default)]
pub struct ListEditor<T: ListItem> {
    mode: EditorMode,
    draft: T,
}

impl<T: ListItem> ListEditor<T> {
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }

    pub fn begin_add(&mut self) {
        self.draft = T::default();
        self.mode = EditorMode::Adding;
    }

    /// Pre-fills the draft from the stored item.
    pub fn begin_edit(&mut self, store: &ProfileStore, id: &ItemId) -> Result<(), EditorError> {
        let item = T::items(store.document())
            .iter()
            .find(|i| i.id() == id)
            .ok_or_else(|| unknown::<T>(id))?;
        self.draft = item.clone();
        self.mode = EditorMode::Editing(id.clone());
        Ok(())
    }

    /// Appends a trimmed bullet to the draft and reports whether anything
    /// was added. Blank input is ignored; duplicates are allowed.
    pub fn push_bullet(&mut self, text: &str) -> Result<bool, EditorError> {
        let bullets = self.draft.bullets_mut().ok_or(EditorError::NoBullets {
            section: T::SECTION.label(),
        })?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        bullets.push(text.to_string());
        Ok(true)
    }

    pub fn remove_bullet(&mut self, index: usize) -> Result<String, EditorError> {
        match self.draft.bullets_mut() {
            Some(bullets) if index < bullets.len() => Ok(bullets.remove(index)),
            _ => Err(EditorError::NoSuchBullet {
                section: T::SECTION.label(),
                index,
            }),
        }
    }

    /// Commits the draft. On a validation failure the draft and mode are
    /// left untouched so the form stays populated.
    pub fn submit(&mut self, store: &mut ProfileStore) -> Result<ItemId, EditorError> {
        let id = match &self.mode {
            EditorMode::Editing(id) => {
                edit_item(store, id, self.draft.clone())?;
                id.clone()
            }
            EditorMode::Idle | EditorMode::Adding => add_item(store, self.draft.clone())?,
        };
        self.cancel();
        Ok(id)
    }

    pub fn cancel(&mut self) {
        self.draft = T::default();
        self.mode = EditorMode::Idle;
    }

    /// Drops the form if it is editing `id`, which no longer exists.
    pub fn forget(&mut self, id: &ItemId) {
        if self.mode.editing_id() == Some(id) {
            self.cancel();
        }
    }
}

/// One open form per list-backed section.
#[derive(Debug, Default)]
pub struct EditorDrafts {
    skills: ListEditor<Skill>,
    experience: ListEditor<Experience>,
    projects: ListEditor<Project>,
    education: ListEditor<Education>,
    achievements: ListEditor<Achievement>,
}

impl EditorDrafts {
    /// Closes every form.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
