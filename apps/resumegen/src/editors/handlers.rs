use anyhow::anyhow;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::editors::personal::{set_field, PersonalField};
use crate::editors::skills::group_skills;
use crate::editors::summary::{set_summary, SummaryExample, SummaryStatus};
use crate::editors::{add_item, delete_item, edit_item, EditorMode, ListEditor, ListItem};
use crate::errors::{AppError, AppJson};
use crate::models::{ItemId, PersonalInfo, Skill};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FieldValue {
    pub value: String,
}

#[derive(Deserialize)]
pub struct SummaryRequest {
    pub summary: String,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub status: SummaryStatus,
}

#[derive(Serialize)]
pub struct SkillGroupView {
    pub category: String,
    pub skills: Vec<Skill>,
}

/// Trims bullet entries and drops blank ones, as the form's add-one control does.
fn tidy_bullets<T: ListItem>(item: &mut T) {
    if let Some(bullets) = item.bullets_mut() {
        *bullets = bullets
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect();
    }
}

fn stored<T: ListItem>(items: &[T], id: &ItemId) -> Result<T, AppError> {
    items
        .iter()
        .find(|i| i.id() == id)
        .cloned()
        .ok_or_else(|| AppError::Internal(anyhow!("item '{id}' missing after write")))
}

// ────────────────────────────────────────────────────────────────────────────
// List-backed sections
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/{skills|experience|projects|education|achievements}
/// Any `id` in the body is ignored; a fresh one is minted.
pub async fn handle_add_item<T>(
    State(state): State<AppState>,
    AppJson(mut item): AppJson<T>,
) -> Result<(StatusCode, Json<T>), AppError>
where
    T: ListItem + Serialize + DeserializeOwned,
{
    tidy_bullets(&mut item);
    let mut store = state.store.lock().await;
    let id = add_item(&mut store, item)?;
    let saved = stored(T::items(store.document()), &id)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /api/v1/{section}/:id
pub async fn handle_edit_item<T>(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    AppJson(mut item): AppJson<T>,
) -> Result<Json<T>, AppError>
where
    T: ListItem + Serialize + DeserializeOwned,
{
    tidy_bullets(&mut item);
    let mut store = state.store.lock().await;
    edit_item(&mut store, &id, item)?;
    Ok(Json(stored(T::items(store.document()), &id)?))
}

/// DELETE /api/v1/{section}/:id
pub async fn handle_delete_item<T>(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<StatusCode, AppError>
where
    T: ListItem,
{
    let mut store = state.store.lock().await;
    delete_item::<T>(&mut store, &id)?;
    T::editor(&mut *state.drafts.lock().await).forget(&id);
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Add/edit forms
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView<T> {
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing_id: Option<ItemId>,
    pub draft: T,
}

impl<T: ListItem> DraftView<T> {
    fn of(editor: &ListEditor<T>) -> Self {
        DraftView {
            mode: editor.mode().label(),
            editing_id: editor.mode().editing_id().cloned(),
            draft: editor.draft().clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct BulletRequest {
    pub text: String,
}

/// GET /api/v1/drafts/{section}
pub async fn handle_get_draft<T>(State(state): State<AppState>) -> Json<DraftView<T>>
where
    T: ListItem + Serialize,
{
    let mut drafts = state.drafts.lock().await;
    Json(DraftView::of(T::editor(&mut drafts)))
}

/// POST /api/v1/drafts/{section}/new
pub async fn handle_begin_add<T>(State(state): State<AppState>) -> Json<DraftView<T>>
where
    T: ListItem + Serialize,
{
    let mut drafts = state.drafts.lock().await;
    let editor = T::editor(&mut drafts);
    editor.begin_add();
    Json(DraftView::of(editor))
}

/// POST /api/v1/drafts/{section}/edit/:id
/// Pre-fills the form from the stored item.
pub async fn handle_begin_edit<T>(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<Json<DraftView<T>>, AppError>
where
    T: ListItem + Serialize,
{
    let store = state.store.lock().await;
    let mut drafts = state.drafts.lock().await;
    let editor = T::editor(&mut drafts);
    editor.begin_edit(&store, &id)?;
    Ok(Json(DraftView::of(editor)))
}

/// PATCH /api/v1/drafts/{section}
/// Overwrites the fields present in the body; the rest of the draft, and its
/// id, stay as they were.
pub async fn handle_patch_draft<T>(
    State(state): State<AppState>,
    AppJson(fields): AppJson<serde_json::Value>,
) -> Result<Json<DraftView<T>>, AppError>
where
    T: ListItem + Serialize + DeserializeOwned,
{
    let serde_json::Value::Object(fields) = fields else {
        return Err(AppError::Validation("Draft fields must be a JSON object".to_string()));
    };
    let mut drafts = state.drafts.lock().await;
    let editor = T::editor(&mut drafts);

    let mut merged = serde_json::to_value(editor.draft()).map_err(anyhow::Error::from)?;
    if let Some(current) = merged.as_object_mut() {
        current.extend(fields.into_iter().filter(|(key, _)| key != "id"));
    }
    let mut draft: T = serde_json::from_value(merged)
        .map_err(|e| AppError::Validation(format!("{}: {e}", T::SECTION.label())))?;
    draft.set_id(editor.draft().id().clone());
    *editor.draft_mut() = draft;
    Ok(Json(DraftView::of(editor)))
}

/// DELETE /api/v1/drafts/{section}
pub async fn handle_cancel_draft<T>(State(state): State<AppState>) -> Json<DraftView<T>>
where
    T: ListItem + Serialize,
{
    let mut drafts = state.drafts.lock().await;
    let editor = T::editor(&mut drafts);
    editor.cancel();
    Json(DraftView::of(editor))
}

/// POST /api/v1/drafts/{section}/bullets
/// Blank text is ignored and the draft comes back unchanged.
pub async fn handle_push_bullet<T>(
    State(state): State<AppState>,
    AppJson(req): AppJson<BulletRequest>,
) -> Result<Json<DraftView<T>>, AppError>
where
    T: ListItem + Serialize,
{
    let mut drafts = state.drafts.lock().await;
    let editor = T::editor(&mut drafts);
    editor.push_bullet(&req.text)?;
    Ok(Json(DraftView::of(editor)))
}

/// DELETE /api/v1/drafts/{section}/bullets/:index
pub async fn handle_remove_bullet<T>(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<DraftView<T>>, AppError>
where
    T: ListItem + Serialize,
{
    let mut drafts = state.drafts.lock().await;
    let editor = T::editor(&mut drafts);
    editor.remove_bullet(index)?;
    Ok(Json(DraftView::of(editor)))
}

/// POST /api/v1/drafts/{section}/submit
/// Adds (201) or replaces in place (200). A rejected draft stays open as typed.
pub async fn handle_submit_draft<T>(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<T>), AppError>
where
    T: ListItem + Serialize,
{
    let mut store = state.store.lock().await;
    let mut drafts = state.drafts.lock().await;
    let editor = T::editor(&mut drafts);
    let status = match editor.mode() {
        EditorMode::Editing(_) => StatusCode::OK,
        EditorMode::Idle | EditorMode::Adding => StatusCode::CREATED,
    };
    let id = editor.submit(&mut store)?;
    Ok((status, Json(stored(T::items(store.document()), &id)?)))
}

// ────────────────────────────────────────────────────────────────────────────
// Flat records
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/personal/:field
pub async fn handle_set_personal_field(
    State(state): State<AppState>,
    Path(field): Path<PersonalField>,
    AppJson(req): AppJson<FieldValue>,
) -> Json<PersonalInfo> {
    let mut store = state.store.lock().await;
    set_field(&mut store, field, &req.value);
    Json(store.document().personal_info.clone())
}

/// PUT /api/v1/summary
/// Never rejects on length; the status reports how close the text is to the cap.
pub async fn handle_set_summary(
    State(state): State<AppState>,
    AppJson(req): AppJson<SummaryRequest>,
) -> Json<SummaryResponse> {
    let mut store = state.store.lock().await;
    let status = set_summary(&mut store, &req.summary);
    Json(SummaryResponse {
        summary: req.summary,
        status,
    })
}

/// POST /api/v1/summary/example/:preset
pub async fn handle_apply_summary_example(
    State(state): State<AppState>,
    Path(preset): Path<SummaryExample>,
) -> Json<SummaryResponse> {
    let text = preset.text();
    let mut store = state.store.lock().await;
    let status = set_summary(&mut store, text);
    Json(SummaryResponse {
        summary: text.to_string(),
        status,
    })
}

/// GET /api/v1/skills/groups
pub async fn handle_skill_groups(State(state): State<AppState>) -> Json<Vec<SkillGroupView>> {
    let store = state.store.lock().await;
    let groups = group_skills(&store.document().skills)
        .into_iter()
        .map(|group| SkillGroupView {
            category: group.category.to_string(),
            skills: group.skills.into_iter().cloned().collect(),
        })
        .collect();
    Json(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Experience;

    #[test]
    fn test_tidy_bullets() {
        let mut exp = Experience {
            highlights: vec![" a ".to_string(), "  ".to_string(), "a".to_string()],
            ..Default::default()
        };
        tidy_bullets(&mut exp);
        assert_eq!(exp.highlights, vec!["a", "a"]);
    }
}
