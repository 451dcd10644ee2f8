use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppJson};
use crate::models::{DisplaySettings, PortfolioSettings, ProfileDocument};
use crate::navigation::{Section, StepView};
use crate::state::AppState;
use crate::store::{ProfileStore, SectionUpdate};

pub const IMPORT_SUCCESS_MESSAGE: &str = "Data imported successfully!";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DarkModeResponse {
    pub dark_mode: bool,
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub message: &'static str,
    pub document: ProfileDocument,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationView {
    pub current: Section,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub steps: Vec<StepView>,
}

impl NavigationView {
    fn of(store: &ProfileStore) -> Self {
        let current = store.navigator().current();
        NavigationView {
            current,
            can_go_previous: !current.is_first(),
            can_go_next: !current.is_last(),
            steps: store.navigator().steps(store.document()),
        }
    }
}

#[derive(Deserialize)]
pub struct JumpRequest {
    pub section: Section,
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<ProfileDocument> {
    Json(state.store.lock().await.document().clone())
}

/// PUT /api/v1/document/:section
/// Replaces the whole slice; the body is the new value for that section.
pub async fn handle_put_section(
    State(state): State<AppState>,
    Path(section): Path<Section>,
    AppJson(value): AppJson<serde_json::Value>,
) -> Result<Json<ProfileDocument>, AppError> {
    let update = SectionUpdate::from_json(section, value)
        .map_err(|e| AppError::Validation(format!("{}: {e}", section.label())))?;
    let mut store = state.store.lock().await;
    store.update(update);
    Ok(Json(store.document().clone()))
}

// ────────────────────────────────────────────────────────────────────────────
// Settings
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/settings/display
pub async fn handle_get_display(State(state): State<AppState>) -> Json<DisplaySettings> {
    Json(state.store.lock().await.display_settings().clone())
}

/// PUT /api/v1/settings/display
pub async fn handle_put_display(
    State(state): State<AppState>,
    AppJson(settings): AppJson<DisplaySettings>,
) -> Json<DisplaySettings> {
    let mut store = state.store.lock().await;
    store.update_display_settings(settings);
    Json(store.display_settings().clone())
}

/// GET /api/v1/settings/portfolio
pub async fn handle_get_portfolio(State(state): State<AppState>) -> Json<PortfolioSettings> {
    Json(state.store.lock().await.portfolio_settings().clone())
}

/// PUT /api/v1/settings/portfolio
pub async fn handle_put_portfolio(
    State(state): State<AppState>,
    AppJson(settings): AppJson<PortfolioSettings>,
) -> Json<PortfolioSettings> {
    let mut store = state.store.lock().await;
    store.update_portfolio_settings(settings);
    Json(store.portfolio_settings().clone())
}

/// POST /api/v1/settings/dark-mode/toggle
pub async fn handle_toggle_dark_mode(State(state): State<AppState>) -> Json<DarkModeResponse> {
    let dark_mode = state.store.lock().await.toggle_dark_mode();
    Json(DarkModeResponse { dark_mode })
}

/// POST /api/v1/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<ProfileDocument> {
    let mut store = state.store.lock().await;
    store.reset();
    state.drafts.lock().await.clear();
    info!("Builder reset to defaults");
    Json(store.document().clone())
}

/// POST /api/v1/import
/// The body is the text of a previously exported JSON file.
pub async fn handle_import(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let mut store = state.store.lock().await;
    store.import_snapshot(&body)?;
    state.drafts.lock().await.clear();
    Ok(Json(ImportResponse {
        message: IMPORT_SUCCESS_MESSAGE,
        document: store.document().clone(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Navigation
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/navigation
pub async fn handle_get_navigation(State(state): State<AppState>) -> Json<NavigationView> {
    Json(NavigationView::of(&*state.store.lock().await))
}

/// POST /api/v1/navigation/next
/// A no-op on the last section.
pub async fn handle_next(State(state): State<AppState>) -> Json<NavigationView> {
    let mut store = state.store.lock().await;
    store.navigator_mut().next();
    Json(NavigationView::of(&store))
}

/// POST /api/v1/navigation/previous
/// A no-op on the first section.
pub async fn handle_previous(State(state): State<AppState>) -> Json<NavigationView> {
    let mut store = state.store.lock().await;
    store.navigator_mut().previous();
    Json(NavigationView::of(&store))
}

/// POST /api/v1/navigation/jump
pub async fn handle_jump(
    State(state): State<AppState>,
    AppJson(req): AppJson<JumpRequest>,
) -> Json<NavigationView> {
    let mut store = state.store.lock().await;
    store.navigator_mut().jump_to(req.section);
    Json(NavigationView::of(&store))
}
