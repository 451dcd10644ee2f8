use axum::{extract::State, response::Html, Json};
use serde::Serialize;

use crate::render::markup::Node;
use crate::render::{display_name, render, standalone_page, PREVIEW_ELEMENT_ID};
use crate::state::AppState;

/// GET /api/v1/preview
/// The current preview as a standalone HTML page.
pub async fn handle_preview_page(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    let tree = render(store.document(), store.display_settings());
    Html(standalone_page(&tree, display_name(&store.document().personal_info)))
}

/// GET /api/v1/preview/tree
pub async fn handle_preview_tree(State(state): State<AppState>) -> Json<Node> {
    let store = state.store.lock().await;
    Json(render(store.document(), store.display_settings()))
}

#[derive(Serialize)]
pub struct MountResponse {
    pub mounted: bool,
}

/// POST /api/v1/preview/mount
/// Sent by the builder page when it is shown again from the back/forward cache.
pub async fn handle_mount_preview(State(state): State<AppState>) -> Json<MountResponse> {
    state.preview.mount(PREVIEW_ELEMENT_ID);
    Json(MountResponse { mounted: true })
}

/// POST /api/v1/preview/unmount
/// Sent by the builder page as it is hidden or closed.
pub async fn handle_unmount_preview(State(state): State<AppState>) -> Json<MountResponse> {
    state.preview.unmount(PREVIEW_ELEMENT_ID);
    Json(MountResponse {
        mounted: state.preview.is_mounted(PREVIEW_ELEMENT_ID),
    })
}
