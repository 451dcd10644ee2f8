pub mod health;
pub mod pages;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::editors::handlers as editors;
use crate::editors::ListItem;
use crate::export::handlers as export;
use crate::feedback::handlers as feedback;
use crate::models::{Achievement, Education, Experience, Project, Skill};
use crate::render::handlers as preview;
use crate::state::AppState;
use crate::store::handlers as store;

/// Add, edit and delete routes for one list-backed section, plus the routes
/// of its add/edit form under `/api/v1/drafts/{section}`.
fn list_routes<T>(router: Router<AppState>, section: &str) -> Router<AppState>
where
    T: ListItem + Serialize + DeserializeOwned,
{
    let base = format!("/api/v1/{section}");
    let draft = format!("/api/v1/drafts/{section}");
    router
        .route(&base, post(editors::handle_add_item::<T>))
        .route(
            &format!("{base}/:id"),
            put(editors::handle_edit_item::<T>).delete(editors::handle_delete_item::<T>),
        )
        .route(
            &draft,
            get(editors::handle_get_draft::<T>)
                .patch(editors::handle_patch_draft::<T>)
                .delete(editors::handle_cancel_draft::<T>),
        )
        .route(&format!("{draft}/new"), post(editors::handle_begin_add::<T>))
        .route(
            &format!("{draft}/edit/:id"),
            post(editors::handle_begin_edit::<T>),
        )
        .route(
            &format!("{draft}/bullets"),
            post(editors::handle_push_bullet::<T>),
        )
        .route(
            &format!("{draft}/bullets/:index"),
            delete(editors::handle_remove_bullet::<T>),
        )
        .route(
            &format!("{draft}/submit"),
            post(editors::handle_submit_draft::<T>),
        )
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(pages::landing_page))
        .route("/builder", get(pages::builder_page))
        // Document store
        .route("/api/v1/document", get(store::handle_get_document))
        .route("/api/v1/document/:section", put(store::handle_put_section))
        .route(
            "/api/v1/settings/display",
            get(store::handle_get_display).put(store::handle_put_display),
        )
        .route(
            "/api/v1/settings/portfolio",
            get(store::handle_get_portfolio).put(store::handle_put_portfolio),
        )
        .route(
            "/api/v1/settings/dark-mode/toggle",
            post(store::handle_toggle_dark_mode),
        )
        .route("/api/v1/reset", post(store::handle_reset))
        .route("/api/v1/import", post(store::handle_import))
        // Navigation
        .route("/api/v1/navigation", get(store::handle_get_navigation))
        .route("/api/v1/navigation/next", post(store::handle_next))
        .route("/api/v1/navigation/previous", post(store::handle_previous))
        .route("/api/v1/navigation/jump", post(store::handle_jump))
        // Section editors
        .route(
            "/api/v1/personal/:field",
            put(editors::handle_set_personal_field),
        )
        .route("/api/v1/summary", put(editors::handle_set_summary))
        .route(
            "/api/v1/summary/example/:preset",
            post(editors::handle_apply_summary_example),
        )
        .route("/api/v1/skills/groups", get(editors::handle_skill_groups));

    let router = list_routes::<Skill>(router, "skills");
    let router = list_routes::<Experience>(router, "experience");
    let router = list_routes::<Project>(router, "projects");
    let router = list_routes::<Education>(router, "education");
    let router = list_routes::<Achievement>(router, "achievements");

    router
        // Preview
        .route("/api/v1/preview", get(preview::handle_preview_page))
        .route("/api/v1/preview/tree", get(preview::handle_preview_tree))
        .route("/api/v1/preview/mount", post(preview::handle_mount_preview))
        .route("/api/v1/preview/unmount", post(preview::handle_unmount_preview))
        // Export
        .route("/api/v1/export/pdf", post(export::handle_export_pdf))
        .route("/api/v1/export/portfolio", post(export::handle_export_portfolio))
        .route("/api/v1/export/json", get(export::handle_export_json))
        // Feedback
        .route("/api/v1/feedback", post(feedback::handle_feedback))
        .with_state(state)
}
