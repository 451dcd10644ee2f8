use axum::extract::{Query, State};
use chrono::Datelike;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::archive::package_site;
use crate::export::pdf::export_pdf;
use crate::export::site::generate_site;
use crate::export::{pdf_filename, site_filename, Download, JSON_FILENAME};
use crate::render::{display_name, render, standalone_page, PREVIEW_ELEMENT_ID};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PdfQuery {
    /// Preview region to capture. Defaults to the builder's preview.
    pub handle: Option<String>,
}

/// POST /api/v1/export/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Query(query): Query<PdfQuery>,
) -> Result<Download, AppError> {
    let _guard = state
        .pdf_export
        .try_begin()
        .ok_or(AppError::Busy("PDF export"))?;
    let handle = query.handle.unwrap_or_else(|| PREVIEW_ELEMENT_ID.to_string());

    let (page, filename) = {
        let store = state.store.lock().await;
        let info = &store.document().personal_info;
        let tree = render(store.document(), store.display_settings());
        (standalone_page(&tree, display_name(info)), pdf_filename(info))
    };

    let download = export_pdf(
        &state.preview,
        &handle,
        &page,
        filename,
        state.rasterizer.as_ref(),
    )
    .await?;
    Ok(download)
}

/// POST /api/v1/export/portfolio
pub async fn handle_export_portfolio(State(state): State<AppState>) -> Result<Download, AppError> {
    let _guard = state
        .site_export
        .try_begin()
        .ok_or(AppError::Busy("portfolio export"))?;

    let (document, portfolio) = {
        let store = state.store.lock().await;
        (store.document().clone(), store.portfolio_settings().clone())
    };
    let filename = site_filename(&document.personal_info);
    let year = chrono::Local::now().year();

    let bytes = tokio::task::spawn_blocking(move || {
        let bundle = generate_site(&document, &portfolio, year);
        package_site(&bundle)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    info!(filename = %filename, size = bytes.len(), "Portfolio site exported");
    Ok(Download {
        filename,
        content_type: "application/zip",
        bytes: bytes.into(),
    })
}

/// GET /api/v1/export/json
pub async fn handle_export_json(State(state): State<AppState>) -> Result<Download, AppError> {
    let text = state
        .store
        .lock()
        .await
        .export_snapshot()
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(Download {
        filename: JSON_FILENAME.to_string(),
        content_type: "application/json",
        bytes: text.into_bytes().into(),
    })
}
