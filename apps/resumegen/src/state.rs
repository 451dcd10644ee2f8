use std::sync::Arc;

use tokio::sync::Mutex;

use crate::editors::EditorDrafts;
use crate::export::pdf::{PdfRasterizer, PreviewSurface};
use crate::export::InFlight;
use crate::feedback::FeedbackRelay;
use crate::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single document store. Handlers release the lock before awaiting
    /// an export or a feedback send.
    pub store: Arc<Mutex<ProfileStore>>,
    /// Open add/edit forms. Always locked after `store` when both are held.
    pub drafts: Arc<Mutex<EditorDrafts>>,
    pub preview: Arc<PreviewSurface>,
    pub rasterizer: Arc<dyn PdfRasterizer>,
    pub feedback: Arc<dyn FeedbackRelay>,
    pub pdf_export: InFlight,
    pub site_export: InFlight,
    pub feedback_send: InFlight,
}

impl AppState {
    pub fn new(
        store: ProfileStore,
        rasterizer: Arc<dyn PdfRasterizer>,
        feedback: Arc<dyn FeedbackRelay>,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            drafts: Arc::new(Mutex::new(EditorDrafts::default())),
            preview: Arc::new(PreviewSurface::new()),
            rasterizer,
            feedback,
            pdf_export: InFlight::new(),
            site_export: InFlight::new(),
            feedback_send: InFlight::new(),
        }
    }
}
