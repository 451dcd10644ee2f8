use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::{Download, ExportError};

// ────────────────────────────────────────────────────────────────────────────
// Mounted preview regions
// ────────────────────────────────────────────────────────────────────────────

/// Tracks which preview regions are currently on screen. A PDF can only be
/// taken of a mounted region.
///
/// Each open builder page holds one mount and releases it when the page is
/// hidden, so a region stays mounted while any page still shows it. A page
/// that goes away without reporting it keeps its mount until the process
/// restarts.
#[derive(Debug, Default)]
pub struct PreviewSurface {
    mounted: RwLock<HashMap<String, usize>>,
}

impl PreviewSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&self, handle: &str) {
        let mut mounted = self.mounted.write().unwrap_or_else(PoisonError::into_inner);
        let count = mounted.entry(handle.to_string()).or_insert(0);
        *count += 1;
        debug!(handle, count = *count, "Preview mounted");
    }

    /// Releases one mount. Returns `false` if `handle` was not mounted.
    pub fn unmount(&self, handle: &str) -> bool {
        let mut mounted = self.mounted.write().unwrap_or_else(PoisonError::into_inner);
        let Some(count) = mounted.get_mut(handle) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            mounted.remove(handle);
            debug!(handle, "Preview unmounted");
        }
        true
    }

    pub fn is_mounted(&self, handle: &str) -> bool {
        self.mounted
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(handle)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rasterizer trait
// ────────────────────────────────────────────────────────────────────────────

/// Turns a complete HTML page into PDF bytes.
///
/// Carried in `AppState` as `Arc<dyn PdfRasterizer>`.
#[async_trait]
pub trait PdfRasterizer: Send + Sync {
    async fn rasterize(&self, page_html: &str) -> Result<Vec<u8>, ExportError>;
}

/// Runs an external HTML-to-PDF program (wkhtmltopdf-compatible flags) on a
/// temporary copy of the page. A4 portrait, zero margins.
pub struct CommandRasterizer {
    program: String,
    timeout: Duration,
}

impl CommandRasterizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl PdfRasterizer for CommandRasterizer {
    async fn rasterize(&self, page_html: &str) -> Result<Vec<u8>, ExportError> {
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("resume.html");
        let output = workdir.path().join("resume.pdf");
        tokio::fs::write(&input, page_html).await?;

        let mut cmd = Command::new(&self.program);
        cmd.args([
            "--quiet",
            "--encoding",
            "utf-8",
            "--page-size",
            "A4",
            "--orientation",
            "Portrait",
            "--margin-top",
            "0",
            "--margin-right",
            "0",
            "--margin-bottom",
            "0",
            "--margin-left",
            "0",
            "--image-quality",
            "98",
        ])
        .arg(&input)
        .arg(&output)
        .kill_on_drop(true);

        let run = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                ExportError::Renderer(format!(
                    "{} did not finish within {}s",
                    self.program,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| ExportError::Renderer(format!("could not start {}: {e}", self.program)))?;

        if !run.status.success() {
            let stderr = String::from_utf8_lossy(&run.stderr);
            return Err(ExportError::Renderer(format!(
                "{} exited with {}: {}",
                self.program,
                run.status,
                stderr.trim()
            )));
        }

        Ok(tokio::fs::read(&output).await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Export
// ────────────────────────────────────────────────────────────────────────────

/// Rasterizes the preview mounted under `handle` and names the result
/// `filename`. `page_html` is the standalone page for that preview.
pub async fn export_pdf(
    surface: &PreviewSurface,
    handle: &str,
    page_html: &str,
    filename: String,
    rasterizer: &dyn PdfRasterizer,
) -> Result<Download, ExportError> {
    if !surface.is_mounted(handle) {
        return Err(ExportError::PreviewNotMounted(handle.to_string()));
    }

    let bytes = rasterizer.rasterize(page_html).await?;
    if bytes.is_empty() {
        return Err(ExportError::Renderer("renderer produced an empty file".to_string()));
    }

    info!(filename = %filename, size = bytes.len(), "PDF exported");
    Ok(Download {
        filename,
        content_type: "application/pdf",
        bytes: bytes.into(),
    })
}
