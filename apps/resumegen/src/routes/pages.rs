use axum::{extract::State, response::Html};

use crate::navigation::{Section, StepStatus};
use crate::render::markup::{el, Element, Node};
use crate::render::{render, PREVIEW_ELEMENT_ID};
use crate::state::AppState;

fn page(title: &str, dark_mode: bool, body: Element) -> Html<String> {
    let html: Node = el("html")
        .with_attr("lang", "en")
        .child(
            el("head")
                .child(el("meta").with_attr("charset", "UTF-8"))
                .child(el("title").text(title)),
        )
        .child(body.class(if dark_mode { "dark" } else { "light" }))
        .into();
    Html(format!("<!DOCTYPE html>\n{}", html.to_html()))
}

/// GET /
pub async fn landing_page(State(state): State<AppState>) -> Html<String> {
    let dark_mode = state.store.lock().await.dark_mode();
    page(
        "ResumeGen",
        dark_mode,
        el("body").child(
            el("main")
                .child(el("h1").text("ResumeGen"))
                .child(el("p").text(
                    "Build a resume step by step, preview it live, and export it as a PDF, \
                     a portfolio website or a JSON backup.",
                ))
                .child(el("a").with_attr("href", "/builder").text("Start building")),
        ),
    )
}

/// Keeps the preview mount in step with the page being on screen.
const MOUNT_SCRIPT: &str = "addEventListener('pagehide', () => navigator.sendBeacon('/api/v1/preview/unmount'));\n\
addEventListener('pageshow', (e) => { if (e.persisted) navigator.sendBeacon('/api/v1/preview/mount'); });";

/// A one-button form. While the export is running the button is disabled.
fn export_button(label: &str, action: &str, busy: bool) -> Element {
    let button = el("button").with_attr("type", "submit");
    let button = if busy {
        button.with_attr("disabled", "disabled").text("Exporting...")
    } else {
        button.text(label)
    };
    el("form")
        .with_attr("method", "post")
        .with_attr("action", action)
        .child(button)
}

/// GET /builder
/// Serving this page puts the preview on screen, which is what a PDF export
/// captures. The page releases the mount when it is hidden.
pub async fn builder_page(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    let navigator = store.navigator();
    let steps = navigator.steps(store.document()).into_iter().map(|step| {
        let class = match step.status {
            StepStatus::Current => "step current",
            StepStatus::Complete => "step complete",
            StepStatus::Incomplete => "step",
        };
        el("li")
            .class(class)
            .with_attr("data-section", format!("{:?}", step.section).to_lowercase())
            .text(step.label)
    });
    let current = navigator.current();
    let preview = render(store.document(), store.display_settings());
    state.preview.mount(PREVIEW_ELEMENT_ID);

    page(
        "ResumeGen Builder",
        store.dark_mode(),
        el("body")
            .child(
                el("nav")
                    .child(el("ol").class("steps").children(steps))
                    .child(el("p").text(format!(
                        "Step {} of {}: {}",
                        current.index() + 1,
                        Section::ALL.len(),
                        current.label()
                    ))),
            )
            .child(
                el("section")
                    .class("exports")
                    .child(el("h3").text("Preview & Export"))
                    .child(export_button(
                        "Download Resume PDF",
                        "/api/v1/export/pdf",
                        state.pdf_export.is_busy(),
                    ))
                    .child(export_button(
                        "Download Portfolio Website",
                        "/api/v1/export/portfolio",
                        state.site_export.is_busy(),
                    ))
                    .child(
                        el("a")
                            .with_attr("href", "/api/v1/export/json")
                            .text("Download JSON Backup"),
                    ),
            )
            .child(el("div").id(PREVIEW_ELEMENT_ID).child(preview))
            .child(el("script").child(Node::raw(MOUNT_SCRIPT))),
    )
}
