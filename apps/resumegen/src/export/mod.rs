//! Export Pipeline: PDF from the mounted preview, a zipped static site, and
//! the JSON snapshot download.

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use thiserror::Error;

use crate::models::PersonalInfo;

pub mod archive;
pub mod guard;
pub mod handlers;
pub mod pdf;
pub mod site;

pub use guard::InFlight;

pub const JSON_FILENAME: &str = "resume-data.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Preview '{0}' is not mounted")]
    PreviewNotMounted(String),

    #[error("PDF renderer failed: {0}")]
    Renderer(String),

    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not build archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// A finished export, ready to be handed to the user as a file.
#[derive(Debug, Clone)]
pub struct Download {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

impl IntoResponse for Download {
    fn into_response(self) -> Response {
        let disposition = HeaderValue::from_str(&content_disposition(&self.filename))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
        (
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(self.content_type)),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// `<fullName>.pdf`, or `resume.pdf` without a name.
pub fn pdf_filename(info: &PersonalInfo) -> String {
    format!("{}.pdf", base_name(info, "resume"))
}

/// `<fullName>-website.zip`, or `portfolio-website.zip` without a name.
pub fn site_filename(info: &PersonalInfo) -> String {
    format!("{}-website.zip", base_name(info, "portfolio"))
}

fn base_name<'a>(info: &'a PersonalInfo, fallback: &'a str) -> &'a str {
    match info.full_name.trim() {
        "" => fallback,
        name => name,
    }
}

/// An `attachment` disposition with an ASCII fallback name and the exact
/// name percent-encoded.
fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| match c {
            ' '..='~' if c != '"' && c != '\\' => c,
            _ => '_',
        })
        .collect();
    let mut encoded = String::new();
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filenames_fall_back_without_a_name() {
        let mut info = PersonalInfo::default();
        assert_eq!(pdf_filename(&info), "resume.pdf");
        assert_eq!(site_filename(&info), "portfolio-website.zip");

        info.full_name = "Ada Lovelace".to_string();
        assert_eq!(pdf_filename(&info), "Ada Lovelace.pdf");
        assert_eq!(site_filename(&info), "Ada Lovelace-website.zip");
    }

    #[test]
    fn test_content_disposition_is_header_safe() {
        let value = content_disposition("José \"J\".pdf");
        assert!(HeaderValue::from_str(&value).is_ok());
        assert!(value.starts_with("attachment; filename=\"Jos_ _J_.pdf\""));
        assert!(value.contains("filename*=UTF-8''Jos%C3%A9%20%22J%22.pdf"));
    }
}
