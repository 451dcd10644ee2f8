use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DisplaySettings, PortfolioSettings, ProfileDocument};

/// The full serializable bundle written by JSON export and read by import.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub resume_data: &'a ProfileDocument,
    pub resume_settings: &'a DisplaySettings,
    pub portfolio_settings: &'a PortfolioSettings,
}

/// An import payload. Every key is optional; an absent (or `null`) key leaves
/// the corresponding structure untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPayload {
    pub resume_data: Option<ProfileDocument>,
    pub resume_settings: Option<DisplaySettings>,
    pub portfolio_settings: Option<PortfolioSettings>,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Snapshot is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Snapshot must be a JSON object")]
    NotAnObject,

    #[error("Snapshot has an invalid shape: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Serializes the three top-level structures as pretty JSON.
pub fn export_json(
    document: &ProfileDocument,
    display: &DisplaySettings,
    portfolio: &PortfolioSettings,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Snapshot {
        resume_data: document,
        resume_settings: display,
        portfolio_settings: portfolio,
    })
}

/// Parses an import payload in full. Nothing is applied here, so a failure at
/// any depth leaves the caller's state as it was.
pub fn parse_snapshot(text: &str) -> Result<SnapshotPayload, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(ImportError::Malformed)?;
    if !value.is_object() {
        return Err(ImportError::NotAnObject);
    }
    serde_json::from_value(value).map_err(ImportError::Shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Template;

    #[test]
    fn test_not_json_is_malformed() {
        assert!(matches!(
            parse_snapshot("not json"),
            Err(ImportError::Malformed(_))
        ));
    }

    #[test]
    fn test_array_is_not_an_object() {
        assert!(matches!(parse_snapshot("[1,2]"), Err(ImportError::NotAnObject)));
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let r = parse_snapshot(r#"{"resumeData":{"skills":"lots"}}"#);
        assert!(matches!(r, Err(ImportError::Shape(_))));
    }

    #[test]
    fn test_partial_payload() {
        let payload = parse_snapshot(r#"{"resumeSettings":{"template":"creative"}}"#).unwrap();
        assert!(payload.resume_data.is_none());
        assert!(payload.portfolio_settings.is_none());
        assert_eq!(payload.resume_settings.unwrap().template, Template::Creative);
    }

    #[test]
    fn test_export_uses_three_top_level_keys() {
        let text = export_json(
            &ProfileDocument::default(),
            &DisplaySettings::default(),
            &PortfolioSettings::default(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert!(value.get("resumeData").is_some());
        assert!(value.get("resumeSettings").is_some());
        assert!(value.get("portfolioSettings").is_some());
        assert!(text.contains('\n'), "export should be pretty-printed");
    }
}
