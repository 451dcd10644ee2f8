//! Feedback Channel: validates a feedback message and relays it through
//! EmailJS.
//!
//! The transport sits behind [`FeedbackRelay`] so the form logic can be
//! exercised without network access.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod handlers;

pub const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
const MAX_RETRIES: u32 = 2;

pub const MAX_RATING: u16 = 5;
pub const SUCCESS_MESSAGE: &str = "Thank you for your feedback! 💖";
pub const FAILURE_MESSAGE: &str = "Failed to send feedback. Please try again.";

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Please enter a message")]
    EmptyMessage,

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u16),

    #[error("Feedback delivery is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay rejected feedback (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

impl FeedbackError {
    /// Whether the failure is the user's input rather than delivery.
    pub fn is_validation(&self) -> bool {
        matches!(self, FeedbackError::EmptyMessage | FeedbackError::InvalidRating(_))
    }
}

/// The values the mail template receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub rating: String,
}

/// Validates a submission and applies the display fallbacks for optional
/// fields. A rating of 0 counts as not rated.
pub fn template_params(
    name: &str,
    email: &str,
    message: &str,
    rating: Option<u16>,
) -> Result<TemplateParams, FeedbackError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(FeedbackError::EmptyMessage);
    }
    let rating = match rating {
        None | Some(0) => "not rated".to_string(),
        Some(r) if r <= MAX_RATING => r.to_string(),
        Some(r) => return Err(FeedbackError::InvalidRating(r)),
    };
    let or = |value: &str, fallback: &str| match value.trim() {
        "" => fallback.to_string(),
        v => v.to_string(),
    };
    Ok(TemplateParams {
        from_name: or(name, "Anonymous"),
        from_email: or(email, "not provided"),
        message: message.to_string(),
        rating,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Relay trait
// ────────────────────────────────────────────────────────────────────────────

/// Delivers one feedback message.
///
/// Carried in `AppState` as `Arc<dyn FeedbackRelay>`.
#[async_trait]
pub trait FeedbackRelay: Send + Sync {
    async fn send(&self, params: &TemplateParams) -> Result<(), FeedbackError>;
}

/// Credentials for the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

#[derive(Debug, Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// Sends feedback through EmailJS. Built without credentials, every send
/// fails with [`FeedbackError::NotConfigured`].
#[derive(Clone)]
pub struct EmailJsRelay {
    client: Client,
    credentials: Option<EmailJsCredentials>,
    endpoint: String,
}

impl EmailJsRelay {
    pub fn new(credentials: Option<EmailJsCredentials>) -> Result<Self, FeedbackError> {
        if credentials.is_none() {
            warn!("EmailJS credentials not set; feedback submissions will fail");
        }
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(30)).build()?,
            credentials,
            endpoint: EMAILJS_SEND_URL.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl FeedbackRelay for EmailJsRelay {
    /// Retries once on 429 and 5xx.
    async fn send(&self, params: &TemplateParams) -> Result<(), FeedbackError> {
        let credentials = self.credentials.as_ref().ok_or(FeedbackError::NotConfigured)?;
        let body = EmailJsRequest {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.public_key,
            template_params: params,
        };

        let mut last_error = FeedbackError::NotConfigured;
        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!("Feedback send attempt {} failed, retrying after {}ms", attempt, delay.as_millis());
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&self.endpoint).json(&body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = FeedbackError::Http(e);
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                debug!("EmailJS accepted feedback");
                return Ok(());
            }

            let message = response.text().await.unwrap_or_default();
            let rejected = FeedbackError::Rejected {
                status: status.as_u16(),
                message,
            };
            if status.as_u16() == 429 || status.is_server_error() {
                last_error = rejected;
                continue;
            }
            return Err(rejected);
        }
        Err(last_error)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Form
// ────────────────────────────────────────────────────────────────────────────

/// The feedback form's fields. Cleared after a successful send, kept as
/// typed after a failed one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedbackForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub rating: Option<u16>,
}

impl FeedbackForm {
    pub async fn submit(&mut self, relay: &dyn FeedbackRelay) -> Result<(), FeedbackError> {
        let params = template_params(&self.name, &self.email, &self.message, self.rating)?;
        relay.send(&params).await?;
        info!(rated = self.rating.is_some(), "Feedback sent");
        *self = FeedbackForm::default();
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records what it was asked to send; fails when `fail` is set.
    #[derive(Default)]
    pub(crate) struct FakeRelay {
        pub fail: bool,
        pub sent: Mutex<Vec<TemplateParams>>,
    }

    #[async_trait]
    impl FeedbackRelay for FakeRelay {
        async fn send(&self, params: &TemplateParams) -> Result<(), FeedbackError> {
            if self.fail {
                return Err(FeedbackError::Rejected {
                    status: 500,
                    message: "down".to_string(),
                });
            }
            self.sent.lock().unwrap().push(params.clone());
            Ok(())
        }
    }

    #[test]
    fn test_fallbacks_for_optional_fields() {
        let params = template_params("  ", "", " Love it ", None).unwrap();
        assert_eq!(params.from_name, "Anonymous");
        assert_eq!(params.from_email, "not provided");
        assert_eq!(params.message, "Love it");
        assert_eq!(params.rating, "not rated");
    }

    #[test]
    fn test_blank_message_is_rejected() {
        let err = template_params("Ada", "ada@example.com", "   ", Some(4)).unwrap_err();
        assert!(matches!(err, FeedbackError::EmptyMessage));
        assert!(err.is_validation());
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(template_params("", "", "hi", Some(5)).unwrap().rating, "5");
        assert_eq!(template_params("", "", "hi", Some(0)).unwrap().rating, "not rated");
        assert!(matches!(
            template_params("", "", "hi", Some(6)),
            Err(FeedbackError::InvalidRating(6))
        ));
    }

    #[test]
    fn test_out_of_range_rating_reaches_validation() {
        let form: FeedbackForm = serde_json::from_str(r#"{"message":"hi","rating":300}"#).unwrap();
        let err = template_params(&form.name, &form.email, &form.message, form.rating).unwrap_err();
        assert!(matches!(err, FeedbackError::InvalidRating(300)));
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_delivery_error() {
        let relay = EmailJsRelay::new(Some(EmailJsCredentials {
            service_id: "svc".to_string(),
            template_id: "tpl".to_string(),
            public_key: "key".to_string(),
        }))
        .unwrap()
        .with_endpoint("http://127.0.0.1:9/api/v1.0/email/send");
        let params = template_params("", "", "hi", None).unwrap();
        let err = relay.send(&params).await.unwrap_err();
        assert!(matches!(err, FeedbackError::Http(_)));
        assert!(!err.is_validation());
    }

    #[tokio::test]
    async fn test_form_clears_on_success() {
        let relay = FakeRelay::default();
        let mut form = FeedbackForm {
            name: "Ada".to_string(),
            email: String::new(),
            message: "Great tool".to_string(),
            rating: Some(5),
        };
        form.submit(&relay).await.unwrap();
        assert_eq!(form, FeedbackForm::default());
        let sent = relay.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from_name, "Ada");
        assert_eq!(sent[0].from_email, "not provided");
    }

    #[tokio::test]
    async fn test_form_keeps_values_on_failure() {
        let relay = FakeRelay {
            fail: true,
            ..Default::default()
        };
        let mut form = FeedbackForm {
            message: "Great tool".to_string(),
            rating: Some(3),
            ..Default::default()
        };
        let before = form.clone();
        assert!(form.submit(&relay).await.is_err());
        assert_eq!(form, before);
    }

    #[tokio::test]
    async fn test_unconfigured_relay_fails_delivery() {
        let relay = EmailJsRelay::new(None).unwrap();
        let params = template_params("", "", "hi", None).unwrap();
        let err = relay.send(&params).await.unwrap_err();
        assert!(matches!(err, FeedbackError::NotConfigured));
        assert!(!err.is_validation());
    }
}
