use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::feedback::{EmailJsCredentials, EMAILJS_SEND_URL};

/// Application configuration loaded from environment variables.
/// Every variable is optional; the defaults give a working local builder.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub bind_addr: IpAddr,
    pub port: u16,
    pub rust_log: String,
    pub pdf_renderer: String,
    pub pdf_timeout: Duration,
    pub emailjs: Option<EmailJsCredentials>,
    pub emailjs_endpoint: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: PathBuf::from(env_or("DATA_DIR", "./.resumegen")),
            bind_addr: env_or("BIND_ADDR", "127.0.0.1")
                .parse::<IpAddr>()
                .context("BIND_ADDR must be an IP address")?,
            port: env_or("PORT", "5173")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            pdf_renderer: env_or("PDF_RENDERER", "wkhtmltopdf"),
            pdf_timeout: Duration::from_secs(
                env_or("PDF_TIMEOUT_SECS", "60")
                    .parse::<u64>()
                    .context("PDF_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            emailjs: emailjs_from_env(),
            emailjs_endpoint: env_or("EMAILJS_API_URL", EMAILJS_SEND_URL),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// All three EmailJS variables, or none.
fn emailjs_from_env() -> Option<EmailJsCredentials> {
    let get = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
    Some(EmailJsCredentials {
        service_id: get("EMAILJS_SERVICE_ID")?,
        template_id: get("EMAILJS_TEMPLATE_ID")?,
        public_key: get("EMAILJS_PUBLIC_KEY")?,
    })
}
