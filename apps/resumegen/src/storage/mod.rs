//! Local persistent storage: string-keyed slots holding JSON-serialized values.
//!
//! The builder keeps four independent slots (document, display settings,
//! portfolio settings, dark-mode flag). Each slot is read once at startup and
//! rewritten on every change to the structure it mirrors.

use thiserror::Error;

pub mod file;
#[cfg(test)]
mod memory;

pub use file::FileStorage;
#[cfg(test)]
pub use memory::MemoryStorage;

pub const RESUME_DATA_KEY: &str = "resumeBuilder_resumeData";
pub const RESUME_SETTINGS_KEY: &str = "resumeBuilder_resumeSettings";
pub const PORTFOLIO_SETTINGS_KEY: &str = "resumeBuilder_portfolioSettings";
pub const DARK_MODE_KEY: &str = "resumeBuilder_darkMode";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on slot '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A string-keyed slot store. Implementations must be usable from the shared
/// application state, hence `Send + Sync`.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
