use thiserror::Error;

use crate::types::SectionType;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScraperError>;

/// A page that could not be fetched after every retry was spent.
///
/// Returned as a value: the pipeline treats it as "no companies for this
/// state" and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to fetch {url} after {attempts} attempt(s): {last_error}")]
pub struct FetchFailure {
    pub url: String,
    pub attempts: u32,
    pub last_error: String,
}

/// Why a single listing fragment could not be turned into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("fragment is not a {expected} listing (class=\"{class}\")")]
    WrongSection { expected: SectionType, class: String },

    #[error("{section} fragment has no text content")]
    Empty { section: SectionType },
}
