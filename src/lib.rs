pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod infra;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod types;

pub use config::{ScraperConfig, SiteLayout};
pub use error::{ExtractionError, FetchFailure, Result, ScraperError};
pub use pipeline::{Pipeline, PipelineResult};
pub use types::{CompanyRecord, SectionType};
