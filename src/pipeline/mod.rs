pub mod export;
pub mod normalize;

use crate::app::ports::PageFetcher;
use crate::config::ScraperConfig;
use crate::error::{ExtractionError, Result};
use crate::parser::{extract, PageParser};
use crate::types::{CompanyRecord, SectionType};
use chrono::Local;
use metrics::{counter, histogram};
use scraper::Html;
use std::collections::HashSet;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

pub use normalize::{clean_email, clean_phone, clean_website, normalize_record};

/// A fragment that could not be extracted, kept for the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    pub state: String,
    pub section: SectionType,
    pub index: usize,
    pub error: ExtractionError,
}

/// Everything pulled from one state page.
#[derive(Debug, Default)]
pub struct StateScrape {
    pub records: Vec<CompanyRecord>,
    pub failures: Vec<ExtractionFailure>,
}

impl StateScrape {
    pub fn count(&self, section: SectionType) -> usize {
        self.records.iter().filter(|r| r.section_type == section).count()
    }
}

/// Result of a run that produced an export file.
#[derive(Debug)]
pub struct PipelineResult {
    pub output_file: PathBuf,
    pub total: usize,
    pub recommended: usize,
    pub regular: usize,
    pub empty_states: Vec<String>,
    pub extraction_failures: Vec<ExtractionFailure>,
}

/// Parse one state page into named records tagged with `state`.
///
/// Fragments that fail extraction are logged and collected; they never stop
/// their siblings. Records without a name are dropped here.
pub fn scrape_page(html: &str, state: &str, config: &ScraperConfig) -> StateScrape {
    let document = Html::parse_document(html);
    let parser = PageParser::new(&config.layout);
    let mut scrape = StateScrape::default();

    for (index, fragment) in parser.parse(&document, state).into_iter().enumerate() {
        match extract(fragment.element, fragment.section) {
            Ok(mut record) => {
                if !record.has_name() {
                    continue;
                }
                record.state = state.to_string();
                counter!("hoa_fragments_extracted_total", "section" => fragment.section.as_str())
                    .increment(1);
                scrape.records.push(record);
            }
            Err(e) => {
                error!("Error extracting company data for {}: {}", state, e);
                counter!("hoa_extraction_errors_total").increment(1);
                scrape.failures.push(ExtractionFailure {
                    state: state.to_string(),
                    section: fragment.section,
                    index,
                    error: e,
                });
            }
        }
    }

    scrape
}

/// Normalize contact fields, drop unnamed records and keep the first record
/// for each `(name, state)`.
pub fn finalize_records(records: Vec<CompanyRecord>) -> Vec<CompanyRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .map(normalize_record)
        .filter(|r| r.has_name())
        .filter(|r| seen.insert((r.name.clone(), r.state.clone())))
        .collect()
}

/// Sequential scrape over a list of states, ending in one CSV export.
pub struct Pipeline<F: PageFetcher> {
    config: ScraperConfig,
    fetcher: F,
}

impl<F: PageFetcher> Pipeline<F> {
    pub fn new(config: ScraperConfig, fetcher: F) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, fetcher })
    }

    /// Fetch and parse one state. A failed fetch yields an empty scrape.
    #[instrument(skip(self))]
    pub fn scrape_state(&self, state: &str) -> StateScrape {
        let url = match self.config.state_url(state) {
            Ok(url) => url,
            Err(e) => {
                error!("Cannot build URL for {}: {}", state, e);
                return StateScrape::default();
            }
        };

        let html = match self.fetcher.fetch(url.as_str()) {
            Ok(html) => html,
            Err(failure) => {
                warn!("Skipping {}: {}", state, failure);
                return StateScrape::default();
            }
        };

        let scrape = scrape_page(&html, state, &self.config);
        info!(
            "Found {} companies for {} (Recommended: {}, Regular: {})",
            scrape.records.len(),
            state,
            scrape.count(SectionType::Recommended),
            scrape.count(SectionType::Regular)
        );
        scrape
    }

    /// Scrape `states` in order and export the cleaned table.
    ///
    /// Returns `Ok(None)` when nothing survives filtering; no file is written
    /// in that case.
    pub fn run(&self, states: &[String]) -> Result<Option<PipelineResult>> {
        let started = Instant::now();
        info!("Starting scraper for {} states", states.len());

        let mut accumulated = Vec::new();
        let mut extraction_failures = Vec::new();
        let mut empty_states = Vec::new();

        for (i, state) in states.iter().enumerate() {
            info!("Scraping {} ({}/{})", state, i + 1, states.len());
            let scrape = self.scrape_state(state);
            if scrape.records.is_empty() && scrape.failures.is_empty() {
                empty_states.push(state.clone());
            }
            accumulated.extend(scrape.records);
            extraction_failures.extend(scrape.failures);

            if i + 1 < states.len() {
                thread::sleep(self.config.delay());
            }
        }

        let records = finalize_records(accumulated);
        histogram!("hoa_pipeline_duration_seconds").record(started.elapsed().as_secs_f64());

        if records.is_empty() {
            warn!("No data to save");
            return Ok(None);
        }

        let output_file = export::write_csv(&records, &self.config.output_dir, Local::now())?;

        let recommended = records
            .iter()
            .filter(|r| r.section_type == SectionType::Recommended)
            .count();
        let result = PipelineResult {
            output_file,
            total: records.len(),
            recommended,
            regular: records.len() - recommended,
            empty_states,
            extraction_failures,
        };

        info!("{}", "=".repeat(50));
        info!("SCRAPING COMPLETED!");
        info!("Total companies: {}", result.total);
        info!("Recommended: {}", result.recommended);
        info!("Regular: {}", result.regular);
        info!("Output file: {}", result.output_file.display());
        if !result.extraction_failures.is_empty() {
            warn!("Skipped {} unreadable listings", result.extraction_failures.len());
        }
        info!("{}", "=".repeat(50));

        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, state: &str, phone: &str) -> CompanyRecord {
        let mut r = CompanyRecord::new(SectionType::Regular);
        r.name = name.to_string();
        r.state = state.to_string();
        r.phone = phone.to_string();
        r
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let records = finalize_records(vec![
            record("Acme", "Ohio", "555-000-0001"),
            record("Acme", "Ohio", "555-000-0002"),
            record("Acme", "Iowa", "555-000-0003"),
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state, "Ohio");
        assert_eq!(records[0].phone, "(555) 000-0001");
        assert_eq!(records[1].state, "Iowa");
    }

    #[test]
    fn unnamed_records_are_dropped() {
        let records = finalize_records(vec![
            record("", "Ohio", ""),
            record("   ", "Ohio", ""),
            record("Named", "Ohio", ""),
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Named");
    }

    #[test]
    fn scrape_page_tags_state_and_collects_failures() {
        let config = ScraperConfig::default();
        let html = r#"<html><body>
            <h3>HOA Management Companies</h3>
            <div class="hoa-directory-results">
              <div class="result-normal"><strong>Good:</strong> Phone: 555-987-6543</div>
              <div class="result-normal">  </div>
              <div class="result-normal">Phone: 555-987-0000</div>
            </div></body></html>"#;
        let scrape = scrape_page(html, "Nevada", &config);
        assert_eq!(scrape.records.len(), 1);
        assert_eq!(scrape.records[0].name, "Good");
        assert_eq!(scrape.records[0].state, "Nevada");
        assert_eq!(scrape.failures.len(), 1);
        assert_eq!(scrape.failures[0].index, 1);
        assert_eq!(
            scrape.failures[0].error,
            ExtractionError::Empty { section: SectionType::Regular }
        );
    }

    #[test]
    fn page_without_sections_is_empty() {
        let config = ScraperConfig::default();
        let scrape = scrape_page("<html><body><p>No results</p></body></html>", "Maine", &config);
        assert!(scrape.records.is_empty());
        assert!(scrape.failures.is_empty());
    }
}
