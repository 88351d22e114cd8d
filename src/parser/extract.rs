//! Field extraction for the two listing shapes.
//!
//! Recommended listings are richly structured: every field sits in its own
//! `div.result-*` container. Regular listings are a bold name followed by
//! loosely formatted `Label: value` text, so their fields are pulled out with
//! line-oriented patterns.

use crate::constants::DESCRIPTION_MAX_CHARS;
use crate::error::ExtractionError;
use crate::parser::text::{block_text, element_text, truncate_chars};
use crate::types::{CompanyRecord, SectionType};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("valid phone regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static SERVICE_AREA_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Service Area:\s*").expect("valid label regex"));

static LABELED_PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Phone:\s*(\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4})").expect("valid phone regex")
});

static LABELED_SERVICE_AREA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Service Area:\s*([^\n\r]+)").expect("valid service area regex"));

static RECOMMENDED_CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"result-gold|result-platinum").expect("valid class regex"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

static NAME_SEL: Lazy<Selector> = Lazy::new(|| selector("h4.result-name"));
static WEBSITE_LINK_SEL: Lazy<Selector> = Lazy::new(|| selector("div.result-website a[href]"));
static PHONE_SEL: Lazy<Selector> = Lazy::new(|| selector("div.result-phone"));
static EMAIL_SEL: Lazy<Selector> = Lazy::new(|| selector("div.result-email"));
static MAILTO_SEL: Lazy<Selector> = Lazy::new(|| selector("div.result-email a[href]"));
static SERVICE_AREA_SEL: Lazy<Selector> = Lazy::new(|| selector("div.result-service-area"));
static DESCRIPTION_SEL: Lazy<Selector> = Lazy::new(|| selector("div.result-description"));
static BOLD_SEL: Lazy<Selector> = Lazy::new(|| selector("strong, b"));

/// Whether a single class token marks a listing of `section`.
pub fn is_listing_class(section: SectionType, class: &str) -> bool {
    match section {
        SectionType::Recommended => RECOMMENDED_CLASS_RE.is_match(class),
        SectionType::Regular => class.contains("result-normal"),
    }
}

/// Turns one listing fragment into a record.
pub trait SectionExtractor: Sync {
    fn section(&self) -> SectionType;

    /// Read every field; absent fields stay empty.
    fn extract_fields(&self, fragment: ElementRef<'_>) -> CompanyRecord;

    /// Check the fragment has the expected shape, then read its fields.
    fn extract(&self, fragment: ElementRef<'_>) -> Result<CompanyRecord, ExtractionError> {
        let section = self.section();
        if !fragment.value().classes().any(|c| is_listing_class(section, c)) {
            return Err(ExtractionError::WrongSection {
                expected: section,
                class: fragment.value().attr("class").unwrap_or_default().to_string(),
            });
        }
        if fragment.text().all(|t| t.trim().is_empty()) {
            return Err(ExtractionError::Empty { section });
        }
        Ok(self.extract_fields(fragment))
    }
}

pub struct RecommendedExtractor;

impl SectionExtractor for RecommendedExtractor {
    fn section(&self) -> SectionType {
        SectionType::Recommended
    }

    fn extract_fields(&self, fragment: ElementRef<'_>) -> CompanyRecord {
        let mut record = CompanyRecord::new(SectionType::Recommended);

        if let Some(name) = fragment.select(&NAME_SEL).next() {
            record.name = element_text(name);
        }

        if let Some(href) = fragment
            .select(&WEBSITE_LINK_SEL)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            record.website = href.trim().to_string();
        }

        if let Some(phone) = fragment.select(&PHONE_SEL).next() {
            let text = element_text(phone);
            if let Some(m) = PHONE_RE.find(&text) {
                record.phone = m.as_str().trim().to_string();
            }
        }

        record.email = recommended_email(fragment);

        if let Some(area) = fragment.select(&SERVICE_AREA_SEL).next() {
            let text = element_text(area);
            record.service_area = SERVICE_AREA_LABEL_RE.replace(&text, "").trim().to_string();
        }

        if let Some(desc) = fragment.select(&DESCRIPTION_SEL).next() {
            record.description = truncate_chars(&element_text(desc), DESCRIPTION_MAX_CHARS);
        }

        record
    }
}

/// Email from the visible text, falling back to a `mailto:` link when the
/// address is only in the href.
fn recommended_email(fragment: ElementRef<'_>) -> String {
    if let Some(container) = fragment.select(&EMAIL_SEL).next() {
        let text = element_text(container);
        if let Some(m) = EMAIL_RE.find(&text) {
            return m.as_str().to_string();
        }
    }
    fragment
        .select(&MAILTO_SEL)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| href.trim().strip_prefix("mailto:"))
        .find_map(|addr| EMAIL_RE.find(addr).map(|m| m.as_str().to_string()))
        .unwrap_or_default()
}

pub struct RegularExtractor;

impl SectionExtractor for RegularExtractor {
    fn section(&self) -> SectionType {
        SectionType::Regular
    }

    fn extract_fields(&self, fragment: ElementRef<'_>) -> CompanyRecord {
        let mut record = CompanyRecord::new(SectionType::Regular);

        if let Some(bold) = fragment.select(&BOLD_SEL).next() {
            record.name = element_text(bold).trim_end_matches(':').trim().to_string();
        }

        let text = block_text(fragment);

        if let Some(caps) = LABELED_PHONE_RE.captures(&text) {
            record.phone = caps[1].trim().to_string();
        }

        if let Some(caps) = LABELED_SERVICE_AREA_RE.captures(&text) {
            record.service_area = caps[1].trim().to_string();
        }

        if let Some(m) = EMAIL_RE.find(&text) {
            record.email = m.as_str().to_string();
        }

        record
    }
}

static RECOMMENDED: RecommendedExtractor = RecommendedExtractor;
static REGULAR: RegularExtractor = RegularExtractor;

pub fn extractor_for(section: SectionType) -> &'static dyn SectionExtractor {
    match section {
        SectionType::Recommended => &RECOMMENDED,
        SectionType::Regular => &REGULAR,
    }
}

/// Extract one fragment with the rules for `section`.
pub fn extract(fragment: ElementRef<'_>, section: SectionType) -> Result<CompanyRecord, ExtractionError> {
    extractor_for(section).extract(fragment)
}
