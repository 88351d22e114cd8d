pub mod extract;
pub mod text;

use crate::config::SiteLayout;
use crate::parser::extract::is_listing_class;
use crate::parser::text::element_text;
use crate::types::SectionType;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

pub use extract::{extract, extractor_for, RecommendedExtractor, RegularExtractor, SectionExtractor};

static HEADING_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").expect("valid selector"));
static DIV_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("div").expect("valid selector"));

/// One company listing found on a state page.
#[derive(Debug, Clone, Copy)]
pub struct Fragment<'a> {
    pub element: ElementRef<'a>,
    pub section: SectionType,
}

/// Locates the recommended and regular listing blocks on a state page.
pub struct PageParser<'c> {
    layout: &'c SiteLayout,
}

impl<'c> PageParser<'c> {
    pub fn new(layout: &'c SiteLayout) -> Self {
        Self { layout }
    }

    /// All listing fragments on the page, recommended first.
    ///
    /// A missing heading or container yields no fragments for that section.
    pub fn parse<'a>(&self, document: &'a Html, state: &str) -> Vec<Fragment<'a>> {
        let mut fragments = self.section_fragments(document, SectionType::Recommended);
        let recommended = fragments.len();
        fragments.extend(self.section_fragments(document, SectionType::Regular));
        debug!(
            "{}: {} recommended and {} regular fragments",
            state,
            recommended,
            fragments.len() - recommended
        );
        fragments
    }

    fn section_fragments<'a>(&self, document: &'a Html, section: SectionType) -> Vec<Fragment<'a>> {
        let Some(heading) = self.find_heading(document, section) else {
            debug!("No {} heading on page", section);
            return Vec::new();
        };
        let Some(container) = self.container_after(heading, section) else {
            debug!("No {} container after heading", section);
            return Vec::new();
        };
        container
            .select(&DIV_SEL)
            .filter(|div| div.value().classes().any(|c| is_listing_class(section, c)))
            .map(|element| Fragment { element, section })
            .collect()
    }

    fn find_heading<'a>(&self, document: &'a Html, section: SectionType) -> Option<ElementRef<'a>> {
        document
            .select(&HEADING_SEL)
            .find(|h| self.heading_matches(&element_text(*h), section))
    }

    /// The recommended heading may carry extra words around the title; the
    /// regular heading must be exactly the title, or it would also match the
    /// recommended one.
    fn heading_matches(&self, text: &str, section: SectionType) -> bool {
        let text = text.trim().to_lowercase();
        match section {
            SectionType::Recommended => {
                text.contains(&self.layout.recommended_heading.to_lowercase())
            }
            SectionType::Regular => text == self.layout.regular_heading.trim().to_lowercase(),
        }
    }

    fn container_after<'a>(&self, heading: ElementRef<'a>, section: SectionType) -> Option<ElementRef<'a>> {
        let class = match section {
            SectionType::Recommended => &self.layout.recommended_container_class,
            SectionType::Regular => &self.layout.regular_container_class,
        };
        heading
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "div" && el.value().classes().any(|c| c == class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <h3>Recommended HOA Management Companies</h3>
          <p>Our partners</p>
          <div class="hoa-directory-recommended">
            <div class="result result-gold"><h4 class="result-name">Gold One</h4></div>
            <div class="result result-platinum"><h4 class="result-name">Platinum One</h4></div>
            <div class="result result-silver"><h4 class="result-name">Ignored</h4></div>
          </div>
          <h3>  HOA Management Companies </h3>
          <div class="hoa-directory-results">
            <div class="result-normal"><strong>Reg A:</strong></div>
            <div class="result-normal odd"><strong>Reg B:</strong></div>
            <div class="ad">Sponsored</div>
          </div>
        </body></html>"#;

    fn names(fragments: &[Fragment<'_>]) -> Vec<(String, SectionType)> {
        fragments
            .iter()
            .map(|f| (element_text(f.element), f.section))
            .collect()
    }

    #[test]
    fn finds_both_sections() {
        let layout = SiteLayout::default();
        let doc = Html::parse_document(PAGE);
        let fragments = PageParser::new(&layout).parse(&doc, "Alabama");
        assert_eq!(
            names(&fragments),
            vec![
                ("Gold One".to_string(), SectionType::Recommended),
                ("Platinum One".to_string(), SectionType::Recommended),
                ("Reg A:".to_string(), SectionType::Regular),
                ("Reg B:".to_string(), SectionType::Regular),
            ]
        );
    }

    #[test]
    fn missing_headings_yield_nothing() {
        let layout = SiteLayout::default();
        let doc = Html::parse_document("<html><body><h3>Other</h3><div class=\"hoa-directory-results\"><div class=\"result-normal\"><b>X</b></div></div></body></html>");
        assert!(PageParser::new(&layout).parse(&doc, "Alaska").is_empty());
    }

    #[test]
    fn heading_without_container_yields_nothing() {
        let layout = SiteLayout::default();
        let doc = Html::parse_document(
            "<html><body><h3>HOA Management Companies</h3><div class=\"something-else\"><div class=\"result-normal\"><b>X</b></div></div></body></html>",
        );
        assert!(PageParser::new(&layout).parse(&doc, "Alaska").is_empty());
    }

    #[test]
    fn regular_heading_is_anchored() {
        let layout = SiteLayout::default();
        let doc = Html::parse_document(
            r#"<html><body>
              <h3>Top HOA Management Companies in Ohio</h3>
              <div class="hoa-directory-results"><div class="result-normal"><b>X</b></div></div>
            </body></html>"#,
        );
        assert!(PageParser::new(&layout).parse(&doc, "Ohio").is_empty());
    }

    #[test]
    fn headings_match_case_insensitively() {
        let layout = SiteLayout::default();
        let doc = Html::parse_document(
            r#"<html><body>
              <h3>recommended hoa management companies</h3>
              <div class="hoa-directory-recommended"><div class="result-gold"><h4 class="result-name">G</h4></div></div>
              <h3>hoa MANAGEMENT companies</h3>
              <div class="hoa-directory-results"><div class="result-normal"><b>R</b></div></div>
            </body></html>"#,
        );
        let fragments = PageParser::new(&layout).parse(&doc, "Utah");
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].section, SectionType::Recommended);
        assert_eq!(fragments[1].section, SectionType::Regular);
    }

    #[test]
    fn layout_overrides_container_class() {
        let layout = SiteLayout {
            regular_container_class: "directory-list".to_string(),
            ..SiteLayout::default()
        };
        let doc = Html::parse_document(
            r#"<html><body><h3>HOA Management Companies</h3>
              <div class="directory-list"><div class="result-normal"><b>R</b></div></div></body></html>"#,
        );
        assert_eq!(PageParser::new(&layout).parse(&doc, "Iowa").len(), 1);
    }
}
