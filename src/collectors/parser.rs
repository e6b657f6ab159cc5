use chrono::Utc;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, ParseError};
use crate::models::job::JobRecord;

pub const UNKNOWN_COMPANY: &str = "Unknown company";
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Structural markers of a listing page. Markup drift on the site is
/// fixed here, not in the extraction code.
#[derive(Debug, Clone)]
pub struct CardSelectors {
    pub origin: &'static str,
    pub card: &'static str,
    /// Mandatory: cards without it are dropped.
    pub link: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub date: &'static str,
    pub date_fallback: &'static str,
    pub date_attribute: &'static str,
    pub id_attribute: &'static str,
    /// First capture group is the job id.
    pub id_in_url: &'static str,
}

impl CardSelectors {
    pub fn linkedin() -> Self {
        Self {
            origin: "https://www.linkedin.com",
            card: "li",
            link: "a.base-card__full-link",
            company: "h4.base-search-card__subtitle",
            location: "span.job-search-card__location",
            date: "time.job-search-card__listdate",
            date_fallback: "time",
            date_attribute: "datetime",
            id_attribute: "data-id",
            id_in_url: r"(?:^|/)(?:jobs|view)/(\d+)",
        }
    }
}

/// Turns one page of listing markup into records, in document order.
#[derive(Debug)]
pub struct ListingParser {
    origin: String,
    card: Selector,
    link: Selector,
    company: Selector,
    location: Selector,
    date: Selector,
    date_fallback: Selector,
    date_attribute: String,
    id_attribute: String,
    id_in_url: Regex,
}

impl ListingParser {
    pub fn new(selectors: &CardSelectors) -> Result<Self, AppError> {
        Ok(Self {
            origin: selectors.origin.trim_end_matches('/').to_string(),
            card: compile(selectors.card)?,
            link: compile(selectors.link)?,
            company: compile(selectors.company)?,
            location: compile(selectors.location)?,
            date: compile(selectors.date)?,
            date_fallback: compile(selectors.date_fallback)?,
            date_attribute: selectors.date_attribute.to_string(),
            id_attribute: selectors.id_attribute.to_string(),
            id_in_url: Regex::new(selectors.id_in_url)?,
        })
    }

    pub fn parse(&self, markup: &str, keyword: &str) -> Vec<JobRecord> {
        let document = Html::parse_document(markup);
        let mut records = Vec::new();

        for (index, card) in document.select(&self.card).enumerate() {
            match self.extract_card(card, keyword) {
                Ok(record) => records.push(record),
                Err(e) => tracing::debug!("Skipping card {index}: {e}"),
            }
        }

        records
    }

    fn extract_card(&self, card: ElementRef<'_>, keyword: &str) -> Result<JobRecord, ParseError> {
        let link = card.select(&self.link).next().ok_or(ParseError::MissingLink)?;
        let href = link
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(ParseError::MissingHref)?;

        let title = text_of(link);
        let company = card
            .select(&self.company)
            .next()
            .map(text_of)
            .unwrap_or_else(|| UNKNOWN_COMPANY.to_string());
        let location = card
            .select(&self.location)
            .next()
            .map(text_of)
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

        Ok(JobRecord {
            keyword: keyword.to_string(),
            job_id: self.job_id(card, href),
            title,
            company,
            location,
            url: self.absolute_url(href),
            date_posted: self.date_posted(card),
            scrape_time: Utc::now(),
        })
    }

    /// Specific date marker first, then any time element in the card.
    fn date_posted(&self, card: ElementRef<'_>) -> String {
        let element = card
            .select(&self.date)
            .next()
            .or_else(|| card.select(&self.date_fallback).next());

        element
            .and_then(|e| e.value().attr(&self.date_attribute))
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    fn job_id(&self, card: ElementRef<'_>, href: &str) -> String {
        if let Some(id) = card
            .value()
            .attr(&self.id_attribute)
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            return id.to_string();
        }

        self.id_in_url
            .captures(href)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    fn absolute_url(&self, href: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else if href.starts_with('/') {
            format!("{}{href}", self.origin)
        } else {
            format!("{}/{href}", self.origin)
        }
    }
}

fn compile(selector: &str) -> Result<Selector, AppError> {
    Selector::parse(selector).map_err(|e| AppError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ListingParser {
        ListingParser::new(&CardSelectors::linkedin()).unwrap()
    }

    const PAGE: &str = r#"
        <li data-id="3901">
          <div class="base-card">
            <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/rust-dev-3901?trk=x">
              Rust Developer
            </a>
            <h4 class="base-search-card__subtitle"> Ferrous Systems </h4>
            <span class="job-search-card__location">Berlin, Germany</span>
            <time class="job-search-card__listdate" datetime="2025-03-01">2 weeks ago</time>
          </div>
        </li>
        <li>
          <div class="base-card">
            <span>Promoted content without a link</span>
          </div>
        </li>
        <li>
          <a class="base-card__full-link" href="/jobs/view/123">Backend Engineer</a>
          <time class="job-search-card__listdate--new" datetime="2025-03-10">1 day ago</time>
        </li>
    "#;

    #[test]
    fn cards_are_emitted_in_document_order() {
        let records = parser().parse(PAGE, "Rust");
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Rust Developer", "Backend Engineer"]);
        assert!(records.iter().all(|r| r.keyword == "Rust"));
    }

    #[test]
    fn card_without_link_is_skipped_without_affecting_siblings() {
        let records = parser().parse(PAGE, "Rust");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].url, "https://www.linkedin.com/jobs/view/123");
    }

    #[test]
    fn full_card_extracts_every_field() {
        let records = parser().parse(PAGE, "Rust");
        let first = &records[0];
        assert_eq!(first.job_id, "3901");
        assert_eq!(first.company, "Ferrous Systems");
        assert_eq!(first.location, "Berlin, Germany");
        assert_eq!(first.date_posted, "2025-03-01");
        assert_eq!(
            first.url,
            "https://www.linkedin.com/jobs/view/rust-dev-3901?trk=x"
        );
    }

    #[test]
    fn missing_optional_fields_fall_back() {
        let records = parser().parse(PAGE, "Rust");
        let second = &records[1];
        assert_eq!(second.company, UNKNOWN_COMPANY);
        assert_eq!(second.location, UNKNOWN_LOCATION);
        // generic time element is used when the specific marker is absent
        assert_eq!(second.date_posted, "2025-03-10");
        assert_eq!(second.job_id, "123");
    }

    #[test]
    fn date_is_empty_without_any_time_element() {
        let markup = r#"<li><a class="base-card__full-link" href="/jobs/view/1">A</a></li>"#;
        let records = parser().parse(markup, "Go");
        assert_eq!(records[0].date_posted, "");
    }

    #[test]
    fn job_id_comes_from_url_path_when_attribute_is_missing() {
        let markup = r#"
            <li><a class="base-card__full-link" href="https://example.com/jobs/123456">A</a></li>
            <li><a class="base-card__full-link" href="https://example.com/careers/engineer">B</a></li>
            <li><a class="base-card__full-link" href="https://example.com/myjobs/77">C</a></li>
        "#;
        let records = parser().parse(markup, "Go");
        assert_eq!(records[0].job_id, "123456");
        assert_eq!(records[1].job_id, "");
        assert_eq!(records[2].job_id, "");
    }

    #[test]
    fn link_without_href_drops_the_card() {
        let markup = r#"
            <li><a class="base-card__full-link">No target</a></li>
            <li><a class="base-card__full-link" href="  ">Blank target</a></li>
        "#;
        assert!(parser().parse(markup, "Go").is_empty());
    }

    #[test]
    fn relative_url_is_rewritten_against_origin() {
        let p = parser();
        assert_eq!(
            p.absolute_url("/jobs/view/123"),
            "https://www.linkedin.com/jobs/view/123"
        );
        assert_eq!(
            p.absolute_url("jobs/view/123"),
            "https://www.linkedin.com/jobs/view/123"
        );
        assert_eq!(p.absolute_url("https://x.test/a"), "https://x.test/a");
    }

    #[test]
    fn page_without_cards_yields_nothing() {
        assert!(parser().parse("<html><body></body></html>", "Go").is_empty());
        assert!(parser().parse("", "Go").is_empty());
    }

    #[test]
    fn broken_selector_table_is_rejected() {
        let mut selectors = CardSelectors::linkedin();
        selectors.link = "a[";
        assert!(matches!(
            ListingParser::new(&selectors),
            Err(AppError::Selector { .. })
        ));
    }
}
