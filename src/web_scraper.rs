//! Scrapes the Billboard Hot 100 page for a given chart date.
//!
//! The page offers no API; titles are pulled straight out of its markup.
//! The selection heuristic lives behind [`TitleExtractor`] so a markup
//! change only ever touches one strategy, not the pipeline around it.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::error::Result;

const CHART_URL: &str = "https://www.billboard.com/charts/hot-100";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Where an ordered list of charted song titles comes from.
#[async_trait(?Send)]
pub trait ChartSource {
    /// Returns the titles for `date` in chart order. An empty list is not an
    /// error here; the caller decides whether that is fatal.
    async fn fetch(&self, date: &str) -> Result<Vec<String>>;
}

/// How song titles are located inside a fetched chart document.
pub trait TitleExtractor {
    fn extract(&self, html: &str) -> Vec<String>;
}

/// Matches the Hot 100 markup: a song title is an `<h3>` carrying both the
/// `c-title` and `a-no-trucate` classes ("trucate" is Billboard's typo, not
/// ours). Tied to the page's current structure and expected to break when
/// Billboard reworks it; zero matches on a valid date is the symptom.
pub struct Hot100Extractor;

impl TitleExtractor for Hot100Extractor {
    fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let selector = Selector::parse("h3.c-title.a-no-trucate").unwrap();

        document
            .select(&selector)
            .map(|tag| tag.text().collect::<String>().trim().to_string())
            .collect()
    }
}

pub struct ChartScraper {
    http: reqwest::Client,
    extractor: Box<dyn TitleExtractor>,
}

impl ChartScraper {
    pub fn new() -> Result<Self> {
        Self::with_extractor(Box::new(Hot100Extractor))
    }

    pub fn with_extractor(extractor: Box<dyn TitleExtractor>) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { http, extractor })
    }

    fn chart_url(date: &str) -> String {
        format!("{CHART_URL}/{date}")
    }
}

#[async_trait(?Send)]
impl ChartSource for ChartScraper {
    async fn fetch(&self, date: &str) -> Result<Vec<String>> {
        let url = Self::chart_url(date);
        log::debug!("[Scraper] Fetching {url}");

        let body = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let titles = self.extractor.extract(&body);
        log::info!("[Scraper] Found {} song titles for {date}", titles.len());
        Ok(titles)
    }
}
