//! Configuration constants and validation functions for the harvester.

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use url::Url;

use crate::error::{HarvesterError, Result};

/// Contract announcement listing, paged with `?Page=N` starting at 1.
pub const LISTING_URL: &str = "https://www.defense.gov/News/Contracts/";

/// Base of the canonical article link recorded with every award.
pub const ARTICLE_LINK_BASE: &str = "http://www.defense.gov/News/Contracts/Contract/Article";

/// Path segment sequence that marks a contract article link.
pub const ARTICLE_PATH_MARKER: &str = "/News/Contracts/Contract/Article/";

/// Number of listing pages walked by default.
pub const DEFAULT_PAGES: u32 = 210;

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Fixed delay between attempts for a failing request.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 30;

/// Attempts per URL: the first request plus one retry.
pub const MAX_ATTEMPTS: u32 = 2;

/// Paragraphs of this many characters or fewer are layout, not announcements.
pub const MIN_PARAGRAPH_CHARS: usize = 200;

/// Page title heading.
pub const TITLE_SELECTOR: &str = "h1.maintitle";

/// Article body container.
pub const BODY_SELECTOR: &str = "div.adetail.abanner.no-abanner-mobile.aframe.content-type-400";

/// Default directory of cached article pages.
pub const DEFAULT_CACHE_DIR: &str = "page_htmls";

/// Default award output file.
pub const DEFAULT_AWARDS_FILE: &str = "webscraped_data.csv";

/// Default correction output file.
pub const DEFAULT_CORRECTIONS_FILE: &str = "correction.csv";

/// Extension of cached article pages.
pub const CACHE_EXTENSION: &str = "html";

/// Article ID pattern: digits only.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICLE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// Validate an article ID.
///
/// # Examples
/// ```
/// use dodaward_harvester::config::validate_article_id;
///
/// assert!(validate_article_id("3251958").is_ok());
/// assert!(validate_article_id("../etc").is_err());
/// ```
pub fn validate_article_id(article_id: &str) -> Result<()> {
    if ARTICLE_ID_PATTERN.is_match(article_id) {
        Ok(())
    } else {
        Err(HarvesterError::InvalidArticleId(article_id.to_string()))
    }
}

/// Build the URL of one listing page.
///
/// # Examples
/// ```
/// use dodaward_harvester::config::{listing_url, LISTING_URL};
///
/// assert_eq!(
///     listing_url(LISTING_URL, 3),
///     "https://www.defense.gov/News/Contracts/?Page=3"
/// );
/// ```
pub fn listing_url(base: &str, page: u32) -> String {
    format!("{base}?Page={page}")
}

/// Build the canonical link of an article.
///
/// # Panics
/// Debug builds panic if `article_id` was not validated.
pub fn article_url(article_id: &str) -> String {
    debug_assert!(
        ARTICLE_ID_PATTERN.is_match(article_id),
        "article_id should be validated before calling article_url"
    );
    format!("{ARTICLE_LINK_BASE}/{article_id}/")
}

/// Cache file name of an article.
pub fn cache_file_name(article_id: &str) -> String {
    format!("{article_id}.{CACHE_EXTENSION}")
}

/// Recover the article ID from an article link.
///
/// Relative links are resolved against `LISTING_URL`. Returns `None` for
/// links that do not point at a contract article.
///
/// # Examples
/// ```
/// use dodaward_harvester::config::article_id_from_link;
///
/// assert_eq!(
///     article_id_from_link("https://www.defense.gov/News/Contracts/Contract/Article/3251958/"),
///     Some("3251958".to_string())
/// );
/// assert_eq!(article_id_from_link("https://www.defense.gov/News/"), None);
/// ```
pub fn article_id_from_link(link: &str) -> Option<String> {
    let url = Url::parse(LISTING_URL).ok()?.join(link).ok()?;
    let rest = url.path().split_once(ARTICLE_PATH_MARKER)?.1;
    let id = rest.split('/').next()?;
    validate_article_id(id).ok()?;
    Some(id.to_string())
}

/// Runtime settings for fetching and extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvesterConfig {
    pub cache_dir: PathBuf,
    pub workers: usize,
    pub retry_delay: Duration,
    pub listing_url: String,
    pub start_page: u32,
    pub pages: u32,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            workers: default_workers(),
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            listing_url: LISTING_URL.to_string(),
            start_page: 1,
            pages: DEFAULT_PAGES,
        }
    }
}

impl HarvesterConfig {
    /// Read settings from `DODAWARD_CACHE_DIR`, `DODAWARD_WORKERS` and
    /// `DODAWARD_RETRY_DELAY_SECS`. Unset or unparseable values keep their
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let cache_dir = var("DODAWARD_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_dir);

        let workers = var("DODAWARD_WORKERS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.workers);

        let retry_delay = var("DODAWARD_RETRY_DELAY_SECS")
            .and_then(|v| v.parse().ok())
            .map_or(defaults.retry_delay, Duration::from_secs);

        Self {
            cache_dir,
            workers,
            retry_delay,
            ..defaults
        }
        .with_workers(workers)
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Set the worker count; at least one worker always runs.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_listing_url(mut self, listing_url: impl Into<String>) -> Self {
        self.listing_url = listing_url.into();
        self
    }

    pub fn with_start_page(mut self, start_page: u32) -> Self {
        self.start_page = start_page.max(1);
        self
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    /// Listing page numbers to walk, in order.
    pub fn page_range(&self) -> std::ops::Range<u32> {
        self.start_page..self.start_page.saturating_add(self.pages)
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_validate_article_id_valid() {
        assert!(validate_article_id("3251958").is_ok());
        assert!(validate_article_id("1").is_ok());
    }

    #[test]
    fn test_validate_article_id_invalid() {
        assert!(validate_article_id("").is_err());
        assert!(validate_article_id("32519a8").is_err());
        assert!(validate_article_id("3251958/").is_err());
        assert!(validate_article_id("../3251958").is_err());
    }

    #[test]
    fn test_listing_url() {
        assert_eq!(
            listing_url(LISTING_URL, 1),
            "https://www.defense.gov/News/Contracts/?Page=1"
        );
        assert_eq!(
            listing_url("http://127.0.0.1:8080/News/Contracts/", 12),
            "http://127.0.0.1:8080/News/Contracts/?Page=12"
        );
    }

    #[test]
    fn test_article_url() {
        assert_eq!(
            article_url("3251958"),
            "http://www.defense.gov/News/Contracts/Contract/Article/3251958/"
        );
    }

    #[test]
    fn test_cache_file_name() {
        assert_eq!(cache_file_name("3251958"), "3251958.html");
    }

    #[test]
    fn test_article_id_from_link() {
        assert_eq!(
            article_id_from_link("http://www.defense.gov/News/Contracts/Contract/Article/3251958/"),
            Some("3251958".to_string())
        );
        // Slug after the ID
        assert_eq!(
            article_id_from_link(
                "https://www.defense.gov/News/Contracts/Contract/Article/3251958/contracts-for-dec-28-2022/"
            ),
            Some("3251958".to_string())
        );
        // Relative link
        assert_eq!(
            article_id_from_link("/News/Contracts/Contract/Article/3251958/"),
            Some("3251958".to_string())
        );
    }

    #[test]
    fn test_article_id_from_link_rejects_other_pages() {
        assert_eq!(article_id_from_link("https://www.defense.gov/News/Releases/"), None);
        assert_eq!(
            article_id_from_link("https://www.defense.gov/News/Contracts/Contract/Article/latest/"),
            None
        );
        assert_eq!(article_id_from_link("mailto:press@defense.gov"), None);
    }

    #[test]
    fn test_config_defaults() {
        let config = HarvesterConfig::default();
        assert_eq!(config.cache_dir, PathBuf::from("page_htmls"));
        assert_eq!(config.retry_delay, Duration::from_secs(30));
        assert_eq!(config.pages, 210);
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_config_from_vars() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DODAWARD_CACHE_DIR", "/tmp/pages"),
            ("DODAWARD_WORKERS", "3"),
            ("DODAWARD_RETRY_DELAY_SECS", "0"),
        ]);
        let config = HarvesterConfig::from_vars(|key| vars.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.cache_dir, PathBuf::from("/tmp/pages"));
        assert_eq!(config.workers, 3);
        assert_eq!(config.retry_delay, Duration::ZERO);
    }

    #[test]
    fn test_config_from_vars_ignores_invalid_values() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("DODAWARD_WORKERS", "many"), ("DODAWARD_RETRY_DELAY_SECS", "-1")]);
        let config = HarvesterConfig::from_vars(|key| vars.get(key).map(|v| (*v).to_string()));
        let defaults = HarvesterConfig::default();

        assert_eq!(config.workers, defaults.workers);
        assert_eq!(config.retry_delay, defaults.retry_delay);
    }

    #[test]
    fn test_config_zero_workers_clamped() {
        assert_eq!(HarvesterConfig::default().with_workers(0).workers, 1);
    }

    #[test]
    fn test_page_range() {
        let config = HarvesterConfig::default().with_start_page(3).with_pages(2);
        assert_eq!(config.page_range().collect::<Vec<_>>(), vec![3, 4]);

        let none = HarvesterConfig::default().with_pages(0);
        assert_eq!(none.page_range().count(), 0);
    }
}
