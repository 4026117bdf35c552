//! Fetch workflow: walk the listing pages and fill the page cache.

use reqwest::blocking::Client;
use url::Url;

use crate::cache::{is_cached, store};
use crate::config::{listing_url, HarvesterConfig};
use crate::error::Result;
use crate::html::discover_article_links;
use crate::http::download_text;

/// A URL that could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub url: String,
    pub error: String,
}

/// Outcome of a fetch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub pages: u32,
    pub discovered: usize,
    pub downloaded: usize,
    pub already_cached: usize,
    pub failures: Vec<FetchFailure>,
}

/// Download every uncached article linked from the configured listing pages.
///
/// A listing page or article that keeps failing is recorded in the summary
/// and the run moves on. `on_page` is called before each listing page.
///
/// # Errors
/// Fails only when the listing URL itself is malformed or the cache cannot
/// be written.
pub fn fetch_articles(
    client: &Client,
    config: &HarvesterConfig,
    mut on_page: impl FnMut(u32),
) -> Result<FetchSummary> {
    let mut summary = FetchSummary::default();

    for page in config.page_range() {
        on_page(page);
        let url = listing_url(&config.listing_url, page);
        let base = Url::parse(&url)?;

        let listing = match download_text(client, &url, config.retry_delay) {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Skipping listing page");
                summary.failures.push(FetchFailure {
                    url,
                    error: e.to_string(),
                });
                continue;
            }
        };
        summary.pages += 1;

        let links = discover_article_links(&listing, &base);
        tracing::info!(page, links = links.len(), "Discovered article links");
        summary.discovered += links.len();

        for link in links {
            if is_cached(&config.cache_dir, &link.id) {
                tracing::debug!(id = %link.id, "Already cached");
                summary.already_cached += 1;
                continue;
            }

            match download_text(client, &link.url, config.retry_delay) {
                Ok(html) => {
                    store(&config.cache_dir, &link.id, &html)?;
                    summary.downloaded += 1;
                }
                Err(e) => {
                    tracing::warn!(url = %link.url, error = %e, "Skipping article");
                    summary.failures.push(FetchFailure {
                        url: link.url,
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::create_client;
    use httpmock::prelude::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_fetch_articles_downloads_uncached() {
        let server = MockServer::start();
        let listing = format!(
            r#"<a href="{0}/News/Contracts/Contract/Article/101/">a</a>
               <a href="/News/Contracts/Contract/Article/102/">b</a>
               <a href="{0}/News/Releases/">c</a>"#,
            server.base_url()
        );
        let listing_mock = server.mock(|when, then| {
            when.method(GET).path("/News/Contracts/").query_param("Page", "1");
            then.status(200).body(listing.clone());
        });
        let article_101 = server.mock(|when, then| {
            when.method(GET).path("/News/Contracts/Contract/Article/101/");
            then.status(200).body("<html>101</html>");
        });
        let article_102 = server.mock(|when, then| {
            when.method(GET).path("/News/Contracts/Contract/Article/102/");
            then.status(200).body("<html>102</html>");
        });

        let dir = TempDir::new().unwrap();
        store(dir.path(), "102", "<html>old</html>").unwrap();
        let config = HarvesterConfig::default()
            .with_cache_dir(dir.path())
            .with_listing_url(server.url("/News/Contracts/"))
            .with_pages(1)
            .with_retry_delay(Duration::ZERO);

        let mut visited = Vec::new();
        let summary = fetch_articles(&create_client().unwrap(), &config, |p| visited.push(p)).unwrap();

        listing_mock.assert();
        article_101.assert();
        article_102.assert_hits(0);
        assert_eq!(visited, vec![1]);
        assert_eq!(summary.pages, 1);
        assert_eq!(summary.discovered, 2);
        assert_eq!(summary.downloaded, 1);
        assert_eq!(summary.already_cached, 1);
        assert!(summary.failures.is_empty());
        assert!(is_cached(dir.path(), "101"));
    }

    #[test]
    fn test_fetch_articles_records_failures() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/News/Contracts/").query_param("Page", "1");
            then.status(503);
        });
        let listing = r#"<a href="/News/Contracts/Contract/Article/201/">a</a>"#;
        server.mock(|when, then| {
            when.method(GET).path("/News/Contracts/").query_param("Page", "2");
            then.status(200).body(listing);
        });
        server.mock(|when, then| {
            when.method(GET).path("/News/Contracts/Contract/Article/201/");
            then.status(404);
        });

        let dir = TempDir::new().unwrap();
        let config = HarvesterConfig::default()
            .with_cache_dir(dir.path())
            .with_listing_url(server.url("/News/Contracts/"))
            .with_pages(2)
            .with_retry_delay(Duration::ZERO);

        let summary = fetch_articles(&create_client().unwrap(), &config, |_| {}).unwrap();

        assert_eq!(summary.pages, 1);
        assert_eq!(summary.downloaded, 0);
        assert_eq!(summary.failures.len(), 2);
        assert!(summary.failures[0].url.ends_with("?Page=1"));
        assert!(summary.failures[1].url.ends_with("/Article/201/"));
        assert!(!is_cached(dir.path(), "201"));
    }
}
