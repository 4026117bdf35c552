//! HTML boundary: announcement pages in, `Document`s and article links out.

use std::collections::HashSet;
use std::sync::LazyLock;

use dodaward_extractor::Document;
use scraper::{Html, Selector};
use url::Url;

use crate::config::{
    article_id_from_link, ARTICLE_PATH_MARKER, BODY_SELECTOR, MIN_PARAGRAPH_CHARS, TITLE_SELECTOR,
};
use crate::error::{HarvesterError, Result};

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(TITLE_SELECTOR).expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(BODY_SELECTOR).expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

/// A contract article discovered on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleLink {
    pub id: String,
    pub url: String,
}

fn is_announcement(text: &str) -> bool {
    text.chars().count() > MIN_PARAGRAPH_CHARS
}

/// Parse an article page into a `Document`.
///
/// Paragraph texts longer than `MIN_PARAGRAPH_CHARS` are kept. Each is
/// split on blank lines and the pieces are filtered again, since some
/// pages pack several announcements into one `<p>`.
///
/// # Errors
/// Fails when the page has no title heading or no article body.
pub fn parse_document(html: &str, source_ref: &str) -> Result<Document> {
    let page = Html::parse_document(html);

    let title = page
        .select(&TITLE)
        .next()
        .ok_or_else(|| HarvesterError::MissingElement {
            element: TITLE_SELECTOR.to_string(),
            context: source_ref.to_string(),
        })?
        .text()
        .collect::<String>();

    let body = page
        .select(&BODY)
        .next()
        .ok_or_else(|| HarvesterError::MissingElement {
            element: BODY_SELECTOR.to_string(),
            context: source_ref.to_string(),
        })?;

    let paragraphs: Vec<String> = body
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .filter(|text| is_announcement(text))
        .flat_map(|text| {
            text.split("\n\n")
                .filter(|piece| is_announcement(piece))
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    tracing::debug!(
        source = source_ref,
        title = %title.trim(),
        paragraphs = paragraphs.len(),
        "Parsed article page"
    );

    Ok(Document::new(title, paragraphs, source_ref))
}

/// Find the contract article links on a listing page.
///
/// Hrefs are resolved against `base`. Links are de-duplicated and returned
/// in page order.
pub fn discover_article_links(listing_html: &str, base: &Url) -> Vec<ArticleLink> {
    let page = Html::parse_document(listing_html);
    let mut seen = HashSet::new();

    page.select(&LINK)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .filter(|url| url.path().contains(ARTICLE_PATH_MARKER))
        .filter_map(|url| {
            let id = article_id_from_link(url.as_str())?;
            seen.insert(id.clone()).then(|| ArticleLink {
                id,
                url: url.to_string(),
            })
        })
        .collect()
}
