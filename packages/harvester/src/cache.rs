//! Local page cache: one `<article-id>.html` file per downloaded article.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{article_url, cache_file_name, validate_article_id, CACHE_EXTENSION};
use crate::error::Result;

/// Path of an article's cache file.
pub fn cache_path(cache_dir: &Path, article_id: &str) -> PathBuf {
    cache_dir.join(cache_file_name(article_id))
}

/// Whether an article has been downloaded already.
pub fn is_cached(cache_dir: &Path, article_id: &str) -> bool {
    cache_path(cache_dir, article_id).is_file()
}

/// Write an article page to the cache, creating the directory if needed.
pub fn store(cache_dir: &Path, article_id: &str, html: &str) -> Result<PathBuf> {
    validate_article_id(article_id)?;
    fs::create_dir_all(cache_dir)?;

    let path = cache_path(cache_dir, article_id);
    fs::write(&path, html)?;
    tracing::debug!(path = %path.display(), "Stored article page");
    Ok(path)
}

/// List cached pages, sorted by file name.
///
/// Only regular files with the cache extension are returned.
pub fn list_cached(cache_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages = Vec::new();
    for entry in fs::read_dir(cache_dir)? {
        let path = entry?.path();
        let is_page = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(CACHE_EXTENSION));
        if is_page {
            pages.push(path);
        }
    }
    pages.sort();
    Ok(pages)
}

/// Rebuild the canonical article link of a cached page.
///
/// Pages whose file stem is not an article ID keep their file name as
/// source reference.
pub fn source_ref_for(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    if validate_article_id(stem).is_ok() {
        article_url(stem)
    } else {
        tracing::debug!(path = %path.display(), "Cache file name is not an article ID");
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_store_and_is_cached() {
        let dir = TempDir::new().unwrap();
        let cache_dir = dir.path().join("page_htmls");

        assert!(!is_cached(&cache_dir, "3251958"));
        let path = store(&cache_dir, "3251958", "<html></html>").unwrap();

        assert!(is_cached(&cache_dir, "3251958"));
        assert_eq!(path, cache_dir.join("3251958.html"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_store_rejects_invalid_id() {
        let dir = TempDir::new().unwrap();
        assert!(store(dir.path(), "../escape", "x").is_err());
    }

    #[test]
    fn test_list_cached_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        for name in ["3251958.html", "3250001.html", "notes.txt", "3249000.HTML"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.html")).unwrap();

        let names: Vec<_> = list_cached(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["3249000.HTML", "3250001.html", "3251958.html"]);
    }

    #[test]
    fn test_list_cached_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert!(list_cached(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_source_ref_for() {
        assert_eq!(
            source_ref_for(Path::new("page_htmls/3251958.html")),
            "http://www.defense.gov/News/Contracts/Contract/Article/3251958/"
        );
        assert_eq!(source_ref_for(Path::new("page_htmls/sample.html")), "sample.html");
    }
}
