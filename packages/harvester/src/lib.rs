//! DoD Award Harvester - Fetch contract announcements and export award records.
//!
//! This crate is the I/O shell around `dodaward_extractor`. It downloads
//! the daily contract announcement pages into a local cache, parses each
//! cached page into a `Document`, runs extraction over every page in
//! parallel, and writes the records as CSV.
//!
//! # Example
//!
//! ```
//! use dodaward_harvester::config;
//!
//! assert!(config::validate_article_id("3251958").is_ok());
//! assert_eq!(
//!     config::article_url("3251958"),
//!     "http://www.defense.gov/News/Contracts/Contract/Article/3251958/"
//! );
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants, validation and runtime settings
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client with fixed-delay retry
//! - [`html`]: Page parsing and article link discovery
//! - [`cache`]: Local page cache
//! - [`fetch`]: Listing walk and page download
//! - [`harvester`]: Parallel extraction over cached pages
//! - [`output`]: CSV output
//! - [`cli`]: Command-line interface

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod harvester;
pub mod html;
pub mod http;
pub mod output;

// Re-export main functions
pub use fetch::fetch_articles;
pub use harvester::{extract_directory, extract_file};
pub use html::parse_document;

// Re-export commonly used items
pub use config::{validate_article_id, HarvesterConfig};
pub use error::{HarvesterError, Result};
