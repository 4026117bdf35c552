//! DoD Award Extractor - Structured award records from contract announcements.
//!
//! This crate turns the prose of daily contract announcements ("Acme Corp.,
//! Reston, Virginia, is awarded a $5,000,000 contract (N0001922C1234) ...")
//! into award records: date, fiscal year, company, dollar amount,
//! procurement identifier and source reference. It works from lexical
//! heuristics only and performs no I/O.
//!
//! # Example
//!
//! ```
//! use dodaward_extractor::{assemble, Document, Rules};
//!
//! let doc = Document::new(
//!     "Contracts For Oct. 24, 2022",
//!     vec!["Acme Corp., Reston, Virginia, is awarded a $5,000,000 contract (N0001922C1234).".to_string()],
//!     "http://www.defense.gov/News/Contracts/Contract/Article/3251958/",
//! );
//! let extraction = assemble(&doc, &Rules::default()).unwrap();
//! assert_eq!(extraction.awards[0].company, "Acme Corp");
//! assert_eq!(extraction.awards[0].procurement_id.as_deref(), Some("N00019-22-C-1234"));
//! ```
//!
//! # Architecture
//!
//! - [`rules`]: Heuristic thresholds and markers
//! - [`text`]: Token helpers
//! - [`date`]: Title date recovery
//! - [`classify`]: Correction / multi-award / single-award routing
//! - [`identifier`]: Procurement identifier extraction
//! - [`fiscal_year`]: Fiscal year derivation and reconciliation
//! - [`company`]: Awardee name extraction
//! - [`amount`]: Dollar amount extraction
//! - [`splitter`]: Multi-award decomposition
//! - [`assembler`]: Per-document orchestration
//! - [`types`]: Documents, records and accumulators
//! - [`error`]: Error types and Result alias

pub mod amount;
pub mod assembler;
pub mod classify;
pub mod company;
pub mod date;
pub mod error;
pub mod fiscal_year;
pub mod identifier;
pub mod rules;
pub mod splitter;
pub mod text;
pub mod types;

// Re-export main functions
pub use assembler::{assemble, assemble_paragraph};

// Re-export commonly used items
pub use classify::ParagraphKind;
pub use error::{ExtractError, Result};
pub use rules::Rules;
pub use types::{AwardRecord, CorrectionRecord, Document, Extraction, NOT_AVAILABLE};
