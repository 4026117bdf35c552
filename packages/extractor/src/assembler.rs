//! Record assembly: one document in, award and correction records out.

use crate::amount::{apportion, extract_amount};
use crate::classify::{classify, ParagraphKind};
use crate::company::extract_company;
use crate::date::parse_title;
use crate::error::Result;
use crate::fiscal_year::reconcile;
use crate::identifier::extract_identifier;
use crate::rules::Rules;
use crate::splitter::{compose_identifier, split_multi_award, SplitOutcome};
use crate::text::tokenize;
use crate::types::{AwardRecord, CorrectionRecord, Document, Extraction};

/// Extract every award and correction from a document.
///
/// The date is recovered once from the title. Every paragraph is then
/// classified and routed; records keep paragraph order.
///
/// # Errors
/// Fails when the title carries no parseable date. No paragraph of the
/// document is processed in that case.
pub fn assemble(document: &Document, rules: &Rules) -> Result<Extraction> {
    let date = parse_title(&document.title)?;

    let mut extraction = Extraction::new();
    for paragraph in &document.paragraphs {
        extraction.absorb(assemble_paragraph(
            paragraph,
            &date,
            &document.source_ref,
            rules,
        ));
    }

    tracing::debug!(
        source = %document.source_ref,
        awards = extraction.awards.len(),
        corrections = extraction.corrections.len(),
        "Assembled document"
    );

    Ok(extraction)
}

/// Extract the records of a single paragraph.
pub fn assemble_paragraph(
    paragraph: &str,
    date: &str,
    source_ref: &str,
    rules: &Rules,
) -> Extraction {
    let tokens = tokenize(paragraph);
    let mut extraction = Extraction::new();

    match classify(&tokens, rules) {
        ParagraphKind::Correction => {
            extraction.corrections.push(CorrectionRecord {
                date: date.to_string(),
                paragraph: paragraph.to_string(),
            });
        }
        ParagraphKind::MultiAward => {
            extraction.awards = multi_award_records(&tokens, date, source_ref, rules);
        }
        ParagraphKind::SingleAward => {
            extraction
                .awards
                .push(single_award_record(&tokens, date, source_ref, rules));
        }
    }

    extraction
}

fn single_award_record(tokens: &[&str], date: &str, source_ref: &str, rules: &Rules) -> AwardRecord {
    let identifier = extract_identifier(tokens, rules);
    let (fiscal_year, procurement_id) = reconcile(identifier.as_deref());

    AwardRecord {
        date: date.to_string(),
        fiscal_year,
        company: extract_company(tokens, rules),
        amount: extract_amount(tokens, rules),
        procurement_id,
        source_ref: source_ref.to_string(),
    }
}

fn multi_award_records(
    tokens: &[&str],
    date: &str,
    source_ref: &str,
    rules: &Rules,
) -> Vec<AwardRecord> {
    let parties = match split_multi_award(tokens, rules) {
        SplitOutcome::Accepted(parties) => parties,
        SplitOutcome::Aborted => return Vec::new(),
    };
    let Some(first) = parties.first() else {
        return Vec::new();
    };

    let amount = apportion(extract_amount(tokens, rules), parties.len());

    parties
        .iter()
        .map(|party| {
            let composed = compose_identifier(&first.identifier, &party.identifier);
            let (fiscal_year, procurement_id) = reconcile(Some(&composed));
            AwardRecord {
                date: date.to_string(),
                fiscal_year,
                company: party.company.clone(),
                amount,
                procurement_id,
                source_ref: source_ref.to_string(),
            }
        })
        .collect()
}
