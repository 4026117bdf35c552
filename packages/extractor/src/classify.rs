//! Paragraph classification.

use serde::{Deserialize, Serialize};

use crate::rules::Rules;

/// How a paragraph is routed through the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParagraphKind {
    /// Amends an earlier announcement; excluded from award output.
    Correction,

    /// Several companies share one narrative and one dollar figure.
    MultiAward,

    /// One company, one award.
    SingleAward,
}

/// Whether the opening tokens flag a correction notice.
///
/// Only the first `correction_window` tokens are scanned, so the word
/// "update" later in a narrative does not count.
pub fn is_correction(tokens: &[&str], rules: &Rules) -> bool {
    tokens
        .iter()
        .take(rules.correction_window)
        .any(|t| rules.is_correction_marker(t))
}

/// Whether the text before "award" lists more than one long uppercase token.
pub fn is_multi_award(tokens: &[&str], rules: &Rules) -> bool {
    let listed = tokens
        .iter()
        .take_while(|t| !rules.mentions_award_ignore_case(t))
        .filter(|t| rules.is_listed_identifier(t))
        .count();
    listed > 1
}

/// Label a paragraph as exactly one of the three kinds.
pub fn classify(tokens: &[&str], rules: &Rules) -> ParagraphKind {
    if is_correction(tokens, rules) {
        ParagraphKind::Correction
    } else if is_multi_award(tokens, rules) {
        ParagraphKind::MultiAward
    } else {
        ParagraphKind::SingleAward
    }
}
