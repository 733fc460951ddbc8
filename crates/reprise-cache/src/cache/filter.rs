use std::cmp::Ordering;
use std::str::FromStr;

use thiserror::Error;

use super::record::Candidate;

/// Fraction of query units that must match before a candidate is reusable.
pub const REQUIRED_MATCH_PERCENT: f32 = 100.0;

/// Unit of measure for the admission filter's match percentage.
///
/// The filter splits the query into lowercase whitespace-delimited words and
/// checks each one for substring containment in the candidate's stored
/// question. `Chars` weights every matched word by its character count,
/// `Words` counts each word once. At the 100% threshold the two agree; they
/// diverge only for partial-match thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchUnits {
    #[default]
    Chars,
    Words,
}

impl MatchUnits {
    fn weight(&self, word: &str) -> usize {
        match self {
            MatchUnits::Chars => word.chars().count(),
            MatchUnits::Words => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchUnits::Chars => "chars",
            MatchUnits::Words => "words",
        }
    }
}

/// Error for unrecognized match unit names.
#[derive(Debug, Error)]
#[error("unknown match units '{value}': expected 'chars' or 'words'")]
pub struct UnknownMatchUnits {
    /// Rejected input.
    pub value: String,
}

impl FromStr for MatchUnits {
    type Err = UnknownMatchUnits;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chars" | "characters" => Ok(MatchUnits::Chars),
            "words" => Ok(MatchUnits::Words),
            _ => Err(UnknownMatchUnits {
                value: s.trim().to_string(),
            }),
        }
    }
}

impl std::fmt::Display for MatchUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percentage of `query` units contained in `stored_question`.
///
/// Containment is case-insensitive substring matching per query word, so a
/// short word can match inside a longer one ("art" matches "department").
/// An empty query scores 0.
pub fn match_percent(query: &str, stored_question: &str, units: MatchUnits) -> f32 {
    let query = query.to_lowercase();
    let stored = stored_question.to_lowercase();

    let mut total = 0usize;
    let mut matched = 0usize;
    for word in query.split_whitespace() {
        let weight = units.weight(word);
        total += weight;
        if stored.contains(word) {
            matched += weight;
        }
    }

    if total == 0 {
        return 0.0;
    }

    (matched as f32 / total as f32) * 100.0
}

/// Picks the highest-scoring candidate whose stored question matches the
/// query at [`REQUIRED_MATCH_PERCENT`] or above.
pub fn select_reusable(
    candidates: Vec<Candidate>,
    query: &str,
    units: MatchUnits,
) -> Option<Candidate> {
    candidates
        .into_iter()
        .filter(|c| match_percent(query, &c.record.question, units) >= REQUIRED_MATCH_PERCENT)
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal))
}
