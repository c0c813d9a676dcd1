// * Extraction pipeline: turn one fetched document into ranked prize values.
// * Four strategies run in priority order over the same document; their
// * output is pooled, validated and slotted into fixed prize positions.

pub mod containers;
pub mod format;
pub mod freetext;
pub mod lists;
pub mod tables;

// * Re-exports for convenient access
pub use format::{FormatDetector, FormatGuess};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3,4}\b").expect("Invalid numeric token regex"));

/// Which strategy produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    Tabular,
    List,
    Container,
    FreeText,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Tabular => "tabular",
            StrategyKind::List => "list",
            StrategyKind::Container => "container",
            StrategyKind::FreeText => "free_text",
        }
    }
}

/// A numeric token pulled from a document, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub value: String,
    pub strategy: StrategyKind,
}

impl RawCandidate {
    pub fn new(value: impl Into<String>, strategy: StrategyKind) -> Self {
        Self {
            value: value.into(),
            strategy,
        }
    }
}

// * Every strategy is a pure function over the document
type StrategyFn = fn(&str) -> Vec<RawCandidate>;

/// Runs the strategy chain over one document.
///
/// Strategies are tried in priority order. Candidates accumulate into one
/// deduplicated pool that preserves first-seen order; once the pool covers
/// the expected prize count the remaining strategies are skipped, so the
/// permissive free-text scan only ever runs when the structured strategies
/// left positions unfilled.
pub struct ResultExtractor {
    strategies: Vec<(StrategyKind, StrategyFn)>,
}

impl ResultExtractor {
    pub fn new() -> Self {
        Self {
            strategies: vec![
                (StrategyKind::Tabular, tables::extract as StrategyFn),
                (StrategyKind::List, lists::extract as StrategyFn),
                (StrategyKind::Container, containers::extract as StrategyFn),
                (StrategyKind::FreeText, freetext::extract as StrategyFn),
            ],
        }
    }

    /// Pooled, validated, deduplicated candidate values in first-seen order.
    pub fn pooled_candidates(&self, html: &str, guess: &FormatGuess) -> Vec<String> {
        let mut pool: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (kind, strategy) in &self.strategies {
            if pool.len() >= guess.expected_prize_count {
                break;
            }

            let raw = strategy(html);
            let mut accepted = 0usize;
            for candidate in raw {
                if !is_valid_candidate(&candidate.value, guess.digit_width) {
                    continue;
                }
                if seen.insert(candidate.value.clone()) {
                    pool.push(candidate.value);
                    accepted += 1;
                }
            }
            crate::ops::telemetry::record_strategy_candidates(kind.as_str(), accepted);
            debug!(
                strategy = kind.as_str(),
                accepted,
                pool_size = pool.len(),
                "strategy pass complete"
            );
        }

        pool
    }

    /// Final per-document result: candidates slotted into exactly
    /// `expected_prize_count` positions. Surplus candidates are dropped,
    /// missing positions stay None and are never fabricated.
    pub fn extract(&self, html: &str, guess: &FormatGuess) -> Vec<Option<String>> {
        let pool = self.pooled_candidates(html, guess);
        let mut prizes: Vec<Option<String>> = pool
            .into_iter()
            .take(guess.expected_prize_count)
            .map(Some)
            .collect();
        prizes.resize(guess.expected_prize_count, None);
        prizes
    }
}

impl Default for ResultExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// * Candidate validation, identical for every strategy: digits only, length
// * within one of the detected width, and a parseable trailing dezena.
pub(crate) fn is_valid_candidate(value: &str, digit_width: u8) -> bool {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let len = value.len() as i32;
    if (len - digit_width as i32).abs() > 1 {
        return false;
    }
    let tail = &value[value.len().saturating_sub(2)..];
    tail.parse::<u8>().map(|d| d <= 99).unwrap_or(false)
}

// * Shared token scanner for the structured strategies. Pulls 3-4 digit
// * runs but skips tokens glued to date/time separators ("21/08", "14:20")
// * and digit-grouped amounts ("1.234").
pub(crate) fn scan_numeric_tokens(text: &str) -> Vec<String> {
    NUMERIC_TOKEN
        .find_iter(text)
        .filter(|m| !in_date_or_amount_context(text, m.start(), m.end()))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn in_date_or_amount_context(text: &str, start: usize, end: usize) -> bool {
    let mut before = text[..start].chars().rev();
    let mut after = text[end..].chars();

    let prev = before.next();
    let next = after.next();

    if matches!(prev, Some('/') | Some(':')) || matches!(next, Some('/') | Some(':')) {
        return true;
    }

    // * "1.234" / "1,234": separator counts only when flanked by digits
    if matches!(prev, Some('.') | Some(','))
        && before.next().map_or(false, |c| c.is_ascii_digit())
    {
        return true;
    }
    if matches!(next, Some('.') | Some(','))
        && after.next().map_or(false, |c| c.is_ascii_digit())
    {
        return true;
    }

    false
}
