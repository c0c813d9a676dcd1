// * Free-text strategy: the last resort for pages that publish results as
// * prose ("1º 4312 Galo, 2º 0556..."). Requires an explicit ordinal marker
// * before each value, so bare numbers elsewhere on the page stay out.
// * Candidates are emitted in parsed-position order, not appearance order.

use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;
use tracing::debug;

use crate::config::animals::{group_for_name, group_for_value};
use crate::extract::{RawCandidate, StrategyKind};

// * position, optional "prêmio"/"lugar", separator, value, optional animal word
static PRIZE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(10|[1-9])\s*(?:[º°]|o\b)\s*(?:pr[êe]mio|lugar)?\s*[:\-]?\s*(\d{3,4})\b(?:\s+(\p{L}{3,}))?")
        .expect("Invalid prize line regex")
});

/// Extracts candidates from the page's visible text, ordered by the prize
/// position each match claims.
pub fn extract(html: &str) -> Vec<RawCandidate> {
    let text = visible_text(html);
    let mut found: Vec<(usize, String)> = Vec::new();

    for caps in PRIZE_LINE.captures_iter(&text) {
        let position: usize = match caps[1].parse() {
            Ok(p) => p,
            Err(_) => continue,
        };
        let value = caps[2].to_string();

        // * A trailing animal word is a consistency signal, nothing more:
        // * mismatches are logged and the numeric value kept
        if let Some(word) = caps.get(3) {
            if let (Some(named), Some(derived)) =
                (group_for_name(word.as_str()), group_for_value(&value))
            {
                if named.number != derived.number {
                    debug!(
                        value = %value,
                        claimed = named.name,
                        derived = derived.name,
                        "animal word disagrees with dezena"
                    );
                }
            }
        }

        found.push((position, value));
    }

    found.sort_by_key(|(position, _)| *position);
    found
        .into_iter()
        .map(|(_, value)| RawCandidate::new(value, StrategyKind::FreeText))
        .collect()
}

// * Text nodes outside script/style, space-joined so values split across
// * inline tags stay adjacent to their markers.
fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    for node in document.root_element().descendants() {
        if let Some(text) = node.value().as_text() {
            let skip = node
                .parent()
                .and_then(ElementRef::wrap)
                .map(|el| matches!(el.value().name(), "script" | "style"))
                .unwrap_or(false);
            if !skip {
                out.push_str(text);
                out.push(' ');
            }
        }
    }

    out
}
