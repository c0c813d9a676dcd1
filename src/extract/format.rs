// * Format detection: how many ranked prizes does this page publish, and at
// * what digit width. Always returns a best-effort guess, never an error;
// * the confidence value lets downstream discount a weak guess.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::config::constants::ORDINAL_MIN_OCCURRENCES;
use crate::config::lotteries::{KeywordFormat, LotteryId, KEYWORD_FORMATS};

// * Ordinal markers as printed by the result sites: "1º", "1°", "1o".
// * The digit-width patterns deliberately ignore context; they are a tally,
// * not an extraction.
static ORDINAL_10: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b10(?:\s*[º°]|o\b)").expect("Invalid ordinal-10 regex"));
static ORDINAL_7: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b7(?:\s*[º°]|o\b)").expect("Invalid ordinal-7 regex"));
static ORDINAL_5: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b5(?:\s*[º°]|o\b)").expect("Invalid ordinal-5 regex"));
static ORDINAL_1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b1(?:\s*[º°]|o\b)").expect("Invalid ordinal-1 regex"));

static THREE_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}\b").expect("Invalid 3-digit regex"));
static FOUR_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("Invalid 4-digit regex"));

/// Best-effort estimate of a document's result format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatGuess {
    pub expected_prize_count: usize,
    pub digit_width: u8,
    pub confidence: f32,
}

impl Default for FormatGuess {
    // * What most bancas publish: five 4-digit prizes
    fn default() -> Self {
        Self {
            expected_prize_count: 5,
            digit_width: 4,
            confidence: 0.5,
        }
    }
}

/// Applies the weighted rule set against one document.
pub struct FormatDetector {
    keywords: Vec<KeywordFormat>,
}

impl FormatDetector {
    /// Detector backed by the static keyword table.
    pub fn new() -> Self {
        Self {
            keywords: KEYWORD_FORMATS.to_vec(),
        }
    }

    pub fn with_keywords(keywords: Vec<KeywordFormat>) -> Self {
        Self { keywords }
    }

    // * Rule order: the keyword override beats everything, then ordinal
    // * density picks the prize count, then the digit-width tally settles
    // * 3- vs 4-digit pages.
    pub fn detect(&self, id: LotteryId, text: &str) -> FormatGuess {
        if let Some(hit) = self.keyword_hit(id, text) {
            return FormatGuess {
                expected_prize_count: hit.prize_count,
                digit_width: hit.digit_width,
                confidence: 0.9,
            };
        }

        let mut guess = FormatGuess::default();
        let mut rule_fired = false;

        // * Descending ordinal checks: a page carrying enough "10º" markers
        // * is a 10-prize page even if "5º" also appears on it
        let ordinal_rules: [(usize, f32, &Regex); 4] = [
            (10, 0.9, &ORDINAL_10),
            (7, 0.9, &ORDINAL_7),
            (5, 0.8, &ORDINAL_5),
            (1, 0.7, &ORDINAL_1),
        ];
        for (count, confidence, pattern) in ordinal_rules {
            if pattern.find_iter(text).count() >= ORDINAL_MIN_OCCURRENCES {
                guess.expected_prize_count = count;
                guess.confidence = confidence;
                rule_fired = true;
                break;
            }
        }

        let three_count = THREE_DIGIT.find_iter(text).count();
        let four_count = FOUR_DIGIT.find_iter(text).count();
        if four_count > three_count * 2 {
            guess.digit_width = 4;
            guess.confidence = guess.confidence.max(0.8);
            rule_fired = true;
        } else if three_count > four_count * 2 {
            guess.digit_width = 3;
            guess.confidence = guess.confidence.max(0.8);
            rule_fired = true;
        }

        if !rule_fired {
            return FormatGuess::default();
        }
        guess
    }

    fn keyword_hit(&self, id: LotteryId, text: &str) -> Option<&KeywordFormat> {
        let slug = id.slug();
        let lowered = text.to_lowercase();
        self.keywords
            .iter()
            .find(|k| slug.contains(k.keyword) || lowered.contains(k.keyword))
    }
}

impl Default for FormatDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_ordinals_win() {
        let text = "1º 1234  2º 5678  até o 10º prêmio. \
                    10º aqui, 10º de novo, 10º mais uma vez, 10º e 10º fechando";
        let guess = FormatDetector::new().detect(LotteryId::Lotep, text);
        assert_eq!(guess.expected_prize_count, 10);
        assert!((guess.confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ordinal_below_threshold_is_ignored() {
        // * Two "7º" markers are not enough evidence
        let text = "7º prêmio saiu, confira o 7º";
        let guess = FormatDetector::new().detect(LotteryId::Lotep, text);
        assert_eq!(guess.expected_prize_count, 5);
    }

    #[test]
    fn test_one_is_not_matched_inside_ten() {
        // * "10º" repeated must not count as "1º"
        let text = "10º 10º 10º";
        let guess = FormatDetector::new().detect(LotteryId::Lotep, text);
        assert_eq!(guess.expected_prize_count, 10);
    }

    #[test]
    fn test_digit_width_rule_three() {
        let text = "123 456 789 012 345 678 901";
        let guess = FormatDetector::new().detect(LotteryId::Lotep, text);
        assert_eq!(guess.digit_width, 3);
        assert!((guess.confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_digit_width_keeps_higher_prior_confidence() {
        // * 10-prize ordinal evidence at 0.9 plus a 4-digit majority: the
        // * width rule must not pull confidence down to 0.8
        let text = "10º 10º 10º 1234 5678 9012 3456 7890 1122 3344";
        let guess = FormatDetector::new().detect(LotteryId::Lotep, text);
        assert_eq!(guess.expected_prize_count, 10);
        assert_eq!(guess.digit_width, 4);
        assert!((guess.confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_keyword_overrides_density() {
        // * Document screams 10 prizes but the identifier is a keyword hit
        let text = "10º 10º 10º 10º resultado federal de hoje";
        let guess = FormatDetector::new().detect(LotteryId::Federal, text);
        assert_eq!(guess.expected_prize_count, 5);
        assert_eq!(guess.digit_width, 4);
        assert!((guess.confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_keyword_in_document_text() {
        let text = "Confira o resultado da lotinha de hoje: 123, 456, 789";
        let guess = FormatDetector::new().detect(LotteryId::RioPtm, text);
        assert_eq!(guess.expected_prize_count, 5);
        assert_eq!(guess.digit_width, 3);
    }

    #[test]
    fn test_keyword_in_identifier_slug() {
        let guess = FormatDetector::new().detect(LotteryId::LookGoias, "pagina vazia");
        assert_eq!(guess.expected_prize_count, 10);
        assert_eq!(guess.digit_width, 4);
    }

    #[test]
    fn test_default_when_nothing_fires() {
        let guess = FormatDetector::new().detect(LotteryId::RioPtm, "sem resultado ainda");
        assert_eq!(guess, FormatGuess::default());
        assert!((guess.confidence - 0.5).abs() < f32::EPSILON);
    }
}
