// * Normalization: validated candidate slots become the canonical draw
// * record. Values are snapped to the detected digit width, positions map
// * 1st..Nth left to right, and every value resolves to its animal group
// * through the static wheel.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::config::animals::{group_for_dezena, AnimalGroup};
use crate::config::constants::MAX_PRIZE_POSITIONS;
use crate::config::lotteries::LotteryId;
use crate::extract::FormatGuess;
use crate::persistence::schema::DrawResult;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("no populated prize positions for {lottery} on {date}")]
    Empty { lottery: LotteryId, date: NaiveDate },
}

/// Builds the canonical `DrawResult` from one document's extracted slots.
///
/// Values shorter than the detected width are assumed to have lost leading
/// zeros and are padded back; values one digit longer are windowed to their
/// trailing digits. A candidate set with zero populated positions is
/// rejected, never stored.
pub fn normalize(
    lottery: LotteryId,
    date: NaiveDate,
    slots: Vec<Option<String>>,
    guess: &FormatGuess,
    source_url: &str,
) -> Result<DrawResult, NormalizeError> {
    let positions = guess.expected_prize_count.min(MAX_PRIZE_POSITIONS);
    let mut prizes: Vec<Option<String>> = slots
        .into_iter()
        .take(positions)
        .map(|slot| slot.map(|value| snap_width(&value, guess.digit_width)))
        .collect();
    prizes.resize(positions, None);

    if prizes.iter().all(Option::is_none) {
        return Err(NormalizeError::Empty { lottery, date });
    }

    let draw = DrawResult::new(lottery, date, prizes, source_url);
    debug!(
        lottery = %lottery,
        date = %date,
        populated = draw.populated_count(),
        positions,
        "normalized draw"
    );
    Ok(draw)
}

// * Fixed-width form of one prize value. Pad restores truncated leading
// * zeros; the trailing window drops a stray extra digit.
fn snap_width(value: &str, digit_width: u8) -> String {
    let width = digit_width as usize;
    if value.len() >= width {
        value[value.len() - width..].to_string()
    } else {
        format!("{:0>width$}", value, width = width)
    }
}

/// The four derived readings of one prize value. Never persisted; always
/// recomputed from the stored string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFacets {
    pub dezena: u8,
    pub centena: Option<u16>,
    pub milhar: Option<u16>,
    pub group: &'static AnimalGroup,
}

impl ValueFacets {
    /// Derives the facets of a prize value. Returns `None` for anything
    /// shorter than a dezena or containing non-digits, which post-validation
    /// values never are.
    pub fn of(value: &str) -> Option<Self> {
        if value.len() < 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let dezena: u8 = value[value.len() - 2..].parse().ok()?;
        let centena = if value.len() >= 3 {
            value[value.len() - 3..].parse().ok()
        } else {
            None
        };
        let milhar = if value.len() == 4 {
            value.parse().ok()
        } else {
            None
        };
        Some(Self {
            dezena,
            centena,
            milhar,
            group: group_for_dezena(dezena),
        })
    }
}

/// One prize position of a draw with its derived readings, for reporting.
#[derive(Debug, Clone)]
pub struct PrizeBreakdown {
    pub position: usize,
    pub value: String,
    pub facets: ValueFacets,
}

/// Derived view of a stored draw: every populated position with its
/// dezena/centena/milhar/animal readings, 1-based positions.
pub fn breakdown(draw: &DrawResult) -> Vec<PrizeBreakdown> {
    draw.prizes
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| {
            let value = slot.as_deref()?;
            let facets = ValueFacets::of(value)?;
            Some(PrizeBreakdown {
                position: i + 1,
                value: value.to_string(),
                facets,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 21).unwrap()
    }

    fn guess(count: usize, width: u8) -> FormatGuess {
        FormatGuess {
            expected_prize_count: count,
            digit_width: width,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_positions_map_in_order() {
        let slots = vec![Some("4312".into()), Some("0556".into()), None];
        let draw = normalize(LotteryId::RioPtm, day(), slots, &guess(3, 4), "https://a").unwrap();
        assert_eq!(draw.prizes.len(), 3);
        assert_eq!(draw.first_prize(), Some("4312"));
        assert_eq!(draw.prizes[1].as_deref(), Some("0556"));
        assert!(draw.prizes[2].is_none());
    }

    #[test]
    fn test_short_value_recovers_leading_zeros() {
        let slots = vec![Some("556".into())];
        let draw = normalize(LotteryId::RioPtm, day(), slots, &guess(1, 4), "https://a").unwrap();
        assert_eq!(draw.first_prize(), Some("0556"));
    }

    #[test]
    fn test_long_value_is_windowed_to_tail() {
        let slots = vec![Some("1234".into())];
        let draw = normalize(LotteryId::RioPtm, day(), slots, &guess(1, 3), "https://a").unwrap();
        assert_eq!(draw.first_prize(), Some("234"));
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let err = normalize(LotteryId::Federal, day(), vec![None, None], &guess(2, 4), "https://a")
            .unwrap_err();
        assert_eq!(
            err,
            NormalizeError::Empty {
                lottery: LotteryId::Federal,
                date: day()
            }
        );
    }

    #[test]
    fn test_surplus_slots_are_capped() {
        let slots = (0..12).map(|i| Some(format!("{:04}", i * 111))).collect();
        let draw = normalize(LotteryId::Lotece, day(), slots, &guess(12, 4), "https://a").unwrap();
        assert_eq!(draw.prizes.len(), MAX_PRIZE_POSITIONS);
    }

    #[test]
    fn test_facets_of_four_digit_value() {
        let facets = ValueFacets::of("4312").unwrap();
        assert_eq!(facets.dezena, 12);
        assert_eq!(facets.centena, Some(312));
        assert_eq!(facets.milhar, Some(4312));
        assert_eq!(facets.group.number, 3); // * 12 -> Burro
    }

    #[test]
    fn test_facets_of_three_digit_value() {
        let facets = ValueFacets::of("056").unwrap();
        assert_eq!(facets.dezena, 56);
        assert_eq!(facets.centena, Some(56));
        assert_eq!(facets.milhar, None);
        assert_eq!(facets.group.name, "Gato");
    }

    #[test]
    fn test_facets_reject_junk() {
        assert!(ValueFacets::of("7").is_none());
        assert!(ValueFacets::of("12a4").is_none());
        assert!(ValueFacets::of("").is_none());
    }

    #[test]
    fn test_breakdown_skips_unset_positions() {
        let slots = vec![Some("4312".into()), None, Some("7800".into())];
        let draw = normalize(LotteryId::RioPtm, day(), slots, &guess(3, 4), "https://a").unwrap();
        let rows = breakdown(&draw);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[1].position, 3);
        assert_eq!(rows[1].facets.group.number, 25); // * 00 -> Vaca
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let slots = vec![Some("4312".into()), Some("556".into())];
        let g = guess(2, 4);
        let a = normalize(LotteryId::RioPtm, day(), slots.clone(), &g, "https://a").unwrap();
        let b = normalize(LotteryId::RioPtm, day(), slots, &g, "https://a").unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
