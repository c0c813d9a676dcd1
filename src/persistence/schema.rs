// * Canonical draw record
// * Defines the one persisted shape the pipeline produces and consumes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::lotteries::LotteryId;

/// One lottery draw for one calendar day.
///
/// # Fields
/// - `lottery_id`: which banca/schedule this draw belongs to
/// - `date`: calendar day of the draw, no time component
/// - `prizes`: ranked values, index 0 is the 1st prize; a `None` slot means
///   the position was expected but never extracted
/// - `source_url`: where the accepted document came from (internal field,
///   masked before leaving the service)
///
/// At most one record exists per `(lottery_id, date)`; a later successful
/// extraction for the same day replaces the whole prize array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub lottery_id: LotteryId,
    pub date: NaiveDate,
    pub prizes: Vec<Option<String>>,
    pub source_url: String,
}

impl DrawResult {
    pub fn new(
        lottery_id: LotteryId,
        date: NaiveDate,
        prizes: Vec<Option<String>>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            lottery_id,
            date,
            prizes,
            source_url: source_url.into(),
        }
    }

    // * Upsert key
    pub fn key(&self) -> (LotteryId, NaiveDate) {
        (self.lottery_id, self.date)
    }

    pub fn populated_count(&self) -> usize {
        self.prizes.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_fully_populated(&self) -> bool {
        !self.prizes.is_empty() && self.prizes.iter().all(Option::is_some)
    }

    /// Populated values in prize order, position gaps skipped.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.prizes.iter().filter_map(|p| p.as_deref())
    }

    pub fn first_prize(&self) -> Option<&str> {
        self.prizes.first().and_then(|p| p.as_deref())
    }
}
