// * Staleness analytics: for every possible value in four taxonomies, how
// * many draws have passed since it last appeared. One forward pass records
// * last-seen indices, then the full value universe is emitted densely,
// * never-seen values included. Recomputed from history on every request;
// * histories are one draw per time slot, so the dense rescan stays cheap.
// * Large deployments would maintain the last-seen maps incrementally per
// * new draw instead.

use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::animals::{ANIMAL_GROUPS, GROUP_COUNT};
use crate::engine::normalizer::ValueFacets;
use crate::ops::telemetry;
use crate::persistence::schema::DrawResult;

const DEZENA_UNIVERSE: usize = 100;
const CENTENA_UNIVERSE: usize = 1_000;
const MILHAR_UNIVERSE: usize = 10_000;

/// The four ways a drawn value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Taxonomy {
    Dezena,
    Centena,
    Milhar,
    Animal,
}

impl Taxonomy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Taxonomy::Dezena => "dezena",
            Taxonomy::Centena => "centena",
            Taxonomy::Milhar => "milhar",
            Taxonomy::Animal => "animal",
        }
    }

    /// Size of this taxonomy's full value universe.
    pub fn universe_size(&self) -> usize {
        match self {
            Taxonomy::Dezena => DEZENA_UNIVERSE,
            Taxonomy::Centena => CENTENA_UNIVERSE,
            Taxonomy::Milhar => MILHAR_UNIVERSE,
            Taxonomy::Animal => GROUP_COUNT,
        }
    }
}

/// Staleness of one value. A derived view, always reproducible from the
/// draw history alone; `last_seen_date` is `None` for a value that has
/// never appeared in recorded history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueRecord {
    pub taxonomy: Taxonomy,
    pub value: String,
    pub draws_since_last_seen: usize,
    pub last_seen_date: Option<NaiveDate>,
}

/// Ranked staleness lists, one complete universe per taxonomy, most
/// overdue first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverdueReport {
    pub total_draws: usize,
    pub dezenas: Vec<OverdueRecord>,
    pub centenas: Vec<OverdueRecord>,
    pub milhares: Vec<OverdueRecord>,
    pub animals: Vec<OverdueRecord>,
}

impl OverdueReport {
    pub fn records(&self, taxonomy: Taxonomy) -> &[OverdueRecord] {
        match taxonomy {
            Taxonomy::Dezena => &self.dezenas,
            Taxonomy::Centena => &self.centenas,
            Taxonomy::Milhar => &self.milhares,
            Taxonomy::Animal => &self.animals,
        }
    }

    /// The report reduced to values at least `threshold` draws stale,
    /// ranking preserved.
    pub fn at_least(&self, threshold: usize) -> OverdueReport {
        let keep = |records: &[OverdueRecord]| {
            records
                .iter()
                .filter(|r| r.draws_since_last_seen >= threshold)
                .cloned()
                .collect()
        };
        OverdueReport {
            total_draws: self.total_draws,
            dezenas: keep(&self.dezenas),
            centenas: keep(&self.centenas),
            milhares: keep(&self.milhares),
            animals: keep(&self.animals),
        }
    }
}

// * Last-seen draw index per value, one dense table per taxonomy
struct LastSeen {
    dezenas: Vec<Option<usize>>,
    centenas: Vec<Option<usize>>,
    milhares: Vec<Option<usize>>,
    animals: Vec<Option<usize>>,
}

impl LastSeen {
    fn new() -> Self {
        Self {
            dezenas: vec![None; DEZENA_UNIVERSE],
            centenas: vec![None; CENTENA_UNIVERSE],
            milhares: vec![None; MILHAR_UNIVERSE],
            animals: vec![None; GROUP_COUNT],
        }
    }

    fn record(&mut self, facets: &ValueFacets, draw_index: usize) {
        self.dezenas[facets.dezena as usize] = Some(draw_index);
        if let Some(centena) = facets.centena {
            self.centenas[centena as usize] = Some(draw_index);
        }
        if let Some(milhar) = facets.milhar {
            self.milhares[milhar as usize] = Some(draw_index);
        }
        self.animals[facets.group.number as usize - 1] = Some(draw_index);
    }
}

/// Computes overdue rankings from one lottery's full ordered history.
pub struct StalenessAnalyzer;

impl StalenessAnalyzer {
    /// Ranks the complete value universe of every taxonomy against
    /// `history`, which must be ordered oldest first (the store's
    /// `query_history` contract).
    ///
    /// A value seen at draw index `i` is `total - 1 - i` draws stale; a
    /// value never seen is `total` draws stale. Ties keep the taxonomy's
    /// natural enumeration order: numeric ascending, wheel order for
    /// animals.
    pub fn rank(history: &[DrawResult]) -> OverdueReport {
        let started = Instant::now();
        let total = history.len();
        let mut seen = LastSeen::new();

        for (i, draw) in history.iter().enumerate() {
            for value in draw.values() {
                if let Some(facets) = ValueFacets::of(value) {
                    seen.record(&facets, i);
                }
            }
        }

        let emit = |taxonomy: Taxonomy,
                    last: &[Option<usize>],
                    format: &dyn Fn(usize) -> String| {
            let mut records: Vec<OverdueRecord> = last
                .iter()
                .enumerate()
                .map(|(value_index, slot)| OverdueRecord {
                    taxonomy,
                    value: format(value_index),
                    draws_since_last_seen: slot.map_or(total, |i| total - 1 - i),
                    last_seen_date: slot.map(|i| history[i].date),
                })
                .collect();
            // * Stable sort: equal staleness keeps enumeration order
            records.sort_by(|a, b| b.draws_since_last_seen.cmp(&a.draws_since_last_seen));
            records
        };

        let report = OverdueReport {
            total_draws: total,
            dezenas: emit(Taxonomy::Dezena, &seen.dezenas, &|v| format!("{:02}", v)),
            centenas: emit(Taxonomy::Centena, &seen.centenas, &|v| format!("{:03}", v)),
            milhares: emit(Taxonomy::Milhar, &seen.milhares, &|v| format!("{:04}", v)),
            animals: emit(Taxonomy::Animal, &seen.animals, &|v| {
                ANIMAL_GROUPS[v].name.to_string()
            }),
        };

        let elapsed = started.elapsed().as_secs_f64();
        telemetry::observe_overdue_scan(elapsed);
        debug!(total_draws = total, elapsed, "staleness scan complete");
        report
    }
}
