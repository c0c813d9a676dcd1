// * Engine: per-lottery source failover, candidate normalization and the
// * batch run that drives both.

pub mod failover;
pub mod normalizer;
pub mod runner;

// * Re-exports for convenient access
pub use failover::{FailoverOutcome, SourceFailover, SourceState};
pub use normalizer::{breakdown, normalize, NormalizeError, PrizeBreakdown, ValueFacets};
pub use runner::{BatchRunner, RunReport};
