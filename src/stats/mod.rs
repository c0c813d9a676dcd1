// * Analytics over stored draw history. Read-only and stateless between
// * invocations; safe to run alongside writers.

pub mod overdue;

// * Re-exports for convenient access
pub use overdue::{OverdueRecord, OverdueReport, StalenessAnalyzer, Taxonomy};
