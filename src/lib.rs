//! Jogo do Bicho result ingestion and overdue-number analytics.
//!
//! The pipeline fetches result pages from structurally inconsistent public
//! sites, infers each document's format, extracts prize values through an
//! ordered strategy chain, normalizes them into canonical per-day draw
//! records, and ranks how stale every possible value has become across four
//! taxonomies (dezena, centena, milhar, animal group).

pub mod config;
pub mod engine;
pub mod extract;
pub mod network;
pub mod ops;
pub mod persistence;
pub mod stats;
