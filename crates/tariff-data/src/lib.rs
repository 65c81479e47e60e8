//! Data pipeline for the Zaptec tariff report.
//!
//! Extracts meter readings from signed sessions in a charge-history export,
//! derives per-device energy increments, classifies them into HT/NT and
//! aggregates them per device, year and tariff.

pub mod aggregator;
pub mod analysis;
pub mod enricher;
pub mod reader;

pub use tariff_core as core;
