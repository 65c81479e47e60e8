//! Shared domain layer for the Zaptec tariff report.
//!
//! Holds the reading and report models, the error type, timestamp handling
//! for the charge-history export, the HT/NT tariff schedule, command-line
//! settings and number formatting used by the report writers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod tariff;
pub mod time_utils;

pub use error::{Result, TariffError};
