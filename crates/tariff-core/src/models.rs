use chrono::{DateTime, Weekday};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::tariff::Tariff;

// ── Export wire format ────────────────────────────────────────────────────────

/// Top-level document returned by the `chargehistory` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeHistory {
    /// Charging-session envelopes, in whatever order the API returned them.
    #[serde(rename = "Data")]
    pub data: Vec<SessionEnvelope>,
}

/// One charging session as exported by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionEnvelope {
    /// Human-assigned charger name, used as the device identifier.
    #[serde(rename = "DeviceName", default)]
    pub device_name: Option<String>,
    /// `OCMF|{...}` payload carrying the signed meter readings. Not every
    /// session has one.
    #[serde(rename = "SignedSession", default)]
    pub signed_session: Option<String>,
}

/// JSON body of a signed session once the format prefix is stripped.
#[derive(Debug, Clone, Deserialize)]
pub struct SignedSession {
    #[serde(rename = "RD")]
    pub readings: Vec<SignedReading>,
}

/// A single meter reading inside a signed session.
#[derive(Debug, Clone, Deserialize)]
pub struct SignedReading {
    /// Reading time, e.g. `"2022-01-18T16:02:13,000+00:00 R"`.
    #[serde(rename = "TM")]
    pub timestamp: String,
    /// Cumulative meter value in kWh.
    #[serde(rename = "RV")]
    pub value: MeterValue,
}

/// Meter values are string-encoded in practice; plain numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MeterValue {
    Text(String),
    Number(f64),
}

// ── Pipeline records ──────────────────────────────────────────────────────────

/// A cumulative meter reading attributed to one charging device.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Device identifier (the envelope's `DeviceName`).
    pub device_id: String,
    /// Reading time in the installation timezone.
    pub timestamp: DateTime<Tz>,
    /// Cumulative meter value in kWh.
    pub meter_kwh: f64,
}

/// A [`Reading`] with its incremental energy and calendar attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedReading {
    pub reading: Reading,
    /// Energy delivered since the device's previous reading in meter order.
    /// `None` for the device's first reading.
    pub kwh_added: Option<f64>,
    pub year: i32,
    pub month: u32,
    pub weekday: Weekday,
}

/// Energy summed for one `(device, year, tariff)` combination.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub device_id: String,
    pub year: i32,
    pub tariff: Tariff,
    pub kwh: f64,
}

/// Result of one run over a charge-history export.
#[derive(Debug, Clone)]
pub struct ConsumptionReport {
    /// Aggregated rows ordered by device, year, then tariff.
    pub rows: Vec<AggregateRow>,
    /// Sum of all row energies.
    pub total_kwh: f64,
    /// Earliest reading timestamp, `None` when the export held no readings.
    pub earliest: Option<DateTime<Tz>>,
    /// Most recent reading timestamp.
    pub latest: Option<DateTime<Tz>>,
    /// Number of readings extracted.
    pub readings_count: usize,
    /// Number of distinct devices with at least one reading.
    pub devices_count: usize,
}
