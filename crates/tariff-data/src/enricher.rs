//! Per-device energy increments and calendar attributes.
//!
//! Readings are partitioned by device and each partition is ordered by meter
//! value, not by timestamp. The provider's timestamps are not monotonic with
//! the meter within a session, so timestamp order would yield negative
//! increments. Meter order is kept as the contract for this data source.

use std::collections::BTreeMap;

use chrono::Datelike;
use tariff_core::models::{EnrichedReading, Reading};

/// Derive increments and calendar fields for every reading.
///
/// The result is ordered by device identifier, then by ascending meter
/// value. Each device's first reading gets `kwh_added == None`.
pub fn enrich(readings: &[Reading]) -> Vec<EnrichedReading> {
    partition_by_device(readings)
        .into_values()
        .flat_map(enrich_device)
        .collect()
}

/// Group readings by device identifier, each group sorted by meter value.
pub fn partition_by_device(readings: &[Reading]) -> BTreeMap<&str, Vec<&Reading>> {
    let mut groups: BTreeMap<&str, Vec<&Reading>> = BTreeMap::new();
    for reading in readings {
        groups.entry(reading.device_id.as_str()).or_default().push(reading);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| a.meter_kwh.total_cmp(&b.meter_kwh));
    }
    groups
}

/// Scan one meter-ordered device group left to right.
fn enrich_device(group: Vec<&Reading>) -> Vec<EnrichedReading> {
    let mut previous: Option<f64> = None;
    group
        .into_iter()
        .map(|reading| {
            let kwh_added = previous.map(|prev| reading.meter_kwh - prev);
            previous = Some(reading.meter_kwh);
            EnrichedReading {
                reading: reading.clone(),
                kwh_added,
                year: reading.timestamp.year(),
                month: reading.timestamp.month(),
                weekday: reading.timestamp.weekday(),
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
