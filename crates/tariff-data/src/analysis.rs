//! Main analysis pipeline for the tariff report.
//!
//! Runs extraction, enrichment and aggregation over one export and returns a
//! [`ConsumptionReport`] ready for the report writers. Any error aborts the
//! whole run; there is no partial result.

use std::collections::BTreeSet;
use std::path::Path;

use chrono_tz::Tz;
use tariff_core::error::Result;
use tariff_core::models::{ConsumptionReport, Reading};
use tracing::{debug, info};

use crate::aggregator::TariffAggregator;
use crate::enricher::enrich;
use crate::reader::{load_readings, parse_export};

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline over the export file at `path`.
pub fn analyze_file(path: &Path, tz: Tz) -> Result<ConsumptionReport> {
    let load_start = std::time::Instant::now();
    let readings = load_readings(path, tz)?;
    debug!(
        "Loaded {} readings from {} in {:.3}s",
        readings.len(),
        path.display(),
        load_start.elapsed().as_secs_f64()
    );
    Ok(analyze_readings(&readings))
}

/// Run the full pipeline over an in-memory export document.
pub fn analyze_export(json: &str, tz: Tz) -> Result<ConsumptionReport> {
    let readings = parse_export(json, tz)?;
    Ok(analyze_readings(&readings))
}

/// Enrich and aggregate already extracted readings.
pub fn analyze_readings(readings: &[Reading]) -> ConsumptionReport {
    let transform_start = std::time::Instant::now();

    let enriched = enrich(readings);
    let rows = TariffAggregator::aggregate(&enriched);
    let total_kwh = TariffAggregator::total_kwh(&rows);

    let earliest = readings.iter().map(|r| r.timestamp).min();
    let latest = readings.iter().map(|r| r.timestamp).max();
    let devices_count = readings
        .iter()
        .map(|r| r.device_id.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    info!(
        "Aggregated {} readings from {} devices into {} rows ({:.3} kWh)",
        readings.len(),
        devices_count,
        rows.len(),
        total_kwh
    );
    debug!(
        "Transform took {:.3}s",
        transform_start.elapsed().as_secs_f64()
    );

    ConsumptionReport {
        rows,
        total_kwh,
        earliest,
        latest,
        readings_count: readings.len(),
        devices_count,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
