//! Tariff aggregation per device, year and HT/NT band.

use std::collections::BTreeMap;

use tariff_core::models::{AggregateRow, EnrichedReading};
use tariff_core::tariff::{classify, Tariff};

/// Grouping key; the derived ordering sorts by device, year, then HT before NT.
type AggregateKey = (String, i32, Tariff);

/// Sums energy increments into [`AggregateRow`]s.
pub struct TariffAggregator;

impl TariffAggregator {
    /// Classify every increment by its own timestamp and sum it into its
    /// `(device, year, tariff)` bucket.
    ///
    /// Readings without an increment (a device's first reading) are skipped.
    /// Rows come back sorted by device, year and tariff.
    pub fn aggregate(enriched: &[EnrichedReading]) -> Vec<AggregateRow> {
        let mut buckets: BTreeMap<AggregateKey, f64> = BTreeMap::new();

        for entry in enriched {
            let Some(kwh) = entry.kwh_added else {
                continue;
            };
            let tariff = classify(&entry.reading.timestamp);
            *buckets
                .entry((entry.reading.device_id.clone(), entry.year, tariff))
                .or_insert(0.0) += kwh;
        }

        buckets
            .into_iter()
            .map(|((device_id, year, tariff), kwh)| AggregateRow {
                device_id,
                year,
                tariff,
                kwh,
            })
            .collect()
    }

    /// Sum of all row energies.
    pub fn total_kwh(rows: &[AggregateRow]) -> f64 {
        rows.iter().map(|r| r.kwh).sum()
    }

    /// Energy per device across all years and tariffs.
    pub fn device_totals(rows: &[AggregateRow]) -> BTreeMap<String, f64> {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for row in rows {
            *totals.entry(row.device_id.clone()).or_insert(0.0) += row.kwh;
        }
        totals
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
