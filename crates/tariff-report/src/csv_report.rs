//! CSV export of aggregate rows.

use std::io::{self, Write};
use std::path::Path;

use tariff_core::error::{Result, TariffError};
use tariff_core::models::AggregateRow;
use tracing::debug;

use crate::write_via_temp;

/// Column header, in [`AggregateRow`] field order.
pub const HEADER: [&str; 4] = ["DeviceID", "Year", "Tariff", "kWh"];

/// Write `rows` to a CSV file at `path`.
pub fn export_csv(rows: &[AggregateRow], path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf).map_err(|source| TariffError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_via_temp(path, &buf)?;

    debug!("Wrote {} CSV rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write `rows` as CSV to any writer.
///
/// Energy is written with full precision so the file can be summed again
/// without rounding drift.
pub fn write_csv(rows: &[AggregateRow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record([
            row.device_id.clone(),
            row.year.to_string(),
            row.tariff.to_string(),
            row.kwh.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
