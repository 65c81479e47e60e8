//! Report writers for the tariff report.
//!
//! Serialises a [`tariff_core::models::ConsumptionReport`] into an Excel
//! workbook or CSV file and a human-readable console summary.

use std::path::{Path, PathBuf};

use tariff_core::error::{Result, TariffError};
use tariff_core::models::AggregateRow;

pub mod csv_report;
pub mod summary;
pub mod xlsx_report;

pub use tariff_core as core;

/// File format of the tabular report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Csv,
}

impl ReportFormat {
    /// Pick the format from the file extension; anything but `.csv` is a
    /// workbook.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ReportFormat::Csv,
            _ => ReportFormat::Xlsx,
        }
    }
}

/// Write `rows` to `path` in the format its extension selects.
pub fn export_report(rows: &[AggregateRow], path: &Path) -> Result<ReportFormat> {
    let format = ReportFormat::from_path(path);
    match format {
        ReportFormat::Xlsx => xlsx_report::export_xlsx(rows, path)?,
        ReportFormat::Csv => csv_report::export_csv(rows, path)?,
    }
    Ok(format)
}

/// Write `bytes` next to `path` under a temporary name and rename it into
/// place once complete, so a failed run never leaves a partial report.
pub(crate) fn write_via_temp(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_err = |source: std::io::Error| TariffError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let tmp = temp_path(path);
    if let Err(source) = std::fs::write(&tmp, bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_err(source));
    }
    std::fs::rename(&tmp, path).map_err(write_err)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
