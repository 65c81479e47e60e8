//! Excel workbook export of aggregate rows.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tariff_core::error::{Result, TariffError};
use tariff_core::models::AggregateRow;
use tracing::debug;

use crate::csv_report::HEADER;
use crate::write_via_temp;

/// Name of the single worksheet holding the rows.
pub const SHEET_NAME: &str = "kWh";

/// Write `rows` to an `.xlsx` workbook at `path`.
pub fn export_xlsx(rows: &[AggregateRow], path: &Path) -> Result<()> {
    let bytes = write_xlsx(rows).map_err(|e| TariffError::FileWrite {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    write_via_temp(path, &bytes)?;

    debug!("Wrote {} workbook rows to {}", rows.len(), path.display());
    Ok(())
}

/// Serialise `rows` into workbook bytes.
///
/// Year is stored as a number and kWh as an unrounded float; the cell
/// format only affects display.
pub fn write_xlsx(rows: &[AggregateRow]) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let kwh_format = Format::new().set_num_format("#,##0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    worksheet.set_column_width(0, 24)?;

    for (col, title) in HEADER.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        let line = idx as u32 + 1;
        worksheet.write_string(line, 0, &row.device_id)?;
        worksheet.write_number(line, 1, f64::from(row.year))?;
        worksheet.write_string(line, 2, row.tariff.label())?;
        worksheet.write_number_with_format(line, 3, row.kwh, &kwh_format)?;
    }

    workbook.save_to_buffer()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use tariff_core::tariff::Tariff;
    use tempfile::TempDir;

    fn row(device: &str, year: i32, tariff: Tariff, kwh: f64) -> AggregateRow {
        AggregateRow {
            device_id: device.to_string(),
            year,
            tariff,
            kwh,
        }
    }

    #[test]
    fn test_export_xlsx_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zaptec.xlsx");
        let rows = vec![
            row("Garage", 2023, Tariff::Ht, 120.125),
            row("Garage", 2023, Tariff::Nt, 80.25),
        ];
        export_xlsx(&rows, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();

        assert_eq!(range.height(), 3);
        let header: Vec<String> = (0..4)
            .map(|c| range.get_value((0, c)).unwrap().to_string())
            .collect();
        assert_eq!(header, vec!["DeviceID", "Year", "Tariff", "kWh"]);

        assert_eq!(
            range.get_value((1, 0)),
            Some(&Data::String("Garage".to_string()))
        );
        assert_eq!(range.get_value((1, 1)), Some(&Data::Float(2023.0)));
        assert_eq!(range.get_value((1, 2)), Some(&Data::String("HT".to_string())));
        assert_eq!(range.get_value((1, 3)), Some(&Data::Float(120.125)));
        assert_eq!(range.get_value((2, 2)), Some(&Data::String("NT".to_string())));
        assert_eq!(range.get_value((2, 3)), Some(&Data::Float(80.25)));
    }

    #[test]
    fn test_export_xlsx_empty_has_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.xlsx");
        export_xlsx(&[], &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.height(), 1);
    }

    #[test]
    fn test_write_xlsx_is_zip_archive() {
        let bytes = write_xlsx(&[row("A", 2024, Tariff::Nt, 1.0)]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_export_xlsx_unwritable_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("zaptec.xlsx");
        let err = export_xlsx(&[], &path).unwrap_err();
        assert!(matches!(err, TariffError::FileWrite { .. }));
    }
}
