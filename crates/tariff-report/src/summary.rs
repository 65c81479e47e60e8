//! Console summary of a consumption report.

use std::fmt;
use std::path::Path;

use comfy_table::{modifiers, presets, Cell, CellAlignment, Table};
use tariff_core::formatting::{format_number, format_timestamp, truncate_kwh};
use tariff_core::models::{AggregateRow, ConsumptionReport};
use tariff_data::aggregator::TariffAggregator;

/// Build the aggregate table: one line per device, year and tariff.
pub fn build_rows_table(rows: &[AggregateRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Device", "Year", "Tariff", "kWh"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.device_id),
            Cell::new(row.year),
            Cell::new(row.tariff),
            Cell::new(format_number(row.kwh, 2)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Build the per-device total table.
pub fn build_device_table(rows: &[AggregateRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Device", "kWh"]);
    for (device, kwh) in TariffAggregator::device_totals(rows) {
        table.add_row(vec![
            Cell::new(device),
            Cell::new(format_number(kwh, 2)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Console summary of a report, rendered through [`fmt::Display`].
pub struct Summary<'a> {
    pub report: &'a ConsumptionReport,
    /// Report file the rows were saved to, if any.
    pub output: Option<&'a Path>,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(
            f,
            "\nTotal kWh delivered to date: {}",
            truncate_kwh(report.total_kwh)
        )?;

        match (report.earliest, report.latest) {
            (Some(earliest), Some(latest)) => {
                writeln!(
                    f,
                    "\nThe earliest timestamp in the dataset is: {}",
                    format_timestamp(&earliest)
                )?;
                writeln!(
                    f,
                    "The most recent timestamp in the dataset is: {}",
                    format_timestamp(&latest)
                )?;
            }
            _ => writeln!(f, "\nNo meter readings in the dataset.")?,
        }

        writeln!(
            f,
            "\n{} readings from {} charging stations.",
            report.readings_count, report.devices_count
        )?;

        if !report.rows.is_empty() {
            writeln!(f, "\nkWh by charging station, year and tariff:\n")?;
            writeln!(f, "{}", build_rows_table(&report.rows))?;
            writeln!(f, "\nkWh by charging station:\n")?;
            writeln!(f, "{}", build_device_table(&report.rows))?;
        }

        if let Some(path) = self.output {
            writeln!(f, "\nTable saved to {}", path.display())?;
        }

        Ok(())
    }
}

/// Render the full console summary.
pub fn render_summary(report: &ConsumptionReport, output: Option<&Path>) -> String {
    Summary { report, output }.to_string()
}

/// Print the console summary to stdout.
pub fn print_summary(report: &ConsumptionReport, output: Option<&Path>) {
    print!("{}", Summary { report, output });
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tariff_core::tariff::Tariff;
    use tariff_core::time_utils::parse_timezone;
    use tariff_data::analysis::analyze_export;

    fn session(tm: &str, rv: &str) -> String {
        format!("OCMF|{}", serde_json::json!({"RD": [{"TM": tm, "RV": rv}]}))
    }

    fn sample_report() -> ConsumptionReport {
        let json = serde_json::json!({
            "Data": [
                {
                    "DeviceName": "Garage",
                    "SignedSession": session("2024-01-13T20:00:00,000+00:00 R", "10.0"),
                },
                {
                    "DeviceName": "Garage",
                    "SignedSession": session("2024-01-15T09:00:00,000+00:00 R", "1234.75"),
                },
            ]
        })
        .to_string();
        analyze_export(&json, parse_timezone("Europe/Zurich").unwrap()).unwrap()
    }

    #[test]
    fn test_summary_contains_truncated_total() {
        let text = render_summary(&sample_report(), None);
        assert!(text.contains("Total kWh delivered to date: 1224"));
    }

    #[test]
    fn test_summary_contains_time_range() {
        let text = render_summary(&sample_report(), None);
        let earliest = "The earliest timestamp in the dataset is: 2024-01-13 21:00:00+01:00";
        let latest = "The most recent timestamp in the dataset is: 2024-01-15 10:00:00+01:00";
        assert!(text.contains(earliest));
        assert!(text.contains(latest));
    }

    #[test]
    fn test_summary_contains_table_and_output_path() {
        let text = render_summary(&sample_report(), Some(Path::new("zaptec.xlsx")));
        assert!(text.contains("Garage"));
        assert!(text.contains("1,224.75"));
        assert!(text.contains("Table saved to zaptec.xlsx"));
    }

    #[test]
    fn test_summary_empty_report() {
        let report = ConsumptionReport {
            rows: vec![],
            total_kwh: 0.0,
            earliest: None,
            latest: None,
            readings_count: 0,
            devices_count: 0,
        };
        let text = render_summary(&report, None);
        assert!(text.contains("Total kWh delivered to date: 0"));
        assert!(text.contains("No meter readings in the dataset."));
        assert!(!text.contains("Device"));
    }

    #[test]
    fn test_rows_table_has_one_line_per_row() {
        let rows = vec![
            AggregateRow {
                device_id: "A".to_string(),
                year: 2024,
                tariff: Tariff::Ht,
                kwh: 1.0,
            },
            AggregateRow {
                device_id: "A".to_string(),
                year: 2024,
                tariff: Tariff::Nt,
                kwh: 2.0,
            },
        ];
        let table = build_rows_table(&rows);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("HT"));
        assert!(rendered.contains("NT"));
    }
}
