mod bootstrap;

use anyhow::{Context, Result};
use tariff_core::models::ConsumptionReport;
use tariff_core::settings::Settings;
use tariff_data::analysis::analyze_file;
use tariff_report::export_report;
use tariff_report::summary::print_summary;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Zaptec tariff report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, output: {}, timezone: {}",
        settings.input.display(),
        settings.output.display(),
        settings.timezone
    );

    let report = run(&settings)?;

    if !settings.quiet {
        print_summary(&report, Some(&settings.output));
    }

    Ok(())
}

/// Analyse the configured export and write the report file.
///
/// Nothing is written when the export cannot be analysed.
fn run(settings: &Settings) -> Result<ConsumptionReport> {
    let tz = settings.installation_timezone()?;

    let report = analyze_file(&settings.input, tz)
        .map_err(|e| {
            if e.is_parse_error() {
                tracing::error!("Export data is malformed; no report written");
            }
            e
        })
        .with_context(|| format!("Failed to analyse {}", settings.input.display()))?;

    let format = export_report(&report.rows, &settings.output)?;
    tracing::info!(
        "Wrote {} rows to {} ({:?})",
        report.rows.len(),
        settings.output.display(),
        format
    );

    Ok(report)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
