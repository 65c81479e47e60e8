use chrono_tz::Tz;
use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::time_utils::parse_timezone;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// HT/NT energy report for Zaptec charging stations
#[derive(Parser, Debug, Clone)]
#[command(
    name = "zaptec-tariff",
    about = "HT/NT energy report for Zaptec charging stations",
    version
)]
pub struct Settings {
    /// Charge-history export (response of the `chargehistory` endpoint)
    #[arg(long, env = "ZAPTEC_INPUT", default_value = "response.json")]
    pub input: PathBuf,

    /// Report file, one row per device, year and tariff. Written as an
    /// Excel workbook, or as CSV when the name ends in `.csv`
    #[arg(long, env = "ZAPTEC_OUTPUT", default_value = "zaptec.xlsx")]
    pub output: PathBuf,

    /// Installation timezone (IANA name)
    #[arg(long, env = "ZAPTEC_TIMEZONE", default_value = "Europe/Zurich")]
    pub timezone: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when absent)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Skip the console summary; only write the report file
    #[arg(long)]
    pub quiet: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(args).resolved()
    }

    /// Resolve the configured timezone name.
    pub fn installation_timezone(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    fn resolved(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
