use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{Result, TariffError};

/// Reading timestamps are cut to `YYYY-MM-DDTHH:MM:SS,fff` before parsing,
/// dropping the offset and the OCMF time-status flag that follow.
pub const TIMESTAMP_PREFIX_LEN: usize = 23;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse an IANA timezone identifier such as `"Europe/Zurich"`.
pub fn parse_timezone(tz_name: &str) -> Result<Tz> {
    tz_name
        .trim()
        .parse::<Tz>()
        .map_err(|_| TariffError::InvalidTimezone(tz_name.to_string()))
}

/// Return at most the first [`TIMESTAMP_PREFIX_LEN`] characters of `raw`.
pub fn truncate_timestamp(raw: &str) -> &str {
    match raw.char_indices().nth(TIMESTAMP_PREFIX_LEN) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

/// Parse the truncated prefix of a reading timestamp as a naive date-time.
///
/// Accepts both `,` and `.` as the fractional-second separator.
pub fn parse_naive_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let prefix = truncate_timestamp(raw.trim());
    let normalised = prefix.trim_end_matches('Z').replace(',', ".");

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalised, fmt).ok())
        .ok_or_else(|| TariffError::TimestampParse(raw.to_string()))
}

/// Attach `tz` to a naive reading time by reading it as UTC first.
///
/// The charger reports wall-clock values without daylight-saving adjustment.
/// Treating them as UTC and converting to the installation zone compensates
/// for that quirk of the source; it is not a general recipe for naive times.
pub fn reinterpret_as_utc(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    tz.from_utc_datetime(&naive)
}

// ── TimestampNormalizer ───────────────────────────────────────────────────────

/// Turns raw reading timestamps into installation-local [`DateTime`]s.
#[derive(Debug, Clone, Copy)]
pub struct TimestampNormalizer {
    tz: Tz,
}

impl TimestampNormalizer {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Truncate, parse and convert a raw reading timestamp.
    pub fn normalize(&self, raw: &str) -> Result<DateTime<Tz>> {
        let naive = parse_naive_timestamp(raw)?;
        Ok(reinterpret_as_utc(naive, self.tz))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
