//! Charge-history loading and meter-reading extraction.
//!
//! Reads the `chargehistory` export, unwraps the `OCMF|{...}` signed-session
//! payload of each envelope and converts its reading entries into
//! [`Reading`] structs for downstream processing.

use std::path::Path;

use chrono_tz::Tz;
use tariff_core::error::{Result, TariffError};
use tariff_core::models::{ChargeHistory, MeterValue, Reading, SignedSession};
use tariff_core::time_utils::TimestampNormalizer;
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Read the export at `path` and extract every embedded meter reading.
pub fn load_readings(path: &Path, tz: Tz) -> Result<Vec<Reading>> {
    let content = std::fs::read_to_string(path).map_err(|source| TariffError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    parse_export(&content, tz)
}

/// Parse an export document and extract every embedded meter reading.
pub fn parse_export(json: &str, tz: Tz) -> Result<Vec<Reading>> {
    let export: ChargeHistory = serde_json::from_str(json)?;
    extract_readings(&export, tz)
}

/// Flatten the signed sessions of `export` into readings.
///
/// Envelopes without a signed session carry no readings and are skipped.
/// Output order follows the export and is not meaningful.
pub fn extract_readings(export: &ChargeHistory, tz: Tz) -> Result<Vec<Reading>> {
    let normalizer = TimestampNormalizer::new(tz);
    let mut readings: Vec<Reading> = Vec::new();
    let mut sessions_read = 0usize;
    let mut sessions_skipped = 0usize;

    for envelope in &export.data {
        let Some(payload) = envelope.signed_session.as_deref() else {
            sessions_skipped += 1;
            continue;
        };
        let device_id = envelope
            .device_name
            .as_deref()
            .ok_or(TariffError::MissingField("DeviceName"))?;

        let session = parse_signed_session(payload)?;
        sessions_read += 1;

        for entry in &session.readings {
            readings.push(Reading {
                device_id: device_id.to_string(),
                timestamp: normalizer.normalize(&entry.timestamp)?,
                meter_kwh: parse_meter_value(&entry.value)?,
            });
        }
    }

    debug!(
        "Export: {} envelopes, {} signed sessions, {} without session, {} readings",
        export.data.len(),
        sessions_read,
        sessions_skipped,
        readings.len()
    );

    Ok(readings)
}

/// Strip the format prefix from a signed-session payload and parse its body.
///
/// The payload looks like `OCMF|{body}|{signature}`. The signature section,
/// when present, is ignored.
pub fn parse_signed_session(payload: &str) -> Result<SignedSession> {
    let (format, body) = payload.trim().split_once('|').ok_or_else(|| {
        TariffError::MalformedSession("missing '|' after format prefix".to_string())
    })?;
    if format != "OCMF" {
        debug!("Unexpected signed-session format \"{}\"", format);
    }

    let mut stream = serde_json::Deserializer::from_str(body).into_iter::<SignedSession>();
    let session = match stream.next() {
        Some(parsed) => parsed?,
        None => return Err(TariffError::MalformedSession("empty session body".to_string())),
    };

    let rest = body[stream.byte_offset()..].trim_start();
    if !rest.is_empty() && !rest.starts_with('|') {
        return Err(TariffError::MalformedSession(
            "unexpected data after session body".to_string(),
        ));
    }

    Ok(session)
}

/// Convert a reading value to kWh.
pub fn parse_meter_value(value: &MeterValue) -> Result<f64> {
    let kwh = match value {
        MeterValue::Number(n) => *n,
        MeterValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| TariffError::InvalidReading(s.clone()))?,
    };
    if !kwh.is_finite() || kwh < 0.0 {
        return Err(TariffError::InvalidReading(kwh.to_string()));
    }
    Ok(kwh)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
