//! HT/NT tariff schedule.
//!
//! Peak (Hochtarif, HT) applies Monday to Friday from 07:00 to 20:00 and on
//! Saturday from 07:00 to 13:00. Every other hour is off-peak (Niedertarif,
//! NT). Classification works on the truncated hour of day; minutes are
//! ignored.

use std::fmt;

use chrono::{Datelike, Timelike, Weekday};

/// Tariff band an energy increment is billed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tariff {
    /// Peak tariff (Hochtarif).
    Ht,
    /// Off-peak tariff (Niedertarif).
    Nt,
}

impl Tariff {
    /// Short label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Tariff::Ht => "HT",
            Tariff::Nt => "NT",
        }
    }
}

impl fmt::Display for Tariff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a local timestamp into its tariff band.
pub fn classify<T: Datelike + Timelike>(ts: &T) -> Tariff {
    classify_slot(ts.weekday(), ts.hour())
}

/// Classify a `(weekday, hour)` slot into its tariff band.
pub fn classify_slot(weekday: Weekday, hour: u32) -> Tariff {
    match weekday {
        Weekday::Sun => Tariff::Nt,
        Weekday::Sat => {
            if hour < 7 || hour > 12 {
                Tariff::Nt
            } else {
                Tariff::Ht
            }
        }
        _ => {
            if hour < 7 || hour > 19 {
                Tariff::Nt
            } else {
                Tariff::Ht
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeZone};
    use chrono_tz::Europe::Zurich;

    /// 2024-01-13 is a Saturday, 2024-01-14 a Sunday, 2024-01-15 a Monday.
    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    // ── Saturday ──────────────────────────────────────────────────────────────

    #[test]
    fn test_saturday_boundaries() {
        assert_eq!(classify(&at(13, 6, 59)), Tariff::Nt);
        assert_eq!(classify(&at(13, 7, 0)), Tariff::Ht);
        assert_eq!(classify(&at(13, 12, 59)), Tariff::Ht);
        assert_eq!(classify(&at(13, 13, 0)), Tariff::Nt);
    }

    #[test]
    fn test_saturday_evening_is_off_peak() {
        assert_eq!(classify(&at(13, 19, 30)), Tariff::Nt);
    }

    // ── Weekdays ──────────────────────────────────────────────────────────────

    #[test]
    fn test_monday_boundaries() {
        assert_eq!(classify(&at(15, 6, 59)), Tariff::Nt);
        assert_eq!(classify(&at(15, 7, 0)), Tariff::Ht);
        assert_eq!(classify(&at(15, 19, 59)), Tariff::Ht);
        assert_eq!(classify(&at(15, 20, 0)), Tariff::Nt);
    }

    #[test]
    fn test_friday_same_schedule_as_monday() {
        for hour in 0..24 {
            assert_eq!(
                classify_slot(Weekday::Fri, hour),
                classify_slot(Weekday::Mon, hour),
                "hour {hour}"
            );
        }
    }

    // ── Sunday ────────────────────────────────────────────────────────────────

    #[test]
    fn test_sunday_always_off_peak() {
        for hour in 0..24 {
            assert_eq!(classify(&at(14, hour, 30)), Tariff::Nt, "hour {hour}");
        }
    }

    // ── Totality / determinism ────────────────────────────────────────────────

    #[test]
    fn test_every_slot_classified_deterministically() {
        let days = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        let mut peak_hours = 0;
        for day in days {
            for hour in 0..24 {
                let first = classify_slot(day, hour);
                assert_eq!(first, classify_slot(day, hour));
                if first == Tariff::Ht {
                    peak_hours += 1;
                }
            }
        }
        // 5 weekdays x 13 hours + 6 Saturday hours.
        assert_eq!(peak_hours, 5 * 13 + 6);
    }

    #[test]
    fn test_classify_uses_local_wall_clock() {
        // 2024-07-01 is a Monday.
        let ts = Zurich.with_ymd_and_hms(2024, 7, 1, 8, 30, 0).unwrap();
        assert_eq!(classify(&ts), Tariff::Ht);
    }

    // ── Labels ────────────────────────────────────────────────────────────────

    #[test]
    fn test_display_labels() {
        assert_eq!(Tariff::Ht.to_string(), "HT");
        assert_eq!(Tariff::Nt.to_string(), "NT");
        assert_eq!(Tariff::Ht.label(), "HT");
    }

    #[test]
    fn test_peak_orders_before_off_peak() {
        assert!(Tariff::Ht < Tariff::Nt);
    }
}
