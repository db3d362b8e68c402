use chrono::{DateTime, Datelike, TimeZone, Utc};

/// A calendar-month accounting period, half-open `[start, end)`
///
/// Derivation is pure arithmetic on the UTC instant, so every call
/// within the same month targets the same usage row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    /// The period containing `now`
    #[must_use]
    pub fn containing(now: DateTime<Utc>) -> Self {
        let start = first_instant(now.year(), now.month());
        let end = if now.month() == 12 {
            first_instant(now.year() + 1, 1)
        } else {
            first_instant(now.year(), now.month() + 1)
        };

        Self { start, end }
    }
}

fn first_instant(year: i32, month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .expect("first of month is a valid UTC instant")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 30, 15).unwrap()
    }

    #[test]
    fn truncates_to_first_of_month() {
        let period = Period::containing(instant(2026, 8, 19, 14));
        assert_eq!(period.start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
        assert_eq!(period.end, Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn december_rolls_into_next_year() {
        let period = Period::containing(instant(2026, 12, 31, 23));
        assert_eq!(period.start, Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(period.end, Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn every_instant_in_a_month_maps_to_one_period() {
        let early = Period::containing(instant(2026, 8, 1, 0));
        let late = Period::containing(instant(2026, 8, 31, 23));
        assert_eq!(early, late);
    }

    #[test]
    fn period_start_maps_to_itself() {
        let start = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        let period = Period::containing(start);
        assert_eq!(period.start, start);
    }

    #[test]
    fn consecutive_periods_share_a_boundary() {
        let august = Period::containing(instant(2026, 8, 15, 12));
        let september = Period::containing(instant(2026, 9, 15, 12));
        assert_eq!(august.end, september.start);
    }
}
