//! Date windows for upstream queries.
//!
//! Windows are expressed as calendar dates in the reporting timezone and
//! resolved to UTC instants at day boundaries.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SlotwatchError};

/// Caller-supplied date range; either end may be left open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start: Some(start), end: Some(end) }
    }

    /// Fill open ends (`lookback_days` ago through today) and compute the
    /// UTC boundaries.
    pub fn resolve(self, now: DateTime<Utc>, tz: Tz, lookback_days: i64) -> Result<ResolvedWindow> {
        let today = now.with_timezone(&tz).date_naive();
        let start_date = self.start.unwrap_or(today - Duration::days(lookback_days));
        let end_date = self.end.unwrap_or(today);

        if start_date > end_date {
            return Err(SlotwatchError::InvalidInput(format!(
                "window start {start_date} is after end {end_date}"
            )));
        }

        let next_day = end_date.succ_opt().unwrap_or(end_date);
        Ok(ResolvedWindow {
            start_date,
            end_date,
            starts_at: local_midnight(tz, start_date),
            ends_at: local_midnight(tz, next_day) - Duration::milliseconds(1),
        })
    }
}

/// A fully specified window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Start of `start_date` in the reporting timezone.
    pub starts_at: DateTime<Utc>,
    /// Last millisecond of `end_date` in the reporting timezone.
    pub ends_at: DateTime<Utc>,
}

impl ResolvedWindow {
    /// Split into consecutive date ranges whose `to - from` span is at most
    /// `max_days`. Ranges are inclusive and do not overlap.
    pub fn date_chunks(&self, max_days: i64) -> Vec<(NaiveDate, NaiveDate)> {
        let span = Duration::days(max_days.max(0));
        let mut chunks = Vec::new();
        let mut from = self.start_date;

        loop {
            let to = (from + span).min(self.end_date);
            chunks.push((from, to));
            match to.succ_opt() {
                Some(next) if to < self.end_date => from = next,
                _ => break,
            }
        }

        chunks
    }
}

fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon_utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        date(y, m, d).and_hms_opt(12, 0, 0).unwrap().and_utc()
    }

    #[test]
    fn open_window_defaults_to_lookback_through_today() {
        let resolved =
            DateWindow::default().resolve(noon_utc(2026, 3, 31), Tz::UTC, 30).unwrap();

        assert_eq!(resolved.start_date, date(2026, 3, 1));
        assert_eq!(resolved.end_date, date(2026, 3, 31));
        assert_eq!(resolved.starts_at, date(2026, 3, 1).and_hms_opt(0, 0, 0).unwrap().and_utc());
        assert_eq!(
            resolved.ends_at,
            date(2026, 3, 31).and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc()
        );
    }

    #[test]
    fn boundaries_follow_reporting_timezone() {
        let tz: Tz = "Europe/Istanbul".parse().unwrap();
        let resolved = DateWindow::between(date(2026, 3, 2), date(2026, 3, 2))
            .resolve(noon_utc(2026, 3, 2), tz, 30)
            .unwrap();

        // Istanbul is UTC+3 year round.
        assert_eq!(resolved.starts_at, date(2026, 3, 1).and_hms_opt(21, 0, 0).unwrap().and_utc());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let result = DateWindow::between(date(2026, 3, 5), date(2026, 3, 1))
            .resolve(noon_utc(2026, 3, 5), Tz::UTC, 30);
        assert!(matches!(result, Err(SlotwatchError::InvalidInput(_))));
    }

    #[test]
    fn short_window_is_a_single_chunk() {
        let resolved =
            DateWindow::default().resolve(noon_utc(2026, 3, 31), Tz::UTC, 30).unwrap();
        assert_eq!(resolved.date_chunks(30), vec![(date(2026, 3, 1), date(2026, 3, 31))]);
    }

    #[test]
    fn long_window_splits_into_contiguous_chunks() {
        let resolved = DateWindow::between(date(2026, 1, 1), date(2026, 3, 15))
            .resolve(noon_utc(2026, 3, 15), Tz::UTC, 30)
            .unwrap();

        assert_eq!(
            resolved.date_chunks(30),
            vec![
                (date(2026, 1, 1), date(2026, 1, 31)),
                (date(2026, 2, 1), date(2026, 3, 3)),
                (date(2026, 3, 4), date(2026, 3, 15)),
            ]
        );
    }
}
