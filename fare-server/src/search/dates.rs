//! Candidate departure dates for a search.

use chrono::{Days, NaiveDate};

use crate::domain::TripType;

/// Lazy, ascending sequence of candidate outbound dates.
///
/// For one-way trips this is every date in `[start, end]`. For return-family
/// trips the last candidate is `end - min_days`: leaving later than that
/// cannot fit the minimum stay before the window closes. Weekend filtering is
/// left to the caller.
#[derive(Debug, Clone)]
pub struct DateAxis {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl DateAxis {
    /// Build the axis for a trip type and window.
    pub fn new(start: NaiveDate, end: NaiveDate, trip_type: TripType, min_days: u32) -> Self {
        let last = if trip_type.is_return_family() {
            end.checked_sub_days(Days::new(u64::from(min_days)))
        } else {
            Some(end)
        };

        match last {
            Some(last) if last >= start => Self {
                next: Some(start),
                last,
            },
            _ => Self {
                next: None,
                last: start,
            },
        }
    }

    /// The last date this axis will produce, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.next.map(|_| self.last)
    }
}

impl Iterator for DateAxis {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.last);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn one_way_covers_whole_window() {
        let dates: Vec<_> = DateAxis::new(date(6, 1), date(6, 3), TripType::OneWay, 5).collect();
        assert_eq!(dates, vec![date(6, 1), date(6, 2), date(6, 3)]);
    }

    #[test]
    fn single_day_window() {
        let dates: Vec<_> = DateAxis::new(date(6, 1), date(6, 1), TripType::OneWay, 0).collect();
        assert_eq!(dates, vec![date(6, 1)]);
    }

    #[test]
    fn return_stops_min_days_before_end() {
        let dates: Vec<_> = DateAxis::new(date(6, 1), date(6, 10), TripType::Return, 3).collect();
        assert_eq!(dates.first(), Some(&date(6, 1)));
        assert_eq!(dates.last(), Some(&date(6, 7)));
        assert_eq!(dates.len(), 7);
    }

    #[test]
    fn weekend_axis_uses_return_cutoff() {
        let axis = DateAxis::new(date(6, 3), date(6, 10), TripType::Weekend, 1);
        assert_eq!(axis.last_date(), Some(date(6, 9)));
        assert_eq!(axis.count(), 7);
    }

    #[test]
    fn stay_longer_than_window_is_empty() {
        let mut axis = DateAxis::new(date(6, 1), date(6, 3), TripType::Return, 5);
        assert_eq!(axis.last_date(), None);
        assert_eq!(axis.next(), None);
    }

    #[test]
    fn crosses_month_boundary() {
        let dates: Vec<_> = DateAxis::new(date(6, 29), date(7, 2), TripType::OneWay, 0).collect();
        assert_eq!(dates, vec![date(6, 29), date(6, 30), date(7, 1), date(7, 2)]);
    }

    #[test]
    fn exhausted_axis_stays_exhausted() {
        let mut axis = DateAxis::new(date(6, 1), date(6, 1), TripType::OneWay, 0);
        assert!(axis.next().is_some());
        assert!(axis.next().is_none());
        assert!(axis.next().is_none());
    }
}
