//! Inclusive calendar-date intervals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed `[start, end]` range of calendar days.
///
/// Both endpoints belong to the range, so a one-day booking has
/// `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range from its endpoints. No ordering check is made here.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Range that is open on either side where a bound is missing.
    pub fn bounded_by(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.unwrap_or(NaiveDate::MIN),
            end: end.unwrap_or(NaiveDate::MAX),
        }
    }

    /// `true` when the end precedes the start.
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// Returns `true` when the two ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        !(self.end < other.start || self.start > other.end)
    }

    /// Returns `true` when `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn range(a: u32, b: u32) -> DateRange {
        DateRange::new(day(a), day(b))
    }

    #[test]
    fn touching_endpoints_overlap() {
        assert!(range(1, 5).overlaps(&range(5, 9)));
        assert!(range(5, 9).overlaps(&range(1, 5)));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        assert!(!range(1, 4).overlaps(&range(5, 9)));
        assert!(!range(10, 12).overlaps(&range(5, 9)));
    }

    #[test]
    fn containment_counts_as_overlap_both_ways() {
        assert!(range(1, 20).overlaps(&range(5, 9)));
        assert!(range(5, 9).overlaps(&range(1, 20)));
        assert!(range(7, 7).overlaps(&range(7, 7)));
    }

    #[test]
    fn missing_bounds_are_unbounded() {
        let open_end = DateRange::bounded_by(Some(day(10)), None);
        assert!(open_end.overlaps(&range(28, 30)));
        assert!(!open_end.overlaps(&range(1, 9)));

        let everything = DateRange::bounded_by(None, None);
        assert!(everything.contains(day(1)));
        assert!(!everything.is_inverted());
    }

    #[test]
    fn inverted_range_is_detected() {
        assert!(range(9, 3).is_inverted());
        assert!(!range(3, 3).is_inverted());
    }
}
