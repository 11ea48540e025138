use chrono::NaiveDate;
use url::Url;

/// Raw, unvalidated date bounds as typed by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeInput {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RangeInput {
    /// Both bounds as typed; blank strings count as absent.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Input with neither bound set.
    pub fn unscoped() -> Self {
        Self::default()
    }
}

/// Validated calendar bounds.
///
/// When both bounds are present `start <= end` holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Returns `true` if neither bound is set.
    pub fn is_unscoped(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Returns `true` if `date` falls inside the bounds.
    ///
    /// A single bound matches only its exact day; an unscoped range matches
    /// nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= date && date <= end,
            (Some(start), None) => date == start,
            (None, Some(end)) => date == end,
            (None, None) => false,
        }
    }
}

/// Which request shape a [`FetchTarget`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// No date scoping; the locator is the unscoped default document.
    Default,
    /// One calendar day (`date=`).
    SingleDate,
    /// An inclusive span (`start_date=` / `end_date=`).
    Range,
}

/// A fully formed request locator together with the range it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub(crate) kind: TargetKind,
    pub(crate) locator: Url,
    pub(crate) range: DateRange,
}

impl FetchTarget {
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn locator(&self) -> &Url {
        &self.locator
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn is_default(&self) -> bool {
        self.kind == TargetKind::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn contains_is_inclusive_for_full_ranges() {
        let range = DateRange {
            start: Some(day("2024-01-01")),
            end: Some(day("2024-01-03")),
        };
        assert!(range.contains(day("2024-01-01")));
        assert!(range.contains(day("2024-01-03")));
        assert!(!range.contains(day("2023-12-31")));
        assert!(!range.contains(day("2024-01-04")));
    }

    #[test]
    fn single_bound_matches_exact_day() {
        let start_only = DateRange {
            start: Some(day("2024-02-10")),
            end: None,
        };
        assert!(start_only.contains(day("2024-02-10")));
        assert!(!start_only.contains(day("2024-02-11")));

        let end_only = DateRange {
            start: None,
            end: Some(day("2024-02-10")),
        };
        assert!(end_only.contains(day("2024-02-10")));
        assert!(!end_only.contains(day("2024-02-09")));
    }

    #[test]
    fn unscoped_range_matches_nothing() {
        let range = DateRange::default();
        assert!(range.is_unscoped());
        assert!(!range.contains(day("2024-01-01")));
    }
}
