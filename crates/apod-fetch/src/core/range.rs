use chrono::NaiveDate;

use crate::data::{DateRange, Endpoints, FetchTarget, RangeInput, TargetKind};
use crate::error::{FetchError, Result};

/// Longest allowed distance, in days, between start and end.
pub const MAX_RANGE_DAYS: i64 = 30;

/// Turn raw bounds into an ordered, size-checked [`DateRange`].
///
/// Blank input counts as absent. Reversed bounds are swapped silently.
pub fn validate_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange> {
    let start = parse_bound(start)?;
    let end = parse_bound(end)?;

    let (start, end) = match (start, end) {
        (Some(s), Some(e)) if s > e => (Some(e), Some(s)),
        bounds => bounds,
    };

    if let (Some(s), Some(e)) = (start, end) {
        let days = (e - s).num_days();
        if days > MAX_RANGE_DAYS {
            return Err(FetchError::RangeTooLarge {
                days,
                max: MAX_RANGE_DAYS,
            });
        }
    }

    Ok(DateRange { start, end })
}

fn parse_bound(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FetchError::InvalidDate {
            input: raw.to_string(),
        })
}

/// Validate `input` and build the request it calls for.
///
/// An unscoped input targets the mirror document directly; a single bound
/// becomes a `date=` query and two bounds a `start_date=`/`end_date=` query.
pub fn build_target(input: &RangeInput, endpoints: &Endpoints) -> Result<FetchTarget> {
    let range = validate_range(input.start.as_deref(), input.end.as_deref())?;
    Ok(FetchTarget::from_range(range, endpoints))
}

impl FetchTarget {
    pub fn from_range(range: DateRange, endpoints: &Endpoints) -> Self {
        let (kind, locator) = match (range.start, range.end) {
            (None, None) => (TargetKind::Default, endpoints.mirror_url.clone()),
            (Some(start), Some(end)) => {
                let mut url = endpoints.api_url.clone();
                url.query_pairs_mut()
                    .append_pair("api_key", &endpoints.api_key)
                    .append_pair("start_date", &fmt_day(start))
                    .append_pair("end_date", &fmt_day(end));
                (TargetKind::Range, url)
            }
            (Some(day), None) | (None, Some(day)) => {
                let mut url = endpoints.api_url.clone();
                url.query_pairs_mut()
                    .append_pair("api_key", &endpoints.api_key)
                    .append_pair("date", &fmt_day(day));
                (TargetKind::SingleDate, url)
            }
        };

        Self {
            kind,
            locator,
            range,
        }
    }
}

fn fmt_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PipelineConfig;
    use proptest::prelude::*;

    fn endpoints() -> Endpoints {
        PipelineConfig {
            api_key: "test-key".into(),
            ..PipelineConfig::default()
        }
        .endpoints()
        .unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn query(target: &FetchTarget) -> Vec<(String, String)> {
        target
            .locator()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn epoch_plus(days: i64) -> NaiveDate {
        day("2000-01-01") + chrono::TimeDelta::days(days)
    }

    #[test]
    fn blank_input_is_default_target() {
        let target = build_target(&RangeInput::new("  ", ""), &endpoints()).unwrap();
        assert_eq!(target.kind(), TargetKind::Default);
        assert!(target.range().is_unscoped());
        assert_eq!(target.locator(), &endpoints().mirror_url);
    }

    #[test]
    fn missing_input_is_default_target() {
        let target = build_target(&RangeInput::unscoped(), &endpoints()).unwrap();
        assert!(target.is_default());
    }

    #[test]
    fn start_only_is_single_date() {
        let target = build_target(&RangeInput::new(" 2024-03-05 ", ""), &endpoints()).unwrap();
        assert_eq!(target.kind(), TargetKind::SingleDate);
        assert_eq!(
            query(&target),
            pairs(&[("api_key", "test-key"), ("date", "2024-03-05")])
        );
        assert_eq!(target.range().start, Some(day("2024-03-05")));
        assert_eq!(target.range().end, None);
    }

    #[test]
    fn end_only_is_single_date() {
        let input = RangeInput {
            start: None,
            end: Some("2024-03-07".into()),
        };
        let target = build_target(&input, &endpoints()).unwrap();
        assert_eq!(target.kind(), TargetKind::SingleDate);
        assert_eq!(query(&target)[1..], pairs(&[("date", "2024-03-07")])[..]);
        assert_eq!(target.range().end, Some(day("2024-03-07")));
    }

    #[test]
    fn both_bounds_build_range_query() {
        let target =
            build_target(&RangeInput::new("2024-01-01", "2024-01-03"), &endpoints()).unwrap();
        assert_eq!(target.kind(), TargetKind::Range);
        assert_eq!(target.locator().path(), "/planetary/apod");
        assert_eq!(
            query(&target),
            pairs(&[
                ("api_key", "test-key"),
                ("start_date", "2024-01-01"),
                ("end_date", "2024-01-03"),
            ])
        );
    }

    #[test]
    fn exactly_thirty_days_is_allowed() {
        let range = validate_range(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        assert_eq!(range.end, Some(day("2024-01-31")));
    }

    #[test]
    fn thirty_one_days_is_too_large() {
        let err = validate_range(Some("2024-01-01"), Some("2024-02-01")).unwrap_err();
        assert_eq!(err, FetchError::RangeTooLarge { days: 31, max: 30 });
    }

    #[test]
    fn reversed_oversized_range_still_fails() {
        let err = validate_range(Some("2024-06-01"), Some("2024-01-01")).unwrap_err();
        assert!(matches!(err, FetchError::RangeTooLarge { .. }));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = validate_range(Some("2024-13-01"), None).unwrap_err();
        assert_eq!(
            err,
            FetchError::InvalidDate {
                input: "2024-13-01".into()
            }
        );
        assert!(validate_range(None, Some("yesterday")).is_err());
    }

    proptest! {
        #[test]
        fn ordered_ranges_are_kept(offset in 0i64..9000, span in 0i64..=30) {
            let (s, e) = (epoch_plus(offset), epoch_plus(offset + span));
            let input = RangeInput::new(fmt_day(s), fmt_day(e));
            let target = build_target(&input, &endpoints()).unwrap();

            prop_assert_eq!(target.kind(), TargetKind::Range);
            prop_assert_eq!(target.range().start, Some(s));
            prop_assert_eq!(target.range().end, Some(e));
            let q = query(&target);
            prop_assert_eq!(&q[1].1, &fmt_day(s));
            prop_assert_eq!(&q[2].1, &fmt_day(e));
        }

        #[test]
        fn reversed_ranges_are_swapped(offset in 0i64..9000, span in 1i64..=30) {
            let (s, e) = (epoch_plus(offset), epoch_plus(offset + span));
            let swapped = validate_range(Some(&fmt_day(e)), Some(&fmt_day(s))).unwrap();
            prop_assert_eq!(swapped.start, Some(s));
            prop_assert_eq!(swapped.end, Some(e));

            let a = fmt_day(swapped.start.unwrap());
            let b = fmt_day(swapped.end.unwrap());
            let again = validate_range(Some(&a), Some(&b)).unwrap();
            prop_assert_eq!(again, swapped);
        }

        #[test]
        fn oversized_ranges_fail(offset in 0i64..9000, span in 31i64..400) {
            let (s, e) = (epoch_plus(offset), epoch_plus(offset + span));
            let result = build_target(&RangeInput::new(fmt_day(s), fmt_day(e)), &endpoints());
            prop_assert_eq!(result, Err(FetchError::RangeTooLarge { days: span, max: MAX_RANGE_DAYS }));
        }
    }
}
