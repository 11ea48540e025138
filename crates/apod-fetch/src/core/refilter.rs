use crate::data::{DateRange, ImageRecord};
use crate::error::{FetchError, Result};

/// Cut an unscoped mirror listing down to the originally requested range.
///
/// An unscoped range leaves `records` untouched. Records whose date does not
/// parse are dropped. An empty result is an error.
pub fn refilter(records: Vec<ImageRecord>, range: &DateRange) -> Result<Vec<ImageRecord>> {
    if range.is_unscoped() {
        return Ok(records);
    }

    let kept: Vec<ImageRecord> = records
        .into_iter()
        .filter(|record| record.parsed_date().is_some_and(|d| range.contains(d)))
        .collect();

    if kept.is_empty() {
        return Err(FetchError::NoResultsInRange);
    }
    Ok(kept)
}
