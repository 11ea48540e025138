use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One astronomy picture of the day entry, as published by the API and its mirror.
///
/// Identity is `(title, date)`. Records are never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    /// Calendar date string, normally `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub explanation: String,

    /// Declared media type (`image`, `video`, ...); empty when absent.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub media_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl ImageRecord {
    /// The record's date, if it parses as `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    /// First non-empty of `url`, `hdurl`, `thumbnail_url`.
    pub fn best_url(&self) -> Option<&str> {
        [&self.url, &self.hdurl, &self.thumbnail_url]
            .into_iter()
            .filter_map(|u| u.as_deref())
            .find(|u| !u.trim().is_empty())
    }

    /// First non-empty of `hdurl`, `url`, `thumbnail_url`; what a detail view shows.
    pub fn best_detail_url(&self) -> Option<&str> {
        [&self.hdurl, &self.url, &self.thumbnail_url]
            .into_iter()
            .filter_map(|u| u.as_deref())
            .find(|u| !u.trim().is_empty())
    }
}

/// Explicit `null` reads as an empty string, like a missing key.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
