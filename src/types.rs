use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// A calendar day with no time-of-day or timezone.
///
/// Dates recovered by loose numeric extraction are not calendar-checked, so
/// the components are stored as plain numbers. `to_naive_date` tells the two
/// cases apart when a caller needs a real calendar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CanonicalDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// January 1st of `year`; produced by the year-only fallback.
    pub fn year_only(year: i32) -> Self {
        Self::new(year, 1, 1)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where in a document a raw date string was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    ModifiedTimeTag,
    PublishedTimeTag,
    TimeElement,
    HeaderText,
}

impl Provenance {
    pub fn label(&self) -> &'static str {
        match self {
            Provenance::ModifiedTimeTag => "modified_time_tag",
            Provenance::PublishedTimeTag => "published_time_tag",
            Provenance::TimeElement => "time_element",
            Provenance::HeaderText => "header_text",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A string believed to encode a date, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDateCandidate {
    raw: String,
    provenance: Provenance,
}

impl RawDateCandidate {
    pub fn new(raw: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            raw: raw.into(),
            provenance,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }
}

/// One extracted document. Serialized field names are the output columns.
///
/// A record either carries content (any subset of title/author/date) or a
/// fetch-level error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    url: String,
    og_title: Option<String>,
    author: Option<String>,
    article_date: Option<CanonicalDate>,
    error: Option<String>,
}

impl MetadataRecord {
    pub fn extracted(
        url: impl Into<String>,
        title: Option<String>,
        author: Option<String>,
        date: Option<CanonicalDate>,
    ) -> Self {
        Self {
            url: url.into(),
            og_title: title,
            author,
            article_date: date,
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            og_title: None,
            author: None,
            article_date: None,
            error: Some(error.into()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> Option<&str> {
        self.og_title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn date(&self) -> Option<CanonicalDate> {
        self.article_date
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_date_display_is_zero_padded() {
        assert_eq!(CanonicalDate::new(2025, 2, 5).to_string(), "2025-02-05");
        assert_eq!(CanonicalDate::year_only(987).to_string(), "0987-01-01");
    }

    #[test]
    fn test_unvalidated_date_has_no_calendar_value() {
        assert!(CanonicalDate::new(2025, 13, 1).to_naive_date().is_none());
        assert_eq!(
            CanonicalDate::new(2024, 2, 29).to_naive_date(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn test_failed_record_has_no_content() {
        let record = MetadataRecord::failed("https://example.com", "timeout");
        assert_eq!(record.title(), None);
        assert_eq!(record.author(), None);
        assert_eq!(record.date(), None);
        assert_eq!(record.error(), Some("timeout"));
        assert!(!record.is_success());
    }

    #[test]
    fn test_record_serializes_with_output_column_names() {
        let record = MetadataRecord::extracted(
            "https://example.com/a",
            Some("A title".to_string()),
            None,
            Some(CanonicalDate::new(2025, 2, 15)),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["url"], "https://example.com/a");
        assert_eq!(value["og_title"], "A title");
        assert!(value["author"].is_null());
        assert_eq!(value["article_date"], "2025-02-15");
        assert!(value["error"].is_null());
    }
}
