use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::cascade::Cascade;
use crate::constants::{
    ARTICLE_HEADER_CLASS, ARTICLE_MODIFIED_TIME, ARTICLE_PUBLISHED_TIME, CONTENT_ATTR,
    DATETIME_ATTR, POST_HEADER_CLASS,
};
use crate::dates::normalizer::normalize;
use crate::document::{ElementQuery, ParsedDocument};
use crate::error::LocateError;
use crate::types::{CanonicalDate, Provenance, RawDateCandidate};

/// An attribute-bearing location that may hold a date string.
struct StructuredSource {
    provenance: Provenance,
    query: ElementQuery<'static>,
    attr: &'static str,
}

impl StructuredSource {
    fn candidate<D: ParsedDocument + ?Sized>(&self, doc: &D) -> Option<RawDateCandidate> {
        let value = doc.attribute(self.query, self.attr)?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some(RawDateCandidate::new(value, self.provenance))
    }
}

static STRUCTURED_SOURCES: [StructuredSource; 3] = [
    StructuredSource {
        provenance: Provenance::ModifiedTimeTag,
        query: ElementQuery::MetaProperty(ARTICLE_MODIFIED_TIME),
        attr: CONTENT_ATTR,
    },
    StructuredSource {
        provenance: Provenance::PublishedTimeTag,
        query: ElementQuery::MetaProperty(ARTICLE_PUBLISHED_TIME),
        attr: CONTENT_ATTR,
    },
    StructuredSource {
        provenance: Provenance::TimeElement,
        query: ElementQuery::TimeWithDatetime,
        attr: DATETIME_ATTR,
    },
];

static HEADER_REGIONS: [ElementQuery<'static>; 2] = [
    ElementQuery::Class {
        tag: Some("div"),
        class: POST_HEADER_CLASS,
    },
    ElementQuery::Class {
        tag: None,
        class: ARTICLE_HEADER_CLASS,
    },
];

// Date-like substrings in header text, most specific first
static HEADER_PATTERNS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        // 2024-03-05
        Regex::new(r"\b[0-9]{4}-[0-9]{2}-[0-9]{2}\b").unwrap(),
        // March 5, 2024 / Mar 5 2024
        Regex::new(r"\b[A-Za-z]{3,9} [0-9]{1,2},? [0-9]{4}\b").unwrap(),
        // 5 March 2024
        Regex::new(r"\b[0-9]{1,2} [A-Za-z]{3,9} [0-9]{4}\b").unwrap(),
        // 5/3/24, 05-03-2024
        Regex::new(r"\b[0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4}\b").unwrap(),
    ]
});

fn header_text<D: ParsedDocument + ?Sized>(doc: &D) -> Option<String> {
    doc.text(&HEADER_REGIONS)
}

/// First match of each header pattern, in pattern priority order.
pub fn header_candidates(text: &str) -> Vec<RawDateCandidate> {
    HEADER_PATTERNS
        .iter()
        .filter_map(|pattern| pattern.find(text))
        .map(|m| RawDateCandidate::new(m.as_str(), Provenance::HeaderText))
        .collect()
}

/// Every raw date candidate in the document, highest priority first.
pub fn candidates<D: ParsedDocument + ?Sized>(doc: &D) -> Vec<RawDateCandidate> {
    let mut found: Vec<RawDateCandidate> = STRUCTURED_SOURCES
        .iter()
        .filter_map(|source| source.candidate(doc))
        .collect();
    if let Some(text) = header_text(doc) {
        found.extend(header_candidates(&text));
    }
    found
}

fn accept(candidate: &RawDateCandidate) -> Option<(CanonicalDate, Provenance)> {
    match normalize(candidate.raw()) {
        Ok(date) => Some((date, candidate.provenance())),
        Err(e) => {
            trace!(provenance = %candidate.provenance(), error = %e, "Rejected date candidate");
            None
        }
    }
}

/// Find the document's date and the location it came from.
///
/// Sources are tried in priority order. A source whose value does not
/// normalize is skipped rather than ending the search.
pub fn locate_with_provenance<D: ParsedDocument + ?Sized>(
    doc: &D,
) -> Result<(CanonicalDate, Provenance), LocateError> {
    let chain = STRUCTURED_SOURCES
        .iter()
        .fold(Cascade::new(), |chain, source| {
            chain.then(source.provenance.label(), move |doc: &D| {
                source.candidate(doc).as_ref().and_then(accept)
            })
        })
        .then(Provenance::HeaderText.label(), |doc: &D| {
            let text = header_text(doc)?;
            header_candidates(&text).iter().find_map(accept)
        });

    chain
        .run(doc)
        .map(|hit| hit.value)
        .ok_or(LocateError::NoDateFound)
}

pub fn locate<D: ParsedDocument + ?Sized>(doc: &D) -> Result<CanonicalDate, LocateError> {
    locate_with_provenance(doc).map(|(date, _)| date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FixtureDocument;

    fn meta(key: &str) -> ElementQuery<'_> {
        ElementQuery::MetaProperty(key)
    }

    fn post_header() -> ElementQuery<'static> {
        HEADER_REGIONS[0]
    }

    #[test]
    fn test_modified_time_preferred_over_published() {
        let doc = FixtureDocument::new()
            .with_attribute(meta(ARTICLE_PUBLISHED_TIME), CONTENT_ATTR, "2024-01-10T08:00:00+00:00")
            .with_attribute(meta(ARTICLE_MODIFIED_TIME), CONTENT_ATTR, "2024-02-20T08:00:00+00:00");

        assert_eq!(
            locate_with_provenance(&doc),
            Ok((CanonicalDate::new(2024, 2, 20), Provenance::ModifiedTimeTag))
        );
    }

    #[test]
    fn test_unparseable_modified_time_falls_through_to_published() {
        let doc = FixtureDocument::new()
            .with_attribute(meta(ARTICLE_MODIFIED_TIME), CONTENT_ATTR, "last week")
            .with_attribute(meta(ARTICLE_PUBLISHED_TIME), CONTENT_ATTR, "2024-01-10");

        assert_eq!(
            locate_with_provenance(&doc),
            Ok((CanonicalDate::new(2024, 1, 10), Provenance::PublishedTimeTag))
        );
    }

    #[test]
    fn test_blank_attribute_counts_as_absent() {
        let doc = FixtureDocument::new()
            .with_attribute(meta(ARTICLE_MODIFIED_TIME), CONTENT_ATTR, "  ")
            .with_attribute(ElementQuery::TimeWithDatetime, DATETIME_ATTR, "2023-11-02");

        assert_eq!(
            locate_with_provenance(&doc),
            Ok((CanonicalDate::new(2023, 11, 2), Provenance::TimeElement))
        );
        assert_eq!(candidates(&doc).len(), 1);
    }

    #[test]
    fn test_header_text_day_first() {
        let doc = FixtureDocument::new().with_text(post_header(), "Updated: 5 March 2024");
        assert_eq!(
            locate_with_provenance(&doc),
            Ok((CanonicalDate::new(2024, 3, 5), Provenance::HeaderText))
        );
    }

    #[test]
    fn test_header_pattern_priority() {
        let found = header_candidates("By Sam on March 5, 2024 (rev. 2024-04-01)");
        let raws: Vec<&str> = found.iter().map(|c| c.raw()).collect();
        assert_eq!(raws, vec!["2024-04-01", "March 5, 2024"]);
    }

    #[test]
    fn test_header_text_month_first() {
        let doc = FixtureDocument::new().with_text(post_header(), "Posted on Feb 15, 2025 by staff");
        assert_eq!(locate(&doc), Ok(CanonicalDate::new(2025, 2, 15)));
    }

    #[test]
    fn test_header_numeric_date() {
        let doc = FixtureDocument::new().with_text(HEADER_REGIONS[1], "Filed 03/04/2025");
        assert_eq!(locate(&doc), Ok(CanonicalDate::new(2025, 3, 4)));
    }

    #[test]
    fn test_two_digit_year_is_not_a_date() {
        let doc = FixtureDocument::new().with_text(post_header(), "Posted 5/3/24 by staff");
        assert_eq!(locate(&doc), Err(LocateError::NoDateFound));

        let doc = FixtureDocument::new()
            .with_attribute(ElementQuery::TimeWithDatetime, DATETIME_ATTR, "03/04/25")
            .with_text(post_header(), "Updated: 5 March 2024");
        assert_eq!(
            locate_with_provenance(&doc),
            Ok((CanonicalDate::new(2024, 3, 5), Provenance::HeaderText))
        );
    }

    #[test]
    fn test_no_sources() {
        let empty = FixtureDocument::new();
        assert_eq!(locate(&empty), Err(LocateError::NoDateFound));

        let undated = FixtureDocument::new()
            .with_attribute(meta(ARTICLE_MODIFIED_TIME), CONTENT_ATTR, "recently")
            .with_text(post_header(), "Written by the editors");
        assert_eq!(locate(&undated), Err(LocateError::NoDateFound));
        assert_eq!(candidates(&undated).len(), 1);
    }
}
