use tracing::debug;

use crate::constants::{ARTICLE_AUTHOR, AUTHOR_NAME, CONTENT_ATTR, OG_AUTHOR, OG_TITLE};
use crate::dates::locate_with_provenance;
use crate::document::{ElementQuery, HtmlDocument, ParsedDocument};
use crate::types::MetadataRecord;

static TITLE_SOURCES: [ElementQuery<'static>; 1] = [ElementQuery::MetaProperty(OG_TITLE)];

static AUTHOR_SOURCES: [ElementQuery<'static>; 3] = [
    ElementQuery::MetaName(AUTHOR_NAME),
    ElementQuery::MetaProperty(ARTICLE_AUTHOR),
    ElementQuery::MetaProperty(OG_AUTHOR),
];

/// First non-blank `content` value among `sources`.
fn first_content<D: ParsedDocument + ?Sized>(doc: &D, sources: &[ElementQuery<'_>]) -> Option<String> {
    sources.iter().find_map(|query| {
        doc.attribute(*query, CONTENT_ATTR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Build the metadata record for one document.
///
/// Never fails: a field that cannot be found is left empty, and the record
/// carries no error.
pub fn extract<D: ParsedDocument + ?Sized>(doc: &D, source_id: &str) -> MetadataRecord {
    let title = first_content(doc, &TITLE_SOURCES);
    let author = first_content(doc, &AUTHOR_SOURCES);
    let date = match locate_with_provenance(doc) {
        Ok((date, provenance)) => {
            debug!(url = %source_id, %date, %provenance, "Located article date");
            Some(date)
        }
        Err(e) => {
            debug!(url = %source_id, reason = %e, "No article date");
            None
        }
    };

    MetadataRecord::extracted(source_id, title, author, date)
}

/// Parse `html` and extract its metadata.
pub fn extract_html(html: &str, source_id: &str) -> MetadataRecord {
    extract(&HtmlDocument::parse(html), source_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FixtureDocument;
    use crate::types::CanonicalDate;

    #[test]
    fn test_author_fallback_order() {
        let doc = FixtureDocument::new()
            .with_attribute(ElementQuery::MetaProperty(OG_AUTHOR), CONTENT_ATTR, "OG Author")
            .with_attribute(ElementQuery::MetaProperty(ARTICLE_AUTHOR), CONTENT_ATTR, "Article Author");
        assert_eq!(extract(&doc, "id").author(), Some("Article Author"));

        let doc = doc.with_attribute(ElementQuery::MetaName(AUTHOR_NAME), CONTENT_ATTR, "Named Author");
        assert_eq!(extract(&doc, "id").author(), Some("Named Author"));
    }

    #[test]
    fn test_blank_author_falls_through() {
        let doc = FixtureDocument::new()
            .with_attribute(ElementQuery::MetaName(AUTHOR_NAME), CONTENT_ATTR, " ")
            .with_attribute(ElementQuery::MetaProperty(OG_AUTHOR), CONTENT_ATTR, " Jo Writer ");
        assert_eq!(extract(&doc, "id").author(), Some("Jo Writer"));
    }

    #[test]
    fn test_partial_record() {
        let doc = FixtureDocument::new()
            .with_attribute(ElementQuery::MetaProperty(OG_TITLE), CONTENT_ATTR, "Only a title");
        let record = extract(&doc, "https://example.com/x");

        assert_eq!(record.url(), "https://example.com/x");
        assert_eq!(record.title(), Some("Only a title"));
        assert_eq!(record.author(), None);
        assert_eq!(record.date(), None);
        assert!(record.is_success());
    }

    #[test]
    fn test_extract_html() {
        let html = r#"<html><head>
            <meta property="og:title" content="Hello">
            <meta property="article:published_time" content="2025-02-15T09:00:00+01:00">
        </head><body></body></html>"#;
        let record = extract_html(html, "https://example.com/hello");

        assert_eq!(record.title(), Some("Hello"));
        assert_eq!(record.date(), Some(CanonicalDate::new(2025, 2, 15)));
    }

    #[test]
    fn test_garbage_input_yields_empty_record() {
        for html in ["", "not html at all", "<<<>>>", "<meta property=og:title>"] {
            let record = extract_html(html, "u");
            assert!(record.is_success());
            assert_eq!(record.title(), None);
            assert_eq!(record.author(), None);
            assert_eq!(record.date(), None);
        }
    }
}
