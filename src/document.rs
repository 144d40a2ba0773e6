use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::debug;

/// A structural location inside a parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementQuery<'a> {
    /// `<meta property="...">`
    MetaProperty(&'a str),
    /// `<meta name="...">`
    MetaName(&'a str),
    /// First `<time>` element carrying a `datetime` attribute.
    TimeWithDatetime,
    /// First element with the given class, optionally restricted to a tag.
    Class { tag: Option<&'a str>, class: &'a str },
}

impl ElementQuery<'_> {
    /// CSS selector text for this query. Also used as the lookup key of
    /// `FixtureDocument`.
    pub fn selector(&self) -> String {
        match self {
            ElementQuery::MetaProperty(key) => format!(r#"meta[property="{}"]"#, key),
            ElementQuery::MetaName(key) => format!(r#"meta[name="{}"]"#, key),
            ElementQuery::TimeWithDatetime => "time[datetime]".to_string(),
            ElementQuery::Class { tag: Some(tag), class } => format!("{}.{}", tag, class),
            ElementQuery::Class { tag: None, class } => format!(".{}", class),
        }
    }
}

/// Read-only view of a parsed document used by the extractor.
pub trait ParsedDocument {
    /// Attribute `attr` of the first element matching `query`.
    fn attribute(&self, query: ElementQuery<'_>, attr: &str) -> Option<String>;

    /// Text content of the first element matching the earliest query in
    /// `queries` that matches anything.
    fn text(&self, queries: &[ElementQuery<'_>]) -> Option<String>;
}

/// HTML document backed by `scraper`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    fn first_match(&self, query: ElementQuery<'_>) -> Option<ElementRef<'_>> {
        let css = query.selector();
        let selector = match Selector::parse(&css) {
            Ok(selector) => selector,
            Err(e) => {
                debug!(selector = %css, error = ?e, "Skipping invalid selector");
                return None;
            }
        };
        let found = self.html.select(&selector).next();
        found
    }
}

impl ParsedDocument for HtmlDocument {
    fn attribute(&self, query: ElementQuery<'_>, attr: &str) -> Option<String> {
        self.first_match(query)?
            .value()
            .attr(attr)
            .map(|value| value.to_string())
    }

    fn text(&self, queries: &[ElementQuery<'_>]) -> Option<String> {
        queries
            .iter()
            .find_map(|query| self.first_match(*query))
            .map(|element| element.text().collect::<String>())
    }
}

/// In-memory document for tests and callers that already hold extracted
/// fields. Lookups are keyed by `ElementQuery::selector`.
#[derive(Debug, Clone, Default)]
pub struct FixtureDocument {
    attributes: HashMap<(String, String), String>,
    texts: HashMap<String, String>,
}

impl FixtureDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(
        mut self,
        query: ElementQuery<'_>,
        attr: &str,
        value: impl Into<String>,
    ) -> Self {
        self.attributes
            .insert((query.selector(), attr.to_string()), value.into());
        self
    }

    pub fn with_text(mut self, query: ElementQuery<'_>, text: impl Into<String>) -> Self {
        self.texts.insert(query.selector(), text.into());
        self
    }
}

impl ParsedDocument for FixtureDocument {
    fn attribute(&self, query: ElementQuery<'_>, attr: &str) -> Option<String> {
        self.attributes
            .get(&(query.selector(), attr.to_string()))
            .cloned()
    }

    fn text(&self, queries: &[ElementQuery<'_>]) -> Option<String> {
        queries
            .iter()
            .find_map(|query| self.texts.get(&query.selector()))
            .cloned()
    }
}
