use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::cascade::Cascade;
use crate::error::DateError;
use crate::types::CanonicalDate;

/// A calendar template tried against the whole trimmed input.
#[derive(Debug, Clone, Copy)]
enum Template {
    Date(&'static str),
    DateTime(&'static str),
    OffsetDateTime(&'static str),
}

impl Template {
    fn label(&self) -> &'static str {
        match self {
            Template::Date(fmt) | Template::DateTime(fmt) | Template::OffsetDateTime(fmt) => *fmt,
        }
    }

    /// `%Y` accepts any digit count, so the year span is checked separately.
    /// Every `%Y` template has its year at one end of the input.
    fn has_full_year(&self, input: &str) -> bool {
        let fmt = self.label();
        if fmt.starts_with("%Y") {
            LEADING_YEAR.is_match(input)
        } else if fmt.ends_with("%Y") {
            TRAILING_YEAR.is_match(input)
        } else {
            true
        }
    }

    fn parse(&self, input: &str) -> Option<NaiveDate> {
        if !self.has_full_year(input) {
            return None;
        }
        match self {
            Template::Date(fmt) => NaiveDate::parse_from_str(input, fmt).ok(),
            Template::DateTime(fmt) => NaiveDateTime::parse_from_str(input, fmt)
                .ok()
                .map(|dt| dt.date()),
            // Date as written, in the input's own offset
            Template::OffsetDateTime(fmt) => DateTime::<FixedOffset>::parse_from_str(input, fmt)
                .ok()
                .map(|dt| dt.date_naive()),
        }
    }
}

/// Order matters: ambiguous numeric input such as `03/04/2025` resolves to
/// whichever slash format comes first (US month/day).
static TEMPLATES: [Template; 16] = [
    // ISO date
    Template::Date("%Y-%m-%d"),
    // ISO with time, with and without offset
    Template::OffsetDateTime("%Y-%m-%dT%H:%M:%S%z"),
    Template::OffsetDateTime("%Y-%m-%dT%H:%M:%S%:z"),
    Template::DateTime("%Y-%m-%dT%H:%M:%SZ"),
    Template::DateTime("%Y-%m-%dT%H:%M:%S"),
    // "Feb 15, 2025" / "February 15, 2025"
    Template::Date("%b %d, %Y"),
    Template::Date("%B %d, %Y"),
    // US then European numeric
    Template::Date("%m/%d/%Y"),
    Template::Date("%d/%m/%Y"),
    Template::Date("%Y/%m/%d"),
    // "15-Feb-25" / "15-February-2025"
    Template::Date("%d-%b-%y"),
    Template::Date("%d-%B-%Y"),
    // Shapes emitted by header text scanning: "5 March 2024", "March 5 2024"
    Template::Date("%d %b %Y"),
    Template::Date("%d %B %Y"),
    Template::Date("%b %d %Y"),
    Template::Date("%B %d %Y"),
];

static YMD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4})[/-]([0-9]{2})[/-]([0-9]{2})").unwrap());
static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}").unwrap());
static LEADING_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}(?:[^0-9]|$)").unwrap());
static TRAILING_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|[^0-9])[0-9]{4}$").unwrap());

static NORMALIZER: Lazy<Cascade<'static, str, CanonicalDate>> = Lazy::new(|| {
    TEMPLATES
        .iter()
        .fold(Cascade::new(), |cascade, template| {
            cascade.then(template.label(), move |input: &str| {
                template.parse(input).map(CanonicalDate::from)
            })
        })
        .then("embedded-ymd", embedded_ymd)
        .then("year-only", year_only)
});

/// Year-month-day digits anywhere in the string, taken as-is.
///
/// No calendar check happens here, so `2025-13-40` is returned unchanged.
fn embedded_ymd(input: &str) -> Option<CanonicalDate> {
    let caps = YMD_PATTERN.captures(input)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    Some(CanonicalDate::new(year, month, day))
}

/// First four-digit run, read as January 1st of that year.
fn year_only(input: &str) -> Option<CanonicalDate> {
    let year = YEAR_PATTERN.find(input)?.as_str().parse().ok()?;
    Some(CanonicalDate::year_only(year))
}

/// Convert a loosely formatted date string into a canonical date.
///
/// Tries the fixed templates first, then year-month-day digits embedded in
/// the text, then a bare year. A result of January 1st may therefore only
/// be accurate to the year.
pub fn normalize(raw: &str) -> Result<CanonicalDate, DateError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(DateError::EmptyInput);
    }

    match NORMALIZER.run(input) {
        Some(hit) => {
            trace!(raw = %input, strategy = hit.label, date = %hit.value, "Normalized date");
            Ok(hit.value)
        }
        None => Err(DateError::Unparseable(input.to_string())),
    }
}
