//! Document locations and defaults shared across the extractor and crawler.

// Meta tag keys, looked up via `property=` unless noted
pub const OG_TITLE: &str = "og:title";
pub const AUTHOR_NAME: &str = "author"; // looked up via `name=`
pub const ARTICLE_AUTHOR: &str = "article:author";
pub const OG_AUTHOR: &str = "og:author";
pub const ARTICLE_MODIFIED_TIME: &str = "article:modified_time";
pub const ARTICLE_PUBLISHED_TIME: &str = "article:published_time";

pub const CONTENT_ATTR: &str = "content";
pub const DATETIME_ATTR: &str = "datetime";

// Header regions scanned for free-text dates, in priority order
pub const POST_HEADER_CLASS: &str = "post-header";
pub const ARTICLE_HEADER_CLASS: &str = "article-header";

// Fetching defaults
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONCURRENCY: usize = 8;

pub const CONFIG_ENV_VAR: &str = "CRAWLER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "crawler.toml";
