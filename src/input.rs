use std::fs;
use std::path::Path;

use crate::error::Result;

/// One URL per line. Blank lines and lines starting with `#` are skipped.
pub fn parse_url_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub fn load_url_list(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_url_list(&contents))
}
