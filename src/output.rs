use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::types::MetadataRecord;

/// Column order of CSV output; JSON objects use the same keys.
pub const CSV_HEADERS: [&str; 5] = ["url", "og_title", "author", "article_date", "error"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => f.write_str("CSV"),
            OutputFormat::Json => f.write_str("JSON"),
        }
    }
}

/// Header row is always written, even with no records.
pub fn write_csv<W: Write>(records: &[MetadataRecord], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(records: &[MetadataRecord], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn save(records: &[MetadataRecord], path: &Path, format: OutputFormat) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Csv => write_csv(records, writer)?,
        OutputFormat::Json => write_json(records, writer)?,
    }
    info!(path = %path.display(), %format, count = records.len(), "Saved results");
    Ok(())
}
