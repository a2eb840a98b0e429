mod csv_bars;
mod json_bars;
mod source;

pub use {
    csv_bars::{CsvBarSource, read_bars},
    json_bars::{JsonRecordsSource, parse_records},
    source::BarSource,
};

use std::path::Path;

/// Pick a loader from the file extension (`.json` -> records, else CSV).
pub fn source_for_path(path: &Path) -> Box<dyn BarSource> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Box::new(JsonRecordsSource::new(path)),
        _ => Box::new(CsvBarSource::new(path)),
    }
}
