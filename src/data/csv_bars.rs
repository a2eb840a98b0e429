//! CSV bar loading.

use {
    crate::{data::source::day_of, domain::Bar, error::ChartError},
    anyhow::{Context, Result},
    std::path::{Path, PathBuf},
};

const TIME_HEADERS: &[&str] = &["time", "date", "datetime", "timestamp"];

/// Loads bars from a CSV file with a header row. Header matching is
/// case-insensitive; the time column may be called `time`, `date`,
/// `datetime` or `timestamp`.
pub struct CsvBarSource {
    path: PathBuf,
}

impl CsvBarSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl super::BarSource for CsvBarSource {
    fn load(&self) -> Result<Vec<Bar>> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        read_bars(reader).with_context(|| format!("reading bars from {}", self.path.display()))
    }
}

pub fn read_bars<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Bar>> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    let find = |name: &str| -> Result<usize, ChartError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ChartError::ColumnNotFound {
                column: name.to_string(),
            })
    };
    let time_col = headers
        .iter()
        .position(|h| TIME_HEADERS.contains(&h.as_str()))
        .ok_or_else(|| ChartError::ColumnNotFound {
            column: "time".to_string(),
        })?;
    let open_col = find("open")?;
    let high_col = find("high")?;
    let low_col = find("low")?;
    let close_col = find("close")?;
    let volume_col = find("volume")?;

    let mut bars = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = |col: usize| record.get(col).unwrap_or("");
        let number = |col: usize| -> Result<f64> {
            field(col)
                .parse::<f64>()
                .with_context(|| format!("row {row}: '{}' is not a number", field(col)))
        };

        bars.push(Bar::new(
            day_of(row, field(time_col))?,
            number(open_col)?,
            number(high_col)?,
            number(low_col)?,
            number(close_col)?,
            number(volume_col)?,
        ));
    }

    log::info!("loaded {} bars", bars.len());
    Ok(bars)
}
