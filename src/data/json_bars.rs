//! JSON "records" bar loading: `[{"time": .., "open": .., ...}, ...]`.

use {
    crate::{data::source::day_of, domain::Bar},
    anyhow::{Context, Result},
    serde::Deserialize,
    serde_json::Value,
    std::path::{Path, PathBuf},
};

#[derive(Debug, Deserialize)]
struct BarRecord {
    #[serde(alias = "date", alias = "Date", alias = "timestamp")]
    time: Value,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume")]
    volume: f64,
}

pub struct JsonRecordsSource {
    path: PathBuf,
}

impl JsonRecordsSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl super::BarSource for JsonRecordsSource {
    fn load(&self) -> Result<Vec<Bar>> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        parse_records(&text).with_context(|| format!("reading bars from {}", self.path.display()))
    }
}

pub fn parse_records(text: &str) -> Result<Vec<Bar>> {
    let records: Vec<BarRecord> = serde_json::from_str(text)?;

    let bars = records
        .into_iter()
        .enumerate()
        .map(|(row, r)| {
            let raw_time = match &r.time {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Ok(Bar::new(
                day_of(row, &raw_time)?,
                r.open,
                r.high,
                r.low,
                r.close,
                r.volume,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    log::info!("loaded {} bars", bars.len());
    Ok(bars)
}
