use serde::{Deserialize, Serialize};

/// One day of price history. `time` is a day-resolution date string
/// (`YYYY-MM-DD`) and is carried through to the chart untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: String,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,

    pub volume: f64,
}

impl Bar {
    pub fn new(
        time: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Bar {
            time: time.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }
}
