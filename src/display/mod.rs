//! The hand-off to whatever host draws the charts. The core never looks
//! inside what the host sends back.

mod event;
mod file;

pub use {
    event::{PriceReading, WidgetEvent},
    file::{JsonFileBoundary, Output},
};

use {
    crate::models::ChartPayload,
    anyhow::Result,
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

/// What the host component receives: every chart plus the widget key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentArgs {
    pub charts: Vec<ChartPayload>,
    #[serde(default)]
    pub key: Option<String>,
}

impl ComponentArgs {
    pub fn new(charts: &[ChartPayload], key: Option<&str>) -> Self {
        Self {
            charts: charts.to_vec(),
            key: key.map(str::to_string),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

pub trait DisplayBoundary {
    /// Hand `charts` to the host. `key` keeps the widget identity stable
    /// across re-renders. Returns the host's latest interaction state, if any.
    fn render(&mut self, charts: &[ChartPayload], key: Option<&str>) -> Result<Option<Value>>;
}
