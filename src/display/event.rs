use {
    crate::utils::normalize_day,
    serde::Deserialize,
    serde_json::Value,
};

/// One series' reading under the cursor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceReading {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    /// A number for value series, an `{open, high, low, close}` object for
    /// OHLC series.
    pub values: Value,
}

impl PriceReading {
    pub fn value(&self) -> Option<f64> {
        self.values.as_f64()
    }

    pub fn close(&self) -> Option<f64> {
        self.values.get("close").and_then(Value::as_f64)
    }
}

/// Click report some hosts send back as their interaction state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WidgetEvent {
    pub time: Value,
    #[serde(default)]
    pub prices: Vec<PriceReading>,
}

impl WidgetEvent {
    /// `None` when the state is absent or not a click report.
    pub fn from_value(state: &Value) -> Option<Self> {
        serde_json::from_value(state.clone()).ok()
    }

    /// Clicked day as `YYYY-MM-DD`, if the host sent something recognisable.
    pub fn day(&self) -> Option<String> {
        match &self.time {
            Value::String(s) => normalize_day(s),
            Value::Number(n) => normalize_day(&n.to_string()),
            _ => None,
        }
    }

    pub fn reading(&self, title: &str) -> Option<&PriceReading> {
        self.prices
            .iter()
            .find(|p| p.title.as_deref() == Some(title))
    }
}
