use {
    crate::error::ChartError,
    serde::{Deserialize, Deserializer, Serialize},
    serde_json::{Map, Value},
    strum_macros::{Display, EnumIter, EnumString},
};

// NaN goes out as `null`; read it back the same way.
fn nan_from_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Single-value point (Line, Area, Baseline, Histogram).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: String,
    #[serde(deserialize_with = "nan_from_null")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Open/high/low/close point (Candlestick, Bar).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcPoint {
    pub time: String,
    #[serde(deserialize_with = "nan_from_null")]
    pub open: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub high: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub low: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum SeriesKind {
    Area,
    Baseline,
    Histogram,
    Line,
    Bar,
    Candlestick,
}

impl SeriesKind {
    /// Name of the chart API method that creates this series.
    pub fn api_method(&self) -> &'static str {
        match self {
            Self::Area => "addAreaSeries",
            Self::Baseline => "addBaselineSeries",
            Self::Histogram => "addHistogramSeries",
            Self::Line => "addLineSeries",
            Self::Bar => "addBarSeries",
            Self::Candlestick => "addCandlestickSeries",
        }
    }

    pub fn takes_ohlc(&self) -> bool {
        matches!(self, Self::Bar | Self::Candlestick)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesData {
    Ohlc(Vec<OhlcPoint>),
    Values(Vec<SeriesPoint>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Ohlc(points) => points.len(),
            SeriesData::Values(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn time_at(&self, idx: usize) -> Option<&str> {
        match self {
            SeriesData::Ohlc(points) => points.get(idx).map(|p| p.time.as_str()),
            SeriesData::Values(points) => points.get(idx).map(|p| p.time.as_str()),
        }
    }

    // An empty series has no shape, so it fits either kind
    fn fits(&self, kind: SeriesKind) -> bool {
        self.is_empty()
            || match self {
                SeriesData::Ohlc(_) => kind.takes_ohlc(),
                SeriesData::Values(_) => !kind.takes_ohlc(),
            }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    AboveBar,
    BelowBar,
    InBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerShape {
    Circle,
    Square,
    ArrowUp,
    ArrowDown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMarker {
    pub time: String,
    pub position: MarkerPosition,
    pub shape: MarkerShape,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// One plotted series and the pane it lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesWire", into = "SeriesWire")]
pub struct SeriesDefinition {
    pub kind: SeriesKind,
    pub data: SeriesData,
    pub options: Map<String, Value>,
    pub pane: usize,
    pub title: Option<String>,
    pub price_scale: Option<Value>,
    pub markers: Vec<SeriesMarker>,
}

impl SeriesDefinition {
    pub fn new(kind: SeriesKind, data: SeriesData) -> Result<Self, ChartError> {
        if !data.fits(kind) {
            return Err(ChartError::SeriesDataMismatch {
                kind: kind.to_string(),
            });
        }
        Ok(Self {
            kind,
            data,
            options: Map::new(),
            pane: 0,
            title: None,
            price_scale: None,
            markers: Vec::new(),
        })
    }

    pub fn on_pane(mut self, pane: usize) -> Self {
        self.pane = pane;
        self
    }

    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_price_scale(mut self, price_scale: Value) -> Self {
        self.price_scale = Some(price_scale);
        self
    }

    pub fn with_markers(mut self, markers: Vec<SeriesMarker>) -> Self {
        self.markers = markers;
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn first_time(&self) -> Option<&str> {
        self.data.time_at(0)
    }

    pub fn last_time(&self) -> Option<&str> {
        self.data.time_at(self.data.len().checked_sub(1)?)
    }
}

/// Shape the widget reads: the pane index travels inside `options`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesWire {
    #[serde(rename = "type")]
    kind: SeriesKind,
    data: SeriesData,
    #[serde(default)]
    options: Map<String, Value>,
    #[serde(rename = "priceScale", default, skip_serializing_if = "Option::is_none")]
    price_scale: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    markers: Vec<SeriesMarker>,
}

impl From<SeriesDefinition> for SeriesWire {
    fn from(series: SeriesDefinition) -> Self {
        let mut options = series.options;
        options.insert("pane".to_string(), Value::from(series.pane));
        SeriesWire {
            kind: series.kind,
            data: series.data,
            options,
            price_scale: series.price_scale,
            title: series.title,
            markers: series.markers,
        }
    }
}

impl TryFrom<SeriesWire> for SeriesDefinition {
    type Error = ChartError;

    fn try_from(wire: SeriesWire) -> Result<Self, Self::Error> {
        let mut options = wire.options;
        let pane = match options.remove("pane") {
            None => 0,
            Some(pane) => pane
                .as_u64()
                .and_then(|pane| usize::try_from(pane).ok())
                .ok_or_else(|| ChartError::InvalidPane {
                    value: pane.to_string(),
                })?,
        };

        // `[]` decodes as the first untagged variant whatever the kind
        let data = match wire.data {
            SeriesData::Ohlc(points) if points.is_empty() && !wire.kind.takes_ohlc() => {
                SeriesData::Values(Vec::new())
            }
            data => data,
        };
        let series = SeriesDefinition::new(wire.kind, data)?;
        Ok(SeriesDefinition {
            options,
            pane,
            title: wire.title,
            price_scale: wire.price_scale,
            markers: wire.markers,
            ..series
        })
    }
}
