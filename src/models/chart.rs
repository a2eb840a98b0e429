//! Chart-level configuration and the payload handed to the widget.

use {
    crate::models::SeriesDefinition,
    itertools::Itertools,
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundType {
    Solid,
    VerticalGradient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    #[serde(rename = "type")]
    pub kind: BackgroundType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_color: Option<String>,
}

impl Background {
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            kind: BackgroundType::Solid,
            color: Some(color.into()),
            top_color: None,
            bottom_color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl LineOptions {
    pub fn colored(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            visible: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vert_lines: Option<LineOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horz_lines: Option<LineOptions>,
}

/// `mode`: 0 = normal, 1 = magnet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrosshairOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceScaleOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeScaleOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_bar_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorzAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatermarkOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horz_align: Option<HorzAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vert_align: Option<VertAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Visual configuration of one chart. Pure configuration: the widget owns
/// validation, so anything not modelled here rides along in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crosshair: Option<CrosshairOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_scale: Option<PriceScaleOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_scale: Option<TimeScaleOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<WatermarkOptions>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChartLayout {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn with_watermark(mut self, watermark: WatermarkOptions) -> Self {
        self.watermark = Some(watermark);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// One chart: layout plus its series in plotting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(rename = "chart")]
    pub layout: ChartLayout,
    pub series: Vec<SeriesDefinition>,
}

impl ChartPayload {
    /// Pane index of every series, in series order.
    pub fn panes(&self) -> Vec<usize> {
        self.series.iter().map(|s| s.pane).collect()
    }

    /// Number of distinct panes in use.
    pub fn pane_count(&self) -> usize {
        self.series.iter().map(|s| s.pane).unique().count()
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(SeriesDefinition::len).sum()
    }
}
