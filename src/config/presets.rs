//! Built-in pipeline specs for the two chart arrangements shipped with the
//! crate: a single four-pane chart, and three charts stacked on one time axis.

use {
    crate::{
        analysis::{ColorPolicy, Colorizer, Indicator},
        config::plot::{
            COLOR_BEAR, COLOR_BULL, PLOT_CONFIG, price_chart_layout, sub_chart_layout,
            titled_price_chart_layout,
        },
        engine::{ChartSpec, ColorizerSpec, PipelineSpec, SeriesSpec},
        models::{GridOptions, LineOptions, SeriesKind},
    },
    serde_json::json,
    strum_macros::{Display, EnumIter},
};

pub const CANDLE_COLOR_COLUMN: &str = "color";
pub const MACD_COLOR_COLUMN: &str = "macd_color";

const MACD_FAST: usize = 6;
const MACD_SLOW: usize = 12;
const MACD_SIGNAL: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, clap::ValueEnum)]
pub enum Preset {
    /// One chart: price, volume, RSI and MACD panes
    #[strum(to_string = "multipane")]
    Multipane,
    /// Three charts: price, volume, MACD
    #[strum(to_string = "stacked")]
    Stacked,
}

impl Preset {
    pub fn spec(&self, symbol: &str) -> PipelineSpec {
        match self {
            Preset::Multipane => multipane(symbol),
            Preset::Stacked => stacked(symbol),
        }
    }
}

fn macd() -> Indicator {
    Indicator::macd(MACD_FAST, MACD_SLOW, MACD_SIGNAL)
}

fn macd_column(prefix: &str) -> String {
    format!("{prefix}_{MACD_FAST}_{MACD_SLOW}_{MACD_SIGNAL}")
}

fn candle_colors() -> ColorizerSpec {
    ColorizerSpec {
        name: CANDLE_COLOR_COLUMN.to_string(),
        colorizer: Colorizer::new("open", "close", COLOR_BEAR, COLOR_BULL),
    }
}

fn macd_colors() -> ColorizerSpec {
    ColorizerSpec {
        name: MACD_COLOR_COLUMN.to_string(),
        colorizer: Colorizer::new(macd_column("MACD").as_str(), 0.0, COLOR_BULL, COLOR_BEAR),
    }
}

fn candlestick(symbol: &str) -> SeriesSpec {
    SeriesSpec::candles()
        .color(ColorPolicy::Column(CANDLE_COLOR_COLUMN.to_string()))
        .option("upColor", COLOR_BULL)
        .option("downColor", COLOR_BEAR)
        .option("borderVisible", false)
        .option("wickUpColor", COLOR_BULL)
        .option("wickDownColor", COLOR_BEAR)
        .title(symbol)
}

/// MACD line, signal and colour-coded histogram, trimmed past their warm-up.
fn macd_series(pane: usize, fast_color: &str, slow_color: &str) -> Vec<SeriesSpec> {
    let macd = macd();
    let line_warm_up = MACD_SLOW - 1;
    vec![
        SeriesSpec::of(SeriesKind::Line, macd_column("MACDh"))
            .trim(macd.warm_up())
            .color(ColorPolicy::constant(fast_color))
            .option("lineWidth", PLOT_CONFIG.line_width)
            .pane(pane)
            .title("MACD hist"),
        SeriesSpec::of(SeriesKind::Line, macd_column("MACDs"))
            .trim(macd.warm_up())
            .color(ColorPolicy::constant(slow_color))
            .option("lineWidth", PLOT_CONFIG.line_width)
            .pane(pane)
            .title("MACD signal"),
        SeriesSpec::of(SeriesKind::Histogram, macd_column("MACD"))
            .trim(line_warm_up)
            .color(ColorPolicy::Column(MACD_COLOR_COLUMN.to_string()))
            .option("lineWidth", 1)
            .pane(pane)
            .title("MACD"),
    ]
}

/// Candles with SMA 60 / EMA 14 overlays, bid/ask volume, RSI 14 and MACD,
/// each group on its own pane of a single chart.
pub fn multipane(symbol: &str) -> PipelineSpec {
    let sma = Indicator::sma(60);
    let ema = Indicator::ema(14);
    let rsi = Indicator::rsi(14);
    let ask_volume = Indicator::Negate {
        source: "volume".to_string(),
        name: "VOL_ASK".to_string(),
    };

    let mut series = vec![
        candlestick(symbol),
        SeriesSpec::of(SeriesKind::Line, "SMA_60")
            .trim(sma.warm_up())
            .color(ColorPolicy::constant("blue"))
            .option("color", "blue")
            .option("lineWidth", PLOT_CONFIG.line_width)
            .title("SMA 60"),
        SeriesSpec::of(SeriesKind::Line, "EMA_14")
            .trim(ema.warm_up())
            .color(ColorPolicy::constant("orange"))
            .option("color", "green")
            .option("lineWidth", PLOT_CONFIG.line_width)
            .title("EMA 14"),
        SeriesSpec::of(SeriesKind::Histogram, "volume")
            .color(ColorPolicy::constant(COLOR_BULL))
            .option("priceFormat", json!({"type": "volume"}))
            .pane(1)
            .title("Bid volume"),
        SeriesSpec::of(SeriesKind::Histogram, "VOL_ASK")
            .color(ColorPolicy::constant(COLOR_BEAR))
            .option("priceFormat", json!({"type": "volume"}))
            .pane(1)
            .title("Ask volume"),
        SeriesSpec::of(SeriesKind::Line, "RSI_14")
            .trim(rsi.warm_up())
            .color(ColorPolicy::constant("purple"))
            .option("lineWidth", PLOT_CONFIG.line_width)
            .pane(2)
            .title("RSI 14"),
    ];
    series.extend(macd_series(3, "orange", "blue"));

    PipelineSpec {
        key: Some("multipane".to_string()),
        indicators: vec![macd(), ema, sma, rsi, ask_volume],
        colorizers: vec![candle_colors(), macd_colors()],
        charts: vec![ChartSpec::new(price_chart_layout(600), series)],
    }
}

/// Price, volume and MACD as three charts sharing one scrolled time axis.
pub fn stacked(symbol: &str) -> PipelineSpec {
    let volume_chart = {
        let mut layout = sub_chart_layout(100, "Volume", "transparent");
        layout.grid = Some(GridOptions {
            vert_lines: Some(LineOptions::colored("rgba(42, 46, 57, 0)")),
            horz_lines: Some(LineOptions::colored("rgba(42, 46, 57, 0.6)")),
        });
        ChartSpec::new(
            layout,
            vec![
                SeriesSpec::of(SeriesKind::Histogram, "volume")
                    .color(ColorPolicy::Column(CANDLE_COLOR_COLUMN.to_string()))
                    .option("priceFormat", json!({"type": "volume"}))
                    .option("priceScaleId", "")
                    .price_scale(json!({
                        "scaleMargins": {"top": 0, "bottom": 0},
                        "alignLabels": false
                    }))
                    .title("Volume"),
            ],
        )
    };

    let macd_chart = {
        let mut layout = sub_chart_layout(200, "MACD", PLOT_CONFIG.background_color);
        if let Some(watermark) = layout.watermark.as_mut() {
            watermark.vert_align = Some(crate::models::VertAlign::Center);
        }
        ChartSpec::new(layout, macd_series(0, "blue", "green"))
    };

    PipelineSpec {
        key: Some("stacked".to_string()),
        indicators: vec![macd()],
        colorizers: vec![candle_colors(), macd_colors()],
        charts: vec![
            ChartSpec::new(
                titled_price_chart_layout(400, &format!("{symbol} - D1")),
                vec![candlestick(symbol)],
            ),
            volume_chart,
            macd_chart,
        ],
    }
}

#[cfg(test)]
mod tests {
    use {super::*, strum::IntoEnumIterator};

    #[test]
    fn multipane_uses_four_contiguous_panes() {
        let spec = multipane("AAPL");
        assert_eq!(spec.charts.len(), 1);

        let panes: Vec<usize> = spec.charts[0].series.iter().map(|s| s.pane).collect();
        assert_eq!(panes, vec![0, 0, 0, 1, 1, 2, 3, 3, 3]);
        assert_eq!(spec.key.as_deref(), Some("multipane"));
    }

    #[test]
    fn stacked_has_three_single_pane_charts() {
        let spec = stacked("MSFT");
        assert_eq!(spec.charts.len(), 3);
        assert!(spec.charts.iter().flat_map(|c| &c.series).all(|s| s.pane == 0));
        assert_eq!(
            spec.charts[0].chart.watermark.as_ref().unwrap().text.as_deref(),
            Some("MSFT - D1")
        );
    }

    #[test]
    fn every_preset_token_is_a_css_colour() {
        for preset in Preset::iter() {
            assert_eq!(preset.spec("AAPL").lint(), 0, "{preset}");
        }
    }

    #[test]
    fn preset_specs_round_trip_through_json() {
        let spec = multipane("AAPL");
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(PipelineSpec::from_json(&json).unwrap(), spec);
    }
}
