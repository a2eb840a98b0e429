//! Chart colours and the layout building blocks the presets share.

use crate::models::{
    Background, ChartLayout, CrosshairOptions, GridOptions, HorzAlign, LayoutOptions,
    LineOptions, PriceScaleOptions, TimeScaleOptions, VertAlign, WatermarkOptions,
};

pub const COLOR_BULL: &str = "rgba(38,166,154,0.9)"; // #26a69a
pub const COLOR_BEAR: &str = "rgba(239,83,80,0.9)"; // #ef5350

pub struct PlotConfig {
    pub bull_color: &'static str,
    pub bear_color: &'static str,

    pub background_color: &'static str,
    pub text_color: &'static str,
    pub grid_color: &'static str,
    pub scale_border_color: &'static str,
    pub watermark_color: &'static str,
    /// Sub-chart labels sit on top of data, so they need more opacity
    pub watermark_label_color: &'static str,

    pub chart_width: u32,
    pub bar_spacing: f64,
    pub min_bar_spacing: f64,
    pub line_width: u32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    bull_color: COLOR_BULL,
    bear_color: COLOR_BEAR,

    background_color: "white",
    text_color: "black",
    grid_color: "rgba(197, 203, 206, 0.5)",
    scale_border_color: "rgba(197, 203, 206, 0.8)",
    watermark_color: "rgba(171, 71, 188, 0.3)",
    watermark_label_color: "rgba(171, 71, 188, 0.7)",

    chart_width: 600,
    bar_spacing: 10.0,
    min_bar_spacing: 8.0,
    line_width: 2,
};

/// Main price chart: white background, light grid, bordered scales.
pub fn price_chart_layout(height: u32) -> ChartLayout {
    ChartLayout {
        layout: Some(LayoutOptions {
            background: Some(Background::solid(PLOT_CONFIG.background_color)),
            text_color: Some(PLOT_CONFIG.text_color.to_string()),
        }),
        grid: Some(GridOptions {
            vert_lines: Some(LineOptions::colored(PLOT_CONFIG.grid_color)),
            horz_lines: Some(LineOptions::colored(PLOT_CONFIG.grid_color)),
        }),
        price_scale: Some(PriceScaleOptions {
            border_color: Some(PLOT_CONFIG.scale_border_color.to_string()),
            visible: None,
        }),
        time_scale: Some(TimeScaleOptions {
            border_color: Some(PLOT_CONFIG.scale_border_color.to_string()),
            bar_spacing: Some(PLOT_CONFIG.bar_spacing),
            min_bar_spacing: Some(PLOT_CONFIG.min_bar_spacing),
            visible: None,
        }),
        ..ChartLayout::sized(PLOT_CONFIG.chart_width, height)
    }
}

/// Big centred symbol watermark, normal crosshair.
pub fn titled_price_chart_layout(height: u32, title: &str) -> ChartLayout {
    ChartLayout {
        crosshair: Some(CrosshairOptions { mode: Some(0) }),
        ..price_chart_layout(height)
    }
    .with_watermark(WatermarkOptions {
        visible: Some(true),
        font_size: Some(48),
        horz_align: Some(HorzAlign::Center),
        vert_align: Some(VertAlign::Center),
        color: Some(PLOT_CONFIG.watermark_color.to_string()),
        text: Some(title.to_string()),
    })
}

/// Chart stacked under the price chart: hidden time axis, small label.
pub fn sub_chart_layout(height: u32, label: &str, background: &str) -> ChartLayout {
    ChartLayout {
        layout: Some(LayoutOptions {
            background: Some(Background::solid(background)),
            text_color: Some(PLOT_CONFIG.text_color.to_string()),
        }),
        time_scale: Some(TimeScaleOptions {
            visible: Some(false),
            ..Default::default()
        }),
        ..ChartLayout::sized(PLOT_CONFIG.chart_width, height)
    }
    .with_watermark(WatermarkOptions {
        visible: Some(true),
        font_size: Some(18),
        horz_align: Some(HorzAlign::Left),
        vert_align: Some(VertAlign::Top),
        color: Some(PLOT_CONFIG.watermark_label_color.to_string()),
        text: Some(label.to_string()),
    })
}

/// True when a CSS colour parser accepts `token` (named, hex, rgb[a], hsl[a]).
pub fn is_css_color(token: &str) -> bool {
    colorgrad::Color::from_html(token).is_ok()
}
