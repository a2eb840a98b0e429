mod chart;
mod series;
mod table;

pub use {
    chart::{
        Background, BackgroundType, ChartLayout, ChartPayload, CrosshairOptions, GridOptions,
        HorzAlign, LayoutOptions, LineOptions, PriceScaleOptions, TimeScaleOptions, VertAlign,
        WatermarkOptions,
    },
    series::{
        MarkerPosition, MarkerShape, OhlcPoint, SeriesData, SeriesDefinition, SeriesKind,
        SeriesMarker, SeriesPoint,
    },
    table::{Column, DataTable, TIME_COLUMN},
};
