use {
    crate::{
        analysis::{
            ChartAssembler, ColorPolicy, Colorizer, Indicator, PaneLayout, extract_ohlc,
            extract_series,
        },
        config::{DF, is_css_color},
        domain::Trim,
        error::{ChartError, ChartResult},
        models::{ChartLayout, ChartPayload, DataTable, SeriesData, SeriesDefinition, SeriesKind},
    },
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
};

/// A colour column computed before extraction, available to
/// `ColorPolicy::Column(name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorizerSpec {
    pub name: String,
    #[serde(flatten)]
    pub colorizer: Colorizer,
}

/// Declarative description of one series: which column, how much warm-up
/// to drop, how to colour it and where to put it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub kind: SeriesKind,
    /// Value column; OHLC kinds read `open`/`high`/`low`/`close` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default)]
    pub trim: i64,
    #[serde(default)]
    pub color: ColorPolicy,
    #[serde(default)]
    pub pane: usize,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
    #[serde(rename = "priceScale", default, skip_serializing_if = "Option::is_none")]
    pub price_scale: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SeriesSpec {
    pub fn new(kind: SeriesKind) -> Self {
        Self {
            kind,
            column: None,
            trim: 0,
            color: ColorPolicy::Omit,
            pane: 0,
            options: Map::new(),
            price_scale: None,
            title: None,
        }
    }

    pub fn candles() -> Self {
        Self::new(SeriesKind::Candlestick)
    }

    pub fn of(kind: SeriesKind, column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            ..Self::new(kind)
        }
    }

    pub fn trim(mut self, rows: usize) -> Self {
        self.trim = rows as i64;
        self
    }

    pub fn color(mut self, color: ColorPolicy) -> Self {
        self.color = color;
        self
    }

    pub fn pane(mut self, pane: usize) -> Self {
        self.pane = pane;
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn price_scale(mut self, price_scale: Value) -> Self {
        self.price_scale = Some(price_scale);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn build(&self, table: &DataTable) -> ChartResult<SeriesDefinition> {
        let trim = Trim::try_from(self.trim)?;
        let data = match (self.kind.takes_ohlc(), &self.column) {
            (true, None) => SeriesData::Ohlc(extract_ohlc(table, trim, &self.color)?),
            (false, Some(column)) => {
                SeriesData::Values(extract_series(table, column, trim, &self.color)?)
            }
            _ => {
                return Err(ChartError::SeriesDataMismatch {
                    kind: self.kind.to_string(),
                });
            }
        };

        let mut series = SeriesDefinition::new(self.kind, data)?
            .on_pane(self.pane)
            .with_options(self.options.clone());
        if let Some(title) = &self.title {
            series = series.with_title(title.clone());
        }
        if let Some(price_scale) = &self.price_scale {
            series = series.with_price_scale(price_scale.clone());
        }
        Ok(series)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(default)]
    pub chart: ChartLayout,
    pub series: Vec<SeriesSpec>,
    #[serde(default)]
    pub pane_layout: PaneLayout,
}

impl ChartSpec {
    pub fn new(chart: ChartLayout, series: Vec<SeriesSpec>) -> Self {
        Self {
            chart,
            series,
            pane_layout: PaneLayout::default(),
        }
    }

    pub fn build(&self, table: &DataTable) -> ChartResult<ChartPayload> {
        let mut assembler =
            ChartAssembler::new(self.chart.clone()).pane_layout(self.pane_layout);
        for spec in &self.series {
            assembler.push(spec.build(table)?);
        }
        assembler.build()
    }
}

/// The whole table -> payload pipeline as data. One spec per chart
/// arrangement; the code path is shared.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// Widget identity across re-renders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub indicators: Vec<Indicator>,
    #[serde(default)]
    pub colorizers: Vec<ColorizerSpec>,
    pub charts: Vec<ChartSpec>,
}

impl PipelineSpec {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Source table plus every indicator and colour column the charts read.
    pub fn prepare(&self, table: &DataTable) -> ChartResult<DataTable> {
        let table = self
            .indicators
            .iter()
            .try_fold(table.clone(), |acc, indicator| indicator.apply(&acc))?;

        self.colorizers
            .iter()
            .try_fold(table, |acc, spec| spec.colorizer.apply(&acc, &spec.name))
    }

    pub fn run(&self, table: &DataTable) -> ChartResult<Vec<ChartPayload>> {
        if table.is_empty() {
            return Err(ChartError::EmptyInput {
                operation: "pipeline",
            });
        }

        crate::trace_time!("pipeline run", 5_000, {
            let prepared = self.prepare(table)?;
            let payloads = self
                .charts
                .iter()
                .map(|chart| chart.build(&prepared))
                .collect::<ChartResult<Vec<_>>>()?;

            log::info!(
                "built {} chart(s), {} series, {} points from {} rows",
                payloads.len(),
                payloads.iter().map(|p| p.series.len()).sum::<usize>(),
                payloads.iter().map(ChartPayload::point_count).sum::<usize>(),
                table.len()
            );
            Ok(payloads)
        })
    }

    /// Literal colour tokens this pipeline will emit: series colour policies,
    /// colourizer outputs and `color`-ish series options.
    pub fn color_tokens(&self) -> Vec<&str> {
        let series = self.charts.iter().flat_map(|c| &c.series);
        let from_policies = series.clone().flat_map(|s| s.color.tokens());
        let from_options = series.flat_map(|s| {
            s.options
                .iter()
                .filter(|(key, _)| key.to_lowercase().ends_with("color"))
                .filter_map(|(_, value)| value.as_str())
        });
        let from_colorizers = self
            .colorizers
            .iter()
            .flat_map(|c| [c.colorizer.above.as_str(), c.colorizer.otherwise.as_str()]);

        from_policies.chain(from_options).chain(from_colorizers).collect()
    }

    /// Log every colour token a CSS parser rejects; returns how many. The
    /// widget stays the authority, so nothing is refused here.
    pub fn lint(&self) -> usize {
        if !DF.lint_colors {
            return 0;
        }
        let suspect: Vec<&str> = self
            .color_tokens()
            .into_iter()
            .filter(|token| !is_css_color(token))
            .collect();
        for token in &suspect {
            log::warn!("colour token '{}' is not a recognised CSS colour", token);
        }
        suspect.len()
    }
}

/// Run `spec` over `table`.
pub fn run_pipeline(table: &DataTable, spec: &PipelineSpec) -> ChartResult<Vec<ChartPayload>> {
    spec.run(table)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{domain::Bar, models::Column},
        serde_json::json,
    };

    fn table() -> DataTable {
        DataTable::from_bars(&[
            Bar::new("2024-01-02", 11.0, 12.0, 9.5, 10.0, 100.0),
            Bar::new("2024-01-03", 11.0, 13.0, 10.5, 12.0, 150.0),
            Bar::new("2024-01-04", 9.0, 9.5, 8.5, 9.0, 90.0),
        ])
    }

    fn two_pane_spec() -> PipelineSpec {
        PipelineSpec {
            key: Some("test".into()),
            indicators: vec![Indicator::sma(2)],
            colorizers: vec![ColorizerSpec {
                name: "color".into(),
                colorizer: Colorizer::new("open", "close", "bear", "bull"),
            }],
            charts: vec![ChartSpec::new(
                ChartLayout::sized(600, 400),
                vec![
                    SeriesSpec::candles().color(ColorPolicy::Column("color".into())),
                    SeriesSpec::of(SeriesKind::Line, "SMA_2")
                        .trim(1)
                        .color(ColorPolicy::constant("blue")),
                    SeriesSpec::of(SeriesKind::Histogram, "volume").pane(1),
                ],
            )],
        }
    }

    #[test]
    fn runs_indicators_colours_and_panes() {
        let payloads = run_pipeline(&table(), &two_pane_spec()).unwrap();
        assert_eq!(payloads.len(), 1);

        let chart = &payloads[0];
        assert_eq!(chart.panes(), vec![0, 0, 1]);
        assert_eq!(chart.series[1].len(), 2);
        assert_eq!(chart.series[1].first_time(), Some("2024-01-03"));

        match &chart.series[0].data {
            SeriesData::Ohlc(candles) => {
                assert_eq!(candles[0].color.as_deref(), Some("bear"));
                assert_eq!(candles[1].color.as_deref(), Some("bull"));
            }
            other => panic!("expected candles, got {other:?}"),
        }
    }

    #[test]
    fn source_table_is_not_modified() {
        let source = table();
        let before = source.clone();
        run_pipeline(&source, &two_pane_spec()).unwrap();
        assert_eq!(source, before);
    }

    #[test]
    fn failures_are_typed() {
        let empty = DataTable::from_bars(&[]);
        assert_eq!(
            run_pipeline(&empty, &two_pane_spec()),
            Err(ChartError::EmptyInput {
                operation: "pipeline"
            })
        );

        let mut spec = two_pane_spec();
        spec.charts[0].series[1].trim = -4;
        assert_eq!(
            run_pipeline(&table(), &spec),
            Err(ChartError::InvalidTrim { trim: -4 })
        );

        let mut spec = two_pane_spec();
        spec.charts[0].series[2].column = Some("RSI_14".into());
        assert!(matches!(
            run_pipeline(&table(), &spec),
            Err(ChartError::ColumnNotFound { column }) if column == "RSI_14"
        ));

        let mut spec = two_pane_spec();
        spec.charts[0].series[2].pane = 3;
        assert!(matches!(
            run_pipeline(&table(), &spec),
            Err(ChartError::NonContiguousPanes { .. })
        ));

        let spec = PipelineSpec {
            charts: vec![ChartSpec::new(
                ChartLayout::default(),
                vec![SeriesSpec::new(SeriesKind::Line)],
            )],
            ..Default::default()
        };
        assert!(matches!(
            run_pipeline(&table(), &spec),
            Err(ChartError::SeriesDataMismatch { .. })
        ));
    }

    #[test]
    fn spec_reads_from_json() {
        let spec = PipelineSpec::from_json(
            &json!({
                "key": "json",
                "indicators": [{"ema": {"length": 2}}],
                "colorizers": [{"name": "trend", "left": "close", "right": "EMA_2",
                                "above": "green", "otherwise": "red"}],
                "charts": [{
                    "chart": {"height": 300},
                    "series": [
                        {"kind": "Line", "column": "EMA_2", "trim": 1,
                         "color": {"column": "trend"}, "options": {"lineWidth": 2}},
                        {"kind": "Histogram", "column": "volume", "pane": 1,
                         "priceScale": {"scaleMargins": {"top": 0, "bottom": 0}}}
                    ]
                }]
            })
            .to_string(),
        )
        .unwrap();

        let payloads = spec.run(&table()).unwrap();
        let line = &payloads[0].series[0];
        assert_eq!(line.len(), 2);
        assert_eq!(line.options["lineWidth"], 2);
        assert!(payloads[0].series[1].price_scale.is_some());
    }

    #[test]
    fn lint_counts_bad_tokens_without_failing() {
        let mut spec = two_pane_spec();
        spec.charts[0].series[2] = SeriesSpec::of(SeriesKind::Histogram, "volume")
            .pane(1)
            .option("color", "definitely-not-a-colour");

        assert_eq!(spec.lint(), 3);
        assert!(spec.run(&table()).is_ok());
    }

    #[test]
    fn prepare_exposes_derived_columns() {
        let prepared = two_pane_spec().prepare(&table()).unwrap();
        assert!(prepared.has_column("SMA_2"));
        assert!(matches!(prepared.column("color").unwrap(), Column::Text(_)));
    }
}
