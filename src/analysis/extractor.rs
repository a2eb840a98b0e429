use {
    crate::{
        analysis::Colorizer,
        config::DF,
        domain::Trim,
        error::ChartResult,
        models::{DataTable, OhlcPoint, SeriesPoint},
    },
    serde::{Deserialize, Serialize},
};

/// How the `color` field of each extracted point is filled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorPolicy {
    /// No `color` field; the series' own style applies.
    #[default]
    Omit,
    /// Same colour on every point.
    Constant(String),
    /// Read per-row tokens from a text column already merged into the table.
    Column(String),
    /// Compute per-row tokens with a bull/bear comparison.
    Derived(Colorizer),
}

impl ColorPolicy {
    pub fn constant(color: impl Into<String>) -> Self {
        ColorPolicy::Constant(color.into())
    }

    fn resolve<'a>(&'a self, table: &'a DataTable) -> ChartResult<RowColors<'a>> {
        Ok(match self {
            ColorPolicy::Omit => RowColors::Omit,
            ColorPolicy::Constant(color) => RowColors::Constant(color),
            ColorPolicy::Column(name) => RowColors::Borrowed(table.text(name)?),
            ColorPolicy::Derived(colorizer) => RowColors::Owned(colorizer.colors(table)?),
        })
    }

    /// Every literal colour token the policy can emit.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            ColorPolicy::Omit | ColorPolicy::Column(_) => vec![],
            ColorPolicy::Constant(color) => vec![color.as_str()],
            ColorPolicy::Derived(c) => vec![c.above.as_str(), c.otherwise.as_str()],
        }
    }
}

enum RowColors<'a> {
    Omit,
    Constant(&'a str),
    Borrowed(&'a [String]),
    Owned(Vec<String>),
}

impl RowColors<'_> {
    #[inline]
    fn at(&self, row: usize) -> Option<String> {
        match self {
            RowColors::Omit => None,
            RowColors::Constant(color) => Some(color.to_string()),
            RowColors::Borrowed(colors) => Some(colors[row].clone()),
            RowColors::Owned(colors) => Some(colors[row].clone()),
        }
    }
}

/// Project `column` into time/value points.
///
/// * the first `trim` rows are skipped; a trim past the end yields no points
/// * times are copied verbatim and values are not touched (NaN included)
/// * a missing column fails before any point is built
pub fn extract_series(
    table: &DataTable,
    column: &str,
    trim: Trim,
    color: &ColorPolicy,
) -> ChartResult<Vec<SeriesPoint>> {
    let values = table.numeric(column)?;
    let colors = color.resolve(table)?;
    let times = table.times();

    let points: Vec<SeriesPoint> = (first_row(table, trim)..table.len())
        .map(|row| SeriesPoint {
            time: times[row].clone(),
            value: values[row],
            color: colors.at(row),
        })
        .collect();

    if DF.log_extraction {
        log::debug!(
            "extracted '{}': {} of {} rows ({} trimmed)",
            column,
            points.len(),
            table.len(),
            trim
        );
    }

    Ok(points)
}

/// Project the `open`/`high`/`low`/`close` columns into candle points, with
/// the same trim and colour rules as `extract_series`.
pub fn extract_ohlc(
    table: &DataTable,
    trim: Trim,
    color: &ColorPolicy,
) -> ChartResult<Vec<OhlcPoint>> {
    let open = table.numeric("open")?;
    let high = table.numeric("high")?;
    let low = table.numeric("low")?;
    let close = table.numeric("close")?;
    let colors = color.resolve(table)?;
    let times = table.times();

    Ok((first_row(table, trim)..table.len())
        .map(|row| OhlcPoint {
            time: times[row].clone(),
            open: open[row],
            high: high[row],
            low: low[row],
            close: close[row],
            color: colors.at(row),
        })
        .collect())
}

fn first_row(table: &DataTable, trim: Trim) -> usize {
    trim.value().min(table.len())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{error::ChartError, models::Column},
    };

    fn dates(n: usize) -> Vec<String> {
        (1..=n).map(|d| format!("2024-03-{d:02}")).collect()
    }

    fn sma_table() -> DataTable {
        DataTable::from_columns(
            dates(5),
            vec![(
                "SMA".into(),
                Column::Numeric(vec![f64::NAN, f64::NAN, f64::NAN, f64::NAN, 7.5]),
            )],
        )
        .unwrap()
    }

    fn ohlc_table() -> DataTable {
        DataTable::from_columns(
            dates(3),
            vec![
                ("open".into(), Column::Numeric(vec![11.0, 11.0, 9.0])),
                ("high".into(), Column::Numeric(vec![12.0, 13.0, 9.5])),
                ("low".into(), Column::Numeric(vec![9.5, 10.5, 8.5])),
                ("close".into(), Column::Numeric(vec![10.0, 12.0, 9.0])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn untrimmed_extraction_mirrors_rows() {
        let table = ohlc_table();
        let points = extract_series(&table, "close", Trim::NONE, &ColorPolicy::Omit).unwrap();

        assert_eq!(points.len(), table.len());
        for (point, time) in points.iter().zip(table.times()) {
            assert_eq!(&point.time, time);
            assert_eq!(point.color, None);
        }
        assert_eq!(
            points.iter().map(|p| p.value).collect::<Vec<_>>(),
            vec![10.0, 12.0, 9.0]
        );
    }

    #[test]
    fn warm_up_trim_keeps_only_valid_rows() {
        let points =
            extract_series(&sma_table(), "SMA", Trim::new(4), &ColorPolicy::Omit).unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 7.5);
        assert_eq!(points[0].time, "2024-03-05");
    }

    #[test]
    fn trim_lengths_and_overrun() {
        let table = sma_table();
        for n in 0..=table.len() {
            let points = extract_series(&table, "SMA", Trim::new(n), &ColorPolicy::Omit).unwrap();
            assert_eq!(points.len(), table.len() - n);
            if let Some(first) = points.first() {
                assert_eq!(first.time, table.times()[n]);
            }
        }
        let none = extract_series(&table, "SMA", Trim::new(99), &ColorPolicy::Omit).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn missing_column_returns_no_partial_data() {
        assert_eq!(
            extract_series(&sma_table(), "EMA_14", Trim::NONE, &ColorPolicy::Omit),
            Err(ChartError::ColumnNotFound {
                column: "EMA_14".into()
            })
        );
        assert!(extract_ohlc(&sma_table(), Trim::NONE, &ColorPolicy::Omit).is_err());
    }

    #[test]
    fn colour_policies() {
        let table = ohlc_table();

        let constant =
            extract_series(&table, "close", Trim::NONE, &ColorPolicy::constant("blue")).unwrap();
        assert!(constant.iter().all(|p| p.color.as_deref() == Some("blue")));

        let derived = ColorPolicy::Derived(Colorizer::new("open", "close", "bear", "bull"));
        let points = extract_series(&table, "close", Trim::new(1), &derived).unwrap();
        assert_eq!(
            points.iter().map(|p| p.color.as_deref()).collect::<Vec<_>>(),
            vec![Some("bull"), Some("bull")]
        );

        let colored = Colorizer::new("open", "close", "bear", "bull")
            .apply(&table, "color")
            .unwrap();
        let points =
            extract_series(&colored, "close", Trim::NONE, &ColorPolicy::Column("color".into()))
                .unwrap();
        assert_eq!(points[0].color.as_deref(), Some("bear"));

        assert!(matches!(
            extract_series(&table, "close", Trim::NONE, &ColorPolicy::Column("close".into())),
            Err(ChartError::ColumnType { .. })
        ));
    }

    #[test]
    fn ohlc_points_carry_all_four_prices() {
        let candles = extract_ohlc(&ohlc_table(), Trim::new(2), &ColorPolicy::Omit).unwrap();
        assert_eq!(
            candles,
            vec![OhlcPoint {
                time: "2024-03-03".into(),
                open: 9.0,
                high: 9.5,
                low: 8.5,
                close: 9.0,
                color: None,
            }]
        );
    }

    #[test]
    fn policy_serde_shapes() {
        let omit: ColorPolicy = serde_json::from_str(r#""omit""#).unwrap();
        assert_eq!(omit, ColorPolicy::Omit);
        let constant: ColorPolicy = serde_json::from_str(r#"{"constant": "orange"}"#).unwrap();
        assert_eq!(constant.tokens(), vec!["orange"]);
    }
}
