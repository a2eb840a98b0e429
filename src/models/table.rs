use {
    crate::{
        domain::Bar,
        error::{ChartError, ChartResult},
    },
    std::sync::Arc,
};

pub const TIME_COLUMN: &str = "time";

/// One named column of a `DataTable`.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Numeric(values)
    }
}

impl From<Vec<String>> for Column {
    fn from(values: Vec<String>) -> Self {
        Column::Text(values)
    }
}

/// Immutable, time-indexed table. Every derivation (new indicator column,
/// colour column, rename) returns a new table that shares the untouched
/// columns with its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    times: Arc<[String]>,
    columns: Vec<(String, Arc<Column>)>,
}

impl DataTable {
    pub fn new(times: Vec<String>) -> Self {
        Self {
            times: times.into(),
            columns: Vec::new(),
        }
    }

    pub fn from_columns(
        times: Vec<String>,
        columns: Vec<(String, Column)>,
    ) -> ChartResult<Self> {
        columns
            .into_iter()
            .try_fold(Self::new(times), |table, (name, column)| {
                table.with_column(name, column)
            })
    }

    /// Lay bars out column-wise: `time`, `open`, `high`, `low`, `close`, `volume`.
    pub fn from_bars(bars: &[Bar]) -> Self {
        let len = bars.len();

        let mut time_vec = Vec::with_capacity(len);
        let mut open_vec = Vec::with_capacity(len);
        let mut high_vec = Vec::with_capacity(len);
        let mut low_vec = Vec::with_capacity(len);
        let mut close_vec = Vec::with_capacity(len);
        let mut volume_vec = Vec::with_capacity(len);

        for bar in bars {
            time_vec.push(bar.time.clone());
            open_vec.push(bar.open);
            high_vec.push(bar.high);
            low_vec.push(bar.low);
            close_vec.push(bar.close);
            volume_vec.push(bar.volume);
        }

        Self {
            times: time_vec.into(),
            columns: vec![
                ("open".to_string(), Arc::new(Column::Numeric(open_vec))),
                ("high".to_string(), Arc::new(Column::Numeric(high_vec))),
                ("low".to_string(), Arc::new(Column::Numeric(low_vec))),
                ("close".to_string(), Arc::new(Column::Numeric(close_vec))),
                ("volume".to_string(), Arc::new(Column::Numeric(volume_vec))),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[String] {
        &self.times
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> ChartResult<&Column> {
        self.position(name)
            .map(|idx| self.columns[idx].1.as_ref())
            .ok_or_else(|| ChartError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    pub fn numeric(&self, name: &str) -> ChartResult<&[f64]> {
        match self.column(name)? {
            Column::Numeric(values) => Ok(values),
            Column::Text(_) => Err(ChartError::ColumnType {
                column: name.to_string(),
                expected: "numeric",
            }),
        }
    }

    pub fn text(&self, name: &str) -> ChartResult<&[String]> {
        match self.column(name)? {
            Column::Text(values) => Ok(values),
            Column::Numeric(_) => Err(ChartError::ColumnType {
                column: name.to_string(),
                expected: "text",
            }),
        }
    }

    /// New table with `column` appended. Fails if the name is taken
    /// (including the reserved `time`) or the length is wrong.
    pub fn with_column(&self, name: impl Into<String>, column: Column) -> ChartResult<Self> {
        let name = name.into();
        if name == TIME_COLUMN || self.has_column(&name) {
            return Err(ChartError::DuplicateColumn { column: name });
        }
        self.check_len(&name, &column)?;

        let mut columns = self.columns.clone();
        columns.push((name, Arc::new(column)));
        Ok(Self {
            times: Arc::clone(&self.times),
            columns,
        })
    }

    /// New table with `column` stored under `name`, replacing any existing
    /// column of that name in place (position is kept).
    pub fn with_replaced_column(
        &self,
        name: impl Into<String>,
        column: Column,
    ) -> ChartResult<Self> {
        let name = name.into();
        match self.position(&name) {
            None => self.with_column(name, column),
            Some(idx) => {
                self.check_len(&name, &column)?;
                let mut columns = self.columns.clone();
                columns[idx].1 = Arc::new(column);
                Ok(Self {
                    times: Arc::clone(&self.times),
                    columns,
                })
            }
        }
    }

    pub fn with_renamed(&self, from: &str, to: impl Into<String>) -> ChartResult<Self> {
        let to = to.into();
        let idx = self.position(from).ok_or_else(|| ChartError::ColumnNotFound {
            column: from.to_string(),
        })?;
        if from == to {
            return Ok(self.clone());
        }
        if to == TIME_COLUMN || self.has_column(&to) {
            return Err(ChartError::DuplicateColumn { column: to });
        }

        let mut columns = self.columns.clone();
        columns[idx].0 = to;
        Ok(Self {
            times: Arc::clone(&self.times),
            columns,
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(n, _)| n == name)
    }

    fn check_len(&self, name: &str, column: &Column) -> ChartResult<()> {
        if column.len() != self.len() {
            return Err(ChartError::LengthMismatch {
                column: name.to_string(),
                expected: self.len(),
                found: column.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars() -> Vec<Bar> {
        vec![
            Bar::new("2024-01-02", 11.0, 12.0, 10.0, 10.0, 100.0),
            Bar::new("2024-01-03", 11.0, 13.0, 10.5, 12.0, 150.0),
            Bar::new("2024-01-04", 9.0, 9.5, 8.5, 9.0, 90.0),
        ]
    }

    #[test]
    fn from_bars_lays_out_ohlcv_columns() {
        let table = DataTable::from_bars(&bars());
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["open", "high", "low", "close", "volume"]
        );
        assert_eq!(table.numeric("close").unwrap(), &[10.0, 12.0, 9.0]);
        assert_eq!(table.times()[2], "2024-01-04");
    }

    #[test]
    fn with_column_leaves_source_untouched() {
        let table = DataTable::from_bars(&bars());
        let derived = table
            .with_column("SMA_2", Column::Numeric(vec![f64::NAN, 11.0, 10.5]))
            .unwrap();

        assert!(!table.has_column("SMA_2"));
        assert!(derived.has_column("SMA_2"));
        assert_eq!(derived.numeric("open").unwrap(), table.numeric("open").unwrap());
    }

    #[test]
    fn malformed_columns_are_rejected() {
        let table = DataTable::from_bars(&bars());
        assert_eq!(
            table.with_column("short", Column::Numeric(vec![1.0])),
            Err(ChartError::LengthMismatch {
                column: "short".into(),
                expected: 3,
                found: 1
            })
        );
        assert!(matches!(
            table.with_column("close", Column::Numeric(vec![0.0; 3])),
            Err(ChartError::DuplicateColumn { .. })
        ));
        assert!(matches!(
            table.with_column(TIME_COLUMN, Column::Numeric(vec![0.0; 3])),
            Err(ChartError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn typed_access_reports_missing_and_mistyped_columns() {
        let table = DataTable::from_bars(&bars())
            .with_column("color", Column::Text(vec!["red".into(); 3]))
            .unwrap();

        assert_eq!(
            table.numeric("RSI_14"),
            Err(ChartError::ColumnNotFound {
                column: "RSI_14".into()
            })
        );
        assert!(matches!(
            table.numeric("color"),
            Err(ChartError::ColumnType { expected: "numeric", .. })
        ));
        assert!(matches!(
            table.text("close"),
            Err(ChartError::ColumnType { expected: "text", .. })
        ));
    }

    #[test]
    fn replace_and_rename_keep_column_order() {
        let table = DataTable::from_bars(&bars());
        let replaced = table
            .with_replaced_column("volume", Column::Numeric(vec![1.0, 2.0, 3.0]))
            .unwrap();
        assert_eq!(replaced.numeric("volume").unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(table.numeric("volume").unwrap(), &[100.0, 150.0, 90.0]);

        let renamed = table.with_renamed("volume", "value").unwrap();
        assert_eq!(
            renamed.column_names().collect::<Vec<_>>(),
            vec!["open", "high", "low", "close", "value"]
        );
        assert!(renamed.with_renamed("value", "open").is_err());
    }
}
