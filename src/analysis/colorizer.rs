use {
    crate::{
        error::ChartResult,
        models::{Column, DataTable},
    },
    serde::{Deserialize, Serialize},
};

/// One side of a row-wise comparison: a named numeric column or a constant
/// (e.g. the zero line of an oscillator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Value(f64),
    Column(String),
}

impl Operand {
    fn resolve<'a>(&'a self, table: &'a DataTable) -> ChartResult<Resolved<'a>> {
        Ok(match self {
            Operand::Value(v) => Resolved::Value(*v),
            Operand::Column(name) => Resolved::Column(table.numeric(name)?),
        })
    }
}

impl From<&str> for Operand {
    fn from(name: &str) -> Self {
        Operand::Column(name.to_string())
    }
}

impl From<String> for Operand {
    fn from(name: String) -> Self {
        Operand::Column(name)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Value(value)
    }
}

enum Resolved<'a> {
    Value(f64),
    Column(&'a [f64]),
}

impl Resolved<'_> {
    #[inline]
    fn at(&self, row: usize) -> f64 {
        match self {
            Resolved::Value(v) => *v,
            Resolved::Column(values) => values[row],
        }
    }
}

/// Bull/bear colouring: `left > right` picks `above`, anything else
/// (including a NaN on either side) picks `otherwise`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colorizer {
    pub left: Operand,
    pub right: Operand,
    pub above: String,
    pub otherwise: String,
}

impl Colorizer {
    pub fn new(
        left: impl Into<Operand>,
        right: impl Into<Operand>,
        above: impl Into<String>,
        otherwise: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            above: above.into(),
            otherwise: otherwise.into(),
        }
    }

    #[inline]
    pub fn pick(&self, left: f64, right: f64) -> &str {
        if left > right {
            &self.above
        } else {
            &self.otherwise
        }
    }

    /// One colour token per table row.
    pub fn colors(&self, table: &DataTable) -> ChartResult<Vec<String>> {
        let left = self.left.resolve(table)?;
        let right = self.right.resolve(table)?;

        Ok((0..table.len())
            .map(|row| self.pick(left.at(row), right.at(row)).to_string())
            .collect())
    }

    /// New table with the colour column stored under `name` (replacing any
    /// previous column of that name).
    pub fn apply(&self, table: &DataTable, name: &str) -> ChartResult<DataTable> {
        let colors = self.colors(table)?;
        table.with_replaced_column(name, Column::Text(colors))
    }
}
