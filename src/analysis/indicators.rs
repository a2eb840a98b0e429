//! Indicator columns, named the way pandas-ta names them (`SMA_60`,
//! `MACDh_6_12_5`, ...). Every row inside the warm-up window is NaN so the
//! output stays aligned 1:1 with the bars.

use {
    crate::{
        error::{ChartError, ChartResult},
        models::{Column, DataTable},
    },
    serde::{Deserialize, Serialize},
    statrs::statistics::Statistics,
};

fn default_source() -> String {
    "close".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Sma {
        #[serde(default = "default_source")]
        source: String,
        length: usize,
    },
    Ema {
        #[serde(default = "default_source")]
        source: String,
        length: usize,
    },
    Rsi {
        #[serde(default = "default_source")]
        source: String,
        length: usize,
    },
    Macd {
        #[serde(default = "default_source")]
        source: String,
        fast: usize,
        slow: usize,
        signal: usize,
    },
    /// Element-wise negation, e.g. plotting ask volume below the axis.
    Negate { source: String, name: String },
}

impl Indicator {
    pub fn sma(length: usize) -> Self {
        Indicator::Sma {
            source: default_source(),
            length,
        }
    }

    pub fn ema(length: usize) -> Self {
        Indicator::Ema {
            source: default_source(),
            length,
        }
    }

    pub fn rsi(length: usize) -> Self {
        Indicator::Rsi {
            source: default_source(),
            length,
        }
    }

    pub fn macd(fast: usize, slow: usize, signal: usize) -> Self {
        Indicator::Macd {
            source: default_source(),
            fast,
            slow,
            signal,
        }
    }

    /// Names of the columns `apply` appends, in order.
    pub fn column_names(&self) -> Vec<String> {
        match self {
            Indicator::Sma { length, .. } => vec![format!("SMA_{length}")],
            Indicator::Ema { length, .. } => vec![format!("EMA_{length}")],
            Indicator::Rsi { length, .. } => vec![format!("RSI_{length}")],
            Indicator::Macd {
                fast, slow, signal, ..
            } => {
                let (fast, slow) = ordered(*fast, *slow);
                let suffix = format!("{fast}_{slow}_{signal}");
                vec![
                    format!("MACD_{suffix}"),
                    format!("MACDh_{suffix}"),
                    format!("MACDs_{suffix}"),
                ]
            }
            Indicator::Negate { name, .. } => vec![name.clone()],
        }
    }

    /// New table with this indicator's columns appended.
    pub fn apply(&self, table: &DataTable) -> ChartResult<DataTable> {
        let names = self.column_names();
        let columns: Vec<Vec<f64>> = match self {
            Indicator::Sma { source, length } => {
                vec![sma(table.numeric(source)?, check_len("SMA", *length)?)]
            }
            Indicator::Ema { source, length } => {
                vec![ema(table.numeric(source)?, check_len("EMA", *length)?)]
            }
            Indicator::Rsi { source, length } => {
                vec![rsi(table.numeric(source)?, check_len("RSI", *length)?)]
            }
            Indicator::Macd {
                source,
                fast,
                slow,
                signal,
            } => {
                let (line, histogram, signal) = macd(
                    table.numeric(source)?,
                    check_len("MACD fast", *fast)?,
                    check_len("MACD slow", *slow)?,
                    check_len("MACD signal", *signal)?,
                );
                vec![line, histogram, signal]
            }
            Indicator::Negate { source, .. } => {
                vec![table.numeric(source)?.iter().map(|v| -v).collect()]
            }
        };

        names
            .into_iter()
            .zip(columns)
            .try_fold(table.clone(), |acc, (name, values)| {
                acc.with_column(name, Column::Numeric(values))
            })
    }

    /// Rows before the first defined value. Handy as the extraction trim.
    pub fn warm_up(&self) -> usize {
        match self {
            Indicator::Sma { length, .. } | Indicator::Ema { length, .. } => {
                length.saturating_sub(1)
            }
            Indicator::Rsi { length, .. } => *length,
            Indicator::Macd {
                fast, slow, signal, ..
            } => ordered(*fast, *slow).1.saturating_sub(1) + signal.saturating_sub(1),
            Indicator::Negate { .. } => 0,
        }
    }

    /// `warm_up` plus the rows the source column itself is still undefined
    /// for, i.e. the trim that drops every NaN this indicator emits on `table`.
    pub fn warm_up_on(&self, table: &DataTable) -> ChartResult<usize> {
        let source = match self {
            Indicator::Sma { source, .. }
            | Indicator::Ema { source, .. }
            | Indicator::Rsi { source, .. }
            | Indicator::Macd { source, .. }
            | Indicator::Negate { source, .. } => source,
        };
        let undefined = table.numeric(source)?.iter().take_while(|v| v.is_nan()).count();
        Ok(undefined + self.warm_up())
    }
}

fn check_len(indicator: &'static str, length: usize) -> ChartResult<usize> {
    if length == 0 {
        return Err(ChartError::InvalidLength { indicator, length });
    }
    Ok(length)
}

fn ordered(fast: usize, slow: usize) -> (usize, usize) {
    if slow < fast { (slow, fast) } else { (fast, slow) }
}

/// Rolling mean over `length` rows.
pub fn sma(values: &[f64], length: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if length == 0 {
        return out;
    }
    for end in length..=values.len() {
        out[end - 1] = values[end - length..end].iter().mean();
    }
    out
}

/// Exponential average seeded with the SMA of the first `length` defined
/// values. Leading NaNs (e.g. another indicator's warm-up) are skipped.
pub fn ema(values: &[f64], length: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    let Some(start) = values.iter().position(|v| !v.is_nan()) else {
        return out;
    };
    if length == 0 || values.len() - start < length {
        return out;
    }

    let alpha = 2.0 / (length as f64 + 1.0);
    let seed_idx = start + length - 1;
    let mut prev = values[start..=seed_idx].iter().mean();
    out[seed_idx] = prev;

    for idx in seed_idx + 1..values.len() {
        prev = alpha * values[idx] + (1.0 - alpha) * prev;
        out[idx] = prev;
    }
    out
}

/// Relative strength index with Wilder smoothing. The first value lands
/// `length` rows after the first defined input (the first change needs two
/// rows); leading NaNs are skipped as in `ema`. A perfectly flat window has
/// no gains or losses and comes out NaN.
pub fn rsi(values: &[f64], length: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    let Some(start) = values.iter().position(|v| !v.is_nan()) else {
        return out;
    };
    if length == 0 || values.len() - start <= length {
        return out;
    }

    let changes: Vec<f64> = values[start..].windows(2).map(|w| w[1] - w[0]).collect();
    let gain = |c: f64| c.max(0.0);
    let loss = |c: f64| (-c).max(0.0);

    let mut avg_gain = changes[..length].iter().map(|c| gain(*c)).sum::<f64>() / length as f64;
    let mut avg_loss = changes[..length].iter().map(|c| loss(*c)).sum::<f64>() / length as f64;
    out[start + length] = 100.0 * avg_gain / (avg_gain + avg_loss);

    let n = length as f64;
    for (idx, change) in changes.iter().enumerate().skip(length) {
        avg_gain = (avg_gain * (n - 1.0) + gain(*change)) / n;
        avg_loss = (avg_loss * (n - 1.0) + loss(*change)) / n;
        out[start + idx + 1] = 100.0 * avg_gain / (avg_gain + avg_loss);
    }
    out
}

/// Returns `(macd, histogram, signal)`. `fast` and `slow` are swapped if
/// given the wrong way round.
pub fn macd(
    values: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let (fast, slow) = ordered(fast, slow);
    let line: Vec<f64> = ema(values, fast)
        .iter()
        .zip(ema(values, slow))
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&line, signal);
    let histogram = line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();
    (line, histogram, signal_line)
}
