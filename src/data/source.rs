use {
    crate::{domain::Bar, error::ChartError, models::DataTable, utils::normalize_day},
    anyhow::Result,
    itertools::Itertools,
};

/// Anything that can hand over a day-bar history. Fetching over the network
/// is somebody else's job; implementations here read local files.
pub trait BarSource {
    fn load(&self) -> Result<Vec<Bar>>;

    /// Load and lay the bars out as a table.
    fn load_table(&self) -> Result<DataTable> {
        let bars = self.load()?;
        warn_if_unordered(&bars);
        Ok(DataTable::from_bars(&bars))
    }
}

pub(crate) fn day_of(row: usize, raw: &str) -> Result<String, ChartError> {
    normalize_day(raw).ok_or_else(|| ChartError::MalformedTime {
        row,
        value: raw.to_string(),
    })
}

fn warn_if_unordered(bars: &[Bar]) {
    let out_of_order = bars
        .iter()
        .tuple_windows()
        .filter(|(prev, next)| prev.time >= next.time)
        .count();
    if out_of_order > 0 {
        log::warn!(
            "{} bar(s) are not strictly after their predecessor; plotting in source order",
            out_of_order
        );
    }
}
