use {
    crate::{
        config::DF,
        error::{ChartError, ChartResult},
        models::{ChartLayout, ChartPayload, SeriesDefinition},
    },
    itertools::Itertools,
    serde::{Deserialize, Serialize},
};

/// Whether the assembled chart must use panes `0..n` with no holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaneLayout {
    #[default]
    Strict,
    Permissive,
}

/// Collects series for one chart in insertion order and checks the pane
/// layout on `build`.
#[derive(Debug, Clone)]
pub struct ChartAssembler {
    layout: ChartLayout,
    series: Vec<SeriesDefinition>,
    pane_layout: PaneLayout,
}

impl ChartAssembler {
    pub fn new(layout: ChartLayout) -> Self {
        Self {
            layout,
            series: Vec::new(),
            pane_layout: PaneLayout::default(),
        }
    }

    pub fn pane_layout(mut self, pane_layout: PaneLayout) -> Self {
        self.pane_layout = pane_layout;
        self
    }

    /// Add `series` on `pane`.
    pub fn add(mut self, series: SeriesDefinition, pane: usize) -> Self {
        self.series.push(series.on_pane(pane));
        self
    }

    /// Add `series` on whatever pane it already carries.
    pub fn push(&mut self, series: SeriesDefinition) {
        self.series.push(series);
    }

    pub fn build(self) -> ChartResult<ChartPayload> {
        if self.series.is_empty() {
            return Err(ChartError::EmptyInput {
                operation: "chart assembly",
            });
        }
        if self.pane_layout == PaneLayout::Strict {
            validate_panes(&self.series)?;
        }

        if DF.log_assembly {
            log::debug!(
                "assembled chart: {} series over panes {:?}",
                self.series.len(),
                self.series.iter().map(|s| s.pane).unique().collect::<Vec<_>>()
            );
        }

        Ok(ChartPayload {
            layout: self.layout,
            series: self.series,
        })
    }
}

/// Pane indices in use must be exactly `0..n`.
pub fn validate_panes(series: &[SeriesDefinition]) -> ChartResult<()> {
    let panes: Vec<usize> = series.iter().map(|s| s.pane).sorted().dedup().collect();
    let contiguous = panes.iter().enumerate().all(|(i, pane)| i == *pane);
    if contiguous {
        Ok(())
    } else {
        Err(ChartError::NonContiguousPanes { panes })
    }
}

/// Build every chart, failing on the first one that is invalid.
pub fn assemble(charts: Vec<ChartAssembler>) -> ChartResult<Vec<ChartPayload>> {
    charts.into_iter().map(ChartAssembler::build).collect()
}
