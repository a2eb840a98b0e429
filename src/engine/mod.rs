mod pipeline;

pub use pipeline::{ChartSpec, ColorizerSpec, PipelineSpec, SeriesSpec, run_pipeline};
