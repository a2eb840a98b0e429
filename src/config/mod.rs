//! Configuration module: colours, layouts, presets and debug flags.

// Can all be private now because we have a public re-export.
mod debug;

// Can't be private because we don't re-export everything in them
pub mod plot;
pub mod presets;

// Re-export commonly used items
pub use debug::{DF, LOG_PERFORMANCE, LogFlags};
pub use plot::{COLOR_BEAR, COLOR_BULL, PLOT_CONFIG, PlotConfig, is_css_color};
pub use presets::Preset;
