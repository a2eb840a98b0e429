mod assembler;
mod colorizer;
mod extractor;
pub mod indicators;

pub use {
    assembler::{ChartAssembler, PaneLayout, assemble, validate_panes},
    colorizer::{Colorizer, Operand},
    extractor::{ColorPolicy, extract_ohlc, extract_series},
    indicators::Indicator,
};
