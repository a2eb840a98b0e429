//! Debugging feature flags.

pub struct LogFlags {
    /// Per-series row counts from the extractor.
    pub log_extraction: bool,

    /// Pane layout of every assembled chart.
    pub log_assembly: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,

    /// Warn about colour tokens a CSS parser would not accept.
    pub lint_colors: bool,
}

pub const DF: LogFlags = LogFlags {
    log_extraction: false,
    log_assembly: true,
    log_performance: false,
    lint_colors: true,
};

pub const LOG_PERFORMANCE: bool = DF.log_performance;
