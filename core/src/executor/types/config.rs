use crate::config::OutputConfig;

/// Rendering options for the built-in event renderers.
#[derive(Debug, Clone)]
pub struct ExecutionOpts {
    /// Output stream format: "text" or "jsonl"
    pub stream_format: String,

    /// Verbose output (per-task lines)
    pub verbose: bool,

    /// Quiet mode (suppress non-essential output)
    pub quiet: bool,

    /// ASCII-only markers (no Unicode)
    pub ascii: bool,

    /// Enable visual progress bar (disabled for jsonl output)
    pub progress_bar: bool,
}

impl Default for ExecutionOpts {
    fn default() -> Self {
        Self::from_output_config(&OutputConfig::default())
    }
}

impl ExecutionOpts {
    pub fn from_output_config(cfg: &OutputConfig) -> Self {
        // Progress bar only makes sense for text output that is not quiet
        let progress_bar = cfg.progress_bar && cfg.format != "jsonl" && !cfg.quiet;

        Self {
            stream_format: cfg.format.clone(),
            verbose: cfg.verbose,
            quiet: cfg.quiet,
            ascii: cfg.ascii,
            progress_bar,
        }
    }

    pub fn is_jsonl(&self) -> bool {
        self.stream_format == "jsonl"
    }
}
