use std::sync::Arc;

use anyhow::{bail, Result};

use loadplan_core::api::{
    AdapterConfig, EventRenderer, ExecutionOpts, JsonlRenderer, OutputConfig, ProgressRenderer,
    ResourceAdapter, TextRenderer, TracingRenderer,
};

use crate::adapter::{FsAdapter, HttpAdapter};

pub fn build_adapter(cfg: &AdapterConfig) -> Result<Arc<dyn ResourceAdapter>> {
    match cfg.kind.as_str() {
        "fs" => {
            let root = match cfg.fs.root.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                Some(root) => std::path::PathBuf::from(root),
                None => std::env::current_dir()?,
            };
            Ok(Arc::new(FsAdapter::new(root)))
        }
        "http" => Ok(Arc::new(HttpAdapter::new(
            cfg.http.base_url.clone(),
            &cfg.http.user_agent,
            cfg.http.api_key.clone(),
        )?)),
        other => bail!("unknown adapter kind: {other} (expected 'fs' or 'http')"),
    }
}

/// Renderers for the configured output.
///
/// jsonl output gets only the jsonl renderer; text output also logs through
/// `tracing` and may add a progress display.
pub fn build_renderers(cfg: &OutputConfig) -> Vec<Arc<dyn EventRenderer>> {
    let opts = ExecutionOpts::from_output_config(cfg);
    if opts.is_jsonl() {
        return vec![Arc::new(JsonlRenderer::new())];
    }

    let mut renderers: Vec<Arc<dyn EventRenderer>> = vec![
        Arc::new(TracingRenderer),
        Arc::new(TextRenderer::new(opts.clone())),
    ];
    if opts.progress_bar {
        renderers.push(Arc::new(ProgressRenderer::new(true)));
    }
    renderers
}
