//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `loadplan_core::api` instead of reaching into internal modules.

pub use crate::config::{
    apply_env_overrides, get_loadplan_config_path, get_loadplan_data_dir, load_default,
    load_from_path, AdapterConfig, AppConfig, FsAdapterConfig, HttpAdapterConfig, LoaderConfig,
    LoggingConfig, OutputConfig,
};
pub use crate::context::{default_context, install_default, LoaderContext, LoaderContextBuilder};
pub use crate::error::{
    ActionError, AdapterError, CliError, ConfigError, ContextError, ExecutorError, ManifestError,
    TaskError,
};
pub use crate::executor::{
    execute_queue, CacheEntry, Callback, DestroyTarget, EventRenderer, ExecEvent, ExecutionEngine,
    ExecutionOpts, Identity, JsonlRenderer, Plan, ProgressRenderer, Queue, ResourceAdapter,
    ResourceCache, ResourceHandle, RunSummary, TaskKind, TaskOutcome, TaskReport, TextRenderer,
    TracingRenderer,
};
pub use crate::input::{ManifestFormat, ManifestParser, PlanManifest, Step};
