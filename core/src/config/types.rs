use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub loader: LoaderConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub adapter: AdapterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "loadplan_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Also skip loads whose identity is already pending in the same plan.
    /// Off by default: dedup only consults the cache at recording time.
    #[serde(default)]
    pub dedup_pending_loads: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_format")]
    pub format: String,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub quiet: bool,
    #[serde(default)]
    pub ascii: bool,
    #[serde(default)]
    pub progress_bar: bool,
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            verbose: false,
            quiet: false,
            ascii: false,
            progress_bar: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// "fs" or "http"
    #[serde(default = "default_adapter_kind")]
    pub kind: String,

    #[serde(default)]
    pub fs: FsAdapterConfig,

    #[serde(default)]
    pub http: HttpAdapterConfig,
}

fn default_adapter_kind() -> String {
    "fs".to_string()
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            kind: default_adapter_kind(),
            fs: FsAdapterConfig::default(),
            http: HttpAdapterConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FsAdapterConfig {
    /// Directory relative locators resolve against. Defaults to the working directory.
    #[serde(default)]
    pub root: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpAdapterConfig {
    /// Base URL relative locators are joined onto.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub api_key: String,
}

fn default_user_agent() -> String {
    format!("loadplan/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpAdapterConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: default_user_agent(),
            api_key: String::new(),
        }
    }
}
