use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("context error: {0}")]
    Context(#[from] ContextError),
    #[error("plan terminated early: {0}")]
    ChainTerminated(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    NoHome,
    #[error("read {path} failed: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("parse {path} failed: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("default loader context already installed")]
    AlreadyInstalled,
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("read {path} failed: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid toml manifest: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid json manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("step {index}: {message}")]
    InvalidStep { index: usize, message: String },
}
