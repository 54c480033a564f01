use std::path::{Path, PathBuf};

use super::types::AppConfig;
use crate::error::ConfigError;

/// Get the default loadplan data directory: ~/.loadplan
pub fn get_loadplan_data_dir() -> Result<PathBuf, ConfigError> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(home).join(".loadplan"))
}

pub fn get_loadplan_config_path() -> Result<PathBuf, ConfigError> {
    Ok(get_loadplan_data_dir()?.join("config.toml"))
}

pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_default() -> Result<AppConfig, ConfigError> {
    // Priority 1: ~/.loadplan/config.toml (highest)
    let user_config = get_loadplan_config_path()?;

    // Priority 2: ./loadplan.toml (current directory)
    let local_config = Path::new("loadplan.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

/// Environment variable overrides (Priority 0: highest)
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, get: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("LOADPLAN_ADAPTER") {
        let kind = v.trim().to_ascii_lowercase();
        if kind != "fs" && kind != "http" {
            return Err(ConfigError::Invalid {
                key: "LOADPLAN_ADAPTER",
                value: v,
            });
        }
        cfg.adapter.kind = kind;
    }
    if let Some(v) = non_empty("LOADPLAN_LOG_LEVEL") {
        cfg.logging.level = v;
    }
    if let Some(v) = non_empty("LOADPLAN_HTTP_BASE_URL") {
        cfg.adapter.http.base_url = Some(v);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_load_from_path_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loadplan.toml");
        std::fs::write(
            &path,
            r#"
[loader]
dedup_pending_loads = true

[adapter]
kind = "http"

[adapter.http]
base_url = "https://cdn.example.com/assets"
"#,
        )
        .unwrap();

        let cfg = load_from_path(&path).unwrap();
        assert!(cfg.loader.dedup_pending_loads);
        assert_eq!(cfg.adapter.kind, "http");
        assert_eq!(
            cfg.adapter.http.base_url.as_deref(),
            Some("https://cdn.example.com/assets")
        );
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.output.format, "text");
        assert!(cfg.adapter.fs.root.is_none());
    }

    #[test]
    fn test_load_from_path_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[loader\n").unwrap();
        assert!(matches!(
            load_from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(
            &mut cfg,
            env(&[
                ("LOADPLAN_ADAPTER", "HTTP"),
                ("LOADPLAN_LOG_LEVEL", "loadplan_core=debug"),
                ("LOADPLAN_HTTP_BASE_URL", "  "),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.adapter.kind, "http");
        assert_eq!(cfg.logging.level, "loadplan_core=debug");
        assert!(cfg.adapter.http.base_url.is_none());
    }

    #[test]
    fn test_env_override_rejects_unknown_adapter() {
        let mut cfg = AppConfig::default();
        let err = apply_env_overrides(&mut cfg, env(&[("LOADPLAN_ADAPTER", "dom")])).unwrap_err();
        assert!(err.to_string().contains("LOADPLAN_ADAPTER"));
    }
}
