//! Writes a default configuration file
use std::path::Path;

use loadplan_core::api as core_api;

use crate::commands::cli::InitArgs;

pub fn handle_init(args: InitArgs) -> Result<i32, core_api::CliError> {
    let config_path = core_api::get_loadplan_config_path()?;

    if write_default_config(&config_path, args.force)? {
        println!("Configuration written to: {}", config_path.display());
    } else {
        println!(
            "Configuration file already exists at: {}",
            config_path.display()
        );
        println!("Use --force to overwrite it.");
    }
    Ok(0)
}

/// Returns `false` without touching the file when it exists and `force` is unset.
pub fn write_default_config(path: &Path, force: bool) -> Result<bool, core_api::CliError> {
    if path.exists() && !force {
        return Ok(false);
    }

    let content = toml::to_string_pretty(&core_api::AppConfig::default())
        .map_err(|e| core_api::CliError::Command(format!("serialize default config: {e}")))?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, content)?;
    tracing::debug!(target: "loadplan.cli", path = %path.display(), "default config written");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_default_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(write_default_config(&path, false).unwrap());
        let cfg = core_api::load_from_path(&path).unwrap();
        assert_eq!(cfg.adapter.kind, "fs");
        assert_eq!(cfg.output.format, "text");
    }

    #[test]
    fn test_existing_config_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(!write_default_config(&path, false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        assert!(write_default_config(&path, true).unwrap());
        assert!(std::fs::read_to_string(&path).unwrap().contains("[adapter]"));
    }
}
