use std::path::Path;

use serde::Deserialize;

use crate::error::ManifestError;
use crate::executor::{Callback, Plan};

/// One recorded call in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Load {
        locator: String,
        #[serde(default)]
        on_destroy: Option<String>,
    },
    Invoke {
        message: String,
    },
    Barrier,
    Destroy {
        target: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlanManifest {
    #[serde(default, rename = "step", alias = "steps")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// `.json` files are JSON, everything else TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    /// Guess from content: a leading `{` means JSON.
    pub fn sniff(input: &str) -> Self {
        if input.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Toml
        }
    }
}

/// Parses plan manifests
pub struct ManifestParser;

impl ManifestParser {
    pub fn parse_str(input: &str, format: ManifestFormat) -> Result<PlanManifest, ManifestError> {
        let manifest: PlanManifest = match format {
            ManifestFormat::Toml => toml::from_str(input)?,
            ManifestFormat::Json => serde_json::from_str(input)?,
        };
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn parse_file(path: &Path) -> Result<PlanManifest, ManifestError> {
        let input = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_str(&input, ManifestFormat::from_path(path))
    }
}

impl PlanManifest {
    pub fn validate(&self) -> Result<(), ManifestError> {
        for (index, step) in self.steps.iter().enumerate() {
            let (field, value) = match step {
                Step::Load { locator, .. } => ("locator", locator),
                Step::Invoke { message } => ("message", message),
                Step::Destroy { target } => ("target", target),
                Step::Barrier => continue,
            };
            if value.trim().is_empty() {
                return Err(ManifestError::InvalidStep {
                    index,
                    message: format!("{field} must not be empty"),
                });
            }
        }
        Ok(())
    }

    /// Record every step into `plan`, in order.
    pub fn apply(&self, plan: Plan) -> Plan {
        self.steps.iter().fold(plan, |plan, step| match step {
            Step::Load {
                locator,
                on_destroy: Some(message),
            } => plan.load_with(locator.clone(), log_callback(message)),
            Step::Load {
                locator,
                on_destroy: None,
            } => plan.load(locator.clone()),
            Step::Invoke { message } => plan.invoke(log_callback(message)),
            Step::Barrier => plan.barrier(),
            Step::Destroy { target } => plan.destroy(target.as_str()),
        })
    }

    /// Locators of all load steps, in manifest order.
    pub fn locators(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                Step::Load { locator, .. } => Some(locator.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Callback labelled `log:<message>` that logs `message` when called.
pub fn log_callback(message: &str) -> Callback {
    let owned = message.to_string();
    Callback::new(format!("log:{message}"), move || {
        tracing::info!(target: "loadplan.plan", "{}", owned);
        Ok(())
    })
}
