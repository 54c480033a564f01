use std::sync::{Arc, Mutex};

use loadplan_core::api as core_api;
use loadplan_core::api::{EventRenderer, ExecEvent, LoaderContext};

use crate::commands::cli::RunArgs;

/// Remembers the first run failure reported by the terminal handler.
#[derive(Default)]
pub struct FailureWatch {
    first: Mutex<Option<String>>,
}

impl FailureWatch {
    pub fn take(&self) -> Option<String> {
        match self.first.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl EventRenderer for FailureWatch {
    fn name(&self) -> &str {
        "failure-watch"
    }

    fn render(&self, event: &ExecEvent) {
        let ExecEvent::RunFailed {
            group_id, error, ..
        } = event
        else {
            return;
        };
        let mut guard = match self.first.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.is_none() {
            *guard = Some(format!("group {group_id}: {error}"));
        }
    }
}

/// Fold command-line flags over the loaded config.
pub fn apply_run_overrides(cfg: &mut core_api::AppConfig, args: &RunArgs) {
    if let Some(kind) = args.adapter {
        cfg.adapter.kind = kind.as_str().to_string();
    }
    if let Some(root) = args.root.as_ref() {
        cfg.adapter.fs.root = Some(root.clone());
    }
    if let Some(base_url) = args.base_url.as_ref() {
        cfg.adapter.http.base_url = Some(base_url.clone());
    }
    if let Some(format) = args.format {
        cfg.output.format = format.as_str().to_string();
    }
}

pub fn build_context(
    cfg: &core_api::AppConfig,
    watch: Arc<FailureWatch>,
) -> Result<LoaderContext, core_api::CliError> {
    let adapter = loadplan_plugins::factory::build_adapter(&cfg.adapter)?;
    let renderers = loadplan_plugins::factory::build_renderers(&cfg.output);
    Ok(LoaderContext::builder(adapter)
        .renderers(renderers)
        .renderer(watch)
        .config(cfg.loader.clone())
        .build())
}

pub async fn handle_run(
    args: RunArgs,
    mut cfg: core_api::AppConfig,
) -> Result<i32, core_api::CliError> {
    let manifest = core_api::ManifestParser::parse_file(&args.manifest)?;
    apply_run_overrides(&mut cfg, &args);

    let watch = Arc::new(FailureWatch::default());
    let ctx = build_context(&cfg, watch.clone())?;

    tracing::info!(
        target: "loadplan.cli",
        manifest = %args.manifest.display(),
        adapter = ctx.adapter().name(),
        steps = manifest.steps.len(),
        "running plan"
    );
    manifest.apply(ctx.plan()).execute().await;
    let failure = watch.take();

    if args.teardown {
        let identities = ctx.cache().identities();
        if !identities.is_empty() {
            tracing::info!(target: "loadplan.cli", count = identities.len(), "tearing down");
            identities
                .iter()
                .fold(ctx.plan(), |plan, identity| plan.destroy(identity.as_str()))
                .execute()
                .await;
        }
    }

    match failure.or_else(|| watch.take()) {
        Some(message) => Err(core_api::CliError::ChainTerminated(message)),
        None => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cli::{AdapterKind, OutputFormat};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn run_args() -> RunArgs {
        RunArgs {
            manifest: PathBuf::from("plan.toml"),
            adapter: None,
            root: None,
            base_url: None,
            format: None,
            teardown: false,
        }
    }

    #[test]
    fn test_overrides_only_touch_given_flags() {
        let mut cfg = core_api::AppConfig::default();
        cfg.adapter.http.base_url = Some("https://keep.example.com".to_string());

        let args = RunArgs {
            adapter: Some(AdapterKind::Fs),
            root: Some("/srv/assets".to_string()),
            format: Some(OutputFormat::Jsonl),
            ..run_args()
        };
        apply_run_overrides(&mut cfg, &args);

        assert_eq!(cfg.adapter.kind, "fs");
        assert_eq!(cfg.adapter.fs.root.as_deref(), Some("/srv/assets"));
        assert_eq!(
            cfg.adapter.http.base_url.as_deref(),
            Some("https://keep.example.com")
        );
        assert_eq!(cfg.output.format, "jsonl");
    }

    #[test]
    fn test_failure_watch_keeps_first() {
        let watch = FailureWatch::default();
        watch.render(&ExecEvent::RunFailed {
            run_id: "r".into(),
            group_id: 1,
            error: "load of a.js failed".into(),
        });
        watch.render(&ExecEvent::RunFailed {
            run_id: "r2".into(),
            group_id: 0,
            error: "other".into(),
        });
        assert_eq!(watch.take().as_deref(), Some("group 1: load of a.js failed"));
        assert_eq!(watch.take(), None);
    }

    #[tokio::test]
    async fn test_run_reports_chain_termination() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.js"), "window.a = 1;").unwrap();
        let manifest = dir.path().join("plan.toml");
        std::fs::write(
            &manifest,
            r#"
[[step]]
kind = "load"
locator = "a.js"

[[step]]
kind = "barrier"

[[step]]
kind = "load"
locator = "missing-for-cli-test.js"
"#,
        )
        .unwrap();

        let args = RunArgs {
            manifest,
            root: Some(dir.path().display().to_string()),
            teardown: true,
            ..run_args()
        };
        let err = handle_run(args, core_api::AppConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, core_api::CliError::ChainTerminated(ref m) if m.starts_with("group 1")));
    }
}
