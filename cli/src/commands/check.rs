use loadplan_core::api as core_api;
use loadplan_core::api::{LoaderContext, ResourceCache};

use crate::commands::cli::CheckArgs;

/// Print the group layout a manifest records, without executing it.
pub fn handle_check(
    args: CheckArgs,
    cfg: &core_api::AppConfig,
) -> Result<i32, core_api::CliError> {
    let manifest = core_api::ManifestParser::parse_file(&args.manifest)?;
    print!("{}", render_layout(&manifest, cfg)?);
    Ok(0)
}

/// Layout as recorded against an empty cache.
pub fn render_layout(
    manifest: &core_api::PlanManifest,
    cfg: &core_api::AppConfig,
) -> Result<String, core_api::CliError> {
    let adapter = loadplan_plugins::factory::build_adapter(&cfg.adapter)?;
    let ctx = LoaderContext::builder(adapter)
        .cache(ResourceCache::new())
        .config(cfg.loader.clone())
        .build();
    let queue = manifest.apply(ctx.plan()).finalize();

    let mut out = format!(
        "{} group(s), {} task(s)\n",
        queue.len(),
        queue.task_count()
    );
    for (group_id, labels) in queue.layout().iter().enumerate() {
        out.push_str(&format!("group {group_id}:\n"));
        for label in labels {
            out.push_str(&format!("  {label}\n"));
        }
    }
    Ok(out)
}
