use clap::Parser;
use loadplan_cli::commands::{check, cli, init, run};
use loadplan_cli::logging::init_tracing;
use loadplan_core::api as core_api;
use loadplan_core::error;

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, error::CliError> {
    let args = cli::Args::parse();
    let cfg = match args.config.as_deref() {
        Some(path) => {
            let mut cfg = core_api::load_from_path(path)?;
            core_api::apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
            cfg
        }
        None => core_api::load_default()?,
    };
    init_tracing(&cfg.logging).map_err(error::CliError::Command)?;

    match args.command {
        cli::Commands::Run(run_args) => run::handle_run(run_args, cfg).await,
        cli::Commands::Check(check_args) => check::handle_check(check_args, &cfg),
        cli::Commands::Init(init_args) => init::handle_init(init_args),
    }
}

fn exit_code_for_error(e: &error::CliError) -> i32 {
    // 0: success
    // 11: config / manifest error
    // 20: IO / command error
    // 30: plan terminated by a failed group
    // 50: internal/uncategorized
    match e {
        error::CliError::Config(_) => 11,
        error::CliError::Manifest(_) => 11,
        error::CliError::Io(_) => 20,
        error::CliError::Command(_) => 20,
        error::CliError::ChainTerminated(_) => 30,
        error::CliError::Context(_) => 50,
        error::CliError::Anyhow(_) => 50,
    }
}
