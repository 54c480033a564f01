use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    Fs,
    Http,
}

impl AdapterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fs => "fs",
            Self::Http => "http",
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Jsonl,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Jsonl => "jsonl",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "loadplan", version, about = "Run resource load plans")]
pub struct Args {
    /// Config file to use instead of ~/.loadplan/config.toml / ./loadplan.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Plan manifest (TOML, or JSON with a .json extension)
    pub manifest: PathBuf,

    #[arg(long, value_enum)]
    pub adapter: Option<AdapterKind>,

    /// Root directory for relative locators (fs adapter)
    #[arg(long)]
    pub root: Option<String>,

    /// Base URL for relative locators (http adapter)
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Destroy everything still cached once the plan has run
    #[arg(long, default_value_t = false)]
    pub teardown: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CheckArgs {
    pub manifest: PathBuf,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Run(RunArgs),
    Check(CheckArgs),
    Init(InitArgs),
}
