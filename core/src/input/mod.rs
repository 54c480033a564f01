//! Plan manifests
//!
//! Lets a plan be declared in a TOML or JSON file instead of code. Invocation
//! and teardown steps carry a message that is logged when they run.

mod parser;

pub use parser::{log_callback, ManifestFormat, ManifestParser, PlanManifest, Step};
