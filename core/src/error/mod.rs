#[allow(clippy::module_inception)]
pub mod error;
pub mod executor;
pub mod task;

pub use error::{CliError, ConfigError, ContextError, ManifestError};
pub use executor::ExecutorError;
pub use task::{ActionError, AdapterError, TaskError};
