pub mod config;
pub mod queue;
pub mod resource;
pub mod result;
pub mod task;

pub use config::*;
pub use queue::*;
pub use resource::*;
pub use result::*;
pub use task::*;
