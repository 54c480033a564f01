pub mod adapter;
pub mod renderer;

pub use adapter::*;
pub use renderer::*;
