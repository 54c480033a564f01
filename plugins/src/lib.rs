//! Concrete collaborators for loadplan: resource adapters and the factories
//! that build adapters and renderers from configuration.

pub mod adapter;
pub mod factory;
