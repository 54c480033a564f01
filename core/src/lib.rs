//! Declarative resource loading plans.
//!
//! A host records loads, one-off invocations, destroys and barriers into a
//! [`executor::Plan`], then executes it: groups run in order, tasks in a group
//! run concurrently, and loaded resources are remembered in a process-wide
//! cache so they are loaded once and can be torn down later.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod input;
