//! loadplan-cli library: command handlers and logging setup, exposed for tests

pub mod commands;
pub mod logging;
