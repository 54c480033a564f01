use thiserror::Error;

use super::task::TaskError;

/// Executor-level errors for queue execution
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// A group settled with at least one failed task; no later group ran.
    #[error("group {group_id} failed ({failures} failed task(s)), chain terminated: {source}")]
    ChainTerminated {
        group_id: usize,
        failures: usize,
        #[source]
        source: TaskError,
    },
}

impl ExecutorError {
    pub fn group_id(&self) -> usize {
        match self {
            Self::ChainTerminated { group_id, .. } => *group_id,
        }
    }

    pub fn task_error(&self) -> &TaskError {
        match self {
            Self::ChainTerminated { source, .. } => source,
        }
    }
}
