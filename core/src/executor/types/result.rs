use serde::Serialize;

use super::task::{Identity, TaskKind};

/// How a single task settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum TaskOutcome {
    Loaded,
    Invoked,
    Destroyed,
    /// Destroy target was not in the cache.
    DestroySkipped,
    Failed(String),
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loaded => "loaded",
            Self::Invoked => "invoked",
            Self::Destroyed => "destroyed",
            Self::DestroySkipped => "destroy_skipped",
            Self::Failed(_) => "failed",
        }
    }
}

/// Result of executing a single task
#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    pub identity: Identity,
    pub kind: TaskKind,
    pub group_id: usize,
    pub outcome: TaskOutcome,
    pub duration_ms: u64,
}

/// Result of executing a queue
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub run_id: String,

    pub total_groups: usize,

    /// Groups that settled without a failed task
    pub groups_completed: usize,

    pub total_tasks: usize,

    /// Tasks that settled (success or failure); tasks of skipped groups are not counted
    pub tasks_settled: usize,

    pub failed: usize,

    pub duration_ms: u64,
}
