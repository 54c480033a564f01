use crate::executor::types::{RunSummary, TaskKind, TaskReport};

/// Event renderer plugin (controls how execution is reported)
pub trait EventRenderer: Send + Sync {
    fn name(&self) -> &str;
    fn render(&self, event: &ExecEvent);
}

/// Execution events, in the order a run produces them
#[derive(Debug, Clone)]
pub enum ExecEvent {
    RunStart {
        run_id: String,
        total_tasks: usize,
        total_groups: usize,
    },
    Plan {
        run_id: String,
        groups: Vec<Vec<String>>,
    },
    GroupStart {
        run_id: String,
        group_id: usize,
        task_ids: Vec<String>,
    },
    TaskStart {
        run_id: String,
        group_id: usize,
        kind: TaskKind,
        identity: String,
    },
    TaskComplete {
        run_id: String,
        report: TaskReport,
    },
    GroupEnd {
        run_id: String,
        group_id: usize,
        failed: usize,
    },
    RunEnd {
        run_id: String,
        summary: RunSummary,
    },
    /// Terminal failure report. At most one per run.
    RunFailed {
        run_id: String,
        group_id: usize,
        error: String,
    },
}

impl ExecEvent {
    pub fn run_id(&self) -> &str {
        match self {
            Self::RunStart { run_id, .. }
            | Self::Plan { run_id, .. }
            | Self::GroupStart { run_id, .. }
            | Self::TaskStart { run_id, .. }
            | Self::TaskComplete { run_id, .. }
            | Self::GroupEnd { run_id, .. }
            | Self::RunEnd { run_id, .. }
            | Self::RunFailed { run_id, .. } => run_id,
        }
    }

    /// Wire name used by the jsonl renderer.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RunStart { .. } => "run.start",
            Self::Plan { .. } => "executor.plan",
            Self::GroupStart { .. } => "group.start",
            Self::TaskStart { .. } => "task.start",
            Self::TaskComplete { .. } => "task.end",
            Self::GroupEnd { .. } => "group.end",
            Self::RunEnd { .. } => "run.end",
            Self::RunFailed { .. } => "run.failed",
        }
    }
}
