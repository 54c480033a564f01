use std::future::Future;

use futures::stream::FuturesUnordered;
use futures::StreamExt;

use crate::error::TaskError;

use super::types::{Task, TaskReport};

/// Settled state of one group
#[derive(Debug, Default)]
pub struct GroupOutcome {
    /// One report per task, in completion order
    pub reports: Vec<TaskReport>,

    pub failures: usize,

    /// First failure in completion order; later sibling failures are only counted
    pub first_error: Option<TaskError>,
}

impl GroupOutcome {
    pub fn is_success(&self) -> bool {
        self.first_error.is_none()
    }
}

/// Execute a single group of tasks concurrently
///
/// Every task future is created and queued before any of them is polled, and
/// the join waits for all of them: a failure does not cancel its siblings.
///
/// # Arguments
///
/// * `tasks` - Tasks of the group
/// * `dispatch` - Async function executing a single task
pub async fn execute_group<F, Fut>(tasks: Vec<Task>, dispatch: F) -> GroupOutcome
where
    F: Fn(Task) -> Fut,
    Fut: Future<Output = (TaskReport, Result<(), TaskError>)>,
{
    let mut futs: FuturesUnordered<_> = tasks.into_iter().map(dispatch).collect();
    let mut outcome = GroupOutcome::default();

    while let Some((report, result)) = futs.next().await {
        if let Err(err) = result {
            outcome.failures += 1;
            if outcome.first_error.is_none() {
                outcome.first_error = Some(err);
            } else {
                tracing::warn!(
                    target: "loadplan.exec",
                    identity = %report.identity,
                    error = %err,
                    "additional task failure in group"
                );
            }
        }
        outcome.reports.push(report);
    }

    outcome
}
