use std::time::Instant;

use uuid::Uuid;

use crate::context::LoaderContext;
use crate::error::{ExecutorError, TaskError};

use super::output::trace_event;
use super::scheduler::execute_group;
use super::traits::ExecEvent;
use super::types::{
    CacheEntry, DestroyTask, InvokeTask, LoadTask, Queue, RunSummary, Task, TaskOutcome,
    TaskReport,
};

/// Executes finalized queues against a loader context
pub struct ExecutionEngine {
    ctx: LoaderContext,
}

impl ExecutionEngine {
    pub fn new(ctx: LoaderContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &LoaderContext {
        &self.ctx
    }

    /// Execute a queue, reporting (never returning) a failure.
    ///
    /// This is the terminal handler: a chain termination is logged once and
    /// rendered once as [`ExecEvent::RunFailed`], then swallowed.
    pub async fn execute(&self, queue: Queue) {
        let run_id = Uuid::new_v4().to_string();
        if let Err(err) = self.run_with_id(&run_id, queue).await {
            tracing::error!(
                target: "loadplan.exec",
                run_id = %run_id,
                group_id = err.group_id(),
                error = %err,
                "plan execution terminated"
            );
            self.emit(&ExecEvent::RunFailed {
                run_id,
                group_id: err.group_id(),
                error: err.to_string(),
            });
        }
    }

    /// Execute a queue and return its summary or the error that stopped it.
    pub async fn run(&self, queue: Queue) -> Result<RunSummary, ExecutorError> {
        let run_id = Uuid::new_v4().to_string();
        self.run_with_id(&run_id, queue).await
    }

    /// Execute all groups sequentially (tasks within a group run concurrently)
    async fn run_with_id(&self, run_id: &str, queue: Queue) -> Result<RunSummary, ExecutorError> {
        let start = Instant::now();
        let mut summary = RunSummary {
            run_id: run_id.to_string(),
            total_groups: queue.len(),
            total_tasks: queue.task_count(),
            ..RunSummary::default()
        };

        self.emit(&ExecEvent::RunStart {
            run_id: run_id.to_string(),
            total_tasks: summary.total_tasks,
            total_groups: summary.total_groups,
        });
        self.emit(&ExecEvent::Plan {
            run_id: run_id.to_string(),
            groups: queue.layout(),
        });

        for (group_id, group) in queue.into_groups().into_iter().enumerate() {
            self.emit(&ExecEvent::GroupStart {
                run_id: run_id.to_string(),
                group_id,
                task_ids: group.tasks().iter().map(Task::label).collect(),
            });

            let outcome = execute_group(group.into_tasks(), |task| {
                self.dispatch_task(run_id, group_id, task)
            })
            .await;

            summary.tasks_settled += outcome.reports.len();
            summary.failed += outcome.failures;

            self.emit(&ExecEvent::GroupEnd {
                run_id: run_id.to_string(),
                group_id,
                failed: outcome.failures,
            });

            // Stop on first failed group; later groups never start
            if let Some(source) = outcome.first_error {
                return Err(ExecutorError::ChainTerminated {
                    group_id,
                    failures: outcome.failures,
                    source,
                });
            }
            summary.groups_completed += 1;
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;
        self.emit(&ExecEvent::RunEnd {
            run_id: run_id.to_string(),
            summary: summary.clone(),
        });

        Ok(summary)
    }

    async fn dispatch_task(
        &self,
        run_id: &str,
        group_id: usize,
        task: Task,
    ) -> (TaskReport, Result<(), TaskError>) {
        let identity = task.identity().clone();
        let kind = task.kind();

        self.emit(&ExecEvent::TaskStart {
            run_id: run_id.to_string(),
            group_id,
            kind,
            identity: identity.to_string(),
        });

        let started = Instant::now();
        let result = match task {
            Task::Load(load) => self.run_load(load).await,
            Task::Invoke(invoke) => self.run_invoke(invoke),
            Task::Destroy(destroy) => self.run_destroy(destroy),
        };

        let outcome = match &result {
            Ok(outcome) => outcome.clone(),
            Err(err) => TaskOutcome::Failed(err.to_string()),
        };
        let report = TaskReport {
            identity,
            kind,
            group_id,
            outcome,
            duration_ms: started.elapsed().as_millis() as u64,
        };

        self.emit(&ExecEvent::TaskComplete {
            run_id: run_id.to_string(),
            report: report.clone(),
        });

        (report, result.map(|_| ()))
    }

    /// The only suspension point of a run: waiting for the adapter.
    async fn run_load(&self, task: LoadTask) -> Result<TaskOutcome, TaskError> {
        let handle = self
            .ctx
            .adapter()
            .attach(&task.locator)
            .await
            .map_err(|source| TaskError::Load {
                locator: task.locator.clone(),
                source,
            })?;

        tracing::debug!(
            target: "loadplan.cache",
            identity = %task.identity,
            handle = %handle.id,
            "resource attached"
        );

        // The handle belongs to the cache from here on
        self.ctx.cache().put(CacheEntry {
            identity: task.identity,
            handle,
            on_destroy: task.on_destroy,
        });
        Ok(TaskOutcome::Loaded)
    }

    fn run_invoke(&self, task: InvokeTask) -> Result<TaskOutcome, TaskError> {
        task.action.call().map_err(|source| TaskError::Action {
            identity: task.identity.to_string(),
            source,
        })?;
        Ok(TaskOutcome::Invoked)
    }

    /// Detach, run the teardown hook, and only then drop the cache entry. A
    /// failing hook leaves the entry cached.
    fn run_destroy(&self, task: DestroyTask) -> Result<TaskOutcome, TaskError> {
        let Some(entry) = self.ctx.cache().get(&task.target_identity) else {
            tracing::debug!(
                target: "loadplan.cache",
                identity = %task.target_identity,
                "destroy target not cached, nothing to do"
            );
            return Ok(TaskOutcome::DestroySkipped);
        };

        self.ctx.adapter().detach(entry.handle);

        if let Some(on_destroy) = entry.on_destroy {
            on_destroy.call().map_err(|source| TaskError::Teardown {
                identity: task.target_identity.to_string(),
                source,
            })?;
        }

        self.ctx.cache().remove(&task.target_identity);
        tracing::debug!(
            target: "loadplan.cache",
            identity = %task.target_identity,
            "resource destroyed"
        );
        Ok(TaskOutcome::Destroyed)
    }

    fn emit(&self, event: &ExecEvent) {
        let renderers = self.ctx.renderers();
        if renderers.is_empty() {
            trace_event(event);
            return;
        }
        for renderer in renderers {
            renderer.render(event);
        }
    }
}

/// Execute a queue against a context, reporting failures through the terminal handler.
pub async fn execute_queue(ctx: LoaderContext, queue: Queue) {
    ExecutionEngine::new(ctx).execute(queue).await;
}
