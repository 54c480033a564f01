use std::io::Write;
use std::sync::{Arc, Mutex};

use chrono::Local;
use serde::Serialize;

use super::traits::{EventRenderer, ExecEvent};
use super::types::{ExecutionOpts, TaskOutcome};

/// Log an event through `tracing`. Used when no renderer is registered.
pub fn trace_event(event: &ExecEvent) {
    match event {
        ExecEvent::RunStart {
            run_id,
            total_tasks,
            total_groups,
        } => {
            tracing::info!(target: "loadplan.exec", run_id = %run_id, total_tasks, total_groups, "run started");
        }
        ExecEvent::Plan { run_id, groups } => {
            tracing::debug!(target: "loadplan.exec", run_id = %run_id, groups = ?groups, "execution plan");
        }
        ExecEvent::GroupStart {
            run_id,
            group_id,
            task_ids,
        } => {
            tracing::debug!(target: "loadplan.exec", run_id = %run_id, group_id, tasks = task_ids.len(), "group started");
        }
        ExecEvent::TaskStart {
            run_id,
            group_id,
            kind,
            identity,
        } => {
            tracing::debug!(target: "loadplan.exec", run_id = %run_id, group_id, kind = %kind, identity = %identity, "task started");
        }
        ExecEvent::TaskComplete { run_id, report } => match &report.outcome {
            TaskOutcome::Failed(error) => {
                tracing::warn!(target: "loadplan.exec", run_id = %run_id, identity = %report.identity, error = %error, "task failed");
            }
            outcome => {
                tracing::debug!(target: "loadplan.exec", run_id = %run_id, identity = %report.identity, outcome = outcome.as_str(), duration_ms = report.duration_ms, "task settled");
            }
        },
        ExecEvent::GroupEnd {
            run_id,
            group_id,
            failed,
        } => {
            tracing::debug!(target: "loadplan.exec", run_id = %run_id, group_id, failed, "group settled");
        }
        ExecEvent::RunEnd { run_id, summary } => {
            tracing::info!(
                target: "loadplan.exec",
                run_id = %run_id,
                groups = summary.groups_completed,
                tasks = summary.tasks_settled,
                duration_ms = summary.duration_ms,
                "run finished"
            );
        }
        // Logged by the terminal handler itself
        ExecEvent::RunFailed { .. } => {}
    }
}

/// Renders events as `tracing` records.
#[derive(Debug, Default)]
pub struct TracingRenderer;

impl EventRenderer for TracingRenderer {
    fn name(&self) -> &str {
        "tracing"
    }

    fn render(&self, event: &ExecEvent) {
        trace_event(event);
    }
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

fn write_line(out: &SharedWriter, line: &str) {
    let mut w = match out.lock() {
        Ok(w) => w,
        Err(poisoned) => poisoned.into_inner(),
    };
    let _ = writeln!(w, "{line}");
}

/// Human-readable renderer
pub struct TextRenderer {
    opts: ExecutionOpts,
    out: SharedWriter,
}

impl TextRenderer {
    pub fn new(opts: ExecutionOpts) -> Self {
        Self::with_writer(opts, Box::new(std::io::stdout()))
    }

    pub fn with_writer(opts: ExecutionOpts, writer: Box<dyn Write + Send>) -> Self {
        Self {
            opts,
            out: Arc::new(Mutex::new(writer)),
        }
    }

    fn marker(&self, ok: bool) -> &'static str {
        match (self.opts.ascii, ok) {
            (true, true) => "[ok]",
            (true, false) => "[x]",
            (false, true) => "✅",
            (false, false) => "❌",
        }
    }

    fn line(&self, event: &ExecEvent) -> Option<String> {
        let opts = &self.opts;
        match event {
            ExecEvent::RunStart {
                total_tasks,
                total_groups,
                ..
            } if !opts.quiet => Some(format!(
                "{} Starting plan: {} tasks in {} groups",
                if opts.ascii { ">>" } else { "🚀" },
                total_tasks,
                total_groups
            )),
            ExecEvent::Plan { groups, .. } if opts.verbose => {
                let mut s = String::from("Execution Plan:");
                for (i, group) in groups.iter().enumerate() {
                    s.push_str(&format!("\n  Group {}: {}", i, group.join(", ")));
                }
                Some(s)
            }
            ExecEvent::GroupStart {
                group_id, task_ids, ..
            } if opts.verbose && !opts.quiet => Some(format!(
                "{} Group {} ({} tasks)",
                if opts.ascii { ">" } else { "▶" },
                group_id,
                task_ids.len()
            )),
            ExecEvent::TaskComplete { report, .. } if opts.verbose && !opts.quiet => {
                let detail = match &report.outcome {
                    TaskOutcome::Failed(error) => format!(" - {error}"),
                    other => format!(" ({})", other.as_str()),
                };
                Some(format!(
                    "  {} {} {}: {}ms{}",
                    self.marker(report.outcome.is_success()),
                    report.kind,
                    report.identity,
                    report.duration_ms,
                    detail
                ))
            }
            ExecEvent::RunEnd { summary, .. } if !opts.quiet => Some(format!(
                "{} Plan finished: {}/{} tasks in {} groups, {}ms",
                self.marker(summary.failed == 0),
                summary.tasks_settled,
                summary.total_tasks,
                summary.groups_completed,
                summary.duration_ms
            )),
            ExecEvent::RunFailed {
                group_id, error, ..
            } => Some(format!(
                "{} Plan stopped at group {}: {}",
                self.marker(false),
                group_id,
                error
            )),
            _ => None,
        }
    }
}

impl EventRenderer for TextRenderer {
    fn name(&self) -> &str {
        "text"
    }

    fn render(&self, event: &ExecEvent) {
        if let Some(line) = self.line(event) {
            write_line(&self.out, &line);
        }
    }
}

/// One JSON object per line
#[derive(Debug, Clone, Serialize)]
pub struct JsonlEvent {
    pub v: i32,
    #[serde(rename = "type")]
    pub event_type: String,
    pub ts: String,
    pub run_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl JsonlEvent {
    pub fn from_event(event: &ExecEvent) -> Self {
        let mut ev = JsonlEvent {
            v: 1,
            event_type: event.event_type().to_string(),
            ts: Local::now().to_rfc3339(),
            run_id: event.run_id().to_string(),
            task_id: None,
            error: None,
            metadata: None,
        };
        match event {
            ExecEvent::RunStart {
                total_tasks,
                total_groups,
                ..
            } => {
                ev.metadata = Some(serde_json::json!({
                    "total_tasks": total_tasks,
                    "total_groups": total_groups,
                }));
            }
            ExecEvent::Plan { groups, .. } => {
                ev.metadata = Some(serde_json::json!({ "groups": groups }));
            }
            ExecEvent::GroupStart {
                group_id, task_ids, ..
            } => {
                ev.metadata = Some(serde_json::json!({
                    "group_id": group_id,
                    "tasks": task_ids,
                }));
            }
            ExecEvent::TaskStart {
                group_id,
                kind,
                identity,
                ..
            } => {
                ev.task_id = Some(identity.clone());
                ev.metadata = Some(serde_json::json!({
                    "group_id": group_id,
                    "kind": kind,
                }));
            }
            ExecEvent::TaskComplete { report, .. } => {
                ev.task_id = Some(report.identity.to_string());
                if let TaskOutcome::Failed(error) = &report.outcome {
                    ev.error = Some(error.clone());
                }
                ev.metadata = Some(serde_json::json!({
                    "group_id": report.group_id,
                    "kind": report.kind,
                    "outcome": report.outcome.as_str(),
                    "duration_ms": report.duration_ms,
                }));
            }
            ExecEvent::GroupEnd {
                group_id, failed, ..
            } => {
                ev.metadata = Some(serde_json::json!({
                    "group_id": group_id,
                    "failed": failed,
                }));
            }
            ExecEvent::RunEnd { summary, .. } => {
                ev.metadata = serde_json::to_value(summary).ok();
            }
            ExecEvent::RunFailed {
                group_id, error, ..
            } => {
                ev.error = Some(error.clone());
                ev.metadata = Some(serde_json::json!({ "group_id": group_id }));
            }
        }
        ev
    }
}

pub struct JsonlRenderer {
    out: SharedWriter,
}

impl JsonlRenderer {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(writer)),
        }
    }
}

impl Default for JsonlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRenderer for JsonlRenderer {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn render(&self, event: &ExecEvent) {
        if let Ok(line) = serde_json::to_string(&JsonlEvent::from_event(event)) {
            write_line(&self.out, &line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::types::{Identity, RunSummary, TaskKind, TaskReport};

    /// Writer that keeps everything in a shared buffer.
    #[derive(Clone, Default)]
    struct Buf(Arc<Mutex<Vec<u8>>>);

    impl Write for Buf {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Buf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn failed_report() -> TaskReport {
        TaskReport {
            identity: Identity::from("bad.js"),
            kind: TaskKind::Load,
            group_id: 1,
            outcome: TaskOutcome::Failed("load failed".into()),
            duration_ms: 3,
        }
    }

    #[test]
    fn test_jsonl_task_end_carries_error() {
        let buf = Buf::default();
        let renderer = JsonlRenderer::with_writer(Box::new(buf.clone()));
        renderer.render(&ExecEvent::TaskComplete {
            run_id: "r1".into(),
            report: failed_report(),
        });

        let value: serde_json::Value = serde_json::from_str(buf.text().trim()).unwrap();
        assert_eq!(value["type"], "task.end");
        assert_eq!(value["run_id"], "r1");
        assert_eq!(value["task_id"], "bad.js");
        assert_eq!(value["error"], "load failed");
        assert_eq!(value["metadata"]["kind"], "load");
        assert_eq!(value["metadata"]["outcome"], "failed");
    }

    #[test]
    fn test_text_quiet_still_reports_failure() {
        let buf = Buf::default();
        let opts = ExecutionOpts {
            quiet: true,
            ascii: true,
            ..ExecutionOpts::default()
        };
        let renderer = TextRenderer::with_writer(opts, Box::new(buf.clone()));
        renderer.render(&ExecEvent::RunEnd {
            run_id: "r1".into(),
            summary: RunSummary::default(),
        });
        renderer.render(&ExecEvent::RunFailed {
            run_id: "r1".into(),
            group_id: 1,
            error: "boom".into(),
        });

        assert_eq!(buf.text(), "[x] Plan stopped at group 1: boom\n");
    }

    #[test]
    fn test_text_verbose_task_line() {
        let buf = Buf::default();
        let opts = ExecutionOpts {
            verbose: true,
            ascii: true,
            ..ExecutionOpts::default()
        };
        let renderer = TextRenderer::with_writer(opts, Box::new(buf.clone()));
        renderer.render(&ExecEvent::TaskComplete {
            run_id: "r1".into(),
            report: failed_report(),
        });
        assert_eq!(buf.text(), "  [x] load bad.js: 3ms - load failed\n");
    }
}
