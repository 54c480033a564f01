use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use super::traits::{EventRenderer, ExecEvent};

/// Visual progress monitor for plan execution
///
/// One bar for the whole run, one spinner per in-flight task
pub struct ProgressMonitor {
    multi: MultiProgress,
    overall: ProgressBar,
    task_bars: HashMap<String, ProgressBar>,
    enabled: bool,
}

impl ProgressMonitor {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                multi: MultiProgress::new(),
                overall: ProgressBar::hidden(),
                task_bars: HashMap::new(),
                enabled: false,
            };
        }

        let multi = MultiProgress::new();
        let overall = multi.add(ProgressBar::new(0));
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tasks ({percent}%) {msg}")
        {
            overall.set_style(style.progress_chars("█▓▒░  "));
        }
        overall.set_message("Starting...");

        Self {
            multi,
            overall,
            task_bars: HashMap::new(),
            enabled: true,
        }
    }

    pub fn start_run(&self, total_tasks: usize) {
        if self.enabled {
            self.overall.set_length(total_tasks as u64);
        }
    }

    pub fn add_task(&mut self, task_id: &str) {
        if !self.enabled {
            return;
        }

        let bar = self.multi.add(ProgressBar::new_spinner());
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.green} {msg}") {
            bar.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
        }
        bar.set_message(format!("⏳ {}", task_id));
        bar.enable_steady_tick(Duration::from_millis(100));

        self.task_bars.insert(task_id.to_string(), bar);
    }

    pub fn complete_task(&mut self, task_id: &str, success: bool, duration_ms: u64) {
        if !self.enabled {
            return;
        }

        if let Some(bar) = self.task_bars.remove(task_id) {
            let icon = if success { "✅" } else { "❌" };
            bar.finish_with_message(format!("{} {} ({}ms)", icon, task_id, duration_ms));
        }

        self.overall.inc(1);
    }

    pub fn update_group(&self, group_id: usize, total_groups: usize) {
        if self.enabled {
            self.overall
                .set_message(format!("Group {}/{}", group_id + 1, total_groups));
        }
    }

    pub fn finish(&self, success: bool) {
        if !self.enabled {
            return;
        }

        let msg = if success {
            "✅ All groups settled"
        } else {
            "❌ Plan stopped"
        };

        self.overall.finish_with_message(msg.to_string());
    }
}

impl Drop for ProgressMonitor {
    fn drop(&mut self) {
        for (_, bar) in self.task_bars.drain() {
            bar.finish_and_clear();
        }
    }
}

/// Drives a [`ProgressMonitor`] from execution events
pub struct ProgressRenderer {
    monitor: Mutex<ProgressMonitor>,
    total_groups: Mutex<usize>,
}

impl ProgressRenderer {
    pub fn new(enabled: bool) -> Self {
        Self {
            monitor: Mutex::new(ProgressMonitor::new(enabled)),
            total_groups: Mutex::new(0),
        }
    }
}

impl EventRenderer for ProgressRenderer {
    fn name(&self) -> &str {
        "progress"
    }

    fn render(&self, event: &ExecEvent) {
        let Ok(mut monitor) = self.monitor.lock() else {
            return;
        };
        match event {
            ExecEvent::RunStart {
                total_tasks,
                total_groups,
                ..
            } => {
                monitor.start_run(*total_tasks);
                if let Ok(mut total) = self.total_groups.lock() {
                    *total = *total_groups;
                }
            }
            ExecEvent::GroupStart { group_id, .. } => {
                let total = self.total_groups.lock().map(|t| *t).unwrap_or(0);
                monitor.update_group(*group_id, total);
            }
            ExecEvent::TaskStart { kind, identity, .. } => {
                monitor.add_task(&format!("{kind}:{identity}"));
            }
            ExecEvent::TaskComplete { report, .. } => {
                monitor.complete_task(
                    &format!("{}:{}", report.kind, report.identity),
                    report.outcome.is_success(),
                    report.duration_ms,
                );
            }
            ExecEvent::RunEnd { summary, .. } => monitor.finish(summary.failed == 0),
            ExecEvent::RunFailed { .. } => monitor.finish(false),
            ExecEvent::Plan { .. } | ExecEvent::GroupEnd { .. } => {}
        }
    }
}
