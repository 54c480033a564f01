#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use loadplan_core::api::{
    ActionError, AdapterError, Callback, EventRenderer, ExecEvent, LoaderContext, ResourceAdapter,
    ResourceCache, ResourceHandle,
};

/// Shared, ordered log of what happened during a run.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }
}

/// Adapter with scripted per-locator delays and failures.
pub struct MockAdapter {
    delays: HashMap<String, u64>,
    failures: HashSet<String>,
    journal: Journal,
}

impl MockAdapter {
    pub fn new(journal: Journal) -> Self {
        Self {
            delays: HashMap::new(),
            failures: HashSet::new(),
            journal,
        }
    }

    pub fn delay(mut self, locator: &str, ms: u64) -> Self {
        self.delays.insert(locator.to_string(), ms);
        self
    }

    pub fn fail(mut self, locator: &str) -> Self {
        self.failures.insert(locator.to_string());
        self
    }
}

#[async_trait]
impl ResourceAdapter for MockAdapter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn attach(&self, locator: &str) -> Result<ResourceHandle, AdapterError> {
        self.journal.push(format!("attach:start:{locator}"));
        if let Some(ms) = self.delays.get(locator) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        } else {
            tokio::task::yield_now().await;
        }
        if self.failures.contains(locator) {
            self.journal.push(format!("attach:fail:{locator}"));
            return Err(AdapterError::Rejected(format!("{locator} refused")));
        }
        self.journal.push(format!("attach:end:{locator}"));
        Ok(ResourceHandle::new(locator))
    }

    fn detach(&self, handle: ResourceHandle) {
        self.journal.push(format!("detach:{}", handle.locator));
    }
}

/// Renderer that keeps every event.
#[derive(Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<ExecEvent>>,
}

impl RecordingRenderer {
    pub fn events(&self) -> Vec<ExecEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<(usize, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ExecEvent::RunFailed {
                    group_id, error, ..
                } => Some((group_id, error)),
                _ => None,
            })
            .collect()
    }

    pub fn run_ends(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ExecEvent::RunEnd { .. }))
            .count()
    }
}

impl EventRenderer for RecordingRenderer {
    fn name(&self) -> &str {
        "recording"
    }

    fn render(&self, event: &ExecEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub struct Harness {
    pub ctx: LoaderContext,
    pub journal: Journal,
    pub renderer: Arc<RecordingRenderer>,
}

/// Context with a private cache, the given adapter script and a recording renderer.
pub fn harness(script: impl FnOnce(MockAdapter) -> MockAdapter) -> Harness {
    let journal = Journal::default();
    let adapter = script(MockAdapter::new(journal.clone()));
    let renderer = Arc::new(RecordingRenderer::default());
    let ctx = LoaderContext::builder(Arc::new(adapter))
        .cache(ResourceCache::new())
        .renderer(renderer.clone())
        .build();
    Harness {
        ctx,
        journal,
        renderer,
    }
}

/// Callback that journals `name` each time it runs.
pub fn journaled(journal: &Journal, name: &str) -> Callback {
    let journal = journal.clone();
    let entry = format!("call:{name}");
    Callback::new(name, move || {
        journal.push(entry.clone());
        Ok(())
    })
}

/// Callback counting its calls.
pub fn counted(name: &str) -> (Callback, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    let cb = Callback::new(name, move || {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    (cb, count)
}

pub fn failing(name: &str) -> Callback {
    let msg = format!("{name} exploded");
    Callback::new(name, move || Err(ActionError::failed(msg.clone())))
}
