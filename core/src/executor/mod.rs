//! Grouped plan execution
//!
//! A plan is an ordered list of groups. Tasks inside a group start together
//! and are joined together; a group starts only after the previous one has
//! fully settled. Loaded resources are kept in a [`ResourceCache`] so later
//! plans can skip them and destroy them.
//!
//! # Architecture
//!
//! ```text
//! LoaderContext::plan()
//!   ↓
//! Plan { load / invoke / destroy / barrier }   (dedup against the cache)
//!   ↓
//! Plan::finalize() → Queue { groups }
//!   ↓
//! ExecutionEngine::execute()
//!   ├─ for each group: execute_group()  (fan-out, full join)
//!   │     ├─ Load    → ResourceAdapter::attach → ResourceCache::put
//!   │     ├─ Invoke  → Callback::call
//!   │     └─ Destroy → detach → on_destroy → ResourceCache::remove
//!   └─ first failed group → ExecEvent::RunFailed (terminal handler)
//! ```

mod cache;
mod engine;
pub mod identity;
mod output;
mod plan;
mod progress;
mod scheduler;
pub mod traits;
pub mod types;

pub use cache::ResourceCache;
pub use engine::{execute_queue, ExecutionEngine};
pub use output::{trace_event, JsonlEvent, JsonlRenderer, TextRenderer, TracingRenderer};
pub use plan::Plan;
pub use progress::{ProgressMonitor, ProgressRenderer};
pub use scheduler::{execute_group, GroupOutcome};
pub use traits::{EventRenderer, ExecEvent, ResourceAdapter};
pub use types::{
    CacheEntry, Callback, DestroyTarget, ExecutionOpts, Group, Identity, Queue, ResourceHandle,
    RunSummary, Task, TaskKind, TaskOutcome, TaskReport,
};
