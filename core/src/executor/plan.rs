use std::collections::HashSet;

use tokio::task::JoinHandle;

use crate::context::LoaderContext;

use super::engine::ExecutionEngine;
use super::identity;
use super::types::{
    Callback, DestroyTarget, DestroyTask, Group, Identity, InvokeTask, LoadTask, Queue, Task,
};

/// Records loads, invocations, destroys and barriers into groups.
///
/// Recording methods take and return `self`; `finalize`, `execute` and `spawn`
/// consume the plan, so a plan that has started executing can not be
/// recorded into again.
///
/// Loads are deduplicated against the cache only, at recording time: two
/// loads of the same locator in one plan both run unless
/// `loader.dedup_pending_loads` is enabled.
///
/// ```rust,ignore
/// ctx.plan()
///     .load("vendor/jquery.js")
///     .barrier()
///     .load_with("widgets.js", Callback::new("widgets-off", teardown))
///     .invoke(Callback::new("widgets-init", init))
///     .execute()
///     .await;
/// ```
#[must_use = "a plan does nothing until it is executed"]
pub struct Plan {
    ctx: LoaderContext,
    groups: Vec<Group>,
    open_new_group: bool,
    pending_loads: HashSet<Identity>,
}

impl Plan {
    pub(crate) fn new(ctx: LoaderContext) -> Self {
        Self {
            ctx,
            groups: Vec::new(),
            open_new_group: true,
            pending_loads: HashSet::new(),
        }
    }

    fn record(&mut self, task: Task) {
        if self.open_new_group {
            self.groups.push(Group::new());
            self.open_new_group = false;
        }
        if let Some(group) = self.groups.last_mut() {
            group.push(task);
        }
    }

    fn record_load(mut self, locator: String, on_destroy: Option<Callback>) -> Self {
        let identity = identity::for_locator(&locator);

        if self.ctx.cache().contains(&identity) {
            tracing::debug!(target: "loadplan.plan", identity = %identity, "load skipped: already cached");
            return self;
        }
        if self.ctx.config().dedup_pending_loads && self.pending_loads.contains(&identity) {
            tracing::debug!(target: "loadplan.plan", identity = %identity, "load skipped: already pending");
            return self;
        }

        self.pending_loads.insert(identity.clone());
        self.record(Task::Load(LoadTask {
            identity,
            locator,
            on_destroy,
        }));
        self
    }

    /// Record a load unless its locator is already cached.
    pub fn load(self, locator: impl Into<String>) -> Self {
        self.record_load(locator.into(), None)
    }

    /// Record a load with a teardown callback run when it is destroyed.
    pub fn load_with(self, locator: impl Into<String>, on_destroy: Callback) -> Self {
        self.record_load(locator.into(), Some(on_destroy))
    }

    /// Record a one-off invocation. Never deduplicated.
    pub fn invoke(mut self, action: Callback) -> Self {
        self.record(Task::Invoke(InvokeTask {
            identity: identity::for_callback(&action),
            action,
        }));
        self
    }

    /// Record a destroy of a previously loaded locator (or callback identity).
    pub fn destroy(mut self, target: impl Into<DestroyTarget>) -> Self {
        let target = target.into();
        self.record(Task::Destroy(DestroyTask {
            target_identity: identity::derive(&target),
        }));
        self
    }

    /// Tasks recorded after this point start only once everything before has settled.
    pub fn barrier(mut self) -> Self {
        self.open_new_group = true;
        self
    }

    /// Groups recorded so far.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn context(&self) -> &LoaderContext {
        &self.ctx
    }

    pub fn finalize(self) -> Queue {
        self.into_parts().1
    }

    fn into_parts(self) -> (LoaderContext, Queue) {
        (self.ctx, Queue::from_groups(self.groups))
    }

    /// Run the plan to completion. Failures are reported to the renderers and
    /// the log, never to the caller.
    pub async fn execute(self) {
        let (ctx, queue) = self.into_parts();
        ExecutionEngine::new(ctx).execute(queue).await;
    }

    /// Fire-and-forget variant of [`Plan::execute`].
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.execute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoaderConfig;
    use crate::error::AdapterError;
    use crate::executor::{ResourceAdapter, ResourceCache, ResourceHandle};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    struct NullAdapter;

    #[async_trait]
    impl ResourceAdapter for NullAdapter {
        fn name(&self) -> &str {
            "null"
        }

        async fn attach(&self, locator: &str) -> Result<ResourceHandle, AdapterError> {
            Ok(ResourceHandle::new(locator))
        }

        fn detach(&self, _handle: ResourceHandle) {}
    }

    fn ctx_with(config: LoaderConfig) -> LoaderContext {
        LoaderContext::builder(Arc::new(NullAdapter))
            .cache(ResourceCache::new())
            .config(config)
            .build()
    }

    fn ctx() -> LoaderContext {
        ctx_with(LoaderConfig::default())
    }

    #[test]
    fn test_first_record_opens_group() {
        let plan = ctx().plan().load("a.js").invoke(Callback::new("f", || Ok(())));
        assert_eq!(plan.groups().len(), 1);
        assert_eq!(plan.groups()[0].len(), 2);
    }

    #[test]
    fn test_barrier_splits_groups() {
        let queue = ctx()
            .plan()
            .load("a.js")
            .barrier()
            .load("b.js")
            .barrier()
            .load("c.js")
            .finalize();
        assert_eq!(
            queue.layout(),
            vec![
                vec!["load:a.js".to_string()],
                vec!["load:b.js".to_string()],
                vec!["load:c.js".to_string()],
            ]
        );
    }

    #[test]
    fn test_leading_and_repeated_barriers_do_not_create_empty_groups() {
        let queue = ctx()
            .plan()
            .barrier()
            .load("a.js")
            .barrier()
            .barrier()
            .load("b.js")
            .barrier()
            .finalize();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.task_count(), 2);
    }

    #[test]
    fn test_load_skipped_when_cached() {
        let ctx = ctx();
        tokio_test::block_on(ctx.plan().load("a.js").execute());
        assert!(ctx.cache().contains(&"a.js".into()));

        let queue = ctx.plan().load("a.js").load("b.js").finalize();
        assert_eq!(queue.layout(), vec![vec!["load:b.js".to_string()]]);
    }

    #[test]
    fn test_pending_loads_not_deduplicated_by_default() {
        let queue = ctx().plan().load("a.js").barrier().load("a.js").finalize();
        assert_eq!(queue.task_count(), 2);
    }

    #[test]
    fn test_pending_loads_deduplicated_when_configured() {
        let queue = ctx_with(LoaderConfig {
            dedup_pending_loads: true,
        })
        .plan()
        .load("a.js")
        .load("a.js")
        .finalize();
        assert_eq!(queue.task_count(), 1);
    }

    #[test]
    fn test_invocations_and_destroys_always_recorded() {
        let cb = Callback::new("f", || Ok(()));
        let queue = ctx()
            .plan()
            .invoke(cb.clone())
            .invoke(cb.clone())
            .destroy("never-loaded.js")
            .destroy(&cb)
            .finalize();
        assert_eq!(
            queue.layout(),
            vec![vec![
                "invoke:f".to_string(),
                "invoke:f".to_string(),
                "destroy:never-loaded.js".to_string(),
                "destroy:f".to_string(),
            ]]
        );
    }
}
