use std::sync::{Arc, OnceLock};

use crate::config::LoaderConfig;
use crate::error::ContextError;
use crate::executor::{EventRenderer, Plan, ResourceAdapter, ResourceCache};

static DEFAULT_CONTEXT: OnceLock<LoaderContext> = OnceLock::new();

/// Process-scoped state a plan executes against.
///
/// Cloning is cheap; clones share the adapter, renderers and cache.
#[derive(Clone)]
pub struct LoaderContext {
    cache: ResourceCache,
    adapter: Arc<dyn ResourceAdapter>,
    renderers: Vec<Arc<dyn EventRenderer>>,
    config: Arc<LoaderConfig>,
}

pub struct LoaderContextBuilder {
    cache: Option<ResourceCache>,
    adapter: Arc<dyn ResourceAdapter>,
    renderers: Vec<Arc<dyn EventRenderer>>,
    config: LoaderConfig,
}

impl LoaderContext {
    pub fn builder(adapter: Arc<dyn ResourceAdapter>) -> LoaderContextBuilder {
        LoaderContextBuilder::new(adapter)
    }

    /// Open a new, empty plan bound to this context.
    pub fn plan(&self) -> Plan {
        Plan::new(self.clone())
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    pub fn adapter(&self) -> &Arc<dyn ResourceAdapter> {
        &self.adapter
    }

    pub fn renderers(&self) -> &[Arc<dyn EventRenderer>] {
        &self.renderers
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

impl LoaderContextBuilder {
    pub fn new(adapter: Arc<dyn ResourceAdapter>) -> Self {
        Self {
            cache: None,
            adapter,
            renderers: Vec::new(),
            config: LoaderConfig::default(),
        }
    }

    /// Use a private cache instead of the process-wide one.
    pub fn cache(mut self, cache: ResourceCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn EventRenderer>) -> Self {
        self.renderers.push(renderer);
        self
    }

    pub fn renderers(mut self, renderers: Vec<Arc<dyn EventRenderer>>) -> Self {
        self.renderers.extend(renderers);
        self
    }

    pub fn config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> LoaderContext {
        LoaderContext {
            cache: self
                .cache
                .unwrap_or_else(|| ResourceCache::global().clone()),
            adapter: self.adapter,
            renderers: self.renderers,
            config: Arc::new(self.config),
        }
    }
}

/// Register the default entry point. Only the first call succeeds.
pub fn install_default(ctx: LoaderContext) -> Result<&'static LoaderContext, ContextError> {
    let mut installed = false;
    let ctx = DEFAULT_CONTEXT.get_or_init(|| {
        installed = true;
        ctx
    });
    if installed {
        tracing::debug!(target: "loadplan.plan", adapter = ctx.adapter.name(), "default loader installed");
        Ok(ctx)
    } else {
        Err(ContextError::AlreadyInstalled)
    }
}

pub fn default_context() -> Option<&'static LoaderContext> {
    DEFAULT_CONTEXT.get()
}
