use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use serde::Serialize;

use crate::error::ActionError;

/// Dedup / lookup key of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

type CallbackFn = dyn Fn() -> Result<(), ActionError> + Send + Sync;

/// A user action paired with its stable textual form.
///
/// Closures have no source text at runtime, so the textual form is either a
/// caller-chosen label or the definition site of the callback.
#[derive(Clone)]
pub struct Callback {
    label: String,
    f: Arc<CallbackFn>,
}

impl Callback {
    pub fn new<F>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            f: Arc::new(f),
        }
    }

    /// Labels the callback with the location it was created at, so recording
    /// the same call site twice yields the same identity.
    #[track_caller]
    pub fn anonymous<F>(f: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        let loc = Location::caller();
        Self::new(
            format!("fn@{}:{}:{}", loc.file(), loc.line(), loc.column()),
            f,
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn call(&self) -> Result<(), ActionError> {
        (self.f)()
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Argument of a destroy call: either a locator or a callback reference.
#[derive(Debug, Clone)]
pub enum DestroyTarget {
    Locator(String),
    Callback(Callback),
}

impl From<&str> for DestroyTarget {
    fn from(value: &str) -> Self {
        Self::Locator(value.to_string())
    }
}

impl From<String> for DestroyTarget {
    fn from(value: String) -> Self {
        Self::Locator(value)
    }
}

impl From<Callback> for DestroyTarget {
    fn from(value: Callback) -> Self {
        Self::Callback(value)
    }
}

impl From<&Callback> for DestroyTarget {
    fn from(value: &Callback) -> Self {
        Self::Callback(value.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Load,
    Invoke,
    Destroy,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Invoke => "invoke",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct LoadTask {
    pub identity: Identity,
    pub locator: String,
    pub on_destroy: Option<Callback>,
}

#[derive(Debug, Clone)]
pub struct InvokeTask {
    pub identity: Identity,
    pub action: Callback,
}

#[derive(Debug, Clone)]
pub struct DestroyTask {
    pub target_identity: Identity,
}

/// One unit of work inside a group.
#[derive(Debug, Clone)]
pub enum Task {
    Load(LoadTask),
    Invoke(InvokeTask),
    Destroy(DestroyTask),
}

impl Task {
    pub fn identity(&self) -> &Identity {
        match self {
            Self::Load(t) => &t.identity,
            Self::Invoke(t) => &t.identity,
            Self::Destroy(t) => &t.target_identity,
        }
    }

    pub fn kind(&self) -> TaskKind {
        match self {
            Self::Load(_) => TaskKind::Load,
            Self::Invoke(_) => TaskKind::Invoke,
            Self::Destroy(_) => TaskKind::Destroy,
        }
    }

    /// `kind:identity`, used in plan layouts and events.
    pub fn label(&self) -> String {
        format!("{}:{}", self.kind(), self.identity())
    }
}
