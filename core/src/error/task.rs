use thiserror::Error;

/// Errors reported by a resource adapter while attaching a resource.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("io error loading '{locator}': {source}")]
    Io {
        locator: String,
        source: std::io::Error,
    },

    #[error("http error loading '{locator}' (status={status:?}): {message}")]
    Http {
        locator: String,
        status: Option<u16>,
        message: String,
    },

    #[error("resource rejected: {0}")]
    Rejected(String),
}

impl AdapterError {
    pub fn io(locator: impl Into<String>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound(locator.into());
        }
        Self::Io {
            locator: locator.into(),
            source,
        }
    }
}

/// Errors raised by user callbacks (invocations and teardown hooks).
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ActionError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

/// A single task failure inside a group.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("load failed for '{locator}': {source}")]
    Load {
        locator: String,
        #[source]
        source: AdapterError,
    },

    #[error("action '{identity}' failed: {source}")]
    Action {
        identity: String,
        #[source]
        source: ActionError,
    },

    #[error("teardown of '{identity}' failed: {source}")]
    Teardown {
        identity: String,
        #[source]
        source: ActionError,
    },
}

impl TaskError {
    /// Identity of the task that failed.
    pub fn identity(&self) -> &str {
        match self {
            Self::Load { locator, .. } => locator,
            Self::Action { identity, .. } => identity,
            Self::Teardown { identity, .. } => identity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let err = AdapterError::io(
            "missing.js",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, AdapterError::NotFound(ref l) if l == "missing.js"));
    }

    #[test]
    fn test_task_error_identity() {
        let err = TaskError::Load {
            locator: "bad.js".to_string(),
            source: AdapterError::Rejected("nope".into()),
        };
        assert_eq!(err.identity(), "bad.js");
        assert!(err.to_string().contains("bad.js"));
        assert!(err.to_string().contains("nope"));
    }
}
