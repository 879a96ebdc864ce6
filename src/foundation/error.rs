/// Convenience result type used across the crate.
pub type KeylineResult<T> = Result<T, KeylineError>;

/// Error type shared by the model, store, evaluator and render boundary.
#[derive(thiserror::Error, Debug)]
pub enum KeylineError {
    /// Input rejected at a mutation or loading boundary.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame could not be resolved.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Project JSON could not be read or written.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The external render-job service refused or lost a job.
    #[error("job error: {0}")]
    Job(String),

    /// Any other error bubbled up from a collaborator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeylineError {
    /// Build a [`KeylineError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KeylineError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`KeylineError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`KeylineError::Job`].
    pub fn job(msg: impl Into<String>) -> Self {
        Self::Job(msg.into())
    }
}

impl From<serde_json::Error> for KeylineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
