use thiserror::Error;

/// Error type for the mitigation accounting engine.
///
/// `Configuration` covers malformed, missing, or mismatched-length input and
/// is always fatal to the single computation requested. `ModelComputation`
/// covers numerical failures inside a sub-model and carries the name of the
/// sub-model that produced it; it aborts the enclosing scenario build.
/// Neither kind is ever swallowed or defaulted to zero.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("sub-model '{model}' failed: {reason}")]
    ModelComputation { model: &'static str, reason: String },
}

impl EngineError {
    /// Shorthand for a configuration error with a formatted message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        EngineError::Configuration(msg.into())
    }

    /// Shorthand for a computation error attributed to a sub-model.
    pub fn model(model: &'static str, reason: impl Into<String>) -> Self {
        EngineError::ModelComputation {
            model,
            reason: reason.into(),
        }
    }
}

/// Convenience type for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;
