use std::time::Duration;

/// Failure while fetching or parsing the model or metadata artifacts.
///
/// Fatal to the request that observed it, not to the process: the loaded
/// state is only committed on success, so a later `classify` call retries
/// the load from scratch.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("artifact fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed metadata: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
    #[error("hash mismatch: expected {expected}, got {actual} for {file_type} file")]
    HashMismatch {
        file_type: String,
        expected: String,
        actual: String,
    },
    #[error("artifact verification failed")]
    VerificationFailed,
    #[error("failed to load model session: {0}")]
    Session(#[from] ort::Error),
    #[error("loading timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure inside the model gateway. Indicates a caller or contract bug
/// rather than anything transient.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("model is not loaded")]
    NotReady,
    #[error("encoded input has length {actual}, model expects {expected}")]
    InputShape { expected: usize, actual: usize },
    #[error("failed to build input tensor: {0}")]
    Tensor(String),
    #[error("inference failed: {0}")]
    Runtime(#[from] ort::Error),
    #[error("model returned no output score")]
    EmptyOutput,
}

/// Top-level error returned by [`SentimentClassifier::classify`].
///
/// [`SentimentClassifier::classify`]: crate::SentimentClassifier::classify
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// The input was empty or whitespace-only. Recoverable: surface it to
    /// the user as a validation message.
    #[error("input text is empty")]
    EmptyInput,
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    /// The model produced a score outside `[0, 1]`. Never clamped.
    #[error("model produced out-of-range sentiment score {0}")]
    InvariantViolation(f32),
}

/// Misuse of the classifier builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("artifact source already set")]
    SourceAlreadySet,
    #[error("an artifact source must be configured before building")]
    MissingSource,
    #[error("invalid artifact path: {0}")]
    InvalidPath(String),
}
