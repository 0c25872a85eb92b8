use std::path::PathBuf;
use std::time::Duration;

use crate::artifact_store::ArtifactStore;
use crate::artifacts::BuiltinArtifact;
use crate::runtime::RuntimeConfig;

use super::classifier::SentimentClassifier;
use super::encoder::EncodeOptions;
use super::error::BuildError;

/// Where the classifier gets its model and metadata from.
#[derive(Debug, Clone)]
pub(crate) enum ArtifactSource {
    /// A registered artifact, fetched into the artifact cache on first use.
    Builtin(BuiltinArtifact),
    /// Caller-supplied files on local disk.
    Local {
        model_path: PathBuf,
        metadata_path: PathBuf,
    },
}

/// Fluent construction of a [`SentimentClassifier`].
///
/// Building performs no I/O: the model and metadata stay unloaded until the
/// first `classify` (or an explicit `ensure_loaded`) triggers the one-time
/// load.
///
/// # Example
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use sentiscore::{BuiltinArtifact, SentimentClassifier};
///
/// let classifier = SentimentClassifier::builder()
///     .with_artifact(BuiltinArtifact::SentimentCnn)?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SentimentClassifierBuilder {
    source: Option<ArtifactSource>,
    artifact_store: Option<ArtifactStore>,
    runtime_config: RuntimeConfig,
    encode_options: EncodeOptions,
    load_timeout: Option<Duration>,
}

impl SentimentClassifierBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a registered builtin artifact, downloaded into the artifact
    /// cache on first load.
    pub fn with_artifact(mut self, artifact: BuiltinArtifact) -> Result<Self, BuildError> {
        if self.source.is_some() {
            return Err(BuildError::SourceAlreadySet);
        }
        self.source = Some(ArtifactSource::Builtin(artifact));
        Ok(self)
    }

    /// Uses caller-supplied model and metadata files. The files are read
    /// lazily at first load, so they only have to exist by then.
    pub fn with_local_artifacts(
        mut self,
        model_path: impl Into<PathBuf>,
        metadata_path: impl Into<PathBuf>,
    ) -> Result<Self, BuildError> {
        if self.source.is_some() {
            return Err(BuildError::SourceAlreadySet);
        }
        let model_path = model_path.into();
        let metadata_path = metadata_path.into();
        if model_path.as_os_str().is_empty() {
            return Err(BuildError::InvalidPath("model path is empty".into()));
        }
        if metadata_path.as_os_str().is_empty() {
            return Err(BuildError::InvalidPath("metadata path is empty".into()));
        }
        self.source = Some(ArtifactSource::Local {
            model_path,
            metadata_path,
        });
        Ok(self)
    }

    /// Overrides the artifact store used for builtin downloads (defaults to
    /// the platform cache directory).
    pub fn with_artifact_store(mut self, store: ArtifactStore) -> Self {
        self.artifact_store = Some(store);
        self
    }

    /// Sets the ONNX Runtime session configuration.
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Overrides the pad/truncate policy (defaults: pre padding, pre
    /// truncation, fill value 0, matching what the model was trained with).
    pub fn with_encode_options(mut self, options: EncodeOptions) -> Self {
        self.encode_options = options;
        self
    }

    /// Bounds the one-time load step; exceeding it surfaces as
    /// `LoadError::Timeout` and a later request retries from scratch.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<SentimentClassifier, BuildError> {
        let source = self.source.ok_or(BuildError::MissingSource)?;
        Ok(SentimentClassifier::new(
            source,
            self.artifact_store,
            self.runtime_config,
            self.encode_options,
            self.load_timeout,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_must_be_set() {
        assert!(matches!(
            SentimentClassifierBuilder::new().build(),
            Err(BuildError::MissingSource)
        ));
    }

    #[test]
    fn test_source_cannot_be_set_twice() {
        let result = SentimentClassifierBuilder::new()
            .with_artifact(BuiltinArtifact::SentimentCnn)
            .unwrap()
            .with_local_artifacts("model.onnx", "metadata.json");
        assert!(matches!(result, Err(BuildError::SourceAlreadySet)));
    }

    #[test]
    fn test_empty_paths_rejected() {
        assert!(matches!(
            SentimentClassifierBuilder::new().with_local_artifacts("", "metadata.json"),
            Err(BuildError::InvalidPath(_))
        ));
        assert!(matches!(
            SentimentClassifierBuilder::new().with_local_artifacts("model.onnx", ""),
            Err(BuildError::InvalidPath(_))
        ));
    }
}
