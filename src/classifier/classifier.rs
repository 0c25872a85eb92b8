use std::time::Duration;

use tokio::sync::OnceCell;

use crate::artifact_store::ArtifactStore;
use crate::runtime::{create_session_builder, RuntimeConfig};

use super::builder::{ArtifactSource, SentimentClassifierBuilder};
use super::encoder::{encode, EncodeOptions};
use super::error::{ClassifyError, InferenceError, LoadError};
use super::metadata::Metadata;
use super::model::ModelGateway;
use super::tokenizer::tokenize;
use super::{Classification, Sentiment};

/// Loaded model and metadata, committed at most once per classifier and
/// read-only afterwards.
#[derive(Debug)]
struct ModelContext {
    metadata: Metadata,
    gateway: ModelGateway,
}

/// Classifies the sentiment of short free-text remarks.
///
/// The model and its vocabulary metadata load lazily on the first
/// `classify` call and are shared by every request after that. Concurrent
/// first calls await one in-flight load rather than fetching twice, and a
/// failed load leaves the classifier unloaded so the next request retries.
///
/// # Example
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use sentiscore::{BuiltinArtifact, SentimentClassifier};
///
/// let classifier = SentimentClassifier::builder()
///     .with_artifact(BuiltinArtifact::SentimentCnn)?
///     .build()?;
///
/// let result = classifier.classify("This movie was a delight!").await?;
/// println!("{} ({:.1}%)", result.label, result.score * 100.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SentimentClassifier {
    source: ArtifactSource,
    artifact_store: Option<ArtifactStore>,
    runtime_config: RuntimeConfig,
    encode_options: EncodeOptions,
    load_timeout: Option<Duration>,
    context: OnceCell<ModelContext>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<SentimentClassifier>();
    }
};

impl SentimentClassifier {
    pub fn builder() -> SentimentClassifierBuilder {
        SentimentClassifierBuilder::new()
    }

    pub(crate) fn new(
        source: ArtifactSource,
        artifact_store: Option<ArtifactStore>,
        runtime_config: RuntimeConfig,
        encode_options: EncodeOptions,
        load_timeout: Option<Duration>,
    ) -> Self {
        Self {
            source,
            artifact_store,
            runtime_config,
            encode_options,
            load_timeout,
            context: OnceCell::new(),
        }
    }

    /// Whether the model and metadata have been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.context.initialized()
    }

    /// Loads the model and metadata unless a previous call already did.
    ///
    /// Returns `true` iff this call performed the load; callers use that
    /// only to decide whether to log. Concurrent callers share a single
    /// in-flight load, and nothing is committed on failure.
    pub async fn ensure_loaded(&self) -> Result<bool, LoadError> {
        let mut performed = false;
        self.context
            .get_or_try_init(|| {
                performed = true;
                self.load_context()
            })
            .await?;
        if performed {
            log::info!("model and metadata loaded");
        }
        Ok(performed)
    }

    /// Classifies one remark.
    ///
    /// Empty or whitespace-only input is rejected before any loading or
    /// inference happens. Otherwise the pipeline runs tokenize -> encode ->
    /// predict exactly once and maps the score to a label with the fixed
    /// 0.66 / 0.33 thresholds.
    pub async fn classify(&self, text: &str) -> Result<Classification, ClassifyError> {
        if text.trim().is_empty() {
            return Err(ClassifyError::EmptyInput);
        }

        self.ensure_loaded().await?;
        let context = self.context.get().ok_or(InferenceError::NotReady)?;

        let tokens = tokenize(text);
        let encoded = encode(&tokens, &context.metadata, self.encode_options);
        let score = context.gateway.predict(&encoded)?;

        let label =
            Sentiment::from_score(score).ok_or(ClassifyError::InvariantViolation(score))?;
        log::debug!("classified remark as {} (score {:.4})", label, score);
        Ok(Classification { label, score })
    }

    /// The loaded vocabulary metadata, or `NotReady` before the first
    /// successful load.
    pub fn metadata(&self) -> Result<&Metadata, InferenceError> {
        self.context
            .get()
            .map(|c| &c.metadata)
            .ok_or(InferenceError::NotReady)
    }

    /// The loaded model gateway, or `NotReady` before the first successful
    /// load. Exposed for callers that encode sequences themselves.
    pub fn gateway(&self) -> Result<&ModelGateway, InferenceError> {
        self.context
            .get()
            .map(|c| &c.gateway)
            .ok_or(InferenceError::NotReady)
    }

    async fn load_context(&self) -> Result<ModelContext, LoadError> {
        match self.load_timeout {
            Some(limit) => tokio::time::timeout(limit, self.load_artifacts())
                .await
                .map_err(|_| LoadError::Timeout(limit))?,
            None => self.load_artifacts().await,
        }
    }

    async fn load_artifacts(&self) -> Result<ModelContext, LoadError> {
        let (model_path, metadata_path) = match &self.source {
            ArtifactSource::Builtin(artifact) => {
                let info = artifact.info();
                let store = match &self.artifact_store {
                    Some(store) => store.clone(),
                    None => ArtifactStore::new_default()?,
                };
                store.ensure_downloaded(&info).await?;
                (store.model_path(&info), store.metadata_path(&info))
            }
            ArtifactSource::Local {
                model_path,
                metadata_path,
            } => (model_path.clone(), metadata_path.clone()),
        };

        let metadata = Metadata::from_file(&metadata_path)?;
        let session =
            create_session_builder(&self.runtime_config)?.commit_from_file(&model_path)?;
        let gateway = ModelGateway::new(session, metadata.max_len)?;
        log::info!(
            "loaded model from {:?} (input length {}, {} vocabulary entries)",
            model_path,
            metadata.max_len,
            metadata.word_index.len()
        );

        Ok(ModelContext { metadata, gateway })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BuiltinArtifact;

    fn unloadable_classifier() -> SentimentClassifier {
        SentimentClassifier::builder()
            .with_local_artifacts("/nonexistent/model.onnx", "/nonexistent/metadata.json")
            .unwrap()
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_input_rejected_before_loading() {
        let classifier = unloadable_classifier();
        assert!(matches!(
            classifier.classify("").await,
            Err(ClassifyError::EmptyInput)
        ));
        assert!(matches!(
            classifier.classify("   ").await,
            Err(ClassifyError::EmptyInput)
        ));
        // The load was never attempted, let alone committed.
        assert!(!classifier.is_loaded());
    }

    #[tokio::test]
    async fn test_failed_load_is_not_committed() {
        let classifier = unloadable_classifier();

        let first = classifier.classify("some remark").await;
        assert!(matches!(first, Err(ClassifyError::Load(_))));
        assert!(!classifier.is_loaded());

        // A later request retries instead of observing a poisoned state.
        let second = classifier.classify("another remark").await;
        assert!(matches!(second, Err(ClassifyError::Load(_))));
        assert!(!classifier.is_loaded());
    }

    #[tokio::test]
    async fn test_accessors_report_not_ready_before_load() {
        let classifier = unloadable_classifier();
        assert!(matches!(
            classifier.metadata(),
            Err(InferenceError::NotReady)
        ));
        assert!(matches!(
            classifier.gateway(),
            Err(InferenceError::NotReady)
        ));
    }

    #[tokio::test]
    #[ignore = "requires downloaded model artifacts"]
    async fn test_single_load_under_concurrent_requests(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::sync::Arc;

        let classifier = Arc::new(
            SentimentClassifier::builder()
                .with_artifact(BuiltinArtifact::SentimentCnn)?
                .build()?,
        );

        let mut handles = Vec::new();
        for _ in 0..8 {
            let classifier = Arc::clone(&classifier);
            handles.push(tokio::spawn(async move {
                classifier.ensure_loaded().await
            }));
        }

        let mut performed = 0;
        for handle in handles {
            if handle.await?? {
                performed += 1;
            }
        }
        assert_eq!(performed, 1);
        assert!(classifier.is_loaded());
        Ok(())
    }
}
