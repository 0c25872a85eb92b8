//! Sentiment classification for short free-text remarks using a pretrained
//! ONNX sequence model.
//!
//! The pipeline converts raw text into the exact fixed-length integer
//! sequence the model was trained on (normalize, split, vocabulary-index
//! remap with an out-of-vocabulary sentinel, pad/truncate), runs the model
//! exactly once per request, and maps the scalar score in `[0, 1]` onto
//! positive / neutral / negative with fixed thresholds. Model and metadata
//! artifacts load lazily on the first request and are shared read-only by
//! every request after that.
//!
//! # Basic Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use sentiscore::{BuiltinArtifact, SentimentClassifier};
//!
//! let classifier = SentimentClassifier::builder()
//!     .with_artifact(BuiltinArtifact::SentimentCnn)?
//!     .build()?;
//!
//! let result = classifier.classify("This is a great movie!").await?;
//! println!("{} remark, score {:.4}", result.label, result.score);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! `SentimentClassifier` is `Send + Sync`; share it across tasks with
//! `Arc`. Concurrent requests arriving before the model has loaded await a
//! single in-flight load rather than fetching the artifacts twice.

pub mod artifact_store;
pub mod artifacts;
pub mod classifier;
mod runtime;

pub use artifact_store::ArtifactStore;
pub use artifacts::{ArtifactInfo, BuiltinArtifact};
pub use classifier::{
    encode, tokenize, BuildError, Classification, ClassifyError, Edge, EncodeOptions,
    InferenceError, LoadError, Metadata, ModelGateway, Sentiment, SentimentClassifier,
    SentimentClassifierBuilder, OOV_INDEX,
};
pub use runtime::{create_session_builder, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
