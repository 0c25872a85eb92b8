use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::error::LoadError;

/// Vocabulary metadata shipped alongside the pretrained model.
///
/// Parsed once from the `metadata.json` artifact and immutable afterwards,
/// so it can be shared read-only across concurrent requests. Unknown JSON
/// fields (training epochs, model type, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    /// Token -> base vocabulary index, as assigned at training time.
    pub word_index: HashMap<String, i64>,
    /// Offset added to every looked-up base index.
    pub index_from: i64,
    /// Upper bound on usable indices; anything above is out-of-vocabulary.
    pub vocabulary_size: i64,
    /// Fixed input length the model expects.
    pub max_len: usize,
}

impl Metadata {
    /// Parses metadata from raw JSON bytes.
    ///
    /// Fails with [`LoadError::Parse`] on malformed JSON or missing required
    /// fields, and [`LoadError::InvalidMetadata`] on values no model could
    /// have been trained with.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let metadata: Metadata = serde_json::from_slice(bytes)?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Reads and parses metadata from a local file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path)?;
        Self::from_slice(&bytes)
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.max_len == 0 {
            return Err(LoadError::InvalidMetadata("max_len must be positive".into()));
        }
        if self.vocabulary_size <= 0 {
            return Err(LoadError::InvalidMetadata(format!(
                "vocabulary_size must be positive, got {}",
                self.vocabulary_size
            )));
        }
        Ok(())
    }
}
