/// Pretrained artifact pairs this crate knows how to fetch.
///
/// Each builtin names a model file and the JSON metadata describing its
/// vocabulary. Hashes are optional; when present the downloaded bytes are
/// verified before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinArtifact {
    /// The IMDB-trained sentiment CNN (1D convolution over word indices,
    /// scalar sigmoid output). Metadata schema:
    /// `{word_index, index_from, vocabulary_size, max_len}`.
    SentimentCnn,
}

/// Download locations and expected hashes for one artifact pair.
#[derive(Debug, Clone)]
pub struct ArtifactInfo {
    pub name: &'static str,
    pub model_url: &'static str,
    pub metadata_url: &'static str,
    pub model_hash: Option<&'static str>,
    pub metadata_hash: Option<&'static str>,
}

impl BuiltinArtifact {
    pub fn info(&self) -> ArtifactInfo {
        match self {
            Self::SentimentCnn => ArtifactInfo {
                name: "sentiment-cnn-v1",
                model_url:
                    "https://storage.googleapis.com/tfjs-models/tfjs/sentiment_cnn_v1/model.onnx",
                metadata_url:
                    "https://storage.googleapis.com/tfjs-models/tfjs/sentiment_cnn_v1/metadata.json",
                model_hash: None,
                metadata_hash: None,
            },
        }
    }
}
