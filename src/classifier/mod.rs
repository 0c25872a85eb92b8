use std::fmt;

mod builder;
#[allow(clippy::module_inception)]
mod classifier;
mod encoder;
mod error;
mod metadata;
mod model;
mod tokenizer;

pub use builder::SentimentClassifierBuilder;
pub use classifier::SentimentClassifier;
pub use encoder::{encode, Edge, EncodeOptions, OOV_INDEX};
pub use error::{BuildError, ClassifyError, InferenceError, LoadError};
pub use metadata::Metadata;
pub use model::ModelGateway;
pub use tokenizer::tokenize;

/// Discrete sentiment label derived from the model's scalar score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Scores strictly above this are positive.
    pub const POSITIVE_THRESHOLD: f32 = 0.66;
    /// Scores strictly above this (and at most the positive threshold)
    /// are neutral; everything down to zero is negative.
    pub const NEUTRAL_THRESHOLD: f32 = 0.33;

    /// Maps a model score to a label. Returns `None` for scores outside
    /// `[0, 1]` (including NaN); those violate the model's contract and the
    /// caller must not clamp them.
    pub fn from_score(score: f32) -> Option<Self> {
        if !(0.0..=1.0).contains(&score) {
            return None;
        }
        if score > Self::POSITIVE_THRESHOLD {
            Some(Self::Positive)
        } else if score > Self::NEUTRAL_THRESHOLD {
            Some(Self::Neutral)
        } else {
            Some(Self::Negative)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one classification request. Request-scoped; callers format
/// any percentage display themselves.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Classification {
    pub label: Sentiment,
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries_are_closed() {
        // Exactly 0.66 is neutral, not positive; exactly 0.33 is neutral,
        // not negative.
        assert_eq!(Sentiment::from_score(0.66), Some(Sentiment::Neutral));
        assert_eq!(Sentiment::from_score(0.33), Some(Sentiment::Neutral));
        assert_eq!(Sentiment::from_score(0.0), Some(Sentiment::Negative));
        assert_eq!(Sentiment::from_score(1.0), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_score(0.67), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_score(0.34), Some(Sentiment::Neutral));
    }

    #[test]
    fn test_out_of_range_scores_rejected() {
        assert_eq!(Sentiment::from_score(-0.01), None);
        assert_eq!(Sentiment::from_score(1.01), None);
        assert_eq!(Sentiment::from_score(f32::NAN), None);
    }

    #[test]
    fn test_display_matches_labels() {
        assert_eq!(Sentiment::Positive.to_string(), "positive");
        assert_eq!(Sentiment::Neutral.to_string(), "neutral");
        assert_eq!(Sentiment::Negative.to_string(), "negative");
    }
}
