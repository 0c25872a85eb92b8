use super::metadata::Metadata;

/// Index encoding a token the vocabulary does not know, or whose remapped
/// index exceeds the trained vocabulary size.
pub const OOV_INDEX: i64 = 2;

/// Which end of the sequence padding or truncation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    /// Operate on the front of the sequence (Keras-style default).
    #[default]
    Pre,
    /// Operate on the back of the sequence.
    Post,
}

/// Length-normalization options for [`encode`].
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// Which end to pad when the sequence is shorter than `max_len`.
    pub padding: Edge,
    /// Which end to drop from when the sequence is longer than `max_len`.
    pub truncating: Edge,
    /// Fill value used for padding.
    pub value: i64,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            padding: Edge::Pre,
            truncating: Edge::Pre,
            value: 0,
        }
    }
}

/// Maps tokens to vocabulary indices and normalizes the sequence to exactly
/// `metadata.max_len` entries.
///
/// Lookup: a known token maps to `word_index[token] + index_from`; if that
/// exceeds `vocabulary_size` it becomes [`OOV_INDEX`]. An unknown token maps
/// to [`OOV_INDEX`] directly.
///
/// Length: `truncating` drops surplus entries from the chosen end,
/// `padding` fills missing ones with `value` on the chosen end. The output
/// length is always exactly `max_len`.
pub fn encode(tokens: &[String], metadata: &Metadata, options: EncodeOptions) -> Vec<i64> {
    let mut sequence: Vec<i64> = tokens
        .iter()
        .map(|token| match metadata.word_index.get(token) {
            Some(&base) => {
                let remapped = base + metadata.index_from;
                if remapped > metadata.vocabulary_size {
                    OOV_INDEX
                } else {
                    remapped
                }
            }
            None => OOV_INDEX,
        })
        .collect();

    let max_len = metadata.max_len;
    if sequence.len() > max_len {
        match options.truncating {
            Edge::Pre => {
                sequence.drain(..sequence.len() - max_len);
            }
            Edge::Post => sequence.truncate(max_len),
        }
    } else if sequence.len() < max_len {
        let pad = vec![options.value; max_len - sequence.len()];
        match options.padding {
            Edge::Pre => {
                let mut padded = pad;
                padded.extend_from_slice(&sequence);
                sequence = padded;
            }
            Edge::Post => sequence.extend_from_slice(&pad),
        }
    }

    sequence
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn metadata(max_len: usize) -> Metadata {
        let mut word_index = HashMap::new();
        word_index.insert("a".to_string(), 1);
        word_index.insert("b".to_string(), 2);
        word_index.insert("c".to_string(), 3);
        word_index.insert("rare".to_string(), 5000);
        Metadata {
            word_index,
            index_from: 0,
            vocabulary_size: 100,
            max_len,
        }
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_pre_padding() {
        let encoded = encode(&tokens(&["a", "b"]), &metadata(5), EncodeOptions::default());
        assert_eq!(encoded, vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_post_padding() {
        let options = EncodeOptions {
            padding: Edge::Post,
            ..Default::default()
        };
        let encoded = encode(&tokens(&["a", "b"]), &metadata(5), options);
        assert_eq!(encoded, vec![1, 2, 0, 0, 0]);
    }

    #[test]
    fn test_custom_fill_value() {
        let options = EncodeOptions {
            value: 9,
            ..Default::default()
        };
        let encoded = encode(&tokens(&["a"]), &metadata(3), options);
        assert_eq!(encoded, vec![9, 9, 1]);
    }

    #[test]
    fn test_pre_truncation_keeps_most_recent() {
        let encoded = encode(&tokens(&["a", "b", "c"]), &metadata(2), EncodeOptions::default());
        assert_eq!(encoded, vec![2, 3]);
    }

    #[test]
    fn test_post_truncation_keeps_earliest() {
        let options = EncodeOptions {
            truncating: Edge::Post,
            ..Default::default()
        };
        let encoded = encode(&tokens(&["a", "b", "c"]), &metadata(2), options);
        assert_eq!(encoded, vec![1, 2]);
    }

    #[test]
    fn test_exact_length_passes_through() {
        let encoded = encode(&tokens(&["a", "b"]), &metadata(2), EncodeOptions::default());
        assert_eq!(encoded, vec![1, 2]);
    }

    #[test]
    fn test_unknown_token_is_sentinel() {
        let encoded = encode(&tokens(&["missing", "a"]), &metadata(2), EncodeOptions::default());
        assert_eq!(encoded, vec![OOV_INDEX, 1]);
    }

    #[test]
    fn test_index_above_vocabulary_size_is_sentinel() {
        let encoded = encode(&tokens(&["rare"]), &metadata(1), EncodeOptions::default());
        assert_eq!(encoded, vec![OOV_INDEX]);
    }

    #[test]
    fn test_index_from_offset_applied() {
        let mut meta = metadata(1);
        meta.index_from = 3;
        let encoded = encode(&tokens(&["a"]), &meta, EncodeOptions::default());
        assert_eq!(encoded, vec![4]);
    }

    #[test]
    fn test_length_invariant_across_option_combinations() {
        let combos = [
            (Edge::Pre, Edge::Pre),
            (Edge::Pre, Edge::Post),
            (Edge::Post, Edge::Pre),
            (Edge::Post, Edge::Post),
        ];
        let inputs = [
            tokens(&[]),
            tokens(&["a"]),
            tokens(&["a", "b", "c"]),
            tokens(&["a"; 20]),
        ];
        for max_len in [1usize, 3, 7] {
            let meta = metadata(max_len);
            for (padding, truncating) in combos {
                for input in &inputs {
                    let options = EncodeOptions {
                        padding,
                        truncating,
                        value: 0,
                    };
                    assert_eq!(encode(input, &meta, options).len(), max_len);
                }
            }
        }
    }
}
