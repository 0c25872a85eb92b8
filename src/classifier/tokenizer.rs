/// Splits a raw remark into the surface tokens the pretrained vocabulary
/// was built against. The normalization must match the training pipeline
/// exactly: trim, lowercase, strip `.` `,` `!`, then split on single
/// spaces. Runs of spaces deliberately yield empty-string tokens and an
/// empty input yields one empty-string token; the encoder maps those to
/// the out-of-vocabulary sentinel downstream.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '!'))
        .collect();

    normalized.split(' ').map(str::to_owned).collect()
}
