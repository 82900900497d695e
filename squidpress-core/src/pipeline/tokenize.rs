//! Line tokenization.

/// Splits one raw line into its non-empty space-separated tokens.
///
/// Trailing whitespace (including the newline) is stripped first; runs of
/// consecutive spaces collapse into a single boundary. Any line tokenizes,
/// an empty one into an empty list.
pub fn tokenize(line: &str) -> Vec<String> {
    line.trim_end()
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
