use reroute_core::CanonicalPath;

/// Path tokenizer for scoring: strips a trailing file extension, splits on
/// `/`, `-`, and `_`, and drops empty segments.
pub struct Tokenizer;

impl Tokenizer {
    /// Tokenize a canonical path into an ordered token sequence.
    ///
    /// Order is hierarchy-significant and preserved; the invalid sentinel
    /// and the site root both tokenize to an empty sequence. Tokens are
    /// already lowercase because canonical paths are.
    pub fn tokenize(path: &CanonicalPath) -> Vec<String> {
        let trimmed = path.as_str().trim_end_matches('/');
        let stem = strip_extension(trimmed);

        stem.split(['/', '-', '_'])
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Remove one trailing `.ext` where `ext` is a non-empty run of word
/// characters. Interior dots are part of their segment and stay.
fn strip_extension(s: &str) -> &str {
    match s.rfind('.') {
        Some(i) if i + 1 < s.len() && s[i + 1..].bytes().all(is_word_byte) => &s[..i],
        _ => s,
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
