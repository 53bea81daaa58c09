/// Punctuation split off the edges of a whitespace-delimited chunk
const EDGE_PUNCTUATION: &[char] = &[
    ',', '.', '!', '?', ';', ':', '(', ')', '[', ']', '"', '\'', '„', '“', '”', '«', '»', '‚', '‘',
    '’', '…',
];

/// Split text into word tokens for lexical matching
pub fn word_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|chunk| chunk.trim_matches(EDGE_PUNCTUATION))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Token form used for alias lookups: commas stripped, case-folded
pub fn match_key(token: &str) -> String {
    token.trim_matches(',').to_lowercase()
}
