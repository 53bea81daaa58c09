use std::sync::LazyLock;

use regex::Regex;

use crate::models::{CuratedTables, RawEntityMention, TypedMention};
use crate::text::{match_key, word_tokens, ELLIPSIS};

/// Single-letter speaker label, e.g. `I: ` or `B: `, at the start of a line or
/// after the sentence that ended the previous turn
static SPEAKER_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|[.?!…)]\s+)\w:\s+").unwrap());

/// Remove speaker labels so they never become part of an entity span
pub fn strip_speaker_labels(text: &str) -> String {
    SPEAKER_LABEL_RE.replace_all(text, "${1}").into_owned()
}

/// Drop spans that cross lines, contain an ellipsis or are on the ignore list
pub fn filter_mentions(mentions: &[RawEntityMention], tables: &CuratedTables) -> Vec<TypedMention> {
    mentions
        .iter()
        .filter(|m| !m.text.contains('\n') && !m.text.contains(ELLIPSIS))
        .filter_map(|m| {
            let text = m
                .text
                .trim_matches(|c: char| c == ',' || c.is_whitespace());
            if text.is_empty() || tables.is_ignored(&m.text) || tables.is_ignored(text) {
                return None;
            }
            Some(TypedMention::new(text, m.label.as_str()))
        })
        .collect()
}

/// Emit a mention for every token that is a curated alias, whether or not the
/// annotation service found it
pub fn supplement_from_aliases(text: &str, tables: &CuratedTables) -> Vec<TypedMention> {
    word_tokens(text)
        .into_iter()
        .filter_map(|token| tables.alias(&match_key(token)))
        .filter(|target| !tables.is_ignored(&target.canonical_name))
        .map(|target| TypedMention::new(target.canonical_name.as_str(), target.entity_type.as_str()))
        .collect()
}
