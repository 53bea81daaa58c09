use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use super::{ELLIPSIS, UNVERIFIED_MARKER};

static SPACE_BEFORE_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.])").unwrap());
static WORD_ELLIPSIS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w)…").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Configuration for segment text cleanup
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Opening of a transcriber's bracketed note; replaced by `(`
    pub note_prefix: String,
    /// Placeholders for passages the transcriber could not verify
    pub unverified_markers: Vec<String>,
    /// Remove unverified placeholders instead of unifying them to `(?)`
    pub drop_unverified: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            note_prefix: "[Anm. Transkription:".to_string(),
            unverified_markers: vec!["(unv.)".to_string(), UNVERIFIED_MARKER.to_string()],
            drop_unverified: true,
        }
    }
}

/// Match a literal allowing the spacing variants the later cleanup steps erase:
/// any whitespace run for a space, optional whitespace before `.` and `,`.
fn spacing_tolerant(literal: &str) -> Regex {
    let mut pattern = String::new();
    let mut in_space = false;
    for c in literal.chars() {
        if c.is_whitespace() {
            if !in_space {
                pattern.push_str(r"\s+");
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if matches!(c, '.' | ',') {
            pattern.push_str(r"\s*");
        }
        pattern.push_str(&regex::escape(&c.to_string()));
    }
    Regex::new(&pattern).expect("escaped literal is a valid pattern")
}

/// Clean one segment's text.
///
/// Bracket notes and unverified markers are rewritten until none is left, matching
/// them through any spacing that whitespace cleanup would later canonicalize. The
/// result is a fixed point: normalizing it again changes nothing.
pub fn normalize_text(text: &str, config: &NormalizerConfig) -> String {
    let note = (!config.note_prefix.trim().is_empty()).then(|| spacing_tolerant(&config.note_prefix));
    let markers: Vec<Regex> = config
        .unverified_markers
        .iter()
        .filter(|m| !m.trim().is_empty())
        .filter(|m| config.drop_unverified || m.as_str() != UNVERIFIED_MARKER)
        .map(|m| spacing_tolerant(m))
        .collect();
    let marker_replacement = if config.drop_unverified { " " } else { UNVERIFIED_MARKER };

    // Each rewrite can expose another (a removed marker joins the pieces of a note prefix)
    let mut text = text.replace(']', ")");
    loop {
        let before = text.len();
        if let Some(note) = &note {
            text = note.replace_all(&text, NoExpand("(")).into_owned();
        }
        for marker in &markers {
            text = marker.replace_all(&text, NoExpand(marker_replacement)).into_owned();
        }
        if text.len() >= before {
            break;
        }
    }

    let text = SPACE_BEFORE_PUNCT_RE.replace_all(&text, "$1");
    let text = text.replace("...", &ELLIPSIS.to_string());
    let text = WORD_ELLIPSIS_RE.replace_all(&text, "$1 …");
    let text = WHITESPACE_RE.replace_all(&text, " ");

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        normalize_text(text, &NormalizerConfig::default())
    }

    #[test]
    fn test_ellipsis_gets_leading_space() {
        assert_eq!(normalize("Und dann... ja"), "Und dann … ja");
        assert_eq!(normalize("Und dann ... ja"), "Und dann … ja");
        assert_eq!(normalize("…so war das"), "…so war das");
    }

    #[test]
    fn test_transcription_note_becomes_parenthetical() {
        assert_eq!(
            normalize("Wir spielten [Anm. Transkription: lacht] weiter."),
            "Wir spielten ( lacht) weiter."
        );
    }

    #[test]
    fn test_unverified_markers_removed() {
        assert_eq!(normalize("Das war (unv.) in Bern (?) ."), "Das war in Bern.");
    }

    #[test]
    fn test_unverified_markers_kept_when_configured() {
        let config = NormalizerConfig {
            drop_unverified: false,
            ..Default::default()
        };
        assert_eq!(normalize_text("in (unv.) Bern", &config), "in (?) Bern");
    }

    #[test]
    fn test_wrapped_note_and_spaced_marker() {
        assert_eq!(
            normalize("Wir [Anm.\nTranskription: lacht] weiter"),
            "Wir ( lacht) weiter"
        );
        assert_eq!(normalize("in (unv .) Bern"), "in Bern");

        let config = NormalizerConfig {
            drop_unverified: false,
            ..Default::default()
        };
        assert_eq!(normalize_text("in (unv .) Bern", &config), "in (?) Bern");
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        assert_eq!(normalize("  I: Hallo,\n\n  B:   Ja ,  gut .  "), "I: Hallo, B: Ja, gut.");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "Und dann... ja",
            "Wir spielten [Anm. Transkription: lacht] weiter...",
            ". (?) . .",
            "((?)?) Text",
            "a......b",
            "\n I: Ich war (unv.) am Schauspielhaus , oder ... ?\n",
            "Wir [Anm.\nTranskription: lacht] weiter",
            "in (unv .) Bern",
            "in (unv\n.) Bern [Anm . Transkription :x]",
            "[Anm.(?) Transkription: Pause]",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
