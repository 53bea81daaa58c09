use std::sync::LazyLock;

use regex::Regex;

use super::UNVERIFIED_MARKER;
use crate::error::{ChronikError, Result};
use crate::models::SplitTranscript;

/// `(MM:SS)`, `(H:MM:SS)` and the same shapes in square brackets.
/// Components are matched loosely so that malformed ones surface as parse errors.
static TIMECODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\([^\n:()\[\]]{2}:[^\n:()\[\]]{2}\)|\([^\n:()\[\]]:[^\n:()\[\]]{2}:[^\n:()\[\]]{2}\)|\[[^\n:()\[\]]{2}:[^\n:()\[\]]{2}\]|\[[^\n:()\[\]]:[^\n:()\[\]]{2}:[^\n:()\[\]]{2}\]",
    )
    .unwrap()
});

/// Mid-sentence annotation timecode, e.g. `(unv., 12:34)`
static UNVERIFIED_TIMECODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(unv\., [^\n:()\[\]]{2}:[^\n:()\[\]]{2}\)").unwrap());

/// Time appended to a bracketed note, e.g. `[Anm. Transkription: lacht, 12:34]`
static TRAILING_TIMECODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r", [^\n:()\[\]]{2}:[^\n:()\[\]]{2}\]").unwrap());

/// Rewrite the two timecode anomalies that must not start a new segment
pub fn clean_timecode_anomalies(transcript: &str) -> String {
    let text = UNVERIFIED_TIMECODE_RE.replace_all(transcript, UNVERIFIED_MARKER);
    TRAILING_TIMECODE_RE.replace_all(&text, "]").into_owned()
}

/// Convert a timecode marker to seconds: `(01:23)` -> 83, `(1:02:03)` -> 3723
pub fn convert_timecode(marker: &str) -> Result<u64> {
    let inner = marker.trim_matches(|c: char| matches!(c, '(' | ')' | '[' | ']'));

    inner.split(':').try_fold(0u64, |acc, component| -> Result<u64> {
        let value: u64 =
            component
                .trim()
                .parse()
                .map_err(|_| ChronikError::InvalidTimecode {
                    marker: marker.to_string(),
                    component: component.to_string(),
                })?;
        Ok(acc * 60 + value)
    })
}

/// Split a transcript into timecoded spans.
///
/// N timecodes yield N + 1 spans; the span before the first timecode starts at 0.
/// Offsets must not decrease.
pub fn split_transcript(transcript: &str) -> Result<SplitTranscript> {
    let cleaned = clean_timecode_anomalies(transcript);

    let mut starts = vec![0u64];
    for m in TIMECODE_RE.find_iter(&cleaned) {
        let seconds = convert_timecode(m.as_str())?;
        let previous = starts.last().copied().unwrap_or(0);
        if seconds < previous {
            return Err(ChronikError::TimecodeOutOfOrder {
                marker: m.as_str().to_string(),
                seconds,
                previous,
            });
        }
        starts.push(seconds);
    }

    let segments: Vec<String> = TIMECODE_RE.split(&cleaned).map(String::from).collect();
    debug_assert_eq!(starts.len(), segments.len());

    Ok(SplitTranscript { starts, segments })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_timecode() {
        assert_eq!(convert_timecode("(01:23)").unwrap(), 83);
        assert_eq!(convert_timecode("(1:02:03)").unwrap(), 3723);
        assert_eq!(convert_timecode("[00:05]").unwrap(), 5);
    }

    #[test]
    fn test_convert_malformed_timecode() {
        let err = convert_timecode("(0a:23)").unwrap_err();
        assert!(matches!(err, ChronikError::InvalidTimecode { ref component, .. } if component == "0a"));
    }

    #[test]
    fn test_split_with_unverified_annotation() {
        let split =
            split_transcript("Hello (unv., 01:02) world (00:30) Foo said hi (01:15)").unwrap();

        assert_eq!(split.starts, vec![0, 30, 75]);
        assert_eq!(split.len(), 3);
        assert_eq!(split.segments[0], "Hello (?) world ");
        assert_eq!(split.segments[1], " Foo said hi ");
        assert_eq!(split.segments[2], "");
    }

    #[test]
    fn test_split_strips_trailing_note_time() {
        let split = split_transcript(
            "(00:00) I: Wir spielten [Anm. Transkription: lacht, 00:12] weiter. (00:40) B: Ja.",
        )
        .unwrap();

        assert_eq!(split.starts, vec![0, 0, 40]);
        assert_eq!(split.segments[0], "");
        assert_eq!(
            split.segments[1],
            " I: Wir spielten [Anm. Transkription: lacht] weiter. "
        );
    }

    #[test]
    fn test_split_hour_and_bracket_timecodes() {
        let split = split_transcript("a [59:59] b (1:00:01) c").unwrap();
        assert_eq!(split.starts, vec![0, 3599, 3601]);
        assert_eq!(split.segments, vec!["a ", " b ", " c"]);
    }

    #[test]
    fn test_split_without_timecodes() {
        let split = split_transcript("Nur Text.").unwrap();
        assert_eq!(split.starts, vec![0]);
        assert_eq!(split.segments, vec!["Nur Text."]);
    }

    #[test]
    fn test_split_rejects_malformed_component() {
        let result = split_transcript("Anfang (0x:10) Ende");
        assert!(matches!(result, Err(ChronikError::InvalidTimecode { .. })));
    }

    #[test]
    fn test_split_rejects_decreasing_offsets() {
        let result = split_transcript("a (02:00) b (01:00) c");
        assert!(matches!(
            result,
            Err(ChronikError::TimecodeOutOfOrder { seconds: 60, previous: 120, .. })
        ));
    }

    #[test]
    fn test_starts_align_with_segments() {
        let texts = [
            "",
            "(00:01)",
            "x (00:01)(00:02) y",
            "I: Hallo (00:10) B: Ja (00:20) I: Gut (1:00:00) Ende",
        ];
        for text in texts {
            let split = split_transcript(text).unwrap();
            assert_eq!(split.starts.len(), split.segments.len());
            assert!(split.starts.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
