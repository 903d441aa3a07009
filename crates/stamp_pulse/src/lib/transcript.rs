//! Turns timed captions into the `[mm:ss] text` block handed to the language model.

use itertools::Itertools;
use stamp_datastore::CaptionEntry;

/// Formats an offset in seconds as `MM:SS`.
///
/// Both fields are floored and zero-padded to two digits; minutes are not
/// rolled over into hours, so an offset of 2h renders as `120:00`.
pub fn format_timestamp(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as i64;
    let secs = seconds.rem_euclid(60.0).floor() as i64;
    format!("{minutes:02}:{secs:02}")
}

/// Renders every caption as `[MM:SS] text`, one per line, in transcript order
pub fn annotate_transcript(captions: &[CaptionEntry]) -> String {
    captions
        .iter()
        .map(|entry| format!("[{}] {}", format_timestamp(entry.start), entry.text))
        .join("\n")
}
