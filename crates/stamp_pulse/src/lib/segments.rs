//! Reads the language model's free-form reply.
//!
//! The reply either lists `mm:ss - Title` lines, one per topic of the video, or
//! carries [`NOT_TOP_X_SENTINEL`] when the video covers a single subject.

use stamp_datastore::Segment;

/// Exact phrase marking a single-subject video
pub const NOT_TOP_X_SENTINEL: &str = "This is not a Top X video";

/// Reply the model gives when it found no segments; still counts as Top X
pub const NO_SEGMENTS_REPLY: &str = "No clear topic or game segments detected.";

const SEGMENT_SEPARATOR: &str = " - ";
const ECHOED_EXAMPLE_PREFIX: &str = "Example";

/// Decides whether the reply describes a multi-segment ("Top X") video.
///
/// A missing or empty reply is treated as Top X. The processor never reaches
/// this with a missing reply, since a failed model call stops the run first.
pub fn is_top_x(response: Option<&str>) -> bool {
    match response {
        Some(text) if !text.is_empty() => !text.contains(NOT_TOP_X_SENTINEL),
        _ => true,
    }
}

/// Extracts `time - title` pairs from the reply, in the order they appear.
///
/// Lines without the ` - ` separator, and lines echoing the prompt's
/// `Example Output:` block, are skipped. Only the first separator splits a
/// line, so titles keep their own dashes. Times are not validated.
pub fn parse_segments(response: Option<&str>) -> Vec<Segment> {
    let Some(text) = response else {
        return Vec::new();
    };

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(ECHOED_EXAMPLE_PREFIX))
        .filter_map(|line| line.split_once(SEGMENT_SEPARATOR))
        .map(|(time, title)| Segment::new(time.trim(), title.trim()))
        .collect()
}
