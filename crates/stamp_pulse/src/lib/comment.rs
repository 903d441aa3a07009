use stamp_datastore::Segment;

pub const COMMENT_HEADER: &str = "📋 Here's timestamps:\n\n";

/// Comment body length (in characters) kept before the truncation suffix
pub const COMMENT_BODY_LIMIT: usize = 950;

pub const TRUNCATION_SUFFIX: &str = "\n...(truncated for YouTube limit)";

/// Renders the segments as a single comment, keeping it under YouTube's
/// 1000 character limit.
///
/// Past [`COMMENT_BODY_LIMIT`] characters the text is cut, possibly mid-line,
/// and [`TRUNCATION_SUFFIX`] is appended.
pub fn format_comment(segments: &[Segment]) -> String {
    let mut comment = String::from(COMMENT_HEADER);
    for segment in segments {
        comment.push_str(&format!("{} - {}\n", segment.time, segment.title));
    }

    if comment.chars().count() > COMMENT_BODY_LIMIT {
        comment = comment.chars().take(COMMENT_BODY_LIMIT).collect();
        comment.push_str(TRUNCATION_SUFFIX);
    }

    comment
}
