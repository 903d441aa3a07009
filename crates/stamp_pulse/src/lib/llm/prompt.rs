use std::sync::LazyLock;

use another_tiktoken_rs::CoreBPE;

static CL100K_TOKENIZER: LazyLock<Option<CoreBPE>> = LazyLock::new(|| {
    another_tiktoken_rs::cl100k_base()
        .inspect_err(|e| tracing::warn!(error = %e, "Failed to load cl100k tokenizer"))
        .ok()
});

fn tokenizer() -> Option<&'static CoreBPE> {
    CL100K_TOKENIZER.as_ref()
}

/// What the model gets to see about a video
#[derive(Debug)]
pub struct VideoContext<'a> {
    pub video_id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub annotated_transcript: &'a str,
}

impl VideoContext<'_> {
    /// Renders the user message. The transcript goes last, so trimming to a
    /// token budget only cuts transcript lines
    pub fn to_user_content(&self) -> String {
        format!(
            "\nVideo ID: {}\nVideo Title: {}\n\nDescription:\n{}\n\nTranscript:\n{}\n",
            self.video_id, self.title, self.description, self.annotated_transcript
        )
    }
}

pub fn count_tokens(text: &str) -> Option<usize> {
    tokenizer().map(|bpe| bpe.encode_with_special_tokens(text).len())
}

/// Keeps the first `limit` tokens of `text`.
///
/// If the tokenizer cannot be loaded the text is returned untouched.
pub fn truncate_to_token_limit(text: &str, limit: usize) -> String {
    let Some(bpe) = tokenizer() else {
        return text.to_string();
    };

    let tokens = bpe.encode_with_special_tokens(text);
    if tokens.len() <= limit {
        return text.to_string();
    }

    tracing::warn!(
        tokens = tokens.len(),
        limit,
        "Content exceeds the context window; trimming transcript tail"
    );
    bpe.decode(tokens[..limit].to_vec())
        .unwrap_or_else(|_| text.chars().take(limit * 3).collect())
}
