//! User text extraction

use crate::protocol::{CorrectionError, CorrectionResult, Message};

/// Resolve the text to correct from a conversation
///
/// The last message is the user turn. Its first `text` part, trimmed, is the
/// text; later text parts and parts of other kinds are ignored.
pub fn user_text(messages: &[Message]) -> CorrectionResult<&str> {
    let last = messages.last().ok_or_else(CorrectionError::no_message)?;

    match last.first_text().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(CorrectionError::no_text()),
    }
}
