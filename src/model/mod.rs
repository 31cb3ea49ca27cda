//! Correction model abstraction
//!
//! The hosted language model is an opaque collaborator: it receives the
//! user's text and returns a [`CorrectionResponse`]. [`GeminiModel`] talks to
//! Google's Generative Language API; tests substitute their own
//! implementations of [`CorrectionModel`].

pub mod gemini;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::protocol::ModelError;

pub use gemini::GeminiModel;

/// Instructions sent to the model with every request
pub const SYSTEM_INSTRUCTIONS: &str = "You are a specialized assistant that helps users correct \
grammar, spelling, and phrasing mistakes in text. Your goal is to return the corrected sentence \
and an explanation of the changes. If the user provides an unrelated topic, politely state that \
you can only help with grammar or writing tasks.";

/// Structured output of the correction model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResponse {
    /// The corrected text
    pub corrected_text: String,

    /// What was changed and why
    pub explanation: String,
}

impl CorrectionResponse {
    pub fn new(corrected_text: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            corrected_text: corrected_text.into(),
            explanation: explanation.into(),
        }
    }
}

/// A model able to correct a piece of text
///
/// Implementations must be cheap to share: the service holds one instance
/// behind an `Arc` for the lifetime of the process.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CorrectionModel: Send + Sync {
    /// Model identifier, used in logs
    fn name(&self) -> &str;

    /// Correct `text`, returning the model's structured answer
    async fn correct(&self, text: &str) -> Result<CorrectionResponse, ModelError>;
}
