//! Core protocol types: messages, tasks and errors

pub mod error;
pub mod message;
pub mod task;

pub use error::{CorrectionError, CorrectionResult, ModelError};
pub use message::{FileContent, Message, MessageBuilder, MessagePart, Role};
pub use task::{
    ExecuteParams, MessageConfiguration, MessageSendParams, TaskResult, TaskState, TaskStatus,
};
