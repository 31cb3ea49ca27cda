//! Task result types and request parameters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::Message;

/// The outcome record of a single correction request
///
/// A task result is assembled fresh for every request and discarded once the
/// response has been written. It is never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    /// Task identifier
    pub id: String,

    /// Conversation identifier
    pub context_id: String,

    /// Final status of the task
    pub status: TaskStatus,

    /// Input messages followed by the agent reply, in chronological order
    pub history: Vec<Message>,

    /// Object discriminator, always `"task"`
    #[serde(default = "task_kind")]
    pub kind: String,
}

fn task_kind() -> String {
    "task".to_string()
}

impl TaskResult {
    /// Create a completed task whose status message is `reply`
    pub fn completed(
        id: impl Into<String>,
        context_id: impl Into<String>,
        reply: Message,
        history: Vec<Message>,
    ) -> Self {
        Self {
            id: id.into(),
            context_id: context_id.into(),
            status: TaskStatus::new(TaskState::Completed).with_message(reply),
            history,
            kind: task_kind(),
        }
    }

    /// Check if the task is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.state.is_terminal()
    }
}

/// Status of a task: its state plus the message that produced it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    pub state: TaskState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TaskStatus {
    /// Create a status stamped with the current time
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            message: None,
            timestamp: Some(Utc::now()),
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }
}

/// Task lifecycle state
///
/// The grammar agent only ever reports `completed`; the remaining states are
/// kept so results from other agents in the same conversation deserialize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Submitted,
    Working,
    InputRequired,
    Completed,
    Canceled,
    Failed,
    Rejected,
    AuthRequired,
    Unknown,
}

impl TaskState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Canceled | TaskState::Rejected
        )
    }
}

/// Optional configuration accompanying a `message/send` request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_output_modes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocking: Option<bool>,
}

/// Params of the `message/send` method
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSendParams {
    pub message: Message,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<MessageConfiguration>,
}

/// Params of the `execute` method
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteParams {
    #[serde(default)]
    pub messages: Vec<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_completed_task() {
        let reply = Message::agent("fixed");
        let task = TaskResult::completed(
            "task-1",
            "ctx-1",
            reply.clone(),
            vec![Message::user("broke"), reply],
        );

        assert_eq!(task.status.state, TaskState::Completed);
        assert!(task.is_terminal());
        assert!(task.status.timestamp.is_some());
        assert_eq!(task.history.len(), 2);
        assert_eq!(task.kind, "task");
    }

    #[test]
    fn test_task_state_kebab_case() {
        assert_eq!(
            serde_json::to_value(TaskState::InputRequired).unwrap(),
            "input-required"
        );
        assert_eq!(serde_json::to_value(TaskState::Completed).unwrap(), "completed");
        assert!(!TaskState::Working.is_terminal());
    }

    #[test]
    fn test_execute_params_defaults() {
        let params: ExecuteParams = serde_json::from_value(json!({})).unwrap();
        assert!(params.messages.is_empty());
        assert!(params.context_id.is_none());
        assert!(params.task_id.is_none());
    }

    #[test]
    fn test_message_send_params_with_configuration() {
        let params: MessageSendParams = serde_json::from_value(json!({
            "message": {"role": "user", "parts": [{"kind": "text", "text": "hi"}]},
            "configuration": {"acceptedOutputModes": ["text/plain"], "blocking": true}
        }))
        .unwrap();

        let config = params.configuration.unwrap();
        assert_eq!(config.accepted_output_modes, Some(vec!["text/plain".to_string()]));
        assert_eq!(config.blocking, Some(true));
        assert_eq!(config.history_length, None);
    }
}
