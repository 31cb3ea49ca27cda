//! Correction service request type

use crate::{
    codec::RpcCall,
    protocol::{Message, MessageConfiguration},
};

/// A request to the correction service
///
/// Built by the router from a decoded JSON-RPC call. Empty identifiers are
/// treated the same as missing ones.
#[derive(Debug, Clone, Default)]
pub struct CorrectionRequest {
    /// Conversation, oldest first; the last message is the user turn
    pub messages: Vec<Message>,

    /// Caller-supplied conversation id
    pub context_id: Option<String>,

    /// Caller-supplied task id
    pub task_id: Option<String>,

    /// Pass-through configuration from `message/send`
    pub configuration: Option<MessageConfiguration>,
}

impl CorrectionRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }
}

impl From<RpcCall> for CorrectionRequest {
    fn from(call: RpcCall) -> Self {
        match call {
            // Ids carried inside the message are not reused; the service mints new ones.
            RpcCall::SendMessage(params) => Self {
                messages: vec![params.message],
                context_id: None,
                task_id: None,
                configuration: params.configuration,
            },
            RpcCall::Execute(params) => Self {
                messages: params.messages,
                context_id: params.context_id,
                task_id: params.task_id,
                configuration: None,
            },
            RpcCall::Unsupported(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ExecuteParams, MessageSendParams};

    #[test]
    fn test_send_message_ignores_message_ids() {
        let mut message = Message::user("hi");
        message.context_id = Some("stale-ctx".to_string());
        message.task_id = Some("stale-task".to_string());

        let request = CorrectionRequest::from(RpcCall::SendMessage(MessageSendParams {
            message,
            configuration: Some(MessageConfiguration::default()),
        }));

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].task_id.as_deref(), Some("stale-task"));
        assert!(request.context_id.is_none());
        assert!(request.task_id.is_none());
        assert!(request.configuration.is_some());
    }

    #[test]
    fn test_execute_passes_batch_through() {
        let request = CorrectionRequest::from(RpcCall::Execute(ExecuteParams {
            messages: vec![Message::user("a"), Message::agent("b"), Message::user("c")],
            context_id: Some("ctx".to_string()),
            task_id: Some("task".to_string()),
        }));

        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.task_id.as_deref(), Some("task"));
    }

    #[test]
    fn test_unsupported_is_empty() {
        let request = CorrectionRequest::from(RpcCall::Unsupported(Some("tasks/get".into())));
        assert!(request.messages.is_empty());
    }
}
