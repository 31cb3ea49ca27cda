//! Correction service implementation

use std::{
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use futures::future::BoxFuture;
use tower_service::Service;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
    model::CorrectionModel,
    protocol::{
        CorrectionError, CorrectionResult, Message, MessagePart, ModelError, Role, TaskResult,
    },
    service::{extract, CorrectionRequest},
};

/// Turns a conversation into a completed correction task
///
/// The service is read-only after construction and cheap to clone; every
/// clone shares the same model handle. It implements the Tower `Service`
/// trait so it can be driven with `ServiceExt` like any other service.
#[derive(Clone)]
pub struct CorrectionService {
    model: Arc<dyn CorrectionModel>,
    timeout: Duration,
}

impl CorrectionService {
    /// Bound applied to each model call unless overridden
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(model: Arc<dyn CorrectionModel>) -> Self {
        Self {
            model,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Set the model call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Correct the latest user turn of `request` and assemble the task result
    ///
    /// # Errors
    ///
    /// Returns [`CorrectionError::InvalidInput`] before touching the model when
    /// there is no message or no usable text, and [`CorrectionError::Internal`]
    /// when the model call fails, times out, or its output cannot be serialized.
    pub async fn process(&self, request: CorrectionRequest) -> CorrectionResult<TaskResult> {
        let CorrectionRequest {
            messages,
            context_id,
            task_id,
            configuration,
        } = request;

        let context_id = id_or_new(context_id);
        let task_id = id_or_new(task_id);

        if let Some(configuration) = &configuration {
            debug!(task_id = %task_id, ?configuration, "message configuration supplied");
        }

        let text = extract::user_text(&messages)?;
        debug!(task_id = %task_id, bytes = text.len(), "requesting correction");

        let correction = match tokio::time::timeout(self.timeout, self.model.correct(text)).await
        {
            Ok(Ok(correction)) => correction,
            Ok(Err(err)) => return Err(Self::failed(&task_id, err.into())),
            Err(_) => {
                let err = ModelError::Timeout(self.timeout.as_secs());
                return Err(Self::failed(&task_id, err.into()));
            }
        };

        let reply_text = serde_json::to_string(&correction)
            .map_err(|err| Self::failed(&task_id, CorrectionError::internal(err)))?;

        let reply = Message::builder()
            .role(Role::Agent)
            .part(MessagePart::text(reply_text))
            .message_id(Uuid::new_v4().to_string())
            .task_id(task_id.as_str())
            .context_id(context_id.as_str())
            .build();

        let mut history = messages;
        history.push(reply.clone());

        info!(
            task_id = %task_id,
            context_id = %context_id,
            history = history.len(),
            "correction completed"
        );

        Ok(TaskResult::completed(task_id, context_id, reply, history))
    }

    fn failed(task_id: &str, err: CorrectionError) -> CorrectionError {
        error!(task_id = %task_id, error = %err, "correction failed");
        err
    }
}

/// Use the caller's id unless it is missing or empty
fn id_or_new(id: Option<String>) -> String {
    id.filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

impl Service<CorrectionRequest> for CorrectionService {
    type Response = TaskResult;
    type Error = CorrectionError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // No admission control
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: CorrectionRequest) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { service.process(request).await })
    }
}

impl std::fmt::Debug for CorrectionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorrectionService")
            .field("timeout", &self.timeout)
            .finish()
    }
}
