//! JSON-RPC error envelopes for the HTTP boundary

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    codec::{
        jsonrpc::{INVALID_REQUEST, INVALID_REQUEST_MESSAGE, SERVER_ERROR},
        EnvelopeError, JsonRpcId, JsonRpcResponse,
    },
    protocol::CorrectionError,
};

/// A request that could not be answered with a task result
#[derive(Debug, thiserror::Error)]
pub enum RpcFailure {
    /// `jsonrpc`/`id` check failed; answered with 400 and the echoed id
    #[error("{}", INVALID_REQUEST_MESSAGE)]
    MalformedEnvelope { id: JsonRpcId },

    /// Anything else; answered with 500 and a null id
    #[error("{0}")]
    Internal(String),
}

impl RpcFailure {
    pub fn status(&self) -> StatusCode {
        match self {
            RpcFailure::MalformedEnvelope { .. } => StatusCode::BAD_REQUEST,
            RpcFailure::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            RpcFailure::MalformedEnvelope { .. } => INVALID_REQUEST,
            RpcFailure::Internal(_) => SERVER_ERROR,
        }
    }

    /// The JSON-RPC body written for this failure
    pub fn to_response(&self) -> JsonRpcResponse {
        let id = match self {
            RpcFailure::MalformedEnvelope { id } => id.clone(),
            RpcFailure::Internal(_) => JsonRpcId::Null,
        };
        JsonRpcResponse::error(id, self.code(), self.to_string())
    }
}

impl From<EnvelopeError> for RpcFailure {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Malformed { id } => RpcFailure::MalformedEnvelope { id },
            other => RpcFailure::Internal(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for RpcFailure {
    fn from(err: serde_json::Error) -> Self {
        RpcFailure::Internal(err.to_string())
    }
}

// Input errors share the internal-error envelope with model failures.
impl From<CorrectionError> for RpcFailure {
    fn from(err: CorrectionError) -> Self {
        RpcFailure::Internal(err.to_string())
    }
}

impl IntoResponse for RpcFailure {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_malformed_envelope_body() {
        let failure = RpcFailure::MalformedEnvelope {
            id: JsonRpcId::String("1".to_string()),
        };

        assert_eq!(failure.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(failure.to_response()).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": "1",
                "error": {
                    "code": -32600,
                    "message": "Invalid Request: jsonrpc must be '2.0' and id is required"
                }
            })
        );
    }

    #[test]
    fn test_invalid_input_is_internal() {
        let failure = RpcFailure::from(CorrectionError::no_text());

        assert_eq!(failure.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::to_value(failure.to_response()).unwrap();
        assert_eq!(body["id"], json!(null));
        assert_eq!(body["error"]["code"], -32000);
        assert_eq!(body["error"]["message"], "No text provided");
    }
}
