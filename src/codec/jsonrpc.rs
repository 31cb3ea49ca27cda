//! JSON-RPC 2.0 envelope handling
//!
//! Incoming bodies are checked in two stages. The envelope check works on the
//! raw JSON object so a malformed request can still echo back its `id`; only
//! then is the body parsed into a typed [`JsonRpcRequest`] and its `params`
//! decoded for the requested method.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::protocol::{ExecuteParams, MessageSendParams, TaskResult};

pub const JSONRPC_VERSION: &str = "2.0";

/// Envelope failed the `jsonrpc`/`id` check
pub const INVALID_REQUEST: i64 = -32600;

/// Any failure after the envelope check
pub const SERVER_ERROR: i64 = -32000;

pub const INVALID_REQUEST_MESSAGE: &str =
    "Invalid Request: jsonrpc must be '2.0' and id is required";

pub const METHOD_SEND_MESSAGE: &str = "message/send";
pub const METHOD_EXECUTE: &str = "execute";

/// JSON-RPC request identifier
///
/// Strings, numbers and null are the identifiers JSON-RPC allows. Any other
/// JSON value is kept as-is in `Other` so it can be echoed back unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum JsonRpcId {
    String(String),
    Number(serde_json::Number),
    #[default]
    Null,
    Other(Value),
}

impl JsonRpcId {
    /// Read the `id` member of a raw envelope; absent means null
    fn from_envelope(envelope: &Map<String, Value>) -> Self {
        envelope.get("id").cloned().map(Self::from).unwrap_or_default()
    }
}

impl From<Value> for JsonRpcId {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => JsonRpcId::String(s),
            Value::Number(n) => JsonRpcId::Number(n),
            Value::Null => JsonRpcId::Null,
            other => JsonRpcId::Other(other),
        }
    }
}

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,

    pub id: JsonRpcId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A request resolved to one of the supported methods
#[derive(Debug, Clone)]
pub enum RpcCall {
    /// `message/send`: a single message plus optional configuration
    SendMessage(MessageSendParams),

    /// `execute`: a batch of messages with caller-supplied ids
    Execute(ExecuteParams),

    /// Any other or missing method
    Unsupported(Option<String>),
}

impl JsonRpcRequest {
    /// Decode `params` according to `method`
    pub fn into_call(self) -> Result<RpcCall, serde_json::Error> {
        let params = self.params.unwrap_or(Value::Null);

        match self.method.as_deref() {
            Some(METHOD_SEND_MESSAGE) => serde_json::from_value(params).map(RpcCall::SendMessage),
            Some(METHOD_EXECUTE) => serde_json::from_value(params).map(RpcCall::Execute),
            _ => Ok(RpcCall::Unsupported(self.method)),
        }
    }
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,

    pub id: JsonRpcId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: JsonRpcId, result: TaskResult) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: JsonRpcId, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Failure to decode an incoming body
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// `jsonrpc` is not `"2.0"` or `id` is absent
    #[error("Invalid Request: jsonrpc must be '2.0' and id is required")]
    Malformed { id: JsonRpcId },

    /// The body is not a JSON object, or its members have the wrong types
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    #[error("request body must be a JSON object")]
    NotAnObject,
}

/// Server-side JSON-RPC codec
#[derive(Debug, Clone, Default)]
pub struct JsonRpcCodec;

impl JsonRpcCodec {
    pub fn new() -> Self {
        Self
    }

    /// Decode and validate a raw request body
    pub fn decode_request(&self, body: &[u8]) -> Result<JsonRpcRequest, EnvelopeError> {
        let value: Value = serde_json::from_slice(body)?;
        let Value::Object(envelope) = value else {
            return Err(EnvelopeError::NotAnObject);
        };

        let version_ok = envelope.get("jsonrpc").and_then(Value::as_str) == Some(JSONRPC_VERSION);
        if !version_ok || !envelope.contains_key("id") {
            return Err(EnvelopeError::Malformed {
                id: JsonRpcId::from_envelope(&envelope),
            });
        }

        Ok(serde_json::from_value(Value::Object(envelope))?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn decode(body: Value) -> Result<JsonRpcRequest, EnvelopeError> {
        JsonRpcCodec::new().decode_request(&serde_json::to_vec(&body).unwrap())
    }

    #[test]
    fn test_decode_valid_envelope() {
        let request = decode(json!({
            "jsonrpc": "2.0",
            "id": "1",
            "method": "message/send",
            "params": {"message": {"role": "user", "parts": [{"kind": "text", "text": "hi"}]}}
        }))
        .unwrap();

        assert_eq!(request.id, JsonRpcId::String("1".to_string()));
        assert_eq!(request.method.as_deref(), Some("message/send"));
        assert!(matches!(request.into_call().unwrap(), RpcCall::SendMessage(_)));
    }

    #[test]
    fn test_missing_jsonrpc_echoes_id() {
        let err = decode(json!({"id": "1", "method": "execute", "params": {}})).unwrap_err();
        match err {
            EnvelopeError::Malformed { id } => assert_eq!(id, JsonRpcId::String("1".into())),
            other => panic!("expected malformed envelope, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let err = decode(json!({"jsonrpc": "2.0", "method": "execute"})).unwrap_err();
        assert!(matches!(err, EnvelopeError::Malformed { id: JsonRpcId::Null }));
    }

    #[test]
    fn test_wrong_version_is_malformed() {
        let err = decode(json!({"jsonrpc": "1.0", "id": 7})).unwrap_err();
        match err {
            EnvelopeError::Malformed { id } => assert_eq!(id, JsonRpcId::Number(7.into())),
            other => panic!("expected malformed envelope, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_envelope_echoes_any_id() {
        let err = decode(json!({"jsonrpc": "1.0", "id": true})).unwrap_err();
        match err {
            EnvelopeError::Malformed { id } => assert_eq!(id, JsonRpcId::Other(json!(true))),
            other => panic!("expected malformed envelope, got {:?}", other),
        }

        let err = decode(json!({"id": {"seq": 4}})).unwrap_err();
        match err {
            EnvelopeError::Malformed { id } => {
                assert_eq!(serde_json::to_value(&id).unwrap(), json!({"seq": 4}))
            }
            other => panic!("expected malformed envelope, got {:?}", other),
        }
    }

    #[test]
    fn test_null_id_counts_as_present() {
        let request = decode(json!({"jsonrpc": "2.0", "id": null, "method": "execute"})).unwrap();
        assert_eq!(request.id, JsonRpcId::Null);
    }

    #[test]
    fn test_non_json_body() {
        let err = JsonRpcCodec::new().decode_request(b"not json").unwrap_err();
        assert!(matches!(err, EnvelopeError::Parse(_)));

        let err = JsonRpcCodec::new().decode_request(b"[1, 2]").unwrap_err();
        assert!(matches!(err, EnvelopeError::NotAnObject));
    }

    #[test]
    fn test_unknown_method_is_unsupported() {
        let request = decode(json!({"jsonrpc": "2.0", "id": 1, "method": "tasks/get"})).unwrap();
        match request.into_call().unwrap() {
            RpcCall::Unsupported(method) => assert_eq!(method.as_deref(), Some("tasks/get")),
            other => panic!("expected unsupported call, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_method_is_unsupported() {
        let request = decode(json!({"jsonrpc": "2.0", "id": 1})).unwrap();
        assert!(matches!(request.into_call().unwrap(), RpcCall::Unsupported(None)));
    }

    #[test]
    fn test_send_message_without_params_fails() {
        let request = decode(json!({"jsonrpc": "2.0", "id": 1, "method": "message/send"})).unwrap();
        assert!(request.into_call().is_err());
    }

    #[test]
    fn test_execute_params() {
        let request = decode(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "execute",
            "params": {"messages": [], "contextId": "ctx", "taskId": "task"}
        }))
        .unwrap();

        match request.into_call().unwrap() {
            RpcCall::Execute(params) => {
                assert!(params.messages.is_empty());
                assert_eq!(params.context_id.as_deref(), Some("ctx"));
                assert_eq!(params.task_id.as_deref(), Some("task"));
            }
            other => panic!("expected execute call, got {:?}", other),
        }
    }

    #[test]
    fn test_error_response_shape() {
        let response = JsonRpcResponse::error(JsonRpcId::Null, SERVER_ERROR, "boom");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            json!({"jsonrpc": "2.0", "id": null, "error": {"code": -32000, "message": "boom"}})
        );
    }
}
