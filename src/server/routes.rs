//! Request handlers

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tower::ServiceExt;
use tracing::{debug, warn};

use crate::{
    codec::{JsonRpcCodec, JsonRpcResponse, RpcCall},
    server::error::RpcFailure,
    service::{CorrectionRequest, CorrectionService},
};

/// State shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: CorrectionService,
    pub codec: JsonRpcCodec,
}

impl AppState {
    pub fn new(service: CorrectionService) -> Self {
        Self {
            service,
            codec: JsonRpcCodec::new(),
        }
    }
}

/// `POST /a2a/grammar-check`
pub async fn grammar_check(State(state): State<AppState>, body: Bytes) -> Response {
    match handle(&state, &body).await {
        Ok(response) => Json(response).into_response(),
        Err(failure) => {
            warn!(code = failure.code(), error = %failure, "grammar check rejected");
            failure.into_response()
        }
    }
}

/// Decode, dispatch and answer one JSON-RPC request
pub async fn handle(state: &AppState, body: &[u8]) -> Result<JsonRpcResponse, RpcFailure> {
    let request = state.codec.decode_request(body)?;
    let id = request.id.clone();

    let call = request.into_call()?;
    if let RpcCall::Unsupported(method) = &call {
        debug!(?method, "no messages for method");
    }

    let task = state
        .service
        .clone()
        .oneshot(CorrectionRequest::from(call))
        .await?;

    Ok(JsonRpcResponse::success(id, task))
}
