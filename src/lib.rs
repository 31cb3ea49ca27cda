//! # Grammar Agent
//!
//! A single-endpoint JSON-RPC service that corrects grammar with a hosted
//! language model.
//!
//! A request arrives at `POST /a2a/grammar-check` as a JSON-RPC 2.0 envelope.
//! The router validates the envelope, resolves the conversation from either a
//! `message/send` or an `execute` call, and hands it to the
//! [`CorrectionService`](service::CorrectionService). The service picks the
//! text of the latest user turn, asks the [`CorrectionModel`](model::CorrectionModel)
//! for a structured correction, and returns a completed task whose history
//! ends with the agent's reply.
//!
//! Nothing is persisted between requests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use grammar_agent::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AgentConfig::from_env();
//!     let model = GeminiModel::new(config.model.clone(), config.api_key.clone());
//!     let service = CorrectionService::new(Arc::new(model))
//!         .with_timeout(config.model_timeout);
//!
//!     grammar_agent::server::serve(&config, service).await?;
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod model;
pub mod protocol;
pub mod server;
pub mod service;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        config::AgentConfig,
        model::{CorrectionModel, CorrectionResponse, GeminiModel},
        protocol::{
            CorrectionError, Message, MessagePart, ModelError, Role, TaskResult, TaskState,
            TaskStatus,
        },
        service::{CorrectionRequest, CorrectionService},
    };
}
