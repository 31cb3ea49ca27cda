//! Wire codecs for the agent's request/response binding

pub mod jsonrpc;

pub use jsonrpc::{
    EnvelopeError, JsonRpcCodec, JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse,
    RpcCall,
};
