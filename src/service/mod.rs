//! Correction service

pub mod core;
pub mod extract;
pub mod request;

pub use self::core::CorrectionService;
pub use request::CorrectionRequest;
