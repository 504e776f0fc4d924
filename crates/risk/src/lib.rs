//! `isoforge-risk`
//!
//! **Responsibility:** the risk inference & assessment pipeline.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It must not depend on organization aggregates.
//! - It must not mutate domain state.
//! - It emits **risk scenarios** (insights), not domain events.
//!
//! The pipeline turns a [`SecurityFacts`] snapshot into a scored scenario
//! list, either through an external text-generation backend (whose output is
//! repaired by the sanitizer, never trusted) or through the deterministic
//! fallback generator. [`RiskInferenceEngine::run_inference`] is the only
//! entrypoint the rest of the system needs; it cannot fail outward.

pub mod client;
pub mod engine;
pub mod error;
pub mod extract;
pub mod facts;
pub mod fallback;
pub mod level;
pub mod prompt;
pub mod sanitize;
pub mod scenario;

pub use client::{AiBackendConfig, ChatCompletion, HttpChatClient};
pub use engine::RiskInferenceEngine;
pub use error::InferenceError;
pub use facts::SecurityFacts;
pub use level::{RiskLevel, combine};
pub use scenario::RiskScenario;
