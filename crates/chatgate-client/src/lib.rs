//! OpenAI-compatible inference client adapter.
//!
//! Implements the `InferenceClient` port from `chatgate-core` against the
//! OpenAI REST contract served by vLLM, llama-server, and friends.

mod client;
mod sse;
pub mod wire;

pub use client::OpenAiClient;
