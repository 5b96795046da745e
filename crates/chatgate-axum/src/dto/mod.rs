//! Request and response bodies for the gateway API.
//!
//! DTOs are kept separate from the core domain types so the wire contract
//! can evolve without touching the ports. Conversions into domain types
//! live next to the DTOs.

pub mod chat;
pub mod completion;
pub mod llm_config;
pub mod system;

use serde::Deserialize;

/// Common pagination query parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}
