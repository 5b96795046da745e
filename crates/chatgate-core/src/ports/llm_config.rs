//! Generation-preset repository port definition.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::llm_config::{LlmConfig, NewLlmConfig};

/// Errors that can occur in preset operations.
#[derive(Debug, Error)]
pub enum LlmConfigError {
    #[error("LLM config not found: {0}")]
    NotFound(i64),

    #[error("LLM config name already exists: {0}")]
    DuplicateName(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Port for preset persistence operations.
#[async_trait]
pub trait LlmConfigRepository: Send + Sync {
    /// Insert a preset. A unique-name violation maps to
    /// [`LlmConfigError::DuplicateName`].
    async fn create(&self, config: NewLlmConfig) -> Result<LlmConfig, LlmConfigError>;

    /// List all presets, ordered by name.
    async fn list(&self) -> Result<Vec<LlmConfig>, LlmConfigError>;

    /// Get a preset by id.
    async fn get(&self, id: i64) -> Result<Option<LlmConfig>, LlmConfigError>;

    /// Delete a preset by id. Returns whether a row was actually deleted.
    async fn delete(&self, id: i64) -> Result<bool, LlmConfigError>;
}
