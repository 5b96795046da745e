//! Named, reusable generation-parameter presets.

use serde::{Deserialize, Serialize};

/// A stored generation preset.
///
/// `name` is unique. More than one preset may carry `is_default` - the
/// schema does not enforce a single default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub id: i64,
    pub name: String,
    pub model_name: String,
    pub system_prompt: Option<String>,
    pub temperature: f64,
    pub max_tokens: i64,
    pub top_p: f64,
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a preset. Defaults are applied by the API layer
/// before this struct is built.
#[derive(Debug, Clone)]
pub struct NewLlmConfig {
    pub name: String,
    pub model_name: String,
    pub system_prompt: Option<String>,
    pub temperature: f64,
    pub max_tokens: i64,
    pub top_p: f64,
    pub is_default: bool,
}
