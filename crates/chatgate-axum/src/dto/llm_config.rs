//! Generation-preset DTOs.

use serde::Deserialize;

use chatgate_core::domain::llm_config::NewLlmConfig;

use super::completion::{check_ranges, default_temperature, default_top_p};

fn default_max_tokens() -> i64 {
    512
}

/// Request body for creating a preset.
///
/// `name` and `model_name` are required; missing fields are a 422 at the
/// extractor level. Generation parameters fall back to the engine defaults.
#[derive(Debug, Deserialize)]
pub struct CreateLlmConfigRequest {
    pub name: String,
    pub model_name: String,
    pub system_prompt: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: i64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default)]
    pub is_default: bool,
}

impl CreateLlmConfigRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".into());
        }
        if self.model_name.trim().is_empty() {
            return Err("model_name must not be empty".into());
        }
        check_ranges(self.temperature, self.top_p, self.max_tokens)
    }
}

impl From<CreateLlmConfigRequest> for NewLlmConfig {
    fn from(req: CreateLlmConfigRequest) -> Self {
        Self {
            name: req.name,
            model_name: req.model_name,
            system_prompt: req.system_prompt,
            temperature: req.temperature,
            max_tokens: req.max_tokens,
            top_p: req.top_p,
            is_default: req.is_default,
        }
    }
}
