//! Axum HTTP adapter for chatgate.
//!
//! Exposes the gateway API: chat completions (plain and streamed), chat
//! session CRUD, generation presets, model listing, and health probes.
//! All infrastructure is wired together in [`bootstrap`]; handlers only
//! see the shared [`AppState`].

pub mod auth;
pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
