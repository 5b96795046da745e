//! Shared application state type.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// An Arc-wrapped [`AxumContext`] holding the settings, repositories,
/// and the inference client.
pub type AppState = Arc<AxumContext>;
