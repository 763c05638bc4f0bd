pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod parsing;
pub mod service;
pub mod tasks;
pub mod workflow;

#[cfg(test)]
mod test_utils;

pub use config::{PacingPolicy, ServiceConfig};
pub use error::{ConfigError, GenerationError, ValidationError};
pub use llm::{ChatModel, ChatRequest, OpenRouterChat};
pub use models::*;
pub use service::{AppState, build_router, create_app};
pub use workflow::ArticleWorkflow;
