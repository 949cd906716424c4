//! relevance-engine: Headless core of the review relevance client
//!
//! This crate provides everything except the terminal surface:
//! - Configuration (API base resolution)
//! - Review input validation
//! - HTTP client for the classification service
//! - The session-scoped conversation log and submission state machine

pub mod client;
pub mod config;
pub mod conversation;
pub mod review;
pub mod session;

// Re-export commonly used types
pub use client::{ApiClient, Classifier, ClientError, HealthStatus, PredictionResult};
pub use config::{Config, ConfigError, API_BASE_ENV, CONFIG_PATH};
pub use conversation::{Conversation, Entry, Role};
pub use review::{example_review_text, parse_review, Review, ValidationError, EXAMPLE_REVIEW};
pub use session::{
    format_verdict, HealthState, PendingSubmission, Phase, Session, SubmitError, USER_ENTRY_LABEL,
};
pub use uuid::Uuid;

