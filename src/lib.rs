//! Muninn - Document AI execution engine
//!
//! This crate decides which provider tier serves each document-processing
//! operation, bounds input to per-operation token budgets, caches results
//! by content fingerprint, retries transient provider failures with
//! exponential backoff plus a single fallback attempt, and normalizes raw
//! model output into typed result shapes.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use muninn::{ExecuteRequest, Muninn, OpenAiCompatProvider, Tier};
//!
//! #[tokio::main]
//! async fn main() -> muninn::Result<()> {
//!     let openai = Arc::new(OpenAiCompatProvider::new(
//!         "openai",
//!         "https://api.openai.com/v1",
//!         "sk-your-key",
//!     ));
//!     let anthropic = Arc::new(OpenAiCompatProvider::new(
//!         "anthropic",
//!         "https://gateway.example.com/anthropic/v1",
//!         "sk-ant-your-key",
//!     ));
//!
//!     let engine = Muninn::builder()
//!         .provider(Tier::Simple, openai.clone())
//!         .provider(Tier::Medium, openai)
//!         .provider(Tier::Complex, anthropic)
//!         .build()?;
//!     let _sweeper = engine.start_cache_sweeper();
//!
//!     let response = engine
//!         .execute(
//!             ExecuteRequest::new("SUMMARY_SHORT", "Plain text of the document...")
//!                 .paid(true),
//!         )
//!         .await?;
//!
//!     println!("{} (${:.4})", response.content, response.cost);
//!     Ok(())
//! }
//! ```

pub mod budget;
pub mod cache;
pub mod engine;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod registry;
pub mod routing;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use engine::{Engine, Muninn, MuninnBuilder};
pub use error::{MuninnError, Result};
pub use executor::RetryConfig;
pub use providers::{GenerateOutput, ModelProvider, OpenAiCompatProvider, ProviderUsage};

// Re-export all types
pub use cache::{CacheConfig, ResponseCache};
pub use metrics::{EngineMetrics, MetricsSnapshot, TierCounts};
pub use registry::{OperationDescriptor, OperationRegistry, OutputShape, TokenCaps};
pub use routing::{RoutingDecision, TierProfile};
pub use types::{
    Difficulty, ExecuteRequest, ExecuteResponse, OperationOptions, PartInfo, ResultKind,
    StructuredResult, Tier, TokenUsage,
};
