//! CS Ops Nexus core: the pieces behind the customer-success operations dashboard.
//!
//! - [`markdown`]: line-oriented renderer for the Markdown subset the model is asked to produce.
//! - [`markup`]: HTML emitter for rendered blocks.
//! - [`llm_gateway`] / [`gemini_service`]: the generation seam and its Gemini implementation.
//! - [`view`]: which dashboard screen is showing.
//! - [`catalog`]: mock business data and the session project/FAQ lists.

pub mod catalog;
pub mod config;
pub mod error;
pub mod gemini_service;
pub mod llm_gateway;
pub mod markdown;
pub mod markup;
pub mod prompts;
pub mod view;

pub use catalog::{FaqBook, FaqEntry, Project, ProjectBoard};
pub use config::{LlmSettings, NexusConfig};
pub use error::{GenerationError, GenerationResult, InputError};
pub use gemini_service::GeminiClient;
pub use llm_gateway::{Action, LlmGateway};
pub use markdown::{render, render_with, DisplayBlock, InlineRun, InlineSegment, RenderOptions};
pub use markup::{to_html, Theme};
pub use view::{View, ViewRouter};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
