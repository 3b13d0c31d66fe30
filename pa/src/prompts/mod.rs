//! Prompt templates
//!
//! Handlebars templates for every LLM interaction, embedded at build time
//! with optional on-disk overrides.

pub mod embedded;
mod loader;

pub use loader::{FeasibilityContext, IdeasContext, PromptLoader, RoadmapContext, SimilarProject};
