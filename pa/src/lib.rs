//! projectagent - LLM-backed project planning agent
//!
//! The agent turns a domain, a description, or a skill list into concrete
//! planning artifacts: project ideas, phased roadmaps, and feasibility
//! reports. The feasibility report combines two deterministic analyses
//! (skill gap, budget estimate) with an LLM-written narrative, so its
//! numeric half is reproducible even when the model is unreachable.
//!
//! ```text
//! cli ──▶ agent ──▶ prompts (handlebars, user-overridable)
//!           │  └──▶ llm (Gemini, retry + backoff)
//!           │  └──▶ github (similar-project search, best effort)
//!           ├──▶ analysis (pure skill-gap + budget functions)
//!           └──▶ projects ──▶ projectstore (durable per-owner documents)
//! ```
//!
//! Interaction history is kept in [`session::SessionTracker`] for the
//! lifetime of the process.

pub mod agent;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod github;
pub mod llm;
pub mod projects;
pub mod prompts;
pub mod session;

pub use agent::{FeasibilityReport, FeasibilityRequest, ProjectAgent, RoadmapResult};
pub use config::Config;
pub use projects::ProjectService;
pub use session::{ActionKind, SessionTracker};
