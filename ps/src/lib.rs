//! ProjectStore - durable per-owner project tracking
//!
//! Stores each project as a single JSON document under the owner's
//! directory. Milestones and analysis records live inside the document,
//! so deleting a project cascades by construction.
//!
//! # Architecture
//!
//! ```text
//! .projectstore/
//! └── {owner}/
//!     ├── 0001.json      # full Project document
//!     ├── 0002.json
//!     └── ...
//! ```
//!
//! # Example
//!
//! ```ignore
//! use projectstore::{ProjectStore, NewProject, MilestoneStatus};
//!
//! let store = ProjectStore::open(".projectstore")?;
//! let id = store.create("alice", NewProject::new("Chess Bot", "A UCI chess engine"))?;
//! store.update_milestone("alice", id, 1, MilestoneStatus::Completed)?;
//! let stats = store.statistics("alice")?;
//! ```

pub mod cli;
pub mod config;
mod store;
mod types;

pub use store::{ProjectStore, StoreError};
pub use types::{
    AnalysisRecord, BudgetBreakdown, Difficulty, Milestone, MilestoneId, MilestoneStatus, NewAnalysis, NewProject,
    Project, ProjectId, ProjectStatus, ProjectUpdate, SkillAssessment, UserStatistics,
};

/// Default milestone template seeded into every new project
pub const MILESTONE_TEMPLATE: [(&str, &str); 5] = [
    ("Setup", "Environment setup and project scaffolding"),
    ("Requirements", "Requirements gathering and design"),
    ("Development", "Core feature implementation"),
    ("Testing", "Testing and bug fixing"),
    ("Deployment", "Deployment and launch"),
];

/// Phase name for a project with no completed milestones
pub const INITIAL_PHASE: &str = "Planning";
