//! CLI argument parsing for projectstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{MilestoneId, MilestoneStatus, ProjectId, ProjectStatus};

#[derive(Parser, Debug)]
#[command(name = "ps")]
#[command(author, version, about = "Per-owner project tracking store", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List an owner's projects
    List {
        /// Owner identifier
        #[arg(required = true)]
        owner: String,
    },

    /// Show a project with its milestones and latest analysis
    Show {
        /// Owner identifier
        #[arg(required = true)]
        owner: String,

        /// Project ID
        #[arg(required = true)]
        id: ProjectId,
    },

    /// Set a project's status
    Status {
        /// Owner identifier
        #[arg(required = true)]
        owner: String,

        /// Project ID
        #[arg(required = true)]
        id: ProjectId,

        /// New status (planning, in_progress, completed, on_hold)
        #[arg(required = true)]
        status: ProjectStatus,
    },

    /// Set a milestone's status; progress is recomputed
    Milestone {
        /// Owner identifier
        #[arg(required = true)]
        owner: String,

        /// Project ID
        #[arg(required = true)]
        project: ProjectId,

        /// Milestone ID (1-5 for the default template)
        #[arg(required = true)]
        milestone: MilestoneId,

        /// New status (pending, completed)
        #[arg(required = true)]
        status: MilestoneStatus,
    },

    /// Show aggregate statistics for an owner
    Stats {
        /// Owner identifier
        #[arg(required = true)]
        owner: String,
    },

    /// Delete a project and everything it owns
    Delete {
        /// Owner identifier
        #[arg(required = true)]
        owner: String,

        /// Project ID
        #[arg(required = true)]
        id: ProjectId,
    },

    /// Get or set an owner preference
    Pref {
        /// Owner identifier
        #[arg(required = true)]
        owner: String,

        /// Preference key
        #[arg(required = true)]
        key: String,

        /// New value; omit to print the current one
        value: Option<String>,
    },

    /// List all preferences for an owner
    Prefs {
        /// Owner identifier
        #[arg(required = true)]
        owner: String,
    },

    /// List owners with at least one project
    Owners,
}
