//! Command-line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use projectstore::{MilestoneStatus, ProjectStatus};

#[derive(Parser, Debug)]
#[command(name = "pa", about = "LLM-backed project planning agent", version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Owner all project operations act on
    #[arg(long, global = true, default_value = "default")]
    pub owner: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate project ideas for a domain
    Ideas {
        /// Domain to generate ideas for (e.g. "web development")
        domain: String,

        /// Your skill level (beginner, intermediate, advanced)
        #[arg(long, default_value = "beginner")]
        skill_level: String,

        /// Additional constraints (time, budget, interests)
        #[arg(long)]
        constraints: Option<String>,

        /// Research current trends before generating
        #[arg(long)]
        trends: bool,
    },

    /// Create a phased roadmap for a project description
    Roadmap {
        /// Project description
        description: String,

        /// Skip the GitHub similar-project search
        #[arg(long)]
        no_similar: bool,
    },

    /// Assess the feasibility of a project
    Assess {
        /// Project description
        description: String,

        /// Available time, e.g. "10 hours/week for 6 months"
        #[arg(long, default_value = "")]
        time: String,

        /// Comma-separated list of your current skills
        #[arg(long, default_value = "")]
        skills: String,

        /// Budget tier, e.g. "Limited" or "$500"
        #[arg(long, default_value = "Not specified")]
        budget: String,

        /// Project type for cost estimation (web_development, mobile_app, ...)
        #[arg(long, default_value = "web_development")]
        project_type: String,
    },

    /// Manage stored projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Interactive chat with the planning assistant
    Chat,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Create a project and run an initial feasibility analysis
    Create {
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long, default_value = "web_development")]
        domain: String,

        /// Comma-separated list of your current skills
        #[arg(long, default_value = "")]
        skills: String,

        #[arg(long, default_value = "")]
        time: String,

        #[arg(long, default_value = "")]
        budget: String,
    },

    /// List projects, most recently updated first
    List,

    /// Show a project with milestones and latest analysis
    Show { id: u32 },

    /// Re-run the feasibility analysis for a project
    Reassess { id: u32 },

    /// Set a project's status
    Status {
        id: u32,
        /// planning, in_progress, completed, or on_hold
        status: ProjectStatus,
    },

    /// Set a milestone's status, recomputing progress
    Milestone {
        project: u32,
        milestone: u32,
        /// pending or completed
        status: MilestoneStatus,
    },

    /// Per-owner project statistics
    Stats,

    /// Delete a project and everything attached to it
    Delete { id: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ideas() {
        let cli = Cli::parse_from(["pa", "ideas", "web development", "--skill-level", "advanced", "--trends"]);
        match cli.command {
            Command::Ideas {
                domain,
                skill_level,
                trends,
                ..
            } => {
                assert_eq!(domain, "web development");
                assert_eq!(skill_level, "advanced");
                assert!(trends);
            }
            _ => panic!("expected Ideas"),
        }
    }

    #[test]
    fn test_parse_project_milestone() {
        let cli = Cli::parse_from(["pa", "--owner", "alice", "project", "milestone", "1", "3", "completed"]);
        assert_eq!(cli.owner, "alice");
        match cli.command {
            Command::Project(ProjectCommand::Milestone {
                project,
                milestone,
                status,
            }) => {
                assert_eq!(project, 1);
                assert_eq!(milestone, 3);
                assert_eq!(status, MilestoneStatus::Completed);
            }
            _ => panic!("expected Milestone"),
        }
    }
}
