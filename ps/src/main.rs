use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use projectstore::ProjectStore;
use projectstore::cli::{Cli, Command};
use projectstore::config::Config;

/// Bare strings print without JSON quoting; everything else as JSON
fn render_pref(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("projectstore starting");

    let store = ProjectStore::open(&config.store_path)?;

    match cli.command {
        Command::List { owner } => {
            let projects = store.list(&owner)?;
            if projects.is_empty() {
                println!("No projects found for {}", owner.cyan());
            } else {
                for p in projects {
                    println!(
                        "{:>4}  {:<30} {:<12} {:>4}%  {}",
                        p.id.to_string().yellow(),
                        p.name,
                        p.status.to_string().dimmed(),
                        p.progress,
                        p.current_phase
                    );
                }
            }
        }
        Command::Show { owner, id } => {
            let project = store.get(&owner, id)?;
            println!("{} {}", project.name.cyan().bold(), format!("(#{})", project.id).dimmed());
            println!("  Status:   {} ({}%)", project.status, project.progress);
            println!("  Phase:    {}", project.current_phase);
            if !project.domain.is_empty() {
                println!("  Domain:   {}", project.domain);
            }
            if !project.description.is_empty() {
                println!("  About:    {}", project.description);
            }
            println!("  Milestones:");
            for m in &project.milestones {
                let mark = match m.status {
                    projectstore::MilestoneStatus::Completed => "✓".green(),
                    projectstore::MilestoneStatus::Pending => "·".dimmed(),
                };
                println!("    {} {:>2}. {}", mark, m.id, m.name);
            }
            if let Some(analysis) = project.latest_analysis() {
                println!(
                    "  Latest analysis: score {}/10, {} ({})",
                    analysis.feasibility_score,
                    analysis.skill.difficulty.describe(),
                    analysis.created_at.format("%Y-%m-%d")
                );
            }
        }
        Command::Status { owner, id, status } => {
            let project = store.update(
                &owner,
                id,
                projectstore::ProjectUpdate {
                    status: Some(status),
                    current_phase: None,
                },
            )?;
            println!("{} Project {} is now {}", "✓".green(), id, project.status.to_string().cyan());
        }
        Command::Milestone {
            owner,
            project,
            milestone,
            status,
        } => {
            let updated = store.update_milestone(&owner, project, milestone, status)?;
            println!(
                "{} Milestone {} set to {}; progress {}% ({})",
                "✓".green(),
                milestone,
                status,
                updated.progress,
                updated.current_phase
            );
        }
        Command::Stats { owner } => {
            let stats = store.statistics(&owner)?;
            println!("Owner: {}", owner.cyan());
            println!("  Total projects:       {}", stats.total_projects);
            println!("  Planning:             {}", stats.planning);
            println!("  In progress:          {}", stats.in_progress);
            println!("  Completed:            {}", stats.completed);
            println!("  On hold:              {}", stats.on_hold);
            println!("  Completed milestones: {}", stats.completed_milestones);
        }
        Command::Delete { owner, id } => {
            store.delete(&owner, id)?;
            println!("{} Deleted project: {}", "✓".green(), id);
        }
        Command::Pref { owner, key, value } => match value {
            Some(value) => {
                store.set_preference(&owner, &key, serde_json::Value::String(value.clone()))?;
                println!("{} {} = {}", "✓".green(), key, value);
            }
            None => match store.get_preference(&owner, &key)? {
                Some(value) => println!("{}", render_pref(&value)),
                None => println!("{} is not set for {}", key, owner.cyan()),
            },
        },
        Command::Prefs { owner } => {
            let prefs = store.preferences(&owner)?;
            if prefs.is_empty() {
                println!("No preferences set for {}", owner.cyan());
            } else {
                for (key, value) in prefs {
                    println!("{} = {}", key, render_pref(&value));
                }
            }
        }
        Command::Owners => {
            let owners = store.list_owners()?;
            if owners.is_empty() {
                println!("No owners found");
            } else {
                for owner in owners {
                    println!("{}", owner);
                }
            }
        }
    }

    Ok(())
}
