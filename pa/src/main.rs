//! pa - project planning agent CLI

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use projectagent::agent::{FeasibilityRequest, ProjectAgent};
use projectagent::cli::{Cli, Command, ProjectCommand};
use projectagent::config::Config;
use projectagent::github::GithubClient;
use projectagent::llm::{LlmClient, LlmError, UnavailableClient, create_client};
use projectagent::projects::ProjectService;
use projectagent::prompts::PromptLoader;
use projectagent::session::{ActionKind, SessionTracker};
use projectstore::{NewProject, Project, ProjectStore};

/// Session id for non-interactive commands
const CLI_SESSION: &str = "cli";

fn setup_logging(cli_level: Option<&str>, config_level: Option<&str>) {
    // CLI flag wins over config file, config over the default
    let level = cli_level.or(config_level).unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref())?;
    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref());
    debug!("main: config loaded");

    // A missing API key must not block store-only commands; AI surfaces
    // degrade the same way they do for provider outages
    let llm: Arc<dyn LlmClient> = match create_client(&config.llm) {
        Ok(client) => client,
        Err(LlmError::MissingApiKey(var)) => {
            warn!("No API key in {var}; AI features are unavailable and analyses will be degraded");
            Arc::new(UnavailableClient::missing_key(var))
        }
        Err(e) => return Err(e.into()),
    };
    let github = if config.github.enabled {
        Some(GithubClient::new()?)
    } else {
        None
    };
    let prompts = PromptLoader::new(std::env::current_dir().wrap_err("Failed to resolve working directory")?);
    let agent = Arc::new(ProjectAgent::new(llm, github, prompts, config.github.max_results));

    let store = Arc::new(ProjectStore::open(config.store_path())?);
    let service = ProjectService::new(store, agent.clone());
    let sessions = SessionTracker::new();

    match cli.command {
        Command::Ideas {
            domain,
            skill_level,
            constraints,
            trends,
        } => {
            let ideas = agent
                .generate_ideas(&domain, &skill_level, constraints.as_deref(), trends)
                .await?;
            sessions.record(CLI_SESSION, ActionKind::GenerateIdeas, &domain, &ideas);
            println!("{}", "Project Ideas".bold().underline());
            println!("{ideas}");
        }

        Command::Roadmap {
            description,
            no_similar,
        } => {
            let result = agent.create_roadmap(&description, !no_similar).await;
            sessions.record(CLI_SESSION, ActionKind::CreateRoadmap, &description, &result.roadmap);

            if !result.similar_projects.is_empty() {
                println!("{}", "Similar Projects".bold().underline());
                for repo in &result.similar_projects {
                    println!(
                        "  {} ({} stars) - {}",
                        repo.name.cyan(),
                        repo.stars,
                        repo.description
                    );
                }
                println!();
            }
            println!("{}", "Roadmap".bold().underline());
            println!("{}", result.roadmap);
        }

        Command::Assess {
            description,
            time,
            skills,
            budget,
            project_type,
        } => {
            let request = FeasibilityRequest {
                description: description.clone(),
                available_time: time,
                current_skills: skills,
                budget_tier: budget,
                project_type,
            };
            let report = agent.assess_feasibility(&request).await;
            sessions.record(CLI_SESSION, ActionKind::AssessFeasibility, &description, &report.assessment);
            print_feasibility(&report);
        }

        Command::Project(command) => run_project_command(&service, &cli.owner, command).await?,

        Command::Chat => run_chat(&agent, &sessions).await?,
    }

    Ok(())
}

async fn run_project_command(service: &ProjectService, owner: &str, command: ProjectCommand) -> Result<()> {
    match command {
        ProjectCommand::Create {
            name,
            description,
            domain,
            skills,
            time,
            budget,
        } => {
            let fields = NewProject {
                name,
                description,
                domain,
                skill_level: skills,
                available_time: time,
                budget,
            };
            let project = service.create(owner, fields).await?;
            println!("{} project {} ({})", "Created".green().bold(), project.id, project.name);
            if let Some(analysis) = project.latest_analysis() {
                println!(
                    "Initial feasibility: {}/10 - {}",
                    analysis.feasibility_score,
                    analysis.skill.difficulty.describe()
                );
            }
        }

        ProjectCommand::List => {
            let projects = service.list(owner)?;
            if projects.is_empty() {
                println!("No projects for owner '{owner}'");
                return Ok(());
            }
            for project in projects {
                println!(
                    "{:>4}  {:<30} {:<12} {:>3}%  {}",
                    project.id,
                    project.name,
                    project.status.to_string(),
                    project.progress,
                    project.current_phase.dimmed()
                );
            }
        }

        ProjectCommand::Show { id } => {
            let project = service.get(owner, id)?;
            print_project(&project);
        }

        ProjectCommand::Reassess { id } => {
            let project = service.reassess(owner, id).await?;
            println!("{} project {}", "Reassessed".green().bold(), project.id);
            if let Some(analysis) = project.latest_analysis() {
                println!("Feasibility: {}/10", analysis.feasibility_score);
                println!("{}", analysis.recommendation);
            }
        }

        ProjectCommand::Status { id, status } => {
            let project = service.set_status(owner, id, status)?;
            println!("Project {} status set to {}", project.id, project.status.to_string().cyan());
        }

        ProjectCommand::Milestone {
            project,
            milestone,
            status,
        } => {
            let updated = service.update_milestone(owner, project, milestone, status)?;
            println!(
                "Milestone {} set to {}. Progress: {}%, phase: {}",
                milestone,
                status.to_string().cyan(),
                updated.progress,
                updated.current_phase
            );
        }

        ProjectCommand::Stats => {
            let stats = service.statistics(owner)?;
            println!("{}", format!("Statistics for {owner}").bold().underline());
            println!("  Total projects:       {}", stats.total_projects);
            println!("  Planning:             {}", stats.planning);
            println!("  In progress:          {}", stats.in_progress);
            println!("  Completed:            {}", stats.completed);
            println!("  On hold:              {}", stats.on_hold);
            println!("  Completed milestones: {}", stats.completed_milestones);
        }

        ProjectCommand::Delete { id } => {
            service.delete(owner, id)?;
            println!("{} project {}", "Deleted".red().bold(), id);
        }
    }

    Ok(())
}

fn print_project(project: &Project) {
    println!("{}", project.name.bold().underline());
    println!("{}", project.description);
    println!();
    println!(
        "Status: {}  Phase: {}  Progress: {}%",
        project.status.to_string().cyan(),
        project.current_phase,
        project.progress
    );
    println!();
    println!("{}", "Milestones".bold());
    for milestone in &project.milestones {
        let marker = match milestone.status {
            projectstore::MilestoneStatus::Completed => "x".green(),
            projectstore::MilestoneStatus::Pending => " ".normal(),
        };
        println!("  [{}] {:>2}. {} - {}", marker, milestone.id, milestone.name, milestone.description.dimmed());
    }
    if let Some(analysis) = project.latest_analysis() {
        println!();
        println!("{}", "Latest Analysis".bold());
        println!("  Feasibility: {}/10", analysis.feasibility_score);
        println!("  Proficiency: {:.1}%", analysis.skill.proficiency_score);
        println!("  Difficulty:  {}", analysis.skill.difficulty.describe());
        println!("  Budget:      ${:.2} total, ${:.2}/month", analysis.budget.total_budget, analysis.budget.monthly_burn_rate);
    }
}

fn print_feasibility(report: &projectagent::agent::FeasibilityReport) {
    println!("{}", "Feasibility Report".bold().underline());
    println!("Score: {}/10", report.feasibility_score.to_string().cyan());
    println!();
    println!("{}", "Skill Analysis".bold());
    println!("  Proficiency:    {:.1}%", report.skill_analysis.proficiency_score);
    println!("  Difficulty:     {}", report.skill_analysis.difficulty.describe());
    println!("  Matched skills: {}", join_or_none(&report.skill_analysis.matched_skills));
    println!("  Missing skills: {}", join_or_none(&report.skill_analysis.missing_skills));
    println!("  Learning time:  {} weeks", report.skill_analysis.estimated_learning_weeks);
    println!("  {}", report.skill_analysis.recommendation.italic());
    println!();
    println!("{}", "Budget Estimate".bold());
    println!("  Development:    ${:.2}", report.budget_analysis.development);
    println!("  Infrastructure: ${:.2}", report.budget_analysis.infrastructure);
    println!("  Tools:          ${:.2}", report.budget_analysis.tools_and_licenses);
    println!("  Contingency:    ${:.2}", report.budget_analysis.contingency);
    println!("  Total:          ${:.2}", report.budget_analysis.total_budget);
    println!("  Monthly burn:   ${:.2}", report.budget_analysis.monthly_burn_rate);
    println!();
    println!("{}", "Assessment".bold());
    println!("{}", report.assessment);
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Interactive chat loop. `/summary` and `/history` inspect the session;
/// `exit` or Ctrl-D ends it.
async fn run_chat(agent: &ProjectAgent, sessions: &SessionTracker) -> Result<()> {
    let session_id = sessions.get_or_create(&uuid::Uuid::now_v7().to_string());
    let mut editor = DefaultEditor::new()?;

    println!("{}", "Project planning assistant. Type 'exit' to quit, '/summary' for session stats.".dimmed());

    loop {
        match editor.readline("you> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break;
                }
                editor.add_history_entry(line)?;

                if line == "/summary" {
                    println!("{}", sessions.summarize(&session_id));
                    continue;
                }
                if line == "/history" {
                    for entry in sessions.history(&session_id, 10) {
                        println!(
                            "{} [{}] {}",
                            entry.timestamp.format("%H:%M:%S").to_string().dimmed(),
                            entry.action,
                            entry.input
                        );
                    }
                    continue;
                }

                match agent.chat(line).await {
                    Ok(reply) => {
                        sessions.record(&session_id, ActionKind::Chat, line, &reply);
                        println!("{}", reply);
                    }
                    Err(e) => println!("{} {e}", "Error:".red().bold()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("{}", "Goodbye".dimmed());
    Ok(())
}
