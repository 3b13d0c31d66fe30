//! Budget estimation
//!
//! Derives a cost breakdown from project type, duration, and team size
//! using a fixed base monthly rate table.

use projectstore::BudgetBreakdown;
use thiserror::Error;
use tracing::debug;

/// Errors from deterministic analysis inputs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Duration must be at least 1 month, got {0}")]
    InvalidDuration(u32),
}

/// Base monthly rate for a normalized project-type tag.
///
/// Unrecognized tags fall back to the default rate rather than erroring;
/// project types are free text at the edges of the system.
fn base_monthly_rate(project_type: &str) -> f64 {
    let tag = project_type.trim().to_lowercase().replace(' ', "_");
    match tag.as_str() {
        "web_development" => 500.0,
        "mobile_app" => 800.0,
        "ai_ml" => 1200.0,
        "data_science" => 1000.0,
        "game_development" => 900.0,
        "iot" => 700.0,
        "blockchain" => 1500.0,
        _ => 600.0,
    }
}

/// Calculate an estimated budget breakdown for a project.
///
/// A zero duration is a validation error (monthly burn would divide by
/// zero); a zero team size is tolerated, with per-person cost reported as 0.
pub fn calculate_budget(project_type: &str, duration_months: u32, team_size: u32) -> Result<BudgetBreakdown, AnalysisError> {
    debug!(%project_type, duration_months, team_size, "calculate_budget: called");

    if duration_months == 0 {
        return Err(AnalysisError::InvalidDuration(duration_months));
    }

    let base = base_monthly_rate(project_type);
    let duration = duration_months as f64;
    let team = team_size as f64;

    let development = base * duration * team;
    let infrastructure = (50.0 + team * 20.0) * duration;
    let tools_and_licenses = 100.0 * duration;
    let contingency = (development + infrastructure + tools_and_licenses) * 0.2;
    let total = development + infrastructure + tools_and_licenses + contingency;

    Ok(BudgetBreakdown {
        development: round2(development),
        infrastructure: round2(infrastructure),
        tools_and_licenses: round2(tools_and_licenses),
        contingency: round2(contingency),
        total_budget: round2(total),
        monthly_burn_rate: round2(total / duration),
        per_person_cost: if team_size > 0 { round2(total / team) } else { 0.0 },
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
