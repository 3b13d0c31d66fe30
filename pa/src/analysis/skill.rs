//! Skill-gap assessment
//!
//! Compares a user's stated skills against a project's required skills and
//! derives a proficiency score, difficulty tier, and learning estimate.

use std::collections::BTreeSet;

use projectstore::{Difficulty, SkillAssessment};
use tracing::debug;

/// Weeks of learning estimated per missing skill
const WEEKS_PER_SKILL: u32 = 3;

/// Assess skill gaps and provide a learning recommendation.
///
/// Both sides are normalized to lowercase trimmed tokens and compared as
/// sets. An empty required set yields 100% proficiency by convention: with
/// nothing required, nothing is missing.
pub fn assess_skills(current_skills: &[String], required_skills: &[String]) -> SkillAssessment {
    debug!(
        current = current_skills.len(),
        required = required_skills.len(),
        "assess_skills: called"
    );

    let current: BTreeSet<String> = current_skills.iter().filter_map(|s| normalize(s)).collect();
    let required: BTreeSet<String> = required_skills.iter().filter_map(|s| normalize(s)).collect();

    let matched: Vec<String> = current.intersection(&required).cloned().collect();
    let missing: Vec<String> = required.difference(&current).cloned().collect();
    let additional: Vec<String> = current.difference(&required).cloned().collect();

    let proficiency_score = if required.is_empty() {
        100.0
    } else {
        round2((matched.len() as f64 / required.len() as f64) * 100.0)
    };

    let recommendation = if proficiency_score >= 70.0 {
        "Ready to start!"
    } else if proficiency_score < 40.0 {
        "Complete skill development first"
    } else {
        "Start with tutorials alongside development"
    };

    SkillAssessment {
        proficiency_score,
        difficulty: Difficulty::from_proficiency(proficiency_score),
        estimated_learning_weeks: missing.len() as u32 * WEEKS_PER_SKILL,
        matched_skills: matched,
        missing_skills: missing,
        additional_skills: additional,
        recommendation: recommendation.to_string(),
    }
}

/// Lowercase and trim a token; empty tokens are dropped
fn normalize(skill: &str) -> Option<String> {
    let token = skill.trim().to_lowercase();
    if token.is_empty() { None } else { Some(token) }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
