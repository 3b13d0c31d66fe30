//! Feasibility assessment pipeline
//!
//! Runs the deterministic skill-gap and budget analyses, then asks the LLM
//! for a narrative assessment built on top of them. The deterministic
//! halves always succeed; an LLM outage yields a placeholder assessment
//! rather than an error.

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

use projectstore::{BudgetBreakdown, SkillAssessment};

use crate::analysis::{assess_skills, calculate_budget};
use crate::llm::GenerationRequest;
use crate::prompts::FeasibilityContext;

use super::ProjectAgent;

/// Skills recognized when scanning a project description
const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "javascript",
    "react",
    "node.js",
    "sql",
    "html",
    "css",
    "git",
    "api",
    "docker",
];

/// Assumed when a description names no recognized skill
const FALLBACK_SKILL: &str = "programming";

/// Assumed when the available-time text names no duration
const DEFAULT_DURATION_MONTHS: u32 = 3;

/// Inputs to a feasibility assessment
#[derive(Debug, Clone)]
pub struct FeasibilityRequest {
    pub description: String,
    /// Free text, e.g. "10 hours/week for 6 months"
    pub available_time: String,
    /// Comma-separated skill list
    pub current_skills: String,
    /// Free-text budget tier, echoed into the prompt
    pub budget_tier: String,
    /// Project type tag for the budget table
    pub project_type: String,
}

impl FeasibilityRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            available_time: String::new(),
            current_skills: String::new(),
            budget_tier: "Not specified".to_string(),
            project_type: "web_development".to_string(),
        }
    }
}

/// Deterministic analyses plus the LLM narrative
#[derive(Debug, Clone)]
pub struct FeasibilityReport {
    /// LLM narrative, or a placeholder on LLM failure
    pub assessment: String,
    pub skill_analysis: SkillAssessment,
    pub budget_analysis: BudgetBreakdown,
    /// 1-10, derived from the proficiency score
    pub feasibility_score: u8,
}

/// Scan a description for skills from the fixed vocabulary
fn infer_required_skills(description: &str) -> Vec<String> {
    let lowered = description.to_lowercase();
    let matched: Vec<String> = SKILL_VOCABULARY
        .iter()
        .filter(|skill| lowered.contains(*skill))
        .map(|s| s.to_string())
        .collect();

    if matched.is_empty() {
        vec![FALLBACK_SKILL.to_string()]
    } else {
        matched
    }
}

/// Extract a month count from free text, defaulting when none is found
fn parse_duration_months(available_time: &str) -> u32 {
    static MONTH_RE: OnceLock<Regex> = OnceLock::new();
    let re = MONTH_RE.get_or_init(|| Regex::new(r"(?i)(\d+)\s*(month|mo)").unwrap());

    re.captures(available_time)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .filter(|&months| months > 0)
        .unwrap_or(DEFAULT_DURATION_MONTHS)
}

/// Split a comma-separated skill list into tokens
fn parse_skill_list(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Map a proficiency percentage onto the 1-10 feasibility scale
fn score_from_proficiency(proficiency: f64) -> u8 {
    ((proficiency / 10.0).round() as i64).clamp(1, 10) as u8
}

impl ProjectAgent {
    /// Assess project feasibility.
    ///
    /// The skill-gap and budget analyses are deterministic and always
    /// present in the report. The narrative assessment comes from the LLM;
    /// on failure a placeholder is substituted and the report is still
    /// returned.
    pub async fn assess_feasibility(&self, request: &FeasibilityRequest) -> FeasibilityReport {
        debug!(project_type = %request.project_type, "assess_feasibility: called");

        let current = parse_skill_list(&request.current_skills);
        let required = infer_required_skills(&request.description);
        let skill_analysis = assess_skills(&current, &required);

        let duration = parse_duration_months(&request.available_time);
        // duration is always >= 1 here, so the estimator cannot fail
        let budget_analysis = match calculate_budget(&request.project_type, duration, 1) {
            Ok(budget) => budget,
            Err(e) => {
                warn!(error = %e, "assess_feasibility: budget estimation failed");
                BudgetBreakdown::default()
            }
        };

        let feasibility_score = score_from_proficiency(skill_analysis.proficiency_score);
        debug!(
            proficiency = skill_analysis.proficiency_score,
            feasibility_score,
            duration,
            "assess_feasibility: deterministic analyses complete"
        );

        let context = FeasibilityContext {
            description: request.description.clone(),
            available_time: if request.available_time.is_empty() {
                "Not specified".to_string()
            } else {
                request.available_time.clone()
            },
            current_skills: if request.current_skills.is_empty() {
                "None listed".to_string()
            } else {
                request.current_skills.clone()
            },
            budget_tier: request.budget_tier.clone(),
            proficiency_score: format!("{:.1}", skill_analysis.proficiency_score),
            difficulty: skill_analysis.difficulty.describe().to_string(),
            missing_skills: if skill_analysis.missing_skills.is_empty() {
                "None".to_string()
            } else {
                skill_analysis.missing_skills.join(", ")
            },
            learning_weeks: skill_analysis.estimated_learning_weeks,
            total_budget: format!("{:.2}", budget_analysis.total_budget),
            monthly_burn: format!("{:.2}", budget_analysis.monthly_burn_rate),
            development_cost: format!("{:.2}", budget_analysis.development),
        };

        let assessment = match self.prompts().render("feasibility", &context) {
            Ok(prompt) => match self.llm().generate(GenerationRequest::new(prompt)).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "assess_feasibility: LLM call failed, using placeholder");
                    placeholder_assessment(&skill_analysis)
                }
            },
            Err(e) => {
                warn!(error = %e, "assess_feasibility: template render failed, using placeholder");
                placeholder_assessment(&skill_analysis)
            }
        };

        FeasibilityReport {
            assessment,
            skill_analysis,
            budget_analysis,
            feasibility_score,
        }
    }
}

/// Narrative substitute when the LLM is unavailable
fn placeholder_assessment(skill: &SkillAssessment) -> String {
    format!(
        "Detailed assessment unavailable. Based on the skill analysis \
         (proficiency {:.1}%, {}), {}",
        skill.proficiency_score,
        skill.difficulty.describe(),
        skill.recommendation
    )
}
