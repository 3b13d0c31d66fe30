//! Domain types for the project store
//!
//! A Project owns its milestones and analysis records outright; progress,
//! phase, and status are derived from milestone completion and never
//! mutated incrementally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use log::debug;

/// Unique project identifier, scoped to an owner
pub type ProjectId = u32;

/// Unique milestone identifier, scoped to a project
pub type MilestoneId = u32;

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Newly created, no milestones completed
    #[default]
    Planning,
    /// At least one milestone completed
    InProgress,
    /// All milestones completed
    Completed,
    /// Parked by the owner
    OnHold,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Planning => write!(f, "planning"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::OnHold => write!(f, "on_hold"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(Self::Planning),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "on_hold" => Ok(Self::OnHold),
            other => Err(format!(
                "Unknown project status: '{}'. Expected planning, in_progress, completed, or on_hold",
                other
            )),
        }
    }
}

/// Milestone completion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    #[default]
    Pending,
    Completed,
}

impl std::fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for MilestoneStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(format!("Unknown milestone status: '{}'. Expected pending or completed", other)),
        }
    }
}

/// A named binary-status checkpoint within a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Identifier unique within the project (1-indexed)
    pub id: MilestoneId,
    /// Milestone name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Completion status
    pub status: MilestoneStatus,
    /// Set when status becomes completed, cleared otherwise
    pub completed_at: Option<DateTime<Utc>>,
}

/// Difficulty tier derived from the proficiency score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Proficiency >= 80
    Easy,
    /// Proficiency 50..80
    Moderate,
    /// Proficiency < 50
    Challenging,
}

impl Difficulty {
    /// Tier from a proficiency score in [0, 100]
    pub fn from_proficiency(score: f64) -> Self {
        if score >= 80.0 {
            Self::Easy
        } else if score >= 50.0 {
            Self::Moderate
        } else {
            Self::Challenging
        }
    }

    /// Descriptive text shown to users and interpolated into prompts
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Easy => "Easy - You have most required skills",
            Self::Moderate => "Moderate - Some learning required",
            Self::Challenging => "Challenging - Significant skill development needed",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Result of comparing current skills against a project's required skills
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillAssessment {
    /// Percentage overlap between current and required skills (0-100)
    pub proficiency_score: f64,
    /// Difficulty tier derived from the proficiency thresholds
    pub difficulty: Difficulty,
    /// Skills present in both sets (sorted)
    pub matched_skills: Vec<String>,
    /// Required skills the user lacks (sorted)
    pub missing_skills: Vec<String>,
    /// Current skills not required by the project (sorted)
    pub additional_skills: Vec<String>,
    /// 3 weeks per missing skill
    pub estimated_learning_weeks: u32,
    /// Threshold-selected readiness text
    pub recommendation: String,
}

/// Cost breakdown estimated from project type, duration, and team size
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    /// base rate x duration x team size
    pub development: f64,
    /// (50 + 20 x team size) x duration
    pub infrastructure: f64,
    /// 100 x duration
    pub tools_and_licenses: f64,
    /// 20% of the other three costs
    pub contingency: f64,
    /// Sum of all four components
    pub total_budget: f64,
    /// total / duration
    pub monthly_burn_rate: f64,
    /// total / team size, 0 when team size is 0
    pub per_person_cost: f64,
}

/// One append-only feasibility analysis attached to a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Identifier unique within the project (1-indexed)
    pub id: u32,
    /// 1-10, derived from the deterministic sub-scores
    pub feasibility_score: u8,
    /// Skill-gap half of the structured payload
    pub skill: SkillAssessment,
    /// Budget half of the structured payload
    pub budget: BudgetBreakdown,
    /// Free-text assessment, or a placeholder when the LLM was unavailable
    pub recommendation: String,
    /// Creation timestamp; latest record by this order is current
    pub created_at: DateTime<Utc>,
}

/// Fields for a new analysis record; id and timestamp are assigned by the store
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub feasibility_score: u8,
    pub skill: SkillAssessment,
    pub budget: BudgetBreakdown,
    pub recommendation: String,
}

/// A user's project with its milestones and analysis history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Identifier unique per owner
    pub id: ProjectId,
    /// Owning user
    pub owner: String,
    /// Project name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Domain tag (e.g. "Web Development")
    pub domain: String,
    /// Owner's stated skill level
    pub skill_level: String,
    /// Free-text time budget (e.g. "3 months")
    pub available_time: String,
    /// Budget tier (e.g. "Limited")
    pub budget: String,
    /// Derived lifecycle status
    pub status: ProjectStatus,
    /// Derived phase label ("Planning", "Phase N", "Completed")
    pub current_phase: String,
    /// Derived percentage of completed milestones (0-100)
    pub progress: u8,
    /// Ordered milestone checklist
    pub milestones: Vec<Milestone>,
    /// Append-only analysis history
    pub analyses: Vec<AnalysisRecord>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Recompute progress, phase, and status from milestone completion.
    ///
    /// Always recounts from scratch; this is the only place the derived
    /// fields are written, so they cannot drift across repeated updates.
    pub fn recompute_progress(&mut self) {
        let total = self.milestones.len();
        let completed = self
            .milestones
            .iter()
            .filter(|m| m.status == MilestoneStatus::Completed)
            .count();
        debug!("recompute_progress: called project={} completed={completed} total={total}", self.id);

        self.progress = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        };

        if total > 0 && completed == total {
            self.current_phase = "Completed".to_string();
            self.status = ProjectStatus::Completed;
        } else if completed > 0 {
            self.current_phase = format!("Phase {}", (completed + 1).min(5));
            self.status = ProjectStatus::InProgress;
        }
        // No completed milestones: phase and status stay as they are
    }

    /// Latest analysis record by creation order, if any
    pub fn latest_analysis(&self) -> Option<&AnalysisRecord> {
        self.analyses.last()
    }
}

/// Fields supplied when creating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub skill_level: String,
    #[serde(default)]
    pub available_time: String,
    #[serde(default)]
    pub budget: String,
}

impl NewProject {
    /// Create with just name and description; remaining fields default empty
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            domain: String::new(),
            skill_level: String::new(),
            available_time: String::new(),
            budget: String::new(),
        }
    }
}

/// Partial update; only status and phase are mutable through the store
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub status: Option<ProjectStatus>,
    pub current_phase: Option<String>,
}

/// Aggregate counts over one owner's projects
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserStatistics {
    pub total_projects: usize,
    pub planning: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub on_hold: usize,
    pub completed_milestones: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with_milestones(completed: usize, total: usize) -> Project {
        let now = Utc::now();
        let milestones = (1..=total as u32)
            .map(|id| Milestone {
                id,
                name: format!("M{}", id),
                description: String::new(),
                status: if (id as usize) <= completed {
                    MilestoneStatus::Completed
                } else {
                    MilestoneStatus::Pending
                },
                completed_at: None,
            })
            .collect();

        Project {
            id: 1,
            owner: "tester".to_string(),
            name: "Test".to_string(),
            description: String::new(),
            domain: String::new(),
            skill_level: String::new(),
            available_time: String::new(),
            budget: String::new(),
            status: ProjectStatus::Planning,
            current_phase: crate::INITIAL_PHASE.to_string(),
            progress: 0,
            milestones,
            analyses: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_progress_zero_completed_stays_planning() {
        let mut p = project_with_milestones(0, 5);
        p.recompute_progress();
        assert_eq!(p.progress, 0);
        assert_eq!(p.current_phase, "Planning");
        assert_eq!(p.status, ProjectStatus::Planning);
    }

    #[test]
    fn test_progress_partial_completion() {
        let mut p = project_with_milestones(2, 5);
        p.recompute_progress();
        assert_eq!(p.progress, 40);
        assert_eq!(p.current_phase, "Phase 3");
        assert_eq!(p.status, ProjectStatus::InProgress);
    }

    #[test]
    fn test_progress_rounds_to_nearest() {
        let mut p = project_with_milestones(1, 3);
        p.recompute_progress();
        assert_eq!(p.progress, 33);

        let mut p = project_with_milestones(2, 3);
        p.recompute_progress();
        assert_eq!(p.progress, 67);
    }

    #[test]
    fn test_progress_all_completed() {
        let mut p = project_with_milestones(5, 5);
        p.recompute_progress();
        assert_eq!(p.progress, 100);
        assert_eq!(p.current_phase, "Completed");
        assert_eq!(p.status, ProjectStatus::Completed);
    }

    #[test]
    fn test_progress_phase_capped_at_five() {
        let mut p = project_with_milestones(6, 7);
        p.recompute_progress();
        assert_eq!(p.current_phase, "Phase 5");
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut p = project_with_milestones(3, 5);
        p.recompute_progress();
        let first = (p.progress, p.current_phase.clone(), p.status);
        p.recompute_progress();
        assert_eq!((p.progress, p.current_phase.clone(), p.status), first);
    }

    #[test]
    fn test_progress_no_milestones() {
        let mut p = project_with_milestones(0, 0);
        p.recompute_progress();
        assert_eq!(p.progress, 0);
        assert_eq!(p.current_phase, "Planning");
    }

    #[test]
    fn test_difficulty_thresholds() {
        assert_eq!(Difficulty::from_proficiency(100.0), Difficulty::Easy);
        assert_eq!(Difficulty::from_proficiency(80.0), Difficulty::Easy);
        assert_eq!(Difficulty::from_proficiency(79.9), Difficulty::Moderate);
        assert_eq!(Difficulty::from_proficiency(50.0), Difficulty::Moderate);
        assert_eq!(Difficulty::from_proficiency(49.9), Difficulty::Challenging);
        assert_eq!(Difficulty::from_proficiency(0.0), Difficulty::Challenging);
    }

    #[test]
    fn test_status_round_trip() {
        for status in ["planning", "in_progress", "completed", "on_hold"] {
            let parsed: ProjectStatus = status.parse().unwrap();
            assert_eq!(parsed.to_string(), status);
        }
        assert!("bogus".parse::<ProjectStatus>().is_err());
    }
}
