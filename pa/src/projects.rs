//! Project lifecycle orchestration
//!
//! Thin service over the project store that runs a best-effort feasibility
//! analysis when a project is created. The analysis seeds the project's
//! history; its failure never fails the create.

use std::sync::Arc;
use tracing::{debug, warn};

use projectstore::{
    MilestoneStatus, NewAnalysis, NewProject, Project, ProjectId, ProjectStatus, ProjectStore,
    ProjectUpdate, StoreError, UserStatistics,
};

use crate::agent::{FeasibilityRequest, ProjectAgent};

/// Store plus agent, the unit the CLI works against
pub struct ProjectService {
    store: Arc<ProjectStore>,
    agent: Arc<ProjectAgent>,
}

impl ProjectService {
    pub fn new(store: Arc<ProjectStore>, agent: Arc<ProjectAgent>) -> Self {
        Self { store, agent }
    }

    /// Create a project and seed its first feasibility analysis.
    ///
    /// The analysis runs after the project is durably stored; any failure
    /// in the pipeline or the follow-up write is logged and dropped.
    pub async fn create(&self, owner: &str, fields: NewProject) -> Result<Project, StoreError> {
        debug!(%owner, name = %fields.name, "create: called");
        let request = FeasibilityRequest {
            description: fields.description.clone(),
            available_time: fields.available_time.clone(),
            current_skills: fields.skill_level.clone(),
            budget_tier: if fields.budget.is_empty() {
                "Not specified".to_string()
            } else {
                fields.budget.clone()
            },
            project_type: if fields.domain.is_empty() {
                "web_development".to_string()
            } else {
                fields.domain.clone()
            },
        };

        let id = self.store.create(owner, fields)?;

        let report = self.agent.assess_feasibility(&request).await;
        let analysis = NewAnalysis {
            feasibility_score: report.feasibility_score,
            skill: report.skill_analysis,
            budget: report.budget_analysis,
            recommendation: report.assessment,
        };
        if let Err(e) = self.store.add_analysis(owner, id, analysis) {
            warn!(%owner, id, error = %e, "create: failed to store seeded analysis");
        }

        self.store.get(owner, id)
    }

    /// Re-run the feasibility pipeline for an existing project and append
    /// the result to its analysis history
    pub async fn reassess(&self, owner: &str, id: ProjectId) -> Result<Project, StoreError> {
        debug!(%owner, id, "reassess: called");
        let project = self.store.get(owner, id)?;

        let request = FeasibilityRequest {
            description: project.description.clone(),
            available_time: project.available_time.clone(),
            current_skills: project.skill_level.clone(),
            budget_tier: if project.budget.is_empty() {
                "Not specified".to_string()
            } else {
                project.budget.clone()
            },
            project_type: if project.domain.is_empty() {
                "web_development".to_string()
            } else {
                project.domain.clone()
            },
        };

        let report = self.agent.assess_feasibility(&request).await;
        self.store.add_analysis(
            owner,
            id,
            NewAnalysis {
                feasibility_score: report.feasibility_score,
                skill: report.skill_analysis,
                budget: report.budget_analysis,
                recommendation: report.assessment,
            },
        )?;

        self.store.get(owner, id)
    }

    pub fn get(&self, owner: &str, id: ProjectId) -> Result<Project, StoreError> {
        self.store.get(owner, id)
    }

    pub fn list(&self, owner: &str) -> Result<Vec<Project>, StoreError> {
        self.store.list(owner)
    }

    pub fn set_status(&self, owner: &str, id: ProjectId, status: ProjectStatus) -> Result<Project, StoreError> {
        self.store.update(
            owner,
            id,
            ProjectUpdate {
                status: Some(status),
                current_phase: None,
            },
        )
    }

    pub fn delete(&self, owner: &str, id: ProjectId) -> Result<(), StoreError> {
        self.store.delete(owner, id)
    }

    pub fn update_milestone(
        &self,
        owner: &str,
        project: ProjectId,
        milestone: u32,
        status: MilestoneStatus,
    ) -> Result<Project, StoreError> {
        self.store.update_milestone(owner, project, milestone, status)
    }

    pub fn statistics(&self, owner: &str) -> Result<UserStatistics, StoreError> {
        self.store.statistics(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::prompts::PromptLoader;
    use tempfile::TempDir;

    fn service(llm: MockLlmClient) -> (ProjectService, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(ProjectStore::open(dir.path()).unwrap());
        let agent = Arc::new(ProjectAgent::new(
            Arc::new(llm),
            None,
            PromptLoader::embedded_only(),
            3,
        ));
        (ProjectService::new(store, agent), dir)
    }

    fn sample_fields() -> NewProject {
        NewProject {
            name: "Recipe Hub".to_string(),
            description: "A React recipe sharing site with a REST API".to_string(),
            domain: "web_development".to_string(),
            skill_level: "react, css".to_string(),
            available_time: "4 months".to_string(),
            budget: "Limited".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_seeds_analysis() {
        let (service, _dir) = service(MockLlmClient::always("Feasible, start small."));

        let project = service.create("alice", sample_fields()).await.unwrap();
        assert_eq!(project.analyses.len(), 1);
        let analysis = &project.analyses[0];
        assert_eq!(analysis.recommendation, "Feasible, start small.");
        assert!((1..=10).contains(&analysis.feasibility_score));
        // react and api inferred from the description; css not required
        assert!(analysis.skill.matched_skills.contains(&"react".to_string()));
    }

    #[tokio::test]
    async fn test_create_survives_llm_outage() {
        let (service, _dir) = service(MockLlmClient::failing());

        let project = service.create("alice", sample_fields()).await.unwrap();
        assert_eq!(project.analyses.len(), 1);
        let analysis = &project.analyses[0];
        assert!(analysis.recommendation.contains("Detailed assessment unavailable"));
        // Deterministic halves still populated
        assert!(analysis.budget.total_budget > 0.0);
    }

    #[tokio::test]
    async fn test_reassess_appends_analysis() {
        let (service, _dir) = service(MockLlmClient::always("ok"));

        let project = service.create("alice", sample_fields()).await.unwrap();
        let project = service.reassess("alice", project.id).await.unwrap();
        assert_eq!(project.analyses.len(), 2);
        assert_eq!(project.latest_analysis().unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_reassess_unknown_project() {
        let (service, _dir) = service(MockLlmClient::always("ok"));
        assert!(matches!(
            service.reassess("alice", 42).await,
            Err(StoreError::ProjectNotFound { .. })
        ));
    }
}
