//! End-to-end tests wiring the agent, the store, and the session tracker
//! together with a scripted LLM client.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

use projectagent::agent::{FeasibilityRequest, ProjectAgent};
use projectagent::llm::{GenerationRequest, LlmClient, LlmError};
use projectagent::projects::ProjectService;
use projectagent::prompts::PromptLoader;
use projectagent::session::{ActionKind, SessionTracker};
use projectstore::{MilestoneStatus, NewProject, ProjectStatus, ProjectStore};

/// Scripted LLM: returns canned text, or fails every call
struct ScriptedLlm {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl ScriptedLlm {
    fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(LlmError::ApiError {
                status: 503,
                message: "backend unavailable".to_string(),
            }),
        }
    }
}

fn build_service(llm: Arc<ScriptedLlm>) -> (ProjectService, Arc<ProjectStore>, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(ProjectStore::open(dir.path()).unwrap());
    let agent = Arc::new(ProjectAgent::new(
        llm,
        None,
        PromptLoader::embedded_only(),
        3,
    ));
    (ProjectService::new(store.clone(), agent), store, dir)
}

fn sample_project() -> NewProject {
    NewProject {
        name: "Recipe Hub".to_string(),
        description: "A React recipe site backed by a SQL database and a REST API".to_string(),
        domain: "web_development".to_string(),
        skill_level: "react, sql".to_string(),
        available_time: "6 months".to_string(),
        budget: "Limited".to_string(),
    }
}

#[tokio::test]
async fn test_create_project_seeds_full_analysis() {
    let llm = Arc::new(ScriptedLlm::replying("Solid project for your level."));
    let (service, _store, _dir) = build_service(llm.clone());

    let project = service.create("alice", sample_project()).await.unwrap();

    assert_eq!(project.id, 1);
    assert_eq!(project.status, ProjectStatus::Planning);
    assert_eq!(project.milestones.len(), 5);
    assert_eq!(project.progress, 0);

    let analysis = project.latest_analysis().unwrap();
    assert_eq!(analysis.recommendation, "Solid project for your level.");
    // react, sql, api required; react, sql held -> 2/3
    assert_eq!(analysis.skill.missing_skills, vec!["api"]);
    assert_eq!(analysis.feasibility_score, 7);
    // web_development at 6 months, solo: 500*6 development
    assert_eq!(analysis.budget.development, 3000.0);
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_llm_outage_degrades_but_never_fails() {
    let llm = Arc::new(ScriptedLlm::failing());
    let (service, _store, _dir) = build_service(llm);

    let project = service.create("alice", sample_project()).await.unwrap();

    let analysis = project.latest_analysis().unwrap();
    assert!(analysis.recommendation.contains("Detailed assessment unavailable"));
    // Deterministic halves survive the outage
    assert!(analysis.skill.proficiency_score > 0.0);
    assert!(analysis.budget.total_budget > 0.0);
    assert_eq!(analysis.feasibility_score, 7);
}

#[tokio::test]
async fn test_milestone_progress_lifecycle() {
    let llm = Arc::new(ScriptedLlm::replying("ok"));
    let (service, _store, _dir) = build_service(llm);

    let project = service.create("alice", sample_project()).await.unwrap();
    let id = project.id;

    let project = service
        .update_milestone("alice", id, 1, MilestoneStatus::Completed)
        .unwrap();
    assert_eq!(project.progress, 20);
    assert_eq!(project.current_phase, "Phase 2");
    assert_eq!(project.status, ProjectStatus::InProgress);

    for milestone in 2..=5 {
        service
            .update_milestone("alice", id, milestone, MilestoneStatus::Completed)
            .unwrap();
    }
    let project = service.get("alice", id).unwrap();
    assert_eq!(project.progress, 100);
    assert_eq!(project.current_phase, "Completed");
    assert_eq!(project.status, ProjectStatus::Completed);
}

#[tokio::test]
async fn test_delete_cascades() {
    let llm = Arc::new(ScriptedLlm::replying("ok"));
    let (service, store, _dir) = build_service(llm);

    let project = service.create("alice", sample_project()).await.unwrap();
    service.delete("alice", project.id).unwrap();

    assert!(service.get("alice", project.id).is_err());
    assert!(store.latest_analysis("alice", project.id).is_err());
}

#[tokio::test]
async fn test_statistics_after_mixed_activity() {
    let llm = Arc::new(ScriptedLlm::replying("ok"));
    let (service, _store, _dir) = build_service(llm);

    let first = service.create("alice", sample_project()).await.unwrap();
    let mut second_fields = sample_project();
    second_fields.name = "Side Project".to_string();
    service.create("alice", second_fields).await.unwrap();

    service
        .update_milestone("alice", first.id, 1, MilestoneStatus::Completed)
        .unwrap();

    let stats = service.statistics("alice").unwrap();
    assert_eq!(stats.total_projects, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.planning, 1);
    assert_eq!(stats.completed_milestones, 1);
}

#[tokio::test]
async fn test_session_tracks_agent_activity() {
    let llm = Arc::new(ScriptedLlm::replying("1. An idea"));
    let agent = ProjectAgent::new(llm, None, PromptLoader::embedded_only(), 3);
    let sessions = SessionTracker::new();
    let session_id = sessions.get_or_create("s1");

    let ideas = agent
        .generate_ideas("web development", "beginner", None, false)
        .await
        .unwrap();
    sessions.record(&session_id, ActionKind::GenerateIdeas, "web development", &ideas);

    let request = FeasibilityRequest::new("A small Python API");
    let report = agent.assess_feasibility(&request).await;
    sessions.record(&session_id, ActionKind::AssessFeasibility, "A small Python API", &report.assessment);

    let summary = sessions.summarize(&session_id);
    assert_eq!(summary.total_actions, 2);
    assert_eq!(summary.ideas_generated, 1);
    assert_eq!(summary.assessments_run, 1);

    let history = sessions.history(&session_id, 10);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].action, ActionKind::AssessFeasibility);
}

#[tokio::test]
async fn test_owners_are_isolated() {
    let llm = Arc::new(ScriptedLlm::replying("ok"));
    let (service, _store, _dir) = build_service(llm);

    service.create("alice", sample_project()).await.unwrap();
    service.create("bob", sample_project()).await.unwrap();

    assert_eq!(service.list("alice").unwrap().len(), 1);
    assert_eq!(service.list("bob").unwrap().len(), 1);
    assert!(service.get("bob", 2).is_err());
}
