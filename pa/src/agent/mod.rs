//! LLM-backed planning agent
//!
//! The agent orchestrates prompt rendering, optional collaborator lookups
//! (trend research, GitHub similar-project search) and the LLM call for
//! each planning surface. Collaborator failures degrade the output rather
//! than failing the operation.

mod feasibility;

pub use feasibility::{FeasibilityReport, FeasibilityRequest};

use std::sync::Arc;
use tracing::{debug, warn};

use crate::github::{GithubClient, Repo};
use crate::llm::{GenerationRequest, LlmClient};
use crate::prompts::{IdeasContext, PromptLoader, RoadmapContext, SimilarProject};

/// Words from a project description used as the GitHub search query
const SEARCH_QUERY_WORDS: usize = 5;

/// A roadmap plus the repositories that informed it
#[derive(Debug, Clone)]
pub struct RoadmapResult {
    pub roadmap: String,
    pub similar_projects: Vec<Repo>,
}

/// Planning agent backed by an LLM and optional GitHub search
pub struct ProjectAgent {
    llm: Arc<dyn LlmClient>,
    github: Option<GithubClient>,
    prompts: PromptLoader,
    github_max_results: usize,
}

impl ProjectAgent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        github: Option<GithubClient>,
        prompts: PromptLoader,
        github_max_results: usize,
    ) -> Self {
        Self {
            llm,
            github,
            prompts,
            github_max_results,
        }
    }

    /// Generate project ideas for a domain and skill level.
    ///
    /// With `use_trends` set, a trend-research pre-pass feeds current
    /// industry context into the ideas prompt. A failed pre-pass is
    /// logged and skipped.
    pub async fn generate_ideas(
        &self,
        domain: &str,
        skill_level: &str,
        constraints: Option<&str>,
        use_trends: bool,
    ) -> Result<String, eyre::Report> {
        debug!(%domain, %skill_level, use_trends, "generate_ideas: called");

        let trends = if use_trends {
            self.research_trends(domain).await
        } else {
            None
        };

        let mut context = IdeasContext::new(domain, skill_level, constraints.unwrap_or("None"));
        context.trends = trends;

        let prompt = self.prompts.render("ideas", &context)?;
        let ideas = self.llm.generate(GenerationRequest::new(prompt)).await?;
        debug!(len = ideas.len(), "generate_ideas: success");
        Ok(ideas)
    }

    /// Fetch current trends for a domain, returning None on any failure
    async fn research_trends(&self, domain: &str) -> Option<String> {
        debug!(%domain, "research_trends: called");
        let query = format!("{domain} technology trends");

        let prompt = match self.prompts.render("trends", &serde_json::json!({ "query": query })) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "research_trends: template render failed, skipping");
                return None;
            }
        };

        match self.llm.generate(GenerationRequest::new(prompt)).await {
            Ok(trends) => Some(trends),
            Err(e) => {
                warn!(error = %e, "research_trends: LLM call failed, skipping trends");
                None
            }
        }
    }

    /// Create a phased roadmap for a project description.
    ///
    /// With `check_similar` set, the top GitHub repositories matching the
    /// description are folded into the prompt and returned alongside the
    /// roadmap. An LLM failure is reported in the roadmap text itself so
    /// the similar-project list survives.
    pub async fn create_roadmap(&self, description: &str, check_similar: bool) -> RoadmapResult {
        debug!(check_similar, "create_roadmap: called");

        let similar = if check_similar {
            self.find_similar_projects(description).await
        } else {
            Vec::new()
        };

        let context = RoadmapContext {
            description: description.to_string(),
            similar_projects: similar
                .iter()
                .map(|r| SimilarProject {
                    name: r.name.clone(),
                    description: r.description.clone(),
                    stars: r.stars,
                })
                .collect(),
        };

        let roadmap = match self.prompts.render("roadmap", &context) {
            Ok(prompt) => match self.llm.generate(GenerationRequest::new(prompt)).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "create_roadmap: LLM call failed");
                    format!("Error creating roadmap: {e}")
                }
            },
            Err(e) => {
                warn!(error = %e, "create_roadmap: template render failed");
                format!("Error creating roadmap: {e}")
            }
        };

        RoadmapResult {
            roadmap,
            similar_projects: similar,
        }
    }

    /// Search GitHub for similar projects, degrading to an empty list
    async fn find_similar_projects(&self, description: &str) -> Vec<Repo> {
        let Some(github) = &self.github else {
            debug!("find_similar_projects: GitHub search disabled");
            return Vec::new();
        };

        let query: String = description
            .split_whitespace()
            .take(SEARCH_QUERY_WORDS)
            .collect::<Vec<_>>()
            .join(" ");
        debug!(%query, "find_similar_projects: searching");

        match github.search(&query, self.github_max_results).await {
            Ok(results) => results.repos,
            Err(e) => {
                warn!(error = %e, "find_similar_projects: search failed, continuing without");
                Vec::new()
            }
        }
    }

    /// Free-form chat with the planning assistant persona
    pub async fn chat(&self, message: &str) -> Result<String, eyre::Report> {
        debug!(message_len = message.len(), "chat: called");
        let system = self.prompts.chat_context()?;
        let request = GenerationRequest::new(message).with_system(system);
        let reply = self.llm.generate(request).await?;
        Ok(reply)
    }

    pub(crate) fn llm(&self) -> &Arc<dyn LlmClient> {
        &self.llm
    }

    pub(crate) fn prompts(&self) -> &PromptLoader {
        &self.prompts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockLlmClient, MockReply};

    fn agent_with(llm: Arc<MockLlmClient>) -> ProjectAgent {
        ProjectAgent::new(llm, None, PromptLoader::embedded_only(), 3)
    }

    #[tokio::test]
    async fn test_generate_ideas_without_trends_makes_one_call() {
        let llm = Arc::new(MockLlmClient::always("1. Idea one"));
        let agent = agent_with(llm.clone());

        let ideas = agent
            .generate_ideas("web_development", "beginner", None, false)
            .await
            .unwrap();
        assert_eq!(ideas, "1. Idea one");
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_ideas_with_trends_makes_two_calls() {
        let llm = Arc::new(MockLlmClient::always("reply"));
        let agent = agent_with(llm.clone());

        agent
            .generate_ideas("ai_ml", "advanced", Some("low budget"), true)
            .await
            .unwrap();
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_generate_ideas_survives_failed_trends_pass() {
        let llm = Arc::new(MockLlmClient::new(vec![
            MockReply::Fail("trends backend down".to_string()),
            MockReply::Text("1. Idea anyway".to_string()),
        ]));
        let agent = agent_with(llm);

        let ideas = agent
            .generate_ideas("iot", "intermediate", None, true)
            .await
            .unwrap();
        assert_eq!(ideas, "1. Idea anyway");
    }

    #[tokio::test]
    async fn test_create_roadmap_reports_llm_failure_in_text() {
        let llm = Arc::new(MockLlmClient::failing());
        let agent = agent_with(llm);

        let result = agent.create_roadmap("A recipe sharing app", false).await;
        assert!(result.roadmap.starts_with("Error creating roadmap:"));
        assert!(result.similar_projects.is_empty());
    }

    #[tokio::test]
    async fn test_chat_uses_system_context() {
        let llm = Arc::new(MockLlmClient::always("Happy to help!"));
        let agent = agent_with(llm);

        let reply = agent.chat("How do I start?").await.unwrap();
        assert_eq!(reply, "Happy to help!");
    }
}
