//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults,
//! and renders them with handlebars.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;

/// Context for the ideas template
#[derive(Debug, Clone, Serialize)]
pub struct IdeasContext {
    pub domain: String,
    pub skill_level: String,
    /// "None" when the user gave no constraints
    pub constraints: String,
    /// Trend research text, omitted from the prompt when absent
    pub trends: Option<String>,
}

impl IdeasContext {
    pub fn new(domain: &str, skill_level: &str, constraints: &str) -> Self {
        Self {
            domain: domain.to_string(),
            skill_level: skill_level.to_string(),
            constraints: if constraints.is_empty() {
                "None".to_string()
            } else {
                constraints.to_string()
            },
            trends: None,
        }
    }
}

/// One repository line for the roadmap template
#[derive(Debug, Clone, Serialize)]
pub struct SimilarProject {
    pub name: String,
    pub description: String,
    pub stars: u64,
}

/// Context for the roadmap template
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapContext {
    pub description: String,
    pub similar_projects: Vec<SimilarProject>,
}

/// Context for the feasibility template
///
/// Numeric fields arrive pre-formatted so the prompt reads like prose
/// rather than raw float output.
#[derive(Debug, Clone, Serialize)]
pub struct FeasibilityContext {
    pub description: String,
    pub available_time: String,
    pub current_skills: String,
    pub budget_tier: String,
    pub proficiency_score: String,
    pub difficulty: String,
    pub missing_skills: String,
    pub learning_weeks: u32,
    pub total_budget: String,
    pub monthly_burn: String,
    pub development_cost: String,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.projectagent/prompts/`)
    user_dir: Option<PathBuf>,
    /// Repo default directory (e.g., `prompts/`)
    repo_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the given directory
    ///
    /// # Arguments
    /// * `root` - Where to look for `.projectagent/prompts/` and `prompts/`
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        debug!(?root, "PromptLoader::new: called");
        let user_dir = root.join(".projectagent/prompts");
        let repo_dir = root.join("prompts");

        let mut hbs = Handlebars::new();
        // Prompts are plain text; HTML entity escaping would corrupt them
        hbs.register_escape_fn(handlebars::no_escape);

        Self {
            user_dir: user_dir.exists().then_some(user_dir),
            repo_dir: repo_dir.exists().then_some(repo_dir),
            hbs,
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        Self {
            hbs,
            user_dir: None,
            repo_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. User override: `.projectagent/prompts/{name}.pmt`
    /// 2. Repo default: `prompts/{name}.pmt`
    /// 3. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        for dir in [&self.user_dir, &self.repo_dir].into_iter().flatten() {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found on disk");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: using embedded");
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// The chat system context (no interpolation)
    pub fn chat_context(&self) -> Result<String> {
        self.load_template("chat")
    }
}
