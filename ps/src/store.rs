//! Core ProjectStore implementation

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use log::{debug, info};

use std::collections::BTreeMap;

use crate::types::{
    Milestone, MilestoneId, MilestoneStatus, NewAnalysis, NewProject, Project, ProjectId, ProjectStatus,
    ProjectUpdate, UserStatistics,
};
use crate::{AnalysisRecord, INITIAL_PHASE, MILESTONE_TEMPLATE};

/// Per-owner file recording the highest project id ever allocated
const SEQUENCE_FILE: &str = ".sequence";

/// Per-owner preferences document
const PREFERENCES_FILE: &str = "preferences.json";

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Project not found: {owner}/{id}")]
    ProjectNotFound { owner: String, id: ProjectId },

    #[error("Milestone not found: project {project}, milestone {id}")]
    MilestoneNotFound { project: ProjectId, id: MilestoneId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The main project store
///
/// One JSON document per project under the owner's directory. Milestones
/// and analysis records are embedded in the document, so project deletion
/// removes them in the same operation.
pub struct ProjectStore {
    /// Base path for storage
    base_path: PathBuf,
}

impl ProjectStore {
    /// Open or create a project store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        debug!("Opened project store at {base_path:?}");
        Ok(Self { base_path })
    }

    /// Directory for one owner's projects
    fn owner_dir(&self, owner: &str) -> PathBuf {
        self.base_path.join(owner_key(owner))
    }

    /// Document path for one project
    fn project_path(&self, owner: &str, id: ProjectId) -> PathBuf {
        self.owner_dir(owner).join(format!("{:04}.json", id))
    }

    /// Next sequential project id scoped to the owner.
    ///
    /// The sequence file remembers the highest id ever allocated, so a
    /// deleted project's id is never handed out again. The directory scan
    /// is the fallback for stores that predate the sequence file.
    fn next_id(&self, owner: &str) -> Result<ProjectId, StoreError> {
        let dir = self.owner_dir(owner);
        if !dir.exists() {
            return Ok(1);
        }

        let persisted: ProjectId = fs::read_to_string(dir.join(SEQUENCE_FILE))
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);

        let mut max_id = 0;
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && let Ok(id) = stem.parse::<ProjectId>()
            {
                max_id = max_id.max(id);
            }
        }
        Ok(persisted.max(max_id) + 1)
    }

    /// Record the highest allocated id for an owner
    fn write_sequence(&self, owner: &str, id: ProjectId) -> Result<(), StoreError> {
        fs::write(self.owner_dir(owner).join(SEQUENCE_FILE), id.to_string())?;
        Ok(())
    }

    fn read_project(&self, owner: &str, id: ProjectId) -> Result<Project, StoreError> {
        let path = self.project_path(owner, id);
        if !path.exists() {
            return Err(StoreError::ProjectNotFound {
                owner: owner.to_string(),
                id,
            });
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_project(&self, project: &Project) -> Result<(), StoreError> {
        let path = self.project_path(&project.owner, project.id);
        let content = serde_json::to_string_pretty(project)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Create a new project seeded with the five-stage milestone template
    pub fn create(&self, owner: &str, fields: NewProject) -> Result<ProjectId, StoreError> {
        debug!("create: called owner={owner} name={}", fields.name);
        fs::create_dir_all(self.owner_dir(owner))?;

        let id = self.next_id(owner)?;
        let now = Utc::now();

        let milestones = MILESTONE_TEMPLATE
            .iter()
            .enumerate()
            .map(|(i, (name, description))| Milestone {
                id: (i + 1) as MilestoneId,
                name: name.to_string(),
                description: description.to_string(),
                status: MilestoneStatus::Pending,
                completed_at: None,
            })
            .collect();

        let project = Project {
            id,
            owner: owner.to_string(),
            name: fields.name,
            description: fields.description,
            domain: fields.domain,
            skill_level: fields.skill_level,
            available_time: fields.available_time,
            budget: fields.budget,
            status: ProjectStatus::Planning,
            current_phase: INITIAL_PHASE.to_string(),
            progress: 0,
            milestones,
            analyses: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.write_project(&project)?;
        self.write_sequence(owner, id)?;
        info!("Created project {id} for owner {owner}");
        Ok(id)
    }

    /// Get a project by owner and id
    pub fn get(&self, owner: &str, id: ProjectId) -> Result<Project, StoreError> {
        debug!("get: called owner={owner} id={id}");
        self.read_project(owner, id)
    }

    /// List an owner's projects, most recently updated first
    pub fn list(&self, owner: &str) -> Result<Vec<Project>, StoreError> {
        debug!("list: called owner={owner}");
        let dir = self.owner_dir(owner);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut projects = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            // Project documents are the numeric-stem .json files; the owner
            // dir also holds the sequence file and preferences document
            if path.extension().map(|e| e == "json").unwrap_or(false)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && stem.parse::<ProjectId>().is_ok()
            {
                let content = fs::read_to_string(&path)?;
                let project: Project = serde_json::from_str(&content)?;
                projects.push(project);
            }
        }

        // Ties fall back to insertion (id) order
        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        Ok(projects)
    }

    /// Update a project's status and/or phase
    pub fn update(&self, owner: &str, id: ProjectId, update: ProjectUpdate) -> Result<Project, StoreError> {
        debug!("update: called owner={owner} id={id} update={update:?}");
        let mut project = self.read_project(owner, id)?;

        if let Some(status) = update.status {
            project.status = status;
        }
        if let Some(phase) = update.current_phase {
            project.current_phase = phase;
        }
        project.updated_at = Utc::now();

        self.write_project(&project)?;
        Ok(project)
    }

    /// Delete a project; embedded milestones and analyses go with it
    pub fn delete(&self, owner: &str, id: ProjectId) -> Result<(), StoreError> {
        debug!("delete: called owner={owner} id={id}");
        let path = self.project_path(owner, id);
        if !path.exists() {
            return Err(StoreError::ProjectNotFound {
                owner: owner.to_string(),
                id,
            });
        }
        fs::remove_file(&path)?;
        info!("Deleted project {id} for owner {owner}");
        Ok(())
    }

    /// Set a milestone's status and recompute derived progress from scratch
    pub fn update_milestone(
        &self,
        owner: &str,
        project_id: ProjectId,
        milestone_id: MilestoneId,
        status: MilestoneStatus,
    ) -> Result<Project, StoreError> {
        debug!("update_milestone: called owner={owner} project={project_id} milestone={milestone_id} status={status}");
        let mut project = self.read_project(owner, project_id)?;

        let milestone = project
            .milestones
            .iter_mut()
            .find(|m| m.id == milestone_id)
            .ok_or(StoreError::MilestoneNotFound {
                project: project_id,
                id: milestone_id,
            })?;

        milestone.status = status;
        milestone.completed_at = match status {
            MilestoneStatus::Completed => Some(Utc::now()),
            MilestoneStatus::Pending => None,
        };

        project.recompute_progress();
        project.updated_at = Utc::now();

        self.write_project(&project)?;
        info!("Updated milestone {milestone_id} on project {project_id} for owner {owner}, progress {}%", project.progress);
        Ok(project)
    }

    /// Append an analysis record; the latest record is the current one
    pub fn add_analysis(&self, owner: &str, id: ProjectId, analysis: NewAnalysis) -> Result<u32, StoreError> {
        debug!("add_analysis: called owner={owner} id={id} score={}", analysis.feasibility_score);
        let mut project = self.read_project(owner, id)?;

        let analysis_id = project.analyses.len() as u32 + 1;
        project.analyses.push(AnalysisRecord {
            id: analysis_id,
            feasibility_score: analysis.feasibility_score,
            skill: analysis.skill,
            budget: analysis.budget,
            recommendation: analysis.recommendation,
            created_at: Utc::now(),
        });
        project.updated_at = Utc::now();

        self.write_project(&project)?;
        Ok(analysis_id)
    }

    /// Most recent analysis for a project, if any
    pub fn latest_analysis(&self, owner: &str, id: ProjectId) -> Result<Option<AnalysisRecord>, StoreError> {
        debug!("latest_analysis: called owner={owner} id={id}");
        let project = self.read_project(owner, id)?;
        Ok(project.latest_analysis().cloned())
    }

    /// Aggregate statistics over one owner's projects
    pub fn statistics(&self, owner: &str) -> Result<UserStatistics, StoreError> {
        debug!("statistics: called owner={owner}");
        let projects = self.list(owner)?;

        let mut stats = UserStatistics {
            total_projects: projects.len(),
            ..Default::default()
        };

        for project in &projects {
            match project.status {
                ProjectStatus::Planning => stats.planning += 1,
                ProjectStatus::InProgress => stats.in_progress += 1,
                ProjectStatus::Completed => stats.completed += 1,
                ProjectStatus::OnHold => stats.on_hold += 1,
            }
            stats.completed_milestones += project
                .milestones
                .iter()
                .filter(|m| m.status == MilestoneStatus::Completed)
                .count();
        }

        Ok(stats)
    }

    /// List owners that have at least one project
    pub fn list_owners(&self) -> Result<Vec<String>, StoreError> {
        let mut owners = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            if entry.path().is_dir()
                && let Some(name) = entry.file_name().to_str()
            {
                owners.push(name.to_string());
            }
        }
        owners.sort();
        Ok(owners)
    }

    fn preferences_path(&self, owner: &str) -> PathBuf {
        self.owner_dir(owner).join(PREFERENCES_FILE)
    }

    /// All preferences for an owner; empty map when none are set
    pub fn preferences(&self, owner: &str) -> Result<BTreeMap<String, serde_json::Value>, StoreError> {
        debug!("preferences: called owner={owner}");
        let path = self.preferences_path(owner);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Set one preference, overwriting any previous value for the key
    pub fn set_preference(&self, owner: &str, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        debug!("set_preference: called owner={owner} key={key}");
        fs::create_dir_all(self.owner_dir(owner))?;

        let mut prefs = self.preferences(owner)?;
        prefs.insert(key.to_string(), value);
        fs::write(self.preferences_path(owner), serde_json::to_string_pretty(&prefs)?)?;
        Ok(())
    }

    /// One preference value, or None when the key was never set
    pub fn get_preference(&self, owner: &str, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        debug!("get_preference: called owner={owner} key={key}");
        Ok(self.preferences(owner)?.get(key).cloned())
    }
}

/// Filesystem-safe key for an owner identifier (emails are common owners)
fn owner_key(owner: &str) -> String {
    owner
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '@') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
