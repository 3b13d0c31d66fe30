//! Session history tracking
//!
//! Records each agent interaction per session so the chat surface and the
//! `/summary` command can report what happened. Outputs are truncated
//! before storage so long LLM responses do not bloat the history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use tracing::debug;

/// Stored output is capped at this many characters
const MAX_STORED_OUTPUT: usize = 500;

/// Category of a recorded interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    GenerateIdeas,
    CreateRoadmap,
    AssessFeasibility,
    Chat,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::GenerateIdeas => "generate_ideas",
            ActionKind::CreateRoadmap => "create_roadmap",
            ActionKind::AssessFeasibility => "assess_feasibility",
            ActionKind::Chat => "chat",
        };
        write!(f, "{s}")
    }
}

/// One recorded interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: ActionKind,
    /// What the user asked for (domain, description, etc.)
    pub input: String,
    /// Truncated output
    pub output: String,
    pub timestamp: DateTime<Utc>,
}

/// Per-session interaction record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    pub history: Vec<HistoryEntry>,
}

impl SessionRecord {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            last_accessed: now,
            history: Vec::new(),
        }
    }
}

/// Summary counts for a session
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSummary {
    pub total_actions: usize,
    pub ideas_generated: usize,
    pub roadmaps_created: usize,
    pub assessments_run: usize,
    pub chat_messages: usize,
    pub created_at: Option<DateTime<Utc>>,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} actions: {} ideas, {} roadmaps, {} assessments, {} chat messages",
            self.total_actions,
            self.ideas_generated,
            self.roadmaps_created,
            self.assessments_run,
            self.chat_messages
        )
    }
}

/// Tracks interaction history across sessions
pub struct SessionTracker {
    sessions: Mutex<HashMap<String, SessionRecord>>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Ensure a session exists, returning its id
    pub fn get_or_create(&self, session_id: &str) -> String {
        let mut sessions = self.sessions.lock().unwrap();
        let record = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionRecord::new(session_id.to_string()));
        record.last_accessed = Utc::now();
        record.id.clone()
    }

    /// Record an interaction, truncating the output for storage
    pub fn record(&self, session_id: &str, action: ActionKind, input: &str, output: &str) {
        debug!(%session_id, %action, "record: called");
        let stored: String = output.chars().take(MAX_STORED_OUTPUT).collect();

        let mut sessions = self.sessions.lock().unwrap();
        let record = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionRecord::new(session_id.to_string()));
        record.last_accessed = Utc::now();
        record.history.push(HistoryEntry {
            action,
            input: input.to_string(),
            output: stored,
            timestamp: Utc::now(),
        });
    }

    /// Most recent `limit` entries, newest first
    pub fn history(&self, session_id: &str, limit: usize) -> Vec<HistoryEntry> {
        let sessions = self.sessions.lock().unwrap();
        match sessions.get(session_id) {
            Some(record) => record.history.iter().rev().take(limit).cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Per-category counts for a session
    pub fn summarize(&self, session_id: &str) -> SessionSummary {
        let sessions = self.sessions.lock().unwrap();
        let Some(record) = sessions.get(session_id) else {
            return SessionSummary::default();
        };

        let mut summary = SessionSummary {
            total_actions: record.history.len(),
            created_at: Some(record.created_at),
            last_accessed: Some(record.last_accessed),
            ..Default::default()
        };
        for entry in &record.history {
            match entry.action {
                ActionKind::GenerateIdeas => summary.ideas_generated += 1,
                ActionKind::CreateRoadmap => summary.roadmaps_created += 1,
                ActionKind::AssessFeasibility => summary.assessments_run += 1,
                ActionKind::Chat => summary.chat_messages += 1,
            }
        }
        summary
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}
