//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Project idea generation prompt
pub const IDEAS: &str = include_str!("../../prompts/ideas.pmt");

/// Tech trends research prompt
pub const TRENDS: &str = include_str!("../../prompts/trends.pmt");

/// Project roadmap prompt
pub const ROADMAP: &str = include_str!("../../prompts/roadmap.pmt");

/// Feasibility assessment prompt
pub const FEASIBILITY: &str = include_str!("../../prompts/feasibility.pmt");

/// System context for consultation chat
pub const CHAT: &str = include_str!("../../prompts/chat.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "ideas" => Some(IDEAS),
        "trends" => Some(TRENDS),
        "roadmap" => Some(ROADMAP),
        "feasibility" => Some(FEASIBILITY),
        "chat" => Some(CHAT),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
