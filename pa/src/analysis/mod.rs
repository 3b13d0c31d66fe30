//! Deterministic analysis tools
//!
//! Pure scoring functions whose outputs feed the feasibility prompt:
//! skill-gap assessment and budget estimation. Neither touches the
//! network or the store.

mod budget;
mod skill;

pub use budget::{AnalysisError, calculate_budget};
pub use skill::assess_skills;
