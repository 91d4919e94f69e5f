//! State module for tracking discovery progress
//!
//! # Components
//!
//! - `DiscoveryPhase`: The orchestrator's state machine
//! - `Frontier` / `VisitedSet`: Per-traversal work queue and cycle guard
//! - `Pacer`: Politeness delay between worklist requests

mod frontier;
mod pacing;
mod phase;

// Re-export main types
pub use frontier::{Frontier, FrontierEntry, VisitedSet};
pub use pacing::Pacer;
pub use phase::DiscoveryPhase;
