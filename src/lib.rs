//! Gameprobe library
//!
//! Exposes the settings, descriptor loading, and simulated-game modules for
//! integration testing.

pub mod config;
pub mod descriptor;
pub mod sim;

// Re-export the engine surface for external use
pub use action_catalog::{CatalogBuilder, RetryLedger};
pub use gameprobe_core_types::{Action, ActionKind, GameDescriptor, PerceptionSnapshot};
pub use interaction_engine::{
    EngineConfig, EngineStatus, InteractionCycleEngine, RunBudget, RunReport,
};
pub use perceiver_diff::{ArtifactDetector, ChangeDetector, StructuralDetector};
pub use sim::SimulatedGame;
