//! The interaction-cycle engine: drives a bounded observe→act→wait→observe
//! loop against injected actuator and perception capabilities, judging
//! after each action whether the page responded.

pub mod config;
pub mod engine;
pub mod errors;
pub mod ports;
pub mod state;

pub use config::EngineConfig;
pub use engine::{EngineBuilder, InteractionCycleEngine};
pub use errors::{ActuatorError, EngineError, PerceptionError};
pub use ports::{Actuator, PerceptionSource};
pub use state::{CycleOutcome, EngineStatus, RunBudget, RunCounters, RunReport, StopReason};
