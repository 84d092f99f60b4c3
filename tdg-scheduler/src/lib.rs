//! Proactive scheduler (§4.4): a single-threaded cooperative heartbeat
//! loop that classifies registered tasks' risk and priority, maps them to
//! an injection tier against the caller's current sovereignty, enforces a
//! per-hour emission budget and per-task cooldowns, and emits work into an
//! injected execution substrate. The scheduler never blocks on task
//! completion — it only emits.

pub mod budget;
pub mod classify;
pub mod providers;
pub mod scheduler;
pub mod task;
pub mod tiering;

pub use classify::{Classification, DeterministicClassifier, Priority, Risk, TaskClassifier};
pub use providers::{ExecutionSubstrate, IdlenessProvider, SovereigntyProvider};
pub use scheduler::{ProactiveScheduler, SchedulerStatus};
pub use task::{ScheduledTask, TaskRegistry, TickContext};
pub use tiering::{tier_for, InjectionTier};
