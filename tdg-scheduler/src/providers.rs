//! Collaborator interfaces the scheduler is injected with (§4.4 step 1,
//! §6 "Collaborator interfaces consumed by the core").

use async_trait::async_trait;

use tdg_core::errors::SchedulerError;

/// Queried once per tick: current idleness and the number of tasks the
/// execution substrate is already running.
#[async_trait]
pub trait IdlenessProvider: Send + Sync {
    async fn idleness(&self) -> Result<(u64, u32), SchedulerError>;
}

/// Queried once per tick: the caller's current sovereignty score, as
/// produced by the most recent pipeline run.
#[async_trait]
pub trait SovereigntyProvider: Send + Sync {
    async fn sovereignty(&self) -> Result<f64, SchedulerError>;
}

/// `inject(tier, room, prompt, categories)` (§4.4 step 2, §6). The
/// execution substrate owns countdown, human confirmation, and the
/// actual invocation — the scheduler only emits and moves on.
#[async_trait]
pub trait ExecutionSubstrate: Send + Sync {
    async fn inject(
        &self,
        tier: crate::tiering::InjectionTier,
        room: &str,
        prompt: &str,
        categories: &[tdg_core::categories::Category],
    ) -> Result<(), SchedulerError>;
}
