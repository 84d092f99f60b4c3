//! Scheduler configuration (§4.4, §6: `scheduler: {heartbeatMs, minIdleMs,
//! maxTasksPerHour, enabled}`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SchedulerConfig {
    pub heartbeat_ms: Option<u64>,
    pub min_idle_ms: Option<u64>,
    pub max_tasks_per_hour: Option<u32>,
    pub enabled: Option<bool>,
}

impl SchedulerConfig {
    /// Default heartbeat: 15 minutes, per §4.4 "default 15 min for the
    /// autonomous builder; shorter for the interactive scheduler".
    pub fn effective_heartbeat_ms(&self) -> u64 {
        self.heartbeat_ms.unwrap_or(900_000)
    }

    pub fn effective_min_idle_ms(&self) -> u64 {
        self.min_idle_ms.unwrap_or(60_000)
    }

    pub fn effective_max_tasks_per_hour(&self) -> u32 {
        self.max_tasks_per_hour.unwrap_or(12)
    }

    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}
