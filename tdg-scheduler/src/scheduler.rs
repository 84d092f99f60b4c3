//! `ProactiveScheduler` — the single-threaded cooperative heartbeat loop
//! (§4.4). Bind a task catalog and collaborators, `start()`, and the
//! scheduler ticks on its own `tokio` task until `stop()`ped.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{watch, Mutex as AsyncMutex};
use tokio::task::JoinHandle;

use tdg_core::config::SchedulerConfig;
use tdg_core::errors::SchedulerError;

use crate::classify::TaskClassifier;
use crate::providers::{ExecutionSubstrate, IdlenessProvider, SovereigntyProvider};
use crate::task::{TaskRegistry, TickContext};
use crate::tiering::tier_for;
use crate::budget::HourlyBudget;

/// Snapshot of scheduler state, returned by `get_status`.
#[derive(Debug, Clone, Default)]
pub struct SchedulerStatus {
    pub running: bool,
    pub ticks: u64,
    pub tasks_registered: usize,
    pub tasks_emitted: u64,
    pub budget_remaining: u32,
}

struct Collaborators {
    classifier: Arc<dyn TaskClassifier>,
    idleness: Arc<dyn IdlenessProvider>,
    sovereignty: Arc<dyn SovereigntyProvider>,
    substrate: Arc<dyn ExecutionSubstrate>,
}

pub struct ProactiveScheduler {
    config: SchedulerConfig,
    registry: Arc<AsyncMutex<TaskRegistry>>,
    collaborators: Arc<Collaborators>,
    budget: Arc<std::sync::Mutex<HourlyBudget>>,
    status: Arc<std::sync::Mutex<SchedulerStatus>>,
    stop_tx: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

impl ProactiveScheduler {
    pub fn new(
        config: SchedulerConfig,
        classifier: Arc<dyn TaskClassifier>,
        idleness: Arc<dyn IdlenessProvider>,
        sovereignty: Arc<dyn SovereigntyProvider>,
        substrate: Arc<dyn ExecutionSubstrate>,
    ) -> Self {
        let max_per_hour = config.effective_max_tasks_per_hour();
        Self {
            config,
            registry: Arc::new(AsyncMutex::new(TaskRegistry::new())),
            collaborators: Arc::new(Collaborators {
                classifier,
                idleness,
                sovereignty,
                substrate,
            }),
            budget: Arc::new(std::sync::Mutex::new(HourlyBudget::new(max_per_hour, Instant::now()))),
            status: Arc::new(std::sync::Mutex::new(SchedulerStatus::default())),
            stop_tx: None,
            handle: None,
        }
    }

    /// Registers a task with the catalog before (or while) the scheduler
    /// is running.
    pub async fn bind(&self, task: Box<dyn crate::task::ScheduledTask>) {
        let mut registry = self.registry.lock().await;
        registry.register(task);
        self.status.lock().unwrap().tasks_registered = registry.len();
    }

    /// Starts the heartbeat loop on a background `tokio` task. Returns
    /// `SchedulerError::AlreadyRunning` if already started.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if self.handle.is_some() {
            return Err(SchedulerError::AlreadyRunning);
        }
        if !self.config.effective_enabled() {
            tracing::info!("scheduler disabled by configuration, start() is a no-op");
            return Ok(());
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let heartbeat = Duration::from_millis(self.config.effective_heartbeat_ms());
        let min_idle_ms = self.config.effective_min_idle_ms();
        let registry = Arc::clone(&self.registry);
        let collaborators = Arc::clone(&self.collaborators);
        let budget = Arc::clone(&self.budget);
        let status = Arc::clone(&self.status);

        status.lock().unwrap().running = true;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(heartbeat);
            interval.tick().await; // skip the immediate first tick

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        run_tick(&registry, &collaborators, &budget, &status, min_idle_ms).await;
                    }
                    _ = stop_rx.changed() => {
                        tracing::info!("scheduler stop requested, letting the in-flight tick finish");
                        break;
                    }
                }
            }
            status.lock().unwrap().running = false;
        });

        self.stop_tx = Some(stop_tx);
        self.handle = Some(handle);
        Ok(())
    }

    /// Signals the loop to stop after its in-flight tick completes and
    /// awaits the background task. Tasks already emitted are not
    /// recalled (§4.4 "Cancellation").
    pub async fn stop(&mut self) -> Result<(), SchedulerError> {
        let Some(stop_tx) = self.stop_tx.take() else {
            return Err(SchedulerError::NotRunning);
        };
        let _ = stop_tx.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        Ok(())
    }

    pub fn get_status(&self) -> SchedulerStatus {
        let mut status = self.status.lock().unwrap().clone();
        status.budget_remaining = self.budget.lock().unwrap().remaining();
        status
    }
}

async fn run_tick(
    registry: &Arc<AsyncMutex<TaskRegistry>>,
    collaborators: &Arc<Collaborators>,
    budget: &Arc<std::sync::Mutex<HourlyBudget>>,
    status: &Arc<std::sync::Mutex<SchedulerStatus>>,
    min_idle_ms: u64,
) {
    let (idle_ms, running_tasks) = match collaborators.idleness.idleness().await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "idleness provider failed, skipping tick");
            return;
        }
    };
    if idle_ms < min_idle_ms {
        return;
    }
    let sovereignty = match collaborators.sovereignty.sovereignty().await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "sovereignty provider failed, skipping tick");
            return;
        }
    };

    let ctx = TickContext {
        idle_ms,
        running_tasks,
        sovereignty,
    };

    status.lock().unwrap().ticks += 1;

    let mut registry = registry.lock().await;
    let now = Instant::now();

    // Registration order within a tick (§4.4 "Ordering guarantees").
    let candidates: Vec<usize> = (0..registry.tasks().len()).collect();
    for index in candidates {
        let (should_run, cooldown_elapsed, name, room, prompt, description, task_categories) = {
            let task = &registry.tasks()[index];
            (
                task.should_run(&ctx),
                registry.cooldown_elapsed(task.as_ref(), now),
                task.name().to_string(),
                task.room().to_string(),
                task.prompt(&ctx),
                task.description().to_string(),
                task.categories(),
            )
        };
        if !should_run || !cooldown_elapsed {
            continue;
        }

        let has_capacity = budget.lock().unwrap().has_capacity(now);
        if !has_capacity {
            tracing::debug!(task = %name, "hourly task budget exhausted, skipping until the hour rolls");
            continue;
        }

        let classification = collaborators.classifier.classify(&name, &description);
        let tier = tier_for(classification.risk, sovereignty);

        match collaborators
            .substrate
            .inject(tier, &room, &prompt, &task_categories)
            .await
        {
            Ok(()) => {
                registry.record_fired(&name, now);
                budget.lock().unwrap().record_emission(now);
                status.lock().unwrap().tasks_emitted += 1;
            }
            Err(e) => {
                tracing::warn!(task = %name, error = %e, "injection failed, cooldown not advanced");
            }
        }
    }
}
