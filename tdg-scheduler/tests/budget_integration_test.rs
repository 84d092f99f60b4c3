use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use tdg_core::categories::Category;
use tdg_core::config::SchedulerConfig;
use tdg_core::errors::SchedulerError;
use tdg_scheduler::{
    DeterministicClassifier, ExecutionSubstrate, IdlenessProvider, InjectionTier,
    ProactiveScheduler, ScheduledTask, SovereigntyProvider, TickContext,
};

struct AlwaysIdle;
#[async_trait]
impl IdlenessProvider for AlwaysIdle {
    async fn idleness(&self) -> Result<(u64, u32), SchedulerError> {
        Ok((600_000, 0))
    }
}

struct FixedSovereignty(f64);
#[async_trait]
impl SovereigntyProvider for FixedSovereignty {
    async fn sovereignty(&self) -> Result<f64, SchedulerError> {
        Ok(self.0)
    }
}

struct CountingSubstrate {
    injections: Arc<AtomicU32>,
}
#[async_trait]
impl ExecutionSubstrate for CountingSubstrate {
    async fn inject(
        &self,
        _tier: InjectionTier,
        _room: &str,
        _prompt: &str,
        _categories: &[Category],
    ) -> Result<(), SchedulerError> {
        self.injections.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct NoCooldownTask(&'static str);
impl ScheduledTask for NoCooldownTask {
    fn name(&self) -> &str {
        self.0
    }
    fn description(&self) -> &str {
        "repeated low-stakes check-in"
    }
    fn should_run(&self, _ctx: &TickContext) -> bool {
        true
    }
    fn cooldown(&self) -> Duration {
        Duration::ZERO
    }
    fn room(&self) -> &str {
        "general"
    }
    fn prompt(&self, _ctx: &TickContext) -> String {
        "check in".to_string()
    }
    fn categories(&self) -> Vec<Category> {
        vec![]
    }
}

#[tokio::test]
async fn hourly_budget_caps_emissions_across_many_fast_ticks() {
    let injections = Arc::new(AtomicU32::new(0));
    let mut config = SchedulerConfig::default();
    config.heartbeat_ms = Some(10);
    config.min_idle_ms = Some(0);
    config.max_tasks_per_hour = Some(3);

    let mut scheduler = ProactiveScheduler::new(
        config,
        Arc::new(DeterministicClassifier::default()),
        Arc::new(AlwaysIdle),
        Arc::new(FixedSovereignty(0.99)),
        Arc::new(CountingSubstrate {
            injections: Arc::clone(&injections),
        }),
    );
    scheduler.bind(Box::new(NoCooldownTask("check_in"))).await;

    scheduler.start().unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    scheduler.stop().await.unwrap();

    let status = scheduler.get_status();
    assert!(status.ticks > 3, "expected several ticks, got {}", status.ticks);
    assert_eq!(injections.load(Ordering::SeqCst), 3);
    assert_eq!(status.tasks_emitted, 3);
    assert_eq!(status.budget_remaining, 0);
}
