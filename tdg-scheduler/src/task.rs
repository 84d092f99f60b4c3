//! The registered task catalog (§4.4 step 2).

use std::time::{Duration, Instant};

use tdg_core::categories::Category;

/// Context handed to a task's `should_run` predicate on every tick.
pub struct TickContext {
    pub idle_ms: u64,
    pub running_tasks: u32,
    pub sovereignty: f64,
}

/// A schedulable unit of proactive work.
///
/// `should_run` is pure with respect to `ctx` — implementations should not
/// perform I/O there; side effects belong behind `prompt`/`categories` or
/// the execution substrate the scheduler injects into.
pub trait ScheduledTask: Send + Sync {
    /// Stable name, used for cooldown tracking and log correlation.
    fn name(&self) -> &str;

    /// Human-readable description, fed to the risk/priority classifier
    /// alongside `name()`.
    fn description(&self) -> &str;

    /// Whether this task wants to run given the current tick context.
    fn should_run(&self, ctx: &TickContext) -> bool;

    /// Minimum wall-clock time between two emissions of this task.
    fn cooldown(&self) -> Duration;

    /// Discord-style destination the execution substrate should deliver
    /// the injected prompt into.
    fn room(&self) -> &str;

    /// The prompt text to inject when this task fires.
    fn prompt(&self, ctx: &TickContext) -> String;

    /// Categories this task's work is scored against, forwarded to the
    /// execution substrate for bookkeeping (not consulted by the
    /// scheduler itself — permission checks happen at injection time).
    fn categories(&self) -> Vec<Category>;
}

/// Registration-ordered collection of tasks, plus the last-fired instant
/// per task used to enforce cooldowns.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: Vec<Box<dyn ScheduledTask>>,
    last_fired: std::collections::HashMap<String, Instant>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a task. Tasks are considered in registration order within
    /// a tick (§4.4 "Ordering guarantees").
    pub fn register(&mut self, task: Box<dyn ScheduledTask>) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Box<dyn ScheduledTask>] {
        &self.tasks
    }

    /// Whether `task`'s cooldown has elapsed, using `now` as the
    /// reference instant so callers can test without sleeping.
    pub fn cooldown_elapsed(&self, task: &dyn ScheduledTask, now: Instant) -> bool {
        match self.last_fired.get(task.name()) {
            Some(last) => now.saturating_duration_since(*last) >= task.cooldown(),
            None => true,
        }
    }

    /// Records that `task_name` fired at `now`, resetting its cooldown.
    pub fn record_fired(&mut self, task_name: &str, now: Instant) {
        self.last_fired.insert(task_name.to_string(), now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub {
        name: String,
        cooldown: Duration,
    }

    impl ScheduledTask for Stub {
        fn name(&self) -> &str {
            &self.name
        }
        fn description(&self) -> &str {
            "stub task"
        }
        fn should_run(&self, _ctx: &TickContext) -> bool {
            true
        }
        fn cooldown(&self) -> Duration {
            self.cooldown
        }
        fn room(&self) -> &str {
            "general"
        }
        fn prompt(&self, _ctx: &TickContext) -> String {
            "do the thing".to_string()
        }
        fn categories(&self) -> Vec<Category> {
            vec![]
        }
    }

    #[test]
    fn unregistered_task_has_no_cooldown() {
        let registry = TaskRegistry::new();
        let task = Stub {
            name: "t1".into(),
            cooldown: Duration::from_secs(60),
        };
        assert!(registry.cooldown_elapsed(&task, Instant::now()));
    }

    #[test]
    fn cooldown_blocks_until_elapsed() {
        let mut registry = TaskRegistry::new();
        let task = Stub {
            name: "t1".into(),
            cooldown: Duration::from_secs(60),
        };
        let t0 = Instant::now();
        registry.record_fired("t1", t0);
        assert!(!registry.cooldown_elapsed(&task, t0 + Duration::from_secs(30)));
        assert!(registry.cooldown_elapsed(&task, t0 + Duration::from_secs(61)));
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut registry = TaskRegistry::new();
        registry.register(Box::new(Stub {
            name: "a".into(),
            cooldown: Duration::ZERO,
        }));
        registry.register(Box::new(Stub {
            name: "b".into(),
            cooldown: Duration::ZERO,
        }));
        let names: Vec<&str> = registry.tasks().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
