use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::host::CommandExecutor;
use crate::policy::CommandPolicy;
use crate::queue::CommandQueue;

/// Tick-driven drain loop. Each tick re-iterates the current sequence in
/// order and dispatches every non-empty, policy-approved entry — queued
/// commands repeat every tick until cancelled or replaced.
pub struct Ticker {
    queue: Arc<CommandQueue>,
    policy: Arc<CommandPolicy>,
    executor: Arc<dyn CommandExecutor>,
}

impl Ticker {
    pub fn new(
        queue: Arc<CommandQueue>,
        policy: Arc<CommandPolicy>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            queue,
            policy,
            executor,
        }
    }

    /// One drain pass. Hosts that own their own tick cadence call this once
    /// per tick; the sequence itself is never mutated here.
    pub fn tick(&self) {
        let commands = self.queue.snapshot();
        for command in commands.iter() {
            if command.is_empty() {
                continue;
            }
            if !self.policy.permits(command) {
                tracing::warn!(command = %command, "blocked by command policy");
                continue;
            }
            tracing::info!(command = %command, "dispatch");
            self.executor.dispatch(command);
        }
    }

    /// Drive `tick` on a fixed interval until the token is cancelled. For
    /// hosts (and the bundled console host) that want the loop owned here.
    pub async fn run(self, interval: Duration, shutdown: CancellationToken) {
        let mut ticks = tokio::time::interval(interval);
        ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticks.tick() => self.tick(),
            }
        }
    }
}
