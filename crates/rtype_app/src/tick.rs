//! Fixed-timestep tick loop.
//!
//! Each tick advances the registry by a fixed `dt`, independent of how much
//! wall-clock time actually passed. Between ticks the loop sleeps for the
//! remainder of the configured interval.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::registry::Registry;

/// Configuration for the tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Simulated seconds per tick, passed to [`Registry::update`].
    pub dt: f64,
    /// Wall-clock pacing between ticks.
    pub interval: Duration,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            dt: 1.0,
            interval: Duration::from_millis(500),
            max_ticks: 5,
        }
    }
}

/// The tick loop and the registry it drives.
#[derive(Debug)]
pub struct TickLoop {
    /// Number of ticks run so far.
    tick_id: u64,
    config: TickConfig,
    registry: Registry,
}

impl TickLoop {
    /// Create a tick loop over `registry`.
    #[must_use]
    pub fn new(config: TickConfig, registry: Registry) -> Self {
        Self {
            tick_id: 0,
            config,
            registry,
        }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Give the registry back, ending the loop.
    #[must_use]
    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// Run one tick. Returns the number of entities moved.
    pub fn tick(&mut self) -> usize {
        self.tick_id += 1;
        let moved = self.registry.update(self.config.dt);
        debug!(tick_id = self.tick_id, dt = self.config.dt, moved, "tick complete");
        moved
    }

    /// Tick until `max_ticks` is reached, or forever if it is 0.
    pub async fn run(&mut self) {
        info!(
            dt = self.config.dt,
            interval_ms = self.config.interval.as_millis() as u64,
            max_ticks = self.config.max_ticks,
            "starting tick loop"
        );

        let mut tick_count = 0u64;
        loop {
            let start = Instant::now();
            self.tick();

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, "tick loop complete");
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < self.config.interval {
                tokio::time::sleep(self.config.interval - elapsed).await;
            } else if !self.config.interval.is_zero() {
                warn!(
                    tick_id = self.tick_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = self.config.interval.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }
    }
}
