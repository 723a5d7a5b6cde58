use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::errors::{ConfigError, DoorError};
use crate::services::door_service::{DoorStateMachine, PollOutcome};

/// Periodically refreshes the door from its status endpoint.
#[derive(Clone)]
pub struct PollingService {
    door: DoorStateMachine,
    interval: Duration,
}

impl PollingService {
    /// Fails on a zero interval, which no timer can tick on.
    pub fn new(door: DoorStateMachine, interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::InvalidDuration {
                key: "pollInterval",
                value: 0.0,
            });
        }

        Ok(Self { door, interval })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one poll and logs its outcome. Failures never stop the loop.
    pub async fn tick(&self) -> Result<PollOutcome, DoorError> {
        let outcome = self.door.poll().await;

        match &outcome {
            Ok(PollOutcome::Skipped) => tracing::debug!("Door is moving, skipping status poll"),
            Ok(PollOutcome::Updated(sample)) => tracing::trace!("Polled door state {}", sample.state),
            Ok(PollOutcome::Discarded(sample)) => {
                tracing::debug!("Discarded polled state {}, a move started meanwhile", sample.state)
            }
            Err(e) => tracing::warn!("Status poll failed: {}", e),
        }

        outcome
    }

    /// Polls immediately, then every interval until the handle is stopped or dropped.
    pub fn spawn(&self) -> PollingHandle {
        tracing::info!("Polling door status every {:?}", self.interval);

        let service = self.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(service.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let _ = service.tick().await;
            }
        });

        PollingHandle { handle }
    }
}

/// Owns the polling task. Dropping the handle stops polling.
pub struct PollingHandle {
    handle: JoinHandle<()>,
}

impl PollingHandle {
    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
