use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tokio::sync::RwLock;
use tokio::task::AbortHandle;
use tokio::time;

use crate::configs::AccessoryConfig;
use crate::errors::{ConfigError, DoorError};
use crate::host::DoorCharacteristics;
use crate::models::{DoorSnapshot, DoorState, StatusSample};
use crate::services::actuator_service::Actuator;
use crate::services::scheduler_service::DelayedActionScheduler;
use crate::services::status_extractor::StatusExtractor;

/// Result of a single status poll.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The door was moving, nothing was requested.
    Skipped,
    /// The sample was applied to current and target state.
    Updated(StatusSample),
    /// A move started while the status request was in flight; the sample was dropped.
    Discarded(StatusSample),
}

#[derive(Debug, Clone)]
struct Endpoints {
    open_url: String,
    close_url: String,
    status_url: Option<String>,
    method: Method,
}

struct Transition {
    id: u64,
    settled: DoorState,
    handle: AbortHandle,
}

struct DoorStatus {
    current: DoorState,
    target: DoorState,
    transition: Option<Transition>,
    last_request: u64,
}

struct DoorInner {
    actuator: Arc<dyn Actuator>,
    extractor: StatusExtractor,
    host: Arc<dyn DoorCharacteristics>,
    endpoints: Endpoints,
    open_time: Duration,
    close_time: Duration,
    scheduler: DelayedActionScheduler,
    status: RwLock<DoorStatus>,
    debug: bool,
}

/// Four-state garage door driven by relay calls and simulated travel time.
///
/// All door state lives here. Moves are never refused while the door is
/// travelling: a new move aborts the pending completion of the previous one,
/// so only the latest request settles the door. Status samples are only
/// applied while no move is pending.
#[derive(Clone)]
pub struct DoorStateMachine {
    inner: Arc<DoorInner>,
}

impl DoorStateMachine {
    pub fn new(
        config: &AccessoryConfig,
        actuator: Arc<dyn Actuator>,
        host: Arc<dyn DoorCharacteristics>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let timings = config.timings()?;
        let method = config.method()?;
        let extractor = StatusExtractor::new(config)?;
        let scheduler = DelayedActionScheduler::new(
            Arc::clone(&actuator),
            config.close_url.clone(),
            method.clone(),
            &timings,
            config.pending_actions,
        );

        Ok(Self {
            inner: Arc::new(DoorInner {
                actuator,
                extractor,
                host,
                endpoints: Endpoints {
                    open_url: config.open_url.clone(),
                    close_url: config.close_url.clone(),
                    status_url: config.status_url.clone().filter(|url| !url.is_empty()),
                    method,
                },
                open_time: timings.open_time,
                close_time: timings.close_time,
                scheduler,
                status: RwLock::new(DoorStatus {
                    current: DoorState::Closed,
                    target: DoorState::Closed,
                    transition: None,
                    last_request: 0,
                }),
                debug: config.debug,
            }),
        })
    }

    pub fn scheduler(&self) -> &DelayedActionScheduler {
        &self.inner.scheduler
    }

    pub async fn snapshot(&self) -> DoorSnapshot {
        let status = self.inner.status.read().await;

        DoorSnapshot {
            current: status.current,
            target: status.target,
            is_moving: status.transition.is_some(),
        }
    }

    pub async fn current_state(&self) -> DoorState {
        self.inner.status.read().await.current
    }

    pub async fn target_state(&self) -> DoorState {
        self.inner.status.read().await.target
    }

    pub async fn is_moving(&self) -> bool {
        self.inner.status.read().await.transition.is_some()
    }

    /// Sets current and target state without touching the relay.
    pub async fn initialize(&self, state: DoorState) {
        let mut status = self.inner.status.write().await;
        if let Some(transition) = status.transition.take() {
            transition.handle.abort();
        }

        status.current = state;
        status.target = state;
        self.inner.host.update_current_door_state(state);
        self.inner.host.update_target_door_state(state);
    }

    /// Fires the relay for `target` and starts the simulated move.
    ///
    /// `Closed` closes the door, every other state opens it. When the relay
    /// call fails nothing changes and the failure is returned.
    pub async fn request_target(&self, target: DoorState) -> Result<(), DoorError> {
        tracing::debug!("Setting target door state to {}", target);

        let closing = target == DoorState::Closed;
        let (target, url) = if closing {
            (DoorState::Closed, &self.inner.endpoints.close_url)
        } else {
            (DoorState::Open, &self.inner.endpoints.open_url)
        };

        if let Err(source) = self
            .inner
            .actuator
            .send(url, "", &self.inner.endpoints.method)
            .await
        {
            tracing::warn!("Error setting target door state: {}", source);
            return Err(DoorError::Command { target, source });
        }

        if closing {
            tracing::info!("Started closing");
            self.begin_transition(DoorState::Closing, DoorState::Closed, self.inner.close_time)
                .await;
        } else {
            tracing::info!("Started opening");
            self.inner.scheduler.arm_for_open(self);
            self.begin_transition(DoorState::Opening, DoorState::Open, self.inner.open_time)
                .await;
        }

        Ok(())
    }

    /// Requests the status endpoint and classifies the answer without applying it.
    pub async fn fetch_status(&self) -> Result<StatusSample, DoorError> {
        let url = self
            .inner
            .endpoints
            .status_url
            .as_deref()
            .ok_or(ConfigError::MissingStatusUrl)?;

        if self.inner.debug {
            tracing::debug!("Getting status: {}", url);
        }

        let response = match self
            .inner
            .actuator
            .send(url, "", &self.inner.endpoints.method)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Error getting status: {}", e);
                self.inner.host.report_failure("Polling failed");
                return Err(e.into());
            }
        };

        self.inner.extractor.extract(&response.body).map_err(|e| {
            tracing::error!("Error reading status: {}", e);
            DoorError::from(e)
        })
    }

    /// Applies a status sample to current and target state.
    ///
    /// Returns `false`, leaving the state alone, while a move is pending.
    pub async fn reconcile(&self, sample: &StatusSample) -> bool {
        self.apply_sample(sample, None).await
    }

    /// One status round trip, skipped entirely while the door is moving.
    ///
    /// The sample is discarded when any move started while the status
    /// request was in flight, even one that already finished.
    pub async fn poll(&self) -> Result<PollOutcome, DoorError> {
        let requested_after = {
            let status = self.inner.status.read().await;
            if status.transition.is_some() {
                return Ok(PollOutcome::Skipped);
            }
            status.last_request
        };

        let sample = self.fetch_status().await?;

        if self.apply_sample(&sample, Some(requested_after)).await {
            Ok(PollOutcome::Updated(sample))
        } else {
            Ok(PollOutcome::Discarded(sample))
        }
    }

    /// Stops the pending move and every pending delayed action.
    pub async fn shutdown(&self) {
        let cancelled = self.inner.scheduler.cancel_all();
        if cancelled > 0 {
            tracing::debug!("Cancelled {} pending delayed actions", cancelled);
        }

        if let Some(transition) = self.inner.status.write().await.transition.take() {
            transition.handle.abort();
        }
    }

    async fn apply_sample(&self, sample: &StatusSample, requested_after: Option<u64>) -> bool {
        let mut status = self.inner.status.write().await;
        if status.transition.is_some() {
            tracing::debug!("Door is moving, ignoring status {}", sample.state);
            return false;
        }
        if requested_after.is_some_and(|id| id != status.last_request) {
            tracing::debug!("Door moved since status was requested, ignoring status {}", sample.state);
            return false;
        }

        status.current = sample.state;
        status.target = sample.state;
        self.inner.host.update_current_door_state(sample.state);
        self.inner.host.update_target_door_state(sample.state);

        if self.inner.debug {
            tracing::debug!("Updated door state to: {}", sample.state);
        }

        true
    }

    async fn begin_transition(&self, moving: DoorState, settled: DoorState, duration: Duration) {
        let mut status = self.inner.status.write().await;

        status.last_request += 1;
        let id = status.last_request;

        if let Some(previous) = status.transition.take() {
            tracing::debug!("Move {} superseded by move {}", previous.id, id);
            previous.handle.abort();
        }

        status.current = moving;
        status.target = settled;
        self.inner.host.update_target_door_state(settled);
        self.inner.host.update_current_door_state(moving);

        let machine = self.clone();
        let handle = tokio::spawn(async move {
            time::sleep(duration).await;
            machine.complete_transition(id).await;
        });

        status.transition = Some(Transition {
            id,
            settled,
            handle: handle.abort_handle(),
        });
    }

    async fn complete_transition(&self, id: u64) {
        let mut status = self.inner.status.write().await;
        let Some(transition) = status.transition.take_if(|transition| transition.id == id) else {
            return;
        };

        status.current = transition.settled;
        self.inner.host.update_current_door_state(transition.settled);

        match transition.settled {
            DoorState::Closed => tracing::info!("Finished closing"),
            _ => tracing::info!("Finished opening"),
        }
    }
}
