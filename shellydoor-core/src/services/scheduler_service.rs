use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use reqwest::Method;
use tokio::task::AbortHandle;
use tokio::time;

use crate::configs::{PendingActionPolicy, Timings};
use crate::models::DoorState;
use crate::services::actuator_service::Actuator;
use crate::services::door_service::DoorStateMachine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelayedAction {
    /// Fires the close URL once to de-energize the relay. The result is ignored.
    SwitchOff,
    /// Asks the door to close through its normal target path.
    AutoLock,
}

struct PendingAction {
    id: u64,
    action: DelayedAction,
    handle: AbortHandle,
}

struct SchedulerInner {
    actuator: Arc<dyn Actuator>,
    switch_off_url: String,
    method: Method,
    switch_off_delay: Option<Duration>,
    auto_lock_delay: Option<Duration>,
    policy: PendingActionPolicy,
    pending: Mutex<Vec<PendingAction>>,
    next_id: AtomicU64,
}

/// Single-shot timers armed each time an open request succeeds.
#[derive(Clone)]
pub struct DelayedActionScheduler {
    inner: Arc<SchedulerInner>,
}

impl DelayedActionScheduler {
    pub fn new(
        actuator: Arc<dyn Actuator>,
        switch_off_url: String,
        method: Method,
        timings: &Timings,
        policy: PendingActionPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                actuator,
                switch_off_url,
                method,
                switch_off_delay: timings.switch_off_delay,
                auto_lock_delay: timings.auto_lock_delay,
                policy,
                pending: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn policy(&self) -> PendingActionPolicy {
        self.inner.policy
    }

    /// Arms whichever of switch-off and auto-lock is enabled, measured from now.
    pub fn arm_for_open(&self, door: &DoorStateMachine) {
        if let Some(delay) = self.inner.switch_off_delay {
            tracing::info!("Waiting {:?} for switch off", delay);

            let actuator = Arc::clone(&self.inner.actuator);
            let url = self.inner.switch_off_url.clone();
            let method = self.inner.method.clone();

            self.schedule(DelayedAction::SwitchOff, delay, async move {
                tracing::info!("SwitchOff...");
                if let Err(e) = actuator.send(&url, "", &method).await {
                    tracing::debug!("Switch off request failed: {}", e);
                }
            });
        }

        if let Some(delay) = self.inner.auto_lock_delay {
            tracing::info!("Waiting {:?} for autolock", delay);

            let door = door.clone();

            self.schedule(DelayedAction::AutoLock, delay, async move {
                tracing::info!("Autolocking...");
                if let Err(e) = door.request_target(DoorState::Closed).await {
                    tracing::warn!("Autolock failed: {}", e);
                }
            });
        }
    }

    /// Number of armed actions of the given kind that have not fired yet.
    pub fn pending(&self, action: DelayedAction) -> usize {
        self.lock_pending()
            .iter()
            .filter(|entry| entry.action == action)
            .count()
    }

    pub fn cancel(&self, action: DelayedAction) -> usize {
        Self::cancel_matching(&mut self.lock_pending(), |entry| entry.action == action)
    }

    pub fn cancel_all(&self) -> usize {
        Self::cancel_matching(&mut self.lock_pending(), |_| true)
    }

    fn schedule<F>(&self, action: DelayedAction, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.lock_pending();

        if self.inner.policy == PendingActionPolicy::Supersede {
            let cancelled = Self::cancel_matching(&mut pending, |entry| entry.action == action);
            if cancelled > 0 {
                tracing::debug!("Replaced {} pending {:?} actions", cancelled, action);
            }
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let scheduler = self.clone();

        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            scheduler.forget(id);
            task.await;
        });

        pending.push(PendingAction {
            id,
            action,
            handle: handle.abort_handle(),
        });
    }

    fn forget(&self, id: u64) {
        self.lock_pending().retain(|entry| entry.id != id);
    }

    fn cancel_matching<P>(pending: &mut Vec<PendingAction>, predicate: P) -> usize
    where
        P: Fn(&PendingAction) -> bool,
    {
        let before = pending.len();
        pending.retain(|entry| {
            if predicate(entry) {
                entry.handle.abort();
                false
            } else {
                true
            }
        });

        before - pending.len()
    }

    fn lock_pending(&self) -> MutexGuard<'_, Vec<PendingAction>> {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
