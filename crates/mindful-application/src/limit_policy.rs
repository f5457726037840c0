//! What happens when the daily limit is reached.
//!
//! [`LimitPolicy`] reads the viewer's preference flags and decides; the
//! [`LimitWatcher`] task follows the clock's snapshots and runs the policy
//! each time the limit goes from "not reached" to "reached".

use std::sync::Arc;

use chrono::NaiveDate;
use mindful_core::clock::ClockSnapshot;
use mindful_core::user::{AuthApi, PreferencesRepository};
use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const NOTICE_CHANNEL_CAPACITY: usize = 16;

/// Signals for the host when the limit is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitNotice {
    /// Show the "daily limit reached" alert and banner.
    Alert,
    /// The viewer was logged out; route to the login entry point.
    LoggedOut,
}

/// Decides the reaction to a reached limit from preference flags.
pub struct LimitPolicy {
    preferences: Arc<dyn PreferencesRepository>,
    auth: Arc<dyn AuthApi>,
}

impl LimitPolicy {
    pub fn new(preferences: Arc<dyn PreferencesRepository>, auth: Arc<dyn AuthApi>) -> Self {
        Self { preferences, auth }
    }

    /// Runs the policy for a limit reached on `today`.
    ///
    /// Automatic logout happens at most once per day; the date is recorded
    /// before logging out. Unreadable preferences count as all flags off.
    pub async fn on_limit_reached(&self, today: NaiveDate) -> Vec<LimitNotice> {
        let preferences = match self.preferences.load_limit_preferences().await {
            Ok(preferences) => preferences,
            Err(e) => {
                tracing::warn!("[LimitPolicy] Failed to read preferences: {}", e);
                return Vec::new();
            }
        };

        let mut notices = Vec::new();
        if preferences.alert_enabled {
            notices.push(LimitNotice::Alert);
        }
        if preferences.auto_logout_enabled && self.auto_logout(today).await {
            notices.push(LimitNotice::LoggedOut);
        }
        notices
    }

    async fn auto_logout(&self, today: NaiveDate) -> bool {
        match self.preferences.last_auto_logout().await {
            Ok(Some(date)) if date == today => {
                tracing::debug!("[LimitPolicy] Already logged out automatically today");
                return false;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("[LimitPolicy] Failed to read last auto logout: {}", e);
            }
        }

        if let Err(e) = self.preferences.record_auto_logout(today).await {
            tracing::warn!("[LimitPolicy] Failed to record auto logout: {}", e);
        }
        match self.auth.logout().await {
            Ok(()) => {
                tracing::info!("[LimitPolicy] Daily limit reached, viewer logged out");
                true
            }
            Err(e) => {
                tracing::error!("[LimitPolicy] Automatic logout failed: {}", e);
                false
            }
        }
    }
}

/// Background task applying a [`LimitPolicy`] to clock snapshots.
pub struct LimitWatcher {
    notices: broadcast::Sender<LimitNotice>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl LimitWatcher {
    /// Starts watching `snapshots`.
    ///
    /// A clock that is already at its limit when the watcher starts counts
    /// as a rising edge.
    pub fn spawn(policy: Arc<LimitPolicy>, snapshots: watch::Receiver<ClockSnapshot>) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(watch_limit(
            policy,
            snapshots,
            notices.clone(),
            cancel.clone(),
        ));
        Self {
            notices,
            cancel,
            task: Mutex::new(Some(task)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LimitNotice> {
        self.notices.subscribe()
    }

    /// Stops the task and waits for it. Idempotent.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let task = self.task.lock().await.take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::error!("[LimitWatcher] Task failed: {}", e);
            }
        }
    }
}

impl Drop for LimitWatcher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn watch_limit(
    policy: Arc<LimitPolicy>,
    mut snapshots: watch::Receiver<ClockSnapshot>,
    notices: broadcast::Sender<LimitNotice>,
    cancel: CancellationToken,
) {
    let mut was_reached = false;
    loop {
        let (reached, date) = {
            let snapshot = snapshots.borrow_and_update();
            (snapshot.is_limit_reached, snapshot.last_active_date)
        };
        if reached && !was_reached {
            tracing::info!("[LimitWatcher] Daily limit reached on {}", date);
            for notice in policy.on_limit_reached(date).await {
                // No subscriber is fine.
                let _ = notices.send(notice);
            }
        }
        was_reached = reached;

        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = snapshots.changed() => {
                if changed.is_err() {
                    tracing::debug!("[LimitWatcher] Clock gone, stopping");
                    break;
                }
            }
        }
    }
}
