//! The session clock service.
//!
//! `SessionClock` wraps the timer-free [`SessionTracker`] with everything
//! that needs a runtime: the one-second tick loop, the periodic day
//! rollover check, the reset countdown, host events (visibility and other
//! tabs' storage changes) and debounced persistence.
//!
//! # Task Structure
//!
//! A single driver task owns every timer. Public operations lock the
//! tracker, mutate it, publish a fresh [`ClockSnapshot`] and wake the
//! driver so it can rebuild the tick timer when the clock starts or stops.

use std::sync::Arc;

use chrono::NaiveDate;
use mindful_core::calendar::Calendar;
use mindful_core::clock::{
    ClockPhase, ClockSnapshot, MergeOutcome, RemoteSessionState, SessionState, SessionTracker,
};
use mindful_core::config::ClockSettings;
use mindful_core::storage::{HostEvent, HostEventSource};
use mindful_infrastructure::SessionStateStore;
use tokio::sync::{Mutex, Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

use crate::write_behind::WriteBehind;

/// State shared between the public handle and the driver task.
struct ClockShared {
    tracker: Mutex<SessionTracker>,
    snapshots: watch::Sender<ClockSnapshot>,
    wake: Notify,
    writer: WriteBehind<SessionState>,
    calendar: Arc<dyn Calendar>,
}

impl ClockShared {
    fn publish(&self, tracker: &SessionTracker) {
        let snapshot = tracker.snapshot(self.calendar.seconds_until_midnight());
        self.snapshots.send_replace(snapshot);
    }

    /// Runs one transition.
    ///
    /// The persisted state is scheduled for writing only when it changed;
    /// the snapshot is republished and the driver woken whenever anything
    /// (including the transient active flag) changed.
    async fn mutate<F>(&self, transition: F) -> bool
    where
        F: FnOnce(&mut SessionTracker, NaiveDate) -> bool,
    {
        let mut tracker = self.tracker.lock().await;
        let before = tracker.state();
        let changed = transition(&mut tracker, self.calendar.today());
        if tracker.state() != before {
            self.writer.schedule(tracker.state());
        }
        if changed {
            self.publish(&tracker);
            self.wake.notify_one();
        }
        changed
    }

    async fn merge_remote(&self, remote: RemoteSessionState) {
        let mut tracker = self.tracker.lock().await;
        match tracker.merge_remote(&remote, self.calendar.today()) {
            MergeOutcome::Ignored => {
                tracing::debug!(
                    "[SessionClock] Ignoring remote state from {}",
                    remote.last_active_date
                );
            }
            MergeOutcome::Unchanged => {}
            MergeOutcome::Merged => {
                tracing::debug!(
                    "[SessionClock] Merged remote state: spent={}s limit={}m",
                    tracker.state().time_spent_seconds,
                    tracker.state().daily_limit_minutes
                );
                // Replaces any older pending value; an unchanged write is
                // not announced to other tabs.
                self.writer.schedule(tracker.state());
                self.publish(&tracker);
                self.wake.notify_one();
            }
        }
    }

    async fn refresh_countdown(&self) {
        let tracker = self.tracker.lock().await;
        self.publish(&tracker);
    }

    async fn running_key(&self) -> (bool, bool) {
        let tracker = self.tracker.lock().await;
        (tracker.is_active(), tracker.is_limit_reached())
    }

    async fn on_host_event(&self, event: HostEvent) {
        match event {
            HostEvent::VisibilityChanged { visible: false } => {
                tracing::debug!("[SessionClock] Hidden, pausing");
                self.mutate(|tracker, _| tracker.pause()).await;
            }
            HostEvent::VisibilityChanged { visible: true } => {
                tracing::debug!("[SessionClock] Visible, resuming");
                self.mutate(|tracker, today| {
                    let rolled = tracker.roll_over(today);
                    tracker.start() || rolled
                })
                .await;
            }
            HostEvent::StorageChanged(change) => {
                if let Some(remote) = SessionStateStore::parse_change(&change) {
                    self.merge_remote(remote).await;
                }
            }
        }
    }
}

/// Handle on the running session clock.
///
/// Create one per application with [`SessionClock::spawn`] and call
/// [`SessionClock::shutdown`] on teardown. Dropping the handle stops the
/// driver but does not wait for the final write.
pub struct SessionClock {
    shared: Arc<ClockShared>,
    snapshots: watch::Receiver<ClockSnapshot>,
    cancel: CancellationToken,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl SessionClock {
    /// Rehydrates from `store` and starts the driver task.
    ///
    /// # Arguments
    ///
    /// * `store` - Persisted session state; read once here
    /// * `calendar` - Source of the local date
    /// * `events` - Visibility and cross-tab storage events
    /// * `settings` - Timing knobs (validated by the caller)
    pub async fn spawn(
        store: SessionStateStore,
        calendar: Arc<dyn Calendar>,
        events: Box<dyn HostEventSource>,
        settings: &ClockSettings,
    ) -> Self {
        let record = store.load().await;
        let tracker = SessionTracker::rehydrate(
            record.as_ref(),
            calendar.today(),
            settings.default_daily_limit_minutes,
        );
        tracing::info!(
            "[SessionClock] Started: spent={}s limit={}m date={}",
            tracker.state().time_spent_seconds,
            tracker.state().daily_limit_minutes,
            tracker.state().last_active_date
        );

        let writer = WriteBehind::spawn(Arc::new(store), settings.persist_debounce());
        // Stores the normalized state (rolled over, clamped, or fresh).
        writer.schedule(tracker.state());

        let (snapshots_tx, snapshots) =
            watch::channel(tracker.snapshot(calendar.seconds_until_midnight()));
        let shared = Arc::new(ClockShared {
            tracker: Mutex::new(tracker),
            snapshots: snapshots_tx,
            wake: Notify::new(),
            writer,
            calendar,
        });

        let cancel = CancellationToken::new();
        let driver = tokio::spawn(drive(
            shared.clone(),
            events,
            settings.clone(),
            cancel.clone(),
        ));

        Self {
            shared,
            snapshots,
            cancel,
            driver: Mutex::new(Some(driver)),
        }
    }

    /// Resumes ticking. No-op once the limit is reached.
    pub async fn start(&self) {
        self.shared.mutate(|tracker, _| tracker.start()).await;
    }

    pub async fn pause(&self) {
        self.shared.mutate(|tracker, _| tracker.pause()).await;
    }

    /// Zeroes today's counter and resumes ticking.
    pub async fn reset_daily(&self) {
        tracing::info!("[SessionClock] Daily reset");
        self.shared
            .mutate(|tracker, today| tracker.reset_daily(today))
            .await;
    }

    /// Sets the limit to `clamp(floor(minutes), 1, 480)`.
    pub async fn update_daily_limit(&self, minutes: impl Into<f64>) {
        let minutes = minutes.into();
        self.shared
            .mutate(|tracker, _| tracker.update_daily_limit(minutes))
            .await;
    }

    /// Latest published view.
    pub fn snapshot(&self) -> ClockSnapshot {
        *self.snapshots.borrow()
    }

    /// Receives every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ClockSnapshot> {
        self.snapshots.clone()
    }

    pub fn time_spent_seconds(&self) -> u32 {
        self.snapshot().time_spent_seconds
    }

    pub fn daily_limit_minutes(&self) -> u32 {
        self.snapshot().daily_limit_minutes
    }

    pub fn is_limit_reached(&self) -> bool {
        self.snapshot().is_limit_reached
    }

    pub fn is_active(&self) -> bool {
        self.snapshot().is_active
    }

    pub fn time_until_reset_seconds(&self) -> u64 {
        self.snapshot().time_until_reset_seconds
    }

    pub fn phase(&self) -> ClockPhase {
        self.snapshot().phase()
    }

    /// Stops the driver and writes any pending state. Idempotent.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let driver = self.driver.lock().await.take();
        if let Some(driver) = driver {
            if let Err(e) = driver.await {
                tracing::error!("[SessionClock] Driver task failed: {}", e);
            }
        }
        self.shared.writer.flush().await;
        tracing::info!("[SessionClock] Shut down");
    }
}

impl Drop for SessionClock {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn periodic(period: std::time::Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Waits for the next tick, or forever when the clock is stopped.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

async fn drive(
    shared: Arc<ClockShared>,
    mut events: Box<dyn HostEventSource>,
    settings: ClockSettings,
    cancel: CancellationToken,
) {
    let mut ticker: Option<Interval> = None;
    let mut ticker_key: Option<(bool, bool)> = None;
    let mut rollover = periodic(settings.rollover_check());
    let mut countdown = periodic(settings.countdown_refresh());
    let mut events_open = true;

    loop {
        // Exactly one tick timer, rebuilt whenever (is_active, is_limit_reached) moves.
        let key = shared.running_key().await;
        if ticker_key != Some(key) {
            let (active, limit_reached) = key;
            ticker = (active && !limit_reached).then(|| periodic(settings.tick()));
            tracing::debug!(
                "[SessionClock] Tick loop {}",
                if ticker.is_some() { "running" } else { "stopped" }
            );
            ticker_key = Some(key);
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = next_tick(&mut ticker) => {
                shared.mutate(|tracker, _| tracker.tick()).await;
            }
            _ = rollover.tick() => {
                let rolled = shared.mutate(|tracker, today| tracker.roll_over(today)).await;
                if rolled {
                    tracing::info!("[SessionClock] New day, counter reset");
                }
            }
            _ = countdown.tick() => shared.refresh_countdown().await,
            event = events.next_event(), if events_open => match event {
                Some(event) => shared.on_host_event(event).await,
                None => {
                    tracing::debug!("[SessionClock] Host event source closed");
                    events_open = false;
                }
            },
            _ = shared.wake.notified() => {}
        }
    }
    tracing::debug!("[SessionClock] Driver stopped");
}
