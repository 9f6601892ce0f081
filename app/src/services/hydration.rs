//! Hydration service
//!
//! Tracks glasses of water drunk today against the goal from settings.
//! The counter and the unacknowledged goal-reached flag live under their own
//! storage keys, apart from the document, and are reset once per calendar day. A background task re-checks the
//! date every minute so a process left running over midnight still resets.

use crate::config::{
    HYDRATION_CHECK_INTERVAL_SECS, HYDRATION_GOAL_POPUP_KEY, HYDRATION_LAST_RESET_KEY,
    HYDRATION_PROGRESS_KEY,
};
use crate::error::Result;
use crate::storage::SharedStorage;
use crate::views::dates::{format_date, parse_date};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

/// Counter state, bounded to `[0, goal]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationTracker {
    progress: u32,
    last_reset: Option<NaiveDate>,
    goal_popup: bool,
}

impl HydrationTracker {
    /// Rebuild from the raw stored values; unreadable values count as missing
    pub fn from_stored(
        progress: Option<&str>,
        last_reset: Option<&str>,
        goal_popup: Option<&str>,
    ) -> Self {
        Self {
            progress: progress.and_then(|p| p.trim().parse().ok()).unwrap_or(0),
            last_reset: last_reset.and_then(parse_date),
            goal_popup: goal_popup.map(|p| p.trim() == "true").unwrap_or(false),
        }
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn last_reset(&self) -> Option<NaiveDate> {
        self.last_reset
    }

    pub fn goal_popup_visible(&self) -> bool {
        self.goal_popup
    }

    /// Add a glass. Returns true when this step reached a positive goal.
    pub fn increment(&mut self, goal: u32) -> bool {
        let next = self.progress.saturating_add(1).min(goal);
        self.step_to(next, goal)
    }

    pub fn decrement(&mut self, goal: u32) {
        let next = self.progress.saturating_sub(1);
        self.step_to(next, goal);
    }

    pub fn reset(&mut self) {
        self.progress = 0;
        self.goal_popup = false;
    }

    /// Zero the counter when `today` differs from the last reset date
    pub fn check_daily_reset(&mut self, today: NaiveDate) -> bool {
        if self.last_reset == Some(today) {
            return false;
        }

        self.reset();
        self.last_reset = Some(today);
        true
    }

    /// Clamp the counter to a changed goal without firing the goal popup
    pub fn sync_goal(&mut self, goal: u32) -> bool {
        if self.progress > goal {
            self.progress = goal;
            return true;
        }
        false
    }

    pub fn dismiss_goal_popup(&mut self) {
        self.goal_popup = false;
    }

    fn step_to(&mut self, next: u32, goal: u32) -> bool {
        let reached = goal > 0 && next == goal && next != self.progress;
        self.progress = next;
        if reached {
            self.goal_popup = true;
        }
        reached
    }
}

/// Notifications delivered to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationEvent {
    GoalReached { goal: u32 },
    DailyReset { date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationStatus {
    pub progress: u32,
    pub goal: u32,
    pub last_reset: Option<String>,
    pub goal_reached: bool,
    pub goal_popup: bool,
}

/// Hydration service with background daily-reset check
#[derive(Clone)]
pub struct HydrationService {
    storage: SharedStorage,
    tracker: Arc<Mutex<HydrationTracker>>,
    events: broadcast::Sender<HydrationEvent>,
}

impl HydrationService {
    /// Restore the counter from storage and run the start-up reset check
    pub fn new(storage: SharedStorage, today: NaiveDate) -> Self {
        let progress = read_key(&storage, HYDRATION_PROGRESS_KEY);
        let last_reset = read_key(&storage, HYDRATION_LAST_RESET_KEY);
        let goal_popup = read_key(&storage, HYDRATION_GOAL_POPUP_KEY);

        let mut tracker = HydrationTracker::from_stored(
            progress.as_deref(),
            last_reset.as_deref(),
            goal_popup.as_deref(),
        );
        let reset = tracker.check_daily_reset(today);

        tracing::info!(
            "Hydration restored: {} glasses, last reset {:?}",
            tracker.progress(),
            tracker.last_reset()
        );

        let (events, _) = broadcast::channel(16);
        let service = Self {
            storage,
            tracker: Arc::new(Mutex::new(tracker.clone())),
            events,
        };

        if reset {
            service.persist(&tracker);
        }

        service
    }

    /// Receive goal-reached and daily-reset notifications
    pub fn subscribe(&self) -> broadcast::Receiver<HydrationEvent> {
        self.events.subscribe()
    }

    pub async fn status(&self, goal: u32) -> HydrationStatus {
        let tracker = self.tracker.lock().await;
        status_of(&tracker, goal)
    }

    pub async fn increment(&self, goal: u32) -> HydrationStatus {
        let mut tracker = self.tracker.lock().await;

        if tracker.increment(goal) {
            tracing::info!("Hydration goal of {} reached", goal);
            self.notify(HydrationEvent::GoalReached { goal });
        }

        self.persist(&tracker);
        status_of(&tracker, goal)
    }

    pub async fn decrement(&self, goal: u32) -> HydrationStatus {
        let mut tracker = self.tracker.lock().await;
        tracker.decrement(goal);
        self.persist(&tracker);
        status_of(&tracker, goal)
    }

    pub async fn reset(&self, goal: u32) -> HydrationStatus {
        let mut tracker = self.tracker.lock().await;
        tracker.reset();
        self.persist(&tracker);
        status_of(&tracker, goal)
    }

    pub async fn dismiss_goal_popup(&self) {
        let mut tracker = self.tracker.lock().await;
        if tracker.goal_popup_visible() {
            tracker.dismiss_goal_popup();
            self.persist(&tracker);
        }
    }

    /// Apply a new goal from settings, clamping the counter if needed
    pub async fn sync_goal(&self, goal: u32) {
        let mut tracker = self.tracker.lock().await;
        if tracker.sync_goal(goal) {
            tracing::debug!("Hydration progress clamped to new goal {}", goal);
            self.persist(&tracker);
        }
    }

    /// Reset the counter if the calendar day has changed
    pub async fn check_daily_reset(&self, today: NaiveDate) -> bool {
        let mut tracker = self.tracker.lock().await;

        if !tracker.check_daily_reset(today) {
            return false;
        }

        tracing::info!("Hydration counter reset for {}", today);
        self.persist(&tracker);
        self.notify(HydrationEvent::DailyReset { date: today });
        true
    }

    /// Start the background daily-reset check against dates from `today`
    pub fn start_scheduler<F>(self, today: F) -> JoinHandle<()>
    where
        F: Fn() -> NaiveDate + Send + 'static,
    {
        tokio::spawn(async move {
            tracing::info!("Starting hydration scheduler");

            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(HYDRATION_CHECK_INTERVAL_SECS));

            loop {
                interval.tick().await;
                self.check_daily_reset(today()).await;
            }
        })
    }

    fn notify(&self, event: HydrationEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("No hydration subscribers");
        }
    }

    fn persist(&self, tracker: &HydrationTracker) {
        if let Err(e) = self.write(tracker) {
            tracing::error!("Error saving hydration progress: {}", e);
        }
    }

    fn write(&self, tracker: &HydrationTracker) -> Result<()> {
        self.storage
            .set_item(HYDRATION_PROGRESS_KEY, &tracker.progress().to_string())?;
        self.storage.set_item(
            HYDRATION_GOAL_POPUP_KEY,
            if tracker.goal_popup_visible() { "true" } else { "false" },
        )?;
        if let Some(date) = tracker.last_reset() {
            self.storage
                .set_item(HYDRATION_LAST_RESET_KEY, &format_date(date))?;
        }
        Ok(())
    }
}

fn read_key(storage: &SharedStorage, key: &str) -> Option<String> {
    match storage.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("Error reading {}: {}", key, e);
            None
        }
    }
}

fn status_of(tracker: &HydrationTracker, goal: u32) -> HydrationStatus {
    HydrationStatus {
        progress: tracker.progress(),
        goal,
        last_reset: tracker.last_reset().map(format_date),
        goal_reached: goal > 0 && tracker.progress() >= goal,
        goal_popup: tracker.goal_popup_visible(),
    }
}
