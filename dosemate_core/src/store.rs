//! The owned application store.
//!
//! All medication, log, exception and notification state lives in one
//! `Store` with explicit mutation entry points; there are no ambient
//! globals. Derived views (adherence rate, materialized schedule) are
//! recomputed from snapshots on every call. Time is only read through the
//! injected clock.

use crate::insight::{InsightProvider, InsightRequest, InsightSnapshot, INSIGHT_TITLE};
use crate::{
    adherence, schedule, AdherenceLog, AdherenceStatus, Clock, DayAdherence, DoseException,
    DoseInstance, Frequency, HealthSummary, Medication, MedicationDraft, Notification,
    NotificationKind, Result, COLOR_TAGS,
};
use chrono::Datelike;
use serde::Serialize;
use uuid::Uuid;

/// Title of low-inventory warning notifications
pub const LOW_INVENTORY_TITLE: &str = "Low Inventory";

/// Title of the notification posted after a confirmed full reset
pub const REFILL_TITLE: &str = "Refill Successful";

/// Inventory level at or below which a medication is considered low
pub const DEFAULT_LOW_INVENTORY_THRESHOLD: u32 = 5;

/// Default pill count for newly added medications
const DEFAULT_CAPACITY: u32 = 30;

/// Serializable view of the store contents, for debugging and the CLI
#[derive(Serialize)]
pub struct StoreSnapshot<'a> {
    pub medications: &'a [Medication],
    pub logs: &'a [AdherenceLog],
    pub exceptions: &'a [DoseException],
}

/// In-memory application state with defined mutation entry points
pub struct Store {
    medications: Vec<Medication>,
    /// Append-only, newest first
    logs: Vec<AdherenceLog>,
    exceptions: Vec<DoseException>,
    /// Newest first
    notifications: Vec<Notification>,
    insight_state: InsightRequest,
    /// Log length at the last issued insight request
    insight_log_len: Option<usize>,
    low_inventory_threshold: u32,
    clock: Box<dyn Clock>,
}

impl Store {
    /// Create an empty store reading time from the given clock
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            medications: Vec::new(),
            logs: Vec::new(),
            exceptions: Vec::new(),
            notifications: Vec::new(),
            insight_state: InsightRequest::Idle,
            insight_log_len: None,
            low_inventory_threshold: DEFAULT_LOW_INVENTORY_THRESHOLD,
            clock,
        }
    }

    /// Create a store pre-populated with seed data (demo and tests)
    pub fn with_seed(
        clock: Box<dyn Clock>,
        medications: Vec<Medication>,
        logs: Vec<AdherenceLog>,
        notifications: Vec<Notification>,
    ) -> Self {
        let mut store = Self::new(clock);
        store.medications = medications;
        store.logs = logs;
        store.notifications = notifications;
        store.scan_low_inventory();
        store
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn logs(&self) -> &[AdherenceLog] {
        &self.logs
    }

    pub fn exceptions(&self) -> &[DoseException] {
        &self.exceptions
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn insight_state(&self) -> InsightRequest {
        self.insight_state
    }

    pub fn set_low_inventory_threshold(&mut self, threshold: u32) {
        self.low_inventory_threshold = threshold;
        self.scan_low_inventory();
    }

    /// Serializable view of the current state
    pub fn snapshot(&self) -> StoreSnapshot<'_> {
        StoreSnapshot {
            medications: &self.medications,
            logs: &self.logs,
            exceptions: &self.exceptions,
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    // ========================================================================
    // Dose and Inventory Mutations
    // ========================================================================

    /// Record a dose as taken now and decrement inventory, floored at 0.
    ///
    /// The log append and the inventory decrement are applied together so
    /// derived views never observe one without the other. An unknown
    /// medication id is a silent no-op.
    pub fn take_dose(&mut self, med_id: &str, compartment: u8) {
        let now = self.clock.now();
        let Some(med) = self.medications.iter_mut().find(|m| m.id == med_id) else {
            tracing::warn!("take_dose: unknown medication id {:?}, ignoring", med_id);
            return;
        };

        let entry = AdherenceLog {
            id: Uuid::new_v4(),
            medication_id: med.id.clone(),
            medication_name: med.name.clone(),
            scheduled_time: now,
            actual_time: Some(now),
            status: AdherenceStatus::Taken,
            compartment,
        };
        med.inventory = med.inventory.saturating_sub(1);
        tracing::info!(
            "Dose taken: {} (compartment {}), {} pills left",
            entry.medication_name,
            compartment,
            med.inventory
        );

        self.logs.insert(0, entry);
        self.scan_low_inventory();
    }

    /// Refill one medication back to its total capacity
    pub fn refill_one(&mut self, med_id: &str) {
        let Some(med) = self.medications.iter_mut().find(|m| m.id == med_id) else {
            tracing::warn!("refill_one: unknown medication id {:?}, ignoring", med_id);
            return;
        };
        med.inventory = med.total_capacity;
        tracing::info!("Refilled {} to {} pills", med.name, med.total_capacity);
        self.scan_low_inventory();
    }

    /// Reset every medication to full capacity.
    ///
    /// Destructive and irreversible within the session, so it requires the
    /// caller to pass an explicit confirmation. Returns whether the reset
    /// was applied.
    pub fn reset_all(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            tracing::info!("reset_all refused: not confirmed");
            return false;
        }
        for med in &mut self.medications {
            med.inventory = med.total_capacity;
        }
        let now = self.clock.now();
        self.push_notification(Notification::new(
            REFILL_TITLE,
            "All medication compartments have been refilled.".into(),
            NotificationKind::Success,
            now,
        ));
        tracing::info!("Reset inventory for {} medications", self.medications.len());
        self.scan_low_inventory();
        true
    }

    /// Validate a draft and append it as a new medication.
    ///
    /// Returns the id of the created medication. Color tags rotate through
    /// the palette in insertion order.
    pub fn add_medication(&mut self, draft: MedicationDraft) -> Result<String> {
        draft.validate()?;

        let id = Uuid::new_v4().to_string();
        let color_tag = COLOR_TAGS[self.medications.len() % COLOR_TAGS.len()].to_string();
        let med = Medication {
            id: id.clone(),
            name: draft.name.trim().to_string(),
            dosage: draft.dosage.trim().to_string(),
            compartment: draft.compartment,
            frequency: Frequency::Daily,
            times: draft.times,
            inventory: DEFAULT_CAPACITY,
            total_capacity: DEFAULT_CAPACITY,
            color_tag,
        };
        tracing::info!("Added medication {} ({})", med.name, id);
        self.medications.push(med);
        self.scan_low_inventory();
        Ok(id)
    }

    // ========================================================================
    // Exception Mutations
    // ========================================================================

    /// Suppress one dose occurrence on one weekday. Idempotent.
    pub fn skip_dose(&mut self, med_id: &str, time: &str, day_index: u8) {
        if schedule::is_excepted(&self.exceptions, med_id, time, day_index) {
            tracing::debug!(
                "skip_dose: ({:?}, {:?}, {}) already excepted",
                med_id,
                time,
                day_index
            );
            return;
        }
        self.exceptions.push(DoseException {
            medication_id: med_id.to_string(),
            time: time.to_string(),
            day_index,
        });
        tracing::info!("Skipped dose {:?} at {} on day {}", med_id, time, day_index);
    }

    /// Remove a previously created exception, restoring the dose occurrence.
    pub fn restore_dose(&mut self, med_id: &str, time: &str, day_index: u8) {
        let before = self.exceptions.len();
        self.exceptions.retain(|ex| {
            !(ex.medication_id == med_id && ex.time == time && ex.day_index == day_index)
        });
        if self.exceptions.len() < before {
            tracing::info!("Restored dose {:?} at {} on day {}", med_id, time, day_index);
        }
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    fn push_notification(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.notifications {
            n.read = true;
        }
    }

    pub fn clear_notifications(&mut self) {
        let had_insight = self.notifications.iter().any(|n| n.title == INSIGHT_TITLE);
        self.notifications.clear();
        if had_insight {
            self.rearm_insight();
        }
    }

    /// Dismiss a single notification by id
    pub fn dismiss_notification(&mut self, id: Uuid) {
        let Some(pos) = self.notifications.iter().position(|n| n.id == id) else {
            return;
        };
        let removed = self.notifications.remove(pos);
        if removed.title == INSIGHT_TITLE {
            self.rearm_insight();
        }
    }

    /// Raise one warning per low medication without an outstanding alert.
    ///
    /// Runs after every medication-store mutation. A medication gets a new
    /// alert only once its previous one has been dismissed.
    fn scan_low_inventory(&mut self) {
        let now = self.clock.now();
        let mut alerts = Vec::new();
        for med in &self.medications {
            if med.inventory > self.low_inventory_threshold {
                continue;
            }
            let outstanding = self
                .notifications
                .iter()
                .any(|n| n.title == LOW_INVENTORY_TITLE && n.message.contains(&med.name));
            if !outstanding {
                alerts.push((med.name.clone(), med.inventory));
            }
        }
        for (name, left) in alerts {
            tracing::warn!("{} is low on inventory ({} left)", name, left);
            self.push_notification(Notification::new(
                LOW_INVENTORY_TITLE,
                format!("{} is running low ({} left). Please refill soon.", name, left),
                NotificationKind::Warning,
                now,
            ));
        }
    }

    // ========================================================================
    // Insight Request Guard
    // ========================================================================

    fn rearm_insight(&mut self) {
        if self.insight_state == InsightRequest::Done {
            self.insight_state = InsightRequest::Idle;
        }
    }

    /// Issue an insight request if the guard allows it.
    ///
    /// At most one request may be outstanding, requests are issued at most
    /// once per log-length change, and never while an insight notification
    /// is still present. Returns the snapshot to hand to the collaborator,
    /// or `None` when no request should be made.
    pub fn begin_insight_request(&mut self) -> Option<InsightSnapshot> {
        if self.insight_state != InsightRequest::Idle {
            return None;
        }
        if self.logs.is_empty() {
            return None;
        }
        if self.insight_log_len == Some(self.logs.len()) {
            return None;
        }
        if self.notifications.iter().any(|n| n.title == INSIGHT_TITLE) {
            return None;
        }

        self.insight_log_len = Some(self.logs.len());
        self.insight_state = InsightRequest::InFlight;
        tracing::debug!("Insight request issued at log length {}", self.logs.len());
        Some(InsightSnapshot {
            medications: self.medications.clone(),
            logs: self.logs.clone(),
        })
    }

    /// Consume the outcome of an outstanding insight request.
    ///
    /// Success posts the insight notification; failure is swallowed and the
    /// guard returns to idle so a later log change can retry.
    pub fn complete_insight_request(&mut self, outcome: Result<String>) {
        if self.insight_state != InsightRequest::InFlight {
            tracing::warn!("complete_insight_request called with no request in flight");
            return;
        }
        match outcome {
            Ok(message) => {
                let now = self.clock.now();
                self.push_notification(Notification::new(
                    INSIGHT_TITLE,
                    message,
                    NotificationKind::Info,
                    now,
                ));
                self.insight_state = InsightRequest::Done;
            }
            Err(e) => {
                tracing::warn!("Insight fetch failed: {}", e);
                self.insight_state = InsightRequest::Idle;
            }
        }
    }

    /// Run one guarded fetch against a synchronous provider.
    ///
    /// Returns true if an insight notification was posted.
    pub fn fetch_insight(&mut self, provider: &dyn InsightProvider) -> bool {
        let Some(snapshot) = self.begin_insight_request() else {
            return false;
        };
        let outcome = provider.insight(&snapshot.medications, &snapshot.logs);
        let posted = outcome.is_ok();
        self.complete_insight_request(outcome);
        posted
    }

    // ========================================================================
    // Derived Views
    // ========================================================================

    /// Rolling 7-day adherence rate as of now
    pub fn adherence_rate(&self) -> u8 {
        adherence::adherence_rate(&self.logs, self.clock.now())
    }

    /// Per-day adherence for the last seven days, oldest first
    pub fn daily_breakdown(&self) -> Vec<DayAdherence> {
        adherence::daily_breakdown(&self.logs, self.clock.now())
    }

    pub fn health_summary(&self) -> HealthSummary {
        adherence::health_summary(&self.logs, self.clock.now())
    }

    /// Materialized schedule for an arbitrary weekday (0 = Sunday)
    pub fn doses_for_day(&self, day_index: u8) -> Vec<DoseInstance> {
        schedule::materialize(&self.medications, &self.exceptions, day_index)
    }

    /// Materialized schedule for the current weekday
    pub fn today_doses(&self) -> Vec<DoseInstance> {
        let today = self.clock.now().weekday().num_days_from_sunday() as u8;
        self.doses_for_day(today)
    }
}
