use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::calendar::{Calendar, Clock, SystemClock};
use crate::model::Event;
use crate::store::{EventStore, StoreError};

mod row;
mod snapshot;

pub use row::{countdown_label, date_label, EventRow};
pub use snapshot::{SectionId, Snapshot, SnapshotChanges};

/// Row rendering and deletion on behalf of the list.
pub trait ListViewModel: Send + Sync {
    fn row(&self, event: &Event) -> EventRow;
    fn delete(&self, event: &Event) -> Result<(), StoreError>;
}

/// [`ListViewModel`] backed by an [`EventStore`].
pub struct StoreViewModel {
    store: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
    calendar: Calendar,
}

impl StoreViewModel {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            calendar: Calendar::UTC,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }
}

impl ListViewModel for StoreViewModel {
    fn row(&self, event: &Event) -> EventRow {
        EventRow::build(event, self.clock.now(), self.calendar)
    }

    fn delete(&self, event: &Event) -> Result<(), StoreError> {
        self.store.delete(event)
    }
}

/// What happens to a delete request when no confirmation hook is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeletePolicy {
    #[default]
    Proceed,
    Decline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    Failed(StoreError),
}

pub type DeleteHook = Box<dyn Fn(&Event) -> bool + Send + Sync>;

/// Keeps the displayed event list in step with the event store.
pub struct ListSyncAdapter {
    view_model: Mutex<Arc<dyn ListViewModel>>,
    snapshot: RwLock<Arc<Snapshot>>,
    confirm_delete: Option<DeleteHook>,
    policy: DeletePolicy,
}

impl ListSyncAdapter {
    pub fn new(view_model: Arc<dyn ListViewModel>) -> Self {
        Self {
            view_model: Mutex::new(view_model),
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            confirm_delete: None,
            policy: DeletePolicy::default(),
        }
    }

    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_confirmation<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        self.confirm_delete = Some(Box::new(hook));
        self
    }

    pub fn set_confirmation(&mut self, hook: Option<DeleteHook>) {
        self.confirm_delete = hook;
    }

    pub fn view_model(&self) -> Arc<dyn ListViewModel> {
        self.view_model.lock().clone()
    }

    pub fn set_view_model(&self, view_model: Arc<dyn ListViewModel>) {
        *self.view_model.lock() = view_model;
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    pub fn on_external_list_changed(&self, events: Vec<Event>) -> SnapshotChanges {
        let next = Arc::new(Snapshot::from_events(events));
        let changes = {
            let mut current = self.snapshot.write();
            let changes = next.changes_from(&current);
            *current = next;
            changes
        };
        tracing::debug!(
            removed = changes.removed.len(),
            inserted = changes.inserted.len(),
            moved = changes.moved.len(),
            updated = changes.updated.len(),
            "applied event list snapshot"
        );
        changes
    }

    /// Applies the newest pending store notification, skipping stale ones.
    pub fn drain_changes(&self, updates: &Receiver<Vec<Event>>) -> Option<SnapshotChanges> {
        updates
            .try_iter()
            .last()
            .map(|events| self.on_external_list_changed(events))
    }

    /// Applies every store notification on a background thread until the
    /// store drops its end of the channel.
    pub fn follow(self: &Arc<Self>, updates: Receiver<Vec<Event>>) -> JoinHandle<()> {
        let adapter = Arc::clone(self);
        thread::spawn(move || {
            for events in updates.iter() {
                adapter.on_external_list_changed(events);
            }
            tracing::debug!("event store closed, list adapter stopped following");
        })
    }

    pub fn row_at(&self, index: usize) -> Option<EventRow> {
        let snapshot = self.snapshot();
        let event = snapshot.get(index)?;
        Some(self.view_model().row(event))
    }

    pub fn request_delete(&self, event: &Event) -> DeleteOutcome {
        let confirmed = match &self.confirm_delete {
            Some(hook) => hook(event),
            None => self.policy == DeletePolicy::Proceed,
        };
        if !confirmed {
            tracing::debug!(event_id = %event.id, "delete declined");
            return DeleteOutcome::Declined;
        }

        match self.view_model().delete(event) {
            Ok(()) => DeleteOutcome::Deleted,
            Err(err) => {
                tracing::error!(
                    event_id = %event.id,
                    name = %event.name,
                    error = %err,
                    "error while attempting to delete event"
                );
                DeleteOutcome::Failed(err)
            }
        }
    }

    pub fn request_delete_at(&self, index: usize) -> Option<DeleteOutcome> {
        let Some(event) = self.snapshot().get(index).cloned() else {
            tracing::warn!(index, "attempted to delete event at invalid row");
            return None;
        };
        Some(self.request_delete(&event))
    }
}
