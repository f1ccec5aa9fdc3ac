use crossbeam_channel::{unbounded, Receiver, Sender};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};

use crate::model::{Event, EventFields, EventId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("event {0} not found")]
    NotFound(EventId),
    #[error("event name cannot be empty")]
    EmptyName,
    #[error("event store failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Collaborator that owns persisted events.
///
/// Every successful mutation is followed by a notification carrying the full
/// ordered event list to each receiver handed out by [`EventStore::subscribe`].
pub trait EventStore: Send + Sync {
    fn create(&self, fields: EventFields) -> StoreResult<Event>;
    fn update(&self, event: &Event, fields: EventFields) -> StoreResult<Event>;
    fn delete(&self, event: &Event) -> StoreResult<()>;
    fn events(&self) -> Vec<Event>;
    fn subscribe(&self) -> Receiver<Vec<Event>>;
}

/// In-process store keeping events ordered by date-time, then name.
#[derive(Default)]
pub struct MemoryStore {
    events: RwLock<IndexMap<EventId, Event>>,
    subscribers: Mutex<Vec<Sender<Vec<Event>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: impl IntoIterator<Item = Event>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.events.write();
            for event in events {
                guard.insert(event.id, event);
            }
            sort_events(&mut guard);
        }
        store
    }

    pub fn get(&self, id: EventId) -> Option<Event> {
        self.events.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    pub fn set_archived(&self, id: EventId, archived: bool) -> StoreResult<Event> {
        let updated = {
            let mut guard = self.events.write();
            let event = guard.get_mut(&id).ok_or(StoreError::NotFound(id))?;
            event.archived = archived;
            event.clone()
        };
        tracing::debug!(event_id = %id, archived, "event archive state changed");
        self.notify();
        Ok(updated)
    }

    fn notify(&self) {
        let events = self.events();
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.send(events.clone()).is_ok());
    }
}

impl EventStore for MemoryStore {
    fn create(&self, fields: EventFields) -> StoreResult<Event> {
        let fields = normalize(fields)?;
        let event = Event::from_fields(EventId::new(), fields);
        {
            let mut guard = self.events.write();
            guard.insert(event.id, event.clone());
            sort_events(&mut guard);
        }
        tracing::debug!(event_id = %event.id, name = %event.name, "event created");
        self.notify();
        Ok(event)
    }

    fn update(&self, event: &Event, fields: EventFields) -> StoreResult<Event> {
        let fields = normalize(fields)?;
        let updated = {
            let mut guard = self.events.write();
            let stored = guard
                .get_mut(&event.id)
                .ok_or(StoreError::NotFound(event.id))?;
            stored.apply(fields);
            let updated = stored.clone();
            sort_events(&mut guard);
            updated
        };
        tracing::debug!(event_id = %updated.id, name = %updated.name, "event updated");
        self.notify();
        Ok(updated)
    }

    fn delete(&self, event: &Event) -> StoreResult<()> {
        let removed = self.events.write().shift_remove(&event.id);
        if removed.is_none() {
            return Err(StoreError::NotFound(event.id));
        }
        tracing::debug!(event_id = %event.id, name = %event.name, "event deleted");
        self.notify();
        Ok(())
    }

    fn events(&self) -> Vec<Event> {
        self.events.read().values().cloned().collect()
    }

    fn subscribe(&self) -> Receiver<Vec<Event>> {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push(tx);
        rx
    }
}

fn normalize(mut fields: EventFields) -> StoreResult<EventFields> {
    let trimmed = fields.name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyName);
    }
    if trimmed.len() != fields.name.len() {
        fields.name = trimmed.to_string();
    }
    Ok(fields)
}

fn sort_events(events: &mut IndexMap<EventId, Event>) {
    events.sort_by(|_, a, _, b| {
        a.date_time
            .cmp(&b.date_time)
            .then_with(|| a.name.cmp(&b.name))
    });
}
