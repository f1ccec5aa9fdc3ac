use std::collections::HashMap;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::model::{Event, EventId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(pub u32);

impl SectionId {
    pub const MAIN: SectionId = SectionId(0);
}

/// Displayed events in order, one flat section, keyed by event id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    items: IndexMap<EventId, Event>,
}

/// Row-level differences between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotChanges {
    pub removed: Vec<EventId>,
    pub inserted: Vec<EventId>,
    pub moved: Vec<EventId>,
    pub updated: Vec<EventId>,
}

impl SnapshotChanges {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
            && self.inserted.is_empty()
            && self.moved.is_empty()
            && self.updated.is_empty()
    }
}

impl Snapshot {
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut items = IndexMap::new();
        for event in events {
            match items.entry(event.id) {
                Entry::Occupied(_) => {
                    tracing::warn!(event_id = %event.id, name = %event.name, "duplicate event in list, keeping first");
                }
                Entry::Vacant(slot) => {
                    slot.insert(event);
                }
            }
        }
        Self { items }
    }

    pub fn section(&self) -> SectionId {
        SectionId::MAIN
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.items.get_index(index).map(|(_, event)| event)
    }

    pub fn index_of(&self, id: EventId) -> Option<usize> {
        self.items.get_index_of(&id)
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.items.values()
    }

    pub fn ids(&self) -> Vec<EventId> {
        self.items.keys().copied().collect()
    }

    /// Minimal set of row operations turning `previous` into `self`.
    ///
    /// Rows present in both snapshots only count as moved when they fall
    /// outside the longest run that kept its relative order.
    pub fn changes_from(&self, previous: &Snapshot) -> SnapshotChanges {
        let removed = previous
            .items
            .keys()
            .filter(|id| !self.items.contains_key(*id))
            .copied()
            .collect();

        let mut inserted = Vec::new();
        let mut common = Vec::new();
        let mut old_positions = Vec::new();
        for (id, _) in &self.items {
            match previous.items.get_index_of(id) {
                Some(position) => {
                    common.push(*id);
                    old_positions.push(position);
                }
                None => inserted.push(*id),
            }
        }

        let kept = longest_increasing_run(&old_positions);
        let moved = common
            .iter()
            .zip(kept)
            .filter(|(_, kept)| !kept)
            .map(|(id, _)| *id)
            .collect();

        let updated = common
            .iter()
            .filter(|id| previous.items.get(*id) != self.items.get(*id))
            .copied()
            .collect();

        SnapshotChanges {
            removed,
            inserted,
            moved,
            updated,
        }
    }
}

fn longest_increasing_run(values: &[usize]) -> Vec<bool> {
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessor: HashMap<usize, usize> = HashMap::new();
    for (index, &value) in values.iter().enumerate() {
        let slot = tails.partition_point(|&tail| values[tail] < value);
        if slot > 0 {
            predecessor.insert(index, tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(index);
        } else {
            tails[slot] = index;
        }
    }

    let mut kept = vec![false; values.len()];
    let mut cursor = tails.last().copied();
    while let Some(index) = cursor {
        kept[index] = true;
        cursor = predecessor.get(&index).copied();
    }
    kept
}
