use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub const DEFAULT_TAG_SEPARATOR: char = ',';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A countdown as held by the event store.
///
/// Identity is the `id`; two events with the same id are the same row even
/// when their other fields differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
    pub tags: Vec<String>,
    pub note: String,
    pub has_time: bool,
    pub archived: bool,
}

impl Event {
    pub fn from_fields(id: EventId, fields: EventFields) -> Self {
        let EventFields {
            name,
            date_time,
            tags,
            note,
            has_time,
        } = fields;
        Self {
            id,
            name,
            date_time,
            tags,
            note,
            has_time,
            archived: false,
        }
    }

    pub fn apply(&mut self, fields: EventFields) {
        self.name = fields.name;
        self.date_time = fields.date_time;
        self.tags = fields.tags;
        self.note = fields.note;
        self.has_time = fields.has_time;
    }

    /// Tags joined the way the tag field displays them, e.g. `family, fun`.
    pub fn tags_text(&self, separator: char) -> String {
        let joiner = format!("{separator} ");
        self.tags.join(&joiner)
    }
}

/// Field values handed to the store on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    pub name: String,
    pub date_time: OffsetDateTime,
    pub tags: Vec<String>,
    pub note: String,
    pub has_time: bool,
}
