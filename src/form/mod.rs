use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::Display;
use time::{Date, OffsetDateTime, Time};

use crate::calendar::{minute_precision, Calendar, Clock, DateResolutionError, SystemClock};
use crate::model::{Event, EventFields, DEFAULT_TAG_SEPARATOR};
use crate::store::{EventStore, StoreError};

pub mod layout;
mod tags;

pub use layout::{FormFields, FormLayout, FormPane};
pub use tags::parse_tags;

/// Whether the form creates a new event or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(Event),
}

impl FormMode {
    pub fn event(&self) -> Option<&Event> {
        match self {
            FormMode::Add => None,
            FormMode::Edit(event) => Some(event),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }

    /// The edited event when its date-time is frozen.
    pub fn archived_event(&self) -> Option<&Event> {
        self.event().filter(|event| event.archived)
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Add => "New event",
            FormMode::Edit(_) => "Edit event",
        }
    }
}

/// What `save` does when the date and time components cannot be merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFallback {
    #[default]
    Abort,
    Now,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOptions {
    pub tag_separator: char,
    pub date_fallback: DateFallback,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            tag_separator: DEFAULT_TAG_SEPARATOR,
            date_fallback: DateFallback::Abort,
        }
    }
}

/// Notified after a successful save.
pub trait SaveObserver: Send + Sync {
    fn list_needs_refresh(&self) {}
    fn detail_needs_refresh(&self, _event: &Event) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SessionState {
    Editing,
    Committed,
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("event name cannot be empty")]
    EmptyName,
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("could not resolve event date: {0}")]
    DateResolution(#[from] DateResolutionError),
    #[error("event store rejected the change: {0}")]
    Store(#[from] StoreError),
    #[error("form session is already {0}")]
    SessionClosed(SessionState),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(Event),
    Updated(Event),
}

impl SaveOutcome {
    pub fn event(&self) -> &Event {
        match self {
            SaveOutcome::Created(event) | SaveOutcome::Updated(event) => event,
        }
    }
}

/// Lower and upper limits for the date and time pickers. `None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickerBounds {
    pub date_min: Option<OffsetDateTime>,
    pub date_max: Option<OffsetDateTime>,
    pub time_min: Option<OffsetDateTime>,
    pub time_max: Option<OffsetDateTime>,
}

impl PickerBounds {
    fn pinned(at: OffsetDateTime) -> Self {
        Self {
            date_min: Some(at),
            date_max: Some(at),
            time_min: Some(at),
            time_max: Some(at),
        }
    }
}

/// Form-scoped state for one event being created or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub date: OffsetDateTime,
    pub has_custom_time: bool,
    pub time: Time,
    pub tags_text: String,
    pub note: String,
    pub mode: FormMode,
}

/// Collaborators shared by every form session.
#[derive(Clone)]
pub struct FormContext {
    store: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
    calendar: Calendar,
    options: FormOptions,
    observer: Option<Arc<dyn SaveObserver>>,
}

impl FormContext {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            calendar: Calendar::UTC,
            options: FormOptions::default(),
            observer: None,
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

    pub fn with_options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn SaveObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    pub fn open(&self, mode: FormMode) -> FormSession {
        FormSession::open(mode, self.clone())
    }
}

pub struct FormSession {
    draft: Draft,
    state: SessionState,
    pane: FormPane,
    bounds: PickerBounds,
    context: FormContext,
}

impl FormSession {
    pub fn open(mode: FormMode, context: FormContext) -> Self {
        let calendar = context.calendar;
        let now = context.clock.now();
        let draft = match &mode {
            FormMode::Add => {
                let local_now = calendar.local(now).unwrap_or(now);
                Draft {
                    name: String::new(),
                    date: local_now,
                    has_custom_time: false,
                    time: minute_precision(local_now.time()),
                    tags_text: String::new(),
                    note: String::new(),
                    mode: FormMode::Add,
                }
            }
            FormMode::Edit(event) => {
                let local = calendar.local(event.date_time).unwrap_or(event.date_time);
                Draft {
                    name: event.name.clone(),
                    date: local,
                    has_custom_time: event.has_time,
                    time: minute_precision(local.time()),
                    tags_text: event.tags_text(context.options.tag_separator),
                    note: event.note.clone(),
                    mode: mode.clone(),
                }
            }
        };

        let mut session = Self {
            draft,
            state: SessionState::Editing,
            pane: FormPane::default(),
            bounds: PickerBounds::default(),
            context,
        };
        session.refresh_bounds();
        if session.draft.mode.is_editing() {
            session.raise_time_to_minimum();
        }
        tracing::debug!(
            mode = session.draft.mode.title(),
            "form session opened"
        );
        session
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> &FormMode {
        &self.draft.mode
    }

    pub fn bounds(&self) -> PickerBounds {
        self.bounds
    }

    pub fn pane(&self) -> FormPane {
        self.pane
    }

    pub fn layout(&self) -> FormLayout {
        FormLayout::for_pane(
            self.pane,
            self.draft.has_custom_time,
            self.draft.mode.archived_event().is_some(),
        )
    }

    pub fn select_pane(&mut self, pane: FormPane) {
        self.pane = pane;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if self.accepts_input("name") {
            self.draft.name = name.into();
        }
    }

    pub fn set_date(&mut self, date: OffsetDateTime) {
        if self.accepts_input("date") {
            self.draft.date = date;
            self.refresh_bounds();
        }
    }

    /// Selects `date` at midnight in the session's calendar.
    pub fn set_calendar_date(&mut self, date: Date) {
        let midnight = self.context.calendar.midnight(date);
        self.set_date(midnight);
    }

    pub fn set_time(&mut self, time: Time) {
        if self.accepts_input("time") {
            self.draft.time = time;
        }
    }

    pub fn set_custom_time(&mut self, enabled: bool) {
        if self.accepts_input("custom time") {
            self.draft.has_custom_time = enabled;
            self.refresh_bounds();
        }
    }

    pub fn set_tags_text(&mut self, text: impl Into<String>) {
        if self.accepts_input("tags") {
            self.draft.tags_text = text.into();
        }
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        if self.accepts_input("note") {
            self.draft.note = note.into();
        }
    }

    pub fn tags(&self) -> Vec<String> {
        parse_tags(&self.draft.tags_text, self.context.options.tag_separator)
    }

    /// The instant the event will be saved with.
    ///
    /// Archived events always resolve to their stored date-time. Without a
    /// custom time the date picker value is used as-is; with one, the date's
    /// year/month/day are combined with the time's hour/minute.
    pub fn resolve_date_time(&self) -> Result<OffsetDateTime, DateResolutionError> {
        if let Some(event) = self.draft.mode.archived_event() {
            return Ok(event.date_time);
        }
        if !self.draft.has_custom_time {
            return Ok(self.draft.date);
        }
        self.context.calendar.merge(self.draft.date, self.draft.time)
    }

    pub fn compute_bounds(&self) -> PickerBounds {
        if let Some(event) = self.draft.mode.archived_event() {
            return PickerBounds::pinned(event.date_time);
        }
        let now = self.context.clock.now();
        let time_min = self
            .context
            .calendar
            .same_day(self.draft.date, now)
            .then_some(now);
        PickerBounds {
            date_min: Some(now),
            date_max: None,
            time_min,
            time_max: None,
        }
    }

    pub fn save(&mut self) -> Result<SaveOutcome, SaveError> {
        self.ensure_editing()?;
        let name = self.draft.name.trim();
        if name.is_empty() {
            tracing::debug!("save blocked: event name is empty");
            return Err(ValidationError::EmptyName.into());
        }

        let fields = EventFields {
            name: name.to_string(),
            date_time: self.resolve_for_save()?,
            tags: self.tags(),
            note: self.draft.note.clone(),
            has_time: self.draft.has_custom_time,
        };

        let store = &self.context.store;
        let result = match &self.draft.mode {
            FormMode::Add => store.create(fields).map(SaveOutcome::Created),
            FormMode::Edit(event) => store.update(event, fields).map(SaveOutcome::Updated),
        };
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(error = %err, "saving event failed");
                return Err(err.into());
            }
        };

        self.state = SessionState::Committed;
        let event = outcome.event();
        tracing::info!(event_id = %event.id, name = %event.name, "event saved");
        if let Some(observer) = &self.context.observer {
            match &outcome {
                SaveOutcome::Created(_) => observer.list_needs_refresh(),
                SaveOutcome::Updated(event) => observer.detail_needs_refresh(event),
            }
        }
        Ok(outcome)
    }

    pub fn cancel(&mut self) -> Result<(), SaveError> {
        self.ensure_editing()?;
        self.state = SessionState::Discarded;
        tracing::debug!("form session discarded");
        Ok(())
    }

    fn resolve_for_save(&self) -> Result<OffsetDateTime, SaveError> {
        match self.resolve_date_time() {
            Ok(resolved) => Ok(resolved),
            Err(err) => match self.context.options.date_fallback {
                DateFallback::Abort => Err(err.into()),
                DateFallback::Now => {
                    let now = self.context.clock.now();
                    tracing::warn!(error = %err, %now, "date merge failed, saving with current time");
                    Ok(now)
                }
            },
        }
    }

    fn ensure_editing(&self) -> Result<(), SaveError> {
        match self.state {
            SessionState::Editing => Ok(()),
            closed => Err(SaveError::SessionClosed(closed)),
        }
    }

    fn accepts_input(&self, field: &str) -> bool {
        if self.state == SessionState::Editing {
            return true;
        }
        tracing::debug!(field, state = %self.state, "ignoring edit to closed form");
        false
    }

    fn refresh_bounds(&mut self) {
        self.bounds = self.compute_bounds();
    }

    fn raise_time_to_minimum(&mut self) {
        let Some(minimum) = self.bounds.time_min else {
            return;
        };
        let minimum = self.context.calendar.local(minimum).unwrap_or(minimum);
        let minimum = minute_precision(minimum.time());
        if self.draft.time < minimum {
            self.draft.time = minimum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::FixedClock;
    use crate::model::EventId;
    use crate::store::MemoryStore;
    use assert_matches::assert_matches;
    use crossbeam_channel::Receiver;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use time::macros::{date, datetime, offset, time};

    const NOW: OffsetDateTime = datetime!(2025-05-20 10:15:30 UTC);

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(EventFields),
        Update(EventId, EventFields),
    }

    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<Call>>,
        fail_with: Mutex<Option<StoreError>>,
    }

    impl RecordingStore {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        fn take_failure(&self) -> Result<(), StoreError> {
            match self.fail_with.lock().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    impl EventStore for RecordingStore {
        fn create(&self, fields: EventFields) -> Result<Event, StoreError> {
            self.take_failure()?;
            self.calls.lock().push(Call::Create(fields.clone()));
            Ok(Event::from_fields(EventId::new(), fields))
        }

        fn update(&self, event: &Event, fields: EventFields) -> Result<Event, StoreError> {
            self.take_failure()?;
            self.calls.lock().push(Call::Update(event.id, fields.clone()));
            let mut updated = event.clone();
            updated.apply(fields);
            Ok(updated)
        }

        fn delete(&self, _event: &Event) -> Result<(), StoreError> {
            Ok(())
        }

        fn events(&self) -> Vec<Event> {
            Vec::new()
        }

        fn subscribe(&self) -> Receiver<Vec<Event>> {
            crossbeam_channel::never()
        }
    }

    #[derive(Default)]
    struct CountingObserver {
        list: AtomicUsize,
        detail: AtomicUsize,
    }

    impl SaveObserver for CountingObserver {
        fn list_needs_refresh(&self) {
            self.list.fetch_add(1, Ordering::SeqCst);
        }

        fn detail_needs_refresh(&self, _event: &Event) {
            self.detail.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn context(store: Arc<RecordingStore>) -> FormContext {
        FormContext::new(store).with_clock(Arc::new(FixedClock(NOW)))
    }

    fn stored_event(date_time: OffsetDateTime, archived: bool) -> Event {
        Event {
            id: EventId::new(),
            name: "Exam".into(),
            date_time,
            tags: vec!["school".into(), "big day".into()],
            note: "room 4".into(),
            has_time: true,
            archived,
        }
    }

    #[test]
    fn add_session_starts_empty_at_now() {
        let session = context(Arc::default()).open(FormMode::Add);
        let draft = session.draft();
        assert!(draft.name.is_empty());
        assert!(draft.tags_text.is_empty());
        assert!(!draft.has_custom_time);
        assert_eq!(draft.date, NOW);
        assert_eq!(draft.time, time!(10:15));
        assert_eq!(session.mode().title(), "New event");
    }

    #[test]
    fn edit_session_populates_from_event() {
        let event = stored_event(datetime!(2025-07-04 18:30 UTC), false);
        let session = context(Arc::default()).open(FormMode::Edit(event.clone()));
        let draft = session.draft();
        assert_eq!(draft.name, "Exam");
        assert_eq!(draft.date, event.date_time);
        assert_eq!(draft.time, time!(18:30));
        assert_eq!(draft.tags_text, "school, big day");
        assert_eq!(draft.note, "room 4");
        assert!(draft.has_custom_time);
        assert_eq!(session.mode().title(), "Edit event");
    }

    #[test]
    fn edit_session_raises_time_when_event_is_earlier_today() {
        let event = stored_event(datetime!(2025-05-20 08:00 UTC), false);
        let session = context(Arc::default()).open(FormMode::Edit(event));
        assert_eq!(session.draft().time, time!(10:15));
    }

    #[test]
    fn resolve_without_custom_time_returns_date_as_is() -> anyhow::Result<()> {
        let mut session = context(Arc::default()).open(FormMode::Add);
        let picked = datetime!(2025-08-09 13:37:12 UTC);
        session.set_date(picked);
        session.set_time(time!(06:00));
        assert_eq!(session.resolve_date_time()?, picked);
        Ok(())
    }

    #[test]
    fn resolve_with_custom_time_merges_components() -> anyhow::Result<()> {
        let mut session = context(Arc::default())
            .with_calendar(Calendar::new(offset!(+2)))
            .open(FormMode::Add);
        session.set_calendar_date(date!(2025 - 08 - 09));
        session.set_time(time!(21:45:10));
        session.set_custom_time(true);
        let resolved = session.resolve_date_time()?;
        assert_eq!(resolved, datetime!(2025-08-09 21:45 +2));
        assert_eq!(resolved.offset(), offset!(+2));
        Ok(())
    }

    #[test]
    fn archived_event_always_resolves_to_stored_date_time() -> anyhow::Result<()> {
        let original = datetime!(2024-12-24 19:00 UTC);
        let mut session =
            context(Arc::default()).open(FormMode::Edit(stored_event(original, true)));
        session.set_calendar_date(date!(2026 - 01 - 01));
        session.set_time(time!(07:00));
        session.set_custom_time(false);
        assert_eq!(session.resolve_date_time()?, original);
        Ok(())
    }

    #[test]
    fn archived_bounds_are_pinned_to_event() {
        let original = datetime!(2024-12-24 19:00 UTC);
        let session = context(Arc::default()).open(FormMode::Edit(stored_event(original, true)));
        let bounds = session.compute_bounds();
        assert_eq!(bounds, PickerBounds::pinned(original));
        assert!(!session.layout().is_enabled(FormFields::DATE_PICKER));
    }

    #[test]
    fn bounds_limit_time_only_when_today_is_selected() {
        let mut session = context(Arc::default()).open(FormMode::Add);
        let today = session.bounds();
        assert_eq!(today.date_min, Some(NOW));
        assert_eq!(today.time_min, Some(NOW));
        assert_eq!(today.time_max, None);
        assert_eq!(today.date_max, None);

        session.set_calendar_date(date!(2025 - 05 - 21));
        let tomorrow = session.bounds();
        assert_eq!(tomorrow.date_min, Some(NOW));
        assert_eq!(tomorrow.time_min, None);
        assert_eq!(tomorrow.time_max, None);
    }

    #[test]
    fn empty_name_never_reaches_store() {
        let store = Arc::new(RecordingStore::default());
        let mut session = context(store.clone()).open(FormMode::Add);
        session.set_tags_text("a, b");
        session.set_name("   ");
        assert_matches!(
            session.save(),
            Err(SaveError::Validation(ValidationError::EmptyName))
        );
        assert_matches!(
            session.save(),
            Err(SaveError::Validation(ValidationError::EmptyName))
        );
        assert!(store.calls().is_empty());
        assert_eq!(session.state(), SessionState::Editing);
    }

    #[test]
    fn add_save_creates_event_and_refreshes_list() -> anyhow::Result<()> {
        let store = Arc::new(RecordingStore::default());
        let observer = Arc::new(CountingObserver::default());
        let mut session = context(store.clone())
            .with_observer(observer.clone())
            .open(FormMode::Add);
        session.set_name("Birthday");
        session.set_calendar_date(date!(2025 - 06 - 01));
        session.set_custom_time(false);
        session.set_tags_text("family, fun");
        session.set_note("bring cake");

        let outcome = session.save()?;
        assert_matches!(outcome, SaveOutcome::Created(_));
        assert_eq!(
            store.calls(),
            vec![Call::Create(EventFields {
                name: "Birthday".into(),
                date_time: datetime!(2025-06-01 00:00 UTC),
                tags: vec!["family".into(), "fun".into()],
                note: "bring cake".into(),
                has_time: false,
            })]
        );
        assert_eq!(session.state(), SessionState::Committed);
        assert_eq!(observer.list.load(Ordering::SeqCst), 1);
        assert_eq!(observer.detail.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[test]
    fn edit_save_updates_event_and_refreshes_detail() -> anyhow::Result<()> {
        let store = Arc::new(RecordingStore::default());
        let observer = Arc::new(CountingObserver::default());
        let event = stored_event(datetime!(2025-07-04 18:30 UTC), false);
        let mut session = context(store.clone())
            .with_observer(observer.clone())
            .open(FormMode::Edit(event.clone()));
        session.set_name("Final exam");
        session.set_time(time!(09:00));

        let outcome = session.save()?;
        assert_eq!(outcome.event().id, event.id);
        assert_eq!(outcome.event().name, "Final exam");
        assert_matches!(
            store.calls().as_slice(),
            [Call::Update(id, fields)]
                if *id == event.id && fields.date_time == datetime!(2025-07-04 09:00 UTC)
        );
        assert_eq!(observer.detail.load(Ordering::SeqCst), 1);
        assert_eq!(observer.list.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[test]
    fn store_failure_keeps_session_editable() -> anyhow::Result<()> {
        let store = Arc::new(RecordingStore::default());
        *store.fail_with.lock() = Some(StoreError::Backend("disk full".into()));
        let mut session = context(store.clone()).open(FormMode::Add);
        session.set_name("Retry me");

        assert_matches!(session.save(), Err(SaveError::Store(StoreError::Backend(_))));
        assert_eq!(session.state(), SessionState::Editing);

        session.save()?;
        assert_eq!(store.calls().len(), 1);
        Ok(())
    }

    fn beyond_year_9999(store: Arc<RecordingStore>, date_fallback: DateFallback) -> FormSession {
        let options = FormOptions {
            date_fallback,
            ..FormOptions::default()
        };
        let mut session = context(store)
            .with_calendar(Calendar::new(offset!(+10)))
            .with_options(options)
            .open(FormMode::Add);
        session.set_name("New millennium");
        // already 10000-01-01 in UTC+10
        session.set_date(datetime!(9999-12-31 20:00 UTC));
        session.set_custom_time(true);
        session
    }

    #[test]
    fn unresolvable_date_aborts_save_by_default() {
        let store = Arc::new(RecordingStore::default());
        let mut session = beyond_year_9999(store.clone(), DateFallback::Abort);

        assert_matches!(
            session.resolve_date_time(),
            Err(DateResolutionError::OutOfRange)
        );
        assert_matches!(
            session.save(),
            Err(SaveError::DateResolution(DateResolutionError::OutOfRange))
        );
        assert_eq!(session.state(), SessionState::Editing);
        assert!(store.calls().is_empty());
    }

    #[test]
    fn unresolvable_date_falls_back_to_now_when_configured() -> anyhow::Result<()> {
        let store = Arc::new(RecordingStore::default());
        let mut session = beyond_year_9999(store.clone(), DateFallback::Now);

        let outcome = session.save()?;
        assert_eq!(outcome.event().date_time, NOW);
        assert!(outcome.event().has_time);
        assert_matches!(
            store.calls().as_slice(),
            [Call::Create(fields)] if fields.date_time == NOW
        );
        assert_eq!(session.state(), SessionState::Committed);
        Ok(())
    }

    #[test]
    fn closed_sessions_reject_save_and_ignore_edits() -> anyhow::Result<()> {
        let store = Arc::new(RecordingStore::default());
        let mut session = context(store.clone()).open(FormMode::Add);
        session.cancel()?;
        session.set_name("Too late");
        assert!(session.draft().name.is_empty());
        assert_matches!(
            session.save(),
            Err(SaveError::SessionClosed(SessionState::Discarded))
        );
        assert_matches!(
            session.cancel(),
            Err(SaveError::SessionClosed(SessionState::Discarded))
        );
        assert!(store.calls().is_empty());
        Ok(())
    }

    #[test]
    fn saves_through_memory_store() -> anyhow::Result<()> {
        let store = Arc::new(MemoryStore::new());
        let options = FormOptions {
            tag_separator: ';',
            ..FormOptions::default()
        };
        let context = FormContext::new(store.clone())
            .with_clock(Arc::new(FixedClock(NOW)))
            .with_options(options);
        let mut session = context.open(FormMode::Add);
        session.set_name(" Trip ");
        session.set_tags_text("travel;  far away");

        let created = session.save()?.event().clone();
        assert_eq!(created.name, "Trip");
        assert_eq!(created.tags, ["travel", "far away"]);
        assert_eq!(store.get(created.id), Some(created));
        Ok(())
    }

    #[test]
    fn pane_selection_changes_layout() {
        let mut session = context(Arc::default()).open(FormMode::Add);
        assert!(session.layout().is_visible(FormFields::DATE_PICKER));
        session.select_pane(FormPane::Details);
        assert_eq!(session.pane(), FormPane::Details);
        assert!(!session.layout().is_visible(FormFields::DATE_PICKER));
        assert!(session.layout().is_visible(FormFields::NOTES_VIEW));
    }
}
