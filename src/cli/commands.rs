use std::fmt::Write as _;
use std::io::{self, Read};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};

use crate::calendar::Clock;
use crate::config::AppConfig;
use crate::form::{parse_tags, FormContext, FormMode, FormSession, PickerBounds};
use crate::list::{ListSyncAdapter, StoreViewModel};
use crate::store::{EventStore, MemoryStore};

#[derive(Args, Debug, Clone)]
pub struct TagsArgs {
    /// Raw tag text, e.g. "family, road trip"
    pub text: String,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Selected date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: Date,
    /// Custom time of day (HH:MM); omit for a date-only event
    #[arg(long, value_parser = parse_time)]
    pub time: Option<Time>,
}

#[derive(Args, Debug, Clone)]
pub struct BoundsArgs {
    /// Selected date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: Date,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Event name
    pub name: String,
    /// Event date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: Date,
    /// Custom time of day (HH:MM)
    #[arg(long, value_parser = parse_time)]
    pub time: Option<Time>,
    /// Tags separated by the configured tag separator
    #[arg(long, default_value = "")]
    pub tags: String,
    /// Note text. If omitted, reads from stdin when it is not a terminal.
    #[arg(long)]
    pub note: Option<String>,
}

pub fn split_tags(config: &AppConfig, args: &TagsArgs) -> String {
    let tags = parse_tags(&args.text, config.tag_separator);
    if tags.is_empty() {
        return "(no tags)\n".to_string();
    }
    let mut out = String::new();
    for tag in tags {
        let _ = writeln!(&mut out, "{tag}");
    }
    out
}

pub fn resolve(config: &AppConfig, clock: Arc<dyn Clock>, args: &ResolveArgs) -> Result<String> {
    let store: Arc<dyn EventStore> = Arc::new(MemoryStore::new());
    let mut session = scheduled_session(config, clock, store, args.date, args.time);
    let resolved = session
        .resolve_date_time()
        .context("resolving event date")?;
    session.cancel()?;
    Ok(format!("{}\n", format_instant(resolved)))
}

pub fn bounds(config: &AppConfig, clock: Arc<dyn Clock>, args: &BoundsArgs) -> String {
    let store: Arc<dyn EventStore> = Arc::new(MemoryStore::new());
    let session = scheduled_session(config, clock, store, args.date, None);
    format_bounds(&session.bounds())
}

pub fn run_add(config: &AppConfig, clock: Arc<dyn Clock>, mut args: AddArgs) -> Result<String> {
    if args.note.is_none() {
        args.note = read_stdin()?;
    }
    add_event(config, clock, &args)
}

fn add_event(config: &AppConfig, clock: Arc<dyn Clock>, args: &AddArgs) -> Result<String> {
    let store = Arc::new(MemoryStore::new());
    let updates = store.subscribe();
    let view_model = StoreViewModel::new(store.clone())
        .with_clock(clock.clone())
        .with_calendar(config.calendar());
    let adapter =
        ListSyncAdapter::new(Arc::new(view_model)).with_delete_policy(config.delete_policy);

    let mut session = scheduled_session(config, clock, store, args.date, args.time);
    session.set_name(args.name.as_str());
    session.set_tags_text(args.tags.as_str());
    session.set_note(args.note.clone().unwrap_or_default());
    let outcome = session.save().context("saving event")?;
    let event = outcome.event();

    adapter.drain_changes(&updates);
    let row = adapter
        .snapshot()
        .index_of(event.id)
        .and_then(|index| adapter.row_at(index))
        .context("new event missing from list")?;

    let mut out = serde_json::to_string_pretty(event).context("serializing event")?;
    out.push('\n');
    let _ = write!(&mut out, "{}  {}  {}", row.name, row.date_label, row.countdown);
    if !row.tags_label.is_empty() {
        let _ = write!(&mut out, "  {}", row.tags_label);
    }
    out.push('\n');
    Ok(out)
}

fn scheduled_session(
    config: &AppConfig,
    clock: Arc<dyn Clock>,
    store: Arc<dyn EventStore>,
    date: Date,
    time: Option<Time>,
) -> FormSession {
    let context = FormContext::new(store)
        .with_clock(clock)
        .with_calendar(config.calendar())
        .with_options(config.form_options());
    let mut session = context.open(FormMode::Add);
    session.set_calendar_date(date);
    if let Some(time) = time {
        session.set_custom_time(true);
        session.set_time(time);
    }
    session
}

fn format_bounds(bounds: &PickerBounds) -> String {
    let mut out = String::new();
    for (label, value) in [
        ("date min", bounds.date_min),
        ("date max", bounds.date_max),
        ("time min", bounds.time_min),
        ("time max", bounds.time_max),
    ] {
        let value = value.map(format_instant).unwrap_or_else(|| "none".into());
        let _ = writeln!(&mut out, "{label}: {value}");
    }
    out
}

fn format_instant(instant: OffsetDateTime) -> String {
    instant
        .format(&Rfc3339)
        .unwrap_or_else(|_| instant.unix_timestamp().to_string())
}

fn parse_date(raw: &str) -> Result<Date, String> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn parse_time(raw: &str) -> Result<Time, String> {
    Time::parse(raw, format_description!("[hour]:[minute]"))
        .map_err(|err| format!("expected HH:MM: {err}"))
}

fn read_stdin() -> Result<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("reading note from stdin")?;
    let note = buf.trim_end().to_string();
    Ok((!note.is_empty()).then_some(note))
}
