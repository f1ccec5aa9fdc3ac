use once_cell::sync::Lazy;
use time::format_description::{self, FormatItem};
use time::{Duration, OffsetDateTime};

use crate::calendar::Calendar;
use crate::model::{Event, EventId};

static DATE_FORMAT: Lazy<Vec<FormatItem<'static>>> = Lazy::new(|| {
    format_description::parse("[year]-[month]-[day]").unwrap_or_default()
});
static DATE_TIME_FORMAT: Lazy<Vec<FormatItem<'static>>> = Lazy::new(|| {
    format_description::parse("[year]-[month]-[day] [hour]:[minute]").unwrap_or_default()
});

/// Display values for one countdown row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub id: EventId,
    pub name: String,
    pub date_label: String,
    pub countdown: String,
    pub tags_label: String,
    pub archived: bool,
}

impl EventRow {
    pub fn build(event: &Event, now: OffsetDateTime, calendar: Calendar) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            date_label: date_label(event, calendar),
            countdown: countdown_label(event, now, calendar),
            tags_label: format_tags(&event.tags),
            archived: event.archived,
        }
    }
}

pub fn date_label(event: &Event, calendar: Calendar) -> String {
    let local = calendar.local(event.date_time).unwrap_or(event.date_time);
    let format = if event.has_time {
        &*DATE_TIME_FORMAT
    } else {
        &*DATE_FORMAT
    };
    local
        .format(format)
        .unwrap_or_else(|_| local.date().to_string())
}

/// Time left until (or elapsed since) the event.
///
/// Date-only events count whole calendar days.
pub fn countdown_label(event: &Event, now: OffsetDateTime, calendar: Calendar) -> String {
    if !event.has_time {
        let (Some(target), Some(today)) =
            (calendar.date_of(event.date_time), calendar.date_of(now))
        else {
            return String::new();
        };
        let days = (target - today).whole_days();
        return match days {
            0 => "Today".to_string(),
            d if d > 0 => format!("in {d}d"),
            d => format!("{}d ago", -d),
        };
    }

    let remaining = event.date_time - now;
    if remaining.abs() < Duration::minutes(1) {
        return "Now".to_string();
    }
    if remaining.is_negative() {
        let elapsed = -remaining;
        return if elapsed >= Duration::days(1) {
            format!("{}d ago", elapsed.whole_days())
        } else if elapsed >= Duration::hours(1) {
            format!("{}h ago", elapsed.whole_hours())
        } else {
            format!("{}m ago", elapsed.whole_minutes())
        };
    }

    let seconds = remaining.whole_seconds();
    if seconds >= 86_400 * 2 {
        format!("in {}d", seconds / 86_400)
    } else if seconds >= 86_400 {
        let days = seconds / 86_400;
        let hours = (seconds % 86_400) / 3_600;
        if hours == 0 {
            format!("in {days}d")
        } else {
            format!("in {days}d {hours}h")
        }
    } else if seconds >= 3_600 {
        format!("in {}h", seconds / 3_600)
    } else {
        let minutes = (seconds + 59) / 60;
        format!("in {minutes}m")
    }
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ")
}
