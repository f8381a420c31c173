use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use super::{WeekGrid, DAYS_PER_WEEK, HOURS_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub start: NaiveDateTime,
    pub summary: String,
}

impl Event {
    pub fn new(start: NaiveDateTime, summary: &str) -> Self {
        Event {
            start,
            summary: summary.to_owned(),
        }
    }
}

/// Inclusive span of start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl EventRange {
    /// A missing bound extends the range to the edge of the date range.
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        EventRange {
            start: start.unwrap_or(NaiveDateTime::MIN),
            end: end.unwrap_or(NaiveDateTime::MAX),
        }
    }

    /// Every start time from midnight of `first` to the last instant of `last`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        EventRange {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(last_instant()),
        }
    }

    pub fn week(week: &WeekGrid) -> Self {
        EventRange::days(week.first_day(), week.last_day())
    }

    pub fn contains(&self, time: &NaiveDateTime) -> bool {
        (self.start..=self.end).contains(time)
    }
}

fn last_instant() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN)
}

/// In-memory event store ordered by start time.
#[derive(Debug, Clone, Default)]
pub struct Agenda {
    events: HashMap<EventId, Event>,
    by_start: BTreeSet<(NaiveDateTime, EventId)>,
}

impl Agenda {
    pub fn new() -> Self {
        Agenda::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Stores `event` under `id`. An id that is already taken leaves the
    /// agenda untouched and hands the event back.
    pub fn add_event(&mut self, id: EventId, event: Event) -> Option<Event> {
        if self.events.contains_key(&id) {
            log::debug!("event {} already exists", id);
            return Some(event);
        }

        log::debug!("adding event {} at {}", id, event.start);
        self.by_start.insert((event.start, id));
        self.events.insert(id, event);
        None
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    pub fn remove(&mut self, id: EventId) -> Option<Event> {
        let event = self.events.remove(&id)?;
        self.by_start.remove(&(event.start, id));
        log::debug!("removed event {}", id);
        Some(event)
    }

    /// Events starting within `range`, earliest first. Events with the same
    /// start are ordered by id.
    pub fn range(&self, range: EventRange) -> impl Iterator<Item = (EventId, &Event)> {
        log::trace!("event range {} -> {}", range.start, range.end);

        let keys = if range.start <= range.end {
            Some(
                self.by_start
                    .range((range.start, EventId(u64::MIN))..=(range.end, EventId(u64::MAX))),
            )
        } else {
            None
        };

        keys.into_iter()
            .flatten()
            .filter_map(move |(_, id)| self.events.get(id).map(|event| (*id, event)))
    }

    /// First event of each hour row and day column of `week`.
    pub fn week_slots(&self, week: &WeekGrid) -> Vec<[Option<&Event>; DAYS_PER_WEEK]> {
        let mut slots = vec![[None; DAYS_PER_WEEK]; HOURS_PER_DAY as usize];

        for (_, event) in self.range(EventRange::week(week)) {
            let column = week.days.iter().position(|d| d.date == event.start.date());
            if let Some(column) = column {
                let slot = &mut slots[event.start.hour() as usize][column];
                if slot.is_none() {
                    *slot = Some(event);
                }
            }
        }

        slots
    }
}
