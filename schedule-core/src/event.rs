//! Scheduled event records.
//!
//! An [`Event`] is plain data. Its `date` and `time` are kept as the strings the
//! user typed (`YYYY-MM-DD` and `HH:MM`) and are only ever compared lexically.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ScheduleError, ScheduleResult};

/// A scheduled event.
///
/// `id` is `None` until the event is inserted into a
/// [`ScheduleStore`](crate::store::ScheduleStore), which owns identity assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    #[serde(default)]
    pub description: String,
}

impl Event {
    /// Build an event that has not been assigned an id yet.
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Event {
            id: None,
            title: title.into(),
            date: date.into(),
            time: time.into(),
            description: description.into(),
        }
    }

    /// Mapping form: `{id, title, date, time, description}`.
    /// `id` is `null` when the event has not been inserted.
    pub fn to_value(&self) -> ScheduleResult<Value> {
        serde_json::to_value(self).map_err(|e| ScheduleError::Serialization(e.to_string()))
    }

    /// Build an event from its mapping form.
    ///
    /// `description` defaults to empty. Anything other than an object, or a
    /// missing `title`, `date` or `time`, is a [`ScheduleError::Data`].
    pub fn from_value(value: Value) -> ScheduleResult<Self> {
        if !value.is_object() {
            return Err(ScheduleError::Data(format!(
                "expected an event object, found {}",
                value
            )));
        }
        serde_json::from_value(value).map_err(|e| ScheduleError::Data(e.to_string()))
    }

    /// Sort key for unfiltered listings.
    pub(crate) fn sort_key(&self) -> (&str, &str) {
        (&self.date, &self.time)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "[{}]", id)?,
            None => write!(f, "[None]")?,
        }
        write!(f, " {} on {} at {}", self.title, self.date, self.time)?;
        if !self.description.is_empty() {
            write!(f, " - {}", self.description)?;
        }
        Ok(())
    }
}

/// A partial change to an event. Fields left as `None` are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
}

impl EventUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.description.is_none()
    }

    /// Overwrite the supplied fields on `event`. The id is never touched.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(date) = &self.date {
            event.date = date.clone();
        }
        if let Some(time) = &self.time {
            event.time = time.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
    }
}
