//! The event store and its JSON file.
//!
//! A [`ScheduleStore`] keeps every event in memory and rewrites the whole data
//! file after each mutation:
//!
//! ```json
//! {
//!   "next_id": 4,
//!   "events": [
//!     {"id": 1, "title": "Team Meeting", "date": "2026-01-15", "time": "14:00", "description": ""}
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::CorruptDataPolicy;
use crate::error::{ScheduleError, ScheduleResult};
use crate::event::{Event, EventUpdate};

const FIRST_ID: u64 = 1;

fn first_id() -> u64 {
    FIRST_ID
}

/// On-disk shape used when reading. Events stay as raw mappings so each one
/// goes through [`Event::from_value`].
#[derive(Deserialize)]
struct StoredSchedule {
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default)]
    events: Vec<Value>,
}

/// On-disk shape used when writing.
#[derive(Serialize)]
struct StoredScheduleRef<'a> {
    next_id: u64,
    events: &'a [Event],
}

/// A data file that existed but could not be used. The store was reset to empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    Discarded {
        path: PathBuf,
        reason: String,
    },
    BackedUp {
        path: PathBuf,
        backup: PathBuf,
        reason: String,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadWarning::Discarded { path, reason } => write!(
                f,
                "Could not load data from {} ({}); starting with an empty schedule",
                path.display(),
                reason
            ),
            LoadWarning::BackedUp {
                path,
                backup,
                reason,
            } => write!(
                f,
                "Could not load data from {} ({}); moved it to {} and started with an empty schedule",
                path.display(),
                reason,
                backup.display()
            ),
        }
    }
}

/// Result of opening a store: the store itself plus any recovered load problem.
#[derive(Debug)]
pub struct OpenReport {
    pub store: ScheduleStore,
    pub warning: Option<LoadWarning>,
}

/// In-memory collection of events backed by a JSON file.
#[derive(Debug)]
pub struct ScheduleStore {
    path: PathBuf,
    events: Vec<Event>,
    next_id: u64,
}

impl ScheduleStore {
    /// Open the store at `path`, discarding unreadable data.
    pub fn open(path: impl Into<PathBuf>) -> ScheduleResult<OpenReport> {
        Self::open_with_policy(path, CorruptDataPolicy::Discard)
    }

    /// Open the store at `path`.
    ///
    /// A missing file gives an empty store. A file that is not valid schedule
    /// JSON also gives an empty store, handled according to `policy` and
    /// reported through [`OpenReport::warning`]. Other I/O failures are errors.
    pub fn open_with_policy(
        path: impl Into<PathBuf>,
        policy: CorruptDataPolicy,
    ) -> ScheduleResult<OpenReport> {
        let mut store = ScheduleStore {
            path: path.into(),
            events: Vec::new(),
            next_id: FIRST_ID,
        };

        let content = match std::fs::read_to_string(&store.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %store.path.display(), "no data file, starting empty");
                return Ok(OpenReport {
                    store,
                    warning: None,
                });
            }
            // Not UTF-8
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                let warning = store.recover(policy, e.to_string())?;
                return Ok(OpenReport {
                    store,
                    warning: Some(warning),
                });
            }
            Err(e) => return Err(e.into()),
        };

        match parse(&content) {
            Ok((events, next_id)) => {
                tracing::debug!(
                    path = %store.path.display(),
                    events = events.len(),
                    next_id,
                    "loaded schedule"
                );
                store.events = events;
                store.next_id = next_id;
                Ok(OpenReport {
                    store,
                    warning: None,
                })
            }
            Err(e) => {
                let warning = store.recover(policy, e.to_string())?;
                Ok(OpenReport {
                    store,
                    warning: Some(warning),
                })
            }
        }
    }

    /// Apply the corrupt-data policy to the current file. State stays empty.
    fn recover(&self, policy: CorruptDataPolicy, reason: String) -> ScheduleResult<LoadWarning> {
        tracing::warn!(path = %self.path.display(), %reason, ?policy, "malformed schedule data");

        match policy {
            CorruptDataPolicy::Discard => Ok(LoadWarning::Discarded {
                path: self.path.clone(),
                reason,
            }),
            CorruptDataPolicy::Backup => {
                let backup = with_suffix(&self.path, ".corrupt");
                std::fs::rename(&self.path, &backup)?;
                Ok(LoadWarning::BackedUp {
                    path: self.path.clone(),
                    backup,
                    reason,
                })
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The id the next added event will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Insert `event` under the next unused id and persist.
    ///
    /// Any id the event already carries is replaced. Returns a copy carrying the
    /// assigned id.
    pub fn add(&mut self, mut event: Event) -> ScheduleResult<Event> {
        let id = self.next_id;
        let next_id = id.checked_add(1).ok_or(ScheduleError::IdsExhausted)?;
        event.id = Some(id);
        self.events.push(event.clone());
        self.next_id = next_id;

        if let Err(e) = self.save() {
            self.events.pop();
            self.next_id = id;
            return Err(e);
        }

        tracing::debug!(id, "added event");
        Ok(event)
    }

    pub fn get(&self, id: u64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == Some(id))
    }

    /// Overwrite the supplied fields of event `id` and persist.
    ///
    /// Returns `Ok(false)` without writing when no such event exists.
    pub fn update(&mut self, id: u64, update: &EventUpdate) -> ScheduleResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let previous = self.events[index].clone();
        update.apply_to(&mut self.events[index]);

        if let Err(e) = self.save() {
            self.events[index] = previous;
            return Err(e);
        }

        tracing::debug!(id, "updated event");
        Ok(true)
    }

    /// Remove event `id` and persist.
    ///
    /// Returns `Ok(false)` without writing when no such event exists.
    pub fn delete(&mut self, id: u64) -> ScheduleResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let removed = self.events.remove(index);

        if let Err(e) = self.save() {
            self.events.insert(index, removed);
            return Err(e);
        }

        tracing::debug!(id, "deleted event");
        Ok(true)
    }

    /// List events.
    ///
    /// With a date, returns the events on that date in insertion order. Without
    /// one (or with an empty string), returns every event sorted by the
    /// `(date, time)` strings; ties keep insertion order.
    pub fn list(&self, date: Option<&str>) -> Vec<&Event> {
        match date.filter(|d| !d.is_empty()) {
            Some(date) => self.events.iter().filter(|e| e.date == date).collect(),
            None => {
                let mut events: Vec<&Event> = self.events.iter().collect();
                events.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
                events
            }
        }
    }

    /// Write the whole store to its file.
    ///
    /// Goes through `<file>.tmp` and a rename so an interrupted write leaves the
    /// previous contents in place.
    pub fn save(&self) -> ScheduleResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&StoredScheduleRef {
            next_id: self.next_id,
            events: &self.events,
        })
        .map_err(|e| ScheduleError::Serialization(e.to_string()))?;

        let temp = with_suffix(&self.path, ".tmp");
        std::fs::write(&temp, content)?;
        if let Err(e) = std::fs::rename(&temp, &self.path) {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::debug!(
            path = %self.path.display(),
            events = self.events.len(),
            next_id = self.next_id,
            "saved schedule"
        );
        Ok(())
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.events.iter().position(|e| e.id == Some(id))
    }
}

/// Parse file contents into events and the next id.
///
/// The top level must be an object. Events without an id or with a repeated id
/// make the file malformed. A stored `next_id` at or below the highest stored id
/// is raised past it, unless the highest id is `u64::MAX`.
fn parse(content: &str) -> ScheduleResult<(Vec<Event>, u64)> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| ScheduleError::Data(e.to_string()))?;
    if !value.is_object() {
        return Err(ScheduleError::Data(
            "expected a JSON object at the top level".to_string(),
        ));
    }
    let stored: StoredSchedule =
        serde_json::from_value(value).map_err(|e| ScheduleError::Data(e.to_string()))?;

    let events = stored
        .events
        .into_iter()
        .map(Event::from_value)
        .collect::<ScheduleResult<Vec<_>>>()?;

    let mut seen = HashSet::new();
    for event in &events {
        let id = event
            .id
            .ok_or_else(|| ScheduleError::Data(format!("event '{}' has no id", event.title)))?;
        if !seen.insert(id) {
            return Err(ScheduleError::Data(format!("duplicate event id {}", id)));
        }
    }

    let mut next_id = stored.next_id.max(FIRST_ID);
    if let Some(max_id) = seen.iter().max()
        && next_id <= *max_id
    {
        tracing::warn!(
            stored = stored.next_id,
            max_id,
            "next_id not above highest event id, raising it"
        );
        next_id = max_id.checked_add(1).ok_or_else(|| {
            ScheduleError::Data(format!("event id {} leaves no id to assign next", max_id))
        })?;
    }

    Ok((events, next_id))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

// =============================================================================
// Tests
// =============================================================================
