//! Entity store: tasks, notes and meetings
//!
//! Collections are loaded once from a [`KeyValueStore`] and written back on
//! every change. Absent or unreadable keys fall back to a small starter set.
//! Persistence failures are logged and dropped; the in-memory state stays
//! authoritative for the rest of the session.
//!
//! Changes are announced on a broadcast channel (see [`EntityStore::subscribe`]).

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::model::{Meeting, NewMeeting, NewTask, Note, Task, TaskStatus, format_iso_date};
use crate::storage::KeyValueStore;

/// Persistence key for tasks
pub const TASKS_KEY: &str = "tasks";
/// Persistence key for notes
pub const NOTES_KEY: &str = "notes";
/// Persistence key for meetings
pub const MEETINGS_KEY: &str = "meetings";

const UNTITLED_NOTE: &str = "Untitled Note";

/// Which collection changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    TasksChanged,
    NotesChanged,
    MeetingsChanged,
}

/// Partial note edit; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Serialize)]
struct StoredRef<'a, T> {
    items: &'a [T],
}

#[derive(Deserialize)]
struct Stored<T> {
    items: Vec<T>,
}

#[derive(Default)]
struct Collections {
    /// Bumped on every successful mutation
    revision: u64,
    tasks: Vec<Task>,
    notes: Vec<Note>,
    meetings: Vec<Meeting>,
}

pub struct EntityStore {
    data: Mutex<Collections>,
    /// Last revision written per key; a stale snapshot is never written over a newer one
    saved: Mutex<HashMap<&'static str, u64>>,
    backend: Box<dyn KeyValueStore>,
    events: broadcast::Sender<StoreEvent>,
}

impl EntityStore {
    /// Load all three collections from `backend`, seeding defaults where absent
    pub fn open(backend: impl KeyValueStore + 'static) -> Self {
        Self::open_at(backend, Local::now())
    }

    /// Same as [`EntityStore::open`] with seed dates relative to `now`
    pub fn open_at(backend: impl KeyValueStore + 'static, now: DateTime<Local>) -> Self {
        let backend: Box<dyn KeyValueStore> = Box::new(backend);

        let tasks = load_collection(backend.as_ref(), TASKS_KEY)
            .unwrap_or_else(|| default_tasks(now));
        let notes =
            load_collection(backend.as_ref(), NOTES_KEY).unwrap_or_else(|| default_notes(now));
        let mut meetings: Vec<Meeting> = load_collection(backend.as_ref(), MEETINGS_KEY)
            .unwrap_or_else(|| default_meetings(now));
        sort_meetings(&mut meetings);

        debug!(
            tasks = tasks.len(),
            notes = notes.len(),
            meetings = meetings.len(),
            "entity store loaded"
        );

        let (events, _) = broadcast::channel(64);
        Self {
            data: Mutex::new(Collections {
                revision: 0,
                tasks,
                notes,
                meetings,
            }),
            saved: Mutex::new(HashMap::new()),
            backend,
            events,
        }
    }

    /// Receive a [`StoreEvent`] after every successful mutation
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: StoreEvent) {
        // No receivers is fine
        let _ = self.events.send(event);
    }

    fn persist<T: Serialize>(&self, key: &str, items: &[T]) {
        let encoded = match toml::to_string_pretty(&StoredRef { items }) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key, error = %e, "failed to encode collection");
                return;
            }
        };
        if let Err(e) = self.backend.save(key, &encoded) {
            warn!(key, error = %e, "failed to persist collection");
        }
    }

    /// Apply `f` under the data lock, then write the updated collection
    /// after releasing it so readers never wait on the backend.
    fn mutate<T, R>(
        &self,
        key: &'static str,
        event: StoreEvent,
        select: impl FnOnce(&mut Collections) -> &mut Vec<T>,
        f: impl FnOnce(&mut Vec<T>) -> Result<R>,
    ) -> Result<R>
    where
        T: Clone + Serialize,
    {
        let (result, snapshot, revision) = {
            let mut data = self.lock();
            let items = select(&mut *data);
            let result = f(&mut *items)?;
            let snapshot = items.clone();
            data.revision += 1;
            (result, snapshot, data.revision)
        };

        {
            let mut saved = self.saved.lock().unwrap_or_else(PoisonError::into_inner);
            if saved.get(key).is_none_or(|&last| last < revision) {
                self.persist(key, &snapshot);
                saved.insert(key, revision);
            }
        }

        self.emit(event);
        Ok(result)
    }

    fn mutate_tasks<R>(&self, f: impl FnOnce(&mut Vec<Task>) -> Result<R>) -> Result<R> {
        self.mutate(TASKS_KEY, StoreEvent::TasksChanged, |c| &mut c.tasks, f)
    }

    fn mutate_notes<R>(&self, f: impl FnOnce(&mut Vec<Note>) -> Result<R>) -> Result<R> {
        self.mutate(NOTES_KEY, StoreEvent::NotesChanged, |c| &mut c.notes, f)
    }

    fn mutate_meetings<R>(&self, f: impl FnOnce(&mut Vec<Meeting>) -> Result<R>) -> Result<R> {
        self.mutate(MEETINGS_KEY, StoreEvent::MeetingsChanged, |c| &mut c.meetings, f)
    }

    // Tasks

    /// Snapshot of all tasks in insertion order
    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    pub fn task(&self, id: &str) -> Option<Task> {
        self.lock().tasks.iter().find(|t| t.id == id).cloned()
    }

    /// Create a task with a fresh id, appended to the board
    pub fn add_task(&self, new_task: NewTask) -> Result<Task> {
        ensure_title("task", &new_task.title)?;
        let task = new_task.into_task(Local::now());
        self.mutate_tasks(|tasks| {
            tasks.push(task.clone());
            Ok(task)
        })
    }

    /// Replace the stored task carrying the same id
    pub fn update_task(&self, task: Task) -> Result<()> {
        ensure_title("task", &task.title)?;
        self.mutate_tasks(|tasks| {
            let slot = find_mut(tasks, &task.id, |t| &t.id)
                .ok_or_else(|| DashboardError::TaskNotFound(task.id.clone()))?;
            *slot = task;
            Ok(())
        })
    }

    pub fn set_task_status(&self, id: &str, status: TaskStatus) -> Result<()> {
        self.mutate_tasks(|tasks| {
            let task = find_mut(tasks, id, |t| &t.id)
                .ok_or_else(|| DashboardError::TaskNotFound(id.to_string()))?;
            task.status = status;
            Ok(())
        })
    }

    pub fn set_task_date(&self, id: &str, date: NaiveDate) -> Result<()> {
        self.mutate_tasks(|tasks| {
            let task = find_mut(tasks, id, |t| &t.id)
                .ok_or_else(|| DashboardError::TaskNotFound(id.to_string()))?;
            task.date = format_iso_date(date);
            Ok(())
        })
    }

    pub fn delete_task(&self, id: &str) -> Result<Task> {
        self.mutate_tasks(|tasks| {
            let pos = tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| DashboardError::TaskNotFound(id.to_string()))?;
            Ok(tasks.remove(pos))
        })
    }

    /// Task board filter: case-insensitive match on title or description,
    /// optionally restricted to one status
    pub fn search_tasks(&self, term: &str, status: Option<TaskStatus>) -> Vec<Task> {
        let term = term.trim().to_lowercase();
        self.lock()
            .tasks
            .iter()
            .filter(|t| {
                term.is_empty()
                    || t.title.to_lowercase().contains(&term)
                    || t.description.to_lowercase().contains(&term)
            })
            .filter(|t| status.is_none_or(|s| t.status == s))
            .cloned()
            .collect()
    }

    // Notes

    /// Notes, most recently created first
    pub fn notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    /// Create an empty note at the top of the list
    pub fn create_note(&self) -> Note {
        let note = Note::new(UNTITLED_NOTE, "", Local::now());
        let created = note.clone();
        // The closure never fails
        let _ = self.mutate_notes(|notes| {
            notes.insert(0, note);
            Ok(())
        });
        created
    }

    pub fn update_note(&self, id: &str, update: NoteUpdate) -> Result<Note> {
        self.mutate_notes(|notes| {
            let note = find_mut(notes, id, |n| &n.id)
                .ok_or_else(|| DashboardError::NoteNotFound(id.to_string()))?;
            if let Some(title) = update.title {
                note.title = title;
            }
            if let Some(content) = update.content {
                note.content = content;
            }
            note.updated_at = Local::now();
            Ok(note.clone())
        })
    }

    pub fn delete_note(&self, id: &str) -> Result<Note> {
        self.mutate_notes(|notes| {
            let pos = notes
                .iter()
                .position(|n| n.id == id)
                .ok_or_else(|| DashboardError::NoteNotFound(id.to_string()))?;
            Ok(notes.remove(pos))
        })
    }

    // Meetings

    /// Meetings ordered by date, then time
    pub fn meetings(&self) -> Vec<Meeting> {
        self.lock().meetings.clone()
    }

    pub fn add_meeting(&self, new_meeting: NewMeeting) -> Result<Meeting> {
        ensure_title("meeting", &new_meeting.title)?;
        let meeting = new_meeting.into_meeting();
        self.mutate_meetings(|meetings| {
            meetings.push(meeting.clone());
            sort_meetings(meetings);
            Ok(meeting)
        })
    }

    pub fn delete_meeting(&self, id: &str) -> Result<Meeting> {
        self.mutate_meetings(|meetings| {
            let pos = meetings
                .iter()
                .position(|m| m.id == id)
                .ok_or_else(|| DashboardError::MeetingNotFound(id.to_string()))?;
            Ok(meetings.remove(pos))
        })
    }

    /// Split meetings into (upcoming, past) relative to `now`.
    ///
    /// A meeting whose date or time does not parse counts as past.
    pub fn split_meetings(&self, now: NaiveDateTime) -> (Vec<Meeting>, Vec<Meeting>) {
        self.lock()
            .meetings
            .iter()
            .cloned()
            .partition(|m| m.starts_at().is_some_and(|start| start >= now))
    }
}

fn sort_meetings(meetings: &mut [Meeting]) {
    meetings.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
}

fn ensure_title(kind: &'static str, title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(DashboardError::EmptyTitle(kind));
    }
    Ok(())
}

fn find_mut<'a, T>(items: &'a mut [T], id: &str, key: impl Fn(&T) -> &String) -> Option<&'a mut T> {
    items.iter_mut().find(|item| key(item) == id)
}

/// Decode the collection stored under `key`; `None` means "use defaults"
fn load_collection<T: DeserializeOwned>(backend: &dyn KeyValueStore, key: &str) -> Option<Vec<T>> {
    let raw = match backend.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored collection, seeding defaults");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "failed to read stored collection, seeding defaults");
            return None;
        }
    };

    match toml::from_str::<Stored<T>>(&raw) {
        Ok(stored) => Some(stored.items),
        Err(e) => {
            warn!(key, error = %e, "malformed stored collection, seeding defaults");
            None
        }
    }
}

fn default_tasks(now: DateTime<Local>) -> Vec<Task> {
    let today = now.date_naive();
    let day = |offset: u64| {
        format_iso_date(today.checked_add_days(Days::new(offset)).unwrap_or(today))
    };

    vec![
        Task {
            id: "1".to_string(),
            title: "Project Kickoff".to_string(),
            description: "Initial meeting with stakeholders".to_string(),
            date: day(0),
            status: TaskStatus::Done,
            remarks: "Went well".to_string(),
            reminder: false,
            created_at: now,
        },
        Task {
            id: "2".to_string(),
            title: "Submit Budget".to_string(),
            description: "Q4 Financial planning".to_string(),
            date: day(1),
            status: TaskStatus::OnGoing,
            remarks: "Waiting for approval".to_string(),
            reminder: true,
            created_at: now,
        },
        Task {
            id: "3".to_string(),
            title: "Client Review".to_string(),
            description: "Review designs with client".to_string(),
            date: day(2),
            status: TaskStatus::Pending,
            remarks: String::new(),
            reminder: false,
            created_at: now,
        },
    ]
}

fn default_notes(now: DateTime<Local>) -> Vec<Note> {
    vec![Note {
        id: "1".to_string(),
        title: "Meeting Ideas".to_string(),
        content: "Discuss timeline extension and budget constraints.".to_string(),
        updated_at: now,
    }]
}

fn default_meetings(now: DateTime<Local>) -> Vec<Meeting> {
    vec![Meeting {
        id: "1".to_string(),
        title: "Team Standup".to_string(),
        date: format_iso_date(now.date_naive()),
        time: "10:00".to_string(),
        description: "Daily sync".to_string(),
        platform: "Google Meet".to_string(),
    }]
}
