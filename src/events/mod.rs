#[cfg(test)]
use std::cell::RefCell;
use std::fmt;
#[cfg(test)]
use std::rc::Rc;

use crate::store::Collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Updated => "updated",
            ChangeKind::Deleted => "deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    Record {
        collection: Collection,
        id: u64,
        kind: ChangeKind,
    },
    ProgressRecomputed {
        project_id: u64,
        progress: u8,
    },
}

impl ChangeEvent {
    pub fn created(collection: Collection, id: u64) -> Self {
        ChangeEvent::Record {
            collection,
            id,
            kind: ChangeKind::Created,
        }
    }

    pub fn updated(collection: Collection, id: u64) -> Self {
        ChangeEvent::Record {
            collection,
            id,
            kind: ChangeKind::Updated,
        }
    }

    pub fn deleted(collection: Collection, id: u64) -> Self {
        ChangeEvent::Record {
            collection,
            id,
            kind: ChangeKind::Deleted,
        }
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeEvent::Record {
                collection,
                id,
                kind,
            } => write!(f, "{} {} {}", collection.noun(), id, kind.as_str()),
            ChangeEvent::ProgressRecomputed {
                project_id,
                progress,
            } => write!(f, "project {} progress recomputed to {}%", project_id, progress),
        }
    }
}

/// Receives every mutation the app performs, after it has been persisted.
pub trait ChangeListener {
    fn on_change(&self, event: &ChangeEvent);
}

/// Listener set fixed when the app is composed.
#[derive(Default)]
pub struct Listeners {
    inner: Vec<Box<dyn ChangeListener>>,
}

impl Listeners {
    pub fn register(&mut self, listener: Box<dyn ChangeListener>) {
        self.inner.push(listener);
    }

    pub fn notify(&self, event: &ChangeEvent) {
        for listener in &self.inner {
            listener.on_change(event);
        }
    }
}

pub struct LogListener;

impl ChangeListener for LogListener {
    fn on_change(&self, event: &ChangeEvent) {
        log::info!("{}", event);
    }
}

/// Collects events in memory; shared handle so the caller can inspect them
/// after handing the listener to the app.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingListener {
    events: Rc<RefCell<Vec<ChangeEvent>>>,
}

#[cfg(test)]
impl RecordingListener {
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.borrow().clone()
    }
}

#[cfg(test)]
impl ChangeListener for RecordingListener {
    fn on_change(&self, event: &ChangeEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
