//! Concurrent lookup structures for the task board.
//!
//! The index keeps one authoritative map from identity key to record handle
//! plus three derived bucket maps: by urgency, by importance and by tag.
//! Buckets hold shared handles, not copies, so an edit made through one view
//! is visible through every other view of the same record.
//!
//! ## Concurrency Contract
//!
//! - Every map and set is internally sharded (dashmap); single inserts and
//!   removals are atomic without caller locks.
//! - Compound operations (bucket moves, rekeying) are NOT atomic across
//!   collections. A concurrent reader may catch a record in neither urgency
//!   bucket mid-move, or in the main map before its buckets fill. Accepted.
//! - The board invokes flag and tag moves while holding the record's write
//!   lock, so racing moves for one record apply in field order and the
//!   buckets settle on the record's final fields.
//! - A removal that finds nothing is tolerated; a concurrent move or delete
//!   got there first.

use crate::libs::task::{Task, TaskKey, TaskView};
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Shared handle to a live task record.
///
/// Hashes and compares by pointer identity, so bucket membership survives
/// renames and field edits. Cloning shares the same record.
#[derive(Debug, Clone)]
pub struct TaskRef(Arc<RwLock<Task>>);

impl TaskRef {
    pub fn new(task: Task) -> Self {
        TaskRef(Arc::new(RwLock::new(task)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Task> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Task> {
        self.0.write()
    }

    /// Detached snapshot for display or serialization.
    pub fn view(&self) -> TaskView {
        TaskView::from(&*self.read())
    }

    /// True when both handles point at the same record.
    pub fn same(&self, other: &TaskRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for TaskRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TaskRef {}

impl Hash for TaskRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state)
    }
}

/// Multi-key lookup over live records.
///
/// Supports exactly the accesses the board needs: point lookups by identity
/// key, urgency flag, importance flag or tag, and a full scan. Empty tag
/// buckets are pruned; the two flag maps keep their buckets once created.
#[derive(Debug, Default)]
pub struct TaskIndex {
    tasks: DashMap<TaskKey, TaskRef>,
    by_urgency: DashMap<bool, DashSet<TaskRef>>,
    by_importance: DashMap<bool, DashSet<TaskRef>>,
    by_tag: DashMap<String, DashSet<TaskRef>>,
}

impl TaskIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, key: &TaskKey) -> Option<TaskRef> {
        self.tasks.get(key).map(|entry| entry.value().clone())
    }

    /// Inserts a record under `key` and files it into every bucket its
    /// current fields select.
    ///
    /// When another thread inserted the same key first, that handle wins and
    /// is returned; `task` is dropped. Re-filing the winner's buckets is a
    /// no-op since sets deduplicate by handle identity. The record's read
    /// lock is held across the filing: a concurrent setter cannot move the
    /// record mid-fill and leave it in a bucket its fields no longer select.
    pub fn insert(&self, key: TaskKey, task: TaskRef) -> TaskRef {
        let winner = match self.tasks.entry(key) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                entry.insert(task.clone());
                task
            }
        };
        let record = winner.read();
        self.by_urgency.entry(record.urgent).or_default().insert(winner.clone());
        self.by_importance.entry(record.important).or_default().insert(winner.clone());
        for tag in record.tags.iter() {
            self.by_tag.entry(tag.clone()).or_default().insert(winner.clone());
        }
        drop(record);
        winner
    }

    /// Removes a record from the main map and every bucket it occupies.
    pub fn remove(&self, key: &TaskKey) -> Option<TaskRef> {
        let (_, task) = self.tasks.remove(key)?;
        self.unbucket(&task);
        Some(task)
    }

    /// Moves a record's main-map entry from `old` to `new`.
    ///
    /// Buckets key by handle identity and stay untouched. A record already
    /// sitting under `new` is superseded: it leaves its buckets and its file
    /// will simply be overwritten at the next flush. `old` is only removed
    /// while it still maps to `task`; `false` means a concurrent delete or
    /// supersession emptied the entry first and nothing moved. Callers
    /// serialize racing renames of one record by holding its write lock
    /// across this call.
    pub fn rekey(&self, old: &TaskKey, new: TaskKey, task: &TaskRef) -> bool {
        if self.tasks.remove_if(old, |_, current| current.same(task)).is_none() {
            return false;
        }
        if let Some(evicted) = self.tasks.insert(new, task.clone()) {
            if !evicted.same(task) {
                self.unbucket(&evicted);
            }
        }
        true
    }

    /// Shifts a record between urgency buckets. Remove-then-insert: the
    /// record is never in both, though it may briefly be in neither.
    pub fn move_urgency(&self, task: &TaskRef, from: bool, to: bool) {
        if let Some(bucket) = self.by_urgency.get(&from) {
            bucket.remove(task);
        }
        self.by_urgency.entry(to).or_default().insert(task.clone());
    }

    pub fn move_importance(&self, task: &TaskRef, from: bool, to: bool) {
        if let Some(bucket) = self.by_importance.get(&from) {
            bucket.remove(task);
        }
        self.by_importance.entry(to).or_default().insert(task.clone());
    }

    /// Files a record into a tag bucket, creating the bucket on first use.
    pub fn add_tag(&self, task: &TaskRef, tag: &str) {
        self.by_tag.entry(tag.to_string()).or_default().insert(task.clone());
    }

    /// Drops a record from a tag bucket, pruning the bucket once empty.
    pub fn remove_tag(&self, task: &TaskRef, tag: &str) {
        if let Some(bucket) = self.by_tag.get(tag) {
            bucket.remove(task);
        }
        self.by_tag.remove_if(tag, |_, bucket| bucket.is_empty());
    }

    pub fn by_urgency(&self, urgent: bool) -> Vec<TaskRef> {
        self.bucket_snapshot(&self.by_urgency, &urgent)
    }

    pub fn by_importance(&self, important: bool) -> Vec<TaskRef> {
        self.bucket_snapshot(&self.by_importance, &important)
    }

    pub fn by_tag(&self, tag: &str) -> Vec<TaskRef> {
        self.by_tag.get(tag).map(|bucket| bucket.iter().map(|task| task.key().clone()).collect()).unwrap_or_default()
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Every tag that currently has a bucket.
    pub fn tags(&self) -> Vec<String> {
        self.by_tag.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Full-scan snapshot of all live handles, in no particular order.
    pub fn all(&self) -> Vec<TaskRef> {
        self.tasks.iter().map(|entry| entry.value().clone()).collect()
    }

    fn bucket_snapshot(&self, map: &DashMap<bool, DashSet<TaskRef>>, key: &bool) -> Vec<TaskRef> {
        map.get(key).map(|bucket| bucket.iter().map(|task| task.key().clone()).collect()).unwrap_or_default()
    }

    /// Clears a record out of every bucket its current fields select. The
    /// field snapshot is taken before any bucket map is locked.
    fn unbucket(&self, task: &TaskRef) {
        let (urgent, important, tags) = {
            let record = task.read();
            (record.urgent, record.important, record.tags.iter().cloned().collect::<Vec<_>>())
        };
        if let Some(bucket) = self.by_urgency.get(&urgent) {
            bucket.remove(task);
        }
        if let Some(bucket) = self.by_importance.get(&important) {
            bucket.remove(task);
        }
        for tag in &tags {
            self.remove_tag(task, tag);
        }
    }
}
