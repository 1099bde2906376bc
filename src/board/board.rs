//! Board orchestration over the task index and the task files.
//!
//! The board owns the index, the pending-save queue and the trash, and is
//! the only layer that mutates records. Every setter applies the field
//! change and the matching index move itself; records never reach back up.
//!
//! ## Persistence Model
//!
//! Mutations are deferred: a setter marks the record dirty and queues its
//! key, and file paths scheduled for removal (renames, deletes) collect in
//! the trash. [`Board::flush`] is the single synchronization point with
//! disk: it purges the trash, then writes every queued record, retaining
//! failures of either kind for the next pass.
//!
//! ## Concurrency
//!
//! All shared state is internally synchronized; callers never lock. Flush
//! may run concurrently with mutations. A flush racing a delete can write a
//! just-deleted record's stale copy once before the trash catches up, and a
//! record mid-move may be briefly absent from both flag buckets. Both are
//! accepted races of the deferred design, not corruption: buckets always
//! converge on the record's current fields.

use crate::board::active::ActiveTask;
use crate::board::files::{self, TaskFiles};
use crate::board::index::{TaskIndex, TaskRef};
use crate::libs::messages::Message;
use crate::libs::task::{normalize_tag, Task, TaskKey, TaskPatch, TaskView};
use crate::{msg_bail_anyhow, msg_debug, msg_warning};
use anyhow::Result;
use dashmap::DashSet;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Counts from one flush pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlushReport {
    /// Records written to disk.
    pub saved: usize,
    /// Trashed files physically removed.
    pub removed: usize,
    /// Writes or removals that failed and stay queued.
    pub failed: usize,
}

/// A named collection of tasks backed by one directory of task files.
#[derive(Debug)]
pub struct Board {
    name: String,
    files: TaskFiles,
    index: TaskIndex,
    pending_save: DashSet<TaskKey>,
    trash: DashSet<PathBuf>,
    active: ActiveTask,
}

impl Board {
    /// Opens the board stored in `dir`, loading every task file into the
    /// index.
    ///
    /// Loaded records are clean and not queued for saving. A missing
    /// directory is an empty board; it is created lazily at the first
    /// flush. Files whose stem does not fold into a valid key are skipped
    /// with a warning.
    pub fn load(name: &str, dir: PathBuf) -> Result<Board> {
        let board = Board {
            name: name.to_string(),
            active: ActiveTask::load(&dir),
            files: TaskFiles::new(dir),
            index: TaskIndex::new(),
            pending_save: DashSet::new(),
            trash: DashSet::new(),
        };
        let stems = board.files.scan()?;
        for stem in stems {
            if board.get_or_create(&stem).is_err() {
                msg_warning!(Message::TaskStemInvalid(stem));
            }
        }
        msg_debug!(Message::BoardLoaded(board.name.clone(), board.len()));
        Ok(board)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        self.files.dir()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the record for `title`, materializing it if needed.
    ///
    /// Resolution order: live record by identity key, else the record's
    /// file on disk, else a fresh blank that starts dirty and queued. An
    /// unreadable or malformed file logs a warning and falls back to the
    /// blank. A file already sitting in the trash counts as absent: the
    /// recreated record is a dirty blank, so the flush that purges the old
    /// file also writes the new one instead of resurrecting doomed content.
    /// File I/O happens before the index is touched; when two threads race
    /// the same new title, one handle wins and both get it.
    pub fn get_or_create(&self, title: &str) -> Result<TaskRef> {
        let key = TaskKey::parse(title)?;
        if let Some(task) = self.index.get(&key) {
            return Ok(task);
        }
        let task = if !self.trash.contains(&self.files.path_for(&key)) && self.files.exists(&key) {
            match self.files.load(&key) {
                Ok(loaded) => loaded,
                Err(err) => {
                    msg_warning!(Message::TaskFileUnreadable(key.to_string(), format!("{err:#}")));
                    Task::new(title)
                }
            }
        } else {
            Task::new(title)
        };
        let queue = task.dirty;
        let candidate = TaskRef::new(task);
        let winner = self.index.insert(key.clone(), candidate.clone());
        if queue && winner.same(&candidate) {
            self.pending_save.insert(key);
        }
        Ok(winner)
    }

    /// Point lookup that never creates. `Ok(None)` for a valid but unknown
    /// title.
    pub fn find(&self, title: &str) -> Result<Option<TaskRef>> {
        let key = TaskKey::parse(title)?;
        Ok(self.index.get(&key))
    }

    /// Applies a patch to the record addressed by `title`, creating it when
    /// absent, and returns the updated record.
    ///
    /// A rename is applied before the field changes. Re-running the exact
    /// same call changes nothing: when the addressed title is gone but the
    /// rename target exists, the patch is redirected to the target instead
    /// of materializing a blank under the old name.
    pub fn update(&self, title: &str, patch: &TaskPatch) -> Result<TaskRef> {
        let task = match &patch.rename {
            Some(new_title) => self.resolve_rename(title, new_title)?,
            None => self.get_or_create(title)?,
        };
        if let Some(description) = &patch.description {
            self.set_description(&task, description);
        }
        if let Some(urgent) = patch.urgent {
            self.set_urgent(&task, urgent);
        }
        if let Some(important) = patch.important {
            self.set_important(&task, important);
        }
        if let Some(tags) = &patch.tags {
            self.replace_tags(&task, tags)?;
        }
        Ok(task)
    }

    /// Renames a record. No-op when the display title is unchanged. A
    /// same-key rename (casing only) keeps the file; otherwise the old
    /// path joins the trash and the main map entry is rekeyed. Buckets are
    /// untouched either way since they key by handle identity. An active
    /// pointer naming this record follows it to the new title.
    pub fn rename(&self, task: &TaskRef, new_title: &str) -> Result<bool> {
        let new_key = TaskKey::parse(new_title)?;
        let mut record = task.write();
        if record.title == new_title {
            return Ok(false);
        }
        let old_key = record.key();
        record.title = new_title.to_string();
        record.dirty = true;
        if old_key == new_key {
            drop(record);
            self.pending_save.insert(new_key);
            self.retarget_active(&old_key, new_title);
            return Ok(true);
        }
        // Rekey under the record lock; racing renames of this record stay
        // serialized and cannot double-key it.
        let moved = self.index.rekey(&old_key, new_key.clone(), task);
        drop(record);
        if moved {
            self.trash.insert(self.files.path_for(&old_key));
            self.pending_save.remove(&old_key);
            self.pending_save.insert(new_key);
            self.retarget_active(&old_key, new_title);
        }
        Ok(true)
    }

    /// Replaces the description. No-op when unchanged.
    pub fn set_description(&self, task: &TaskRef, description: &str) -> bool {
        let key = {
            let mut record = task.write();
            if record.description == description {
                return false;
            }
            record.description = description.to_string();
            record.dirty = true;
            record.key()
        };
        self.pending_save.insert(key);
        true
    }

    /// Flips the urgency flag and moves the record between urgency buckets.
    /// No-op when unchanged or when the record has left the board.
    ///
    /// The bucket move runs under the record's write lock, so racing flips
    /// apply their moves in field order and the buckets settle on the final
    /// flag value.
    pub fn set_urgent(&self, task: &TaskRef, urgent: bool) -> bool {
        let mut record = task.write();
        if record.urgent == urgent {
            return false;
        }
        let key = record.key();
        if !self.is_live(&key, task) {
            return false;
        }
        record.urgent = urgent;
        record.dirty = true;
        self.index.move_urgency(task, !urgent, urgent);
        drop(record);
        self.pending_save.insert(key);
        true
    }

    /// Flips the importance flag and moves the record between importance
    /// buckets. No-op when unchanged or when the record has left the board.
    pub fn set_important(&self, task: &TaskRef, important: bool) -> bool {
        let mut record = task.write();
        if record.important == important {
            return false;
        }
        let key = record.key();
        if !self.is_live(&key, task) {
            return false;
        }
        record.important = important;
        record.dirty = true;
        self.index.move_importance(task, !important, important);
        drop(record);
        self.pending_save.insert(key);
        true
    }

    /// Adds a normalized tag. `Ok(true)` on actual membership change.
    pub fn add_tag(&self, task: &TaskRef, raw: &str) -> Result<bool> {
        let tag = normalize_tag(raw)?;
        let mut record = task.write();
        if record.tags.contains(&tag) {
            return Ok(false);
        }
        let key = record.key();
        if !self.is_live(&key, task) {
            return Ok(false);
        }
        record.tags.insert(tag.clone());
        record.dirty = true;
        self.index.add_tag(task, &tag);
        drop(record);
        self.pending_save.insert(key);
        Ok(true)
    }

    /// Removes a normalized tag, pruning its bucket once empty. `Ok(true)`
    /// on actual membership change.
    pub fn remove_tag(&self, task: &TaskRef, raw: &str) -> Result<bool> {
        let tag = normalize_tag(raw)?;
        let mut record = task.write();
        if !record.tags.contains(&tag) {
            return Ok(false);
        }
        let key = record.key();
        if !self.is_live(&key, task) {
            return Ok(false);
        }
        record.tags.remove(&tag);
        record.dirty = true;
        self.index.remove_tag(task, &tag);
        drop(record);
        self.pending_save.insert(key);
        Ok(true)
    }

    /// Removes the record for `title` from the index and every queue and
    /// schedules its file for physical deletion at the next flush. The
    /// record is materialized first, so deleting an unknown title settles
    /// into a quiet no-op on disk. Clears the active pointer when it named
    /// this record.
    pub fn delete(&self, title: &str) -> Result<()> {
        let task = self.get_or_create(title)?;
        let key = task.read().key();
        self.index.remove(&key);
        self.pending_save.remove(&key);
        self.trash.insert(self.files.path_for(&key));
        if let Some(active) = self.active.get() {
            if TaskKey::parse(&active).ok().as_ref() == Some(&key) {
                if let Err(err) = self.active.clear() {
                    msg_warning!(Message::ActiveClearFailed(format!("{err:#}")));
                }
            }
        }
        Ok(())
    }

    /// Persists queued records and purges the trash.
    ///
    /// Trash first: each path is removed from disk, leaving the set on
    /// success or when already absent, staying queued on failure. Then
    /// every pending record is written out and marked clean; a key whose
    /// record vanished in the meantime is dropped silently. Failures are
    /// logged and counted, never fatal to the rest of the pass.
    pub fn flush(&self) -> FlushReport {
        let mut report = FlushReport::default();
        let doomed: Vec<PathBuf> = self.trash.iter().map(|entry| entry.key().clone()).collect();
        for path in doomed {
            match files::remove_file(&path) {
                Ok(removed) => {
                    self.trash.remove(&path);
                    if removed {
                        report.removed += 1;
                    }
                }
                Err(err) => {
                    report.failed += 1;
                    msg_warning!(Message::TrashRemoveFailed(format!("{err:#}")));
                }
            }
        }
        let queued: Vec<TaskKey> = self.pending_save.iter().map(|entry| entry.key().clone()).collect();
        for key in queued {
            let Some(task) = self.index.get(&key) else {
                self.pending_save.remove(&key);
                continue;
            };
            self.pending_save.remove(&key);
            let snapshot = task.read().clone();
            match self.files.save(&snapshot) {
                Ok(()) => {
                    task.write().dirty = false;
                    report.saved += 1;
                }
                Err(err) => {
                    self.pending_save.insert(key.clone());
                    report.failed += 1;
                    msg_warning!(Message::TaskSaveFailed(key.to_string(), format!("{err:#}")));
                }
            }
        }
        report
    }

    /// Full-scan snapshot of all records, sorted by identity key.
    pub fn snapshot(&self) -> Vec<TaskView> {
        let mut views: Vec<(TaskKey, TaskView)> = self
            .index
            .all()
            .into_iter()
            .map(|task| {
                let record = task.read();
                (record.key(), TaskView::from(&*record))
            })
            .collect();
        views.sort_by(|a, b| a.0.cmp(&b.0));
        views.into_iter().map(|(_, view)| view).collect()
    }

    pub fn tasks(&self) -> Vec<TaskRef> {
        self.index.all()
    }

    pub fn by_urgency(&self, urgent: bool) -> Vec<TaskRef> {
        self.index.by_urgency(urgent)
    }

    pub fn by_importance(&self, important: bool) -> Vec<TaskRef> {
        self.index.by_importance(important)
    }

    pub fn by_tag(&self, tag: &str) -> Vec<TaskRef> {
        self.index.by_tag(tag)
    }

    /// True while a bucket for this tag exists.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.index.contains_tag(tag)
    }

    pub fn tags(&self) -> Vec<String> {
        self.index.tags()
    }

    /// Keys currently queued for saving.
    pub fn pending(&self) -> Vec<TaskKey> {
        self.pending_save.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn is_pending(&self, key: &TaskKey) -> bool {
        self.pending_save.contains(key)
    }

    /// Paths currently scheduled for physical removal.
    pub fn trash_len(&self) -> usize {
        self.trash.len()
    }

    /// Current active title, if any.
    pub fn active(&self) -> Option<String> {
        self.active.get()
    }

    /// Points the active marker at an existing record and persists it.
    /// Unknown titles are rejected, never created; the marker can only name
    /// a record that exists.
    pub fn set_active(&self, title: &str) -> Result<String> {
        let key = TaskKey::parse(title)?;
        let task = match self.index.get(&key) {
            Some(task) => task,
            None => msg_bail_anyhow!(Message::TaskNotFound(title.to_string())),
        };
        let stored = task.read().title.clone();
        self.active.set(&stored)?;
        Ok(stored)
    }

    pub fn clear_active(&self) -> Result<()> {
        self.active.clear()
    }

    /// Rewrites the active pointer to `new_title` when it named the record
    /// just renamed, so the pointer follows the record instead of sticking
    /// to an abandoned title a later create could claim.
    fn retarget_active(&self, old_key: &TaskKey, new_title: &str) {
        if let Some(active) = self.active.get() {
            if TaskKey::parse(&active).ok().as_ref() == Some(old_key) {
                if let Err(err) = self.active.set(new_title) {
                    msg_warning!(Message::ActiveRetargetFailed(format!("{err:#}")));
                }
            }
        }
    }

    /// True while the main map still maps `key` to this exact handle.
    ///
    /// Every setter that moves buckets checks this under the record's write
    /// lock before touching anything. Delete's unbucketing reads fields
    /// under the same lock, so a setter either sees the record gone and
    /// backs off, or finishes its move before the delete sweeps the record
    /// out of the buckets it just landed in. Either way a deleted record is
    /// never refiled.
    fn is_live(&self, key: &TaskKey, task: &TaskRef) -> bool {
        self.index.get(key).is_some_and(|current| current.same(task))
    }

    fn resolve_rename(&self, title: &str, new_title: &str) -> Result<TaskRef> {
        let key = TaskKey::parse(title)?;
        let new_key = TaskKey::parse(new_title)?;
        if key != new_key {
            if let (None, Some(existing)) = (self.index.get(&key), self.index.get(&new_key)) {
                // rename already applied by an earlier identical call
                return Ok(existing);
            }
        }
        let task = self.get_or_create(title)?;
        self.rename(&task, new_title)?;
        Ok(task)
    }

    /// Replaces the whole tag set, validating every tag before touching any.
    fn replace_tags(&self, task: &TaskRef, raw_tags: &[String]) -> Result<bool> {
        let mut next = BTreeSet::new();
        for raw in raw_tags {
            next.insert(normalize_tag(raw)?);
        }
        let current: Vec<String> = task.read().tags.iter().cloned().collect();
        let mut changed = false;
        for tag in &current {
            if !next.contains(tag) {
                changed |= self.remove_tag(task, tag)?;
            }
        }
        for tag in next {
            changed |= self.add_tag(task, &tag)?;
        }
        Ok(changed)
    }
}
