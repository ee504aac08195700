// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker record store

use crate::lock::SlotLock;
use chrono::{DateTime, Utc};
use herd_core::{ProcessProbe, WorkerId, WorkerRecord};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in record store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("worker {id} is already running (pid {pid})")]
    RecordConflict { id: WorkerId, pid: u32 },

    #[error("corrupt worker record {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Durable records of running workers, one JSON file per slot
///
/// Reads are lock-free. Anything that mutates a slot takes the [`SlotLock`]
/// for it, which makes register/remove of one id mutually exclusive across
/// processes.
pub struct RecordStore<P> {
    dir: PathBuf,
    probe: P,
}

impl<P: ProcessProbe> RecordStore<P> {
    /// Open (creating if needed) the record directory
    pub fn open(dir: impl Into<PathBuf>, probe: P) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(io_err(&dir))?;
        Ok(Self { dir, probe })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the record for `id` lives
    pub fn record_path(&self, id: WorkerId) -> PathBuf {
        self.dir.join(format!("{}.json", id.file_stem()))
    }

    fn lock_path(&self, id: WorkerId) -> PathBuf {
        self.dir.join(format!("{}.lock", id.file_stem()))
    }

    /// Block until the slot is exclusively held by this process
    pub fn lock(&self, id: WorkerId) -> Result<SlotLock, StoreError> {
        let path = self.lock_path(id);
        SlotLock::acquire(id, &path).map_err(io_err(&path))
    }

    /// Whether the recorded process is still running
    pub fn is_alive(&self, record: &WorkerRecord) -> bool {
        self.probe.is_alive(record.pid)
    }

    /// Read the record for `id` as stored, without a liveness check
    pub fn read(&self, id: WorkerId) -> Result<Option<WorkerRecord>, StoreError> {
        let path = self.record_path(id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(&path)(e)),
        };
        let mut record: WorkerRecord =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?;
        record.record_path = path;
        Ok(Some(record))
    }

    /// The live record for the held slot
    ///
    /// Stale and unreadable records are pruned and reported as absent.
    pub fn lookup(&self, slot: &SlotLock) -> Result<Option<WorkerRecord>, StoreError> {
        let record = match self.read(slot.id()) {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(None),
            Err(StoreError::Corrupt { path, source }) => {
                tracing::warn!(id = %slot.id(), path = %path.display(), error = %source, "pruning unreadable record");
                self.remove(slot)?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if self.is_alive(&record) {
            return Ok(Some(record));
        }

        tracing::info!(id = %record.id, pid = record.pid, "pruning stale record");
        self.remove(slot)?;
        Ok(None)
    }

    /// Persist a record for a freshly spawned worker in the held slot
    ///
    /// Fails with [`StoreError::RecordConflict`] when a live record already
    /// exists. A stale record is replaced.
    pub fn register(
        &self,
        slot: &SlotLock,
        pid: u32,
        started_at: DateTime<Utc>,
        config_location: &Path,
    ) -> Result<WorkerRecord, StoreError> {
        if let Some(existing) = self.lookup(slot)? {
            return Err(StoreError::RecordConflict {
                id: existing.id,
                pid: existing.pid,
            });
        }

        let path = self.record_path(slot.id());
        let record = WorkerRecord {
            id: slot.id(),
            pid,
            started_at,
            config_location: config_location.to_path_buf(),
            record_path: path.clone(),
        };

        let json = serde_json::to_string_pretty(&record).map_err(|source| {
            StoreError::Corrupt {
                path: path.clone(),
                source,
            }
        })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;

        tracing::debug!(id = %record.id, pid, "registered worker");
        Ok(record)
    }

    /// Delete the record for the held slot; returns whether one existed
    pub fn remove(&self, slot: &SlotLock) -> Result<bool, StoreError> {
        let path = self.record_path(slot.id());
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_err(&path)(e)),
        }
    }

    /// Every readable record, ordered by id
    ///
    /// Never mutates the store; stale records are included as-is.
    pub fn all(&self) -> Result<Vec<WorkerRecord>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(io_err(&self.dir))?;

        let mut records = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|e| e == "json") {
                continue;
            }
            let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(WorkerId::from_file_stem)
            else {
                continue;
            };

            match self.read(id) {
                Ok(Some(record)) => records.push(record),
                // Removed between listing and reading
                Ok(None) => {}
                Err(StoreError::Corrupt { path, source }) => {
                    tracing::warn!(path = %path.display(), error = %source, "skipping unreadable record");
                }
                Err(e) => return Err(e),
            }
        }

        records.sort_by_key(|r| r.id);
        Ok(records)
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
