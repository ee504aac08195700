// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-slot exclusive locks

use fs2::FileExt;
use herd_core::WorkerId;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Exclusive hold on one worker slot, across processes
///
/// Backed by `flock` on `worker-<id>.lock`; released on drop. The lock file
/// itself is never deleted, so every process locks the same inode.
#[derive(Debug)]
pub struct SlotLock {
    id: WorkerId,
    file: File,
}

impl SlotLock {
    /// Block until the slot lock at `path` is held
    pub(crate) fn acquire(id: WorkerId, path: &Path) -> io::Result<Self> {
        let file = open_lock_file(path)?;
        file.lock_exclusive()?;
        Ok(Self { id, file })
    }

    /// The slot this lock guards
    pub fn id(&self) -> WorkerId {
        self.id
    }
}

impl Drop for SlotLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn open_lock_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
}
