// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable bookkeeping of running workers
//!
//! Records live as one JSON file per slot so that separate invocations of
//! the supervisor agree on which workers exist.

mod lock;
mod records;

pub use lock::SlotLock;
pub use records::{RecordStore, StoreError};
