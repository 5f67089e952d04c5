// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits implemented by host-specific adapters.

pub mod memory;

pub use memory::{MemorySampler, NoopSampler};
