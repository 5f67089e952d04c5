// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Auricle integration tests.
//!
//! Provides a scripted memory sampler and event payload builders for
//! fast, deterministic, CI-runnable tests without a real engine or heap
//! introspection.
//!
//! # Components
//!
//! - [`MockSampler`] - Memory sampler with pre-configured readings
//! - [`events`] - JSON payload builders matching the engine wire shapes

pub mod events;
pub mod mock_sampler;

pub use mock_sampler::MockSampler;
