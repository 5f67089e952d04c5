// SPDX-FileCopyrightText: 2026 Auricle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory-pressure state machine.
//!
//! Evaluated on each timer tick: samples managed memory through the
//! injected [`MemorySampler`] and decides whether the emergency cleanup
//! must run. Detection and action happen in the same tick -- the
//! controller does not wait for a second, worse reading after crossing
//! the threshold. If the host exposes no sampler, the controller degrades
//! to a permanent no-op (logged once) rather than failing.

use auricle_core::MemorySampler;
use tracing::{debug, info, warn};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// States of the pressure machine.
///
/// Transitions happen only in response to sampled usage, never by user
/// action. `Pressure` is the transient detect state; the emergency
/// cleanup runs in the same tick and lands the machine in `Emergency`
/// until a below-threshold sample returns it to `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureState {
    Normal,
    Pressure,
    Emergency,
}

impl std::fmt::Display for PressureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PressureState::Normal => write!(f, "normal"),
            PressureState::Pressure => write!(f, "pressure"),
            PressureState::Emergency => write!(f, "emergency"),
        }
    }
}

/// Samples memory and drives the pressure state machine.
pub struct PressureController {
    sampler: Box<dyn MemorySampler>,
    state: PressureState,
    warn_bytes: u64,
    warn_ratio: f64,
    unavailable_logged: bool,
}

impl PressureController {
    pub fn new(sampler: Box<dyn MemorySampler>, warn_mb: u64, warn_ratio: f64) -> Self {
        Self {
            sampler,
            state: PressureState::Normal,
            warn_bytes: warn_mb * BYTES_PER_MB,
            warn_ratio,
            unavailable_logged: false,
        }
    }

    pub fn state(&self) -> PressureState {
        self.state
    }

    /// Takes one sample and returns whether emergency cleanup must run now.
    ///
    /// The caller is expected to apply the cleanup immediately (same
    /// serialized turn) and then call [`cleanup_applied`].
    ///
    /// [`cleanup_applied`]: Self::cleanup_applied
    pub fn poll(&mut self) -> bool {
        let Some(reading) = self.sampler.sample() else {
            if !self.unavailable_logged {
                warn!("memory sampling unavailable, pressure controller is a no-op");
                self.unavailable_logged = true;
            }
            return false;
        };

        let ratio = reading.ratio();
        let over = reading.used_bytes > self.warn_bytes || ratio > self.warn_ratio;

        debug!(
            used_mb = reading.used_bytes / BYTES_PER_MB,
            ratio = ratio,
            state = %self.state,
            "memory sample"
        );

        if over {
            self.state = PressureState::Pressure;
            warn!(
                used_mb = reading.used_bytes / BYTES_PER_MB,
                warn_mb = self.warn_bytes / BYTES_PER_MB,
                ratio = ratio,
                "memory pressure detected, triggering emergency cleanup"
            );
            true
        } else {
            if self.state != PressureState::Normal {
                info!(previous = %self.state, "memory back below thresholds");
            }
            self.state = PressureState::Normal;
            false
        }
    }

    /// Records that the emergency cleanup has been applied.
    pub fn cleanup_applied(&mut self) {
        self.state = PressureState::Emergency;
    }
}
