// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playhead position, fed by the external playback subsystem.

use crate::element::TimelineElement;

/// The current playback position on the timeline.
///
/// Playback itself lives outside the core; whatever drives it calls
/// [`Playhead::seek`] and the core reads the position back, chiefly to
/// gate split operations. The checks here are advisory for UI affordances;
/// the mutation engine re-validates split points independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct Playhead {
    time: f64,
}

impl Playhead {
    /// Create a playhead at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current playback time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Move to a new time, clamped to be non-negative
    pub fn seek(&mut self, time: f64) {
        self.time = time.max(0.0);
    }

    /// Whether the playhead lies strictly inside the element's effective
    /// span. Strict on both bounds: an element cannot be split exactly at
    /// its own edge.
    pub fn is_within_element(&self, element: &TimelineElement) -> bool {
        self.time > element.effective_start() && self.time < element.effective_end()
    }
}
