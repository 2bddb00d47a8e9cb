// SPDX-License-Identifier: MIT OR Apache-2.0
//! User-facing failure channel.
//!
//! Every rejected operation produces a short message for the UI to surface
//! as a toast. The sink itself is external; the core only pushes strings
//! into it and never treats a rejection as a fault.

use crate::timeline::TimelineError;
use std::cell::RefCell;

/// Receiver for user-facing operation-failure messages
pub trait NotificationSink {
    /// Deliver one message to the user
    fn notify(&self, message: &str);
}

/// Sink that forwards messages to the tracing subscriber at warn level.
/// Useful default when no toast surface is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Sink that buffers messages in memory, for tests and headless use
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: RefCell<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages delivered so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// Message shown when a split is attempted with the playhead outside the
/// target element
pub const MSG_PLAYHEAD_OUTSIDE: &str = "Playhead must be within element to split";

/// Message shown when a split fails inside the mutation engine
pub const MSG_SPLIT_FAILED: &str = "Failed to split element";

/// Message shown when audio separation is attempted on a non-media element
pub const MSG_SEPARATE_NOT_MEDIA: &str = "Audio separation only available for media elements";

/// Message shown when audio separation is attempted on media that is not a
/// resolvable video
pub const MSG_SEPARATE_NOT_VIDEO: &str = "Audio separation only available for video elements";

/// Message shown when audio separation fails inside the mutation engine
pub const MSG_SEPARATE_FAILED: &str = "Failed to separate audio";

/// User-facing message for a rejected mutation
pub fn failure_message(error: &TimelineError) -> &'static str {
    match error {
        TimelineError::TrackNotFound(_) => "Track no longer exists",
        TimelineError::ElementNotFound(_) => "Element no longer exists",
        TimelineError::InvalidTrim => "Trim would leave nothing of the element",
        TimelineError::InvalidDuration => "Duration is too short for the current trims",
        TimelineError::InvalidStartTime => "Elements cannot start before the timeline",
        TimelineError::IncompatibleElement => "This element cannot go on that track",
        TimelineError::WouldOverlap => "Elements on this track cannot overlap",
    }
}
