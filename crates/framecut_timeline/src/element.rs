// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline element definitions.

use framecut_media::MediaId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest effective duration an element may be trimmed or resized down to,
/// in seconds. Keeps elements clickable and the trim invariant strict.
pub const MIN_ELEMENT_DURATION: f64 = 0.1;

/// Unique identifier for a timeline element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub Uuid);

impl ElementId {
    /// Create a new random element ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

/// Variant-specific payload of a timeline element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    /// References an item in the media catalog. The reference is weak:
    /// a key that no longer resolves renders as a fallback, it is never
    /// repaired or dropped by timeline operations.
    Media {
        /// Catalog key of the referenced media item
        media_id: MediaId,
    },
    /// Inline text rendered on the timeline
    Text {
        /// Text content
        content: String,
    },
}

/// An element placed on a timeline track.
///
/// `duration` is the full untrimmed length of the underlying content;
/// `trim_start`/`trim_end` carve the window of it that is actually shown.
/// The portion on the timeline is the effective span
/// `[start_time, start_time + effective_duration)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineElement {
    /// Unique element ID, stable for the element's lifetime
    pub id: ElementId,
    /// Display label
    pub name: String,
    /// Position on the track timeline, in seconds
    pub start_time: f64,
    /// Full untrimmed content length, in seconds
    pub duration: f64,
    /// Seconds trimmed off the head of the content
    pub trim_start: f64,
    /// Seconds trimmed off the tail of the content
    pub trim_end: f64,
    /// Variant payload
    pub kind: ElementKind,
}

impl TimelineElement {
    /// Create a media element at timeline position 0 with no trim
    pub fn media(name: impl Into<String>, media_id: MediaId, duration: f64) -> Self {
        Self {
            id: ElementId::new(),
            name: name.into(),
            start_time: 0.0,
            duration,
            trim_start: 0.0,
            trim_end: 0.0,
            kind: ElementKind::Media { media_id },
        }
    }

    /// Create a text element at timeline position 0 with no trim
    pub fn text(name: impl Into<String>, content: impl Into<String>, duration: f64) -> Self {
        Self {
            id: ElementId::new(),
            name: name.into(),
            start_time: 0.0,
            duration,
            trim_start: 0.0,
            trim_end: 0.0,
            kind: ElementKind::Text {
                content: content.into(),
            },
        }
    }

    /// Set the timeline position
    pub fn at(mut self, start_time: f64) -> Self {
        self.start_time = start_time;
        self
    }

    /// Set the trim window
    pub fn with_trim(mut self, trim_start: f64, trim_end: f64) -> Self {
        self.trim_start = trim_start;
        self.trim_end = trim_end;
        self
    }

    /// Duration actually visible on the timeline
    pub fn effective_duration(&self) -> f64 {
        self.duration - self.trim_start - self.trim_end
    }

    /// Timeline time where the element begins
    pub fn effective_start(&self) -> f64 {
        self.start_time
    }

    /// Timeline time where the element ends
    pub fn effective_end(&self) -> f64 {
        self.start_time + self.effective_duration()
    }

    /// Check the element invariants: non-negative position and trims,
    /// strictly positive effective duration, finite fields.
    pub fn is_valid(&self) -> bool {
        self.start_time.is_finite()
            && self.duration.is_finite()
            && self.trim_start.is_finite()
            && self.trim_end.is_finite()
            && self.start_time >= 0.0
            && self.trim_start >= 0.0
            && self.trim_end >= 0.0
            && self.effective_duration() > 0.0
    }

    /// Whether this element's effective span intersects another's
    pub fn overlaps(&self, other: &TimelineElement) -> bool {
        self.effective_start() < other.effective_end()
            && other.effective_start() < self.effective_end()
    }

    /// Media catalog key, if this is a media element
    pub fn media_id(&self) -> Option<MediaId> {
        match &self.kind {
            ElementKind::Media { media_id } => Some(*media_id),
            ElementKind::Text { .. } => None,
        }
    }
}
