// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline editing core for Framecut.
//!
//! This crate owns the authoritative track/element model of a project's
//! timeline and every operation that mutates it:
//! - Trim, duration and position updates
//! - Split, split-and-keep-left/right at the playhead
//! - Audio separation from video elements
//! - Pointer-driven move/resize gestures with live, uncommitted geometry
//!
//! ## Architecture
//!
//! [`Timeline`] is the single shared mutable resource; presentation layers
//! read it, only the mutation methods write it, and every operation is
//! synchronous and atomic. Gesture state lives in [`DragController`],
//! outside the durable model, so cancelling a gesture is a pure state
//! transition rather than a rollback. Time↔pixel conversion goes through
//! [`geometry`] so layout and pointer math share one scale. Rendering,
//! playback, persistence and media decoding are external collaborators.

pub mod actions;
pub mod drag;
pub mod element;
pub mod geometry;
pub mod notify;
pub mod playhead;
pub mod timeline;
pub mod track;

pub use actions::{
    can_separate_audio, can_split_at_playhead, separate_audio, split_and_keep_left_at_playhead,
    split_and_keep_right_at_playhead, split_at_playhead,
};
pub use drag::{DragController, DragKind, DragSession, Proposal, ResizeEdge};
pub use element::{ElementId, ElementKind, TimelineElement, MIN_ELEMENT_DURATION};
pub use geometry::{
    clamp_zoom, duration_to_width, pixels_to_time, time_to_pixels, ELEMENT_MIN_WIDTH, MAX_ZOOM,
    MIN_ZOOM, PIXELS_PER_SECOND,
};
pub use notify::{failure_message, MemorySink, NotificationSink, TracingSink};
pub use playhead::Playhead;
pub use timeline::{Timeline, TimelineError};
pub use track::{Track, TrackId, TrackType};
