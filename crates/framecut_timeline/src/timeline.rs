// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline store and mutation engine.
//!
//! [`Timeline`] is the single authoritative store of tracks and elements.
//! All writes go through its methods; each operation either fully commits
//! or fully fails with the model unchanged. Expected user-triggered
//! precondition failures (splitting outside an element, separating audio
//! from a non-video) return `None`; invariant violations return a typed
//! [`TimelineError`]; deleting something that is already gone is a no-op.

use crate::element::{ElementId, TimelineElement};
use crate::track::{Track, TrackId, TrackType};
use framecut_media::{MediaCatalog, MediaType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Error produced by a rejected mutation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimelineError {
    /// Track not found
    #[error("Track not found: {0:?}")]
    TrackNotFound(TrackId),

    /// Element not found on the given track
    #[error("Element not found: {0:?}")]
    ElementNotFound(ElementId),

    /// Trim values would leave no effective duration or are negative
    #[error("Invalid trim: trims must be >= 0 and leave a positive duration")]
    InvalidTrim,

    /// Duration change would violate the element invariants
    #[error("Invalid duration: duration must exceed the combined trims")]
    InvalidDuration,

    /// Start time would be negative or non-finite
    #[error("Invalid start time: must be finite and >= 0")]
    InvalidStartTime,

    /// Element kind is not allowed on the target track
    #[error("Element kind not allowed on this track")]
    IncompatibleElement,

    /// Element would overlap another element on an exclusive track
    #[error("Element would overlap another element on this track")]
    WouldOverlap,
}

/// The timeline: an ordered set of tracks holding elements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    tracks: IndexMap<TrackId, Track>,
}

impl Timeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    // --- track management ---

    /// Add a new track of the given type, returning its ID
    pub fn add_track(&mut self, track_type: TrackType) -> TrackId {
        let count = self
            .tracks
            .values()
            .filter(|t| t.track_type == track_type)
            .count();
        let track = Track::new(
            format!("{} {}", track_type.name(), count + 1),
            track_type,
        );
        let id = track.id;
        tracing::debug!(track = %track.name, "added track");
        self.tracks.insert(id, track);
        id
    }

    /// Remove a track and everything on it
    pub fn remove_track(&mut self, track_id: TrackId) -> Option<Track> {
        self.tracks.shift_remove(&track_id)
    }

    /// Get a track
    pub fn track(&self, track_id: TrackId) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    /// Iterate over all tracks
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Get track count
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Time at which the last element on any track ends
    pub fn total_duration(&self) -> f64 {
        self.tracks.values().map(Track::end_time).fold(0.0, f64::max)
    }

    /// Locate an element anywhere on the timeline
    pub fn find_element(&self, element_id: ElementId) -> Option<(TrackId, &TimelineElement)> {
        self.tracks
            .values()
            .find_map(|t| t.element(element_id).map(|e| (t.id, e)))
    }

    // --- element mutations ---

    /// Add an element to a track. The element must satisfy the model
    /// invariants, match the track type, and not collide on exclusive
    /// tracks.
    pub fn add_element_to_track(
        &mut self,
        track_id: TrackId,
        element: TimelineElement,
    ) -> Result<ElementId, TimelineError> {
        let track = self
            .tracks
            .get(&track_id)
            .ok_or(TimelineError::TrackNotFound(track_id))?;
        if !element.is_valid() {
            return Err(if !element.start_time.is_finite() || element.start_time < 0.0 {
                TimelineError::InvalidStartTime
            } else if !element.duration.is_finite() || element.duration <= 0.0 {
                TimelineError::InvalidDuration
            } else {
                TimelineError::InvalidTrim
            });
        }
        if !track.track_type.accepts(&element.kind) {
            tracing::warn!(track = %track.name, "rejected element of incompatible kind");
            return Err(TimelineError::IncompatibleElement);
        }
        if track.would_overlap(&element, None) {
            return Err(TimelineError::WouldOverlap);
        }
        let id = element.id;
        tracing::debug!(element = %element.name, start = element.start_time, "added element");
        self.track_mut(track_id)?.elements.push(element);
        Ok(id)
    }

    /// Set new trim values. Fails with [`TimelineError::InvalidTrim`] if
    /// the trims are negative or leave no effective duration. Does not
    /// move `start_time`.
    pub fn update_element_trim(
        &mut self,
        track_id: TrackId,
        element_id: ElementId,
        trim_start: f64,
        trim_end: f64,
    ) -> Result<(), TimelineError> {
        let element = self.element_mut(track_id, element_id)?;
        if !trim_start.is_finite()
            || !trim_end.is_finite()
            || trim_start < 0.0
            || trim_end < 0.0
            || trim_start + trim_end >= element.duration
        {
            tracing::warn!(?element_id, trim_start, trim_end, "rejected trim update");
            return Err(TimelineError::InvalidTrim);
        }
        element.trim_start = trim_start;
        element.trim_end = trim_end;
        Ok(())
    }

    /// Set a new underlying duration, keeping the trim window. Used by
    /// right-edge resize on elements whose content length is not fixed
    /// (text). Fails with [`TimelineError::InvalidDuration`] if the
    /// combined trims would consume the whole duration.
    pub fn update_element_duration(
        &mut self,
        track_id: TrackId,
        element_id: ElementId,
        duration: f64,
    ) -> Result<(), TimelineError> {
        let element = self.element_mut(track_id, element_id)?;
        if !duration.is_finite()
            || duration <= 0.0
            || element.trim_start + element.trim_end >= duration
        {
            tracing::warn!(?element_id, duration, "rejected duration update");
            return Err(TimelineError::InvalidDuration);
        }
        element.duration = duration;
        Ok(())
    }

    /// Move an element to a new timeline position. The commit target of a
    /// completed move gesture. Rejects negative starts and collisions on
    /// exclusive tracks.
    pub fn update_element_start_time(
        &mut self,
        track_id: TrackId,
        element_id: ElementId,
        start_time: f64,
    ) -> Result<(), TimelineError> {
        if !start_time.is_finite() || start_time < 0.0 {
            return Err(TimelineError::InvalidStartTime);
        }
        let track = self
            .tracks
            .get(&track_id)
            .ok_or(TimelineError::TrackNotFound(track_id))?;
        let mut moved = track
            .element(element_id)
            .ok_or(TimelineError::ElementNotFound(element_id))?
            .clone();
        moved.start_time = start_time;
        if track.would_overlap(&moved, Some(element_id)) {
            tracing::warn!(?element_id, start_time, "rejected move, would overlap");
            return Err(TimelineError::WouldOverlap);
        }
        let element = self.element_mut(track_id, element_id)?;
        element.start_time = start_time;
        Ok(())
    }

    /// Move an element from one track to another. Atomic: on any failure
    /// the element stays on the source track untouched.
    pub fn move_element_to_track(
        &mut self,
        from_track_id: TrackId,
        to_track_id: TrackId,
        element_id: ElementId,
    ) -> Result<(), TimelineError> {
        if !self.tracks.contains_key(&to_track_id) {
            return Err(TimelineError::TrackNotFound(to_track_id));
        }
        let element = self
            .track(from_track_id)
            .ok_or(TimelineError::TrackNotFound(from_track_id))?
            .element(element_id)
            .ok_or(TimelineError::ElementNotFound(element_id))?
            .clone();

        let target = &self.tracks[&to_track_id];
        if !target.track_type.accepts(&element.kind) {
            return Err(TimelineError::IncompatibleElement);
        }
        if target.would_overlap(&element, None) {
            return Err(TimelineError::WouldOverlap);
        }

        self.track_mut(from_track_id)?
            .elements
            .retain(|e| e.id != element_id);
        self.track_mut(to_track_id)?.elements.push(element);
        tracing::debug!(?element_id, "moved element between tracks");
        Ok(())
    }

    /// Delete an element. Removing an ID that does not exist (or a track
    /// that does not exist) is a no-op, not a fault.
    pub fn remove_element_from_track(&mut self, track_id: TrackId, element_id: ElementId) {
        if let Some(track) = self.tracks.get_mut(&track_id) {
            let before = track.elements.len();
            track.elements.retain(|e| e.id != element_id);
            if track.elements.len() < before {
                tracing::debug!(?element_id, "removed element");
            }
        }
    }

    // --- split family ---

    /// Split an element at a timeline time strictly inside its effective
    /// span. The left piece keeps the original ID and start; the right
    /// piece is a new element whose trim window starts where the split
    /// falls in the underlying content. Both pieces reference the same
    /// content; nothing is duplicated or re-encoded.
    ///
    /// Returns the new (right) element's ID, or `None` when the split
    /// point lies outside the element, with no mutation.
    pub fn split_element(
        &mut self,
        track_id: TrackId,
        element_id: ElementId,
        at_time: f64,
    ) -> Option<ElementId> {
        let element = self.tracks.get(&track_id)?.element(element_id)?;
        let offset = split_offset(element, at_time)?;
        let effective = element.effective_duration();
        let base_name = element.name.clone();

        let mut right = element.clone();
        right.id = ElementId::new();
        right.name = format!("{base_name} (right)");
        right.start_time = at_time;
        right.trim_start = element.trim_start + offset;
        let right_id = right.id;

        let track = self.tracks.get_mut(&track_id)?;
        let left = track.element_mut(element_id)?;
        left.name = format!("{base_name} (left)");
        left.trim_end += effective - offset;
        track.elements.push(right);

        tracing::debug!(?element_id, at_time, "split element");
        Some(right_id)
    }

    /// Split and keep only the piece before the split point. Same
    /// precondition as [`Timeline::split_element`]; returns `false` with
    /// no mutation when the split point is outside the element.
    pub fn split_and_keep_left(
        &mut self,
        track_id: TrackId,
        element_id: ElementId,
        at_time: f64,
    ) -> bool {
        let Some(element) = self
            .tracks
            .get_mut(&track_id)
            .and_then(|t| t.element_mut(element_id))
        else {
            return false;
        };
        let Some(offset) = split_offset(element, at_time) else {
            return false;
        };
        // left piece keeps id, start and trim_start; the tail is trimmed away
        element.trim_end += element.effective_duration() - offset;
        tracing::debug!(?element_id, at_time, "split element, kept left");
        true
    }

    /// Split and keep only the piece after the split point. The surviving
    /// element keeps the ORIGINAL id so selection state and other external
    /// references stay valid; its trim window advances to the split point.
    /// Returns `false` with no mutation when the split point is outside
    /// the element.
    pub fn split_and_keep_right(
        &mut self,
        track_id: TrackId,
        element_id: ElementId,
        at_time: f64,
    ) -> bool {
        let Some(element) = self
            .tracks
            .get_mut(&track_id)
            .and_then(|t| t.element_mut(element_id))
        else {
            return false;
        };
        let Some(offset) = split_offset(element, at_time) else {
            return false;
        };
        element.start_time = at_time;
        element.trim_start += offset;
        tracing::debug!(?element_id, at_time, "split element, kept right");
        true
    }

    // --- audio separation ---

    /// Create an audio element in sync with a video element.
    ///
    /// Valid only for a media element on a media track whose catalog item
    /// resolves to a video. The new element copies the source's timing
    /// exactly and references the same media; extracting the audio stream
    /// is the media pipeline's concern. It lands on the first audio track
    /// with room at that span, or on a freshly created audio track.
    ///
    /// Returns the new element's ID, or `None` with no mutation when the
    /// element is not eligible.
    pub fn separate_audio(
        &mut self,
        track_id: TrackId,
        element_id: ElementId,
        catalog: &MediaCatalog,
    ) -> Option<ElementId> {
        let track = self.tracks.get(&track_id)?;
        if track.track_type != TrackType::Media {
            return None;
        }
        let element = track.element(element_id)?;
        let media_id = element.media_id()?;
        match catalog.find(media_id) {
            Some(item) if item.media_type == MediaType::Video => {}
            _ => {
                tracing::warn!(?element_id, "audio separation needs a resolvable video");
                return None;
            }
        }

        let mut audio = element.clone();
        audio.id = ElementId::new();
        audio.name = format!("{} (audio)", element.name);
        let audio_id = audio.id;

        let existing = self
            .tracks
            .values()
            .find(|t| t.track_type == TrackType::Audio && !t.would_overlap(&audio, None))
            .map(|t| t.id);
        let target = match existing {
            Some(id) => id,
            None => self.add_track(TrackType::Audio),
        };

        self.tracks.get_mut(&target)?.elements.push(audio);
        tracing::debug!(?element_id, "separated audio");
        Some(audio_id)
    }

    // --- internals ---

    fn track_mut(&mut self, track_id: TrackId) -> Result<&mut Track, TimelineError> {
        self.tracks
            .get_mut(&track_id)
            .ok_or(TimelineError::TrackNotFound(track_id))
    }

    fn element_mut(
        &mut self,
        track_id: TrackId,
        element_id: ElementId,
    ) -> Result<&mut TimelineElement, TimelineError> {
        self.track_mut(track_id)?
            .element_mut(element_id)
            .ok_or(TimelineError::ElementNotFound(element_id))
    }
}

/// Offset of `at_time` into the element's visible content, or `None` when
/// the split point is not strictly inside the effective span.
fn split_offset(element: &TimelineElement, at_time: f64) -> Option<f64> {
    if at_time > element.effective_start() && at_time < element.effective_end() {
        Some(at_time - element.start_time)
    } else {
        None
    }
}
