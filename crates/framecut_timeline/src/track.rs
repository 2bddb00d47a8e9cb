// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track definitions for the timeline.

use crate::element::{ElementId, ElementKind, TimelineElement};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    /// Create a new random track ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackType {
    /// Video/image media elements
    Media,
    /// Text overlays and captions
    Text,
    /// Audio elements
    Audio,
}

impl TrackType {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Media => "Media",
            Self::Text => "Text",
            Self::Audio => "Audio",
        }
    }

    /// Whether elements on this track must not overlap in time.
    /// Text tracks allow stacked captions; media and audio are exclusive.
    pub fn is_exclusive(&self) -> bool {
        match self {
            Self::Media | Self::Audio => true,
            Self::Text => false,
        }
    }

    /// Whether an element of the given kind may live on this track
    pub fn accepts(&self, kind: &ElementKind) -> bool {
        match self {
            Self::Media | Self::Audio => matches!(kind, ElementKind::Media { .. }),
            Self::Text => matches!(kind, ElementKind::Text { .. }),
        }
    }
}

/// A track on the timeline.
///
/// Elements are kept in insertion order; consumers must not assume the
/// storage order matches time order and should sort by effective start
/// when presenting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique track ID
    pub id: TrackId,
    /// Track name
    pub name: String,
    /// Track type
    pub track_type: TrackType,
    /// Elements on this track
    pub(crate) elements: Vec<TimelineElement>,
    /// Whether the track is muted
    pub muted: bool,
}

impl Track {
    /// Create a new track
    pub fn new(name: impl Into<String>, track_type: TrackType) -> Self {
        Self {
            id: TrackId::new(),
            name: name.into(),
            track_type,
            elements: Vec::new(),
            muted: false,
        }
    }

    /// Get all elements
    pub fn elements(&self) -> &[TimelineElement] {
        &self.elements
    }

    /// Get an element by ID
    pub fn element(&self, element_id: ElementId) -> Option<&TimelineElement> {
        self.elements.iter().find(|e| e.id == element_id)
    }

    pub(crate) fn element_mut(&mut self, element_id: ElementId) -> Option<&mut TimelineElement> {
        self.elements.iter_mut().find(|e| e.id == element_id)
    }

    /// Get element count
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Time at which the last element on this track ends
    pub fn end_time(&self) -> f64 {
        self.elements
            .iter()
            .map(TimelineElement::effective_end)
            .fold(0.0, f64::max)
    }

    /// Whether `candidate` would collide with an element already on this
    /// track. Only meaningful for exclusive track types; `exclude` skips
    /// the element being edited so it does not collide with itself.
    pub fn would_overlap(&self, candidate: &TimelineElement, exclude: Option<ElementId>) -> bool {
        if !self.track_type.is_exclusive() {
            return false;
        }
        self.elements
            .iter()
            .filter(|e| Some(e.id) != exclude)
            .any(|e| e.overlaps(candidate))
    }

    /// Elements sorted by effective start, for presentation
    pub fn elements_in_time_order(&self) -> Vec<&TimelineElement> {
        let mut sorted: Vec<_> = self.elements.iter().collect();
        sorted.sort_by(|a, b| {
            a.effective_start()
                .partial_cmp(&b.effective_start())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framecut_media::MediaId;

    #[test]
    fn test_accepts_by_kind() {
        let media = ElementKind::Media {
            media_id: MediaId::new(),
        };
        let text = ElementKind::Text {
            content: "hi".into(),
        };
        assert!(TrackType::Media.accepts(&media));
        assert!(TrackType::Audio.accepts(&media));
        assert!(!TrackType::Text.accepts(&media));
        assert!(TrackType::Text.accepts(&text));
        assert!(!TrackType::Media.accepts(&text));
        assert!(!TrackType::Audio.accepts(&text));
    }

    #[test]
    fn test_overlap_only_on_exclusive_tracks() {
        let mut media_track = Track::new("V1", TrackType::Media);
        let mut text_track = Track::new("T1", TrackType::Text);
        let base = TimelineElement::media("a", MediaId::new(), 5.0).at(0.0);
        media_track.elements.push(base.clone());

        let colliding = TimelineElement::media("b", MediaId::new(), 5.0).at(2.0);
        assert!(media_track.would_overlap(&colliding, None));
        // editing the element itself is not a collision
        assert!(!media_track.would_overlap(&base, Some(base.id)));

        let caption = TimelineElement::text("c", "c", 5.0).at(0.0);
        text_track.elements.push(caption.clone());
        assert!(!text_track.would_overlap(&caption, None));
    }

    #[test]
    fn test_time_order_does_not_depend_on_storage_order() {
        let mut track = Track::new("T1", TrackType::Text);
        let late = TimelineElement::text("late", "l", 2.0).at(10.0);
        let early = TimelineElement::text("early", "e", 2.0).at(1.0);
        track.elements.push(late.clone());
        track.elements.push(early.clone());

        let ordered = track.elements_in_time_order();
        assert_eq!(ordered[0].id, early.id);
        assert_eq!(ordered[1].id, late.id);
        // storage still holds insertion order
        assert_eq!(track.elements()[0].id, late.id);
    }

    #[test]
    fn test_end_time() {
        let mut track = Track::new("T1", TrackType::Text);
        assert_eq!(track.end_time(), 0.0);
        track
            .elements
            .push(TimelineElement::text("a", "a", 4.0).at(3.0));
        assert_eq!(track.end_time(), 7.0);
    }
}
