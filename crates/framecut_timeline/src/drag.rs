// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer-driven move and resize gestures.
//!
//! A gesture runs Idle → Armed (pointer down) → Active (first pointer
//! move) → Committed or Discarded (pointer up / pointer leave) → Idle.
//! While active, the session holds a live proposal computed from the pixel
//! delta through the inverse geometry mapping, clamped so it always shows
//! a legal value. The authoritative model is untouched until commit, so a
//! discard is just dropping the session.
//!
//! One session at a time; a pointer down while a session exists is ignored.

use crate::element::{ElementId, ElementKind, MIN_ELEMENT_DURATION};
use crate::geometry::{clamp_zoom, pixels_to_time};
use crate::timeline::Timeline;
use crate::track::TrackId;

/// Which element edge a resize gesture grabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    /// The element's head: moves `start_time` and `trim_start` together so
    /// the right edge stays fixed
    Left,
    /// The element's tail: trims or extends the visible end
    Right,
}

/// What a gesture does to its element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Reposition the element on the track
    Move,
    /// Resize from one edge
    Resize(ResizeEdge),
}

/// Live, uncommitted geometry for the dragged element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Proposal {
    /// New timeline position (move gesture)
    Move {
        /// Proposed `start_time`
        start_time: f64,
    },
    /// New trim window, possibly with the element shifted to keep the
    /// opposite edge fixed (resize gesture on trimmable content)
    Trim {
        /// Proposed `start_time`
        start_time: f64,
        /// Proposed `trim_start`
        trim_start: f64,
        /// Proposed `trim_end`
        trim_end: f64,
    },
    /// New underlying duration (right-edge resize on text, whose content
    /// has no fixed source length)
    Duration {
        /// Proposed `duration`
        duration: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Armed,
    Active,
}

/// Element geometry captured at pointer down, for clamping and revert
#[derive(Debug, Clone, Copy)]
struct Origin {
    start_time: f64,
    duration: f64,
    trim_start: f64,
    trim_end: f64,
}

impl Origin {
    fn effective_duration(&self) -> f64 {
        self.duration - self.trim_start - self.trim_end
    }
}

/// One in-progress gesture
#[derive(Debug, Clone)]
pub struct DragSession {
    track_id: TrackId,
    element_id: ElementId,
    kind: DragKind,
    zoom: f64,
    anchor_x: f64,
    origin: Origin,
    content_fixed: bool,
    phase: Phase,
    proposal: Option<Proposal>,
}

impl DragSession {
    /// Target element of this gesture
    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    /// Track holding the target element
    pub fn track_id(&self) -> TrackId {
        self.track_id
    }

    /// What the gesture does
    pub fn kind(&self) -> DragKind {
        self.kind
    }

    /// Live proposal, present once the pointer has moved
    pub fn proposal(&self) -> Option<Proposal> {
        self.proposal
    }
}

/// Owner of the single drag session, separate from the durable model.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    /// Create a controller with no active session
    pub fn new() -> Self {
        Self::default()
    }

    /// The in-progress session, if any
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether a gesture for this element has started moving
    pub fn is_dragging(&self, element_id: ElementId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.element_id == element_id && s.phase == Phase::Active)
    }

    /// Live `start_time` for rendering the dragged element, falling back
    /// to `None` when the element is not mid-gesture
    pub fn live_start_time(&self, element_id: ElementId) -> Option<f64> {
        let session = self.session.as_ref()?;
        if session.element_id != element_id || session.phase != Phase::Active {
            return None;
        }
        match session.proposal? {
            Proposal::Move { start_time } | Proposal::Trim { start_time, .. } => Some(start_time),
            Proposal::Duration { .. } => None,
        }
    }

    /// Pointer down over an element body (move) or an edge handle
    /// (resize). Resizing requires the element to be selected. Returns
    /// whether a session was armed; a down while another session exists
    /// is ignored.
    pub fn pointer_down(
        &mut self,
        timeline: &Timeline,
        track_id: TrackId,
        element_id: ElementId,
        kind: DragKind,
        x: f64,
        zoom: f64,
        element_selected: bool,
    ) -> bool {
        if self.session.is_some() {
            return false;
        }
        if matches!(kind, DragKind::Resize(_)) && !element_selected {
            return false;
        }
        let Some(element) = timeline.track(track_id).and_then(|t| t.element(element_id)) else {
            return false;
        };
        self.session = Some(DragSession {
            track_id,
            element_id,
            kind,
            zoom: clamp_zoom(zoom),
            anchor_x: x,
            origin: Origin {
                start_time: element.start_time,
                duration: element.duration,
                trim_start: element.trim_start,
                trim_end: element.trim_end,
            },
            content_fixed: matches!(element.kind, ElementKind::Media { .. }),
            phase: Phase::Armed,
            proposal: None,
        });
        true
    }

    /// Pointer moved while a session exists: recompute the live proposal
    pub fn pointer_move(&mut self, x: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let delta = pixels_to_time(x - session.anchor_x, session.zoom);
        session.proposal = Some(propose(session, delta));
        session.phase = Phase::Active;
    }

    /// Pointer up: commit an active proposal through the mutation engine.
    /// Returns whether the model changed. On engine rejection the gesture
    /// reverts silently with no partial apply.
    pub fn pointer_up(&mut self, timeline: &mut Timeline) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        if session.phase != Phase::Active {
            return false; // a click, not a drag
        }
        let Some(proposal) = session.proposal else {
            return false;
        };
        let committed = commit(timeline, &session, proposal);
        if !committed {
            tracing::debug!(element = ?session.element_id, "drag commit rejected, reverting");
        }
        committed
    }

    /// Pointer left the interactive surface: discard the session, model
    /// untouched
    pub fn pointer_leave(&mut self) {
        self.session = None;
    }
}

/// Compute the clamped live geometry for a pointer delta in seconds
fn propose(session: &DragSession, delta: f64) -> Proposal {
    let origin = &session.origin;
    match session.kind {
        DragKind::Move => Proposal::Move {
            start_time: (origin.start_time + delta).max(0.0),
        },
        DragKind::Resize(ResizeEdge::Right) => {
            if session.content_fixed {
                // shrink grows trim_end, extend eats it, never below zero:
                // media cannot outgrow its source. An element already below
                // the resize floor gets a degenerate clamp range, not a panic.
                let max_trim = (origin.duration - origin.trim_start - MIN_ELEMENT_DURATION).max(0.0);
                let trim_end = (origin.trim_end - delta).clamp(0.0, max_trim);
                Proposal::Trim {
                    start_time: origin.start_time,
                    trim_start: origin.trim_start,
                    trim_end,
                }
            } else {
                let min_duration = origin.trim_start + origin.trim_end + MIN_ELEMENT_DURATION;
                Proposal::Duration {
                    duration: (origin.duration + delta).max(min_duration),
                }
            }
        }
        DragKind::Resize(ResizeEdge::Left) => {
            // keep the right edge fixed: start_time and trim_start move by
            // the same amount, clamped so neither goes negative and some
            // effective duration remains. The floor wins over the ceiling
            // when the element is already shorter than the resize floor.
            let min_trim = (origin.trim_start - origin.start_time).max(0.0);
            let max_trim = (origin.duration - origin.trim_end - MIN_ELEMENT_DURATION).max(min_trim);
            let trim_start = (origin.trim_start + delta).clamp(min_trim, max_trim);
            let applied = trim_start - origin.trim_start;
            Proposal::Trim {
                start_time: origin.start_time + applied,
                trim_start,
                trim_end: origin.trim_end,
            }
        }
    }
}

/// Apply a committed proposal through the mutation engine, atomically
fn commit(timeline: &mut Timeline, session: &DragSession, proposal: Proposal) -> bool {
    let track_id = session.track_id;
    let element_id = session.element_id;
    match proposal {
        Proposal::Move { start_time } => timeline
            .update_element_start_time(track_id, element_id, start_time)
            .is_ok(),
        Proposal::Duration { duration } => timeline
            .update_element_duration(track_id, element_id, duration)
            .is_ok(),
        Proposal::Trim {
            start_time,
            trim_start,
            trim_end,
        } => {
            if timeline
                .update_element_trim(track_id, element_id, trim_start, trim_end)
                .is_err()
            {
                return false;
            }
            if start_time == session.origin.start_time {
                return true;
            }
            if timeline
                .update_element_start_time(track_id, element_id, start_time)
                .is_err()
            {
                // roll the trim back so no partial apply is visible
                let _ = timeline.update_element_trim(
                    track_id,
                    element_id,
                    session.origin.trim_start,
                    session.origin.trim_end,
                );
                return false;
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TimelineElement;
    use crate::geometry::time_to_pixels;
    use crate::track::TrackType;
    use framecut_media::MediaId;

    const EPS: f64 = 1e-9;

    fn px(t: f64) -> f64 {
        time_to_pixels(t, 1.0)
    }

    fn media_setup(start: f64, duration: f64) -> (Timeline, TrackId, ElementId) {
        let mut timeline = Timeline::new();
        let track_id = timeline.add_track(TrackType::Media);
        let element = TimelineElement::media("clip", MediaId::new(), duration).at(start);
        let element_id = timeline.add_element_to_track(track_id, element).unwrap();
        (timeline, track_id, element_id)
    }

    fn text_setup(start: f64, duration: f64) -> (Timeline, TrackId, ElementId) {
        let mut timeline = Timeline::new();
        let track_id = timeline.add_track(TrackType::Text);
        let element = TimelineElement::text("caption", "hi", duration).at(start);
        let element_id = timeline.add_element_to_track(track_id, element).unwrap();
        (timeline, track_id, element_id)
    }

    #[test]
    fn test_move_gesture_commits() {
        let (mut timeline, track_id, element_id) = media_setup(2.0, 10.0);
        let mut drag = DragController::new();

        assert!(drag.pointer_down(
            &timeline, track_id, element_id, DragKind::Move, px(2.0), 1.0, false
        ));
        drag.pointer_move(px(5.0));
        assert!(drag.is_dragging(element_id));
        assert!((drag.live_start_time(element_id).unwrap() - 5.0).abs() < EPS);

        assert!(drag.pointer_up(&mut timeline));
        let element = timeline.track(track_id).unwrap().element(element_id).unwrap();
        assert!((element.start_time - 5.0).abs() < EPS);
        assert!(drag.session().is_none());
    }

    #[test]
    fn test_move_clamps_at_timeline_start() {
        let (mut timeline, track_id, element_id) = media_setup(2.0, 10.0);
        let mut drag = DragController::new();
        drag.pointer_down(&timeline, track_id, element_id, DragKind::Move, px(2.0), 1.0, false);
        drag.pointer_move(px(-8.0));
        // live feedback already shows the boundary value, not a negative one
        assert_eq!(drag.live_start_time(element_id), Some(0.0));
        assert!(drag.pointer_up(&mut timeline));
        let element = timeline.track(track_id).unwrap().element(element_id).unwrap();
        assert_eq!(element.start_time, 0.0);
    }

    #[test]
    fn test_discard_leaves_model_unchanged() {
        let (mut timeline, track_id, element_id) = media_setup(2.0, 10.0);
        let before = timeline.clone();
        let mut drag = DragController::new();

        drag.pointer_down(&timeline, track_id, element_id, DragKind::Move, px(2.0), 1.0, false);
        drag.pointer_move(px(7.0));
        drag.pointer_leave();

        assert!(drag.session().is_none());
        assert_eq!(
            timeline.track(track_id).unwrap().element(element_id),
            before.track(track_id).unwrap().element(element_id)
        );
    }

    #[test]
    fn test_click_without_move_commits_nothing() {
        let (mut timeline, track_id, element_id) = media_setup(2.0, 10.0);
        let mut drag = DragController::new();
        drag.pointer_down(&timeline, track_id, element_id, DragKind::Move, px(2.0), 1.0, false);
        assert!(!drag.pointer_up(&mut timeline));
        let element = timeline.track(track_id).unwrap().element(element_id).unwrap();
        assert_eq!(element.start_time, 2.0);
    }

    #[test]
    fn test_right_edge_shrinks_media_by_trimming() {
        let (mut timeline, track_id, element_id) = media_setup(0.0, 10.0);
        let mut drag = DragController::new();
        drag.pointer_down(
            &timeline,
            track_id,
            element_id,
            DragKind::Resize(ResizeEdge::Right),
            px(10.0),
            1.0,
            true,
        );
        drag.pointer_move(px(6.0));
        assert!(drag.pointer_up(&mut timeline));

        let element = timeline.track(track_id).unwrap().element(element_id).unwrap();
        assert!((element.trim_end - 4.0).abs() < EPS);
        assert_eq!(element.duration, 10.0);
        assert!((element.effective_duration() - 6.0).abs() < EPS);
    }

    #[test]
    fn test_media_cannot_extend_past_source() {
        let (mut timeline, track_id, element_id) = media_setup(0.0, 10.0);
        timeline
            .update_element_trim(track_id, element_id, 0.0, 3.0)
            .unwrap();
        let mut drag = DragController::new();
        drag.pointer_down(
            &timeline,
            track_id,
            element_id,
            DragKind::Resize(ResizeEdge::Right),
            px(7.0),
            1.0,
            true,
        );
        // try to pull the tail 8 seconds out; only the 3 trimmed seconds exist
        drag.pointer_move(px(15.0));
        assert!(drag.pointer_up(&mut timeline));

        let element = timeline.track(track_id).unwrap().element(element_id).unwrap();
        assert_eq!(element.trim_end, 0.0);
        assert!((element.effective_duration() - 10.0).abs() < EPS);
    }

    #[test]
    fn test_media_shrink_clamps_at_min_duration() {
        let (mut timeline, track_id, element_id) = media_setup(0.0, 10.0);
        let mut drag = DragController::new();
        drag.pointer_down(
            &timeline,
            track_id,
            element_id,
            DragKind::Resize(ResizeEdge::Right),
            px(10.0),
            1.0,
            true,
        );
        drag.pointer_move(px(-5.0));
        assert!(drag.pointer_up(&mut timeline));

        let element = timeline.track(track_id).unwrap().element(element_id).unwrap();
        assert!((element.effective_duration() - MIN_ELEMENT_DURATION).abs() < EPS);
        assert!(element.is_valid());
    }

    #[test]
    fn test_text_right_edge_grows_duration() {
        let (mut timeline, track_id, element_id) = text_setup(0.0, 5.0);
        let mut drag = DragController::new();
        drag.pointer_down(
            &timeline,
            track_id,
            element_id,
            DragKind::Resize(ResizeEdge::Right),
            px(5.0),
            1.0,
            true,
        );
        drag.pointer_move(px(9.0));
        assert!(drag.pointer_up(&mut timeline));

        let element = timeline.track(track_id).unwrap().element(element_id).unwrap();
        assert!((element.duration - 9.0).abs() < EPS);
        assert_eq!(element.trim_end, 0.0);
    }

    #[test]
    fn test_right_edge_resize_on_sub_floor_element_stays_valid() {
        // trims can legally leave less than the resize floor; resizing such
        // an element must still produce a lawful proposal
        let mut timeline = Timeline::new();
        let track_id = timeline.add_track(TrackType::Media);
        let element = TimelineElement::media("clip", MediaId::new(), 10.0).with_trim(9.95, 0.0);
        let element_id = timeline.add_element_to_track(track_id, element).unwrap();

        let mut drag = DragController::new();
        drag.pointer_down(
            &timeline,
            track_id,
            element_id,
            DragKind::Resize(ResizeEdge::Right),
            px(0.05),
            1.0,
            true,
        );
        drag.pointer_move(px(-3.0));
        drag.pointer_up(&mut timeline);

        let element = timeline.track(track_id).unwrap().element(element_id).unwrap();
        assert!(element.is_valid());
        assert!(element.effective_duration() > 0.0);
    }

    #[test]
    fn test_left_edge_resize_on_sub_floor_element_stays_valid() {
        let mut timeline = Timeline::new();
        let track_id = timeline.add_track(TrackType::Media);
        let element = TimelineElement::media("clip", MediaId::new(), 10.0)
            .at(2.0)
            .with_trim(0.0, 9.95);
        let element_id = timeline.add_element_to_track(track_id, element).unwrap();

        let mut drag = DragController::new();
        drag.pointer_down(
            &timeline,
            track_id,
            element_id,
            DragKind::Resize(ResizeEdge::Left),
            px(2.0),
            1.0,
            true,
        );
        drag.pointer_move(px(5.0));
        drag.pointer_up(&mut timeline);

        let element = timeline.track(track_id).unwrap().element(element_id).unwrap();
        assert!(element.is_valid());
        assert!(element.effective_duration() > 0.0);
        assert!(element.start_time >= 0.0);
    }

    #[test]
    fn test_left_edge_keeps_right_edge_fixed() {
        let (mut timeline, track_id, element_id) = media_setup(2.0, 10.0);
        let end_before = timeline
            .track(track_id)
            .unwrap()
            .element(element_id)
            .unwrap()
            .effective_end();

        let mut drag = DragController::new();
        drag.pointer_down(
            &timeline,
            track_id,
            element_id,
            DragKind::Resize(ResizeEdge::Left),
            px(2.0),
            1.0,
            true,
        );
        drag.pointer_move(px(5.0));
        assert!(drag.pointer_up(&mut timeline));

        let element = timeline.track(track_id).unwrap().element(element_id).unwrap();
        assert!((element.start_time - 5.0).abs() < EPS);
        assert!((element.trim_start - 3.0).abs() < EPS);
        assert!((element.effective_end() - end_before).abs() < EPS);
    }

    #[test]
    fn test_left_edge_clamps_at_timeline_start() {
        let mut timeline = Timeline::new();
        let track_id = timeline.add_track(TrackType::Media);
        let element = TimelineElement::media("clip", MediaId::new(), 10.0)
            .at(1.0)
            .with_trim(2.0, 0.0);
        let element_id = timeline.add_element_to_track(track_id, element).unwrap();

        let mut drag = DragController::new();
        drag.pointer_down(
            &timeline,
            track_id,
            element_id,
            DragKind::Resize(ResizeEdge::Left),
            px(1.0),
            1.0,
            true,
        );
        // dragging left past the timeline origin: trim_start can only give
        // back as much as start_time has room for
        drag.pointer_move(px(-5.0));
        assert!(drag.pointer_up(&mut timeline));

        let element = timeline.track(track_id).unwrap().element(element_id).unwrap();
        assert_eq!(element.start_time, 0.0);
        assert!((element.trim_start - 1.0).abs() < EPS);
    }

    #[test]
    fn test_resize_requires_selection() {
        let (timeline, track_id, element_id) = media_setup(0.0, 10.0);
        let mut drag = DragController::new();
        assert!(!drag.pointer_down(
            &timeline,
            track_id,
            element_id,
            DragKind::Resize(ResizeEdge::Right),
            px(10.0),
            1.0,
            false,
        ));
        // moving never requires selection
        assert!(drag.pointer_down(
            &timeline, track_id, element_id, DragKind::Move, px(0.0), 1.0, false
        ));
    }

    #[test]
    fn test_single_session_at_a_time() {
        let (timeline, track_id, element_id) = media_setup(0.0, 10.0);
        let mut drag = DragController::new();
        assert!(drag.pointer_down(
            &timeline, track_id, element_id, DragKind::Move, px(0.0), 1.0, false
        ));
        drag.pointer_move(px(1.0));
        assert!(!drag.pointer_down(
            &timeline, track_id, element_id, DragKind::Move, px(3.0), 1.0, false
        ));
        // the original session is still the live one
        assert!((drag.live_start_time(element_id).unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_rejected_commit_reverts_silently() {
        let (mut timeline, track_id, element_id) = media_setup(0.0, 5.0);
        let blocker = TimelineElement::media("blocker", MediaId::new(), 5.0).at(8.0);
        timeline.add_element_to_track(track_id, blocker).unwrap();
        let before = timeline.clone();

        let mut drag = DragController::new();
        drag.pointer_down(&timeline, track_id, element_id, DragKind::Move, px(0.0), 1.0, false);
        drag.pointer_move(px(9.0)); // lands on the blocker's span
        assert!(!drag.pointer_up(&mut timeline));

        assert_eq!(
            timeline.track(track_id).unwrap().element(element_id),
            before.track(track_id).unwrap().element(element_id)
        );
    }

    #[test]
    fn test_pointer_down_on_missing_element_is_ignored() {
        let (timeline, track_id, _) = media_setup(0.0, 5.0);
        let mut drag = DragController::new();
        assert!(!drag.pointer_down(
            &timeline,
            track_id,
            ElementId::new(),
            DragKind::Move,
            px(0.0),
            1.0,
            false,
        ));
    }
}
