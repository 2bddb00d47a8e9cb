// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playhead-gated user actions.
//!
//! These wrap the mutation engine for the menu/toolbar layer: they check
//! the playhead gate first, invoke the engine, and push a message into the
//! notification sink on every rejection so the user always gets feedback.
//! The engine re-validates independently; a stale gate never corrupts the
//! model.

use crate::element::{ElementId, ElementKind};
use crate::notify::{
    NotificationSink, MSG_PLAYHEAD_OUTSIDE, MSG_SEPARATE_FAILED, MSG_SEPARATE_NOT_MEDIA,
    MSG_SEPARATE_NOT_VIDEO, MSG_SPLIT_FAILED,
};
use crate::playhead::Playhead;
use crate::timeline::Timeline;
use crate::track::TrackId;
use framecut_media::{MediaCatalog, MediaType};

/// Whether the split actions should be enabled for this element right now.
/// Purely advisory, for menu affordance.
pub fn can_split_at_playhead(
    timeline: &Timeline,
    track_id: TrackId,
    element_id: ElementId,
    playhead: &Playhead,
) -> bool {
    timeline
        .track(track_id)
        .and_then(|t| t.element(element_id))
        .is_some_and(|e| playhead.is_within_element(e))
}

/// Whether audio separation should be enabled for this element right now.
/// Purely advisory, for menu affordance.
pub fn can_separate_audio(
    timeline: &Timeline,
    track_id: TrackId,
    element_id: ElementId,
    catalog: &MediaCatalog,
) -> bool {
    let Some(track) = timeline.track(track_id) else {
        return false;
    };
    let Some(element) = track.element(element_id) else {
        return false;
    };
    element
        .media_id()
        .and_then(|id| catalog.find(id))
        .is_some_and(|item| item.media_type == MediaType::Video)
        && track.track_type == crate::track::TrackType::Media
}

/// Split an element at the playhead, reporting failures to the sink
pub fn split_at_playhead(
    timeline: &mut Timeline,
    track_id: TrackId,
    element_id: ElementId,
    playhead: &Playhead,
    sink: &impl NotificationSink,
) -> Option<ElementId> {
    if !can_split_at_playhead(timeline, track_id, element_id, playhead) {
        sink.notify(MSG_PLAYHEAD_OUTSIDE);
        return None;
    }
    let result = timeline.split_element(track_id, element_id, playhead.time());
    if result.is_none() {
        sink.notify(MSG_SPLIT_FAILED);
    }
    result
}

/// Split at the playhead keeping the left piece, reporting failures
pub fn split_and_keep_left_at_playhead(
    timeline: &mut Timeline,
    track_id: TrackId,
    element_id: ElementId,
    playhead: &Playhead,
    sink: &impl NotificationSink,
) -> bool {
    if !can_split_at_playhead(timeline, track_id, element_id, playhead) {
        sink.notify(MSG_PLAYHEAD_OUTSIDE);
        return false;
    }
    let kept = timeline.split_and_keep_left(track_id, element_id, playhead.time());
    if !kept {
        sink.notify(MSG_SPLIT_FAILED);
    }
    kept
}

/// Split at the playhead keeping the right piece, reporting failures
pub fn split_and_keep_right_at_playhead(
    timeline: &mut Timeline,
    track_id: TrackId,
    element_id: ElementId,
    playhead: &Playhead,
    sink: &impl NotificationSink,
) -> bool {
    if !can_split_at_playhead(timeline, track_id, element_id, playhead) {
        sink.notify(MSG_PLAYHEAD_OUTSIDE);
        return false;
    }
    let kept = timeline.split_and_keep_right(track_id, element_id, playhead.time());
    if !kept {
        sink.notify(MSG_SPLIT_FAILED);
    }
    kept
}

/// Separate a video element's audio onto an audio track, reporting
/// failures with a message naming the actual problem
pub fn separate_audio(
    timeline: &mut Timeline,
    track_id: TrackId,
    element_id: ElementId,
    catalog: &MediaCatalog,
    sink: &impl NotificationSink,
) -> Option<ElementId> {
    let element = timeline
        .track(track_id)
        .and_then(|t| t.element(element_id));
    match element.map(|e| &e.kind) {
        None => {
            sink.notify(MSG_SEPARATE_FAILED);
            return None;
        }
        Some(ElementKind::Text { .. }) => {
            sink.notify(MSG_SEPARATE_NOT_MEDIA);
            return None;
        }
        Some(ElementKind::Media { media_id }) => {
            let is_video = catalog
                .find(*media_id)
                .is_some_and(|item| item.media_type == MediaType::Video);
            if !is_video {
                sink.notify(MSG_SEPARATE_NOT_VIDEO);
                return None;
            }
        }
    }
    let result = timeline.separate_audio(track_id, element_id, catalog);
    if result.is_none() {
        sink.notify(MSG_SEPARATE_FAILED);
    }
    result
}
