// SPDX-License-Identifier: MIT OR Apache-2.0
//! Media item definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a media item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaId(pub Uuid);

impl MediaId {
    /// Create a new random media ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MediaId {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of media asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    /// Still image
    Image,
    /// Video (may carry an audio stream)
    Video,
    /// Audio-only asset
    Audio,
}

impl MediaType {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Audio => "Audio",
        }
    }
}

/// An imported media asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    /// Unique media ID
    pub id: MediaId,
    /// Display name (usually the source file name)
    pub name: String,
    /// Asset kind
    pub media_type: MediaType,
    /// Source URL or path
    pub url: String,
    /// Preview thumbnail URL, if one has been generated
    pub thumbnail_url: Option<String>,
    /// Intrinsic duration in seconds; `None` for still images
    pub duration: Option<f64>,
}

impl MediaItem {
    /// Create a new media item
    pub fn new(name: impl Into<String>, media_type: MediaType, url: impl Into<String>) -> Self {
        Self {
            id: MediaId::new(),
            name: name.into(),
            media_type,
            url: url.into(),
            thumbnail_url: None,
            duration: None,
        }
    }

    /// Set the intrinsic duration
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set the thumbnail URL
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// Whether this item carries an audio stream
    pub fn has_audio(&self) -> bool {
        matches!(self.media_type, MediaType::Video | MediaType::Audio)
    }
}
