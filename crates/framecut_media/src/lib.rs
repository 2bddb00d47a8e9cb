// SPDX-License-Identifier: MIT OR Apache-2.0
//! Media catalog for Framecut.
//!
//! The catalog owns imported media items (videos, images, audio files) and
//! hands out [`MediaId`] keys. Timeline elements hold those keys as weak
//! references: a key that no longer resolves is a normal, degraded-rendering
//! state for the holder, never an error. Nothing outside this crate mutates
//! catalog entries.

pub mod catalog;
pub mod item;

pub use catalog::MediaCatalog;
pub use item::{MediaId, MediaItem, MediaType};
