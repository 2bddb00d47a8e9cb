// SPDX-License-Identifier: MIT OR Apache-2.0
//! Time to pixel mapping for the timeline view.
//!
//! A single linear scale, parameterized by zoom, is shared by forward
//! (layout) and inverse (pointer delta) conversion so a gesture that moves
//! the pointer by N pixels moves the element by exactly the time those N
//! pixels represent.

/// Horizontal pixels representing one second at zoom 1.0
pub const PIXELS_PER_SECOND: f64 = 50.0;

/// Minimum rendered element width in pixels, so near-zero-duration
/// elements stay visible and grabbable
pub const ELEMENT_MIN_WIDTH: f64 = 20.0;

/// Lowest allowed zoom factor
pub const MIN_ZOOM: f64 = 0.1;

/// Highest allowed zoom factor
pub const MAX_ZOOM: f64 = 10.0;

/// Convert a timeline time in seconds to a horizontal pixel offset
pub fn time_to_pixels(time: f64, zoom: f64) -> f64 {
    time * PIXELS_PER_SECOND * zoom
}

/// Convert a horizontal pixel offset back to seconds. Exact inverse of
/// [`time_to_pixels`] for the same zoom.
pub fn pixels_to_time(pixels: f64, zoom: f64) -> f64 {
    pixels / (PIXELS_PER_SECOND * zoom)
}

/// Rendered width in pixels for an effective duration, floored to
/// [`ELEMENT_MIN_WIDTH`]
pub fn duration_to_width(effective_duration: f64, zoom: f64) -> f64 {
    time_to_pixels(effective_duration, zoom).max(ELEMENT_MIN_WIDTH)
}

/// Clamp a zoom factor to the supported range
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}
