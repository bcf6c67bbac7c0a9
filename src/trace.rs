//! Observation hooks for the decode pipeline.
//!
//! The decoder announces a few well-defined events (cmap segment match,
//! ghost-point synthesis, contour close) through this trait instead of
//! printing from the middle of its loops, so callers can attach whatever
//! sink they want without the core knowing about it.

/// All methods default to no-ops; implement only what you care about.
pub trait DecodeTrace {
    fn segment_match(&mut self, _code: u16, _segment: usize, _start: u16, _end: u16) {}
    fn ghost_point(&mut self, _index: usize, _x: i16, _y: i16) {}
    fn contour_close(&mut self, _contour: usize, _end_index: usize) {}
}

/// Discards every event.
pub struct NoTrace;

impl DecodeTrace for NoTrace {}

/// Forwards every event to `log::trace!`.
pub struct LogTrace;

impl DecodeTrace for LogTrace {
    fn segment_match(&mut self, code: u16, segment: usize, start: u16, end: u16) {
        trace!(
            "cmap segment {} ({:#06x}..={:#06x}) matched {:#06x}",
            segment,
            start,
            end,
            code
        );
    }

    fn ghost_point(&mut self, index: usize, x: i16, y: i16) {
        trace!("ghost point inserted at index {}: ({}, {})", index, x, y);
    }

    fn contour_close(&mut self, contour: usize, end_index: usize) {
        trace!("contour {} closed at adjusted index {}", contour, end_index);
    }
}
