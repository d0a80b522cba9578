//! Ball candidate selection

use super::BlobCandidate;
use crate::session::config::BallSelectionConfig;
use thimbles_core::Rect;

/// Largest roughly round blob within the area limits.
///
/// UI buttons share the ball's color but are wide, and cups-sized blobs are
/// never the ball, so both are excluded before picking the largest.
pub fn select_ball(
    candidates: &[BlobCandidate],
    max_area: Option<f64>,
    config: &BallSelectionConfig,
) -> Option<Rect> {
    let (min_aspect, max_aspect) = config.aspect_range;

    candidates
        .iter()
        .filter(|c| c.area >= config.min_area)
        .filter(|c| max_area.is_none_or(|max| c.area <= max))
        .filter(|c| {
            c.rect
                .aspect_ratio()
                .is_some_and(|ratio| (min_aspect..=max_aspect).contains(&ratio))
        })
        .fold(None, |best: Option<&BlobCandidate>, c| match best {
            Some(b) if b.area >= c.area => Some(b),
            _ => Some(c),
        })
        .map(|c| c.rect)
}

/// Area ceiling for ball blobs derived from the mean cup area
pub fn max_ball_area(mean_cup_area: Option<f64>, config: &BallSelectionConfig) -> Option<f64> {
    mean_cup_area
        .filter(|area| *area > 0.0)
        .map(|area| area * config.max_area_factor)
}
