//! Initial cup layout from candidates inside the operator's region

use super::BlobCandidate;
use crate::session::config::CupLayoutConfig;
use thimbles_core::Rect;

/// Pick the initial cups, ordered left to right.
///
/// Small and overlapping candidates are dropped and the largest survivors kept.
/// When too few survive the region is split into equal columns instead, since a
/// partial detection is less trustworthy than the even split.
pub fn locate_cups(roi: Rect, candidates: &[BlobCandidate], config: &CupLayoutConfig) -> Vec<Rect> {
    let wanted = config.expected_cups;
    if wanted == 0 {
        return Vec::new();
    }

    let min_area = roi.area() * config.min_area_fraction;

    let mut kept: Vec<Rect> = Vec::new();
    for candidate in candidates.iter().filter(|c| c.area > min_area) {
        let overlaps = kept
            .iter()
            .any(|existing| candidate.rect.center_distance(existing) < existing.width as f64);
        if !overlaps {
            kept.push(candidate.rect);
        }
    }

    kept.sort_by(|a, b| b.area().total_cmp(&a.area()));
    kept.truncate(wanted);

    if kept.len() < wanted {
        log::warn!(
            "only {} of {} cups found by contour, splitting the region evenly",
            kept.len(),
            wanted
        );
        kept = split_columns(roi, wanted);
    }

    kept.sort_by_key(|rect| rect.x);
    kept
}

fn split_columns(roi: Rect, count: usize) -> Vec<Rect> {
    let column_width = roi.width / count as i32;
    (0..count as i32)
        .map(|i| Rect::new(roi.x + i * column_width, roi.y, column_width, roi.height))
        .collect()
}
