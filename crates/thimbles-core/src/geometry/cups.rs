//! Ordered cup positions for a single frame

use super::rect::Rect;
use serde::{Deserialize, Serialize};

/// Cup rectangles indexed by tracker slot.
///
/// Slot `i` is whatever the cup tracker last reported at position `i`; a slot is
/// `None` when the tracker lost that cup this frame. Slots never shift.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CupSet {
    cups: Vec<Option<Rect>>,
}

impl CupSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from tracker slots
    pub fn from_slots(cups: Vec<Option<Rect>>) -> Self {
        Self { cups }
    }

    /// Create from rectangles that are all present
    pub fn from_rects(rects: &[Rect]) -> Self {
        Self {
            cups: rects.iter().copied().map(Some).collect(),
        }
    }

    /// Number of slots, present or not
    pub fn len(&self) -> usize {
        self.cups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cups.is_empty()
    }

    /// Rectangle at `index`, `None` when out of range or lost
    pub fn get(&self, index: usize) -> Option<Rect> {
        self.cups.get(index).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<Rect>] {
        &self.cups
    }

    /// Present rectangles with their slot index, in ascending slot order
    pub fn present(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.cups
            .iter()
            .enumerate()
            .filter_map(|(i, cup)| cup.map(|rect| (i, rect)))
    }

    /// Number of slots currently holding a rectangle
    pub fn present_count(&self) -> usize {
        self.cups.iter().filter(|cup| cup.is_some()).count()
    }

    /// Vertical extent `(top of highest, bottom of lowest)` over present cups
    pub fn vertical_span(&self) -> Option<(i32, i32)> {
        self.present().fold(None, |span, (_, rect)| match span {
            None => Some((rect.y, rect.bottom())),
            Some((min_y, max_y)) => Some((min_y.min(rect.y), max_y.max(rect.bottom()))),
        })
    }

    /// Mean area of the present cups, `None` when no cup is present
    pub fn mean_area(&self) -> Option<f64> {
        let count = self.present_count();
        if count == 0 {
            return None;
        }
        let total: f64 = self.present().map(|(_, rect)| rect.area()).sum();
        Some(total / count as f64)
    }
}

impl FromIterator<Option<Rect>> for CupSet {
    fn from_iter<T: IntoIterator<Item = Option<Rect>>>(iter: T) -> Self {
        Self::from_slots(iter.into_iter().collect())
    }
}
