//! Rectangle geometry shared by every stage

pub mod cups;
pub mod rect;

pub use cups::CupSet;
pub use rect::{Point, Rect};
