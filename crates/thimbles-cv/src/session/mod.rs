//! The per-frame game loop

pub mod config;
pub mod game_session;
pub mod report;

pub use config::{BallSelectionConfig, CupLayoutConfig, SessionConfig};
pub use game_session::GameSession;
pub use report::{FrameReport, SessionStatus};
