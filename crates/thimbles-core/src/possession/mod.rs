//! Possession state machine

pub mod events;
pub mod state;

pub use events::PossessionEvent;
pub use state::PossessionState;
