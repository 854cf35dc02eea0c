mod city_set;
mod difficulty;
mod point;
mod session_command;
mod session_event;
mod session_state;
mod session_stats;
mod tour;
mod tour_error;

pub use city_set::CitySet;
pub use difficulty::Difficulty;
pub use point::{distance, Bounds, Point};
pub use session_command::{ReplayChoice, SessionCommand};
pub use session_event::{RoundOutcome, RoundResult, SessionEvent};
pub use session_state::SessionState;
pub use session_stats::{RoundRecord, SessionStats};
pub(crate) use tour::closed_length;
pub use tour::{tour_length, Tour};
pub use tour_error::TourError;
