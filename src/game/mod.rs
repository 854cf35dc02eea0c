pub mod bot_reveal;
pub mod session;
pub mod settings;
pub mod stats_manager;
pub mod timer_queue;

pub use session::{Session, LENGTH_EPSILON};
pub use settings::Settings;
