use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// No round has been started yet.
    #[default]
    Idle,
    /// Accepting city selections.
    Playing,
    /// Grading a submitted tour against the optimum.
    Evaluating,
    /// Animating the optimal tour; grades the player's tour when finished.
    BotRevealing,
    /// A loss left the score non-negative; waiting for a [`ReplayChoice`](super::ReplayChoice).
    AwaitingDecision,
}
