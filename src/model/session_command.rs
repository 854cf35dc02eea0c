use std::time::Duration;

use super::{CitySet, Difficulty};

/// Answer to the prompt shown after a non-fatal loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayChoice {
    /// Clear the player's tour and try the same cities again.
    ReplaySameCities,
    /// Generate a fresh city set.
    NewRound,
}

#[derive(Debug, Clone)]
pub enum SessionCommand {
    StartRound {
        difficulty: Option<Difficulty>,
        seed: Option<u64>,
    },
    LoadRound(CitySet),
    SelectCity(usize), // city index, not label
    RevealOptimal,
    Decide(ReplayChoice),
    ChangeDifficulty(Difficulty),
    ResetGame,
    AdvanceTime(Duration),
}
