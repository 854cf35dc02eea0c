use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::{CitySet, Difficulty, SessionState, Tour};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    Win,
    Loss,
    /// A loss that would have taken the score below zero.
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// `None` when the graded tour did not visit every city.
    pub player_length: Option<f64>,
    pub optimal_length: f64,
    pub optimal_tour: Tour,
    pub outcome: RoundOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    RoundStarted {
        cities: Rc<CitySet>,
        difficulty: Difficulty,
        seed: Option<u64>,
    },
    RoundReplayed {
        cities: Rc<CitySet>,
    },
    DistancesReset,
    EdgeAdded {
        from: usize,
        to: usize,
    },
    OptimalLengthRevealed(f64),
    RevealEdge {
        from: usize,
        to: usize,
    },
    RevealCompleted,
    RoundCompleted(RoundResult),
    DecisionRequested,
    ScoreChanged(i32),
    StateChanged(SessionState),
}
