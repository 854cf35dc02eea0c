use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Difficulty, RoundOutcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_id: Uuid,
    pub difficulty: Difficulty,
    pub outcome: RoundOutcome,
    pub player_length: Option<f64>,
    pub optimal_length: f64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub game_overs: u32,
    pub best_score: i32,
    /// Most recent rounds first.
    pub history: Vec<RoundRecord>,
}
