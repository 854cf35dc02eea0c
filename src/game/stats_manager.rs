use chrono::Utc;
use uuid::Uuid;

use crate::model::{Difficulty, RoundOutcome, RoundRecord, RoundResult, SessionStats};

const HISTORY_LIMIT: usize = 20;

/// Process-lifetime tally of graded rounds. Nothing is written to disk.
#[derive(Debug, Default)]
pub struct StatsManager {
    stats: SessionStats,
}

impl StatsManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_round(
        &mut self,
        round_id: Uuid,
        difficulty: Difficulty,
        result: &RoundResult,
        score: i32,
    ) {
        let stats = &mut self.stats;
        stats.rounds_played += 1;
        match result.outcome {
            RoundOutcome::Win => stats.wins += 1,
            RoundOutcome::Loss => stats.losses += 1,
            RoundOutcome::GameOver => {
                stats.losses += 1;
                stats.game_overs += 1;
            }
        }
        stats.best_score = stats.best_score.max(score);

        stats.history.insert(
            0,
            RoundRecord {
                round_id,
                difficulty,
                outcome: result.outcome,
                player_length: result.player_length,
                optimal_length: result.optimal_length,
                completed_at: Utc::now(),
            },
        );
        stats.history.truncate(HISTORY_LIMIT);
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.stats)
    }
}
