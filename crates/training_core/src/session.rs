//! Session-scoped game progress: score, day counter, and the objective banner.

use serde::{Deserialize, Serialize};

use crate::rating::Difficulty;

pub const INITIAL_SCORE: i64 = 1000;
pub const INITIAL_OBJECTIVE: &str = "Check your email for onboarding instructions.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub game_started: bool,
    pub is_sitting: bool,
    pub score: i64,
    pub day: u32,
    pub current_objective: String,
    pub objectives_completed: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            game_started: false,
            is_sitting: false,
            score: INITIAL_SCORE,
            day: 1,
            current_objective: INITIAL_OBJECTIVE.to_string(),
            objectives_completed: 0,
        }
    }
}

impl GameSession {
    /// Difficulty of the next generated email.
    pub fn next_difficulty(&self) -> Difficulty {
        difficulty_for_score(self.score)
    }
}

/// Tier for newly generated scenarios given the current score.
pub fn difficulty_for_score(score: i64) -> Difficulty {
    if score > 1500 {
        Difficulty::Expert
    } else if score > 500 {
        Difficulty::Intermediate
    } else {
        Difficulty::Novice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_thresholds_are_exclusive() {
        assert_eq!(difficulty_for_score(500), Difficulty::Novice);
        assert_eq!(difficulty_for_score(501), Difficulty::Intermediate);
        assert_eq!(difficulty_for_score(1500), Difficulty::Intermediate);
        assert_eq!(difficulty_for_score(1501), Difficulty::Expert);
        assert_eq!(difficulty_for_score(-200), Difficulty::Novice);
    }

    #[test]
    fn fresh_session_starts_on_day_one_at_intermediate() {
        let session = GameSession::default();
        assert_eq!(session.day, 1);
        assert_eq!(session.next_difficulty(), Difficulty::Intermediate);
    }
}
