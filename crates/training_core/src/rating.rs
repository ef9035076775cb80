//! ELO-style skill rating for scenario outcomes.
//!
//! Each scenario is treated as a fixed-strength opponent whose rating is the reference value of
//! its difficulty tier.

use serde::{Deserialize, Serialize};

/// Rating assigned to a fresh player.
pub const INITIAL_RATING: u32 = 1000;
/// Update step size.
pub const K_FACTOR: f64 = 32.0;
/// Reference value used when a difficulty label is not recognized.
pub const NEUTRAL_REFERENCE: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Novice,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Novice, Self::Intermediate, Self::Expert];

    /// Parses a difficulty label as produced by prompts and model payloads.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Novice" => Some(Self::Novice),
            "Intermediate" => Some(Self::Intermediate),
            "Expert" => Some(Self::Expert),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
        }
    }

    /// Opponent strength for this tier.
    pub fn reference_rating(self) -> f64 {
        match self {
            Self::Novice => 800.0,
            Self::Intermediate => 1200.0,
            Self::Expert => 1600.0,
        }
    }
}

/// Reference value for an optional tier; unknown tiers play a neutral opponent.
pub fn reference_rating(difficulty: Option<Difficulty>) -> f64 {
    difficulty.map_or(NEUTRAL_REFERENCE, Difficulty::reference_rating)
}

/// Coarse five-step ladder derived from the rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    CyberNovice = 1,
    SecurityApprentice = 2,
    NetworkAdept = 3,
    DigitalExpert = 4,
    CyberGuardian = 5,
}

impl Level {
    pub fn from_rating(rating: u32) -> Self {
        match rating {
            0..=799 => Self::CyberNovice,
            800..=1199 => Self::SecurityApprentice,
            1200..=1599 => Self::NetworkAdept,
            1600..=1999 => Self::DigitalExpert,
            _ => Self::CyberGuardian,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::CyberNovice => "Cyber Novice",
            Self::SecurityApprentice => "Security Apprentice",
            Self::NetworkAdept => "Network Adept",
            Self::DigitalExpert => "Digital Expert",
            Self::CyberGuardian => "Cyber Guardian",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            Self::Win
        } else {
            Self::Loss
        }
    }
}

/// Result of one rating update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub old_rating: u32,
    pub new_rating: u32,
    pub level_up: bool,
}

impl RatingChange {
    pub fn delta(&self) -> i64 {
        i64::from(self.new_rating) - i64::from(self.old_rating)
    }
}

/// Logistic win probability of a player rated `rating` against `reference`.
pub fn expected_score(rating: u32, reference: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((reference - f64::from(rating)) / 400.0))
}

/// Computes the rating after one outcome against the given tier.
pub fn update_rating(
    current_rating: u32,
    difficulty: Option<Difficulty>,
    is_correct: bool,
) -> RatingChange {
    let expected = expected_score(current_rating, reference_rating(difficulty));
    let actual = if is_correct { 1.0 } else { 0.0 };
    let next = (f64::from(current_rating) + K_FACTOR * (actual - expected)).round();
    let new_rating = next.max(0.0) as u32;

    RatingChange {
        old_rating: current_rating,
        new_rating,
        level_up: Level::from_rating(new_rating) > Level::from_rating(current_rating),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub timestamp_ms: u64,
    pub rating: u32,
    pub outcome: Outcome,
}

/// Session-scoped rating state. History is append-only and unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub rating: u32,
    pub level: Level,
    pub streak: u32,
    pub history: Vec<MatchRecord>,
}

impl Default for RatingRecord {
    fn default() -> Self {
        Self::with_rating(INITIAL_RATING)
    }
}

impl RatingRecord {
    pub fn with_rating(rating: u32) -> Self {
        Self {
            rating,
            level: Level::from_rating(rating),
            streak: 0,
            history: Vec::new(),
        }
    }

    /// Applies one outcome and appends it to the history.
    pub fn record(
        &mut self,
        difficulty: Option<Difficulty>,
        is_correct: bool,
        timestamp_ms: u64,
    ) -> RatingChange {
        let change = update_rating(self.rating, difficulty, is_correct);
        self.rating = change.new_rating;
        self.level = Level::from_rating(change.new_rating);
        self.streak = if is_correct {
            self.streak.saturating_add(1)
        } else {
            0
        };
        self.history.push(MatchRecord {
            timestamp_ms,
            rating: change.new_rating,
            outcome: Outcome::from_correct(is_correct),
        });
        change
    }

    /// Most recent `count` history entries, oldest first.
    pub fn recent(&self, count: usize) -> &[MatchRecord] {
        let start = self.history.len().saturating_sub(count);
        &self.history[start..]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn intermediate_win_from_1000() {
        let change = update_rating(1000, Some(Difficulty::Intermediate), true);
        assert_eq!(
            change,
            RatingChange {
                old_rating: 1000,
                new_rating: 1024,
                level_up: false,
            }
        );
    }

    #[test]
    fn novice_loss_from_1190_keeps_apprentice_and_resets_streak() {
        let mut record = RatingRecord::with_rating(1190);
        record.streak = 4;

        let change = record.record(Some(Difficulty::Novice), false, 10);

        assert_eq!(change.new_rating, 1161);
        assert_eq!(change.delta(), -29);
        assert!(!change.level_up);
        assert_eq!(record.level, Level::SecurityApprentice);
        assert_eq!(record.streak, 0);
    }

    #[test]
    fn rating_never_drops_below_zero() {
        assert_eq!(update_rating(0, Some(Difficulty::Expert), false).new_rating, 0);
        assert_eq!(update_rating(0, None, false).new_rating, 0);
        assert_eq!(update_rating(0, Some(Difficulty::Novice), false).new_rating, 0);
    }

    #[test]
    fn unknown_difficulty_plays_neutral_reference() {
        assert_eq!(Difficulty::from_label("Legendary"), None);
        // Equal strength: expected 0.5, so a win is worth K/2.
        assert_eq!(update_rating(1000, None, true).new_rating, 1016);
        assert_eq!(update_rating(1000, None, false).new_rating, 984);
    }

    #[test]
    fn level_breakpoints() {
        let cases = [
            (0, 1),
            (799, 1),
            (800, 2),
            (1199, 2),
            (1200, 3),
            (1599, 3),
            (1600, 4),
            (1999, 4),
            (2000, 5),
        ];
        for (rating, level) in cases {
            assert_eq!(Level::from_rating(rating).number(), level, "rating {rating}");
        }
        assert_eq!(Level::from_rating(2400).title(), "Cyber Guardian");
    }

    #[test]
    fn crossing_a_breakpoint_reports_level_up() {
        let change = update_rating(1190, Some(Difficulty::Expert), true);
        assert!(change.new_rating >= 1200);
        assert!(change.level_up);
    }

    #[test]
    fn history_is_append_only_and_streak_counts_wins() {
        let mut record = RatingRecord::default();
        record.history.push(MatchRecord {
            timestamp_ms: 1,
            rating: 1000,
            outcome: Outcome::Win,
        });

        for (idx, correct) in [true, true, false, true].into_iter().enumerate() {
            record.record(Some(Difficulty::Intermediate), correct, 100 + idx as u64);
        }

        assert_eq!(record.history.len(), 5);
        assert_eq!(record.history[0].timestamp_ms, 1);
        assert_eq!(record.history[4].outcome, Outcome::Win);
        assert_eq!(record.history[4].rating, record.rating);
        assert_eq!(record.streak, 1);
        assert_eq!(record.recent(2).len(), 2);
        assert_eq!(record.recent(2)[1].timestamp_ms, 103);
    }
}
