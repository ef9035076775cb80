//! Reducer for player progress: session banner/score, tasks, and rating.

use serde::{Deserialize, Serialize};

use crate::{
    feedback::objective_after_call,
    rating::{Difficulty, Level, RatingChange, RatingRecord},
    scenario::{is_correct_call, Channel},
    session::GameSession,
    tasks::{TaskList, TrainingTask},
};

/// Score granted for a correct call.
pub const CORRECT_CALL_REWARD: i64 = 100;
pub const MISSED_EMAIL_PENALTY: i64 = -50;
pub const MISSED_SMS_PENALTY: i64 = -20;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrainingState {
    pub session: GameSession,
    pub rating: RatingRecord,
    pub tasks: TaskList,
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_training`].
pub enum TrainingAction {
    StartGame,
    SetSitting(bool),
    SetObjective(String),
    AdjustScore(i64),
    /// Advance the day counter; ignored while critical tasks remain open.
    NextDay,
    AddTask(TrainingTask),
    CompleteTask(String),
    SetTaskCritical { id: String, critical: bool },
    ReplaceTasks(Vec<TrainingTask>),
    /// The player reported or cleared a scenario.
    ResolveScenario {
        channel: Channel,
        difficulty: Option<Difficulty>,
        marked_as_phishing: bool,
        is_phishing: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Notifications emitted by [`reduce_training`] for the presentation layer.
pub enum TrainingEffect {
    CallResolved { correct: bool, change: RatingChange },
    LevelUp(Level),
    DayAdvanced(u32),
    DayBlocked,
}

/// Applies `action` at wall time `now_ms`.
pub fn reduce_training(
    state: &mut TrainingState,
    action: TrainingAction,
    now_ms: u64,
) -> Vec<TrainingEffect> {
    let mut effects = Vec::new();
    match action {
        TrainingAction::StartGame => state.session.game_started = true,
        TrainingAction::SetSitting(sitting) => state.session.is_sitting = sitting,
        TrainingAction::SetObjective(objective) => state.session.current_objective = objective,
        TrainingAction::AdjustScore(amount) => {
            state.session.score = state.session.score.saturating_add(amount)
        }
        TrainingAction::NextDay => {
            if state.tasks.critical_tasks_done() {
                state.session.day = state.session.day.saturating_add(1);
                effects.push(TrainingEffect::DayAdvanced(state.session.day));
            } else {
                effects.push(TrainingEffect::DayBlocked);
            }
        }
        TrainingAction::AddTask(task) => state.tasks.add(task),
        TrainingAction::CompleteTask(id) => {
            if let Some(reward) = state.tasks.complete(&id) {
                state.session.score = state.session.score.saturating_add(reward);
            }
        }
        TrainingAction::SetTaskCritical { id, critical } => {
            state.tasks.set_critical(&id, critical)
        }
        TrainingAction::ReplaceTasks(tasks) => state.tasks.replace(tasks),
        TrainingAction::ResolveScenario {
            channel,
            difficulty,
            marked_as_phishing,
            is_phishing,
        } => {
            let correct = is_correct_call(is_phishing, marked_as_phishing);
            let score_delta = match (correct, channel) {
                (true, _) => CORRECT_CALL_REWARD,
                (false, Channel::Email) => MISSED_EMAIL_PENALTY,
                (false, Channel::Sms) => MISSED_SMS_PENALTY,
            };
            state.session.score = state.session.score.saturating_add(score_delta);
            state.session.current_objective =
                objective_after_call(channel, marked_as_phishing, correct).to_string();
            if correct {
                state.session.objectives_completed =
                    state.session.objectives_completed.saturating_add(1);
            }

            let change = state.rating.record(difficulty, correct, now_ms);
            effects.push(TrainingEffect::CallResolved { correct, change });
            if change.level_up {
                effects.push(TrainingEffect::LevelUp(state.rating.level));
            }
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn resolve(
        state: &mut TrainingState,
        channel: Channel,
        marked_as_phishing: bool,
        is_phishing: bool,
    ) -> Vec<TrainingEffect> {
        reduce_training(
            state,
            TrainingAction::ResolveScenario {
                channel,
                difficulty: Some(Difficulty::Intermediate),
                marked_as_phishing,
                is_phishing,
            },
            1_000,
        )
    }

    #[test]
    fn correct_report_rewards_score_rating_and_objective() {
        let mut state = TrainingState::default();

        let effects = resolve(&mut state, Channel::Email, true, true);

        assert_eq!(state.session.score, 1100);
        assert_eq!(state.session.current_objective, "Threat Neutralized!");
        assert_eq!(state.session.objectives_completed, 1);
        assert_eq!(state.rating.rating, 1024);
        assert_eq!(state.rating.streak, 1);
        assert_eq!(state.rating.history.len(), 1);
        assert_eq!(
            effects,
            vec![TrainingEffect::CallResolved {
                correct: true,
                change: RatingChange {
                    old_rating: 1000,
                    new_rating: 1024,
                    level_up: false,
                },
            }]
        );
    }

    #[test]
    fn missed_sms_costs_less_than_missed_email() {
        let mut state = TrainingState::default();
        resolve(&mut state, Channel::Sms, false, true);
        assert_eq!(state.session.score, 980);
        assert_eq!(state.session.current_objective, "Review Security Principles.");

        resolve(&mut state, Channel::Email, true, false);
        assert_eq!(state.session.score, 930);
        assert_eq!(state.session.objectives_completed, 0);
        assert_eq!(state.rating.streak, 0);
        assert_eq!(state.rating.history.len(), 2);
    }

    #[test]
    fn level_up_is_reported() {
        let mut state = TrainingState {
            rating: RatingRecord::with_rating(1190),
            ..TrainingState::default()
        };
        let effects = reduce_training(
            &mut state,
            TrainingAction::ResolveScenario {
                channel: Channel::Email,
                difficulty: Some(Difficulty::Expert),
                marked_as_phishing: false,
                is_phishing: false,
            },
            5,
        );
        assert!(effects.contains(&TrainingEffect::LevelUp(Level::NetworkAdept)));
    }

    #[test]
    fn day_advances_only_after_critical_tasks() {
        let mut state = TrainingState::default();
        assert_eq!(
            reduce_training(&mut state, TrainingAction::NextDay, 0),
            vec![TrainingEffect::DayBlocked]
        );

        reduce_training(
            &mut state,
            TrainingAction::CompleteTask("day1-01".to_string()),
            0,
        );
        assert_eq!(state.session.score, 1050);
        assert_eq!(
            reduce_training(&mut state, TrainingAction::NextDay, 0),
            vec![TrainingEffect::DayAdvanced(2)]
        );
    }

    #[test]
    fn session_flags_and_objective_update() {
        let mut state = TrainingState::default();
        reduce_training(&mut state, TrainingAction::StartGame, 0);
        reduce_training(&mut state, TrainingAction::SetSitting(true), 0);
        reduce_training(
            &mut state,
            TrainingAction::SetObjective("Report the fake invoice.".to_string()),
            0,
        );
        reduce_training(&mut state, TrainingAction::AdjustScore(-1200), 0);

        assert!(state.session.game_started);
        assert!(state.session.is_sitting);
        assert_eq!(state.session.current_objective, "Report the fake invoice.");
        assert_eq!(state.session.next_difficulty(), Difficulty::Novice);
    }
}
