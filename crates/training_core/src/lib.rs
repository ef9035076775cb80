//! Headless training domain for the PhishNet desktop: rating engine, scenario parsing and
//! generation, knowledge retrieval, inboxes, session progress, and the terminal interpreter.
//!
//! Nothing here renders or schedules; `desktop_runtime` owns the reactive wiring and timers.

pub mod feedback;
pub mod generator;
pub mod inbox;
pub mod knowledge;
pub mod progress;
pub mod prompt;
pub mod rating;
pub mod scenario;
pub mod session;
pub mod tasks;
pub mod terminal;

pub use generator::{
    chat_with_guardian, generate_email, generate_feedback, generate_sms, Generated,
    GenerationSource,
};
pub use inbox::{Inbox, InboxItem};
pub use progress::{reduce_training, TrainingAction, TrainingEffect, TrainingState};
pub use prompt::{GuardianTurn, ScenarioPlan, Speaker};
pub use rating::{update_rating, Difficulty, Level, MatchRecord, Outcome, RatingChange, RatingRecord};
pub use scenario::{
    parse_scenario, Channel, EmailScenario, ScenarioOutcome, ScenarioParseError, ScenarioRecord,
    SmsScenario,
};
pub use session::{difficulty_for_score, GameSession};
pub use tasks::{TaskList, TrainingTask};
pub use terminal::TerminalSession;
