//! Orchestrates one round-trip to the text-generation service for each content kind.
//!
//! Every function here always produces a value: transport and parse failures are converted into
//! the matching literal fallback, and the result records which path was taken so the runtime can
//! log it.

use platform_host::TextGenerationService;

use crate::{
    feedback,
    prompt::{self, GuardianTurn, ScenarioPlan},
    rating::Difficulty,
    scenario::{parse_scenario, EmailScenario, ScenarioRecord, SmsScenario},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationSource {
    /// Text came from the model.
    Model,
    /// Text was derived without a model call.
    Local,
    /// Model call or parse failed; carries the reason.
    Fallback(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    pub value: T,
    pub source: GenerationSource,
}

impl<T> Generated<T> {
    fn model(value: T) -> Self {
        Self {
            value,
            source: GenerationSource::Model,
        }
    }

    fn fallback(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            source: GenerationSource::Fallback(reason.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, GenerationSource::Fallback(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Generated<U> {
        Generated {
            value: f(self.value),
            source: self.source,
        }
    }
}

pub async fn generate_email(
    service: &dyn TextGenerationService,
    difficulty: Difficulty,
    plan: &ScenarioPlan,
) -> Generated<EmailScenario> {
    let request = prompt::email_request(difficulty, plan);
    match service.generate(&request).await {
        Ok(text) => match parse_scenario(&text).into_result() {
            Ok(email) => Generated::model(email),
            Err(err) => Generated::fallback(EmailScenario::fallback(), err.to_string()),
        },
        Err(err) => Generated::fallback(EmailScenario::fallback(), err),
    }
}

pub async fn generate_sms(
    service: &dyn TextGenerationService,
    plan: &ScenarioPlan,
) -> Generated<SmsScenario> {
    let request = prompt::sms_request(plan);
    match service.generate(&request).await {
        Ok(text) => match parse_scenario(&text).into_result() {
            Ok(sms) => Generated::model(sms),
            Err(err) => Generated::fallback(SmsScenario::fallback(), err.to_string()),
        },
        Err(err) => Generated::fallback(SmsScenario::fallback(), err),
    }
}

/// Verdict text for a call. Scenarios that already carry an explanation skip the model call.
pub async fn generate_feedback(
    service: &dyn TextGenerationService,
    scenario: &ScenarioRecord,
    marked_as_phishing: bool,
) -> Generated<String> {
    let correct = scenario.is_phishing() == marked_as_phishing;
    if let Some(text) = feedback::explanation_feedback(scenario, correct) {
        return Generated {
            value: text,
            source: GenerationSource::Local,
        };
    }

    let request = prompt::feedback_request(scenario, marked_as_phishing, correct);
    match service.generate(&request).await {
        Ok(text) if !text.trim().is_empty() => Generated::model(text.trim().to_string()),
        Ok(_) => Generated::fallback(
            feedback::fallback_feedback(correct).to_string(),
            "empty feedback",
        ),
        Err(err) => Generated::fallback(feedback::fallback_feedback(correct).to_string(), err),
    }
}

pub async fn chat_with_guardian(
    service: &dyn TextGenerationService,
    history: &[GuardianTurn],
    current_context: &str,
) -> Generated<String> {
    let request = prompt::guardian_request(history, current_context);
    match service.generate(&request).await {
        Ok(text) if !text.trim().is_empty() => Generated::model(text),
        Ok(_) => Generated::fallback(feedback::GUARDIAN_EMPTY_REPLY.to_string(), "empty reply"),
        Err(err) => Generated::fallback(feedback::GUARDIAN_OFFLINE_REPLY.to_string(), err),
    }
}
