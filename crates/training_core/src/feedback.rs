//! Player-facing verdict text.

use crate::scenario::{Channel, ScenarioRecord};

pub const GUARDIAN_EMPTY_REPLY: &str = "System recalibrating.";
pub const GUARDIAN_OFFLINE_REPLY: &str = "Connection unstable.";

/// Feedback built from the explanation the model attached to the scenario, if any.
pub fn explanation_feedback(scenario: &ScenarioRecord, correct: bool) -> Option<String> {
    let explanation = scenario.explanation()?;
    Some(if correct {
        format!("Correct! {explanation}")
    } else {
        format!("Incorrect. {explanation}")
    })
}

pub fn fallback_feedback(correct: bool) -> &'static str {
    if correct {
        "Good call. Always check the sender."
    } else {
        "Be careful, that looked suspicious."
    }
}

/// Objective banner shown after a call on `channel`.
pub fn objective_after_call(channel: Channel, marked_as_phishing: bool, correct: bool) -> &'static str {
    match (channel, correct, marked_as_phishing) {
        (Channel::Email, true, true) => "Threat Neutralized!",
        (Channel::Email, true, false) => "Safe Email Verified!",
        (Channel::Email, false, _) => "Security Breach Detected!",
        (Channel::Sms, true, true) => "Smishing Blocked!",
        (Channel::Sms, true, false) => "Safe Message Verified",
        (Channel::Sms, false, _) => "Review Security Principles.",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::scenario::{EmailScenario, SmsScenario};

    #[test]
    fn explanation_feedback_prefixes_grade() {
        let scenario = ScenarioRecord::Email(EmailScenario::fallback());
        assert_eq!(
            explanation_feedback(&scenario, true).as_deref(),
            Some("Correct! The sender domain is fake (.fraud) and creates false urgency.")
        );
        assert!(explanation_feedback(&scenario, false)
            .expect("feedback")
            .starts_with("Incorrect. "));
    }

    #[test]
    fn missing_explanation_yields_none() {
        let scenario = ScenarioRecord::Sms(SmsScenario {
            explanation: None,
            ..SmsScenario::fallback()
        });
        assert_eq!(explanation_feedback(&scenario, true), None);
    }

    #[test]
    fn objective_text_follows_channel_and_call() {
        assert_eq!(objective_after_call(Channel::Sms, true, true), "Smishing Blocked!");
        assert_eq!(
            objective_after_call(Channel::Email, false, true),
            "Security Breach Detected!"
        );
    }
}
