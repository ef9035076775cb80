//! Scenario records and the parser that turns free-form model text into them.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::rating::Difficulty;

/// Delivery channel a scenario arrives through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Email,
    Sms,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailScenario {
    pub sender: String,
    pub sender_email: String,
    pub subject: String,
    pub body: String,
    pub is_phishing: bool,
    #[serde(default = "default_difficulty_label")]
    pub difficulty: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl EmailScenario {
    /// Literal used whenever email generation or parsing fails.
    pub fn fallback() -> Self {
        Self {
            sender: "IT Dept".to_string(),
            sender_email: "admin@incometax-gov.in.fraud".to_string(),
            subject: "Urgent: Tax Refund Failed".to_string(),
            body: "Your tax refund of ₹45,000 has failed. Click to verify.".to_string(),
            is_phishing: true,
            difficulty: Difficulty::Novice.label().to_string(),
            explanation: Some(
                "The sender domain is fake (.fraud) and creates false urgency.".to_string(),
            ),
        }
    }

    /// Tier parsed from the payload label, `None` when the model invented one.
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_label(&self.difficulty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsScenario {
    pub sender: String,
    pub message: String,
    pub is_phishing: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl SmsScenario {
    /// Literal used whenever SMS generation or parsing fails.
    pub fn fallback() -> Self {
        Self {
            sender: "AX-HDFCBK".to_string(),
            message:
                "Dear Customer, PAN not linked. Account blocked. Click: http://hdfc-pan-update.com"
                    .to_string(),
            is_phishing: true,
            explanation: Some(
                "Banks never send threatening links via SMS to update PAN.".to_string(),
            ),
        }
    }
}

/// Either scenario kind, for code that handles both channels uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioRecord {
    Email(EmailScenario),
    Sms(SmsScenario),
}

impl ScenarioRecord {
    pub fn channel(&self) -> Channel {
        match self {
            Self::Email(_) => Channel::Email,
            Self::Sms(_) => Channel::Sms,
        }
    }

    pub fn is_phishing(&self) -> bool {
        match self {
            Self::Email(email) => email.is_phishing,
            Self::Sms(sms) => sms.is_phishing,
        }
    }

    /// Tier used for rating the call. SMS scenarios are always generated at Intermediate.
    pub fn difficulty(&self) -> Option<Difficulty> {
        match self {
            Self::Email(email) => email.difficulty(),
            Self::Sms(_) => Some(Difficulty::Intermediate),
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        match self {
            Self::Email(email) => email.explanation.as_deref(),
            Self::Sms(sms) => sms.explanation.as_deref(),
        }
        .filter(|text| !text.trim().is_empty())
    }

    /// Short human-readable summary used in feedback prompts.
    pub fn headline(&self) -> &str {
        match self {
            Self::Email(email) => &email.subject,
            Self::Sms(sms) => &sms.message,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScenarioParseError {
    #[error("model returned no text")]
    Empty,
    #[error("no JSON object found in model output")]
    NoJsonObject,
    #[error("model output is not a valid scenario: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Parse result for model text. Callers resolve `Unparseable` with a literal default.
#[derive(Debug)]
pub enum ScenarioOutcome<T> {
    Parsed(T),
    Unparseable(ScenarioParseError),
}

impl<T> ScenarioOutcome<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// Returns the parsed value or `fallback`.
    pub fn or_fallback(self, fallback: T) -> T {
        match self {
            Self::Parsed(value) => value,
            Self::Unparseable(_) => fallback,
        }
    }

    pub fn into_result(self) -> Result<T, ScenarioParseError> {
        match self {
            Self::Parsed(value) => Ok(value),
            Self::Unparseable(err) => Err(err),
        }
    }
}

/// Slices `text` from its first `{` to its last `}`.
///
/// Chatty models wrap the payload in prose or code fences; everything outside the outermost braces
/// is dropped.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parses model output into a typed scenario.
pub fn parse_scenario<T: DeserializeOwned>(text: &str) -> ScenarioOutcome<T> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ScenarioOutcome::Unparseable(ScenarioParseError::Empty);
    }

    let result = match extract_json_object(trimmed) {
        Some(object) => serde_json::from_str(object),
        None => match serde_json::from_str::<T>(trimmed) {
            Ok(value) => Ok(value),
            Err(_) => return ScenarioOutcome::Unparseable(ScenarioParseError::NoJsonObject),
        },
    };

    match result {
        Ok(value) => ScenarioOutcome::Parsed(value),
        Err(err) => ScenarioOutcome::Unparseable(err.into()),
    }
}

/// Whether the player's call matches the scenario.
pub fn is_correct_call(is_phishing: bool, marked_as_phishing: bool) -> bool {
    is_phishing == marked_as_phishing
}

fn default_difficulty_label() -> String {
    Difficulty::Novice.label().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CHATTY_EMAIL: &str = r#"Sure! Here is your scenario:
```json
{
  "sender": "HDFC Bank",
  "senderEmail": "alerts@hdfc-kyc-update.com",
  "subject": "KYC pending {urgent}",
  "body": "Update KYC within 24 hours or your account is frozen.",
  "isPhishing": true,
  "difficulty": "Intermediate",
  "explanation": "Lookalike domain and manufactured urgency."
}
```
Let me know if you need another one."#;

    #[test]
    fn chatty_output_parses_outermost_object() {
        let email: EmailScenario = parse_scenario(CHATTY_EMAIL)
            .into_result()
            .expect("parse email");
        assert_eq!(email.sender_email, "alerts@hdfc-kyc-update.com");
        assert_eq!(email.subject, "KYC pending {urgent}");
        assert_eq!(email.difficulty(), Some(Difficulty::Intermediate));
        assert!(email.is_phishing);
    }

    #[test]
    fn garbage_and_empty_text_fall_back_to_literal() {
        for text in ["", "   ", "I cannot help with that.", "{not json}"] {
            let outcome = parse_scenario::<SmsScenario>(text);
            assert!(!outcome.is_parsed(), "{text:?} parsed unexpectedly");
            assert_eq!(outcome.or_fallback(SmsScenario::fallback()).sender, "AX-HDFCBK");
        }
    }

    #[test]
    fn missing_required_field_is_unparseable() {
        let outcome = parse_scenario::<SmsScenario>(r#"{"sender": "VM-SBIUPS"}"#);
        assert!(matches!(
            outcome,
            ScenarioOutcome::Unparseable(ScenarioParseError::InvalidPayload(_))
        ));
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let sms: SmsScenario = parse_scenario(
            r#"{"sender": "VM-SBIUPS", "message": "Rs 500 debited", "isPhishing": false}"#,
        )
        .into_result()
        .expect("parse sms");
        assert_eq!(sms.explanation, None);

        let email: EmailScenario = parse_scenario(
            r#"{"sender":"A","senderEmail":"a@b.in","subject":"s","body":"b","isPhishing":false}"#,
        )
        .into_result()
        .expect("parse email");
        assert_eq!(email.difficulty, "Novice");
    }

    #[test]
    fn record_accessors_cover_both_channels() {
        let email = ScenarioRecord::Email(EmailScenario::fallback());
        let sms = ScenarioRecord::Sms(SmsScenario {
            explanation: Some("  ".to_string()),
            ..SmsScenario::fallback()
        });

        assert_eq!(email.channel(), Channel::Email);
        assert_eq!(email.headline(), "Urgent: Tax Refund Failed");
        assert!(email.explanation().is_some());
        assert_eq!(sms.channel(), Channel::Sms);
        assert_eq!(sms.explanation(), None);
    }

    #[test]
    fn call_is_correct_when_it_matches_ground_truth() {
        assert!(is_correct_call(true, true));
        assert!(is_correct_call(false, false));
        assert!(!is_correct_call(true, false));
        assert!(!is_correct_call(false, true));
    }
}
