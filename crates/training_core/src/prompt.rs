//! Prompt construction for scenario, feedback, and guardian-chat generation.

use platform_host::{ChatMessage, GenerationRequest};
use serde::{Deserialize, Serialize};

use crate::{knowledge, rating::Difficulty, scenario::ScenarioRecord};

pub const EMAIL_TOPICS: &[&str] = &[
    "Income Tax",
    "Job Offer",
    "Lottery",
    "Bank KYC",
    "Amazon Delivery",
    "Netflix",
    "Traffic Fine",
    "Diwali Bonus",
];

pub const SMS_TOPICS: &[&str] = &[
    "UPI Cashback",
    "E-Challan",
    "Job Offer",
    "Bank Block",
    "Electricity Bill",
    "Friend in trouble",
    "5G Update",
];

/// Share of generated emails that are phishing.
pub const EMAIL_PHISHING_RATIO: f64 = 0.5;
/// Share of generated SMS that are smishing.
pub const SMS_PHISHING_RATIO: f64 = 0.6;

pub const GUARDIAN_GREETING: &str = "Namaste! I am your **Digital Guardian**.  \nI can help you \
analyze threats using my knowledge of headers, URLs, and social engineering.  \n\n*What do you \
want to check today?*";

/// What kind of scenario to ask for. Rolls are supplied by the caller so plans stay deterministic
/// under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioPlan {
    pub is_phishing: bool,
    pub seed: String,
}

impl ScenarioPlan {
    /// Picks phishing vs. legitimate from `mix_roll` and a topic from `topic_roll`, both in
    /// `[0, 1)`. The seed carries the timestamp so repeated topics still read as new requests.
    pub fn roll(
        topics: &[&str],
        phishing_ratio: f64,
        mix_roll: f64,
        topic_roll: f64,
        now_ms: u64,
    ) -> Self {
        let topic = if topics.is_empty() {
            "General"
        } else {
            let idx = ((topic_roll.clamp(0.0, 1.0) * topics.len() as f64) as usize)
                .min(topics.len() - 1);
            topics[idx]
        };
        Self {
            is_phishing: mix_roll < phishing_ratio,
            seed: format!("{topic} {now_ms}"),
        }
    }
}

pub fn email_request(difficulty: Difficulty, plan: &ScenarioPlan) -> GenerationRequest {
    let kind = if plan.is_phishing {
        "PHISHING/SCAM"
    } else {
        "LEGITIMATE/SAFE"
    };
    let verdict = if plan.is_phishing { "FAKE" } else { "REAL" };
    let prompt = format!(
        r#"
Generate a UNIQUE and REALISTIC corporate or personal email scenario for an INDIAN context.
Type: {kind}.
Difficulty: {difficulty}.
Random Topic: {seed}.

Topics (Pick one):
- Income Tax Refund (ITD) vs Real Assessment Order
- Bank KYC Update vs Real Transaction Alert
- Amazon/Flipkart Order vs Real Delivery Update
- Workplace: Bonus/Appraisal vs Real Meeting Invite
- Subscriptions: Netflix/Spotify Payment Failed vs Real Invoice
- Traffic Challan (Parivahan) vs Real Payment Receipt

CONTEXT:
- If LEGITIMATE: Use correct grammar, valid domains (e.g., @hdfcbank.com, @amazon.in), no sense of artificial urgency, professional tone.
- If PHISHING: Use subtle errors (e.g., @hdfc-kyc-update.com), panic-inducing language, generic greetings, suspicious links.

Return ONLY raw JSON:
{{
  "sender": "Name or Org",
  "senderEmail": "email@address",
  "subject": "Subject Line",
  "body": "Detailed email body with specific Indian context (INR, dates, local terms)...",
  "isPhishing": {is_phishing},
  "difficulty": "{difficulty}",
  "explanation": "Educational tip explaining why this is {verdict}."
}}
"#,
        difficulty = difficulty.label(),
        seed = plan.seed,
        is_phishing = plan.is_phishing,
    );
    GenerationRequest::prompt(prompt, 0.8, 600)
}

pub fn sms_request(plan: &ScenarioPlan) -> GenerationRequest {
    let kind = if plan.is_phishing {
        "SMISHING (SCAM)"
    } else {
        "LEGITIMATE (SAFE)"
    };
    let verdict = if plan.is_phishing { "unsafe" } else { "safe" };
    let prompt = format!(
        r#"
Generate a UNIQUE SMS scenario for an INDIAN user.
Type: {kind}.
Random Topic: {seed}.

Scenarios:
- UPI (PhonePe/GPay): Fake Cashback vs Real Payment Notification
- Bank: Account Blocked vs Real Debit Alert
- Services: Power Cutoff vs Real Bill Payment Receipt
- Job: Fake 'Work from Home' vs Real Interview Call
- Telecom: 5G KYC Update vs Real Data Usage Alert
- E-Challan: Fake Fine Link vs Real Violation Settlement

Return ONLY raw JSON:
{{
  "sender": "Short Code (e.g. VM-SBIUPS, AD-DOMINO) or Mobile Number",
  "message": "The SMS text (include fake links e.g. bit.ly for scams, or clean text for safe)",
  "isPhishing": {is_phishing},
  "explanation": "Short educational reason why this is {verdict}."
}}
"#,
        seed = plan.seed,
        is_phishing = plan.is_phishing,
    );
    GenerationRequest::prompt(prompt, 0.9, 300)
}

pub fn feedback_request(
    scenario: &ScenarioRecord,
    marked_as_phishing: bool,
    correct: bool,
) -> GenerationRequest {
    let action = if marked_as_phishing {
        "Reported as Phishing"
    } else {
        "Marked as Safe"
    };
    let grade = if correct { "Correct" } else { "Incorrect" };
    let opener = if correct { "Well done!" } else { "Oops!" };
    let prompt = format!(
        r#"
Context: Indian Cybersecurity Training.
Scenario: {headline} (Is Phishing: {is_phishing}).
User Action: {action} ({grade}).

Task: Explain WHY in 1-2 simple sentences.
Focus on the specific cues (sender, link, urgency, grammar).
If Safe: Explain what makes it look authentic (regular patterns, no links).
If Phishing: Point out the red flag.
Start with: "{opener}"
"#,
        headline = scenario.headline(),
        is_phishing = scenario.is_phishing(),
    );
    GenerationRequest::prompt(prompt, 0.7, 150)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Player,
    Guardian,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl GuardianTurn {
    pub fn player(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Player,
            text: text.into(),
        }
    }

    pub fn guardian(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Guardian,
            text: text.into(),
        }
    }
}

/// Guardian chat request grounded on knowledge retrieved for the latest player message.
pub fn guardian_request(history: &[GuardianTurn], current_context: &str) -> GenerationRequest {
    let latest_query = history
        .iter()
        .rev()
        .find(|turn| turn.speaker == Speaker::Player)
        .map(|turn| turn.text.as_str())
        .unwrap_or_default();
    let system_prompt = format!(
        r#"
You are 'Jarvis', the Digital Guardian for PhishNet.
Goal: Teach cybersecurity using the Socratic method.
Context: {current_context}
Knowledge Base: {rag}

Keep it short, professional, and slightly futuristic/cool.
"#,
        rag = knowledge::retrieve_context(latest_query),
    );

    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(history.iter().map(|turn| match turn.speaker {
        Speaker::Player => ChatMessage::user(turn.text.clone()),
        Speaker::Guardian => ChatMessage::assistant(turn.text.clone()),
    }));

    GenerationRequest {
        messages,
        temperature: 0.7,
        max_tokens: 300,
    }
}
