//! Built-in security knowledge base and keyword retrieval for guardian chat grounding.

/// Maximum chunks included in one guardian prompt.
pub const MAX_CONTEXT_CHUNKS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeChunk {
    pub id: &'static str,
    /// Lowercase query keywords that make this chunk a specific match.
    pub keywords: &'static [&'static str],
    pub content: &'static str,
}

pub const KNOWLEDGE_BASE: &[KnowledgeChunk] = &[
    KnowledgeChunk {
        id: "phishing_indicators",
        keywords: &[],
        content: "Common Phishing Red Flags: 1. Urgency (e.g., 'Act now or account locked'). \
2. Mismatched Domains (e.g., 'netflix-support.com' instead of 'netflix.com'). 3. Generic \
Greetings (e.g., 'Dear Customer'). 4. Suspicious Attachments (e.g., .exe, .scr). 5. \
Spelling/Grammar mistakes.",
    },
    KnowledgeChunk {
        id: "email_analysis",
        keywords: &["email", "mail", "header", "sender"],
        content: "How to analyze email headers: Check the 'Return-Path' and 'Reply-To' fields. \
These often reveal the true sender. Spear-phishing targets specific individuals using public \
info (LinkedIn).",
    },
    KnowledgeChunk {
        id: "url_safety",
        keywords: &["link", "url", "website", "domain"],
        content: "URL Inspection: Hover over links without clicking. Look for 'typosquatting' \
(e.g., 'g0ogle.com'). Use tools like VirusTotal to scan suspicious links involved in the game \
context.",
    },
    KnowledgeChunk {
        id: "password_security",
        keywords: &["password", "otp", "2fa", "pin"],
        content: "Password Hygiene: Never share 2FA codes. IT support will NEVER ask for your \
password. Use a Password Manager.",
    },
    KnowledgeChunk {
        id: "social_engineering",
        keywords: &["ceo", "urgent", "pretext", "manipulat"],
        content: "Social Engineering: Attackers manipulate emotions (Fear, Greed, Curiosity). \
Pretexting involves creating a fake scenario (e.g., 'I am the CEO stuck at the airport').",
    },
];

/// Chunks relevant to `query`: keyword matches first in table order, then the remaining chunks,
/// capped at [`MAX_CONTEXT_CHUNKS`].
pub fn retrieve_chunks(query: &str) -> Vec<&'static KnowledgeChunk> {
    let query = query.to_lowercase();
    let (specific, general): (Vec<_>, Vec<_>) = KNOWLEDGE_BASE.iter().partition(|chunk| {
        chunk
            .keywords
            .iter()
            .any(|keyword| query.contains(keyword))
    });

    specific
        .into_iter()
        .chain(general)
        .take(MAX_CONTEXT_CHUNKS)
        .collect()
}

/// Retrieved chunk text joined by blank lines, ready for a system prompt.
pub fn retrieve_context(query: &str) -> String {
    retrieve_chunks(query)
        .into_iter()
        .map(|chunk| chunk.content)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ids(query: &str) -> Vec<&'static str> {
        retrieve_chunks(query).into_iter().map(|c| c.id).collect()
    }

    #[test]
    fn unmatched_query_returns_general_chunks_in_order() {
        assert_eq!(
            ids("hello there"),
            vec!["phishing_indicators", "email_analysis", "url_safety"]
        );
    }

    #[test]
    fn specific_matches_are_prioritized() {
        assert_eq!(
            ids("Someone asked for my PASSWORD via a link"),
            vec!["url_safety", "password_security", "phishing_indicators"]
        );
    }

    #[test]
    fn context_joins_chunks_with_blank_lines() {
        let context = retrieve_context("password");
        assert!(context.starts_with("Password Hygiene"));
        assert_eq!(context.matches("\n\n").count(), MAX_CONTEXT_CHUNKS - 1);
    }
}
