//! Fact extraction: turn a free-text message into short, standalone memories.

use serde::Deserialize;

use crate::errors::Error;
use crate::llm::Llm;

const FACT_EXTRACTION_PROMPT: &str = "\
You are a personal information organizer. Extract distinct facts about the user \
from the conversation: preferences, personal details, plans, activities, \
professional details and anything else worth remembering for later. \
Write each fact as a short standalone sentence in the language of the input. \
If there is nothing worth remembering, return an empty list. \
Reply with a JSON object of the form {\"facts\": [\"...\", \"...\"]} and nothing else.";

#[derive(Deserialize)]
struct FactList {
    #[serde(default)]
    facts: Vec<String>,
}

/// Ask the LLM for the facts contained in `text`.
pub fn extract_facts(llm: &dyn Llm, text: &str) -> Result<Vec<String>, Error> {
    let user = format!("Input:\nuser: {text}");
    let reply = llm.complete_json(FACT_EXTRACTION_PROMPT, &user)?;
    let facts = parse_facts(&reply)?;
    tracing::debug!(count = facts.len(), "extracted facts");
    Ok(facts)
}

/// Parse a `{"facts": [...]}` reply, tolerating a Markdown code fence and
/// dropping blank entries.
pub(crate) fn parse_facts(reply: &str) -> Result<Vec<String>, Error> {
    let body = strip_code_fence(reply);
    let parsed: FactList = serde_json::from_str(body)
        .map_err(|e| Error::Llm(format!("could not parse facts from LLM reply: {e}")))?;

    Ok(parsed
        .facts
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect())
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip an optional language tag on the opening fence.
    let rest = rest.split_once('\n').map_or(rest, |(_, body)| body);
    rest.trim_end().trim_end_matches("```").trim()
}
