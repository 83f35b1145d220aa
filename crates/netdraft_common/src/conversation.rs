//! Conversation stage tracker.
//!
//! Extracts structured fields from free-text assistant replies by keyword
//! matching and advances the three-stage conversation. Extraction is
//! best-effort by contract: a reply with no `keyword: value` lines advances
//! nothing, and that is not an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Questions the assistant still wants answered, in priority order
pub const INTAKE_QUESTIONS: [&str; 7] = [
    "What is your company size?",
    "What industry are you in?",
    "How many physical locations do you have?",
    "What is your required network uptime?",
    "What are your critical business applications?",
    "Estimated number of network users?",
    "What are your primary network security concerns?",
];

/// Keyword that may appear in a reply, and the attribute it populates
const ATTRIBUTE_TABLE: [(&str, &str); 7] = [
    ("company size", "companySize"),
    ("industry", "industryType"),
    ("locations", "locations"),
    ("uptime", "requiredUptime"),
    ("users", "estimatedUsers"),
    ("applications", "criticalApplications"),
    ("security", "securityRequirements"),
];

static ATTRIBUTE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    ATTRIBUTE_TABLE
        .iter()
        .map(|(keyword, attribute)| {
            let pattern = format!(r"(?i){}:\s*([^\n]+)", regex::escape(keyword));
            (Regex::new(&pattern).expect("static pattern"), *attribute)
        })
        .collect()
});

/// Conversation progress marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Initial,
    Gathering,
    Recommending,
}

/// Everything the chat flow carries between turns. Wire names are camelCase
/// to match the browser-era contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationContext {
    pub questions: Vec<String>,
    pub collected_info: BTreeMap<String, String>,
    pub stage: Stage,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self {
            questions: INTAKE_QUESTIONS.iter().map(|q| q.to_string()).collect(),
            collected_info: BTreeMap::new(),
            stage: Stage::Initial,
        }
    }
}

impl ConversationContext {
    /// Whether enough has been collected to hand off to the generator
    pub fn ready_for_design(&self) -> bool {
        self.stage == Stage::Recommending
    }

    /// Fold one assistant reply into the context: extract fields, prune
    /// answered questions, recompute the stage. Returns the attributes
    /// newly extracted from this reply.
    pub fn track_reply(&mut self, reply: &str) -> Vec<&'static str> {
        let extracted = extract_fields(reply);
        let mut new_attributes = Vec::new();

        for (attribute, value) in &extracted {
            self.collected_info
                .insert(attribute.to_string(), value.clone());
            new_attributes.push(*attribute);
        }

        // Approximate pruning: a question is considered answered when it
        // contains an extracted attribute name as a substring. Multi-word
        // attributes (companySize) never match their question; that quirk
        // is part of the observed behavior and is kept.
        if !new_attributes.is_empty() {
            self.questions.retain(|q| {
                let q_lower = q.to_lowercase();
                !new_attributes
                    .iter()
                    .any(|attr| q_lower.contains(&attr.to_lowercase()))
            });
        }

        self.stage = if self.collected_info.len() > 3 {
            Stage::Recommending
        } else {
            Stage::Gathering
        };

        new_attributes
    }
}

/// Match every known `keyword: value` line in a reply. Values run to the end
/// of the line and are trimmed. Later table entries never overwrite earlier
/// ones within a single reply because attributes are distinct.
pub fn extract_fields(reply: &str) -> BTreeMap<&'static str, String> {
    let mut fields = BTreeMap::new();
    for (pattern, attribute) in ATTRIBUTE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(reply) {
            if let Some(value) = caps.get(1) {
                fields.insert(*attribute, value.as_str().trim().to_string());
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_keyword_value_lines() {
        let reply = "Thanks! Noting down:\nCompany size: 50 employees\nIndustry: healthcare\n";
        let fields = extract_fields(reply);
        assert_eq!(fields.get("companySize").unwrap(), "50 employees");
        assert_eq!(fields.get("industryType").unwrap(), "healthcare");
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_extraction_is_case_insensitive_and_trims() {
        let fields = extract_fields("UPTIME:   99.9% required  ");
        assert_eq!(fields.get("requiredUptime").unwrap(), "99.9% required");
    }

    #[test]
    fn test_no_match_extracts_nothing() {
        assert!(extract_fields("Could you tell me more about your business?").is_empty());
    }

    #[test]
    fn test_stage_threshold_on_collected_info() {
        let mut ctx = ConversationContext::default();
        ctx.track_reply("Company size: 50\nIndustry: retail\nLocations: 2");
        assert_eq!(ctx.collected_info.len(), 3);
        assert_eq!(ctx.stage, Stage::Gathering);
        ctx.track_reply("Uptime: 99.9%");
        assert_eq!(ctx.collected_info.len(), 4);
        assert_eq!(ctx.stage, Stage::Recommending);
        assert!(ctx.ready_for_design());
    }

    #[test]
    fn test_stage_is_monotonic() {
        let mut ctx = ConversationContext::default();
        ctx.track_reply("Company size: 50\nIndustry: retail\nLocations: 2\nUptime: 99%");
        assert_eq!(ctx.stage, Stage::Recommending);
        // A reply with nothing extractable must not regress the stage.
        ctx.track_reply("Great, let me draft a design for you.");
        assert_eq!(ctx.stage, Stage::Recommending);
        // Overwriting an existing key keeps the count and the stage.
        ctx.track_reply("Industry: finance");
        assert_eq!(ctx.stage, Stage::Recommending);
        assert_eq!(ctx.collected_info.get("industryType").unwrap(), "finance");
    }

    #[test]
    fn test_questions_pruned_by_attribute_substring() {
        let mut ctx = ConversationContext::default();
        ctx.track_reply("Locations: 3 offices");
        assert!(!ctx
            .questions
            .iter()
            .any(|q| q == "How many physical locations do you have?"));
        // "companySize" is not a substring of "What is your company size?",
        // so that question survives its own answer.
        ctx.track_reply("Company size: 80");
        assert!(ctx
            .questions
            .iter()
            .any(|q| q == "What is your company size?"));
    }

    #[test]
    fn test_default_context_wire_shape() {
        let ctx = ConversationContext::default();
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["stage"], "initial");
        assert!(json["collectedInfo"].as_object().unwrap().is_empty());
        assert_eq!(json["questions"].as_array().unwrap().len(), 7);
    }
}
