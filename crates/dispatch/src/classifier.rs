//! Tier classification — a pure, first-match-wins rule table.
//!
//! Decision order, evaluated top to bottom:
//! 1. explicit tier override on the request;
//! 2. direct vocabulary prefix match → Direct;
//! 3. simple conversational heuristic → Economy;
//! 4. otherwise → Premium.
//!
//! Direct is checked first because it is free and deterministic; Economy is
//! the fallback for anything simple because it is free; Premium is reached
//! only by elimination. The ordering enforces a cost-minimizing bias by
//! construction, and classification is a pure function of the request and
//! this fixed table.

use tierbot_core::{Request, Tier};

/// A parsed direct-tier command: vocabulary word plus its argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectCommand {
    Wallpaper(String),
    Open(String),
    Run(String),
    ReadFile(String),
}

impl DirectCommand {
    /// The action-registry name this command dispatches to.
    pub fn action_name(&self) -> &'static str {
        match self {
            Self::Wallpaper(_) => "wallpaper",
            Self::Open(_) => "open",
            Self::Run(_) => "run",
            Self::ReadFile(_) => "read",
        }
    }

    /// The argument text passed to the action.
    pub fn arg(&self) -> &str {
        match self {
            Self::Wallpaper(arg) | Self::Open(arg) | Self::Run(arg) | Self::ReadFile(arg) => arg,
        }
    }
}

/// Question/conversation openers that mark a request as simple.
const SIMPLE_OPENERS: &[&str] = &[
    "what", "who", "where", "when", "why", "how", "is", "are", "can", "do", "does", "will",
    "would", "should", "tell", "explain", "describe", "define", "list", "hi", "hello", "hey",
    "thanks", "thank", "ok", "okay", "cool", "nice", "great",
];

/// Keywords implying code generation, multi-step planning, or explicit
/// complexity. Any hit forces the request past the economy rule.
const COMPLEX_KEYWORDS: &[&str] = &[
    "find", "search", "look up", "get me", "download", "create", "build", "figure out",
    "help me", "analyze", "compare", "write", "code", "debug", "fix", "make", "setup",
    "install", "configure", "organize", "plan", "implement", "refactor",
];

/// Requests shorter than this may qualify as simple.
const SIMPLE_MAX_CHARS: usize = 80;

/// Parse the direct-tier vocabulary out of a request, if it matches.
pub fn parse_direct(text: &str) -> Option<DirectCommand> {
    let trimmed = text.trim();
    let lower = trimmed.to_lowercase();

    if let Some(rest) = strip_word(trimmed, &lower, "wallpaper") {
        // Tolerate "wallpaper of X" / "wallpaper to X" phrasing
        let subject = ["of ", "to ", "with "]
            .iter()
            .find_map(|p| rest.strip_prefix(p))
            .unwrap_or(rest)
            .trim();
        let subject = if subject.is_empty() { "nature" } else { subject };
        return Some(DirectCommand::Wallpaper(subject.to_string()));
    }

    if let Some(rest) = strip_word(trimmed, &lower, "open") {
        if !rest.is_empty() {
            return Some(DirectCommand::Open(rest.to_string()));
        }
    }

    if let Some(rest) = strip_word(trimmed, &lower, "run") {
        if !rest.is_empty() {
            return Some(DirectCommand::Run(rest.to_string()));
        }
    }
    if let Some(rest) = trimmed.strip_prefix("$ ") {
        let rest = rest.trim();
        if !rest.is_empty() {
            return Some(DirectCommand::Run(rest.to_string()));
        }
    }

    for word in ["read", "cat"] {
        if let Some(rest) = strip_word(trimmed, &lower, word) {
            if !rest.is_empty() {
                return Some(DirectCommand::ReadFile(rest.to_string()));
            }
        }
    }

    None
}

/// Strip a leading vocabulary word (case-insensitive), returning the
/// remainder in original casing. Matches the bare word or "word rest".
fn strip_word<'a>(original: &'a str, lower: &str, word: &str) -> Option<&'a str> {
    if lower == word {
        return Some("");
    }
    if lower.starts_with(word) && lower[word.len()..].starts_with(' ') {
        return Some(original[word.len() + 1..].trim());
    }
    None
}

/// Select exactly one tier for a request.
pub fn classify(request: &Request) -> Tier {
    if let Some(tier) = request.tier_override {
        return tier;
    }

    let text = request.text.trim();
    let lower = text.to_lowercase();

    if parse_direct(text).is_some() {
        return Tier::Direct;
    }

    let first_word = lower.split_whitespace().next().unwrap_or("");
    let is_simple = SIMPLE_OPENERS.contains(&first_word) || lower.ends_with('?');
    let is_short = text.chars().count() < SIMPLE_MAX_CHARS;
    let is_complex = COMPLEX_KEYWORDS.iter().any(|k| lower.contains(k));

    if is_simple && is_short && !is_complex {
        return Tier::Economy;
    }

    Tier::Premium
}
