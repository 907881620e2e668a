use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Phrases matched as case-insensitive substrings
const SPAM_PHRASES: &[&str] = &[
    "viagra",
    "cialis",
    "casino",
    "lottery",
    "winner",
    "free money",
    "click here",
    "buy now",
    "limited time",
    "act now",
    "make money fast",
    "work from home",
    "earn from home",
    "earn money",
    "get rich",
    "double your",
    "weight loss",
    "no risk",
    "risk free",
    "guarantee",
    "100% free",
    "cheap meds",
    "online pharmacy",
    "crypto giveaway",
];

/// Words matched as whole tokens only
const PROFANITY: &[&str] = &[
    "fuck", "shit", "bitch", "bastard", "asshole", "ass", "damn", "crap", "dick", "piss", "cunt",
    "slut", "whore",
];

/// More links than this flags the text
const MAX_LINKS: usize = 2;

/// Shouting only counts above this many characters
const SHOUTING_MIN_CHARS: usize = 10;

static CLASSIFIER: Lazy<CommentClassifier> = Lazy::new(CommentClassifier::new);

/// Rule that flagged a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpamSignal {
    Keyword,
    Profanity,
    ExcessiveLinks,
    Shouting,
    RepeatedCharacters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub signals: Vec<SpamSignal>,
}

impl Verdict {
    pub fn is_spam(&self) -> bool {
        !self.signals.is_empty()
    }
}

/// Rule-based spam and profanity detector
pub struct CommentClassifier {
    profanity: HashSet<&'static str>,
    url_pattern: Regex,
    repeated_pattern: Regex,
}

impl Default for CommentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentClassifier {
    pub fn new() -> Self {
        Self {
            profanity: PROFANITY.iter().copied().collect(),
            url_pattern: Regex::new(r"https?://[^\s]+").expect("URL regex pattern is valid"),
            // No backreferences in `regex`, so one alternative per character
            repeated_pattern: Regex::new(r"!{5,}|\?{5,}|\.{5,}|\${5,}|\*{5,}")
                .expect("Repeated character regex pattern is valid"),
        }
    }

    /// Run every rule and collect the ones that fire
    pub fn check(&self, text: &str) -> Verdict {
        if text.is_empty() {
            return Verdict { signals: Vec::new() };
        }

        let folded = text.to_lowercase();
        let mut signals = Vec::new();

        if self.has_spam_phrase(&folded) {
            signals.push(SpamSignal::Keyword);
        }
        if self.has_profanity(&folded) {
            signals.push(SpamSignal::Profanity);
        }
        if self.count_links(text) > MAX_LINKS {
            signals.push(SpamSignal::ExcessiveLinks);
        }
        if self.is_shouting(text) {
            signals.push(SpamSignal::Shouting);
        }
        if self.repeated_pattern.is_match(text) {
            signals.push(SpamSignal::RepeatedCharacters);
        }

        if !signals.is_empty() {
            tracing::debug!(?signals, "Text flagged");
        }

        Verdict { signals }
    }

    pub fn is_spam(&self, text: &str) -> bool {
        self.check(text).is_spam()
    }

    fn has_spam_phrase(&self, folded: &str) -> bool {
        SPAM_PHRASES.iter().any(|&phrase| folded.contains(phrase))
    }

    fn has_profanity(&self, folded: &str) -> bool {
        folded
            .unicode_words()
            .any(|word| self.profanity.contains(word))
    }

    fn count_links(&self, text: &str) -> usize {
        self.url_pattern.find_iter(text).count()
    }

    /// Upper-case equality, not a letter ratio: digit-only text over the length
    /// threshold also counts.
    fn is_shouting(&self, text: &str) -> bool {
        text.chars().count() > SHOUTING_MIN_CHARS && text == text.to_uppercase()
    }
}

/// Classify with the shared default classifier
pub fn classify(text: &str) -> bool {
    CLASSIFIER.is_spam(text)
}

/// Signals from the shared default classifier
pub fn check(text: &str) -> Verdict {
    CLASSIFIER.check(text)
}
