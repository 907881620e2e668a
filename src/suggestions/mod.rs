//! Writing suggestions
//!
//! Handlers only see the `SuggestionProvider` trait, so a real text-generation
//! backend can replace `TemplateSuggester` without touching the HTTP contract.

pub mod template;

pub use template::TemplateSuggester;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Title,
    Content,
    Improvement,
}

impl SuggestionKind {
    /// Parse the request's `type` field; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(Self::Title),
            "content" => Some(Self::Content),
            "improvement" => Some(Self::Improvement),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Provider error: {0}")]
    Provider(String),
}

#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, kind: SuggestionKind, prompt: &str) -> Result<String, SuggestionError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(SuggestionKind::parse("title"), Some(SuggestionKind::Title));
        assert_eq!(SuggestionKind::parse("improvement"), Some(SuggestionKind::Improvement));
        assert_eq!(SuggestionKind::parse("Title"), None);
        assert_eq!(SuggestionKind::parse(""), None);
    }
}
