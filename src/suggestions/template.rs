//! Fixed-template suggestions, no model behind them

use super::{SuggestionError, SuggestionKind, SuggestionProvider};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateSuggester;

impl TemplateSuggester {
    pub fn new() -> Self {
        Self
    }

    fn render(kind: SuggestionKind, prompt: &str) -> String {
        match (kind, prompt.is_empty()) {
            (SuggestionKind::Title, false) => format!("{}: A New Perspective", prompt),
            (SuggestionKind::Title, true) => "The Future of AI in Content Creation".to_string(),
            (SuggestionKind::Content, false) => {
                format!("Here's an introduction for your topic on {}", prompt)
            }
            (SuggestionKind::Content, true) => "Artificial Intelligence is revolutionizing how we create and consume digital content.".to_string(),
            (SuggestionKind::Improvement, false) => format!(
                "To enhance your content on {}, consider adding specific examples",
                prompt
            ),
            (SuggestionKind::Improvement, true) => {
                "Consider adding more specific examples to illustrate your points.".to_string()
            }
        }
    }
}

#[async_trait]
impl SuggestionProvider for TemplateSuggester {
    async fn suggest(&self, kind: SuggestionKind, prompt: &str) -> Result<String, SuggestionError> {
        Ok(Self::render(kind, prompt))
    }

    fn name(&self) -> &'static str {
        "template"
    }
}
