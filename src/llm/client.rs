use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;

pub const SUMMARY_FAILED: &str =
    "Error generating content. Please check your API key and connection.";
pub const SUMMARY_EMPTY: &str = "Failed to generate summary.";
pub const ANSWER_FAILED: &str = "Sorry, I encountered an error while processing your question.";
pub const ANSWER_EMPTY: &str = "I couldn't generate an answer at this time.";
pub const EMAIL_FAILED: &str = "Error generating follow-up email. Please try again.";

/// One prompt in, one markdown response out.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Arc<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "gemini" => Ok(Arc::new(GeminiClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: gemini",
            other
        ),
    }
}

/// How a generation call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    Generated,
    /// The model answered with blank text
    Empty,
    /// The provider call errored
    Failed,
}

/// Model output, or the placeholder shown in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub outcome: GenerationOutcome,
}

impl Generation {
    /// Whether `text` came from the model rather than a placeholder.
    pub fn is_generated(&self) -> bool {
        self.outcome == GenerationOutcome::Generated
    }
}

/// Best-effort wrapper: provider errors become fixed placeholder text.
#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn LlmProvider>,
}

impl GenerationClient {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(build_provider(settings)?))
    }

    /// Summary generation. Failures carry [`SUMMARY_FAILED`] or [`SUMMARY_EMPTY`].
    pub async fn generate(&self, prompt: &str) -> Generation {
        self.call("summary", prompt, SUMMARY_FAILED, SUMMARY_EMPTY)
            .await
    }

    /// Transcript Q&A. Returns [`ANSWER_FAILED`] on any error.
    pub async fn answer(&self, prompt: &str) -> String {
        self.call("question", prompt, ANSWER_FAILED, ANSWER_EMPTY)
            .await
            .text
    }

    /// Follow-up email draft. Returns [`EMAIL_FAILED`] on any error.
    pub async fn draft_email(&self, prompt: &str) -> String {
        self.call("follow-up email", prompt, EMAIL_FAILED, EMAIL_FAILED)
            .await
            .text
    }

    async fn call(&self, what: &str, prompt: &str, on_error: &str, on_empty: &str) -> Generation {
        info!("Generating {} ({} prompt chars)", what, prompt.len());

        let (text, outcome) = match self.provider.generate(prompt).await {
            Ok(text) if text.trim().is_empty() => (on_empty.to_string(), GenerationOutcome::Empty),
            Ok(text) => (text, GenerationOutcome::Generated),
            Err(e) => {
                error!("Gemini generation error ({}): {:#}", what, e);
                (on_error.to_string(), GenerationOutcome::Failed)
            }
        };
        Generation { text, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    struct Failing;

    #[async_trait]
    impl LlmProvider for Failing {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            anyhow::bail!("connection reset")
        }
    }

    struct Fixed(&'static str);

    #[async_trait]
    impl LlmProvider for Fixed {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn unsupported_provider_returns_error() {
        let mut settings = Settings::default();
        settings.llm.provider = "unknown".to_string();

        let err = match build_provider(&settings) {
            Ok(_) => panic!("expected provider creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("Unsupported llm.provider"));
    }

    #[test]
    fn gemini_provider_requires_api_key() {
        let settings = Settings::default();

        let err = match build_provider(&settings) {
            Ok(_) => panic!("expected provider creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("Gemini API key is missing"));
    }

    #[tokio::test]
    async fn provider_errors_become_placeholders() {
        let client = GenerationClient::new(Arc::new(Failing));

        let generation = client.generate("p").await;
        assert_eq!(generation.text, SUMMARY_FAILED);
        assert_eq!(generation.outcome, GenerationOutcome::Failed);
        assert_eq!(client.answer("p").await, ANSWER_FAILED);
        assert_eq!(client.draft_email("p").await, EMAIL_FAILED);
    }

    #[tokio::test]
    async fn blank_responses_become_placeholders() {
        let client = GenerationClient::new(Arc::new(Fixed("  \n")));

        let generation = client.generate("p").await;
        assert_eq!(generation.text, SUMMARY_EMPTY);
        assert_eq!(generation.outcome, GenerationOutcome::Empty);
        assert_eq!(client.answer("p").await, ANSWER_EMPTY);
    }

    #[tokio::test]
    async fn text_passes_through_unchanged() {
        let client = GenerationClient::new(Arc::new(Fixed("# General Summary\n")));
        let generation = client.generate("p").await;
        assert_eq!(generation.text, "# General Summary\n");
        assert!(generation.is_generated());
    }

    #[tokio::test]
    async fn model_text_matching_a_placeholder_still_counts_as_generated() {
        let client = GenerationClient::new(Arc::new(Fixed(SUMMARY_EMPTY)));
        assert!(client.generate("p").await.is_generated());
    }
}
