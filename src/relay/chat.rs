// src/relay/chat.rs
// =============================================================================
// Answers user questions with the crawled corpus as grounding context.
//
// The relay holds its own clone of the Corpus (an Arc), never writes to it,
// and can be shared between any number of concurrent askers.
// =============================================================================

use tracing::info;

use crate::crawl::Corpus;
use crate::error::RelayError;
use crate::relay::gemini::GeminiClient;
use crate::relay::prompt::build_prompt;

#[derive(Debug, Clone)]
pub struct ChatRelay {
    corpus: Corpus,
    client: GeminiClient,
    assistant: String,
}

impl ChatRelay {
    pub fn new(corpus: Corpus, client: GeminiClient, assistant: impl Into<String>) -> Self {
        Self {
            corpus,
            client,
            assistant: assistant.into(),
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub async fn reply(&self, message: &str) -> Result<String, RelayError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(RelayError::EmptyMessage);
        }

        info!(model = %self.client.model(), "answering question");

        let prompt = build_prompt(&self.assistant, &self.corpus, message);
        self.client.generate(&prompt).await
    }
}
