// src/relay/prompt.rs
// =============================================================================
// Builds the text sent to the completion API: a short instruction, the
// crawled website text, then the user's question.
// =============================================================================

use crate::crawl::Corpus;

pub fn build_prompt(assistant: &str, corpus: &Corpus, message: &str) -> String {
    format!(
        "You are a helpful assistant for {assistant}.\n\
         Use the website content below to answer the user's question.\n\
         \n\
         Website Content:\n\
         {corpus}\n\
         \n\
         Question:\n\
         {message}\n"
    )
}
