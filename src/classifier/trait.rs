use anyhow::Result;

/// A chat-style language model that answers a single prompt with raw text.
///
/// This is the seam for the external provider: transport, auth, and timeout
/// live behind it, and callers that want retry policy wrap it.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
