use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use super::responder::ChatResponder;
use crate::core::config::ResolvedConfig;

/// Stand-in assistant: sleeps for `delay`, then answers with `text`
/// regardless of the prompt.
pub struct CannedResponder {
    delay: Duration,
    text: String,
}

impl CannedResponder {
    pub fn new(delay: Duration, text: impl Into<String>) -> Self {
        Self {
            delay,
            text: text.into(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.reply_delay, config.reply_text.clone())
    }
}

#[async_trait]
impl ChatResponder for CannedResponder {
    fn name(&self) -> &str {
        "canned"
    }

    async fn reply(&self, prompt: &str) -> String {
        debug!("Canned reply in {:?} to {:?}", self.delay, prompt);
        tokio::time::sleep(self.delay).await;
        self.text.clone()
    }
}
