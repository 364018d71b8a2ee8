use std::sync::{Arc, mpsc};

use async_trait::async_trait;
use log::{info, warn};
use tokio::task::JoinHandle;

use crate::core::action::Action;

#[async_trait]
pub trait ChatResponder: Send + Sync {
    /// Returns the name of the responder.
    fn name(&self) -> &str;

    /// Produces the assistant's answer to `prompt`. Never fails.
    async fn reply(&self, prompt: &str) -> String;
}

/// Runs one deferred reply on the tokio runtime and sends
/// `Action::ReplyArrived` when it completes.
///
/// Every call is its own task. Nothing keeps the handle around in the event
/// loop, so replies cannot be cancelled and overlapping ones all arrive.
pub fn spawn_reply(
    responder: Arc<dyn ChatResponder>,
    prompt: String,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Scheduling reply from {} ({} chars)", responder.name(), prompt.len());
    tokio::spawn(async move {
        let content = responder.reply(&prompt).await;
        if tx.send(Action::ReplyArrived(content)).is_err() {
            warn!("Failed to deliver reply: receiver dropped");
        }
    })
}
