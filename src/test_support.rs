//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::assistant::ChatResponder;
use crate::core::state::App;
use crate::core::tree::NodeId;

/// A responder that answers immediately, echoing the prompt.
pub struct EchoResponder;

#[async_trait]
impl ChatResponder for EchoResponder {
    fn name(&self) -> &str {
        "echo"
    }

    async fn reply(&self, prompt: &str) -> String {
        format!("echo: {prompt}")
    }
}

/// Creates a test App with the seeded project and default config.
pub fn test_app() -> App {
    App::default()
}

/// Id of the first node with this name. Panics if there is none.
pub fn node_named(app: &App, name: &str) -> NodeId {
    app.forest
        .ids()
        .into_iter()
        .find(|id| app.forest.find(*id).is_some_and(|n| n.name == name))
        .unwrap_or_else(|| panic!("no node named {name}"))
}
