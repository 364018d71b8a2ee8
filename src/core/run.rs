//! Simulated code execution. Nothing is executed: the selected document is
//! echoed into the console and the terminal shows a fake invocation line.

use crate::core::documents::DocumentStore;

/// Script name the terminal shows when no file is selected.
const FALLBACK_SCRIPT: &str = "script.js";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    pub console: String,
    pub terminal: String,
}

pub fn run(selected_key: Option<&str>, store: &DocumentStore) -> RunOutput {
    let source = selected_key.map(|key| store.content(key)).unwrap_or("");
    RunOutput {
        console: format!("Running code...\n{source}"),
        terminal: format!(
            "$ node {}\n> Code execution simulated",
            selected_key.unwrap_or(FALLBACK_SCRIPT)
        ),
    }
}
