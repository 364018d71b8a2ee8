//! # Application State
//!
//! Core business state for the IDE. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── forest: Forest                // file tree (copy-on-write)
//! ├── documents: DocumentStore      // path → text
//! ├── selected: Option<Selection>   // file open in the editor
//! ├── chat: ChatLog                 // transcript + replies in flight
//! ├── output: RunOutput             // last simulated run
//! ├── panel: BottomPanel            // height, tab, resize state
//! ├── theme: Theme
//! ├── reply_delay / reply_text      // canned assistant settings
//! └── status_message: String        // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::time::Duration;

use crate::core::chat::ChatLog;
use crate::core::config::ResolvedConfig;
use crate::core::documents::DocumentStore;
use crate::core::panel::BottomPanel;
use crate::core::run::RunOutput;
use crate::core::theme::Theme;
use crate::core::tree::{Forest, NodeId};

/// The file open in the editor.
///
/// Tracked by id so two files with the same name stay distinct. The key is
/// resolved from the node's path when it is selected and kept afterwards,
/// even if the node is later deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: NodeId,
    pub key: String,
}

/// Result of clicking a tree row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    SelectedFile(Selection),
    FolderToggled { expanded: bool },
}

pub struct App {
    pub forest: Forest,
    pub documents: DocumentStore,
    pub selected: Option<Selection>,
    pub chat: ChatLog,
    pub output: RunOutput,
    pub panel: BottomPanel,
    pub theme: Theme,
    pub reply_delay: Duration,
    pub reply_text: String,
    pub status_message: String,
}

impl Default for App {
    fn default() -> Self {
        Self::from_config(&ResolvedConfig::default())
    }
}

impl App {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            forest: Forest::seed(),
            documents: DocumentStore::seed(),
            selected: None,
            chat: ChatLog::new(),
            output: RunOutput::default(),
            panel: BottomPanel::new(
                config.bottom_bar_height,
                config.min_bottom_height,
                config.min_top_height,
            ),
            theme: config.theme,
            reply_delay: config.reply_delay,
            reply_text: config.reply_text.clone(),
            status_message: String::from("Select a file to edit"),
        }
    }

    /// Clicking a file selects it; clicking a folder toggles it and keeps
    /// the current selection. `None` when the id is not in the tree.
    pub fn click_node(&mut self, id: NodeId) -> Option<ClickOutcome> {
        if self.forest.find(id)?.is_folder() {
            self.forest = self.forest.toggle_folder(id);
            let expanded = self.forest.find(id).is_some_and(|n| n.is_expanded());
            return Some(ClickOutcome::FolderToggled { expanded });
        }
        let key = self.forest.document_key(id)?;
        let selection = Selection { id, key };
        self.selected = Some(selection.clone());
        Some(ClickOutcome::SelectedFile(selection))
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.key.as_str())
    }

    /// Text of the selected file; `None` when nothing is selected.
    pub fn selected_content(&self) -> Option<&str> {
        self.selected_key().map(|key| self.documents.content(key))
    }
}
