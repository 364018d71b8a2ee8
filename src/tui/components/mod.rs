//! # TUI Components
//!
//! One file per pane of the IDE.
//!
//! ### Stateless components (props-based rendering)
//!
//! - `TitleBar`: status line at the top
//! - `Message`: a single chat bubble
//! - `BottomBar`: resize handle, output tabs and run output
//!
//! ### Stateful components (event-driven)
//!
//! These keep a persistent state in `TuiState` and are wrapped by a
//! transient renderer each frame:
//!
//! - `FileTreeState` / `FileTree`
//! - `EditorState` / `Editor`
//! - `ChatPanelState` / `ChatPanel`
//! - `ChatInput`
//! - `NewItemDialogState` / `NewItemDialog` (overlay)
//!
//! Components never touch `App` directly: data comes in as props and user
//! intent goes out as component events, which `tui::run` turns into
//! `Action`s.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── file_tree.rs
//! ├── editor.rs
//! ├── message.rs
//! ├── chat_panel.rs
//! ├── chat_input.rs
//! ├── bottom_bar.rs
//! └── new_item_dialog.rs
//! ```

pub mod bottom_bar;
pub mod chat_input;
pub mod chat_panel;
pub mod editor;
pub mod file_tree;
pub mod message;
pub mod new_item_dialog;
mod title_bar;

pub use bottom_bar::BottomBar;
pub use chat_input::{ChatInput, ChatInputEvent};
pub use chat_panel::{ChatPanel, ChatPanelState};
pub use editor::{Editor, EditorEvent, EditorState};
pub use file_tree::{FileTree, FileTreeEvent, FileTreeState};
pub use new_item_dialog::{DialogEvent, NewItemDialog, NewItemDialogState};
pub use title_bar::TitleBar;
