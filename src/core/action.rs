//! # Actions
//!
//! Everything that can happen in the IDE becomes an `Action`.
//! User clicks a tree row? That's `Action::ClickNode(id)`.
//! The assistant answers? That's `Action::ReplyArrived(text)`.
//!
//! The `update()` function takes the current state and an action and
//! mutates the state. No side effects here: anything that has to happen
//! later (a chat reply) is handed back as an `Effect` for the event loop.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```

use log::debug;

use crate::core::panel::BottomTab;
use crate::core::run;
use crate::core::state::{App, ClickOutcome};
use crate::core::tree::{ItemKind, NodeId};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Click on a tree row: selects files, toggles folders.
    ClickNode(NodeId),
    ToggleFolder(NodeId),
    DeleteItem(NodeId),
    CreateItem { name: String, kind: ItemKind },
    /// New full text for the selected document.
    EditDocument(String),
    RunCode,
    SubmitChat(String),
    ReplyArrived(String),
    SelectTab(BottomTab),
    CycleTab,
    BeginResize,
    ResizeTo { pointer_row: u16, screen_height: u16 },
    EndResize,
    ToggleTheme,
    Quit,
}

/// Work the event loop must do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Spawn a deferred assistant reply to this prompt.
    ScheduleReply(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::ClickNode(id) => {
            match app.click_node(id) {
                Some(ClickOutcome::SelectedFile(selection)) => {
                    app.status_message = format!("Editing {}", selection.key);
                }
                Some(ClickOutcome::FolderToggled { .. }) | None => {}
            }
            Effect::None
        }
        Action::ToggleFolder(id) => {
            app.forest = app.forest.toggle_folder(id);
            Effect::None
        }
        Action::DeleteItem(id) => {
            if let Some(node) = app.forest.find(id) {
                app.status_message = format!("Deleted {}", node.name);
                app.forest = app.forest.delete_item(id);
            }
            Effect::None
        }
        Action::CreateItem { name, kind } => {
            let (forest, id) = app.forest.insert_item(&name, kind);
            app.forest = forest;
            app.status_message = format!("Created {} {} ({})", kind.label().to_lowercase(), name, id);
            Effect::None
        }
        Action::EditDocument(text) => {
            if let Some(key) = app.selected.as_ref().map(|s| s.key.clone()) {
                app.documents.set_content(key, text);
            }
            Effect::None
        }
        Action::RunCode => {
            app.output = run::run(app.selected_key(), &app.documents);
            app.status_message = String::from("Code execution simulated");
            Effect::None
        }
        Action::SubmitChat(text) => {
            if app.chat.submit(&text) {
                app.status_message = String::from("Assistant is thinking...");
                Effect::ScheduleReply(text)
            } else {
                Effect::None
            }
        }
        Action::ReplyArrived(content) => {
            app.chat.receive_reply(content);
            if app.chat.pending_replies() == 0 {
                app.status_message = String::from("Assistant replied");
            }
            Effect::None
        }
        Action::SelectTab(tab) => {
            app.panel.tab = tab;
            Effect::None
        }
        Action::CycleTab => {
            app.panel.tab = app.panel.tab.next();
            Effect::None
        }
        Action::BeginResize => {
            app.panel.begin_resize();
            Effect::None
        }
        Action::ResizeTo {
            pointer_row,
            screen_height,
        } => {
            app.panel.drag_to(pointer_row, screen_height);
            Effect::None
        }
        Action::EndResize => {
            app.panel.end_resize();
            Effect::None
        }
        Action::ToggleTheme => {
            app.theme = app.theme.toggle();
            app.status_message = format!("Theme: {}", app.theme.label());
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::{CANNED_REPLY, ChatTurn, Role};
    use crate::core::theme::Theme;
    use crate::test_support::{node_named, test_app};

    #[test]
    fn test_select_edit_scenario() {
        let mut app = test_app();
        let index = node_named(&app, "index.js");

        update(&mut app, Action::ClickNode(index));
        assert_eq!(app.selected_content(), Some("// Write your code here"));
        assert_eq!(app.status_message, "Editing src/index.js");

        update(&mut app, Action::EditDocument("console.log(1)".to_string()));
        assert_eq!(app.selected_content(), Some("console.log(1)"));
        assert_eq!(app.documents.content("src/index.js"), "console.log(1)");
    }

    #[test]
    fn test_edit_without_selection_is_ignored() {
        let mut app = test_app();
        let before = app.documents.clone();
        update(&mut app, Action::EditDocument("lost".to_string()));
        assert_eq!(app.documents, before);
    }

    #[test]
    fn test_new_file_edits_as_empty_document() {
        let mut app = test_app();
        update(
            &mut app,
            Action::CreateItem {
                name: "main.rs".to_string(),
                kind: ItemKind::File,
            },
        );
        let id = node_named(&app, "main.rs");
        assert!(!app.documents.contains("main.rs"));

        update(&mut app, Action::ClickNode(id));
        assert_eq!(app.selected_content(), Some(""));

        update(&mut app, Action::EditDocument("fn main() {}".to_string()));
        assert_eq!(app.documents.content("main.rs"), "fn main() {}");
    }

    #[test]
    fn test_delete_keeps_documents() {
        let mut app = test_app();
        let src = node_named(&app, "src");
        update(&mut app, Action::DeleteItem(src));

        assert_eq!(app.forest.total_nodes(), 2);
        assert_eq!(app.documents.content("src/index.js"), "// Write your code here");
        assert_eq!(app.status_message, "Deleted src");
    }

    #[test]
    fn test_delete_selected_file_keeps_selection() {
        let mut app = test_app();
        let readme = node_named(&app, "README.md");
        update(&mut app, Action::ClickNode(readme));
        update(&mut app, Action::DeleteItem(readme));

        assert!(app.forest.find(readme).is_none());
        assert_eq!(app.selected_key(), Some("README.md"));
    }

    #[test]
    fn test_toggle_folder_action() {
        let mut app = test_app();
        let src = node_named(&app, "src");
        update(&mut app, Action::ToggleFolder(src));
        assert!(!app.forest.find(src).unwrap().is_expanded());

        let before = app.forest.clone();
        let readme = node_named(&app, "README.md");
        update(&mut app, Action::ToggleFolder(readme));
        assert_eq!(app.forest, before);
    }

    #[test]
    fn test_submit_schedules_reply() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SubmitChat("hello".to_string()));
        assert_eq!(effect, Effect::ScheduleReply("hello".to_string()));
        assert_eq!(
            app.chat.turns(),
            &[ChatTurn {
                role: Role::User,
                content: "hello".to_string()
            }]
        );

        update(&mut app, Action::ReplyArrived(CANNED_REPLY.to_string()));
        assert_eq!(app.chat.turns().len(), 2);
        assert_eq!(app.chat.turns()[1].role, Role::Assistant);
        assert_eq!(app.status_message, "Assistant replied");
    }

    #[test]
    fn test_blank_submit_has_no_effect() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SubmitChat("   ".to_string()));
        assert_eq!(effect, Effect::None);
        assert!(app.chat.turns().is_empty());
    }

    #[test]
    fn test_run_code_uses_selection() {
        let mut app = test_app();
        update(&mut app, Action::RunCode);
        assert_eq!(app.output.terminal, "$ node script.js\n> Code execution simulated");

        let css = node_named(&app, "styles.css");
        update(&mut app, Action::ClickNode(css));
        update(&mut app, Action::RunCode);
        assert_eq!(app.output.console, "Running code...\n/* Write your styles here */");
        assert!(app.output.terminal.starts_with("$ node src/styles.css"));
    }

    #[test]
    fn test_resize_actions() {
        let mut app = test_app();
        update(&mut app, Action::ResizeTo { pointer_row: 10, screen_height: 40 });
        assert_eq!(app.panel.height, 10, "ignored before BeginResize");

        update(&mut app, Action::BeginResize);
        update(&mut app, Action::ResizeTo { pointer_row: 22, screen_height: 40 });
        update(&mut app, Action::EndResize);
        assert_eq!(app.panel.height, 18);
        assert!(!app.panel.is_resizing());
    }

    #[test]
    fn test_tabs_and_theme() {
        let mut app = test_app();
        update(&mut app, Action::CycleTab);
        assert_eq!(app.panel.tab, BottomTab::Console);
        update(&mut app, Action::SelectTab(BottomTab::Terminal));
        assert_eq!(app.panel.tab, BottomTab::Terminal);

        update(&mut app, Action::ToggleTheme);
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.status_message, "Theme: light");
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
