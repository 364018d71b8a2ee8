//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the IDE and
//! translates keyboard and mouse input into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event flow
//!
//! ```text
//! crossterm Event → TuiEvent → route_event() → [Action] → update() → Effect
//!                                                              │
//!                 rx.try_recv() ← Action::ReplyArrived ← spawn_reply()
//! ```
//!
//! ## Redraw Strategy
//!
//! The loop only draws after input or an arriving action. While replies are
//! in flight it polls more often so they show up promptly; otherwise it
//! sleeps up to 500ms between polls.

pub mod component;
pub mod components;
pub mod event;
pub mod highlight;
pub mod palette;
pub mod text_edit;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;

use crate::assistant::{CannedResponder, ChatResponder, spawn_reply};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::editor::gutter_width;
use crate::tui::components::{
    ChatInput, ChatInputEvent, ChatPanelState, DialogEvent, EditorEvent, EditorState,
    FileTreeEvent, FileTreeState, NewItemDialogState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::{Hit, Regions, editor_position, hit_test};

const IDLE_POLL: Duration = Duration::from_millis(500);
const BUSY_POLL: Duration = Duration::from_millis(50);

/// Pane that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Tree,
    Editor,
    Chat,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Tree => Focus::Editor,
            Focus::Editor => Focus::Chat,
            Focus::Chat => Focus::Tree,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub file_tree: FileTreeState,
    pub editor: EditorState,
    pub chat_panel: ChatPanelState,
    pub chat_input: ChatInput,
    /// New item overlay (None = hidden)
    pub dialog: Option<NewItemDialogState>,
    /// Areas of the last drawn frame
    pub regions: Regions,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Tree,
            file_tree: FileTreeState::new(),
            editor: EditorState::new(),
            chat_panel: ChatPanelState::new(),
            chat_input: ChatInput::new(),
            dialog: None,
            regions: Regions::default(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty protocol is ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Turns one input event into the actions it stands for, updating
/// presentation state (focus, cursors, dialog) along the way.
///
/// `screen` is the full terminal area; `tui.regions` must hold the layout
/// of the last drawn frame.
pub fn route_event(tui: &mut TuiState, app: &App, event: TuiEvent, screen: Rect) -> Vec<Action> {
    match event {
        TuiEvent::Resize => return vec![],
        TuiEvent::ForceQuit => return vec![Action::Quit],
        _ => {}
    }

    // A drag in progress owns the mouse until the button is released
    if app.panel.is_resizing() {
        match event {
            TuiEvent::MouseDrag(_, row) | TuiEvent::MouseMove(_, row) => {
                return vec![Action::ResizeTo {
                    pointer_row: row,
                    screen_height: screen.height,
                }];
            }
            TuiEvent::MouseUp(..) => return vec![Action::EndResize],
            _ => {}
        }
    }

    if let Some(dialog) = tui.dialog.as_mut() {
        match dialog.handle_event(&event) {
            Some(DialogEvent::Create { name, kind }) => {
                tui.dialog = None;
                return vec![Action::CreateItem { name, kind }];
            }
            Some(DialogEvent::Dismiss) => tui.dialog = None,
            None => {}
        }
        return vec![];
    }

    match event {
        TuiEvent::OpenNewItem => {
            tui.dialog = Some(NewItemDialogState::new());
            vec![]
        }
        TuiEvent::RunCode => vec![Action::RunCode],
        TuiEvent::CycleTab => vec![Action::CycleTab],
        TuiEvent::ToggleTheme => vec![Action::ToggleTheme],
        TuiEvent::FocusNext => {
            tui.focus = tui.focus.next();
            vec![]
        }
        TuiEvent::MouseDown(col, row) => route_click(tui, col, row),
        TuiEvent::ScrollUp(col, row) | TuiEvent::ScrollDown(col, row) => {
            match hit_test(&tui.regions, col, row, tui.file_tree.offset()) {
                Some(Hit::Tree | Hit::TreeRow(_)) => {
                    tui.file_tree.handle_event(&event);
                }
                Some(Hit::Editor) => {
                    tui.editor.handle_event(&event);
                }
                Some(Hit::ChatLog) => {
                    tui.chat_panel.handle_event(&event);
                }
                _ => {}
            }
            vec![]
        }
        TuiEvent::MouseDrag(..) | TuiEvent::MouseUp(..) | TuiEvent::MouseMove(..) => vec![],
        _ => route_key(tui, &event),
    }
}

fn route_click(tui: &mut TuiState, col: u16, row: u16) -> Vec<Action> {
    let Some(hit) = hit_test(&tui.regions, col, row, tui.file_tree.offset()) else {
        return vec![];
    };
    debug!("Click at ({}, {}) hit {:?}", col, row, hit);
    match hit {
        Hit::TreeRow(index) => {
            tui.focus = Focus::Tree;
            match tui.file_tree.click_row(index) {
                Some(FileTreeEvent::Click(id)) => vec![Action::ClickNode(id)],
                _ => vec![],
            }
        }
        Hit::Tree => {
            tui.focus = Focus::Tree;
            vec![]
        }
        Hit::Editor => {
            tui.focus = Focus::Editor;
            let lines = tui.editor.buffer.matches('\n').count() + 1;
            let (line, column) = editor_position(
                tui.regions.editor,
                col,
                row,
                tui.editor.scroll(),
                gutter_width(lines),
            );
            tui.editor.place_cursor(line, column);
            vec![]
        }
        Hit::ChatLog | Hit::ChatInput => {
            tui.focus = Focus::Chat;
            vec![]
        }
        Hit::Handle => vec![Action::BeginResize],
        Hit::Tab(tab) => vec![Action::SelectTab(tab)],
        Hit::Output => vec![],
    }
}

fn route_key(tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    match tui.focus {
        Focus::Tree => match tui.file_tree.handle_event(event) {
            Some(FileTreeEvent::Click(id)) => vec![Action::ClickNode(id)],
            Some(FileTreeEvent::Delete(id)) => vec![Action::DeleteItem(id)],
            None => vec![],
        },
        Focus::Editor => match tui.editor.handle_event(event) {
            Some(EditorEvent::Changed(text)) => vec![Action::EditDocument(text)],
            None => vec![],
        },
        Focus::Chat => match tui.chat_input.handle_event(event) {
            Some(ChatInputEvent::Submit(text)) => vec![Action::SubmitChat(text)],
            None => vec![],
        },
    }
}

/// Applies an action and performs its effect. Returns `true` on quit.
fn apply(
    app: &mut App,
    action: Action,
    responder: &Arc<dyn ChatResponder>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::ScheduleReply(prompt) => {
            spawn_reply(responder.clone(), prompt, tx.clone());
            false
        }
        Effect::None => false,
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let responder: Arc<dyn ChatResponder> = Arc::new(CannedResponder::from_config(&config));
    info!("Using {} responder", responder.name());

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    if let Err(e) = &terminal_mode_guard {
        warn!("Could not enable terminal modes: {}", e);
    }

    let result = event_loop(&mut terminal, &mut app, responder);

    drop(terminal_mode_guard);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    responder: Arc<dyn ChatResponder>,
) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    // Channel for actions from reply tasks
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.chat.pending_replies() > 0 {
            BUSY_POLL
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout)?;

        // Process first event + drain all pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        let pending = std::iter::from_fn(|| poll_event_immediate().ok().flatten());
        for event in first_event.into_iter().chain(pending) {
            let screen = terminal.get_frame().area();
            for action in route_event(&mut tui, app, event, screen) {
                should_quit |= apply(app, action, &responder, &tx);
            }
        }

        if should_quit {
            info!("Quit requested");
            break;
        }

        // Replies that finished since the last pass
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            apply(app, action, &responder, &tx);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::panel::BottomTab;
    use crate::core::tree::ItemKind;
    use crate::test_support::{node_named, test_app};
    use crate::tui::ui::compute_regions;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 120,
        height: 32,
    };

    fn laid_out() -> TuiState {
        let mut tui = TuiState::new();
        tui.regions = compute_regions(SCREEN, 10);
        tui.file_tree.sync(&test_app().forest);
        tui
    }

    /// Routes every event and applies the resulting actions.
    fn drive(tui: &mut TuiState, app: &mut App, events: Vec<TuiEvent>) -> Vec<Effect> {
        let mut effects = Vec::new();
        for event in events {
            for action in route_event(tui, app, event, SCREEN) {
                effects.push(update(app, action));
            }
        }
        effects
    }

    #[test]
    fn test_focus_cycles() {
        let mut tui = laid_out();
        let app = test_app();
        for expected in [Focus::Editor, Focus::Chat, Focus::Tree] {
            route_event(&mut tui, &app, TuiEvent::FocusNext, SCREEN);
            assert_eq!(tui.focus, expected);
        }
    }

    #[test]
    fn test_click_tree_row_selects_file() {
        let mut tui = laid_out();
        let mut app = test_app();
        // row 0 is src, row 1 is index.js
        drive(&mut tui, &mut app, vec![TuiEvent::MouseDown(5, 3)]);
        assert_eq!(app.selected_key(), Some("src/index.js"));
        assert_eq!(tui.focus, Focus::Tree);
    }

    #[test]
    fn test_drag_handle_resizes_panel() {
        let mut tui = laid_out();
        let mut app = test_app();
        let handle_row = tui.regions.handle.y;
        drive(
            &mut tui,
            &mut app,
            vec![
                TuiEvent::MouseDown(10, handle_row),
                TuiEvent::MouseDrag(10, 16),
                TuiEvent::MouseUp(10, 16),
                TuiEvent::MouseDrag(10, 2),
            ],
        );
        assert_eq!(app.panel.height, 16);
        assert!(!app.panel.is_resizing());
    }

    #[test]
    fn test_tab_click_and_shortcuts() {
        let mut tui = laid_out();
        let mut app = test_app();
        let tabs_row = tui.regions.tabs.y;
        drive(&mut tui, &mut app, vec![TuiEvent::MouseDown(13, tabs_row)]);
        assert_eq!(app.panel.tab, BottomTab::Console);
        drive(&mut tui, &mut app, vec![TuiEvent::CycleTab]);
        assert_eq!(app.panel.tab, BottomTab::Terminal);
        let effects = drive(&mut tui, &mut app, vec![TuiEvent::ForceQuit]);
        assert_eq!(effects, vec![Effect::Quit]);
    }

    #[test]
    fn test_chat_submit_schedules_reply() {
        let mut tui = laid_out();
        let mut app = test_app();
        tui.focus = Focus::Chat;
        let mut events: Vec<TuiEvent> = "hi".chars().map(TuiEvent::InputChar).collect();
        events.push(TuiEvent::Submit);
        let effects = drive(&mut tui, &mut app, events);
        assert_eq!(effects, vec![Effect::ScheduleReply("hi".to_string())]);
        assert_eq!(app.chat.turns().len(), 1);
        assert_eq!(app.chat.pending_replies(), 1);
    }

    #[test]
    fn test_editor_typing_updates_document() {
        let mut tui = laid_out();
        let mut app = test_app();
        let readme = node_named(&app, "README.md");
        update(&mut app, Action::ClickNode(readme));
        tui.editor.sync(app.selected_key(), app.selected_content());
        tui.focus = Focus::Editor;
        drive(&mut tui, &mut app, vec![TuiEvent::Paste("# Title".to_string())]);
        assert_eq!(app.documents.content("README.md"), "# Title");
    }

    #[test]
    fn test_new_item_dialog_flow() {
        let mut tui = laid_out();
        let mut app = test_app();
        let before = app.forest.len();
        let mut events = vec![TuiEvent::OpenNewItem];
        events.extend("lib".chars().map(TuiEvent::InputChar));
        events.push(TuiEvent::CursorDown);
        // focus shortcut is swallowed while the dialog is open
        events.push(TuiEvent::FocusNext);
        events.push(TuiEvent::Submit);
        drive(&mut tui, &mut app, events);
        assert!(tui.dialog.is_none());
        assert_eq!(tui.focus, Focus::Tree);
        assert_eq!(app.forest.len(), before + 1);
        let lib = node_named(&app, "lib");
        assert_eq!(app.forest.find(lib).map(|n| n.item_kind()), Some(ItemKind::Folder));
    }

    #[test]
    fn test_dialog_escape_creates_nothing() {
        let mut tui = laid_out();
        let mut app = test_app();
        let before = app.forest.total_nodes();
        drive(
            &mut tui,
            &mut app,
            vec![TuiEvent::OpenNewItem, TuiEvent::InputChar('x'), TuiEvent::Escape],
        );
        assert!(tui.dialog.is_none());
        assert_eq!(app.forest.total_nodes(), before);
    }

    #[test]
    fn test_dialog_creates_item_with_empty_name() {
        let mut tui = laid_out();
        let mut app = test_app();
        let before = app.forest.len();
        drive(&mut tui, &mut app, vec![TuiEvent::OpenNewItem, TuiEvent::Submit]);
        assert!(tui.dialog.is_none());
        assert_eq!(app.forest.len(), before + 1);
        let last = app.forest.roots().last().map(|n| n.name.clone());
        assert_eq!(last.as_deref(), Some(""));
    }

    #[test]
    fn test_tree_delete_key() {
        let mut tui = laid_out();
        let mut app = test_app();
        // cursor starts on src; deleting it removes the folder and its children
        drive(&mut tui, &mut app, vec![TuiEvent::Delete]);
        assert_eq!(app.forest.total_nodes(), 2);
    }
}
