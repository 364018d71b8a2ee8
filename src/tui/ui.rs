//! Screen layout, hit testing and the top-level draw function.
//!
//! ```text
//! ┌ title ─────────────────────────────────────────────────────┐
//! │ tree (TREE_WIDTH) │ editor (fill)       │ chat (CHAT_WIDTH)│
//! │                   │                     │   transcript     │
//! │                   │                     │   input          │
//! ├ handle ────────────────────────────────────────────────────┤
//! │ tabs                                                       │
//! │ output                                                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::widgets::Block;

use crate::core::panel::BottomTab;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::bottom_bar::{self, tab_at};
use crate::tui::components::chat_input;
use crate::tui::components::{BottomBar, ChatPanel, Editor, FileTree, NewItemDialog, TitleBar};
use crate::tui::palette::Palette;
use crate::tui::{Focus, TuiState};

pub const TREE_WIDTH: u16 = 28;
pub const CHAT_WIDTH: u16 = 40;

/// Screen areas of the last frame, kept for mouse hit testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Regions {
    pub title: Rect,
    pub tree: Rect,
    pub editor: Rect,
    pub chat_log: Rect,
    pub chat_input: Rect,
    pub bottom: Rect,
    pub handle: Rect,
    pub tabs: Rect,
    pub output: Rect,
}

pub fn compute_regions(area: Rect, bottom_height: u16) -> Regions {
    use Constraint::{Length, Min};
    let [title, main, bottom] = Layout::vertical([Length(1), Min(0), Length(bottom_height)]).areas(area);
    let [tree, editor, chat] =
        Layout::horizontal([Length(TREE_WIDTH), Min(0), Length(CHAT_WIDTH)]).areas(main);
    let [chat_log, chat_input] = Layout::vertical([Min(0), Length(chat_input::HEIGHT)]).areas(chat);
    let [handle, tabs, output] = bottom_bar::split(bottom);
    Regions {
        title,
        tree,
        editor,
        chat_log,
        chat_input,
        bottom,
        handle,
        tabs,
        output,
    }
}

/// What a mouse position points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Visible tree row, counted from the first row of the forest.
    TreeRow(usize),
    /// Tree pane outside any row (borders, empty space).
    Tree,
    Editor,
    ChatLog,
    ChatInput,
    Handle,
    Tab(BottomTab),
    Output,
}

/// Area inside a one-cell border.
fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

pub fn hit_test(regions: &Regions, col: u16, row: u16, tree_offset: usize) -> Option<Hit> {
    let pos = Position::new(col, row);
    if regions.tree.contains(pos) {
        let rows = inner(regions.tree);
        if rows.contains(pos) {
            return Some(Hit::TreeRow((row - rows.y) as usize + tree_offset));
        }
        return Some(Hit::Tree);
    }
    if regions.editor.contains(pos) {
        return Some(Hit::Editor);
    }
    if regions.chat_log.contains(pos) {
        return Some(Hit::ChatLog);
    }
    if regions.chat_input.contains(pos) {
        return Some(Hit::ChatInput);
    }
    if regions.handle.contains(pos) {
        return Some(Hit::Handle);
    }
    if regions.tabs.contains(pos) {
        return tab_at(col, regions.tabs).map(Hit::Tab);
    }
    if regions.output.contains(pos) {
        return Some(Hit::Output);
    }
    None
}

/// Text position (line, display column) of a click in the editor pane.
pub fn editor_position(editor: Rect, col: u16, row: u16, scroll: usize, gutter: u16) -> (usize, usize) {
    let text = inner(editor);
    let line = row.saturating_sub(text.y) as usize + scroll;
    let column = col.saturating_sub(text.x + gutter) as usize;
    (line, column)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let palette = Palette::for_theme(app.theme);
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    let regions = compute_regions(area, app.panel.effective_height(area.height));
    tui.regions = regions;
    let modal = tui.dialog.is_some();
    let focus = tui.focus;
    let focused = |pane: Focus| !modal && focus == pane;

    TitleBar::new(app.status_message.clone(), app.chat.pending_replies(), app.theme)
        .render(frame, regions.title, &palette);

    let tree_focused = focused(Focus::Tree);
    FileTree {
        state: &mut tui.file_tree,
        forest: &app.forest,
        selected: app.selected.as_ref().map(|s| s.id),
        focused: tree_focused,
    }
    .render(frame, regions.tree, &palette);

    let editor_focused = focused(Focus::Editor);
    tui.editor.sync(app.selected_key(), app.selected_content());
    Editor {
        state: &mut tui.editor,
        focused: editor_focused,
    }
    .render(frame, regions.editor, &palette);

    let chat_focused = focused(Focus::Chat);
    ChatPanel {
        state: &mut tui.chat_panel,
        turns: app.chat.turns(),
        pending_replies: app.chat.pending_replies(),
        focused: chat_focused,
    }
    .render(frame, regions.chat_log, &palette);
    tui.chat_input.focused = chat_focused;
    tui.chat_input.render(frame, regions.chat_input, &palette);

    BottomBar {
        output: &app.output,
        tab: app.panel.tab,
        resizing: app.panel.is_resizing(),
    }
    .render(frame, regions.bottom, &palette);

    if let Some(dialog) = &tui.dialog {
        NewItemDialog { state: dialog }.render(frame, area, &palette);
    }
}
