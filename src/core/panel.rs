//! # Bottom Panel
//!
//! Terminal/console area under the editor. Its height is in terminal rows
//! and changes by dragging the handle row at its top edge.
//!
//! ```text
//!            mouse down on handle
//! NotResizing ────────────────────▶ Resizing ──┐ drag_to(row)
//!      ▲                               │  ◀────┘
//!      └──────── mouse up anywhere ────┘
//! ```
//!
//! While `Resizing`, the event loop forwards every mouse move, drag and
//! release to the panel, wherever the pointer is. Outside a resize those
//! events never reach it.

pub const DEFAULT_BOTTOM_HEIGHT: u16 = 10;
/// Panel never shrinks below this.
pub const DEFAULT_MIN_BOTTOM_HEIGHT: u16 = 5;
/// Rows kept for the panes above the panel.
pub const DEFAULT_MIN_TOP_HEIGHT: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BottomTab {
    #[default]
    Terminal,
    Console,
}

impl BottomTab {
    pub const ALL: [BottomTab; 2] = [BottomTab::Terminal, BottomTab::Console];

    pub fn label(self) -> &'static str {
        match self {
            BottomTab::Terminal => "Terminal",
            BottomTab::Console => "Console",
        }
    }

    pub fn next(self) -> Self {
        match self {
            BottomTab::Terminal => BottomTab::Console,
            BottomTab::Console => BottomTab::Terminal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeState {
    #[default]
    NotResizing,
    Resizing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BottomPanel {
    pub height: u16,
    pub tab: BottomTab,
    resize: ResizeState,
    min_height: u16,
    min_top: u16,
}

impl Default for BottomPanel {
    fn default() -> Self {
        Self::new(DEFAULT_BOTTOM_HEIGHT, DEFAULT_MIN_BOTTOM_HEIGHT, DEFAULT_MIN_TOP_HEIGHT)
    }
}

impl BottomPanel {
    pub fn new(height: u16, min_height: u16, min_top: u16) -> Self {
        Self {
            height: height.max(min_height),
            tab: BottomTab::default(),
            resize: ResizeState::NotResizing,
            min_height,
            min_top,
        }
    }

    pub fn is_resizing(&self) -> bool {
        self.resize == ResizeState::Resizing
    }

    pub fn begin_resize(&mut self) {
        self.resize = ResizeState::Resizing;
    }

    pub fn end_resize(&mut self) {
        self.resize = ResizeState::NotResizing;
    }

    /// Follows the pointer while resizing. Returns `true` if the height changed.
    pub fn drag_to(&mut self, pointer_row: u16, screen_height: u16) -> bool {
        if !self.is_resizing() {
            return false;
        }
        let height = clamp_height(pointer_row, screen_height, self.min_height, self.min_top);
        let changed = height != self.height;
        self.height = height;
        changed
    }

    /// Height that actually fits on a screen of `screen_height` rows.
    pub fn effective_height(&self, screen_height: u16) -> u16 {
        self.height
            .min(screen_height.saturating_sub(self.min_top))
            .max(self.min_height)
            .min(screen_height)
    }
}

/// Panel height for a pointer at `pointer_row`: everything below the pointer,
/// capped so the top panes keep `min_top` rows. The minimum wins when the
/// screen is too small for both.
pub fn clamp_height(pointer_row: u16, screen_height: u16, min_height: u16, min_top: u16) -> u16 {
    let wanted = screen_height.saturating_sub(pointer_row);
    let max = screen_height.saturating_sub(min_top);
    wanted.min(max).max(min_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_height() {
        // 40 row screen, pointer at row 25 → 15 rows below
        assert_eq!(clamp_height(25, 40, 5, 8), 15);
        // dragged near the bottom → minimum
        assert_eq!(clamp_height(39, 40, 5, 8), 5);
        // dragged to the top → leave 8 rows for the panes
        assert_eq!(clamp_height(0, 40, 5, 8), 32);
        // tiny screen: minimum beats the top reserve
        assert_eq!(clamp_height(0, 10, 5, 8), 5);
    }

    #[test]
    fn test_drag_ignored_when_not_resizing() {
        let mut panel = BottomPanel::default();
        assert!(!panel.drag_to(5, 40));
        assert_eq!(panel.height, DEFAULT_BOTTOM_HEIGHT);
    }

    #[test]
    fn test_resize_cycle() {
        let mut panel = BottomPanel::default();
        panel.begin_resize();
        assert!(panel.is_resizing());

        assert!(panel.drag_to(20, 40));
        assert_eq!(panel.height, 20);
        assert!(!panel.drag_to(20, 40), "same row, no change");

        panel.end_resize();
        assert!(!panel.is_resizing());
        assert!(!panel.drag_to(10, 40));
        assert_eq!(panel.height, 20);
    }

    #[test]
    fn test_effective_height_shrinks_with_screen() {
        let panel = BottomPanel::new(30, 5, 8);
        assert_eq!(panel.effective_height(60), 30);
        assert_eq!(panel.effective_height(20), 12);
        assert_eq!(panel.effective_height(6), 5);
        assert_eq!(panel.effective_height(3), 3);
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(BottomTab::default(), BottomTab::Terminal);
        assert_eq!(BottomTab::Terminal.next(), BottomTab::Console);
        assert_eq!(BottomTab::Console.next(), BottomTab::Terminal);
    }
}
