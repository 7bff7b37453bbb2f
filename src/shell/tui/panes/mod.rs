//! TUI pane rendering
//!
//! # Pane Modules
//!
//! - [`source`]: source window around the current frame, with frame markers
//! - [`frames`]: every frame of the dump with its source line
//! - [`bindings`]: locals and globals of the session namespace
//! - [`status`]: status bar with the prompt label and keybindings
//!
//! Each module exports one `render_*` function. Scroll offsets are owned by the
//! [`App`](super::app::App) and clamped here.

pub mod bindings;
pub mod frames;
pub mod source;
pub mod status;

pub use bindings::render_bindings_pane;
pub use frames::render_frames_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;

use super::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block whose border reflects focus
fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp `offset` so a list of `total` rows fills `visible` rows
fn clamp_scroll(offset: usize, total: usize, visible: usize) -> usize {
    if total > visible {
        offset.min(total - visible)
    } else {
        0
    }
}

/// Offset that places row `target` near the middle of `visible` rows
fn centered_scroll(target: usize, total: usize, visible: usize) -> usize {
    clamp_scroll(target.saturating_sub(visible / 2), total, visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_helpers() {
        assert_eq!(clamp_scroll(10, 5, 20), 0);
        assert_eq!(clamp_scroll(10, 25, 20), 5);
        assert_eq!(centered_scroll(30, 100, 20), 20);
        assert_eq!(centered_scroll(3, 100, 20), 0);
        assert_eq!(centered_scroll(99, 100, 20), 80);
    }
}
