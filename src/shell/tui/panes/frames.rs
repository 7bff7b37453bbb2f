//! Frames pane: one row per captured frame

use super::{clamp_scroll, pane_block};
use crate::session::listing::FrameListing;
use crate::shell::tui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Scroll state for the frames pane
#[derive(Debug, Default)]
pub struct FramesScrollState {
    pub offset: usize,
}

/// Render the frames pane
pub fn render_frames_pane(
    frame: &mut Frame,
    area: Rect,
    listing: &FrameListing,
    is_focused: bool,
    scroll_state: &mut FramesScrollState,
) {
    let block = pane_block(" Frames ", is_focused);

    let total = listing.rows.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the current frame on screen
    if let Some(current) = listing.rows.iter().position(|row| row.is_current) {
        if current < scroll_state.offset {
            scroll_state.offset = current;
        } else if current >= scroll_state.offset + visible_height {
            scroll_state.offset = current + 1 - visible_height;
        }
    }
    scroll_state.offset = clamp_scroll(scroll_state.offset, total, visible_height);

    let items: Vec<ListItem> = listing
        .rows
        .iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|row| {
            let (marker, index_style, row_style) = if row.is_current {
                (
                    "▶ ",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Style::default().bg(DEFAULT_THEME.current_line_bg),
                )
            } else {
                ("  ", Style::default().fg(DEFAULT_THEME.comment), Style::default())
            };

            let text_style = if row.text.is_ok() {
                Style::default().fg(DEFAULT_THEME.fg)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker, index_style),
                Span::styled(format!("{}. ", row.index), index_style),
                Span::styled(
                    format!("{}:{} ", row.file, row.line),
                    Style::default().fg(DEFAULT_THEME.primary),
                ),
                Span::styled(row.display_text(), text_style),
            ]))
            .style(row_style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
