//! Source pane: the window around the current frame
//!
//! The current line is marked with `==>` on a highlighted background, lines where
//! other frames of the same file stopped carry `<index>>` in the gutter.

use super::{centered_scroll, clamp_scroll, pane_block};
use crate::shell::tui::theme::DEFAULT_THEME;
use crate::source::{SourceLine, SourceView};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Re-center on the current line at the next render
    pub recenter: bool,
}

/// Render the source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    view: &SourceView,
    radius: usize,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let title = format!(" {} (±{}) ", view.file, radius);
    let block = pane_block(&title, is_focused);

    let total = view.lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if scroll_state.recenter {
        let current = view
            .lines
            .iter()
            .position(|line| matches!(line, SourceLine::Current { .. }))
            .unwrap_or(0);
        scroll_state.offset = centered_scroll(current, total, visible_height);
        scroll_state.recenter = false;
    } else {
        scroll_state.offset = clamp_scroll(scroll_state.offset, total, visible_height);
    }

    let lines: Vec<Line> = view
        .lines
        .iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|line| source_line(line, view.gutter_width))
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn source_line(line: &SourceLine, gutter_width: usize) -> Line<'static> {
    let gutter = line.gutter(gutter_width);
    let gutter_base = Style::default().bg(DEFAULT_THEME.gutter_bg);

    match line {
        SourceLine::Current { text, .. } => Line::from(vec![
            Span::styled(
                gutter,
                gutter_base
                    .fg(DEFAULT_THEME.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                text.clone(),
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .bg(DEFAULT_THEME.current_line_bg),
            ),
        ]),
        SourceLine::OtherFrame { text, .. } => Line::from(vec![
            Span::styled(gutter, gutter_base.fg(DEFAULT_THEME.secondary)),
            Span::styled(text.clone(), Style::default().fg(DEFAULT_THEME.fg)),
        ]),
        SourceLine::Plain { text, .. } => Line::from(vec![
            Span::styled(gutter, gutter_base.fg(DEFAULT_THEME.comment)),
            Span::styled(text.clone(), Style::default().fg(DEFAULT_THEME.fg)),
        ]),
        SourceLine::Diagnostic(message) => Line::from(Span::styled(
            message.clone(),
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::ITALIC),
        )),
    }
}
