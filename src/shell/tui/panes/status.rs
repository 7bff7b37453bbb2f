//! Status bar rendering with keybindings and position indicators

use crate::shell::tui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar at the bottom.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    message: &str,
    current_frame: usize,
    total_frames: usize,
    is_warning: bool,
) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left_spans = vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .bg(if is_warning {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if is_warning {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = vec![
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" up/down ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" +/- ", key_style),
        Span::styled(" context ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⇥ ", key_style),
        Span::styled(" focus ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let position_style = |bg: Color| {
        Style::default()
            .bg(bg)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    };

    right_spans.push(Span::styled("│", sep_style));
    if total_frames == 1 {
        right_spans.push(Span::styled(" ONLY ", position_style(DEFAULT_THEME.comment)));
    } else if current_frame == 0 {
        right_spans.push(Span::styled(" INNERMOST ", position_style(DEFAULT_THEME.success)));
    } else if current_frame + 1 >= total_frames {
        right_spans.push(Span::styled(" OUTERMOST ", position_style(DEFAULT_THEME.secondary)));
    } else {
        right_spans.push(Span::styled(
            format!(" {}/{} ", current_frame, total_frames - 1),
            position_style(DEFAULT_THEME.primary),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
