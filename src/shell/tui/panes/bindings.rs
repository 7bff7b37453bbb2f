//! Bindings pane: locals, then globals, of the session namespace

use super::{clamp_scroll, pane_block};
use crate::session::namespace::{Entry, Environment};
use crate::session::Session;
use crate::shell::tui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Scroll state for the bindings pane
#[derive(Debug, Default)]
pub struct BindingsScrollState {
    pub offset: usize,
}

/// Render the bindings pane
pub fn render_bindings_pane(
    frame: &mut Frame,
    area: Rect,
    session: &Session<'_>,
    is_focused: bool,
    scroll_state: &mut BindingsScrollState,
) {
    let block = pane_block(" Bindings ", is_focused);
    let namespace = session.namespace();

    let mut rows: Vec<ListItem> = Vec::new();
    push_section(&mut rows, "Locals", namespace.locals(), session);
    rows.push(ListItem::new(""));
    push_section(&mut rows, "Globals", namespace.globals(), session);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    scroll_state.offset = clamp_scroll(scroll_state.offset, rows.len(), visible_height);

    let visible: Vec<ListItem> = rows
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible).block(block), area);
}

fn push_section(
    rows: &mut Vec<ListItem<'static>>,
    title: &str,
    env: &Environment,
    session: &Session<'_>,
) {
    rows.push(ListItem::new(Line::from(Span::styled(
        format!("{} ({})", title, env.len()),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    ))));

    if env.is_empty() {
        rows.push(ListItem::new(Line::from(Span::styled(
            "  (empty)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))));
        return;
    }

    for (name, entry) in env.iter() {
        let value_style = match entry {
            Entry::Value(_) => Style::default().fg(DEFAULT_THEME.string),
            Entry::Helper(_) => Style::default().fg(DEFAULT_THEME.function),
            Entry::FrameMarker(_) | Entry::Dump { .. } => Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::ITALIC),
        };

        rows.push(ListItem::new(Line::from(vec![
            Span::styled(format!("  {}", name), Style::default().fg(DEFAULT_THEME.fg)),
            Span::styled(": ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                entry.type_name().to_string(),
                Style::default().fg(DEFAULT_THEME.type_name),
            ),
            Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(session.describe(entry), value_style),
        ])));
    }
}
