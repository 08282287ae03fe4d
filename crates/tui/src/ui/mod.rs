pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Info bar, summary, entries, daily balances, hints
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Percentage(55),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    render_summary(frame, layout[1], state, &theme);

    let list_focused = state.form.is_none() && state.pending_delete.is_none() && !state.help;
    screens::entries::render(frame, layout[2], state, list_focused);
    screens::balances::render(frame, layout[3], state);

    render_bottom_bar(frame, layout[4], state, &theme);

    components::entry_form::render(frame, area, state.form.as_ref());
    components::confirm::render(frame, area, state.pending_delete);
    components::help_overlay::render(frame, area, state);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let (status, status_style) = if state.online {
        ("OK", Style::default().fg(theme.positive))
    } else {
        ("ERR", Style::default().fg(theme.error))
    };

    let line = Line::from(vec![
        Span::styled("Cash flow", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("Server", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut line = vec![
        Span::styled("Balance", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
        components::money::styled_amount_bold(state.grand_total(), theme),
        Span::raw("   "),
        Span::styled("Date", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
    ];

    match &state.search {
        Some(query) => {
            line.push(Span::styled(
                format!("{query}│"),
                Style::default().fg(theme.accent),
            ));
            if query.is_empty() {
                line.push(Span::styled(
                    " YYYY-MM-DD, empty for all",
                    Style::default().fg(theme.text_muted),
                ));
            }
        }
        None => line.push(Span::raw(
            state
                .active_filter
                .map(|date| date.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| "all".to_string()),
        )),
    }

    let card = components::card::Card::new("Summary", theme).focused(state.search.is_some());
    frame.render_widget(Paragraph::new(Line::from(line)).block(card.block()), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::hints::hints_to_spans(&components::hints::for_state(state), theme);

    if state.form.is_none() && state.search.is_none() && state.pending_delete.is_none() {
        parts.push(components::hints::hint_separator(theme));
        parts.push(Span::styled("q", Style::default().fg(theme.accent)));
        parts.push(Span::raw(" quit"));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
