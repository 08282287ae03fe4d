use api_types::entry::CashflowEntry;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Cell, Row, Table, TableState},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, money},
        theme::Theme,
    },
};

pub const EMPTY_PLACEHOLDER: &str = "no entries found";

const WIDTHS: [Constraint; 4] = [
    Constraint::Length(10),
    Constraint::Length(7),
    Constraint::Min(12),
    Constraint::Length(18),
];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, focused: bool) {
    let theme = Theme::default();
    let title = match state.active_filter {
        Some(date) => format!("Entries on {}", date.format("%d/%m/%Y")),
        None => "Entries".to_string(),
    };

    let header = Row::new(["Date", "Kind", "Description", "Amount"]).style(
        Style::default()
            .fg(theme.text_muted)
            .add_modifier(Modifier::BOLD),
    );

    let rows = if state.entries.is_empty() {
        vec![Row::new([
            Cell::from(""),
            Cell::from(""),
            Cell::from(Span::styled(
                EMPTY_PLACEHOLDER,
                Style::default().fg(theme.text_muted),
            )),
            Cell::from(""),
        ])]
    } else {
        state
            .entries
            .iter()
            .map(|entry| entry_row(entry, &theme))
            .collect()
    };

    let table = Table::new(rows, WIDTHS)
        .header(header)
        .block(
            Card::new(&title, &theme)
                .badge(state.entries.len().to_string())
                .focused(focused)
                .block(),
        )
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    if !state.entries.is_empty() {
        table_state.select(Some(state.selected));
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}

fn entry_row(entry: &CashflowEntry, theme: &Theme) -> Row<'static> {
    Row::new([
        Cell::from(entry.date.format("%d/%m/%Y").to_string()),
        Cell::from(entry.kind.label()),
        Cell::from(entry.description.clone()),
        Cell::from(money::kind_amount(entry.kind, entry.amount, theme)),
    ])
}
