use api_types::balance::DailyBalance;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Cell, Row, Table},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, money},
        theme::Theme,
    },
};

const WIDTHS: [Constraint; 4] = [
    Constraint::Length(10),
    Constraint::Length(18),
    Constraint::Length(18),
    Constraint::Min(18),
];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let header = Row::new(["Date", "Total credit", "Total debit", "Final balance"]).style(
        Style::default()
            .fg(theme.text_muted)
            .add_modifier(Modifier::BOLD),
    );

    let rows = state
        .balances
        .iter()
        .map(|row| balance_row(row, &theme))
        .collect::<Vec<_>>();

    let table = Table::new(rows, WIDTHS)
        .header(header)
        .block(Card::new("Daily balance", &theme).block());
    frame.render_widget(table, area);
}

fn balance_row(row: &DailyBalance, theme: &Theme) -> Row<'static> {
    Row::new([
        Cell::from(row.date.format("%d/%m/%Y").to_string()),
        Cell::from(Span::styled(
            row.total_credit.format_brl(),
            Style::default().fg(theme.positive),
        )),
        Cell::from(Span::styled(
            row.total_debit.format_brl(),
            Style::default().fg(theme.negative),
        )),
        Cell::from(money::styled_amount_bold(row.final_balance, theme)),
    ])
}
