use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::ui::{
    components::{card::Card, centered_rect},
    theme::Theme,
};

/// Asks before deleting entry `id`; nothing is drawn when no delete is pending.
pub fn render(frame: &mut Frame<'_>, area: Rect, pending: Option<u64>) {
    let Some(id) = pending else {
        return;
    };
    let theme = Theme::default();
    let rect = centered_rect(44, 5, area);

    let lines = vec![
        Line::from(format!("Delete entry #{id}?")),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.accent)),
            Span::raw(" delete   "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" keep"),
        ]),
    ];

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Card::new("Confirm", &theme).focused(true).block()),
        rect,
    );
}
