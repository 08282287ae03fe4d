use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, centered_rect},
        theme::Theme,
    },
};

const BINDINGS: &[(&str, &str)] = &[
    ("↑ ↓ / j k", "move selection"),
    ("n", "new entry"),
    ("e / Enter", "edit selected entry"),
    ("d", "delete selected entry"),
    ("/", "filter by date (YYYY-MM-DD, empty = all)"),
    ("c", "clear date filter"),
    ("r", "reload entries and balances"),
    ("Tab / S-Tab", "next / previous form field"),
    ("← →", "switch credit/debit"),
    ("?", "toggle this help"),
    ("Esc", "close dialog"),
    ("q / Ctrl+C", "quit"),
];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    if !state.help {
        return;
    }

    let theme = Theme::default();
    let popup = centered_rect(60, BINDINGS.len() as u16 + 2, area);

    let lines = BINDINGS
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{keys:<14}"), Style::default().fg(theme.accent)),
                Span::raw(*action),
            ])
        })
        .collect::<Vec<_>>();

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(Card::new("Keybinds", &theme).focused(true).block()),
        popup,
    );
}
