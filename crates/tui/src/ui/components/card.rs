use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};

use crate::ui::theme::Theme;

/// Rounded, titled container shared by the tables and dialogs.
pub struct Card<'a> {
    title: &'a str,
    badge: Option<String>,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            badge: None,
            theme,
            focused: false,
        }
    }

    /// Accent border while this card receives keys.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Short muted text on the right end of the top border, e.g. a row count.
    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn block(&self) -> Block<'a> {
        let (border, title) = if self.focused {
            (self.theme.border_focused, self.theme.accent)
        } else {
            (self.theme.border, self.theme.text_muted)
        };

        let mut block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(title),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));

        if let Some(badge) = &self.badge {
            block = block.title_top(
                Line::styled(format!(" {badge} "), Style::default().fg(self.theme.text_muted))
                    .right_aligned(),
            );
        }
        block
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, layout::Rect};

    use super::*;

    #[test]
    fn badge_is_drawn_on_the_top_border() {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|frame| {
                let block = Card::new("Entries", &theme).badge("3").block();
                frame.render_widget(block, Rect::new(0, 0, 30, 3));
            })
            .unwrap();

        let top: String = terminal.backend().buffer().content()[..30]
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(top.contains(" Entries "));
        assert!(top.trim_end_matches('╮').ends_with(" 3 "));
    }
}
