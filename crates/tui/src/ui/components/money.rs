use api_types::{Money, entry::EntryKind};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Amount in BRL, green for credits and red for debits.
#[must_use]
pub fn kind_amount(kind: EntryKind, amount: Money, theme: &Theme) -> Span<'static> {
    let color = match kind {
        EntryKind::Credit => theme.positive,
        EntryKind::Debit => theme.negative,
    };
    Span::styled(amount.format_brl(), Style::default().fg(color))
}

/// Amount in BRL colored by sign, bold, for totals.
#[must_use]
pub fn styled_amount_bold(amount: Money, theme: &Theme) -> Span<'static> {
    Span::styled(
        amount.format_brl(),
        Style::default()
            .fg(sign_color(amount, theme))
            .add_modifier(Modifier::BOLD),
    )
}

fn sign_color(amount: Money, theme: &Theme) -> ratatui::style::Color {
    if amount.is_positive() {
        theme.positive
    } else if amount.is_negative() {
        theme.negative
    } else {
        theme.text
    }
}
