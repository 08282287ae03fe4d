use ratatui::{style::Style, text::Span};

use crate::{app::AppState, ui::theme::Theme};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints for whichever layer currently receives keys.
pub fn for_state(state: &AppState) -> Vec<KeyHint> {
    if state.pending_delete.is_some() {
        return vec![KeyHint::new("y", "delete"), KeyHint::new("n", "keep")];
    }
    if let Some(form) = &state.form {
        return vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("←→", "kind"),
            KeyHint::new("Enter", form.mode.submit_label()),
            KeyHint::new("Esc", "cancel"),
        ];
    }
    if state.search.is_some() {
        return vec![
            KeyHint::new("Enter", "search"),
            KeyHint::new("Esc", "cancel"),
        ];
    }
    if state.help {
        return vec![KeyHint::new("Esc", "close")];
    }

    let mut hints = vec![
        KeyHint::new("↑↓", "select"),
        KeyHint::new("n", "new"),
        KeyHint::new("e", "edit"),
        KeyHint::new("d", "delete"),
        KeyHint::new("/", "date"),
    ];
    if state.active_filter.is_some() {
        hints.push(KeyHint::new("c", "clear"));
    }
    hints.push(KeyHint::new("r", "refresh"));
    hints.push(KeyHint::new("?", "help"));
    hints
}
