use api_types::entry::{DESCRIPTION_MAX_CHARS, EntryKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::form::{EntryForm, FormField},
    ui::{
        components::{card::Card, centered_rect},
        theme::Theme,
    },
    validation::Field,
};

const LABEL_WIDTH: u16 = 13;

pub fn render(frame: &mut Frame<'_>, area: Rect, form: Option<&EntryForm>) {
    let Some(form) = form else {
        return;
    };
    let theme = Theme::default();
    let rect = centered_rect(72, 12, area);
    let card = Card::new(form.mode.title(), &theme).focused(true);
    let block = card.block();
    let inner = block.inner(rect);

    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2); 4])
        .margin(1)
        .split(inner);

    for (field, row) in FormField::ALL.into_iter().zip(rows.iter()) {
        render_field(frame, *row, form, field, &theme);
    }
}

fn render_field(
    frame: &mut Frame<'_>,
    area: Rect,
    form: &EntryForm,
    field: FormField,
    theme: &Theme,
) {
    let focused = form.focus == field;
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let value_width = area.width.saturating_sub(LABEL_WIDTH + 1) as usize;

    let mut value_line = vec![Span::styled(
        format!("{:<width$}", field.label(), width = LABEL_WIDTH as usize),
        label_style,
    )];
    let (value, placeholder) = match field {
        FormField::Kind => {
            value_line.extend(kind_spans(form.draft.kind, theme));
            ("", "")
        }
        FormField::Date => (form.draft.date.as_str(), "YYYY-MM-DD"),
        FormField::Description => (form.draft.description.as_str(), "optional"),
        FormField::Amount => (form.draft.amount.as_str(), "0.00"),
    };
    if field != FormField::Kind {
        value_line.push(text_span(value, placeholder, focused, value_width, theme));
    }

    let detail = match error_for(form, field) {
        Some(message) => Span::styled(message, Style::default().fg(theme.error)),
        None if field == FormField::Description && focused => Span::styled(
            format!(
                "{}/{DESCRIPTION_MAX_CHARS}",
                form.draft.description.chars().count()
            ),
            Style::default().fg(theme.text_muted),
        ),
        None => Span::raw(""),
    };
    let detail_line = Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH as usize)),
        detail,
    ]);

    frame.render_widget(
        Paragraph::new(vec![Line::from(value_line), detail_line]),
        area,
    );
}

fn error_for(form: &EntryForm, field: FormField) -> Option<&'static str> {
    let field = match field {
        FormField::Date => Field::Date,
        FormField::Description => Field::Description,
        FormField::Amount => Field::Amount,
        FormField::Kind => return None,
    };
    form.errors.get(field)
}

fn kind_spans(kind: EntryKind, theme: &Theme) -> Vec<Span<'static>> {
    [EntryKind::Credit, EntryKind::Debit]
        .into_iter()
        .map(|option| {
            let (marker, style) = if option == kind {
                ("(•) ", Style::default().fg(theme.text))
            } else {
                ("( ) ", Style::default().fg(theme.text_muted))
            };
            Span::styled(format!("{marker}{}   ", option.label()), style)
        })
        .collect()
}

fn text_span(
    value: &str,
    placeholder: &'static str,
    focused: bool,
    width: usize,
    theme: &Theme,
) -> Span<'static> {
    if value.is_empty() && !focused {
        return Span::styled(placeholder, Style::default().fg(theme.text_muted));
    }
    let cursor = if focused { "│" } else { "" };
    let shown = visible_tail(value, width.saturating_sub(1));
    Span::styled(format!("{shown}{cursor}"), Style::default().fg(theme.text))
}

/// Keeps the last `width` characters so the cursor end stays visible.
fn visible_tail(value: &str, width: usize) -> &str {
    let count = value.chars().count();
    if count <= width {
        return value;
    }
    let skip = count - width;
    let start = value
        .char_indices()
        .nth(skip)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len());
    &value[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_end_of_long_values() {
        assert_eq!(visible_tail("short", 10), "short");
        assert_eq!(visible_tail("abcdefgh", 3), "fgh");
        assert_eq!(visible_tail("çãéíõú", 2), "õú");
    }
}
