use api_types::{
    Money,
    entry::{CashflowEntry, DESCRIPTION_MAX_CHARS, EntryKind},
};

use crate::validation::{self, FieldErrors};

/// Which backend call a submitted form ends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: u64 },
}

impl FormMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Create => "New entry",
            Self::Edit { .. } => "Edit entry",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "save",
            Self::Edit { .. } => "update",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Self::Create => "Entry created.",
            Self::Edit { .. } => "Entry updated.",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Failed to create entry.",
            Self::Edit { .. } => "Failed to update entry.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Kind,
    Description,
    Amount,
}

impl FormField {
    pub const ALL: [FormField; 4] = [Self::Date, Self::Kind, Self::Description, Self::Amount];

    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Kind => "Kind",
            Self::Description => "Description",
            Self::Amount => "Amount",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Date => Self::Kind,
            Self::Kind => Self::Description,
            Self::Description => Self::Amount,
            Self::Amount => Self::Date,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Date => Self::Amount,
            Self::Kind => Self::Date,
            Self::Description => Self::Kind,
            Self::Amount => Self::Description,
        }
    }
}

/// Raw field values of an open form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub kind: EntryKind,
    pub description: String,
    pub amount: String,
}

impl Draft {
    pub fn from_entry(entry: &CashflowEntry) -> Self {
        Self {
            date: entry.date.format("%Y-%m-%d").to_string(),
            kind: entry.kind,
            description: entry.description.clone(),
            amount: entry.amount.to_string(),
        }
    }

    /// Validates the draft and builds the request payload (without `id`).
    pub fn to_entry(&self) -> Result<CashflowEntry, FieldErrors> {
        let errors = validation::validate(self);
        match (
            validation::parse_date(&self.date),
            self.amount.parse::<Money>(),
        ) {
            (Some(date), Ok(amount)) if errors.is_empty() => Ok(CashflowEntry {
                id: None,
                date,
                kind: self.kind,
                description: self.description.clone(),
                amount,
            }),
            _ => Err(errors),
        }
    }
}

/// An open create/edit form. A closed form is simply absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    pub mode: FormMode,
    pub draft: Draft,
    pub errors: FieldErrors,
    pub focus: FormField,
}

impl EntryForm {
    pub fn create() -> Self {
        Self::with_draft(FormMode::Create, Draft::default())
    }

    pub fn edit(id: u64, entry: &CashflowEntry) -> Self {
        Self::with_draft(FormMode::Edit { id }, Draft::from_entry(entry))
    }

    fn with_draft(mode: FormMode, draft: Draft) -> Self {
        Self {
            mode,
            draft,
            errors: FieldErrors::default(),
            focus: FormField::Date,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn toggle_kind(&mut self) {
        self.draft.kind = self.draft.kind.toggled();
    }

    pub fn input(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        match self.focus {
            FormField::Date => self.draft.date.push(ch),
            FormField::Kind => match ch {
                'c' | 'C' => self.draft.kind = EntryKind::Credit,
                'd' | 'D' => self.draft.kind = EntryKind::Debit,
                ' ' => self.toggle_kind(),
                _ => {}
            },
            FormField::Description => {
                if self.draft.description.chars().count() < DESCRIPTION_MAX_CHARS {
                    self.draft.description.push(ch);
                }
            }
            FormField::Amount => self.draft.amount.push(ch),
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Date => {
                self.draft.date.pop();
            }
            FormField::Kind => {}
            FormField::Description => {
                self.draft.description.pop();
            }
            FormField::Amount => {
                self.draft.amount.pop();
            }
        }
    }

    /// Runs the validator, keeping its errors on the form.
    ///
    /// Returns the payload only when the draft is valid.
    pub fn validated_entry(&mut self) -> Option<CashflowEntry> {
        match self.draft.to_entry() {
            Ok(entry) => {
                self.errors = FieldErrors::default();
                Some(entry)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}
