use std::time::{Duration, Instant};

use api_types::{Money, entry::CashflowEntry};
use chrono::Local;

use crate::{
    app::{
        AppState, ToastLevel, ToastState,
        form::{EntryForm, FormMode},
    },
    client::CashflowApi,
    validation,
};

/// Toasts disappear after this long.
pub const TOAST_TTL: Duration = Duration::from_secs(5);

/// Owns the canonical entries/balances snapshot and every mutation of it.
///
/// The snapshot is only ever replaced wholesale: a failed request leaves the
/// previous one in place and raises an error toast.
pub struct Store<C> {
    client: C,
    pub state: AppState,
}

impl<C: CashflowApi> Store<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            state: AppState::new(base_url.into()),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Reloads entries and balances concurrently.
    pub async fn refresh(&mut self) {
        let (entries, balances) = tokio::join!(self.client.list(), self.client.balance());
        match (entries, balances) {
            (Ok(entries), Ok(balances)) => {
                tracing::debug!(
                    entries = entries.len(),
                    balances = balances.len(),
                    "snapshot refreshed"
                );
                self.state.entries = entries;
                self.state.balances = balances;
                self.state.active_filter = None;
                self.state.online = true;
                self.state.last_refresh = Some(Local::now());
                self.state.clamp_selection();
            }
            (Err(err), _) | (_, Err(err)) => {
                tracing::error!(%err, "failed to load entries and balances");
                self.state.online = false;
                self.notify(ToastLevel::Error, "Failed to load data.");
            }
        }
    }

    /// Filters entries by date; a blank date reloads everything.
    pub async fn search(&mut self, date: &str) {
        let raw = date.trim();
        if raw.is_empty() {
            self.refresh().await;
            return;
        }

        let Some(date) = validation::parse_date(raw) else {
            self.notify(ToastLevel::Error, "Invalid date, use YYYY-MM-DD.");
            return;
        };

        match self.client.list_by_date(date).await {
            Ok(entries) => {
                tracing::debug!(%date, entries = entries.len(), "search");
                self.state.entries = entries;
                self.state.active_filter = Some(date);
                self.state.selected = 0;
            }
            Err(err) => {
                tracing::error!(%err, %date, "failed to search entries");
                self.notify(ToastLevel::Error, "Failed to search entries.");
            }
        }
    }

    /// First step of a delete: waits for [`Self::confirm_delete`] or
    /// [`Self::cancel_delete`].
    pub fn request_delete(&mut self, id: u64) {
        self.state.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.state.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.state.pending_delete.take() else {
            return;
        };

        match self.client.remove(id).await {
            Ok(()) => {
                tracing::info!(id, "entry deleted");
                self.notify(ToastLevel::Success, "Entry deleted.");
                self.refresh().await;
            }
            Err(err) => {
                tracing::error!(%err, id, "failed to delete entry");
                self.notify(ToastLevel::Error, "Failed to delete entry.");
            }
        }
    }

    pub fn open_create(&mut self) {
        self.state.form = Some(EntryForm::create());
    }

    /// Opens the edit form on `entry`, replacing any draft already open.
    pub fn open_edit(&mut self, entry: &CashflowEntry) {
        let Some(id) = entry.id else {
            self.notify(ToastLevel::Error, "Entry has no id and cannot be edited.");
            return;
        };
        self.state.form = Some(EntryForm::edit(id, entry));
    }

    pub fn cancel_form(&mut self) {
        self.state.form = None;
    }

    /// Validates the open form and, when clean, sends it to the backend.
    ///
    /// On success the form closes and the snapshot is reloaded; on failure
    /// the form stays open with the draft untouched.
    pub async fn submit_form(&mut self) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        let Some(payload) = form.validated_entry() else {
            return;
        };
        let mode = form.mode;

        let result = match mode {
            FormMode::Create => self.client.create(&payload).await,
            FormMode::Edit { id } => self.client.update(id, &payload).await,
        };

        match result {
            Ok(saved) => {
                tracing::info!(id = ?saved.id, ?mode, "entry saved");
                self.notify(ToastLevel::Success, mode.success_message());
                self.state.form = None;
                self.refresh().await;
            }
            Err(err) => {
                tracing::error!(%err, ?mode, "failed to save entry");
                self.notify(ToastLevel::Error, mode.failure_message());
            }
        }
    }

    pub fn grand_total(&self) -> Money {
        self.state.grand_total()
    }

    pub fn notify(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
            shown_at: Instant::now(),
        });
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self
            .state
            .toast
            .as_ref()
            .is_some_and(|toast| now.duration_since(toast.shown_at) >= TOAST_TTL)
        {
            self.state.toast = None;
        }
    }
}
