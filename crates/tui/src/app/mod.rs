pub mod form;
pub mod store;

#[cfg(test)]
pub(crate) mod fake;

use std::time::{Duration, Instant};

use api_types::{Money, balance::DailyBalance, entry::CashflowEntry};
use chrono::{DateTime, Local, NaiveDate};
use crossterm::event::{self, Event, KeyEvent};

use crate::{
    client::{CashflowApi, Client},
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

use self::{form::FormField, store::Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub shown_at: Instant,
}

/// Everything the UI renders. Mutated only through [`Store`] and [`App`].
#[derive(Debug)]
pub struct AppState {
    pub entries: Vec<CashflowEntry>,
    pub balances: Vec<DailyBalance>,
    pub selected: usize,
    pub form: Option<form::EntryForm>,
    /// Entry id awaiting delete confirmation.
    pub pending_delete: Option<u64>,
    /// Open date-filter prompt and its typed text.
    pub search: Option<String>,
    pub active_filter: Option<NaiveDate>,
    pub toast: Option<ToastState>,
    pub help: bool,
    pub online: bool,
    pub last_refresh: Option<DateTime<Local>>,
    pub base_url: String,
}

impl AppState {
    pub fn new(base_url: String) -> Self {
        Self {
            entries: Vec::new(),
            balances: Vec::new(),
            selected: 0,
            form: None,
            pending_delete: None,
            search: None,
            active_filter: None,
            toast: None,
            help: false,
            online: false,
            last_refresh: None,
            base_url,
        }
    }

    /// Sum of `final_balance` over the current balance rows.
    pub fn grand_total(&self) -> Money {
        self.balances.iter().map(|row| row.final_balance).sum()
    }

    pub fn selected_entry(&self) -> Option<&CashflowEntry> {
        self.entries.get(self.selected)
    }

    fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.entries.len() - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }
}

pub struct App<C = Client> {
    store: Store<C>,
    should_quit: bool,
}

impl App<Client> {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config)?;
        Ok(Self::with_client(client, config.base_url))
    }
}

impl<C: CashflowApi> App<C> {
    pub fn with_client(client: C, base_url: impl Into<String>) -> Self {
        Self {
            store: Store::new(client, base_url),
            should_quit: false,
        }
    }

    pub fn store(&self) -> &Store<C> {
        &self.store
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        self.store.refresh().await;

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.store.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key).await;
                }
            }
            self.store.expire_toast(Instant::now());
        }

        tracing::info!("exiting");
        Ok(())
    }

    /// Routes a key to the topmost open layer: confirm dialog, form, search
    /// prompt, help, then the entries list.
    pub async fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        let state = &self.store.state;
        if state.pending_delete.is_some() {
            self.handle_confirm(action).await;
        } else if state.form.is_some() {
            self.handle_form(action).await;
        } else if state.search.is_some() {
            self.handle_search(action).await;
        } else if state.help {
            if matches!(action, AppAction::Cancel | AppAction::Input('?')) {
                self.store.state.help = false;
            }
        } else {
            self.handle_list(action).await;
        }
    }

    async fn handle_confirm(&mut self, action: AppAction) {
        match action {
            AppAction::Submit | AppAction::Input('y' | 'Y') => self.store.confirm_delete().await,
            AppAction::Cancel | AppAction::Input('n' | 'N') => self.store.cancel_delete(),
            _ => {}
        }
    }

    async fn handle_form(&mut self, action: AppAction) {
        if action == AppAction::Submit {
            self.store.submit_form().await;
            return;
        }
        if action == AppAction::Cancel {
            self.store.cancel_form();
            return;
        }

        let Some(form) = self.store.state.form.as_mut() else {
            return;
        };
        match action {
            AppAction::NextField | AppAction::Down => form.next_field(),
            AppAction::PrevField | AppAction::Up => form.prev_field(),
            AppAction::Left | AppAction::Right if form.focus == FormField::Kind => {
                form.toggle_kind();
            }
            AppAction::Backspace => form.backspace(),
            AppAction::Input(ch) => form.input(ch),
            _ => {}
        }
    }

    async fn handle_search(&mut self, action: AppAction) {
        match action {
            AppAction::Submit => {
                let query = self.store.state.search.take().unwrap_or_default();
                self.store.search(&query).await;
            }
            AppAction::Cancel => self.store.state.search = None,
            AppAction::Backspace => {
                if let Some(query) = self.store.state.search.as_mut() {
                    query.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(query) = self.store.state.search.as_mut() {
                    query.push(ch);
                }
            }
            _ => {}
        }
    }

    async fn handle_list(&mut self, action: AppAction) {
        match action {
            AppAction::Up | AppAction::Input('k' | 'K') => self.store.state.select_prev(),
            AppAction::Down | AppAction::Input('j' | 'J') => self.store.state.select_next(),
            AppAction::Input('q' | 'Q') => self.should_quit = true,
            AppAction::Input('n' | 'N') => self.store.open_create(),
            AppAction::Submit | AppAction::Input('e' | 'E') => {
                if let Some(entry) = self.store.state.selected_entry().cloned() {
                    self.store.open_edit(&entry);
                }
            }
            AppAction::Input('d' | 'D') => {
                let id = self.store.state.selected_entry().and_then(|entry| entry.id);
                if let Some(id) = id {
                    self.store.request_delete(id);
                }
            }
            AppAction::Input('/') => {
                let current = self
                    .store
                    .state
                    .active_filter
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                self.store.state.search = Some(current);
            }
            AppAction::Input('r' | 'R') => self.store.refresh().await,
            AppAction::Input('c' | 'C') => {
                if self.store.state.active_filter.is_some() {
                    self.store.search("").await;
                }
            }
            AppAction::Input('?') => self.store.state.help = true,
            _ => {}
        }
    }
}
