//! In-memory [`CashflowApi`] that records every call.

use std::sync::Mutex;

use api_types::{
    Money,
    balance::DailyBalance,
    entry::{CashflowEntry, EntryKind},
};
use chrono::NaiveDate;

use crate::client::{CashflowApi, ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    ListByDate(NaiveDate),
    Create(CashflowEntry),
    Update(u64, CashflowEntry),
    Remove(u64),
    GetById(u64),
    Balance,
}

#[derive(Default)]
pub struct FakeApi {
    entries: Mutex<Vec<CashflowEntry>>,
    balances: Mutex<Vec<DailyBalance>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<Vec<&'static str>>,
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

/// Builds a persisted entry; `amount` is in whole units.
pub fn entry(id: u64, day: &str, kind: EntryKind, amount: i64) -> CashflowEntry {
    CashflowEntry {
        id: Some(id),
        date: date(day),
        kind,
        description: String::new(),
        amount: Money::new(amount * 100),
    }
}

/// Builds a balance row; amounts are in whole units.
pub fn balance(day: &str, credit: i64, debit: i64, final_balance: i64) -> DailyBalance {
    DailyBalance {
        date: date(day),
        total_credit: Money::new(credit * 100),
        total_debit: Money::new(debit * 100),
        final_balance: Money::new(final_balance * 100),
    }
}

impl FakeApi {
    pub fn with_entries(self, entries: Vec<CashflowEntry>) -> Self {
        *self.entries.lock().unwrap() = entries;
        self
    }

    pub fn with_balances(self, balances: Vec<DailyBalance>) -> Self {
        *self.balances.lock().unwrap() = balances;
        self
    }

    pub fn add_entry(&self, entry: CashflowEntry) {
        self.entries.lock().unwrap().push(entry);
    }

    /// Makes every later call to `operation` fail.
    pub fn fail_on(&self, operation: &'static str) {
        self.failing.lock().unwrap().push(operation);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, call: Call) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(&operation) {
            return Err(ClientError::Server {
                status: 500,
                message: format!("{operation} failed"),
            });
        }
        Ok(())
    }
}

impl CashflowApi for FakeApi {
    async fn list(&self) -> ClientResult<Vec<CashflowEntry>> {
        self.record("list", Call::List)?;
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn list_by_date(&self, date: NaiveDate) -> ClientResult<Vec<CashflowEntry>> {
        self.record("list_by_date", Call::ListByDate(date))?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.date == date)
            .cloned()
            .collect())
    }

    async fn create(&self, entry: &CashflowEntry) -> ClientResult<CashflowEntry> {
        self.record("create", Call::Create(entry.clone()))?;
        let mut entries = self.entries.lock().unwrap();
        let id = entries.iter().filter_map(|e| e.id).max().unwrap_or(0) + 1;
        let created = CashflowEntry {
            id: Some(id),
            ..entry.clone()
        };
        entries.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: u64, entry: &CashflowEntry) -> ClientResult<CashflowEntry> {
        self.record("update", Call::Update(id, entry.clone()))?;
        let mut entries = self.entries.lock().unwrap();
        let slot = entries
            .iter_mut()
            .find(|e| e.id == Some(id))
            .ok_or(ClientError::NotFound)?;
        *slot = CashflowEntry {
            id: Some(id),
            ..entry.clone()
        };
        Ok(slot.clone())
    }

    async fn remove(&self, id: u64) -> ClientResult<()> {
        self.record("remove", Call::Remove(id))?;
        self.entries.lock().unwrap().retain(|e| e.id != Some(id));
        Ok(())
    }

    async fn get_by_id(&self, id: u64) -> ClientResult<CashflowEntry> {
        self.record("get_by_id", Call::GetById(id))?;
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == Some(id))
            .cloned()
            .ok_or(ClientError::NotFound)
    }

    async fn balance(&self) -> ClientResult<Vec<DailyBalance>> {
        self.record("balance", Call::Balance)?;
        Ok(self.balances.lock().unwrap().clone())
    }
}
