//! Wire types shared with the cash-flow backend.
//!
//! Field names follow the backend's JSON contract (`data`, `tipo`,
//! `descricao`, `valor`, ...); the Rust side uses English names.

pub mod money;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub use money::Money;

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub mod entry {
    use super::*;

    /// Maximum description length, counted in characters.
    pub const DESCRIPTION_MAX_CHARS: usize = 200;

    /// Direction of a cash-flow entry.
    ///
    /// Serialized as the literal strings `CREDITO` / `DEBITO`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum EntryKind {
        #[default]
        #[serde(rename = "CREDITO")]
        Credit,
        #[serde(rename = "DEBITO")]
        Debit,
    }

    impl EntryKind {
        /// Returns the wire literal.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Credit => "CREDITO",
                Self::Debit => "DEBITO",
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                Self::Credit => "Credit",
                Self::Debit => "Debit",
            }
        }

        #[must_use]
        pub fn toggled(self) -> Self {
            match self {
                Self::Credit => Self::Debit,
                Self::Debit => Self::Credit,
            }
        }
    }

    /// A single dated credit or debit.
    ///
    /// `id` is assigned by the backend on creation and omitted from request
    /// bodies while absent.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CashflowEntry {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<u64>,
        #[serde(rename = "data")]
        pub date: NaiveDate,
        #[serde(rename = "tipo")]
        pub kind: EntryKind,
        #[serde(rename = "descricao", default, deserialize_with = "null_as_empty")]
        pub description: String,
        #[serde(rename = "valor")]
        pub amount: Money,
    }
}

pub mod balance {
    use super::*;

    /// Backend-computed rollup for one calendar date.
    ///
    /// `final_balance` is opaque to the client: it is displayed as returned and
    /// summed across rows for the grand total.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DailyBalance {
        #[serde(rename = "data")]
        pub date: NaiveDate,
        #[serde(rename = "totalCredito", default)]
        pub total_credit: Money,
        #[serde(rename = "totalDebito", default)]
        pub total_debit: Money,
        #[serde(rename = "saldoFinal", default)]
        pub final_balance: Money,
    }
}
