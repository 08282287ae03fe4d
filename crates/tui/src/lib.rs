//! Terminal client for a cash-flow ledger backend.
//!
//! [`app::store::Store`] owns the entries/balances snapshot and drives every
//! request through a [`client::CashflowApi`]; [`ui`] renders that state.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod ui;
pub mod validation;
