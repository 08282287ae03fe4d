pub mod balances;
pub mod entries;
