//! Builders for programmable transactions.

pub mod transaction_builder;

pub use transaction_builder::{TransactionBuilder, TransactionResult};
