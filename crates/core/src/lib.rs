// Copyright (C) 2024-2025 R3E Network.
//
// lib.rs file belongs to the ptb-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! # PTB Core
//!
//! Types and the builder for programmable transaction blocks.
//!
//! A programmable transaction is an ordered list of typed inputs and
//! commands, where later commands consume the results of earlier ones.
//! This crate builds that graph, checks it, and freezes it into canonical
//! bytes and an intent-scoped digest ready for signing.
//!
//! ## Example
//!
//! ```rust
//! use ptb_core::{Address, ObjectDigest, ObjectId, ObjectRef, PureType, TransactionBuilder};
//!
//! let mut builder = TransactionBuilder::new();
//! let sender: Address = "0xa11ce".parse().unwrap();
//! builder
//!     .set_sender(sender)
//!     .set_gas_payment(vec![ObjectRef::new(ObjectId::from_u64(7), 1, ObjectDigest::new([1; 32]))]);
//!
//! let amount = builder.pure(1_000u64, PureType::U64).unwrap();
//! let coin = builder.split_coins(builder.gas(), vec![amount]);
//! let recipient = builder.pure(sender, PureType::Address).unwrap();
//! builder.transfer_objects(vec![coin.nested(0)], recipient);
//!
//! let frozen = builder.freeze().unwrap();
//! assert!(!frozen.bytes().is_empty());
//! ```
//!
//! ## Architecture
//!
//! - **Values**: `pure_value`, `type_tag` - Pure input encoding and type arguments
//! - **Identifiers**: `primitives` - Addresses, object references, digests
//! - **Graph**: `transaction` - Inputs, commands, layout and validation
//! - **Construction**: `builders` - The transaction builder

/// Transaction builder
pub mod builders;
/// Core error types
pub mod error;
/// Addresses, object references and digests
pub mod primitives;
/// Pure value encoder
pub mod pure_value;
/// Programmable transaction structures and validation
pub mod transaction;
/// Move type tags
pub mod type_tag;

pub use builders::{TransactionBuilder, TransactionResult};
pub use error::{CoreError, CoreResult, Result};
pub use primitives::{
    Address, ObjectArg, ObjectDigest, ObjectId, ObjectRef, Owner, TransactionDigest,
};
pub use pure_value::{decode, encode, EncodingError, PureType, PureValue};
pub use transaction::{
    Argument, Command, FrozenTransaction, GasData, Input, ProgrammableMoveCall, ResultArity,
    TransactionData, UnconsumedResult,
};
pub use type_tag::{StructTag, TypeTag};
