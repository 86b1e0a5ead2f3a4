// Copyright (C) 2024-2025 R3E Network.
//
// mod.rs file belongs to the ptb-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Programmable transactions.
//!
//! - `argument` - How commands reference inputs, results and the gas coin
//! - `command` - Module calls, coin splits and merges, transfers, publish
//! - `input` - Pure and object inputs
//! - `core` - Transaction data and the frozen form that gets signed
//! - `serialization` - The canonical byte layout
//! - `validation` - Reference checks, limits and the unconsumed-result lint

pub mod argument;
pub mod command;
pub mod core;
pub mod input;
pub mod serialization;
pub mod validation;

pub use argument::Argument;
pub use command::{Command, ProgrammableMoveCall, ResultArity};
pub use core::{FrozenTransaction, GasData, TransactionData};
pub use input::Input;
pub use validation::UnconsumedResult;
