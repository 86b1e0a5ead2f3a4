// Copyright (C) 2024-2025 R3E Network.
//
// error.rs file belongs to the ptb-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Error types for transaction construction.

use crate::pure_value::EncodingError;
use ptb_io::IoError;
use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Alias kept for callers that import `ptb_core::Result`
pub type Result<T> = CoreResult<T>;

/// Errors raised while building, freezing or decoding a transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A pure value did not match its declared type
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Malformed canonical bytes
    #[error("Serialization error: {0}")]
    Io(#[from] IoError),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error("Invalid type tag: {0}")]
    InvalidTypeTag(String),

    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Transaction has no sender")]
    MissingSender,

    #[error("Transaction has no gas payment objects")]
    MissingGasPayment,

    #[error("Too many gas payment objects: {count} (max {max})")]
    TooManyGasObjects { count: usize, max: usize },

    #[error("Too many commands: {count} (max {max})")]
    TooManyCommands { count: usize, max: usize },

    #[error("Too many object inputs: {count} (max {max})")]
    TooManyObjectInputs { count: usize, max: usize },

    #[error("Too many inputs: {count}")]
    TooManyInputs { count: usize },

    #[error("Command {command} has {count} type arguments (max {max})")]
    TooManyTypeArguments {
        command: usize,
        count: usize,
        max: usize,
    },

    #[error("Pure input {input} is {size} bytes (max {max})")]
    PureArgumentTooLarge {
        input: usize,
        size: usize,
        max: usize,
    },

    #[error("Command {command} references input {index} but only {len} inputs exist")]
    InvalidInputIndex { command: usize, index: u16, len: usize },

    #[error("Command {command} references the result of command {result}, which does not precede it")]
    InvalidResultReference { command: usize, result: u16 },

    #[error("Command {command} reads value {sub_index} of command {result}, which produces {arity}")]
    NestedResultOutOfBounds {
        command: usize,
        result: u16,
        sub_index: u16,
        arity: u16,
    },

    #[error("Command {command} uses Result({result}) but that command produces {arity} values")]
    ResultArityMismatch {
        command: usize,
        result: u16,
        arity: u16,
    },

    #[error("Result of command {command} (sub-index {sub_index:?}) is never consumed")]
    UnconsumedResult { command: u16, sub_index: Option<u16> },
}
