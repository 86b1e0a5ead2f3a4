//! # ptb-rs: programmable transaction blocks for Move object chains
//!
//! Builds a programmable transaction as a graph of commands over typed
//! inputs, freezes it into canonical bytes, signs those bytes offline with
//! one or more keys (optionally aggregated into a weighted multisig), and
//! submits the result, checking that the node executed exactly what was
//! signed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ptb_rs::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let key = KeyPair::generate(SignatureScheme::Ed25519)?;
//! let gas = ObjectRef::new(ObjectId::from_u64(7), 1, ObjectDigest::new([0u8; 32]));
//!
//! let mut builder = TransactionBuilder::new();
//! builder.set_sender(key.address()).set_gas_payment(vec![gas]);
//! let amount = builder.pure(1_000u64, PureType::U64)?;
//! let gas_coin = builder.gas();
//! let coin = builder.split_coins(gas_coin, vec![amount]);
//! let recipient = builder.pure(Address::from_u64(0xB0B), PureType::Address)?;
//! builder.transfer_objects(vec![coin.nested(0)], recipient);
//!
//! let frozen = builder.freeze()?;
//! let signature = sign_transaction(&frozen, &key)?;
//! # let _ = signature;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - limits, gas defaults and TOML configuration
//! - [`io`] - canonical binary writer and reader
//! - [`crypto`] - signature schemes, hashing and intents
//! - [`core`] - pure values, type tags, the command graph and its builder
//! - [`wallets`] - key pairs, signing and multisig aggregation
//! - `rpc_client` - object resolution and execution (feature `rpc`)

#![warn(rustdoc::missing_crate_level_docs)]

pub mod logging;

pub use ptb_config as config;
pub use ptb_core as core;
pub use ptb_cryptography as crypto;
pub use ptb_io as io;
pub use ptb_wallets as wallets;

#[cfg(feature = "rpc")]
pub use ptb_rpc_client as rpc_client;

pub use logging::init_logging;

/// Common imports for building and signing transactions
pub mod prelude {
    pub use crate::config::{BuilderLimits, ExecutionMode, GasConfig, PtbConfig};
    pub use crate::core::{
        Address, Argument, FrozenTransaction, ObjectArg, ObjectDigest, ObjectId, ObjectRef,
        PureType, PureValue, TransactionBuilder, TransactionDigest, TransactionResult, TypeTag,
    };
    pub use crate::crypto::SignatureScheme;
    pub use crate::wallets::{
        sign, sign_transaction, GenericSignature, KeyPair, MultiSigPublicKey, SignatureEnvelope,
        WeightedPublicKey,
    };

    #[cfg(feature = "rpc")]
    pub use crate::rpc_client::{
        ExecutionError, NetworkService, ObjectResolver, RpcClient, TransactionExecutor,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
