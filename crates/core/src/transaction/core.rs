// Copyright (C) 2024-2025 R3E Network.
//
// core.rs file belongs to the ptb-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Transaction data and the frozen, signable form of it.

use super::command::Command;
use super::input::Input;
use crate::primitives::{Address, ObjectRef, TransactionDigest};
use crate::CoreResult;
use bytes::Bytes;
use ptb_config::BuilderLimits;
use ptb_cryptography::Intent;
use ptb_io::SerializableExt;

/// Who pays for the transaction and how much.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GasData {
    pub payment: Vec<ObjectRef>,
    /// Differs from the sender when a sponsor pays
    pub owner: Address,
    pub price: u64,
    pub budget: u64,
}

/// The full content of a programmable transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionData {
    pub sender: Address,
    pub gas_data: GasData,
    pub inputs: Vec<Input>,
    pub commands: Vec<Command>,
}

impl TransactionData {
    pub fn is_sponsored(&self) -> bool {
        self.gas_data.owner != self.sender
    }

    /// Addresses whose signatures the transaction needs: the sender, then
    /// the gas owner when a sponsor pays.
    pub fn required_signers(&self) -> Vec<Address> {
        if self.is_sponsored() {
            vec![self.sender, self.gas_data.owner]
        } else {
            vec![self.sender]
        }
    }

    pub fn object_input_count(&self) -> usize {
        self.inputs.iter().filter(|input| input.is_object()).count()
    }

    /// Intent-scoped digest of the canonical bytes.
    pub fn digest(&self) -> CoreResult<TransactionDigest> {
        Ok(digest_of(&self.to_array()?))
    }
}

pub(crate) fn digest_of(bytes: &[u8]) -> TransactionDigest {
    TransactionDigest::new(Intent::transaction_data().digest(bytes))
}

/// An immutable, validated transaction with its canonical bytes.
///
/// Cloning shares the byte buffer, so every party signing a sponsored or
/// multisig transaction can hold the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrozenTransaction {
    data: TransactionData,
    bytes: Bytes,
    digest: TransactionDigest,
}

impl FrozenTransaction {
    pub(crate) fn new(data: TransactionData, bytes: Bytes) -> Self {
        let digest = digest_of(&bytes);
        Self {
            data,
            bytes,
            digest,
        }
    }

    /// Decodes canonical bytes received from another party and checks their
    /// structure against `limits`.
    pub fn from_bytes(bytes: impl Into<Bytes>, limits: &BuilderLimits) -> CoreResult<Self> {
        let bytes = bytes.into();
        let data = TransactionData::from_array(&bytes)?;
        let arities: Vec<_> = data.commands.iter().map(Command::default_arity).collect();
        data.validate(&arities, limits)?;
        Ok(Self::new(data, bytes))
    }

    pub fn data(&self) -> &TransactionData {
        &self.data
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn digest(&self) -> TransactionDigest {
        self.digest
    }

    pub fn sender(&self) -> Address {
        self.data.sender
    }

    pub fn gas_owner(&self) -> Address {
        self.data.gas_data.owner
    }

    pub fn required_signers(&self) -> Vec<Address> {
        self.data.required_signers()
    }
}
