// Copyright (C) 2024-2025 R3E Network.
//
// transaction_builder.rs file belongs to the ptb-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Builder for programmable transactions.

use crate::primitives::{Address, ObjectArg, ObjectId, ObjectRef};
use crate::pure_value::{PureType, PureValue};
use crate::transaction::{
    Argument, Command, FrozenTransaction, GasData, Input, ResultArity, TransactionData,
    UnconsumedResult,
};
use crate::type_tag::TypeTag;
use crate::{CoreError, CoreResult};
use bytes::Bytes;
use ptb_config::{BuilderLimits, GasConfig, PtbConfig};
use ptb_io::SerializableExt;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Handle to the output of a command added to a [`TransactionBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionResult {
    index: u16,
}

impl TransactionResult {
    pub fn index(&self) -> u16 {
        self.index
    }

    /// The command's `j`-th value.
    pub fn nested(&self, j: u16) -> Argument {
        Argument::NestedResult(self.index, j)
    }
}

impl From<TransactionResult> for Argument {
    fn from(result: TransactionResult) -> Self {
        Argument::Result(result.index)
    }
}

/// Accumulates inputs and commands, then freezes into canonical bytes.
///
/// Inputs and commands are append-only; setters follow last-write-wins.
/// Nothing is validated until [`freeze`](Self::freeze).
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    limits: BuilderLimits,
    sender: Option<Address>,
    gas_payment: Vec<ObjectRef>,
    gas_budget: u64,
    gas_price: u64,
    gas_owner: Option<Address>,
    inputs: Vec<Input>,
    object_inputs: HashMap<ObjectId, u16>,
    commands: Vec<Command>,
    arities: Vec<ResultArity>,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::with_limits(BuilderLimits::default(), GasConfig::default())
    }
}

fn index_of(len: usize) -> u16 {
    // Past u16::MAX handles alias; freeze rejects such graphs by count.
    u16::try_from(len).unwrap_or(u16::MAX)
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the limits and gas defaults of `config`.
    pub fn from_config(config: &PtbConfig) -> Self {
        Self::with_limits(config.limits.clone(), config.gas.clone())
    }

    pub fn with_limits(limits: BuilderLimits, gas: GasConfig) -> Self {
        Self {
            limits,
            sender: None,
            gas_payment: Vec::new(),
            gas_budget: gas.budget,
            gas_price: gas.price,
            gas_owner: None,
            inputs: Vec::new(),
            object_inputs: HashMap::new(),
            commands: Vec::new(),
            arities: Vec::new(),
        }
    }

    pub fn limits(&self) -> &BuilderLimits {
        &self.limits
    }

    pub fn set_sender(&mut self, sender: Address) -> &mut Self {
        self.sender = Some(sender);
        self
    }

    pub fn set_gas_payment(&mut self, payment: Vec<ObjectRef>) -> &mut Self {
        self.gas_payment = payment;
        self
    }

    pub fn set_gas_budget(&mut self, budget: u64) -> &mut Self {
        self.gas_budget = budget;
        self
    }

    pub fn set_gas_price(&mut self, price: u64) -> &mut Self {
        self.gas_price = price;
        self
    }

    /// Sets a sponsor; without one the sender pays.
    pub fn set_gas_owner(&mut self, owner: Address) -> &mut Self {
        self.gas_owner = Some(owner);
        self
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Appends an input. Adding an object already present returns its
    /// existing slot.
    pub fn add_input(&mut self, input: Input) -> Argument {
        if let Some(id) = input.object_id() {
            if let Some(&index) = self.object_inputs.get(&id) {
                return Argument::Input(index);
            }
            self.object_inputs.insert(id, index_of(self.inputs.len()));
        }
        let index = index_of(self.inputs.len());
        self.inputs.push(input);
        Argument::Input(index)
    }

    /// Encodes `value` as `ty` and appends it as a pure input.
    pub fn pure(&mut self, value: impl Into<PureValue>, ty: PureType) -> CoreResult<Argument> {
        let bytes = value
            .into()
            .encode(&ty, self.limits.max_pure_argument_size)?;
        Ok(self.add_input(Input::Pure { ty, bytes }))
    }

    pub fn object(&mut self, arg: impl Into<ObjectArg>) -> Argument {
        self.add_input(Input::Object(arg.into()))
    }

    /// The gas payment coin, usable as a coin argument.
    pub fn gas(&self) -> Argument {
        Argument::GasCoin
    }

    pub fn add_command(&mut self, command: Command) -> TransactionResult {
        let arity = command.default_arity();
        self.push_command(command, arity)
    }

    fn push_command(&mut self, command: Command, arity: ResultArity) -> TransactionResult {
        let index = index_of(self.commands.len());
        debug!(index, command = command.name(), "adding command");
        self.commands.push(command);
        self.arities.push(arity);
        TransactionResult { index }
    }

    pub fn move_call(
        &mut self,
        package: ObjectId,
        module: &str,
        function: &str,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> TransactionResult {
        self.add_command(Command::move_call(
            package,
            module,
            function,
            type_arguments,
            arguments,
        ))
    }

    /// Adds a module call whose return count is known, so the graph checks
    /// and the unconsumed-result lint can see its values.
    pub fn move_call_returning(
        &mut self,
        package: ObjectId,
        module: &str,
        function: &str,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
        returns: u16,
    ) -> TransactionResult {
        self.push_command(
            Command::move_call(package, module, function, type_arguments, arguments),
            ResultArity::Known(returns),
        )
    }

    pub fn split_coins(&mut self, coin: Argument, amounts: Vec<Argument>) -> TransactionResult {
        self.add_command(Command::SplitCoins { coin, amounts })
    }

    pub fn merge_coins(&mut self, target: Argument, sources: Vec<Argument>) -> TransactionResult {
        self.add_command(Command::MergeCoins { target, sources })
    }

    pub fn transfer_objects(
        &mut self,
        objects: Vec<Argument>,
        recipient: Argument,
    ) -> TransactionResult {
        self.add_command(Command::TransferObjects { objects, recipient })
    }

    pub fn publish(
        &mut self,
        modules: Vec<Vec<u8>>,
        dependencies: Vec<ObjectId>,
    ) -> TransactionResult {
        self.add_command(Command::Publish {
            modules,
            dependencies,
        })
    }

    fn data(&self) -> CoreResult<TransactionData> {
        let sender = self.sender.ok_or(CoreError::MissingSender)?;
        Ok(TransactionData {
            sender,
            gas_data: GasData {
                payment: self.gas_payment.clone(),
                owner: self.gas_owner.unwrap_or(sender),
                price: self.gas_price,
                budget: self.gas_budget,
            },
            inputs: self.inputs.clone(),
            commands: self.commands.clone(),
        })
    }

    /// Produced values no later command consumes, for commands of known arity.
    pub fn unconsumed_results(&self) -> Vec<UnconsumedResult> {
        let data = TransactionData {
            sender: Address::ZERO,
            gas_data: GasData {
                payment: Vec::new(),
                owner: Address::ZERO,
                price: 0,
                budget: 0,
            },
            inputs: Vec::new(),
            commands: self.commands.clone(),
        };
        data.unconsumed_results(&self.arities)
    }

    /// Validates the graph and produces the canonical bytes and digest.
    ///
    /// Unconsumed results are logged, or rejected when
    /// `strict_linearity` is set.
    pub fn freeze(self) -> CoreResult<FrozenTransaction> {
        let data = self.data()?;
        data.validate(&self.arities, &self.limits)?;

        let unconsumed = data.unconsumed_results(&self.arities);
        if let Some(first) = unconsumed.first() {
            if self.limits.strict_linearity {
                return Err((*first).into());
            }
            for value in &unconsumed {
                warn!(
                    result = %value,
                    "produced value is never consumed, the node will reject the transaction unless it can be dropped"
                );
            }
        }

        let bytes = Bytes::from(data.to_array()?);
        let frozen = FrozenTransaction::new(data, bytes);
        debug!(
            digest = %frozen.digest(),
            size = frozen.bytes().len(),
            inputs = self.inputs.len(),
            commands = self.commands.len(),
            "transaction frozen"
        );
        Ok(frozen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::ObjectDigest;

    fn coin(id: u64) -> ObjectRef {
        ObjectRef::new(ObjectId::from_u64(id), 1, ObjectDigest::new([id as u8; 32]))
    }

    fn ready_builder() -> TransactionBuilder {
        let mut builder = TransactionBuilder::new();
        builder
            .set_sender(Address::from_u64(0xA))
            .set_gas_payment(vec![coin(0x100)]);
        builder
    }

    #[test]
    fn test_object_inputs_are_deduplicated() {
        let mut builder = ready_builder();
        let first = builder.object(coin(1));
        let pure = builder.pure(5u64, PureType::U64).unwrap();
        let again = builder.object(coin(1));
        assert_eq!(first, Argument::Input(0));
        assert_eq!(pure, Argument::Input(1));
        assert_eq!(again, first);
        assert_eq!(builder.input_count(), 2);
    }

    #[test]
    fn test_setters_last_write_wins() {
        let mut builder = ready_builder();
        builder.set_gas_budget(5).set_gas_budget(7);
        builder.set_gas_price(2);
        builder.transfer_objects(vec![Argument::GasCoin], Argument::GasCoin);
        let frozen = builder.freeze().unwrap();
        assert_eq!(frozen.data().gas_data.budget, 7);
        assert_eq!(frozen.data().gas_data.price, 2);
        assert_eq!(frozen.gas_owner(), frozen.sender());
    }

    #[test]
    fn test_missing_sender_and_gas() {
        let builder = TransactionBuilder::new();
        assert_eq!(builder.freeze().unwrap_err(), CoreError::MissingSender);

        let mut builder = TransactionBuilder::new();
        builder.set_sender(Address::from_u64(1));
        assert_eq!(builder.freeze().unwrap_err(), CoreError::MissingGasPayment);
    }

    #[test]
    fn test_self_reference_rejected() {
        let mut builder = ready_builder();
        builder.add_command(Command::MergeCoins {
            target: Argument::GasCoin,
            sources: vec![Argument::Result(0)],
        });
        assert_eq!(
            builder.freeze().unwrap_err(),
            CoreError::InvalidResultReference {
                command: 0,
                result: 0
            }
        );
    }

    #[test]
    fn test_nested_result_bounds() {
        let mut builder = ready_builder();
        let amount = builder.pure(10u64, PureType::U64).unwrap();
        let split = builder.split_coins(builder.gas(), vec![amount]);
        let recipient = builder.pure(Address::from_u64(0xB), PureType::Address).unwrap();
        builder.transfer_objects(vec![split.nested(1)], recipient);
        assert_eq!(
            builder.freeze().unwrap_err(),
            CoreError::NestedResultOutOfBounds {
                command: 1,
                result: 0,
                sub_index: 1,
                arity: 1
            }
        );
    }

    #[test]
    fn test_whole_result_of_multi_value_command() {
        let mut builder = ready_builder();
        let a = builder.pure(1u64, PureType::U64).unwrap();
        let b = builder.pure(2u64, PureType::U64).unwrap();
        let split = builder.split_coins(Argument::GasCoin, vec![a, b]);
        builder.merge_coins(Argument::GasCoin, vec![split.into()]);
        assert!(matches!(
            builder.freeze(),
            Err(CoreError::ResultArityMismatch { arity: 2, .. })
        ));
    }

    #[test]
    fn test_invalid_input_index() {
        let mut builder = ready_builder();
        builder.transfer_objects(vec![Argument::Input(3)], Argument::GasCoin);
        assert!(matches!(
            builder.freeze(),
            Err(CoreError::InvalidInputIndex { index: 3, len: 0, .. })
        ));
    }

    #[test]
    fn test_unconsumed_split_is_linted() {
        let mut builder = ready_builder();
        let amount = builder.pure(10u64, PureType::U64).unwrap();
        builder.split_coins(Argument::GasCoin, vec![amount]);
        assert_eq!(
            builder.unconsumed_results(),
            vec![UnconsumedResult {
                command: 0,
                sub_index: Some(0)
            }]
        );
        assert!(builder.freeze().is_ok());
    }

    #[test]
    fn test_strict_linearity_rejects_unconsumed() {
        let limits = BuilderLimits {
            strict_linearity: true,
            ..BuilderLimits::default()
        };
        let mut builder = TransactionBuilder::with_limits(limits, GasConfig::default());
        builder
            .set_sender(Address::from_u64(0xA))
            .set_gas_payment(vec![coin(0x100)]);
        builder.publish(vec![vec![0xa1, 0x1c, 0xeb, 0x0b]], vec![ObjectId::from_u64(1)]);
        assert_eq!(
            builder.freeze().unwrap_err(),
            CoreError::UnconsumedResult {
                command: 0,
                sub_index: None
            }
        );
    }

    #[test]
    fn test_too_many_type_arguments() {
        let mut builder = ready_builder();
        builder.move_call(
            ObjectId::from_u64(2),
            "m",
            "f",
            vec![TypeTag::U8; 17],
            vec![],
        );
        assert!(matches!(
            builder.freeze(),
            Err(CoreError::TooManyTypeArguments { count: 17, .. })
        ));
    }
}
