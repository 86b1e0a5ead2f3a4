// Copyright (C) 2024-2025 R3E Network.
//
// validation.rs file belongs to the ptb-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Structural validation of the command graph.

use super::argument::Argument;
use super::command::{Command, ResultArity};
use super::core::TransactionData;
use super::input::Input;
use crate::type_tag::is_valid_identifier;
use crate::{CoreError, CoreResult};
use ptb_config::{BuilderLimits, MAX_ADDRESSABLE_INDICES};
use std::collections::HashSet;
use std::fmt;

/// A produced value no later command consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnconsumedResult {
    pub command: u16,
    /// `None` for the single value of a one-result command
    pub sub_index: Option<u16>,
}

impl UnconsumedResult {
    /// The argument that would have consumed the value.
    pub fn argument(&self) -> Argument {
        match self.sub_index {
            Some(j) => Argument::NestedResult(self.command, j),
            None => Argument::Result(self.command),
        }
    }
}

impl fmt::Display for UnconsumedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argument())
    }
}

impl From<UnconsumedResult> for CoreError {
    fn from(value: UnconsumedResult) -> Self {
        CoreError::UnconsumedResult {
            command: value.command,
            sub_index: value.sub_index,
        }
    }
}

fn arity_of(arities: &[ResultArity], commands: &[Command], index: usize) -> ResultArity {
    arities
        .get(index)
        .copied()
        .unwrap_or_else(|| commands[index].default_arity())
}

impl TransactionData {
    /// Checks the limits and every argument reference.
    ///
    /// `arities[i]` is the declared result count of command `i`; missing
    /// entries fall back to [`Command::default_arity`].
    pub fn validate(&self, arities: &[ResultArity], limits: &BuilderLimits) -> CoreResult<()> {
        self.validate_gas(limits)?;
        self.validate_inputs(limits)?;
        self.validate_commands(arities, limits)
    }

    fn validate_gas(&self, limits: &BuilderLimits) -> CoreResult<()> {
        let count = self.gas_data.payment.len();
        if count == 0 {
            return Err(CoreError::MissingGasPayment);
        }
        if count > limits.max_gas_objects {
            return Err(CoreError::TooManyGasObjects {
                count,
                max: limits.max_gas_objects,
            });
        }
        Ok(())
    }

    fn validate_inputs(&self, limits: &BuilderLimits) -> CoreResult<()> {
        if self.inputs.len() > MAX_ADDRESSABLE_INDICES {
            return Err(CoreError::TooManyInputs {
                count: self.inputs.len(),
            });
        }

        let objects = self.object_input_count();
        if objects > limits.max_object_inputs {
            return Err(CoreError::TooManyObjectInputs {
                count: objects,
                max: limits.max_object_inputs,
            });
        }

        for (index, input) in self.inputs.iter().enumerate() {
            if let Input::Pure { bytes, .. } = input {
                if bytes.len() > limits.max_pure_argument_size {
                    return Err(CoreError::PureArgumentTooLarge {
                        input: index,
                        size: bytes.len(),
                        max: limits.max_pure_argument_size,
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_commands(&self, arities: &[ResultArity], limits: &BuilderLimits) -> CoreResult<()> {
        let max = limits.max_commands.min(MAX_ADDRESSABLE_INDICES);
        if self.commands.len() > max {
            return Err(CoreError::TooManyCommands {
                count: self.commands.len(),
                max,
            });
        }

        for (index, command) in self.commands.iter().enumerate() {
            if let Command::MoveCall(call) = command {
                if call.type_arguments.len() > limits.max_type_arguments {
                    return Err(CoreError::TooManyTypeArguments {
                        command: index,
                        count: call.type_arguments.len(),
                        max: limits.max_type_arguments,
                    });
                }
                for name in [&call.module, &call.function] {
                    if !is_valid_identifier(name) {
                        return Err(CoreError::InvalidIdentifier(name.clone()));
                    }
                }
            }
            for argument in command.arguments() {
                self.check_argument(index, argument, arities)?;
            }
        }
        Ok(())
    }

    fn check_argument(
        &self,
        command: usize,
        argument: &Argument,
        arities: &[ResultArity],
    ) -> CoreResult<()> {
        if let Some(result) = argument.result_command() {
            if result as usize >= command {
                return Err(CoreError::InvalidResultReference { command, result });
            }
        }
        match *argument {
            Argument::GasCoin => Ok(()),
            Argument::Input(index) => {
                if (index as usize) < self.inputs.len() {
                    Ok(())
                } else {
                    Err(CoreError::InvalidInputIndex {
                        command,
                        index,
                        len: self.inputs.len(),
                    })
                }
            }
            Argument::Result(result) => {
                match arity_of(arities, &self.commands, result as usize) {
                    ResultArity::Known(arity) if arity != 1 => {
                        Err(CoreError::ResultArityMismatch {
                            command,
                            result,
                            arity,
                        })
                    }
                    _ => Ok(()),
                }
            }
            Argument::NestedResult(result, sub_index) => {
                match arity_of(arities, &self.commands, result as usize) {
                    ResultArity::Known(arity) if sub_index >= arity => {
                        Err(CoreError::NestedResultOutOfBounds {
                            command,
                            result,
                            sub_index,
                            arity,
                        })
                    }
                    _ => Ok(()),
                }
            }
        }
    }

    /// Finds every produced value that no later command consumes.
    ///
    /// Only commands of known arity are reported. A value left unconsumed
    /// without the `drop` ability makes the node abort the whole
    /// transaction; locally it is a lint.
    pub fn unconsumed_results(&self, arities: &[ResultArity]) -> Vec<UnconsumedResult> {
        let mut whole = HashSet::new();
        let mut nested = HashSet::new();
        for command in &self.commands {
            for argument in command.arguments() {
                match *argument {
                    Argument::Result(i) => {
                        whole.insert(i);
                    }
                    Argument::NestedResult(i, j) => {
                        nested.insert((i, j));
                    }
                    _ => {}
                }
            }
        }

        let mut unconsumed = Vec::new();
        for index in 0..self.commands.len() {
            let Ok(command) = u16::try_from(index) else {
                break;
            };
            match arity_of(arities, &self.commands, index) {
                ResultArity::Known(1) => {
                    if !whole.contains(&command) && !nested.contains(&(command, 0)) {
                        unconsumed.push(UnconsumedResult {
                            command,
                            sub_index: None,
                        });
                    }
                }
                ResultArity::Known(arity) => {
                    for j in 0..arity {
                        if !nested.contains(&(command, j)) {
                            unconsumed.push(UnconsumedResult {
                                command,
                                sub_index: Some(j),
                            });
                        }
                    }
                }
                ResultArity::Unknown => {}
            }
        }
        unconsumed
    }
}
