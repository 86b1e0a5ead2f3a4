//! Commands of a programmable transaction.

use super::argument::Argument;
use crate::primitives::ObjectId;
use crate::type_tag::{TypeTag, MAX_IDENTIFIER_LENGTH};
use ptb_io::serializable::helper::{deserialize_array, serialize_array};
use ptb_io::{BinaryWriter, IoError, IoResult, MemoryReader, Serializable};

/// Upper bound on any list read back from the wire; the freeze limits are tighter.
const MAX_WIRE_LIST: usize = u16::MAX as usize;
/// Upper bound on a single compiled module read back from the wire.
const MAX_MODULE_BYTES: usize = u32::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgrammableMoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    TransferObjects {
        objects: Vec<Argument>,
        recipient: Argument,
    },
    SplitCoins {
        coin: Argument,
        amounts: Vec<Argument>,
    },
    MergeCoins {
        target: Argument,
        sources: Vec<Argument>,
    },
    Publish {
        modules: Vec<Vec<u8>>,
        dependencies: Vec<ObjectId>,
    },
}

/// How many values a command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultArity {
    Known(u16),
    /// A module call whose return count was not declared
    Unknown,
}

impl Command {
    pub fn move_call(
        package: ObjectId,
        module: impl Into<String>,
        function: impl Into<String>,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> Self {
        Command::MoveCall(Box::new(ProgrammableMoveCall {
            package,
            module: module.into(),
            function: function.into(),
            type_arguments,
            arguments,
        }))
    }

    /// Every argument the command consumes, in operand order.
    pub fn arguments(&self) -> Vec<&Argument> {
        match self {
            Command::MoveCall(call) => call.arguments.iter().collect(),
            Command::TransferObjects { objects, recipient } => {
                objects.iter().chain(std::iter::once(recipient)).collect()
            }
            Command::SplitCoins { coin, amounts } => {
                std::iter::once(coin).chain(amounts.iter()).collect()
            }
            Command::MergeCoins { target, sources } => {
                std::iter::once(target).chain(sources.iter()).collect()
            }
            Command::Publish { .. } => Vec::new(),
        }
    }

    /// Arity implied by the command kind alone.
    ///
    /// A publish yields its upgrade capability; module calls are unknown
    /// unless the caller declared a count when adding them.
    pub fn default_arity(&self) -> ResultArity {
        match self {
            Command::MoveCall(_) => ResultArity::Unknown,
            Command::TransferObjects { .. } | Command::MergeCoins { .. } => ResultArity::Known(0),
            Command::SplitCoins { amounts, .. } => {
                ResultArity::Known(u16::try_from(amounts.len()).unwrap_or(u16::MAX))
            }
            Command::Publish { .. } => ResultArity::Known(1),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::MoveCall(_) => "MoveCall",
            Command::TransferObjects { .. } => "TransferObjects",
            Command::SplitCoins { .. } => "SplitCoins",
            Command::MergeCoins { .. } => "MergeCoins",
            Command::Publish { .. } => "Publish",
        }
    }
}

impl Serializable for ProgrammableMoveCall {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(self.package.as_bytes());
        writer.write_var_string(&self.module);
        writer.write_var_string(&self.function);
        serialize_array(&self.type_arguments, writer)?;
        serialize_array(&self.arguments, writer)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        Ok(Self {
            package: ObjectId::new(reader.read_fixed::<32>()?),
            module: reader.read_var_string(MAX_IDENTIFIER_LENGTH)?,
            function: reader.read_var_string(MAX_IDENTIFIER_LENGTH)?,
            type_arguments: deserialize_array(reader, MAX_WIRE_LIST)?,
            arguments: deserialize_array(reader, MAX_WIRE_LIST)?,
        })
    }
}

impl Serializable for Command {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        match self {
            Command::MoveCall(call) => {
                writer.write_u8(0);
                call.serialize(writer)
            }
            Command::TransferObjects { objects, recipient } => {
                writer.write_u8(1);
                serialize_array(objects, writer)?;
                recipient.serialize(writer)
            }
            Command::SplitCoins { coin, amounts } => {
                writer.write_u8(2);
                coin.serialize(writer)?;
                serialize_array(amounts, writer)
            }
            Command::MergeCoins { target, sources } => {
                writer.write_u8(3);
                target.serialize(writer)?;
                serialize_array(sources, writer)
            }
            Command::Publish {
                modules,
                dependencies,
            } => {
                writer.write_u8(4);
                writer.write_uleb128(modules.len() as u64);
                for module in modules {
                    writer.write_var_bytes(module);
                }
                writer.write_uleb128(dependencies.len() as u64);
                for dependency in dependencies {
                    writer.write_bytes(dependency.as_bytes());
                }
                Ok(())
            }
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let command = match reader.read_u8()? {
            0 => Command::MoveCall(Box::new(ProgrammableMoveCall::deserialize(reader)?)),
            1 => Command::TransferObjects {
                objects: deserialize_array(reader, MAX_WIRE_LIST)?,
                recipient: Argument::deserialize(reader)?,
            },
            2 => Command::SplitCoins {
                coin: Argument::deserialize(reader)?,
                amounts: deserialize_array(reader, MAX_WIRE_LIST)?,
            },
            3 => Command::MergeCoins {
                target: Argument::deserialize(reader)?,
                sources: deserialize_array(reader, MAX_WIRE_LIST)?,
            },
            4 => {
                let count = reader.read_uleb128(MAX_WIRE_LIST as u64)? as usize;
                let mut modules = Vec::with_capacity(count.min(reader.remaining()));
                for _ in 0..count {
                    modules.push(reader.read_var_bytes(MAX_MODULE_BYTES)?);
                }
                let count = reader.read_uleb128(MAX_WIRE_LIST as u64)? as usize;
                let mut dependencies = Vec::with_capacity(count.min(reader.remaining()));
                for _ in 0..count {
                    dependencies.push(ObjectId::new(reader.read_fixed::<32>()?));
                }
                Command::Publish {
                    modules,
                    dependencies,
                }
            }
            tag => return Err(IoError::invalid_data(format!("unknown command tag {}", tag))),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptb_io::SerializableExt;

    #[test]
    fn test_default_arity() {
        let split = Command::SplitCoins {
            coin: Argument::GasCoin,
            amounts: vec![Argument::Input(0), Argument::Input(1)],
        };
        assert_eq!(split.default_arity(), ResultArity::Known(2));

        let publish = Command::Publish {
            modules: vec![vec![0xa1, 0x1c]],
            dependencies: vec![ObjectId::from_u64(1)],
        };
        assert_eq!(publish.default_arity(), ResultArity::Known(1));

        let call = Command::move_call(ObjectId::from_u64(2), "m", "f", vec![], vec![]);
        assert_eq!(call.default_arity(), ResultArity::Unknown);
    }

    #[test]
    fn test_arguments_in_operand_order() {
        let transfer = Command::TransferObjects {
            objects: vec![Argument::Result(0), Argument::NestedResult(1, 0)],
            recipient: Argument::Input(2),
        };
        assert_eq!(
            transfer.arguments(),
            vec![
                &Argument::Result(0),
                &Argument::NestedResult(1, 0),
                &Argument::Input(2)
            ]
        );
    }

    #[test]
    fn test_command_round_trip() {
        let commands = vec![
            Command::move_call(
                ObjectId::from_u64(2),
                "coin",
                "split",
                vec![TypeTag::U64],
                vec![Argument::Input(0), Argument::Input(1)],
            ),
            Command::MergeCoins {
                target: Argument::GasCoin,
                sources: vec![Argument::NestedResult(0, 0)],
            },
            Command::Publish {
                modules: vec![vec![1, 2, 3]],
                dependencies: vec![ObjectId::from_u64(1), ObjectId::from_u64(2)],
            },
        ];
        for command in commands {
            let bytes = command.to_array().unwrap();
            assert_eq!(Command::from_array(&bytes).unwrap(), command);
        }
    }
}
