// Copyright (C) 2024-2025 R3E Network.
//
// serialization.rs file belongs to the ptb-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Canonical binary layout of transaction data.
//!
//! ```text
//! sender | gas refs | gas budget | gas price | gas owner | inputs | commands
//! ```
//! Lists carry a ULEB128 count; integers are little-endian.

use super::command::Command;
use super::core::{GasData, TransactionData};
use super::input::Input;
use crate::primitives::{Address, ObjectArg, ObjectDigest, ObjectId, ObjectRef};
use crate::pure_value::PureType;
use ptb_config::DIGEST_LENGTH;
use ptb_io::serializable::helper::{deserialize_array, serialize_array};
use ptb_io::{BinaryWriter, IoError, IoResult, MemoryReader, Serializable};

const MAX_WIRE_LIST: usize = u16::MAX as usize;
const MAX_PURE_BYTES: usize = u32::MAX as usize;

impl Serializable for ObjectRef {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(self.object_id.as_bytes());
        writer.write_u64(self.version);
        writer.write_var_bytes(self.digest.as_bytes());
        Ok(())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let object_id = ObjectId::new(reader.read_fixed::<32>()?);
        let version = reader.read_u64()?;
        let digest = reader.read_var_bytes(DIGEST_LENGTH)?;
        let digest =
            ObjectDigest::from_slice(&digest).map_err(|e| IoError::invalid_data(e.to_string()))?;
        Ok(Self {
            object_id,
            version,
            digest,
        })
    }
}

impl Serializable for ObjectArg {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        match self {
            ObjectArg::ImmOrOwned(object_ref) => {
                writer.write_u8(0);
                object_ref.serialize(writer)
            }
            ObjectArg::Shared {
                id,
                initial_shared_version,
                mutable,
            } => {
                writer.write_u8(1);
                writer.write_bytes(id.as_bytes());
                writer.write_u64(*initial_shared_version);
                writer.write_bool(*mutable);
                Ok(())
            }
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        match reader.read_u8()? {
            0 => Ok(ObjectArg::ImmOrOwned(ObjectRef::deserialize(reader)?)),
            1 => Ok(ObjectArg::Shared {
                id: ObjectId::new(reader.read_fixed::<32>()?),
                initial_shared_version: reader.read_u64()?,
                mutable: reader.read_bool()?,
            }),
            tag => Err(IoError::invalid_data(format!("unknown object arg tag {}", tag))),
        }
    }
}

impl Serializable for Input {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        match self {
            Input::Pure { ty, bytes } => {
                writer.write_u8(0);
                ty.serialize(writer)?;
                writer.write_var_bytes(bytes);
                Ok(())
            }
            Input::Object(arg) => {
                writer.write_u8(1);
                arg.serialize(writer)
            }
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        match reader.read_u8()? {
            0 => Ok(Input::Pure {
                ty: PureType::deserialize(reader)?,
                bytes: reader.read_var_bytes(MAX_PURE_BYTES)?,
            }),
            1 => Ok(Input::Object(ObjectArg::deserialize(reader)?)),
            tag => Err(IoError::invalid_data(format!("unknown input tag {}", tag))),
        }
    }
}

impl Serializable for TransactionData {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(self.sender.as_bytes());
        serialize_array(&self.gas_data.payment, writer)?;
        writer.write_u64(self.gas_data.budget);
        writer.write_u64(self.gas_data.price);
        writer.write_bytes(self.gas_data.owner.as_bytes());
        serialize_array(&self.inputs, writer)?;
        serialize_array(&self.commands, writer)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let sender = Address::new(reader.read_fixed::<32>()?);
        let payment = deserialize_array::<ObjectRef>(reader, MAX_WIRE_LIST)?;
        let budget = reader.read_u64()?;
        let price = reader.read_u64()?;
        let owner = Address::new(reader.read_fixed::<32>()?);
        let inputs = deserialize_array::<Input>(reader, MAX_WIRE_LIST + 1)?;
        let commands = deserialize_array::<Command>(reader, MAX_WIRE_LIST + 1)?;
        Ok(Self {
            sender,
            gas_data: GasData {
                payment,
                owner,
                price,
                budget,
            },
            inputs,
            commands,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Argument;
    use ptb_io::SerializableExt;

    fn sample() -> TransactionData {
        let sender = Address::from_u64(0xA11CE);
        TransactionData {
            sender,
            gas_data: GasData {
                payment: vec![ObjectRef::new(
                    ObjectId::from_u64(0x6A5),
                    7,
                    ObjectDigest::new([3u8; 32]),
                )],
                owner: sender,
                price: 1_000,
                budget: 100_000_000,
            },
            inputs: vec![
                Input::Pure {
                    ty: PureType::U64,
                    bytes: 100u64.to_le_bytes().to_vec(),
                },
                Input::Object(ObjectArg::Shared {
                    id: ObjectId::from_u64(6),
                    initial_shared_version: 1,
                    mutable: false,
                }),
            ],
            commands: vec![Command::SplitCoins {
                coin: Argument::GasCoin,
                amounts: vec![Argument::Input(0)],
            }],
        }
    }

    #[test]
    fn test_header_layout() {
        let data = sample();
        let bytes = data.to_array().unwrap();
        assert_eq!(&bytes[..32], data.sender.as_bytes());
        // one gas ref: count, id, version, digest length, digest
        assert_eq!(bytes[32], 1);
        let after_refs = 33 + 32 + 8 + 1 + 32;
        assert_eq!(
            &bytes[after_refs..after_refs + 8],
            &100_000_000u64.to_le_bytes()
        );
        assert_eq!(
            &bytes[after_refs + 8..after_refs + 16],
            &1_000u64.to_le_bytes()
        );
    }

    #[test]
    fn test_transaction_data_round_trip() {
        let data = sample();
        let bytes = data.to_array().unwrap();
        assert_eq!(TransactionData::from_array(&bytes).unwrap(), data);
    }

    #[test]
    fn test_truncated_bytes_rejected() {
        let bytes = sample().to_array().unwrap();
        assert!(TransactionData::from_array(&bytes[..bytes.len() - 1]).is_err());
        let mut extended = bytes.clone();
        extended.push(0);
        assert!(TransactionData::from_array(&extended).is_err());
    }
}
