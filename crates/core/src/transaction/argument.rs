//! Arguments: how a command names the values it consumes.

use ptb_io::{BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use std::fmt;

/// A reference to a value available to a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Argument {
    /// The coin paying for gas
    GasCoin,
    /// The input at this index
    Input(u16),
    /// The single value produced by the command at this index
    Result(u16),
    /// Value `j` of the several produced by command `i`
    NestedResult(u16, u16),
}

impl Argument {
    /// The command whose output this argument reads, if any.
    pub fn result_command(&self) -> Option<u16> {
        match self {
            Argument::Result(i) | Argument::NestedResult(i, _) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::GasCoin => write!(f, "GasCoin"),
            Argument::Input(i) => write!(f, "Input({})", i),
            Argument::Result(i) => write!(f, "Result({})", i),
            Argument::NestedResult(i, j) => write!(f, "NestedResult({}, {})", i, j),
        }
    }
}

impl Serializable for Argument {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        match self {
            Argument::GasCoin => writer.write_u8(0),
            Argument::Input(i) => {
                writer.write_u8(1);
                writer.write_u16(*i);
            }
            Argument::Result(i) => {
                writer.write_u8(2);
                writer.write_u16(*i);
            }
            Argument::NestedResult(i, j) => {
                writer.write_u8(3);
                writer.write_u16(*i);
                writer.write_u16(*j);
            }
        }
        Ok(())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        match reader.read_u8()? {
            0 => Ok(Argument::GasCoin),
            1 => Ok(Argument::Input(reader.read_u16()?)),
            2 => Ok(Argument::Result(reader.read_u16()?)),
            3 => Ok(Argument::NestedResult(reader.read_u16()?, reader.read_u16()?)),
            tag => Err(IoError::invalid_data(format!("unknown argument tag {}", tag))),
        }
    }
}
