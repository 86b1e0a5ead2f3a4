//! Value encoder for pure (non-object) transaction inputs.
//!
//! Values are loosely typed on the way in and checked against an explicit
//! [`PureType`]; the bytes written are little-endian fixed-width integers,
//! ULEB128 length prefixes for strings and vectors, and nothing else.

use crate::primitives::Address;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use ptb_io::{BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum nesting of `vector<...>` in a pure type.
pub const MAX_TYPE_DEPTH: usize = 16;

/// Errors raised by the value encoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Expected a value of type {expected}, got {found}")]
    TypeMismatch { expected: String, found: &'static str },

    #[error("Value {value} does not fit in {ty}")]
    OutOfRange { value: String, ty: String },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Encoded value is {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Invalid pure type: {0}")]
    InvalidType(String),

    #[error("Malformed value bytes: {0}")]
    Malformed(String),

    #[error("{count} trailing bytes after value")]
    TrailingBytes { count: usize },
}

impl From<IoError> for EncodingError {
    fn from(error: IoError) -> Self {
        match error {
            IoError::TrailingBytes { count } => EncodingError::TrailingBytes { count },
            other => EncodingError::Malformed(other.to_string()),
        }
    }
}

/// Declared type of a pure input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PureType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    String,
    Vector(Box<PureType>),
}

impl PureType {
    pub fn vector(inner: PureType) -> Self {
        PureType::Vector(Box::new(inner))
    }

    fn tag(&self) -> u8 {
        match self {
            PureType::Bool => 0,
            PureType::U8 => 1,
            PureType::U16 => 2,
            PureType::U32 => 3,
            PureType::U64 => 4,
            PureType::U128 => 5,
            PureType::U256 => 6,
            PureType::Address => 7,
            PureType::String => 8,
            PureType::Vector(_) => 9,
        }
    }

    fn integer_bits(&self) -> Option<u32> {
        match self {
            PureType::U8 => Some(8),
            PureType::U16 => Some(16),
            PureType::U32 => Some(32),
            PureType::U64 => Some(64),
            PureType::U128 => Some(128),
            PureType::U256 => Some(256),
            _ => None,
        }
    }

    fn parse_with_depth(s: &str, depth: usize) -> Result<Self, EncodingError> {
        if depth > MAX_TYPE_DEPTH {
            return Err(EncodingError::InvalidType(format!(
                "nesting deeper than {}",
                MAX_TYPE_DEPTH
            )));
        }
        let s = s.trim();
        let ty = match s {
            "bool" => PureType::Bool,
            "u8" => PureType::U8,
            "u16" => PureType::U16,
            "u32" => PureType::U32,
            "u64" => PureType::U64,
            "u128" => PureType::U128,
            "u256" => PureType::U256,
            "address" => PureType::Address,
            "string" | "String" | "0x1::string::String" | "0x1::ascii::String" => PureType::String,
            _ => {
                let inner = s
                    .strip_prefix("vector<")
                    .and_then(|rest| rest.strip_suffix('>'))
                    .ok_or_else(|| EncodingError::InvalidType(s.to_string()))?;
                PureType::vector(Self::parse_with_depth(inner, depth + 1)?)
            }
        };
        Ok(ty)
    }

    fn read_with_depth(reader: &mut MemoryReader, depth: usize) -> IoResult<Self> {
        if depth > MAX_TYPE_DEPTH {
            return Err(IoError::invalid_data("pure type nested too deeply"));
        }
        let ty = match reader.read_u8()? {
            0 => PureType::Bool,
            1 => PureType::U8,
            2 => PureType::U16,
            3 => PureType::U32,
            4 => PureType::U64,
            5 => PureType::U128,
            6 => PureType::U256,
            7 => PureType::Address,
            8 => PureType::String,
            9 => PureType::vector(Self::read_with_depth(reader, depth + 1)?),
            tag => return Err(IoError::invalid_data(format!("unknown pure type tag {}", tag))),
        };
        Ok(ty)
    }
}

impl FromStr for PureType {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_depth(s, 0)
    }
}

impl fmt::Display for PureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PureType::Bool => write!(f, "bool"),
            PureType::U8 => write!(f, "u8"),
            PureType::U16 => write!(f, "u16"),
            PureType::U32 => write!(f, "u32"),
            PureType::U64 => write!(f, "u64"),
            PureType::U128 => write!(f, "u128"),
            PureType::U256 => write!(f, "u256"),
            PureType::Address => write!(f, "address"),
            PureType::String => write!(f, "string"),
            PureType::Vector(inner) => write!(f, "vector<{}>", inner),
        }
    }
}

impl Serializable for PureType {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u8(self.tag());
        if let PureType::Vector(inner) = self {
            inner.serialize(writer)?;
        }
        Ok(())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        Self::read_with_depth(reader, 0)
    }
}

/// A loosely typed pure value, checked against a [`PureType`] at encode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PureValue {
    Bool(bool),
    /// Any integer up to 128 bits
    Number(u128),
    /// Integers that need the full u256 range
    BigNumber(BigUint),
    String(String),
    Address(Address),
    Bytes(Vec<u8>),
    Vector(Vec<PureValue>),
}

impl PureValue {
    fn kind(&self) -> &'static str {
        match self {
            PureValue::Bool(_) => "bool",
            PureValue::Number(_) => "number",
            PureValue::BigNumber(_) => "big number",
            PureValue::String(_) => "string",
            PureValue::Address(_) => "address",
            PureValue::Bytes(_) => "bytes",
            PureValue::Vector(_) => "vector",
        }
    }

    fn mismatch(&self, ty: &PureType) -> EncodingError {
        EncodingError::TypeMismatch {
            expected: ty.to_string(),
            found: self.kind(),
        }
    }

    /// Encodes this value as `ty`, rejecting results larger than `max_size`.
    pub fn encode(&self, ty: &PureType, max_size: usize) -> Result<Vec<u8>, EncodingError> {
        encode(self, ty, max_size)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for PureValue {
            fn from(value: $t) -> Self {
                PureValue::Number(value as u128)
            }
        })*
    };
}

impl_from_number!(u8, u16, u32, u64, u128);

impl From<bool> for PureValue {
    fn from(value: bool) -> Self {
        PureValue::Bool(value)
    }
}

impl From<BigUint> for PureValue {
    fn from(value: BigUint) -> Self {
        PureValue::BigNumber(value)
    }
}

impl From<&str> for PureValue {
    fn from(value: &str) -> Self {
        PureValue::String(value.to_string())
    }
}

impl From<String> for PureValue {
    fn from(value: String) -> Self {
        PureValue::String(value)
    }
}

impl From<Address> for PureValue {
    fn from(value: Address) -> Self {
        PureValue::Address(value)
    }
}

impl From<Vec<u8>> for PureValue {
    fn from(value: Vec<u8>) -> Self {
        PureValue::Bytes(value)
    }
}

impl From<Vec<PureValue>> for PureValue {
    fn from(value: Vec<PureValue>) -> Self {
        PureValue::Vector(value)
    }
}

/// Encodes `value` as `ty`.
pub fn encode(value: &PureValue, ty: &PureType, max_size: usize) -> Result<Vec<u8>, EncodingError> {
    let mut writer = BinaryWriter::new();
    encode_into(value, ty, &mut writer, max_size)?;
    check_size(writer.len(), max_size)?;
    Ok(writer.into_bytes())
}

/// Decodes canonical bytes of type `ty`; the exact inverse of [`encode`].
pub fn decode(bytes: &[u8], ty: &PureType, max_size: usize) -> Result<PureValue, EncodingError> {
    check_size(bytes.len(), max_size)?;
    let mut reader = MemoryReader::new(bytes);
    let value = decode_from(&mut reader, ty, max_size)?;
    if !reader.is_end() {
        return Err(EncodingError::TrailingBytes {
            count: reader.remaining(),
        });
    }
    Ok(value)
}

fn check_size(size: usize, max: usize) -> Result<(), EncodingError> {
    if size > max {
        return Err(EncodingError::TooLarge { size, max });
    }
    Ok(())
}

fn encode_into(
    value: &PureValue,
    ty: &PureType,
    writer: &mut BinaryWriter,
    max_size: usize,
) -> Result<(), EncodingError> {
    match ty {
        PureType::Bool => match value {
            PureValue::Bool(b) => writer.write_bool(*b),
            PureValue::String(s) if s == "true" || s == "false" => writer.write_bool(s == "true"),
            other => return Err(other.mismatch(ty)),
        },
        PureType::U256 => {
            let number = big_integer(value, ty)?;
            if number.bits() > 256 {
                return Err(EncodingError::OutOfRange {
                    value: number.to_string(),
                    ty: ty.to_string(),
                });
            }
            let mut bytes = number.to_bytes_le();
            bytes.resize(32, 0);
            writer.write_bytes(&bytes);
        }
        PureType::U8 | PureType::U16 | PureType::U32 | PureType::U64 | PureType::U128 => {
            let bits = ty.integer_bits().unwrap_or(128);
            let number = big_integer(value, ty)?;
            let out_of_range = || EncodingError::OutOfRange {
                value: number.to_string(),
                ty: ty.to_string(),
            };
            let n = number.to_u128().ok_or_else(out_of_range)?;
            if bits < 128 && n >> bits != 0 {
                return Err(out_of_range());
            }
            writer.write_bytes(&n.to_le_bytes()[..(bits / 8) as usize]);
        }
        PureType::Address => {
            let address = match value {
                PureValue::Address(address) => *address,
                PureValue::String(s) => s
                    .parse()
                    .map_err(|_| EncodingError::InvalidValue(format!("not an address: {}", s)))?,
                PureValue::Bytes(bytes) => Address::from_slice(bytes)
                    .map_err(|e| EncodingError::InvalidValue(e.to_string()))?,
                other => return Err(other.mismatch(ty)),
            };
            writer.write_bytes(address.as_bytes());
        }
        PureType::String => match value {
            PureValue::String(s) => {
                check_size(s.len(), max_size)?;
                writer.write_var_string(s);
            }
            other => return Err(other.mismatch(ty)),
        },
        PureType::Vector(inner) => match (value, inner.as_ref()) {
            (PureValue::Bytes(bytes), PureType::U8) => {
                check_size(bytes.len(), max_size)?;
                writer.write_var_bytes(bytes);
            }
            (PureValue::Vector(items), _) => {
                writer.write_uleb128(items.len() as u64);
                for item in items {
                    encode_into(item, inner, writer, max_size)?;
                    check_size(writer.len(), max_size)?;
                }
            }
            (other, _) => return Err(other.mismatch(ty)),
        },
    }
    Ok(())
}

fn big_integer(value: &PureValue, ty: &PureType) -> Result<BigUint, EncodingError> {
    match value {
        PureValue::Number(n) => Ok(BigUint::from(*n)),
        PureValue::BigNumber(n) => Ok(n.clone()),
        PureValue::String(s) => BigUint::from_str(s.trim())
            .map_err(|_| EncodingError::InvalidValue(format!("not a decimal integer: {:?}", s))),
        other => Err(other.mismatch(ty)),
    }
}

fn decode_from(
    reader: &mut MemoryReader,
    ty: &PureType,
    max_size: usize,
) -> Result<PureValue, EncodingError> {
    let value = match ty {
        PureType::Bool => PureValue::Bool(reader.read_bool()?),
        PureType::U8 => PureValue::Number(reader.read_u8()? as u128),
        PureType::U16 => PureValue::Number(reader.read_u16()? as u128),
        PureType::U32 => PureValue::Number(reader.read_u32()? as u128),
        PureType::U64 => PureValue::Number(reader.read_u64()? as u128),
        PureType::U128 => PureValue::Number(reader.read_u128()?),
        PureType::U256 => PureValue::BigNumber(BigUint::from_bytes_le(&reader.read_fixed::<32>()?)),
        PureType::Address => PureValue::Address(Address::new(reader.read_fixed::<32>()?)),
        PureType::String => PureValue::String(reader.read_var_string(max_size)?),
        PureType::Vector(inner) => match inner.as_ref() {
            PureType::U8 => PureValue::Bytes(reader.read_var_bytes(max_size)?),
            _ => {
                let count = reader.read_uleb128(max_size as u64)? as usize;
                let mut items = Vec::with_capacity(count.min(reader.remaining()));
                for _ in 0..count {
                    items.push(decode_from(reader, inner, max_size)?);
                }
                PureValue::Vector(items)
            }
        },
    };
    Ok(value)
}
