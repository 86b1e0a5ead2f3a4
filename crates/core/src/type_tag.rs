//! Move type tags used as type arguments of module calls.

use crate::primitives::Address;
use crate::{CoreError, CoreResult};
use ptb_config::MAX_TYPE_ARGUMENTS;
use ptb_io::{BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use std::fmt;
use std::str::FromStr;

/// Maximum nesting of type parameters.
pub const MAX_TYPE_TAG_DEPTH: usize = 16;
/// Maximum length of a module, function or struct name.
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Checks a Move identifier: `[A-Za-z_][A-Za-z0-9_]*`, not a lone `_`.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') || s == "_" {
        return false;
    }
    s.len() <= MAX_IDENTIFIER_LENGTH && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructTag {
    pub address: Address,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
}

impl TypeTag {
    pub fn vector(inner: TypeTag) -> Self {
        TypeTag::Vector(Box::new(inner))
    }

    pub fn from_struct(tag: StructTag) -> Self {
        TypeTag::Struct(Box::new(tag))
    }

    fn read_with_depth(reader: &mut MemoryReader, depth: usize) -> IoResult<Self> {
        if depth > MAX_TYPE_TAG_DEPTH {
            return Err(IoError::invalid_data("type tag nested too deeply"));
        }
        let tag = match reader.read_u8()? {
            0 => TypeTag::Bool,
            1 => TypeTag::U8,
            2 => TypeTag::U64,
            3 => TypeTag::U128,
            4 => TypeTag::Address,
            5 => TypeTag::Signer,
            6 => TypeTag::vector(Self::read_with_depth(reader, depth + 1)?),
            7 => {
                let address = Address::new(reader.read_fixed::<32>()?);
                let module = read_identifier(reader)?;
                let name = read_identifier(reader)?;
                let count = reader.read_uleb128(MAX_TYPE_ARGUMENTS as u64)? as usize;
                let mut type_params = Vec::with_capacity(count);
                for _ in 0..count {
                    type_params.push(Self::read_with_depth(reader, depth + 1)?);
                }
                TypeTag::from_struct(StructTag {
                    address,
                    module,
                    name,
                    type_params,
                })
            }
            8 => TypeTag::U16,
            9 => TypeTag::U32,
            10 => TypeTag::U256,
            tag => return Err(IoError::invalid_data(format!("unknown type tag {}", tag))),
        };
        Ok(tag)
    }
}

fn read_identifier(reader: &mut MemoryReader) -> IoResult<String> {
    let identifier = reader.read_var_string(MAX_IDENTIFIER_LENGTH)?;
    if !is_valid_identifier(&identifier) {
        return Err(IoError::invalid_data(format!(
            "invalid identifier {:?}",
            identifier
        )));
    }
    Ok(identifier)
}

impl Serializable for TypeTag {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        match self {
            TypeTag::Bool => writer.write_u8(0),
            TypeTag::U8 => writer.write_u8(1),
            TypeTag::U64 => writer.write_u8(2),
            TypeTag::U128 => writer.write_u8(3),
            TypeTag::Address => writer.write_u8(4),
            TypeTag::Signer => writer.write_u8(5),
            TypeTag::Vector(inner) => {
                writer.write_u8(6);
                inner.serialize(writer)?;
            }
            TypeTag::Struct(tag) => {
                writer.write_u8(7);
                writer.write_bytes(tag.address.as_bytes());
                writer.write_var_string(&tag.module);
                writer.write_var_string(&tag.name);
                ptb_io::serializable::helper::serialize_array(&tag.type_params, writer)?;
            }
            TypeTag::U16 => writer.write_u8(8),
            TypeTag::U32 => writer.write_u8(9),
            TypeTag::U256 => writer.write_u8(10),
        }
        Ok(())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        Self::read_with_depth(reader, 0)
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if !self.type_params.is_empty() {
            write!(f, "<")?;
            for (i, param) in self.type_params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", param)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::U256 => write!(f, "u256"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
        }
    }
}

impl FromStr for TypeTag {
    type Err = CoreError;

    /// Parses `u64`, `vector<u8>` or `0x2::coin::Coin<0x2::sui::SUI>`.
    fn from_str(s: &str) -> CoreResult<Self> {
        let mut parser = TypeTagParser { input: s, pos: 0 };
        let tag = parser.parse_type(0)?;
        parser.skip_whitespace();
        if parser.pos != s.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(tag)
    }
}

impl FromStr for StructTag {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.parse::<TypeTag>()? {
            TypeTag::Struct(tag) => Ok(*tag),
            other => Err(CoreError::InvalidTypeTag(format!(
                "{} is not a struct type",
                other
            ))),
        }
    }
}

struct TypeTagParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TypeTagParser<'a> {
    fn error(&self, message: &str) -> CoreError {
        CoreError::InvalidTypeTag(format!("{} at {} in {:?}", message, self.pos, self.input))
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.input[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> CoreResult<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected {:?}", token)))
        }
    }

    fn word(&mut self) -> CoreResult<&'a str> {
        self.skip_whitespace();
        let rest = &self.input[self.pos..];
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error("expected a name"));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn identifier(&mut self) -> CoreResult<String> {
        let word = self.word()?;
        if !is_valid_identifier(word) {
            return Err(CoreError::InvalidIdentifier(word.to_string()));
        }
        Ok(word.to_string())
    }

    fn parse_type(&mut self, depth: usize) -> CoreResult<TypeTag> {
        if depth > MAX_TYPE_TAG_DEPTH {
            return Err(self.error("type nested too deeply"));
        }
        let word = self.word()?;
        let tag = match word {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u16" => TypeTag::U16,
            "u32" => TypeTag::U32,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "u256" => TypeTag::U256,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            "vector" => {
                self.expect("<")?;
                let inner = self.parse_type(depth + 1)?;
                self.expect(">")?;
                TypeTag::vector(inner)
            }
            _ => {
                let address: Address = word.parse()?;
                self.expect("::")?;
                let module = self.identifier()?;
                self.expect("::")?;
                let name = self.identifier()?;
                let mut type_params = Vec::new();
                if self.eat("<") {
                    loop {
                        type_params.push(self.parse_type(depth + 1)?);
                        if !self.eat(",") {
                            break;
                        }
                    }
                    self.expect(">")?;
                }
                TypeTag::from_struct(StructTag {
                    address,
                    module,
                    name,
                    type_params,
                })
            }
        };
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptb_io::SerializableExt;

    #[test]
    fn test_parse_coin_type() {
        let tag: TypeTag = "0x2::coin::Coin<0x2::sui::SUI>".parse().unwrap();
        let TypeTag::Struct(coin) = &tag else {
            panic!("expected struct, got {:?}", tag);
        };
        assert_eq!(coin.address, Address::from_u64(2));
        assert_eq!(coin.module, "coin");
        assert_eq!(coin.name, "Coin");
        assert_eq!(coin.type_params.len(), 1);

        let reparsed: TypeTag = tag.to_string().parse().unwrap();
        assert_eq!(reparsed, tag);
    }

    #[test]
    fn test_parse_nested_generics() {
        let tag: TypeTag = "vector<0x1::option::Option<u64>>".parse().unwrap();
        assert_eq!(
            tag.to_string(),
            format!("vector<{}::option::Option<u64>>", Address::from_u64(1))
        );
        let pair: TypeTag = "0x5::pair::Pair<u8, vector<bool>>".parse().unwrap();
        let TypeTag::Struct(pair) = pair else {
            panic!("expected struct");
        };
        assert_eq!(pair.type_params, vec![TypeTag::U8, TypeTag::vector(TypeTag::Bool)]);
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<TypeTag>().is_err());
        assert!("vector<u8".parse::<TypeTag>().is_err());
        assert!("0x2::coin".parse::<TypeTag>().is_err());
        assert!("0x2::1coin::Coin".parse::<TypeTag>().is_err());
        assert!("u64 u8".parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let tag: TypeTag = "0x2::coin::Coin<0x2::sui::SUI>".parse().unwrap();
        let bytes = tag.to_array().unwrap();
        assert_eq!(bytes[0], 7);
        assert_eq!(TypeTag::from_array(&bytes).unwrap(), tag);
        assert_eq!(TypeTag::U16.to_array().unwrap(), vec![8]);
    }

    #[test]
    fn test_identifiers() {
        assert!(is_valid_identifier("split_coin"));
        assert!(is_valid_identifier("_x"));
        assert!(!is_valid_identifier("_"));
        assert!(!is_valid_identifier("9lives"));
        assert!(!is_valid_identifier("a-b"));
    }
}
