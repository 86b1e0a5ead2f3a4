// Copyright (C) 2024-2025 R3E Network.
//
// serializable.rs file belongs to the ptb-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Serialization traits and utilities for transaction objects.

use crate::{BinaryWriter, IoResult, MemoryReader};

/// Represents objects with a canonical binary form.
pub trait Serializable {
    /// Serializes the object using the specified BinaryWriter.
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()>;

    /// Deserializes the object using the specified MemoryReader.
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self>
    where
        Self: Sized;
}

/// Extension methods for serializable objects.
pub trait SerializableExt: Serializable {
    /// Converts the object to a byte array.
    fn to_array(&self) -> IoResult<Vec<u8>> {
        let mut writer = BinaryWriter::new();
        self.serialize(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Creates an object from a byte array, rejecting trailing bytes.
    fn from_array(data: &[u8]) -> IoResult<Self>
    where
        Self: Sized,
    {
        let mut reader = MemoryReader::new(data);
        let value = Self::deserialize(&mut reader)?;
        reader.ensure_end()?;
        Ok(value)
    }
}

impl<T: Serializable> SerializableExt for T {}

/// Helper functions for serialization.
pub mod helper {
    use super::Serializable;
    use crate::{BinaryWriter, IoResult, MemoryReader};

    /// Serializes a ULEB128-prefixed collection of serializable objects.
    pub fn serialize_array<T: Serializable>(
        items: &[T],
        writer: &mut BinaryWriter,
    ) -> IoResult<()> {
        writer.write_uleb128(items.len() as u64);
        for item in items {
            item.serialize(writer)?;
        }
        Ok(())
    }

    /// Deserializes a ULEB128-prefixed collection of serializable objects.
    pub fn deserialize_array<T: Serializable>(
        reader: &mut MemoryReader,
        max: usize,
    ) -> IoResult<Vec<T>> {
        let count = reader.read_uleb128(max as u64)? as usize;
        let mut items = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            items.push(T::deserialize(reader)?);
        }
        Ok(items)
    }

    /// Gets the size of a ULEB128-encoded integer.
    pub fn get_var_size(value: u64) -> usize {
        let bits = 64 - value.leading_zeros() as usize;
        bits.max(1).div_ceil(7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IoError;

    #[derive(Debug, PartialEq)]
    struct TestStruct {
        value: u32,
    }

    impl Serializable for TestStruct {
        fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
            writer.write_u32(self.value);
            Ok(())
        }

        fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
            Ok(TestStruct {
                value: reader.read_u32()?,
            })
        }
    }

    #[test]
    fn test_serializable_roundtrip() {
        let original = TestStruct { value: 0x12345678 };
        let bytes = original.to_array().unwrap();
        let deserialized = TestStruct::from_array(&bytes).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_from_array_rejects_trailing_bytes() {
        let result = TestStruct::from_array(&[1, 0, 0, 0, 9]);
        assert_eq!(result, Err(IoError::TrailingBytes { count: 1 }));
    }

    #[test]
    fn test_serialize_array() {
        let items = vec![
            TestStruct { value: 1 },
            TestStruct { value: 2 },
            TestStruct { value: 3 },
        ];

        let mut writer = BinaryWriter::new();
        helper::serialize_array(&items, &mut writer).unwrap();
        let bytes = writer.into_bytes();
        assert_eq!(bytes[0], 3);

        let mut reader = MemoryReader::new(&bytes);
        let deserialized: Vec<TestStruct> = helper::deserialize_array(&mut reader, 1000).unwrap();

        assert_eq!(items, deserialized);
    }

    #[test]
    fn test_get_var_size() {
        assert_eq!(helper::get_var_size(0), 1);
        assert_eq!(helper::get_var_size(127), 1);
        assert_eq!(helper::get_var_size(128), 2);
        assert_eq!(helper::get_var_size(16_383), 2);
        assert_eq!(helper::get_var_size(16_384), 3);
        assert_eq!(helper::get_var_size(u64::MAX), 10);
    }
}
