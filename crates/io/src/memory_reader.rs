//! Cursor over a borrowed byte slice, the counterpart of [`BinaryWriter`](crate::BinaryWriter).

use crate::{IoError, IoResult};

pub struct MemoryReader<'a> {
    memory: &'a [u8],
    pos: usize,
}

impl<'a> MemoryReader<'a> {
    pub fn new(memory: &'a [u8]) -> Self {
        Self { memory, pos: 0 }
    }

    #[inline(always)]
    fn ensure_position(&self, move_by: usize, entity: &str) -> IoResult<()> {
        if self.pos + move_by > self.memory.len() {
            Err(IoError::end_of_stream(entity))
        } else {
            Ok(())
        }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.memory.len() - self.pos
    }

    pub fn is_end(&self) -> bool {
        self.pos == self.memory.len()
    }

    /// Fails unless every byte has been consumed.
    pub fn ensure_end(&self) -> IoResult<()> {
        match self.remaining() {
            0 => Ok(()),
            count => Err(IoError::TrailingBytes { count }),
        }
    }

    #[inline(always)]
    pub fn peek(&self) -> IoResult<u8> {
        self.ensure_position(1, "u8")?;
        Ok(self.memory[self.pos])
    }

    pub fn read_bool(&mut self) -> IoResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(IoError::invalid_data(format!(
                "Invalid boolean value {}",
                other
            ))),
        }
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> IoResult<u8> {
        self.ensure_position(1, "u8")?;
        let value = self.memory[self.pos];
        self.pos += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> IoResult<u16> {
        Ok(u16::from_le_bytes(self.read_fixed::<2>()?))
    }

    pub fn read_u32(&mut self) -> IoResult<u32> {
        Ok(u32::from_le_bytes(self.read_fixed::<4>()?))
    }

    pub fn read_u64(&mut self) -> IoResult<u64> {
        Ok(u64::from_le_bytes(self.read_fixed::<8>()?))
    }

    pub fn read_u128(&mut self) -> IoResult<u128> {
        Ok(u128::from_le_bytes(self.read_fixed::<16>()?))
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_fixed<const N: usize>(&mut self) -> IoResult<[u8; N]> {
        let slice = self.read_memory(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    pub fn read_memory(&mut self, count: usize) -> IoResult<&'a [u8]> {
        self.ensure_position(count, "bytes")?;
        let result = &self.memory[self.pos..self.pos + count];
        self.pos += count;
        Ok(result)
    }

    /// Reads a canonical ULEB128 integer no larger than `max`.
    ///
    /// Over-long encodings (a redundant trailing zero group) are rejected so
    /// that every value has exactly one byte representation.
    pub fn read_uleb128(&mut self, max: u64) -> IoResult<u64> {
        let mut value: u64 = 0;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            let digit = (byte & 0x7F) as u64;
            if shift == 63 && digit > 1 {
                return Err(IoError::invalid_data("ULEB128 value overflows u64"));
            }
            value |= digit << shift;
            if byte & 0x80 == 0 {
                if shift > 0 && digit == 0 {
                    return Err(IoError::invalid_data("Non-canonical ULEB128 encoding"));
                }
                break;
            }
            shift += 7;
            if shift > 63 {
                return Err(IoError::invalid_data("ULEB128 value overflows u64"));
            }
        }
        if value > max {
            return Err(IoError::invalid_data(format!(
                "Length {} exceeds maximum {}",
                value, max
            )));
        }
        Ok(value)
    }

    pub fn read_var_bytes(&mut self, max: usize) -> IoResult<Vec<u8>> {
        let length = self.read_uleb128(max as u64)? as usize;
        Ok(self.read_memory(length)?.to_vec())
    }

    pub fn read_var_string(&mut self, max: usize) -> IoResult<String> {
        let bytes = self.read_var_bytes(max)?;
        String::from_utf8(bytes).map_err(|_| IoError::invalid_data("Invalid UTF-8 sequence"))
    }
}
