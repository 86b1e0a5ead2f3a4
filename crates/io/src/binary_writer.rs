//! Little-endian binary writer with ULEB128 length prefixes.

/// Writes primitive values into an owned, growable buffer.
///
/// Fixed-width integers are little-endian; lengths and counts are ULEB128.
///
/// ```rust
/// use ptb_io::BinaryWriter;
///
/// let mut writer = BinaryWriter::new();
/// writer.write_u32(42);
/// writer.write_var_string("pink");
///
/// assert_eq!(writer.to_bytes(), vec![42, 0, 0, 0, 4, b'p', b'i', b'n', b'k']);
/// ```
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    inner: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner
    }

    pub fn write_bool(&mut self, value: bool) {
        self.inner.push(value as u8);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.inner.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.inner.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.inner.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.inner.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u128(&mut self, value: u128) {
        self.inner.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes raw bytes without a length prefix.
    pub fn write_bytes(&mut self, buffer: &[u8]) {
        self.inner.extend_from_slice(buffer);
    }

    /// Writes an unsigned LEB128 integer (7 bits per byte, high bit = continuation).
    pub fn write_uleb128(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.inner.push(((value & 0x7F) as u8) | 0x80);
            value >>= 7;
        }
        self.inner.push(value as u8);
    }

    /// Writes a ULEB128 length followed by the bytes.
    pub fn write_var_bytes(&mut self, value: &[u8]) {
        self.write_uleb128(value.len() as u64);
        self.inner.extend_from_slice(value);
    }

    /// Writes a UTF-8 string as length-prefixed bytes.
    pub fn write_var_string(&mut self, value: &str) {
        self.write_var_bytes(value.as_bytes());
    }
}
