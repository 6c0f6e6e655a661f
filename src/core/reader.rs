//! Sequential reader over a received payload.
//!
//! The transport core hands received datagrams to listeners as a
//! [`DataReader`] borrowing from its pooled receive buffer. The borrow ends
//! when the notification returns, so a listener that needs the bytes later
//! must copy them out (see [`DataReader::remaining`]).
//!
//! All multi-byte values are little-endian.

use super::error::{ReadError, ReadResult};

/// Call-scoped, sequential view over a byte payload.
///
/// Cloning is cheap and yields an independent cursor over the same bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> DataReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes.
    pub fn available_bytes(&self) -> usize {
        self.data.len() - self.position
    }

    /// Check if every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.available_bytes() == 0
    }

    /// The whole underlying payload, including bytes already read.
    pub fn raw_data(&self) -> &'a [u8] {
        self.data
    }

    /// The unread bytes, without advancing.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    /// Advance past `count` bytes.
    pub fn skip(&mut self, count: usize) -> ReadResult<()> {
        self.take(count).map(|_| ())
    }

    /// Look at the next byte without advancing.
    pub fn peek_u8(&self) -> ReadResult<u8> {
        self.remaining()
            .first()
            .copied()
            .ok_or(ReadError::UnexpectedEof {
                needed: 1,
                available: 0,
            })
    }

    /// Read one byte.
    pub fn get_u8(&mut self) -> ReadResult<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Read a boolean (any non-zero byte is `true`).
    pub fn get_bool(&mut self) -> ReadResult<bool> {
        Ok(self.get_u8()? != 0)
    }

    /// Read a `u16`.
    pub fn get_u16(&mut self) -> ReadResult<u16> {
        self.take_array().map(u16::from_le_bytes)
    }

    /// Read an `i16`.
    pub fn get_i16(&mut self) -> ReadResult<i16> {
        self.take_array().map(i16::from_le_bytes)
    }

    /// Read a `u32`.
    pub fn get_u32(&mut self) -> ReadResult<u32> {
        self.take_array().map(u32::from_le_bytes)
    }

    /// Read an `i32`.
    pub fn get_i32(&mut self) -> ReadResult<i32> {
        self.take_array().map(i32::from_le_bytes)
    }

    /// Read a `u64`.
    pub fn get_u64(&mut self) -> ReadResult<u64> {
        self.take_array().map(u64::from_le_bytes)
    }

    /// Read an `i64`.
    pub fn get_i64(&mut self) -> ReadResult<i64> {
        self.take_array().map(i64::from_le_bytes)
    }

    /// Read an `f32`.
    pub fn get_f32(&mut self) -> ReadResult<f32> {
        self.take_array().map(f32::from_le_bytes)
    }

    /// Read an `f64`.
    pub fn get_f64(&mut self) -> ReadResult<f64> {
        self.take_array().map(f64::from_le_bytes)
    }

    /// Read exactly `count` bytes.
    pub fn get_bytes(&mut self, count: usize) -> ReadResult<&'a [u8]> {
        self.take(count)
    }

    /// Read everything that is left.
    pub fn get_remaining_bytes(&mut self) -> &'a [u8] {
        let rest = self.remaining();
        self.position = self.data.len();
        rest
    }

    /// Read a string prefixed by its UTF-8 byte length as a `u16`.
    ///
    /// On failure the position is left where it was before the call.
    pub fn get_string(&mut self) -> ReadResult<&'a str> {
        let start = self.position;
        let result = self
            .get_u16()
            .and_then(|len| self.take(len as usize))
            .and_then(|bytes| std::str::from_utf8(bytes).map_err(|_| ReadError::InvalidUtf8));
        if result.is_err() {
            self.position = start;
        }
        result
    }

    fn take(&mut self, count: usize) -> ReadResult<&'a [u8]> {
        let available = self.available_bytes();
        if count > available {
            return Err(ReadError::UnexpectedEof {
                needed: count,
                available,
            });
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

impl<'a> From<&'a [u8]> for DataReader<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}
