use crate::boxes::FourCC;
use crate::parser::{ParseError, Result};
use byteorder::{BigEndian, ByteOrder};

/// Bounds-tracked cursor over a borrowed byte region.
///
/// All multi-byte reads are big-endian, per ISOBMFF. Every read is strict: a
/// read that would cross the end of the region fails with
/// [`ParseError::UnexpectedEnd`] and leaves the cursor where it was. The
/// reader owns no memory and must not outlive the buffer it borrows.
#[derive(Debug, Clone)]
pub struct BufferReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BufferReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        BufferReader { data, pos: 0 }
    }

    /// Current read position, relative to the start of the region.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Total length of the region.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the cursor and the end of the region.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn has_bytes(&self, count: usize) -> bool {
        self.remaining() >= count
    }

    /// The unread tail of the region. Borrows from the underlying buffer,
    /// not from the reader, so the slice may outlive `self`.
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Advance the cursor without interpreting the bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        if !self.has_bytes(count) {
            return Err(ParseError::UnexpectedEnd);
        }
        self.pos += count;
        Ok(())
    }

    /// Read `count` bytes as a subslice of the underlying buffer.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if !self.has_bytes(count) {
            return Err(ParseError::UnexpectedEnd);
        }
        let out = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(out)
    }

    /// Read `count` bytes into an owned vector.
    pub fn read_vec(&mut self, count: usize) -> Result<Vec<u8>> {
        self.read_bytes(count).map(|b| b.to_vec())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_bytes(2).map(BigEndian::read_u16)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_bytes(2).map(BigEndian::read_i16)
    }

    /// Read 3 bytes into the low 24 bits of a `u32` (FullBox flags width).
    pub fn read_u24(&mut self) -> Result<u32> {
        self.read_bytes(3).map(BigEndian::read_u24)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bytes(4).map(BigEndian::read_u32)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_bytes(4).map(BigEndian::read_i32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_bytes(8).map(BigEndian::read_u64)
    }

    pub fn read_fourcc(&mut self) -> Result<FourCC> {
        self.read_bytes(4)
            .map(|b| FourCC([b[0], b[1], b[2], b[3]]))
    }
}
