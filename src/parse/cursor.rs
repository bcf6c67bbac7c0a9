use byteorder::{BigEndian, ByteOrder};

use crate::error::Error;

/// Sequential big-endian reader over a byte span.
///
/// Reads past the end of the span yield `0` instead of failing. Every loop
/// that consumes through a `Cursor` is bounded by a table-declared count, so
/// a truncated table produces zeroed fields rather than a crash; the bound
/// itself is always validated by the caller.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Cursor<'a> {
        Cursor { buf, pos: 0 }
    }

    pub fn at(buf: &'a [u8], offset: usize) -> Cursor<'a> {
        let mut cur = Cursor::new(buf);
        cur.seek(offset);
        cur
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Clamps to `[0, len]`.
    pub fn seek(&mut self, offset: usize) {
        self.pos = offset.min(self.buf.len());
    }

    pub fn skip(&mut self, num_bytes: usize) {
        let target = self.pos.saturating_add(num_bytes);
        self.seek(target);
    }

    pub fn read_u8(&mut self) -> u8 {
        if self.pos >= self.buf.len() {
            return 0;
        }
        let val = self.buf[self.pos];
        self.pos += 1;
        val
    }

    pub fn read_u16(&mut self) -> u16 {
        if self.pos + 2 <= self.buf.len() {
            let val = BigEndian::read_u16(&self.buf[self.pos..]);
            self.pos += 2;
            val
        } else {
            u16::from(self.read_u8()) << 8 | u16::from(self.read_u8())
        }
    }

    /// The raw 16-bit big-endian value reinterpreted as two's complement.
    pub fn read_i16(&mut self) -> i16 {
        self.read_u16() as i16
    }

    pub fn read_u32(&mut self) -> u32 {
        if self.pos + 4 <= self.buf.len() {
            let val = BigEndian::read_u32(&self.buf[self.pos..]);
            self.pos += 4;
            val
        } else {
            u32::from(self.read_u16()) << 16 | u32::from(self.read_u16())
        }
    }

    pub fn read_u64(&mut self) -> u64 {
        u64::from(self.read_u32()) << 32 | u64::from(self.read_u32())
    }
}

/// Big-endian writer over a fixed-capacity byte span.
///
/// The mirror image of `Cursor`, except that writes which do not fit are
/// hard errors: a miscomputed record size must surface as `BufferOverrun`
/// instead of silently truncating the artifact.
#[derive(Debug)]
pub struct WriteCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> WriteCursor<'a> {
    pub fn new(buf: &'a mut [u8]) -> WriteCursor<'a> {
        WriteCursor { buf, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, offset: usize) -> Result<(), Error> {
        if offset > self.buf.len() {
            return Err(Error::BufferOverrun {
                at: offset,
                len: 0,
                cap: self.buf.len(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    fn ensure(&self, len: usize) -> Result<(), Error> {
        if self.pos + len > self.buf.len() {
            return Err(Error::BufferOverrun {
                at: self.pos,
                len,
                cap: self.buf.len(),
            });
        }
        Ok(())
    }

    pub fn write_u8(&mut self, val: u8) -> Result<(), Error> {
        self.ensure(1)?;
        self.buf[self.pos] = val;
        self.pos += 1;
        Ok(())
    }

    pub fn write_u16(&mut self, val: u16) -> Result<(), Error> {
        self.ensure(2)?;
        BigEndian::write_u16(&mut self.buf[self.pos..], val);
        self.pos += 2;
        Ok(())
    }

    pub fn write_i16(&mut self, val: i16) -> Result<(), Error> {
        self.write_u16(val as u16)
    }

    pub fn write_u32(&mut self, val: u32) -> Result<(), Error> {
        self.ensure(4)?;
        BigEndian::write_u32(&mut self.buf[self.pos..], val);
        self.pos += 4;
        Ok(())
    }
}
