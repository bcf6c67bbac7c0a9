use num_traits::FromPrimitive;

use crate::error::Error;
use crate::parse::Cursor;

/// Width of the `loca` entries, taken from `head.indexToLocFormat`.
#[repr(i16)]
#[derive(Debug, FromPrimitive, PartialEq, Eq, Clone, Copy)]
pub enum IndexToLocFormat {
    /// 2-byte entries holding offset / 2.
    Short = 0,
    /// 4-byte entries holding the offset directly.
    Long = 1,
}

impl IndexToLocFormat {
    pub fn from_raw(raw: i16) -> Option<IndexToLocFormat> {
        IndexToLocFormat::from_i16(raw)
    }
}

/// Borrowed view of the glyph location index: `num_glyphs + 1` entries of
/// byte offsets into `glyf`, where entry `i + 1` doubles as the end of
/// glyph `i`'s data.
#[derive(Debug, Clone, Copy)]
pub struct Loca<'a> {
    data: &'a [u8],
    offset: usize,
    format: IndexToLocFormat,
    num_glyphs: u16,
}

impl<'a> Loca<'a> {
    pub fn new(
        data: &'a [u8],
        offset: usize,
        format: IndexToLocFormat,
        num_glyphs: u16,
    ) -> Loca<'a> {
        Loca {
            data,
            offset,
            format,
            num_glyphs,
        }
    }

    /// Raw entry `index`, valid for `0..=num_glyphs`.
    fn entry(&self, index: u16) -> u32 {
        match self.format {
            IndexToLocFormat::Short => {
                let mut cur = Cursor::at(self.data, self.offset + index as usize * 2);
                u32::from(cur.read_u16()) * 2
            }
            IndexToLocFormat::Long => {
                let mut cur = Cursor::at(self.data, self.offset + index as usize * 4);
                cur.read_u32()
            }
        }
    }

    /// Byte offset of `glyph_id`'s outline within `glyf`.
    pub fn at(&self, glyph_id: u16) -> Result<u32, Error> {
        if glyph_id >= self.num_glyphs {
            return Err(Error::MalformedGlyph("glyph id past end of loca index"));
        }
        Ok(self.entry(glyph_id))
    }

    /// A glyph with no outline occupies zero bytes of `glyf`.
    pub fn is_empty_glyph(&self, glyph_id: u16) -> Result<bool, Error> {
        if glyph_id >= self.num_glyphs {
            return Err(Error::MalformedGlyph("glyph id past end of loca index"));
        }
        Ok(self.entry(glyph_id) == self.entry(glyph_id + 1))
    }
}
