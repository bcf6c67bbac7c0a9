use crate::error::Error;
use crate::parse::font_directory::{parse_font_directory, FontDirectory, ScalerType};
use crate::parse::Cursor;
use crate::tables::cmap::Format4;
use crate::tables::glyf::{decode_outline, GlyphHeader, Outline};
use crate::tables::loca::{IndexToLocFormat, Loca};
use crate::tables::TableTag;
use crate::trace::{DecodeTrace, NoTrace};

/// Parsed summary of one TrueType font.
///
/// Immutable after construction and holding only shared borrows of the raw
/// bytes, so it can be shared across threads freely; each decode call
/// allocates its own output.
#[derive(Debug)]
pub struct Font<'a> {
    buf: &'a [u8],
    pub units_per_em: u16,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub index_to_loc_format: IndexToLocFormat,
    pub num_glyphs: u16,
    loca: u32,
    glyf: u32,
    /// Located but unused: consumers that layout text want these.
    pub hhea: Option<u32>,
    pub hmtx: Option<u32>,
    pub kern: Option<u32>,
    pub gpos: Option<u32>,
    cmap: Format4<'a>,
}

fn required(dir: &FontDirectory, tag: TableTag, name: &'static str) -> Result<u32, Error> {
    dir.table_offset(tag).ok_or(Error::TableNotFound(name))
}

impl<'a> Font<'a> {
    pub fn from_buffer(buf: &'a [u8]) -> Result<Font<'a>, Error> {
        let font_dir = parse_font_directory(buf)
            .map_err(|_| Error::UnsupportedFontFormat)?
            .1;
        // Only the 0x00010000 flavor carries glyf outlines we understand;
        // 'OTTO' (CFF) and friends are rejected up front.
        if font_dir.offsets.scaler_type != ScalerType::TrueType {
            return Err(Error::UnsupportedFontFormat);
        }

        let head = required(&font_dir, TableTag::FontHeader, "head")?;
        let maxp = required(&font_dir, TableTag::MaximumProfile, "maxp")?;
        let loca = required(&font_dir, TableTag::GlyphLocation, "loca")?;
        let glyf = required(&font_dir, TableTag::GlyphOutline, "glyf")?;
        let cmap_table = required(&font_dir, TableTag::CharacterCodeMapping, "cmap")?;
        let hhea = font_dir.table_offset(TableTag::HorizontalHeader);
        let hmtx = font_dir.table_offset(TableTag::HorizontalMetrics);
        let kern = font_dir.table_offset(TableTag::Kerning);
        let gpos = font_dir.table_offset(TableTag::GlyphPositioning);

        // head: 18 bytes of version/revision/checksum/magic/flags precede
        // unitsPerEm; the two 8-byte dates follow it.
        let mut cur = Cursor::at(buf, head as usize);
        cur.skip(18);
        let units_per_em = cur.read_u16();
        if units_per_em < 16 || units_per_em > 16384 {
            return Err(Error::InvalidUnitsPerEm(units_per_em));
        }
        cur.skip(16); // created, modified
        let x_min = cur.read_i16();
        let y_min = cur.read_i16();
        let x_max = cur.read_i16();
        let y_max = cur.read_i16();
        cur.skip(6); // macStyle, lowestRecPPEM, fontDirectionHint
        let loc_raw = cur.read_i16();
        let index_to_loc_format =
            IndexToLocFormat::from_raw(loc_raw).ok_or(Error::UnsupportedFontFormat)?;

        let num_glyphs = Cursor::at(buf, maxp as usize + 4).read_u16();

        let cmap = Font::select_cmap(buf, cmap_table as usize)?;

        debug!(
            "font tables: head={:#x} maxp={:#x} loca={:#x} glyf={:#x} cmap={:#x}; \
             {} glyphs, {} units/em, loca format {:?}",
            head, maxp, loca, glyf, cmap_table, num_glyphs, units_per_em, index_to_loc_format
        );

        Ok(Font {
            buf,
            units_per_em,
            x_min,
            y_min,
            x_max,
            y_max,
            index_to_loc_format,
            num_glyphs,
            loca,
            glyf,
            hhea,
            hmtx,
            kern,
            gpos,
            cmap,
        })
    }

    /// Picks the first encoding record covering the Unicode BMP: Windows
    /// (platform 3, encoding 0/1/10) or Unicode (platform 0, encoding 0-4).
    fn select_cmap(buf: &'a [u8], cmap_table: usize) -> Result<Format4<'a>, Error> {
        let mut cur = Cursor::at(buf, cmap_table);
        let version = cur.read_u16();
        if version != 0 {
            debug!("unexpected cmap version {}", version);
        }
        let num_records = cur.read_u16();
        for _ in 0..num_records {
            let platform_id = cur.read_u16();
            let encoding_id = cur.read_u16();
            let subtable_offset = cur.read_u32();

            let is_windows_unicode =
                platform_id == 3 && (encoding_id == 0 || encoding_id == 1 || encoding_id == 10);
            let is_unicode = platform_id == 0 && encoding_id <= 4;
            if is_windows_unicode || is_unicode {
                return Format4::new(buf, cmap_table + subtable_offset as usize);
            }
        }
        Err(Error::NoSupportedCmap)
    }

    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    /// Glyph index for a BMP code point; 0 is the missing glyph.
    pub fn glyph_id(&self, code: u16) -> u16 {
        self.cmap.glyph_id(code, &mut NoTrace)
    }

    pub fn glyph_id_traced(&self, code: u16, trace: &mut dyn DecodeTrace) -> u16 {
        self.cmap.glyph_id(code, trace)
    }

    pub fn loca(&self) -> Loca<'a> {
        Loca::new(
            self.buf,
            self.loca as usize,
            self.index_to_loc_format,
            self.num_glyphs,
        )
    }

    /// Locates `glyph_id`'s record in `glyf` and reads its header. Glyphs
    /// that occupy no bytes (empty loca range) come back as an empty header
    /// rather than whatever happens to sit at the shared offset.
    pub fn glyph_header(&self, glyph_id: u16) -> Result<GlyphHeader, Error> {
        let loca = self.loca();
        if loca.is_empty_glyph(glyph_id)? {
            return Ok(GlyphHeader::empty());
        }
        let offset = loca.at(glyph_id)?;
        GlyphHeader::read(self.buf, self.glyf as usize + offset as usize)
    }

    /// cmap -> loca -> glyf composition for one code point.
    pub fn glyph_for_char(&self, code: u16) -> Result<GlyphHeader, Error> {
        self.glyph_header(self.glyph_id(code))
    }

    pub fn decode_outline(&self, header: &GlyphHeader) -> Result<Outline, Error> {
        decode_outline(self.buf, header, &mut NoTrace)
    }

    pub fn decode_outline_traced(
        &self,
        header: &GlyphHeader,
        trace: &mut dyn DecodeTrace,
    ) -> Result<Outline, Error> {
        decode_outline(self.buf, header, trace)
    }

    /// Full pipeline for one code point.
    pub fn outline_for_char(&self, code: u16) -> Result<Outline, Error> {
        self.decode_outline(&self.glyph_for_char(code)?)
    }
}
