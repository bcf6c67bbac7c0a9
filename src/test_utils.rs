//! Shared fixtures: byte-level builders for sfnt containers, cmap format 4
//! subtables, and glyf records, plus a `DecodeTrace` sink that records
//! events for assertions.

use crate::trace::DecodeTrace;

pub fn push_u16(buf: &mut Vec<u8>, val: u16) {
    buf.extend_from_slice(&val.to_be_bytes());
}

pub fn push_i16(buf: &mut Vec<u8>, val: i16) {
    buf.extend_from_slice(&val.to_be_bytes());
}

pub fn push_u32(buf: &mut Vec<u8>, val: u32) {
    buf.extend_from_slice(&val.to_be_bytes());
}

#[derive(Default)]
pub struct RecordingTrace {
    pub segments: Vec<usize>,
    pub ghosts: Vec<(usize, i16, i16)>,
    pub closes: Vec<(usize, usize)>,
}

impl DecodeTrace for RecordingTrace {
    fn segment_match(&mut self, _code: u16, segment: usize, _start: u16, _end: u16) {
        self.segments.push(segment);
    }

    fn ghost_point(&mut self, index: usize, x: i16, y: i16) {
        self.ghosts.push((index, x, y));
    }

    fn contour_close(&mut self, contour: usize, end_index: usize) {
        self.closes.push((contour, end_index));
    }
}

/// Builds a format 4 subtable from `(start, end, id_delta, id_range_offset)`
/// segments. The terminating 0xFFFF sentinel segment is appended
/// automatically; `glyph_id_array` lands right after the idRangeOffset
/// array.
pub fn cmap_format4_subtable(
    segments: &[(u16, u16, u16, u16)],
    glyph_id_array: &[u16],
) -> Vec<u8> {
    let mut segs = segments.to_vec();
    segs.push((0xFFFF, 0xFFFF, 1, 0));
    let seg_count = segs.len() as u16;

    let length = 16 + 8 * seg_count + 2 * glyph_id_array.len() as u16;
    let entry_selector = 15 - seg_count.leading_zeros() as u16;
    let search_range = 2 * (1u16 << entry_selector);

    let mut buf = Vec::new();
    push_u16(&mut buf, 4); // format
    push_u16(&mut buf, length);
    push_u16(&mut buf, 0); // language
    push_u16(&mut buf, seg_count * 2);
    push_u16(&mut buf, search_range);
    push_u16(&mut buf, entry_selector);
    push_u16(&mut buf, seg_count * 2 - search_range);

    for &(_, end, _, _) in &segs {
        push_u16(&mut buf, end);
    }
    push_u16(&mut buf, 0); // reservedPad
    for &(start, _, _, _) in &segs {
        push_u16(&mut buf, start);
    }
    for &(_, _, delta, _) in &segs {
        push_u16(&mut buf, delta);
    }
    for &(_, _, _, range_offset) in &segs {
        push_u16(&mut buf, range_offset);
    }
    for &glyph in glyph_id_array {
        push_u16(&mut buf, glyph);
    }
    buf
}

/// Knobs for `sample_font_with`; the default builds a well-formed font.
pub struct SampleFont {
    pub units_per_em: u16,
    pub omit_glyf: bool,
    /// Platform and encoding id of the single cmap encoding record.
    pub cmap_platform: (u16, u16),
    /// Replace glyph 2's record with a composite stub.
    pub composite_glyph2: bool,
}

impl Default for SampleFont {
    fn default() -> SampleFont {
        SampleFont {
            units_per_em: 1000,
            omit_glyf: false,
            cmap_platform: (3, 1),
            composite_glyph2: false,
        }
    }
}

/// A three-glyph TrueType font: glyph 0 is a triangle, glyph 1 occupies no
/// glyf bytes, glyph 2 is a square. cmap maps code points 0..=2 to glyph
/// ids 0..=2.
pub fn sample_font() -> Vec<u8> {
    sample_font_with(SampleFont::default())
}

pub fn sample_font_with(cfg: SampleFont) -> Vec<u8> {
    let mut glyf = Vec::new();
    glyf.extend_from_slice(&simple_glyph(
        &[2],
        &[0x01, 0x01, 0x01],
        &[0, 100, -50],
        &[0, 0, 100],
    ));
    if glyf.len() % 2 != 0 {
        glyf.push(0); // short loca stores offset / 2
    }
    let glyph2_start = glyf.len() as u16;
    if cfg.composite_glyph2 {
        glyf.extend_from_slice(&composite_stub());
    } else {
        glyf.extend_from_slice(&simple_glyph(
            &[3],
            &[0x01, 0x01, 0x01, 0x01],
            &[0, 100, 0, -100],
            &[0, 0, 100, 0],
        ));
    }
    if glyf.len() % 2 != 0 {
        glyf.push(0);
    }
    let glyf_end = glyf.len() as u16;

    // num_glyphs + 1 entries; glyph 1 is the empty range in the middle.
    let mut loca = Vec::new();
    for entry in &[0, glyph2_start / 2, glyph2_start / 2, glyf_end / 2] {
        push_u16(&mut loca, *entry);
    }

    let mut cmap = Vec::new();
    push_u16(&mut cmap, 0); // version
    push_u16(&mut cmap, 1); // one encoding record
    push_u16(&mut cmap, cfg.cmap_platform.0);
    push_u16(&mut cmap, cfg.cmap_platform.1);
    push_u32(&mut cmap, 12); // subtable directly after the record
    cmap.extend_from_slice(&cmap_format4_subtable(&[(0, 2, 0, 0)], &[]));

    let mut tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
        (b"head", head_table(cfg.units_per_em)),
        (b"maxp", maxp_table(3)),
        (b"loca", loca),
        (b"cmap", cmap),
    ];
    if !cfg.omit_glyf {
        tables.push((b"glyf", glyf));
    }
    build_font(&tables)
}

/// Wraps raw table payloads in an sfnt container with a 0x00010000 version
/// tag and a well-formed table directory.
pub fn build_font(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let mut buf = Vec::new();
    push_u32(&mut buf, 0x0001_0000);
    push_u16(&mut buf, num_tables);
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = 16 * (1u16 << entry_selector);
    push_u16(&mut buf, search_range);
    push_u16(&mut buf, entry_selector);
    push_u16(&mut buf, num_tables * 16 - search_range);

    let mut offset = (12 + 16 * tables.len()) as u32;
    for (tag, data) in tables {
        buf.extend_from_slice(&tag[..]);
        push_u32(&mut buf, 0); // checksum, unverified
        push_u32(&mut buf, offset);
        push_u32(&mut buf, data.len() as u32);
        offset += data.len() as u32;
    }
    for (_, data) in tables {
        buf.extend_from_slice(data);
    }
    buf
}

pub fn head_table(units_per_em: u16) -> Vec<u8> {
    let mut buf = Vec::new();
    push_u32(&mut buf, 0x0001_0000); // version
    push_u32(&mut buf, 0x0001_0000); // fontRevision
    push_u32(&mut buf, 0); // checkSumAdjustment
    push_u32(&mut buf, 0x5F0F_3CF5); // magicNumber
    push_u16(&mut buf, 0); // flags
    push_u16(&mut buf, units_per_em);
    buf.extend_from_slice(&[0; 16]); // created, modified
    for bound in &[0i16, 0, 100, 100] {
        push_i16(&mut buf, *bound);
    }
    push_u16(&mut buf, 0); // macStyle
    push_u16(&mut buf, 8); // lowestRecPPEM
    push_i16(&mut buf, 2); // fontDirectionHint
    push_i16(&mut buf, 0); // indexToLocFormat: short
    push_i16(&mut buf, 0); // glyphDataFormat
    buf
}

pub fn maxp_table(num_glyphs: u16) -> Vec<u8> {
    let mut buf = Vec::new();
    push_u32(&mut buf, 0x0001_0000);
    push_u16(&mut buf, num_glyphs);
    buf
}

/// One simple glyph record with a zero-length instruction block and plain
/// i16 deltas (no short vectors).
fn simple_glyph(ends: &[u16], flags: &[u8], x_deltas: &[i16], y_deltas: &[i16]) -> Vec<u8> {
    let mut buf = Vec::new();
    push_i16(&mut buf, ends.len() as i16);
    for bound in &[0i16, 0, 100, 100] {
        push_i16(&mut buf, *bound);
    }
    for &end in ends {
        push_u16(&mut buf, end);
    }
    push_u16(&mut buf, 0); // instruction length
    buf.extend_from_slice(flags);
    for &delta in x_deltas {
        push_i16(&mut buf, delta);
    }
    for &delta in y_deltas {
        push_i16(&mut buf, delta);
    }
    buf
}

/// Minimal composite glyph record: negative contour count plus one
/// component entry.
fn composite_stub() -> Vec<u8> {
    let mut buf = Vec::new();
    push_i16(&mut buf, -1);
    for bound in &[0i16, 0, 100, 100] {
        push_i16(&mut buf, *bound);
    }
    push_u16(&mut buf, 0); // component flags
    push_u16(&mut buf, 0); // component glyph index
    buf
}
