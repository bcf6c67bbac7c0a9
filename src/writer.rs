//! Serializes every decoded outline into the flat glyph-pack artifact.
//!
//! Layout, all fields big endian:
//!
//! ```text
//! u32            record count (one per code point 0..=numGlyphs)
//! u32 * count    absolute byte offset of each record
//! per record:
//!   u16          contour count; 0 ends the record here
//!   u16 * nc     inclusive end index of each contour
//!   u16          point count
//!   u16 * np     on-curve flag per point (0 or 1)
//!   i16 * np     x coordinates, font units
//!   i16 * np     y coordinates, font units
//! ```
//!
//! A record always exists for every code point: glyphs that fail to decode
//! are written as zero-contour records so a consumer can index by code
//! point without a presence bitmap.

use byteorder::{BigEndian, ByteOrder};

use crate::error::Error;
use crate::font::Font;
use crate::parse::WriteCursor;
use crate::tables::glyf::Outline;

pub fn write_internal_font(font: &Font) -> Result<Vec<u8>, Error> {
    let count = u32::from(font.num_glyphs) + 1;

    let mut out = Vec::new();
    push_u32(&mut out, count);
    let index_base = out.len();
    out.resize(index_base + count as usize * 4, 0);

    let mut degraded = 0u32;
    for code in 0..count {
        let offset = out.len() as u32;
        patch_u32(&mut out, index_base + code as usize * 4, offset)?;

        let outline = match font.outline_for_char(code as u16) {
            Ok(outline) => outline,
            Err(err) => {
                warn!("code point {} degraded to an empty record: {}", code, err);
                degraded += 1;
                Outline::default()
            }
        };
        let record = serialize_outline(&outline)?;
        out.extend_from_slice(&record);
    }

    info!(
        "packed {} records ({} degraded), {} bytes",
        count,
        degraded,
        out.len()
    );
    Ok(out)
}

fn serialize_outline(outline: &Outline) -> Result<Vec<u8>, Error> {
    let num_contours = outline.num_contours();
    let num_points = outline.num_points();
    if num_contours > usize::from(u16::max_value()) || num_points > usize::from(u16::max_value()) {
        return Err(Error::MalformedGlyph("outline exceeds u16 record fields"));
    }
    if outline.is_empty() {
        return Ok(vec![0, 0]);
    }

    let mut record = vec![0u8; 4 + 2 * num_contours + 6 * num_points];
    let mut cur = WriteCursor::new(&mut record);
    cur.write_u16(num_contours as u16)?;
    for &end in &outline.contour_ends {
        cur.write_u16(end)?;
    }
    cur.write_u16(num_points as u16)?;
    for &on in &outline.on_curve {
        cur.write_u16(on as u16)?;
    }
    for &x in &outline.xs {
        cur.write_i16(x)?;
    }
    for &y in &outline.ys {
        cur.write_i16(y)?;
    }
    Ok(record)
}

fn push_u32(buf: &mut Vec<u8>, val: u32) {
    buf.extend_from_slice(&val.to_be_bytes());
}

fn patch_u32(buf: &mut [u8], at: usize, val: u32) -> Result<(), Error> {
    if at + 4 > buf.len() {
        return Err(Error::BufferOverrun {
            at,
            len: 4,
            cap: buf.len(),
        });
    }
    BigEndian::write_u32(&mut buf[at..], val);
    Ok(())
}
