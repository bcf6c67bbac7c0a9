use thiserror::Error;

/// Everything that can go wrong between raw font bytes and a finished
/// artifact.
///
/// Font-level variants (`TableNotFound`, `UnsupportedFontFormat`,
/// `InvalidUnitsPerEm`, `NoSupportedCmap`, `UnsupportedCmapFormat`) abort
/// the whole font. Glyph-level variants degrade a single glyph to an empty
/// record when batch-writing; see `writer::write_internal_font`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("table '{0}' not present in font directory")]
    TableNotFound(&'static str),

    #[error("not an sfnt-wrapped TrueType font")]
    UnsupportedFontFormat,

    #[error("unitsPerEm {0} outside the valid range 16..=16384")]
    InvalidUnitsPerEm(u16),

    #[error("no Unicode BMP cmap encoding record")]
    NoSupportedCmap,

    #[error("selected cmap subtable is not a usable format 4 table")]
    UnsupportedCmapFormat,

    #[error("composite glyphs are not supported")]
    UnsupportedCompositeGlyph,

    #[error("glyph declares contours but no points")]
    ZeroPointGlyph,

    #[error("malformed glyph: {0}")]
    MalformedGlyph(&'static str),

    #[error("write of {len} bytes at offset {at} overruns buffer of {cap}")]
    BufferOverrun { at: usize, len: usize, cap: usize },
}
