pub mod cmap;
pub mod glyf;
pub mod loca;

/// Numeric value of a 4-byte table tag, matching what `be_u32` reads out of
/// the directory.
#[macro_export]
macro_rules! u32_code {
    ($w:expr) => {
        (($w[0] as u32) << 24) | (($w[1] as u32) << 16) | (($w[2] as u32) << 8) | ($w[3] as u32)
    };
}

// Various tags: http://scripts.sil.org/cms/scripts/page.php?site_id=nrsi&id=IWS-AppendixC
// Only the tables this crate actually locates are listed.
#[repr(u32)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TableTag {
    FontHeader = u32_code!(b"head"),
    MaximumProfile = u32_code!(b"maxp"),
    GlyphLocation = u32_code!(b"loca"),
    GlyphOutline = u32_code!(b"glyf"),
    CharacterCodeMapping = u32_code!(b"cmap"),
    HorizontalHeader = u32_code!(b"hhea"),
    HorizontalMetrics = u32_code!(b"hmtx"),
    Kerning = u32_code!(b"kern"),
    GlyphPositioning = u32_code!(b"GPOS"),
}
