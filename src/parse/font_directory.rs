use nom::{be_u16, be_u32, IResult};

use crate::tables::TableTag;

/// The sfnt wrapper header that precedes the table directory.
#[derive(Debug, PartialEq)]
pub struct OffsetSubtable {
    pub scaler_type: ScalerType,
    pub num_tables: u16,
    pub search_range: u16,   // (max power of two that is <= num_tables) * 16
    pub entry_selector: u16, // log_2(max power of two that is <= num_tables)
    pub range_shift: u16,    // num_tables * 16 - search_range
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ScalerType {
    /// 0x00010000, the only flavor whose outlines we can decode.
    TrueType,
    /// 'true', the legacy Apple tag.
    MacTrueType,
    /// 'typ1'
    PostScript,
    /// 'OTTO', CFF outlines.
    OpenType,
}

impl ScalerType {
    fn from_tag(tag: u32) -> Option<ScalerType> {
        match tag {
            0x0001_0000 => Some(ScalerType::TrueType),
            0x7472_7565 => Some(ScalerType::MacTrueType),
            0x7479_7031 => Some(ScalerType::PostScript),
            0x4F54_544F => Some(ScalerType::OpenType),
            _ => None,
        }
    }
}

/// One 16-byte table directory record.
///
/// The tag stays a raw big-endian `u32` so that directories full of tables
/// we never touch still parse.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TableDirRecord {
    pub tag: u32,
    pub check_sum: u32,
    pub offset: u32,
    pub length: u32,
}

#[derive(Debug, PartialEq)]
pub struct FontDirectory {
    pub offsets: OffsetSubtable,
    pub records: Vec<TableDirRecord>,
}

impl FontDirectory {
    /// Resolves a tag to the table's byte offset by linear scan.
    pub fn table_offset(&self, tag: TableTag) -> Option<u32> {
        let tag = tag as u32;
        self.records
            .iter()
            .find(|record| record.tag == tag)
            .map(|record| record.offset)
    }
}

pub fn parse_font_directory(i: &[u8]) -> IResult<&[u8], FontDirectory> {
    let (i, offsets) = try_parse!(i, parse_offset_subtable);
    let (i, records) = try_parse!(i, apply!(parse_records, offsets.num_tables));
    Ok((i, FontDirectory { offsets, records }))
}

fn parse_records(i: &[u8], num_tables: u16) -> IResult<&[u8], Vec<TableDirRecord>> {
    count!(i, table_dir_record, num_tables as usize)
}

named!(pub table_dir_record<TableDirRecord>,
    do_parse!(
        tag: be_u32 >>
        check_sum: be_u32 >>
        offset: be_u32 >>
        length: be_u32 >>
        (TableDirRecord { tag, check_sum, offset, length })
    )
);

named!(
    parse_offset_subtable<OffsetSubtable>,
    do_parse!(
        scaler_type: parse_scaler_type
            >> num_tables: be_u16
            >> search_range: be_u16
            >> entry_selector: be_u16
            >> range_shift: be_u16 >> (OffsetSubtable {
            scaler_type,
            num_tables,
            search_range,
            entry_selector,
            range_shift
        })
    )
);

named!(
    parse_scaler_type<ScalerType>,
    map_opt!(be_u32, ScalerType::from_tag)
);
