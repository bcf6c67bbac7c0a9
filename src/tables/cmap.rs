use crate::error::Error;
use crate::parse::Cursor;
use crate::trace::DecodeTrace;

/// Borrowed view of a format 4 (segmented BMP) cmap subtable.
///
/// Header layout: format, length, language, segCountX2, searchRange,
/// entrySelector, rangeShift (14 bytes), then four parallel `segCount`
/// arrays — endCode, (pad), startCode, idDelta, idRangeOffset — followed by
/// the shared glyphIdArray.
#[derive(Debug, Clone, Copy)]
pub struct Format4<'a> {
    data: &'a [u8],
    /// Absolute offset of the subtable within `data`.
    subtable: usize,
    seg_count: usize,
}

const HEADER_SIZE: usize = 14;

impl<'a> Format4<'a> {
    pub fn new(data: &'a [u8], subtable: usize) -> Result<Format4<'a>, Error> {
        let mut cur = Cursor::at(data, subtable);
        if cur.read_u16() != 4 {
            return Err(Error::UnsupportedCmapFormat);
        }
        cur.skip(4); // length, language
        let seg_count = (cur.read_u16() / 2) as usize;

        let table = Format4 {
            data,
            subtable,
            seg_count,
        };
        // The sentinel segment terminates every scan; a table without it
        // cannot be searched safely.
        if seg_count == 0
            || table.end_code(seg_count - 1) != 0xFFFF
            || table.start_code(seg_count - 1) != 0xFFFF
        {
            return Err(Error::UnsupportedCmapFormat);
        }
        Ok(table)
    }

    pub fn seg_count(&self) -> usize {
        self.seg_count
    }

    fn read_u16_at(&self, offset: usize) -> u16 {
        Cursor::at(self.data, offset).read_u16()
    }

    fn end_code(&self, segment: usize) -> u16 {
        self.read_u16_at(self.subtable + HEADER_SIZE + 2 * segment)
    }

    fn start_code(&self, segment: usize) -> u16 {
        // + 2 skips the reservedPad between endCode and startCode.
        self.read_u16_at(self.subtable + HEADER_SIZE + 2 * self.seg_count + 2 + 2 * segment)
    }

    fn id_delta(&self, segment: usize) -> u16 {
        self.read_u16_at(self.subtable + HEADER_SIZE + 4 * self.seg_count + 2 + 2 * segment)
    }

    /// Absolute offset of this segment's idRangeOffset slot; nonzero values
    /// are relative to the slot itself.
    fn id_range_offset_slot(&self, segment: usize) -> usize {
        self.subtable + HEADER_SIZE + 6 * self.seg_count + 2 + 2 * segment
    }

    /// Resolves a BMP code point to a glyph index, 0 for unmapped.
    ///
    /// Segments are scanned in table order and the first covering segment
    /// wins; overlapping segments are forbidden by the format but occur in
    /// malformed fonts, and first-match keeps the behavior deterministic.
    pub fn glyph_id(&self, code: u16, trace: &mut dyn DecodeTrace) -> u16 {
        let mut matched = None;
        for segment in 0..self.seg_count {
            let start = self.start_code(segment);
            let end = self.end_code(segment);
            if code >= start && code <= end {
                matched = Some((segment, start, end));
                break;
            }
        }

        let (segment, start, end) = match matched {
            Some(hit) => hit,
            None => return 0,
        };
        // A hit on the 0xFFFF sentinel maps to the missing glyph.
        if start == 0xFFFF {
            return 0;
        }
        trace.segment_match(code, segment, start, end);

        let id_delta = self.id_delta(segment);
        let id_range_offset = self.id_range_offset(segment);
        if id_range_offset == 0 {
            // Glyph ids are mod 65536 per the format, which is exactly u16
            // wrapping arithmetic.
            return code.wrapping_add(id_delta);
        }

        let slot = self.id_range_offset_slot(segment);
        let entry = slot + id_range_offset as usize + 2 * (code - start) as usize;
        let raw = self.read_u16_at(entry);
        if raw == 0 {
            0
        } else {
            raw.wrapping_add(id_delta)
        }
    }

    fn id_range_offset(&self, segment: usize) -> u16 {
        self.read_u16_at(self.id_range_offset_slot(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{cmap_format4_subtable, RecordingTrace};
    use crate::trace::NoTrace;

    #[test]
    fn direct_segment_mapping() {
        // One segment 65..=70 with idDelta 3 and no indirection.
        let subtable = cmap_format4_subtable(&[(65, 70, 3, 0)], &[]);
        let cmap = Format4::new(&subtable, 0).unwrap();
        assert_eq!(cmap.glyph_id(65, &mut NoTrace), 68);
        assert_eq!(cmap.glyph_id(70, &mut NoTrace), 73);
        // 71 falls through to the sentinel.
        assert_eq!(cmap.glyph_id(71, &mut NoTrace), 0);
        assert_eq!(cmap.glyph_id(64, &mut NoTrace), 0);
    }

    #[test]
    fn delta_wraps_mod_65536() {
        let subtable = cmap_format4_subtable(&[(0x0041, 0x0041, 0xFFFF, 0)], &[]);
        let cmap = Format4::new(&subtable, 0).unwrap();
        // 0x41 + 0xFFFF mod 65536 == 0x40.
        assert_eq!(cmap.glyph_id(0x41, &mut NoTrace), 0x40);
    }

    #[test]
    fn indirect_lookup_through_glyph_id_array() {
        // Two real segments; the second uses the glyphIdArray. With three
        // segments total (incl. sentinel), segment 1's slot is 4 bytes from
        // the end of the idRangeOffset array, so an offset of 4 + 2k lands
        // on glyphIdArray[k].
        let subtable = cmap_format4_subtable(
            &[(10, 11, 0, 0), (100, 102, 5, 4)],
            &[0, 42, 0xFFFF],
        );
        let cmap = Format4::new(&subtable, 0).unwrap();
        // glyphIdArray[0] == 0: missing glyph regardless of idDelta.
        assert_eq!(cmap.glyph_id(100, &mut NoTrace), 0);
        // glyphIdArray[1] == 42, plus idDelta 5.
        assert_eq!(cmap.glyph_id(101, &mut NoTrace), 47);
        // glyphIdArray[2] == 0xFFFF wraps with idDelta 5.
        assert_eq!(cmap.glyph_id(102, &mut NoTrace), 4);
    }

    #[test]
    fn first_matching_segment_wins() {
        // Overlapping segments are malformed; scan order decides.
        let subtable = cmap_format4_subtable(&[(50, 60, 1, 0), (55, 70, 2, 0)], &[]);
        let cmap = Format4::new(&subtable, 0).unwrap();
        assert_eq!(cmap.glyph_id(55, &mut NoTrace), 56);
        assert_eq!(cmap.glyph_id(65, &mut NoTrace), 67);
    }

    #[test]
    fn missing_sentinel_is_rejected() {
        // Hand-rolled table whose final endCode/startCode are not 0xFFFF.
        let mut subtable = cmap_format4_subtable(&[(65, 70, 3, 0)], &[]);
        // Overwrite the sentinel endCode (second entry of endCode array).
        subtable[HEADER_SIZE + 2] = 0;
        subtable[HEADER_SIZE + 3] = 0;
        assert_eq!(
            Format4::new(&subtable, 0).unwrap_err(),
            Error::UnsupportedCmapFormat
        );
    }

    #[test]
    fn non_format4_is_rejected() {
        let mut subtable = cmap_format4_subtable(&[(65, 70, 3, 0)], &[]);
        subtable[1] = 6; // format 6
        assert_eq!(
            Format4::new(&subtable, 0).unwrap_err(),
            Error::UnsupportedCmapFormat
        );
    }

    #[test]
    fn segment_match_is_traced() {
        let subtable = cmap_format4_subtable(&[(65, 70, 3, 0)], &[]);
        let cmap = Format4::new(&subtable, 0).unwrap();
        let mut trace = RecordingTrace::default();
        cmap.glyph_id(66, &mut trace);
        cmap.glyph_id(200, &mut trace); // miss, not traced
        assert_eq!(trace.segments, vec![0]);
    }
}
