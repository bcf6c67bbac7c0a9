use crate::error::Error;
use crate::parse::Cursor;
use crate::trace::DecodeTrace;

bitflags! {
    /// Per-point flag byte in a simple glyph's contour stream.
    pub struct SimpleFlags: u8 {
        const ON_CURVE_POINT          = 0b0000_0001;
        const X_SHORT_VEC             = 0b0000_0010;
        const Y_SHORT_VEC             = 0b0000_0100;
        const REPEAT_FLAG             = 0b0000_1000;
        // Bit 4 is the x sign when X_SHORT_VEC is set, "same as previous"
        // otherwise; bit 5 is the y equivalent.
        const X_IS_SAME               = 0b0001_0000;
        const POSITIVE_X_SHORT_VECTOR = 0b0001_0000;
        const Y_IS_SAME               = 0b0010_0000;
        const POSITIVE_Y_SHORT_VECTOR = 0b0010_0000;
    }
}

/// The 10-byte header at the start of a glyph's `glyf` record, plus the
/// absolute offset of the contour stream that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphHeader {
    /// Always >= 0 here; negative counts (composites) are rejected at read
    /// time.
    pub number_of_contours: i16,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub(crate) contour_data: usize,
}

impl GlyphHeader {
    pub fn read(data: &[u8], offset: usize) -> Result<GlyphHeader, Error> {
        let mut cur = Cursor::at(data, offset);
        let number_of_contours = cur.read_i16();
        if number_of_contours < 0 {
            return Err(Error::UnsupportedCompositeGlyph);
        }
        let x_min = cur.read_i16();
        let y_min = cur.read_i16();
        let x_max = cur.read_i16();
        let y_max = cur.read_i16();
        Ok(GlyphHeader {
            number_of_contours,
            x_min,
            y_min,
            x_max,
            y_max,
            contour_data: cur.pos(),
        })
    }

    /// Header for a glyph that occupies no bytes of `glyf`.
    pub fn empty() -> GlyphHeader {
        GlyphHeader {
            number_of_contours: 0,
            x_min: 0,
            y_min: 0,
            x_max: 0,
            y_max: 0,
            contour_data: 0,
        }
    }
}

/// Decoded, normalized outline of one simple glyph.
///
/// `contour_ends[c]` is the inclusive index of contour `c`'s final point.
/// Two invariants hold after decoding: each contour's final point duplicates
/// its first point (the explicit closing point), and no two neighbouring
/// points within a contour are both off-curve — every such pair in the
/// source stream gets an on-curve ghost point at its midpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outline {
    pub contour_ends: Vec<u16>,
    pub on_curve: Vec<bool>,
    pub xs: Vec<i16>,
    pub ys: Vec<i16>,
}

impl Outline {
    pub fn num_points(&self) -> usize {
        self.xs.len()
    }

    pub fn num_contours(&self) -> usize {
        self.contour_ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contour_ends.is_empty()
    }
}

/// Decodes a simple glyph's contour stream into a normalized `Outline`.
///
/// A zero-contour header yields an empty outline. Everything else follows
/// the `glyf` layout: contour-end array, instruction block (skipped),
/// run-length-encoded flags, then delta-encoded x and y streams.
pub fn decode_outline(
    data: &[u8],
    header: &GlyphHeader,
    trace: &mut dyn DecodeTrace,
) -> Result<Outline, Error> {
    let num_contours = header.number_of_contours as usize;
    if num_contours == 0 {
        return Ok(Outline::default());
    }

    let mut cur = Cursor::at(data, header.contour_data);

    let mut raw_ends = Vec::with_capacity(num_contours);
    let mut max_end = 0u16;
    for _ in 0..num_contours {
        let end = cur.read_u16();
        max_end = max_end.max(end);
        raw_ends.push(end);
    }
    if max_end == 0 {
        return Err(Error::ZeroPointGlyph);
    }
    let num_points = max_end as usize + 1;

    // Hinting bytecode is not interpreted; the flag array starts right
    // after it.
    let instruction_len = cur.read_u16();
    cur.skip(instruction_len as usize);

    let flags = read_flags(&mut cur, num_points)?;
    let xs = read_coords(
        &mut cur,
        &flags,
        SimpleFlags::X_SHORT_VEC,
        SimpleFlags::X_IS_SAME,
    );
    let ys = read_coords(
        &mut cur,
        &flags,
        SimpleFlags::Y_SHORT_VEC,
        SimpleFlags::Y_IS_SAME,
    );

    normalize(&raw_ends, &flags, &xs, &ys, trace)
}

/// Expands the run-length-encoded flag stream to one entry per point.
fn read_flags(cur: &mut Cursor, num_points: usize) -> Result<Vec<SimpleFlags>, Error> {
    let mut flags = Vec::with_capacity(num_points);
    while flags.len() < num_points {
        let flag = SimpleFlags::from_bits_truncate(cur.read_u8());
        flags.push(flag);
        if flag.contains(SimpleFlags::REPEAT_FLAG) {
            let repeat_count = cur.read_u8() as usize;
            if repeat_count == 0 {
                return Err(Error::MalformedGlyph("zero repeat count"));
            }
            if flags.len() + repeat_count > num_points {
                return Err(Error::MalformedGlyph(
                    "flag repeat run past declared point count",
                ));
            }
            for _ in 0..repeat_count {
                flags.push(flag);
            }
        }
    }
    Ok(flags)
}

/// One delta-accumulation pass over the flag array for a single axis.
fn read_coords(
    cur: &mut Cursor,
    flags: &[SimpleFlags],
    short_bit: SimpleFlags,
    same_bit: SimpleFlags,
) -> Vec<i16> {
    let mut coords = Vec::with_capacity(flags.len());
    let mut value: i16 = 0;
    for flag in flags {
        if flag.contains(short_bit) {
            let delta = cur.read_u8() as i16;
            // For short vectors the "same" bit doubles as the sign.
            if flag.contains(same_bit) {
                value = value.wrapping_add(delta);
            } else {
                value = value.wrapping_sub(delta);
            }
        } else if !flag.contains(same_bit) {
            value = value.wrapping_add(cur.read_i16());
        }
        coords.push(value);
    }
    coords
}

/// Walks the raw point stream contour by contour, inserting ghost points
/// between consecutive off-curve points and an explicit closing point at the
/// end of each contour.
fn normalize(
    raw_ends: &[u16],
    flags: &[SimpleFlags],
    xs: &[i16],
    ys: &[i16],
    trace: &mut dyn DecodeTrace,
) -> Result<Outline, Error> {
    let num_points = flags.len();
    let on = |i: usize| flags[i].contains(SimpleFlags::ON_CURVE_POINT);

    // Size the output exactly: one ghost per adjacent off/off pair within a
    // contour (the wrap-around pair included, or the closing point would
    // break the no-adjacent-off-curve invariant) plus one closing point per
    // contour.
    let mut adjusted = num_points + raw_ends.len();
    let mut begin = 0usize;
    for &raw_end in raw_ends {
        let end = raw_end as usize;
        if end < begin || end >= num_points {
            return Err(Error::MalformedGlyph("contour ends are not increasing"));
        }
        for i in begin..=end {
            let next = if i == end { begin } else { i + 1 };
            if !on(i) && !on(next) {
                adjusted += 1;
            }
        }
        begin = end + 1;
    }
    if adjusted > usize::from(u16::max_value()) + 1 {
        return Err(Error::MalformedGlyph("adjusted point count overflows u16"));
    }

    let mut outline = Outline {
        contour_ends: Vec::with_capacity(raw_ends.len()),
        on_curve: Vec::with_capacity(adjusted),
        xs: Vec::with_capacity(adjusted),
        ys: Vec::with_capacity(adjusted),
    };

    let mut begin = 0usize;
    for (contour, &raw_end) in raw_ends.iter().enumerate() {
        let end = raw_end as usize;
        let first_adjusted = outline.num_points();
        for i in begin..=end {
            outline.on_curve.push(on(i));
            outline.xs.push(xs[i]);
            outline.ys.push(ys[i]);

            let next = if i == end { begin } else { i + 1 };
            if !on(i) && !on(next) {
                let ghost_x = midpoint(xs[i], xs[next]);
                let ghost_y = midpoint(ys[i], ys[next]);
                trace.ghost_point(outline.num_points(), ghost_x, ghost_y);
                outline.on_curve.push(true);
                outline.xs.push(ghost_x);
                outline.ys.push(ghost_y);
            }
        }
        // Close the loop with a duplicate of the contour's first point.
        outline.on_curve.push(outline.on_curve[first_adjusted]);
        outline.xs.push(outline.xs[first_adjusted]);
        outline.ys.push(outline.ys[first_adjusted]);

        let end_index = outline.num_points() - 1;
        outline.contour_ends.push(end_index as u16);
        trace.contour_close(contour, end_index);
        begin = end + 1;
    }
    debug_assert_eq!(outline.num_points(), adjusted);

    Ok(outline)
}

fn midpoint(a: i16, b: i16) -> i16 {
    ((i32::from(a) + i32::from(b)) / 2) as i16
}
