//! Analytic nonzero-winding fill for decoded outlines.
//!
//! Debug/inspection aid: the binary artifact never goes through here, but
//! rasterizing a glyph is the quickest way to eyeball whether the decoder
//! produced a sane outline.

use image::{GrayImage, Luma};

use crate::math::{Affine, Point};
use crate::tables::glyf::{GlyphHeader, Outline};

const EPSILON: f32 = 1e-4;

/// Crossing classification table keyed by the sign pattern of the three
/// control-point y values (in the test point's frame). Bit 0 of the shifted
/// value says whether root t0 counts as an on-transition, bit 1 whether t1
/// counts as an off-transition.
const CLASSIFY: u16 = 0x2E74;

/// Winding contribution of one quadratic segment, with all three points
/// already translated into the test point's local frame.
fn curve_winding(p0: Point, p1: Point, p2: Point) -> i32 {
    let a = p0.y - 2.0 * p1.y + p2.y;
    let b = p0.y - p1.y;
    let c = p0.y;

    let discriminant = (b * b - a * c).max(0.0);
    let root = discriminant.sqrt();

    let (t0, t1) = if a.abs() < EPSILON {
        // Nearly-degenerate quadratic: both roots collapse onto the linear
        // solution.
        let t = c / (2.0 * b);
        (t, t)
    } else {
        ((b - root) / a, (b + root) / a)
    };

    let shift = ((p0.y > 0.0) as u16) * 2 + ((p1.y > 0.0) as u16) * 4 + ((p2.y > 0.0) as u16) * 8;
    let class = CLASSIFY >> shift;

    let x_at = |t: f32| {
        let omt = 1.0 - t;
        omt * omt * p0.x + 2.0 * t * omt * p1.x + t * t * p2.x
    };

    let mut winding = 0;
    if class & 0x1 != 0 && x_at(t0) >= 0.0 {
        winding += 1;
    }
    if class & 0x2 != 0 && x_at(t1) >= 0.0 {
        winding -= 1;
    }
    winding
}

/// A line segment is the degenerate quadratic whose control point sits at
/// its midpoint.
fn line_winding(p0: Point, p1: Point) -> i32 {
    curve_winding(p0, p0.lerp_to(p1, 0.5), p1)
}

/// Signed crossing count of the outline around `(x, y)` in font units.
/// Nonzero means the point is inside under the nonzero fill rule.
pub fn winding_number(outline: &Outline, x: i16, y: i16) -> i32 {
    let test = Point {
        x: f32::from(x),
        y: f32::from(y),
    };
    let local = |i: usize| {
        Point {
            x: f32::from(outline.xs[i]),
            y: f32::from(outline.ys[i]),
        } - test
    };

    let mut winding = 0;
    let mut begin = 0usize;
    for &contour_end in &outline.contour_ends {
        let end = contour_end as usize;
        let mut point = begin;
        while point < end {
            if outline.on_curve[point] && outline.on_curve[point + 1] {
                winding += line_winding(local(point), local(point + 1));
                point += 1;
            } else if outline.on_curve[point]
                && !outline.on_curve[point + 1]
                && point + 2 <= end
                && outline.on_curve[point + 2]
            {
                winding += curve_winding(local(point), local(point + 1), local(point + 2));
                point += 2;
            } else {
                point += 1;
            }
        }
        begin = end + 1;
    }
    winding
}

/// Fills a `width` x `height` canvas with the outline's nonzero-winding
/// coverage, mapping the glyph bounding box onto the canvas. Canvas rows run
/// top-down while font y grows upward, so the image is flipped on write.
pub fn rasterize(outline: &Outline, header: &GlyphHeader, width: u32, height: u32) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([0]));
    if outline.is_empty() || width == 0 || height == 0 {
        return img;
    }

    let sx = f32::from(header.x_max - header.x_min) / width as f32;
    let sy = f32::from(header.y_max - header.y_min) / height as f32;
    let to_font = Affine::translation(f32::from(header.x_min), f32::from(header.y_min))
        * Affine::scale(sx, sy);

    for (px, py) in iproduct!(0..width, 0..height) {
        let p = to_font * (px as f32, py as f32);
        if winding_number(outline, p.x as i16, p.y as i16) != 0 {
            img.put_pixel(px, height - 1 - py, Luma([255]));
        }
    }
    img
}
