//! Direct TrueType (`glyf`/`loca`/cmap format 4) parsing over raw bytes,
//! plus a writer that re-encodes every decoded outline into a flat binary
//! artifact a renderer can consume without touching the sfnt container.
//!
//! NOTE: TrueType is big endian (from https://wiki.osdev.org/TrueType_Fonts)

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;
#[macro_use]
extern crate nom;
#[macro_use]
extern crate num_derive;

pub mod error;
pub mod font;
pub mod math;
pub mod parse;
pub mod raster;
pub mod tables;
pub mod trace;
pub mod writer;

#[cfg(test)]
pub mod test_utils;

pub use crate::error::Error;
pub use crate::font::Font;
