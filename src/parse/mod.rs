pub mod cursor;
pub mod font_directory;

pub use self::cursor::{Cursor, WriteCursor};
