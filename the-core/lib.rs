//! Text primitives shared by the markup decoration engine.

pub mod chars;
pub mod grapheme;
