//! Text primitives shared by the bracket padder: line-ending handling and
//! char-indexed string helpers.

pub mod chars;
pub mod line_ending;
