pub mod binary;
pub mod braille;
pub mod grid;
