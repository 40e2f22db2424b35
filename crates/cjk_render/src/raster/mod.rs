pub mod canvas;
pub mod discover;
pub mod font;
pub mod resize;
pub mod source;
