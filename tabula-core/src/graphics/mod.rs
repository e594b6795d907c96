//! Pixel-level drawing
//!
//! A 32x16 monochrome framebuffer, the line primitive the vector fonts
//! are built from, the glyph tables themselves, and a small 8x8 bitmap
//! font for the settings screens.

pub mod font;
pub mod framebuffer;
pub mod glyph;
pub mod line;
pub mod text;

pub use font::Font;
pub use framebuffer::{Framebuffer, FRAME_BYTES, HEIGHT, WIDTH};
pub use glyph::Glyph;
pub use line::{Line, Orientation};
