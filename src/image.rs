//! Rendered frame and its plain-text PPM encoding.

use super::error::RenderError;
use super::vec::Color;
use std::io::Write;

/// Gamma-corrected pixel colors in output order: top scanline first,
/// left to right within a scanline.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Image {
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().map(|color| color.to_rgb8()).collect()
    }

    /// Write the image as ASCII PPM (`P3`) with a max color of 255.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;

        for [r, g, b] in self.to_rgb8() {
            writeln!(out, "{} {} {}", r, g, b)?;
        }

        out.flush()?;
        Ok(())
    }
}
