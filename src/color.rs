//! Color types for black/white e-paper panels
//!
//! The controller stores one bit per pixel in BW RAM with inverted polarity:
//!
//! | Color | BW RAM bit |
//! |-------|------------|
//! | Black | 0          |
//! | White | 1          |
//!
//! Source bitmaps handed to [`Panel::draw`](crate::Panel::draw) use the opposite
//! convention by default (a set bit is a black pixel). [`BitmapColor`] selects which
//! color a set source bit stands for.
//!
//! ## Example
//!
//! ```
//! use ssd1681::{BitmapColor, Color};
//!
//! assert_eq!(Color::Black.bw_byte(), 0x00);
//! assert_eq!(Color::White.bw_byte(), 0xFF);
//! assert_eq!(BitmapColor::default(), BitmapColor::Black);
//! ```

/// Colors supported by the panel
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Color {
    /// Black pixels
    Black,
    /// White pixels
    White,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU1;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        match color {
            embedded_graphics_core::pixelcolor::BinaryColor::On => Self::Black,
            embedded_graphics_core::pixelcolor::BinaryColor::Off => Self::White,
        }
    }
}

impl Color {
    /// Byte value filling 8 pixels of BW RAM with this color
    pub fn bw_byte(self) -> u8 {
        match self {
            Self::Black => 0x00,
            Self::White => 0xFF,
        }
    }

    /// Byte value filling 8 pixels of a source bitmap with this color,
    /// for a given source polarity
    pub fn source_byte(self, polarity: BitmapColor) -> u8 {
        if polarity.set_bit_color() == self {
            0xFF
        } else {
            0x00
        }
    }
}

/// Meaning of a set bit in a source bitmap
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BitmapColor {
    /// A set source bit is a black pixel
    #[default]
    Black,
    /// A set source bit is a white pixel
    White,
}

impl BitmapColor {
    /// Color drawn for a set source bit
    pub fn set_bit_color(self) -> Color {
        match self {
            Self::Black => Color::Black,
            Self::White => Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_byte_follows_polarity() {
        assert_eq!(Color::Black.source_byte(BitmapColor::Black), 0xFF);
        assert_eq!(Color::White.source_byte(BitmapColor::Black), 0x00);
        assert_eq!(Color::Black.source_byte(BitmapColor::White), 0x00);
        assert_eq!(Color::White.source_byte(BitmapColor::White), 0xFF);
    }
}
