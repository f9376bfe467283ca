//! Graphics support via embedded-graphics
//!
//! [`Canvas`] wraps a source bitmap in the format [`Panel::draw`](crate::Panel::draw)
//! takes and implements [`DrawTarget`] for it, so a scene drawn with embedded-graphics
//! can be sent to the panel as is.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//! };
//! use ssd1681::{Canvas, Color};
//!
//! let len = Canvas::<Vec<u8>>::required_len(400, 300);
//! let mut canvas = match Canvas::try_new(vec![0u8; len], 400, 300) {
//!     Some(canvas) => canvas,
//!     None => return,
//! };
//! canvas.clear(Color::White);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Color::Black))
//!     .draw(&mut canvas);
//!
//! let _ = Circle::new(Point::new(100, 50), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Color::Black, 2))
//!     .draw(&mut canvas);
//!
//! // panel.draw(0, 0, 400, 300, canvas.as_source(), &mut delay)
//! let _ = canvas.as_source();
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};

use crate::color::{BitmapColor, Color};
use crate::packer::SOURCE_HEADER_LEN;

/// Source bitmap with embedded-graphics support
///
/// The buffer holds a [`SOURCE_HEADER_LEN`]-byte header (left untouched) followed by
/// `width * height` pixels, row-major and MSB-first with no row padding. The bit
/// polarity follows a [`BitmapColor`], black by default, and must match the panel's.
///
/// ## Type Parameters
///
/// * `B` - Buffer type, e.g. `Vec<u8>`, `[u8; N]` or `&mut [u8]`
pub struct Canvas<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    buffer: B,
    width: u32,
    height: u32,
    polarity: BitmapColor,
}

impl<B> Canvas<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Bytes a `width` x `height` canvas needs, header included
    pub fn required_len(width: u32, height: u32) -> usize {
        SOURCE_HEADER_LEN + (width as usize * height as usize).div_ceil(8)
    }

    /// Create a canvas over `buffer`
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is shorter than [`required_len`](Self::required_len).
    pub fn new(buffer: B, width: u32, height: u32) -> Self {
        let required = Self::required_len(width, height);
        let provided = buffer.as_ref().len();
        assert!(
            provided >= required,
            "canvas buffer too small: required {required} bytes, got {provided}"
        );
        Self {
            buffer,
            width,
            height,
            polarity: BitmapColor::default(),
        }
    }

    /// Create a canvas, or `None` if `buffer` is too short
    ///
    /// This is the fallible version of [`new`](Self::new).
    pub fn try_new(buffer: B, width: u32, height: u32) -> Option<Self> {
        if buffer.as_ref().len() < Self::required_len(width, height) {
            return None;
        }
        Some(Self {
            buffer,
            width,
            height,
            polarity: BitmapColor::default(),
        })
    }

    /// Select what a set bit means
    ///
    /// Pixels already drawn keep their bits, so set this before drawing.
    pub fn set_polarity(&mut self, polarity: BitmapColor) {
        self.polarity = polarity;
    }

    /// Current bit polarity
    pub fn polarity(&self) -> BitmapColor {
        self.polarity
    }

    /// Fill every pixel with `color`
    pub fn clear(&mut self, color: Color) {
        let byte = color.source_byte(self.polarity);
        let end = Self::required_len(self.width, self.height);
        self.buffer.as_mut()[SOURCE_HEADER_LEN..end].fill(byte);
    }

    /// Color of the pixel at (`x`, `y`), or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let (index, bit) = self.locate(x, y)?;
        let set = self.buffer.as_ref()[index] & bit != 0;
        let set_color = self.polarity.set_bit_color();
        Some(match (set, set_color) {
            (true, color) => color,
            (false, Color::Black) => Color::White,
            (false, Color::White) => Color::Black,
        })
    }

    /// Header and pixels, ready for [`Panel::draw`](crate::Panel::draw)
    pub fn as_source(&self) -> &[u8] {
        &self.buffer.as_ref()[..Self::required_len(self.width, self.height)]
    }

    /// Release the buffer
    pub fn into_inner(self) -> B {
        self.buffer
    }

    fn locate(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let n = y as usize * self.width as usize + x as usize;
        Some((SOURCE_HEADER_LEN + n / 8, 0x80 >> (n % 8)))
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let Some((index, bit)) = self.locate(x, y) else {
            return;
        };
        let byte = &mut self.buffer.as_mut()[index];
        if color == self.polarity.set_bit_color() {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }
}

impl<B> DrawTarget for Canvas<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            self.set_pixel(x as u32, y as u32, color);
        }

        Ok(())
    }
}

impl<B> OriginDimensions for Canvas<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Dimensions};
    use crate::display::Panel;
    use crate::interface::DisplayInterface;
    use alloc::vec;
    use alloc::vec::Vec;
    use embedded_graphics::{
        pixelcolor::BinaryColor,
        prelude::*,
        primitives::{Line, PrimitiveStyle, Rectangle},
    };
    use embedded_hal::delay::DelayNs;

    #[derive(Debug, Default)]
    struct MockInterface {
        ram: Vec<u8>,
        last_command: u8,
    }

    impl DisplayInterface for MockInterface {
        type Error = Infallible;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.last_command = command;
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if self.last_command == 0x24 {
                self.ram = data.to_vec();
            }
            Ok(())
        }

        fn reset<D: DelayNs>(
            &mut self,
            _delay: &mut D,
            _active_high: bool,
        ) -> Result<bool, Self::Error> {
            Ok(false)
        }

        fn is_busy(&mut self) -> Result<Option<bool>, Self::Error> {
            Ok(None)
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn canvas(width: u32, height: u32) -> Canvas<Vec<u8>> {
        Canvas::new(vec![0u8; Canvas::<Vec<u8>>::required_len(width, height)], width, height)
    }

    #[test]
    fn test_required_len_counts_header() {
        assert_eq!(Canvas::<Vec<u8>>::required_len(400, 300), 8 + 15_000);
        assert_eq!(Canvas::<Vec<u8>>::required_len(3, 3), 8 + 2);
    }

    #[test]
    fn test_try_new_short_buffer() {
        assert!(Canvas::try_new(vec![0u8; 15], 8, 8).is_none());
        assert!(Canvas::try_new(vec![0u8; 16], 8, 8).is_some());
    }

    #[test]
    fn test_clear_leaves_header() {
        let mut buffer = vec![0xEEu8; Canvas::<Vec<u8>>::required_len(16, 2)];
        buffer[SOURCE_HEADER_LEN..].fill(0);
        let mut canvas = Canvas::new(buffer, 16, 2);
        canvas.clear(Color::Black);
        let data = canvas.into_inner();
        assert_eq!(&data[..SOURCE_HEADER_LEN], &[0xEE; SOURCE_HEADER_LEN]);
        assert_eq!(&data[SOURCE_HEADER_LEN..], &[0xFF; 4]);
    }

    #[test]
    fn test_pixels_are_row_major_msb_first() {
        let mut canvas = canvas(12, 2);
        Pixel(Point::new(0, 0), Color::Black).draw(&mut canvas).unwrap();
        Pixel(Point::new(11, 0), Color::Black).draw(&mut canvas).unwrap();
        Pixel(Point::new(0, 1), Color::Black).draw(&mut canvas).unwrap();
        // Bit 12 is (0, 1); rows are not padded to bytes
        assert_eq!(&canvas.as_source()[SOURCE_HEADER_LEN..], &[0x80, 0x18, 0x00]);
        assert_eq!(canvas.pixel(11, 0), Some(Color::Black));
        assert_eq!(canvas.pixel(10, 0), Some(Color::White));
        assert_eq!(canvas.pixel(12, 0), None);
    }

    #[test]
    fn test_out_of_bounds_pixels_are_ignored() {
        let mut canvas = canvas(8, 1);
        Line::new(Point::new(-4, 0), Point::new(20, 0))
            .into_styled(PrimitiveStyle::with_stroke(Color::Black, 1))
            .draw(&mut canvas)
            .unwrap();
        assert_eq!(canvas.as_source().len(), SOURCE_HEADER_LEN + 1);
        assert_eq!(canvas.as_source()[SOURCE_HEADER_LEN], 0xFF);
    }

    #[test]
    fn test_white_polarity_sets_white_bits() {
        let mut canvas = canvas(8, 1);
        canvas.set_polarity(BitmapColor::White);
        canvas.clear(Color::Black);
        Pixel(Point::new(7, 0), Color::White).draw(&mut canvas).unwrap();
        assert_eq!(canvas.as_source()[SOURCE_HEADER_LEN], 0x01);
        assert_eq!(canvas.pixel(7, 0), Some(Color::White));
    }

    #[test]
    fn test_binary_color_maps_on_to_black() {
        let mut canvas = canvas(8, 1);
        let mut binary = canvas.color_converted::<BinaryColor>();
        Pixel(Point::new(0, 0), BinaryColor::On).draw(&mut binary).unwrap();
        assert_eq!(canvas.pixel(0, 0), Some(Color::Black));
    }

    #[test]
    fn test_canvas_feeds_panel_draw() {
        let config = Builder::new()
            .dimensions(Dimensions::new(8, 16).unwrap())
            .build()
            .unwrap();
        let mut panel = Panel::new(MockInterface::default(), config).unwrap();
        panel.reset(&mut MockDelay).unwrap();
        panel.initialize(&mut MockDelay).unwrap();

        let mut canvas = canvas(16, 8);
        canvas.clear(Color::White);
        Rectangle::new(Point::new(0, 0), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(Color::Black))
            .draw(&mut canvas)
            .unwrap();
        panel
            .draw(0, 0, 16, 8, canvas.as_source(), &mut MockDelay)
            .unwrap();

        // Black in RAM is a cleared bit: left half 0x00, right half 0xFF
        let expected: Vec<u8> = [0x00, 0xFF].repeat(8);
        assert_eq!(panel.destroy().ram, expected);
    }
}
