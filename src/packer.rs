//! Bitmap packer
//!
//! Converts a caller bitmap into BW RAM layout. The caller format is an opaque
//! [`SOURCE_HEADER_LEN`]-byte header followed by row-major, MSB-first 1 bpp pixels.
//! BW RAM uses the same bit order, so packing only changes polarity: with
//! [`BitmapColor::Black`] a set source bit (black) becomes a cleared RAM bit.
//!
//! ```
//! use ssd1681::packer::{pack, SOURCE_HEADER_LEN};
//! use ssd1681::BitmapColor;
//!
//! let mut source = [0u8; SOURCE_HEADER_LEN + 2];
//! source[SOURCE_HEADER_LEN] = 0xF0;
//! source[SOURCE_HEADER_LEN + 1] = 0x01;
//!
//! let mut framebuffer = [0xAAu8; 4];
//! let stats = pack(&mut framebuffer, &source, 2, BitmapColor::Black).unwrap();
//! assert_eq!(framebuffer, [0x0F, 0xFE, 0x00, 0x00]);
//! assert_eq!(stats.black, 5);
//! assert_eq!(stats.white, 11);
//! ```

use crate::color::BitmapColor;

/// Length of the opaque header in front of source pixel data
pub const SOURCE_HEADER_LEN: usize = 8;

/// Pixel counts gathered while packing
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PackStats {
    /// Pixels packed as black
    pub black: u32,
    /// Pixels packed as white
    pub white: u32,
}

/// Reasons [`pack`] rejects its arguments
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PackError {
    /// `buffer_size` was zero
    EmptyRegion,
    /// The source holds fewer than `SOURCE_HEADER_LEN + buffer_size` bytes
    SourceTooShort {
        /// Bytes needed, header included
        required: usize,
        /// Bytes provided
        provided: usize,
    },
    /// The framebuffer is shorter than `buffer_size`
    FramebufferTooSmall {
        /// Bytes needed
        required: usize,
        /// Bytes available
        provided: usize,
    },
}

impl core::fmt::Display for PackError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyRegion => write!(f, "Region packs to zero bytes"),
            Self::SourceTooShort { required, provided } => write!(
                f,
                "Source bitmap too short: required {required} bytes, provided {provided}"
            ),
            Self::FramebufferTooSmall { required, provided } => write!(
                f,
                "Framebuffer too small: required {required} bytes, provided {provided}"
            ),
        }
    }
}

impl core::error::Error for PackError {}

/// Pack `buffer_size` bytes of source pixels into `framebuffer`
///
/// The whole framebuffer is zero-filled first, so bytes past `buffer_size` never
/// keep data from an earlier, larger draw.
///
/// # Errors
///
/// Fails before touching the framebuffer if `buffer_size` is zero or either buffer
/// is too short.
pub fn pack(
    framebuffer: &mut [u8],
    source: &[u8],
    buffer_size: usize,
    color: BitmapColor,
) -> Result<PackStats, PackError> {
    if buffer_size == 0 {
        return Err(PackError::EmptyRegion);
    }
    let required = SOURCE_HEADER_LEN + buffer_size;
    if source.len() < required {
        return Err(PackError::SourceTooShort {
            required,
            provided: source.len(),
        });
    }
    if framebuffer.len() < buffer_size {
        return Err(PackError::FramebufferTooSmall {
            required: buffer_size,
            provided: framebuffer.len(),
        });
    }

    framebuffer.fill(0);

    let pixels = &source[SOURCE_HEADER_LEN..required];
    let mut set_bits = 0u32;
    // Same bit order on both sides, so whole bytes map across.
    for (dst, &src) in framebuffer[..buffer_size].iter_mut().zip(pixels) {
        set_bits += src.count_ones();
        *dst = match color {
            BitmapColor::Black => !src,
            BitmapColor::White => src,
        };
    }

    let total = (buffer_size * 8) as u32;
    let stats = match color {
        BitmapColor::Black => PackStats {
            black: set_bits,
            white: total - set_bits,
        },
        BitmapColor::White => PackStats {
            black: total - set_bits,
            white: set_bits,
        },
    };
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn source_with(pixels: &[u8]) -> alloc::vec::Vec<u8> {
        let mut source = vec![0xEEu8; SOURCE_HEADER_LEN];
        source.extend_from_slice(pixels);
        source
    }

    #[test]
    fn test_all_black_source_packs_to_zero() {
        let source = source_with(&[0xFF; 8]);
        let mut fb = vec![0x55u8; 8];
        let stats = pack(&mut fb, &source, 8, BitmapColor::Black).unwrap();
        assert_eq!(fb, vec![0x00; 8]);
        assert_eq!(stats, PackStats { black: 64, white: 0 });
    }

    #[test]
    fn test_all_white_source_packs_to_ones() {
        let source = source_with(&[0x00; 8]);
        let mut fb = vec![0u8; 8];
        pack(&mut fb, &source, 8, BitmapColor::Black).unwrap();
        assert_eq!(fb, vec![0xFF; 8]);
    }

    #[test]
    fn test_every_bit_is_complemented() {
        let pixels = [0x00, 0x01, 0x80, 0x5A, 0xC3, 0xFF, 0x7E, 0x81];
        let source = source_with(&pixels);
        let mut fb = vec![0u8; pixels.len()];
        pack(&mut fb, &source, pixels.len(), BitmapColor::Black).unwrap();
        for i in 0..pixels.len() * 8 {
            let src_bit = pixels[i / 8] & (0x80 >> (i % 8)) != 0;
            let dst_bit = fb[i / 8] & (0x80 >> (i % 8)) != 0;
            assert_ne!(src_bit, dst_bit, "bit {i}");
        }
    }

    #[test]
    fn test_header_is_skipped() {
        let mut source = vec![0xFFu8; SOURCE_HEADER_LEN];
        source.push(0x00);
        let mut fb = [0u8; 1];
        pack(&mut fb, &source, 1, BitmapColor::Black).unwrap();
        assert_eq!(fb, [0xFF]);
    }

    #[test]
    fn test_white_polarity_copies_bits() {
        let source = source_with(&[0xA5, 0x0F]);
        let mut fb = [0u8; 2];
        let stats = pack(&mut fb, &source, 2, BitmapColor::White).unwrap();
        assert_eq!(fb, [0xA5, 0x0F]);
        assert_eq!(stats, PackStats { black: 8, white: 8 });
    }

    #[test]
    fn test_smaller_repack_clears_tail() {
        let mut fb = vec![0u8; 4];
        pack(&mut fb, &source_with(&[0x00; 4]), 4, BitmapColor::Black).unwrap();
        assert_eq!(fb, vec![0xFF; 4]);

        pack(&mut fb, &source_with(&[0xFF]), 1, BitmapColor::Black).unwrap();
        assert_eq!(fb, vec![0x00; 4]);
    }

    #[test]
    fn test_full_frame_ignores_prior_state() {
        let source = source_with(&[0x3C; 16]);
        let mut fresh = vec![0u8; 16];
        let mut dirty = vec![0xFFu8; 16];
        pack(&mut fresh, &source, 16, BitmapColor::Black).unwrap();
        pack(&mut dirty, &source, 16, BitmapColor::Black).unwrap();
        assert_eq!(fresh, dirty);
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut fb = [0x11u8; 2];
        let result = pack(&mut fb, &source_with(&[0x00]), 0, BitmapColor::Black);
        assert_eq!(result, Err(PackError::EmptyRegion));
        assert_eq!(fb, [0x11, 0x11]);
    }

    #[test]
    fn test_short_source_rejected() {
        let mut fb = [0u8; 4];
        let result = pack(&mut fb, &source_with(&[0x00; 2]), 4, BitmapColor::Black);
        assert_eq!(
            result,
            Err(PackError::SourceTooShort {
                required: 12,
                provided: 10
            })
        );
    }

    #[test]
    fn test_small_framebuffer_rejected() {
        let mut fb = [0u8; 1];
        let result = pack(&mut fb, &source_with(&[0x00; 2]), 2, BitmapColor::Black);
        assert!(matches!(
            result,
            Err(PackError::FramebufferTooSmall { required: 2, .. })
        ));
    }
}
