//! VRAM staging buffer
//!
//! The panel packs each draw into a full-resolution 1 bpp buffer before sending it.
//! In the default mode the driver allocates and owns that buffer; in non-copy mode
//! the caller lends one for the panel's lifetime.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Framebuffer owned by the panel or borrowed from the caller
#[derive(Debug)]
pub enum Framebuffer<'a> {
    /// Allocated by the driver, freed with the panel
    #[cfg(feature = "alloc")]
    Owned(Vec<u8>),
    /// Lent by the caller (non-copy mode)
    Borrowed(&'a mut [u8]),
}

impl<'a> Framebuffer<'a> {
    /// Allocate a zeroed buffer of `size` bytes
    ///
    /// Returns `None` if the allocator cannot satisfy the request.
    #[cfg(feature = "alloc")]
    pub fn allocate(size: usize) -> Option<Self> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(size).ok()?;
        buffer.resize(size, 0);
        Some(Self::Owned(buffer))
    }

    /// Wrap a caller buffer
    pub fn borrowed(buffer: &'a mut [u8]) -> Self {
        Self::Borrowed(buffer)
    }

    /// Whether the driver owns this buffer
    pub fn is_owned(&self) -> bool {
        match self {
            #[cfg(feature = "alloc")]
            Self::Owned(_) => true,
            Self::Borrowed(_) => false,
        }
    }

    /// Buffer contents
    pub fn as_slice(&self) -> &[u8] {
        match self {
            #[cfg(feature = "alloc")]
            Self::Owned(buffer) => buffer,
            Self::Borrowed(buffer) => buffer,
        }
    }

    /// Mutable buffer contents
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            #[cfg(feature = "alloc")]
            Self::Owned(buffer) => buffer,
            Self::Borrowed(buffer) => buffer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "alloc")]
    #[test]
    fn test_allocate_is_zeroed_and_owned() {
        let fb = Framebuffer::allocate(15_000).unwrap();
        assert!(fb.is_owned());
        assert_eq!(fb.as_slice().len(), 15_000);
        assert!(fb.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_borrowed_writes_reach_caller() {
        let mut storage = [0u8; 4];
        {
            let mut fb = Framebuffer::borrowed(&mut storage);
            assert!(!fb.is_owned());
            fb.as_mut_slice()[2] = 0x7F;
        }
        assert_eq!(storage, [0, 0, 0x7F, 0]);
    }
}
