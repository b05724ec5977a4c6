//! Grayscale raster input for the stipple filter.
//!
//! The filter only needs integer-pixel luma lookups, so decoders live outside the
//! crate and implement [`GrayscaleRaster`]; [`LumaBuffer`] is the in-memory version.
use crate::error::{Error, Result};

/// An 8-bit grayscale image addressed by integer pixel coordinates.
pub trait GrayscaleRaster {
    /// Size in pixels as `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Luma in `[0, 255]` at a pixel inside [`GrayscaleRaster::dimensions`].
    fn luma_at(&self, x: u32, y: u32) -> u8;

    /// Luma at a signed pixel position, `None` outside the image.
    fn try_luma_at(&self, x: i64, y: i64) -> Option<u8> {
        let (w, h) = self.dimensions();
        if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
            return None;
        }
        Some(self.luma_at(x as u32, y as u32))
    }
}

/// Row-major 8-bit luma pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LumaBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl LumaBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidConfig(format!(
                "luma buffer of {width}x{height} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer with every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }
}

impl GrayscaleRaster for LumaBuffer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn luma_at(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }
}
