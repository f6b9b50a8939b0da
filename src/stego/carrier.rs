// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

//! Carrier image loading and pixel access.
//!
//! A [`Carrier`] wraps the pixel buffer of a PNG or JPEG image in straight
//! (non-premultiplied) RGBA form. Straight alpha matters: premultiplication
//! would rewrite the R/G/B values and break bit-exact reciprocity between
//! encode and decode. Alpha is preserved but never carries data.
//!
//! Format checking happens here, before any bit is touched: a byte stream
//! that is not PNG or JPEG is rejected with
//! [`StegoError::UnsupportedFormat`]. Output is always PNG, since a lossy
//! re-encode would destroy the embedded low bits.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::stego::error::StegoError;
use crate::stego::header::RESERVED_PIXELS;

/// A carrier image: a rectangular grid of straight-alpha RGBA pixels.
#[derive(Debug, Clone)]
pub struct Carrier {
    pixels: RgbaImage,
}

impl Carrier {
    /// Load a carrier from raw PNG or JPEG bytes.
    ///
    /// # Errors
    /// - [`StegoError::UnsupportedFormat`] if the bytes are a recognized
    ///   image format other than PNG/JPEG.
    /// - [`StegoError::InvalidImage`] if the bytes cannot be decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoError> {
        let format = image::guess_format(bytes)?;
        if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
            return Err(StegoError::UnsupportedFormat(format));
        }
        let img = image::load_from_memory_with_format(bytes, format)?;
        Ok(Self::from_image(img))
    }

    /// Load a carrier from a file on disk.
    pub fn from_file(path: &Path) -> Result<Self, StegoError> {
        let bytes = fs::read(path).map_err(|e| StegoError::io(path, e))?;
        Self::from_bytes(&bytes)
    }

    /// Wrap an already decoded image, converting to straight-alpha RGBA.
    pub fn from_image(img: DynamicImage) -> Self {
        Self {
            pixels: img.to_rgba8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Check that the first column can hold the reserved header region.
    pub(crate) fn check_header_room(&self) -> Result<(), StegoError> {
        if self.height() < RESERVED_PIXELS || self.width() == 0 {
            return Err(StegoError::CarrierTooSmall {
                min: RESERVED_PIXELS,
            });
        }
        Ok(())
    }

    /// The R, G, B channel values at `(x, y)`.
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let p = self.pixels.get_pixel(x, y).0;
        [p[0], p[1], p[2]]
    }

    /// Overwrite the R, G, B channels at `(x, y)`, leaving alpha untouched.
    pub fn set_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let p = self.pixels.get_pixel_mut(x, y);
        p.0[0] = rgb[0];
        p.0[1] = rgb[1];
        p.0[2] = rgb[2];
    }

    /// Number of non-header channel slots when masking is disabled.
    ///
    /// Every R/G/B channel outside the reserved first-column pixels can carry
    /// one quarter.
    pub fn eligible_slots(&self) -> u64 {
        let total = u64::from(self.width()) * u64::from(self.height()) * 3;
        let reserved = u64::from(RESERVED_PIXELS.min(self.height())) * 3;
        total - reserved
    }

    /// Number of mask-eligible channel slots, scanning the same order and
    /// skipping the same reserved region as the codec.
    ///
    /// Informational only (logged before encode/decode); the codec itself
    /// streams until the payload runs out rather than pre-counting.
    pub fn open_slots(&self, mask: &crate::stego::mask::Mask) -> u64 {
        let mut open = 0u64;
        for x in 0..self.width() {
            for y in 0..self.height() {
                if x == 0 && y < RESERVED_PIXELS {
                    continue;
                }
                for channel in self.rgb(x, y) {
                    if mask.eligible(channel) {
                        open += 1;
                    }
                }
            }
        }
        open
    }

    /// Encode the pixel buffer as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, StegoError> {
        let mut out = Cursor::new(Vec::new());
        self.pixels.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    /// Write the carrier to disk as PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), StegoError> {
        let bytes = self.to_png_bytes()?;
        fs::write(path, bytes).map_err(|e| StegoError::io(path, e))
    }
}
