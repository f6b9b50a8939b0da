// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

//! Fixed-layout carrier header codec.
//!
//! Every carrier self-describes through 13 reserved pixels in its first
//! column (x = 0), written and read unconditionally — the mask never applies
//! here. Three quarters are stored per pixel (one in each of R, G, B):
//!
//! ```text
//! pixels 0..=7   carrier-set ID      24 quarters = 48 usable bits
//! pixel  8       sequence number      3 quarters =  6 usable bits (0..=63)
//! pixels 9..=12  embedded-unit count 12 quarters = 24 usable bits
//! ```
//!
//! Fields are quartered little-endian byte-wise and laid down consecutively,
//! so the set ID occupies the low 6 bytes of its u64 and the unit count the
//! low 3 bytes of its u32. The sequence number stores the three low quarters
//! of its low byte (bits 5-0); its top quarter is always zero for values
//! 0..=63, which is exactly the range a 64-carrier set needs.

use crate::bits::{
    get_low_bits, join_quarter_stream, quarters_of_u16, quarters_of_u32, quarters_of_u64,
    set_low_bits,
};
use crate::stego::carrier::Carrier;
use crate::stego::error::StegoError;

/// Pixels holding the carrier-set ID.
pub const ID_PIXELS: u32 = 8;
/// Pixels holding the carrier sequence number.
pub const SEQ_PIXELS: u32 = 1;
/// Pixels holding the embedded-unit count.
pub const COUNT_PIXELS: u32 = 4;
/// Total reserved pixels at the top of the first column.
pub const RESERVED_PIXELS: u32 = ID_PIXELS + SEQ_PIXELS + COUNT_PIXELS;

/// Largest carrier-set ID the 48-bit field can represent.
pub const MAX_SET_ID: u64 = (1 << 48) - 1;
/// Largest sequence number the 6-bit field can represent.
pub const MAX_SEQ_NUM: u16 = 63;
/// Largest embedded-unit count the 24-bit field can represent.
pub const MAX_UNIT_COUNT: u32 = (1 << 24) - 1;

/// The decoded header triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Identifier shared by every carrier in the set (low 48 bits).
    pub set_id: u64,
    /// This carrier's position within the set, `0..=63`.
    pub seq_num: u16,
    /// Number of payload quarters embedded in this carrier.
    pub unit_count: u32,
}

/// Write the header into the reserved region of `carrier`.
///
/// Values wider than their fields are truncated to the usable bits; callers
/// validate ranges where truncation would be an error (the codec rejects
/// out-of-range sequence numbers and unit counts before getting here).
///
/// # Errors
/// [`StegoError::CarrierTooSmall`] if the first column has fewer than
/// [`RESERVED_PIXELS`] rows.
pub fn write_header(
    carrier: &mut Carrier,
    set_id: u64,
    seq_num: u16,
    unit_count: u32,
) -> Result<(), StegoError> {
    carrier.check_header_room()?;

    let id_quarters = quarters_of_u64(set_id);
    let seq_quarters = quarters_of_u16(seq_num);
    let count_quarters = quarters_of_u32(unit_count);

    // One consecutive quarter stream: 24 ID quarters, then the three
    // informative sequence quarters (bits 5-0 of the low byte), then 12
    // count quarters. 39 quarters over 13 pixels.
    let mut stream = Vec::with_capacity(RESERVED_PIXELS as usize * 3);
    stream.extend_from_slice(&id_quarters[..24]);
    stream.extend_from_slice(&seq_quarters[1..4]);
    stream.extend_from_slice(&count_quarters[..12]);

    for y in 0..RESERVED_PIXELS {
        let mut px = carrier.rgb(0, y);
        for (channel, quarter) in px.iter_mut().zip(&stream[y as usize * 3..]) {
            *channel = set_low_bits(*channel, *quarter);
        }
        carrier.set_rgb(0, y, px);
    }
    Ok(())
}

/// Read the header back out of the reserved region.
///
/// # Errors
/// [`StegoError::CarrierTooSmall`] if the first column has fewer than
/// [`RESERVED_PIXELS`] rows.
pub fn read_header(carrier: &Carrier) -> Result<Header, StegoError> {
    carrier.check_header_room()?;

    let mut stream = Vec::with_capacity(RESERVED_PIXELS as usize * 3);
    for y in 0..RESERVED_PIXELS {
        for channel in carrier.rgb(0, y) {
            stream.push(get_low_bits(channel));
        }
    }

    // Set ID: 24 quarters → 6 bytes, zero-extended to a u64.
    let id_bytes = join_quarter_stream(&stream[..24]);
    let mut id = [0u8; 8];
    id[..6].copy_from_slice(&id_bytes);
    let set_id = u64::from_le_bytes(id);

    // Sequence number: three quarters are bits 5-0; the top quarter is zero.
    let seq_byte = join_quarter_stream(&[0, stream[24], stream[25], stream[26]])[0];
    let seq_num = u16::from_le_bytes([seq_byte, 0]);

    // Unit count: 12 quarters → 3 bytes, zero-extended to a u32.
    let count_bytes = join_quarter_stream(&stream[27..39]);
    let unit_count = u32::from_le_bytes([count_bytes[0], count_bytes[1], count_bytes[2], 0]);

    Ok(Header {
        set_id,
        seq_num,
        unit_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn carrier(width: u32, height: u32) -> Carrier {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x * 13 % 251) as u8, (y * 7 % 253) as u8, ((x ^ y) % 256) as u8])
        });
        Carrier::from_image(DynamicImage::ImageRgb8(img))
    }

    fn roundtrip(set_id: u64, seq_num: u16, unit_count: u32) -> Header {
        let mut c = carrier(4, 16);
        write_header(&mut c, set_id, seq_num, unit_count).unwrap();
        read_header(&c).unwrap()
    }

    #[test]
    fn roundtrip_boundary_values() {
        // Zero, maximum, and an interior value for each field.
        for set_id in [0, MAX_SET_ID, 0x1234_5678_9ABC] {
            for seq_num in [0, MAX_SEQ_NUM, 37] {
                for unit_count in [0, MAX_UNIT_COUNT, 1_425_600] {
                    let h = roundtrip(set_id, seq_num, unit_count);
                    assert_eq!(
                        h,
                        Header {
                            set_id,
                            seq_num,
                            unit_count
                        }
                    );
                }
            }
        }
    }

    #[test]
    fn every_sequence_number_roundtrips() {
        for seq in 0..=MAX_SEQ_NUM {
            assert_eq!(roundtrip(99, seq, 400).seq_num, seq);
        }
    }

    #[test]
    fn header_only_touches_low_bits() {
        let before = carrier(4, 16);
        let mut after = before.clone();
        write_header(&mut after, MAX_SET_ID, MAX_SEQ_NUM, MAX_UNIT_COUNT).unwrap();
        for y in 0..16 {
            for x in 0..4 {
                let (b, a) = (before.rgb(x, y), after.rgb(x, y));
                for c in 0..3 {
                    assert_eq!(b[c] & !0b11, a[c] & !0b11, "high bits changed at ({x},{y})");
                }
                if x != 0 || y >= RESERVED_PIXELS {
                    assert_eq!(b, a, "non-header pixel changed at ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn too_small_carrier_rejected() {
        let mut c = carrier(4, 12);
        assert!(matches!(
            write_header(&mut c, 1, 1, 1),
            Err(StegoError::CarrierTooSmall { .. })
        ));
        assert!(read_header(&carrier(4, 12)).is_err());
    }
}
