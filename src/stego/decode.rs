// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

//! Single-carrier decode pipeline.
//!
//! Decode is the mirror image of encode, minus the worker thread: the header
//! says how many quarters this carrier holds, and the scan walks the same
//! pixel order with the same eligibility test, pulling low bits until the
//! count is satisfied. The quarter stream is then zero-padded to a byte
//! boundary and joined back into bytes.
//!
//! There is no integrity check anywhere in this path. A wrong password
//! derives a different mask, the scan visits different channels, and the
//! result is a plausibly sized pile of garbage reported as success. That is
//! a documented property of the scheme, not an oversight.

use log::{debug, warn};

use crate::bits::{get_low_bits, join_quarter_stream};
use crate::stego::carrier::Carrier;
use crate::stego::error::StegoError;
use crate::stego::header::{read_header, RESERVED_PIXELS};
use crate::stego::mask::Mask;
use crate::stego::StegoConfig;

/// Extract the payload bytes embedded in one carrier.
///
/// The header's set ID and sequence number are ignored here: multi-carrier
/// ordering is the caller's responsibility, and a single-carrier decode has
/// nothing to compare them against.
///
/// # Errors
/// [`StegoError::CarrierTooSmall`] if the carrier cannot hold a header.
pub fn decode(carrier: &Carrier, mask: &Mask, config: StegoConfig) -> Result<Vec<u8>, StegoError> {
    let header = read_header(carrier)?;
    let mut remaining = header.unit_count;
    debug!(
        "carrier {}: header says {} embedded quarters",
        header.seq_num, header.unit_count
    );

    let mut quarters = Vec::with_capacity(remaining as usize);

    'scan: for x in 0..carrier.width() {
        for y in 0..carrier.height() {
            if x == 0 && y < RESERVED_PIXELS {
                continue;
            }
            if remaining == 0 {
                break 'scan;
            }
            for channel in carrier.rgb(x, y) {
                if config.use_mask && !mask.eligible(channel) {
                    continue;
                }
                quarters.push(get_low_bits(channel));
                remaining -= 1;
                if remaining == 0 {
                    break 'scan;
                }
            }
        }
    }

    if remaining > 0 {
        // Header promised more quarters than the carrier can hold — the
        // header is corrupted or the mask is wrong. Return what was read;
        // the caller cannot tell garbage from payload anyway.
        warn!("carrier ran out of eligible channels with {remaining} quarters unread");
    }

    Ok(join_quarter_stream(&quarters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::encode::encode;
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn carrier(width: u32, height: u32) -> Carrier {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 31 + y) % 256) as u8,
                ((y * 17 + x) % 256) as u8,
                ((x * y + 11) % 256) as u8,
            ])
        });
        Carrier::from_image(DynamicImage::ImageRgb8(img))
    }

    #[test]
    fn roundtrip_with_mask() {
        let mask = Mask::derive("round trip pw");
        let config = StegoConfig::default();
        let payload = b"the quick brown fox jumps over the lazy dog";
        let encoded = encode(carrier(64, 64), &payload[..], 0, 42, &mask, config).unwrap();
        assert_eq!(decode(&encoded, &mask, config).unwrap(), payload);
    }

    #[test]
    fn roundtrip_without_mask() {
        let mask = Mask::derive("unused");
        let config = StegoConfig { use_mask: false };
        let payload: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
        let encoded = encode(carrier(32, 32), &payload[..], 0, 1, &mask, config).unwrap();
        assert_eq!(decode(&encoded, &mask, config).unwrap(), payload);
    }

    #[test]
    fn roundtrip_survives_png_reencode() {
        let mask = Mask::derive("png cycle");
        let config = StegoConfig::default();
        let payload = b"payload must survive the PNG byte cycle";
        let encoded = encode(carrier(64, 64), &payload[..], 0, 5, &mask, config).unwrap();
        let reloaded = Carrier::from_bytes(&encoded.to_png_bytes().unwrap()).unwrap();
        assert_eq!(decode(&reloaded, &mask, config).unwrap(), payload);
    }

    #[test]
    fn empty_payload_decodes_empty() {
        let mask = Mask::derive("pw");
        let config = StegoConfig::default();
        let encoded = encode(carrier(16, 16), &b""[..], 0, 0, &mask, config).unwrap();
        assert!(decode(&encoded, &mask, config).unwrap().is_empty());
    }

    #[test]
    fn wrong_password_yields_garbage_not_error() {
        let right = Mask::derive("right password");
        let wrong = Mask::derive("wrong password");
        let config = StegoConfig::default();
        let payload: Vec<u8> = (0..200u32).map(|i| (i * 7 % 256) as u8).collect();
        let encoded = encode(carrier(64, 64), &payload[..], 0, 9, &right, config).unwrap();

        let garbage = decode(&encoded, &wrong, config).unwrap();
        // Decode must report success; the content just will not match.
        assert_ne!(garbage, payload);
    }

    #[test]
    fn decode_reads_only_eligible_channels() {
        // Flipping the low bits of an ineligible channel must not change the
        // decoded payload.
        let mask = Mask::derive("eligibility");
        let config = StegoConfig::default();
        let payload = b"stable under ineligible-channel noise";
        let mut encoded = encode(carrier(64, 64), &payload[..], 0, 0, &mask, config).unwrap();

        let mut flipped = 0;
        'outer: for x in 1..encoded.width() {
            for y in 0..encoded.height() {
                let mut px = encoded.rgb(x, y);
                for c in px.iter_mut() {
                    if !mask.eligible(*c) {
                        *c ^= 0b11;
                        flipped += 1;
                    }
                }
                encoded.set_rgb(x, y, px);
                if flipped > 500 {
                    break 'outer;
                }
            }
        }
        assert!(flipped > 0, "mask marked every channel eligible");
        assert_eq!(decode(&encoded, &mask, config).unwrap(), payload);
    }
}
