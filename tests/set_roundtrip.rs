// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

//! Round-trip integration tests for multi-carrier encode/decode.

use image::{DynamicImage, ImageBuffer, Rgb};
use stegmask::{
    decode_set_images, encode_set_images, read_header, Carrier, StegoConfig, StegoError,
};

fn carrier(width: u32, height: u32) -> Carrier {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 13 + y * 7) % 256) as u8,
            ((x * 3 + y * 29) % 256) as u8,
            ((x + y * y) % 256) as u8,
        ])
    });
    Carrier::from_image(DynamicImage::ImageRgb8(img))
}

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

#[test]
fn set_roundtrip_masked() {
    let config = StegoConfig::default();
    let data = payload(300);
    let carriers = vec![carrier(64, 64), carrier(48, 48), carrier(80, 40)];

    let encoded = encode_set_images(carriers, &data, 7, "set-pass", config).unwrap();
    let decoded = decode_set_images(&encoded, "set-pass", config).unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn set_roundtrip_unmasked() {
    let config = StegoConfig { use_mask: false };
    let data = payload(1000);
    let carriers = vec![carrier(32, 32), carrier(32, 32)];

    let encoded = encode_set_images(carriers, &data, 1, "ignored", config).unwrap();
    let decoded = decode_set_images(&encoded, "ignored", config).unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn carriers_share_set_id_and_count_sequence_numbers() {
    let config = StegoConfig::default();
    let data = payload(120);
    let carriers = vec![carrier(64, 64), carrier(64, 64), carrier(64, 64)];

    let encoded = encode_set_images(carriers, &data, 0xBEEF, "pw", config).unwrap();
    for (i, c) in encoded.iter().enumerate() {
        let header = read_header(c).unwrap();
        assert_eq!(header.set_id, 0xBEEF);
        assert_eq!(header.seq_num, i as u16);
    }
}

#[test]
fn unit_counts_match_chunk_sizes_unmasked() {
    // Without a mask every quarter lands, so each carrier's header count is
    // exactly four quarters per chunk byte: 100 / 3 gives chunks of 33, 33, 34.
    let config = StegoConfig { use_mask: false };
    let data = payload(100);
    let carriers = vec![carrier(32, 32), carrier(32, 32), carrier(32, 32)];

    let encoded = encode_set_images(carriers, &data, 3, "pw", config).unwrap();
    let counts: Vec<u32> = encoded
        .iter()
        .map(|c| read_header(c).unwrap().unit_count)
        .collect();
    assert_eq!(counts, vec![33 * 4, 33 * 4, 34 * 4]);
}

#[test]
fn empty_set_is_rejected() {
    let result = encode_set_images(vec![], &payload(10), 0, "pw", StegoConfig::default());
    assert!(matches!(result, Err(StegoError::NoCarriers)));
}

#[test]
fn oversized_set_is_rejected() {
    // The sequence-number field tops out at 64 carriers.
    let carriers: Vec<Carrier> = (0..65).map(|_| carrier(16, 16)).collect();
    let result = encode_set_images(carriers, &payload(10), 0, "pw", StegoConfig::default());
    assert!(matches!(result, Err(StegoError::TooManyCarriers(65))));
}

#[test]
fn wrong_password_scrambles_the_set() {
    let config = StegoConfig::default();
    let data = payload(200);
    let carriers = vec![carrier(64, 64), carrier(64, 64)];

    let encoded = encode_set_images(carriers, &data, 2, "correct", config).unwrap();
    let garbage = decode_set_images(&encoded, "incorrect", config).unwrap();
    assert_ne!(garbage, data);
}

#[test]
fn payload_smaller_than_carrier_count() {
    // Two bytes across three carriers: the first two carry nothing, the last
    // carries everything, and the join still reproduces the payload.
    let config = StegoConfig::default();
    let data = payload(2);
    let carriers = vec![carrier(16, 16), carrier(16, 16), carrier(16, 16)];

    let encoded = encode_set_images(carriers, &data, 0, "pw", config).unwrap();
    assert_eq!(read_header(&encoded[0]).unwrap().unit_count, 0);
    assert_eq!(read_header(&encoded[1]).unwrap().unit_count, 0);
    assert_eq!(read_header(&encoded[2]).unwrap().unit_count, 8);
    assert_eq!(decode_set_images(&encoded, "pw", config).unwrap(), data);
}

#[test]
fn set_roundtrip_survives_png_byte_cycle() {
    let config = StegoConfig::default();
    let data = payload(150);
    let carriers = vec![carrier(64, 64), carrier(64, 64)];

    let encoded = encode_set_images(carriers, &data, 11, "pw", config).unwrap();
    let reloaded: Vec<Carrier> = encoded
        .iter()
        .map(|c| Carrier::from_bytes(&c.to_png_bytes().unwrap()).unwrap())
        .collect();
    assert_eq!(decode_set_images(&reloaded, "pw", config).unwrap(), data);
}
