// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

//! Quarter-level bit manipulation.
//!
//! A *quarter* is a 2-bit value (0..=3) carried in the low bits of a byte.
//! It is the atomic unit of embedding: each payload byte maps to exactly four
//! quarters, most-significant pair first, and each quarter occupies the low
//! 2 bits of one pixel channel. Integers are quartered little-endian
//! byte-wise, so a u32 yields 16 quarters and a u64 yields 32.
//!
//! All functions here are pure and total; encode and decode must agree on
//! them bit for bit.

/// Mask selecting the low 2 bits of a byte (one quarter).
pub const QUARTER_MASK: u8 = 0b0000_0011;

/// Split a byte into its four quarters: bits 7-6, 5-4, 3-2, 1-0 in that order.
///
/// Each returned byte holds one quarter right-aligned, e.g.
/// `0b1011_0011` → `[0b10, 0b11, 0b00, 0b11]`.
pub fn split_into_quarters(b: u8) -> [u8; 4] {
    [
        b >> 6,
        (b >> 4) & QUARTER_MASK,
        (b >> 2) & QUARTER_MASK,
        b & QUARTER_MASK,
    ]
}

/// Rebuild a byte from four quarters: `(q0 << 6) | (q1 << 4) | (q2 << 2) | q3`.
///
/// Inverse of [`split_into_quarters`].
pub fn join_from_quarters(q: [u8; 4]) -> u8 {
    (q[0] << 6) | (q[1] << 4) | (q[2] << 2) | q[3]
}

/// Clear the low 2 bits of a byte.
pub fn clear_low_bits(b: u8) -> u8 {
    b & !QUARTER_MASK
}

/// Replace the low 2 bits of `b` with `quarter` (only its low 2 bits are used).
pub fn set_low_bits(b: u8, quarter: u8) -> u8 {
    clear_low_bits(b) | (quarter & QUARTER_MASK)
}

/// Extract the low 2 bits of a byte as a quarter.
pub fn get_low_bits(b: u8) -> u8 {
    b & QUARTER_MASK
}

/// Quarter a u16: 2 little-endian bytes → 8 quarters.
pub fn quarters_of_u16(v: u16) -> [u8; 8] {
    let mut out = [0u8; 8];
    for (i, b) in v.to_le_bytes().into_iter().enumerate() {
        out[i * 4..i * 4 + 4].copy_from_slice(&split_into_quarters(b));
    }
    out
}

/// Quarter a u32: 4 little-endian bytes → 16 quarters.
pub fn quarters_of_u32(v: u32) -> [u8; 16] {
    let mut out = [0u8; 16];
    for (i, b) in v.to_le_bytes().into_iter().enumerate() {
        out[i * 4..i * 4 + 4].copy_from_slice(&split_into_quarters(b));
    }
    out
}

/// Quarter a u64: 8 little-endian bytes → 32 quarters.
pub fn quarters_of_u64(v: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, b) in v.to_le_bytes().into_iter().enumerate() {
        out[i * 4..i * 4 + 4].copy_from_slice(&split_into_quarters(b));
    }
    out
}

/// Join a quarter stream back into bytes.
///
/// The stream is zero-padded on the right to a multiple of 4 quarters, then
/// every 4 consecutive quarters become one byte. A stream that ends mid-byte
/// (possible when a scan stops partway through a pixel) therefore decodes
/// with trailing zero bits rather than being dropped.
pub fn join_quarter_stream(quarters: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(quarters.len().div_ceil(4));
    for chunk in quarters.chunks(4) {
        let mut q = [0u8; 4];
        q[..chunk.len()].copy_from_slice(chunk);
        out.push(join_from_quarters(q));
    }
    out
}
