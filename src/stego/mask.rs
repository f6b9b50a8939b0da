// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

//! Password-derived channel-selection mask.
//!
//! The [`Mask`] decides which pixel channels are allowed to carry payload
//! quarters. It is derived once per encode/decode session: the password is
//! hashed with SHA-256, the first 8 digest bytes (big-endian) seed a ChaCha20
//! PRNG, and the mask fields are drawn in a fixed order. Identical password
//! therefore means a bit-identical mask, while anyone without the password
//! cannot enumerate which channels were used.
//!
//! # Cross-platform portability
//!
//! Every draw uses a fixed-width `u32` range (never `usize`) so the PRNG
//! consumes identical entropy on 32-bit and 64-bit targets and the derived
//! mask matches everywhere. Changing the draw order or widths breaks every
//! previously encoded carrier set.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

use crate::bits::clear_low_bits;

/// Exclusive upper bound for the multiplier draw.
///
/// Largest value that keeps `255 * multiplier` (max channel value times
/// multiplier) below the signed 32-bit maximum: 255 × 8_421_504 =
/// 2_147_483_520 ≤ 2_147_483_647.
pub const MULTIPLIER_BOUND: u32 = 8_421_504;

/// Index bounds for the two mask bit positions.
///
/// Indices run 1..=28 so that, after the `31 - index` shift, the extracted
/// bits never come from the low 2 bits of the 32-bit product — those are the
/// bits the payload overwrites.
const INDEX_MIN: u32 = 1;
const INDEX_MAX: u32 = 28;

/// A password-derived selection mask, immutable once generated and shared
/// read-only across every carrier in a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask {
    /// 32-bit value the multiplied channel value is XORed against.
    mask_value: i32,
    /// Channel-value multiplier, `0 <= multiplier < 8_421_504`.
    multiplier: i32,
    /// First bit index into the XOR result, `1..=28`.
    index_a: i16,
    /// Second bit index, `1..=28`, always distinct from `index_a`.
    index_b: i16,
    /// Flips the sense of the predicate.
    invert: bool,
}

impl Mask {
    /// Derive the mask for a password.
    ///
    /// Draw order is fixed: `mask_value`, `multiplier`, `index_a`, `index_b`
    /// (re-drawn until distinct from `index_a`), `invert`.
    pub fn derive(password: &str) -> Self {
        let digest = Sha256::digest(password.as_bytes());
        let seed = u64::from_be_bytes(digest[..8].try_into().expect("digest is 32 bytes"));
        let mut rng = ChaCha20Rng::seed_from_u64(seed);

        let mask_value = rng.gen::<u32>() as i32;
        let multiplier = rng.gen_range(0..MULTIPLIER_BOUND) as i32;
        let index_a = rng.gen_range(INDEX_MIN..=INDEX_MAX) as i16;
        let mut index_b = rng.gen_range(INDEX_MIN..=INDEX_MAX) as i16;
        while index_b == index_a {
            index_b = rng.gen_range(INDEX_MIN..=INDEX_MAX) as i16;
        }
        let invert = rng.gen_range(0..2u32) == 1;

        Mask {
            mask_value,
            multiplier,
            index_a,
            index_b,
            invert,
        }
    }

    /// Slot-eligibility test: may this channel carry a payload quarter?
    ///
    /// The low 2 bits of `channel` are cleared *before* the test, so writing
    /// payload bits into the channel cannot change its eligibility — decode
    /// re-runs the same test on the modified value and gets the same answer.
    /// The cleared value is widened to u32 and multiplied (no overflow: see
    /// [`MULTIPLIER_BOUND`]), XORed with `mask_value`, and two single bits at
    /// positions `31 - index_a` and `31 - index_b` are extracted. The channel
    /// is eligible when "both bits set" equals `invert`.
    pub fn eligible(&self, channel: u8) -> bool {
        let cleared = clear_low_bits(channel) as u32;
        let product = cleared.wrapping_mul(self.multiplier as u32);
        let xored = product ^ self.mask_value as u32;

        let bit_a = (xored >> (31 - self.index_a as u32)) & 1;
        let bit_b = (xored >> (31 - self.index_b as u32)) & 1;

        (bit_a == 1 && bit_b == 1) == self.invert
    }
}
