// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

//! Steganographic encoding and decoding pipelines.
//!
//! The flow, leaf-first:
//!
//! - [`mask`]: password → deterministic [`mask::Mask`] and its channel
//!   eligibility test.
//! - [`header`]: the 13 reserved first-column pixels that make every carrier
//!   self-describing (set ID, sequence number, embedded-unit count).
//! - [`carrier`]: PNG/JPEG loading into a straight-alpha pixel buffer.
//! - [`encode`] / [`decode`]: the single-carrier pixel-scan codec.
//! - [`set`]: splitting a payload across N carriers and reassembling it.
//!
//! What this is **not**: encryption. The mask obscures *placement*; payload
//! bytes go into the carrier unencrypted, and nothing verifies integrity. A
//! wrong password yields garbage that looks like success.

pub mod carrier;
pub mod decode;
pub mod encode;
pub mod error;
pub mod header;
pub mod mask;
pub mod set;

pub use error::StegoError;

/// Codec configuration, threaded explicitly through every encode/decode
/// call — deliberately not a process-wide flag, so callers can mix masked
/// and unmasked operations in one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StegoConfig {
    /// Apply the password-derived eligibility mask. When false, every
    /// non-header channel carries data (maximum capacity, no placement
    /// obscurity). Encode and decode must agree on this flag.
    pub use_mask: bool,
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self { use_mask: true }
    }
}
