// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

//! # stegmask
//!
//! Password-masked LSB steganography: hide an arbitrary payload in the low
//! 2 bits of one or more PNG/JPEG carrier images, recoverable only with the
//! password used at encode time.
//!
//! Each payload byte becomes four 2-bit *quarters*; a password-derived
//! [`Mask`] selects which pixel channels may carry a quarter, so an observer
//! without the password cannot enumerate the used channels. A fixed header
//! in each carrier's first column records the carrier-set ID, the carrier's
//! sequence number, and how many quarters it holds. Output carriers are
//! always PNG (lossless, so the low bits survive).
//!
//! # Quick start
//!
//! ```rust,ignore
//! use stegmask::{Carrier, Mask, StegoConfig};
//!
//! let mask = Mask::derive("hunter2");
//! let config = StegoConfig::default();
//! let carrier = Carrier::from_file("photo.png".as_ref())?;
//! let encoded = stegmask::encode(carrier, &b"secret"[..], 0, 42, &mask, config)?;
//! let recovered = stegmask::decode(&encoded, &mask, config)?;
//! assert_eq!(recovered, b"secret");
//! ```
//!
//! Splitting across several carriers goes through [`encode_set`] /
//! [`decode_set`]; decode requires the carriers in encode order.

pub mod bits;
pub mod cli;
pub mod stego;

pub use stego::carrier::Carrier;
pub use stego::decode::decode;
pub use stego::encode::encode;
pub use stego::header::{read_header, write_header, Header};
pub use stego::mask::Mask;
pub use stego::set::{decode_set, decode_set_images, encode_set, encode_set_images};
pub use stego::{StegoConfig, StegoError};
