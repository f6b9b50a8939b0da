// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from carrier loading through
//! embedding and extraction. Component-level errors bubble unchanged up to
//! the multi-carrier orchestrator, which is the only layer that performs
//! cleanup (deleting partially written output files). Nothing retries:
//! encode and decode are deterministic, so a retry would reproduce the
//! identical failure.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug, Error)]
pub enum StegoError {
    /// The carrier could not be decoded as an image at all.
    #[error("invalid carrier image: {0}")]
    InvalidImage(#[from] image::ImageError),

    /// The carrier decoded, but is neither PNG nor JPEG.
    #[error("unsupported carrier format {0:?}: only PNG and JPEG are accepted")]
    UnsupportedFormat(image::ImageFormat),

    /// The carrier has fewer rows than the reserved header region.
    #[error("carrier too small: the first column must hold at least {min} header pixels")]
    CarrierTooSmall {
        /// Minimum number of rows a carrier must have.
        min: u32,
    },

    /// Payload quarters remained after every eligible channel was filled.
    #[error("payload too large for this carrier")]
    PayloadTooLarge,

    /// The per-carrier embedded-unit counter would exceed its 24-bit header field.
    #[error("embedded-unit count exceeds the 24-bit header field")]
    UnitCountOverflow,

    /// The carrier sequence number does not fit the 6 usable header bits.
    #[error("carrier sequence number {0} out of range")]
    SequenceOutOfRange(u16),

    /// Reading the payload stream failed mid-encode.
    #[error("failed to read payload stream")]
    PayloadRead(#[source] io::Error),

    /// A file-system operation failed on the named path.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output directory does not exist or is not a directory.
    #[error("output directory {} does not exist or is not a directory", .0.display())]
    InvalidOutputDir(PathBuf),

    /// An empty carrier list was supplied to the orchestrator.
    #[error("no carrier files supplied")]
    NoCarriers,

    /// More carriers than the sequence-number field can distinguish.
    #[error("too many carriers in one set: {0}")]
    TooManyCarriers(usize),
}

impl StegoError {
    /// Attach a path to a raw I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
