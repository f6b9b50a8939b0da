// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

//! Multi-carrier orchestration.
//!
//! A payload can be split across several carriers that together form a
//! *carrier set*: one shared set ID, one password-derived mask, sequence
//! numbers 0..N-1. Chunking is by nominal size `len / N`, with the last
//! carrier taking the remainder, so concatenating the per-carrier decodes in
//! encode order reproduces the payload exactly.
//!
//! Decode trusts the caller-supplied carrier order. Each carrier records its
//! sequence number in the header, but reordering is deliberately not
//! attempted: supplying carriers in the wrong order silently produces wrong
//! output, matching the scheme's no-integrity-check stance.
//!
//! The path-level functions are the only layer that touches the file system
//! and the only layer that cleans up: if any carrier in a set fails to
//! encode, every output file already written for that set is deleted before
//! the error is returned.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{info, warn};

use crate::stego::carrier::Carrier;
use crate::stego::decode::decode;
use crate::stego::encode::encode;
use crate::stego::error::StegoError;
use crate::stego::header::MAX_SEQ_NUM;
use crate::stego::mask::Mask;
use crate::stego::StegoConfig;

/// Largest number of carriers one set can hold (bounded by the 6-bit
/// sequence-number header field).
pub const MAX_CARRIERS: usize = MAX_SEQ_NUM as usize + 1;

/// Split a payload into `n` chunks: nominal size `len / n`, last chunk takes
/// the remainder. With `len < n` the nominal size is zero and everything
/// lands in the last chunk; the empty leading chunks still occupy a carrier
/// so sequence numbers stay aligned.
fn split_chunks(payload: &[u8], n: usize) -> Vec<&[u8]> {
    debug_assert!(n > 0);
    let chunk_size = payload.len() / n;
    (0..n)
        .map(|i| {
            let start = i * chunk_size;
            let end = if i == n - 1 {
                payload.len()
            } else {
                (i + 1) * chunk_size
            };
            &payload[start..end]
        })
        .collect()
}

/// Encode a payload across a set of in-memory carriers.
///
/// Carrier `i` receives chunk `i` and sequence number `i`; all carriers share
/// `set_id` and the mask derived from `password`.
///
/// # Errors
/// - [`StegoError::NoCarriers`] / [`StegoError::TooManyCarriers`] on a bad
///   set size.
/// - Any single-carrier encode error, unchanged, for the first carrier that
///   fails.
pub fn encode_set_images(
    carriers: Vec<Carrier>,
    payload: &[u8],
    set_id: u64,
    password: &str,
    config: StegoConfig,
) -> Result<Vec<Carrier>, StegoError> {
    if carriers.is_empty() {
        return Err(StegoError::NoCarriers);
    }
    if carriers.len() > MAX_CARRIERS {
        return Err(StegoError::TooManyCarriers(carriers.len()));
    }

    let mask = Mask::derive(password);
    let chunks = split_chunks(payload, carriers.len());
    info!(
        "encoding {} payload bytes across {} carriers (set {set_id})",
        payload.len(),
        carriers.len()
    );

    carriers
        .into_iter()
        .zip(chunks)
        .enumerate()
        .map(|(i, (carrier, chunk))| encode(carrier, chunk, i as u16, set_id, &mask, config))
        .collect()
}

/// Decode a carrier set supplied **in encode order** and concatenate the
/// recovered chunks.
pub fn decode_set_images(
    carriers: &[Carrier],
    password: &str,
    config: StegoConfig,
) -> Result<Vec<u8>, StegoError> {
    if carriers.is_empty() {
        return Err(StegoError::NoCarriers);
    }

    let mask = Mask::derive(password);
    let mut payload = Vec::new();
    for carrier in carriers {
        payload.extend(decode(carrier, &mask, config)?);
    }
    Ok(payload)
}

/// Encode a payload file across carrier files, writing one
/// `<stem>-<index>-embedded.png` per carrier into `output_dir`.
///
/// On any failure every output file already written for this set is removed
/// before the error is returned; the set either exists completely or not at
/// all.
pub fn encode_set(
    carrier_paths: &[PathBuf],
    payload_path: &Path,
    set_id: u64,
    password: &str,
    output_dir: &Path,
    config: StegoConfig,
) -> Result<Vec<PathBuf>, StegoError> {
    check_output_dir(output_dir)?;
    if carrier_paths.is_empty() {
        return Err(StegoError::NoCarriers);
    }
    if carrier_paths.len() > MAX_CARRIERS {
        return Err(StegoError::TooManyCarriers(carrier_paths.len()));
    }

    let payload = fs::read(payload_path).map_err(|e| StegoError::io(payload_path, e))?;

    let mut written = Vec::with_capacity(carrier_paths.len());
    let result = encode_set_to_files(
        carrier_paths,
        &payload,
        set_id,
        password,
        output_dir,
        config,
        &mut written,
    );
    if let Err(e) = result {
        for path in &written {
            if let Err(rm) = fs::remove_file(path) {
                warn!("failed to clean up {}: {rm}", path.display());
            }
        }
        return Err(e);
    }
    Ok(written)
}

fn encode_set_to_files(
    carrier_paths: &[PathBuf],
    payload: &[u8],
    set_id: u64,
    password: &str,
    output_dir: &Path,
    config: StegoConfig,
    written: &mut Vec<PathBuf>,
) -> Result<(), StegoError> {
    let mask = Mask::derive(password);
    let chunks = split_chunks(payload, carrier_paths.len());
    info!(
        "encoding {} payload bytes across {} carriers (set {set_id})",
        payload.len(),
        carrier_paths.len()
    );

    for (i, (path, chunk)) in carrier_paths.iter().zip(chunks).enumerate() {
        let carrier = Carrier::from_file(path)?;
        let encoded = encode(carrier, chunk, i as u16, set_id, &mask, config)?;
        let out_path = output_dir.join(format!("{}-{i}-embedded.png", stem_of(path)));
        encoded.save_png(&out_path)?;
        info!("wrote {}", out_path.display());
        written.push(out_path);
    }
    Ok(())
}

/// Decode carrier files supplied **in encode order** into a single payload
/// file `decoded-<timestamp>.bin` under `output_dir`. Returns the output
/// path.
pub fn decode_set(
    carrier_paths: &[PathBuf],
    password: &str,
    output_dir: &Path,
    config: StegoConfig,
) -> Result<PathBuf, StegoError> {
    check_output_dir(output_dir)?;
    if carrier_paths.is_empty() {
        return Err(StegoError::NoCarriers);
    }

    let mask = Mask::derive(password);
    let mut payload = Vec::new();
    for path in carrier_paths {
        let carrier = Carrier::from_file(path)?;
        payload.extend(decode(&carrier, &mask, config)?);
    }

    let out_path = output_dir.join(format!(
        "decoded-{}.bin",
        Local::now().format("%Y-%m-%d-%H-%M-%S")
    ));
    fs::write(&out_path, &payload).map_err(|e| StegoError::io(&out_path, e))?;
    info!("wrote {} ({} bytes)", out_path.display(), payload.len());
    Ok(out_path)
}

/// The output directory must already exist; nothing here creates directories.
fn check_output_dir(dir: &Path) -> Result<(), StegoError> {
    if !dir.is_dir() {
        return Err(StegoError::InvalidOutputDir(dir.to_path_buf()));
    }
    Ok(())
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "carrier".to_string())
}
