// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

//! Command-line interface definition.
//!
//! Two subcommands, mirroring the library's orchestrator: `encode` hides a
//! payload file across one or more carriers, `decode` recovers it. Path and
//! directory validation happens up front in the handler, before any pixel
//! work.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Hide a payload in the low bits of PNG/JPEG carrier images, or recover it.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log at debug level.
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode a payload file into one or more carrier images.
    Encode(EncodeArgs),

    /// Decode carriers (in encode order!) back into the payload.
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Carrier image files (PNG or JPEG). The payload is split across them
    /// in this order.
    #[arg(short, long, required = true, num_args = 1..)]
    pub carriers: Vec<PathBuf>,

    /// File whose bytes will be hidden.
    #[arg(short = 'f', long)]
    pub payload: PathBuf,

    /// Numeric identifier stamped into every carrier of this set (48 bits).
    #[arg(short = 'i', long)]
    pub set_id: u64,

    /// Password that seeds the channel-selection mask.
    #[arg(short, long)]
    pub password: String,

    /// Existing directory to write the embedded carriers into.
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Embed into every non-header channel instead of mask-selected ones.
    /// Maximum capacity, no placement obscurity; decode needs the same flag.
    #[arg(long)]
    pub no_mask: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Embedded carrier files, in the exact order used at encode time.
    #[arg(short, long, required = true, num_args = 1..)]
    pub carriers: Vec<PathBuf>,

    /// Password used at encode time.
    #[arg(short, long)]
    pub password: String,

    /// Existing directory to write the recovered payload into.
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// The set was encoded with --no-mask.
    #[arg(long)]
    pub no_mask: bool,
}
