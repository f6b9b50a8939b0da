// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use stegmask::cli::{Cli, Commands};
use stegmask::{decode_set, encode_set, StegoConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("failed to initialize logger")?;

    match cli.command {
        Commands::Encode(args) => {
            check_input_files(args.carriers.iter().chain(std::iter::once(&args.payload)))?;
            let config = StegoConfig {
                use_mask: !args.no_mask,
            };
            let written = encode_set(
                &args.carriers,
                &args.payload,
                args.set_id,
                &args.password,
                &args.output_dir,
                config,
            )
            .context("encoding failed")?;
            println!("encoded {} carrier(s):", written.len());
            for path in written {
                println!("  {}", path.display());
            }
        }
        Commands::Decode(args) => {
            check_input_files(args.carriers.iter())?;
            let config = StegoConfig {
                use_mask: !args.no_mask,
            };
            let out_path = decode_set(&args.carriers, &args.password, &args.output_dir, config)
                .context("decoding failed")?;
            println!("decoded payload written to {}", out_path.display());
        }
    }
    Ok(())
}

/// Every input file must exist before any pixel work starts.
fn check_input_files<'a>(paths: impl Iterator<Item = &'a std::path::PathBuf>) -> anyhow::Result<()> {
    for path in paths {
        anyhow::ensure!(path.is_file(), "input file {} does not exist", path.display());
    }
    Ok(())
}
