//! huffcode: build Huffman code tables from text and pack text with them.

mod config;
mod input_gen;
mod logger;

use std::process::ExitCode;

use huffcode_core::metrics::CompressionStats;
use huffcode_core::{Error, HuffmanCodec, Result};
use log::{debug, info};

use config::{Command, Config};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", Error::Config(e));
            eprintln!("run `huffcode --help` for usage");
            return ExitCode::FAILURE;
        }
    };

    logger::init(config.verbose);
    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let mut stats = CompressionStats::new();

    match &config.command {
        Command::Build { input, table } => {
            let text = std::fs::read_to_string(input)?;
            let codec = HuffmanCodec::from_sample(text.chars())?;
            codec.save(table)?;
            stats.record_table(codec.table());
            info!(
                "wrote table with {} symbols to {}",
                codec.table().len(),
                table.display()
            );
        }

        Command::Encode {
            table,
            input,
            output,
        } => {
            let codec: HuffmanCodec<char> = HuffmanCodec::load(table)?;
            let text = std::fs::read_to_string(input)?;
            let packed = codec.encode(text.chars())?;
            std::fs::write(output, packed.as_bytes())?;

            stats.record_table(codec.table());
            stats.record_encode(text.len(), text.chars().count(), &packed);
            info!("wrote {} bytes to {}", packed.len(), output.display());
        }

        Command::Decode {
            table,
            input,
            output,
        } => {
            let codec: HuffmanCodec<char> = HuffmanCodec::load(table)?;
            let symbols = codec.decode_from_path(input)?;
            let text: String = symbols.iter().collect();
            std::fs::write(output, &text)?;

            stats.record_table(codec.table());
            stats.record_decode(symbols.len());
            info!("wrote {} chars to {}", symbols.len(), output.display());
        }

        Command::Demo { seed, size, table } => {
            info!("demo seed: {seed} (rerun with --seed {seed})");
            let text = input_gen::generate_sample_text(*seed, *size);
            debug!("generated {} chars, {} bytes", size, text.len());

            let codec = HuffmanCodec::from_sample(text.chars())?;
            if let Some(path) = table {
                codec.save(path)?;
                info!("wrote table to {}", path.display());
            }

            let packed = codec.encode(text.chars())?;
            let decoded = codec.decode_string(&packed)?;

            stats.record_table(codec.table());
            stats.record_encode(text.len(), *size, &packed);
            stats.record_decode(decoded.chars().count());

            verify_round_trip(&text, &decoded)?;
        }
    }

    stats.complete();
    if config.print_stats {
        stats.print_summary();
    }
    Ok(())
}

/// Check that decoding gave back exactly the encoded text.
fn verify_round_trip(original: &str, decoded: &str) -> Result<()> {
    let mut original_chars = original.chars();
    let mut decoded_chars = decoded.chars();
    let mut position = 0;
    loop {
        match (original_chars.next(), decoded_chars.next()) {
            (None, None) => return Ok(()),
            (a, b) if a == b => position += 1,
            _ => return Err(Error::RoundTripMismatch { position }),
        }
    }
}
