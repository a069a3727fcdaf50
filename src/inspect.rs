use anyhow::{Context, Result};
use std::num::ParseIntError;

use crate::{
    hexdump::hexdump,
    preferences,
    storage::{create_storage, Startup, Storage, StorageUnit},
};

#[derive(Debug, clap::Args)]
pub struct InspectArgs {
    #[clap(short, long)]
    #[clap(help = "Number of cells")]
    pub size: usize,
    #[clap(short, long)]
    #[clap(help = "Width of each cell in bits (1-32)")]
    pub bits: u32,
    #[clap(long)]
    #[clap(help = "Start with random contents instead of zeros")]
    pub unknown: bool,
    #[clap(long, requires = "unknown")]
    #[clap(help = "Seed for the random contents")]
    pub seed: Option<u64>,
    #[clap(long, default_value_t = 0)]
    #[clap(help = "Address of the first loaded value")]
    pub start: usize,
    #[clap(long, value_delimiter = ',', value_parser = parse_word)]
    #[clap(help = "Comma separated values to load, decimal or 0x-prefixed hex")]
    pub load: Vec<i32>,
    #[clap(long, value_parser = parse_mask)]
    #[clap(help = "Mask applied to loaded values [default: the cell mask]")]
    pub load_mask: Option<u32>,
    #[clap(long, default_value_t = 16)]
    #[clap(help = "Cells per line in the dump")]
    pub stride: usize,
}

fn parse_hex_or_decimal(value: &str) -> Result<u32, ParseIntError> {
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    }
}

fn parse_word(value: &str) -> Result<i32, ParseIntError> {
    match value.strip_prefix('-') {
        Some(magnitude) => magnitude.parse::<i32>().map(|v| -v),
        None => parse_hex_or_decimal(value).map(|v| v as i32),
    }
}

fn parse_mask(value: &str) -> Result<u32, ParseIntError> {
    parse_hex_or_decimal(value)
}

/// Builds a storage unit as described by `args`, bulk loading any given values.
pub fn build(args: &InspectArgs) -> Result<Storage> {
    if args.unknown {
        preferences::set_memory_startup(Startup::Unknown { seed: args.seed });
    }

    let mut storage =
        create_storage(args.size, args.bits).with_context(|| "Unable to create storage")?;

    if !args.load.is_empty() {
        let mask = args.load_mask.unwrap_or(storage.mask());
        storage.load(args.start, &args.load, mask);
        tracing::info!(
            start = args.start,
            requested = args.load.len(),
            loaded = args.load.len().min(storage.len().saturating_sub(args.start)),
            "bulk loaded values"
        );
    }

    Ok(storage)
}

/// Prints a summary and a hexdump of the storage unit described by `args`.
pub fn inspect(args: &InspectArgs) -> Result<()> {
    let storage = build(args)?;
    let addr_width = format!("{:x}", storage.len().saturating_sub(1)).len().max(4);

    println!(
        "{} storage, {} cells, mask {:#x}",
        storage.kind(),
        storage.len(),
        storage.mask()
    );
    println!("{}", hexdump(&storage, 0, addr_width, args.stride));

    Ok(())
}
