use std::fmt::Write;

use anyhow::Result;
use clap::Parser;
use decode::{LengthSize, NalUnit, SampleDecoder};
use log::info;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, long)]
    file_path: String,

    /// Width of each NAL unit length field: 1, 2, or 4 bytes.
    #[arg(short, long, default_value_t = LengthSize::Four, value_parser = parse_length_size)]
    length_size: LengthSize,

    /// Fail on a short sample or on bytes left after the last NAL unit.
    #[arg(short, long)]
    strict: bool,

    /// Number of leading payload bytes to print in hex for each NAL unit.
    #[arg(short, long, default_value_t = 0)]
    preview: usize,
}

fn parse_length_size(s: &str) -> Result<LengthSize> {
    Ok(LengthSize::try_from(s.parse::<u8>()?)?)
}

fn format_nal_unit(index: usize, nal_unit: &NalUnit<'_>, preview: usize) -> String {
    let mut line = format!(
        "#{} offset={} len={}",
        index,
        nal_unit.offset(),
        nal_unit.len()
    );

    if preview > 0 {
        line.push(' ');
        for byte in nal_unit.iter().take(preview) {
            let _ = write!(line, "{byte:02x}");
        }
    }

    line
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Args {
        file_path,
        length_size,
        strict,
        preview,
    } = Args::parse();

    let decoder = SampleDecoder::from_file_path(&file_path, length_size)?.strict(strict);
    info!("decoding {} bytes with {}-byte lengths", decoder.len(), length_size);

    let (nal_units, consumed) = decoder.sample().extract_with_consumed()?;
    for (index, nal_unit) in nal_units.iter().enumerate() {
        println!("{}", format_nal_unit(index, nal_unit, preview));
    }
    println!(
        "units={} consumed={}/{}",
        nal_units.len(),
        consumed,
        decoder.len()
    );

    Ok(())
}
