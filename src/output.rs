use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::write::EncoderWriter;
use base64::Engine;

use fortuna_gen::{BlockSource, Error, Generator, KeyHash};

use crate::config::OutputFormat;

/// Generates `count` bytes as a single request and writes them to stdout or
/// a file in the specified format.
pub fn write_output<B: BlockSource, H: KeyHash>(
    generator: &mut Generator<B, H>,
    count: usize,
    format: OutputFormat,
    output_file: Option<&Path>,
) -> Result<(), Error> {
    match output_file {
        Some(path) => {
            let f = File::create(path)?;
            let mut out = BufWriter::new(f);
            stream_output(generator, count, format, &mut out)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            stream_output(generator, count, format, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Encodes generator chunks as they are produced; nothing beyond one chunk
/// is held in memory.
fn stream_output<B: BlockSource, H: KeyHash>(
    generator: &mut Generator<B, H>,
    count: usize,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), Error> {
    match format {
        OutputFormat::Raw => {
            generator.for_each_chunk(count, |chunk| Ok(out.write_all(chunk)?))?;
        }
        OutputFormat::Hex => {
            generator.for_each_chunk(count, |chunk| {
                Ok(out.write_all(hex::encode(chunk).as_bytes())?)
            })?;
            writeln!(out)?;
        }
        OutputFormat::HexUpper => {
            generator.for_each_chunk(count, |chunk| {
                Ok(out.write_all(hex::encode_upper(chunk).as_bytes())?)
            })?;
            writeln!(out)?;
        }
        OutputFormat::Base64 => stream_base64(generator, count, &STANDARD, out)?,
        OutputFormat::Base64url => stream_base64(generator, count, &URL_SAFE_NO_PAD, out)?,
    }
    Ok(())
}

fn stream_base64<B: BlockSource, H: KeyHash, E: Engine>(
    generator: &mut Generator<B, H>,
    count: usize,
    engine: &E,
    out: &mut dyn Write,
) -> Result<(), Error> {
    {
        // Chunks are not multiples of 3 bytes; the encoder carries the
        // leftover bytes across chunk boundaries.
        let mut encoder = EncoderWriter::new(&mut *out, engine);
        generator.for_each_chunk(count, |chunk| Ok(encoder.write_all(chunk)?))?;
        encoder.finish()?;
    }
    writeln!(out)?;
    Ok(())
}
