mod cli;
mod config;
mod logging;
mod output;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use fortuna_gen::{AesGenerator, Error};

use cli::Cli;
use config::{OutputFormat, SeedSource};

struct Settings {
    bytes: usize,
    format: OutputFormat,
    output_file: Option<PathBuf>,
    seeds: Vec<SeedSource>,
}

/// Build the run settings by layering: defaults → TOML file → CLI overrides.
/// Seeds accumulate instead: config files, then --seed-file, then --seed.
fn build_settings(cli: &Cli) -> Result<Settings, Error> {
    let file = config::load_config(cli.config_file.as_deref())?;

    let seeds = file
        .seed
        .files
        .into_iter()
        .chain(cli.seed_files.iter().cloned())
        .map(SeedSource::File)
        .chain(cli.seeds.iter().cloned().map(SeedSource::Hex))
        .collect();

    Ok(Settings {
        bytes: cli.bytes.unwrap_or(file.output.bytes),
        format: cli.format.unwrap_or(file.output.format),
        output_file: cli.output_file.clone(),
        seeds,
    })
}

fn run(cli: &Cli) -> Result<(), Error> {
    let settings = build_settings(cli)?;

    let mut generator = AesGenerator::new()?;
    for source in &settings.seeds {
        let seed = source.load()?;
        generator.reseed(&seed)?;
    }
    if !generator.is_seeded() {
        log::warn!("no seed material given; use --seed, --seed-file or [seed] files");
        return Err(Error::NotSeeded);
    }

    log::info!(
        "reseeded {} time(s); generating {} bytes as {:?}",
        settings.seeds.len(),
        settings.bytes,
        settings.format,
    );

    output::write_output(
        &mut generator,
        settings.bytes,
        settings.format,
        settings.output_file.as_deref(),
    )
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log);

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        process::exit(1);
    }
}
