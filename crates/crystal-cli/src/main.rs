mod cli;

use std::io::{self, BufWriter, Write};

use clap::Parser;
use cli::config::{CliArgs, CliConfig, Command, OutputFormat};
use cli::output::{write_header, write_id, write_inspection};
use cli::telemetry::init_telemetry;
use crystal::{CrystalGenerator, Generator};

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_telemetry()?;
    tracing::debug!(?config, "parsed configuration");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match config.command {
        Command::Generate { count, format } => {
            let generator = Generator::with_config(&config.generator);
            tracing::info!(
                machine = generator.machine(),
                pid = generator.pid(),
                epoch_millis = config.generator.epoch_millis(),
                time_bits = generator.layout().time_bits(),
                count,
                "generating"
            );

            if format == OutputFormat::Table {
                write_header(&mut out, &generator)?;
            }
            for _ in 0..count {
                let id = generator.generate();
                write_id(&mut out, id, generator.config(), format)?;
            }
        }
        Command::Inspect { value, from } => {
            let id = from.decode(&value)?;
            if !id.is_valid() {
                tracing::warn!(%id, "reserved top bit is set, this ID was not generated");
            }
            write_inspection(&mut out, id, &config.generator)?;
        }
    }

    out.flush()?;
    Ok(())
}
