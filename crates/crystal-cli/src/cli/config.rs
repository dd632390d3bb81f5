use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use crystal::{Config, CrystalId, DEFAULT_TIME_BITS, MAX_TIME_BITS, MIN_TIME_BITS};

/// Largest `--count` accepted by `generate`.
pub const MAX_COUNT: usize = 1_000_000;

/// Command line arguments for `crystal-cli`.
///
/// The generator settings are global and may also come from the environment
/// (or a `.env` file), so that `inspect` can decode IDs written by a service
/// configured the same way.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "crystal-cli",
    version,
    about = "Generate and inspect coordination-free, time-sortable 63-bit IDs"
)]
pub struct CliArgs {
    /// Epoch in Unix milliseconds. Defaults to 2020-01-01T00:00:00Z.
    ///
    /// Environment variable: `CRYSTAL_EPOCH_MILLIS`
    #[arg(long, global = true, env = "CRYSTAL_EPOCH_MILLIS")]
    pub epoch_millis: Option<u64>,

    /// Width of the timestamp field. Clamped to 40..=48.
    ///
    /// Environment variable: `CRYSTAL_TIME_BITS`
    #[arg(
        long,
        global = true,
        env = "CRYSTAL_TIME_BITS",
        allow_negative_numbers = true,
        default_value_t = i64::from(DEFAULT_TIME_BITS)
    )]
    pub time_bits: i64,

    /// Host name to seed from instead of the real one.
    ///
    /// Environment variable: `CRYSTAL_MACHINE`
    #[arg(long, global = true, env = "CRYSTAL_MACHINE")]
    pub machine: Option<String>,

    /// Process id to seed from instead of the real one.
    ///
    /// Environment variable: `CRYSTAL_PID`
    #[arg(long, global = true, env = "CRYSTAL_PID")]
    pub pid: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate IDs and print them.
    Generate {
        /// Number of IDs to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Output format. `table` also prints the generator settings.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Decode an ID and print all of its forms and fields.
    Inspect {
        /// The ID to decode.
        value: String,

        /// Encoding of `value`.
        #[arg(long, value_enum, default_value_t = InputFormat::Base32)]
        from: InputFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Int,
    Base32,
    Hex,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Base32,
    Hex,
    Int,
}

impl InputFormat {
    /// Decodes `value` in this encoding.
    pub fn decode(self, value: &str) -> anyhow::Result<CrystalId> {
        let id = match self {
            Self::Base32 => CrystalId::from_base32(value)
                .with_context(|| format!("{value:?} is not a base32 ID"))?,
            Self::Hex => {
                CrystalId::from_hex(value).with_context(|| format!("{value:?} is not a hex ID"))?
            }
            Self::Int => value
                .parse::<i64>()
                .map(CrystalId::from_i64)
                .with_context(|| format!("{value:?} is not a 64-bit integer"))?,
        };
        Ok(id)
    }
}

/// Validated settings for one invocation.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub generator: Config,
    pub command: Command,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if let Command::Generate { count, .. } = args.command {
            if count == 0 {
                bail!("--count must be greater than 0");
            }
            if count > MAX_COUNT {
                bail!("--count ({count}) exceeds the maximum of {MAX_COUNT}");
            }
        }

        let time_bits = args
            .time_bits
            .clamp(i64::from(MIN_TIME_BITS), i64::from(MAX_TIME_BITS));
        let mut generator = Config::default().with_time_bits(time_bits as u32);

        if let Some(epoch_millis) = args.epoch_millis {
            let now_millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock is before 1970")?
                .as_millis();
            if u128::from(epoch_millis) > now_millis {
                bail!("CRYSTAL_EPOCH_MILLIS ({epoch_millis}) is in the future");
            }
            generator = generator.with_epoch_millis(epoch_millis);
        }

        if let Some(machine) = args.machine {
            if machine.is_empty() {
                bail!("CRYSTAL_MACHINE must not be empty");
            }
            generator = generator.with_machine(machine);
        }

        if let Some(pid) = args.pid {
            generator = generator.with_pid(pid);
        }

        Ok(Self {
            generator,
            command: args.command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crystal::CRYSTAL_EPOCH;

    fn parse(args: &[&str]) -> anyhow::Result<CliConfig> {
        let argv = std::iter::once("crystal-cli").chain(args.iter().copied());
        let args = CliArgs::try_parse_from(argv)?;
        CliConfig::try_from(args)
    }

    #[test]
    fn generate_defaults() {
        let config = parse(&["--time-bits", "42", "generate"]).unwrap();
        assert_eq!(
            config.command,
            Command::Generate {
                count: 1,
                format: OutputFormat::Table
            }
        );
        assert_eq!(config.generator.time_bits(), 42);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let config = parse(&[
            "generate",
            "-n",
            "5",
            "--format",
            "base32",
            "--epoch-millis",
            "1420070400000",
            "--machine",
            "worker-1",
            "--pid",
            "99",
        ])
        .unwrap();
        assert_eq!(
            config.command,
            Command::Generate {
                count: 5,
                format: OutputFormat::Base32
            }
        );
        assert_eq!(config.generator.epoch_millis(), 1_420_070_400_000);
        assert_eq!(config.generator.machine(), Some("worker-1"));
        assert_eq!(config.generator.pid(), Some(99));
    }

    #[test]
    fn time_bits_are_clamped() {
        let wide = parse(&["--time-bits", "100", "generate"]).unwrap();
        assert_eq!(wide.generator.time_bits(), MAX_TIME_BITS);
        let narrow = parse(&["--time-bits", "0", "generate"]).unwrap();
        assert_eq!(narrow.generator.time_bits(), MIN_TIME_BITS);
        let negative = parse(&["--time-bits", "-5", "generate"]).unwrap();
        assert_eq!(negative.generator.time_bits(), MIN_TIME_BITS);
        let huge = parse(&["--time-bits", &i64::MAX.to_string(), "generate"]).unwrap();
        assert_eq!(huge.generator.time_bits(), MAX_TIME_BITS);
    }

    #[test]
    fn rejects_zero_and_excessive_counts() {
        let err = parse(&["generate", "--count", "0"]).unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
        let err = parse(&["generate", "--count", "1000001"]).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn rejects_future_epoch_and_empty_machine() {
        assert!(parse(&["--epoch-millis", &u64::MAX.to_string(), "generate"]).is_err());
        assert!(parse(&["--machine", "", "generate"]).is_err());
    }

    #[test]
    fn inspect_defaults_to_base32() {
        let config = parse(&["inspect", "000000000002m"]).unwrap();
        assert_eq!(
            config.command,
            Command::Inspect {
                value: "000000000002m".into(),
                from: InputFormat::Base32
            }
        );
        assert_eq!(config.generator.epoch(), CRYSTAL_EPOCH);
    }

    #[test]
    fn input_formats_decode() {
        let id = CrystalId::from_i64(42);
        assert_eq!(InputFormat::Base32.decode("000000000002m").unwrap(), id);
        assert_eq!(InputFormat::Hex.decode("000000000000002a").unwrap(), id);
        assert_eq!(InputFormat::Int.decode("42").unwrap(), id);

        assert!(InputFormat::Base32.decode("invalid!@#").is_err());
        assert!(InputFormat::Hex.decode("zzzz").is_err());
        assert!(InputFormat::Int.decode("4x2").is_err());
    }
}
