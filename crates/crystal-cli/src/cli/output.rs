use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use crystal::{Config, CrystalId, Generator};

use super::config::OutputFormat;

fn utc_time(id: CrystalId, config: &Config) -> String {
    DateTime::<Utc>::from(config.extract_time(id)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Prints the generator settings as `# key: value` lines.
pub fn write_header(out: &mut impl Write, generator: &Generator) -> anyhow::Result<()> {
    let config = generator.config();
    let layout = generator.layout();
    writeln!(
        out,
        "# epoch:   {} ({})",
        config.epoch_millis(),
        utc_time(CrystalId::ZERO, config)
    )?;
    writeln!(out, "# machine: {}", generator.machine())?;
    writeln!(out, "# pid:     {}", generator.pid())?;
    writeln!(
        out,
        "# layout:  {} time bits, {} sequence bits",
        layout.time_bits(),
        layout.sequence_bits()
    )?;
    writeln!(out, "{:>19}  {:<13}  {:<16}  time", "int64", "base32", "hex")?;
    Ok(())
}

/// Prints one generated ID in `format`.
pub fn write_id(
    out: &mut impl Write,
    id: CrystalId,
    config: &Config,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => writeln!(
            out,
            "{:>19}  {}  {}  {}",
            id.to_i64(),
            id,
            id.to_hex(),
            utc_time(id, config)
        )?,
        OutputFormat::Int => writeln!(out, "{}", id.to_i64())?,
        OutputFormat::Base32 => writeln!(out, "{id}")?,
        OutputFormat::Hex => writeln!(out, "{}", id.to_hex())?,
    }
    Ok(())
}

/// Prints every form of `id` and its fields under `config`.
pub fn write_inspection(
    out: &mut impl Write,
    id: CrystalId,
    config: &Config,
) -> anyhow::Result<()> {
    let layout = config.layout();
    writeln!(out, "int64:     {}", id.to_i64())?;
    writeln!(out, "base32:    {id}")?;
    writeln!(out, "hex:       {}", id.to_hex())?;
    writeln!(out, "valid:     {}", id.is_valid())?;
    writeln!(out, "time:      {}", utc_time(id, config))?;
    writeln!(out, "unix ms:   {}", id.unix_millis(config))?;
    writeln!(out, "offset ms: {}", layout.timestamp(id))?;
    writeln!(out, "sequence:  {}", layout.sequence(id))?;
    writeln!(
        out,
        "layout:    {} time bits, {} sequence bits",
        layout.time_bits(),
        layout.sequence_bits()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn single_column_formats() {
        let config = Config::default();
        let id = CrystalId::from_i64(42);
        assert_eq!(
            render(|out| write_id(out, id, &config, OutputFormat::Int)),
            "42\n"
        );
        assert_eq!(
            render(|out| write_id(out, id, &config, OutputFormat::Base32)),
            "000000000002m\n"
        );
        assert_eq!(
            render(|out| write_id(out, id, &config, OutputFormat::Hex)),
            "000000000000002a\n"
        );
    }

    #[test]
    fn table_row_has_every_form() {
        let config = Config::default();
        let id = config.layout().compose(1_000, 3);
        let row = render(|out| write_id(out, id, &config, OutputFormat::Table));
        assert!(row.contains(&id.to_i64().to_string()));
        assert!(row.contains(&id.to_base32()));
        assert!(row.contains(&id.to_hex()));
        assert!(row.trim_end().ends_with("2020-01-01T00:00:01.000Z"));
    }

    #[test]
    fn inspection_reports_fields() {
        let config = Config::default();
        let id = config.layout().compose(1_000, 3);
        let text = render(|out| write_inspection(out, id, &config));
        assert!(text.contains("offset ms: 1000\n"));
        assert!(text.contains("sequence:  3\n"));
        assert!(text.contains("unix ms:   1577836801000\n"));
        assert!(text.contains("time:      2020-01-01T00:00:01.000Z\n"));
        assert!(text.contains("layout:    42 time bits, 21 sequence bits\n"));
    }

    #[test]
    fn header_names_generator_identity() {
        let generator =
            Generator::with_config(&Config::default().with_machine("host-a").with_pid(12));
        let text = render(|out| write_header(out, &generator));
        assert!(text.contains("# machine: host-a\n"));
        assert!(text.contains("# pid:     12\n"));
        assert!(text.contains("# epoch:   1577836800000 (2020-01-01T00:00:00.000Z)\n"));
    }
}
