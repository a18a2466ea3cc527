use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use compact_size::config::{CliConfig, OutputFormat};
use compact_size::{decode_compact_size, encode_compact_size, CompactSize, CompactSizeError};
use log::{debug, error, info};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Encode one or more base-10 integers
    Encode {
        /// Values to encode; negative, fractional or > u64::MAX values are rejected
        #[arg(required = true, allow_hyphen_values = true, allow_negative_numbers = true)]
        values: Vec<String>,
    },
    /// Decode every CompactSize packed back to back in a hex string
    Decode {
        /// Hex input, optionally prefixed with 0x; whitespace is ignored
        hex: String,
    },
    /// Walk the encoding boundaries and check each round trip
    Demo,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "compactsize", about = "Bitcoin CompactSize encoder/decoder")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Print hex digits in uppercase
    #[arg(long)]
    uppercase: bool,
}

#[derive(Serialize)]
struct EncodeReport {
    value: CompactSize,
    hex: String,
    len: usize,
}

#[derive(Serialize)]
struct DecodeReport {
    offset: usize,
    value: u64,
    consumed: usize,
    hex: String,
}

const DEMO_VALUES: [u64; 8] = [
    0,
    252,
    253,
    65535,
    65536,
    4294967295,
    4294967296,
    u64::MAX,
];

fn load_config(cli: &Cli) -> Result<CliConfig> {
    load_config_with(cli, |key| std::env::var(key).ok())
}

/// Defaults, then the config file, then `env`, then command-line flags
fn load_config_with(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => CliConfig::default(),
    };
    config.apply_env_with(env);
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.uppercase {
        config.output.uppercase_hex = true;
    }
    Ok(config)
}

fn emit<T: Serialize>(config: &CliConfig, report: &T, text: String) -> Result<()> {
    write_report(&mut std::io::stdout().lock(), config, report, text)
}

/// Write failures (e.g. a closed pipe) surface as errors instead of panicking
fn write_report<W: Write, T: Serialize>(
    out: &mut W,
    config: &CliConfig,
    report: &T,
    text: String,
) -> Result<()> {
    match config.output.format {
        OutputFormat::Text => writeln!(out, "{text}")?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(report)?)?,
    }
    Ok(())
}

fn encode_values(config: &CliConfig, values: &[String]) -> Result<()> {
    for raw in values {
        let value: CompactSize = raw
            .parse()
            .with_context(|| format!("cannot encode {raw:?}"))?;
        let encoded = value.encode();
        let report = EncodeReport {
            value,
            hex: config.format_hex(&encoded),
            len: encoded.len(),
        };
        let text = format!("{} -> {} ({} bytes)", report.value, report.hex, report.len);
        emit(config, &report, text)?;
    }
    Ok(())
}

fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
        .unwrap_or(&cleaned);
    hex::decode(digits).with_context(|| format!("invalid hex input {input:?}"))
}

/// Decode consecutive fields until the buffer is exhausted
fn decode_all(config: &CliConfig, data: &[u8]) -> compact_size::Result<Vec<DecodeReport>> {
    let mut reports = Vec::new();
    let mut offset = 0;
    while offset < data.len() {
        let (value, consumed) = decode_compact_size(&data[offset..])?;
        debug!("field at offset {offset}: value={value} consumed={consumed}");
        reports.push(DecodeReport {
            offset,
            value,
            consumed,
            hex: config.format_hex(&data[offset..offset + consumed]),
        });
        offset += consumed;
    }
    Ok(reports)
}

fn decode_hex(config: &CliConfig, input: &str) -> Result<()> {
    let data = parse_hex(input)?;
    if data.is_empty() {
        return Err(CompactSizeError::Truncated {
            needed: 1,
            available: 0,
        })
        .context("decoding CompactSize");
    }
    let reports = decode_all(config, &data).context("decoding CompactSize")?;
    for report in reports {
        let text = format!(
            "offset {}: {} (consumed {} bytes: {})",
            report.offset, report.value, report.consumed, report.hex
        );
        emit(config, &report, text)?;
    }
    Ok(())
}

fn run_demo(config: &CliConfig) -> Result<()> {
    info!("walking {} boundary values", DEMO_VALUES.len());
    for value in DEMO_VALUES {
        let encoded = encode_compact_size(value);
        let (decoded, consumed) = decode_compact_size(&encoded)?;
        if decoded != value || consumed != encoded.len() {
            bail!("round trip mismatch for {value}: got ({decoded}, {consumed})");
        }
        let report = DecodeReport {
            offset: 0,
            value,
            consumed,
            hex: config.format_hex(&encoded),
        };
        let text = format!(
            "Value: {value}, Encoded: {}, Decoded: {decoded}, Bytes: {consumed}",
            report.hex
        );
        emit(config, &report, text)?;
    }
    Ok(())
}

fn run(cli: &Cli, config: &CliConfig) -> Result<()> {
    match &cli.command {
        Command::Encode { values } => encode_values(config, values),
        Command::Decode { hex } => decode_hex(config, hex),
        Command::Demo => run_demo(config),
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(2);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();
    debug!("effective config: {config:?}");

    if let Err(err) = run(&cli, &config) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_all_back_to_back() {
        let data = [0x01, 0xfd, 0xfd, 0x00, 0xfe, 0x00, 0x00, 0x01, 0x00];
        let reports = decode_all(&CliConfig::default(), &data).unwrap();
        let fields: Vec<(usize, u64, usize)> = reports
            .iter()
            .map(|r| (r.offset, r.value, r.consumed))
            .collect();
        assert_eq!(fields, vec![(0, 1, 1), (1, 253, 3), (4, 65536, 5)]);
    }

    #[test]
    fn test_decode_all_trailing_partial_field() {
        let data = [0x07, 0xff, 0x00, 0x00];
        assert_eq!(
            decode_all(&CliConfig::default(), &data).err(),
            Some(CompactSizeError::Truncated {
                needed: 9,
                available: 3
            })
        );
    }

    #[test]
    fn test_parse_hex_accepts_prefix_and_spaces() {
        assert_eq!(parse_hex("0xfd fd 00").unwrap(), vec![0xfd, 0xfd, 0x00]);
        assert_eq!(parse_hex("FC").unwrap(), vec![0xfc]);
        assert!(parse_hex("xyz").is_err());
    }

    #[test]
    fn test_cli_parses_negative_values() {
        let cli = Cli::try_parse_from(["compactsize", "--format", "json", "encode", "-1", "5"])
            .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Command::Encode { values } => assert_eq!(values, vec!["-1", "5"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_encode_rejects_invalid_values() {
        let config = CliConfig::default();
        for raw in ["-1", "18446744073709551616", "2.5"] {
            let err = encode_values(&config, &[raw.to_string()]).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<CompactSizeError>(),
                Some(CompactSizeError::InvalidValue(_))
            ));
        }
    }

    #[test]
    fn test_demo_round_trips() {
        run_demo(&CliConfig::default()).unwrap();
    }

    #[test]
    fn test_decode_all_follows_hex_case() {
        let mut config = CliConfig::default();
        config.output.uppercase_hex = true;
        let reports = decode_all(&config, &[0xfd, 0xab, 0xcd]).unwrap();
        assert_eq!(reports[0].hex, "FDABCD");
        assert_eq!(reports[0].value, 0xcdab);
    }

    #[test]
    fn test_decode_empty_input_is_truncated() {
        let err = decode_hex(&CliConfig::default(), "0x").unwrap_err();
        assert_eq!(
            err.downcast_ref::<CompactSizeError>(),
            Some(&CompactSizeError::Truncated {
                needed: 1,
                available: 0
            })
        );
    }

    fn write_config_file(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "compactsize-{name}-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_config_precedence() {
        let path = write_config_file(
            "precedence",
            r#"{ "output": { "format": "text", "uppercase_hex": false }, "log_level": "warn" }"#,
        );
        let path_arg = path.to_string_lossy().into_owned();
        let env = |key: &str| match key {
            "COMPACTSIZE_OUTPUT_FORMAT" => Some("json".to_string()),
            "COMPACTSIZE_OUTPUT_UPPERCASE_HEX" => Some("true".to_string()),
            _ => None,
        };

        // env beats the file
        let cli = Cli::try_parse_from(["compactsize", "--config", &path_arg, "demo"]).unwrap();
        let config = load_config_with(&cli, env).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.uppercase_hex);
        assert_eq!(config.log_level, "warn");

        // flags beat env
        let cli = Cli::try_parse_from([
            "compactsize",
            "--config",
            &path_arg,
            "--format",
            "text",
            "demo",
        ])
        .unwrap();
        let config = load_config_with(&cli, env).unwrap();
        assert_eq!(config.output.format, OutputFormat::Text);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_config_file_without_env_or_flags() {
        let path = write_config_file("file-only", r#"{ "output": { "format": "json" } }"#);
        let path_arg = path.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["compactsize", "--config", &path_arg, "demo"]).unwrap();
        let config = load_config_with(&cli, |_| None).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.uppercase_hex);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_report_formats() {
        let report = EncodeReport {
            value: CompactSize::new(253),
            hex: "fdfd00".to_string(),
            len: 3,
        };
        let mut config = CliConfig::default();

        let mut out = Vec::new();
        write_report(&mut out, &config, &report, "253 -> fdfd00 (3 bytes)".to_string()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "253 -> fdfd00 (3 bytes)\n");

        config.output.format = OutputFormat::Json;
        let mut out = Vec::new();
        write_report(&mut out, &config, &report, String::new()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"value\":253,\"hex\":\"fdfd00\",\"len\":3}\n"
        );
    }

    #[test]
    fn test_write_report_closed_pipe_is_an_error() {
        let report = EncodeReport {
            value: CompactSize::new(1),
            hex: "01".to_string(),
            len: 1,
        };
        let err = write_report(&mut ClosedPipe, &CliConfig::default(), &report, "1".to_string())
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<std::io::Error>().map(|e| e.kind()),
            Some(std::io::ErrorKind::BrokenPipe)
        );
    }
}
