mod cmd;
mod exit;
mod logging;
mod output;

use bmpstego_frame::FrameConfig;
use clap::Parser;

use crate::cmd::Command;
use crate::exit::{CliError, CliResult, USAGE};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "bmpstego",
    version,
    about = "Hide files inside 24-bit bitmaps",
    after_help = "Short forms:\n  bmpstego -e <source.bmp> <secret_file> <stego.bmp>\n  bmpstego -d <stego.bmp> <output_basename>"
)]
struct Cli {
    /// Report format (stdout).
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        env = "BMPSTEGO_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    /// Frame marker; encoder and decoder must use the same one.
    #[arg(long, value_name = "TEXT", env = "BMPSTEGO_MAGIC", global = true)]
    magic: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn frame_config(&self) -> CliResult<FrameConfig> {
        match &self.magic {
            None => Ok(FrameConfig::default()),
            Some(magic) if magic.is_empty() => {
                Err(CliError::new(USAGE, "--magic must not be empty"))
            }
            Some(magic) => Ok(FrameConfig::with_magic(magic.clone().into_bytes())),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cli
        .frame_config()
        .and_then(|config| cmd::run(cli.command, format, &config));

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_encode_form() {
        let cli = Cli::try_parse_from(["bmpstego", "-e", "cover.bmp", "secret.txt", "stego.bmp"])
            .expect("encode args should parse");

        match cli.command {
            Command::Encode(args) => {
                assert_eq!(args.source.to_str(), Some("cover.bmp"));
                assert_eq!(args.secret.to_str(), Some("secret.txt"));
                assert_eq!(args.stego.to_str(), Some("stego.bmp"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_short_decode_form() {
        let cli = Cli::try_parse_from(["bmpstego", "-d", "stego.bmp", "recovered"])
            .expect("decode args should parse");
        assert!(matches!(cli.command, Command::Decode(_)));
    }

    #[test]
    fn parses_long_subcommands() {
        let cli = Cli::try_parse_from(["bmpstego", "decode", "stego.bmp", "out"])
            .expect("decode subcommand should parse");
        assert!(matches!(cli.command, Command::Decode(_)));

        let cli = Cli::try_parse_from(["bmpstego", "capacity", "cover.bmp", "--secret", "a.zip"])
            .expect("capacity subcommand should parse");
        assert!(matches!(cli.command, Command::Capacity(_)));
    }

    #[test]
    fn rejects_missing_encode_operand() {
        let err = Cli::try_parse_from(["bmpstego", "-e", "cover.bmp", "secret.txt"])
            .expect_err("missing stego path should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn custom_magic_builds_config() {
        let cli = Cli::try_parse_from(["bmpstego", "--magic", "ZQ", "inspect", "x.bmp"])
            .expect("inspect args should parse");
        let config = cli.frame_config().expect("magic should be accepted");
        assert_eq!(config.magic.as_ref(), b"ZQ");
    }

    #[test]
    fn empty_magic_is_a_usage_error() {
        let cli = Cli::try_parse_from(["bmpstego", "--magic", "", "inspect", "x.bmp"])
            .expect("empty value still parses");
        let err = cli.frame_config().unwrap_err();
        assert_eq!(err.code, USAGE);
    }
}
