use std::io::{self, Read as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod logging;

use commands::{DecodeOptions, EncodeOptions};
use config::{HCodecConfig, HConfig};

/// Converts between PostgreSQL hstore text and JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// An additional configuration file.
    ///
    /// It is loaded after `hstore.toml` in the working directory, if that
    /// exists, and before `HSTORE__*` environment variables.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log more. May be repeated.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encodes a JSON object or array of `[key, value]` pairs as hstore.
    Encode {
        /// The input file. Reads stdin if missing or `-`.
        input: Option<PathBuf>,

        /// Format number and bool keys and values as text instead of failing.
        #[arg(long)]
        coerce: bool,

        /// Write UTF-8 text, ignoring the configured encoding.
        #[arg(long)]
        text: bool,

        /// The WHATWG label of the output encoding.
        #[arg(short, long)]
        encoding: Option<String>,
    },
    /// Decodes hstore into a JSON object.
    Decode {
        /// The input file. Reads stdin if missing or `-`.
        input: Option<PathBuf>,

        /// Output an array of `[key, value]` pairs, keeping duplicate keys.
        #[arg(long)]
        pairs: bool,

        /// Indent the JSON output.
        #[arg(long)]
        pretty: bool,

        /// The WHATWG label of the input encoding.
        #[arg(short, long)]
        encoding: Option<String>,
    },
    /// Escapes backslashes and double quotes.
    Escape {
        /// The text to escape. Reads stdin if missing.
        text: Option<String>,
    },
    /// Removes backslash escapes.
    Unescape {
        /// The text to unescape. Reads stdin if missing.
        text: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(cli.config.as_deref())?;
    init_logging(config.log, cli.verbose)?;

    log::debug!(target: "hstore_cli::version", "hstore_cli v{}", env!("CARGO_PKG_VERSION"));

    let res = run(cli.command, &config.codec);
    if let Err(why) = &res {
        log::debug!("Exiting due to error: {why:?}");
    }

    log::logger().flush();
    res
}

fn run(command: Command, codec: &HCodecConfig) -> anyhow::Result<()> {
    let stdout = io::stdout().lock();

    match command {
        Command::Encode {
            input,
            coerce,
            text,
            encoding,
        } => {
            let options = EncodeOptions {
                encoding: codec.encoding(encoding.as_deref())?,
                coerce,
                text,
            };
            commands::encode(&read_input(input.as_deref())?, options, stdout)
        },
        Command::Decode {
            input,
            pairs,
            pretty,
            encoding,
        } => {
            let options = DecodeOptions {
                encoding: codec.encoding(encoding.as_deref())?,
                pairs,
                pretty: pretty || codec.pretty,
            };
            commands::decode(&read_input(input.as_deref())?, options, stdout)
        },
        Command::Escape { text } => {
            let text = read_text(text)?;
            Ok(commands::escape(&text, stdout)?)
        },
        Command::Unescape { text } => {
            let text = read_text(text)?;
            Ok(commands::unescape(&text, stdout)?)
        },
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read(path).with_context(|| format!("cannot read input {path:?}"))
        },
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("cannot read stdin")?;
            Ok(buf)
        },
    }
}

fn read_text(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let bytes = read_input(None)?;
            String::from_utf8(bytes).context("stdin must be utf-8 text")
        },
    }
}

fn build_config(extra: Option<&Path>) -> anyhow::Result<HConfig> {
    use crate::config::setup::{Builder, Env, File, TomlText};

    let default_config = include_str!("../assets/default_config.toml");

    Builder::new()
        .add_layer(TomlText::new(default_config))
        .add_layer(File::new("hstore.toml").required(false))
        .add_optional_layer(extra.map(File::new))
        .add_layer(Env::prefixed("HSTORE__"))
        .build()
}

fn init_logging(config: log4rs::config::RawConfig, verbose: u8) -> anyhow::Result<()> {
    use log::LevelFilter;
    use log4rs::config::Root;

    let (appenders, errors) = config.appenders_lossy(&logging::deserializers());
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let root = config.root();
    let level = match verbose {
        0 => root.level(),
        1 => root.level().max(LevelFilter::Debug),
        _ => LevelFilter::Trace,
    };

    let root = Root::builder()
        .appenders(root.appenders().iter().cloned())
        .build(level);

    let config = log4rs::Config::builder()
        .appenders(appenders)
        .loggers(config.loggers())
        .build(root)?;

    log4rs::init_config(config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["hstore_cli", "-vv", "decode", "--pairs", "in.txt"])
            .expect("valid arguments");
        assert_eq!(cli.verbose, 2, "counted flags");
        assert!(
            matches!(
                &cli.command,
                Command::Decode { pairs: true, pretty: false, input: Some(path), .. }
                    if path == Path::new("in.txt")
            ),
            "decode with pairs, got {:?}",
            cli.command
        );
    }
}
