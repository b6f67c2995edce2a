use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use clap::{Parser as ClapParser, ValueEnum};
use confique::Config as _;
use jsonscan_core::{ErrorKind, ParseError, ParseOptions, Strictness};
use tracing::*;

use crate::config::Config;

mod config;
mod logging;

const DEFAULT_CONFIG_PATH: &str = "jsonscan.toml";

#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to a JSON document.
    input: PathBuf,

    /// Require the root to be an array or an object.
    #[arg(long)]
    strict: bool,

    /// Keep escape sequences in string literals as written instead of decoding them.
    #[arg(long)]
    raw_strings: bool,

    /// Deepest container nesting accepted; `0` removes the limit.
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Path to a TOML config file. Defaults to `jsonscan.toml` in the working directory, if
    /// present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// What to print once the document parses.
    #[arg(long, value_enum, default_value_t = Emit::Json)]
    emit: Emit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// The parsed tree as compact JSON.
    Json,
    /// The parsed tree in Rust debug notation, showing integer/double distinctions.
    Debug,
    /// Nothing; only the exit status reports success.
    None,
}

fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let cli = Args::parse();

    debug!(input = ?cli.input, config = ?cli.config);

    let config = load_config(cli.config.as_deref())?;
    let options = apply_overrides(config.parse_options(), &cli);
    debug!(?options);

    let json_string = match std::fs::read_to_string(&cli.input) {
        Ok(file) => file,
        Err(e) => {
            error!(path = ?cli.input, "failed to read input");
            return Err(e)
                .with_context(|| format!("failed to read file `{}`", cli.input.display()));
        }
    };

    let path = cli.input.display().to_string();

    let root = match jsonscan_core::parse_str(&json_string, options) {
        Ok(root) => root,
        Err(e) => {
            parse_error_report(&path, &json_string, &e, &options)
                .print((&path, Source::from(&json_string)))?;
            bail!("failed to parse `{path}`: {e}");
        }
    };

    debug!(kind = root.val.kind_desc(), span = ?root.span.into_range());

    match cli.emit {
        Emit::Json => println!(
            "{}",
            serde_json::to_string(&root.val).context("failed to serialize the parsed document")?
        ),
        Emit::Debug => println!("{:#?}", root.val),
        Emit::None => {}
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let mut builder = Config::builder().env();
    match explicit {
        Some(path) => {
            if !path.is_file() {
                bail!("config file `{}` does not exist", path.display());
            }
            builder = builder.file(path);
        }
        None => builder = builder.file(DEFAULT_CONFIG_PATH),
    }
    builder.load().context("failed to load configuration")
}

fn apply_overrides(mut options: ParseOptions, cli: &Args) -> ParseOptions {
    if cli.strict {
        options = options.with_strictness(Strictness::Strict);
    }
    if cli.raw_strings {
        options = options.with_decode_escapes(false);
    }
    if let Some(max_depth) = cli.max_depth {
        options = options.with_max_depth((max_depth != 0).then_some(max_depth));
    }
    options
}

fn parse_error_report<'a>(
    path: &'a String,
    src: &str,
    error: &ParseError,
    options: &ParseOptions,
) -> Report<'a, (&'a String, std::ops::Range<usize>)> {
    let offset = error.offset.offset();
    let scalar_count = src.chars().count();
    let span = offset..(offset + 1).min(scalar_count).max(offset);

    let (label, help) = match error.kind {
        ErrorKind::InvalidCharacter => ("this character is not valid here".to_string(), None),
        ErrorKind::PartialInputProvided => (
            "this is never completed".to_string(),
            Some("check for a missing closing bracket or quote, or a key without a value"),
        ),
        ErrorKind::RootLevelMustBeAContainer => (
            format!(
                "expected {} or {} here",
                "[".fg(Color::Blue),
                "{".fg(Color::Blue)
            ),
            Some("drop `--strict` (or set `strict = false`) to accept a bare literal"),
        ),
        ErrorKind::InvalidNumberPrimitive => (
            "this number does not fit a 64-bit integer or a finite double".to_string(),
            None,
        ),
        ErrorKind::NestingTooDeep => (
            match options.max_depth {
                Some(max) => format!("nested deeper than {max} levels"),
                None => "nested too deep".to_string(),
            },
            Some("raise `--max-depth` (or `max_depth`) if the document is trusted"),
        ),
    };

    let mut report = Report::build(ReportKind::Error, path, offset)
        .with_message(error.kind.description())
        .with_label(
            Label::new((path, span))
                .with_message(label)
                .with_color(Color::Red),
        );
    if let Some(help) = help {
        report.set_help(help);
    }
    report.finish()
}
