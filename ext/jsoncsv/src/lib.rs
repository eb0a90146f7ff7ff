//! Command line front end for `jsoncsv-core`
//!
//! ```text
//! jsoncsv [--delimiter C] [--placeholder N] [--debug] [--config FILE] <command>
//!
//!   append  <path> name=value...
//!   read    <path> [--first N] [--last N] [--pretty]
//!   columns <path>
//! ```
//!
//! With `--config` the path may be omitted; a positional path always wins.
//! A path that starts with `--` or contains `=` must follow a `--` separator,
//! as in `jsoncsv append -- a=b.csv x=1`.

use indexmap::IndexMap;
use jsoncsv_core::{
    CellValue, DataRow, RowRange, SchemaInspector, Store, StoreConfig, StoreError,
};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "usage: jsoncsv [--delimiter C] [--placeholder N] [--debug] [--config FILE] \
<append [--] <path> name=value... | read [--] <path> [--first N] [--last N] [--pretty] | columns [--] <path>>";

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn usage<S: Into<String>>(msg: S) -> Self {
        CliError::Usage(msg.into())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// Settings shared by every command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub delimiter: Option<char>,
    pub placeholder: Option<CellValue>,
    pub debug: bool,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Append {
        path: Option<PathBuf>,
        row: DataRow,
    },
    Read {
        path: Option<PathBuf>,
        first: usize,
        last: usize,
        pretty: bool,
    },
    Columns {
        path: Option<PathBuf>,
    },
}

impl Command {
    fn path(&self) -> Option<&PathBuf> {
        match self {
            Command::Append { path, .. }
            | Command::Read { path, .. }
            | Command::Columns { path } => path.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub options: GlobalOptions,
    pub command: Command,
}

/// Parse the arguments that follow the program name
pub fn parse_args<I, S>(args: I) -> Result<Cli, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::<String>::into).peekable();
    let mut options = GlobalOptions::default();

    let command_name = loop {
        let arg = args
            .next()
            .ok_or_else(|| CliError::usage("missing command"))?;
        match arg.as_str() {
            "--delimiter" => {
                options.delimiter = Some(parse_delimiter(&value_of(&mut args, &arg)?)?);
            }
            "--placeholder" => {
                options.placeholder = Some(parse_number(&value_of(&mut args, &arg)?, &arg)?);
            }
            "--debug" => options.debug = true,
            "--config" => {
                options.config = Some(PathBuf::from(value_of(&mut args, &arg)?));
            }
            flag if flag.starts_with("--") => {
                return Err(CliError::usage(format!("unknown option {}", flag)))
            }
            _ => break arg,
        }
    };

    // the path is optional when a config file names it
    let separated = args.next_if_eq("--").is_some();
    let takes_path = separated
        || matches!(
            args.peek(),
            Some(next) if !next.starts_with("--") && !next.contains('=')
        );
    let path = if takes_path {
        args.next().map(PathBuf::from)
    } else {
        None
    };
    if separated && path.is_none() {
        return Err(CliError::usage("-- needs a path"));
    }

    let command = match command_name.as_str() {
        "append" => {
            let mut row = IndexMap::new();
            for cell in args {
                let (name, value) = cell.split_once('=').ok_or_else(|| {
                    CliError::usage(format!("expected name=value, got {:?}", cell))
                })?;
                row.insert(name.to_string(), parse_number(value, name)?);
            }
            Command::Append { path, row }
        }
        "read" => {
            let (mut first, mut last, mut pretty) = (0, 0, false);
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--first" => first = parse_number(&value_of(&mut args, &arg)?, &arg)?,
                    "--last" => last = parse_number(&value_of(&mut args, &arg)?, &arg)?,
                    "--pretty" => pretty = true,
                    other => {
                        return Err(CliError::usage(format!("unexpected argument {}", other)))
                    }
                }
            }
            Command::Read {
                path,
                first,
                last,
                pretty,
            }
        }
        "columns" => {
            if let Some(extra) = args.next() {
                return Err(CliError::usage(format!("unexpected argument {}", extra)));
            }
            Command::Columns { path }
        }
        other => return Err(CliError::usage(format!("unknown command {}", other))),
    };

    Ok(Cli { options, command })
}

fn value_of<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, CliError> {
    args.next()
        .ok_or_else(|| CliError::usage(format!("{} needs a value", flag)))
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T, CliError> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::usage(format!("{}: {:?} is not a valid number", what, value)))
}

fn parse_delimiter(value: &str) -> Result<char, CliError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CliError::usage(format!(
            "--delimiter takes a single character, got {:?}",
            value
        ))),
    }
}

/// Resolve the store settings: config file first, then flags, then the positional path
pub fn build_store(cli: &Cli) -> Result<Store, CliError> {
    let mut config = match &cli.options.config {
        Some(file) => StoreConfig::from_json(&std::fs::read_to_string(file)?)?,
        None => match cli.command.path() {
            Some(path) => StoreConfig::new(path),
            None => return Err(CliError::usage("missing database path")),
        },
    };

    if let Some(path) = cli.command.path() {
        config.path = path.clone();
    }
    if let Some(delimiter) = cli.options.delimiter {
        config.delimiter = delimiter;
    }
    if let Some(placeholder) = cli.options.placeholder {
        config.placeholder = placeholder;
    }
    config.debug_mode |= cli.options.debug;

    log::debug!("store config: {:?}", config);
    Ok(Store::from_config(config)?)
}

/// Execute `cli`, writing command output to `out`
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), CliError> {
    let store = build_store(cli)?;

    match &cli.command {
        Command::Append { row, .. } => {
            store.append_row(row)?;
        }
        Command::Read {
            first,
            last,
            pretty,
            ..
        } => {
            let table = store.load_rows(RowRange::new(*first, *last))?;
            let json = if *pretty {
                table.to_json_pretty()?
            } else {
                table.to_json()?
            };
            writeln!(out, "{}", json)?;
        }
        Command::Columns { .. } => {
            let schema = store.schema()?;
            writeln!(out, "{}", serde_json::to_string(&schema.column_names())?)?;
        }
    }
    Ok(())
}
