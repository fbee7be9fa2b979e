//! Main CLI application

use crate::completion::Completer;
use crate::error::GhoError;
use crate::schema::{load_schema, SchemaSource};
use anyhow::Context as _;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive
pub const LOG_ENV_VAR: &str = "GHO_LOG";

/// Name of the hidden subcommand shell integrations call
pub const COMPLETE_COMMAND: &str = "__complete";

/// Verbosity levels for log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet = 0,
    Normal = 1,
    Verbose = 2,
    Trace = 3,
}

impl Verbosity {
    /// Default log filter for this verbosity
    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

/// CLI application
pub struct App {
    /// The clap command
    command: Command,
}

impl App {
    /// Create a new app
    pub fn new() -> Self {
        App {
            command: build_command(),
        }
    }

    /// Run the application with the process arguments
    pub fn run(self) -> anyhow::Result<()> {
        self.run_from(std::env::args_os())
    }

    /// Run the application with explicit arguments
    pub fn run_from<I, T>(mut self, args: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().get_matches_from(args);

        init_logging(get_verbosity(&matches));

        let schema_path = matches.get_one::<PathBuf>("schema").cloned();

        match matches.subcommand() {
            Some((COMPLETE_COMMAND, sub)) => {
                let completer = load_completer(schema_path)?;
                complete(&completer, sub)?;
            }
            Some(("commands", _)) => {
                let completer = load_completer(schema_path)?;
                list_commands(&completer)?;
            }
            Some(("schema", sub)) => match sub.subcommand() {
                Some(("check", _)) => check_schema(schema_path)?,
                _ => {
                    if let Some(schema_cmd) = self.command.find_subcommand_mut("schema") {
                        schema_cmd.print_help()?;
                    }
                }
            },
            _ => {
                self.command.print_help()?;
                println!();
            }
        }

        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the clap command
fn build_command() -> Command {
    Command::new("gho")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Command-line client for a content-management REST API")
        .arg(
            Arg::new("schema")
                .long("schema")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Path to a command schema file")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print debug logs (repeat for trace logs)")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new(COMPLETE_COMMAND)
                .about("Print completion candidates for a partial command line")
                .hide(true)
                .arg(
                    Arg::new("cword")
                        .value_name("CWORD")
                        .help("Index of the word being completed (-1 for the last word)")
                        .value_parser(value_parser!(i64))
                        .allow_negative_numbers(true)
                        .required(true),
                )
                .arg(
                    Arg::new("words")
                        .value_name("WORDS")
                        .help("The command line being completed")
                        .num_args(1..)
                        .last(true),
                ),
        )
        .subcommand(Command::new("commands").about("List every available command"))
        .subcommand(
            Command::new("schema")
                .about("Inspect the command schema")
                .subcommand(Command::new("check").about("Load and validate the command schema")),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("quiet") {
        return Verbosity::Quiet;
    }
    match matches.get_count("verbose") {
        0 => Verbosity::Normal,
        1 => Verbosity::Verbose,
        _ => Verbosity::Trace,
    }
}

/// Install the stderr log subscriber
///
/// `GHO_LOG` takes precedence over the command-line verbosity.
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    // Ignore the error when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .try_init();
}

fn load_completer(schema_path: Option<PathBuf>) -> anyhow::Result<Completer> {
    let (schema, source) = load_schema(schema_path).context("failed to load command schema")?;
    debug!(?source, program = %schema.name, "schema loaded");
    Ok(Completer::new(schema))
}

/// Print one candidate per line
fn complete(completer: &Completer, matches: &ArgMatches) -> Result<(), GhoError> {
    let cword = matches.get_one::<i64>("cword").copied().unwrap_or(-1);
    let words: Vec<&str> = matches
        .get_many::<String>("words")
        .map(|values| values.map(String::as_str).collect())
        .unwrap_or_default();

    let candidates = completer.resolve(cword, &words)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for candidate in candidates {
        writeln!(out, "{}", candidate)?;
    }
    Ok(())
}

/// Print every visible command path
fn list_commands(completer: &Completer) -> Result<(), GhoError> {
    let tree = completer.tree()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for path in tree.command_paths() {
        writeln!(out, "{}", path)?;
    }
    Ok(())
}

/// Load, validate and summarise the schema
fn check_schema(schema_path: Option<PathBuf>) -> anyhow::Result<()> {
    let (schema, source) = load_schema(schema_path).context("failed to load command schema")?;
    let completer = Completer::new(schema);
    let tree = completer.tree().context("invalid command schema")?;

    let location = match source {
        SchemaSource::File(path) => path.display().to_string(),
        SchemaSource::Builtin => "built-in schema".to_string(),
    };
    println!(
        "{} {} ({} commands)",
        "ok".green().bold(),
        location,
        tree.command_paths().len()
    );
    Ok(())
}

/// Run the CLI application with the process arguments
pub fn run() -> anyhow::Result<()> {
    App::new().run()
}
