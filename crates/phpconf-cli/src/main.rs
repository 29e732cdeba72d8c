//! phpenv-config CLI - manage PHP .ini fragments for the selected phpenv version
//!
//! Provides `phpenv-config add`, `rm`, `enable`, `disable`, `ls` and `version`.

mod commands;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use phpconf_core::{ConfigError, PhpenvEnv};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::fragment::FragmentCommands;

#[derive(Parser, Debug)]
#[command(name = "phpenv-config")]
#[command(about = "phpenv-config - enable and disable PHP .ini config fragments")]
#[command(version)]
struct Cli {
    /// phpenv root (defaults to PHPENV_ROOT, then ~/.phpenv)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// PHP version to manage (defaults to the phpenv-selected version)
    #[arg(long = "php-version", global = true, value_name = "VERSION")]
    php_version: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Fragment(FragmentCommands),
    /// Print the version
    Version,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<OsString> = std::env::args_os().collect();
    std::process::exit(run(&args));
}

/// Parse and dispatch, returning the process exit code
fn run(args: &[OsString]) -> i32 {
    if let Some(pos) = args.iter().position(|a| a == "--complete") {
        let (root, php_version) = global_overrides(&args[..pos]);
        let words: Vec<String> = args[pos + 1..]
            .iter()
            .map(|w| w.to_string_lossy().into_owned())
            .collect();
        commands::complete::execute(&words, root, php_version);
        return 0;
    }

    let rest = args.get(1..).unwrap_or_default();
    if rest
        .iter()
        .any(|a| a == "--help" || a == "-h" || a == "help")
    {
        print_usage();
        return 0;
    }

    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayVersion => {
            if let Err(io_err) = e.print() {
                tracing::warn!(error = %io_err, "failed to print version");
            }
            return 0;
        }
        Err(e) => {
            tracing::debug!(error = %e, "unrecognised arguments");
            print_usage();
            return 0;
        }
    };

    let Some(command) = cli.command else {
        print_usage();
        return 0;
    };

    let action = match command {
        Commands::Version => {
            println!("phpenv-config {}", env!("CARGO_PKG_VERSION"));
            return 0;
        }
        Commands::Fragment(action) => action,
    };

    let result = PhpenvEnv::from_env_with(cli.root, cli.php_version)
        .map_err(anyhow::Error::from)
        .and_then(|env| commands::fragment::execute(action, &env));

    match result {
        Ok(()) => 0,
        Err(err) => report(&err),
    }
}

/// `--root`/`--php-version` given before `--complete`
fn global_overrides(prefix: &[OsString]) -> (Option<PathBuf>, Option<String>) {
    match Cli::try_parse_from(prefix) {
        Ok(cli) => (cli.root, cli.php_version),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring arguments before --complete");
            (None, None)
        }
    }
}

/// Print a failure as one status line and pick the exit code
fn report(err: &anyhow::Error) -> i32 {
    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        println!("{config_err}");
        config_err.exit_code()
    } else {
        println!("Error: {err:#}");
        1
    }
}

fn print_usage() {
    if let Err(e) = Cli::command().print_help() {
        tracing::warn!(error = %e, "failed to print usage");
    }
}
