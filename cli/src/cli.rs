// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf, process::ExitCode, sync::Arc};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use hostsync_core::{APP_NAME, Config as CoreConfig, LocalDb};
use tracing_subscriber::EnvFilter;

use crate::cmd_booking::CmdBookingList;
use crate::cmd_property::{CmdPropertyAdd, CmdPropertyList};
use crate::cmd_sync::CmdSync;
use crate::config::parse_config;

/// Run the hostsync command-line interface.
pub async fn run() -> ExitCode {
    init_tracing();
    let result = match Cli::parse() {
        Ok(cli) => cli.run().await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Keep rental bookings in step with external booking calendars.")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $HOSTSYNC_CONFIG, then \
$XDG_CONFIG_HOME/hostsync/config.toml on Linux and MacOS, %APPDATA%/hostsync/config.toml \
on Windows. Built-in defaults apply when no file exists.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdSync::command())
            .subcommand(
                Command::new("property")
                    .alias("p")
                    .about("Manage properties and their calendar feeds")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdPropertyAdd::command())
                    .subcommand(CmdPropertyList::command()),
            )
            .subcommand(
                Command::new("booking")
                    .alias("b")
                    .about("Inspect imported bookings")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdBookingList::command()),
            )
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(&matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::{BookingList, PropertyAdd, PropertyList, Sync};
        let command = match matches.subcommand() {
            Some((CmdSync::NAME, matches)) => Sync(CmdSync::from(matches)),
            Some(("property", matches)) => match matches.subcommand() {
                Some((CmdPropertyAdd::NAME, matches)) => {
                    PropertyAdd(CmdPropertyAdd::from(matches)?)
                }
                Some((CmdPropertyList::NAME, matches)) => {
                    PropertyList(CmdPropertyList::from(matches))
                }
                _ => return Err("Unknown property command".into()),
            },
            Some(("booking", matches)) => match matches.subcommand() {
                Some((CmdBookingList::NAME, matches)) => BookingList(CmdBookingList::from(matches)),
                _ => return Err("Unknown booking command".into()),
            },
            _ => return Err("No command given".into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Import bookings from calendar feeds
    Sync(CmdSync),

    /// Register a property
    PropertyAdd(CmdPropertyAdd),

    /// List properties
    PropertyList(CmdPropertyList),

    /// List the bookings of a property
    BookingList(CmdBookingList),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::{BookingList, PropertyAdd, PropertyList, Sync};
        match self {
            Sync(a)         => Self::run_with(config, |x| a.run(x).boxed()).await,
            PropertyAdd(a)  => Self::run_with(config, |x| a.run(x).boxed()).await,
            PropertyList(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            BookingList(a)  => Self::run_with(config, |x| a.run(x).boxed()).await,
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Context) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let db = LocalDb::open(config.database_path().as_deref()).await?;
        let ctx = Context {
            config,
            db: Arc::new(db),
        };

        let result = f(&ctx).await;

        match Arc::try_unwrap(ctx.db) {
            Ok(db) => db.close().await,
            // sync tasks past the deadline still hold the store
            Err(_) => tracing::debug!("database still in use, leaving it to the runtime"),
        }
        result
    }
}

/// What a command runs against.
#[derive(Debug)]
pub struct Context {
    /// The normalized configuration.
    pub config: CoreConfig,

    /// The local database.
    pub db: Arc<LocalDb>,
}
