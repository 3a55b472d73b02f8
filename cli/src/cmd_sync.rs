// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use clap::{Arg, ArgMatches, Command, value_parser};
use colored::{Color, Colorize};
use hostsync_core::{PropertyStatus, PropertySyncResult, Store, SyncScope, SyncSummary, Syncer};

use crate::arg::{CommonArgs, OutputFormat};
use crate::cli::Context;
use crate::table::{Column, Table};

#[derive(Debug, Clone)]
pub struct CmdSync {
    pub owner: Option<String>,
    pub timeout: Option<u64>,
    pub output_format: OutputFormat,
}

impl CmdSync {
    pub const NAME: &str = "sync";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Import bookings from the calendar feeds of every property")
            .arg(CommonArgs::owner(
                "Only sync the properties of this owner, scheduling checkout cleanings",
            ))
            .arg(
                Arg::new("timeout")
                    .long("timeout")
                    .value_name("SECONDS")
                    .help("Deadline for the whole run, overriding the configuration")
                    .value_parser(value_parser!(u64).range(1..)),
            )
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            owner: CommonArgs::get_owner(matches),
            timeout: matches.get_one("timeout").copied(),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn scope(&self) -> SyncScope {
        match &self.owner {
            Some(owner) => SyncScope::Owner(owner.clone()),
            None => SyncScope::All,
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "syncing calendar feeds...");
        let store: Arc<dyn Store> = ctx.db.clone();
        let mut syncer = Syncer::new(store, &ctx.config)?;
        if let Some(secs) = self.timeout {
            syncer = syncer.with_timeout(Duration::from_secs(secs));
        }

        let summary = syncer.sync(&self.scope()).await?;
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            OutputFormat::Table => print_summary(&summary),
        }
        Ok(())
    }
}

fn print_summary(summary: &SyncSummary) {
    if !summary.results.is_empty() {
        let columns = vec![
            ResultColumn::Status,
            ResultColumn::Title,
            ResultColumn::Created,
            ResultColumn::Existing,
            ResultColumn::Error,
        ];
        println!("{}", Table::new(columns, &summary.results));
    }

    let message = if summary.timed_out {
        summary.message.yellow()
    } else {
        summary.message.normal()
    };
    println!("{message}");
}

#[derive(Debug, Clone, Copy)]
enum ResultColumn {
    Status,
    Title,
    Created,
    Existing,
    Error,
}

impl Column<PropertySyncResult> for ResultColumn {
    fn header(&self) -> &'static str {
        match self {
            Self::Status => "STATUS",
            Self::Title => "PROPERTY",
            Self::Created => "NEW",
            Self::Existing => "KNOWN",
            Self::Error => "ERROR",
        }
    }

    fn format(&self, data: &PropertySyncResult) -> String {
        match self {
            Self::Status => match data.status {
                PropertyStatus::Synced => "synced".to_string(),
                PropertyStatus::Failed => "failed".to_string(),
                PropertyStatus::TimedOut => "timed out".to_string(),
            },
            Self::Title => data.title.clone(),
            Self::Created => data.created.to_string(),
            Self::Existing => data.existing.to_string(),
            Self::Error => data.error.clone().unwrap_or_default(),
        }
    }

    fn color(&self, data: &PropertySyncResult) -> Option<Color> {
        match self {
            Self::Status => Some(match data.status {
                PropertyStatus::Synced => Color::Green,
                PropertyStatus::Failed => Color::Red,
                PropertyStatus::TimedOut => Color::Yellow,
            }),
            Self::Error => Some(Color::Red),
            _ => None,
        }
    }
}
