// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Color;
use hostsync_core::{Booking, BookingStatus, Store};

use crate::arg::{CommonArgs, OutputFormat};
use crate::cli::Context;
use crate::table::{Column, Table};

#[derive(Debug, Clone)]
pub struct CmdBookingList {
    pub property_id: String,
    pub output_format: OutputFormat,
}

impl CmdBookingList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the bookings of a property")
            .arg(arg!(<PROPERTY> "Id of the property"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            property_id: matches
                .get_one::<String>("PROPERTY")
                .cloned()
                .unwrap_or_default(),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing bookings...");
        let bookings = ctx.db.list_bookings(&self.property_id).await?;
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bookings)?),
            OutputFormat::Table if bookings.is_empty() => println!("No bookings"),
            OutputFormat::Table => {
                let columns = vec![
                    BookingColumn::ExternalId,
                    BookingColumn::Stay,
                    BookingColumn::Guest,
                    BookingColumn::Status,
                    BookingColumn::Source,
                ];
                print!("{}", Table::new(columns, &bookings));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum BookingColumn {
    ExternalId,
    Stay,
    Guest,
    Status,
    Source,
}

impl Column<Booking> for BookingColumn {
    fn header(&self) -> &'static str {
        match self {
            Self::ExternalId => "UID",
            Self::Stay => "STAY",
            Self::Guest => "GUEST",
            Self::Status => "STATUS",
            Self::Source => "SOURCE",
        }
    }

    fn format(&self, data: &Booking) -> String {
        match self {
            Self::ExternalId => data.external_id.clone(),
            Self::Stay => format!("{} ~ {}", data.start_date, data.end_date),
            Self::Guest => data.guest_label.clone(),
            Self::Status => data.status.to_string(),
            Self::Source => data.source_platform.clone(),
        }
    }

    fn color(&self, data: &Booking) -> Option<Color> {
        match self {
            Self::Status => Some(match data.status {
                BookingStatus::Confirmed => Color::Green,
                BookingStatus::Pending => Color::Yellow,
                BookingStatus::Cancelled => Color::Red,
            }),
            _ => None,
        }
    }
}
