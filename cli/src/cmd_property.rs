// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, Command, arg};
use colored::Color;
use hostsync_core::{NewProperty, Property, PropertyFilter, Store};

use crate::arg::{CommonArgs, OutputFormat};
use crate::cli::Context;
use crate::table::{Column, Table};

#[derive(Debug, Clone)]
pub struct CmdPropertyAdd {
    pub owner: String,
    pub title: String,
    pub feed_url: Option<String>,
    pub output_format: OutputFormat,
}

impl CmdPropertyAdd {
    pub const NAME: &str = "add";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("new")
            .about("Register a property")
            .arg(arg!(--owner <OWNER> "Id of the owning user").required(true))
            .arg(arg!(--title <TITLE> "Title of the property").required(true))
            .arg(
                Arg::new("feed-url")
                    .long("feed-url")
                    .value_name("URL")
                    .help("iCalendar feed exported by the booking platform"),
            )
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let owner = match matches.get_one::<String>("owner") {
            Some(owner) if !owner.trim().is_empty() => owner.clone(),
            _ => return Err("Owner is required for new property".into()),
        };
        let title = match matches.get_one::<String>("title") {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => return Err("Title must not be empty".into()),
        };

        Ok(Self {
            owner,
            title,
            feed_url: matches.get_one::<String>("feed-url").cloned(),
            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "registering property...");
        let property = ctx
            .db
            .insert_property(NewProperty {
                owner_id: self.owner,
                title: self.title,
                feed_url: self.feed_url,
            })
            .await?;
        print_properties(&[property], self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdPropertyList {
    pub owner: Option<String>,
    pub syncable: bool,
    pub output_format: OutputFormat,
}

impl CmdPropertyList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List registered properties")
            .arg(CommonArgs::owner("Only properties of this owner"))
            .arg(arg!(--syncable "Only properties with a calendar feed"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            owner: CommonArgs::get_owner(matches),
            syncable: matches.get_flag("syncable"),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing properties...");
        let filter = PropertyFilter {
            owner_id: self.owner,
            with_feed: self.syncable,
        };
        let properties = ctx.db.list_properties(&filter).await?;
        print_properties(&properties, self.output_format)
    }
}

fn print_properties(properties: &[Property], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(properties)?),
        OutputFormat::Table => {
            let columns = vec![
                PropertyColumn::Id,
                PropertyColumn::Owner,
                PropertyColumn::Title,
                PropertyColumn::Feed,
            ];
            print!("{}", Table::new(columns, properties));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum PropertyColumn {
    Id,
    Owner,
    Title,
    Feed,
}

impl Column<Property> for PropertyColumn {
    fn header(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Owner => "OWNER",
            Self::Title => "TITLE",
            Self::Feed => "FEED",
        }
    }

    fn format(&self, data: &Property) -> String {
        match self {
            Self::Id => data.id.clone(),
            Self::Owner => data.owner_id.clone(),
            Self::Title => data.title.clone(),
            Self::Feed => data.feed_url().unwrap_or("-").to_string(),
        }
    }

    fn color(&self, data: &Property) -> Option<Color> {
        match self {
            Self::Feed if data.feed_url().is_none() => Some(Color::BrightBlack),
            _ => None,
        }
    }
}
