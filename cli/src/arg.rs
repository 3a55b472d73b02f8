// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

pub struct CommonArgs;

impl CommonArgs {
    pub fn output_format() -> Arg {
        arg!(--json "Print JSON instead of a table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        if matches.get_flag("json") {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }

    pub fn owner(help: &'static str) -> Arg {
        Arg::new("owner")
            .long("owner")
            .value_name("OWNER")
            .help(help)
    }

    pub fn get_owner(matches: &ArgMatches) -> Option<String> {
        matches.get_one::<String>("owner").cloned()
    }
}
