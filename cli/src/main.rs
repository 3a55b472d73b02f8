// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    hostsync_cli::run().await
}
