// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end sync tests for the hostsync-core crate.

mod dedup;
mod owner;
mod resilience;
mod timeout;
