// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Feed and configuration factories (fixtures)
//! - A store wrapper that injects failures

mod faulty_store;
mod fixtures;

#[allow(unused_imports)]
pub use faulty_store::FaultyStore;
#[allow(unused_imports)]
pub use fixtures::{
    ics_calendar, ics_event, memory_store, mount_feed, seed_property, test_config, test_syncer,
};
