// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Tolerant parser for the iCalendar content-line grammar (RFC 5545).
//!
//! Only the syntax layer is provided: content lines are scanned and nested into
//! a component tree. Property values are handed out as text; interpreting them
//! (dates, recurrence rules, ...) is left to the caller.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else, clippy::match_bool)]

pub mod keyword;
mod parser;
pub mod syntax;
pub mod text;

pub use crate::parser::{ParseError, parse};
pub use crate::syntax::{Component, Parameter, ParameterValue, Property, Span};
pub use crate::text::unescape_text;
