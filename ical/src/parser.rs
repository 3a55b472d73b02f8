// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use crate::syntax::Component;
use crate::syntax::lexer::tokenize;
use crate::syntax::scanner::{ContentLineError, scan_content_lines};
use crate::syntax::tree_builder::{TreeBuildError, build_tree};

/// Parse iCalendar source text into its root components.
///
/// Parsing is strict: any malformed content line or broken component nesting
/// fails the whole document, and so does input without any component.
///
/// ## Errors
///
/// If there are scanning or nesting errors, all of them are returned.
///
/// ## Examples
///
/// ```
/// # use hostsync_ical::parse;
/// let src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// SUMMARY:Test Event\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let roots = parse(src).unwrap();
/// assert_eq!(roots.len(), 1);
/// assert_eq!(roots[0].find_all("VEVENT").len(), 1);
/// ```
pub fn parse(src: &str) -> Result<Vec<Component<'_>>, Vec<ParseError>> {
    let scanned = scan_content_lines(src, tokenize(src));
    let mut errors: Vec<ParseError> = scanned.errors.into_iter().map(ParseError::from).collect();

    let tree = build_tree(scanned.lines);
    errors.extend(tree.errors.into_iter().map(ParseError::from));

    if !errors.is_empty() {
        return Err(errors);
    }
    if tree.roots.is_empty() {
        return Err(vec![ParseError::NoComponents]);
    }
    Ok(tree.roots)
}

/// Errors that can occur during parsing
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    /// A content line could not be scanned
    #[error(transparent)]
    ContentLine(#[from] ContentLineError),

    /// Content lines do not nest into components
    #[error(transparent)]
    Tree(#[from] TreeBuildError),

    /// The input contains no component at all
    #[error("no iCalendar component found")]
    NoComponents,
}
