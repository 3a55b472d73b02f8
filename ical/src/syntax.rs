// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Syntax layer of the iCalendar grammar, no types.
//!
//! ```text
//! Source Text → Lexer → Token Stream → Scanner → Content Lines → Tree Builder → Components
//! ```

// items emitted by the `Logos` derive
#[allow(missing_copy_implementations)]
pub mod lexer;
pub mod scanner;
pub mod tree_builder;

use std::borrow::Cow;
use std::fmt::{self, Display};
use std::ops::Range;

/// A span representing a byte range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start position of the span
    pub start: usize,
    /// End position of the span
    pub end: usize,
}

impl Span {
    /// Create a new span from start and end positions
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Convert to a standard range
    #[must_use]
    pub const fn into_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A parsed iCalendar component (e.g., VCALENDAR, VEVENT, VALARM)
#[derive(Debug, Clone)]
pub struct Component<'src> {
    /// Component name, original casing preserved
    pub name: Cow<'src, str>,
    /// Properties in original order
    pub properties: Vec<Property<'src>>,
    /// Nested child components
    pub children: Vec<Component<'src>>,
    /// Span of the entire component (from BEGIN to END)
    pub span: Span,
}

impl<'src> Component<'src> {
    /// Whether the component has the given name (case-insensitive).
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// First property with the given name (case-insensitive).
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property<'src>> {
        self.properties.iter().find(|p| p.is(name))
    }

    /// All components with the given name in this subtree, depth-first in
    /// source order. The component itself is included when it matches.
    #[must_use]
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a Component<'src>> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Component<'src>>) {
        if self.is(name) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_named(name, found);
        }
    }
}

/// A parsed iCalendar property (name, optional parameters, and value)
#[derive(Debug, Clone)]
pub struct Property<'src> {
    /// Property name, original casing preserved
    pub name: Cow<'src, str>,
    /// Property parameters (allow duplicates & multi-values)
    pub parameters: Vec<Parameter<'src>>,
    /// Raw property value, folding removed but escapes untouched
    pub value: Cow<'src, str>,
}

impl<'src> Property<'src> {
    /// Whether the property has the given name (case-insensitive).
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// First parameter with the given name (case-insensitive).
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter<'src>> {
        self.parameters
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// A parsed iCalendar parameter (e.g., `TZID=Europe/Madrid`)
#[derive(Debug, Clone)]
pub struct Parameter<'src> {
    /// Parameter name (e.g., "TZID", "VALUE", "CN")
    pub name: Cow<'src, str>,
    /// Parameter values split by commas
    pub values: Vec<ParameterValue<'src>>,
    /// Span of the entire parameter (from name to last value)
    pub span: Span,
}

/// A single parameter value with optional quoting
#[derive(Debug, Clone)]
pub struct ParameterValue<'src> {
    /// The parameter value, without the surrounding quotes
    pub value: Cow<'src, str>,
    /// Whether the value was quoted in the source
    pub quoted: bool,
}
