// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Tree builder for constructing the component hierarchy from content lines.
//!
//! The tree builder uses a stack:
//! 1. On BEGIN:X, push a new component onto the stack
//! 2. On property, add to the current component (top of stack)
//! 3. On END:X, pop from stack and add to the parent component

use crate::keyword::{KW_BEGIN, KW_END};
use crate::syntax::scanner::ContentLine;
use crate::syntax::{Component, Property, Span};

/// Build a component tree from scanned content lines.
#[must_use]
pub fn build_tree<'src>(lines: Vec<ContentLine<'src>>) -> TreeBuilderResult<'src> {
    let mut stack: Vec<Component<'src>> = Vec::new();
    let mut roots = Vec::new();
    let mut errors = Vec::new();

    for line in lines {
        if line.name.eq_ignore_ascii_case(KW_BEGIN) {
            if !line.parameters.is_empty() {
                errors.push(TreeBuildError::BeginEndWithParameters {
                    name: line.value.to_string(),
                    span: line.span,
                });
            }

            stack.push(Component {
                name: line.value,
                properties: Vec::new(),
                children: Vec::new(),
                span: line.span,
            });
        } else if line.name.eq_ignore_ascii_case(KW_END) {
            if !line.parameters.is_empty() {
                errors.push(TreeBuildError::BeginEndWithParameters {
                    name: line.value.to_string(),
                    span: line.span,
                });
            }

            let Some(mut component) = stack.pop() else {
                errors.push(TreeBuildError::UnmatchedEnd {
                    name: line.value.to_string(),
                    span: line.span,
                });
                continue;
            };

            if !component.name.eq_ignore_ascii_case(&line.value) {
                errors.push(TreeBuildError::MismatchedNesting {
                    expected: component.name.to_string(),
                    found: line.value.to_string(),
                    span: line.span,
                });
            }

            component.span = Span::new(component.span.start, line.span.end);
            match stack.last_mut() {
                Some(parent) => parent.children.push(component),
                None => roots.push(component),
            }
        } else if let Some(current) = stack.last_mut() {
            current.properties.push(Property {
                name: line.name,
                parameters: line.parameters,
                value: line.value,
            });
        } else {
            errors.push(TreeBuildError::OrphanProperty {
                name: line.name.to_string(),
                span: line.span,
            });
        }
    }

    // Any remaining components on stack are unmatched BEGINs
    for component in stack {
        errors.push(TreeBuildError::UnmatchedBegin {
            name: component.name.to_string(),
            span: component.span,
        });
    }

    TreeBuilderResult { roots, errors }
}

/// Errors that can occur during tree building.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TreeBuildError {
    /// END without a corresponding BEGIN
    #[error("unmatched END:{name} at {span} (no corresponding BEGIN)")]
    UnmatchedEnd {
        /// Component name that was being closed
        name: String,
        /// Span of the END line
        span: Span,
    },

    /// BEGIN that was never closed
    #[error("unmatched BEGIN:{name} at {span} (component not closed)")]
    UnmatchedBegin {
        /// Component name that was not closed
        name: String,
        /// Span of the BEGIN line
        span: Span,
    },

    /// BEGIN/END names do not match
    #[error("mismatched nesting at {span}: expected END:{expected}, found END:{found}")]
    MismatchedNesting {
        /// Expected component name
        expected: String,
        /// Actual component name found
        found: String,
        /// Span of the END line
        span: Span,
    },

    /// BEGIN or END line with parameters (not allowed per RFC 5545)
    #[error("BEGIN/END line for {name} at {span} has parameters")]
    BeginEndWithParameters {
        /// The component name
        name: String,
        /// Span of the line
        span: Span,
    },

    /// Property outside of any component
    #[error("property {name} at {span} is outside of any component")]
    OrphanProperty {
        /// The property name
        name: String,
        /// Span of the line
        span: Span,
    },
}

/// Result of building a tree.
#[derive(Debug, Clone)]
pub struct TreeBuilderResult<'src> {
    /// The root components (typically one VCALENDAR)
    pub roots: Vec<Component<'src>>,
    /// Errors encountered during tree building
    pub errors: Vec<TreeBuildError>,
}
