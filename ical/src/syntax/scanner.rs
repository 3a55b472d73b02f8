// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! Converts the token stream into content lines:
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! ```
//!
//! Errors are recorded per line and scanning resumes at the next line break,
//! so one broken line never hides the rest of the input.

use std::borrow::Cow;
use std::iter::Peekable;

use crate::syntax::lexer::{SpannedToken, Token};
use crate::syntax::{Parameter, ParameterValue, Span};

/// A scanned iCalendar content line.
#[derive(Debug, Clone)]
pub struct ContentLine<'src> {
    /// Property name (e.g., "DTSTART", "SUMMARY")
    pub name: Cow<'src, str>,

    /// Property parameters (semicolon-separated)
    pub parameters: Vec<Parameter<'src>>,

    /// Property value
    pub value: Cow<'src, str>,

    /// Span of the entire content line, line break excluded
    pub span: Span,
}

/// Errors that can occur when scanning a content line.
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum ContentLineError {
    /// Missing colon separator, e.g. `PROPNAME value`.
    #[error("missing colon in content line at {span}")]
    MissingColon {
        /// Span of the offending line
        span: Span,
    },

    /// The line does not start with a property name, e.g. `:value`.
    #[error("missing property name at {span}")]
    EmptyName {
        /// Span of the offending line
        span: Span,
    },

    /// Invalid parameter syntax.
    #[error("invalid parameter at {span}: {kind}")]
    InvalidParameter {
        /// Span from the parameter start to the end of the line
        span: Span,
        /// Specific error details
        kind: ParameterErrorKind,
    },
}

/// Specific parameter parsing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParameterErrorKind {
    /// Missing equals sign, e.g. `TZID Europe/Madrid`.
    #[error("missing equals in parameter")]
    MissingEquals,

    /// Missing parameter value, e.g. `TZID=`.
    #[error("missing parameter value")]
    MissingValue,

    /// Empty parameter name, e.g. `;=value`.
    #[error("empty parameter name")]
    EmptyName,

    /// Unterminated quoted string, e.g. `CN="unclosed`.
    #[error("unterminated quoted string")]
    UnterminatedQuote,
}

/// Result of scanning content lines.
#[derive(Debug, Clone, Default)]
pub struct ScanResult<'src> {
    /// Successfully scanned content lines, in source order
    pub lines: Vec<ContentLine<'src>>,

    /// Lines that could not be scanned
    pub errors: Vec<ContentLineError>,
}

/// Scan a token stream into content lines. Blank lines are skipped.
pub fn scan_content_lines<'src>(
    src: &'src str,
    tokens: impl IntoIterator<Item = SpannedToken<'src>>,
) -> ScanResult<'src> {
    let mut tokens = tokens.into_iter().peekable();
    let mut result = ScanResult::default();

    while let Some(line) = scan_one_content_line(src, &mut tokens) {
        match line {
            Ok(line) => result.lines.push(line),
            Err(err) => result.errors.push(err),
        }
    }

    result
}

/// Scan a single content line. Returns `None` at the end of input.
fn scan_one_content_line<'src>(
    src: &'src str,
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Option<Result<ContentLine<'src>, ContentLineError>> {
    while let Some(SpannedToken(Token::Newline, _)) = tokens.peek() {
        tokens.next();
    }
    let &SpannedToken(_, first) = tokens.peek()?;
    let line_start = first.start;

    let mut name = Segments::default();
    while let Some(&SpannedToken(Token::Word(_), span)) = tokens.peek() {
        name.push(span);
        tokens.next();
    }
    if name.is_empty() {
        let end = consume_until_newline(tokens).unwrap_or(first.end);
        return Some(Err(ContentLineError::EmptyName {
            span: Span::new(line_start, end),
        }));
    }

    let mut parameters = Vec::new();
    while let Some(&SpannedToken(Token::Semicolon, semi)) = tokens.peek() {
        tokens.next();
        match scan_parameter(src, tokens) {
            Ok(param) => parameters.push(param),
            Err(kind) => {
                let end = consume_until_newline(tokens).unwrap_or(semi.end);
                return Some(Err(ContentLineError::InvalidParameter {
                    span: Span::new(semi.start, end),
                    kind,
                }));
            }
        }
    }

    let colon = match tokens.peek() {
        Some(&SpannedToken(Token::Colon, span)) => {
            tokens.next();
            span
        }
        Some(&SpannedToken(_, span)) => {
            let end = consume_until_newline(tokens).unwrap_or(span.end);
            return Some(Err(ContentLineError::MissingColon {
                span: Span::new(line_start, end),
            }));
        }
        None => {
            return Some(Err(ContentLineError::MissingColon {
                span: Span::new(line_start, name.end().unwrap_or(line_start)),
            }));
        }
    };

    let mut value = Segments::default();
    let mut line_end = colon.end;
    for SpannedToken(token, span) in tokens.by_ref() {
        if token == Token::Newline {
            break;
        }
        value.push(span);
        line_end = span.end;
    }

    Some(Ok(ContentLine {
        name: name.build(src),
        parameters,
        value: value.build(src),
        span: Span::new(line_start, line_end),
    }))
}

/// Scan a single parameter: `name=value` or `name=value1,value2`.
fn scan_parameter<'src>(
    src: &'src str,
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Result<Parameter<'src>, ParameterErrorKind> {
    let mut name = Segments::default();
    while let Some(&SpannedToken(Token::Word(_), span)) = tokens.peek() {
        name.push(span);
        tokens.next();
    }
    let Some(start) = name.start() else {
        return Err(ParameterErrorKind::EmptyName);
    };

    match tokens.peek() {
        Some(SpannedToken(Token::Equal, _)) => {
            tokens.next();
        }
        _ => return Err(ParameterErrorKind::MissingEquals),
    }

    let mut values = Vec::new();
    let mut end = name.end().unwrap_or(start);
    loop {
        match scan_parameter_value(src, tokens)? {
            Some((value, span)) => {
                end = span.end;
                values.push(value);
            }
            None => break,
        }

        match tokens.peek() {
            Some(&SpannedToken(Token::Comma, _)) => {
                tokens.next();
            }
            _ => break,
        }
    }

    if values.is_empty() {
        return Err(ParameterErrorKind::MissingValue);
    }

    Ok(Parameter {
        name: name.build(src),
        values,
        span: Span::new(start, end),
    })
}

/// Scan a single parameter value, quoted or not.
///
/// Returns `Ok(None)` if there's no value to scan.
fn scan_parameter_value<'src>(
    src: &'src str,
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Result<Option<(ParameterValue<'src>, Span)>, ParameterErrorKind> {
    let mut segments = Segments::default();

    if let Some(&SpannedToken(Token::DQuote, open)) = tokens.peek() {
        tokens.next();
        loop {
            match tokens.peek() {
                Some(&SpannedToken(Token::DQuote, close)) => {
                    tokens.next();
                    let value = ParameterValue {
                        value: segments.build(src),
                        quoted: true,
                    };
                    return Ok(Some((value, Span::new(open.start, close.end))));
                }
                // leave the line break for the caller's recovery
                Some(SpannedToken(Token::Newline, _)) | None => {
                    return Err(ParameterErrorKind::UnterminatedQuote);
                }
                Some(&SpannedToken(_, span)) => {
                    segments.push(span);
                    tokens.next();
                }
            }
        }
    }

    while let Some(&SpannedToken(token, span)) = tokens.peek() {
        match token {
            Token::Semicolon | Token::Colon | Token::Comma | Token::Newline | Token::DQuote => {
                break;
            }
            _ => {
                segments.push(span);
                tokens.next();
            }
        }
    }

    match (segments.start(), segments.end()) {
        (Some(start), Some(end)) => {
            let value = ParameterValue {
                value: segments.build(src),
                quoted: false,
            };
            Ok(Some((value, Span::new(start, end))))
        }
        _ => Ok(None),
    }
}

/// Consume all tokens up to and including the next line break.
///
/// Returns the end of the last token before the line break, if any.
fn consume_until_newline<'src>(
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Option<usize> {
    let mut end = None;
    for SpannedToken(token, span) in tokens.by_ref() {
        if token == Token::Newline {
            break;
        }
        end = Some(span.end);
    }
    end
}

/// Source spans that make up one logical piece of text.
///
/// Folding removes bytes from the middle of a value, so a value may be split
/// over several spans. Contiguous spans are borrowed from the source.
#[derive(Debug, Default)]
struct Segments {
    spans: Vec<Span>,
}

impl Segments {
    fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    fn start(&self) -> Option<usize> {
        self.spans.first().map(|s| s.start)
    }

    fn end(&self) -> Option<usize> {
        self.spans.last().map(|s| s.end)
    }

    fn build<'src>(&self, src: &'src str) -> Cow<'src, str> {
        let contiguous = self
            .spans
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.end == b.start));

        match (self.start(), self.end()) {
            (Some(start), Some(end)) if contiguous => {
                Cow::Borrowed(src.get(start..end).unwrap_or_default())
            }
            (Some(_), Some(_)) => Cow::Owned(
                self.spans
                    .iter()
                    .filter_map(|span| src.get(span.into_range()))
                    .collect(),
            ),
            _ => Cow::Borrowed(""),
        }
    }
}
