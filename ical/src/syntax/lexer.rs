// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for iCalendar text.
//!
//! RFC 5545 mandates CRLF line endings, but feeds in the wild also use bare LF
//! or CR, so all three are accepted as line breaks. A line break followed by a
//! single space or tab is a fold and is skipped entirely.

use std::fmt::{self, Display};

use logos::Logos;

use crate::syntax::Span;

/// Tokenize iCalendar source text into spanned tokens
pub fn tokenize(src: &str) -> impl Iterator<Item = SpannedToken<'_>> {
    Token::lexer(src).spanned().map(|(tok, span)| match tok {
        Ok(tok) => SpannedToken(tok, Span::from(span)),
        Err(()) => SpannedToken(Token::Error, Span::from(span)),
    })
}

/// Token emitted by the iCalendar lexer
#[derive(PartialEq, Eq, Clone, Copy, Logos)]
#[logos(skip r"(\r\n|\n|\r)[ \t]")] // skip folding
pub enum Token<'a> {
    /// Double Quote (")
    #[token(r#"""#)]
    DQuote,

    /// Comma (,)
    #[token(",")]
    Comma,

    /// Colon (:)
    #[token(":")]
    Colon,

    /// Semicolon (;)
    #[token(";")]
    Semicolon,

    /// Equal sign (=)
    #[token("=")]
    Equal,

    /// ASCII symbols: sequences of printable ASCII characters, space and tab
    #[regex(r#"[\t !#$%&'()*+./<>?@\[\\\]\^`\{|\}~]+"#)]
    Symbol(&'a str),

    /// Line break: CRLF, LF or CR
    #[regex(r"\r\n|\n|\r")]
    Newline,

    /// ASCII word characters: 0-9, A-Z, a-z, underscore, hyphen
    #[regex("[0-9A-Za-z_-]+")]
    Word(&'a str),

    /// Any run of non-ASCII characters
    #[regex(r"[^\x00-\x7F]+")]
    UnicodeText(&'a str),

    /// Anything else, mostly control characters
    Error,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DQuote => write!(f, "DQuote"),
            Self::Comma => write!(f, "Comma"),
            Self::Colon => write!(f, "Colon"),
            Self::Semicolon => write!(f, "Semicolon"),
            Self::Equal => write!(f, "Equal"),
            Self::Symbol(s) => write!(f, "Symbol({s})"),
            Self::Newline => write!(f, "Newline"),
            Self::Word(s) => write!(f, "Word({s})"),
            Self::UnicodeText(s) => write!(f, "UnicodeText({s})"),
            Self::Error => write!(f, "Error"),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A token with its associated span in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken<'src>(pub Token<'src>, pub Span);
