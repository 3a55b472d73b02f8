// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! TEXT value helpers (RFC 5545 section 3.3.11).

use std::borrow::Cow;

/// Resolve the escape sequences of a TEXT value.
///
/// `\\`, `\;`, `\,` map to the escaped character and `\n` / `\N` to a line
/// feed. Unknown escapes are kept verbatim.
#[must_use]
pub fn unescape_text(value: &str) -> Cow<'_, str> {
    if !value.contains('\\') {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(c @ ('\\' | ';' | ',')) => out.push(c),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}
