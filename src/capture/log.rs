//! Append log
//!
//! Every fragment written during a session, in arrival order. Kept for
//! inspection after the fact and dumped when a session ends in failure.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

/// Ordered, append-only record of raw fragments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppendLog {
    entries: Vec<String>,
}

impl AppendLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.entries.push(text.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }

    /// Diagnostic lines: `"{index}: {repr}"` per fragment, 0-based
    pub fn dump_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, text)| format!("{}: {}", index, repr(text)))
            .collect()
    }

    /// Write the diagnostic lines to `out`, one per line
    pub fn dump<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for line in self.dump_lines() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

/// Quoted literal form of `text` with control characters escaped.
///
/// Single quotes are used unless the text contains a single quote and no
/// double quote.
pub fn repr(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02x}", code));
                } else {
                    out.push_str(&format!("\\u{:04x}", code));
                }
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
