//! Placeholder rewriting.
//!
//! Firebird statements accept positional `?` markers only. This module
//! rewrites generic SQL containing named (`:name`) or positional (`?`)
//! placeholders into the engine's positional convention and records, per
//! 1-based output position, the original placeholder text so the caller can
//! bind named values by position.

use crate::lexer::FragmentScanner;

/// A placeholder found in a scannable fragment.
///
/// Created during scanning and consumed immediately by the rewriter; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderToken {
    /// A positional `?` marker.
    Positional {
        /// 1-based position in source order.
        index: usize,
        /// Byte offset of the marker in the original SQL.
        offset: usize,
    },
    /// A named `:name` marker.
    Named {
        /// The name without the leading colon.
        name: String,
        /// 1-based position in source order.
        index: usize,
        /// Byte offset of the marker in the original SQL.
        offset: usize,
    },
}

impl PlaceholderToken {
    /// Returns the 1-based position of this placeholder.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Positional { index, .. } | Self::Named { index, .. } => *index,
        }
    }

    /// Returns the byte offset of this placeholder in the original SQL.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Positional { offset, .. } | Self::Named { offset, .. } => *offset,
        }
    }
}

/// Ordered mapping from 1-based positional index to the original
/// placeholder text (`"?"` or `":name"`).
///
/// Indices are contiguous starting at 1, in left-to-right source order.
/// Built once per statement rewrite and owned by the caller for the
/// lifetime of statement execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    entries: Vec<String>,
}

impl ParameterMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn push(&mut self, original: String) {
        self.entries.push(original);
    }

    /// Returns the original placeholder text for a 1-based position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
    }

    /// Returns the number of placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(position, original text)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, s)| (i + 1, s.as_str()))
    }
}

/// Returns whether a byte may appear in a placeholder name.
const fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Scans the placeholders of a SQL string, in source order.
///
/// Placeholders inside quoted literal spans are never matched. A `::`
/// (cast syntax) is skipped, and a `:` not followed by a name character is
/// plain text.
#[must_use]
pub fn scan_placeholders(sql: &str) -> Vec<PlaceholderToken> {
    let mut tokens = Vec::new();

    for fragment in FragmentScanner::new(sql).filter(|f| f.is_scannable()) {
        let bytes = fragment.text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'?' => {
                    tokens.push(PlaceholderToken::Positional {
                        index: tokens.len() + 1,
                        offset: fragment.offset + i,
                    });
                    i += 1;
                }
                b':' => {
                    if bytes.get(i + 1) == Some(&b':') {
                        i += 2;
                        continue;
                    }
                    let mut end = i + 1;
                    while end < bytes.len() && is_name_byte(bytes[end]) {
                        end += 1;
                    }
                    if end > i + 1 {
                        tokens.push(PlaceholderToken::Named {
                            name: fragment.text[i + 1..end].to_string(),
                            index: tokens.len() + 1,
                            offset: fragment.offset + i,
                        });
                        i = end;
                    } else {
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        }
    }

    tokens
}

/// Rewrites every placeholder to the engine's positional `?` marker and
/// returns the rewritten SQL together with the ordered [`ParameterMap`].
///
/// Each placeholder becomes exactly one `?`; literal spans are copied
/// through byte-for-byte. A named key the framework later fails to bind is
/// a caller-side concern, not detected here.
#[must_use]
pub fn rewrite_placeholders(sql: &str) -> (String, ParameterMap) {
    let mut out = String::with_capacity(sql.len());
    let mut map = ParameterMap::new();

    for fragment in FragmentScanner::new(sql) {
        if fragment.is_literal() {
            out.push_str(fragment.text);
            continue;
        }

        let bytes = fragment.text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'?' => {
                    out.push('?');
                    map.push("?".to_string());
                    i += 1;
                }
                b':' => {
                    if bytes.get(i + 1) == Some(&b':') {
                        out.push_str("::");
                        i += 2;
                        continue;
                    }
                    let mut end = i + 1;
                    while end < bytes.len() && is_name_byte(bytes[end]) {
                        end += 1;
                    }
                    if end > i + 1 {
                        out.push('?');
                        map.push(fragment.text[i..end].to_string());
                        i = end;
                    } else {
                        out.push(':');
                        i += 1;
                    }
                }
                _ => {
                    // Copy a full UTF-8 sequence at once.
                    let ch = fragment.text[i..].chars().next().unwrap_or('\u{fffd}');
                    out.push(ch);
                    i += ch.len_utf8();
                }
            }
        }
    }

    (out, map)
}
