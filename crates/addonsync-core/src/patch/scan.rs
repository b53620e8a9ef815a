//! Single-pass lexer over JSON text: string literal spans and structural braces.
//!
//! Braces inside string literals are not structural and are skipped, so
//! brace matching stays aligned even when values contain `{` or `}`.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Brace {
    pub offset: usize,
    pub open: bool,
}

#[derive(Debug, Default)]
pub(crate) struct Structure {
    braces: Vec<Brace>,
    /// Byte ranges of string literals, quotes included. Sorted, non-overlapping.
    strings: Vec<Range<usize>>,
}

impl Structure {
    pub fn scan(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut out = Structure::default();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'"' => {
                    let start = i;
                    i += 1;
                    while i < bytes.len() {
                        match bytes[i] {
                            b'\\' => i += 2,
                            b'"' => break,
                            _ => i += 1,
                        }
                    }
                    let end = (i + 1).min(bytes.len());
                    out.strings.push(start..end);
                    i = end;
                    continue;
                }
                b'{' => out.braces.push(Brace { offset: i, open: true }),
                b'}' => out.braces.push(Brace { offset: i, open: false }),
                _ => {}
            }
            i += 1;
        }
        out
    }

    /// True if a string literal starts exactly at `offset`.
    pub fn is_string_start(&self, offset: usize) -> bool {
        self.strings
            .binary_search_by_key(&offset, |r| r.start)
            .is_ok()
    }

    /// Offset of the nearest unmatched `{` before `offset`.
    pub fn enclosing_open(&self, offset: usize) -> Option<usize> {
        let before = self.braces.partition_point(|b| b.offset < offset);
        let mut depth = 0usize;
        for brace in self.braces[..before].iter().rev() {
            if brace.open {
                if depth == 0 {
                    return Some(brace.offset);
                }
                depth -= 1;
            } else {
                depth += 1;
            }
        }
        None
    }

    /// Offset just past the `}` that closes the object open at `offset`.
    pub fn matching_close(&self, offset: usize) -> Option<usize> {
        let after = self.braces.partition_point(|b| b.offset < offset);
        let mut depth = 0usize;
        for brace in &self.braces[after..] {
            if brace.open {
                depth += 1;
            } else if depth == 0 {
                return Some(brace.offset + 1);
            } else {
                depth -= 1;
            }
        }
        None
    }
}
