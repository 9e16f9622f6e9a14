//! Indentation-tracking text buffer for generated source.
//!
//! Nested blocks are written through [`Indent`] guards: acquiring one bumps
//! the depth and dropping it restores the depth, so every early return or
//! `?` unwinds the indentation along with the borrow.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// Banner written at the top of every generated file.
pub const GENERATED_HEADER: &[&str] = &[
    "// <auto-generated>",
    "//     This code was generated by a tool.",
    "//     Changes to this file may cause incorrect behavior and will be lost if",
    "//     the code is regenerated.",
    "// </auto-generated>",
];

const DEFAULT_INDENT_UNIT: &str = "    ";

/// Append-only text buffer with a current indentation depth.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
    unit: &'static str,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::with_indent_unit(DEFAULT_INDENT_UNIT)
    }

    pub fn with_indent_unit(unit: &'static str) -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            unit,
        }
    }

    /// Append `text` at the current depth followed by a line terminator.
    ///
    /// Empty text produces a bare terminator without trailing indentation.
    pub fn append_line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(self.unit);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
        self
    }

    pub fn append_blank_line(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Append every line of `lines` at the current depth.
    pub fn append_lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.append_line(line);
        }
        self
    }

    pub fn append_header(&mut self) -> &mut Self {
        self.append_lines(GENERATED_HEADER.iter().copied())
    }

    /// Increase the depth until the returned guard is dropped.
    pub fn indent(&mut self) -> Indent<'_> {
        self.depth += 1;
        Indent { writer: self }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_text(self) -> String {
        self.buf
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CodeWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

/// Scoped indentation level borrowed from a [`CodeWriter`].
#[must_use = "dropping the guard immediately undoes the indent"]
pub struct Indent<'a> {
    writer: &'a mut CodeWriter,
}

impl Deref for Indent<'_> {
    type Target = CodeWriter;

    fn deref(&self) -> &CodeWriter {
        self.writer
    }
}

impl DerefMut for Indent<'_> {
    fn deref_mut(&mut self) -> &mut CodeWriter {
        self.writer
    }
}

impl Drop for Indent<'_> {
    fn drop(&mut self) {
        self.writer.depth -= 1;
    }
}
