//! # Output Formatting
//!
//! A `serde_json` formatter that honours the formatting knobs `dumps`
//! forwards: indentation width, item and key separators, and whether
//! non-ASCII characters are escaped.
//!
//! Without indentation the default separators are `", "` and `": "`; with
//! indentation the item separator loses its trailing space because a newline
//! follows it. `ensure_ascii` escapes DEL and every non-ASCII character as
//! `\uXXXX`, using a surrogate pair outside the Basic Multilingual Plane.

use std::io;

use serde_json::ser::Formatter;

/// Default separators when no indentation is requested.
pub const COMPACT_SEPARATORS: (&str, &str) = (", ", ": ");

/// Default separators when output is indented.
pub const INDENTED_SEPARATORS: (&str, &str) = (",", ": ");

/// Formatter driven by resolved `dumps` options.
#[derive(Debug, Clone)]
pub struct DumpFormatter {
    indent: Option<Vec<u8>>,
    item_separator: Vec<u8>,
    key_separator: Vec<u8>,
    ensure_ascii: bool,
    depth: usize,
    has_value: bool,
}

impl DumpFormatter {
    /// Build a formatter. `indent` is the number of spaces per nesting level;
    /// `Some(0)` still breaks lines. Separators default per the module docs.
    pub fn new(indent: Option<usize>, separators: Option<(&str, &str)>, ensure_ascii: bool) -> Self {
        let (item, key) = separators.unwrap_or(match indent {
            Some(_) => INDENTED_SEPARATORS,
            None => COMPACT_SEPARATORS,
        });
        Self {
            indent: indent.map(|width| vec![b' '; width]),
            item_separator: item.as_bytes().to_vec(),
            key_separator: key.as_bytes().to_vec(),
            ensure_ascii,
            depth: 0,
            has_value: false,
        }
    }

    fn write_newline_indent<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        if let Some(unit) = &self.indent {
            writer.write_all(b"\n")?;
            for _ in 0..self.depth {
                writer.write_all(unit)?;
            }
        }
        Ok(())
    }

    fn begin_item<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if !first {
            writer.write_all(&self.item_separator)?;
        }
        self.write_newline_indent(writer)
    }

    fn end_container<W: ?Sized + io::Write>(&mut self, writer: &mut W, close: &[u8]) -> io::Result<()> {
        self.depth -= 1;
        if self.has_value {
            self.write_newline_indent(writer)?;
        }
        writer.write_all(close)
    }
}

/// Characters `ensure_ascii` writes as `\uXXXX`. serde_json already escapes
/// the control characters below U+0020.
fn needs_escape(ch: char) -> bool {
    ch == '\x7f' || !ch.is_ascii()
}

impl Formatter for DumpFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(b"[")
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.end_container(writer, b"]")
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.begin_item(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.end_container(writer, b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.begin_item(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.key_separator)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        if !self.ensure_ascii || !fragment.chars().any(needs_escape) {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if !needs_escape(ch) {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units).iter() {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}
