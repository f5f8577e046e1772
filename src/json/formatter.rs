use std::io;

use serde_json::ser::Formatter;

/// `serde_json` formatter for the PHD configuration layout.
///
/// Two spaces per level, `"key": value`, every array and object closed on its
/// own line. Unlike `PrettyFormatter`, empty arrays are still split over two
/// lines (`[` then `]`).
#[derive(Default, Clone, Debug)]
pub(crate) struct PhdFormatter {
    indent: usize,
}

impl PhdFormatter {
    fn write_indent<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for _ in 0..self.indent {
            writer.write_all(b"  ")?;
        }
        Ok(())
    }

    fn open<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        self.indent += 1;
        writer.write_all(bracket)
    }

    fn close<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        self.indent = self.indent.saturating_sub(1);
        writer.write_all(b"\n")?;
        self.write_indent(writer)?;
        writer.write_all(bracket)
    }

    fn element<W: ?Sized + io::Write>(&self, writer: &mut W, first: bool) -> io::Result<()> {
        let sep: &[u8] = if first { b"\n" } else { b",\n" };
        writer.write_all(sep)?;
        self.write_indent(writer)
    }
}

impl Formatter for PhdFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"[")
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"]")
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.element(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        Ok(())
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.element(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn render<T: Serialize>(value: &T) -> String {
        let mut buf: Vec<u8> = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PhdFormatter::default());
        value.serialize(&mut ser).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn nested_layout() {
        let value = serde_json::json!({ "a": [1, 2], "b": { "c": "x\"y" } });
        assert_eq!(
            render(&value),
            "{\n  \"a\": [\n    1,\n    2\n  ],\n  \"b\": {\n    \"c\": \"x\\\"y\"\n  }\n}"
        );
    }

    #[test]
    fn empty_array_spans_two_lines() {
        let value = serde_json::json!({ "list": [] });
        assert_eq!(render(&value), "{\n  \"list\": [\n  ]\n}");
    }
}
