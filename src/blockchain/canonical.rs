use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

/// JSON in the layout of Python's `json.dumps(value, sort_keys=True)`:
/// `", "` and `": "` separators, every character outside printable ASCII
/// written as `\uXXXX` (UTF-16 units, lowercase hex).
///
/// Key order is the caller's job; `serde_json::Value` maps are already sorted.
struct AsciiSortedFormatter;

impl Formatter for AsciiSortedFormatter {
    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            return Ok(());
        }
        writer.write_all(b", ")
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            return Ok(());
        }
        writer.write_all(b", ")
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    // Quotes, backslashes and C0 controls arrive via `write_char_escape`,
    // which already matches Python. Everything else lands here.
    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() && c != '\x7f' {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize `value` with sorted keys in the ASCII-escaped, spaced layout.
pub fn to_canonical_vec<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let sorted = serde_json::to_value(value)?;
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, AsciiSortedFormatter);
    sorted.serialize(&mut ser)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::to_canonical_vec;
    use serde_json::json;

    fn text(v: serde_json::Value) -> String {
        String::from_utf8(to_canonical_vec(&v).unwrap()).unwrap()
    }

    #[test]
    fn spaced_separators_and_sorted_keys() {
        assert_eq!(
            text(json!({"b": [1, 2], "a": {"y": null, "x": true}, "c": []})),
            r#"{"a": {"x": true, "y": null}, "b": [1, 2], "c": []}"#
        );
    }

    #[test]
    fn escapes_everything_outside_printable_ascii() {
        assert_eq!(
            text(json!("zoë 🦀\u{7f}\n\"q\"\\~")),
            r#""zo\u00eb \ud83e\udd80\u007f\n\"q\"\\~""#
        );
    }
}
