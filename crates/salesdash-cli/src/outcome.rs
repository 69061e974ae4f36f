//! The one-line JSON outcome printed on stdout
//!
//! Serialized byte-for-byte like Python's `json.dumps` defaults: `", "` and
//! `": "` separators, non-ASCII escaped as `\uXXXX` (surrogate pairs above
//! the BMP).
//!
//! ```text
//! {"success": true, "file": "dashboard.xlsx"}
//! {"success": false, "error": "failed to read dashboard input: ..."}
//! ```

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::Formatter;

#[derive(Debug, Serialize)]
pub struct Outcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    pub fn written(file: impl Into<String>) -> Self {
        Self { success: true, file: Some(file.into()), error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, file: None, error: Some(error.into()) }
    }

    /// Render as a single line without the trailing newline
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, DumpsFormatter);
        self.serialize(&mut serializer)?;
        // Only ASCII is ever written
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// `json.dumps` separators and ASCII-only strings
struct DumpsFormatter;

impl Formatter for DumpsFormatter {
    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_line_matches_dumps_layout() {
        let line = Outcome::written("dashboard.xlsx").to_line().unwrap();
        assert_eq!(line, r#"{"success": true, "file": "dashboard.xlsx"}"#);
    }

    #[test]
    fn failure_line_carries_error() {
        let line = Outcome::failed("missing field `kpis`").to_line().unwrap();
        assert_eq!(line, r#"{"success": false, "error": "missing field `kpis`"}"#);
    }

    #[test]
    fn non_ascii_is_escaped() {
        let line = Outcome::written("ventes-été.xlsx").to_line().unwrap();
        assert_eq!(line, r#"{"success": true, "file": "ventes-\u00e9t\u00e9.xlsx"}"#);

        let line = Outcome::written("₹📊.xlsx").to_line().unwrap();
        assert_eq!(line, r#"{"success": true, "file": "\u20b9\ud83d\udcca.xlsx"}"#);
    }

    #[test]
    fn control_characters_use_json_escapes() {
        let line = Outcome::failed("a\"b\nc").to_line().unwrap();
        assert_eq!(line, r#"{"success": false, "error": "a\"b\nc"}"#);
    }
}
