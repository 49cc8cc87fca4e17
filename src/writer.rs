use std::io::Write;

use crate::error::{ErrorKind, JsonError};
use crate::model::{Array, Object, Record, Value};
use crate::options::WriteOptions;

/// Serializes a [`Value`], [`Object`], [`Array`], or [`Record`] as JSON text.
///
/// Layout rules:
/// - objects are written multi-line, one entry per line, each entry indented
///   one tab deeper than the object's own depth, as `"key":` followed by a
///   tab and the value;
/// - an object-valued entry puts the nested object on its own lines at the
///   entry's depth;
/// - arrays are written on a single line with comma-separated elements and
///   add no indentation of their own;
/// - empty containers are `{}` and `[]`.
///
/// Output streams incrementally into the sink; nothing buffers the whole
/// document. Nesting past `options.max_depth` fails with `DepthExceeded`.
pub struct Writer {
    pub options: WriteOptions,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new(WriteOptions::default())
    }
}

impl Writer {
    pub fn new(options: WriteOptions) -> Self {
        Self { options }
    }

    pub fn write_value<W: Write>(&self, out: &mut W, value: &Value) -> Result<(), JsonError> {
        self.value(out, value, 0)
    }

    pub fn write_object<W: Write>(&self, out: &mut W, object: &Object) -> Result<(), JsonError> {
        self.object(out, object, 0)
    }

    pub fn write_array<W: Write>(&self, out: &mut W, array: &Array) -> Result<(), JsonError> {
        self.array(out, array, 0)
    }

    /// Writes a named top-level pair: `"key":` + tab, then the value. An
    /// object value starts on the next line at the record's own depth; any
    /// other value follows the tab directly.
    pub fn write_record<W: Write>(&self, out: &mut W, record: &Record) -> Result<(), JsonError> {
        write_escaped_string(out, &record.key)?;
        out.write_all(b":\t")?;
        if let Value::Object(obj) = &record.value {
            out.write_all(b"\n")?;
            self.object(out, obj, 0)?;
        } else {
            self.value(out, &record.value, 0)?;
        }
        Ok(())
    }

    fn value<W: Write>(&self, out: &mut W, value: &Value, depth: usize) -> Result<(), JsonError> {
        match value {
            Value::Null => out.write_all(b"null").map_err(Into::into),
            Value::Boolean(true) => out.write_all(b"true").map_err(Into::into),
            Value::Boolean(false) => out.write_all(b"false").map_err(Into::into),
            Value::Integer(n) => write!(out, "{}", n).map_err(Into::into),
            Value::Float(x) => {
                let text = format_float(*x, self.options.float_precision)?;
                out.write_all(text.as_bytes()).map_err(Into::into)
            }
            Value::String(s) => write_escaped_string(out, s),
            Value::Array(a) => self.array(out, a, depth),
            Value::Object(o) => self.object(out, o, depth),
        }
    }

    fn object<W: Write>(&self, out: &mut W, object: &Object, depth: usize) -> Result<(), JsonError> {
        self.check_depth(depth)?;
        if object.is_empty() {
            out.write_all(b"{}")?;
            return Ok(());
        }

        out.write_all(b"{\n")?;
        let mut first = true;
        for (key, value) in object {
            if !first {
                out.write_all(b",\n")?;
            }
            first = false;

            write_indent(out, depth + 1)?;
            write_escaped_string(out, key)?;
            out.write_all(b":\t")?;
            if let Value::Object(nested) = value {
                out.write_all(b"\n")?;
                write_indent(out, depth + 1)?;
                self.object(out, nested, depth + 1)?;
            } else {
                self.value(out, value, depth + 1)?;
            }
        }
        out.write_all(b"\n")?;
        write_indent(out, depth)?;
        out.write_all(b"}")?;
        Ok(())
    }

    fn array<W: Write>(&self, out: &mut W, array: &Array, depth: usize) -> Result<(), JsonError> {
        self.check_depth(depth)?;
        if array.is_empty() {
            out.write_all(b"[]")?;
            return Ok(());
        }

        out.write_all(b"[")?;
        let mut first = true;
        for element in array {
            if !first {
                out.write_all(b",")?;
            }
            first = false;
            // Arrays introduce no indentation of their own.
            self.value(out, element, depth)?;
        }
        out.write_all(b"]")?;
        Ok(())
    }

    fn check_depth(&self, depth: usize) -> Result<(), JsonError> {
        if depth >= self.options.max_depth {
            return Err(JsonError::simple(
                ErrorKind::DepthExceeded,
                format!("Nesting deeper than the configured maximum of {}", self.options.max_depth),
            ));
        }
        Ok(())
    }
}

/// Renders a value as text with default options.
pub fn to_string(value: &Value) -> Result<String, JsonError> {
    to_string_with(value, WriteOptions::default())
}

/// Renders a value as text with explicit options.
pub fn to_string_with(value: &Value, options: WriteOptions) -> Result<String, JsonError> {
    let mut buffer = Vec::new();
    Writer::new(options).write_value(&mut buffer, value)?;
    // The writer only ever emits valid UTF-8.
    String::from_utf8(buffer)
        .map_err(|_| JsonError::simple(ErrorKind::Io, "Writer produced invalid UTF-8"))
}

/// Renders a named top-level record as text with default options.
pub fn record_to_string(record: &Record) -> Result<String, JsonError> {
    let mut buffer = Vec::new();
    Writer::default().write_record(&mut buffer, record)?;
    String::from_utf8(buffer)
        .map_err(|_| JsonError::simple(ErrorKind::Io, "Writer produced invalid UTF-8"))
}

/// Streams a value into any sink with explicit options.
pub fn to_writer<W: Write>(out: &mut W, value: &Value, options: WriteOptions) -> Result<(), JsonError> {
    Writer::new(options).write_value(out, value)
}

fn write_indent<W: Write>(out: &mut W, depth: usize) -> Result<(), JsonError> {
    for _ in 0..depth {
        out.write_all(b"\t")?;
    }
    Ok(())
}

/// Writes `"` + escaped body + `"`. Quote, backslash, and the short-escape
/// control set use two-character escapes; any other byte below 0x20 becomes
/// `\u00XX`. Everything else, multi-byte sequences included, passes through
/// unescaped. Apostrophe and forward slash are emitted literally.
fn write_escaped_string<W: Write>(out: &mut W, text: &str) -> Result<(), JsonError> {
    out.write_all(b"\"")?;
    for ch in text.chars() {
        match ch {
            '"' => out.write_all(b"\\\"")?,
            '\\' => out.write_all(b"\\\\")?,
            '\u{0008}' => out.write_all(b"\\b")?,
            '\u{000C}' => out.write_all(b"\\f")?,
            '\n' => out.write_all(b"\\n")?,
            '\r' => out.write_all(b"\\r")?,
            '\t' => out.write_all(b"\\t")?,
            _ if (ch as u32) < 0x20 => {
                write!(out, "\\u{:04x}", ch as u32)?;
            }
            _ => {
                let mut buf = [0u8; 4];
                out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
            }
        }
    }
    out.write_all(b"\"")?;
    Ok(())
}

/// Formats a float at the given number of significant digits, choosing fixed
/// or exponential notation the way C's `%g` does. A whole-valued result keeps
/// a trailing `.0` so the float kind survives a round trip. Non-finite values
/// have no JSON text form and fail with `InvalidNumber`.
fn format_float(value: f64, precision: usize) -> Result<String, JsonError> {
    if !value.is_finite() {
        return Err(JsonError::simple(
            ErrorKind::InvalidNumber,
            "Non-finite float cannot be represented in JSON",
        ));
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent >= -4 && (exponent as i64) < precision as i64 {
        let fraction_digits = (precision as i32 - 1 - exponent).max(0) as usize;
        let mut fixed = format!("{:.*}", fraction_digits, value);
        if fixed.contains('.') {
            while fixed.ends_with('0') {
                fixed.pop();
            }
            if fixed.ends_with('.') {
                fixed.pop();
            }
        }
        if !fixed.contains('.') {
            fixed.push_str(".0");
        }
        Ok(fixed)
    } else {
        let mut mantissa = mantissa.to_string();
        if mantissa.contains('.') {
            while mantissa.ends_with('0') {
                mantissa.pop();
            }
            if mantissa.ends_with('.') {
                mantissa.pop();
            }
        }
        Ok(format!("{}e{}", mantissa, exponent))
    }
}

#[cfg(test)]
mod tests {
    use super::format_float;

    #[test]
    fn float_formatting_matches_significant_digits() {
        assert_eq!(format_float(0.0, 12).unwrap(), "0.0");
        assert_eq!(format_float(5.0, 12).unwrap(), "5.0");
        assert_eq!(format_float(-2.5, 12).unwrap(), "-2.5");
        assert_eq!(format_float(28942.42, 12).unwrap(), "28942.42");
        assert_eq!(format_float(37e10, 12).unwrap(), "370000000000.0");
        assert_eq!(format_float(1.7e-10, 12).unwrap(), "1.7e-10");
        assert_eq!(format_float(1e100, 12).unwrap(), "1e100");
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        assert!(format_float(f64::NAN, 12).is_err());
        assert!(format_float(f64::INFINITY, 12).is_err());
    }
}
