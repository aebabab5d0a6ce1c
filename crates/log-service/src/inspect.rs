//! Human-readable, depth-limited rendering of nested values

use serde_json::Value;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render `value` across multiple lines, replacing containers nested deeper
/// than `max_depth` with `[Object]` or `[Array]`.
///
/// The top-level value sits at depth 0, so `max_depth = 1` shows the top
/// level's children and their children's scalars.
pub(crate) fn render(value: &Value, max_depth: usize) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0, max_depth);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize, max_depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => {
            let _ = write!(out, "{b}");
        }
        Value::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Value::String(s) => write_quoted(out, s),
        Value::Array(items) => {
            if depth > max_depth {
                out.push_str("[Array]");
            } else if items.is_empty() {
                out.push_str("[]");
            } else {
                out.push_str("[\n");
                for (i, item) in items.iter().enumerate() {
                    push_indent(out, depth + 1);
                    write_value(out, item, depth + 1, max_depth);
                    push_separator(out, i + 1 < items.len());
                }
                push_indent(out, depth);
                out.push(']');
            }
        }
        Value::Object(map) => {
            if depth > max_depth {
                out.push_str("[Object]");
            } else if map.is_empty() {
                out.push_str("{}");
            } else {
                out.push_str("{\n");
                for (i, (key, item)) in map.iter().enumerate() {
                    push_indent(out, depth + 1);
                    write_key(out, key);
                    out.push_str(": ");
                    write_value(out, item, depth + 1, max_depth);
                    push_separator(out, i + 1 < map.len());
                }
                push_indent(out, depth);
                out.push('}');
            }
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn push_separator(out: &mut String, more: bool) {
    if more {
        out.push(',');
    }
    out.push('\n');
}

fn write_key(out: &mut String, key: &str) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        write_quoted(out, key);
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
