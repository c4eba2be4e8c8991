//! Block-style YAML emitter for [`Document`].
//!
//! Output uses two-space indentation, keeps key order and writes head
//! comments on their own line above the node they belong to.

use std::fmt::Write;

use serde_yaml::Value;

use super::{Document, Key, Node, NodeId, ScalarKind};

const INDENT: usize = 2;

pub(super) fn to_string(doc: &Document) -> String {
    let mut out = String::new();
    let root = doc.root();
    write_comment(doc, &mut out, root, 0);
    match doc.node(root) {
        Node::Mapping(entries) if !entries.is_empty() => write_entries(doc, &mut out, entries, 0),
        Node::Sequence(items) if !items.is_empty() => write_items(doc, &mut out, items, 0),
        _ => {
            out.push_str(&inline_value(doc, root));
            out.push('\n');
        }
    }
    if let Some(tail) = doc.tail_comment() {
        write_comment_lines(&mut out, tail, 0);
    }
    out
}

fn write_entries(doc: &Document, out: &mut String, entries: &[(Key, NodeId)], indent: usize) {
    for (key, value) in entries {
        write_comment(doc, out, *value, indent);
        let _ = write!(out, "{}{}:", pad(indent), key_text(key));

        match doc.node(*value) {
            Node::Mapping(nested) if !nested.is_empty() => {
                out.push('\n');
                write_entries(doc, out, nested, indent + INDENT);
            }
            Node::Sequence(nested) if !nested.is_empty() => {
                out.push('\n');
                write_items(doc, out, nested, indent + INDENT);
            }
            Node::Scalar {
                kind: ScalarKind::Null,
                ..
            } => out.push('\n'),
            _ => {
                let _ = writeln!(out, " {}", inline_value(doc, *value));
            }
        }
    }
}

fn write_items(doc: &Document, out: &mut String, items: &[NodeId], indent: usize) {
    for item in items {
        write_comment(doc, out, *item, indent);

        let mut block = String::new();
        match doc.node(*item) {
            Node::Mapping(nested) if !nested.is_empty() => {
                write_entries(doc, &mut block, nested, indent + INDENT);
            }
            Node::Sequence(nested) if !nested.is_empty() => {
                write_items(doc, &mut block, nested, indent + INDENT);
            }
            _ => {
                let _ = writeln!(out, "{}- {}", pad(indent), inline_value(doc, *item));
                continue;
            }
        }

        // The first line of the nested block moves up next to the dash.
        let _ = write!(out, "{}- ", pad(indent));
        out.push_str(&block[indent + INDENT..]);
    }
}

fn write_comment(doc: &Document, out: &mut String, id: NodeId, indent: usize) {
    if let Some(comment) = doc.comment(id) {
        write_comment_lines(out, comment, indent);
    }
}

fn write_comment_lines(out: &mut String, comment: &str, indent: usize) {
    for line in comment.lines() {
        if line.is_empty() {
            let _ = writeln!(out, "{}#", pad(indent));
        } else {
            let _ = writeln!(out, "{}# {}", pad(indent), line);
        }
    }
}

fn key_text(key: &Key) -> String {
    match key.kind {
        ScalarKind::Raw => key.text.clone(),
        ScalarKind::Null => "null".to_string(),
        ScalarKind::Str => quote_if_needed(&key.text),
    }
}

/// Scalars and empty collections, which fit on the line of their key.
fn inline_value(doc: &Document, id: NodeId) -> String {
    match doc.node(id) {
        Node::Mapping(_) => "{}".to_string(),
        Node::Sequence(_) => "[]".to_string(),
        Node::Scalar { value, kind } => match kind {
            ScalarKind::Null => "null".to_string(),
            ScalarKind::Raw => value.clone(),
            ScalarKind::Str => quote_if_needed(value),
        },
    }
}

fn pad(indent: usize) -> String {
    " ".repeat(indent)
}

fn quote_if_needed(s: &str) -> String {
    if needs_quotes(s) {
        let mut quoted = String::with_capacity(s.len() + 2);
        quoted.push('"');
        for c in s.chars() {
            match c {
                '"' => quoted.push_str("\\\""),
                '\\' => quoted.push_str("\\\\"),
                '\n' => quoted.push_str("\\n"),
                '\t' => quoted.push_str("\\t"),
                '\r' => quoted.push_str("\\r"),
                c => quoted.push(c),
            }
        }
        quoted.push('"');
        quoted
    } else {
        s.to_string()
    }
}

/// Whether a plain scalar would read back as something other than this exact string.
///
/// The parser decides for everything but structure; `yes`/`no` style words
/// are quoted as well so older YAML readers keep them as strings.
fn needs_quotes(s: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
        '`',
    ];
    const RESERVED: &[&str] = &[
        "~", "null", "true", "false", "yes", "no", "on", "off", "y", "n",
    ];

    let Some(first) = s.chars().next() else {
        return true;
    };

    INDICATORS.contains(&first)
        || s.trim() != s
        || s.ends_with(':')
        || s.contains(": ")
        || s.contains(" #")
        || s.contains(|c: char| c.is_control())
        || RESERVED.contains(&s.to_ascii_lowercase().as_str())
        || !reads_back_as_itself(s)
}

fn reads_back_as_itself(s: &str) -> bool {
    matches!(serde_yaml::from_str::<Value>(s), Ok(Value::String(parsed)) if parsed == s)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
