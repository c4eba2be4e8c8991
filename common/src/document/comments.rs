//! Recovers the comments of a zone source.
//!
//! The YAML parser drops comments, so they are matched back onto the tree
//! afterwards. The tree is flattened into the places where a block node
//! starts a line (a mapping key or a sequence dash) in document order, and
//! the source is walked line by line next to that list. A run of `#` lines
//! becomes the head comment of the first node started by the next content
//! line. Comments above the first node belong to the root, comments after
//! the last one become the tail of the document.
//!
//! Trailing comments (`key: value # note`) are not recovered.

use super::{Document, Key, Node, NodeId};

enum Anchor<'a> {
    /// A sequence item, started by `-`.
    Item(NodeId),
    /// A mapping entry. The comment belongs to the value node.
    Key(&'a Key, NodeId),
}

impl Anchor<'_> {
    fn node(&self) -> NodeId {
        match self {
            Anchor::Item(id) | Anchor::Key(_, id) => *id,
        }
    }
}

struct Recovered {
    heads: Vec<(NodeId, String)>,
    tail: Option<String>,
}

pub(super) fn attach(doc: &mut Document, source: &str) {
    let recovered = recover(doc, source);
    for (node, text) in recovered.heads {
        doc.set_comment(node, text);
    }
    doc.tail = recovered.tail;
}

fn recover(doc: &Document, source: &str) -> Recovered {
    let mut anchors = Vec::new();
    flatten(doc, doc.root(), &mut anchors);

    let mut heads = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut cursor = 0;
    let mut seen_content = false;
    // Indentation of the line that opened a `|` or `>` block scalar.
    let mut block_scalar: Option<usize> = None;

    for line in source.lines() {
        let content = line.trim_start();
        let indent = line.len() - content.len();

        if let Some(opened_at) = block_scalar {
            if content.is_empty() || indent > opened_at {
                continue;
            }
            block_scalar = None;
        }

        if content.is_empty() || is_directive(content) {
            continue;
        }
        if let Some(text) = content.strip_prefix('#') {
            pending.push(text.strip_prefix(' ').unwrap_or(text));
            continue;
        }

        let matched = (cursor..anchors.len())
            .find_map(|start| cover(&anchors, start, content).map(|(end, rest)| (start, end, rest)));

        if let Some((start, end, rest)) = matched {
            if !pending.is_empty() {
                let node = if seen_content {
                    anchors[start].node()
                } else {
                    doc.root()
                };
                heads.push((node, pending.join("\n")));
                pending.clear();
            }
            if rest.starts_with('|') || rest.starts_with('>') {
                block_scalar = Some(indent);
            }
            cursor = end;
        }
        seen_content = true;
    }

    let tail = (!pending.is_empty()).then(|| pending.join("\n"));
    Recovered { heads, tail }
}

fn flatten<'a>(doc: &'a Document, id: NodeId, anchors: &mut Vec<Anchor<'a>>) {
    match doc.node(id) {
        Node::Mapping(entries) => {
            for (key, value) in entries {
                anchors.push(Anchor::Key(key, *value));
                flatten(doc, *value, anchors);
            }
        }
        Node::Sequence(items) => {
            for item in items {
                anchors.push(Anchor::Item(*item));
                flatten(doc, *item, anchors);
            }
        }
        Node::Scalar { .. } => {}
    }
}

/// Matches one content line against the anchors from `start` on.
///
/// Returns the index after the last anchor the line starts and the text
/// after the last key, or `None` if the line does not start `anchors[start]`.
fn cover<'s>(anchors: &[Anchor<'_>], start: usize, content: &'s str) -> Option<(usize, &'s str)> {
    let mut at = start;
    let mut rest = content;

    while let Some(anchor) = anchors.get(at) {
        let next = match anchor {
            Anchor::Item(_) => strip_dash(rest),
            Anchor::Key(key, _) => strip_key(rest, &key.text),
        };
        let Some(next) = next else {
            break;
        };
        at += 1;
        rest = next;

        // A block value starts on a later line; an inline one ends this line.
        if matches!(anchor, Anchor::Key(..)) {
            break;
        }
    }

    (at > start).then_some((at, rest))
}

fn strip_dash(s: &str) -> Option<&str> {
    if s == "-" {
        return Some("");
    }
    s.strip_prefix("- ")
        .or_else(|| s.strip_prefix("-\t"))
        .map(str::trim_start)
}

fn strip_key<'s>(s: &'s str, key: &str) -> Option<&'s str> {
    let after = s
        .strip_prefix(key)
        .or_else(|| quoted(s, key, '"'))
        .or_else(|| quoted(s, key, '\''))?;

    let rest = after.trim_start().strip_prefix(':')?;
    if rest.is_empty() || rest.starts_with([' ', '\t']) {
        Some(rest.trim_start())
    } else {
        None
    }
}

fn quoted<'s>(s: &'s str, key: &str, quote: char) -> Option<&'s str> {
    s.strip_prefix(quote)?.strip_prefix(key)?.strip_prefix(quote)
}

fn is_directive(content: &str) -> bool {
    content.starts_with("---") || content.starts_with("...") || content.starts_with('%')
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
