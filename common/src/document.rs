//! # Zone Document Tree
//!
//! An ordered YAML tree the repair passes read from and write to.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed through
//! [`NodeId`] handles. A handle is a plain index: it can be copied into a
//! probe job and sent to another task without borrowing the tree, and it
//! only becomes meaningful again when handed back to the document.
//!
//! Every node can carry one head comment. The emitter writes it as `# ...`
//! right above the node, which is how disabled entries show up in the
//! output. Comments of the source are recovered at load time, see
//! [`comments`].

use std::path::Path;

use serde_yaml::Value;

use crate::error::ZoneError;

mod comments;
mod emit;

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// How a scalar was written, so it survives a load/emit cycle with the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// A string. Quoted on output whenever it would otherwise read back as something else.
    Str,
    /// Numbers and booleans, written back verbatim.
    Raw,
    Null,
}

/// A mapping key and the way it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub text: String,
    pub kind: ScalarKind,
}

impl Key {
    pub fn str(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ScalarKind::Str,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Vec<(Key, NodeId)>),
    Sequence(Vec<NodeId>),
    Scalar { value: String, kind: ScalarKind },
}

#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    root: NodeId,
    /// Comment lines after the last node.
    tail: Option<String>,
}

impl Document {
    pub fn load(path: &Path) -> Result<Self, ZoneError> {
        let text = std::fs::read_to_string(path).map_err(|source| ZoneError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parses a zone description. The top level must be a mapping.
    pub fn from_yaml_str(text: &str) -> Result<Self, ZoneError> {
        let value: Value = serde_yaml::from_str(text)?;
        if !value.is_mapping() {
            return Err(ZoneError::malformed("top level is not a mapping"));
        }

        let mut doc = Self {
            slots: Vec::new(),
            root: NodeId(0),
            tail: None,
        };
        doc.root = doc.import(value)?;
        comments::attach(&mut doc, text);
        Ok(doc)
    }

    pub fn to_yaml_string(&self) -> String {
        emit::to_string(self)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.slots[id.0].node
    }

    /// Value stored under `key` if `mapping` is a mapping that has it.
    pub fn get(&self, mapping: NodeId, key: &str) -> Option<NodeId> {
        self.entries(mapping)?
            .iter()
            .find(|(k, _)| k.text == key)
            .map(|(_, v)| *v)
    }

    pub fn entries(&self, mapping: NodeId) -> Option<&[(Key, NodeId)]> {
        match self.node(mapping) {
            Node::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn items(&self, sequence: NodeId) -> Option<&[NodeId]> {
        match self.node(sequence) {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn scalar(&self, id: NodeId) -> Option<&str> {
        match self.node(id) {
            Node::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Scalar text under `key`, or `""` when the key is missing or not a scalar.
    pub fn str_value(&self, mapping: NodeId, key: &str) -> &str {
        self.get(mapping, key)
            .and_then(|id| self.scalar(id))
            .unwrap_or("")
    }

    pub fn comment(&self, id: NodeId) -> Option<&str> {
        self.slots[id.0].comment.as_deref()
    }

    /// Comment lines that follow the last node of the source.
    pub fn tail_comment(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    /// Attaches a head comment to `id`, replacing any previous one.
    pub fn set_comment(&mut self, id: NodeId, text: impl Into<String>) {
        self.slots[id.0].comment = Some(text.into());
    }

    pub fn new_string(&mut self, value: impl Into<String>) -> NodeId {
        self.insert(Node::Scalar {
            value: value.into(),
            kind: ScalarKind::Str,
        })
    }

    /// Builds a mapping of string scalars, keeping the given key order.
    pub fn new_string_mapping(&mut self, pairs: &[(&str, &str)]) -> NodeId {
        let entries = pairs
            .iter()
            .map(|(key, value)| (Key::str(*key), self.new_string(*value)))
            .collect();
        self.insert(Node::Mapping(entries))
    }

    /// Appends `item` to the end of `sequence`.
    pub fn push(&mut self, sequence: NodeId, item: NodeId) -> Result<(), ZoneError> {
        match &mut self.slots[sequence.0].node {
            Node::Sequence(items) => {
                items.push(item);
                Ok(())
            }
            _ => Err(ZoneError::malformed("cannot append to a node that is not a sequence")),
        }
    }

    fn insert(&mut self, node: Node) -> NodeId {
        self.slots.push(Slot { node, comment: None });
        NodeId(self.slots.len() - 1)
    }

    fn import(&mut self, value: Value) -> Result<NodeId, ZoneError> {
        let node = match value {
            Value::Null => Node::Scalar {
                value: String::new(),
                kind: ScalarKind::Null,
            },
            Value::Bool(b) => Node::Scalar {
                value: b.to_string(),
                kind: ScalarKind::Raw,
            },
            Value::Number(n) => Node::Scalar {
                value: n.to_string(),
                kind: ScalarKind::Raw,
            },
            Value::String(s) => Node::Scalar {
                value: s,
                kind: ScalarKind::Str,
            },
            Value::Sequence(values) => {
                let items = values
                    .into_iter()
                    .map(|v| self.import(v))
                    .collect::<Result<Vec<_>, _>>()?;
                Node::Sequence(items)
            }
            Value::Mapping(mapping) => {
                let mut entries = Vec::with_capacity(mapping.len());
                for (key, value) in mapping {
                    let key = scalar_key(key)?;
                    entries.push((key, self.import(value)?));
                }
                Node::Mapping(entries)
            }
            Value::Tagged(tagged) => {
                return Err(ZoneError::malformed(format!(
                    "unsupported YAML tag '{}'",
                    tagged.tag
                )));
            }
        };
        Ok(self.insert(node))
    }
}

fn scalar_key(key: Value) -> Result<Key, ZoneError> {
    let (text, kind) = match key {
        Value::String(s) => (s, ScalarKind::Str),
        Value::Number(n) => (n.to_string(), ScalarKind::Raw),
        Value::Bool(b) => (b.to_string(), ScalarKind::Raw),
        Value::Null => (String::new(), ScalarKind::Null),
        other => return Err(ZoneError::malformed(format!(
            "mapping keys must be scalars, found {other:?}"
        ))),
    };
    Ok(Key { text, kind })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
