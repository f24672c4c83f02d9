use std::collections::HashMap;

use id_arena::Id;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{AstArena, BaseTextRange, HasArena, Node, NodeKind, ReadonlyTextRange, SyntaxKind};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EstreeError {
    #[error("Expected an ESTree node object, found {found}")]
    NotANode { found: String },
    #[error("Unknown ESTree node type \"{0}\"")]
    UnknownNodeType(String),
    #[error("{node_type}: missing required field \"{field}\"")]
    MissingField {
        node_type: &'static str,
        field: String,
    },
    #[error("{node_type}: field \"{field}\" must be {expected}")]
    InvalidField {
        node_type: &'static str,
        field: String,
        expected: &'static str,
    },
}

/// Maps a struct field name to its ESTree spelling: `type_parameters` is
/// `typeParameters`, and a trailing `_` (reserved words) is dropped.
pub fn estree_key(field_name: &str) -> String {
    let field_name = field_name.strip_suffix('_').unwrap_or(field_name);
    let mut key = String::with_capacity(field_name.len());
    let mut upper_next = false;
    for ch in field_name.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            key.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            key.push(ch);
        }
    }
    key
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommentKind {
    Block,
    Line,
}

impl CommentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CommentKind::Block => "Block",
            CommentKind::Line => "Line",
        }
    }
}

/// A comment attached leading to `node`.
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    pub kind: CommentKind,
    pub value: String,
    pub node: Id<Node>,
}

pub struct EstreeReader<'arena> {
    arena: &'arena AstArena,
}

impl<'arena> EstreeReader<'arena> {
    pub fn new(arena: &'arena AstArena) -> Self {
        Self { arena }
    }

    pub fn read_node(&mut self, value: &Value) -> Result<Id<Node>, EstreeError> {
        let object = value.as_object().ok_or_else(|| EstreeError::NotANode {
            found: describe_value(value),
        })?;
        let type_ = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| EstreeError::NotANode {
                found: describe_value(value),
            })?;
        let kind = SyntaxKind::from_str(type_)
            .ok_or_else(|| EstreeError::UnknownNodeType(type_.to_owned()))?;
        let data = NodeKind::read_estree(kind, object, self)?;
        Ok(self.arena.alloc_node(Node::new(data, read_range(object))))
    }
}

fn read_range(object: &Map<String, Value>) -> BaseTextRange {
    let offset = |value: Option<&Value>| value.and_then(Value::as_u64).map(|value| value as usize);
    if let Some(Value::Array(range)) = object.get("range") {
        if let (Some(pos), Some(end)) = (offset(range.first()), offset(range.get(1))) {
            return BaseTextRange::new(pos, end);
        }
    }
    match (offset(object.get("start")), offset(object.get("end"))) {
        (Some(pos), Some(end)) => BaseTextRange::new(pos, end),
        _ => Default::default(),
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(_) => "a boolean".to_owned(),
        Value::Number(_) => "a number".to_owned(),
        Value::String(_) => "a string".to_owned(),
        Value::Array(_) => "an array".to_owned(),
        Value::Object(_) => "an object without a \"type\"".to_owned(),
    }
}

#[derive(Clone, Debug, Default)]
pub struct WriteOptions<'a> {
    /// Emit `range: [start, end]` on every node.
    pub ranges: bool,
    /// Comments to attach as leading `comments` of their node.
    pub comments: &'a [Comment],
}

pub struct EstreeWriter<'a> {
    arena: &'a AstArena,
    ranges: bool,
    comments: HashMap<Id<Node>, Vec<&'a Comment>>,
}

impl<'a> EstreeWriter<'a> {
    pub fn new(arena: &'a AstArena, options: &WriteOptions<'a>) -> Self {
        let mut comments: HashMap<Id<Node>, Vec<&'a Comment>> = HashMap::new();
        for comment in options.comments {
            comments.entry(comment.node).or_default().push(comment);
        }
        Self {
            arena,
            ranges: options.ranges,
            comments,
        }
    }

    pub fn write_node(&self, node: Id<Node>) -> Value {
        let node_ref = self.arena.node(node);
        let mut object = Map::new();
        object.insert(
            "type".to_owned(),
            Value::String(node_ref.kind().as_str().to_owned()),
        );
        node_ref.data.write_estree(self, &mut object);
        if self.ranges {
            object.insert(
                "range".to_owned(),
                serde_json::json!([node_ref.pos(), node_ref.end()]),
            );
        }
        if let Some(comments) = self.comments.get(&node) {
            object.insert(
                "comments".to_owned(),
                Value::Array(
                    comments
                        .iter()
                        .map(|comment| {
                            serde_json::json!({
                                "type": comment.kind.as_str(),
                                "value": comment.value,
                            })
                        })
                        .collect(),
                ),
            );
        }
        Value::Object(object)
    }
}

pub fn read_estree(arena: &AstArena, value: &Value) -> Result<Id<Node>, EstreeError> {
    EstreeReader::new(arena).read_node(value)
}

pub fn write_estree(arena: &AstArena, node: Id<Node>, options: &WriteOptions) -> Value {
    EstreeWriter::new(arena, options).write_node(node)
}
