use std::cell::Cell;

use id_arena::Id;
use serde_json::{Map, Value};

use crate::{estree_key, Debug_, EstreeError, EstreeReader, EstreeWriter};

mod syntax;

pub use syntax::*;

pub trait ReadonlyTextRange {
    fn pos(&self) -> usize;
    fn end(&self) -> usize;
}

/// Byte offsets into the source text. Synthesized nodes carry the default
/// (`0..0`) range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BaseTextRange {
    pos: usize,
    end: usize,
}

impl BaseTextRange {
    pub fn new(pos: usize, end: usize) -> Self {
        Self { pos, end }
    }

    pub fn is_synthesized(&self) -> bool {
        self.pos == 0 && self.end == 0
    }
}

impl ReadonlyTextRange for BaseTextRange {
    fn pos(&self) -> usize {
        self.pos
    }

    fn end(&self) -> usize {
        self.end
    }
}

#[derive(Debug)]
pub struct Node {
    pub data: NodeKind,
    range: Cell<BaseTextRange>,
    parent: Cell<Option<Id<Node>>>,
}

impl Node {
    pub fn new(data: NodeKind, range: BaseTextRange) -> Self {
        Self {
            data,
            range: Cell::new(range),
            parent: Default::default(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind()
    }

    pub fn range(&self) -> BaseTextRange {
        self.range.get()
    }

    pub fn set_range(&self, range: BaseTextRange) {
        self.range.set(range);
    }

    pub fn maybe_parent(&self) -> Option<Id<Node>> {
        self.parent.get()
    }

    pub fn set_parent(&self, parent: Option<Id<Node>>) {
        self.parent.set(parent);
    }

    pub fn children(&self) -> Vec<Id<Node>> {
        let mut children = vec![];
        self.data.for_each_child(&mut |child| children.push(child));
        children
    }
}

impl ReadonlyTextRange for Node {
    fn pos(&self) -> usize {
        self.range().pos()
    }

    fn end(&self) -> usize {
        self.range().end()
    }
}

/// Location of one field while reading an ESTree object.
pub struct FieldRef<'value> {
    pub object: &'value Map<String, Value>,
    pub key: &'value str,
    pub node_type: SyntaxKind,
}

impl<'value> FieldRef<'value> {
    pub fn value(&self) -> Option<&'value Value> {
        self.object.get(self.key).filter(|value| !value.is_null())
    }

    pub fn missing(&self) -> EstreeError {
        EstreeError::MissingField {
            node_type: self.node_type.as_str(),
            field: self.key.to_owned(),
        }
    }

    pub fn invalid(&self, expected: &'static str) -> EstreeError {
        EstreeError::InvalidField {
            node_type: self.node_type.as_str(),
            field: self.key.to_owned(),
            expected,
        }
    }
}

/// Implemented by every field type of a node variant. Child-bearing fields
/// (`Id<Node>`, `Option<Id<Node>>`, `Vec<Id<Node>>`, `Vec<Option<Id<Node>>>`)
/// override the child hooks; scalar fields only read and write themselves.
pub trait NodeField: Sized {
    const IS_CHILD: bool = false;

    fn for_each_child(&self, _action: &mut dyn FnMut(Id<Node>)) {}

    fn replace_child(&mut self, _target: Id<Node>, _replacement: Option<Id<Node>>) -> bool {
        false
    }

    fn map_children(&mut self, _mapper: &mut dyn FnMut(Id<Node>) -> Id<Node>) {}

    fn read_field(field: FieldRef, reader: &mut EstreeReader) -> Result<Self, EstreeError>;

    fn to_estree(&self, writer: &EstreeWriter) -> Value;

    fn write_field(&self, key: &str, writer: &EstreeWriter, object: &mut Map<String, Value>) {
        object.insert(key.to_owned(), self.to_estree(writer));
    }
}

impl NodeField for Id<Node> {
    const IS_CHILD: bool = true;

    fn for_each_child(&self, action: &mut dyn FnMut(Id<Node>)) {
        action(*self);
    }

    fn replace_child(&mut self, target: Id<Node>, replacement: Option<Id<Node>>) -> bool {
        if *self != target {
            return false;
        }
        match replacement {
            Some(replacement) => *self = replacement,
            None => Debug_.fail(Some("Cannot remove a node held in a required field")),
        }
        true
    }

    fn map_children(&mut self, mapper: &mut dyn FnMut(Id<Node>) -> Id<Node>) {
        *self = mapper(*self);
    }

    fn read_field(field: FieldRef, reader: &mut EstreeReader) -> Result<Self, EstreeError> {
        match field.value() {
            Some(value) => reader.read_node(value),
            None => Err(field.missing()),
        }
    }

    fn to_estree(&self, writer: &EstreeWriter) -> Value {
        writer.write_node(*self)
    }
}

impl NodeField for Option<Id<Node>> {
    const IS_CHILD: bool = true;

    fn for_each_child(&self, action: &mut dyn FnMut(Id<Node>)) {
        if let Some(child) = *self {
            action(child);
        }
    }

    fn replace_child(&mut self, target: Id<Node>, replacement: Option<Id<Node>>) -> bool {
        if *self != Some(target) {
            return false;
        }
        *self = replacement;
        true
    }

    fn map_children(&mut self, mapper: &mut dyn FnMut(Id<Node>) -> Id<Node>) {
        if let Some(child) = self.as_mut() {
            *child = mapper(*child);
        }
    }

    fn read_field(field: FieldRef, reader: &mut EstreeReader) -> Result<Self, EstreeError> {
        field.value().map(|value| reader.read_node(value)).transpose()
    }

    fn to_estree(&self, writer: &EstreeWriter) -> Value {
        match *self {
            Some(child) => writer.write_node(child),
            None => Value::Null,
        }
    }
}

impl NodeField for Vec<Id<Node>> {
    const IS_CHILD: bool = true;

    fn for_each_child(&self, action: &mut dyn FnMut(Id<Node>)) {
        for &child in self {
            action(child);
        }
    }

    fn replace_child(&mut self, target: Id<Node>, replacement: Option<Id<Node>>) -> bool {
        let index = match self.iter().position(|&child| child == target) {
            Some(index) => index,
            None => return false,
        };
        match replacement {
            Some(replacement) => self[index] = replacement,
            None => {
                self.remove(index);
            }
        }
        true
    }

    fn map_children(&mut self, mapper: &mut dyn FnMut(Id<Node>) -> Id<Node>) {
        for child in self.iter_mut() {
            *child = mapper(*child);
        }
    }

    fn read_field(field: FieldRef, reader: &mut EstreeReader) -> Result<Self, EstreeError> {
        match field.value() {
            None => Ok(vec![]),
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| reader.read_node(value))
                .collect(),
            Some(_) => Err(field.invalid("an array of nodes")),
        }
    }

    fn to_estree(&self, writer: &EstreeWriter) -> Value {
        Value::Array(self.iter().map(|&child| writer.write_node(child)).collect())
    }
}

/// Arrays with holes (`[a, , b]`).
impl NodeField for Vec<Option<Id<Node>>> {
    const IS_CHILD: bool = true;

    fn for_each_child(&self, action: &mut dyn FnMut(Id<Node>)) {
        for child in self.iter().flatten() {
            action(*child);
        }
    }

    fn replace_child(&mut self, target: Id<Node>, replacement: Option<Id<Node>>) -> bool {
        let index = match self.iter().position(|&child| child == Some(target)) {
            Some(index) => index,
            None => return false,
        };
        match replacement {
            Some(replacement) => self[index] = Some(replacement),
            None => {
                self.remove(index);
            }
        }
        true
    }

    fn map_children(&mut self, mapper: &mut dyn FnMut(Id<Node>) -> Id<Node>) {
        for child in self.iter_mut().flatten() {
            *child = mapper(*child);
        }
    }

    fn read_field(field: FieldRef, reader: &mut EstreeReader) -> Result<Self, EstreeError> {
        match field.value() {
            None => Ok(vec![]),
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| {
                    if value.is_null() {
                        Ok(None)
                    } else {
                        reader.read_node(value).map(Some)
                    }
                })
                .collect(),
            Some(_) => Err(field.invalid("an array of nodes")),
        }
    }

    fn to_estree(&self, writer: &EstreeWriter) -> Value {
        Value::Array(
            self.iter()
                .map(|child| match *child {
                    Some(child) => writer.write_node(child),
                    None => Value::Null,
                })
                .collect(),
        )
    }
}

impl NodeField for String {
    fn read_field(field: FieldRef, _reader: &mut EstreeReader) -> Result<Self, EstreeError> {
        match field.value() {
            None => Ok(String::new()),
            Some(Value::String(value)) => Ok(value.clone()),
            Some(_) => Err(field.invalid("a string")),
        }
    }

    fn to_estree(&self, _writer: &EstreeWriter) -> Value {
        Value::String(self.clone())
    }
}

impl NodeField for Option<String> {
    fn read_field(field: FieldRef, _reader: &mut EstreeReader) -> Result<Self, EstreeError> {
        match field.value() {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(_) => Err(field.invalid("a string")),
        }
    }

    fn to_estree(&self, _writer: &EstreeWriter) -> Value {
        match self {
            Some(value) => Value::String(value.clone()),
            None => Value::Null,
        }
    }
}

impl NodeField for bool {
    fn read_field(field: FieldRef, _reader: &mut EstreeReader) -> Result<Self, EstreeError> {
        match field.value() {
            None => Ok(false),
            Some(Value::Bool(value)) => Ok(*value),
            Some(_) => Err(field.invalid("a boolean")),
        }
    }

    fn to_estree(&self, _writer: &EstreeWriter) -> Value {
        Value::Bool(*self)
    }
}

impl NodeField for f64 {
    fn read_field(field: FieldRef, _reader: &mut EstreeReader) -> Result<Self, EstreeError> {
        match field.value() {
            None => Ok(0.0),
            Some(Value::Number(value)) => value.as_f64().ok_or_else(|| field.invalid("a number")),
            Some(_) => Err(field.invalid("a number")),
        }
    }

    fn to_estree(&self, _writer: &EstreeWriter) -> Value {
        number_to_estree(*self)
    }
}

pub(crate) fn number_to_estree(value: f64) -> Value {
    if value.fract() == 0.0 && value.is_finite() && value.abs() < 9007199254740992.0 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// The value of a `Literal` node. Regular expressions and bigints are
/// spelled through the sibling `regex`/`bigint` ESTree fields.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    RegExp { pattern: String, flags: String },
    BigInt(String),
}

impl LiteralValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            LiteralValue::Null => "null",
            LiteralValue::Boolean(_) => "boolean",
            LiteralValue::Number(_) => "numeric",
            LiteralValue::String(_) => "string",
            LiteralValue::RegExp { .. } => "regexp",
            LiteralValue::BigInt(_) => "bigint",
        }
    }
}

impl NodeField for LiteralValue {
    fn read_field(field: FieldRef, _reader: &mut EstreeReader) -> Result<Self, EstreeError> {
        if let Some(Value::Object(regex)) = field.object.get("regex") {
            let part = |name: &str| {
                regex
                    .get(name)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned()
            };
            return Ok(LiteralValue::RegExp {
                pattern: part("pattern"),
                flags: part("flags"),
            });
        }
        if let Some(Value::String(bigint)) = field.object.get("bigint") {
            return Ok(LiteralValue::BigInt(bigint.clone()));
        }
        Ok(match field.value() {
            None => LiteralValue::Null,
            Some(Value::Bool(value)) => LiteralValue::Boolean(*value),
            Some(Value::Number(value)) => {
                LiteralValue::Number(value.as_f64().ok_or_else(|| field.invalid("a number"))?)
            }
            Some(Value::String(value)) => LiteralValue::String(value.clone()),
            Some(_) => return Err(field.invalid("a literal value")),
        })
    }

    fn to_estree(&self, _writer: &EstreeWriter) -> Value {
        match self {
            LiteralValue::Null | LiteralValue::RegExp { .. } | LiteralValue::BigInt(_) => {
                Value::Null
            }
            LiteralValue::Boolean(value) => Value::Bool(*value),
            LiteralValue::Number(value) => number_to_estree(*value),
            LiteralValue::String(value) => Value::String(value.clone()),
        }
    }

    fn write_field(&self, key: &str, writer: &EstreeWriter, object: &mut Map<String, Value>) {
        object.insert(key.to_owned(), self.to_estree(writer));
        match self {
            LiteralValue::RegExp { pattern, flags } => {
                object.insert(
                    "regex".to_owned(),
                    serde_json::json!({ "pattern": pattern, "flags": flags }),
                );
            }
            LiteralValue::BigInt(bigint) => {
                object.insert("bigint".to_owned(), Value::String(bigint.clone()));
            }
            _ => (),
        }
    }
}

/// `TemplateElement.value`, spelled `{raw, cooked}`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateElementValue {
    pub raw: String,
    pub cooked: Option<String>,
}

impl NodeField for TemplateElementValue {
    fn read_field(field: FieldRef, _reader: &mut EstreeReader) -> Result<Self, EstreeError> {
        match field.value() {
            None => Ok(Default::default()),
            Some(Value::Object(value)) => Ok(Self {
                raw: value
                    .get("raw")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned(),
                cooked: value.get("cooked").and_then(Value::as_str).map(str::to_owned),
            }),
            Some(_) => Err(field.invalid("a template element value")),
        }
    }

    fn to_estree(&self, _writer: &EstreeWriter) -> Value {
        serde_json::json!({ "raw": self.raw, "cooked": self.cooked })
    }
}

/// `TSMappedType.readonly`/`optional`: `true`, `'+'` or `'-'`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MappedTypeModifier {
    True,
    Plus,
    Minus,
}

impl NodeField for Option<MappedTypeModifier> {
    fn read_field(field: FieldRef, _reader: &mut EstreeReader) -> Result<Self, EstreeError> {
        match field.value() {
            None | Some(Value::Bool(false)) => Ok(None),
            Some(Value::Bool(true)) => Ok(Some(MappedTypeModifier::True)),
            Some(Value::String(value)) if value == "+" => Ok(Some(MappedTypeModifier::Plus)),
            Some(Value::String(value)) if value == "-" => Ok(Some(MappedTypeModifier::Minus)),
            Some(_) => Err(field.invalid("true, '+' or '-'")),
        }
    }

    fn to_estree(&self, _writer: &EstreeWriter) -> Value {
        match self {
            None => Value::Bool(false),
            Some(MappedTypeModifier::True) => Value::Bool(true),
            Some(MappedTypeModifier::Plus) => Value::String("+".to_owned()),
            Some(MappedTypeModifier::Minus) => Value::String("-".to_owned()),
        }
    }
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $first:ident => $first_text:literal
            $(, $variant:ident => $text:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $first,
            $($variant,)*
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $name::$first => $first_text,
                    $($name::$variant => $text,)*
                }
            }

            pub fn from_str(text: &str) -> Option<Self> {
                match text {
                    $first_text => Some($name::$first),
                    $($text => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$first
            }
        }

        impl NodeField for $name {
            fn read_field(field: FieldRef, _reader: &mut EstreeReader) -> Result<Self, EstreeError> {
                match field.value() {
                    None => Ok(Default::default()),
                    Some(Value::String(text)) => {
                        $name::from_str(text).ok_or_else(|| field.invalid(stringify!($name)))
                    }
                    Some(_) => Err(field.invalid(stringify!($name))),
                }
            }

            fn to_estree(&self, _writer: &EstreeWriter) -> Value {
                Value::String(self.as_str().to_owned())
            }
        }

        impl NodeField for Option<$name> {
            fn read_field(field: FieldRef, _reader: &mut EstreeReader) -> Result<Self, EstreeError> {
                match field.value() {
                    None => Ok(None),
                    Some(Value::String(text)) => $name::from_str(text)
                        .map(Some)
                        .ok_or_else(|| field.invalid(stringify!($name))),
                    Some(_) => Err(field.invalid(stringify!($name))),
                }
            }

            fn to_estree(&self, _writer: &EstreeWriter) -> Value {
                match self {
                    Some(value) => Value::String(value.as_str().to_owned()),
                    None => Value::Null,
                }
            }
        }
    };
}

string_enum! {
    pub enum SourceType {
        Module => "module",
        Script => "script",
    }
}

string_enum! {
    pub enum ImportKind {
        Value => "value",
        Type => "type",
        Typeof => "typeof",
    }
}

string_enum! {
    pub enum ExportKind {
        Value => "value",
        Type => "type",
    }
}

string_enum! {
    pub enum VariableKind {
        Var => "var",
        Let => "let",
        Const => "const",
    }
}

string_enum! {
    pub enum PropertyKind {
        Init => "init",
        Get => "get",
        Set => "set",
    }
}

string_enum! {
    pub enum MethodKind {
        Method => "method",
        Constructor => "constructor",
        Get => "get",
        Set => "set",
    }
}

string_enum! {
    pub enum VarianceKind {
        Plus => "plus",
        Minus => "minus",
    }
}

string_enum! {
    pub enum TypePredicateKind {
        Asserts => "asserts",
        Implies => "implies",
    }
}

string_enum! {
    pub enum MappedTypeOptionality {
        PlusOptional => "PlusOptional",
        MinusOptional => "MinusOptional",
        Optional => "Optional",
    }
}

/// Reads `object[key]` for one generated struct field.
pub(crate) fn read_node_field<TField: NodeField>(
    object: &Map<String, Value>,
    field_name: &'static str,
    node_type: SyntaxKind,
    reader: &mut EstreeReader,
) -> Result<TField, EstreeError> {
    let key = estree_key(field_name);
    TField::read_field(
        FieldRef {
            object,
            key: &key,
            node_type,
        },
        reader,
    )
}
