#![allow(dead_code)]

use id_arena::Id;
use serde_json::{json, Value};

use flow_api_translator::{
    analyze_scope, read_estree, write_estree, AstArena, Node, ScopeManager, TranslationError,
    TranslationOptions, TranslationResult, WriteOptions,
};

pub type Translate = fn(
    &AstArena,
    Id<Node>,
    &str,
    &ScopeManager,
    &TranslationOptions,
) -> Result<TranslationResult, TranslationError>;

/// A translated program written back out, with its diagnostic comments
/// attached.
pub struct Output {
    pub program: Value,
    pub comment_count: usize,
}

impl Output {
    pub fn body(&self) -> &[Value] {
        self.program["body"].as_array().map_or(&[], |body| body)
    }
}

pub fn translate(
    translate: Translate,
    program: &Value,
    options: &TranslationOptions,
) -> Result<Output, TranslationError> {
    let arena = AstArena::new();
    let program = read_estree(&arena, program).unwrap();
    let scope_manager = analyze_scope(&arena, program);
    let result = translate(&arena, program, "", &scope_manager, options)?;
    let program = write_estree(
        &arena,
        result.program,
        &WriteOptions {
            ranges: false,
            comments: &result.comments,
        },
    );
    Ok(Output {
        program,
        comment_count: result.comments.len(),
    })
}

pub fn recover() -> TranslationOptions {
    TranslationOptions {
        recover_from_errors: true,
        ..Default::default()
    }
}

/// Fills in every defaulted field of a hand-written ESTree value.
pub fn normalize(value: &Value) -> Value {
    let arena = AstArena::new();
    let node = read_estree(&arena, value).unwrap();
    write_estree(&arena, node, &WriteOptions::default())
}

/// Number of nodes under `value` carrying leading comments.
pub fn commented_nodes(value: &Value) -> usize {
    match value {
        Value::Object(object) => {
            let own = usize::from(object.contains_key("comments"));
            own + object.values().map(commented_nodes).sum::<usize>()
        }
        Value::Array(values) => values.iter().map(commented_nodes).sum(),
        _ => 0,
    }
}

/// The declared name of a top-level statement, looking through exports.
pub fn statement_name(statement: &Value) -> String {
    let declaration = match statement["type"].as_str() {
        Some("ExportNamedDeclaration" | "DeclareExportDeclaration") => &statement["declaration"],
        _ => statement,
    };
    match declaration["type"].as_str() {
        Some("ImportDeclaration") => format!(
            "import {}",
            declaration["specifiers"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|specifier| specifier["local"]["name"].as_str())
                .collect::<Vec<_>>()
                .join(",")
        ),
        _ => declaration["id"]["name"].as_str().unwrap_or_default().to_owned(),
    }
}

pub fn module(body: Vec<Value>) -> Value {
    json!({"type": "Program", "sourceType": "module", "body": body})
}

pub fn ident(name: &str) -> Value {
    json!({"type": "Identifier", "name": name})
}

pub fn keyword(type_: &str) -> Value {
    json!({ "type": type_ })
}

pub fn annotation(type_annotation: Value) -> Value {
    json!({"type": "TypeAnnotation", "typeAnnotation": type_annotation})
}

pub fn generic(name: &str) -> Value {
    json!({"type": "GenericTypeAnnotation", "id": ident(name)})
}

pub fn type_alias(name: &str, right: Value) -> Value {
    json!({"type": "TypeAlias", "id": ident(name), "right": right})
}

pub fn export_type(declaration: Value) -> Value {
    json!({
        "type": "ExportNamedDeclaration",
        "declaration": declaration,
        "exportKind": "type",
    })
}

pub fn object_type(properties: Vec<Value>) -> Value {
    json!({"type": "ObjectTypeAnnotation", "properties": properties})
}

pub fn property(name: &str, value: Value) -> Value {
    json!({
        "type": "ObjectTypeProperty",
        "key": ident(name),
        "value": value,
        "kind": "init",
    })
}

pub fn spread(name: &str) -> Value {
    json!({"type": "ObjectTypeSpreadProperty", "argument": generic(name)})
}

pub fn function_type(params: Vec<(&str, Value, bool)>, return_type: Value) -> Value {
    json!({
        "type": "FunctionTypeAnnotation",
        "params": params
            .into_iter()
            .map(|(name, type_annotation, optional)| json!({
                "type": "FunctionTypeParam",
                "name": ident(name),
                "typeAnnotation": type_annotation,
                "optional": optional,
            }))
            .collect::<Vec<_>>(),
        "returnType": return_type,
    })
}

pub fn string_literal_type(value: &str) -> Value {
    json!({
        "type": "StringLiteralTypeAnnotation",
        "value": value,
        "raw": format!("'{}'", value),
    })
}
