use id_arena::Id;
use serde_json::{json, Value};

use crate::{
    analyze_scope, read_estree, write_estree, AstArena, Node, ScopeManager, TranslationOptions,
    TranslationResult, TranslationError, WriteOptions,
};

pub(crate) struct Fixture {
    pub arena: AstArena,
    pub program: Id<Node>,
    pub scope_manager: ScopeManager,
}

pub(crate) fn fixture(program: Value) -> Fixture {
    let arena = AstArena::new();
    let program = read_estree(&arena, &program).unwrap();
    let scope_manager = analyze_scope(&arena, program);
    Fixture {
        arena,
        program,
        scope_manager,
    }
}

impl Fixture {
    pub fn run(
        &self,
        translate: fn(
            &AstArena,
            Id<Node>,
            &str,
            &ScopeManager,
            &TranslationOptions,
        ) -> Result<TranslationResult, TranslationError>,
        options: &TranslationOptions,
    ) -> Result<TranslationResult, TranslationError> {
        translate(&self.arena, self.program, "", &self.scope_manager, options)
    }

    pub fn dump(&self, node: Id<Node>) -> Value {
        dump(&self.arena, node)
    }

    /// The output program's statements.
    pub fn body(&self, result: &TranslationResult) -> Vec<Value> {
        match self.dump(result.program) {
            Value::Object(mut program) => match program.remove("body") {
                Some(Value::Array(body)) => body,
                _ => vec![],
            },
            _ => vec![],
        }
    }
}

pub(crate) fn dump(arena: &AstArena, node: Id<Node>) -> Value {
    write_estree(arena, node, &WriteOptions::default())
}

/// Fills in every defaulted field of a hand-written ESTree value.
pub(crate) fn normalize(value: Value) -> Value {
    let arena = AstArena::new();
    let node = read_estree(&arena, &value).unwrap();
    dump(&arena, node)
}

pub(crate) fn module(body: Vec<Value>) -> Value {
    json!({"type": "Program", "sourceType": "module", "body": body})
}

pub(crate) fn ident(name: &str) -> Value {
    json!({"type": "Identifier", "name": name})
}

pub(crate) fn typed_ident(name: &str, type_annotation: Value) -> Value {
    json!({
        "type": "Identifier",
        "name": name,
        "typeAnnotation": annotation(type_annotation),
    })
}

pub(crate) fn annotation(type_annotation: Value) -> Value {
    json!({"type": "TypeAnnotation", "typeAnnotation": type_annotation})
}

pub(crate) fn ts_annotation(type_annotation: Value) -> Value {
    json!({"type": "TSTypeAnnotation", "typeAnnotation": type_annotation})
}

pub(crate) fn keyword(type_: &str) -> Value {
    json!({ "type": type_ })
}

pub(crate) fn generic(name: &str, type_parameters: Option<Vec<Value>>) -> Value {
    json!({
        "type": "GenericTypeAnnotation",
        "id": ident(name),
        "typeParameters": type_parameters.map(|params| json!({
            "type": "TypeParameterInstantiation",
            "params": params,
        })),
    })
}

pub(crate) fn ts_reference(name: &str, type_parameters: Option<Vec<Value>>) -> Value {
    json!({
        "type": "TSTypeReference",
        "typeName": ident(name),
        "typeParameters": type_parameters.map(|params| json!({
            "type": "TSTypeParameterInstantiation",
            "params": params,
        })),
    })
}

pub(crate) fn type_alias(name: &str, right: Value) -> Value {
    json!({"type": "TypeAlias", "id": ident(name), "right": right})
}

pub(crate) fn export_named(declaration: Value) -> Value {
    json!({
        "type": "ExportNamedDeclaration",
        "declaration": declaration,
        "exportKind": "type",
    })
}

pub(crate) fn string_literal(value: &str) -> Value {
    json!({"type": "Literal", "value": value, "raw": format!("'{}'", value)})
}

pub(crate) fn import_named(local: &str, source: &str, import_kind: &str) -> Value {
    json!({
        "type": "ImportDeclaration",
        "importKind": import_kind,
        "source": string_literal(source),
        "specifiers": [{
            "type": "ImportSpecifier",
            "imported": ident(local),
            "local": ident(local),
        }],
    })
}

pub(crate) fn import_default(local: &str, source: &str) -> Value {
    json!({
        "type": "ImportDeclaration",
        "importKind": "value",
        "source": string_literal(source),
        "specifiers": [{"type": "ImportDefaultSpecifier", "local": ident(local)}],
    })
}

pub(crate) fn object_type(properties: Vec<Value>) -> Value {
    json!({"type": "ObjectTypeAnnotation", "properties": properties})
}

pub(crate) fn object_type_property(name: &str, value: Value) -> Value {
    json!({
        "type": "ObjectTypeProperty",
        "key": ident(name),
        "value": value,
        "kind": "init",
    })
}

pub(crate) fn recover() -> TranslationOptions {
    TranslationOptions {
        recover_from_errors: true,
        ..Default::default()
    }
}
