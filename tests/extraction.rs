mod common;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::*;
use flow_api_translator::flow_to_flow_def;

fn extract(body: Vec<Value>) -> Vec<Value> {
    translate(flow_to_flow_def, &module(body), &Default::default())
        .unwrap()
        .body()
        .to_vec()
}

fn names(body: &[Value]) -> Vec<String> {
    body.iter().map(statement_name).collect()
}

fn import_type(names: &[&str], source: &str) -> Value {
    json!({
        "type": "ImportDeclaration",
        "importKind": "type",
        "source": {"type": "Literal", "value": source, "raw": format!("'{}'", source)},
        "specifiers": names
            .iter()
            .map(|name| json!({"type": "ImportSpecifier", "imported": ident(name), "local": ident(name)}))
            .collect::<Vec<_>>(),
    })
}

#[test]
fn test_dependency_chain_is_kept_and_unused_types_dropped() {
    let body = extract(vec![
        type_alias("Foo", keyword("StringTypeAnnotation")),
        type_alias("Bar", generic("Foo")),
        type_alias("Baz", generic("Bar")),
        type_alias("Unused", keyword("StringTypeAnnotation")),
        export_type(type_alias("Boo", generic("Baz"))),
    ]);
    assert_eq!(names(&body), vec!["Foo", "Bar", "Baz", "Boo"]);
}

#[test]
fn test_only_the_closure_of_the_exports_is_retained() {
    let exported_function = json!({
        "type": "ExportNamedDeclaration",
        "exportKind": "value",
        "declaration": {
            "type": "FunctionDeclaration",
            "id": ident("f"),
            "params": [{
                "type": "Identifier",
                "name": "x",
                "typeAnnotation": annotation(generic("C")),
            }],
            "returnType": annotation(generic("B")),
            "body": {"type": "BlockStatement", "body": []},
        },
    });
    let body = extract(vec![
        import_type(&["A"], "a"),
        type_alias(
            "B",
            json!({"type": "UnionTypeAnnotation", "types": [generic("A"), generic("C")]}),
        ),
        type_alias("C", keyword("StringTypeAnnotation")),
        type_alias("Unused", keyword("NumberTypeAnnotation")),
        json!({
            "type": "VariableDeclaration",
            "kind": "const",
            "declarations": [{
                "type": "VariableDeclarator",
                "id": ident("value"),
                "init": {"type": "Literal", "value": 1, "raw": "1"},
            }],
        }),
        export_type(type_alias("D", generic("B"))),
        exported_function,
    ]);
    assert_eq!(names(&body), vec!["import A", "B", "C", "D", "f"]);
    assert_eq!(body[4]["type"], json!("DeclareExportDeclaration"));
    assert_eq!(body[4]["declaration"]["type"], json!("DeclareFunction"));
}

#[test]
fn test_unused_import_specifiers_are_pruned() {
    let body = extract(vec![
        import_type(&["Foo", "Bar"], "M"),
        export_type(type_alias("Baz", generic("Foo"))),
    ]);
    assert_eq!(body[0], normalize(&import_type(&["Foo"], "M")));
    assert_eq!(names(&body), vec!["import Foo", "Baz"]);
}

#[test]
fn test_shadowing_type_parameter_does_not_pull_in_the_outer_type() {
    let generic_alias = json!({
        "type": "TypeAlias",
        "id": ident("F"),
        "typeParameters": {
            "type": "TypeParameterDeclaration",
            "params": [{"type": "TypeParameter", "name": "T"}],
        },
        "right": object_type(vec![
            property("x", generic("T")),
            property("y", generic("U")),
        ]),
    });
    let body = extract(vec![
        type_alias("T", keyword("NumberTypeAnnotation")),
        type_alias("U", keyword("StringTypeAnnotation")),
        export_type(generic_alias),
    ]);
    assert_eq!(names(&body), vec!["U", "F"]);
}

#[test]
fn test_module_without_exports_is_empty() {
    let body = extract(vec![
        type_alias("A", keyword("StringTypeAnnotation")),
        import_type(&["B"], "b"),
    ]);
    assert_eq!(body, Vec::<Value>::new());
}
