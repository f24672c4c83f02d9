mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::*;
use flow_api_translator::{
    for_each_descendant, node_with, read_estree, transform, write_estree, AstArena, HasArena,
    InArena, NodeFactory, NodeKind, SyntaxKind, VisitResult, WriteOptions,
};

fn sample_module() -> serde_json::Value {
    module(vec![
        type_alias(
            "A",
            object_type(vec![
                property("a", keyword("StringTypeAnnotation")),
                property("b", json!({
                    "type": "UnionTypeAnnotation",
                    "types": [keyword("StringTypeAnnotation"), generic("B")],
                })),
            ]),
        ),
        export_type(type_alias(
            "C",
            function_type(vec![("x", keyword("StringTypeAnnotation"), true)], generic("A")),
        )),
    ])
}

#[test]
fn test_node_with_current_values_is_the_same_node_everywhere() {
    let arena = AstArena::new();
    let program = read_estree(&arena, &sample_module()).unwrap();
    let mut nodes = vec![];
    for_each_descendant(&arena, program, &mut |node| nodes.push(node));
    let allocated = arena.len();
    for node in nodes {
        assert_eq!(node_with(&arena, node, |_| {}), node);
    }
    assert_eq!(arena.len(), allocated);
}

#[test]
fn test_node_with_a_change_leaves_the_original_untouched() {
    let arena = AstArena::new();
    let program = read_estree(&arena, &sample_module()).unwrap();
    let before = write_estree(&arena, program, &WriteOptions::default());
    let updated = node_with(&arena, program, |data| {
        if let NodeKind::Program(program) = data {
            program.body.truncate(1);
        }
    });
    assert_ne!(updated, program);
    assert_eq!(write_estree(&arena, program, &WriteOptions::default()), before);
    let after = write_estree(&arena, updated, &WriteOptions::default());
    assert_eq!(after["body"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_transform_replaces_and_removes_in_place() {
    let arena = AstArena::new();
    let factory = NodeFactory::new(&arena);
    let program = read_estree(&arena, &sample_module()).unwrap();
    let result = transform(&arena, program, |node| match arena.kind_of(node) {
        SyntaxKind::StringTypeAnnotation => {
            VisitResult::Replace(factory.create_keyword(SyntaxKind::NumberTypeAnnotation))
        }
        SyntaxKind::ExportNamedDeclaration => VisitResult::Remove,
        _ => VisitResult::Keep,
    });
    assert_eq!(result, Some(program));
    let written = write_estree(&arena, program, &WriteOptions::default());
    assert_eq!(
        written,
        normalize(&module(vec![type_alias(
            "A",
            object_type(vec![
                property("a", keyword("NumberTypeAnnotation")),
                property("b", json!({
                    "type": "UnionTypeAnnotation",
                    "types": [keyword("NumberTypeAnnotation"), generic("B")],
                })),
            ]),
        )])),
    );
}

#[test]
fn test_replacements_are_reparented() {
    let arena = AstArena::new();
    let factory = NodeFactory::new(&arena);
    let program = read_estree(&arena, &sample_module()).unwrap();
    let mut replacements = vec![];
    transform(&arena, program, |node| {
        if node.ref_(&arena).kind() == SyntaxKind::GenericTypeAnnotation {
            let replacement = factory.create_keyword(SyntaxKind::AnyTypeAnnotation);
            replacements.push(replacement);
            return VisitResult::Replace(replacement);
        }
        VisitResult::Keep
    });
    assert_eq!(replacements.len(), 2);
    for replacement in replacements {
        let parent = replacement.ref_(&arena).maybe_parent().unwrap();
        assert!(parent.ref_(&arena).children().contains(&replacement));
    }
}

#[test]
fn test_visitor_keys_name_the_child_fields() {
    assert_eq!(
        SyntaxKind::TypeAlias.visitor_keys(),
        &["id".to_owned(), "typeParameters".to_owned(), "right".to_owned()][..]
    );
    assert!(SyntaxKind::AnyTypeAnnotation.visitor_keys().is_empty());
}
