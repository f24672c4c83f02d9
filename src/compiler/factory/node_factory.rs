use id_arena::Id;

use crate::{
    AnyTypeAnnotation, AstArena, BaseTextRange, BigIntTypeAnnotation, BooleanTypeAnnotation,
    Debug_, EmptyTypeAnnotation, GenericTypeAnnotation, HasArena, Identifier, LiteralValue,
    Literal, MixedTypeAnnotation, Node, NodeKind, NullLiteralTypeAnnotation,
    NumberLiteralTypeAnnotation, NumberTypeAnnotation, QualifiedTypeIdentifier,
    StringLiteralTypeAnnotation, StringTypeAnnotation, SymbolTypeAnnotation, SyntaxKind,
    TSAnyKeyword, TSBigIntKeyword, TSBooleanKeyword, TSIntrinsicKeyword, TSLiteralType,
    TSNeverKeyword, TSNullKeyword, TSNumberKeyword, TSObjectKeyword, TSQualifiedName,
    TSStringKeyword, TSSymbolKeyword, TSThisType, TSTypeAnnotation, TSTypeParameterInstantiation,
    TSTypeReference, TSUndefinedKeyword, TSUnionType, TSUnknownKeyword, TSVoidKeyword,
    ThisTypeAnnotation, TypeAnnotation, TypeParameterInstantiation, UnionTypeAnnotation,
    VoidTypeAnnotation,
};

/// Creates synthesized nodes. Every node it creates carries the dummy
/// (`0..0`) range unless a range is given explicitly.
pub struct NodeFactory<'arena> {
    arena: &'arena AstArena,
}

impl<'arena> NodeFactory<'arena> {
    pub fn new(arena: &'arena AstArena) -> Self {
        Self { arena }
    }

    pub fn create(&self, data: impl Into<NodeKind>) -> Id<Node> {
        self.create_with_range(data, BaseTextRange::default())
    }

    pub fn create_with_range(&self, data: impl Into<NodeKind>, range: BaseTextRange) -> Id<Node> {
        self.arena.alloc_node(Node::new(data.into(), range))
    }

    pub fn create_identifier(&self, name: &str) -> Id<Node> {
        self.create(Identifier {
            name: name.to_owned(),
            type_annotation: None,
            optional: false,
        })
    }

    pub fn create_identifier_with_annotation(
        &self,
        name: &str,
        type_annotation: Option<Id<Node>>,
        optional: bool,
    ) -> Id<Node> {
        self.create(Identifier {
            name: name.to_owned(),
            type_annotation,
            optional,
        })
    }

    pub fn create_string_literal(&self, value: &str) -> Id<Node> {
        self.create(Literal {
            value: LiteralValue::String(value.to_owned()),
            raw: Some(quote_string(value)),
        })
    }

    pub fn create_number_literal(&self, value: f64) -> Id<Node> {
        self.create(Literal {
            value: LiteralValue::Number(value),
            raw: Some(value.to_string()),
        })
    }

    pub fn create_boolean_literal(&self, value: bool) -> Id<Node> {
        self.create(Literal {
            value: LiteralValue::Boolean(value),
            raw: Some(value.to_string()),
        })
    }

    /// Keyword type nodes of either type system, by kind.
    pub fn create_keyword(&self, kind: SyntaxKind) -> Id<Node> {
        let data: NodeKind = match kind {
            SyntaxKind::AnyTypeAnnotation => AnyTypeAnnotation {}.into(),
            SyntaxKind::MixedTypeAnnotation => MixedTypeAnnotation {}.into(),
            SyntaxKind::EmptyTypeAnnotation => EmptyTypeAnnotation {}.into(),
            SyntaxKind::VoidTypeAnnotation => VoidTypeAnnotation {}.into(),
            SyntaxKind::NullLiteralTypeAnnotation => NullLiteralTypeAnnotation {}.into(),
            SyntaxKind::NumberTypeAnnotation => NumberTypeAnnotation {}.into(),
            SyntaxKind::StringTypeAnnotation => StringTypeAnnotation {}.into(),
            SyntaxKind::BooleanTypeAnnotation => BooleanTypeAnnotation {}.into(),
            SyntaxKind::BigIntTypeAnnotation => BigIntTypeAnnotation {}.into(),
            SyntaxKind::SymbolTypeAnnotation => SymbolTypeAnnotation {}.into(),
            SyntaxKind::ThisTypeAnnotation => ThisTypeAnnotation {}.into(),
            SyntaxKind::TSAnyKeyword => TSAnyKeyword {}.into(),
            SyntaxKind::TSUnknownKeyword => TSUnknownKeyword {}.into(),
            SyntaxKind::TSNeverKeyword => TSNeverKeyword {}.into(),
            SyntaxKind::TSVoidKeyword => TSVoidKeyword {}.into(),
            SyntaxKind::TSUndefinedKeyword => TSUndefinedKeyword {}.into(),
            SyntaxKind::TSNullKeyword => TSNullKeyword {}.into(),
            SyntaxKind::TSNumberKeyword => TSNumberKeyword {}.into(),
            SyntaxKind::TSStringKeyword => TSStringKeyword {}.into(),
            SyntaxKind::TSBooleanKeyword => TSBooleanKeyword {}.into(),
            SyntaxKind::TSBigIntKeyword => TSBigIntKeyword {}.into(),
            SyntaxKind::TSSymbolKeyword => TSSymbolKeyword {}.into(),
            SyntaxKind::TSObjectKeyword => TSObjectKeyword {}.into(),
            SyntaxKind::TSIntrinsicKeyword => TSIntrinsicKeyword {}.into(),
            SyntaxKind::TSThisType => TSThisType {}.into(),
            _ => Debug_.fail_bad_syntax_kind(kind, Some("Not a keyword type.")),
        };
        self.create(data)
    }

    pub fn create_type_annotation(&self, type_annotation: Id<Node>) -> Id<Node> {
        self.create(TypeAnnotation { type_annotation })
    }

    /// `Name<params>`, or `A.B.C<params>` for a dotted name.
    pub fn create_generic_type_annotation(
        &self,
        name: &str,
        type_parameters: Option<Vec<Id<Node>>>,
    ) -> Id<Node> {
        let mut segments = name.split('.');
        let mut id = self.create_identifier(segments.next().unwrap_or_default());
        for segment in segments {
            let segment = self.create_identifier(segment);
            id = self.create(QualifiedTypeIdentifier {
                qualification: id,
                id: segment,
            });
        }
        let type_parameters = type_parameters
            .map(|params| self.create(TypeParameterInstantiation { params }));
        self.create(GenericTypeAnnotation {
            id,
            type_parameters,
        })
    }

    pub fn create_union_type_annotation(&self, types: Vec<Id<Node>>) -> Id<Node> {
        self.create(UnionTypeAnnotation { types })
    }

    pub fn create_string_literal_type_annotation(&self, value: &str) -> Id<Node> {
        self.create(StringLiteralTypeAnnotation {
            value: value.to_owned(),
            raw: quote_string(value),
        })
    }

    pub fn create_number_literal_type_annotation(&self, value: f64) -> Id<Node> {
        self.create(NumberLiteralTypeAnnotation {
            value,
            raw: value.to_string(),
        })
    }

    pub fn create_ts_type_annotation(&self, type_annotation: Id<Node>) -> Id<Node> {
        self.create(TSTypeAnnotation { type_annotation })
    }

    /// An entity name: `A`, or a left-nested `TSQualifiedName` chain for `A.B.C`.
    pub fn create_ts_entity_name(&self, name: &str) -> Id<Node> {
        let mut segments = name.split('.');
        let mut entity_name = self.create_identifier(segments.next().unwrap_or_default());
        for segment in segments {
            let right = self.create_identifier(segment);
            entity_name = self.create(TSQualifiedName {
                left: entity_name,
                right,
            });
        }
        entity_name
    }

    pub fn create_ts_type_reference(
        &self,
        name: &str,
        type_parameters: Option<Vec<Id<Node>>>,
    ) -> Id<Node> {
        let type_name = self.create_ts_entity_name(name);
        self.create_ts_type_reference_to(type_name, type_parameters)
    }

    pub fn create_ts_type_reference_to(
        &self,
        type_name: Id<Node>,
        type_parameters: Option<Vec<Id<Node>>>,
    ) -> Id<Node> {
        let type_parameters = type_parameters
            .map(|params| self.create(TSTypeParameterInstantiation { params }));
        self.create(TSTypeReference {
            type_name,
            type_parameters,
        })
    }

    pub fn create_ts_union_type(&self, types: Vec<Id<Node>>) -> Id<Node> {
        self.create(TSUnionType { types })
    }

    pub fn create_ts_string_literal_type(&self, value: &str) -> Id<Node> {
        let literal = self.create_string_literal(value);
        self.create(TSLiteralType { literal })
    }
}

impl HasArena for NodeFactory<'_> {
    fn arena(&self) -> &AstArena {
        self.arena
    }
}

pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
