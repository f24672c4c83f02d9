use std::collections::HashMap;

use id_arena::Id;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use super::{
    read_node_field, ExportKind, ImportKind, LiteralValue, MappedTypeModifier,
    MappedTypeOptionality, MethodKind, Node, NodeField, PropertyKind, SourceType,
    TemplateElementValue, TypePredicateKind, VariableKind, VarianceKind,
};
use crate::{estree_key, EstreeError, EstreeReader, EstreeWriter};

/// Generates, from one table, the closed set of node variants: the
/// `SyntaxKind` tag enum, one struct per variant, the `NodeKind` sum type and
/// the per-variant child traversal, replacement and ESTree (de)serialization.
/// Field order is visitor-key order.
macro_rules! declare_nodes {
    ($(
        $kind:ident {
            $($field:ident : $field_type:ty),* $(,)?
        }
    )*) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum SyntaxKind {
            $($kind,)*
        }

        impl SyntaxKind {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(SyntaxKind::$kind => stringify!($kind),)*
                }
            }

            pub fn from_str(text: &str) -> Option<Self> {
                match text {
                    $(stringify!($kind) => Some(SyntaxKind::$kind),)*
                    _ => None,
                }
            }

            pub fn all() -> &'static [SyntaxKind] {
                &[$(SyntaxKind::$kind,)*]
            }

            fn child_field_names(self) -> Vec<&'static str> {
                match self {
                    $(SyntaxKind::$kind => {
                        #[allow(unused_mut)]
                        let mut names: Vec<&'static str> = vec![];
                        $(
                            if <$field_type as NodeField>::IS_CHILD {
                                names.push(stringify!($field));
                            }
                        )*
                        names
                    })*
                }
            }
        }

        $(
            #[derive(Clone, Debug, PartialEq)]
            pub struct $kind {
                $(pub $field: $field_type,)*
            }

            impl From<$kind> for NodeKind {
                fn from(value: $kind) -> Self {
                    NodeKind::$kind(value)
                }
            }
        )*

        #[derive(Clone, Debug, PartialEq)]
        pub enum NodeKind {
            $($kind($kind),)*
        }

        impl NodeKind {
            pub fn kind(&self) -> SyntaxKind {
                match self {
                    $(NodeKind::$kind(_) => SyntaxKind::$kind,)*
                }
            }

            #[allow(unused_variables)]
            pub fn for_each_child(&self, action: &mut dyn FnMut(Id<Node>)) {
                match self {
                    $(NodeKind::$kind(node) => {
                        $(node.$field.for_each_child(action);)*
                    })*
                }
            }

            /// Replaces (or removes, for `None`) the child `target` found by
            /// identity in one of this node's child fields.
            #[allow(unused_variables)]
            pub fn replace_child(
                &mut self,
                target: Id<Node>,
                replacement: Option<Id<Node>>,
            ) -> bool {
                match self {
                    $(NodeKind::$kind(node) => {
                        $(
                            if node.$field.replace_child(target, replacement) {
                                return true;
                            }
                        )*
                        false
                    })*
                }
            }

            #[allow(unused_variables)]
            pub fn map_children(&mut self, mapper: &mut dyn FnMut(Id<Node>) -> Id<Node>) {
                match self {
                    $(NodeKind::$kind(node) => {
                        $(node.$field.map_children(mapper);)*
                    })*
                }
            }

            #[allow(unused_variables)]
            pub(crate) fn read_estree(
                kind: SyntaxKind,
                object: &Map<String, Value>,
                reader: &mut EstreeReader,
            ) -> Result<Self, EstreeError> {
                Ok(match kind {
                    $(SyntaxKind::$kind => NodeKind::$kind($kind {
                        $(
                            $field: read_node_field::<$field_type>(
                                object,
                                stringify!($field),
                                kind,
                                reader,
                            )?,
                        )*
                    }),)*
                })
            }

            #[allow(unused_variables)]
            pub(crate) fn write_estree(&self, writer: &EstreeWriter, object: &mut Map<String, Value>) {
                match self {
                    $(NodeKind::$kind(node) => {
                        $(node.$field.write_field(&estree_key(stringify!($field)), writer, object);)*
                    })*
                }
            }
        }
    };
}

static VISITOR_KEYS: Lazy<HashMap<SyntaxKind, Vec<String>>> = Lazy::new(|| {
    SyntaxKind::all()
        .iter()
        .map(|&kind| {
            (
                kind,
                kind.child_field_names()
                    .into_iter()
                    .map(estree_key)
                    .collect(),
            )
        })
        .collect()
});

impl SyntaxKind {
    /// The ordered ESTree names of this variant's child-bearing fields.
    pub fn visitor_keys(self) -> &'static [String] {
        &VISITOR_KEYS[&self]
    }

    pub fn is_flow_type_annotation(self) -> bool {
        matches!(
            self,
            SyntaxKind::AnyTypeAnnotation
                | SyntaxKind::ArrayTypeAnnotation
                | SyntaxKind::BigIntLiteralTypeAnnotation
                | SyntaxKind::BigIntTypeAnnotation
                | SyntaxKind::BooleanLiteralTypeAnnotation
                | SyntaxKind::BooleanTypeAnnotation
                | SyntaxKind::ConditionalTypeAnnotation
                | SyntaxKind::EmptyTypeAnnotation
                | SyntaxKind::ExistsTypeAnnotation
                | SyntaxKind::FunctionTypeAnnotation
                | SyntaxKind::GenericTypeAnnotation
                | SyntaxKind::IndexedAccessType
                | SyntaxKind::InferTypeAnnotation
                | SyntaxKind::InterfaceTypeAnnotation
                | SyntaxKind::IntersectionTypeAnnotation
                | SyntaxKind::KeyofTypeAnnotation
                | SyntaxKind::MixedTypeAnnotation
                | SyntaxKind::NullLiteralTypeAnnotation
                | SyntaxKind::NullableTypeAnnotation
                | SyntaxKind::NumberLiteralTypeAnnotation
                | SyntaxKind::NumberTypeAnnotation
                | SyntaxKind::ObjectTypeAnnotation
                | SyntaxKind::OptionalIndexedAccessType
                | SyntaxKind::StringLiteralTypeAnnotation
                | SyntaxKind::StringTypeAnnotation
                | SyntaxKind::SymbolTypeAnnotation
                | SyntaxKind::ThisTypeAnnotation
                | SyntaxKind::TupleTypeAnnotation
                | SyntaxKind::TypeofTypeAnnotation
                | SyntaxKind::TypePredicate
                | SyntaxKind::UnionTypeAnnotation
                | SyntaxKind::VoidTypeAnnotation
        )
    }
}

declare_nodes! {
    Program {
        body: Vec<Id<Node>>,
        source_type: SourceType,
        docblock: Option<String>,
    }
    Identifier {
        name: String,
        type_annotation: Option<Id<Node>>,
        optional: bool,
    }
    PrivateIdentifier {
        name: String,
    }
    Literal {
        value: LiteralValue,
        raw: Option<String>,
    }
    TemplateLiteral {
        quasis: Vec<Id<Node>>,
        expressions: Vec<Id<Node>>,
    }
    TemplateElement {
        value: TemplateElementValue,
        tail: bool,
    }
    TaggedTemplateExpression {
        tag: Id<Node>,
        type_arguments: Option<Id<Node>>,
        quasi: Id<Node>,
    }

    // Statements
    ExpressionStatement {
        expression: Id<Node>,
        directive: Option<String>,
    }
    BlockStatement {
        body: Vec<Id<Node>>,
    }
    StaticBlock {
        body: Vec<Id<Node>>,
    }
    EmptyStatement {}
    DebuggerStatement {}
    WithStatement {
        object: Id<Node>,
        body: Id<Node>,
    }
    ReturnStatement {
        argument: Option<Id<Node>>,
    }
    LabeledStatement {
        label: Id<Node>,
        body: Id<Node>,
    }
    BreakStatement {
        label: Option<Id<Node>>,
    }
    ContinueStatement {
        label: Option<Id<Node>>,
    }
    IfStatement {
        test: Id<Node>,
        consequent: Id<Node>,
        alternate: Option<Id<Node>>,
    }
    SwitchStatement {
        discriminant: Id<Node>,
        cases: Vec<Id<Node>>,
    }
    SwitchCase {
        test: Option<Id<Node>>,
        consequent: Vec<Id<Node>>,
    }
    ThrowStatement {
        argument: Id<Node>,
    }
    TryStatement {
        block: Id<Node>,
        handler: Option<Id<Node>>,
        finalizer: Option<Id<Node>>,
    }
    CatchClause {
        param: Option<Id<Node>>,
        body: Id<Node>,
    }
    WhileStatement {
        test: Id<Node>,
        body: Id<Node>,
    }
    DoWhileStatement {
        body: Id<Node>,
        test: Id<Node>,
    }
    ForStatement {
        init: Option<Id<Node>>,
        test: Option<Id<Node>>,
        update: Option<Id<Node>>,
        body: Id<Node>,
    }
    ForInStatement {
        left: Id<Node>,
        right: Id<Node>,
        body: Id<Node>,
    }
    ForOfStatement {
        left: Id<Node>,
        right: Id<Node>,
        body: Id<Node>,
        await_: bool,
    }
    VariableDeclaration {
        kind: VariableKind,
        declarations: Vec<Id<Node>>,
        declare: bool,
    }
    VariableDeclarator {
        id: Id<Node>,
        init: Option<Id<Node>>,
    }
    FunctionDeclaration {
        id: Option<Id<Node>>,
        type_parameters: Option<Id<Node>>,
        params: Vec<Id<Node>>,
        return_type: Option<Id<Node>>,
        predicate: Option<Id<Node>>,
        body: Id<Node>,
        async_: bool,
        generator: bool,
    }
    ClassDeclaration {
        id: Option<Id<Node>>,
        type_parameters: Option<Id<Node>>,
        super_class: Option<Id<Node>>,
        super_type_parameters: Option<Id<Node>>,
        implements: Vec<Id<Node>>,
        decorators: Vec<Id<Node>>,
        body: Id<Node>,
        declare: bool,
    }

    // Expressions
    ThisExpression {}
    Super {}
    ArrayExpression {
        elements: Vec<Option<Id<Node>>>,
    }
    ObjectExpression {
        properties: Vec<Id<Node>>,
    }
    Property {
        key: Id<Node>,
        value: Id<Node>,
        kind: PropertyKind,
        method: bool,
        shorthand: bool,
        computed: bool,
    }
    SpreadElement {
        argument: Id<Node>,
    }
    FunctionExpression {
        id: Option<Id<Node>>,
        type_parameters: Option<Id<Node>>,
        params: Vec<Id<Node>>,
        return_type: Option<Id<Node>>,
        predicate: Option<Id<Node>>,
        body: Id<Node>,
        async_: bool,
        generator: bool,
    }
    ArrowFunctionExpression {
        type_parameters: Option<Id<Node>>,
        params: Vec<Id<Node>>,
        return_type: Option<Id<Node>>,
        predicate: Option<Id<Node>>,
        body: Id<Node>,
        async_: bool,
        expression: bool,
    }
    ClassExpression {
        id: Option<Id<Node>>,
        type_parameters: Option<Id<Node>>,
        super_class: Option<Id<Node>>,
        super_type_parameters: Option<Id<Node>>,
        implements: Vec<Id<Node>>,
        decorators: Vec<Id<Node>>,
        body: Id<Node>,
    }
    UnaryExpression {
        operator: String,
        argument: Id<Node>,
        prefix: bool,
    }
    UpdateExpression {
        operator: String,
        argument: Id<Node>,
        prefix: bool,
    }
    BinaryExpression {
        left: Id<Node>,
        operator: String,
        right: Id<Node>,
    }
    LogicalExpression {
        left: Id<Node>,
        operator: String,
        right: Id<Node>,
    }
    AssignmentExpression {
        left: Id<Node>,
        operator: String,
        right: Id<Node>,
    }
    ConditionalExpression {
        test: Id<Node>,
        consequent: Id<Node>,
        alternate: Id<Node>,
    }
    CallExpression {
        callee: Id<Node>,
        type_arguments: Option<Id<Node>>,
        arguments: Vec<Id<Node>>,
        optional: bool,
    }
    OptionalCallExpression {
        callee: Id<Node>,
        type_arguments: Option<Id<Node>>,
        arguments: Vec<Id<Node>>,
        optional: bool,
    }
    NewExpression {
        callee: Id<Node>,
        type_arguments: Option<Id<Node>>,
        arguments: Vec<Id<Node>>,
    }
    MemberExpression {
        object: Id<Node>,
        property: Id<Node>,
        computed: bool,
        optional: bool,
    }
    OptionalMemberExpression {
        object: Id<Node>,
        property: Id<Node>,
        computed: bool,
        optional: bool,
    }
    ChainExpression {
        expression: Id<Node>,
    }
    SequenceExpression {
        expressions: Vec<Id<Node>>,
    }
    AwaitExpression {
        argument: Id<Node>,
    }
    YieldExpression {
        argument: Option<Id<Node>>,
        delegate: bool,
    }
    ImportExpression {
        source: Id<Node>,
        attributes: Option<Id<Node>>,
    }
    MetaProperty {
        meta: Id<Node>,
        property: Id<Node>,
    }
    TypeCastExpression {
        expression: Id<Node>,
        type_annotation: Id<Node>,
    }
    AsExpression {
        expression: Id<Node>,
        type_annotation: Id<Node>,
    }
    AsConstExpression {
        expression: Id<Node>,
    }

    // JSX
    JSXElement {
        opening_element: Id<Node>,
        children: Vec<Id<Node>>,
        closing_element: Option<Id<Node>>,
    }
    JSXFragment {
        opening_fragment: Id<Node>,
        children: Vec<Id<Node>>,
        closing_fragment: Id<Node>,
    }
    JSXOpeningElement {
        name: Id<Node>,
        type_arguments: Option<Id<Node>>,
        attributes: Vec<Id<Node>>,
        self_closing: bool,
    }
    JSXClosingElement {
        name: Id<Node>,
    }
    JSXOpeningFragment {}
    JSXClosingFragment {}
    JSXAttribute {
        name: Id<Node>,
        value: Option<Id<Node>>,
    }
    JSXSpreadAttribute {
        argument: Id<Node>,
    }
    JSXIdentifier {
        name: String,
    }
    JSXMemberExpression {
        object: Id<Node>,
        property: Id<Node>,
    }
    JSXNamespacedName {
        namespace: Id<Node>,
        name: Id<Node>,
    }
    JSXExpressionContainer {
        expression: Id<Node>,
    }
    JSXEmptyExpression {}
    JSXSpreadChild {
        expression: Id<Node>,
    }
    JSXText {
        value: String,
        raw: String,
    }

    // Patterns
    ObjectPattern {
        properties: Vec<Id<Node>>,
        type_annotation: Option<Id<Node>>,
    }
    ArrayPattern {
        elements: Vec<Option<Id<Node>>>,
        type_annotation: Option<Id<Node>>,
    }
    RestElement {
        argument: Id<Node>,
        type_annotation: Option<Id<Node>>,
    }
    AssignmentPattern {
        left: Id<Node>,
        right: Id<Node>,
    }

    // Classes
    ClassBody {
        body: Vec<Id<Node>>,
    }
    MethodDefinition {
        key: Id<Node>,
        value: Id<Node>,
        kind: MethodKind,
        static_: bool,
        computed: bool,
    }
    PropertyDefinition {
        key: Id<Node>,
        value: Option<Id<Node>>,
        type_annotation: Option<Id<Node>>,
        variance: Option<Id<Node>>,
        static_: bool,
        computed: bool,
        declare: bool,
        optional: bool,
        readonly: bool,
    }
    ClassImplements {
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
    }
    Decorator {
        expression: Id<Node>,
    }

    // Modules
    ImportDeclaration {
        specifiers: Vec<Id<Node>>,
        source: Id<Node>,
        import_kind: ImportKind,
        assertions: Vec<Id<Node>>,
    }
    ImportSpecifier {
        imported: Id<Node>,
        local: Id<Node>,
        import_kind: Option<ImportKind>,
    }
    ImportDefaultSpecifier {
        local: Id<Node>,
    }
    ImportNamespaceSpecifier {
        local: Id<Node>,
    }
    ImportAttribute {
        key: Id<Node>,
        value: Id<Node>,
    }
    ExportNamedDeclaration {
        declaration: Option<Id<Node>>,
        specifiers: Vec<Id<Node>>,
        source: Option<Id<Node>>,
        export_kind: ExportKind,
    }
    ExportSpecifier {
        local: Id<Node>,
        exported: Id<Node>,
    }
    ExportNamespaceSpecifier {
        exported: Id<Node>,
    }
    ExportDefaultDeclaration {
        declaration: Id<Node>,
    }
    ExportAllDeclaration {
        exported: Option<Id<Node>>,
        source: Id<Node>,
        export_kind: ExportKind,
    }

    // Flow type annotations
    TypeAnnotation {
        type_annotation: Id<Node>,
    }
    AnyTypeAnnotation {}
    MixedTypeAnnotation {}
    EmptyTypeAnnotation {}
    VoidTypeAnnotation {}
    NullLiteralTypeAnnotation {}
    SymbolTypeAnnotation {}
    NumberTypeAnnotation {}
    StringTypeAnnotation {}
    BooleanTypeAnnotation {}
    BigIntTypeAnnotation {}
    ExistsTypeAnnotation {}
    ThisTypeAnnotation {}
    NumberLiteralTypeAnnotation {
        value: f64,
        raw: String,
    }
    StringLiteralTypeAnnotation {
        value: String,
        raw: String,
    }
    BooleanLiteralTypeAnnotation {
        value: bool,
        raw: String,
    }
    BigIntLiteralTypeAnnotation {
        raw: String,
    }
    NullableTypeAnnotation {
        type_annotation: Id<Node>,
    }
    ArrayTypeAnnotation {
        element_type: Id<Node>,
    }
    TupleTypeAnnotation {
        types: Vec<Id<Node>>,
        inexact: bool,
    }
    TupleTypeLabeledElement {
        label: Id<Node>,
        element_type: Id<Node>,
        variance: Option<Id<Node>>,
        optional: bool,
    }
    TupleTypeSpreadElement {
        label: Option<Id<Node>>,
        type_annotation: Id<Node>,
    }
    FunctionTypeAnnotation {
        type_parameters: Option<Id<Node>>,
        this: Option<Id<Node>>,
        params: Vec<Id<Node>>,
        rest: Option<Id<Node>>,
        return_type: Id<Node>,
    }
    FunctionTypeParam {
        name: Option<Id<Node>>,
        type_annotation: Id<Node>,
        optional: bool,
    }
    GenericTypeAnnotation {
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
    }
    QualifiedTypeIdentifier {
        qualification: Id<Node>,
        id: Id<Node>,
    }
    TypeofTypeAnnotation {
        argument: Id<Node>,
        type_arguments: Option<Id<Node>>,
    }
    QualifiedTypeofIdentifier {
        qualification: Id<Node>,
        id: Id<Node>,
    }
    UnionTypeAnnotation {
        types: Vec<Id<Node>>,
    }
    IntersectionTypeAnnotation {
        types: Vec<Id<Node>>,
    }
    ObjectTypeAnnotation {
        properties: Vec<Id<Node>>,
        indexers: Vec<Id<Node>>,
        call_properties: Vec<Id<Node>>,
        internal_slots: Vec<Id<Node>>,
        exact: bool,
        inexact: bool,
    }
    ObjectTypeProperty {
        key: Id<Node>,
        value: Id<Node>,
        variance: Option<Id<Node>>,
        method: bool,
        optional: bool,
        static_: bool,
        proto: bool,
        kind: PropertyKind,
    }
    ObjectTypeSpreadProperty {
        argument: Id<Node>,
    }
    ObjectTypeIndexer {
        id: Option<Id<Node>>,
        key: Id<Node>,
        value: Id<Node>,
        variance: Option<Id<Node>>,
        static_: bool,
    }
    ObjectTypeCallProperty {
        value: Id<Node>,
        static_: bool,
    }
    ObjectTypeInternalSlot {
        id: Id<Node>,
        value: Id<Node>,
        optional: bool,
        static_: bool,
        method: bool,
    }
    ObjectTypeMappedTypeProperty {
        key_tparam: Id<Node>,
        prop_type: Id<Node>,
        source_type: Id<Node>,
        variance: Option<Id<Node>>,
        optional: Option<MappedTypeOptionality>,
    }
    IndexedAccessType {
        object_type: Id<Node>,
        index_type: Id<Node>,
    }
    OptionalIndexedAccessType {
        object_type: Id<Node>,
        index_type: Id<Node>,
        optional: bool,
    }
    KeyofTypeAnnotation {
        argument: Id<Node>,
    }
    InterfaceTypeAnnotation {
        extends: Vec<Id<Node>>,
        body: Id<Node>,
    }
    InterfaceExtends {
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
    }
    TypeParameterDeclaration {
        params: Vec<Id<Node>>,
    }
    TypeParameter {
        name: String,
        bound: Option<Id<Node>>,
        variance: Option<Id<Node>>,
        default_: Option<Id<Node>>,
        uses_extends_bound: bool,
    }
    TypeParameterInstantiation {
        params: Vec<Id<Node>>,
    }
    Variance {
        kind: VarianceKind,
    }
    TypePredicate {
        parameter_name: Id<Node>,
        type_annotation: Option<Id<Node>>,
        kind: Option<TypePredicateKind>,
    }
    ConditionalTypeAnnotation {
        check_type: Id<Node>,
        extends_type: Id<Node>,
        true_type: Id<Node>,
        false_type: Id<Node>,
    }
    InferTypeAnnotation {
        type_parameter: Id<Node>,
    }

    // Flow declarations
    TypeAlias {
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
        right: Id<Node>,
    }
    OpaqueType {
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
        impltype: Id<Node>,
        supertype: Option<Id<Node>>,
    }
    InterfaceDeclaration {
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
        extends: Vec<Id<Node>>,
        body: Id<Node>,
    }
    DeclareTypeAlias {
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
        right: Id<Node>,
    }
    DeclareOpaqueType {
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
        impltype: Option<Id<Node>>,
        supertype: Option<Id<Node>>,
    }
    DeclareInterface {
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
        extends: Vec<Id<Node>>,
        body: Id<Node>,
    }
    DeclareClass {
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
        extends: Vec<Id<Node>>,
        implements: Vec<Id<Node>>,
        mixins: Vec<Id<Node>>,
        body: Id<Node>,
    }
    DeclareFunction {
        id: Id<Node>,
        predicate: Option<Id<Node>>,
    }
    DeclareVariable {
        id: Id<Node>,
        kind: VariableKind,
    }
    DeclareEnum {
        id: Id<Node>,
        body: Id<Node>,
    }
    DeclareModule {
        id: Id<Node>,
        body: Id<Node>,
    }
    DeclareNamespace {
        id: Id<Node>,
        body: Id<Node>,
    }
    DeclareModuleExports {
        type_annotation: Id<Node>,
    }
    DeclareExportDeclaration {
        declaration: Option<Id<Node>>,
        specifiers: Vec<Id<Node>>,
        source: Option<Id<Node>>,
        default_: bool,
    }
    DeclareExportAllDeclaration {
        source: Id<Node>,
    }
    DeclaredPredicate {
        value: Id<Node>,
    }
    InferredPredicate {}
    EnumDeclaration {
        id: Id<Node>,
        body: Id<Node>,
    }
    EnumNumberBody {
        members: Vec<Id<Node>>,
        explicit_type: bool,
        has_unknown_members: bool,
    }
    EnumStringBody {
        members: Vec<Id<Node>>,
        explicit_type: bool,
        has_unknown_members: bool,
    }
    EnumBooleanBody {
        members: Vec<Id<Node>>,
        explicit_type: bool,
        has_unknown_members: bool,
    }
    EnumBigIntBody {
        members: Vec<Id<Node>>,
        explicit_type: bool,
        has_unknown_members: bool,
    }
    EnumSymbolBody {
        members: Vec<Id<Node>>,
        has_unknown_members: bool,
    }
    EnumNumberMember {
        id: Id<Node>,
        init: Id<Node>,
    }
    EnumStringMember {
        id: Id<Node>,
        init: Id<Node>,
    }
    EnumBooleanMember {
        id: Id<Node>,
        init: Id<Node>,
    }
    EnumBigIntMember {
        id: Id<Node>,
        init: Id<Node>,
    }
    EnumDefaultedMember {
        id: Id<Node>,
    }

    // TypeScript type annotations
    TSTypeAnnotation {
        type_annotation: Id<Node>,
    }
    TSAnyKeyword {}
    TSUnknownKeyword {}
    TSNeverKeyword {}
    TSVoidKeyword {}
    TSUndefinedKeyword {}
    TSNullKeyword {}
    TSNumberKeyword {}
    TSStringKeyword {}
    TSBooleanKeyword {}
    TSBigIntKeyword {}
    TSSymbolKeyword {}
    TSObjectKeyword {}
    TSIntrinsicKeyword {}
    TSThisType {}
    TSLiteralType {
        literal: Id<Node>,
    }
    TSTemplateLiteralType {
        quasis: Vec<Id<Node>>,
        types: Vec<Id<Node>>,
    }
    TSArrayType {
        element_type: Id<Node>,
    }
    TSTupleType {
        element_types: Vec<Id<Node>>,
    }
    TSNamedTupleMember {
        label: Id<Node>,
        element_type: Id<Node>,
        optional: bool,
    }
    TSOptionalType {
        type_annotation: Id<Node>,
    }
    TSRestType {
        type_annotation: Id<Node>,
    }
    TSUnionType {
        types: Vec<Id<Node>>,
    }
    TSIntersectionType {
        types: Vec<Id<Node>>,
    }
    TSTypeReference {
        type_name: Id<Node>,
        type_parameters: Option<Id<Node>>,
    }
    TSQualifiedName {
        left: Id<Node>,
        right: Id<Node>,
    }
    TSTypeQuery {
        expr_name: Id<Node>,
        type_parameters: Option<Id<Node>>,
    }
    TSTypeLiteral {
        members: Vec<Id<Node>>,
    }
    TSPropertySignature {
        key: Id<Node>,
        type_annotation: Option<Id<Node>>,
        optional: bool,
        computed: bool,
        readonly: bool,
        static_: bool,
    }
    TSMethodSignature {
        key: Id<Node>,
        kind: MethodKind,
        type_parameters: Option<Id<Node>>,
        params: Vec<Id<Node>>,
        return_type: Option<Id<Node>>,
        computed: bool,
        optional: bool,
        static_: bool,
    }
    TSCallSignatureDeclaration {
        type_parameters: Option<Id<Node>>,
        params: Vec<Id<Node>>,
        return_type: Option<Id<Node>>,
    }
    TSConstructSignatureDeclaration {
        type_parameters: Option<Id<Node>>,
        params: Vec<Id<Node>>,
        return_type: Option<Id<Node>>,
    }
    TSIndexSignature {
        parameters: Vec<Id<Node>>,
        type_annotation: Option<Id<Node>>,
        readonly: bool,
        static_: bool,
    }
    TSFunctionType {
        type_parameters: Option<Id<Node>>,
        params: Vec<Id<Node>>,
        return_type: Option<Id<Node>>,
    }
    TSConstructorType {
        type_parameters: Option<Id<Node>>,
        params: Vec<Id<Node>>,
        return_type: Option<Id<Node>>,
        abstract_: bool,
    }
    TSTypeOperator {
        operator: String,
        type_annotation: Option<Id<Node>>,
    }
    TSIndexedAccessType {
        object_type: Id<Node>,
        index_type: Id<Node>,
    }
    TSMappedType {
        type_parameter: Id<Node>,
        name_type: Option<Id<Node>>,
        type_annotation: Option<Id<Node>>,
        optional: Option<MappedTypeModifier>,
        readonly: Option<MappedTypeModifier>,
    }
    TSConditionalType {
        check_type: Id<Node>,
        extends_type: Id<Node>,
        true_type: Id<Node>,
        false_type: Id<Node>,
    }
    TSInferType {
        type_parameter: Id<Node>,
    }
    TSTypePredicate {
        parameter_name: Id<Node>,
        type_annotation: Option<Id<Node>>,
        asserts: bool,
    }
    TSImportType {
        parameter: Id<Node>,
        qualifier: Option<Id<Node>>,
        type_parameters: Option<Id<Node>>,
        is_type_of: bool,
    }
    TSTypeParameterDeclaration {
        params: Vec<Id<Node>>,
    }
    TSTypeParameter {
        name: Id<Node>,
        constraint: Option<Id<Node>>,
        default_: Option<Id<Node>>,
        in_: bool,
        out: bool,
    }
    TSTypeParameterInstantiation {
        params: Vec<Id<Node>>,
    }

    // TypeScript declarations
    TSTypeAliasDeclaration {
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
        type_annotation: Id<Node>,
        declare: bool,
    }
    TSInterfaceDeclaration {
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
        extends: Vec<Id<Node>>,
        body: Id<Node>,
        declare: bool,
    }
    TSInterfaceBody {
        body: Vec<Id<Node>>,
    }
    TSInterfaceHeritage {
        expression: Id<Node>,
        type_parameters: Option<Id<Node>>,
    }
    TSClassImplements {
        expression: Id<Node>,
        type_parameters: Option<Id<Node>>,
    }
    TSEnumDeclaration {
        id: Id<Node>,
        members: Vec<Id<Node>>,
        const_: bool,
        declare: bool,
    }
    TSEnumMember {
        id: Id<Node>,
        initializer: Option<Id<Node>>,
        computed: bool,
    }
    TSModuleDeclaration {
        id: Id<Node>,
        body: Option<Id<Node>>,
        declare: bool,
        global: bool,
    }
    TSModuleBlock {
        body: Vec<Id<Node>>,
    }
    TSDeclareFunction {
        id: Option<Id<Node>>,
        type_parameters: Option<Id<Node>>,
        params: Vec<Id<Node>>,
        return_type: Option<Id<Node>>,
        declare: bool,
        async_: bool,
        generator: bool,
    }
    TSEmptyBodyFunctionExpression {
        type_parameters: Option<Id<Node>>,
        params: Vec<Id<Node>>,
        return_type: Option<Id<Node>>,
    }
    TSExportAssignment {
        expression: Id<Node>,
    }
    TSImportEqualsDeclaration {
        id: Id<Node>,
        module_reference: Id<Node>,
        import_kind: ImportKind,
        is_export: bool,
    }
    TSExternalModuleReference {
        expression: Id<Node>,
    }
    TSNamespaceExportDeclaration {
        id: Id<Node>,
    }
    TSAsExpression {
        expression: Id<Node>,
        type_annotation: Id<Node>,
    }
    TSNonNullExpression {
        expression: Id<Node>,
    }
}
