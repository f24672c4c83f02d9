use std::cell::Cell;
use std::collections::HashMap;

use id_arena::Id;
use itertools::Itertools;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::{
    deep_clone, AstArena, ClassBody, ClassDeclaration, ClassImplements, Comment, CommentKind,
    DeclareExportDeclaration, DefinitionKind, ExportAllDeclaration, ExportDefaultDeclaration,
    ExportKind, ExportNamedDeclaration, ExportSpecifier, FunctionTypeAnnotation, FunctionTypeParam,
    GenericTypeAnnotation, HasArena, ImportDeclaration, ImportDefaultSpecifier, ImportKind,
    ImportNamespaceSpecifier, ImportSpecifier, InArena, InterfaceExtends, Literal, LiteralValue,
    MappedTypeModifier, MappedTypeOptionality, MemberExpression, MethodDefinition, MethodKind, Node,
    NodeFactory, NodeKind, ObjectTypeAnnotation, ObjectTypeIndexer, ObjectTypeMappedTypeProperty,
    ObjectTypeProperty, Program, PropertyDefinition, PropertyKind, ReadonlyTextRange, RestElement,
    ScopeManager, SyntaxKind, TSArrayType, TSCallSignatureDeclaration, TSClassImplements,
    TSConditionalType, TSConstructorType, TSDeclareFunction, TSEmptyBodyFunctionExpression,
    TSEnumDeclaration, TSEnumMember, TSFunctionType, TSImportType, TSIndexSignature,
    TSIndexedAccessType, TSInferType, TSInterfaceBody, TSInterfaceDeclaration, TSInterfaceHeritage,
    TSIntersectionType, TSLiteralType, TSMappedType, TSMethodSignature, TSModuleBlock,
    TSModuleDeclaration, TSNamedTupleMember, TSPropertySignature, TSRestType, TSTupleType,
    TSTypeAliasDeclaration, TSTypeLiteral, TSTypeOperator, TSTypeParameter,
    TSTypeParameterDeclaration, TSTypeParameterInstantiation, TSTypePredicate, TSTypeQuery,
    TSTypeReference, TranslationContext, TranslationError, TranslationOptions, TranslationResult,
    TypePredicateKind, VariableDeclaration, VariableDeclarator, VariableKind, VarianceKind,
};

const EXPORT_DEFAULT_PLACEHOLDER: &str = "$$EXPORT_DEFAULT_DECLARATION$$";

/// Translates a Flow declaration file into a TypeScript declaration file.
pub fn flow_def_to_ts_def(
    arena: &AstArena,
    program: Id<Node>,
    code: &str,
    scope_manager: &ScopeManager,
    options: &TranslationOptions,
) -> Result<TranslationResult, TranslationError> {
    let context = TranslationContext::new(arena, code, scope_manager, options);
    let program = FlowDefToTsDef::new(&context).translate_program(program)?;
    Ok(context.into_result(program))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ReactType {
    AbstractComponent,
    ChildrenArray,
    Component,
    ComponentType,
    Context,
    Element,
    ElementConfig,
    ElementProps,
    ElementRef,
    ElementType,
    Fragment,
    Key,
    MixedElement,
    Node,
    Ref,
}

/// Both spellings (`React.Node` and `React$Node`) of every React type with a
/// TypeScript counterpart.
static REACT_TYPES: Lazy<HashMap<String, ReactType>> = Lazy::new(|| {
    let names = [
        ("AbstractComponent", ReactType::AbstractComponent),
        ("ChildrenArray", ReactType::ChildrenArray),
        ("Component", ReactType::Component),
        ("ComponentType", ReactType::ComponentType),
        ("Context", ReactType::Context),
        ("Element", ReactType::Element),
        ("ElementConfig", ReactType::ElementConfig),
        ("ElementProps", ReactType::ElementProps),
        ("ElementRef", ReactType::ElementRef),
        ("ElementType", ReactType::ElementType),
        ("Fragment", ReactType::Fragment),
        ("FragmentType", ReactType::Fragment),
        ("Key", ReactType::Key),
        ("MixedElement", ReactType::MixedElement),
        ("Node", ReactType::Node),
        ("Ref", ReactType::Ref),
    ];
    names
        .into_iter()
        .flat_map(|(name, react_type)| {
            [
                (format!("React.{}", name), react_type),
                (format!("React${}", name), react_type),
            ]
        })
        .collect()
});

const REACT_MODULE_NAMES: &[&str] = &["react", "React"];

struct FunctionSignature {
    type_parameters: Option<Id<Node>>,
    params: Vec<Id<Node>>,
    return_type: Option<Id<Node>>,
}

struct FlowDefToTsDef<'context, 'a> {
    context: &'context TranslationContext<'a>,
    /// `None` until a React type is seen; `Some(false)` once one resolves to
    /// an existing import, which no later use overrides.
    add_react_import: Cell<Option<bool>>,
}

impl<'context, 'a> FlowDefToTsDef<'context, 'a> {
    fn new(context: &'context TranslationContext<'a>) -> Self {
        Self {
            context,
            add_react_import: Cell::new(None),
        }
    }

    fn factory(&self) -> &NodeFactory<'a> {
        &self.context.factory
    }

    fn data(&self, node: Id<Node>) -> NodeKind {
        node.ref_(self.context).data.clone()
    }

    fn kind(&self, node: Id<Node>) -> SyntaxKind {
        self.context.kind_of(node)
    }

    fn unexpected_node(&self, node: Id<Node>) -> TranslationError {
        self.context.unexpected_error(
            node,
            format!("Unexpected node type {}", self.kind(node).as_str()),
        )
    }

    fn unsupported(&self, node: Id<Node>, thing: &str) -> Result<Id<Node>, TranslationError> {
        self.context
            .unsupported_annotation(node, thing, SyntaxKind::TSAnyKeyword)
    }

    fn name_of(&self, node: Id<Node>) -> String {
        match &node.ref_(self.context).data {
            NodeKind::Identifier(identifier) => identifier.name.clone(),
            _ => String::new(),
        }
    }

    /// A fresh identifier without the annotation the original may carry.
    fn identifier(&self, node: Id<Node>) -> Id<Node> {
        let identifier = self.factory().create_identifier(&self.name_of(node));
        identifier
            .ref_(self.context)
            .set_range(node.ref_(self.context).range());
        identifier
    }

    fn clone_node(&self, node: Id<Node>) -> Id<Node> {
        deep_clone(self.context, node)
    }

    /// `A.B.C` for a (possibly qualified) type or typeof identifier.
    fn qualified_name(&self, node: Id<Node>) -> String {
        match self.data(node) {
            NodeKind::QualifiedTypeIdentifier(qualified) => format!(
                "{}.{}",
                self.qualified_name(qualified.qualification),
                self.name_of(qualified.id)
            ),
            NodeKind::QualifiedTypeofIdentifier(qualified) => format!(
                "{}.{}",
                self.qualified_name(qualified.qualification),
                self.name_of(qualified.id)
            ),
            _ => self.name_of(node),
        }
    }

    fn base_identifier(&self, node: Id<Node>) -> Id<Node> {
        match self.data(node) {
            NodeKind::QualifiedTypeIdentifier(qualified) => {
                self.base_identifier(qualified.qualification)
            }
            NodeKind::QualifiedTypeofIdentifier(qualified) => {
                self.base_identifier(qualified.qualification)
            }
            _ => node,
        }
    }

    fn entity_name(&self, node: Id<Node>) -> Id<Node> {
        self.factory().create_ts_entity_name(&self.qualified_name(node))
    }

    fn translate_program(&self, program: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let NodeKind::Program(data) = self.data(program) else {
            return Err(self
                .context
                .unexpected_error(program, "Expected a Program"));
        };
        let mut body = vec![];
        for statement in data.body {
            body.extend(self.translate_statement(statement)?);
        }
        if self.add_react_import.get() == Some(true) {
            debug!("adding a React namespace import");
            body.insert(0, self.react_namespace_import());
        }
        let range = self.context.range_of(program);
        Ok(self.factory().create_with_range(
            Program {
                body,
                source_type: data.source_type,
                docblock: data.docblock.map(|docblock| remove_flow_pragma(&docblock)),
            },
            range,
        ))
    }

    fn react_namespace_import(&self) -> Id<Node> {
        let local = self.factory().create_identifier("React");
        let specifier = self.factory().create(ImportNamespaceSpecifier { local });
        let source = self.factory().create_string_literal("react");
        self.factory().create(ImportDeclaration {
            specifiers: vec![specifier],
            source,
            import_kind: ImportKind::Value,
            assertions: vec![],
        })
    }

    fn translate_statement(&self, node: Id<Node>) -> Result<Vec<Id<Node>>, TranslationError> {
        let translated = match self.data(node) {
            NodeKind::ImportDeclaration(import) => return self.translate_import(node, import),
            NodeKind::ExportNamedDeclaration(export) => return self.translate_export_named(export),
            NodeKind::ExportAllDeclaration(export) => {
                self.factory().create(ExportAllDeclaration {
                    exported: export.exported.map(|exported| self.clone_node(exported)),
                    source: self.clone_node(export.source),
                    export_kind: export.export_kind,
                })
            }
            NodeKind::DeclareExportAllDeclaration(export) => {
                self.factory().create(ExportAllDeclaration {
                    exported: None,
                    source: self.clone_node(export.source),
                    export_kind: ExportKind::Value,
                })
            }
            NodeKind::DeclareExportDeclaration(export) => {
                return self.translate_declare_export(node, export)
            }
            NodeKind::DeclareModuleExports(_) => {
                return Err(self
                    .context
                    .expected_error(node, "CommonJS exports are not supported."))
            }
            NodeKind::DeclareModule(module) => self.translate_module(module.id, module.body)?,
            NodeKind::DeclareNamespace(namespace) => {
                self.translate_module(namespace.id, namespace.body)?
            }
            NodeKind::DeclareEnum(declaration) => {
                return self.translate_enum(declaration.id, declaration.body)
            }
            NodeKind::EnumDeclaration(declaration) => {
                return self.translate_enum(declaration.id, declaration.body)
            }
            _ => self.translate_declaration(node)?,
        };
        Ok(vec![translated])
    }

    /// The declarations with exactly one TypeScript counterpart.
    fn translate_declaration(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        match self.data(node) {
            NodeKind::DeclareClass(_) => self.translate_declare_class(node),
            NodeKind::DeclareFunction(declaration) => {
                self.translate_declare_function(node, declaration.id)
            }
            NodeKind::DeclareVariable(declaration) => {
                self.translate_declare_variable(declaration.id, declaration.kind)
            }
            NodeKind::TypeAlias(alias) => {
                self.translate_type_alias(alias.id, alias.type_parameters, alias.right, false)
            }
            NodeKind::DeclareTypeAlias(alias) => {
                self.translate_type_alias(alias.id, alias.type_parameters, alias.right, true)
            }
            NodeKind::OpaqueType(opaque) => {
                self.translate_opaque_type(opaque.id, opaque.type_parameters, opaque.supertype)
            }
            NodeKind::DeclareOpaqueType(opaque) => {
                self.translate_opaque_type(opaque.id, opaque.type_parameters, opaque.supertype)
            }
            NodeKind::InterfaceDeclaration(interface) => self.translate_interface(
                interface.id,
                interface.type_parameters,
                &interface.extends,
                interface.body,
                false,
            ),
            NodeKind::DeclareInterface(interface) => self.translate_interface(
                interface.id,
                interface.type_parameters,
                &interface.extends,
                interface.body,
                true,
            ),
            _ => Err(self.unexpected_node(node)),
        }
    }

    fn translate_import(
        &self,
        node: Id<Node>,
        import: ImportDeclaration,
    ) -> Result<Vec<Id<Node>>, TranslationError> {
        let mut specifiers = vec![];
        let mut typeof_aliases = vec![];
        for specifier in import.specifiers {
            let specifier_import_kind = match self.data(specifier) {
                NodeKind::ImportSpecifier(specifier) => specifier.import_kind,
                _ => None,
            };
            let is_typeof = import.import_kind == ImportKind::Typeof
                || specifier_import_kind == Some(ImportKind::Typeof);
            let local = match self.data(specifier) {
                NodeKind::ImportSpecifier(specifier) => specifier.local,
                NodeKind::ImportDefaultSpecifier(specifier) => specifier.local,
                NodeKind::ImportNamespaceSpecifier(specifier) => specifier.local,
                _ => return Err(self.unexpected_node(specifier)),
            };
            // TS has no `import typeof`: import under a placeholder name and
            // alias the local name to its `typeof`.
            let local = if is_typeof {
                let placeholder = format!(
                    "$$IMPORT_TYPEOF_{}$$",
                    self.context.next_counter("import_typeof")
                );
                let expr_name = self.factory().create_identifier(&placeholder);
                let type_annotation = self.factory().create(TSTypeQuery {
                    expr_name,
                    type_parameters: None,
                });
                typeof_aliases.push(self.factory().create(TSTypeAliasDeclaration {
                    id: self.identifier(local),
                    type_parameters: None,
                    type_annotation,
                    declare: false,
                }));
                self.factory().create_identifier(&placeholder)
            } else {
                self.identifier(local)
            };
            let translated = match self.data(specifier) {
                NodeKind::ImportSpecifier(specifier) => {
                    self.factory().create(ImportSpecifier {
                        imported: self.clone_node(specifier.imported),
                        local,
                        import_kind: match specifier.import_kind {
                            Some(ImportKind::Type | ImportKind::Typeof) => Some(ImportKind::Type),
                            _ => None,
                        },
                    })
                }
                NodeKind::ImportDefaultSpecifier(_) => {
                    self.factory().create(ImportDefaultSpecifier { local })
                }
                _ => self.factory().create(ImportNamespaceSpecifier { local }),
            };
            specifiers.push(translated);
        }

        let mut statements = vec![];
        if !specifiers.is_empty() {
            let translated = self.factory().create(ImportDeclaration {
                specifiers,
                source: self.clone_node(import.source),
                import_kind: match import.import_kind {
                    ImportKind::Typeof => ImportKind::Type,
                    import_kind => import_kind,
                },
                assertions: import
                    .assertions
                    .iter()
                    .map(|&assertion| self.clone_node(assertion))
                    .collect(),
            });
            translated
                .ref_(self.context)
                .set_range(node.ref_(self.context).range());
            statements.push(translated);
        }
        statements.extend(typeof_aliases);
        Ok(statements)
    }

    fn export_specifiers(&self, specifiers: &[Id<Node>]) -> Result<Vec<Id<Node>>, TranslationError> {
        specifiers
            .iter()
            .map(|&specifier| match self.data(specifier) {
                NodeKind::ExportSpecifier(specifier) => {
                    Ok(self.factory().create(ExportSpecifier {
                        local: self.clone_node(specifier.local),
                        exported: self.clone_node(specifier.exported),
                    }))
                }
                _ => Ok(self.clone_node(specifier)),
            })
            .collect()
    }

    fn export_declaration(&self, declaration: Id<Node>, export_kind: ExportKind) -> Id<Node> {
        self.factory().create(ExportNamedDeclaration {
            declaration: Some(declaration),
            specifiers: vec![],
            source: None,
            export_kind,
        })
    }

    fn translate_export_named(
        &self,
        export: ExportNamedDeclaration,
    ) -> Result<Vec<Id<Node>>, TranslationError> {
        let Some(declaration) = export.declaration else {
            return Ok(vec![self.factory().create(ExportNamedDeclaration {
                declaration: None,
                specifiers: self.export_specifiers(&export.specifiers)?,
                source: export.source.map(|source| self.clone_node(source)),
                export_kind: export.export_kind,
            })]);
        };
        match self.kind(declaration) {
            SyntaxKind::ClassDeclaration
            | SyntaxKind::FunctionDeclaration
            | SyntaxKind::VariableDeclaration => Err(self.context.unexpected_error(
                declaration,
                format!(
                    "Unexpected named declaration found {}",
                    self.kind(declaration).as_str()
                ),
            )),
            _ => Ok(self
                .translate_statement(declaration)?
                .into_iter()
                .map(|translated| self.export_declaration(translated, export.export_kind))
                .collect()),
        }
    }

    fn translate_declare_export(
        &self,
        node: Id<Node>,
        export: DeclareExportDeclaration,
    ) -> Result<Vec<Id<Node>>, TranslationError> {
        if export.default_ {
            let declaration = export
                .declaration
                .ok_or_else(|| self.context.unexpected_error(node, "Missing default export"))?;
            return self.translate_declare_export_default(node, declaration);
        }
        match (export.declaration, export.source) {
            (Some(declaration), _) => {
                let export_kind = match self.kind(declaration) {
                    SyntaxKind::DeclareClass
                    | SyntaxKind::DeclareFunction
                    | SyntaxKind::DeclareVariable => ExportKind::Value,
                    SyntaxKind::DeclareInterface
                    | SyntaxKind::DeclareOpaqueType
                    | SyntaxKind::DeclareTypeAlias
                    | SyntaxKind::DeclareEnum
                    | SyntaxKind::InterfaceDeclaration
                    | SyntaxKind::OpaqueType
                    | SyntaxKind::TypeAlias
                    | SyntaxKind::EnumDeclaration => ExportKind::Type,
                    _ => return Err(self.unexpected_node(declaration)),
                };
                Ok(self
                    .translate_statement(declaration)?
                    .into_iter()
                    .map(|translated| self.export_declaration(translated, export_kind))
                    .collect())
            }
            (None, source) => Ok(vec![self.factory().create(ExportNamedDeclaration {
                declaration: None,
                specifiers: self.export_specifiers(&export.specifiers)?,
                source: source.map(|source| self.clone_node(source)),
                export_kind: ExportKind::Value,
            })]),
        }
    }

    fn export_default_identifier(&self, name: &str) -> Id<Node> {
        let declaration = self.factory().create_identifier(name);
        self.factory()
            .create(ExportDefaultDeclaration { declaration })
    }

    fn translate_declare_export_default(
        &self,
        node: Id<Node>,
        declaration: Id<Node>,
    ) -> Result<Vec<Id<Node>>, TranslationError> {
        match self.data(declaration) {
            NodeKind::DeclareClass(class) => {
                let name = self.name_of(class.id);
                return Ok(vec![
                    self.translate_declaration(declaration)?,
                    self.export_default_identifier(&name),
                ]);
            }
            NodeKind::DeclareFunction(function) => {
                let name = self.name_of(function.id);
                return Ok(vec![
                    self.translate_declaration(declaration)?,
                    self.export_default_identifier(&name),
                ]);
            }
            NodeKind::GenericTypeAnnotation(generic)
                if self.kind(generic.id) == SyntaxKind::Identifier =>
            {
                let name = self.name_of(generic.id);
                if self.is_value_binding(node, &name)? {
                    return Ok(vec![self.export_default_identifier(&name)]);
                }
            }
            _ => {}
        }

        // `declare export default T` where `T` is only a type: TS can only
        // default-export values, so declare one of that type.
        let type_annotation = self.ts_annotation(declaration)?;
        let id = self.factory().create_identifier_with_annotation(
            EXPORT_DEFAULT_PLACEHOLDER,
            Some(type_annotation),
            false,
        );
        let declarator = self.factory().create(VariableDeclarator { id, init: None });
        Ok(vec![
            self.factory().create(VariableDeclaration {
                kind: VariableKind::Const,
                declarations: vec![declarator],
                declare: true,
            }),
            self.export_default_identifier(EXPORT_DEFAULT_PLACEHOLDER),
        ])
    }

    /// Whether the module-level `name` is a value (rather than only a type).
    fn is_value_binding(&self, node: Id<Node>, name: &str) -> Result<bool, TranslationError> {
        let Some(variable) = self.context.scope_manager.module_variable(name) else {
            return Ok(false);
        };
        let [definition] = variable.defs.as_slice() else {
            return Ok(false);
        };
        match definition.kind {
            DefinitionKind::ImportBinding => {
                let specifier_kind = match self.data(definition.node) {
                    NodeKind::ImportSpecifier(specifier) => specifier.import_kind,
                    _ => None,
                };
                let declaration_kind = definition.parent.and_then(|parent| match self.data(parent) {
                    NodeKind::ImportDeclaration(import) => Some(import.import_kind),
                    _ => None,
                });
                let is_type_import = [specifier_kind, declaration_kind].iter().any(|kind| {
                    matches!(kind, Some(ImportKind::Type | ImportKind::Typeof))
                });
                Ok(!is_type_import)
            }
            DefinitionKind::ClassName
            | DefinitionKind::Enum
            | DefinitionKind::FunctionName
            | DefinitionKind::ImplicitGlobalVariable
            | DefinitionKind::Namespace
            | DefinitionKind::Variable => Ok(true),
            DefinitionKind::CatchClause
            | DefinitionKind::Parameter
            | DefinitionKind::TypeParameter => Err(self.context.expected_error(
                node,
                format!("Unexpected variable def type: {:?}", definition.kind),
            )),
            DefinitionKind::Type => Ok(false),
        }
    }

    fn translate_module(&self, id: Id<Node>, body: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let statements = match self.data(body) {
            NodeKind::BlockStatement(block) => block.body,
            _ => return Err(self.unexpected_node(body)),
        };
        let mut translated = vec![];
        for statement in statements {
            translated.extend(self.translate_statement(statement)?);
        }
        let body = self.factory().create(TSModuleBlock { body: translated });
        Ok(self.factory().create(TSModuleDeclaration {
            id: self.clone_node(id),
            body: Some(body),
            declare: true,
            global: false,
        }))
    }

    fn translate_type_alias(
        &self,
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
        right: Id<Node>,
        declare: bool,
    ) -> Result<Id<Node>, TranslationError> {
        Ok(self.factory().create(TSTypeAliasDeclaration {
            id: self.identifier(id),
            type_parameters: self.translate_type_parameters(type_parameters)?,
            type_annotation: self.translate_type(right)?,
            declare,
        }))
    }

    /// Opaque types lose their opacity: the alias exposes the supertype.
    fn translate_opaque_type(
        &self,
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
        supertype: Option<Id<Node>>,
    ) -> Result<Id<Node>, TranslationError> {
        let type_annotation = match supertype {
            Some(supertype) => self.translate_type(supertype)?,
            None => self.factory().create_keyword(SyntaxKind::TSUnknownKeyword),
        };
        Ok(self.factory().create(TSTypeAliasDeclaration {
            id: self.identifier(id),
            type_parameters: self.translate_type_parameters(type_parameters)?,
            type_annotation,
            declare: true,
        }))
    }

    fn translate_interface(
        &self,
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
        extends: &[Id<Node>],
        body: Id<Node>,
        declare: bool,
    ) -> Result<Id<Node>, TranslationError> {
        let translated_body = self.translate_type(body)?;
        let NodeKind::TSTypeLiteral(literal) = self.data(translated_body) else {
            return Err(self
                .context
                .expected_error(body, "Spreads in interfaces are not allowed."));
        };
        let extends = extends
            .iter()
            .map(|&extends| {
                let NodeKind::InterfaceExtends(InterfaceExtends {
                    id,
                    type_parameters,
                }) = self.data(extends)
                else {
                    return Err(self.unexpected_node(extends));
                };
                Ok(self.factory().create(TSInterfaceHeritage {
                    expression: self.entity_name(id),
                    type_parameters: self.translate_type_arguments(type_parameters)?,
                }))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let body = self.factory().create(TSInterfaceBody {
            body: literal.members,
        });
        Ok(self.factory().create(TSInterfaceDeclaration {
            id: self.identifier(id),
            type_parameters: self.translate_type_parameters(type_parameters)?,
            extends,
            body,
            declare,
        }))
    }

    fn translate_declare_variable(
        &self,
        id: Id<Node>,
        kind: VariableKind,
    ) -> Result<Id<Node>, TranslationError> {
        let type_annotation = match self.data(id) {
            NodeKind::Identifier(identifier) => identifier
                .type_annotation
                .map(|type_annotation| self.ts_annotation(type_annotation))
                .transpose()?,
            _ => None,
        };
        let id = self.factory().create_identifier_with_annotation(
            &self.name_of(id),
            type_annotation,
            false,
        );
        let declarator = self.factory().create(VariableDeclarator { id, init: None });
        Ok(self.factory().create(VariableDeclaration {
            kind,
            declarations: vec![declarator],
            declare: true,
        }))
    }

    fn function_type_of(&self, node: Id<Node>, id: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let annotation = match self.data(id) {
            NodeKind::Identifier(identifier) => identifier.type_annotation,
            _ => None,
        };
        annotation
            .map(|annotation| self.inner_type(annotation))
            .filter(|&function| self.kind(function) == SyntaxKind::FunctionTypeAnnotation)
            .ok_or_else(|| {
                self.context
                    .unexpected_error(node, "Expected a function type annotation")
            })
    }

    fn translate_declare_function(
        &self,
        node: Id<Node>,
        id: Id<Node>,
    ) -> Result<Id<Node>, TranslationError> {
        let function = self.function_type_of(node, id)?;
        let signature = self.function_signature(function)?;
        Ok(self.factory().create(TSDeclareFunction {
            id: Some(self.identifier(id)),
            type_parameters: signature.type_parameters,
            params: signature.params,
            return_type: signature.return_type,
            declare: true,
            async_: false,
            generator: false,
        }))
    }

    fn translate_declare_class(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let NodeKind::DeclareClass(class) = self.data(node) else {
            return Err(self.unexpected_node(node));
        };
        let body = self.translate_type(class.body)?;
        let NodeKind::TSTypeLiteral(literal) = self.data(body) else {
            return self.context.unsupported_ts_declaration(
                class.body,
                "Spreads in declare class are not allowed",
                self.identifier(class.id),
                true,
                self.translate_type_parameters(class.type_parameters)?,
            );
        };

        let mut members = vec![];
        for member in literal.members {
            let translated = match self.data(member) {
                NodeKind::TSIndexSignature(_) => member,
                NodeKind::TSMethodSignature(method) => {
                    let is_constructor =
                        !method.computed && self.name_of(method.key) == "constructor";
                    let value = self.factory().create(TSEmptyBodyFunctionExpression {
                        type_parameters: method.type_parameters,
                        params: method.params,
                        return_type: if is_constructor {
                            None
                        } else {
                            method.return_type
                        },
                    });
                    self.factory().create(MethodDefinition {
                        key: method.key,
                        value,
                        kind: if is_constructor {
                            MethodKind::Constructor
                        } else {
                            method.kind
                        },
                        static_: method.static_,
                        computed: method.computed,
                    })
                }
                NodeKind::TSPropertySignature(property) => {
                    self.factory().create(PropertyDefinition {
                        key: property.key,
                        value: None,
                        type_annotation: property.type_annotation,
                        variance: None,
                        static_: property.static_,
                        computed: property.computed,
                        declare: false,
                        optional: property.optional,
                        readonly: property.readonly,
                    })
                }
                NodeKind::TSCallSignatureDeclaration(_) => {
                    return self.context.unsupported_ts_declaration(
                        node,
                        "call signatures on classes",
                        self.identifier(class.id),
                        true,
                        self.translate_type_parameters(class.type_parameters)?,
                    );
                }
                _ => {
                    return Err(self.context.unexpected_error(
                        member,
                        format!("Unexpected member type {}", self.kind(member).as_str()),
                    ))
                }
            };
            members.push(translated);
        }

        let (super_class, super_type_parameters) = match class.extends.first() {
            Some(&extends) => {
                let NodeKind::InterfaceExtends(extends) = self.data(extends) else {
                    return Err(self.unexpected_node(extends));
                };
                (
                    Some(self.type_identifier_to_expression(extends.id)),
                    self.translate_type_arguments(extends.type_parameters)?,
                )
            }
            None => (None, None),
        };
        let implements = class
            .implements
            .iter()
            .chain(&class.mixins)
            .map(|&implements| {
                let (id, type_parameters) = match self.data(implements) {
                    NodeKind::ClassImplements(ClassImplements {
                        id,
                        type_parameters,
                    }) => (id, type_parameters),
                    NodeKind::InterfaceExtends(InterfaceExtends {
                        id,
                        type_parameters,
                    }) => (id, type_parameters),
                    _ => return Err(self.unexpected_node(implements)),
                };
                Ok(self.factory().create(TSClassImplements {
                    expression: self.entity_name(id),
                    type_parameters: self.translate_type_arguments(type_parameters)?,
                }))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let body = self.factory().create(ClassBody { body: members });
        Ok(self.factory().create(ClassDeclaration {
            id: Some(self.identifier(class.id)),
            type_parameters: self.translate_type_parameters(class.type_parameters)?,
            super_class,
            super_type_parameters,
            implements,
            decorators: vec![],
            body,
            declare: true,
        }))
    }

    /// `A.B.C` as a member expression chain.
    fn type_identifier_to_expression(&self, node: Id<Node>) -> Id<Node> {
        match self.data(node) {
            NodeKind::QualifiedTypeIdentifier(qualified) => {
                let object = self.type_identifier_to_expression(qualified.qualification);
                self.factory().create(MemberExpression {
                    object,
                    property: self.identifier(qualified.id),
                    computed: false,
                    optional: false,
                })
            }
            _ => self.identifier(node),
        }
    }

    fn translate_enum(
        &self,
        id: Id<Node>,
        body: Id<Node>,
    ) -> Result<Vec<Id<Node>>, TranslationError> {
        let unsupported = |thing: &str| -> Result<Vec<Id<Node>>, TranslationError> {
            Ok(vec![self.context.unsupported_ts_declaration(
                body,
                thing,
                self.identifier(id),
                false,
                None,
            )?])
        };
        let (members, is_number_enum) = match self.data(body) {
            NodeKind::EnumNumberBody(body) => (body.members, true),
            NodeKind::EnumStringBody(body) => (body.members, false),
            NodeKind::EnumBooleanBody(_) => return unsupported("boolean enums"),
            NodeKind::EnumSymbolBody(_) => return unsupported("symbol enums"),
            NodeKind::EnumBigIntBody(_) => return unsupported("bigint enums"),
            _ => return Err(self.unexpected_node(body)),
        };

        let members = members
            .into_iter()
            .map(|member| {
                let (member_id, initializer) = match self.data(member) {
                    NodeKind::EnumDefaultedMember(_) if is_number_enum => {
                        return Err(self
                            .context
                            .unexpected_error(member, "Unexpected defaulted number enum member"))
                    }
                    NodeKind::EnumDefaultedMember(member) => (
                        member.id,
                        self.factory().create_string_literal(&self.name_of(member.id)),
                    ),
                    NodeKind::EnumNumberMember(member) => (member.id, self.clone_node(member.init)),
                    NodeKind::EnumStringMember(member) => (member.id, self.clone_node(member.init)),
                    _ => return Err(self.unexpected_node(member)),
                };
                Ok(self.factory().create(TSEnumMember {
                    id: self.identifier(member_id),
                    initializer: Some(initializer),
                    computed: false,
                }))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let enum_declaration = self.factory().create(TSEnumDeclaration {
            id: self.identifier(id),
            members,
            const_: false,
            declare: true,
        });

        let enum_name = self.name_of(id);
        let enum_type = || self.factory().create_ts_type_reference(&enum_name, None);
        let nullable_representation = || {
            let representation = self.factory().create_keyword(if is_number_enum {
                SyntaxKind::TSNumberKeyword
            } else {
                SyntaxKind::TSStringKeyword
            });
            self.factory().create_ts_union_type(vec![
                representation,
                self.factory().create_keyword(SyntaxKind::TSNullKeyword),
                self.factory().create_keyword(SyntaxKind::TSUndefinedKeyword),
            ])
        };
        let type_guard = self.factory().create(TSTypePredicate {
            parameter_name: self.factory().create_identifier("value"),
            type_annotation: Some(self.factory().create_ts_type_annotation(enum_type())),
            asserts: false,
        });
        let helpers = vec![
            self.enum_helper("cast", vec![("value", nullable_representation())], enum_type()),
            self.enum_helper("isValid", vec![("value", nullable_representation())], type_guard),
            self.enum_helper(
                "members",
                vec![],
                self.factory()
                    .create_ts_type_reference("IterableIterator", Some(vec![enum_type()])),
            ),
            self.enum_helper(
                "getName",
                vec![("value", enum_type())],
                self.factory().create_keyword(SyntaxKind::TSStringKeyword),
            ),
        ];
        let body = self.factory().create(TSModuleBlock { body: helpers });
        let namespace = self.factory().create(TSModuleDeclaration {
            id: self.identifier(id),
            body: Some(body),
            declare: true,
            global: false,
        });
        if let Some(runtime) = &self.context.options.runtime_helper_import {
            self.context.add_comment(Comment {
                kind: CommentKind::Line,
                value: format!(" runtime: import {{{}}} from '{}'", runtime.name, runtime.module),
                node: namespace,
            });
        }
        Ok(vec![enum_declaration, namespace])
    }

    fn enum_helper(
        &self,
        name: &str,
        params: Vec<(&str, Id<Node>)>,
        return_type: Id<Node>,
    ) -> Id<Node> {
        let params = params
            .into_iter()
            .map(|(name, type_)| {
                let type_annotation = self.factory().create_ts_type_annotation(type_);
                self.factory()
                    .create_identifier_with_annotation(name, Some(type_annotation), false)
            })
            .collect();
        let function = self.factory().create(TSDeclareFunction {
            id: Some(self.factory().create_identifier(name)),
            type_parameters: None,
            params,
            return_type: Some(self.factory().create_ts_type_annotation(return_type)),
            declare: false,
            async_: false,
            generator: false,
        });
        self.export_declaration(function, ExportKind::Value)
    }

    /// Unwraps a `TypeAnnotation` wrapper.
    fn inner_type(&self, node: Id<Node>) -> Id<Node> {
        match &node.ref_(self.context).data {
            NodeKind::TypeAnnotation(annotation) => annotation.type_annotation,
            _ => node,
        }
    }

    fn ts_annotation(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let translated = self.translate_type(self.inner_type(node))?;
        Ok(self.factory().create_ts_type_annotation(translated))
    }

    fn translate_types(&self, nodes: &[Id<Node>]) -> Result<Vec<Id<Node>>, TranslationError> {
        nodes.iter().map(|&node| self.translate_type(node)).collect()
    }

    fn translate_type_parameters(
        &self,
        node: Option<Id<Node>>,
    ) -> Result<Option<Id<Node>>, TranslationError> {
        let node = return_ok_none_if_none!(node);
        let NodeKind::TypeParameterDeclaration(declaration) = self.data(node) else {
            return Err(self.unexpected_node(node));
        };
        let params = declaration
            .params
            .into_iter()
            .map(|param| self.translate_type_parameter(param))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(
            self.factory().create(TSTypeParameterDeclaration { params }),
        ))
    }

    /// Variance has no TS counterpart and is dropped.
    fn translate_type_parameter(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let NodeKind::TypeParameter(param) = self.data(node) else {
            return Err(self.unexpected_node(node));
        };
        let constraint = param
            .bound
            .map(|bound| self.translate_type(self.inner_type(bound)))
            .transpose()?;
        let default_ = param
            .default_
            .map(|default_| self.translate_type(default_))
            .transpose()?;
        Ok(self.factory().create(TSTypeParameter {
            name: self.factory().create_identifier(&param.name),
            constraint,
            default_,
            in_: false,
            out: false,
        }))
    }

    fn type_argument_nodes(&self, node: Option<Id<Node>>) -> Vec<Id<Node>> {
        match node.map(|node| self.data(node)) {
            Some(NodeKind::TypeParameterInstantiation(instantiation)) => instantiation.params,
            _ => vec![],
        }
    }

    fn translate_type_arguments(
        &self,
        node: Option<Id<Node>>,
    ) -> Result<Option<Id<Node>>, TranslationError> {
        let node = return_ok_none_if_none!(node);
        let params = self.translate_types(&self.type_argument_nodes(Some(node)))?;
        Ok(Some(
            self.factory().create(TSTypeParameterInstantiation { params }),
        ))
    }

    fn function_signature(&self, node: Id<Node>) -> Result<FunctionSignature, TranslationError> {
        let NodeKind::FunctionTypeAnnotation(FunctionTypeAnnotation {
            type_parameters,
            this,
            params,
            rest,
            return_type,
        }) = self.data(node)
        else {
            return Err(self.unexpected_node(node));
        };

        let mut translated_params = vec![];
        if let Some(this) = this {
            let NodeKind::FunctionTypeParam(this) = self.data(this) else {
                return Err(self.unexpected_node(this));
            };
            translated_params.push(self.factory().create_identifier_with_annotation(
                "this",
                Some(self.ts_annotation(this.type_annotation)?),
                false,
            ));
        }
        for (index, param) in params.into_iter().enumerate() {
            let NodeKind::FunctionTypeParam(FunctionTypeParam {
                name,
                type_annotation,
                optional,
            }) = self.data(param)
            else {
                return Err(self.unexpected_node(param));
            };
            let name = name
                .map(|name| self.name_of(name))
                .unwrap_or_else(|| format!("$$PARAM_{}$$", index));
            translated_params.push(self.factory().create_identifier_with_annotation(
                &name,
                Some(self.ts_annotation(type_annotation)?),
                optional,
            ));
        }
        if let Some(rest) = rest {
            let NodeKind::FunctionTypeParam(rest) = self.data(rest) else {
                return Err(self.unexpected_node(rest));
            };
            let name = rest
                .name
                .map(|name| self.name_of(name))
                .unwrap_or_else(|| "$$REST$$".to_owned());
            let argument = self.factory().create_identifier(&name);
            translated_params.push(self.factory().create(RestElement {
                argument,
                type_annotation: Some(self.ts_annotation(rest.type_annotation)?),
            }));
        }

        Ok(FunctionSignature {
            type_parameters: self.translate_type_parameters(type_parameters)?,
            params: translated_params,
            return_type: Some(self.ts_annotation(return_type)?),
        })
    }

    fn translate_type(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let keyword = |kind| Ok(self.factory().create_keyword(kind));
        match self.data(node) {
            NodeKind::AnyTypeAnnotation(_) => keyword(SyntaxKind::TSAnyKeyword),
            NodeKind::MixedTypeAnnotation(_) => keyword(SyntaxKind::TSUnknownKeyword),
            NodeKind::EmptyTypeAnnotation(_) => keyword(SyntaxKind::TSNeverKeyword),
            NodeKind::VoidTypeAnnotation(_) => keyword(SyntaxKind::TSVoidKeyword),
            NodeKind::NullLiteralTypeAnnotation(_) => keyword(SyntaxKind::TSNullKeyword),
            NodeKind::NumberTypeAnnotation(_) => keyword(SyntaxKind::TSNumberKeyword),
            NodeKind::StringTypeAnnotation(_) => keyword(SyntaxKind::TSStringKeyword),
            NodeKind::BooleanTypeAnnotation(_) => keyword(SyntaxKind::TSBooleanKeyword),
            NodeKind::BigIntTypeAnnotation(_) => keyword(SyntaxKind::TSBigIntKeyword),
            NodeKind::SymbolTypeAnnotation(_) => keyword(SyntaxKind::TSSymbolKeyword),
            NodeKind::ThisTypeAnnotation(_) => keyword(SyntaxKind::TSThisType),
            NodeKind::ExistsTypeAnnotation(_) => self.unsupported(node, "existential type"),
            NodeKind::TypeAnnotation(annotation) => self.translate_type(annotation.type_annotation),
            NodeKind::NumberLiteralTypeAnnotation(literal) => self.literal_type(
                LiteralValue::Number(literal.value),
                literal.raw,
            ),
            NodeKind::StringLiteralTypeAnnotation(literal) => self.literal_type(
                LiteralValue::String(literal.value),
                literal.raw,
            ),
            NodeKind::BooleanLiteralTypeAnnotation(literal) => self.literal_type(
                LiteralValue::Boolean(literal.value),
                literal.raw,
            ),
            NodeKind::BigIntLiteralTypeAnnotation(literal) => {
                let digits = literal.raw.trim_end_matches('n').replace('_', "");
                self.literal_type(LiteralValue::BigInt(digits), literal.raw)
            }
            NodeKind::NullableTypeAnnotation(nullable) => {
                let type_annotation = self.translate_type(nullable.type_annotation)?;
                Ok(self.factory().create_ts_union_type(vec![
                    self.factory().create_keyword(SyntaxKind::TSNullKeyword),
                    self.factory().create_keyword(SyntaxKind::TSUndefinedKeyword),
                    type_annotation,
                ]))
            }
            NodeKind::ArrayTypeAnnotation(array) => {
                let element_type = self.translate_type(array.element_type)?;
                Ok(self.factory().create(TSArrayType { element_type }))
            }
            NodeKind::UnionTypeAnnotation(union) => Ok(self
                .factory()
                .create_ts_union_type(self.translate_types(&union.types)?)),
            NodeKind::IntersectionTypeAnnotation(intersection) => {
                Ok(self.factory().create(TSIntersectionType {
                    types: self.translate_types(&intersection.types)?,
                }))
            }
            NodeKind::TupleTypeAnnotation(tuple) => {
                if tuple.inexact {
                    return self.unsupported(node, "inexact tuple types");
                }
                self.translate_tuple(&tuple.types)
            }
            NodeKind::FunctionTypeAnnotation(_) => {
                let signature = self.function_signature(node)?;
                Ok(self.factory().create(TSFunctionType {
                    type_parameters: signature.type_parameters,
                    params: signature.params,
                    return_type: signature.return_type,
                }))
            }
            NodeKind::GenericTypeAnnotation(generic) => self.translate_generic(node, generic),
            NodeKind::QualifiedTypeIdentifier(_) => Ok(self.entity_name(node)),
            NodeKind::TypeofTypeAnnotation(typeof_) => Ok(self.factory().create(TSTypeQuery {
                expr_name: self.entity_name(typeof_.argument),
                type_parameters: self.translate_type_arguments(typeof_.type_arguments)?,
            })),
            NodeKind::ObjectTypeAnnotation(object) => self.translate_object_type(node, object),
            NodeKind::InterfaceTypeAnnotation(interface) => {
                let body = self.translate_type(interface.body)?;
                if interface.extends.is_empty() {
                    return Ok(body);
                }
                let mut types = interface
                    .extends
                    .iter()
                    .map(|&extends| self.translate_interface_extends(extends))
                    .collect::<Result<Vec<_>, _>>()?;
                types.push(body);
                Ok(self.factory().create(TSIntersectionType { types }))
            }
            NodeKind::IndexedAccessType(indexed) => {
                Ok(self.factory().create(TSIndexedAccessType {
                    object_type: self.translate_type(indexed.object_type)?,
                    index_type: self.translate_type(indexed.index_type)?,
                }))
            }
            NodeKind::OptionalIndexedAccessType(indexed) => {
                let mut object_type = self.translate_type(indexed.object_type)?;
                if indexed.optional {
                    object_type = self
                        .factory()
                        .create_ts_type_reference("NonNullable", Some(vec![object_type]));
                }
                Ok(self.factory().create(TSIndexedAccessType {
                    object_type,
                    index_type: self.translate_type(indexed.index_type)?,
                }))
            }
            NodeKind::KeyofTypeAnnotation(keyof) => {
                let argument = self.translate_type(keyof.argument)?;
                Ok(self.keyof(argument))
            }
            NodeKind::ConditionalTypeAnnotation(conditional) => {
                Ok(self.factory().create(TSConditionalType {
                    check_type: self.translate_type(conditional.check_type)?,
                    extends_type: self.translate_type(conditional.extends_type)?,
                    true_type: self.translate_type(conditional.true_type)?,
                    false_type: self.translate_type(conditional.false_type)?,
                }))
            }
            NodeKind::InferTypeAnnotation(infer) => Ok(self.factory().create(TSInferType {
                type_parameter: self.translate_type_parameter(infer.type_parameter)?,
            })),
            NodeKind::TypePredicate(predicate) => {
                if predicate.kind == Some(TypePredicateKind::Implies) {
                    return self.unsupported(node, "implies type guards");
                }
                Ok(self.factory().create(TSTypePredicate {
                    parameter_name: self.identifier(predicate.parameter_name),
                    type_annotation: predicate
                        .type_annotation
                        .map(|type_annotation| self.ts_annotation(type_annotation))
                        .transpose()?,
                    asserts: predicate.kind == Some(TypePredicateKind::Asserts),
                }))
            }
            _ => Err(self.context.unexpected_error(
                node,
                format!(
                    "Unexpected type annotation node of type {}",
                    self.kind(node).as_str()
                ),
            )),
        }
    }

    fn literal_type(&self, value: LiteralValue, raw: String) -> Result<Id<Node>, TranslationError> {
        let literal = self.factory().create(Literal {
            value,
            raw: Some(raw),
        });
        Ok(self.factory().create(TSLiteralType { literal }))
    }

    fn keyof(&self, type_annotation: Id<Node>) -> Id<Node> {
        self.factory().create(TSTypeOperator {
            operator: "keyof".to_owned(),
            type_annotation: Some(type_annotation),
        })
    }

    fn translate_interface_extends(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let NodeKind::InterfaceExtends(extends) = self.data(node) else {
            return Err(self.unexpected_node(node));
        };
        let type_parameters = self.translate_type_arguments(extends.type_parameters)?;
        Ok(self.factory().create(TSTypeReference {
            type_name: self.entity_name(extends.id),
            type_parameters,
        }))
    }

    /// Read-only tuples need every element labeled and marked `+`; TS has no
    /// per-element variance.
    fn translate_tuple(&self, types: &[Id<Node>]) -> Result<Id<Node>, TranslationError> {
        let variances = types
            .iter()
            .map(|&element| match self.data(element) {
                NodeKind::TupleTypeLabeledElement(labeled) => labeled.variance,
                _ => None,
            })
            .collect_vec();
        let all_read_only = !types.is_empty()
            && variances
                .iter()
                .all(|&variance| self.is_plus(variance));
        if !all_read_only {
            if let Some(&variance) = variances.iter().flatten().next() {
                return self.unsupported(variance, "tuple type element variance annotations");
            }
        }

        let element_types = types
            .iter()
            .map(|&element| match self.data(element) {
                NodeKind::TupleTypeLabeledElement(labeled) => {
                    Ok(self.factory().create(TSNamedTupleMember {
                        label: self.identifier(labeled.label),
                        element_type: self.translate_type(labeled.element_type)?,
                        optional: labeled.optional,
                    }))
                }
                NodeKind::TupleTypeSpreadElement(spread) => {
                    let mut type_annotation = self.translate_type(spread.type_annotation)?;
                    if let Some(label) = spread.label {
                        type_annotation = self.factory().create(TSNamedTupleMember {
                            label: self.identifier(label),
                            element_type: type_annotation,
                            optional: false,
                        });
                    }
                    Ok(self.factory().create(TSRestType { type_annotation }))
                }
                _ => self.translate_type(element),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let tuple = self.factory().create(TSTupleType { element_types });
        if !all_read_only {
            return Ok(tuple);
        }
        Ok(self.factory().create(TSTypeOperator {
            operator: "readonly".to_owned(),
            type_annotation: Some(tuple),
        }))
    }

    fn is_plus(&self, variance: Option<Id<Node>>) -> bool {
        variance.map_or(false, |variance| {
            matches!(
                &variance.ref_(self.context).data,
                NodeKind::Variance(variance) if variance.kind == VarianceKind::Plus
            )
        })
    }

    fn arity_error(&self, node: Id<Node>, name: &str, count: usize) -> TranslationError {
        let message = match count {
            0 => format!("Expected no type parameters with `{}`", name),
            1 => format!("Expected exactly 1 type parameter with `{}`", name),
            count => format!("Expected exactly {} type parameters with `{}`", count, name),
        };
        self.context.expected_error(node, message)
    }

    fn expect_type_arguments<const COUNT: usize>(
        &self,
        node: Id<Node>,
        name: &str,
        arguments: &[Id<Node>],
    ) -> Result<[Id<Node>; COUNT], TranslationError> {
        if arguments.len() != COUNT {
            return Err(self.arity_error(node, name, COUNT));
        }
        let translated = self.translate_types(arguments)?;
        Ok(std::array::from_fn(|index| translated[index]))
    }

    fn translate_generic(
        &self,
        node: Id<Node>,
        generic: GenericTypeAnnotation,
    ) -> Result<Id<Node>, TranslationError> {
        let name = self.qualified_name(generic.id);
        let arguments = self.type_argument_nodes(generic.type_parameters);
        let reference = |name: &str, params: Option<Vec<Id<Node>>>| {
            Ok(self.factory().create_ts_type_reference(name, params))
        };

        match name.as_str() {
            "$Call" | "$ObjMap" | "$ObjMapConst" | "$ObjMapi" | "$TupleMap" => {
                return self.unsupported(node, &name)
            }
            "$Diff" | "$Rest" => {
                // `Pick<A, Exclude<keyof A, keyof B>>`
                let [object, removed] = self.expect_type_arguments::<2>(node, &name, &arguments)?;
                let keys = self.keyof(self.clone_node(object));
                let removed_keys = self.keyof(removed);
                let remaining = self
                    .factory()
                    .create_ts_type_reference("Exclude", Some(vec![keys, removed_keys]));
                return reference("Pick", Some(vec![object, remaining]));
            }
            "$ElementType" | "$PropertyType" => {
                let [object_type, index_type] =
                    self.expect_type_arguments::<2>(node, &name, &arguments)?;
                return Ok(self.factory().create(TSIndexedAccessType {
                    object_type,
                    index_type,
                }));
            }
            "$Exact" => {
                let [exact] = self.expect_type_arguments::<1>(node, &name, &arguments)?;
                return Ok(exact);
            }
            "$Exports" => {
                if arguments.len() != 1 {
                    return Err(self.arity_error(node, &name, 1));
                }
                let NodeKind::StringLiteralTypeAnnotation(module) = self.data(arguments[0]) else {
                    return Err(self
                        .context
                        .expected_error(node, "$Exports must have a string literal argument"));
                };
                let parameter = self.factory().create_ts_string_literal_type(&module.value);
                return Ok(self.factory().create(TSImportType {
                    parameter,
                    qualifier: None,
                    type_parameters: None,
                    is_type_of: true,
                }));
            }
            "$FlowFixMe" => return Ok(self.factory().create_keyword(SyntaxKind::TSAnyKeyword)),
            "$KeyMirror" => {
                // `{[K in keyof T]: K}`
                let [object] = self.expect_type_arguments::<1>(node, &name, &arguments)?;
                let type_parameter = self.factory().create(TSTypeParameter {
                    name: self.factory().create_identifier("K"),
                    constraint: Some(self.keyof(object)),
                    default_: None,
                    in_: false,
                    out: false,
                });
                return Ok(self.factory().create(TSMappedType {
                    type_parameter,
                    name_type: None,
                    type_annotation: Some(self.factory().create_ts_type_reference("K", None)),
                    optional: None,
                    readonly: None,
                }));
            }
            "$Keys" => {
                let [object] = self.expect_type_arguments::<1>(node, &name, &arguments)?;
                return Ok(self.keyof(object));
            }
            "$NonMaybeType" => {
                let params = self.expect_type_arguments::<1>(node, &name, &arguments)?;
                return reference("NonNullable", Some(params.to_vec()));
            }
            "$ReadOnly" => {
                let params = self.expect_type_arguments::<1>(node, &name, &arguments)?;
                return reference("Readonly", Some(params.to_vec()));
            }
            "$ReadOnlyArray" => {
                let params = self.expect_type_arguments::<1>(node, &name, &arguments)?;
                return reference("ReadonlyArray", Some(params.to_vec()));
            }
            "$ReadOnlyMap" => {
                let params = self.expect_type_arguments::<2>(node, &name, &arguments)?;
                return reference("ReadonlyMap", Some(params.to_vec()));
            }
            "$ReadOnlySet" => {
                let params = self.expect_type_arguments::<1>(node, &name, &arguments)?;
                return reference("ReadonlySet", Some(params.to_vec()));
            }
            "$Values" => {
                // `T[keyof T]`
                let [object_type] = self.expect_type_arguments::<1>(node, &name, &arguments)?;
                let index_type = self.keyof(self.clone_node(object_type));
                return Ok(self.factory().create(TSIndexedAccessType {
                    object_type,
                    index_type,
                }));
            }
            "Class" => {
                let [instance] = self.expect_type_arguments::<1>(node, &name, &arguments)?;
                if self.kind(instance) != SyntaxKind::TSTypeReference {
                    return Err(self
                        .context
                        .expected_error(node, "Expected a type reference within Class<T>"));
                }
                return Ok(self.constructor_of(instance));
            }
            _ => {}
        }

        if name.starts_with("React.") || name.starts_with("React$") {
            if let Some(via_import) = self.react_binding(self.base_identifier(generic.id)) {
                if self.add_react_import.get() != Some(false) {
                    self.add_react_import.set(Some(!via_import));
                }
                return self.translate_react_type(node, &name, &arguments);
            }
        }

        let type_parameters = if arguments.is_empty() {
            None
        } else {
            Some(self.translate_types(&arguments)?)
        };
        Ok(self
            .factory()
            .create_ts_type_reference_to(self.entity_name(generic.id), type_parameters))
    }

    /// `new (...args: any[]) => T`
    fn constructor_of(&self, instance: Id<Node>) -> Id<Node> {
        let any = self.factory().create_keyword(SyntaxKind::TSAnyKeyword);
        let any_array = self.factory().create(TSArrayType { element_type: any });
        let args = self.factory().create(RestElement {
            argument: self.factory().create_identifier("args"),
            type_annotation: Some(self.factory().create_ts_type_annotation(any_array)),
        });
        self.factory().create(TSConstructorType {
            type_parameters: None,
            params: vec![args],
            return_type: Some(self.factory().create_ts_type_annotation(instance)),
            abstract_: false,
        })
    }

    /// `Some(true)` when `base` names a default or namespace import of
    /// `react`, `Some(false)` when it is an unbound React global, `None` when
    /// it is bound to anything else.
    fn react_binding(&self, base: Id<Node>) -> Option<bool> {
        let name = self.name_of(base);
        let scope_manager = self.context.scope_manager;
        let variable = scope_manager
            .resolve(base)
            .or_else(|| scope_manager.module_variable(&name));
        match variable {
            Some(variable) if !variable.is_implicit_global() => {
                let definition = variable.defs.first()?;
                if definition.kind != DefinitionKind::ImportBinding
                    || !matches!(
                        self.kind(definition.node),
                        SyntaxKind::ImportDefaultSpecifier | SyntaxKind::ImportNamespaceSpecifier
                    )
                {
                    return None;
                }
                let NodeKind::ImportDeclaration(import) = self.data(definition.parent?) else {
                    return None;
                };
                match self.data(import.source) {
                    NodeKind::Literal(Literal {
                        value: LiteralValue::String(source),
                        ..
                    }) if REACT_MODULE_NAMES.contains(&source.as_str()) => Some(true),
                    _ => None,
                }
            }
            _ => (name == "React" || name.starts_with("React$")).then_some(false),
        }
    }

    fn translate_react_type(
        &self,
        node: Id<Node>,
        name: &str,
        arguments: &[Id<Node>],
    ) -> Result<Id<Node>, TranslationError> {
        let Some(&react_type) = REACT_TYPES.get(name) else {
            return self.unsupported(node, name);
        };
        let reference = |target: &str, params: Option<Vec<Id<Node>>>| {
            Ok(self.factory().create_ts_type_reference(target, params))
        };
        match react_type {
            ReactType::ChildrenArray => {
                // `T | ReadonlyArray<T>`
                let [element] = self.expect_type_arguments::<1>(node, name, arguments)?;
                let array = self.factory().create_ts_type_reference(
                    "ReadonlyArray",
                    Some(vec![self.clone_node(element)]),
                );
                Ok(self.factory().create_ts_union_type(vec![element, array]))
            }
            ReactType::Component => {
                if arguments.is_empty() {
                    return Err(self.context.expected_error(
                        node,
                        format!("Expected at least 1 type parameter with `{}`", name),
                    ));
                }
                if arguments.len() > 2 {
                    return Err(self.context.expected_error(
                        node,
                        format!("Expected no more than 2 type parameters with `{}`", name),
                    ));
                }
                reference("React.Component", Some(self.translate_types(arguments)?))
            }
            ReactType::Context => {
                let params = self.expect_type_arguments::<1>(node, name, arguments)?;
                reference("React.Context", Some(params.to_vec()))
            }
            ReactType::Key => {
                self.expect_type_arguments::<0>(node, name, arguments)?;
                reference("React.Key", None)
            }
            ReactType::ElementType => {
                self.expect_type_arguments::<0>(node, name, arguments)?;
                reference("React.ElementType", None)
            }
            ReactType::Node => {
                self.expect_type_arguments::<0>(node, name, arguments)?;
                reference("React.ReactNode", None)
            }
            ReactType::Element => {
                let params = self.expect_type_arguments::<1>(node, name, arguments)?;
                reference("React.ReactElement", Some(params.to_vec()))
            }
            ReactType::ElementRef => {
                let params = self.expect_type_arguments::<1>(node, name, arguments)?;
                reference("React.ElementRef", Some(params.to_vec()))
            }
            ReactType::Fragment => {
                self.expect_type_arguments::<0>(node, name, arguments)?;
                reference("React.Fragment", None)
            }
            ReactType::MixedElement => {
                self.expect_type_arguments::<0>(node, name, arguments)?;
                reference("JSX.Element", None)
            }
            ReactType::ComponentType => {
                let params = self.expect_type_arguments::<1>(node, name, arguments)?;
                reference("React.ComponentType", Some(params.to_vec()))
            }
            ReactType::AbstractComponent => {
                // `ComponentType<Config & React.RefAttributes<Instance>>`
                let mut params = match arguments.len() {
                    1 | 2 => self.translate_types(arguments)?,
                    0 => {
                        return Err(self.context.expected_error(
                            node,
                            format!("Expected at least 1 type parameter with `{}`", name),
                        ))
                    }
                    _ => {
                        return Err(self.context.expected_error(
                            node,
                            format!("Expected no more than 2 type parameters with `{}`", name),
                        ))
                    }
                };
                let props = params.remove(0);
                let props = match params.pop() {
                    Some(instance) => {
                        let ref_attributes = self.factory().create_ts_type_reference(
                            "React.RefAttributes",
                            Some(vec![instance]),
                        );
                        self.factory().create(TSIntersectionType {
                            types: vec![props, ref_attributes],
                        })
                    }
                    None => props,
                };
                reference("React.ComponentType", Some(vec![props]))
            }
            ReactType::ElementProps => {
                let params = self.expect_type_arguments::<1>(node, name, arguments)?;
                reference("React.ComponentProps", Some(params.to_vec()))
            }
            ReactType::ElementConfig => {
                // `JSX.LibraryManagedAttributes<C, React.ComponentProps<C>>`
                let [component] = self.expect_type_arguments::<1>(node, name, arguments)?;
                let props = self.factory().create_ts_type_reference(
                    "React.ComponentProps",
                    Some(vec![self.clone_node(component)]),
                );
                reference("JSX.LibraryManagedAttributes", Some(vec![component, props]))
            }
            ReactType::Ref => {
                // `NonNullable<React.Ref<C> | string | number>`
                let params = self.expect_type_arguments::<1>(node, name, arguments)?;
                let react_ref = self
                    .factory()
                    .create_ts_type_reference("React.Ref", Some(params.to_vec()));
                let union = self.factory().create_ts_union_type(vec![
                    react_ref,
                    self.factory().create_keyword(SyntaxKind::TSStringKeyword),
                    self.factory().create_keyword(SyntaxKind::TSNumberKeyword),
                ]);
                reference("NonNullable", Some(vec![union]))
            }
        }
    }

    fn translate_object_type(
        &self,
        node: Id<Node>,
        object: ObjectTypeAnnotation,
    ) -> Result<Id<Node>, TranslationError> {
        if let [property] = object.properties.as_slice() {
            if let NodeKind::ObjectTypeMappedTypeProperty(mapped) = self.data(*property) {
                if !object.indexers.is_empty()
                    || !object.call_properties.is_empty()
                    || !object.internal_slots.is_empty()
                {
                    return self.unsupported(
                        *property,
                        "object type with mapped type property along with other properties",
                    );
                }
                return self.translate_mapped_type(mapped);
            }
        }
        if let Some(&slot) = object.internal_slots.first() {
            return self.unsupported(slot, "internal slots");
        }

        let mut members = vec![];
        for &call_property in &object.call_properties {
            let NodeKind::ObjectTypeCallProperty(call) = self.data(call_property) else {
                return Err(self.unexpected_node(call_property));
            };
            let signature = self.function_signature(call.value)?;
            let translated = self.factory().create(TSCallSignatureDeclaration {
                type_parameters: signature.type_parameters,
                params: signature.params,
                return_type: signature.return_type,
            });
            members.push((call_property, translated));
        }
        for &indexer in &object.indexers {
            let NodeKind::ObjectTypeIndexer(data) = self.data(indexer) else {
                return Err(self.unexpected_node(indexer));
            };
            members.push((indexer, self.translate_indexer(data)?));
        }

        let has_spread = object
            .properties
            .iter()
            .any(|&property| self.kind(property) == SyntaxKind::ObjectTypeSpreadProperty);
        if !has_spread {
            for &property in &object.properties {
                let translated = match self.data(property) {
                    NodeKind::ObjectTypeProperty(data) => self.translate_object_property(data)?,
                    NodeKind::ObjectTypeMappedTypeProperty(_) => {
                        return self.unsupported(
                            property,
                            "object type with mapped type property along with other properties",
                        )
                    }
                    _ => return Err(self.unexpected_node(property)),
                };
                members.push((property, translated));
            }
            return Ok(self.type_literal(members));
        }

        // Flow spreads overwrite earlier keys, TS intersections merge them:
        // omit from each spread the keys of everything after it.
        if !members.is_empty() {
            return self.unsupported(
                node,
                "object types with spreads, indexers and/or call properties at the same time",
            );
        }
        let mut spread_types = vec![];
        for &property in &object.properties {
            match self.data(property) {
                NodeKind::ObjectTypeSpreadProperty(spread) => {
                    if !members.is_empty() {
                        return self.unsupported(
                            property,
                            "object types with spreads in the middle or at the end",
                        );
                    }
                    let spread_type = self.translate_type(spread.argument)?;
                    if self.kind(spread_type) != SyntaxKind::TSTypeReference {
                        return self.unsupported(property, "object types with complex spreads");
                    }
                    spread_types.push(spread_type);
                }
                NodeKind::ObjectTypeMappedTypeProperty(_) => {
                    return self.unsupported(property, "object type with mapped type property")
                }
                NodeKind::ObjectTypeProperty(data) => {
                    members.push((property, self.translate_object_property(data)?));
                }
                _ => return Err(self.unexpected_node(property)),
            }
        }
        let object_literal = self.type_literal(members);

        // `keyof (B | C)` only names the keys B and C share, so every later
        // operand gets its own `keyof`.
        let mut intersection = vec![];
        for (index, &spread_type) in spread_types.iter().enumerate() {
            let mut later_keys = spread_types[index + 1..]
                .iter()
                .map(|&later| self.keyof(self.clone_node(later)))
                .collect_vec();
            later_keys.push(self.keyof(self.clone_node(object_literal)));
            let omitted_keys = if later_keys.len() == 1 {
                later_keys.remove(0)
            } else {
                self.factory().create_ts_union_type(later_keys)
            };
            intersection.push(
                self.factory()
                    .create_ts_type_reference("Omit", Some(vec![spread_type, omitted_keys])),
            );
        }
        intersection.push(object_literal);
        Ok(self.factory().create(TSIntersectionType {
            types: intersection,
        }))
    }

    /// Members ordered by source position.
    fn type_literal(&self, mut members: Vec<(Id<Node>, Id<Node>)>) -> Id<Node> {
        members.sort_by_key(|&(source, _)| source.ref_(self.context).range().pos());
        self.factory().create(TSTypeLiteral {
            members: members
                .into_iter()
                .map(|(_, translated)| translated)
                .collect(),
        })
    }

    fn translate_mapped_type(
        &self,
        mapped: ObjectTypeMappedTypeProperty,
    ) -> Result<Id<Node>, TranslationError> {
        let NodeKind::TypeParameter(key) = self.data(mapped.key_tparam) else {
            return Err(self.unexpected_node(mapped.key_tparam));
        };
        let type_parameter = self.factory().create(TSTypeParameter {
            name: self.factory().create_identifier(&key.name),
            constraint: Some(self.translate_type(mapped.source_type)?),
            default_: None,
            in_: false,
            out: false,
        });
        let optional = mapped.optional.map(|optional| match optional {
            MappedTypeOptionality::PlusOptional => MappedTypeModifier::Plus,
            MappedTypeOptionality::MinusOptional => MappedTypeModifier::Minus,
            MappedTypeOptionality::Optional => MappedTypeModifier::True,
        });
        Ok(self.factory().create(TSMappedType {
            type_parameter,
            name_type: None,
            type_annotation: Some(self.translate_type(mapped.prop_type)?),
            optional,
            readonly: self
                .is_plus(mapped.variance)
                .then_some(MappedTypeModifier::True),
        }))
    }

    fn translate_indexer(&self, indexer: ObjectTypeIndexer) -> Result<Id<Node>, TranslationError> {
        let name = indexer
            .id
            .map(|id| self.name_of(id))
            .unwrap_or_else(|| "$$Key$$".to_owned());
        let key_annotation = self.ts_annotation(indexer.key)?;
        let parameter =
            self.factory()
                .create_identifier_with_annotation(&name, Some(key_annotation), false);
        Ok(self.factory().create(TSIndexSignature {
            parameters: vec![parameter],
            type_annotation: Some(self.ts_annotation(indexer.value)?),
            readonly: self.is_plus(indexer.variance),
            static_: indexer.static_,
        }))
    }

    fn translate_object_property(
        &self,
        property: ObjectTypeProperty,
    ) -> Result<Id<Node>, TranslationError> {
        let key = match self.kind(property.key) {
            SyntaxKind::Identifier => self.identifier(property.key),
            _ => self.clone_node(property.key),
        };

        if property.method || property.kind != PropertyKind::Init {
            let signature = self.function_signature(property.value)?;
            let (kind, type_parameters, return_type) = match property.kind {
                PropertyKind::Init => (
                    MethodKind::Method,
                    signature.type_parameters,
                    signature.return_type,
                ),
                PropertyKind::Get => (MethodKind::Get, None, signature.return_type),
                PropertyKind::Set => (MethodKind::Set, None, None),
            };
            return Ok(self.factory().create(TSMethodSignature {
                key,
                kind,
                type_parameters,
                params: signature.params,
                return_type,
                computed: false,
                optional: property.kind == PropertyKind::Init && property.optional,
                static_: property.static_,
            }));
        }

        Ok(self.factory().create(TSPropertySignature {
            key,
            type_annotation: Some(self.ts_annotation(property.value)?),
            optional: property.optional,
            computed: false,
            readonly: self.is_plus(property.variance),
            static_: property.static_,
        }))
    }
}

/// Strips the `@flow` pragma (with its `strict`/`strict-local`/`weak` mode)
/// from a docblock, dropping lines left holding nothing else.
fn remove_flow_pragma(docblock: &str) -> String {
    docblock
        .split('\n')
        .filter_map(|line| {
            if !line.contains("@flow") {
                return Some(line.to_owned());
            }
            let stripped = regex!(r"@flow\b(?:[ \t]+(?:strict-local|strict|weak)\b)?[ \t]*")
                .replace_all(line, "");
            if regex!(r"^[ \t]*\*?[ \t]*$").is_match(&stripped) {
                None
            } else {
                Some(stripped.into_owned())
            }
        })
        .join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::*;
    use crate::testing::*;

    fn translate(body: Vec<Value>) -> (Fixture, TranslationResult) {
        let fixture = fixture(module(body));
        let result = fixture
            .run(flow_def_to_ts_def, &TranslationOptions::default())
            .unwrap();
        (fixture, result)
    }

    fn translate_alias(right: Value) -> Value {
        let (fixture, result) = translate(vec![type_alias("T", right)]);
        fixture.body(&result)[0]["typeAnnotation"].clone()
    }

    fn translate_error(body: Vec<Value>) -> TranslationError {
        fixture(module(body))
            .run(flow_def_to_ts_def, &TranslationOptions::default())
            .unwrap_err()
    }

    fn spread(name: &str) -> Value {
        json!({"type": "ObjectTypeSpreadProperty", "argument": generic(name, None)})
    }

    #[test]
    fn test_maybe_type_becomes_nullable_union() {
        let translated = translate_alias(json!({
            "type": "NullableTypeAnnotation",
            "typeAnnotation": keyword("StringTypeAnnotation"),
        }));
        assert_eq!(
            translated,
            normalize(json!({
                "type": "TSUnionType",
                "types": [
                    keyword("TSNullKeyword"),
                    keyword("TSUndefinedKeyword"),
                    keyword("TSStringKeyword"),
                ],
            }))
        );
    }

    #[rstest]
    #[case("AnyTypeAnnotation", "TSAnyKeyword")]
    #[case("MixedTypeAnnotation", "TSUnknownKeyword")]
    #[case("EmptyTypeAnnotation", "TSNeverKeyword")]
    #[case("VoidTypeAnnotation", "TSVoidKeyword")]
    #[case("NumberTypeAnnotation", "TSNumberKeyword")]
    #[case("SymbolTypeAnnotation", "TSSymbolKeyword")]
    #[case("ThisTypeAnnotation", "TSThisType")]
    fn test_keywords(#[case] flow: &str, #[case] ts: &str) {
        assert_eq!(translate_alias(keyword(flow)), normalize(keyword(ts)));
    }

    #[test]
    fn test_type_alias_declaration_shape() {
        let (fixture, result) = translate(vec![type_alias("T", keyword("StringTypeAnnotation"))]);
        assert_eq!(
            fixture.body(&result),
            vec![normalize(json!({
                "type": "TSTypeAliasDeclaration",
                "id": ident("T"),
                "typeAnnotation": keyword("TSStringKeyword"),
            }))]
        );
    }

    #[test]
    fn test_spreads_elaborate_into_omit_chain() {
        let translated = translate_alias(object_type(vec![
            spread("A"),
            spread("B"),
            object_type_property("b", keyword("StringTypeAnnotation")),
        ]));
        let literal = json!({
            "type": "TSTypeLiteral",
            "members": [{
                "type": "TSPropertySignature",
                "key": ident("b"),
                "typeAnnotation": ts_annotation(keyword("TSStringKeyword")),
            }],
        });
        let keyof = |type_annotation: Value| {
            json!({
                "type": "TSTypeOperator",
                "operator": "keyof",
                "typeAnnotation": type_annotation,
            })
        };
        let omit = |object: &str, keys: Value| {
            ts_reference("Omit", Some(vec![ts_reference(object, None), keys]))
        };
        assert_eq!(
            translated,
            normalize(json!({
                "type": "TSIntersectionType",
                "types": [
                    omit("A", json!({
                        "type": "TSUnionType",
                        "types": [keyof(ts_reference("B", None)), keyof(literal.clone())],
                    })),
                    omit("B", keyof(literal.clone())),
                    literal,
                ],
            }))
        );
    }

    #[test]
    fn test_spread_after_property_is_rejected() {
        let error = translate_error(vec![type_alias(
            "T",
            object_type(vec![
                object_type_property("a", keyword("StringTypeAnnotation")),
                spread("A"),
            ]),
        )]);
        assert!(error.is_expected());
        assert_eq!(
            error.message(),
            "Unsupported feature: Translating \"object types with spreads in the middle or at the end\" is currently not supported."
        );
    }

    fn mapped_property() -> Value {
        json!({
            "type": "ObjectTypeMappedTypeProperty",
            "keyTparam": {"type": "TypeParameter", "name": "K"},
            "propType": keyword("StringTypeAnnotation"),
            "sourceType": generic("O", None),
            "variance": {"type": "Variance", "kind": "plus"},
            "optional": "Optional",
        })
    }

    #[test]
    fn test_lone_mapped_property_becomes_mapped_type() {
        let translated = translate_alias(object_type(vec![mapped_property()]));
        assert_eq!(
            translated,
            normalize(json!({
                "type": "TSMappedType",
                "typeParameter": {
                    "type": "TSTypeParameter",
                    "name": ident("K"),
                    "constraint": ts_reference("O", None),
                },
                "typeAnnotation": keyword("TSStringKeyword"),
                "optional": true,
                "readonly": true,
            }))
        );
    }

    #[rstest]
    #[case::indexer("indexers", json!({
        "type": "ObjectTypeIndexer",
        "key": keyword("StringTypeAnnotation"),
        "value": keyword("NumberTypeAnnotation"),
    }))]
    #[case::call_property("callProperties", json!({
        "type": "ObjectTypeCallProperty",
        "value": {
            "type": "FunctionTypeAnnotation",
            "params": [],
            "returnType": keyword("VoidTypeAnnotation"),
        },
    }))]
    #[case::internal_slot("internalSlots", json!({
        "type": "ObjectTypeInternalSlot",
        "id": ident("slot"),
        "value": keyword("NumberTypeAnnotation"),
    }))]
    #[case::property("properties", object_type_property("a", keyword("NumberTypeAnnotation")))]
    fn test_mapped_property_with_other_members_is_rejected(
        #[case] field: &str,
        #[case] member: Value,
    ) {
        let mut object = object_type(vec![mapped_property()]);
        if object[field].is_null() {
            object[field] = json!([]);
        }
        object[field].as_array_mut().unwrap().push(member);
        let error = translate_error(vec![type_alias("T", object)]);
        assert!(error.is_expected());
        assert_eq!(
            error.message(),
            "Unsupported feature: Translating \"object type with mapped type property along with other properties\" is currently not supported."
        );
    }

    #[rstest]
    #[case("React$Component", 0, "Expected at least 1 type parameter with `React$Component`")]
    #[case(
        "React$Component",
        3,
        "Expected no more than 2 type parameters with `React$Component`"
    )]
    #[case(
        "React$AbstractComponent",
        0,
        "Expected at least 1 type parameter with `React$AbstractComponent`"
    )]
    #[case(
        "React$AbstractComponent",
        3,
        "Expected no more than 2 type parameters with `React$AbstractComponent`"
    )]
    fn test_react_component_arity(
        #[case] name: &str,
        #[case] count: usize,
        #[case] message: &str,
    ) {
        let arguments = (0..count)
            .map(|index| generic(&format!("P{}", index), None))
            .collect::<Vec<_>>();
        let arguments = (count > 0).then_some(arguments);
        let error = translate_error(vec![type_alias("T", generic(name, arguments))]);
        assert!(error.is_expected());
        assert_eq!(error.message(), message);
    }

    #[test]
    fn test_abstract_component_instance_becomes_ref_attributes() {
        let (fixture, result) = translate(vec![type_alias(
            "T",
            generic(
                "React$AbstractComponent",
                Some(vec![generic("Props", None), generic("Instance", None)]),
            ),
        )]);
        let body = fixture.body(&result);
        assert_eq!(body[0]["type"], "ImportDeclaration");
        let qualified = |left: &str, right: &str| {
            json!({"type": "TSQualifiedName", "left": ident(left), "right": ident(right)})
        };
        assert_eq!(
            body[1]["typeAnnotation"],
            normalize(json!({
                "type": "TSTypeReference",
                "typeName": qualified("React", "ComponentType"),
                "typeParameters": {
                    "type": "TSTypeParameterInstantiation",
                    "params": [{
                        "type": "TSIntersectionType",
                        "types": [
                            ts_reference("Props", None),
                            {
                                "type": "TSTypeReference",
                                "typeName": qualified("React", "RefAttributes"),
                                "typeParameters": {
                                    "type": "TSTypeParameterInstantiation",
                                    "params": [ts_reference("Instance", None)],
                                },
                            },
                        ],
                    }],
                },
            }))
        );
    }

    #[test]
    fn test_recover_mode_replaces_unsupported_types_with_any() {
        let fixture = fixture(module(vec![type_alias(
            "T",
            generic("$Call", Some(vec![generic("F", None)])),
        )]));
        let result = fixture.run(flow_def_to_ts_def, &recover()).unwrap();
        assert_eq!(
            fixture.body(&result)[0]["typeAnnotation"],
            normalize(keyword("TSAnyKeyword"))
        );
        assert_eq!(result.comments.len(), 1);
        assert_eq!(result.comments[0].kind, CommentKind::Block);
    }

    #[rstest]
    #[case(generic("$Keys", None), "Expected exactly 1 type parameter with `$Keys`")]
    #[case(
        generic("$Diff", Some(vec![generic("A", None)])),
        "Expected exactly 2 type parameters with `$Diff`"
    )]
    #[case(
        generic("$Exports", Some(vec![keyword("StringTypeAnnotation")])),
        "$Exports must have a string literal argument"
    )]
    fn test_utility_argument_errors(#[case] right: Value, #[case] message: &str) {
        let error = translate_error(vec![type_alias("T", right)]);
        assert!(error.is_expected());
        assert_eq!(error.message(), message);
    }

    #[test]
    fn test_keys_becomes_keyof() {
        assert_eq!(
            translate_alias(generic("$Keys", Some(vec![generic("O", None)]))),
            normalize(json!({
                "type": "TSTypeOperator",
                "operator": "keyof",
                "typeAnnotation": ts_reference("O", None),
            }))
        );
    }

    #[test]
    fn test_global_react_type_synthesizes_namespace_import() {
        let react_node = json!({
            "type": "GenericTypeAnnotation",
            "id": {
                "type": "QualifiedTypeIdentifier",
                "qualification": ident("React"),
                "id": ident("Node"),
            },
        });
        let (fixture, result) = translate(vec![type_alias("T", react_node)]);
        let body = fixture.body(&result);
        assert_eq!(body.len(), 2);
        assert_eq!(body[0]["type"], "ImportDeclaration");
        assert_eq!(body[0]["specifiers"][0]["type"], "ImportNamespaceSpecifier");
        assert_eq!(body[0]["source"]["value"], "react");
        assert_eq!(
            body[1]["typeAnnotation"]["typeName"],
            normalize(json!({
                "type": "TSQualifiedName",
                "left": ident("React"),
                "right": ident("ReactNode"),
            }))
        );
    }

    #[test]
    fn test_imported_react_type_reuses_existing_import() {
        let react_node = json!({
            "type": "GenericTypeAnnotation",
            "id": {
                "type": "QualifiedTypeIdentifier",
                "qualification": ident("React"),
                "id": ident("Node"),
            },
        });
        let (fixture, result) = translate(vec![
            import_default("React", "react"),
            type_alias("T", react_node),
        ]);
        let body = fixture.body(&result);
        assert_eq!(body.len(), 2);
        assert_eq!(body[0]["specifiers"][0]["type"], "ImportDefaultSpecifier");
    }

    #[test]
    fn test_number_enum_lowers_to_enum_and_namespace() {
        let enum_declaration = json!({
            "type": "DeclareEnum",
            "id": ident("Status"),
            "body": {
                "type": "EnumNumberBody",
                "members": [{
                    "type": "EnumNumberMember",
                    "id": ident("Active"),
                    "init": {"type": "Literal", "value": 1, "raw": "1"},
                }],
            },
        });
        let (fixture, result) = translate(vec![enum_declaration]);
        let body = fixture.body(&result);
        assert_eq!(body.len(), 2);
        assert_eq!(body[0]["type"], "TSEnumDeclaration");
        assert_eq!(body[0]["members"][0]["initializer"]["value"], 1.0);
        assert_eq!(body[1]["type"], "TSModuleDeclaration");
        let helpers = body[1]["body"]["body"]
            .as_array()
            .unwrap()
            .iter()
            .map(|export| export["declaration"]["id"]["name"].as_str().unwrap().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(helpers, ["cast", "isValid", "members", "getName"]);
        assert_eq!(
            body[1]["body"]["body"][0]["declaration"]["params"][0]["typeAnnotation"]
                ["typeAnnotation"]["types"][0]["type"],
            "TSNumberKeyword"
        );
        assert!(result.comments.is_empty());
    }

    #[test]
    fn test_runtime_helper_import_comments_the_namespace() {
        let fixture = fixture(module(vec![json!({
            "type": "DeclareEnum",
            "id": ident("E"),
            "body": {
                "type": "EnumStringBody",
                "members": [{"type": "EnumDefaultedMember", "id": ident("A")}],
            },
        })]));
        let options = TranslationOptions {
            runtime_helper_import: Some(crate::RuntimeHelperImport {
                module: "flow-enums-runtime".to_owned(),
                name: "require".to_owned(),
            }),
            ..Default::default()
        };
        let result = fixture.run(flow_def_to_ts_def, &options).unwrap();
        let body = fixture.body(&result);
        assert_eq!(body[0]["members"][0]["initializer"]["value"], "A");
        assert_eq!(result.comments.len(), 1);
        assert_eq!(result.comments[0].kind, CommentKind::Line);
        assert_eq!(
            result.comments[0].value,
            " runtime: import {require} from 'flow-enums-runtime'"
        );
    }

    #[rstest]
    #[case("EnumBooleanBody", "boolean enums")]
    #[case("EnumSymbolBody", "symbol enums")]
    fn test_unsupported_enum_bodies(#[case] body_type: &str, #[case] thing: &str) {
        let error = translate_error(vec![json!({
            "type": "DeclareEnum",
            "id": ident("E"),
            "body": {"type": body_type},
        })]);
        assert_eq!(
            error.message(),
            format!(
                "Unsupported feature: Translating \"{}\" is currently not supported.",
                thing
            )
        );
    }

    #[test]
    fn test_typeof_import_uses_placeholder_binding() {
        let (fixture, result) = translate(vec![json!({
            "type": "ImportDeclaration",
            "importKind": "typeof",
            "source": string_literal("m"),
            "specifiers": [{"type": "ImportDefaultSpecifier", "local": ident("Foo")}],
        })]);
        let body = fixture.body(&result);
        assert_eq!(body[0]["importKind"], "type");
        assert_eq!(body[0]["specifiers"][0]["local"]["name"], "$$IMPORT_TYPEOF_1$$");
        assert_eq!(
            body[1],
            normalize(json!({
                "type": "TSTypeAliasDeclaration",
                "id": ident("Foo"),
                "typeAnnotation": {"type": "TSTypeQuery", "exprName": ident("$$IMPORT_TYPEOF_1$$")},
            }))
        );
    }

    #[test]
    fn test_export_default_type_declares_placeholder_value() {
        let (fixture, result) = translate(vec![json!({
            "type": "DeclareExportDeclaration",
            "default": true,
            "declaration": keyword("StringTypeAnnotation"),
        })]);
        let body = fixture.body(&result);
        assert_eq!(body.len(), 2);
        assert_eq!(body[0]["type"], "VariableDeclaration");
        assert_eq!(body[0]["declare"], true);
        assert_eq!(
            body[0]["declarations"][0]["id"]["name"],
            EXPORT_DEFAULT_PLACEHOLDER
        );
        assert_eq!(
            body[1],
            normalize(json!({
                "type": "ExportDefaultDeclaration",
                "declaration": ident(EXPORT_DEFAULT_PLACEHOLDER),
            }))
        );
    }

    #[test]
    fn test_export_default_of_imported_value_exports_the_binding() {
        let (fixture, result) = translate(vec![
            import_default("Foo", "foo"),
            json!({
                "type": "DeclareExportDeclaration",
                "default": true,
                "declaration": generic("Foo", None),
            }),
        ]);
        let body = fixture.body(&result);
        assert_eq!(body.len(), 2);
        assert_eq!(
            body[1],
            normalize(json!({"type": "ExportDefaultDeclaration", "declaration": ident("Foo")}))
        );
    }

    #[test]
    fn test_module_exports_are_rejected() {
        let error = translate_error(vec![json!({
            "type": "DeclareModuleExports",
            "typeAnnotation": annotation(keyword("StringTypeAnnotation")),
        })]);
        assert!(error.is_expected());
        assert_eq!(error.message(), "CommonJS exports are not supported.");
    }

    #[test]
    fn test_unnamed_function_params_get_positional_names() {
        let translated = translate_alias(json!({
            "type": "FunctionTypeAnnotation",
            "params": [{"type": "FunctionTypeParam", "typeAnnotation": keyword("NumberTypeAnnotation")}],
            "rest": {"type": "FunctionTypeParam", "typeAnnotation": {
                "type": "ArrayTypeAnnotation",
                "elementType": keyword("StringTypeAnnotation"),
            }},
            "returnType": keyword("VoidTypeAnnotation"),
        }));
        assert_eq!(translated["type"], "TSFunctionType");
        assert_eq!(translated["params"][0]["name"], "$$PARAM_0$$");
        assert_eq!(translated["params"][1]["type"], "RestElement");
        assert_eq!(translated["params"][1]["argument"]["name"], "$$REST$$");
        assert_eq!(
            translated["returnType"],
            normalize(ts_annotation(keyword("TSVoidKeyword")))
        );
    }

    #[test]
    fn test_partially_readonly_tuple_is_rejected() {
        let labeled = |name: &str, variance: Option<&str>| {
            json!({
                "type": "TupleTypeLabeledElement",
                "label": ident(name),
                "elementType": keyword("NumberTypeAnnotation"),
                "variance": variance.map(|kind| json!({"type": "Variance", "kind": kind})),
            })
        };
        let error = translate_error(vec![type_alias(
            "T",
            json!({
                "type": "TupleTypeAnnotation",
                "types": [labeled("a", Some("plus")), labeled("b", None)],
            }),
        )]);
        assert_eq!(
            error.message(),
            "Unsupported feature: Translating \"tuple type element variance annotations\" is currently not supported."
        );
    }

    #[rstest]
    #[case("*\n * @flow\n * @format\n ", "*\n * @format\n ")]
    #[case("* @flow strict @format ", "* @format ")]
    #[case("*\n * @flowtype-ignore\n ", "*\n * @flowtype-ignore\n ")]
    fn test_remove_flow_pragma(#[case] docblock: &str, #[case] expected: &str) {
        assert_eq!(remove_flow_pragma(docblock), expected);
    }
}
