use id_arena::Id;
use tracing::debug;

use crate::{
    deep_clone, quote_string, ArrayTypeAnnotation, AstArena, BigIntLiteralTypeAnnotation,
    BlockStatement, BooleanLiteralTypeAnnotation, CallExpression, ClassDeclaration, ClassImplements,
    ConditionalTypeAnnotation, DeclareClass, DeclareExportDeclaration, DeclareFunction,
    DeclareInterface, DeclareModule, DeclareModuleExports, DeclareNamespace, DeclareVariable,
    ExportAllDeclaration, ExportKind, ExportNamedDeclaration, ExportSpecifier,
    FunctionTypeAnnotation, FunctionTypeParam, GenericTypeAnnotation, HasArena, ImportDeclaration,
    ImportDefaultSpecifier, ImportKind, ImportNamespaceSpecifier, ImportSpecifier, InArena,
    IndexedAccessType, InferTypeAnnotation, InterfaceDeclaration, InterfaceExtends,
    InterfaceTypeAnnotation, IntersectionTypeAnnotation, KeyofTypeAnnotation, LabeledStatement,
    Literal, LiteralValue, MappedTypeModifier, MappedTypeOptionality, MethodKind, Node, NodeFactory,
    NodeKind, NumberLiteralTypeAnnotation, ObjectTypeAnnotation, ObjectTypeCallProperty,
    ObjectTypeIndexer, ObjectTypeMappedTypeProperty, ObjectTypeProperty, Program, PropertyKind,
    QualifiedTypeIdentifier, QualifiedTypeofIdentifier, ScopeManager, StringLiteralTypeAnnotation,
    SyntaxKind, TSImportType, TSMappedType, TSModuleDeclaration, TSNamedTupleMember, TSTypeOperator,
    TSTypeParameter, TranslationContext, TranslationError, TranslationOptions, TranslationResult,
    TupleTypeAnnotation, TupleTypeLabeledElement, TupleTypeSpreadElement, TypeAlias, TypeParameter,
    TypeParameterDeclaration, TypeParameterInstantiation, TypePredicate, TypePredicateKind,
    TypeofTypeAnnotation, UnionTypeAnnotation, VariableDeclaration, VariableDeclarator,
    VariableKind, Variance, VarianceKind,
};

/// Translates a TypeScript declaration file into a Flow declaration file.
pub fn ts_def_to_flow_def(
    arena: &AstArena,
    program: Id<Node>,
    code: &str,
    scope_manager: &ScopeManager,
    options: &TranslationOptions,
) -> Result<TranslationResult, TranslationError> {
    let context = TranslationContext::new(arena, code, scope_manager, options);
    let program = TsDefToFlowDef::new(&context).translate_program(program)?;
    Ok(context.into_result(program))
}

/// The Flow halves of a TypeScript parameter list.
#[derive(Default)]
struct FunctionParams {
    this: Option<Id<Node>>,
    params: Vec<Id<Node>>,
    rest: Option<Id<Node>>,
}

/// Members of a Flow object type under construction.
#[derive(Default)]
struct ObjectMembers {
    properties: Vec<Id<Node>>,
    indexers: Vec<Id<Node>>,
    call_properties: Vec<Id<Node>>,
}

struct TsDefToFlowDef<'context, 'a> {
    context: &'context TranslationContext<'a>,
}

impl<'context, 'a> TsDefToFlowDef<'context, 'a> {
    fn new(context: &'context TranslationContext<'a>) -> Self {
        Self { context }
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
            .unsupported_annotation(node, thing, SyntaxKind::AnyTypeAnnotation)
    }

    fn keyword(&self, kind: SyntaxKind) -> Id<Node> {
        self.factory().create_keyword(kind)
    }

    fn name_of(&self, node: Id<Node>) -> String {
        match &node.ref_(self.context).data {
            NodeKind::Identifier(identifier) => identifier.name.clone(),
            _ => String::new(),
        }
    }

    fn identifier(&self, node: Id<Node>) -> Id<Node> {
        let identifier = self.factory().create_identifier(&self.name_of(node));
        identifier
            .ref_(self.context)
            .set_range(node.ref_(self.context).range());
        identifier
    }

    /// Identifiers lose their annotations; anything else is cloned as is.
    fn plain(&self, node: Id<Node>) -> Id<Node> {
        match self.kind(node) {
            SyntaxKind::Identifier => self.identifier(node),
            _ => deep_clone(self.context, node),
        }
    }

    fn translate_program(&self, program: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let NodeKind::Program(data) = self.data(program) else {
            return Err(self
                .context
                .unexpected_error(program, "Expected a Program"));
        };
        let body = self.translate_statements(&data.body)?;
        let range = self.context.range_of(program);
        Ok(self.factory().create_with_range(
            Program {
                body,
                source_type: data.source_type,
                docblock: None,
            },
            range,
        ))
    }

    fn translate_statements(&self, nodes: &[Id<Node>]) -> Result<Vec<Id<Node>>, TranslationError> {
        let mut statements = vec![];
        for &node in nodes {
            statements.extend(self.translate_statement(node)?);
        }
        Ok(statements)
    }

    fn translate_statement(&self, node: Id<Node>) -> Result<Vec<Id<Node>>, TranslationError> {
        let translated = match self.data(node) {
            NodeKind::BlockStatement(block) => {
                let body = self.translate_statements(&block.body)?;
                self.factory().create(BlockStatement { body })
            }
            NodeKind::ClassDeclaration(class) => self.translate_class(node, class)?,
            NodeKind::DebuggerStatement(_) => deep_clone(self.context, node),
            NodeKind::LabeledStatement(labeled) => {
                let mut body = self.translate_statement(labeled.body)?;
                if body.len() != 1 {
                    return Err(self
                        .context
                        .unexpected_error(labeled.body, "Unexpected array of statements"));
                }
                self.factory().create(LabeledStatement {
                    label: self.identifier(labeled.label),
                    body: body.remove(0),
                })
            }
            NodeKind::ExportAllDeclaration(export) => {
                self.factory().create(ExportAllDeclaration {
                    exported: export.exported.map(|exported| self.plain(exported)),
                    source: deep_clone(self.context, export.source),
                    export_kind: export.export_kind,
                })
            }
            NodeKind::ExportDefaultDeclaration(export) => {
                self.translate_export_default(export.declaration)?
            }
            NodeKind::ExportNamedDeclaration(export) => {
                return self.translate_export_named(node, export)
            }
            NodeKind::FunctionDeclaration(function) => self.translate_function(
                node,
                function.id,
                function.type_parameters,
                &function.params,
                function.return_type,
            )?,
            NodeKind::TSDeclareFunction(function) => self.translate_function(
                node,
                function.id,
                function.type_parameters,
                &function.params,
                function.return_type,
            )?,
            NodeKind::ImportDeclaration(import) => self.translate_import(import),
            NodeKind::TSEnumDeclaration(declaration) => {
                self.context.unsupported_flow_declaration(
                    node,
                    "enums",
                    self.identifier(declaration.id),
                    None,
                )?
            }
            NodeKind::TSExportAssignment(assignment) => {
                self.translate_export_assignment(assignment.expression)?
            }
            NodeKind::TSImportEqualsDeclaration(_) => self.translate_import_equals(node)?,
            NodeKind::TSInterfaceDeclaration(interface) => {
                self.factory().create(InterfaceDeclaration {
                    id: self.identifier(interface.id),
                    type_parameters: self.translate_type_parameters(interface.type_parameters)?,
                    extends: self.translate_interface_extends(&interface.extends)?,
                    body: self.translate_interface_body(interface.body)?,
                })
            }
            NodeKind::TSModuleDeclaration(module) => self.translate_module(node, module)?,
            NodeKind::TSNamespaceExportDeclaration(_) => return Ok(vec![]),
            NodeKind::TSTypeAliasDeclaration(alias) => self.factory().create(TypeAlias {
                id: self.identifier(alias.id),
                type_parameters: self.translate_type_parameters(alias.type_parameters)?,
                right: self.translate_type(alias.type_annotation)?,
            }),
            NodeKind::VariableDeclaration(declaration) => {
                return self.translate_variables(declaration)
            }
            NodeKind::ExpressionStatement(_) => {
                return Err(self
                    .context
                    .expected_error(node, "Unsupported expression statement"))
            }
            NodeKind::WithStatement(_) => {
                return Err(self
                    .context
                    .expected_error(node, "Unsupported with statement"))
            }
            NodeKind::BreakStatement(_)
            | NodeKind::ContinueStatement(_)
            | NodeKind::DoWhileStatement(_)
            | NodeKind::ForInStatement(_)
            | NodeKind::ForOfStatement(_)
            | NodeKind::ForStatement(_)
            | NodeKind::IfStatement(_)
            | NodeKind::ReturnStatement(_)
            | NodeKind::SwitchStatement(_)
            | NodeKind::ThrowStatement(_)
            | NodeKind::TryStatement(_)
            | NodeKind::WhileStatement(_) => {
                return Err(self
                    .context
                    .expected_error(node, "Unsupported control flow statement"))
            }
            NodeKind::EmptyStatement(_) => return Ok(vec![]),
            _ => return Err(self.unexpected_node(node)),
        };
        Ok(vec![translated])
    }

    fn declare_export(&self, declaration: Id<Node>, default_: bool) -> Id<Node> {
        self.factory().create(DeclareExportDeclaration {
            declaration: Some(declaration),
            specifiers: vec![],
            source: None,
            default_,
        })
    }

    fn translate_export_default(&self, declaration: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let translated = match self.data(declaration) {
            NodeKind::ClassDeclaration(class) => self.translate_class(declaration, class)?,
            NodeKind::FunctionDeclaration(function) => self.translate_function(
                declaration,
                function.id,
                function.type_parameters,
                &function.params,
                function.return_type,
            )?,
            NodeKind::TSDeclareFunction(function) => self.translate_function(
                declaration,
                function.id,
                function.type_parameters,
                &function.params,
                function.return_type,
            )?,
            NodeKind::Identifier(_) => self.factory().create(TypeofTypeAnnotation {
                argument: self.identifier(declaration),
                type_arguments: None,
            }),
            _ => {
                return Err(self.context.expected_error(
                    declaration,
                    format!(
                        "Unsupported export declaration: {}",
                        self.kind(declaration).as_str()
                    ),
                ))
            }
        };
        Ok(self.declare_export(translated, true))
    }

    fn translate_export_named(
        &self,
        node: Id<Node>,
        export: ExportNamedDeclaration,
    ) -> Result<Vec<Id<Node>>, TranslationError> {
        let Some(declaration) = export.declaration else {
            let specifiers = self.translate_export_specifiers(&export.specifiers)?;
            let source = export.source.map(|source| deep_clone(self.context, source));
            let translated = if export.export_kind == ExportKind::Type {
                self.factory().create(ExportNamedDeclaration {
                    declaration: None,
                    specifiers,
                    source,
                    export_kind: ExportKind::Type,
                })
            } else {
                self.factory().create(DeclareExportDeclaration {
                    declaration: None,
                    specifiers,
                    source,
                    default_: false,
                })
            };
            return Ok(vec![translated]);
        };
        let translated = match self.data(declaration) {
            NodeKind::ClassDeclaration(class) => {
                self.declare_export(self.translate_class(declaration, class)?, false)
            }
            NodeKind::FunctionDeclaration(function) => self.declare_export(
                self.translate_function(
                    declaration,
                    function.id,
                    function.type_parameters,
                    &function.params,
                    function.return_type,
                )?,
                false,
            ),
            NodeKind::TSDeclareFunction(function) => self.declare_export(
                self.translate_function(
                    declaration,
                    function.id,
                    function.type_parameters,
                    &function.params,
                    function.return_type,
                )?,
                false,
            ),
            NodeKind::TSEnumDeclaration(_) => {
                return Err(self.context.expected_error(
                    node,
                    "Unsupported export declaration: TSEnumDeclaration",
                ))
            }
            NodeKind::TSModuleDeclaration(module) => {
                let translated = self.translate_module(declaration, module)?;
                let NodeKind::DeclareNamespace(namespace) = self.data(translated) else {
                    return Err(self
                        .context
                        .expected_error(declaration, "Unsupported module declaration id"));
                };
                let specifier = self.factory().create(ExportSpecifier {
                    local: self.identifier(namespace.id),
                    exported: self.identifier(namespace.id),
                });
                let export = self.factory().create(ExportNamedDeclaration {
                    declaration: None,
                    specifiers: vec![specifier],
                    source: None,
                    export_kind: ExportKind::Value,
                });
                return Ok(vec![translated, export]);
            }
            NodeKind::TSInterfaceDeclaration(interface) => {
                let interface = self.factory().create(DeclareInterface {
                    id: self.identifier(interface.id),
                    type_parameters: self.translate_type_parameters(interface.type_parameters)?,
                    extends: self.translate_interface_extends(&interface.extends)?,
                    body: self.translate_interface_body(interface.body)?,
                });
                self.declare_export(interface, false)
            }
            NodeKind::TSTypeAliasDeclaration(alias) => {
                let alias = self.factory().create(TypeAlias {
                    id: self.identifier(alias.id),
                    type_parameters: self.translate_type_parameters(alias.type_parameters)?,
                    right: self.translate_type(alias.type_annotation)?,
                });
                self.factory().create(ExportNamedDeclaration {
                    declaration: Some(alias),
                    specifiers: vec![],
                    source: None,
                    export_kind: ExportKind::Type,
                })
            }
            NodeKind::VariableDeclaration(variables) => {
                return Ok(self
                    .translate_variables(variables)?
                    .into_iter()
                    .map(|variable| self.declare_export(variable, false))
                    .collect());
            }
            _ => return Err(self.unexpected_node(declaration)),
        };
        Ok(vec![translated])
    }

    fn translate_export_specifiers(
        &self,
        specifiers: &[Id<Node>],
    ) -> Result<Vec<Id<Node>>, TranslationError> {
        specifiers
            .iter()
            .map(|&specifier| match self.data(specifier) {
                NodeKind::ExportSpecifier(specifier) => {
                    Ok(self.factory().create(ExportSpecifier {
                        local: self.plain(specifier.local),
                        exported: self.plain(specifier.exported),
                    }))
                }
                _ => Err(self.unexpected_node(specifier)),
            })
            .collect()
    }

    fn translate_import(&self, import: ImportDeclaration) -> Id<Node> {
        let mut has_default = false;
        let specifiers = import
            .specifiers
            .iter()
            .filter_map(|&specifier| match self.data(specifier) {
                NodeKind::ImportSpecifier(specifier) => {
                    Some(self.factory().create(ImportSpecifier {
                        imported: self.plain(specifier.imported),
                        local: self.identifier(specifier.local),
                        import_kind: specifier
                            .import_kind
                            .filter(|&import_kind| import_kind != ImportKind::Value),
                    }))
                }
                NodeKind::ImportDefaultSpecifier(specifier) => {
                    has_default = true;
                    Some(self.factory().create(ImportDefaultSpecifier {
                        local: self.identifier(specifier.local),
                    }))
                }
                NodeKind::ImportNamespaceSpecifier(specifier) => {
                    Some(self.factory().create(ImportNamespaceSpecifier {
                        local: self.identifier(specifier.local),
                    }))
                }
                _ => None,
            })
            .collect();
        // A type-only default import names the type of a value.
        let import_kind = if import.import_kind == ImportKind::Type && has_default {
            ImportKind::Typeof
        } else {
            import.import_kind
        };
        self.factory().create(ImportDeclaration {
            specifiers,
            source: deep_clone(self.context, import.source),
            import_kind,
            assertions: vec![],
        })
    }

    fn translate_export_assignment(
        &self,
        expression: Id<Node>,
    ) -> Result<Id<Node>, TranslationError> {
        let type_annotation = match self.kind(expression) {
            SyntaxKind::Identifier => self.factory().create(TypeofTypeAnnotation {
                argument: self.identifier(expression),
                type_arguments: None,
            }),
            SyntaxKind::Literal => self.literal_type(expression)?,
            kind => {
                return Err(self.context.expected_error(
                    expression,
                    format!("Unsupported export assignment expression {}", kind.as_str()),
                ))
            }
        };
        let type_annotation = self.factory().create_type_annotation(type_annotation);
        Ok(self
            .factory()
            .create(DeclareModuleExports { type_annotation }))
    }

    /// `import x = require('m')` becomes `const x = require('m')`.
    fn translate_import_equals(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let NodeKind::TSImportEqualsDeclaration(declaration) = self.data(node) else {
            return Err(self.unexpected_node(node));
        };
        let module_name = match self.data(declaration.module_reference) {
            NodeKind::TSExternalModuleReference(reference) => match self.data(reference.expression)
            {
                NodeKind::Literal(Literal {
                    value: LiteralValue::String(value),
                    ..
                }) => Some(value),
                _ => None,
            },
            NodeKind::Identifier(identifier) => Some(identifier.name),
            _ => None,
        };
        let Some(module_name) = module_name else {
            return self.context.unsupported_flow_declaration(
                node,
                "import equals declaration with weird module reference",
                self.identifier(declaration.id),
                None,
            );
        };
        let callee = self.factory().create_identifier("require");
        let argument = self.factory().create_string_literal(&module_name);
        let init = self.factory().create(CallExpression {
            callee,
            type_arguments: None,
            arguments: vec![argument],
            optional: false,
        });
        let declarator = self.factory().create(VariableDeclarator {
            id: self.identifier(declaration.id),
            init: Some(init),
        });
        Ok(self.factory().create(VariableDeclaration {
            kind: VariableKind::Const,
            declarations: vec![declarator],
            declare: false,
        }))
    }

    fn translate_module(
        &self,
        node: Id<Node>,
        module: TSModuleDeclaration,
    ) -> Result<Id<Node>, TranslationError> {
        let body = match module.body {
            Some(body) => match self.data(body) {
                NodeKind::TSModuleBlock(block) => self.translate_statements(&block.body)?,
                NodeKind::TSModuleDeclaration(_) => {
                    return Err(self
                        .context
                        .expected_error(body, "nested module declarations"))
                }
                _ => return Err(self.unexpected_node(body)),
            },
            None => vec![],
        };
        if self.kind(module.id) == SyntaxKind::Literal {
            let body = self.factory().create(BlockStatement { body });
            return Ok(self.factory().create(DeclareModule {
                id: deep_clone(self.context, module.id),
                body,
            }));
        }
        if module.global {
            return self.context.unsupported_flow_declaration(
                node,
                "global declaration",
                self.identifier(module.id),
                None,
            );
        }
        let body = self.factory().create(BlockStatement { body });
        Ok(self.factory().create(DeclareNamespace {
            id: self.identifier(module.id),
            body,
        }))
    }

    fn translate_variables(
        &self,
        declaration: VariableDeclaration,
    ) -> Result<Vec<Id<Node>>, TranslationError> {
        declaration
            .declarations
            .iter()
            .map(|&declarator| {
                let NodeKind::VariableDeclarator(declarator) = self.data(declarator) else {
                    return Err(self.unexpected_node(declarator));
                };
                let NodeKind::Identifier(identifier) = self.data(declarator.id) else {
                    return Err(self
                        .context
                        .expected_error(declarator.id, "Non-identifier variable declaration"));
                };
                let type_annotation = self.annotation_type(identifier.type_annotation)?;
                let id = self.factory().create_identifier_with_annotation(
                    &identifier.name,
                    Some(self.factory().create_type_annotation(type_annotation)),
                    false,
                );
                Ok(self.factory().create(DeclareVariable {
                    id,
                    kind: declaration.kind,
                }))
            })
            .collect()
    }

    fn translate_function(
        &self,
        node: Id<Node>,
        id: Option<Id<Node>>,
        type_parameters: Option<Id<Node>>,
        params: &[Id<Node>],
        return_type: Option<Id<Node>>,
    ) -> Result<Id<Node>, TranslationError> {
        let id = id.ok_or_else(|| self.context.expected_error(node, "Missing function name"))?;
        let function = self.function_type(node, type_parameters, params, return_type, false)?;
        let id = self.factory().create_identifier_with_annotation(
            &self.name_of(id),
            Some(self.factory().create_type_annotation(function)),
            false,
        );
        Ok(self.factory().create(DeclareFunction {
            id,
            predicate: None,
        }))
    }

    fn translate_class(
        &self,
        node: Id<Node>,
        class: ClassDeclaration,
    ) -> Result<Id<Node>, TranslationError> {
        let id = class
            .id
            .ok_or_else(|| self.context.expected_error(node, "Missing class name"))?;
        let extends = match class.super_class {
            Some(super_class) => {
                let id = match self.kind(super_class) {
                    SyntaxKind::Identifier | SyntaxKind::MemberExpression => {
                        self.type_identifier(super_class)?
                    }
                    _ => {
                        return Err(self.context.unexpected_error(
                            super_class,
                            "Expected superClass to be an Identifier or Member",
                        ))
                    }
                };
                vec![self.factory().create(InterfaceExtends {
                    id,
                    type_parameters: self.translate_type_arguments(class.super_type_parameters)?,
                })]
            }
            None => vec![],
        };
        let implements = class
            .implements
            .iter()
            .map(|&implements| {
                let NodeKind::TSClassImplements(implements) = self.data(implements) else {
                    return Err(self.unexpected_node(implements));
                };
                if self.kind(implements.expression) != SyntaxKind::Identifier {
                    return Err(self.context.unexpected_error(
                        implements.expression,
                        "Expected expression to be an Identifier",
                    ));
                }
                Ok(self.factory().create(ClassImplements {
                    id: self.identifier(implements.expression),
                    type_parameters: self.translate_type_arguments(implements.type_parameters)?,
                }))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.factory().create(DeclareClass {
            id: self.identifier(id),
            type_parameters: self.translate_type_parameters(class.type_parameters)?,
            extends,
            implements,
            mixins: vec![],
            body: self.translate_class_body(class.body)?,
        }))
    }

    fn translate_class_body(&self, body: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let NodeKind::ClassBody(body) = self.data(body) else {
            return Err(self.unexpected_node(body));
        };
        let mut members = ObjectMembers::default();
        for member in body.body {
            match self.data(member) {
                NodeKind::StaticBlock(_) => {}
                NodeKind::TSIndexSignature(_) => {
                    members.indexers.push(self.translate_index_signature(member)?)
                }
                NodeKind::PropertyDefinition(property) => {
                    if self.kind(property.key) == SyntaxKind::PrivateIdentifier {
                        continue;
                    }
                    self.add_property(
                        &mut members,
                        property.key,
                        property.computed,
                        property.optional,
                        property.readonly,
                        property.static_,
                        property.type_annotation,
                    )?;
                }
                NodeKind::MethodDefinition(method) => {
                    if self.kind(method.key) == SyntaxKind::PrivateIdentifier {
                        continue;
                    }
                    let (type_parameters, params, return_type) = match self.data(method.value) {
                        NodeKind::FunctionExpression(function) => {
                            (function.type_parameters, function.params, function.return_type)
                        }
                        NodeKind::TSEmptyBodyFunctionExpression(function) => {
                            (function.type_parameters, function.params, function.return_type)
                        }
                        _ => return Err(self.unexpected_node(method.value)),
                    };
                    let value =
                        self.function_type(member, type_parameters, &params, return_type, true)?;
                    members.properties.push(self.method_property(
                        method.key,
                        method.kind,
                        method.static_,
                        false,
                        value,
                    )?);
                }
                _ => return Err(self.unexpected_node(member)),
            }
        }
        Ok(self.object_type(members, false))
    }

    fn translate_interface_body(&self, body: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let NodeKind::TSInterfaceBody(body) = self.data(body) else {
            return Err(self.unexpected_node(body));
        };
        self.translate_members(&body.body, false)
    }

    fn translate_interface_extends(
        &self,
        extends: &[Id<Node>],
    ) -> Result<Vec<Id<Node>>, TranslationError> {
        extends
            .iter()
            .map(|&heritage| {
                let NodeKind::TSInterfaceHeritage(heritage) = self.data(heritage) else {
                    return Err(self.unexpected_node(heritage));
                };
                Ok(self.factory().create(InterfaceExtends {
                    id: self.type_identifier(heritage.expression)?,
                    type_parameters: self.translate_type_arguments(heritage.type_parameters)?,
                }))
            })
            .collect()
    }

    fn object_type(&self, members: ObjectMembers, inexact: bool) -> Id<Node> {
        self.factory().create(ObjectTypeAnnotation {
            properties: members.properties,
            indexers: members.indexers,
            call_properties: members.call_properties,
            internal_slots: vec![],
            exact: false,
            inexact,
        })
    }

    /// Interface and type literal members.
    fn translate_members(
        &self,
        nodes: &[Id<Node>],
        inexact: bool,
    ) -> Result<Id<Node>, TranslationError> {
        let mut members = ObjectMembers::default();
        for &member in nodes {
            match self.data(member) {
                NodeKind::TSPropertySignature(property) => self.add_property(
                    &mut members,
                    property.key,
                    property.computed,
                    property.optional,
                    property.readonly,
                    property.static_,
                    property.type_annotation,
                )?,
                NodeKind::TSMethodSignature(method) => {
                    if method.computed {
                        return Err(self
                            .context
                            .expected_error(member, "computed method signature"));
                    }
                    let value = self.function_type(
                        member,
                        method.type_parameters,
                        &method.params,
                        method.return_type,
                        false,
                    )?;
                    members.properties.push(self.method_property(
                        method.key,
                        method.kind,
                        method.static_,
                        method.optional,
                        value,
                    )?);
                }
                NodeKind::TSCallSignatureDeclaration(signature) => {
                    let value = self.function_type(
                        member,
                        signature.type_parameters,
                        &signature.params,
                        signature.return_type,
                        false,
                    )?;
                    members
                        .call_properties
                        .push(self.factory().create(ObjectTypeCallProperty {
                            value,
                            static_: false,
                        }));
                }
                NodeKind::TSConstructSignatureDeclaration(signature) => {
                    let value = self.function_type(
                        member,
                        signature.type_parameters,
                        &signature.params,
                        signature.return_type,
                        true,
                    )?;
                    let key = self.factory().create_identifier("constructor");
                    members.properties.push(self.method_property(
                        key,
                        MethodKind::Constructor,
                        false,
                        false,
                        value,
                    )?);
                }
                NodeKind::TSIndexSignature(_) => {
                    members.indexers.push(self.translate_index_signature(member)?)
                }
                _ => return Err(self.unexpected_node(member)),
            }
        }
        Ok(self.object_type(members, inexact))
    }

    fn property_key(&self, key: Id<Node>) -> Result<Id<Node>, TranslationError> {
        match self.data(key) {
            NodeKind::Identifier(_) => Ok(self.identifier(key)),
            NodeKind::PrivateIdentifier(_) => Ok(deep_clone(self.context, key)),
            NodeKind::Literal(Literal {
                value: LiteralValue::String(_),
                ..
            }) => Ok(deep_clone(self.context, key)),
            NodeKind::Literal(Literal {
                value: LiteralValue::Number(value),
                ..
            }) => Ok(self.factory().create_string_literal(&value.to_string())),
            _ => Err(self.unexpected_node(key)),
        }
    }

    fn plus_variance(&self, readonly: bool) -> Option<Id<Node>> {
        readonly.then(|| {
            self.factory().create(Variance {
                kind: VarianceKind::Plus,
            })
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn add_property(
        &self,
        members: &mut ObjectMembers,
        key: Id<Node>,
        computed: bool,
        optional: bool,
        readonly: bool,
        static_: bool,
        type_annotation: Option<Id<Node>>,
    ) -> Result<(), TranslationError> {
        let value = self.annotation_type(type_annotation)?;
        let variance = self.plus_variance(readonly);
        if computed {
            members.indexers.push(self.factory().create(ObjectTypeIndexer {
                id: None,
                key: self.keyword(SyntaxKind::StringTypeAnnotation),
                value,
                variance,
                static_,
            }));
            return Ok(());
        }
        members.properties.push(self.factory().create(ObjectTypeProperty {
            key: self.property_key(key)?,
            value,
            variance,
            method: false,
            optional,
            static_,
            proto: false,
            kind: PropertyKind::Init,
        }));
        Ok(())
    }

    /// Optional methods have no Flow syntax and become optional function
    /// valued properties.
    fn method_property(
        &self,
        key: Id<Node>,
        kind: MethodKind,
        static_: bool,
        optional: bool,
        value: Id<Node>,
    ) -> Result<Id<Node>, TranslationError> {
        let (method, kind) = match kind {
            MethodKind::Method | MethodKind::Constructor => (!optional, PropertyKind::Init),
            MethodKind::Get => (false, PropertyKind::Get),
            MethodKind::Set => (false, PropertyKind::Set),
        };
        Ok(self.factory().create(ObjectTypeProperty {
            key: self.property_key(key)?,
            value,
            variance: None,
            method,
            optional,
            static_,
            proto: false,
            kind,
        }))
    }

    fn translate_index_signature(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let NodeKind::TSIndexSignature(signature) = self.data(node) else {
            return Err(self.unexpected_node(node));
        };
        let (id, key) = match signature.parameters.first() {
            Some(&parameter) => match self.data(parameter) {
                NodeKind::Identifier(identifier) => (
                    Some(self.factory().create_identifier(&identifier.name)),
                    self.annotation_type(identifier.type_annotation)?,
                ),
                _ => return Err(self.unexpected_node(parameter)),
            },
            None => (None, self.keyword(SyntaxKind::StringTypeAnnotation)),
        };
        Ok(self.factory().create(ObjectTypeIndexer {
            id,
            key,
            value: self.annotation_type(signature.type_annotation)?,
            variance: self.plus_variance(signature.readonly),
            static_: signature.static_,
        }))
    }

    /// The type inside an optional annotation wrapper, `any` when absent.
    fn annotation_type(&self, annotation: Option<Id<Node>>) -> Result<Id<Node>, TranslationError> {
        let Some(annotation) = annotation else {
            return Ok(self.keyword(SyntaxKind::AnyTypeAnnotation));
        };
        self.translate_type(annotation)
    }

    fn function_type(
        &self,
        node: Id<Node>,
        type_parameters: Option<Id<Node>>,
        params: &[Id<Node>],
        return_type: Option<Id<Node>>,
        allow_missing_return: bool,
    ) -> Result<Id<Node>, TranslationError> {
        let params_ = self.translate_params(params)?;
        let return_type = match return_type {
            Some(return_type) => self.translate_type(return_type)?,
            None if allow_missing_return => self.keyword(SyntaxKind::VoidTypeAnnotation),
            None => self.unsupported(node, "missing return type")?,
        };
        Ok(self.factory().create(FunctionTypeAnnotation {
            type_parameters: self.translate_type_parameters(type_parameters)?,
            this: params_.this,
            params: params_.params,
            rest: params_.rest,
            return_type,
        }))
    }

    fn function_param(
        &self,
        name: Option<&str>,
        type_annotation: Option<Id<Node>>,
        optional: bool,
    ) -> Result<Id<Node>, TranslationError> {
        let name = name.map(|name| self.factory().create_identifier(name));
        Ok(self.factory().create(FunctionTypeParam {
            name,
            type_annotation: self.annotation_type(type_annotation)?,
            optional,
        }))
    }

    fn translate_params(&self, params: &[Id<Node>]) -> Result<FunctionParams, TranslationError> {
        let mut result = FunctionParams::default();
        let mut params = params;
        if let Some((&first, rest)) = params.split_first() {
            if let NodeKind::Identifier(identifier) = self.data(first) {
                if identifier.name == "this" {
                    result.this =
                        Some(self.function_param(None, identifier.type_annotation, false)?);
                    params = rest;
                }
            }
        }
        if let Some((&last, init)) = params.split_last() {
            if let NodeKind::RestElement(rest) = self.data(last) {
                let name = match self.data(rest.argument) {
                    NodeKind::Identifier(identifier) => identifier.name,
                    _ => "$$rest$$".to_owned(),
                };
                result.rest = Some(self.function_param(Some(&name), rest.type_annotation, false)?);
                params = init;
            }
        }
        for (index, &param) in params.iter().enumerate() {
            let param = match self.data(param) {
                NodeKind::Identifier(identifier) => self.function_param(
                    Some(&identifier.name),
                    identifier.type_annotation,
                    identifier.optional,
                )?,
                NodeKind::ObjectPattern(pattern) => self.function_param(
                    Some(&format!("$$param{}$", index)),
                    pattern.type_annotation,
                    false,
                )?,
                NodeKind::ArrayPattern(pattern) => self.function_param(
                    Some(&format!("$$param{}$", index)),
                    pattern.type_annotation,
                    false,
                )?,
                _ => {
                    return Err(self.context.unexpected_error(
                        param,
                        format!("Unexpected function parameter {}", self.kind(param).as_str()),
                    ))
                }
            };
            result.params.push(param);
        }
        Ok(result)
    }

    fn translate_type_parameters(
        &self,
        node: Option<Id<Node>>,
    ) -> Result<Option<Id<Node>>, TranslationError> {
        let node = return_ok_none_if_none!(node);
        let NodeKind::TSTypeParameterDeclaration(declaration) = self.data(node) else {
            return Err(self.unexpected_node(node));
        };
        let params = declaration
            .params
            .iter()
            .map(|&param| self.translate_type_parameter(param))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(self.factory().create(TypeParameterDeclaration { params })))
    }

    fn translate_type_parameter(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let NodeKind::TSTypeParameter(TSTypeParameter {
            name,
            constraint,
            default_,
            in_,
            out,
        }) = self.data(node)
        else {
            return Err(self.unexpected_node(node));
        };
        let bound = match constraint {
            Some(constraint) => {
                let constraint = self.translate_type(constraint)?;
                Some(self.factory().create_type_annotation(constraint))
            }
            None => None,
        };
        let default_ = default_
            .map(|default_| self.translate_type(default_))
            .transpose()?;
        let variance = match (in_, out) {
            (false, true) => Some(VarianceKind::Plus),
            (true, false) => Some(VarianceKind::Minus),
            _ => None,
        }
        .map(|kind| self.factory().create(Variance { kind }));
        Ok(self.factory().create(TypeParameter {
            name: self.name_of(name),
            bound,
            variance,
            default_,
            uses_extends_bound: false,
        }))
    }

    fn translate_type_arguments(
        &self,
        node: Option<Id<Node>>,
    ) -> Result<Option<Id<Node>>, TranslationError> {
        let node = return_ok_none_if_none!(node);
        let NodeKind::TSTypeParameterInstantiation(instantiation) = self.data(node) else {
            return Err(self.unexpected_node(node));
        };
        let params = self.translate_types(&instantiation.params)?;
        Ok(Some(
            self.factory().create(TypeParameterInstantiation { params }),
        ))
    }

    fn translate_types(&self, nodes: &[Id<Node>]) -> Result<Vec<Id<Node>>, TranslationError> {
        nodes.iter().map(|&node| self.translate_type(node)).collect()
    }

    /// `A.B.C` as a Flow type identifier, from an entity name or a member
    /// expression.
    fn type_identifier(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        match self.data(node) {
            NodeKind::Identifier(_) => Ok(self.identifier(node)),
            NodeKind::ThisExpression(_) => Ok(self.factory().create_identifier("this")),
            NodeKind::TSQualifiedName(name) => Ok(self.factory().create(QualifiedTypeIdentifier {
                qualification: self.type_identifier(name.left)?,
                id: self.identifier(name.right),
            })),
            NodeKind::MemberExpression(member) if !member.computed => {
                Ok(self.factory().create(QualifiedTypeIdentifier {
                    qualification: self.type_identifier(member.object)?,
                    id: self.identifier(member.property),
                }))
            }
            _ => Err(self.unexpected_node(node)),
        }
    }

    fn typeof_identifier(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        match self.data(node) {
            NodeKind::Identifier(_) => Ok(self.identifier(node)),
            NodeKind::ThisExpression(_) => Ok(self.factory().create_identifier("this")),
            NodeKind::TSQualifiedName(name) => {
                Ok(self.factory().create(QualifiedTypeofIdentifier {
                    qualification: self.typeof_identifier(name.left)?,
                    id: self.identifier(name.right),
                }))
            }
            _ => Err(self.unexpected_node(node)),
        }
    }

    fn literal_type(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let NodeKind::Literal(literal) = self.data(node) else {
            return Err(self.unexpected_node(node));
        };
        let raw = literal.raw;
        Ok(match literal.value {
            LiteralValue::String(value) => self.factory().create(StringLiteralTypeAnnotation {
                raw: raw.unwrap_or_else(|| quote_string(&value)),
                value,
            }),
            LiteralValue::Number(value) => self.factory().create(NumberLiteralTypeAnnotation {
                value,
                raw: raw.unwrap_or_else(|| value.to_string()),
            }),
            LiteralValue::Boolean(value) => self.factory().create(BooleanLiteralTypeAnnotation {
                value,
                raw: value.to_string(),
            }),
            LiteralValue::BigInt(digits) => self.factory().create(BigIntLiteralTypeAnnotation {
                raw: raw.unwrap_or_else(|| format!("{}n", digits)),
            }),
            LiteralValue::Null => self.keyword(SyntaxKind::NullLiteralTypeAnnotation),
            LiteralValue::RegExp { .. } => self.unsupported(node, "regexp literal type")?,
        })
    }

    fn translate_literal_type(&self, node: Id<Node>, literal: Id<Node>) -> Result<Id<Node>, TranslationError> {
        match self.data(literal) {
            NodeKind::Literal(_) => self.literal_type(literal),
            NodeKind::TemplateLiteral(_) => self.unsupported(node, "template literals"),
            NodeKind::UnaryExpression(unary) if unary.operator == "-" => {
                match self.data(unary.argument) {
                    NodeKind::Literal(Literal {
                        value: LiteralValue::Number(value),
                        raw,
                    }) => Ok(self.factory().create(NumberLiteralTypeAnnotation {
                        value: -value,
                        raw: format!("-{}", raw.unwrap_or_else(|| value.to_string())),
                    })),
                    _ => self.unsupported(node, "UnaryExpression literal type"),
                }
            }
            NodeKind::UnaryExpression(_) => self.unsupported(node, "UnaryExpression literal type"),
            NodeKind::UpdateExpression(_) => {
                self.unsupported(node, "UpdateExpression literal type")
            }
            _ => Err(self.unexpected_node(literal)),
        }
    }

    fn translate_type(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        let keyword = |kind| Ok(self.keyword(kind));
        match self.data(node) {
            NodeKind::TSTypeAnnotation(annotation) => {
                self.translate_type(annotation.type_annotation)
            }
            NodeKind::TSAnyKeyword(_) => keyword(SyntaxKind::AnyTypeAnnotation),
            NodeKind::TSUnknownKeyword(_) => keyword(SyntaxKind::MixedTypeAnnotation),
            NodeKind::TSNeverKeyword(_) => keyword(SyntaxKind::EmptyTypeAnnotation),
            NodeKind::TSVoidKeyword(_) | NodeKind::TSUndefinedKeyword(_) => {
                keyword(SyntaxKind::VoidTypeAnnotation)
            }
            NodeKind::TSNullKeyword(_) => keyword(SyntaxKind::NullLiteralTypeAnnotation),
            NodeKind::TSNumberKeyword(_) => keyword(SyntaxKind::NumberTypeAnnotation),
            NodeKind::TSStringKeyword(_) => keyword(SyntaxKind::StringTypeAnnotation),
            NodeKind::TSBooleanKeyword(_) => keyword(SyntaxKind::BooleanTypeAnnotation),
            NodeKind::TSBigIntKeyword(_) => keyword(SyntaxKind::BigIntTypeAnnotation),
            NodeKind::TSSymbolKeyword(_) => keyword(SyntaxKind::SymbolTypeAnnotation),
            NodeKind::TSObjectKeyword(_) => {
                let body = self.object_type(ObjectMembers::default(), false);
                Ok(self.factory().create(InterfaceTypeAnnotation {
                    extends: vec![],
                    body,
                }))
            }
            NodeKind::TSThisType(_) => Ok(self
                .factory()
                .create_generic_type_annotation("this", None)),
            NodeKind::TSIntrinsicKeyword(_) => self.unsupported(node, "intrinsic keyword"),
            NodeKind::TSArrayType(array) => {
                let element_type = self.translate_type(array.element_type)?;
                Ok(self.factory().create(ArrayTypeAnnotation { element_type }))
            }
            NodeKind::TSConditionalType(conditional) => {
                Ok(self.factory().create(ConditionalTypeAnnotation {
                    check_type: self.translate_type(conditional.check_type)?,
                    extends_type: self.translate_type(conditional.extends_type)?,
                    true_type: self.translate_type(conditional.true_type)?,
                    false_type: self.translate_type(conditional.false_type)?,
                }))
            }
            NodeKind::TSInferType(infer) => Ok(self.factory().create(InferTypeAnnotation {
                type_parameter: self.translate_type_parameter(infer.type_parameter)?,
            })),
            NodeKind::TSIndexedAccessType(access) => {
                Ok(self.factory().create(IndexedAccessType {
                    object_type: self.translate_type(access.object_type)?,
                    index_type: self.translate_type(access.index_type)?,
                }))
            }
            NodeKind::TSIntersectionType(intersection) => {
                Ok(self.factory().create(IntersectionTypeAnnotation {
                    types: self.translate_types(&intersection.types)?,
                }))
            }
            NodeKind::TSUnionType(union) => Ok(self.factory().create(UnionTypeAnnotation {
                types: self.translate_types(&union.types)?,
            })),
            NodeKind::TSConstructorType(_) => self.unsupported(node, "constructor types"),
            NodeKind::TSTemplateLiteralType(_) => self.unsupported(node, "template literal types"),
            NodeKind::TSFunctionType(function) => self.function_type(
                node,
                function.type_parameters,
                &function.params,
                function.return_type,
                false,
            ),
            NodeKind::TSImportType(import) => self.translate_import_type(node, import),
            NodeKind::TSLiteralType(literal) => self.translate_literal_type(node, literal.literal),
            NodeKind::TSMappedType(mapped) => self.translate_mapped_type(node, mapped),
            NodeKind::TSTupleType(tuple) => {
                let types = tuple
                    .element_types
                    .iter()
                    .map(|&element| self.translate_tuple_element(element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.factory().create(TupleTypeAnnotation {
                    types,
                    inexact: false,
                }))
            }
            NodeKind::TSNamedTupleMember(_) => self.translate_tuple_element(node),
            NodeKind::TSTypeLiteral(literal) => self.translate_members(&literal.members, true),
            NodeKind::TSTypeOperator(operator) => self.translate_type_operator(node, operator),
            NodeKind::TSTypePredicate(predicate) => {
                let parameter_name = match self.kind(predicate.parameter_name) {
                    SyntaxKind::TSThisType => self.factory().create_identifier("this"),
                    _ => self.identifier(predicate.parameter_name),
                };
                let type_annotation = predicate
                    .type_annotation
                    .map(|annotation| self.translate_type(annotation))
                    .transpose()?;
                Ok(self.factory().create(TypePredicate {
                    parameter_name,
                    type_annotation,
                    kind: predicate.asserts.then_some(TypePredicateKind::Asserts),
                }))
            }
            NodeKind::TSTypeQuery(query) => Ok(self.factory().create(TypeofTypeAnnotation {
                argument: self.typeof_identifier(query.expr_name)?,
                type_arguments: self.translate_type_arguments(query.type_parameters)?,
            })),
            NodeKind::TSTypeReference(reference) => {
                Ok(self.factory().create(GenericTypeAnnotation {
                    id: self.type_identifier(reference.type_name)?,
                    type_parameters: self.translate_type_arguments(reference.type_parameters)?,
                }))
            }
            NodeKind::TSOptionalType(_) | NodeKind::TSQualifiedName(_) | NodeKind::TSRestType(_) => {
                let thing = format!("unexpected toplevel {}", self.kind(node).as_str());
                self.unsupported(node, &thing)
            }
            _ => Err(self.unexpected_node(node)),
        }
    }

    fn translate_tuple_element(&self, node: Id<Node>) -> Result<Id<Node>, TranslationError> {
        match self.data(node) {
            NodeKind::TSNamedTupleMember(TSNamedTupleMember {
                label,
                element_type,
                optional,
            }) => {
                let label = self.identifier(label);
                match self.data(element_type) {
                    NodeKind::TSRestType(rest) => {
                        Ok(self.factory().create(TupleTypeSpreadElement {
                            label: Some(label),
                            type_annotation: self.translate_type(rest.type_annotation)?,
                        }))
                    }
                    NodeKind::TSOptionalType(inner) => {
                        Ok(self.factory().create(TupleTypeLabeledElement {
                            label,
                            element_type: self.translate_type(inner.type_annotation)?,
                            variance: None,
                            optional: true,
                        }))
                    }
                    _ => Ok(self.factory().create(TupleTypeLabeledElement {
                        label,
                        element_type: self.translate_type(element_type)?,
                        variance: None,
                        optional,
                    })),
                }
            }
            NodeKind::TSRestType(rest) => Ok(self.factory().create(TupleTypeSpreadElement {
                label: None,
                type_annotation: self.translate_type(rest.type_annotation)?,
            })),
            _ => self.translate_type(node),
        }
    }

    /// `import('m').A.B` reads as `$Exports<'m'>['A']['B']`.
    fn translate_import_type(
        &self,
        node: Id<Node>,
        import: TSImportType,
    ) -> Result<Id<Node>, TranslationError> {
        let module = self.translate_type(import.parameter)?;
        let exports = self
            .factory()
            .create_generic_type_annotation("$Exports", Some(vec![module]));
        let Some(qualifier) = import.qualifier else {
            return Ok(exports);
        };
        if import.type_parameters.is_some() {
            return self.unsupported(node, "import types with type parameters");
        }
        let mut names = vec![];
        let mut current = qualifier;
        loop {
            match self.data(current) {
                NodeKind::TSQualifiedName(name) => {
                    names.push(self.name_of(name.right));
                    current = name.left;
                }
                NodeKind::Identifier(identifier) => {
                    names.push(identifier.name);
                    break;
                }
                _ => return Err(self.unexpected_node(current)),
            }
        }
        Ok(names.iter().rev().fold(exports, |object_type, name| {
            let index_type = self.factory().create_string_literal_type_annotation(name);
            self.factory().create(IndexedAccessType {
                object_type,
                index_type,
            })
        }))
    }

    fn translate_mapped_type(
        &self,
        node: Id<Node>,
        mapped: TSMappedType,
    ) -> Result<Id<Node>, TranslationError> {
        if mapped.name_type.is_some() {
            return self.unsupported(node, "mapped types with key remapping");
        }
        let NodeKind::TSTypeParameter(parameter) = self.data(mapped.type_parameter) else {
            return Err(self.unexpected_node(mapped.type_parameter));
        };
        let source_type = match parameter.constraint {
            Some(constraint) => self.translate_type(constraint)?,
            None => return Err(self.unexpected_node(mapped.type_parameter)),
        };
        let key_tparam = self.factory().create(TypeParameter {
            name: self.name_of(parameter.name),
            bound: None,
            variance: None,
            default_: None,
            uses_extends_bound: false,
        });
        let variance = match mapped.readonly {
            Some(MappedTypeModifier::True | MappedTypeModifier::Plus) => self.plus_variance(true),
            _ => None,
        };
        let optional = mapped.optional.map(|optional| match optional {
            MappedTypeModifier::Plus => MappedTypeOptionality::PlusOptional,
            MappedTypeModifier::Minus => MappedTypeOptionality::MinusOptional,
            MappedTypeModifier::True => MappedTypeOptionality::Optional,
        });
        let property = self.factory().create(ObjectTypeMappedTypeProperty {
            key_tparam,
            prop_type: self.annotation_type(mapped.type_annotation)?,
            source_type,
            variance,
            optional,
        });
        Ok(self.object_type(
            ObjectMembers {
                properties: vec![property],
                ..Default::default()
            },
            false,
        ))
    }

    fn translate_type_operator(
        &self,
        node: Id<Node>,
        operator: TSTypeOperator,
    ) -> Result<Id<Node>, TranslationError> {
        match &*operator.operator {
            "unique" => self.unsupported(node, "unique operator"),
            "keyof" => {
                let argument = self.annotation_type(operator.type_annotation)?;
                Ok(self.factory().create(KeyofTypeAnnotation { argument }))
            }
            "readonly" => {
                let Some(inner) = operator.type_annotation else {
                    return Err(self.unexpected_node(node));
                };
                match self.data(inner) {
                    NodeKind::TSArrayType(array) => {
                        let element_type = self.translate_type(array.element_type)?;
                        Ok(self
                            .factory()
                            .create_generic_type_annotation("$ReadOnlyArray", Some(vec![element_type])))
                    }
                    NodeKind::TSTupleType(_) => {
                        let tuple = self.translate_type(inner)?;
                        Ok(self
                            .factory()
                            .create_generic_type_annotation("$ReadOnly", Some(vec![tuple])))
                    }
                    _ => {
                        let thing = format!(
                            "readonly operator with inner type: {}",
                            self.kind(inner).as_str()
                        );
                        self.unsupported(node, &thing)
                    }
                }
            }
            other => {
                debug!(operator = other, "unknown type operator");
                Err(self.unexpected_node(node))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::*;
    use crate::testing::{
        fixture, generic, ident, module, normalize, recover, ts_annotation, ts_reference,
    };

    fn ts_alias(name: &str, type_annotation: Value) -> Value {
        json!({
            "type": "TSTypeAliasDeclaration",
            "id": ident(name),
            "typeAnnotation": type_annotation,
        })
    }

    /// The right-hand side of the single alias `T` translates to.
    fn alias_right(type_annotation: Value) -> Value {
        let fixture = fixture(module(vec![ts_alias("T", type_annotation)]));
        let result = fixture
            .run(ts_def_to_flow_def, &Default::default())
            .unwrap();
        fixture.body(&result)[0]["right"].clone()
    }

    fn translate_error(statement: Value) -> TranslationError {
        fixture(module(vec![statement]))
            .run(ts_def_to_flow_def, &Default::default())
            .unwrap_err()
    }

    #[rstest]
    #[case("TSUnknownKeyword", "MixedTypeAnnotation")]
    #[case("TSNeverKeyword", "EmptyTypeAnnotation")]
    #[case("TSUndefinedKeyword", "VoidTypeAnnotation")]
    #[case("TSNullKeyword", "NullLiteralTypeAnnotation")]
    #[case("TSBigIntKeyword", "BigIntTypeAnnotation")]
    fn test_keywords(#[case] ts: &str, #[case] flow: &str) {
        assert_eq!(alias_right(json!({ "type": ts }))["type"], json!(flow));
    }

    #[test]
    fn test_object_keyword_is_an_empty_interface() {
        let right = alias_right(json!({"type": "TSObjectKeyword"}));
        assert_eq!(right["type"], json!("InterfaceTypeAnnotation"));
        assert_eq!(right["body"]["properties"], json!([]));
    }

    #[test]
    fn test_readonly_array() {
        let right = alias_right(json!({
            "type": "TSTypeOperator",
            "operator": "readonly",
            "typeAnnotation": {"type": "TSArrayType", "elementType": {"type": "TSStringKeyword"}},
        }));
        assert_eq!(
            right,
            normalize(json!({
                "type": "GenericTypeAnnotation",
                "id": ident("$ReadOnlyArray"),
                "typeParameters": {
                    "type": "TypeParameterInstantiation",
                    "params": [{"type": "StringTypeAnnotation"}],
                },
            }))
        );
    }

    #[test]
    fn test_type_literal_is_inexact_with_covariant_readonly_members() {
        let right = alias_right(json!({
            "type": "TSTypeLiteral",
            "members": [{
                "type": "TSPropertySignature",
                "key": ident("a"),
                "readonly": true,
                "optional": true,
                "typeAnnotation": ts_annotation(json!({"type": "TSNumberKeyword"})),
            }],
        }));
        assert_eq!(right["inexact"], json!(true));
        let property = &right["properties"][0];
        assert_eq!(property["optional"], json!(true));
        assert_eq!(property["variance"]["kind"], json!("plus"));
        assert_eq!(property["value"]["type"], json!("NumberTypeAnnotation"));
    }

    fn mapped_type(name_type: Option<Value>) -> Value {
        json!({
            "type": "TSMappedType",
            "typeParameter": {
                "type": "TSTypeParameter",
                "name": ident("K"),
                "constraint": ts_reference("O", None),
            },
            "nameType": name_type,
            "typeAnnotation": {"type": "TSStringKeyword"},
            "readonly": "+",
            "optional": "-",
        })
    }

    #[test]
    fn test_mapped_type_becomes_single_mapped_property() {
        assert_eq!(
            alias_right(mapped_type(None)),
            normalize(json!({
                "type": "ObjectTypeAnnotation",
                "properties": [{
                    "type": "ObjectTypeMappedTypeProperty",
                    "keyTparam": {"type": "TypeParameter", "name": "K"},
                    "propType": {"type": "StringTypeAnnotation"},
                    "sourceType": generic("O", None),
                    "variance": {"type": "Variance", "kind": "plus"},
                    "optional": "MinusOptional",
                }],
            }))
        );
    }

    #[test]
    fn test_mapped_type_key_remapping_is_rejected() {
        let remapped = mapped_type(Some(json!({
            "type": "TSTypeReference",
            "typeName": ident("K"),
        })));
        let error = translate_error(ts_alias("T", remapped));
        assert!(error.is_expected());
        assert_eq!(
            error.message(),
            "Unsupported feature: Translating \"mapped types with key remapping\" is currently not supported."
        );
    }

    #[test]
    fn test_params() {
        let right = alias_right(json!({
            "type": "TSFunctionType",
            "params": [
                {
                    "type": "Identifier",
                    "name": "this",
                    "typeAnnotation": ts_annotation(json!({"type": "TSStringKeyword"})),
                },
                {"type": "ObjectPattern", "properties": []},
                {"type": "Identifier", "name": "b", "optional": true},
                {"type": "RestElement", "argument": ident("rest")},
            ],
            "returnType": ts_annotation(json!({"type": "TSVoidKeyword"})),
        }));
        assert_eq!(right["this"]["typeAnnotation"]["type"], json!("StringTypeAnnotation"));
        assert_eq!(right["params"][0]["name"]["name"], json!("$$param0$"));
        assert_eq!(right["params"][0]["typeAnnotation"]["type"], json!("AnyTypeAnnotation"));
        assert_eq!(right["params"][1]["name"]["name"], json!("b"));
        assert_eq!(right["params"][1]["optional"], json!(true));
        assert_eq!(right["rest"]["name"]["name"], json!("rest"));
    }

    #[test]
    fn test_function_type_without_return_type_is_rejected() {
        let error = translate_error(ts_alias(
            "T",
            json!({"type": "TSFunctionType", "params": []}),
        ));
        assert!(error.is_expected());
        assert!(error.message().contains("missing return type"));
    }

    #[test]
    fn test_import_type_with_qualifier() {
        let right = alias_right(json!({
            "type": "TSImportType",
            "parameter": {"type": "TSLiteralType", "literal": {"type": "Literal", "value": "m", "raw": "'m'"}},
            "qualifier": {"type": "TSQualifiedName", "left": ident("A"), "right": ident("B")},
        }));
        assert_eq!(right["type"], json!("IndexedAccessType"));
        assert_eq!(right["indexType"]["value"], json!("B"));
        assert_eq!(right["objectType"]["indexType"]["value"], json!("A"));
        let exports = &right["objectType"]["objectType"];
        assert_eq!(exports["id"]["name"], json!("$Exports"));
        assert_eq!(exports["typeParameters"]["params"][0]["value"], json!("m"));
    }

    #[test]
    fn test_negative_number_literal() {
        let right = alias_right(json!({
            "type": "TSLiteralType",
            "literal": {
                "type": "UnaryExpression",
                "operator": "-",
                "prefix": true,
                "argument": {"type": "Literal", "value": 1, "raw": "1"},
            },
        }));
        assert_eq!(right["type"], json!("NumberLiteralTypeAnnotation"));
        assert_eq!(right["value"], json!(-1));
        assert_eq!(right["raw"], json!("-1"));
    }

    #[test]
    fn test_template_literal_type() {
        let template = json!({"type": "TSTemplateLiteralType", "quasis": [], "types": []});
        let error = translate_error(ts_alias("T", template.clone()));
        assert!(error.message().contains("template literal types"));

        let fixture = fixture(module(vec![ts_alias("T", template)]));
        let result = fixture.run(ts_def_to_flow_def, &recover()).unwrap();
        assert_eq!(
            fixture.body(&result)[0]["right"]["type"],
            json!("AnyTypeAnnotation")
        );
        assert_eq!(result.comments.len(), 1);
    }

    #[test]
    fn test_string_module_becomes_declare_module() {
        let fixture = fixture(module(vec![json!({
            "type": "TSModuleDeclaration",
            "id": {"type": "Literal", "value": "m", "raw": "'m'"},
            "declare": true,
            "body": {
                "type": "TSModuleBlock",
                "body": [{
                    "type": "ExportNamedDeclaration",
                    "exportKind": "value",
                    "declaration": {
                        "type": "TSDeclareFunction",
                        "id": ident("f"),
                        "params": [],
                        "returnType": ts_annotation(json!({"type": "TSVoidKeyword"})),
                    },
                }],
            },
        })]));
        let result = fixture
            .run(ts_def_to_flow_def, &Default::default())
            .unwrap();
        let declaration = &fixture.body(&result)[0];
        assert_eq!(declaration["type"], json!("DeclareModule"));
        let export = &declaration["body"]["body"][0];
        assert_eq!(export["type"], json!("DeclareExportDeclaration"));
        assert_eq!(export["declaration"]["type"], json!("DeclareFunction"));
    }

    #[test]
    fn test_global_declaration_is_unsupported() {
        let error = translate_error(json!({
            "type": "TSModuleDeclaration",
            "id": ident("global"),
            "global": true,
            "declare": true,
            "body": {"type": "TSModuleBlock", "body": []},
        }));
        assert!(error.message().contains("global declaration"));
    }

    #[test]
    fn test_export_assignment() {
        let fixture = fixture(module(vec![json!({
            "type": "TSExportAssignment",
            "expression": ident("Foo"),
        })]));
        let result = fixture
            .run(ts_def_to_flow_def, &Default::default())
            .unwrap();
        assert_eq!(
            fixture.body(&result)[0],
            normalize(json!({
                "type": "DeclareModuleExports",
                "typeAnnotation": {
                    "type": "TypeAnnotation",
                    "typeAnnotation": {"type": "TypeofTypeAnnotation", "argument": ident("Foo")},
                },
            }))
        );
    }

    #[test]
    fn test_import_equals_becomes_require() {
        let fixture = fixture(module(vec![json!({
            "type": "TSImportEqualsDeclaration",
            "id": ident("fs"),
            "importKind": "value",
            "moduleReference": {
                "type": "TSExternalModuleReference",
                "expression": {"type": "Literal", "value": "fs", "raw": "'fs'"},
            },
        })]));
        let result = fixture
            .run(ts_def_to_flow_def, &Default::default())
            .unwrap();
        let declaration = &fixture.body(&result)[0];
        assert_eq!(declaration["kind"], json!("const"));
        let init = &declaration["declarations"][0]["init"];
        assert_eq!(init["callee"]["name"], json!("require"));
        assert_eq!(init["arguments"][0]["value"], json!("fs"));
    }

    #[test]
    fn test_enums() {
        let enum_ = json!({"type": "TSEnumDeclaration", "id": ident("E"), "members": []});
        let error = translate_error(enum_.clone());
        assert!(error.is_expected());
        assert!(error.message().contains("enums"));

        let fixture = fixture(module(vec![enum_]));
        let result = fixture.run(ts_def_to_flow_def, &recover()).unwrap();
        let alias = &fixture.body(&result)[0];
        assert_eq!(alias["type"], json!("TypeAlias"));
        assert_eq!(alias["id"]["name"], json!("E"));
        assert_eq!(alias["right"]["type"], json!("AnyTypeAnnotation"));
    }

    #[test]
    fn test_control_flow_is_rejected() {
        let error = translate_error(json!({
            "type": "IfStatement",
            "test": ident("x"),
            "consequent": {"type": "BlockStatement", "body": []},
        }));
        assert_eq!(error.message(), "Unsupported control flow statement");
    }

    #[test]
    fn test_unannotated_variable_is_any() {
        let fixture = fixture(module(vec![json!({
            "type": "VariableDeclaration",
            "kind": "let",
            "declare": true,
            "declarations": [{"type": "VariableDeclarator", "id": ident("x")}],
        })]));
        let result = fixture
            .run(ts_def_to_flow_def, &Default::default())
            .unwrap();
        let declaration = &fixture.body(&result)[0];
        assert_eq!(declaration["type"], json!("DeclareVariable"));
        assert_eq!(declaration["kind"], json!("let"));
        assert_eq!(
            declaration["id"]["typeAnnotation"]["typeAnnotation"]["type"],
            json!("AnyTypeAnnotation")
        );
    }

    #[test]
    fn test_exported_interface() {
        let fixture = fixture(module(vec![json!({
            "type": "ExportNamedDeclaration",
            "exportKind": "type",
            "declaration": {
                "type": "TSInterfaceDeclaration",
                "id": ident("I"),
                "extends": [{"type": "TSInterfaceHeritage", "expression": ident("Base")}],
                "body": {"type": "TSInterfaceBody", "body": []},
            },
        })]));
        let result = fixture
            .run(ts_def_to_flow_def, &Default::default())
            .unwrap();
        let export = &fixture.body(&result)[0];
        assert_eq!(export["type"], json!("DeclareExportDeclaration"));
        assert_eq!(export["declaration"]["type"], json!("DeclareInterface"));
        assert_eq!(
            export["declaration"]["extends"][0]["id"]["name"],
            json!("Base")
        );
    }

    #[rstest]
    #[case(false, true, Some("plus"))]
    #[case(true, false, Some("minus"))]
    #[case(true, true, None)]
    fn test_type_parameter_variance(
        #[case] in_: bool,
        #[case] out: bool,
        #[case] expected: Option<&str>,
    ) {
        let fixture = fixture(module(vec![json!({
            "type": "TSTypeAliasDeclaration",
            "id": ident("T"),
            "typeParameters": {
                "type": "TSTypeParameterDeclaration",
                "params": [{"type": "TSTypeParameter", "name": ident("X"), "in": in_, "out": out}],
            },
            "typeAnnotation": {"type": "TSAnyKeyword"},
        })]));
        let result = fixture
            .run(ts_def_to_flow_def, &Default::default())
            .unwrap();
        let param = &fixture.body(&result)[0]["typeParameters"]["params"][0];
        assert_eq!(param["name"], json!("X"));
        assert_eq!(
            param["variance"]["kind"],
            expected.map_or(Value::Null, |kind| json!(kind))
        );
    }

    #[test]
    fn test_type_default_import_is_typeof() {
        let fixture = fixture(module(vec![json!({
            "type": "ImportDeclaration",
            "importKind": "type",
            "source": {"type": "Literal", "value": "react", "raw": "'react'"},
            "specifiers": [{"type": "ImportDefaultSpecifier", "local": ident("React")}],
        })]));
        let result = fixture
            .run(ts_def_to_flow_def, &Default::default())
            .unwrap();
        assert_eq!(fixture.body(&result)[0]["importKind"], json!("typeof"));
    }
}
