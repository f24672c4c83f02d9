use std::collections::HashMap;

use id_arena::Id;
use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::{
    for_each_descendant, is_expression, is_identifier, node_with, transform, AstArena,
    BigIntLiteralTypeAnnotation, BooleanLiteralTypeAnnotation, Debug_, DeclareClass,
    DeclareExportDeclaration, DeclareFunction, DeclareModuleExports, DeclareOpaqueType,
    DeclareVariable, DeclaredPredicate, ExportKind, ExportNamedDeclaration, FunctionTypeAnnotation,
    FunctionTypeParam, HasArena, InArena, InterfaceExtends, LiteralValue, MethodKind, Node,
    NodeFactory, NodeKind, NumberLiteralTypeAnnotation, ObjectTypeAnnotation, ObjectTypeProperty,
    ObjectTypeSpreadProperty, Program, PropertyKind, QualifiedTypeIdentifier, ScopeManager,
    StringLiteralTypeAnnotation, SyntaxKind, TranslationContext, TranslationError,
    TranslationOptions, TranslationResult, TypeofTypeAnnotation, VisitResult,
};

type Dependencies = IndexSet<String>;
type Translated = (Id<Node>, Dependencies);

/// Reduces a Flow implementation module to the declarations its exports
/// need: exported statements become declaration-only forms, and every
/// top-level statement those forms (transitively) reference is kept, in
/// source order. Everything else is dropped.
pub fn flow_to_flow_def(
    arena: &AstArena,
    program: Id<Node>,
    code: &str,
    scope_manager: &ScopeManager,
    options: &TranslationOptions,
) -> Result<TranslationResult, TranslationError> {
    let context = TranslationContext::new(arena, code, scope_manager, options);
    let program = FlowToFlowDef::new(&context, program).translate_program()?;
    Ok(context.into_result(program))
}

struct FunctionParts {
    type_parameters: Option<Id<Node>>,
    params: Vec<Id<Node>>,
    return_type: Option<Id<Node>>,
    body: Id<Node>,
    async_: bool,
    generator: bool,
    expression_body: bool,
}

struct FlowToFlowDef<'context, 'a> {
    context: &'context TranslationContext<'a>,
    program: Id<Node>,
    /// Every node of the input mapped to the top-level statement holding it.
    /// Built before any conversion reparents reused subtrees.
    top_level_statements: HashMap<Id<Node>, Id<Node>>,
    seen_dependencies: Dependencies,
    processed: IndexSet<Id<Node>>,
    pending: IndexSet<Id<Node>>,
    translated: HashMap<Id<Node>, Id<Node>>,
}

impl<'context, 'a> FlowToFlowDef<'context, 'a> {
    fn new(context: &'context TranslationContext<'a>, program: Id<Node>) -> Self {
        Self {
            context,
            program,
            top_level_statements: Default::default(),
            seen_dependencies: Default::default(),
            processed: Default::default(),
            pending: Default::default(),
            translated: Default::default(),
        }
    }

    fn factory(&self) -> &NodeFactory<'a> {
        &self.context.factory
    }

    fn data(&self, node: Id<Node>) -> NodeKind {
        node.ref_(self.context).data.clone()
    }

    fn kind_name(&self, node: Id<Node>) -> &'static str {
        self.context.kind_of(node).as_str()
    }

    fn dependencies(&self, node: Id<Node>) -> Dependencies {
        self.context
            .scope_manager
            .type_dependencies(self.context, node)
    }

    fn optional_dependencies(&self, node: Option<Id<Node>>) -> Dependencies {
        node.map(|node| self.dependencies(node)).unwrap_or_default()
    }

    fn translate_program(mut self) -> Result<Id<Node>, TranslationError> {
        let NodeKind::Program(program) = self.data(self.program) else {
            return Err(self
                .context
                .unexpected_error(self.program, "Expected a Program"));
        };

        let mut top_level_statements = HashMap::new();
        for &statement in &program.body {
            for_each_descendant(self.context, statement, &mut |node| {
                top_level_statements.insert(node, statement);
            });
        }
        self.top_level_statements = top_level_statements;

        for &statement in &program.body {
            if let Some((translated, dependencies)) = self.convert_export(statement)? {
                self.processed.insert(statement);
                self.translated.insert(statement, translated);
                self.update_pending_statements(dependencies)?;
            }
        }
        debug!(exports = self.processed.len(), "seeded declaration surface");

        while let Some(statement) = self.pending.iter().next().copied() {
            self.pending.shift_remove(&statement);
            self.processed.insert(statement);
            let (translated, dependencies) = self.convert_statement(statement)?;
            self.translated.insert(statement, translated);
            self.update_pending_statements(dependencies)?;
        }
        debug!(
            statements = self.processed.len(),
            dependencies = self.seen_dependencies.len(),
            "reached fixpoint"
        );

        let body = program
            .body
            .iter()
            .filter_map(|statement| {
                let translated = *self.translated.get(statement)?;
                translated
                    .ref_(self.context)
                    .set_range(statement.ref_(self.context).range());
                Some(translated)
            })
            .collect();
        let range = self.context.range_of(self.program);
        let result = self.factory().create_with_range(
            Program {
                body,
                source_type: program.source_type,
                docblock: program.docblock,
            },
            range,
        );
        Ok(self.strip_unused_import_specifiers(result))
    }

    fn update_pending_statements(
        &mut self,
        dependencies: Dependencies,
    ) -> Result<(), TranslationError> {
        let scope_manager = self.context.scope_manager;
        for name in dependencies {
            if !self.seen_dependencies.insert(name.clone()) {
                continue;
            }
            trace!(dependency = %name, "discovered dependency");
            let variable = scope_manager.module_variable(&name).ok_or_else(|| {
                self.context.unexpected_error(
                    self.program,
                    format!("Variable for dependency \"{}\" not found", name),
                )
            })?;
            for def in &variable.defs {
                let statement = *self.top_level_statements.get(&def.node).ok_or_else(|| {
                    self.context.unexpected_error(
                        def.node,
                        format!("Detached node of type {}", self.kind_name(def.node)),
                    )
                })?;
                if !self.processed.contains(&statement) {
                    self.pending.insert(statement);
                }
            }
        }
        Ok(())
    }

    /// Narrows every kept import down to the specifiers whose local name is
    /// still depended on. Imports left without specifiers are dropped;
    /// untouched imports keep their identity.
    fn strip_unused_import_specifiers(&self, program: Id<Node>) -> Id<Node> {
        let context = self.context;
        let result = transform(context, program, |node| match self.data(node) {
            NodeKind::Program(_) => VisitResult::Keep,
            NodeKind::ImportDeclaration(import) => {
                let specifiers = import
                    .specifiers
                    .iter()
                    .copied()
                    .filter(|&specifier| {
                        self.specifier_local_name(specifier)
                            .map_or(false, |name| self.seen_dependencies.contains(&name))
                    })
                    .collect::<Vec<_>>();
                if specifiers.is_empty() {
                    trace!("dropping import without used specifiers");
                    return VisitResult::Remove;
                }
                let updated = node_with(context, node, |data| {
                    if let NodeKind::ImportDeclaration(import) = data {
                        import.specifiers = specifiers;
                    }
                });
                if updated == node {
                    VisitResult::Skip
                } else {
                    VisitResult::Replace(updated)
                }
            }
            _ => VisitResult::Skip,
        });
        Debug_.check_defined(result, Some("The program itself is never removed."))
    }

    fn specifier_local_name(&self, specifier: Id<Node>) -> Option<String> {
        let local = match self.data(specifier) {
            NodeKind::ImportSpecifier(specifier) => specifier.local,
            NodeKind::ImportDefaultSpecifier(specifier) => specifier.local,
            NodeKind::ImportNamespaceSpecifier(specifier) => specifier.local,
            NodeKind::ExportSpecifier(specifier) => specifier.local,
            _ => return None,
        };
        self.identifier_name(local)
    }

    fn identifier_name(&self, node: Id<Node>) -> Option<String> {
        match &node.ref_(self.context).data {
            NodeKind::Identifier(identifier) => Some(identifier.name.clone()),
            _ => None,
        }
    }

    fn is_member_of(&self, node: Id<Node>, object: &str, property: &str) -> bool {
        let NodeKind::MemberExpression(member) = self.data(node) else {
            return false;
        };
        !member.computed
            && self.identifier_name(member.object).as_deref() == Some(object)
            && self.identifier_name(member.property).as_deref() == Some(property)
    }

    fn convert_export(&self, statement: Id<Node>) -> Result<Option<Translated>, TranslationError> {
        Ok(Some(match self.data(statement) {
            NodeKind::ExportNamedDeclaration(export) => match export.declaration {
                Some(declaration) => self.convert_export_declaration(declaration, false)?,
                None => {
                    let dependencies = if export.source.is_none() {
                        export
                            .specifiers
                            .iter()
                            .filter_map(|&specifier| self.specifier_local_name(specifier))
                            .collect()
                    } else {
                        Dependencies::new()
                    };
                    (statement, dependencies)
                }
            },
            NodeKind::ExportDefaultDeclaration(export) => {
                match self.identifier_name(export.declaration) {
                    Some(name) => {
                        let argument = self.factory().create_identifier(&name);
                        let declaration = self.factory().create(TypeofTypeAnnotation {
                            argument,
                            type_arguments: None,
                        });
                        (
                            self.declare_export(declaration, true),
                            self.dependencies(export.declaration),
                        )
                    }
                    None => self.convert_export_declaration(export.declaration, true)?,
                }
            }
            NodeKind::ExportAllDeclaration(_) | NodeKind::DeclareExportAllDeclaration(_) => {
                (statement, Dependencies::new())
            }
            NodeKind::DeclareExportDeclaration(_) | NodeKind::DeclareModuleExports(_) => {
                (statement, self.dependencies(statement))
            }
            NodeKind::ExpressionStatement(expression_statement) => {
                let NodeKind::AssignmentExpression(assignment) =
                    self.data(expression_statement.expression)
                else {
                    return Ok(None);
                };
                let NodeKind::MemberExpression(member) = self.data(assignment.left) else {
                    return Ok(None);
                };
                if self.is_member_of(assignment.left, "module", "exports") {
                    let (type_annotation, dependencies) =
                        self.convert_expression_to_type_annotation(assignment.right)?;
                    let type_annotation = self.factory().create_type_annotation(type_annotation);
                    (
                        self.factory()
                            .create(DeclareModuleExports { type_annotation }),
                        dependencies,
                    )
                } else if self.identifier_name(member.object).as_deref() == Some("exports")
                    || self.is_member_of(member.object, "module", "exports")
                {
                    return Err(self.context.expected_error(
                        statement,
                        "convertExport: Named CommonJS exports not supported. Use either `module.exports = {...}` or ES6 exports.",
                    ));
                } else {
                    return Ok(None);
                }
            }
            _ => return Ok(None),
        }))
    }

    fn declare_export(&self, declaration: Id<Node>, default_: bool) -> Id<Node> {
        self.factory().create(DeclareExportDeclaration {
            declaration: Some(declaration),
            specifiers: vec![],
            source: None,
            default_,
        })
    }

    fn export_named(&self, declaration: Id<Node>, export_kind: ExportKind) -> Id<Node> {
        self.factory().create(ExportNamedDeclaration {
            declaration: Some(declaration),
            specifiers: vec![],
            source: None,
            export_kind,
        })
    }

    fn convert_export_declaration(
        &self,
        declaration: Id<Node>,
        default_: bool,
    ) -> Result<Translated, TranslationError> {
        let reject_default = |message: &str| -> Result<(), TranslationError> {
            if default_ {
                return Err(self.context.expected_error(declaration, message));
            }
            Ok(())
        };
        let kind = declaration.ref_(self.context).kind();
        Ok(match kind {
            SyntaxKind::FunctionDeclaration => {
                let (declared, dependencies) = self.convert_function_declaration(declaration)?;
                (self.declare_export(declared, default_), dependencies)
            }
            SyntaxKind::ClassDeclaration => {
                let (declared, dependencies) = self.convert_class_declaration(declaration)?;
                (self.declare_export(declared, default_), dependencies)
            }
            SyntaxKind::InterfaceDeclaration => {
                reject_default("ExportDeclaration: Default interface found, invalid AST.")?;
                (
                    self.export_named(declaration, ExportKind::Type),
                    self.dependencies(declaration),
                )
            }
            SyntaxKind::TypeAlias => {
                reject_default("ExportDeclaration: Default type alias found, invalid AST.")?;
                (
                    self.export_named(declaration, ExportKind::Type),
                    self.dependencies(declaration),
                )
            }
            SyntaxKind::OpaqueType => {
                reject_default("ExportDeclaration: Default opaque type found, invalid AST.")?;
                let (declared, dependencies) = self.convert_opaque_type(declaration)?;
                (self.declare_export(declared, false), dependencies)
            }
            SyntaxKind::VariableDeclaration => {
                reject_default(
                    "ExportDeclaration: Default VariableDeclaration found, invalid AST.",
                )?;
                let (declared, dependencies) = self.convert_variable_declaration(declaration)?;
                (self.declare_export(declared, false), dependencies)
            }
            SyntaxKind::EnumDeclaration => (
                self.export_named(declaration, ExportKind::Value),
                Dependencies::new(),
            ),
            _ if is_expression(&declaration.ref_(self.context)) => {
                if !default_ {
                    return Err(self.context.expected_error(
                        declaration,
                        "ExportDeclaration: Non default expression found, invalid AST.",
                    ));
                }
                let (type_annotation, dependencies) =
                    self.convert_expression_to_type_annotation(declaration)?;
                (self.declare_export(type_annotation, true), dependencies)
            }
            kind => {
                return Err(self.context.expected_error(
                    declaration,
                    format!(
                        "ExportDeclaration: Unsupported declaration of type \"{}\".",
                        kind.as_str()
                    ),
                ))
            }
        })
    }

    fn convert_statement(&self, statement: Id<Node>) -> Result<Translated, TranslationError> {
        match self.context.kind_of(statement) {
            SyntaxKind::FunctionDeclaration => self.convert_function_declaration(statement),
            SyntaxKind::ClassDeclaration => self.convert_class_declaration(statement),
            SyntaxKind::OpaqueType => self.convert_opaque_type(statement),
            SyntaxKind::ImportDeclaration => self.convert_import_declaration(statement),
            SyntaxKind::VariableDeclaration => self.convert_variable_declaration(statement),
            SyntaxKind::InterfaceDeclaration
            | SyntaxKind::TypeAlias
            | SyntaxKind::DeclareTypeAlias
            | SyntaxKind::DeclareOpaqueType
            | SyntaxKind::DeclareInterface
            | SyntaxKind::DeclareClass
            | SyntaxKind::DeclareFunction
            | SyntaxKind::DeclareVariable
            | SyntaxKind::DeclareEnum
            | SyntaxKind::DeclareModule
            | SyntaxKind::DeclareNamespace
            | SyntaxKind::DeclareModuleExports
            | SyntaxKind::DeclareExportDeclaration
            | SyntaxKind::DeclareExportAllDeclaration
            | SyntaxKind::EnumDeclaration => Ok((statement, self.dependencies(statement))),
            kind => Err(self.context.unexpected_error(
                statement,
                format!("Statement: Unsupported statement type of \"{}\"", kind.as_str()),
            )),
        }
    }

    fn convert_import_declaration(&self, import: Id<Node>) -> Result<Translated, TranslationError> {
        let NodeKind::ImportDeclaration(data) = self.data(import) else {
            Debug_.fail_bad_syntax_kind(import.ref_(self.context).kind(), None);
        };
        if !data.assertions.is_empty() {
            return Err(self
                .context
                .expected_error(import, "ImportDeclaration: assertions not supported"));
        }
        Ok((import, Dependencies::new()))
    }

    fn convert_opaque_type(&self, opaque: Id<Node>) -> Result<Translated, TranslationError> {
        let NodeKind::OpaqueType(data) = self.data(opaque) else {
            Debug_.fail_bad_syntax_kind(opaque.ref_(self.context).kind(), None);
        };
        let mut dependencies = self.optional_dependencies(data.supertype);
        dependencies.extend(self.optional_dependencies(data.type_parameters));
        Ok((
            self.factory().create(DeclareOpaqueType {
                id: data.id,
                type_parameters: data.type_parameters,
                impltype: None,
                supertype: data.supertype,
            }),
            dependencies,
        ))
    }

    fn convert_variable_declaration(
        &self,
        declaration: Id<Node>,
    ) -> Result<Translated, TranslationError> {
        let NodeKind::VariableDeclaration(data) = self.data(declaration) else {
            Debug_.fail_bad_syntax_kind(declaration.ref_(self.context).kind(), None);
        };
        let [declarator] = data.declarations[..] else {
            return Err(self.context.expected_error(
                declaration,
                "VariableDeclaration: more than one VariableDeclarators found",
            ));
        };
        let NodeKind::VariableDeclarator(declarator_data) = self.data(declarator) else {
            Debug_.fail_bad_syntax_kind(declarator.ref_(self.context).kind(), None);
        };
        let NodeKind::Identifier(id) = self.data(declarator_data.id) else {
            return Err(self.context.expected_error(
                declarator_data.id,
                "VariableDeclaration: unsupported destructing",
            ));
        };

        let (type_annotation, dependencies) =
            match (self.type_annotation_type(id.type_annotation), declarator_data.init) {
                (Some(type_annotation), _) => {
                    (type_annotation, self.dependencies(type_annotation))
                }
                (None, None) => (
                    self.context.flow_fix_me_or_error(
                        declarator,
                        "VariableDeclaration: Type annotation missing",
                    )?,
                    Dependencies::new(),
                ),
                (None, Some(init)) => match self.identifier_name(init) {
                    Some(name) => {
                        let argument = self.factory().create_identifier(&name);
                        (
                            self.factory().create(TypeofTypeAnnotation {
                                argument,
                                type_arguments: None,
                            }),
                            self.dependencies(init),
                        )
                    }
                    None => self.convert_expression_to_type_annotation(init)?,
                },
            };

        let type_annotation = self.factory().create_type_annotation(type_annotation);
        let id = self
            .factory()
            .create_identifier_with_annotation(&id.name, Some(type_annotation), false);
        Ok((
            self.factory().create(DeclareVariable {
                id,
                kind: data.kind,
            }),
            dependencies,
        ))
    }

    /// The type inside a `TypeAnnotation` wrapper.
    fn type_annotation_type(&self, annotation: Option<Id<Node>>) -> Option<Id<Node>> {
        let annotation = annotation?;
        match &annotation.ref_(self.context).data {
            NodeKind::TypeAnnotation(wrapper) => Some(wrapper.type_annotation),
            _ => Some(annotation),
        }
    }

    fn convert_type_annotation(
        &self,
        annotation: Option<Id<Node>>,
        container: Id<Node>,
    ) -> Result<Translated, TranslationError> {
        match self.type_annotation_type(annotation) {
            Some(type_annotation) => Ok((type_annotation, self.dependencies(type_annotation))),
            None => Ok((
                self.context.flow_fix_me_or_error(
                    container,
                    "TypeAnnotationType: Type annotation missing",
                )?,
                Dependencies::new(),
            )),
        }
    }

    fn convert_function_declaration(
        &self,
        function: Id<Node>,
    ) -> Result<Translated, TranslationError> {
        let NodeKind::FunctionDeclaration(data) = self.data(function) else {
            Debug_.fail_bad_syntax_kind(function.ref_(self.context).kind(), None);
        };
        let name = data
            .id
            .and_then(|id| self.identifier_name(id))
            .ok_or_else(|| {
                self.context
                    .expected_error(function, "FunctionDeclaration: Missing name")
            })?;
        let (function_type, mut dependencies) = self.convert_a_function(function, false)?;

        let predicate = match data.predicate {
            None => None,
            Some(_) => {
                let value = self.single_returned_expression(data.body).ok_or_else(|| {
                    self.context
                        .expected_error(function, "FunctionDeclaration: Invalid predicate function.")
                })?;
                dependencies.extend(self.dependencies(value));
                Some(self.factory().create(DeclaredPredicate { value }))
            }
        };

        let type_annotation = self.factory().create_type_annotation(function_type);
        let id = self
            .factory()
            .create_identifier_with_annotation(&name, Some(type_annotation), false);
        Ok((
            self.factory().create(DeclareFunction { id, predicate }),
            dependencies,
        ))
    }

    /// `expr` for a body that is exactly `{ return expr; }`.
    fn single_returned_expression(&self, body: Id<Node>) -> Option<Id<Node>> {
        let NodeKind::BlockStatement(block) = self.data(body) else {
            return None;
        };
        let [statement] = block.body[..] else {
            return None;
        };
        match self.data(statement) {
            NodeKind::ReturnStatement(statement) => statement.argument,
            _ => None,
        }
    }

    fn function_parts(&self, function: Id<Node>) -> Option<FunctionParts> {
        Some(match self.data(function) {
            NodeKind::FunctionDeclaration(data) => FunctionParts {
                type_parameters: data.type_parameters,
                params: data.params,
                return_type: data.return_type,
                body: data.body,
                async_: data.async_,
                generator: data.generator,
                expression_body: false,
            },
            NodeKind::FunctionExpression(data) => FunctionParts {
                type_parameters: data.type_parameters,
                params: data.params,
                return_type: data.return_type,
                body: data.body,
                async_: data.async_,
                generator: data.generator,
                expression_body: false,
            },
            NodeKind::ArrowFunctionExpression(data) => FunctionParts {
                type_parameters: data.type_parameters,
                params: data.params,
                return_type: data.return_type,
                body: data.body,
                async_: data.async_,
                generator: false,
                expression_body: data.expression
                    || data.body.ref_(self.context).kind() != SyntaxKind::BlockStatement,
            },
            _ => return None,
        })
    }

    fn convert_a_function(
        &self,
        function: Id<Node>,
        is_constructor: bool,
    ) -> Result<Translated, TranslationError> {
        let parts = self.function_parts(function).ok_or_else(|| {
            self.context.unexpected_error(
                function,
                format!("Expected a function, got {}", self.kind_name(function)),
            )
        })?;

        let (return_type, mut dependencies) = if is_constructor {
            (
                self.factory().create_keyword(SyntaxKind::VoidTypeAnnotation),
                Dependencies::new(),
            )
        } else {
            match self.type_annotation_type(parts.return_type) {
                Some(return_type) => (return_type, self.dependencies(return_type)),
                None => (self.infer_return_type(function, &parts)?, Dependencies::new()),
            }
        };

        let mut this = None;
        let mut params = vec![];
        let mut rest = None;
        for &param in &parts.params {
            match self.data(param) {
                NodeKind::Identifier(identifier) if identifier.name == "this" => {
                    let (type_annotation, param_dependencies) =
                        self.convert_type_annotation(identifier.type_annotation, param)?;
                    dependencies.extend(param_dependencies);
                    this = Some(self.factory().create(FunctionTypeParam {
                        name: None,
                        type_annotation,
                        optional: false,
                    }));
                }
                NodeKind::Identifier(_) | NodeKind::ArrayPattern(_) | NodeKind::ObjectPattern(_) => {
                    let (param, param_dependencies) =
                        self.convert_binding_to_function_type_param(param, None)?;
                    dependencies.extend(param_dependencies);
                    params.push(param);
                }
                NodeKind::AssignmentPattern(pattern) => {
                    let (param, param_dependencies) =
                        self.convert_binding_to_function_type_param(pattern.left, None)?;
                    dependencies.extend(param_dependencies);
                    params.push(param);
                }
                NodeKind::RestElement(element) => {
                    if rest.is_some() {
                        return Err(self.context.expected_error(
                            param,
                            "FunctionParameter: Multiple rest elements found",
                        ));
                    }
                    let (param, param_dependencies) = self.convert_binding_to_function_type_param(
                        element.argument,
                        element.type_annotation,
                    )?;
                    dependencies.extend(param_dependencies);
                    rest = Some(param);
                }
                _ => {
                    return Err(self.context.unexpected_error(
                        param,
                        format!(
                            "FunctionParameter: Unsupported parameter of type \"{}\"",
                            self.kind_name(param)
                        ),
                    ))
                }
            }
        }
        dependencies.extend(self.optional_dependencies(parts.type_parameters));

        Ok((
            self.factory().create(FunctionTypeAnnotation {
                type_parameters: parts.type_parameters,
                this,
                params,
                rest,
                return_type,
            }),
            dependencies,
        ))
    }

    fn convert_binding_to_function_type_param(
        &self,
        pattern: Id<Node>,
        fallback_annotation: Option<Id<Node>>,
    ) -> Result<Translated, TranslationError> {
        let (name, annotation, optional) = match self.data(pattern) {
            NodeKind::Identifier(identifier) => (
                Some(identifier.name),
                identifier.type_annotation,
                identifier.optional,
            ),
            NodeKind::ObjectPattern(object) => (None, object.type_annotation, false),
            NodeKind::ArrayPattern(array) => (None, array.type_annotation, false),
            _ => (None, None, false),
        };
        let (type_annotation, dependencies) =
            self.convert_type_annotation(annotation.or(fallback_annotation), pattern)?;
        Ok((
            self.factory().create(FunctionTypeParam {
                name: name.map(|name| self.factory().create_identifier(&name)),
                type_annotation,
                optional,
            }),
            dependencies,
        ))
    }

    /// The return type of an unannotated function: `void` (wrapped in
    /// `Promise`/`Generator` for async and generator functions). Functions
    /// that visibly return a value need an annotation.
    fn infer_return_type(
        &self,
        function: Id<Node>,
        parts: &FunctionParts,
    ) -> Result<Id<Node>, TranslationError> {
        if parts.expression_body || self.returns_value(parts.body) {
            return self
                .context
                .flow_fix_me_or_error(function, "TypeAnnotationType: Type annotation missing");
        }
        let wrapper = match (parts.async_, parts.generator) {
            (false, false) => {
                return Ok(self.factory().create_keyword(SyntaxKind::VoidTypeAnnotation))
            }
            (true, false) => ("Promise", 1),
            (false, true) => ("Generator", 3),
            (true, true) => ("AsyncGenerator", 3),
        };
        let params = (0..wrapper.1)
            .map(|_| self.factory().create_keyword(SyntaxKind::VoidTypeAnnotation))
            .collect();
        Ok(self
            .factory()
            .create_generic_type_annotation(wrapper.0, Some(params)))
    }

    fn returns_value(&self, body: Id<Node>) -> bool {
        let mut found = false;
        transform(self.context, body, |node| match &node.ref_(self.context).data {
            NodeKind::FunctionDeclaration(_)
            | NodeKind::FunctionExpression(_)
            | NodeKind::ArrowFunctionExpression(_)
            | NodeKind::ClassDeclaration(_)
            | NodeKind::ClassExpression(_) => VisitResult::Skip,
            NodeKind::ReturnStatement(statement) if statement.argument.is_some() => {
                found = true;
                VisitResult::Break
            }
            _ => VisitResult::Keep,
        });
        found
    }

    fn convert_class_declaration(&self, class: Id<Node>) -> Result<Translated, TranslationError> {
        let NodeKind::ClassDeclaration(data) = self.data(class) else {
            Debug_.fail_bad_syntax_kind(class.ref_(self.context).kind(), None);
        };
        let id = data.id.ok_or_else(|| {
            self.context
                .expected_error(class, "ClassDeclaration: Missing name")
        })?;
        if !data.decorators.is_empty() {
            return Err(self
                .context
                .expected_error(class, "ClassDeclaration: decorators not supported"));
        }

        let mut dependencies = self.optional_dependencies(data.type_parameters);
        for &implements in &data.implements {
            dependencies.extend(self.dependencies(implements));
        }
        let mut extends = vec![];
        if let Some(super_class) = data.super_class {
            let (super_type, super_dependencies) =
                self.convert_super_class(super_class, data.super_type_parameters)?;
            dependencies.extend(super_dependencies);
            extends.push(super_type);
        }
        let (body, body_dependencies) = self.convert_class_body(data.body)?;
        dependencies.extend(body_dependencies);

        Ok((
            self.factory().create(DeclareClass {
                id,
                type_parameters: data.type_parameters,
                extends,
                implements: data.implements,
                mixins: vec![],
                body,
            }),
            dependencies,
        ))
    }

    fn convert_super_class(
        &self,
        super_class: Id<Node>,
        super_type_parameters: Option<Id<Node>>,
    ) -> Result<Translated, TranslationError> {
        let (id, type_parameters) = match self.data(super_class) {
            NodeKind::Identifier(identifier) => (
                self.factory().create_identifier(&identifier.name),
                super_type_parameters,
            ),
            NodeKind::MemberExpression(_) => (
                self.expression_to_qualified_type_identifier(super_class)?,
                super_type_parameters,
            ),
            NodeKind::TypeCastExpression(cast) => {
                let cast_type = self
                    .type_annotation_type(Some(cast.type_annotation))
                    .unwrap_or(cast.type_annotation);
                match self.data(cast_type) {
                    NodeKind::GenericTypeAnnotation(generic) => (generic.id, generic.type_parameters),
                    NodeKind::TypeofTypeAnnotation(typeof_) if is_identifier(&typeof_.argument.ref_(self.context)) => {
                        (typeof_.argument, typeof_.type_arguments)
                    }
                    _ => {
                        return Err(self.context.expected_error(
                            cast_type,
                            format!(
                                "SuperClass: Typecast super type of \"{}\" not supported",
                                self.kind_name(cast_type)
                            ),
                        ))
                    }
                }
            }
            _ => {
                return Err(self.context.expected_error(
                    super_class,
                    format!(
                        "SuperClass: Non identifier super type of \"{}\" not supported",
                        self.kind_name(super_class)
                    ),
                ))
            }
        };
        let mut dependencies = self.dependencies(super_class);
        dependencies.extend(self.optional_dependencies(super_type_parameters));
        Ok((
            self.factory().create(InterfaceExtends {
                id,
                type_parameters,
            }),
            dependencies,
        ))
    }

    fn expression_to_qualified_type_identifier(
        &self,
        expression: Id<Node>,
    ) -> Result<Id<Node>, TranslationError> {
        match self.data(expression) {
            NodeKind::Identifier(identifier) => Ok(self.factory().create_identifier(&identifier.name)),
            NodeKind::MemberExpression(member)
                if !member.computed
                    && member.object.ref_(self.context).kind() != SyntaxKind::Super =>
            {
                if let Some(name) = self.identifier_name(member.property) {
                    let qualification = self.expression_to_qualified_type_identifier(member.object)?;
                    let id = self.factory().create_identifier(&name);
                    return Ok(self
                        .factory()
                        .create(QualifiedTypeIdentifier { qualification, id }));
                }
                Err(self.not_an_identifier_or_member(expression))
            }
            _ => Err(self.not_an_identifier_or_member(expression)),
        }
    }

    fn not_an_identifier_or_member(&self, expression: Id<Node>) -> TranslationError {
        self.context.expected_error(
            expression,
            format!(
                "Expected {} to be an Identifier or Member with Identifier property, non-Super object.",
                self.kind_name(expression)
            ),
        )
    }

    /// Keys usable in an object type: identifiers, string literals (as
    /// identifiers when they spell one) and numeric literals.
    fn convert_property_key(
        &self,
        key: Id<Node>,
        computed: bool,
        label: &str,
    ) -> Result<Id<Node>, TranslationError> {
        match self.data(key) {
            NodeKind::Identifier(_) if !computed => Ok(key),
            NodeKind::Literal(literal) => match literal.value {
                LiteralValue::String(value) if is_valid_identifier_name(&value) => {
                    Ok(self.factory().create_identifier(&value))
                }
                LiteralValue::String(_) | LiteralValue::Number(_) => Ok(key),
                _ => Err(self.unsupported_key(key, label)),
            },
            _ => Err(self.unsupported_key(key, label)),
        }
    }

    fn unsupported_key(&self, key: Id<Node>, label: &str) -> TranslationError {
        self.context.expected_error(
            key,
            format!(
                "{}: Unsupported key type of \"{}\"",
                label,
                self.kind_name(key)
            ),
        )
    }

    fn convert_class_body(&self, body: Id<Node>) -> Result<Translated, TranslationError> {
        let NodeKind::ClassBody(data) = self.data(body) else {
            Debug_.fail_bad_syntax_kind(body.ref_(self.context).kind(), None);
        };
        let mut properties = vec![];
        let mut dependencies = Dependencies::new();
        for &member in &data.body {
            match self.data(member) {
                NodeKind::PropertyDefinition(property) => {
                    if property.key.ref_(self.context).kind() == SyntaxKind::PrivateIdentifier {
                        continue;
                    }
                    let key = self.convert_property_key(
                        property.key,
                        property.computed,
                        "ClassMember PropertyDefinition",
                    )?;
                    let (value, value_dependencies) =
                        self.convert_type_annotation(property.type_annotation, member)?;
                    dependencies.extend(value_dependencies);
                    properties.push(self.factory().create(ObjectTypeProperty {
                        key,
                        value,
                        variance: property.variance,
                        method: false,
                        optional: property.optional,
                        static_: property.static_,
                        proto: false,
                        kind: PropertyKind::Init,
                    }));
                }
                NodeKind::MethodDefinition(method) => {
                    if method.key.ref_(self.context).kind() == SyntaxKind::PrivateIdentifier {
                        continue;
                    }
                    let key = self.convert_property_key(
                        method.key,
                        method.computed,
                        "ClassMember MethodDefinition",
                    )?;
                    let (value, value_dependencies) = self
                        .convert_a_function(method.value, method.kind == MethodKind::Constructor)?;
                    dependencies.extend(value_dependencies);
                    let (kind, is_method) = match method.kind {
                        MethodKind::Get => (PropertyKind::Get, false),
                        MethodKind::Set => (PropertyKind::Set, false),
                        MethodKind::Method | MethodKind::Constructor => (PropertyKind::Init, true),
                    };
                    properties.push(self.factory().create(ObjectTypeProperty {
                        key,
                        value,
                        variance: None,
                        method: is_method,
                        optional: false,
                        static_: method.static_,
                        proto: false,
                        kind,
                    }));
                }
                NodeKind::StaticBlock(_) => (),
                _ => {
                    return Err(self.context.expected_error(
                        member,
                        format!(
                            "ClassMember: Unsupported member type of \"{}\"",
                            self.kind_name(member)
                        ),
                    ))
                }
            }
        }
        Ok((
            self.factory().create(ObjectTypeAnnotation {
                properties,
                indexers: vec![],
                call_properties: vec![],
                internal_slots: vec![],
                exact: false,
                inexact: false,
            }),
            dependencies,
        ))
    }

    fn convert_expression_to_type_annotation(
        &self,
        expression: Id<Node>,
    ) -> Result<Translated, TranslationError> {
        match self.data(expression) {
            NodeKind::AsExpression(crate::AsExpression {
                type_annotation, ..
            })
            | NodeKind::TypeCastExpression(crate::TypeCastExpression {
                type_annotation, ..
            }) => self.convert_type_annotation(Some(type_annotation), expression),
            NodeKind::Identifier(identifier) => {
                let argument = self.factory().create_identifier(&identifier.name);
                Ok((
                    self.factory().create(TypeofTypeAnnotation {
                        argument,
                        type_arguments: None,
                    }),
                    self.dependencies(expression),
                ))
            }
            NodeKind::Literal(literal) => Ok((self.convert_literal(literal), Dependencies::new())),
            NodeKind::ObjectExpression(object) => self.convert_object_expression(object.properties),
            NodeKind::ArrowFunctionExpression(_) | NodeKind::FunctionExpression(_) => {
                self.convert_a_function(expression, false)
            }
            _ => Ok((
                self.context.flow_fix_me_or_error(
                    expression,
                    &format!(
                        "convertExpressionToTypeAnnotation: Unsupported expression of type \"{}\", a type annotation is required.",
                        self.kind_name(expression)
                    ),
                )?,
                Dependencies::new(),
            )),
        }
    }

    fn convert_literal(&self, literal: crate::Literal) -> Id<Node> {
        let factory = self.factory();
        match literal.value {
            LiteralValue::Null => factory.create_keyword(SyntaxKind::NullLiteralTypeAnnotation),
            LiteralValue::Boolean(value) => factory.create(BooleanLiteralTypeAnnotation {
                value,
                raw: literal.raw.unwrap_or_else(|| value.to_string()),
            }),
            LiteralValue::Number(value) => factory.create(NumberLiteralTypeAnnotation {
                value,
                raw: literal.raw.unwrap_or_else(|| value.to_string()),
            }),
            LiteralValue::String(value) => {
                let raw = literal.raw.unwrap_or_else(|| crate::quote_string(&value));
                factory.create(StringLiteralTypeAnnotation { value, raw })
            }
            LiteralValue::BigInt(value) => factory.create(BigIntLiteralTypeAnnotation {
                raw: literal.raw.unwrap_or_else(|| format!("{}n", value)),
            }),
            LiteralValue::RegExp { .. } => factory.create_generic_type_annotation("RegExp", None),
        }
    }

    fn convert_object_expression(
        &self,
        properties: Vec<Id<Node>>,
    ) -> Result<Translated, TranslationError> {
        let mut result_properties = vec![];
        let mut dependencies = Dependencies::new();
        for property in properties {
            match self.data(property) {
                NodeKind::SpreadElement(spread) => {
                    let (argument, spread_dependencies) =
                        self.convert_expression_to_type_annotation(spread.argument)?;
                    dependencies.extend(spread_dependencies);
                    result_properties.push(
                        self.factory()
                            .create(ObjectTypeSpreadProperty { argument }),
                    );
                }
                NodeKind::Property(data) => {
                    let key = self.convert_property_key(
                        data.key,
                        data.computed,
                        "ObjectExpression Property",
                    )?;
                    let is_accessor = matches!(data.kind, PropertyKind::Get | PropertyKind::Set);
                    if data.method || is_accessor {
                        if self.function_parts(data.value).is_none() {
                            return Err(self.context.expected_error(
                                data.key,
                                format!(
                                    "ObjectExpression Property: Expected {} to have a function value, but got {}",
                                    if data.method { "method" } else { "accessor" },
                                    self.kind_name(data.value)
                                ),
                            ));
                        }
                    }
                    let (value, value_dependencies) = if data.method || is_accessor {
                        self.convert_a_function(data.value, false)?
                    } else {
                        self.convert_expression_to_type_annotation(data.value)?
                    };
                    dependencies.extend(value_dependencies);
                    result_properties.push(self.factory().create(ObjectTypeProperty {
                        key,
                        value,
                        variance: None,
                        method: data.method,
                        optional: false,
                        static_: false,
                        proto: false,
                        kind: if data.method { PropertyKind::Init } else { data.kind },
                    }));
                }
                _ => {
                    return Err(self.context.unexpected_error(
                        property,
                        format!(
                            "ObjectExpression: Unsupported property of type \"{}\"",
                            self.kind_name(property)
                        ),
                    ))
                }
            }
        }
        Ok((
            self.factory().create(ObjectTypeAnnotation {
                properties: result_properties,
                indexers: vec![],
                call_properties: vec![],
                internal_slots: vec![],
                exact: false,
                inexact: false,
            }),
            dependencies,
        ))
    }
}

fn is_valid_identifier_name(name: &str) -> bool {
    regex!(r"^[A-Za-z_$][A-Za-z0-9_$]*$").is_match(name)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::*;
    use crate::testing::*;

    fn function(name: &str, params: Vec<Value>, body: Vec<Value>) -> Value {
        json!({
            "type": "FunctionDeclaration",
            "id": ident(name),
            "params": params,
            "body": {"type": "BlockStatement", "body": body},
        })
    }

    fn declare_export(declaration: Value) -> Value {
        json!({"type": "DeclareExportDeclaration", "declaration": declaration})
    }

    fn declare_function(name: &str, params: Vec<Value>, return_type: Value) -> Value {
        json!({
            "type": "DeclareFunction",
            "id": typed_ident(name, json!({
                "type": "FunctionTypeAnnotation",
                "params": params,
                "returnType": return_type,
            })),
        })
    }

    fn const_declaration(name: &str, init: Value) -> Value {
        json!({
            "type": "VariableDeclaration",
            "kind": "const",
            "declarations": [{"type": "VariableDeclarator", "id": ident(name), "init": init}],
        })
    }

    fn export_value(declaration: Value) -> Value {
        json!({"type": "ExportNamedDeclaration", "declaration": declaration})
    }

    fn program_body(fixture: &Fixture, program: Id<Node>) -> Vec<Id<Node>> {
        match &program.ref_(&fixture.arena).data {
            NodeKind::Program(program) => program.body.clone(),
            _ => vec![],
        }
    }

    #[test]
    fn test_keeps_only_the_dependency_chain() {
        let fixture = fixture(module(vec![
            type_alias("A", keyword("NumberTypeAnnotation")),
            type_alias("B", generic("A", None)),
            type_alias("C", keyword("StringTypeAnnotation")),
            export_named(type_alias("D", generic("B", None))),
        ]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        assert_eq!(
            fixture.body(&result),
            vec![
                normalize(type_alias("A", keyword("NumberTypeAnnotation"))),
                normalize(type_alias("B", generic("A", None))),
                normalize(export_named(type_alias("D", generic("B", None)))),
            ],
        );
        assert!(result.comments.is_empty());
    }

    #[test]
    fn test_emitted_statements_keep_their_source_ranges() {
        let mut alias = type_alias("A", keyword("NumberTypeAnnotation"));
        alias["range"] = json!([0, 16]);
        let mut export = export_named(type_alias("B", generic("A", None)));
        export["range"] = json!([17, 37]);
        let fixture = fixture(module(vec![alias, export]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        let ranges = program_body(&fixture, result.program)
            .into_iter()
            .map(|statement| statement.ref_(&fixture.arena).range())
            .collect::<Vec<_>>();
        assert_eq!(
            ranges,
            vec![crate::BaseTextRange::new(0, 16), crate::BaseTextRange::new(17, 37)]
        );
    }

    #[test]
    fn test_prunes_unused_imports_and_specifiers() {
        let mut both = import_named("C", "c", "type");
        both["specifiers"]
            .as_array_mut()
            .unwrap()
            .push(json!({"type": "ImportSpecifier", "imported": ident("D"), "local": ident("D")}));
        let fixture = fixture(module(vec![
            import_named("A", "a", "type"),
            import_named("B", "b", "type"),
            both,
            export_named(type_alias(
                "X",
                json!({
                    "type": "UnionTypeAnnotation",
                    "types": [generic("A", None), generic("C", None)],
                }),
            )),
        ]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        let body = fixture.body(&result);
        assert_eq!(body.len(), 3);
        assert_eq!(body[0], normalize(import_named("A", "a", "type")));
        assert_eq!(body[1], normalize(import_named("C", "c", "type")));

        let original = program_body(&fixture, fixture.program);
        let output = program_body(&fixture, result.program);
        assert_eq!(output[0], original[0]);
        assert_ne!(output[1], original[2]);
    }

    #[test]
    fn test_type_parameters_shadow_module_types() {
        let fixture = fixture(module(vec![
            type_alias("T", keyword("NumberTypeAnnotation")),
            export_named(json!({
                "type": "TypeAlias",
                "id": ident("F"),
                "typeParameters": {
                    "type": "TypeParameterDeclaration",
                    "params": [{"type": "TypeParameter", "name": "T"}],
                },
                "right": generic("T", None),
            })),
        ]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        assert_eq!(fixture.body(&result).len(), 1);
    }

    #[test]
    fn test_exported_function_without_return_annotation_returns_void() {
        let fixture = fixture(module(vec![export_value(function("foo", vec![], vec![]))]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        assert_eq!(
            fixture.body(&result),
            vec![normalize(declare_export(declare_function(
                "foo",
                vec![],
                keyword("VoidTypeAnnotation"),
            )))],
        );
    }

    #[rstest]
    #[case(true, false, generic("Promise", Some(vec![keyword("VoidTypeAnnotation")])))]
    #[case(
        false,
        true,
        generic("Generator", Some(vec![
            keyword("VoidTypeAnnotation"),
            keyword("VoidTypeAnnotation"),
            keyword("VoidTypeAnnotation"),
        ]))
    )]
    fn test_inferred_wrapped_return_types(
        #[case] async_: bool,
        #[case] generator: bool,
        #[case] expected: Value,
    ) {
        let mut foo = function("foo", vec![], vec![]);
        foo["async"] = json!(async_);
        foo["generator"] = json!(generator);
        let fixture = fixture(module(vec![export_value(foo)]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        assert_eq!(
            fixture.body(&result),
            vec![normalize(declare_export(declare_function("foo", vec![], expected)))],
        );
    }

    #[test]
    fn test_missing_parameter_annotation() {
        let source = module(vec![export_value(function("foo", vec![ident("x")], vec![]))]);

        let fixture = fixture(source);
        let error = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap_err();
        assert!(error.is_expected());
        assert_eq!(error.message(), "TypeAnnotationType: Type annotation missing");

        let result = fixture.run(flow_to_flow_def, &recover()).unwrap();
        assert_eq!(
            fixture.body(&result),
            vec![normalize(declare_export(declare_function(
                "foo",
                vec![json!({
                    "type": "FunctionTypeParam",
                    "name": ident("x"),
                    "typeAnnotation": generic("$FlowFixMe", None),
                })],
                keyword("VoidTypeAnnotation"),
            )))],
        );
    }

    #[test]
    fn test_returning_a_value_requires_an_annotation() {
        let fixture = fixture(module(vec![export_value(function(
            "foo",
            vec![],
            vec![json!({"type": "ReturnStatement", "argument": string_literal("a")})],
        ))]));
        let error = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap_err();
        assert_eq!(error.message(), "TypeAnnotationType: Type annotation missing");
    }

    #[test]
    fn test_variable_type_from_type_cast() {
        let fixture = fixture(module(vec![export_value(const_declaration(
            "x",
            json!({
                "type": "TypeCastExpression",
                "expression": {"type": "Literal", "value": 1, "raw": "1"},
                "typeAnnotation": annotation(keyword("NumberTypeAnnotation")),
            }),
        ))]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        assert_eq!(
            fixture.body(&result),
            vec![normalize(declare_export(json!({
                "type": "DeclareVariable",
                "id": typed_ident("x", keyword("NumberTypeAnnotation")),
                "kind": "const",
            })))],
        );
    }

    #[test]
    fn test_identifier_initializer_becomes_typeof_and_pulls_its_declaration() {
        let mut a = const_declaration("a", string_literal("a"));
        a["declarations"][0]["id"] = typed_ident("a", keyword("StringTypeAnnotation"));
        let fixture = fixture(module(vec![a, export_value(const_declaration("b", ident("a")))]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        assert_eq!(
            fixture.body(&result),
            vec![
                normalize(json!({
                    "type": "DeclareVariable",
                    "id": typed_ident("a", keyword("StringTypeAnnotation")),
                    "kind": "const",
                })),
                normalize(declare_export(json!({
                    "type": "DeclareVariable",
                    "id": typed_ident("b", json!({"type": "TypeofTypeAnnotation", "argument": ident("a")})),
                    "kind": "const",
                }))),
            ],
        );
    }

    fn annotated_const(name: &str) -> Value {
        let mut declaration =
            const_declaration(name, json!({"type": "Literal", "value": 1, "raw": "1"}));
        declaration["declarations"][0]["id"] = typed_ident(name, keyword("NumberTypeAnnotation"));
        declaration
    }

    fn typeof_(name: &str) -> Value {
        json!({"type": "TypeofTypeAnnotation", "argument": ident(name)})
    }

    #[rstest]
    #[case::function(function("f", vec![], vec![]), typeof_("f"), "DeclareFunction")]
    #[case::class(
        json!({
            "type": "ClassDeclaration",
            "id": ident("C"),
            "body": {"type": "ClassBody", "body": []},
        }),
        generic("C", None),
        "DeclareClass"
    )]
    #[case::opaque_type(
        json!({
            "type": "OpaqueType",
            "id": ident("O"),
            "impltype": keyword("StringTypeAnnotation"),
        }),
        generic("O", None),
        "DeclareOpaqueType"
    )]
    #[case::variable(annotated_const("v"), typeof_("v"), "DeclareVariable")]
    fn test_private_dependencies_are_declared(
        #[case] dependency: Value,
        #[case] right: Value,
        #[case] declared_type: &str,
    ) {
        let export = export_named(type_alias("T", right));
        let fixture = fixture(module(vec![dependency, export.clone()]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        let body = fixture.body(&result);
        assert_eq!(body.len(), 2);
        assert_eq!(body[0]["type"], json!(declared_type));
        assert_eq!(body[1], normalize(export));
    }

    #[test]
    fn test_private_opaque_type_hides_its_underlying_type() {
        let opaque = json!({
            "type": "OpaqueType",
            "id": ident("O"),
            "impltype": keyword("StringTypeAnnotation"),
            "supertype": keyword("StringTypeAnnotation"),
        });
        let fixture = fixture(module(vec![
            opaque,
            export_named(type_alias("T", generic("O", None))),
        ]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        assert_eq!(
            fixture.body(&result)[0],
            normalize(json!({
                "type": "DeclareOpaqueType",
                "id": ident("O"),
                "supertype": keyword("StringTypeAnnotation"),
            }))
        );
    }

    #[test]
    fn test_literal_initializer_becomes_a_literal_type() {
        let fixture = fixture(module(vec![export_value(const_declaration(
            "x",
            string_literal("a"),
        ))]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        assert_eq!(
            fixture.body(&result),
            vec![normalize(declare_export(json!({
                "type": "DeclareVariable",
                "id": typed_ident("x", json!({
                    "type": "StringLiteralTypeAnnotation",
                    "value": "a",
                    "raw": "'a'",
                })),
                "kind": "const",
            })))],
        );
    }

    #[rstest]
    #[case(json!({"type": "Identifier", "name": "exports"}))]
    #[case(json!({
        "type": "MemberExpression",
        "object": ident("module"),
        "property": ident("exports"),
    }))]
    fn test_named_commonjs_exports_are_rejected(#[case] object: Value) {
        let fixture = fixture(module(vec![json!({
            "type": "ExpressionStatement",
            "expression": {
                "type": "AssignmentExpression",
                "operator": "=",
                "left": {"type": "MemberExpression", "object": object, "property": ident("foo")},
                "right": {"type": "Literal", "value": 1, "raw": "1"},
            },
        })]));
        let error = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap_err();
        assert_eq!(
            error.message(),
            "convertExport: Named CommonJS exports not supported. Use either `module.exports = {...}` or ES6 exports."
        );
    }

    #[test]
    fn test_module_exports_assignment() {
        let fixture = fixture(module(vec![json!({
            "type": "ExpressionStatement",
            "expression": {
                "type": "AssignmentExpression",
                "operator": "=",
                "left": {
                    "type": "MemberExpression",
                    "object": ident("module"),
                    "property": ident("exports"),
                },
                "right": {"type": "Literal", "value": true, "raw": "true"},
            },
        })]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        assert_eq!(
            fixture.body(&result),
            vec![normalize(json!({
                "type": "DeclareModuleExports",
                "typeAnnotation": annotation(json!({
                    "type": "BooleanLiteralTypeAnnotation",
                    "value": true,
                    "raw": "true",
                })),
            }))],
        );
    }

    #[test]
    fn test_predicate_function() {
        let mut is_string = function(
            "isString",
            vec![typed_ident("x", keyword("MixedTypeAnnotation"))],
            vec![json!({
                "type": "ReturnStatement",
                "argument": {
                    "type": "BinaryExpression",
                    "operator": "===",
                    "left": {"type": "UnaryExpression", "operator": "typeof", "argument": ident("x"), "prefix": true},
                    "right": string_literal("string"),
                },
            })],
        );
        is_string["returnType"] = annotation(keyword("BooleanTypeAnnotation"));
        is_string["predicate"] = json!({"type": "InferredPredicate"});
        let fixture = fixture(module(vec![export_value(is_string)]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        let body = fixture.body(&result);
        assert_eq!(
            body[0]["declaration"]["predicate"]["type"],
            json!("DeclaredPredicate")
        );
        assert_eq!(
            body[0]["declaration"]["predicate"]["value"]["type"],
            json!("BinaryExpression")
        );
    }

    #[test]
    fn test_class_members() {
        let class = json!({
            "type": "ClassDeclaration",
            "id": ident("Foo"),
            "body": {"type": "ClassBody", "body": [
                {
                    "type": "PropertyDefinition",
                    "key": ident("a"),
                    "typeAnnotation": annotation(keyword("NumberTypeAnnotation")),
                },
                {
                    "type": "PropertyDefinition",
                    "key": {"type": "PrivateIdentifier", "name": "hidden"},
                    "typeAnnotation": annotation(keyword("NumberTypeAnnotation")),
                },
                {
                    "type": "MethodDefinition",
                    "key": ident("constructor"),
                    "kind": "constructor",
                    "value": {
                        "type": "FunctionExpression",
                        "params": [],
                        "body": {"type": "BlockStatement", "body": []},
                    },
                },
            ]},
        });
        let fixture = fixture(module(vec![export_value(class)]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        let body = fixture.body(&result);
        let declaration = &body[0]["declaration"];
        assert_eq!(declaration["type"], json!("DeclareClass"));
        let properties = declaration["body"]["properties"].as_array().unwrap();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0]["key"]["name"], json!("a"));
        assert_eq!(properties[1]["key"]["name"], json!("constructor"));
        assert_eq!(properties[1]["method"], json!(true));
        assert_eq!(
            properties[1]["value"]["returnType"]["type"],
            json!("VoidTypeAnnotation")
        );
    }

    #[test]
    fn test_decorated_classes_are_rejected() {
        let fixture = fixture(module(vec![export_value(json!({
            "type": "ClassDeclaration",
            "id": ident("Foo"),
            "decorators": [{"type": "Decorator", "expression": ident("dec")}],
            "body": {"type": "ClassBody", "body": []},
        }))]));
        let error = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap_err();
        assert_eq!(error.message(), "ClassDeclaration: decorators not supported");
    }

    #[test]
    fn test_unsupported_dependency_statement_is_unexpected() {
        let fixture = fixture(module(vec![
            json!({
                "type": "ForStatement",
                "init": {
                    "type": "VariableDeclaration",
                    "kind": "var",
                    "declarations": [{"type": "VariableDeclarator", "id": ident("i")}],
                },
                "body": {"type": "BlockStatement", "body": []},
            }),
            export_value(const_declaration("x", ident("i"))),
        ]));
        let error = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap_err();
        assert!(!error.is_expected());
        assert_eq!(
            error.message(),
            "Statement: Unsupported statement type of \"ForStatement\""
        );
    }

    #[test]
    fn test_export_default_identifier_becomes_typeof() {
        let fixture = fixture(module(vec![
            type_alias("T", keyword("NumberTypeAnnotation")),
            json!({"type": "ExportDefaultDeclaration", "declaration": ident("foo")}),
        ]));
        let result = fixture
            .run(flow_to_flow_def, &Default::default())
            .unwrap();
        assert_eq!(
            fixture.body(&result),
            vec![normalize(json!({
                "type": "DeclareExportDeclaration",
                "default": true,
                "declaration": {"type": "TypeofTypeAnnotation", "argument": ident("foo")},
            }))],
        );
    }
}
