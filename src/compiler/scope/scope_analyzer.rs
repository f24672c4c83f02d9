use id_arena::Id;
use tracing::debug;

use super::{
    DefinitionKind, Definition, Reference, Scope, ScopeFlags, ScopeId, ScopeKind, ScopeManager,
    Variable,
};
use crate::{HasArena, InArena, Node, NodeKind, SourceType, VariableKind};

/// Builds the scope table for `program`: every scope, every declared
/// variable, and every identifier reference resolved through the scope chain.
/// References that resolve nowhere become implicit globals.
pub fn analyze_scope(arena: &impl HasArena, program: Id<Node>) -> ScopeManager {
    let mut analyzer = ScopeAnalyzer {
        arena,
        manager: Default::default(),
        current: 0,
    };
    analyzer.analyze_program(program);
    analyzer.resolve_references();
    let manager = analyzer.manager;
    debug!(
        scopes = manager.scopes.len(),
        variables = manager.variables.len(),
        references = manager.references.len(),
        "analyzed scopes"
    );
    manager
}

struct ScopeAnalyzer<'arena, TArena: HasArena> {
    arena: &'arena TArena,
    manager: ScopeManager,
    current: ScopeId,
}

impl<'arena, TArena: HasArena> ScopeAnalyzer<'arena, TArena> {
    fn data(&self, node: Id<Node>) -> NodeKind {
        node.ref_(self.arena).data.clone()
    }

    fn push_scope(&mut self, kind: ScopeKind, block: Id<Node>, upper: Option<ScopeId>) -> ScopeId {
        let flags = match kind {
            ScopeKind::Global | ScopeKind::Module | ScopeKind::Function => ScopeFlags::HOISTS_VARS,
            _ => ScopeFlags::NONE,
        };
        let scope = self.manager.scopes.len();
        self.manager.scopes.push(Scope {
            kind,
            flags,
            block,
            upper,
            children: vec![],
            variables: Default::default(),
            references: vec![],
        });
        if let Some(upper) = upper {
            self.manager.scopes[upper].children.push(scope);
        }
        self.manager.node_to_scope.entry(block).or_insert(scope);
        scope
    }

    fn with_scope(&mut self, kind: ScopeKind, block: Id<Node>, action: impl FnOnce(&mut Self)) {
        let previous = self.current;
        self.current = self.push_scope(kind, block, Some(previous));
        action(self);
        self.current = previous;
    }

    fn hoisting_scope(&self) -> ScopeId {
        let mut scope = self.current;
        loop {
            let record = &self.manager.scopes[scope];
            if record.flags.contains(ScopeFlags::HOISTS_VARS) {
                return scope;
            }
            match record.upper {
                Some(upper) => scope = upper,
                None => return scope,
            }
        }
    }

    fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        definition: Definition,
    ) {
        let variable = match self.manager.scopes[scope].variables.get(name) {
            Some(&variable) => variable,
            None => {
                let variable = self.manager.variables.len();
                self.manager.variables.push(Variable {
                    name: name.to_owned(),
                    scope,
                    defs: vec![],
                    references: vec![],
                });
                self.manager.scopes[scope]
                    .variables
                    .insert(name.to_owned(), variable);
                variable
            }
        };
        self.manager.variables[variable].defs.push(definition);
    }

    fn declare_identifier(
        &mut self,
        scope: ScopeId,
        identifier: Id<Node>,
        kind: DefinitionKind,
        node: Id<Node>,
        parent: Option<Id<Node>>,
    ) {
        let name = match self.data(identifier) {
            NodeKind::Identifier(identifier) => identifier.name,
            _ => return,
        };
        self.declare(
            scope,
            &name,
            Definition {
                kind,
                name: identifier,
                node,
                parent,
            },
        );
    }

    fn add_reference(&mut self, identifier: Id<Node>, name: String) {
        let reference = self.manager.references.len();
        self.manager.references.push(Reference {
            identifier,
            name,
            from: self.current,
            resolved: None,
        });
        self.manager.scopes[self.current].references.push(reference);
        self.manager
            .identifier_to_reference
            .insert(identifier, reference);
    }

    fn resolve_references(&mut self) {
        let global_scope = self.manager.global_scope();
        for reference in 0..self.manager.references.len() {
            let (name, from, identifier) = {
                let record = &self.manager.references[reference];
                (record.name.clone(), record.from, record.identifier)
            };
            let mut scope = Some(from);
            let mut resolved = None;
            while let Some(current) = scope {
                if let Some(&variable) = self.manager.scopes[current].variables.get(&name) {
                    resolved = Some(variable);
                    break;
                }
                scope = self.manager.scopes[current].upper;
            }
            let variable = match resolved {
                Some(variable) => variable,
                None => {
                    self.declare(
                        global_scope,
                        &name,
                        Definition {
                            kind: DefinitionKind::ImplicitGlobalVariable,
                            name: identifier,
                            node: identifier,
                            parent: None,
                        },
                    );
                    self.manager.scopes[global_scope].variables[&name]
                }
            };
            self.manager.references[reference].resolved = Some(variable);
            self.manager.variables[variable].references.push(reference);
        }
    }

    fn analyze_program(&mut self, program: Id<Node>) {
        let global_scope = self.push_scope(ScopeKind::Global, program, None);
        self.current = global_scope;
        let NodeKind::Program(data) = self.data(program) else {
            self.visit(program);
            return;
        };
        if data.source_type == SourceType::Module {
            self.current = self.push_scope(ScopeKind::Module, program, Some(global_scope));
        }
        self.visit_all(&data.body);
    }

    fn visit_all(&mut self, nodes: &[Id<Node>]) {
        for &node in nodes {
            self.visit(node);
        }
    }

    fn visit_opt(&mut self, node: Option<Id<Node>>) {
        if let Some(node) = node {
            self.visit(node);
        }
    }

    fn visit_children(&mut self, node: Id<Node>) {
        let children = node.ref_(self.arena).children();
        self.visit_all(&children);
    }

    fn visit(&mut self, node: Id<Node>) {
        match self.data(node) {
            NodeKind::Identifier(identifier) => {
                self.add_reference(node, identifier.name);
                self.visit_opt(identifier.type_annotation);
            }

            NodeKind::ImportDeclaration(import) => {
                for specifier in import.specifiers {
                    let local = match self.data(specifier) {
                        NodeKind::ImportSpecifier(specifier) => specifier.local,
                        NodeKind::ImportDefaultSpecifier(specifier) => specifier.local,
                        NodeKind::ImportNamespaceSpecifier(specifier) => specifier.local,
                        _ => continue,
                    };
                    self.declare_identifier(
                        self.current,
                        local,
                        DefinitionKind::ImportBinding,
                        specifier,
                        Some(node),
                    );
                }
            }
            NodeKind::ExportNamedDeclaration(export) => {
                self.visit_opt(export.declaration);
                if export.source.is_none() {
                    self.visit_export_specifiers(&export.specifiers);
                }
            }
            NodeKind::DeclareExportDeclaration(export) => {
                self.visit_opt(export.declaration);
                if export.source.is_none() {
                    self.visit_export_specifiers(&export.specifiers);
                }
            }
            NodeKind::ExportAllDeclaration(_)
            | NodeKind::DeclareExportAllDeclaration(_)
            | NodeKind::ExportSpecifier(_) => (),

            NodeKind::VariableDeclaration(declaration) => {
                let scope = match declaration.kind {
                    VariableKind::Var => self.hoisting_scope(),
                    _ => self.current,
                };
                for declarator in declaration.declarations {
                    if let NodeKind::VariableDeclarator(declarator_data) = self.data(declarator) {
                        self.declare_pattern(
                            declarator_data.id,
                            DefinitionKind::Variable,
                            scope,
                            declarator,
                            Some(node),
                        );
                        self.visit_opt(declarator_data.init);
                    }
                }
            }
            NodeKind::DeclareVariable(declaration) => {
                let scope = match declaration.kind {
                    VariableKind::Var => self.hoisting_scope(),
                    _ => self.current,
                };
                self.declare_identifier(scope, declaration.id, DefinitionKind::Variable, node, None);
                self.visit_binding_annotation(declaration.id);
            }

            NodeKind::FunctionDeclaration(function) => {
                if let Some(id) = function.id {
                    self.declare_identifier(
                        self.current,
                        id,
                        DefinitionKind::FunctionName,
                        node,
                        None,
                    );
                }
                self.visit_function(
                    node,
                    None,
                    function.type_parameters,
                    &function.params,
                    function.return_type,
                    function.predicate,
                    function.body,
                );
            }
            NodeKind::FunctionExpression(function) => {
                self.visit_function(
                    node,
                    function.id,
                    function.type_parameters,
                    &function.params,
                    function.return_type,
                    function.predicate,
                    function.body,
                );
            }
            NodeKind::ArrowFunctionExpression(function) => {
                self.visit_function(
                    node,
                    None,
                    function.type_parameters,
                    &function.params,
                    function.return_type,
                    function.predicate,
                    function.body,
                );
            }
            NodeKind::TSDeclareFunction(function) => {
                if let Some(id) = function.id {
                    self.declare_identifier(
                        self.current,
                        id,
                        DefinitionKind::FunctionName,
                        node,
                        None,
                    );
                }
                self.with_scope(ScopeKind::Function, node, |this| {
                    this.declare_type_parameters(function.type_parameters);
                    this.declare_params(&function.params, node);
                    this.visit_opt(function.return_type);
                });
            }

            NodeKind::ClassDeclaration(class) => {
                if let Some(id) = class.id {
                    self.declare_identifier(self.current, id, DefinitionKind::ClassName, node, None);
                }
                self.visit_all(&class.decorators);
                self.visit_opt(class.super_class);
                self.with_scope(ScopeKind::Class, node, |this| {
                    if let Some(id) = class.id {
                        this.declare_identifier(
                            this.current,
                            id,
                            DefinitionKind::ClassName,
                            node,
                            None,
                        );
                    }
                    this.declare_type_parameters(class.type_parameters);
                    this.visit_opt(class.super_type_parameters);
                    this.visit_all(&class.implements);
                    this.visit(class.body);
                });
            }
            NodeKind::ClassExpression(class) => {
                self.visit_all(&class.decorators);
                self.visit_opt(class.super_class);
                self.with_scope(ScopeKind::Class, node, |this| {
                    if let Some(id) = class.id {
                        this.declare_identifier(
                            this.current,
                            id,
                            DefinitionKind::ClassName,
                            node,
                            None,
                        );
                    }
                    this.declare_type_parameters(class.type_parameters);
                    this.visit_opt(class.super_type_parameters);
                    this.visit_all(&class.implements);
                    this.visit(class.body);
                });
            }
            NodeKind::ClassImplements(implements) => {
                self.visit_type_name(implements.id);
                self.visit_opt(implements.type_parameters);
            }
            NodeKind::InterfaceExtends(extends) => {
                self.visit_type_name(extends.id);
                self.visit_opt(extends.type_parameters);
            }
            NodeKind::MethodDefinition(method) => {
                if method.computed {
                    self.visit(method.key);
                }
                self.visit(method.value);
            }
            NodeKind::PropertyDefinition(property) => {
                if property.computed {
                    self.visit(property.key);
                }
                self.visit_opt(property.value);
                self.visit_opt(property.type_annotation);
                self.visit_opt(property.variance);
            }
            NodeKind::Property(property) => {
                if property.computed {
                    self.visit(property.key);
                }
                self.visit(property.value);
            }
            NodeKind::MemberExpression(member) => {
                self.visit(member.object);
                if member.computed {
                    self.visit(member.property);
                }
            }
            NodeKind::OptionalMemberExpression(member) => {
                self.visit(member.object);
                if member.computed {
                    self.visit(member.property);
                }
            }
            NodeKind::MetaProperty(_)
            | NodeKind::BreakStatement(_)
            | NodeKind::ContinueStatement(_) => (),
            NodeKind::LabeledStatement(statement) => self.visit(statement.body),

            NodeKind::BlockStatement(block) => {
                self.with_scope(ScopeKind::Block, node, |this| this.visit_all(&block.body));
            }
            NodeKind::StaticBlock(block) => {
                self.with_scope(ScopeKind::Block, node, |this| this.visit_all(&block.body));
            }
            NodeKind::ForStatement(_) | NodeKind::ForInStatement(_) | NodeKind::ForOfStatement(_) => {
                self.with_scope(ScopeKind::For, node, |this| this.visit_children(node));
            }
            NodeKind::SwitchStatement(statement) => {
                self.visit(statement.discriminant);
                self.with_scope(ScopeKind::Switch, node, |this| this.visit_all(&statement.cases));
            }
            NodeKind::CatchClause(clause) => {
                self.with_scope(ScopeKind::Catch, node, |this| {
                    if let Some(param) = clause.param {
                        let scope = this.current;
                        this.declare_pattern(param, DefinitionKind::CatchClause, scope, node, None);
                    }
                    this.visit(clause.body);
                });
            }

            NodeKind::TypeAlias(alias) => {
                self.declare_identifier(self.current, alias.id, DefinitionKind::Type, node, None);
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(alias.type_parameters);
                    this.visit(alias.right);
                });
            }
            NodeKind::DeclareTypeAlias(alias) => {
                self.declare_identifier(self.current, alias.id, DefinitionKind::Type, node, None);
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(alias.type_parameters);
                    this.visit(alias.right);
                });
            }
            NodeKind::OpaqueType(opaque) => {
                self.declare_identifier(self.current, opaque.id, DefinitionKind::Type, node, None);
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(opaque.type_parameters);
                    this.visit(opaque.impltype);
                    this.visit_opt(opaque.supertype);
                });
            }
            NodeKind::DeclareOpaqueType(opaque) => {
                self.declare_identifier(self.current, opaque.id, DefinitionKind::Type, node, None);
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(opaque.type_parameters);
                    this.visit_opt(opaque.impltype);
                    this.visit_opt(opaque.supertype);
                });
            }
            NodeKind::InterfaceDeclaration(interface) => {
                self.declare_identifier(self.current, interface.id, DefinitionKind::Type, node, None);
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(interface.type_parameters);
                    this.visit_all(&interface.extends);
                    this.visit(interface.body);
                });
            }
            NodeKind::DeclareInterface(interface) => {
                self.declare_identifier(self.current, interface.id, DefinitionKind::Type, node, None);
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(interface.type_parameters);
                    this.visit_all(&interface.extends);
                    this.visit(interface.body);
                });
            }
            NodeKind::DeclareClass(class) => {
                self.declare_identifier(self.current, class.id, DefinitionKind::ClassName, node, None);
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(class.type_parameters);
                    this.visit_all(&class.extends);
                    this.visit_all(&class.implements);
                    this.visit_all(&class.mixins);
                    this.visit(class.body);
                });
            }
            NodeKind::DeclareFunction(function) => {
                self.declare_identifier(
                    self.current,
                    function.id,
                    DefinitionKind::FunctionName,
                    node,
                    None,
                );
                self.visit_binding_annotation(function.id);
                self.visit_opt(function.predicate);
            }
            NodeKind::DeclareEnum(declaration) => {
                self.declare_identifier(self.current, declaration.id, DefinitionKind::Enum, node, None);
            }
            NodeKind::EnumDeclaration(declaration) => {
                self.declare_identifier(self.current, declaration.id, DefinitionKind::Enum, node, None);
            }
            NodeKind::DeclareModule(module) => {
                self.with_scope(ScopeKind::DeclareModule, node, |this| this.visit(module.body));
            }
            NodeKind::DeclareNamespace(namespace) => {
                self.declare_identifier(
                    self.current,
                    namespace.id,
                    DefinitionKind::Namespace,
                    node,
                    None,
                );
                self.with_scope(ScopeKind::DeclareModule, node, |this| this.visit(namespace.body));
            }

            NodeKind::GenericTypeAnnotation(generic) => {
                self.visit_type_name(generic.id);
                self.visit_opt(generic.type_parameters);
            }
            NodeKind::TypeofTypeAnnotation(typeof_) => {
                self.visit_type_name(typeof_.argument);
                self.visit_opt(typeof_.type_arguments);
            }
            NodeKind::QualifiedTypeIdentifier(_)
            | NodeKind::QualifiedTypeofIdentifier(_)
            | NodeKind::TSQualifiedName(_) => self.visit_type_name(node),
            NodeKind::FunctionTypeAnnotation(function) => {
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(function.type_parameters);
                    this.visit_opt(function.this);
                    this.visit_all(&function.params);
                    this.visit_opt(function.rest);
                    this.visit(function.return_type);
                });
            }
            NodeKind::FunctionTypeParam(param) => self.visit(param.type_annotation),
            NodeKind::ObjectTypeProperty(property) => {
                self.visit(property.value);
                self.visit_opt(property.variance);
            }
            NodeKind::ObjectTypeIndexer(indexer) => {
                self.visit(indexer.key);
                self.visit(indexer.value);
                self.visit_opt(indexer.variance);
            }
            NodeKind::ObjectTypeInternalSlot(slot) => self.visit(slot.value),
            NodeKind::ObjectTypeMappedTypeProperty(mapped) => {
                self.visit(mapped.source_type);
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameter(mapped.key_tparam);
                    this.visit(mapped.prop_type);
                    this.visit_opt(mapped.variance);
                });
            }
            NodeKind::TupleTypeLabeledElement(element) => {
                self.visit(element.element_type);
                self.visit_opt(element.variance);
            }
            NodeKind::TupleTypeSpreadElement(element) => self.visit(element.type_annotation),
            NodeKind::TypePredicate(predicate) => self.visit_opt(predicate.type_annotation),
            NodeKind::ConditionalTypeAnnotation(conditional) => {
                self.visit(conditional.check_type);
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.visit(conditional.extends_type);
                    this.visit(conditional.true_type);
                });
                self.visit(conditional.false_type);
            }
            NodeKind::InferTypeAnnotation(infer) => self.declare_type_parameter(infer.type_parameter),
            NodeKind::TypeParameterDeclaration(_) | NodeKind::TSTypeParameterDeclaration(_) => {
                self.declare_type_parameters(Some(node))
            }
            NodeKind::EnumNumberMember(_)
            | NodeKind::EnumStringMember(_)
            | NodeKind::EnumBooleanMember(_)
            | NodeKind::EnumBigIntMember(_)
            | NodeKind::EnumDefaultedMember(_) => (),

            NodeKind::TSTypeAliasDeclaration(alias) => {
                self.declare_identifier(self.current, alias.id, DefinitionKind::Type, node, None);
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(alias.type_parameters);
                    this.visit(alias.type_annotation);
                });
            }
            NodeKind::TSInterfaceDeclaration(interface) => {
                self.declare_identifier(self.current, interface.id, DefinitionKind::Type, node, None);
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(interface.type_parameters);
                    this.visit_all(&interface.extends);
                    this.visit(interface.body);
                });
            }
            NodeKind::TSInterfaceHeritage(heritage) => {
                self.visit_type_name(heritage.expression);
                self.visit_opt(heritage.type_parameters);
            }
            NodeKind::TSClassImplements(implements) => {
                self.visit_type_name(implements.expression);
                self.visit_opt(implements.type_parameters);
            }
            NodeKind::TSPropertySignature(property) => {
                if property.computed {
                    self.visit(property.key);
                }
                self.visit_opt(property.type_annotation);
            }
            NodeKind::TSMethodSignature(method) => {
                if method.computed {
                    self.visit(method.key);
                }
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(method.type_parameters);
                    this.declare_params(&method.params, node);
                    this.visit_opt(method.return_type);
                });
            }
            NodeKind::TSCallSignatureDeclaration(signature) => {
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(signature.type_parameters);
                    this.declare_params(&signature.params, node);
                    this.visit_opt(signature.return_type);
                });
            }
            NodeKind::TSConstructSignatureDeclaration(signature) => {
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(signature.type_parameters);
                    this.declare_params(&signature.params, node);
                    this.visit_opt(signature.return_type);
                });
            }
            NodeKind::TSFunctionType(function) => {
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(function.type_parameters);
                    this.declare_params(&function.params, node);
                    this.visit_opt(function.return_type);
                });
            }
            NodeKind::TSConstructorType(function) => {
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameters(function.type_parameters);
                    this.declare_params(&function.params, node);
                    this.visit_opt(function.return_type);
                });
            }
            NodeKind::TSEmptyBodyFunctionExpression(function) => {
                self.with_scope(ScopeKind::Function, node, |this| {
                    this.declare_type_parameters(function.type_parameters);
                    this.declare_params(&function.params, node);
                    this.visit_opt(function.return_type);
                });
            }
            NodeKind::TSIndexSignature(signature) => {
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_params(&signature.parameters, node);
                    this.visit_opt(signature.type_annotation);
                });
            }
            NodeKind::TSTypeReference(reference) => {
                self.visit_type_name(reference.type_name);
                self.visit_opt(reference.type_parameters);
            }
            NodeKind::TSTypeQuery(query) => {
                self.visit_type_name(query.expr_name);
                self.visit_opt(query.type_parameters);
            }
            NodeKind::TSImportType(import) => self.visit_opt(import.type_parameters),
            NodeKind::TSMappedType(mapped) => {
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.declare_type_parameter(mapped.type_parameter);
                    this.visit_opt(mapped.name_type);
                    this.visit_opt(mapped.type_annotation);
                });
            }
            NodeKind::TSConditionalType(conditional) => {
                self.visit(conditional.check_type);
                self.with_scope(ScopeKind::Type, node, |this| {
                    this.visit(conditional.extends_type);
                    this.visit(conditional.true_type);
                });
                self.visit(conditional.false_type);
            }
            NodeKind::TSInferType(infer) => self.declare_type_parameter(infer.type_parameter),
            NodeKind::TSTypePredicate(predicate) => self.visit_opt(predicate.type_annotation),
            NodeKind::TSNamedTupleMember(member) => self.visit(member.element_type),
            NodeKind::TSEnumDeclaration(declaration) => {
                self.declare_identifier(self.current, declaration.id, DefinitionKind::Enum, node, None);
            }
            NodeKind::TSEnumMember(_) => (),
            NodeKind::TSModuleDeclaration(module) => {
                self.declare_identifier(self.current, module.id, DefinitionKind::Namespace, node, None);
                self.with_scope(ScopeKind::DeclareModule, node, |this| this.visit_opt(module.body));
            }
            NodeKind::TSImportEqualsDeclaration(import) => {
                self.declare_identifier(
                    self.current,
                    import.id,
                    DefinitionKind::ImportBinding,
                    node,
                    None,
                );
                if !matches!(
                    self.data(import.module_reference),
                    NodeKind::TSExternalModuleReference(_)
                ) {
                    self.visit_type_name(import.module_reference);
                }
            }

            _ => self.visit_children(node),
        }
    }

    fn visit_export_specifiers(&mut self, specifiers: &[Id<Node>]) {
        for &specifier in specifiers {
            if let NodeKind::ExportSpecifier(specifier) = self.data(specifier) {
                self.visit(specifier.local);
            }
        }
    }

    /// The leftmost identifier of a (possibly qualified) type name is the
    /// reference; the rest are property accesses.
    fn visit_type_name(&mut self, name: Id<Node>) {
        match self.data(name) {
            NodeKind::Identifier(identifier) => self.add_reference(name, identifier.name),
            NodeKind::QualifiedTypeIdentifier(qualified) => self.visit_type_name(qualified.qualification),
            NodeKind::QualifiedTypeofIdentifier(qualified) => {
                self.visit_type_name(qualified.qualification)
            }
            NodeKind::TSQualifiedName(qualified) => self.visit_type_name(qualified.left),
            NodeKind::MemberExpression(member) => self.visit_type_name(member.object),
            _ => self.visit(name),
        }
    }

    fn visit_binding_annotation(&mut self, identifier: Id<Node>) {
        if let NodeKind::Identifier(identifier) = self.data(identifier) {
            self.visit_opt(identifier.type_annotation);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn visit_function(
        &mut self,
        node: Id<Node>,
        inner_id: Option<Id<Node>>,
        type_parameters: Option<Id<Node>>,
        params: &[Id<Node>],
        return_type: Option<Id<Node>>,
        predicate: Option<Id<Node>>,
        body: Id<Node>,
    ) {
        self.with_scope(ScopeKind::Function, node, |this| {
            if let Some(id) = inner_id {
                let scope = this.current;
                this.declare_identifier(scope, id, DefinitionKind::FunctionName, node, None);
            }
            this.declare_type_parameters(type_parameters);
            this.declare_params(params, node);
            this.visit_opt(return_type);
            this.visit_opt(predicate);
            match this.data(body) {
                NodeKind::BlockStatement(block) => this.visit_all(&block.body),
                _ => this.visit(body),
            }
        });
    }

    fn declare_params(&mut self, params: &[Id<Node>], node: Id<Node>) {
        let scope = self.current;
        for &param in params {
            self.declare_pattern(param, DefinitionKind::Parameter, scope, node, None);
        }
    }

    fn declare_type_parameters(&mut self, type_parameters: Option<Id<Node>>) {
        let type_parameters = match type_parameters {
            Some(type_parameters) => type_parameters,
            None => return,
        };
        let params = match self.data(type_parameters) {
            NodeKind::TypeParameterDeclaration(declaration) => declaration.params,
            NodeKind::TSTypeParameterDeclaration(declaration) => declaration.params,
            _ => return,
        };
        for param in params {
            self.declare_type_parameter(param);
        }
    }

    fn declare_type_parameter(&mut self, param: Id<Node>) {
        let scope = self.current;
        match self.data(param) {
            NodeKind::TypeParameter(type_parameter) => {
                self.declare(
                    scope,
                    &type_parameter.name,
                    Definition {
                        kind: DefinitionKind::TypeParameter,
                        name: param,
                        node: param,
                        parent: param.ref_(self.arena).maybe_parent(),
                    },
                );
                self.visit_opt(type_parameter.bound);
                self.visit_opt(type_parameter.variance);
                self.visit_opt(type_parameter.default_);
            }
            NodeKind::TSTypeParameter(type_parameter) => {
                self.declare_identifier(
                    scope,
                    type_parameter.name,
                    DefinitionKind::TypeParameter,
                    param,
                    param.ref_(self.arena).maybe_parent(),
                );
                self.visit_opt(type_parameter.constraint);
                self.visit_opt(type_parameter.default_);
            }
            _ => self.visit(param),
        }
    }

    fn declare_pattern(
        &mut self,
        pattern: Id<Node>,
        kind: DefinitionKind,
        scope: ScopeId,
        node: Id<Node>,
        parent: Option<Id<Node>>,
    ) {
        match self.data(pattern) {
            NodeKind::Identifier(identifier) => {
                self.declare_identifier(scope, pattern, kind, node, parent);
                self.visit_opt(identifier.type_annotation);
            }
            NodeKind::ObjectPattern(object) => {
                for property in object.properties {
                    match self.data(property) {
                        NodeKind::Property(property) => {
                            if property.computed {
                                self.visit(property.key);
                            }
                            self.declare_pattern(property.value, kind, scope, node, parent);
                        }
                        _ => self.declare_pattern(property, kind, scope, node, parent),
                    }
                }
                self.visit_opt(object.type_annotation);
            }
            NodeKind::ArrayPattern(array) => {
                for element in array.elements.into_iter().flatten() {
                    self.declare_pattern(element, kind, scope, node, parent);
                }
                self.visit_opt(array.type_annotation);
            }
            NodeKind::RestElement(rest) => {
                self.declare_pattern(rest.argument, kind, scope, node, parent);
                self.visit_opt(rest.type_annotation);
            }
            NodeKind::AssignmentPattern(assignment) => {
                self.declare_pattern(assignment.left, kind, scope, node, parent);
                self.visit(assignment.right);
            }
            _ => self.visit(pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{read_estree, AstArena, InArena};

    fn identifier(name: &str) -> serde_json::Value {
        json!({"type": "Identifier", "name": name})
    }

    fn generic(name: &str) -> serde_json::Value {
        json!({"type": "GenericTypeAnnotation", "id": identifier(name)})
    }

    #[test]
    fn test_type_parameters_shadow_module_types() {
        let arena = AstArena::new();
        let program = read_estree(
            &arena,
            &json!({
                "type": "Program",
                "sourceType": "module",
                "body": [
                    {"type": "TypeAlias", "id": identifier("T"), "right": {"type": "StringTypeAnnotation"}},
                    {
                        "type": "TypeAlias",
                        "id": identifier("Box"),
                        "typeParameters": {
                            "type": "TypeParameterDeclaration",
                            "params": [{"type": "TypeParameter", "name": "T"}],
                        },
                        "right": generic("T"),
                    },
                    {"type": "TypeAlias", "id": identifier("Alias"), "right": generic("T")},
                ],
            }),
        )
        .unwrap();
        let manager = analyze_scope(&arena, program);
        let body = program.ref_(&arena).children();

        let boxed = manager.type_dependencies(&arena, body[1]);
        assert!(!boxed.contains("T"));

        let alias = manager.type_dependencies(&arena, body[2]);
        assert_eq!(alias.into_iter().collect::<Vec<_>>(), vec!["T"]);
    }

    #[test]
    fn test_unresolved_references_become_implicit_globals() {
        let arena = AstArena::new();
        let program = read_estree(
            &arena,
            &json!({
                "type": "Program",
                "sourceType": "module",
                "body": [
                    {"type": "TypeAlias", "id": identifier("A"), "right": generic("React$Node")},
                ],
            }),
        )
        .unwrap();
        let manager = analyze_scope(&arena, program);
        let variable = manager
            .lookup(manager.global_scope(), "React$Node")
            .unwrap();
        assert!(variable.is_implicit_global());
        assert_eq!(variable.references.len(), 1);
        assert!(manager.module_variable("A").is_some());
        assert_ne!(manager.module_scope(), manager.global_scope());
    }

    #[test]
    fn test_imports_bind_in_the_module_scope() {
        let arena = AstArena::new();
        let program = read_estree(
            &arena,
            &json!({
                "type": "Program",
                "sourceType": "module",
                "body": [
                    {
                        "type": "ImportDeclaration",
                        "importKind": "value",
                        "source": {"type": "Literal", "value": "react", "raw": "'react'"},
                        "specifiers": [{"type": "ImportDefaultSpecifier", "local": identifier("React")}],
                    },
                    {"type": "TypeAlias", "id": identifier("A"), "right": generic("React")},
                ],
            }),
        )
        .unwrap();
        let manager = analyze_scope(&arena, program);
        let variable = manager.module_variable("React").unwrap();
        assert_eq!(variable.defs[0].kind, DefinitionKind::ImportBinding);
        assert_eq!(variable.references.len(), 1);
    }
}
