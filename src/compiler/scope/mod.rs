use std::collections::HashMap;

use bitflags::bitflags;
use id_arena::Id;
use indexmap::{IndexMap, IndexSet};

use crate::{for_each_descendant, HasArena, InArena, Node, NodeKind};

mod scope_analyzer;
pub use scope_analyzer::analyze_scope;

pub type ScopeId = usize;
pub type VariableId = usize;
pub type ReferenceId = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Module,
    Function,
    Block,
    Class,
    /// Holds type parameters (and `infer` bindings) of a type-level construct.
    Type,
    Catch,
    For,
    Switch,
    DeclareModule,
}

bitflags! {
    pub struct ScopeFlags: u8 {
        const NONE = 0;
        /// `var` declarations below this scope land here.
        const HOISTS_VARS = 1 << 0;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DefinitionKind {
    ImportBinding,
    ClassName,
    Enum,
    FunctionName,
    ImplicitGlobalVariable,
    Variable,
    CatchClause,
    Parameter,
    TypeParameter,
    Type,
    Namespace,
}

/// One declaration of a variable. `name` is the binding identifier (or the
/// type parameter node), `node` the declaring node, `parent` its enclosing
/// declaration when there is one (the `ImportDeclaration` of a specifier,
/// the `VariableDeclaration` of a declarator).
#[derive(Clone, Debug)]
pub struct Definition {
    pub kind: DefinitionKind,
    pub name: Id<Node>,
    pub node: Id<Node>,
    pub parent: Option<Id<Node>>,
}

#[derive(Clone, Debug)]
pub struct Variable {
    pub name: String,
    pub scope: ScopeId,
    pub defs: Vec<Definition>,
    pub references: Vec<ReferenceId>,
}

impl Variable {
    pub fn is_implicit_global(&self) -> bool {
        self.defs
            .iter()
            .all(|def| def.kind == DefinitionKind::ImplicitGlobalVariable)
    }
}

#[derive(Clone, Debug)]
pub struct Reference {
    pub identifier: Id<Node>,
    pub name: String,
    pub from: ScopeId,
    pub resolved: Option<VariableId>,
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub flags: ScopeFlags,
    pub block: Id<Node>,
    pub upper: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    pub variables: IndexMap<String, VariableId>,
    pub references: Vec<ReferenceId>,
}

/// Read-only result of scope analysis over one program.
#[derive(Debug, Default)]
pub struct ScopeManager {
    pub(crate) scopes: Vec<Scope>,
    pub(crate) variables: Vec<Variable>,
    pub(crate) references: Vec<Reference>,
    pub(crate) node_to_scope: HashMap<Id<Node>, ScopeId>,
    pub(crate) identifier_to_reference: HashMap<Id<Node>, ReferenceId>,
}

impl ScopeManager {
    pub fn global_scope(&self) -> ScopeId {
        0
    }

    /// The module scope directly under the global scope, or the global scope
    /// itself for scripts.
    pub fn module_scope(&self) -> ScopeId {
        self.scopes[self.global_scope()]
            .children
            .iter()
            .copied()
            .find(|&child| self.scopes[child].kind == ScopeKind::Module)
            .unwrap_or_else(|| self.global_scope())
    }

    pub fn scope(&self, scope: ScopeId) -> &Scope {
        &self.scopes[scope]
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn variable(&self, variable: VariableId) -> &Variable {
        &self.variables[variable]
    }

    /// The scope opened by `node`, if it opens one.
    pub fn acquire(&self, node: Id<Node>) -> Option<ScopeId> {
        self.node_to_scope.get(&node).copied()
    }

    pub fn reference(&self, identifier: Id<Node>) -> Option<&Reference> {
        self.identifier_to_reference
            .get(&identifier)
            .map(|&reference| &self.references[reference])
    }

    /// The variable a referencing identifier resolves to.
    pub fn resolve(&self, identifier: Id<Node>) -> Option<&Variable> {
        self.reference(identifier)?
            .resolved
            .map(|variable| &self.variables[variable])
    }

    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Variable> {
        self.scopes[scope]
            .variables
            .get(name)
            .map(|&variable| &self.variables[variable])
    }

    pub fn module_variable(&self, name: &str) -> Option<&Variable> {
        self.lookup(self.module_scope(), name)
    }

    /// Names of module-scope variables referenced anywhere under `node`.
    /// Bindings of inner scopes (type parameters, parameters) and unresolved
    /// globals never contribute.
    pub fn type_dependencies(&self, arena: &impl HasArena, node: Id<Node>) -> IndexSet<String> {
        let module_scope = self.module_scope();
        let mut dependencies = IndexSet::new();
        for_each_descendant(arena, node, &mut |descendant| {
            if !matches!(descendant.ref_(arena).data, NodeKind::Identifier(_)) {
                return;
            }
            if let Some(variable) = self.resolve(descendant) {
                if variable.scope == module_scope && !variable.is_implicit_global() {
                    dependencies.insert(variable.name.clone());
                }
            }
        });
        dependencies
    }
}
