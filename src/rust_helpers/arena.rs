use std::cell::{Ref, RefCell, RefMut};

use id_arena::{Arena, Id};

use crate::{BaseTextRange, Node, SyntaxKind};

/// Owns every node of one translation call.
#[derive(Default)]
pub struct AstArena {
    nodes: RefCell<Arena<Node>>,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[track_caller]
    pub fn node(&self, node: Id<Node>) -> Ref<Node> {
        Ref::map(self.nodes.borrow(), |nodes| &nodes[node])
    }

    #[track_caller]
    pub fn node_mut(&self, node: Id<Node>) -> RefMut<Node> {
        RefMut::map(self.nodes.borrow_mut(), |nodes| &mut nodes[node])
    }

    /// Allocates `node` and points the parent reference of each of its
    /// children at the new handle.
    #[track_caller]
    pub fn alloc_node(&self, node: Node) -> Id<Node> {
        let children = node.children();
        let id = self.nodes.borrow_mut().alloc(node);
        for child in children {
            self.node(child).set_parent(Some(id));
        }
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait HasArena {
    fn arena(&self) -> &AstArena;

    #[track_caller]
    fn node(&self, node: Id<Node>) -> Ref<Node> {
        self.arena().node(node)
    }

    #[track_caller]
    fn node_mut(&self, node: Id<Node>) -> RefMut<Node> {
        self.arena().node_mut(node)
    }

    #[track_caller]
    fn alloc_node(&self, node: Node) -> Id<Node> {
        self.arena().alloc_node(node)
    }

    /// The kind of `node`. The arena borrow ends before this returns, so the
    /// result can be matched on while allocating.
    #[track_caller]
    fn kind_of(&self, node: Id<Node>) -> SyntaxKind {
        self.node(node).kind()
    }

    #[track_caller]
    fn range_of(&self, node: Id<Node>) -> BaseTextRange {
        self.node(node).range()
    }
}

impl HasArena for AstArena {
    fn arena(&self) -> &AstArena {
        self
    }
}

pub trait InArena {
    type Item: ?Sized;

    /// Borrows the node from the arena. Drop the returned `Ref` before any
    /// `NodeFactory::create*` or other allocation: holding it across one
    /// panics with "already borrowed". Temporaries in a `match` scrutinee, an
    /// `if let`, a `for` iterator or a call argument live until the end of
    /// that expression, so bind what is needed to a local first.
    #[track_caller]
    fn ref_<'a>(&self, has_arena: &'a impl HasArena) -> Ref<'a, Self::Item>;
}

impl InArena for Id<Node> {
    type Item = Node;

    fn ref_<'a>(&self, has_arena: &'a impl HasArena) -> Ref<'a, Node> {
        has_arena.node(*self)
    }
}

pub trait OptionInArena {
    type Item;

    #[track_caller]
    fn refed<'a>(self, has_arena: &'a impl HasArena) -> Option<Ref<'a, Self::Item>>;
}

impl OptionInArena for Option<Id<Node>> {
    type Item = Node;

    fn refed<'a>(self, has_arena: &'a impl HasArena) -> Option<Ref<'a, Node>> {
        self.map(|node| has_arena.node(node))
    }
}
