use std::convert::Infallible;

use id_arena::Id;

use crate::{Debug_, HasArena, InArena, Node, NodeKind};

/// What a transform callback decided about the node it was handed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VisitResult {
    /// Leave the node in place and descend into its children.
    Keep,
    /// Put another node in its place. The replacement is itself visited.
    Replace(Id<Node>),
    /// Delete the node from its parent.
    Remove,
    /// Leave the node in place without descending into it.
    Skip,
    /// Stop the whole walk.
    Break,
}

struct TransformState<TVisitor> {
    visitor: TVisitor,
    broken: bool,
}

/// Pre-order rewrite of the tree under `root`. Returns the (possibly
/// replaced) root, or `None` if the callback removed it.
pub fn transform(
    arena: &impl HasArena,
    root: Id<Node>,
    mut visitor: impl FnMut(Id<Node>) -> VisitResult,
) -> Option<Id<Node>> {
    match try_transform::<Infallible>(arena, root, |node| Ok(visitor(node))) {
        Ok(result) => result,
        Err(never) => match never {},
    }
}

/// Like [`transform`], but the callback may fail; the first error aborts the
/// walk and is returned.
pub fn try_transform<TError>(
    arena: &impl HasArena,
    root: Id<Node>,
    visitor: impl FnMut(Id<Node>) -> Result<VisitResult, TError>,
) -> Result<Option<Id<Node>>, TError> {
    let mut state = TransformState {
        visitor,
        broken: false,
    };
    visit(arena, root, &mut state)
}

fn visit<TError>(
    arena: &impl HasArena,
    node: Id<Node>,
    state: &mut TransformState<impl FnMut(Id<Node>) -> Result<VisitResult, TError>>,
) -> Result<Option<Id<Node>>, TError> {
    if state.broken {
        return Ok(Some(node));
    }
    match (state.visitor)(node)? {
        VisitResult::Break => {
            state.broken = true;
            Ok(Some(node))
        }
        VisitResult::Skip => Ok(Some(node)),
        VisitResult::Remove => Ok(None),
        VisitResult::Replace(replacement) if replacement != node => {
            visit(arena, replacement, state)
        }
        VisitResult::Replace(_) | VisitResult::Keep => {
            let children = node.ref_(arena).children();
            for child in children {
                let result = visit(arena, child, state)?;
                if result != Some(child) {
                    splice_child(arena, node, child, result);
                }
                if state.broken {
                    break;
                }
            }
            Ok(Some(node))
        }
    }
}

fn splice_child(
    arena: &impl HasArena,
    parent: Id<Node>,
    target: Id<Node>,
    replacement: Option<Id<Node>>,
) {
    let found = arena
        .node_mut(parent)
        .data
        .replace_child(target, replacement);
    if !found {
        Debug_.fail(Some("Unable to find the target node in its parent."));
    }
    if let Some(replacement) = replacement {
        replacement.ref_(arena).set_parent(Some(parent));
    }
}

/// Replaces `target` in its parent outside of a walk.
pub fn replace_node(arena: &impl HasArena, target: Id<Node>, replacement: Id<Node>) {
    let parent = Debug_.check_defined(
        target.ref_(arena).maybe_parent(),
        Some("Cannot replace a node without a parent."),
    );
    splice_child(arena, parent, target, Some(replacement));
}

/// Removes `target` from its parent outside of a walk.
pub fn remove_node(arena: &impl HasArena, target: Id<Node>) {
    let parent = Debug_.check_defined(
        target.ref_(arena).maybe_parent(),
        Some("Cannot remove a node without a parent."),
    );
    splice_child(arena, parent, target, None);
}

/// Applies `overrides` to a copy of `node`'s data. If nothing changed the same
/// handle comes back; otherwise a shallow clone whose direct children now
/// point at the clone.
pub fn node_with(
    arena: &impl HasArena,
    node: Id<Node>,
    overrides: impl FnOnce(&mut NodeKind),
) -> Id<Node> {
    let original = node.ref_(arena).data.clone();
    let mut data = original.clone();
    overrides(&mut data);
    if data == original {
        return node;
    }
    let (range, parent) = {
        let node_ref = node.ref_(arena);
        (node_ref.range(), node_ref.maybe_parent())
    };
    let clone = arena.alloc_node(Node::new(data, range));
    clone.ref_(arena).set_parent(parent);
    clone
}

/// Copies the whole subtree under `node`. The copy is detached (no parent).
pub fn deep_clone(arena: &impl HasArena, node: Id<Node>) -> Id<Node> {
    let (mut data, range) = {
        let node_ref = node.ref_(arena);
        (node_ref.data.clone(), node_ref.range())
    };
    data.map_children(&mut |child| deep_clone(arena, child));
    arena.alloc_node(Node::new(data, range))
}

/// Pre-order visit of every node under (and including) `root`.
pub fn for_each_descendant(arena: &impl HasArena, root: Id<Node>, action: &mut impl FnMut(Id<Node>)) {
    action(root);
    let children = root.ref_(arena).children();
    for child in children {
        for_each_descendant(arena, child, action);
    }
}
