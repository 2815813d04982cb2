use crate::ItemKey;

/// A value the engine can place in a list.
///
/// The key tells positions apart across collections: a node that showed an item with the
/// same key is preferred when that item comes back. The pool keeps a copy of the item last
/// rendered into each node, and a node is only left untouched while that copy equals the
/// item at its position. An edited item with an unchanged key is rebound.
pub trait ListItem: Clone + PartialEq {
    type Key: ItemKey;

    /// A stable identity, unique within one collection.
    fn key(&self) -> Self::Key;
}
