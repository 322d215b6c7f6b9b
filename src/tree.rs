//! The arena type and the node handles through which it is queried and mutated.
//!
//! # Error handling
//! Every operation here has exactly one failure mode: a violated
//! precondition, which panics. There is no `Result`-returning API surface —
//! absence (a node with no parent, an exhausted iterator) is represented
//! with [`Option`], and a caller mistake (attaching a node to itself,
//! inserting a sibling under a root) is a programming error, not a
//! recoverable runtime condition, so it panics immediately rather than
//! propagating a typed error the caller would almost always `.unwrap()`
//! anyway. [`AttachError`][crate::AttachError] exists only to give those
//! panics a consistent, matchable message.

use core::fmt::Debug;
use crate::storage::Storage;
use crate::node::{Node, Destructor};
use crate::tag::Tag;

mod node_ref;
mod node_ref_mut;
mod link_surgery;

pub use node_ref::NodeRef;
pub use node_ref_mut::NodeRefMut;

/// An arena-allocated n-ary tree.
///
/// A `Tree` does not single out one node as *the* root: it is a forest of
/// arena slots, any subset of which may currently be linked into parent/child
/// relationships. Callers create roots with [`insert_root`][Tree::insert_root]
/// and reach every other node by walking from one.
///
/// Generic over the payload `T`, the key type `K` (defaulted to `usize`, the
/// same as [`granite`][crate::storage]'s own default), and the backing
/// [`Storage`] `S`. The default storage is [`granite::DefaultStorage`], a
/// sparse slab with a free list: keys stay valid and distinct for as long as
/// the node they name is alive, even as other nodes come and go, which is
/// what lets a [`NodeRef`]/[`NodeRefMut`] key double as the node's identity.
///
/// # Example
/// ```rust
/// use rosetree::Tree;
/// use rosetree::tag::Tag;
///
/// let mut tree = Tree::<_>::new();
/// let root = tree.insert_root(451, Tag::new(2), None);
/// assert!(tree.node(root).is_leaf());
/// ```
pub struct Tree<T, K = usize, S = crate::storage::DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    storage: S,
}
impl<T, K, S> Tree<T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self { storage: S::new() }
    }
    /// Creates an empty tree with preallocated storage for at least `capacity`
    /// nodes.
    ///
    /// # Panics
    /// May panic if the storage has a fixed capacity smaller than `capacity`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { storage: S::with_capacity(capacity) }
    }

    /// Inserts a brand new root node, unconnected to anything else in the
    /// tree, and returns its key.
    ///
    /// `destructor`, if provided, is invoked exactly once should this node
    /// ever be passed to [`NodeRefMut::destroy`].
    pub fn insert_root(&mut self, value: T, tag: Tag, destructor: Option<Destructor<T>>) -> K {
        self.storage.add(Node::detached(value, tag, destructor))
    }

    /// Returns `true` if `key` names a node currently alive in the tree.
    ///
    /// This is the validity predicate: a key remains meaningful for exactly
    /// as long as `contains` returns `true` for it. Once a node is removed
    /// from storage (by [`destroy`][NodeRefMut::destroy]), its key becomes
    /// permanently invalid and must not be reused.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.storage.contains_key(key)
    }

    /// Returns a read-only handle to the node named by `key`.
    ///
    /// # Panics
    /// Panics (via the handle's own operations) if `key` does not currently
    /// name a live node. Prefer [`get`][Tree::get] when `key` might be stale.
    #[must_use]
    pub fn node(&self, key: K) -> NodeRef<'_, T, K, S> {
        NodeRef::new(self, key)
    }
    /// Returns a mutable handle to the node named by `key`.
    ///
    /// # Panics
    /// Panics (via the handle's own operations) if `key` does not currently
    /// name a live node. Prefer [`get_mut`][Tree::get_mut] when `key` might be
    /// stale.
    #[must_use]
    pub fn node_mut(&mut self, key: K) -> NodeRefMut<'_, T, K, S> {
        NodeRefMut::new(self, key)
    }
    /// Returns a read-only handle to `key`, or `None` if it does not
    /// currently name a live node.
    #[must_use]
    pub fn get(&self, key: K) -> Option<NodeRef<'_, T, K, S>> {
        if self.contains(&key) {
            Some(NodeRef::new(self, key))
        } else {
            None
        }
    }
    /// Returns a mutable handle to `key`, or `None` if it does not currently
    /// name a live node.
    #[must_use]
    pub fn get_mut(&mut self, key: K) -> Option<NodeRefMut<'_, T, K, S>> {
        if self.contains(&key) {
            Some(NodeRefMut::new(self, key))
        } else {
            None
        }
    }

    /// Returns the number of nodes currently live in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }
    /// Returns `true` if the tree has no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
    /// Returns the number of nodes the storage can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }
    /// Reserves capacity for at least `additional` more nodes.
    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional);
    }
    /// Shrinks the storage's capacity as close to its length as it can.
    pub fn shrink_to_fit(&mut self) {
        self.storage.shrink_to_fit();
    }

    pub(crate) fn get_node(&self, key: &K) -> &Node<T, K> {
        debug_assert!(
            self.storage.contains_key(key),
            "use of a key ({:?}) that does not name a live node",
            key,
        );
        unsafe {
            // SAFETY: every key handed out by this type is validated against
            // `contains_key` before use; see `NodeRef`/`NodeRefMut`.
            self.storage.get_unchecked(key)
        }
    }
    pub(crate) fn get_node_mut(&mut self, key: &K) -> &mut Node<T, K> {
        debug_assert!(
            self.storage.contains_key(key),
            "use of a key ({:?}) that does not name a live node",
            key,
        );
        unsafe {
            // SAFETY: as above
            self.storage.get_unchecked_mut(key)
        }
    }
}
impl<T, K, S> Default for Tree<T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}
impl<T: Debug, K, S> Debug for Tree<T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K> + Debug,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tree").field("storage", &self.storage).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tag;

    #[test]
    fn new_tree_is_empty() {
        let tree = Tree::<i32>::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn insert_root_is_a_leaf_root() {
        let mut tree = Tree::<_>::new();
        let root = tree.insert_root(451, Tag::new(2), None);
        let node = tree.node(root);
        assert!(node.is_root());
        assert!(node.is_leaf());
        assert_eq!(*node.value(), 451);
    }

    #[test]
    fn contains_reflects_liveness() {
        let mut tree = Tree::<_>::new();
        let root = tree.insert_root(1, Tag::new(2), None);
        assert!(tree.contains(&root));
        tree.node_mut(root.clone()).destroy();
        assert!(!tree.contains(&root));
    }
}
