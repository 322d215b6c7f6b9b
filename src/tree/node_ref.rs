use core::fmt::Debug;
use crate::storage::Storage;
use crate::node::Node;
use crate::tag::Tag;
use crate::iter::{
    ChildrenIter, AncestorsIter, NextSiblingsIter, PrevSiblingsIter, SiblingRingIter,
    PreorderIter, PostorderIter,
};
use super::Tree;

/// A read-only handle to a single node of a [`Tree`].
///
/// Borrows the tree for as long as it lives, so every query it exposes is a
/// plain, panic-free (on valid keys) read. Obtained from
/// [`Tree::node`]/[`Tree::get`] or by navigating from another `NodeRef`.
pub struct NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a Tree<T, K, S>,
    key: K,
}
impl<'a, T, K, S> NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(tree: &'a Tree<T, K, S>, key: K) -> Self {
        Self { tree, key }
    }
    pub(crate) fn tree(&self) -> &'a Tree<T, K, S> {
        self.tree
    }

    /// Returns the key identifying this node in the tree's storage.
    #[must_use]
    pub fn raw_key(&self) -> &K {
        &self.key
    }
    /// Consumes the handle, returning the key identifying this node.
    #[must_use]
    pub fn into_raw_key(self) -> K {
        self.key
    }

    /// Returns a reference to the node's payload.
    #[must_use]
    pub fn value(&self) -> &'a T {
        &self.tree.get_node(&self.key).value
    }
    /// Returns the node's identity tag.
    #[must_use]
    pub fn tag(&self) -> Tag {
        self.tree.get_node(&self.key).tag
    }

    /// Returns the node's parent, or `None` if it is a root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.tree.get_node(&self.key).parent.clone().map(|k| Self::new(self.tree, k))
    }
    /// Returns the node's first child, or `None` if it is a leaf.
    #[must_use]
    pub fn first_child(&self) -> Option<Self> {
        self.tree.get_node(&self.key).first_child.clone().map(|k| Self::new(self.tree, k))
    }
    /// Returns the node's last child, or `None` if it is a leaf.
    #[must_use]
    pub fn last_child(&self) -> Option<Self> {
        self.tree.get_node(&self.key).last_child.clone().map(|k| Self::new(self.tree, k))
    }
    /// Returns the node's next sibling, or `None` if it is the last child of
    /// its parent (or a root).
    #[must_use]
    pub fn next_sibling(&self) -> Option<Self> {
        self.tree.get_node(&self.key).next_sibling.clone().map(|k| Self::new(self.tree, k))
    }
    /// Returns the node's previous sibling, or `None` if it is the first
    /// child of its parent (or a root).
    #[must_use]
    pub fn prev_sibling(&self) -> Option<Self> {
        self.tree.get_node(&self.key).prev_sibling.clone().map(|k| Self::new(self.tree, k))
    }

    /// Returns the number of direct children the node has, in O(1).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.tree.get_node(&self.key).num_children
    }
    /// Returns the number of *other* nodes in this node's subtree: every
    /// descendant, at every depth, but not the node itself.
    ///
    /// O(size of the subtree): a postorder traversal of the subtree always
    /// visits the node itself exactly once, last, so the count is one more
    /// than the number of descendants.
    #[must_use]
    pub fn size(&self) -> usize {
        self.postorder().count() - 1
    }
    /// Returns the node's depth: the number of ancestors it has. A root has
    /// level 0.
    ///
    /// O(depth).
    #[must_use]
    pub fn level(&self) -> u32 {
        let mut level = 0;
        let mut cursor = self.parent();
        while let Some(p) = cursor {
            level += 1;
            cursor = p.parent();
        }
        level
    }

    /// Returns `true` if the node has no parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.tree.get_node(&self.key).parent.is_none()
    }
    /// Returns `true` if the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.tree.get_node(&self.key).first_child.is_none()
    }
    /// Returns `true` if the node has a parent, i.e. is not a root.
    ///
    /// Equivalent to `!self.is_root()`; kept as its own method because the
    /// "is this node a descendant of *something*" question and the "is this
    /// node linked into any tree at all" question
    /// ([`in_tree`][NodeRef::in_tree]) read differently at call sites even
    /// though the first implies the second.
    #[must_use]
    pub fn is_descendant(&self) -> bool {
        !self.is_root()
    }
    /// Returns `true` if the node is linked to any other node at all, either
    /// as a child of one or as the parent of at least one child.
    ///
    /// A freshly inserted, never-attached root returns `false` here; a root
    /// with children, or any non-root node, returns `true`.
    #[must_use]
    pub fn in_tree(&self) -> bool {
        let node = self.tree.get_node(&self.key);
        node.parent.is_some() || node.first_child.is_some()
    }

    /// Returns the lowest common ancestor of `self` and `other`, or `None` if
    /// they do not share one (i.e. they are in different trees within the
    /// same arena).
    ///
    /// If one of the two is an ancestor of the other, it is its own answer.
    /// O(level(self) * level(other)).
    #[must_use]
    pub fn lca(&self, other: &Self) -> Option<Self> {
        let mut candidate = Some(Self::new(self.tree, self.key.clone()));
        while let Some(anc) = candidate {
            if anc.raw_key() == other.raw_key() {
                return Some(anc);
            }
            let mut cursor = other.parent();
            while let Some(p) = cursor {
                if p.raw_key() == anc.raw_key() {
                    return Some(anc);
                }
                cursor = p.parent();
            }
            candidate = anc.parent();
        }
        None
    }

    /// Iterates the node's direct children, left to right.
    #[must_use]
    pub fn children(&self) -> ChildrenIter<'a, T, K, S> {
        ChildrenIter {
            tree: self.tree,
            current: self.first_child().map(Self::into_raw_key),
            exhausted: false,
        }
    }
    /// Iterates the node's ancestors, nearest first, including the node
    /// itself.
    #[must_use]
    pub fn ancestors(&self) -> AncestorsIter<'a, T, K, S> {
        AncestorsIter { tree: self.tree, current: Some(self.key.clone()), exhausted: false }
    }
    /// Iterates the node's ancestors, nearest first, excluding the node
    /// itself.
    #[must_use]
    pub fn strict_ancestors(&self) -> AncestorsIter<'a, T, K, S> {
        AncestorsIter { tree: self.tree, current: self.parent().map(Self::into_raw_key), exhausted: false }
    }
    /// Iterates the node's following siblings, nearest first, including the
    /// node itself.
    #[must_use]
    pub fn next_siblings(&self) -> NextSiblingsIter<'a, T, K, S> {
        NextSiblingsIter { tree: self.tree, current: Some(self.key.clone()), exhausted: false }
    }
    /// Iterates the node's following siblings, nearest first, excluding the
    /// node itself.
    #[must_use]
    pub fn strict_next_siblings(&self) -> NextSiblingsIter<'a, T, K, S> {
        NextSiblingsIter {
            tree: self.tree,
            current: self.next_sibling().map(Self::into_raw_key),
            exhausted: false,
        }
    }
    /// Iterates the node's preceding siblings, nearest first, including the
    /// node itself.
    #[must_use]
    pub fn prev_siblings(&self) -> PrevSiblingsIter<'a, T, K, S> {
        PrevSiblingsIter { tree: self.tree, current: Some(self.key.clone()), exhausted: false }
    }
    /// Iterates the node's preceding siblings, nearest first, excluding the
    /// node itself.
    #[must_use]
    pub fn strict_prev_siblings(&self) -> PrevSiblingsIter<'a, T, K, S> {
        PrevSiblingsIter {
            tree: self.tree,
            current: self.prev_sibling().map(Self::into_raw_key),
            exhausted: false,
        }
    }
    /// Iterates every other sibling of the node, starting just after it and
    /// wrapping around.
    #[must_use]
    pub fn siblings(&self) -> SiblingRingIter<'a, T, K, S> {
        SiblingRingIter::new(self)
    }
    /// Iterates the node and its descendants in preorder (a node before its
    /// children).
    #[must_use]
    pub fn preorder(&self) -> PreorderIter<'a, T, K, S> {
        PreorderIter::new(self.tree, self.key.clone())
    }
    /// Iterates the node and its descendants in postorder (a node's children
    /// before the node itself).
    #[must_use]
    pub fn postorder(&self) -> PostorderIter<'a, T, K, S> {
        PostorderIter::new(self.tree, self.key.clone())
    }
}
impl<'a, T, K, S> Clone for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        Self { tree: self.tree, key: self.key.clone() }
    }
}
impl<'a, T, K, S> Copy for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
}
impl<'a, T, K, S> PartialEq for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.key == other.key
    }
}
impl<'a, T: Debug, K, S> Debug for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeRef").field("key", &self.key).field("value", self.value()).finish()
    }
}
