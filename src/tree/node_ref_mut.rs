use core::fmt::Debug;
use crate::storage::Storage;
use crate::node::Node;
use crate::tag::Tag;
use crate::iter::{
    self, ChildrenIterMut, AncestorsIterMut, NextSiblingsIterMut, PrevSiblingsIterMut,
    SiblingRingIterMut, PreorderIterMut, PostorderIterMut,
};
use super::{Tree, NodeRef, link_surgery};

/// A mutable handle to a single node of a [`Tree`].
///
/// Exposes every read-only query [`NodeRef`] does (through
/// [`as_ref`][NodeRefMut::as_ref] or the `From` conversion), plus the
/// topology operations that attach, detach, and destroy nodes. Obtained from
/// [`Tree::node_mut`]/[`Tree::get_mut`] or by navigating from another
/// `NodeRefMut`.
pub struct NodeRefMut<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a mut Tree<T, K, S>,
    key: K,
}
impl<'a, T, K, S> NodeRefMut<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(tree: &'a mut Tree<T, K, S>, key: K) -> Self {
        Self { tree, key }
    }

    /// Returns the key identifying this node in the tree's storage.
    #[must_use]
    pub fn raw_key(&self) -> &K {
        &self.key
    }

    /// Borrows this handle as a read-only [`NodeRef`].
    #[must_use]
    pub fn as_ref(&self) -> NodeRef<'_, T, K, S> {
        NodeRef::new(&*self.tree, self.key.clone())
    }

    /// Returns a reference to the node's payload.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.tree.get_node(&self.key).value
    }
    /// Returns a mutable reference to the node's payload.
    #[must_use]
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.tree.get_node_mut(&self.key).value
    }
    /// Returns the node's identity tag.
    #[must_use]
    pub fn tag(&self) -> Tag {
        self.tree.get_node(&self.key).tag
    }
    /// Replaces the node's identity tag, returning the old one.
    pub fn set_tag(&mut self, tag: Tag) -> Tag {
        core::mem::replace(&mut self.tree.get_node_mut(&self.key).tag, tag)
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
    /// Returns the number of direct children the node has, in O(1).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.tree.get_node(&self.key).num_children
    }

    /// Inserts `child` (which must currently be a root) as the first child of
    /// this node.
    ///
    /// # Panics
    /// Panics if `child` is this node's own key, or if `child` is not
    /// currently a root. In debug builds, also panics if `child` is an
    /// ancestor of this node (which would create a cycle).
    pub fn push_child_front(&mut self, child: K) {
        self.check_attachable(&child);
        let parent_key = self.key.clone();
        #[cfg(feature = "log")]
        log::trace!("push_child_front: attaching {:?} under {:?}", child, parent_key);
        link_surgery::attach_front(self.tree, &parent_key, &child);
    }
    /// Inserts `child` (which must currently be a root) as the last child of
    /// this node.
    ///
    /// # Panics
    /// Panics if `child` is this node's own key, or if `child` is not
    /// currently a root. In debug builds, also panics if `child` is an
    /// ancestor of this node (which would create a cycle).
    pub fn push_child_back(&mut self, child: K) {
        self.check_attachable(&child);
        let parent_key = self.key.clone();
        #[cfg(feature = "log")]
        log::trace!("push_child_back: attaching {:?} under {:?}", child, parent_key);
        link_surgery::attach_back(self.tree, &parent_key, &child);
    }
    /// Inserts `sibling` (which must currently be a root) immediately before
    /// this node, under this node's parent.
    ///
    /// # Panics
    /// Panics if this node is a root (it has no parent to insert under), if
    /// `sibling` is this node's own key, or if `sibling` is not currently a
    /// root. In debug builds, also panics if `sibling` is an ancestor of this
    /// node.
    pub fn insert_sibling_before(&mut self, sibling: K) {
        self.check_attachable(&sibling);
        let parent = self
            .tree
            .get_node(&self.key)
            .parent
            .clone()
            .unwrap_or_else(|| panic!("{}", crate::AttachError::NoParent));
        let pos = self.key.clone();
        link_surgery::attach_before(self.tree, &pos, &parent, &sibling);
    }
    /// Inserts `sibling` (which must currently be a root) immediately after
    /// this node, under this node's parent.
    ///
    /// # Panics
    /// Panics if this node is a root, if `sibling` is this node's own key, or
    /// if `sibling` is not currently a root. In debug builds, also panics if
    /// `sibling` is an ancestor of this node.
    pub fn insert_sibling_after(&mut self, sibling: K) {
        self.check_attachable(&sibling);
        let parent = self
            .tree
            .get_node(&self.key)
            .parent
            .clone()
            .unwrap_or_else(|| panic!("{}", crate::AttachError::NoParent));
        let pos = self.key.clone();
        link_surgery::attach_after(self.tree, &pos, &parent, &sibling);
    }

    fn check_attachable(&self, other: &K) {
        if *other == self.key {
            panic!("{}", crate::AttachError::SelfAttach);
        }
        if self.tree.get_node(other).parent.is_some() {
            panic!("{}", crate::AttachError::NotARoot);
        }
        debug_assert!(
            !NodeRef::new(&*self.tree, self.key.clone()).ancestors().any(|anc| anc.raw_key() == other),
            "{}",
            crate::AttachError::WouldCycle,
        );
    }

    /// Detaches this node from its parent, making it a root. No-op if it is
    /// already a root. Its subtree, if any, stays attached to it.
    pub fn remove(&mut self) {
        if self.is_root() {
            return;
        }
        let key = self.key.clone();
        #[cfg(feature = "log")]
        log::trace!("remove: detaching {:?} from its parent", key);
        link_surgery::detach(self.tree, &key);
    }
    /// Flattens this node's entire subtree and detaches this node from its
    /// own parent: every descendant, at every depth, becomes its own
    /// isolated root, and so does this node itself.
    ///
    /// Walks the subtree in postorder, this node included and visited last,
    /// detaching each node as it is visited — so by the time a node is
    /// detached, every one of its own children has already been detached
    /// from it, leaving it childless as well as parentless.
    pub fn clear(&mut self) {
        let root = self.key.clone();
        #[cfg(feature = "log")]
        log::trace!("clear: flattening subtree rooted at {:?}", root);
        let mut current = Some(iter::postorder_leftmost(self.tree, root.clone()));
        while let Some(key) = current {
            let next = iter::postorder_advance(self.tree, &key, &root);
            link_surgery::detach(self.tree, &key);
            current = next;
        }
    }
    /// Destroys this node and its entire subtree.
    ///
    /// Walks the subtree in postorder. For each node, in order: detaches it
    /// from its (still-live) parent, removes it from the tree's storage, then
    /// invokes its destructor (if any) with its payload and tag. By the time
    /// a node's destructor runs, every one of its descendants has already
    /// been removed and destructed, and the node's own storage slot has
    /// already been freed — the destructor gets the payload by value and has
    /// no way to reach the tree.
    ///
    /// Consumes the handle, since the node it pointed to no longer exists
    /// once this returns.
    pub fn destroy(self) {
        let Self { tree, key: root } = self;
        #[cfg(feature = "log")]
        log::trace!("destroy: entering postorder walk of subtree rooted at {:?}", root);
        let mut current = Some(iter::postorder_leftmost(tree, root.clone()));
        while let Some(key) = current {
            let next = iter::postorder_advance(tree, &key, &root);
            link_surgery::detach(tree, &key);
            let tag = tree.get_node(&key).tag;
            #[cfg(feature = "log")]
            log::trace!("destroy: visiting {:?} (tag {})", key, tag);
            let mut node = tree.storage.remove(&key);
            if let Some(destructor) = node.destructor.take() {
                // The rest of the subtree below `key` has already been torn
                // down by the time this runs; if the destructor panics,
                // unwinding through that half-destroyed state is worse than
                // aborting.
                crate::util::abort_on_panic(move || destructor(&mut node.value, tag));
            }
            current = next;
        }
        #[cfg(feature = "log")]
        log::trace!("destroy: finished subtree rooted at {:?}", root);
    }

    /// Iterates the node's direct children, left to right.
    #[must_use]
    pub fn children_mut(&mut self) -> ChildrenIterMut<'_, T, K, S> {
        let start = self.tree.get_node(&self.key).first_child.clone();
        ChildrenIterMut::new(self.tree, start)
    }
    /// Iterates the node's ancestors, nearest first, including the node
    /// itself.
    #[must_use]
    pub fn ancestors_mut(&mut self) -> AncestorsIterMut<'_, T, K, S> {
        let start = Some(self.key.clone());
        AncestorsIterMut::new(self.tree, start)
    }
    /// Iterates the node's ancestors, nearest first, excluding the node
    /// itself.
    #[must_use]
    pub fn strict_ancestors_mut(&mut self) -> AncestorsIterMut<'_, T, K, S> {
        let start = self.tree.get_node(&self.key).parent.clone();
        AncestorsIterMut::new(self.tree, start)
    }
    /// Iterates the node's following siblings, nearest first, including the
    /// node itself.
    #[must_use]
    pub fn next_siblings_mut(&mut self) -> NextSiblingsIterMut<'_, T, K, S> {
        let start = Some(self.key.clone());
        NextSiblingsIterMut::new(self.tree, start)
    }
    /// Iterates the node's following siblings, nearest first, excluding the
    /// node itself.
    #[must_use]
    pub fn strict_next_siblings_mut(&mut self) -> NextSiblingsIterMut<'_, T, K, S> {
        let start = self.tree.get_node(&self.key).next_sibling.clone();
        NextSiblingsIterMut::new(self.tree, start)
    }
    /// Iterates the node's preceding siblings, nearest first, including the
    /// node itself.
    #[must_use]
    pub fn prev_siblings_mut(&mut self) -> PrevSiblingsIterMut<'_, T, K, S> {
        let start = Some(self.key.clone());
        PrevSiblingsIterMut::new(self.tree, start)
    }
    /// Iterates the node's preceding siblings, nearest first, excluding the
    /// node itself.
    #[must_use]
    pub fn strict_prev_siblings_mut(&mut self) -> PrevSiblingsIterMut<'_, T, K, S> {
        let start = self.tree.get_node(&self.key).prev_sibling.clone();
        PrevSiblingsIterMut::new(self.tree, start)
    }
    /// Iterates every other sibling of the node, starting just after it and
    /// wrapping around.
    #[must_use]
    pub fn siblings_mut(&mut self) -> SiblingRingIterMut<'_, T, K, S> {
        let start = self.key.clone();
        SiblingRingIterMut::new(self.tree, start)
    }
    /// Iterates the node and its descendants in preorder (a node before its
    /// children).
    ///
    /// Removing or destroying the node this iterator most recently yielded,
    /// before calling `next()` again, is a contract violation: see
    /// [`PreorderIterMut`][crate::iter::PreorderIterMut].
    #[must_use]
    pub fn preorder_mut(&mut self) -> PreorderIterMut<'_, T, K, S> {
        let root = self.key.clone();
        PreorderIterMut::new(self.tree, root)
    }
    /// Iterates the node and its descendants in postorder (a node's children
    /// before the node itself).
    ///
    /// Safe to remove or destroy the node this iterator most recently
    /// yielded before calling `next()` again.
    #[must_use]
    pub fn postorder_mut(&mut self) -> PostorderIterMut<'_, T, K, S> {
        let root = self.key.clone();
        PostorderIterMut::new(self.tree, root)
    }
}
impl<'a, T, K, S> From<NodeRefMut<'a, T, K, S>> for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn from(node: NodeRefMut<'a, T, K, S>) -> Self {
        let NodeRefMut { tree, key } = node;
        NodeRef::new(tree, key)
    }
}
impl<'a, T: Debug, K, S> Debug for NodeRefMut<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeRefMut").field("key", &self.key).field("value", self.value()).finish()
    }
}
