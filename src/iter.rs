//! The seven traversal families, each in a read-only and a mutating flavor.
//!
//! The read-only iterators implement [`Iterator`] normally: every item they
//! yield borrows from the same external lifetime, so there is nothing
//! unusual about them. The mutating iterators cannot do this — each item
//! would need to borrow from `&mut self` itself, which [`Iterator`] has no
//! way to express before generic associated types — so they are plain
//! structs with an inherent `next(&mut self) -> Option<NodeRefMut<'_, ...>>`
//! method instead. Call it in a `while let Some(node) = iter.next() { ... }`
//! loop.
//!
//! Every iterator here — all seven families, both flavors — asserts rather
//! than silently stopping if it is advanced again after already returning
//! `None` once: this library treats that as a caller error, not a
//! convenience to rely on, unlike the usual
//! [`FusedIterator`][core::iter::FusedIterator] convention.
//!
//! Preorder's mutating flavor additionally forbids removing or destroying
//! the node it just yielded before calling `next()` again — doing so is
//! detected and asserted on the following call. Every other family tolerates
//! removing (or, where applicable, destroying) the just-yielded node, because
//! each precomputes the key it will yield next before handing out the
//! current one.

use core::fmt::Debug;
use crate::storage::Storage;
use crate::node::Node;
use crate::tree::{Tree, NodeRef, NodeRefMut};

// ---------------------------------------------------------------------
// Shared link-following helpers for preorder/postorder (no auxiliary
// storage: the existing parent/first_child/next_sibling links already carry
// enough information to backtrack, so no stack or sentinel node is needed).
// ---------------------------------------------------------------------

pub(crate) fn preorder_advance<T, K, S>(tree: &Tree<T, K, S>, key: &K, root: &K) -> Option<K>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    let node = NodeRef::new(tree, key.clone());
    if let Some(fc) = node.first_child() {
        return Some(fc.into_raw_key());
    }
    let mut cursor = node;
    while cursor.raw_key() != root {
        if let Some(ns) = cursor.next_sibling() {
            return Some(ns.into_raw_key());
        }
        cursor = match cursor.parent() {
            Some(p) => p,
            // Every non-root node has a parent; if this fires the arena's
            // own link invariants have been violated by something outside
            // this crate.
            None => unsafe {
                crate::util::unreachable_debugchecked(
                    "walked above the subtree root while advancing a preorder traversal",
                )
            },
        };
    }
    None
}

pub(crate) fn postorder_leftmost<T, K, S>(tree: &Tree<T, K, S>, mut key: K) -> K
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    loop {
        match NodeRef::new(tree, key.clone()).first_child() {
            Some(fc) => key = fc.into_raw_key(),
            None => return key,
        }
    }
}

pub(crate) fn postorder_advance<T, K, S>(tree: &Tree<T, K, S>, key: &K, root: &K) -> Option<K>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    if key == root {
        return None;
    }
    let node = NodeRef::new(tree, key.clone());
    match node.next_sibling() {
        Some(ns) => Some(postorder_leftmost(tree, ns.into_raw_key())),
        None => Some(match node.parent() {
            Some(p) => p.into_raw_key(),
            None => unsafe {
                crate::util::unreachable_debugchecked(
                    "non-root node had no parent while advancing a postorder traversal",
                )
            },
        }),
    }
}

macro_rules! const_iter {
    (
        $(#[$meta:meta])*
        $name:ident, $step:ident
    ) => {
        $(#[$meta])*
        pub struct $name<'a, T, K, S>
        where
            S: Storage<Element = Node<T, K>, Key = K>,
            K: Clone + Debug + Eq,
        {
            pub(crate) tree: &'a Tree<T, K, S>,
            pub(crate) current: Option<K>,
            pub(crate) exhausted: bool,
        }
        impl<'a, T, K, S> Iterator for $name<'a, T, K, S>
        where
            S: Storage<Element = Node<T, K>, Key = K>,
            K: Clone + Debug + Eq,
        {
            type Item = NodeRef<'a, T, K, S>;
            fn next(&mut self) -> Option<Self::Item> {
                let key = match self.current.take() {
                    Some(key) => key,
                    None => {
                        assert!(!self.exhausted, "called next() on an exhausted iterator");
                        self.exhausted = true;
                        return None;
                    }
                };
                let node = NodeRef::new(self.tree, key);
                self.current = node.$step().map(NodeRef::into_raw_key);
                Some(node)
            }
        }
        impl<'a, T, K, S> core::iter::FusedIterator for $name<'a, T, K, S>
        where
            S: Storage<Element = Node<T, K>, Key = K>,
            K: Clone + Debug + Eq,
        {
        }
    };
}

const_iter!(
    /// Iterates the direct children of a node, left to right.
    ///
    /// Built by [`NodeRef::children`][crate::tree::NodeRef::children].
    ChildrenIter,
    next_sibling
);
const_iter!(
    /// Iterates a node's ancestors, nearest first.
    ///
    /// Built by [`NodeRef::ancestors`][crate::tree::NodeRef::ancestors] (which
    /// includes the starting node) or
    /// [`NodeRef::strict_ancestors`][crate::tree::NodeRef::strict_ancestors]
    /// (which does not).
    AncestorsIter,
    parent
);
const_iter!(
    /// Iterates a node's following siblings, nearest first.
    ///
    /// Built by [`NodeRef::next_siblings`][crate::tree::NodeRef::next_siblings]
    /// (inclusive of the starting node) or
    /// [`NodeRef::strict_next_siblings`][crate::tree::NodeRef::strict_next_siblings]
    /// (exclusive).
    NextSiblingsIter,
    next_sibling
);
const_iter!(
    /// Iterates a node's preceding siblings, nearest first.
    ///
    /// Built by [`NodeRef::prev_siblings`][crate::tree::NodeRef::prev_siblings]
    /// (inclusive of the starting node) or
    /// [`NodeRef::strict_prev_siblings`][crate::tree::NodeRef::strict_prev_siblings]
    /// (exclusive).
    PrevSiblingsIter,
    prev_sibling
);

/// Iterates every *other* sibling of a node, starting just after it and
/// wrapping around to the siblings before it, excluding the starting node
/// itself.
///
/// Built by [`NodeRef::siblings`][crate::tree::NodeRef::siblings]. Yields
/// nothing if the starting node is a root or has no siblings.
pub struct SiblingRingIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a Tree<T, K, S>,
    start: K,
    phase: RingPhase<K>,
    exhausted: bool,
}
enum RingPhase<K> {
    Forward(Option<K>),
    Wrapped(Option<K>),
    Done,
}
impl<'a, T, K, S> SiblingRingIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(node: &NodeRef<'a, T, K, S>) -> Self {
        let first = node.next_sibling().map(NodeRef::into_raw_key);
        Self {
            tree: node.tree(),
            start: node.raw_key().clone(),
            phase: RingPhase::Forward(first),
            exhausted: false,
        }
    }
}
impl<'a, T, K, S> Iterator for SiblingRingIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = NodeRef<'a, T, K, S>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match core::mem::replace(&mut self.phase, RingPhase::Done) {
                RingPhase::Forward(Some(key)) => {
                    let node = NodeRef::new(self.tree, key);
                    self.phase = RingPhase::Forward(node.next_sibling().map(NodeRef::into_raw_key));
                    return Some(node);
                }
                RingPhase::Forward(None) => {
                    let first = NodeRef::new(self.tree, self.start.clone())
                        .parent()
                        .and_then(|p| p.first_child())
                        .map(NodeRef::into_raw_key);
                    self.phase = RingPhase::Wrapped(first);
                }
                RingPhase::Wrapped(Some(key)) if key != self.start => {
                    let node = NodeRef::new(self.tree, key);
                    self.phase = RingPhase::Wrapped(node.next_sibling().map(NodeRef::into_raw_key));
                    return Some(node);
                }
                RingPhase::Wrapped(_) | RingPhase::Done => {
                    self.phase = RingPhase::Done;
                    assert!(!self.exhausted, "called next() on an exhausted iterator");
                    self.exhausted = true;
                    return None;
                }
            }
        }
    }
}
impl<'a, T, K, S> core::iter::FusedIterator for SiblingRingIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}

/// Depth-first preorder (a node, then its descendants) over a subtree.
///
/// Built by [`NodeRef::preorder`][crate::tree::NodeRef::preorder]. Walks
/// using only the node's own topology links, so traversing costs no
/// allocation regardless of tree shape.
pub struct PreorderIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a Tree<T, K, S>,
    root: K,
    current: Option<K>,
    exhausted: bool,
}
impl<'a, T, K, S> PreorderIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(tree: &'a Tree<T, K, S>, root: K) -> Self {
        let current = Some(root.clone());
        Self { tree, root, current, exhausted: false }
    }
}
impl<'a, T, K, S> Iterator for PreorderIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = NodeRef<'a, T, K, S>;
    fn next(&mut self) -> Option<Self::Item> {
        let key = match self.current.take() {
            Some(key) => key,
            None => {
                assert!(!self.exhausted, "called next() on an exhausted preorder iterator");
                self.exhausted = true;
                return None;
            }
        };
        self.current = preorder_advance(self.tree, &key, &self.root);
        Some(NodeRef::new(self.tree, key))
    }
}
impl<'a, T, K, S> core::iter::FusedIterator for PreorderIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}

/// Depth-first postorder (a node's descendants, then the node) over a
/// subtree.
///
/// Built by [`NodeRef::postorder`][crate::tree::NodeRef::postorder]. Like
/// [`PreorderIter`], needs no auxiliary storage.
pub struct PostorderIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a Tree<T, K, S>,
    root: K,
    current: Option<K>,
    exhausted: bool,
}
impl<'a, T, K, S> PostorderIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(tree: &'a Tree<T, K, S>, root: K) -> Self {
        let current = Some(postorder_leftmost(tree, root.clone()));
        Self { tree, root, current, exhausted: false }
    }
}
impl<'a, T, K, S> Iterator for PostorderIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = NodeRef<'a, T, K, S>;
    fn next(&mut self) -> Option<Self::Item> {
        let key = match self.current.take() {
            Some(key) => key,
            None => {
                assert!(!self.exhausted, "called next() on an exhausted iterator");
                self.exhausted = true;
                return None;
            }
        };
        self.current = postorder_advance(self.tree, &key, &self.root);
        Some(NodeRef::new(self.tree, key))
    }
}
impl<'a, T, K, S> core::iter::FusedIterator for PostorderIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}

// ---------------------------------------------------------------------
// Mutating flavors. Each precomputes (one step ahead, before the caller gets
// a chance to mutate anything) the key it will need after yielding the
// current node, so removing or destroying the just-yielded node through the
// returned `NodeRefMut` cannot corrupt the walk. Preorder is the one
// exception: see the module docs.
// ---------------------------------------------------------------------

macro_rules! mut_iter {
    (
        $(#[$meta:meta])*
        $name:ident, $step:ident
    ) => {
        $(#[$meta])*
        pub struct $name<'a, T, K, S>
        where
            S: Storage<Element = Node<T, K>, Key = K>,
            K: Clone + Debug + Eq,
        {
            tree: &'a mut Tree<T, K, S>,
            current: Option<K>,
            lookahead: Option<K>,
            exhausted: bool,
        }
        impl<'a, T, K, S> $name<'a, T, K, S>
        where
            S: Storage<Element = Node<T, K>, Key = K>,
            K: Clone + Debug + Eq,
        {
            pub(crate) fn new(tree: &'a mut Tree<T, K, S>, start: Option<K>) -> Self {
                let lookahead = start.as_ref().and_then(|k| {
                    NodeRef::new(tree, k.clone()).$step().map(NodeRef::into_raw_key)
                });
                Self { tree, current: start, lookahead, exhausted: false }
            }
            /// Advances the iterator, returning a mutable handle to the next
            /// node, or `None` once the family is exhausted.
            ///
            /// # Panics
            /// Panics if called again after already having returned `None`
            /// once.
            pub fn next(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
                let key = match self.current.take() {
                    Some(key) => key,
                    None => {
                        assert!(!self.exhausted, "called next() on an exhausted iterator");
                        self.exhausted = true;
                        return None;
                    }
                };
                self.current = self.lookahead.take();
                self.lookahead = self.current.as_ref().and_then(|k| {
                    NodeRef::new(self.tree, k.clone()).$step().map(NodeRef::into_raw_key)
                });
                Some(NodeRefMut::new(self.tree, key))
            }
        }
    };
}

mut_iter!(
    /// Mutating flavor of [`ChildrenIter`].
    ///
    /// Built by [`NodeRefMut::children_mut`][crate::tree::NodeRefMut::children_mut].
    ChildrenIterMut,
    next_sibling
);
mut_iter!(
    /// Mutating flavor of [`AncestorsIter`].
    ///
    /// Built by [`NodeRefMut::ancestors_mut`][crate::tree::NodeRefMut::ancestors_mut]
    /// or [`NodeRefMut::strict_ancestors_mut`][crate::tree::NodeRefMut::strict_ancestors_mut].
    AncestorsIterMut,
    parent
);
mut_iter!(
    /// Mutating flavor of [`NextSiblingsIter`].
    ///
    /// Built by [`NodeRefMut::next_siblings_mut`][crate::tree::NodeRefMut::next_siblings_mut]
    /// or [`NodeRefMut::strict_next_siblings_mut`][crate::tree::NodeRefMut::strict_next_siblings_mut].
    NextSiblingsIterMut,
    next_sibling
);
mut_iter!(
    /// Mutating flavor of [`PrevSiblingsIter`].
    ///
    /// Built by [`NodeRefMut::prev_siblings_mut`][crate::tree::NodeRefMut::prev_siblings_mut]
    /// or [`NodeRefMut::strict_prev_siblings_mut`][crate::tree::NodeRefMut::strict_prev_siblings_mut].
    PrevSiblingsIterMut,
    prev_sibling
);

/// Mutating flavor of [`SiblingRingIter`].
///
/// Built by [`NodeRefMut::siblings_mut`][crate::tree::NodeRefMut::siblings_mut].
pub struct SiblingRingIterMut<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a mut Tree<T, K, S>,
    start: K,
    phase: RingPhase<K>,
    exhausted: bool,
}
impl<'a, T, K, S> SiblingRingIterMut<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(tree: &'a mut Tree<T, K, S>, start: K) -> Self {
        let first = NodeRef::new(tree, start.clone()).next_sibling().map(NodeRef::into_raw_key);
        Self { tree, start, phase: RingPhase::Forward(first), exhausted: false }
    }
    /// Advances the iterator, returning a mutable handle to the next node, or
    /// `None` once every other sibling has been visited.
    ///
    /// # Panics
    /// Panics if called again after already having returned `None` once.
    pub fn next(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
        loop {
            match core::mem::replace(&mut self.phase, RingPhase::Done) {
                RingPhase::Forward(Some(key)) => {
                    let next = NodeRef::new(self.tree, key.clone())
                        .next_sibling()
                        .map(NodeRef::into_raw_key);
                    self.phase = RingPhase::Forward(next);
                    return Some(NodeRefMut::new(self.tree, key));
                }
                RingPhase::Forward(None) => {
                    let first = NodeRef::new(self.tree, self.start.clone())
                        .parent()
                        .and_then(|p| p.first_child())
                        .map(NodeRef::into_raw_key);
                    self.phase = RingPhase::Wrapped(first);
                }
                RingPhase::Wrapped(Some(key)) if key != self.start => {
                    let next = NodeRef::new(self.tree, key.clone())
                        .next_sibling()
                        .map(NodeRef::into_raw_key);
                    self.phase = RingPhase::Wrapped(next);
                    return Some(NodeRefMut::new(self.tree, key));
                }
                RingPhase::Wrapped(_) | RingPhase::Done => {
                    self.phase = RingPhase::Done;
                    assert!(!self.exhausted, "called next() on an exhausted iterator");
                    self.exhausted = true;
                    return None;
                }
            }
        }
    }
}

/// Mutating flavor of [`PreorderIter`].
///
/// Built by [`NodeRefMut::preorder_mut`][crate::tree::NodeRefMut::preorder_mut].
/// Unlike every other mutating family in this module, removing or destroying
/// the node this iterator just yielded, before the next call to `next()`, is
/// a contract violation: the iterator finds its way by reading the just-
/// yielded node's own links on the *following* call, so it cannot precompute
/// a safe lookahead the way the others do. The violation is asserted on that
/// following call rather than silently producing nonsense.
pub struct PreorderIterMut<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a mut Tree<T, K, S>,
    root: K,
    current: Option<K>,
    previous: Option<K>,
    exhausted: bool,
}
impl<'a, T, K, S> PreorderIterMut<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(tree: &'a mut Tree<T, K, S>, root: K) -> Self {
        let current = Some(root.clone());
        Self { tree, root, current, previous: None, exhausted: false }
    }
    /// Advances the iterator, returning a mutable handle to the next node, or
    /// `None` once the subtree is exhausted.
    ///
    /// # Panics
    /// Panics if called again after already having returned `None` once, or
    /// if the node returned by the previous call was removed or destroyed in
    /// the meantime.
    pub fn next(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
        if let Some(prev) = self.previous.take() {
            assert!(
                self.tree.contains(&prev),
                "node {:?} was removed or destroyed during preorder iteration, which preorder \
                 does not permit",
                prev,
            );
            self.current = preorder_advance(self.tree, &prev, &self.root);
        }
        let key = match self.current.take() {
            Some(key) => key,
            None => {
                assert!(!self.exhausted, "called next() on an exhausted preorder iterator");
                self.exhausted = true;
                return None;
            }
        };
        self.previous = Some(key.clone());
        Some(NodeRefMut::new(self.tree, key))
    }
}

/// Mutating flavor of [`PostorderIter`].
///
/// Built by [`NodeRefMut::postorder_mut`][crate::tree::NodeRefMut::postorder_mut].
/// Safe to remove or destroy the just-yielded node before calling `next()`
/// again, which is exactly the access pattern
/// [`destroy`][crate::tree::NodeRefMut::destroy] itself is built on.
pub struct PostorderIterMut<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a mut Tree<T, K, S>,
    root: K,
    current: Option<K>,
    lookahead: Option<K>,
    exhausted: bool,
}
impl<'a, T, K, S> PostorderIterMut<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(tree: &'a mut Tree<T, K, S>, root: K) -> Self {
        let first = postorder_leftmost(tree, root.clone());
        let lookahead = postorder_advance(tree, &first, &root);
        Self { tree, root, current: Some(first), lookahead, exhausted: false }
    }
    /// Advances the iterator, returning a mutable handle to the next node, or
    /// `None` once the subtree is exhausted.
    ///
    /// # Panics
    /// Panics if called again after already having returned `None` once.
    pub fn next(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
        let key = match self.current.take() {
            Some(key) => key,
            None => {
                assert!(!self.exhausted, "called next() on an exhausted iterator");
                self.exhausted = true;
                return None;
            }
        };
        self.current = self.lookahead.take();
        self.lookahead = self.current.as_ref().and_then(|k| postorder_advance(self.tree, k, &self.root));
        Some(NodeRefMut::new(self.tree, key))
    }
}
