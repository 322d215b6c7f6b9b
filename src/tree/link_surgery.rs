//! Free functions that splice the five-link topology.
//!
//! Kept apart from [`NodeRefMut`][super::NodeRefMut] because [`destroy`]
//! needs to perform the same detach step as [`remove`] without holding a
//! `NodeRefMut` (whose borrow of the tree would overlap with the storage
//! removal that follows).
//!
//! [`destroy`]: super::NodeRefMut::destroy
//! [`remove`]: super::NodeRefMut::remove

use core::fmt::Debug;
use crate::storage::Storage;
use crate::node::Node;
use super::Tree;

/// Severs `key` from its parent's child list, if it has one. No-op if `key`
/// is already a root. Does not touch `key`'s own children.
pub(super) fn detach<T, K, S>(tree: &mut Tree<T, K, S>, key: &K)
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    let (parent, prev, next) = {
        let node = tree.get_node(key);
        (node.parent.clone(), node.prev_sibling.clone(), node.next_sibling.clone())
    };
    let parent = match parent {
        Some(parent) => parent,
        None => return,
    };
    match &prev {
        Some(prev_key) => tree.get_node_mut(prev_key).next_sibling = next.clone(),
        None => tree.get_node_mut(&parent).first_child = next.clone(),
    }
    match &next {
        Some(next_key) => tree.get_node_mut(next_key).prev_sibling = prev.clone(),
        None => tree.get_node_mut(&parent).last_child = prev.clone(),
    }
    tree.get_node_mut(&parent).num_children -= 1;

    let node = tree.get_node_mut(key);
    node.parent = None;
    node.prev_sibling = None;
    node.next_sibling = None;
}

/// Links `child` (which must currently be a root) as the first child of
/// `parent`.
pub(super) fn attach_front<T, K, S>(tree: &mut Tree<T, K, S>, parent: &K, child: &K)
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    let old_first = tree.get_node(parent).first_child.clone();
    {
        let c = tree.get_node_mut(child);
        c.parent = Some(parent.clone());
        c.prev_sibling = None;
        c.next_sibling = old_first.clone();
    }
    if let Some(of) = &old_first {
        tree.get_node_mut(of).prev_sibling = Some(child.clone());
    }
    let p = tree.get_node_mut(parent);
    p.first_child = Some(child.clone());
    if p.last_child.is_none() {
        p.last_child = Some(child.clone());
    }
    p.num_children += 1;
}

/// Links `child` (which must currently be a root) as the last child of
/// `parent`.
pub(super) fn attach_back<T, K, S>(tree: &mut Tree<T, K, S>, parent: &K, child: &K)
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    let old_last = tree.get_node(parent).last_child.clone();
    {
        let c = tree.get_node_mut(child);
        c.parent = Some(parent.clone());
        c.next_sibling = None;
        c.prev_sibling = old_last.clone();
    }
    if let Some(ol) = &old_last {
        tree.get_node_mut(ol).next_sibling = Some(child.clone());
    }
    let p = tree.get_node_mut(parent);
    p.last_child = Some(child.clone());
    if p.first_child.is_none() {
        p.first_child = Some(child.clone());
    }
    p.num_children += 1;
}

/// Links `sibling` (which must currently be a root) immediately before `pos`,
/// under `pos`'s parent.
pub(super) fn attach_before<T, K, S>(tree: &mut Tree<T, K, S>, pos: &K, parent: &K, sibling: &K)
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    let prev = tree.get_node(pos).prev_sibling.clone();
    {
        let s = tree.get_node_mut(sibling);
        s.parent = Some(parent.clone());
        s.prev_sibling = prev.clone();
        s.next_sibling = Some(pos.clone());
    }
    match &prev {
        Some(prev_key) => tree.get_node_mut(prev_key).next_sibling = Some(sibling.clone()),
        None => tree.get_node_mut(parent).first_child = Some(sibling.clone()),
    }
    tree.get_node_mut(pos).prev_sibling = Some(sibling.clone());
    tree.get_node_mut(parent).num_children += 1;
}

/// Links `sibling` (which must currently be a root) immediately after `pos`,
/// under `pos`'s parent.
pub(super) fn attach_after<T, K, S>(tree: &mut Tree<T, K, S>, pos: &K, parent: &K, sibling: &K)
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    let next = tree.get_node(pos).next_sibling.clone();
    {
        let s = tree.get_node_mut(sibling);
        s.parent = Some(parent.clone());
        s.next_sibling = next.clone();
        s.prev_sibling = Some(pos.clone());
    }
    match &next {
        Some(next_key) => tree.get_node_mut(next_key).prev_sibling = Some(sibling.clone()),
        None => tree.get_node_mut(parent).last_child = Some(sibling.clone()),
    }
    tree.get_node_mut(pos).next_sibling = Some(sibling.clone());
    tree.get_node_mut(parent).num_children += 1;
}
