use pretty_assertions::assert_eq;
use rosetree::{Tree, Tag};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

fn t(n: u32) -> Tag {
    Tag::new(n + 2)
}

/// Builds:
/// ```text
/// R0
/// ├── R1
/// │   ├── R4
/// │   └── R5
/// ├── R2
/// │   └── R6
/// └── R3
/// ```
/// returning `(tree, [r0, r1, r2, r3, r4, r5, r6])`.
fn sample_tree() -> (Tree<u32>, [usize; 7]) {
    let mut tree = Tree::new();
    let r0 = tree.insert_root(0, t(0), None);
    let r1 = tree.insert_root(1, t(1), None);
    let r2 = tree.insert_root(2, t(2), None);
    let r3 = tree.insert_root(3, t(3), None);
    let r4 = tree.insert_root(4, t(4), None);
    let r5 = tree.insert_root(5, t(5), None);
    let r6 = tree.insert_root(6, t(6), None);

    tree.node_mut(r0).push_child_back(r1);
    tree.node_mut(r0).push_child_back(r2);
    tree.node_mut(r0).push_child_back(r3);
    tree.node_mut(r1).push_child_back(r4);
    tree.node_mut(r1).push_child_back(r5);
    tree.node_mut(r2).push_child_back(r6);

    (tree, [r0, r1, r2, r3, r4, r5, r6])
}

#[test]
fn preorder_matches_expected_order() {
    let (tree, [r0, r1, r2, r3, r4, r5, r6]) = sample_tree();
    let order: Vec<u32> = tree.node(r0).preorder().map(|n| *n.value()).collect();
    assert_eq!(order, vec![0, 1, 4, 5, 2, 6, 3]);
    let _ = (r1, r2, r3, r4, r5, r6);
}

#[test]
fn postorder_matches_expected_order() {
    let (tree, [r0, ..]) = sample_tree();
    let order: Vec<u32> = tree.node(r0).postorder().map(|n| *n.value()).collect();
    assert_eq!(order, vec![4, 5, 1, 6, 2, 3, 0]);
}

#[test]
fn sibling_ring_wraps_around() {
    let (tree, [r0, r1, r2, r3, ..]) = sample_tree();
    let ring: Vec<u32> = tree.node(r2).siblings().map(|n| *n.value()).collect();
    assert_eq!(ring, vec![3, 1]);
    let root_ring: Vec<u32> = tree.node(r0).siblings().map(|n| *n.value()).collect();
    assert!(root_ring.is_empty());
    let _ = r3;
}

#[test]
fn sibling_ring_empty_when_only_child() {
    let mut tree = Tree::new();
    let r0 = tree.insert_root(0, t(0), None);
    let r1 = tree.insert_root(1, t(1), None);
    tree.node_mut(r0).push_child_back(r1);
    let ring: Vec<u32> = tree.node(r1).siblings().map(|n| *n.value()).collect();
    assert!(ring.is_empty());
}

#[test]
fn lca_across_branches() {
    let (tree, [r0, r1, r2, _r3, r4, _r5, r6]) = sample_tree();
    let lca = tree.node(r4).lca(&tree.node(r6)).unwrap();
    assert_eq!(lca.raw_key(), &r0);
    let lca_within_branch = tree.node(r4).lca(&tree.node(r1)).unwrap();
    assert_eq!(lca_within_branch.raw_key(), &r1);
    let _ = r2;
}

#[test]
fn lca_is_none_across_separate_trees() {
    let mut tree = Tree::new();
    let a = tree.insert_root(1, t(1), None);
    let b = tree.insert_root(2, t(2), None);
    assert!(tree.node(a).lca(&tree.node(b)).is_none());
}

#[test]
fn remove_detaches_subtree_intact() {
    let (mut tree, [r0, r1, _r2, _r3, r4, r5, _r6]) = sample_tree();
    tree.node_mut(r1).remove();
    assert!(tree.node(r1).is_root());
    assert_eq!(tree.node(r0).count(), 2);
    // r1's own subtree survives the detach untouched.
    let order: Vec<u32> = tree.node(r1).preorder().map(|n| *n.value()).collect();
    assert_eq!(order, vec![1, 4, 5]);
    let _ = (r4, r5);
}

#[test]
fn postorder_mut_can_remove_current_node() {
    let (mut tree, [r0, r1, ..]) = sample_tree();
    let mut visited = Vec::new();
    {
        let mut root = tree.node_mut(r0);
        let mut iter = root.postorder_mut();
        while let Some(mut node) = iter.next() {
            visited.push(*node.value());
            if *node.value() == 1 {
                node.remove();
            }
        }
    }
    assert_eq!(visited, vec![4, 5, 1, 6, 2, 3, 0]);
    // r1 (value 1) was detached mid-walk, so it is now its own root, and r0
    // is left with only its two remaining children.
    assert!(tree.node(r1).is_root());
    assert_eq!(tree.node(r0).count(), 2);
}

#[test]
#[should_panic(expected = "does not permit")]
fn preorder_mut_forbids_removing_current_before_advancing() {
    let (mut tree, [r0, ..]) = sample_tree();
    let mut root = tree.node_mut(r0);
    let mut iter = root.preorder_mut();
    let mut first = iter.next().unwrap();
    first.remove();
    iter.next(); // must panic: `first`'s node was removed out from under the walk
}

#[test]
fn destroy_invokes_destructor_exactly_once_per_node_in_postorder() {
    static LOG: Mutex<Vec<u32>> = Mutex::new(Vec::new());
    static COUNT: AtomicU32 = AtomicU32::new(0);

    fn destructor(value: &mut u32, tag: Tag) {
        LOG.lock().unwrap().push(*value);
        assert_eq!(tag.value(), *value + 2);
        COUNT.fetch_add(1, Ordering::SeqCst);
    }

    let mut tree = Tree::new();
    let r0 = tree.insert_root(0, t(0), Some(destructor));
    let r1 = tree.insert_root(1, t(1), Some(destructor));
    let r4 = tree.insert_root(4, t(4), Some(destructor));
    tree.node_mut(r0).push_child_back(r1);
    tree.node_mut(r1).push_child_back(r4);

    tree.node_mut(r0).destroy();

    assert_eq!(*LOG.lock().unwrap(), vec![4, 1, 0]);
    assert_eq!(COUNT.load(Ordering::SeqCst), 3);
    assert!(!tree.contains(&r0));
    assert!(!tree.contains(&r1));
    assert!(!tree.contains(&r4));
}

#[test]
fn clear_flattens_every_descendant_and_detaches_self() {
    // root -> mid -> [leaf_a -> grandchild, leaf_b]
    let mut tree = Tree::new();
    let root = tree.insert_root(0, t(0), None);
    let mid = tree.insert_root(1, t(1), None);
    let leaf_a = tree.insert_root(2, t(2), None);
    let leaf_b = tree.insert_root(3, t(3), None);
    let grandchild = tree.insert_root(4, t(4), None);
    tree.node_mut(root).push_child_back(mid);
    tree.node_mut(mid).push_child_back(leaf_a);
    tree.node_mut(mid).push_child_back(leaf_b);
    tree.node_mut(leaf_a).push_child_back(grandchild);

    tree.node_mut(mid).clear();

    // `mid` is detached from its own parent and left childless.
    assert!(tree.node(mid).is_root());
    assert!(tree.node(mid).is_leaf());
    assert!(tree.node(root).is_leaf());
    // Every former descendant, at every depth, is now its own isolated root.
    assert!(tree.node(leaf_a).is_root());
    assert!(tree.node(leaf_a).is_leaf());
    assert!(tree.node(leaf_b).is_root());
    assert!(tree.node(grandchild).is_root());
}

#[test]
fn size_excludes_self_and_reflects_detached_subtrees() {
    // r0 -> r1 -> r2 -> r3 (a single chain).
    let mut tree = Tree::new();
    let r0 = tree.insert_root(0, t(0), None);
    let r1 = tree.insert_root(1, t(1), None);
    let r2 = tree.insert_root(2, t(2), None);
    let r3 = tree.insert_root(3, t(3), None);
    tree.node_mut(r0).push_child_back(r1);
    tree.node_mut(r1).push_child_back(r2);
    tree.node_mut(r2).push_child_back(r3);

    assert_eq!(tree.node(r0).size(), 3);

    tree.node_mut(r2).remove();
    assert_eq!(tree.node(r2).size(), 1);

    let lone = tree.insert_root(9, t(9), None);
    assert_eq!(tree.node(lone).size(), 0);
}

#[test]
#[should_panic(expected = "exhausted")]
fn children_const_iterator_panics_on_reuse_after_exhaustion() {
    let (tree, [r0, ..]) = sample_tree();
    let mut iter = tree.node(r0).children();
    for _ in iter.by_ref() {}
    iter.next();
}

#[test]
#[should_panic(expected = "exhausted")]
fn children_mut_iterator_panics_on_reuse_after_exhaustion() {
    let (mut tree, [r0, ..]) = sample_tree();
    let mut root = tree.node_mut(r0);
    let mut iter = root.children_mut();
    while iter.next().is_some() {}
    iter.next();
}

#[test]
#[should_panic(expected = "exhausted")]
fn postorder_const_iterator_panics_on_reuse_after_exhaustion() {
    let (tree, [r0, ..]) = sample_tree();
    let mut iter = tree.node(r0).postorder();
    for _ in iter.by_ref() {}
    iter.next();
}

#[test]
#[should_panic(expected = "exhausted")]
fn postorder_mut_iterator_panics_on_reuse_after_exhaustion() {
    let (mut tree, [r0, ..]) = sample_tree();
    let mut root = tree.node_mut(r0);
    let mut iter = root.postorder_mut();
    while iter.next().is_some() {}
    iter.next();
}

#[test]
#[should_panic(expected = "exhausted")]
fn sibling_ring_const_iterator_panics_on_reuse_after_exhaustion() {
    let (tree, [_r0, _r1, r2, ..]) = sample_tree();
    let mut iter = tree.node(r2).siblings();
    for _ in iter.by_ref() {}
    iter.next();
}

#[test]
#[should_panic(expected = "exhausted")]
fn sibling_ring_mut_iterator_panics_on_reuse_after_exhaustion() {
    let (mut tree, [_r0, _r1, r2, ..]) = sample_tree();
    let mut node = tree.node_mut(r2);
    let mut iter = node.siblings_mut();
    while iter.next().is_some() {}
    iter.next();
}

#[test]
fn push_child_front_inserts_before_existing_children() {
    let mut tree = Tree::new();
    let parent = tree.insert_root(0, t(0), None);
    let old_first = tree.insert_root(1, t(1), None);
    let new_first = tree.insert_root(2, t(2), None);
    tree.node_mut(parent).push_child_back(old_first);
    tree.node_mut(parent).push_child_front(new_first);

    let order: Vec<u32> = tree.node(parent).children().map(|n| *n.value()).collect();
    assert_eq!(order, vec![2, 1]);
    assert_eq!(tree.node(parent).count(), 2);
}

#[test]
fn insert_sibling_before_and_after() {
    let mut tree = Tree::new();
    let parent = tree.insert_root(0, t(0), None);
    let middle = tree.insert_root(1, t(1), None);
    let before = tree.insert_root(2, t(2), None);
    let after = tree.insert_root(3, t(3), None);
    tree.node_mut(parent).push_child_back(middle);
    tree.node_mut(middle).insert_sibling_before(before);
    tree.node_mut(middle).insert_sibling_after(after);

    let order: Vec<u32> = tree.node(parent).children().map(|n| *n.value()).collect();
    assert_eq!(order, vec![2, 1, 3]);
    assert_eq!(tree.node(parent).count(), 3);
}

#[test]
fn children_count_and_ancestor_chain_length_match_level() {
    let (tree, [r0, r1, _r2, _r3, r4, ..]) = sample_tree();
    assert_eq!(tree.node(r0).count(), 3);
    assert_eq!(tree.node(r1).count(), 2);

    // r4 is two levels below r0: r4 -> r1 -> r0.
    assert_eq!(tree.node(r4).level(), 2);
    assert_eq!(tree.node(r4).ancestors().count() as u32, tree.node(r4).level() + 1);
    let ancestors: Vec<u32> = tree.node(r4).ancestors().map(|n| *n.value()).collect();
    assert_eq!(ancestors, vec![4, 1, 0]);
    let strict_ancestors: Vec<u32> = tree.node(r4).strict_ancestors().map(|n| *n.value()).collect();
    assert_eq!(strict_ancestors, vec![1, 0]);
}

#[test]
fn next_and_prev_sibling_chains() {
    let (tree, [_r0, r1, r2, r3, ..]) = sample_tree();
    let next: Vec<u32> = tree.node(r1).next_siblings().map(|n| *n.value()).collect();
    assert_eq!(next, vec![1, 2, 3]);
    let strict_next: Vec<u32> = tree.node(r1).strict_next_siblings().map(|n| *n.value()).collect();
    assert_eq!(strict_next, vec![2, 3]);

    let prev: Vec<u32> = tree.node(r3).prev_siblings().map(|n| *n.value()).collect();
    assert_eq!(prev, vec![3, 2, 1]);
    let strict_prev: Vec<u32> = tree.node(r3).strict_prev_siblings().map(|n| *n.value()).collect();
    assert_eq!(strict_prev, vec![2, 1]);
    let _ = r2;
}

#[test]
#[should_panic(expected = "itself")]
fn push_child_front_forbids_self_attach() {
    let mut tree = Tree::new();
    let root = tree.insert_root(0, t(0), None);
    tree.node_mut(root.clone()).push_child_front(root);
}

#[test]
#[should_panic(expected = "root")]
fn push_child_back_forbids_attaching_a_non_root() {
    let (mut tree, [r0, r1, ..]) = sample_tree();
    // r1 already has a parent (r0); attaching it elsewhere is forbidden.
    let other_parent = tree.insert_root(100, t(10), None);
    tree.node_mut(other_parent).push_child_back(r1);
    let _ = r0;
}

#[test]
#[should_panic(expected = "cycle")]
fn push_child_back_forbids_creating_a_cycle() {
    let (mut tree, [r0, r1, ..]) = sample_tree();
    // r1 is already a child of r0; attaching r0 under r1 would form a cycle.
    tree.node_mut(r1).push_child_back(r0);
}

#[test]
#[should_panic(expected = "parent")]
fn insert_sibling_before_forbids_inserting_on_a_root() {
    let mut tree = Tree::new();
    let root = tree.insert_root(0, t(0), None);
    let sibling = tree.insert_root(1, t(1), None);
    tree.node_mut(root).insert_sibling_before(sibling);
}

#[test]
fn in_tree_vs_is_descendant() {
    let mut tree = Tree::new();
    let lone = tree.insert_root(1, t(1), None);
    assert!(!tree.node(lone).in_tree());
    assert!(!tree.node(lone).is_descendant());

    let parent = tree.insert_root(2, t(2), None);
    tree.node_mut(parent).push_child_back(lone);
    assert!(tree.node(lone).in_tree());
    assert!(tree.node(lone).is_descendant());
    assert!(tree.node(parent).in_tree());
    assert!(!tree.node(parent).is_descendant());
}
