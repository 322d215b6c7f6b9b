//! An arena-allocated n-ary tree with explicit topology operations, tagged
//! nodes, and seven traversal families.
//!
//! # Overview
//! This crate uses the same technique Charcoal and its sibling arena-tree
//! crates use: nodes live in a backing store, and links between them are
//! indices into that store rather than pointers. This gives removal and
//! reinsertion the usual advantages over an `Rc`/`RefCell`-based tree, and
//! lets the tree run without a global allocator if the storage backend does
//! not need one.
//!
//! Unlike a tree with one designated root, a [`Tree`] is a forest: any
//! number of independently-rooted subtrees can live in the same arena at
//! once, each one created with [`Tree::insert_root`].
//!
//! # Storage
//! This crate uses [Granite] to handle arena-allocated storage. Several
//! feature flags enable various dependencies on various storage types by
//! forwarding them to Granite.
//!
//! # Feature flags
//! - `std` (**enabled by default**) — enables the full standard library,
//!   disabling `no_std` for the crate. Currently, this only adds [`Error`]
//!   trait implementations for some types.
//! - `unwind_safety` (**enabled by default**) — **must be enabled when using
//!   the unwinding panic implementation**, otherwise aborting on a panicking
//!   destructor mid-[`destroy`] is skipped and the panic unwinds through
//!   half-torn-down tree state instead. Requires `std`.
//! - `alloc` (**enabled by default**) — adds `ListStorage` trait
//!   implementations for standard library containers.
//! - `log` — emits `trace!`-level events, through the [`log`] facade, for
//!   topology operations and for each node visited while destroying a
//!   subtree. Off by default and `no_std`-compatible; compiles to nothing
//!   when disabled.
//! - `smallvec` / `slab` / `slotmap` — forwarded to Granite, add `Storage`
//!   implementations for the respective crate's containers.
//! - `union_optimizations` — forwarded to Granite, decreases memory usage in
//!   `SparseStorage` using untagged unions. Requires a nightly compiler.
//!
//! # Public dependencies
//! - `arrayvec` (**required**) — `^0.5`
//! - `granite` (**required**) — `^1.0`
//! - `log` (*optional*) — `^0.4`
//!
//! [`Error`]: https://doc.rust-lang.org/std/error/trait.Error.html " "
//! [`destroy`]: tree::NodeRefMut::destroy
//! [Granite]: https://docs.rs/granite/*/granite/ " "
//! [`log`]: https://docs.rs/log/*/log/ " "

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(
    rust_2018_idioms,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences
)]
#![deny(anonymous_parameters, bare_trait_objects)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub extern crate granite as storage;
#[doc(no_inline)]
pub use storage::{Storage, ListStorage, DefaultStorage};

pub mod tag;
pub mod node;
pub mod tree;
pub mod iter;

pub(crate) mod util;

pub use node::{Node, Destructor};
pub use tag::Tag;
pub use tree::{Tree, NodeRef, NodeRefMut};

/// A prelude containing the most commonly used types, for glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{Tree, NodeRef, NodeRefMut, Tag, Node, Destructor};
}

use core::fmt::{self, Display, Formatter, Debug};

/// The error produced when a node is attached somewhere it could not be.
///
/// Every topology operation in this crate panics on a precondition
/// violation rather than returning a `Result` — see the crate's error
/// handling philosophy in the [`tree`] module documentation — but this type
/// still exists, as the payload of those panics, so the message a caller
/// sees is consistent and so that, in a `catch_unwind` boundary, the
/// specific kind of violation can still be recovered with
/// [`core::any::Any::downcast_ref`].
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum AttachError {
    /// The node being attached was this node itself.
    SelfAttach,
    /// The node being attached was not currently a root.
    NotARoot,
    /// The node being attached is an ancestor of the node it was being
    /// attached under, which would create a cycle.
    WouldCycle,
    /// The node the attachment was requested relative to has no parent, so
    /// there is nowhere to insert a sibling.
    NoParent,
}
impl Display for AttachError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::SelfAttach => "a node cannot be attached to itself",
            Self::NotARoot => "the node being attached must currently be a root",
            Self::WouldCycle => "attaching here would create a cycle",
            Self::NoParent => "the reference node has no parent to insert a sibling under",
        })
    }
}
#[cfg(feature = "std")]
impl std::error::Error for AttachError {}
