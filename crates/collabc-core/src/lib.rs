//! # collabc-core
//!
//! Capability traits for collections.
//!
//! A capability is a trait with a few required primitives and a set of
//! default methods derived from them. Implement the primitives and every
//! derived operation comes for free:
//!
//! - [`Set`]: `len`, `iterate`, `contains` give subset/superset tests,
//!   equality, and `intersection`/`union`/`difference`/`symmetric_difference`
//! - [`MutableSet`]: plus `add`, `discard` give `remove`, `pop`, `clear` and
//!   the in-place updates
//! - [`Mapping`]: plus `get_item` gives `get`, key membership, equality and
//!   the live [`KeysView`]/[`ItemsView`]/[`ValuesView`]
//! - [`MutableMapping`]: plus `set_item`, `del_item` give `pop`, `popitem`,
//!   `clear`, `update`, `setdefault`
//! - [`Sequence`]: `len` and positional `get_item` give iteration,
//!   reversal, membership, `index`, `count`
//! - [`MutableSequence`]: plus `set_item`, `del_item`, `insert` give
//!   `append`, `reverse`, `extend_from`, `pop`, `remove`
//!
//! Standard collections are registered in [`native`]; foreign shapes can be
//! lifted with the [`adapter`] wrappers. [`registry`] and [`recognize!`]
//! answer conformance queries at runtime and at compile time.
//!
//! ## Example
//!
//! ```rust
//! use collabc_core::prelude::*;
//! use std::collections::BTreeSet;
//!
//! let left: ListSet<i32> = [1, 2, 3].into_iter().collect();
//! let right: BTreeSet<i32> = [2, 3, 4].into_iter().collect();
//!
//! // The result takes the left operand's type.
//! let both: ListSet<i32> = left.intersection(&right);
//! assert!(both.equals(&BTreeSet::from([2, 3])));
//! assert!(!left.is_disjoint(&right));
//! ```
//!
//! ## Features
//!
//! - `indexmap`: capability impls for `IndexMap` and `IndexSet`

pub mod adapter;
pub mod detect;
pub mod error;
pub mod hash;
pub mod mapping;
pub mod native;
pub mod plain;
pub mod primitives;
pub mod registry;
pub mod sequence;
pub mod set;
pub mod views;

pub use adapter::{AsMapping, AsSequence, AsSet, MapShape, SeqShape, SetShape};
pub use error::{CollError, Result};
pub use mapping::{ErasedMapping, KeyedSource, Mapping, MutableMapping, UpdateSource};
pub use plain::ListSet;
pub use primitives::{Callable, Container, Cursor, Hashable, Iterable, Len};
pub use registry::{Capability, CapabilitySet, Registry};
pub use sequence::{MutableSequence, Reversed, SeqIter, Sequence};
pub use set::{HashableSet, MutableSet, Set};
pub use views::{ItemsView, KeysView, MappingView, ValuesView};

/// Glob-import the capability traits and the common concrete types.
pub mod prelude {
    pub use crate::error::CollError;
    pub use crate::mapping::{Mapping, MutableMapping, UpdateSource};
    pub use crate::plain::ListSet;
    pub use crate::primitives::{Callable, Container, Cursor, Hashable, Iterable, Len};
    pub use crate::sequence::{MutableSequence, Sequence};
    pub use crate::set::{HashableSet, MutableSet, Set};
}
