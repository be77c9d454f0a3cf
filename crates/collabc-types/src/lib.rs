//! # collabc-types
//!
//! Concrete containers written against the `collabc-core` capabilities.
//! Each one supplies only its primitives and inherits everything else:
//!
//! - [`FrozenSet`]: immutable set, hashable through the unordered set hash
//! - [`Dict`]: insertion-ordered mapping over keys that only need equality
//! - [`FrozenDict`]: immutable, hashable mapping
//! - [`SharedDict`]: shared-handle mapping whose views observe other handles' writes
//! - [`List`]: mutable sequence built from positional primitives
//! - [`Progression`]: arithmetic sequence computed on demand
//!
//! ## Example
//!
//! ```rust
//! use collabc_core::prelude::*;
//! use collabc_types::List;
//!
//! let mut list: List<i32> = [10, 20, 30].into_iter().collect();
//! list.append(40).unwrap();
//! list.reverse().unwrap();
//! assert_eq!(list.index(&20), Ok(2));
//! ```

pub mod dict;
pub mod frozen_dict;
pub mod frozen_set;
pub mod list;
pub mod progression;
pub mod shared_dict;

pub use dict::Dict;
pub use frozen_dict::FrozenDict;
pub use frozen_set::FrozenSet;
pub use list::List;
pub use progression::Progression;
pub use shared_dict::SharedDict;
