//! Compile-time capability recognition for concrete types.
//!
//! For each capability a fallback trait supplies `IS_<CAP> = false` for
//! every `Detect<T>`, and an inherent const `IS_<CAP> = true` exists only
//! when `T` implements the capability trait. Path resolution prefers the
//! inherent const, so `Detect::<Vec<u8>>::IS_SEQUENCE` is `true` while
//! `Detect::<u8>::IS_SEQUENCE` falls through to `false`.
//!
//! This only works where `T` is concrete at the use site; inside a generic
//! function every query resolves to the fallback. [`recognize!`] gathers
//! all the answers into a [`CapabilitySet`](crate::registry::CapabilitySet).
//!
//! Views are not distinguished from the set traits they implement, and
//! `Callable` is detected at zero arguments only.

use crate::mapping::{Mapping, MutableMapping};
use crate::primitives::{Callable, Container, Cursor, Iterable, Len};
use crate::sequence::{MutableSequence, Sequence};
use crate::set::{MutableSet, Set};
use std::hash::Hash;
use std::marker::PhantomData;

/// Detection wrapper; never constructed.
#[doc(hidden)]
pub struct Detect<T: ?Sized>(PhantomData<T>);

/// Fallback consts, brought into scope by [`recognize!`].
#[doc(hidden)]
pub mod fallback {
    pub use super::{
        CallableFallback, ContainerFallback, HashableFallback, IterableFallback,
        IteratorFallback, MappingFallback, MutableMappingFallback, MutableSequenceFallback,
        MutableSetFallback, SequenceFallback, SetFallback, SizedFallback,
    };
}

macro_rules! impl_detect {
    ($Cap:ident where $($bound:tt)+) => {
        ::paste::paste! {
            #[doc(hidden)]
            pub trait [<$Cap Fallback>] { const [<IS_ $Cap:upper>]: bool = false; }
            impl<T: ?Sized> [<$Cap Fallback>] for Detect<T> {}
            impl<T: ?Sized> Detect<T> where $($bound)+ {
                pub const [<IS_ $Cap:upper>]: bool = true;
            }
        }
    };
}

impl_detect!(Hashable where T: Hash);
impl_detect!(Iterable where T: Iterable);
impl_detect!(Iterator where T: Cursor);
impl_detect!(Sized where T: Len);
impl_detect!(Container where T: Iterable + Container<<T as Iterable>::Item>);
impl_detect!(Callable where T: Callable<()>);
impl_detect!(Set where T: Set);
impl_detect!(MutableSet where T: MutableSet);
impl_detect!(Mapping where T: Mapping);
impl_detect!(MutableMapping where T: MutableMapping);
impl_detect!(Sequence where T: Sequence);
impl_detect!(MutableSequence where T: MutableSequence);

/// Capabilities a concrete type implements, as a `CapabilitySet`.
///
/// ```
/// use collabc_core::recognize;
/// use collabc_core::registry::Capability;
///
/// let caps = recognize!(Vec<i32>);
/// assert!(caps.has(Capability::MutableSequence));
/// assert!(!caps.has(Capability::Mapping));
/// ```
#[macro_export]
macro_rules! recognize {
    ($ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::detect::fallback::*;
        use $crate::registry::Capability;

        let mut caps = $crate::registry::CapabilitySet::new();
        let detected = [
            ($crate::detect::Detect::<$ty>::IS_HASHABLE, Capability::Hashable),
            ($crate::detect::Detect::<$ty>::IS_ITERABLE, Capability::Iterable),
            ($crate::detect::Detect::<$ty>::IS_ITERATOR, Capability::Iterator),
            ($crate::detect::Detect::<$ty>::IS_SIZED, Capability::Sized),
            ($crate::detect::Detect::<$ty>::IS_CONTAINER, Capability::Container),
            ($crate::detect::Detect::<$ty>::IS_CALLABLE, Capability::Callable),
            ($crate::detect::Detect::<$ty>::IS_SET, Capability::Set),
            ($crate::detect::Detect::<$ty>::IS_MUTABLESET, Capability::MutableSet),
            ($crate::detect::Detect::<$ty>::IS_MAPPING, Capability::Mapping),
            ($crate::detect::Detect::<$ty>::IS_MUTABLEMAPPING, Capability::MutableMapping),
            ($crate::detect::Detect::<$ty>::IS_SEQUENCE, Capability::Sequence),
            ($crate::detect::Detect::<$ty>::IS_MUTABLESEQUENCE, Capability::MutableSequence),
        ];
        for (present, capability) in detected {
            if present {
                caps.insert(capability);
            }
        }
        if caps.is_mutable() {
            caps.remove(Capability::Hashable);
        }
        caps
    }};
}

/// Register everything [`recognize!`] finds for a type.
///
/// Returns how many capabilities were newly declared.
#[macro_export]
macro_rules! register_recognized {
    ($registry:expr, $ty:ty) => {
        $registry.register_all::<$ty, _>($crate::recognize!($ty).iter())
    };
}
