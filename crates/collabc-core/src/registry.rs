//! Runtime capability registry.
//!
//! Trait impls are the static answer to "does `T` conform to `Set`?". The
//! registry is the dynamic one: a type can be declared to conform to a
//! capability without implementing anything, and queries consult those
//! declarations together with the capability hierarchy. Registration adds
//! no behavior; it only changes what [`Registry::conforms`] reports.

use crate::error::Result;
use crate::primitives::{Container, Iterable, Len};
use crate::set::{MutableSet, Set};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::any::{type_name, TypeId};
use std::collections::{btree_set, BTreeSet, HashMap};
use std::fmt;
use std::iter::Copied;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// The sixteen capabilities of the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    Hashable,
    Iterable,
    Iterator,
    Sized,
    Container,
    Callable,
    Set,
    MutableSet,
    Mapping,
    MutableMapping,
    MappingView,
    KeysView,
    ItemsView,
    ValuesView,
    Sequence,
    MutableSequence,
}

impl Capability {
    pub const ALL: [Capability; 16] = [
        Capability::Hashable,
        Capability::Iterable,
        Capability::Iterator,
        Capability::Sized,
        Capability::Container,
        Capability::Callable,
        Capability::Set,
        Capability::MutableSet,
        Capability::Mapping,
        Capability::MutableMapping,
        Capability::MappingView,
        Capability::KeysView,
        Capability::ItemsView,
        Capability::ValuesView,
        Capability::Sequence,
        Capability::MutableSequence,
    ];

    /// Direct parents in the hierarchy.
    pub fn bases(self) -> &'static [Capability] {
        match self {
            Self::Hashable | Self::Iterable | Self::Sized | Self::Container | Self::Callable => &[],
            Self::Iterator => &[Self::Iterable],
            Self::Set | Self::Mapping | Self::Sequence => {
                &[Self::Sized, Self::Iterable, Self::Container]
            }
            Self::MutableSet => &[Self::Set],
            Self::MutableMapping => &[Self::Mapping],
            Self::MutableSequence => &[Self::Sequence],
            Self::MappingView => &[Self::Sized],
            Self::KeysView | Self::ItemsView => &[Self::MappingView, Self::Set],
            Self::ValuesView => &[Self::MappingView, Self::Iterable, Self::Container],
        }
    }

    /// True when `self` is `other` or inherits from it.
    pub fn implies(self, other: Capability) -> bool {
        self == other || self.bases().iter().any(|base| base.implies(other))
    }

    /// The mutable composites. None of them may also be `Hashable`.
    pub fn is_mutable(self) -> bool {
        matches!(
            self,
            Self::MutableSet | Self::MutableMapping | Self::MutableSequence
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Hashable => "Hashable",
            Self::Iterable => "Iterable",
            Self::Iterator => "Iterator",
            Self::Sized => "Sized",
            Self::Container => "Container",
            Self::Callable => "Callable",
            Self::Set => "Set",
            Self::MutableSet => "MutableSet",
            Self::Mapping => "Mapping",
            Self::MutableMapping => "MutableMapping",
            Self::MappingView => "MappingView",
            Self::KeysView => "KeysView",
            Self::ItemsView => "ItemsView",
            Self::ValuesView => "ValuesView",
            Self::Sequence => "Sequence",
            Self::MutableSequence => "MutableSequence",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered set of capabilities. Itself a [`MutableSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, capability: Capability) -> bool {
        self.0.insert(capability)
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn remove(&mut self, capability: Capability) -> bool {
        self.0.remove(&capability)
    }

    /// True when a member is one of the mutable composites.
    pub fn is_mutable(&self) -> bool {
        self.0.iter().any(|member| member.is_mutable())
    }

    /// True when some member is or inherits from `capability`.
    pub fn satisfies(&self, capability: Capability) -> bool {
        self.0.iter().any(|member| member.implies(capability))
    }

    /// Every member plus all of its ancestors.
    pub fn closure(&self) -> CapabilitySet {
        let mut out = CapabilitySet::new();
        let mut pending: Vec<Capability> = self.0.iter().copied().collect();
        while let Some(capability) = pending.pop() {
            if out.insert(capability) {
                pending.extend_from_slice(capability.bases());
            }
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Capability> for CapabilitySet {
    fn extend<I: IntoIterator<Item = Capability>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|c| c.name()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

impl Len for CapabilitySet {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl Iterable for CapabilitySet {
    type Item = Capability;
    type Iter<'a> = Copied<btree_set::Iter<'a, Capability>>;

    fn iterate(&self) -> Self::Iter<'_> {
        self.0.iter().copied()
    }
}

impl Container<Capability> for CapabilitySet {
    fn contains(&self, value: &Capability) -> bool {
        self.0.contains(value)
    }
}

impl Set for CapabilitySet {
    type Output = CapabilitySet;
}

impl MutableSet for CapabilitySet {
    fn add(&mut self, value: Capability) -> Result<()> {
        self.0.insert(value);
        Ok(())
    }

    fn discard(&mut self, value: &Capability) -> Result<()> {
        self.0.remove(value);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.0.clear();
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Registration {
    type_name: &'static str,
    capabilities: CapabilitySet,
}

/// Declared conformances, keyed by [`TypeId`].
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<HashMap<TypeId, Registration>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// Declare that `T` conforms to `capability`. Returns false if it was
    /// already declared, or if it would make `T` both mutable and hashable.
    pub fn register<T: ?Sized + 'static>(&self, capability: Capability) -> bool {
        let mut entries = self.entries.write();
        let entry = entries
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Registration {
                type_name: type_name::<T>(),
                capabilities: CapabilitySet::new(),
            });
        let conflicts = if capability == Capability::Hashable {
            entry.capabilities.is_mutable()
        } else {
            capability.is_mutable() && entry.capabilities.has(Capability::Hashable)
        };
        if conflicts {
            warn!(
                type_name = entry.type_name,
                %capability,
                "refused registration: mutable and hashable are exclusive"
            );
            return false;
        }
        let added = entry.capabilities.insert(capability);
        if added {
            debug!(type_name = entry.type_name, %capability, "registered capability");
        }
        added
    }

    /// Declare several capabilities at once. Returns how many were new.
    pub fn register_all<T, I>(&self, capabilities: I) -> usize
    where
        T: ?Sized + 'static,
        I: IntoIterator<Item = Capability>,
    {
        capabilities
            .into_iter()
            .filter(|capability| self.register::<T>(*capability))
            .count()
    }

    /// Withdraw a declaration. Ancestors implied by other declarations stay.
    pub fn unregister<T: ?Sized + 'static>(&self, capability: Capability) -> bool {
        let mut entries = self.entries.write();
        let Some(entry) = entries.get_mut(&TypeId::of::<T>()) else {
            return false;
        };
        let removed = entry.capabilities.0.remove(&capability);
        if removed {
            debug!(type_name = entry.type_name, %capability, "unregistered capability");
        }
        if entry.capabilities.0.is_empty() {
            entries.remove(&TypeId::of::<T>());
        }
        removed
    }

    /// Whether `T` was declared to conform to `capability` or a descendant.
    pub fn conforms<T: ?Sized + 'static>(&self, capability: Capability) -> bool {
        self.entries
            .read()
            .get(&TypeId::of::<T>())
            .is_some_and(|entry| entry.capabilities.satisfies(capability))
    }

    /// Everything `T` conforms to through its declarations.
    pub fn capabilities<T: ?Sized + 'static>(&self) -> CapabilitySet {
        self.entries
            .read()
            .get(&TypeId::of::<T>())
            .map(|entry| entry.capabilities.closure())
            .unwrap_or_default()
    }

    /// Names of all types with at least one declaration, sorted.
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .entries
            .read()
            .values()
            .map(|entry| entry.type_name)
            .collect();
        names.sort_unstable();
        names
    }
}
