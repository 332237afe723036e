//! Process-wide, race-safe meta-model registration.
//!
//! The registry is explicit state with a documented lifecycle: each
//! participating type is registered once during program initialization and
//! queried thereafter. Registration is insert-if-absent, so concurrent
//! `register` calls for the same type are idempotent and safe to race.
//! Lookups over an already-registered meta-model never block writers for
//! long: the descriptor set is immutable after registration.
//!
//! Tests that need isolation construct their own [`MetaRegistry`] instead
//! of resetting the global one.

use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use log::debug;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::bean::BeanType;
use crate::error::{MetaError, MetaResult};
use crate::meta::MetaModel;

static GLOBAL: Lazy<MetaRegistry> = Lazy::new(MetaRegistry::new);

/// A registry of meta-models keyed by type identity.
#[derive(Debug, Default)]
pub struct MetaRegistry {
    entries: RwLock<HashMap<TypeId, Arc<MetaModel>>>,
}

impl MetaRegistry {
    /// Creates an empty registry.
    ///
    /// Useful for tests that need isolation from the global registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the process-wide registry.
    ///
    /// The global registry lives for the process's lifetime and is never
    /// torn down; it is expected to be populated during startup, before
    /// concurrent reads begin.
    #[must_use]
    pub fn global() -> &'static MetaRegistry {
        &GLOBAL
    }

    /// Registers type `T`'s meta-model.
    ///
    /// Idempotent: if `T` is already registered the existing meta-model is
    /// returned and nothing changes. Safe to race for the same type.
    pub fn register<T: BeanType>(&self) -> Arc<MetaModel> {
        let meta = T::meta();
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match entries.entry(meta.type_id()) {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(slot) => {
                debug!("registered meta-model for {}", meta.type_name());
                slot.insert(meta).clone()
            }
        }
    }

    /// Looks up type `T`'s meta-model.
    ///
    /// # Errors
    ///
    /// Returns `MetaError::NotRegistered` if `register` has not been
    /// called for `T` on this registry.
    pub fn lookup<T: BeanType>(&self) -> MetaResult<Arc<MetaModel>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| MetaError::not_registered(T::meta().type_name()))
    }

    /// Looks up a meta-model by its simple type name.
    ///
    /// Intended for generic consumers (diffing, UI binding) that only hold
    /// a name.
    pub fn lookup_name(&self, type_name: &str) -> MetaResult<Arc<MetaModel>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .find(|meta| meta.type_name() == type_name)
            .cloned()
            .ok_or_else(|| MetaError::not_registered(type_name))
    }

    /// Returns the number of registered meta-models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
