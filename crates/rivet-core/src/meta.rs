//! Meta-models: the per-type catalog of property descriptors.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{MetaError, MetaResult};
use crate::property::PropertyDescriptor;
use crate::validate::CrossRule;

/// The per-type catalog of property descriptors.
///
/// Exactly one meta-model exists per participating type; types hold theirs
/// in a `OnceLock` and hand out `Arc` clones. The descriptor list is fixed
/// at construction and its declaration order is the canonical property
/// order used for hashing and string rendering.
#[derive(Debug)]
pub struct MetaModel {
    type_id: TypeId,
    type_name: &'static str,
    properties: Vec<PropertyDescriptor>,
    index: HashMap<&'static str, usize>,
    cross_rules: Vec<CrossRule>,
}

impl MetaModel {
    /// Starts building the meta-model for type `T`.
    ///
    /// `type_name` is the simple type name used in rendering and error
    /// messages.
    #[must_use]
    pub fn of<T: 'static>(type_name: &'static str) -> MetaModelBuilder {
        MetaModelBuilder {
            type_id: TypeId::of::<T>(),
            type_name,
            properties: Vec::new(),
            cross_rules: Vec::new(),
        }
    }

    /// Returns the identity of the owning type.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the simple name of the owning type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Looks up a property descriptor by name.
    ///
    /// # Errors
    ///
    /// Returns `MetaError::UnknownProperty` if the name is not declared.
    pub fn property(&self, name: &str) -> MetaResult<&PropertyDescriptor> {
        self.find_property(name)
            .ok_or_else(|| MetaError::unknown_property(self.type_name, name))
    }

    /// Looks up a property descriptor by name, tolerating unknown names.
    #[must_use]
    pub fn find_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.index.get(name).map(|&i| &self.properties[i])
    }

    /// Returns the descriptors in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Returns the property names in declaration order.
    ///
    /// The order is stable across calls, which keeps string rendering
    /// deterministic.
    #[must_use]
    pub fn property_names(&self) -> Vec<&'static str> {
        self.properties.iter().map(PropertyDescriptor::name).collect()
    }

    /// Returns the cross-field rules.
    #[must_use]
    pub fn cross_rules(&self) -> &[CrossRule] {
        &self.cross_rules
    }

    /// Returns the number of declared properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if no properties are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Fluent construction of a [`MetaModel`].
#[derive(Debug)]
pub struct MetaModelBuilder {
    type_id: TypeId,
    type_name: &'static str,
    properties: Vec<PropertyDescriptor>,
    cross_rules: Vec<CrossRule>,
}

impl MetaModelBuilder {
    /// Appends a property descriptor.
    #[must_use]
    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Appends a cross-field rule.
    #[must_use]
    pub fn cross_rule(mut self, rule: CrossRule) -> Self {
        self.cross_rules.push(rule);
        self
    }

    /// Finishes the meta-model.
    ///
    /// # Panics
    ///
    /// Panics if two properties share a name; a duplicate declaration is a
    /// programming error in the type's registration block.
    #[must_use]
    pub fn finish(self) -> Arc<MetaModel> {
        let mut index = HashMap::with_capacity(self.properties.len());
        for (i, property) in self.properties.iter().enumerate() {
            let previous = index.insert(property.name(), i);
            assert!(
                previous.is_none(),
                "duplicate property '{}' on {}",
                property.name(),
                self.type_name
            );
        }
        Arc::new(MetaModel {
            type_id: self.type_id,
            type_name: self.type_name,
            properties: self.properties,
            index,
            cross_rules: self.cross_rules,
        })
    }
}
