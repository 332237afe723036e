//! Staged, validating construction of immutable instances.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::bean::BeanType;
use crate::error::{MetaError, MetaResult};
use crate::meta::MetaModel;
use crate::types::Date;
use crate::value::{EnumLike, Value};

/// The staged values of a builder: property name to currently staged value.
///
/// Absent entries are treated as unset. `from_staged` implementations use
/// the typed extraction helpers to materialize fields after validation has
/// passed.
#[derive(Debug, Clone, Default)]
pub struct Staged {
    values: HashMap<&'static str, Value>,
}

impl Staged {
    /// Returns the staged value for a name, if any.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns true if a non-null value is staged for the name.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(value) if !value.is_null())
    }

    pub(crate) fn insert(&mut self, name: &'static str, value: Value) {
        self.values.insert(name, value);
    }

    fn require(&self, name: &str) -> MetaResult<&Value> {
        self.value(name)
            .filter(|value| !value.is_null())
            .ok_or_else(|| MetaError::validation_failed(name, "must not be null"))
    }

    fn mismatch(name: &str, expected: &str, actual: &Value) -> MetaError {
        MetaError::type_mismatch(name, expected, actual.describe())
    }

    /// Extracts a staged boolean.
    pub fn boolean(&self, name: &str) -> MetaResult<bool> {
        match self.require(name)? {
            Value::Bool(v) => Ok(*v),
            other => Err(Self::mismatch(name, "bool", other)),
        }
    }

    /// Extracts a staged integer.
    pub fn int(&self, name: &str) -> MetaResult<i64> {
        match self.require(name)? {
            Value::Int(v) => Ok(*v),
            other => Err(Self::mismatch(name, "int", other)),
        }
    }

    /// Extracts a staged decimal.
    pub fn decimal(&self, name: &str) -> MetaResult<Decimal> {
        match self.require(name)? {
            Value::Decimal(v) => Ok(*v),
            other => Err(Self::mismatch(name, "decimal", other)),
        }
    }

    /// Extracts a staged date.
    pub fn date(&self, name: &str) -> MetaResult<Date> {
        match self.require(name)? {
            Value::Date(v) => Ok(*v),
            other => Err(Self::mismatch(name, "date", other)),
        }
    }

    /// Extracts a staged text value.
    pub fn text(&self, name: &str) -> MetaResult<String> {
        match self.require(name)? {
            Value::Text(v) => Ok(v.clone()),
            other => Err(Self::mismatch(name, "text", other)),
        }
    }

    /// Extracts a staged enum variant.
    pub fn enum_value<E: EnumLike>(&self, name: &str) -> MetaResult<E> {
        match self.require(name)? {
            Value::Enum(token) if token.type_name == E::TYPE_NAME => {
                E::from_variant(token.variant).ok_or_else(|| {
                    MetaError::type_mismatch(
                        name,
                        E::TYPE_NAME,
                        format!("unknown variant '{}'", token.variant),
                    )
                })
            }
            other => Err(Self::mismatch(name, E::TYPE_NAME, other)),
        }
    }

    /// Extracts a staged nested bean.
    pub fn bean<B: BeanType>(&self, name: &str) -> MetaResult<B> {
        match self.require(name)? {
            Value::Bean(nested) => nested.as_any().downcast_ref::<B>().cloned().ok_or_else(|| {
                MetaError::type_mismatch(
                    name,
                    B::meta().type_name(),
                    nested.meta_model().type_name(),
                )
            }),
            other => Err(Self::mismatch(name, B::meta().type_name(), other)),
        }
    }

    /// Extracts a staged list of nested beans.
    pub fn bean_list<B: BeanType>(&self, name: &str) -> MetaResult<Vec<B>> {
        match self.require(name)? {
            Value::List(items) => items
                .iter()
                .map(|item| match item {
                    Value::Bean(nested) => nested
                        .as_any()
                        .downcast_ref::<B>()
                        .cloned()
                        .ok_or_else(|| Self::mismatch(name, B::meta().type_name(), item)),
                    other => Err(Self::mismatch(name, B::meta().type_name(), other)),
                })
                .collect(),
            other => Err(Self::mismatch(name, "list", other)),
        }
    }
}

/// A mutable staging object mirroring a type's property descriptors.
///
/// The builder moves through `Empty -> Staging -> {Built | Failed}`:
/// values accumulate by name (or typed setter), `build` validates and
/// materializes the immutable instance. A failed `set` or `build` is
/// non-destructive: previously staged values are untouched, so the caller
/// can patch the offending field and retry. After a successful build the
/// staged values persist and the builder may be reused for another
/// independent build.
///
/// Builders are exclusively owned by one logical call path; they carry no
/// internal locking.
#[derive(Debug, Clone)]
pub struct Builder<T: BeanType> {
    meta: Arc<MetaModel>,
    staged: Staged,
    _target: PhantomData<T>,
}

impl<T: BeanType> Builder<T> {
    /// Creates an empty builder for `T`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: T::meta(),
            staged: Staged::default(),
            _target: PhantomData,
        }
    }

    /// Returns the meta-model this builder stages against.
    #[must_use]
    pub fn meta(&self) -> &Arc<MetaModel> {
        &self.meta
    }

    /// Stages a value by property name.
    ///
    /// # Errors
    ///
    /// Returns `MetaError::UnknownProperty` for names the meta-model does
    /// not declare, `MetaError::ReadOnlyProperty` for derived properties,
    /// and `MetaError::TypeMismatch` when the value's runtime kind does
    /// not match the declared kind. `Null` is always stageable;
    /// required-ness is enforced at build time.
    pub fn set(&mut self, name: &str, value: Value) -> MetaResult<&mut Self> {
        let property = self.meta.property(name)?;
        if !property.is_buildable() {
            return Err(MetaError::read_only_property(
                self.meta.type_name(),
                property.name(),
            ));
        }
        if !value.is_null() && !value.matches(property.kind()) {
            return Err(MetaError::type_mismatch(
                property.name(),
                property.kind().to_string(),
                value.describe(),
            ));
        }
        let key = property.name();
        self.staged.insert(key, value);
        Ok(self)
    }

    /// Parses text into the declared kind and stages it.
    ///
    /// # Errors
    ///
    /// Returns `MetaError::UnknownProperty` for unknown names,
    /// `MetaError::ReadOnlyProperty` for derived properties, and
    /// `MetaError::ParseError` for malformed text.
    pub fn set_text(&mut self, name: &str, text: &str) -> MetaResult<&mut Self> {
        let property = self.meta.property(name)?;
        if !property.is_buildable() {
            return Err(MetaError::read_only_property(
                self.meta.type_name(),
                property.name(),
            ));
        }
        let value = property.parse_text(text)?;
        let key = property.name();
        self.staged.insert(key, value);
        Ok(self)
    }

    /// Stages a value for a known property, bypassing the name and kind
    /// checks.
    ///
    /// This is the fast path used by typed setters and `to_builder`, where
    /// the name and kind are correct by construction.
    pub fn stage(&mut self, name: &'static str, value: Value) -> &mut Self {
        debug_assert!(
            self.meta
                .find_property(name)
                .is_some_and(crate::property::PropertyDescriptor::is_buildable),
            "unknown or read-only property '{name}' staged on {}",
            self.meta.type_name()
        );
        self.staged.insert(name, value);
        self
    }

    /// Returns the currently staged value for a property.
    ///
    /// # Errors
    ///
    /// Returns `MetaError::UnknownProperty` for unknown names.
    pub fn get(&self, name: &str) -> MetaResult<Option<&Value>> {
        let property = self.meta.property(name)?;
        Ok(self.staged.value(property.name()))
    }

    /// Validates the staged values and materializes the immutable instance.
    ///
    /// Runs, in order: the required-property check and per-field rules for
    /// every buildable property in declaration order (short-circuiting on
    /// the first failure), then the type's cross-field rules. Derived
    /// properties are skipped: their values come from the built instance.
    /// On failure the staged values are retained so the builder remains
    /// usable for a retry.
    pub fn build(&self) -> MetaResult<T> {
        for property in self.meta.properties() {
            if !property.is_buildable() {
                continue;
            }
            let staged = self.staged.value(property.name());
            let unset = !staged.is_some_and(|value| !value.is_null());
            if unset {
                if property.is_required() {
                    return Err(MetaError::validation_failed(
                        property.name(),
                        "must not be null",
                    ));
                }
                continue;
            }
            if let (Some(rule), Some(value)) = (property.rule(), staged) {
                rule.check(property.name(), value)?;
            }
        }
        for rule in self.meta.cross_rules() {
            rule.check(&self.staged)?;
        }
        T::from_staged(&self.staged)
    }
}

impl<T: BeanType> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}
