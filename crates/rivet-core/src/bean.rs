//! The immutable value protocol and its generic operations.
//!
//! A participating type implements [`Bean`] (erased introspection) and
//! [`BeanType`] (typed construction). Everything else — name-keyed reads,
//! structural equality, hashing, and string rendering — is derived here,
//! once, from the type's property descriptors. Concrete types implement
//! `PartialEq`, `Hash`, and `Display` as one-line delegations to these
//! routines rather than hand-rolling per-type logic.

use std::any::Any;
use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::builder::{Builder, Staged};
use crate::error::MetaResult;
use crate::meta::MetaModel;
use crate::value::Value;

/// An immutable value instance exposing its fields through the property
/// protocol.
///
/// Implementations are freely shareable once built: no mutation is ever
/// exposed, so unrestricted concurrent reads are safe.
pub trait Bean: Any + Send + Sync + fmt::Debug {
    /// Returns the meta-model describing this instance's type.
    fn meta_model(&self) -> Arc<MetaModel>;

    /// Returns this instance as `Any`, for descriptor accessors.
    fn as_any(&self) -> &dyn Any;
}

/// A participating concrete type: typed construction on top of [`Bean`].
pub trait BeanType: Bean + Clone {
    /// Returns the type's meta-model.
    ///
    /// Exactly one meta-model instance exists per type; implementations
    /// hold it in a `OnceLock` and return `Arc` clones.
    fn meta() -> Arc<MetaModel>;

    /// Materializes an instance from validated staged values.
    ///
    /// Called by [`Builder::build`] after every validation rule has
    /// passed.
    fn from_staged(staged: &Staged) -> MetaResult<Self>;

    /// Returns an empty builder for this type.
    #[must_use]
    fn builder() -> Builder<Self> {
        Builder::new()
    }

    /// Returns a builder pre-staged with every current buildable field
    /// value.
    ///
    /// Supports the copy-with-modification idiom without per-type copy
    /// logic. Derived properties are not staged; they are recomputed by
    /// the rebuilt instance.
    #[must_use]
    fn to_builder(&self) -> Builder<Self> {
        let mut builder = Self::builder();
        let meta = Self::meta();
        for property in meta.properties() {
            if !property.is_buildable() {
                continue;
            }
            if let Some(value) = property.get_from(self) {
                builder.stage(property.name(), value);
            }
        }
        builder
    }
}

/// Reads a property value by name.
///
/// # Errors
///
/// Returns `MetaError::UnknownProperty` for names the type's meta-model
/// does not declare.
pub fn get(bean: &dyn Bean, name: &str) -> MetaResult<Value> {
    let meta = bean.meta_model();
    let property = meta.property(name)?;
    Ok(property.get_from(bean).unwrap_or(Value::Null))
}

/// Reads a property value by name, tolerating unknown names.
///
/// This is the opt-in best-effort variant of [`get`]; it is never the
/// default access path.
#[must_use]
pub fn find(bean: &dyn Bean, name: &str) -> Option<Value> {
    bean.meta_model()
        .find_property(name)
        .and_then(|property| property.get_from(bean))
}

/// Structural equality over the property protocol.
///
/// Two instances are equal iff they are of the same concrete type and
/// every property value compares equal pairwise. Instances of different
/// concrete types are never equal, even with identical field sets.
#[must_use]
pub fn beans_equal(a: &dyn Bean, b: &dyn Bean) -> bool {
    let meta_a = a.meta_model();
    let meta_b = b.meta_model();
    if meta_a.type_id() != meta_b.type_id() {
        return false;
    }
    meta_a
        .properties()
        .iter()
        .all(|property| property.get_from(a) == property.get_from(b))
}

/// Structural hash over the property protocol.
///
/// Combines the type name with every field value in meta-model order, so
/// equal instances always hash equally.
pub fn hash_bean<H: Hasher>(bean: &dyn Bean, state: &mut H) {
    let meta = bean.meta_model();
    meta.type_name().hash(state);
    for property in meta.properties() {
        property.get_from(bean).unwrap_or(Value::Null).hash(state);
    }
}

/// Deterministic string rendering: every property name and value in
/// meta-model order, enclosed by the type's simple name.
///
/// Intended for diagnostics and logging, not as a parseable format.
#[must_use]
pub fn render(bean: &dyn Bean) -> String {
    let meta = bean.meta_model();
    let mut out = String::with_capacity(64);
    out.push_str(meta.type_name());
    out.push('{');
    for (i, property) in meta.properties().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let value = property.get_from(bean).unwrap_or(Value::Null);
        let _ = write!(out, "{}={}", property.name(), value);
    }
    out.push('}');
    out
}
