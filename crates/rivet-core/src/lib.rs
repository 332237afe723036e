//! # Rivet Core
//!
//! Reflection-free property protocol for immutable value types.
//!
//! This crate provides the building blocks that let arbitrary immutable
//! record types be introspected, built, validated, and compared without
//! native runtime reflection:
//!
//! - **Property Descriptors**: per-field metadata with accessor tables
//! - **Meta-Models**: the per-type catalog of property descriptors
//! - **Builders**: staged, validating construction of immutable instances
//! - **Registry**: process-wide, race-safe meta-model registration
//! - **Generic protocol**: name-keyed reads, structural equality, hashing
//!   and deterministic string rendering derived from the descriptor list
//!
//! ## Design Philosophy
//!
//! - **No reflection**: field access goes through per-type accessor tables
//!   built once at meta-model construction
//! - **Errors, not panics**: expected failures (unknown names, type
//!   mismatches, validation) surface as [`MetaError`] results
//! - **Immutable once built**: a value produced by a builder can never
//!   violate its declared invariants through any reachable API
//!
//! ## Example
//!
//! ```rust
//! use rivet_core::prelude::*;
//! # use std::any::Any;
//! # use std::sync::{Arc, OnceLock};
//! # #[derive(Debug, Clone)]
//! # struct Tenor { months: i64 }
//! # impl Bean for Tenor {
//! #     fn meta_model(&self) -> Arc<MetaModel> { <Self as BeanType>::meta() }
//! #     fn as_any(&self) -> &dyn Any { self }
//! # }
//! # impl BeanType for Tenor {
//! #     fn meta() -> Arc<MetaModel> {
//! #         static META: OnceLock<Arc<MetaModel>> = OnceLock::new();
//! #         META.get_or_init(|| {
//! #             MetaModel::of::<Tenor>("Tenor")
//! #                 .property(PropertyDescriptor::required("months", ValueKind::Int, |any| {
//! #                     any.downcast_ref::<Tenor>().map(|t| Value::Int(t.months))
//! #                 }))
//! #                 .finish()
//! #         }).clone()
//! #     }
//! #     fn from_staged(staged: &Staged) -> MetaResult<Self> {
//! #         Ok(Self { months: staged.int("months")? })
//! #     }
//! # }
//! let mut builder = Tenor::builder();
//! builder.set("months", Value::Int(6))?;
//! let tenor = builder.build()?;
//! assert_eq!(get(&tenor, "months")?, Value::Int(6));
//! # Ok::<(), MetaError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod bean;
pub mod builder;
pub mod error;
pub mod meta;
pub mod property;
pub mod registry;
pub mod types;
pub mod validate;
pub mod value;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bean::{beans_equal, find, get, hash_bean, render, Bean, BeanType};
    pub use crate::builder::{Builder, Staged};
    pub use crate::error::{MetaError, MetaResult};
    pub use crate::meta::{MetaModel, MetaModelBuilder};
    pub use crate::property::PropertyDescriptor;
    pub use crate::registry::MetaRegistry;
    pub use crate::types::{Currency, Date, StandardId};
    pub use crate::validate::{CrossRule, Rule};
    pub use crate::value::{EnumLike, EnumToken, Value, ValueKind};
}

// Re-export commonly used types at crate root
pub use bean::{Bean, BeanType};
pub use builder::Builder;
pub use error::{MetaError, MetaResult};
pub use meta::MetaModel;
pub use registry::MetaRegistry;
pub use value::{Value, ValueKind};
