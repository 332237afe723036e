//! # Rivet Instruments
//!
//! Financial instrument data models built on the Rivet property protocol.
//!
//! Every type here is an immutable value instance participating in the
//! [`rivet_core`] meta-model protocol: construction goes through a
//! validating builder, and name-keyed reads, equality, hashing, and string
//! rendering are derived generically from each type's property catalog.
//!
//! - [`fra`]: forward rate agreements ready for pricing
//! - [`credit`]: credit-default-swap reference data keys
//! - [`trades`]: trade records and serializable trade lists
//! - [`scenario`]: market-data perturbations for scenario analysis
//!
//! ## Registration
//!
//! Call [`register_instruments`] during program initialization so that
//! generic consumers can resolve these types' meta-models by name:
//!
//! ```rust
//! use rivet_core::MetaRegistry;
//!
//! rivet_instruments::register_instruments(MetaRegistry::global());
//! assert!(MetaRegistry::global().lookup_name("ExpandedFra").is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod credit;
pub mod fra;
pub mod scenario;
pub mod trades;

use rivet_core::MetaRegistry;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::credit::{
        RedCode, RestructuringClause, SeniorityLevel, SingleNameKey, MARKIT_REDCODE_SCHEME,
    };
    pub use crate::fra::{
        BuySell, ExpandedFra, ExpandedFraBuilder, FraDiscountingMethod, RateObservation,
    };
    pub use crate::scenario::{CurveParallelShift, ShiftType, ZeroCurve};
    pub use crate::trades::{Trade, TradeList};
    pub use crate::register_instruments;
}

/// Registers every instrument meta-model with the given registry.
///
/// Idempotent; intended to run once during program initialization, before
/// any generic name-keyed access.
pub fn register_instruments(registry: &MetaRegistry) {
    registry.register::<fra::RateObservation>();
    registry.register::<fra::ExpandedFra>();
    registry.register::<credit::SingleNameKey>();
    registry.register::<trades::Trade>();
    registry.register::<trades::TradeList>();
    registry.register::<scenario::CurveParallelShift>();
}
