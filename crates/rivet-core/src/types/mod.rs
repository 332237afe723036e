//! Shared domain primitives used by property values.

mod currency;
mod date;
mod id;

pub use currency::Currency;
pub use date::Date;
pub use id::StandardId;
